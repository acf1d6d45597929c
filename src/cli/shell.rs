use std::{
    io::{BufRead, Write},
    str::FromStr,
};

use anyhow::{anyhow, Result};
use tracing::{debug, info};

use crate::analysis::log::UsageLog;

use super::{
    command::{dispatch, Command, DEFAULT_TOP_COUNT},
    output::render_text,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    SumKey,
    Search,
    Top,
    ListKeys,
    UsageByDate,
    Exit,
}

impl FromStr for MenuChoice {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(Self::SumKey),
            "2" => Ok(Self::Search),
            "3" => Ok(Self::Top),
            "4" => Ok(Self::ListKeys),
            "5" => Ok(Self::UsageByDate),
            "6" => Ok(Self::Exit),
            other => Err(anyhow!("Unknown menu choice {other:?}")),
        }
    }
}

/// Outcome of asking the user what to do next.
enum Step {
    Run(Command),
    /// Input was rejected; go back to the menu.
    Skip,
    Exit,
}

/// Parses the count for the top keys table. Anything that isn't an integer falls back to
/// [DEFAULT_TOP_COUNT].
pub fn parse_top_count(input: &str) -> i64 {
    input.trim().parse().unwrap_or(DEFAULT_TOP_COUNT)
}

/// Interactive menu over an already loaded log. Reads choices from `input` and prints results
/// into `output` until the user exits or the input ends.
pub struct Shell<'a, R, W> {
    log: &'a UsageLog,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub fn new(log: &'a UsageLog, input: R, output: W) -> Self {
        Self { log, input, output }
    }

    pub fn run(mut self) -> Result<()> {
        if self.log.is_empty() {
            writeln!(self.output, "No data loaded. Exiting.")?;
            return Ok(());
        }

        writeln!(self.output, "\n{}", "=".repeat(60))?;
        writeln!(self.output, "         SCREEN TIME ANALYZER (TIME IN SECONDS)")?;
        writeln!(self.output, "{}", "=".repeat(60))?;

        loop {
            self.print_menu()?;
            match self.next_step()? {
                Step::Run(command) => {
                    let output = dispatch(self.log, command);
                    render_text(&output, &mut self.output)?;
                }
                Step::Skip => continue,
                Step::Exit => break,
            }
        }

        writeln!(self.output, "\nGoodbye!")?;
        info!("Interactive session finished");
        Ok(())
    }

    fn print_menu(&mut self) -> Result<()> {
        writeln!(self.output, "\nChoose an option:")?;
        writeln!(self.output, "1. Sum values for a specific key")?;
        writeln!(self.output, "2. Search for keys containing a term")?;
        writeln!(self.output, "3. Show top apps by total time")?;
        writeln!(self.output, "4. Show all unique keys")?;
        writeln!(self.output, "5. Analyze key usage by date")?;
        writeln!(self.output, "6. Exit")?;
        Ok(())
    }

    fn next_step(&mut self) -> Result<Step> {
        let Some(choice) = self.prompt("\nEnter your choice (1-6): ")? else {
            return Ok(Step::Exit);
        };
        let choice = match choice.parse::<MenuChoice>() {
            Ok(choice) => choice,
            Err(e) => {
                debug!("{e}");
                writeln!(self.output, "\nInvalid choice. Please try again.")?;
                return Ok(Step::Skip);
            }
        };

        match choice {
            MenuChoice::SumKey => self.required(
                "\nEnter the exact key name (case-sensitive): ",
                "Key name cannot be empty.",
                Command::SumKey,
            ),
            MenuChoice::Search => self.required(
                "\nEnter search term: ",
                "Search term cannot be empty.",
                Command::Search,
            ),
            MenuChoice::Top => {
                let Some(count) =
                    self.prompt("\nEnter number of top apps to show (default 10): ")?
                else {
                    return Ok(Step::Exit);
                };
                Ok(Step::Run(Command::Top(parse_top_count(&count))))
            }
            MenuChoice::ListKeys => Ok(Step::Run(Command::ListKeys)),
            MenuChoice::UsageByDate => self.required(
                "\nEnter the exact key name to analyze by date: ",
                "Key name cannot be empty.",
                Command::UsageByDate,
            ),
            MenuChoice::Exit => Ok(Step::Exit),
        }
    }

    /// Asks for a non-empty argument. Empty answers never reach the engine.
    fn required(
        &mut self,
        question: &str,
        rejection: &str,
        command: impl FnOnce(String) -> Command,
    ) -> Result<Step> {
        match self.prompt(question)? {
            None => Ok(Step::Exit),
            Some(value) if value.is_empty() => {
                writeln!(self.output, "{rejection}")?;
                Ok(Step::Skip)
            }
            Some(value) => Ok(Step::Run(command(value))),
        }
    }

    /// Returns the trimmed answer, or `None` once the input is exhausted.
    fn prompt(&mut self, question: &str) -> Result<Option<String>> {
        write!(self.output, "{question}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}
