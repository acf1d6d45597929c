//! Turns a [CommandOutput] into something a person (or a script) can read.

use std::io::{self, Write};

use anyhow::Result;

use crate::{
    analysis::{
        query::{KeyTotal, KeyUsage},
        seconds::Seconds,
    },
    cli::command::CommandOutput,
    utils::format::{hours_minutes, readable_duration, with_thousands},
};

/// Dates are listed in full up to this count, otherwise only both ends are shown.
const MAX_LISTED_DATES: usize = 10;
const DATES_SHOWN_PER_END: usize = 5;

pub fn render_json(output: &CommandOutput, writer: &mut impl Write) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, output)?;
    writeln!(writer)?;
    Ok(())
}

pub fn render_text(output: &CommandOutput, writer: &mut impl Write) -> io::Result<()> {
    match output {
        CommandOutput::SumKey {
            key,
            result,
            suggestions,
        } => write_key_total(writer, key, result, suggestions),
        CommandOutput::Search { term, keys } => write_search(writer, term, keys),
        CommandOutput::Top { requested, entries } => write_top(writer, *requested, entries),
        CommandOutput::ListKeys { keys } => write_keys(writer, keys),
        CommandOutput::UsageByDate { key, usage } => write_usage_by_date(writer, key, usage),
    }
}

fn write_key_total(
    w: &mut impl Write,
    key: &str,
    result: &KeyTotal,
    suggestions: &[String],
) -> io::Result<()> {
    if result.total.is_zero() {
        writeln!(w, "\nKey '{key}' not found in any day.")?;
        if !suggestions.is_empty() {
            writeln!(w, "\nDid you mean one of these?")?;
            for (i, suggestion) in suggestions.iter().enumerate() {
                writeln!(w, "  {}. {suggestion}", i + 1)?;
            }
        }
        return Ok(());
    }

    let total = result.total;
    writeln!(w, "\n{}", "=".repeat(50))?;
    writeln!(w, "Results for: {key}")?;
    writeln!(w, "{}", "=".repeat(50))?;
    writeln!(
        w,
        "Total time: {} seconds ({})",
        with_thousands(total),
        readable_duration(total)
    )?;
    writeln!(w, "Total time (simplified): {}", hours_minutes(total))?;
    writeln!(w, "Found on {} days", result.days_found.len())?;
    if let Some(average) = result.average_per_day() {
        write_average(w, average)?;
    }

    let days = &result.days_found;
    if days.len() <= MAX_LISTED_DATES {
        writeln!(w, "\nDates found: {}", days.join(", "))?;
    } else {
        writeln!(
            w,
            "\nFirst {DATES_SHOWN_PER_END} dates: {}",
            days[..DATES_SHOWN_PER_END].join(", ")
        )?;
        writeln!(
            w,
            "Last {DATES_SHOWN_PER_END} dates: {}",
            days[days.len() - DATES_SHOWN_PER_END..].join(", ")
        )?;
    }
    Ok(())
}

fn write_average(w: &mut impl Write, average: Seconds) -> io::Result<()> {
    writeln!(
        w,
        "Average per day: {:.0} seconds ({})",
        *average,
        hours_minutes(average)
    )
}

fn write_search(w: &mut impl Write, term: &str, keys: &[String]) -> io::Result<()> {
    if keys.is_empty() {
        return writeln!(w, "\nNo keys found containing '{term}'.");
    }
    writeln!(w, "\nFound {} keys containing '{term}':", keys.len())?;
    for (i, key) in keys.iter().enumerate() {
        writeln!(w, "  {:2}. {key}", i + 1)?;
    }
    Ok(())
}

fn write_top(w: &mut impl Write, requested: i64, entries: &[KeyUsage]) -> io::Result<()> {
    writeln!(w, "\n{}", "=".repeat(70))?;
    writeln!(w, "TOP {requested} APPS BY TOTAL TIME")?;
    writeln!(w, "{}", "=".repeat(70))?;
    writeln!(
        w,
        "{:<4} {:<35} {:<20} {:<10}",
        "Rank", "App Name", "Total Time", "Seconds"
    )?;
    writeln!(w, "{}", "-".repeat(70))?;
    for (i, entry) in entries.iter().enumerate() {
        writeln!(
            w,
            "{:<4} {:<35} {:<20} {}",
            i + 1,
            entry.key,
            hours_minutes(entry.total),
            with_thousands(entry.total)
        )?;
    }
    Ok(())
}

fn write_keys(w: &mut impl Write, keys: &[String]) -> io::Result<()> {
    writeln!(w, "\nFound {} unique keys:", keys.len())?;
    writeln!(w, "{}", "=".repeat(50))?;
    for (i, key) in keys.iter().enumerate() {
        writeln!(w, "{:3}. {key}", i + 1)?;
    }
    writeln!(
        w,
        "\nTip: You can copy any of these key names to sum their values."
    )
}

fn write_usage_by_date<'a>(
    w: &mut impl Write,
    key: &str,
    usage: impl IntoIterator<Item = (&'a String, &'a Seconds)>,
) -> io::Result<()> {
    let mut usage = usage.into_iter().peekable();
    if usage.peek().is_none() {
        return writeln!(w, "\nKey '{key}' not found in any day.");
    }

    writeln!(w, "\n{}", "=".repeat(80))?;
    writeln!(w, "USAGE BY DATE FOR: {key}")?;
    writeln!(w, "{}", "=".repeat(80))?;
    writeln!(
        w,
        "{:<12} {:<10} {:<15} {:<20}",
        "Date", "Seconds", "Time (h:m)", "Full Time"
    )?;
    writeln!(w, "{}", "-".repeat(80))?;

    let mut total = Seconds::ZERO;
    let mut days = 0;
    for (date, seconds) in usage {
        write_usage_row(w, date, *seconds)?;
        total += *seconds;
        days += 1;
    }

    writeln!(w, "{}", "-".repeat(80))?;
    write_usage_row(w, "TOTAL", total)?;
    write_average(w, Seconds::new(*total / days as f64))
}

fn write_usage_row(w: &mut impl Write, label: &str, seconds: Seconds) -> io::Result<()> {
    writeln!(
        w,
        "{:<12} {:<10} {:<15} {:<20}",
        label,
        with_thousands(seconds),
        hours_minutes(seconds),
        readable_duration(seconds)
    )
}
