use std::collections::BTreeMap;

use serde::Serialize;
use tracing::instrument;

use crate::analysis::{
    log::UsageLog,
    query::{list_keys, search_keys, sum_key, top_keys_by_total, usage_by_date, KeyTotal, KeyUsage},
    seconds::Seconds,
};

/// Count used for the top keys table when none (or garbage) is supplied.
pub const DEFAULT_TOP_COUNT: i64 = 10;

/// How many similar keys are offered when a summed key is not found.
pub const MAX_SUGGESTIONS: usize = 5;

/// A single query against the log, with its arguments already parsed. Both the interactive shell
/// and one-shot invocations are reduced to this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SumKey(String),
    Search(String),
    Top(i64),
    ListKeys,
    UsageByDate(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum CommandOutput {
    SumKey {
        key: String,
        result: KeyTotal,
        /// Only filled in when the key was not found.
        suggestions: Vec<String>,
    },
    Search {
        term: String,
        keys: Vec<String>,
    },
    Top {
        requested: i64,
        entries: Vec<KeyUsage>,
    },
    ListKeys {
        keys: Vec<String>,
    },
    UsageByDate {
        key: String,
        usage: BTreeMap<String, Seconds>,
    },
}

#[instrument(skip(log))]
pub fn dispatch(log: &UsageLog, command: Command) -> CommandOutput {
    match command {
        Command::SumKey(key) => {
            let result = sum_key(log, &key);
            // A zero total is reported as "not found", even if the key exists with zero seconds.
            let suggestions = if result.total.is_zero() {
                let mut similar = search_keys(log, &key);
                similar.truncate(MAX_SUGGESTIONS);
                similar
            } else {
                vec![]
            };
            CommandOutput::SumKey {
                key,
                result,
                suggestions,
            }
        }
        Command::Search(term) => {
            let keys = search_keys(log, &term);
            CommandOutput::Search { term, keys }
        }
        Command::Top(requested) => CommandOutput::Top {
            requested,
            entries: top_keys_by_total(log, requested),
        },
        Command::ListKeys => CommandOutput::ListKeys {
            keys: list_keys(log),
        },
        Command::UsageByDate(key) => {
            let usage = usage_by_date(log, &key);
            CommandOutput::UsageByDate { key, usage }
        }
    }
}
