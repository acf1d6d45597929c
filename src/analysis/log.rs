use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::seconds::Seconds;

/// Seconds of usage per key for a single day.
pub type DayRecord = BTreeMap<String, Seconds>;

/// The whole dataset: date label to the [DayRecord] of that day.
///
/// Date labels are treated as opaque strings. They are kept in lexical order, which is also the
/// iteration order every query observes. Values are not validated, so negative or fractional
/// seconds flow into sums unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UsageLog {
    days: BTreeMap<String, DayRecord>,
}

impl UsageLog {
    pub fn new(days: BTreeMap<String, DayRecord>) -> Self {
        Self { days }
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    pub fn days(&self) -> impl Iterator<Item = (&str, &DayRecord)> {
        self.days.iter().map(|(date, record)| (date.as_str(), record))
    }
}

impl FromIterator<(String, DayRecord)> for UsageLog {
    fn from_iter<T: IntoIterator<Item = (String, DayRecord)>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
