use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use super::{log::UsageLog, seconds::Seconds};

/// Result of summing one key across every day of the log.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct KeyTotal {
    pub total: Seconds,
    /// Dates containing the key, in the log's iteration order.
    pub days_found: Vec<String>,
}

impl KeyTotal {
    /// Average seconds per day the key was found on. `None` if it was never found.
    pub fn average_per_day(&self) -> Option<Seconds> {
        if self.days_found.is_empty() {
            None
        } else {
            Some(Seconds::new(*self.total / self.days_found.len() as f64))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyUsage {
    pub key: String,
    pub total: Seconds,
}

impl KeyUsage {
    fn new(key: String) -> Self {
        Self {
            key,
            total: Seconds::ZERO,
        }
    }
}

/// Every key present on at least one day, deduplicated and sorted.
pub fn list_keys(log: &UsageLog) -> Vec<String> {
    log.days()
        .flat_map(|(_, apps)| apps.keys().map(String::as_str))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_owned)
        .collect()
}

/// Sums an exact (case-sensitive) key across all days. A missing key and an empty log both
/// produce a zero total with no days.
pub fn sum_key(log: &UsageLog, key: &str) -> KeyTotal {
    let mut result = KeyTotal::default();
    for (date, apps) in log.days() {
        if let Some(seconds) = apps.get(key) {
            result.total += *seconds;
            result.days_found.push(date.to_owned());
        }
    }
    result
}

/// Case-insensitive substring search over [list_keys]. An empty term matches everything.
pub fn search_keys(log: &UsageLog, term: &str) -> Vec<String> {
    let term = term.to_lowercase();
    list_keys(log)
        .into_iter()
        .filter(|key| key.to_lowercase().contains(&term))
        .collect()
}

/// Returns at most `n` keys with the largest totals across all days, largest first.
/// Order among equal totals is not part of the contract.
pub fn top_keys_by_total(log: &UsageLog, n: i64) -> Vec<KeyUsage> {
    let Ok(n) = usize::try_from(n) else {
        return vec![];
    };

    let mut map = BTreeMap::<&str, KeyUsage>::new();
    for (_, apps) in log.days() {
        for (app, seconds) in apps {
            let usage = map
                .entry(app.as_str())
                .or_insert_with(|| KeyUsage::new(app.clone()));
            usage.total += *seconds;
        }
    }

    let mut usages = map.into_values().collect::<Vec<_>>();
    usages.sort_by(|a, b| b.total.total_cmp(&a.total));
    usages.truncate(n);
    usages
}

/// Seconds recorded for `key` on each day it appears, ordered by date.
pub fn usage_by_date(log: &UsageLog, key: &str) -> BTreeMap<String, Seconds> {
    log.days()
        .filter_map(|(date, apps)| apps.get(key).map(|seconds| (date.to_owned(), *seconds)))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use crate::analysis::{
        log::UsageLog,
        query::{list_keys, search_keys, sum_key, top_keys_by_total, usage_by_date, KeyTotal},
        seconds::Seconds,
    };

    fn scenario() -> UsageLog {
        serde_json::from_str(
            r#"{"2024-01-01": {"app.exe": 120, "x": 5}, "2024-01-02": {"app.exe": 60}}"#,
        )
        .unwrap()
    }

    fn wider() -> UsageLog {
        serde_json::from_str(
            r#"{
                "2024-03-02": {"Code.exe": 3600, "brave.exe": 900, "Slack": 30},
                "2024-03-01": {"code.exe": 10, "brave.exe": 1200},
                "2024-03-03": {"Code.exe": 1800, "notepad.exe": 900, "neg": -40}
            }"#,
        )
        .unwrap()
    }

    fn secs(value: i64) -> Seconds {
        Seconds::from(value)
    }

    #[test]
    fn test_scenario_queries() {
        let log = scenario();

        assert_eq!(
            sum_key(&log, "app.exe"),
            KeyTotal {
                total: secs(180),
                days_found: vec!["2024-01-01".into(), "2024-01-02".into()],
            }
        );

        let top = top_keys_by_total(&log, 1);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].key, "app.exe");
        assert_eq!(top[0].total, secs(180));

        assert_eq!(list_keys(&log), vec!["app.exe", "x"]);
    }

    #[test]
    fn test_list_keys_is_sorted_union() {
        let log = wider();
        let keys = list_keys(&log);

        let mut sorted = keys.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(keys, sorted);

        let union = log
            .days()
            .flat_map(|(_, apps)| apps.keys().cloned())
            .collect::<BTreeSet<_>>();
        assert_eq!(keys.into_iter().collect::<BTreeSet<_>>(), union);
    }

    #[test]
    fn test_sum_key_is_case_sensitive() {
        let log = wider();
        assert_eq!(sum_key(&log, "Code.exe").total, secs(5400));
        assert_eq!(sum_key(&log, "code.exe").total, secs(10));
        assert_eq!(sum_key(&log, "CODE.EXE"), KeyTotal::default());
    }

    #[test]
    fn test_sum_key_passes_negative_values_through() {
        let total = sum_key(&wider(), "neg");
        assert_eq!(total.total, secs(-40));
        assert_eq!(total.days_found, vec!["2024-03-03"]);
    }

    #[test]
    fn test_fractional_values_flow_into_every_query() {
        let log: UsageLog = serde_json::from_str(
            r#"{"2024-01-01": {"app.exe": 120.5, "x": 5}, "2024-01-02": {"app.exe": 60.25}}"#,
        )
        .unwrap();

        assert_eq!(sum_key(&log, "app.exe").total, Seconds::new(180.75));
        assert_eq!(sum_key(&log, "x").total, secs(5));

        let top = top_keys_by_total(&log, 1);
        assert_eq!(top[0].key, "app.exe");
        assert_eq!(top[0].total, Seconds::new(180.75));

        let usage = usage_by_date(&log, "app.exe");
        assert_eq!(usage.get("2024-01-01"), Some(&Seconds::new(120.5)));
    }

    #[test]
    fn test_sums_beyond_i64_do_not_overflow() {
        let log: UsageLog =
            serde_json::from_str(r#"{"d1": {"a": 9223372036854775807}, "d2": {"a": 1}}"#)
                .unwrap();
        let expected = Seconds::new(2f64.powi(63));

        let total = sum_key(&log, "a");
        assert_eq!(total.total, expected);
        assert_eq!(total.days_found, vec!["d1", "d2"]);
        assert_eq!(top_keys_by_total(&log, 1)[0].total, expected);
        assert_eq!(usage_by_date(&log, "a").values().sum::<Seconds>(), expected);
    }

    #[test]
    fn test_average_per_day_guards_missing_keys() {
        let log = wider();
        assert_eq!(sum_key(&log, "missing").average_per_day(), None);
        assert_eq!(sum_key(&log, "Code.exe").average_per_day(), Some(secs(2700)));
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let log = wider();
        assert_eq!(search_keys(&log, "CODE"), search_keys(&log, "code"));
        assert_eq!(search_keys(&log, "code"), vec!["Code.exe", "code.exe"]);
        assert_eq!(search_keys(&log, ".EXE").len(), 4);
        assert!(search_keys(&log, "zzz").is_empty());
    }

    #[test]
    fn test_empty_search_term_matches_all_keys() {
        let log = wider();
        assert_eq!(search_keys(&log, ""), list_keys(&log));
    }

    #[test]
    fn test_top_keys_are_sorted_descending_and_truncated() {
        let log = wider();
        let top = top_keys_by_total(&log, 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].key, "Code.exe");
        assert_eq!(top[0].total, secs(5400));
        assert_eq!(top[1].key, "brave.exe");
        assert_eq!(top[1].total, secs(2100));

        let all = top_keys_by_total(&log, 100);
        assert_eq!(all.len(), list_keys(&log).len());
        assert!(all.windows(2).all(|pair| pair[0].total >= pair[1].total));
    }

    #[test]
    fn test_top_keys_ties_are_some_permutation() {
        let log: UsageLog =
            serde_json::from_str(r#"{"d1": {"a": 10, "b": 10}, "d2": {"c": 5, "d": 10}}"#)
                .unwrap();
        let top = top_keys_by_total(&log, 3);
        let leaders = top.iter().map(|v| v.key.as_str()).collect::<BTreeSet<_>>();
        assert_eq!(leaders, BTreeSet::from(["a", "b", "d"]));
        assert!(top.iter().all(|v| v.total == secs(10)));
    }

    #[test]
    fn test_top_keys_with_non_positive_count_is_empty() {
        let log = wider();
        assert!(top_keys_by_total(&log, 0).is_empty());
        assert!(top_keys_by_total(&log, -3).is_empty());
    }

    #[test]
    fn test_top_totals_cover_every_value() {
        let log = wider();
        let all_values: Seconds = log.days().flat_map(|(_, apps)| apps.values()).sum();
        let keys = list_keys(&log).len() as i64;
        let summed: Seconds = top_keys_by_total(&log, keys).iter().map(|v| v.total).sum();
        assert_eq!(summed, all_values);
    }

    #[test]
    fn test_usage_by_date_is_ordered_and_matches_sum() {
        let log = wider();
        let usage = usage_by_date(&log, "brave.exe");
        assert_eq!(
            usage.keys().collect::<Vec<_>>(),
            vec!["2024-03-01", "2024-03-02"]
        );
        assert_eq!(
            usage.values().sum::<Seconds>(),
            sum_key(&log, "brave.exe").total
        );
        assert!(usage_by_date(&log, "missing").is_empty());
    }

    #[test]
    fn test_empty_log_queries_return_empty_results() {
        let log = UsageLog::default();
        assert!(list_keys(&log).is_empty());
        assert_eq!(sum_key(&log, "anything"), KeyTotal::default());
        assert!(search_keys(&log, "").is_empty());
        assert!(top_keys_by_total(&log, 10).is_empty());
        assert!(usage_by_date(&log, "anything").is_empty());
    }
}
