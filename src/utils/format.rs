use crate::analysis::seconds::Seconds;

/// Formats seconds starting from the largest non-zero unit, e.g. `1h 1m 1s`, `1m 30s`, `0s`.
///
/// Fractions of a second are dropped. Division is floored, so negative inputs decompose into a
/// negative hour count with positive minutes and seconds.
pub fn readable_duration(seconds: Seconds) -> String {
    let whole = seconds.whole();
    let hours = whole.div_euclid(3600.);
    let minutes = (whole.rem_euclid(3600.) / 60.).floor();
    let secs = whole.rem_euclid(60.);

    if hours > 0. {
        format!("{hours:.0}h {minutes:.0}m {secs:.0}s")
    } else if minutes > 0. {
        format!("{minutes:.0}m {secs:.0}s")
    } else {
        format!("{secs:.0}s")
    }
}

/// Formats seconds as hours and minutes, truncating leftover seconds.
pub fn hours_minutes(seconds: Seconds) -> String {
    let total_minutes = seconds.whole().div_euclid(60.);
    let hours = total_minutes.div_euclid(60.);
    let minutes = total_minutes.rem_euclid(60.);

    if hours > 0. {
        format!("{hours:.0}h {minutes:.0}m")
    } else {
        format!("{minutes:.0}m")
    }
}

/// Groups the whole part in threes with commas: `1234567.5` becomes `1,234,567.5`.
pub fn with_thousands(seconds: Seconds) -> String {
    let text = seconds.abs().to_string();
    let (digits, fraction) = text.split_once('.').unwrap_or((&text, ""));

    let mut grouped = String::with_capacity(text.len() + digits.len() / 3 + 1);
    if *seconds < 0. {
        grouped.push('-');
    }
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if !fraction.is_empty() {
        grouped.push('.');
        grouped.push_str(fraction);
    }
    grouped
}
