//! Human-facing formatting for queue reports.

/// Format a 1-based position as an English ordinal.
///
/// 11, 12 and 13 (and 111, 112, ...) always take "th" regardless of the
/// trailing digit.
pub fn ordinal(num: usize) -> String {
    let suffix = if (11..=13).contains(&(num % 100)) {
        "th"
    } else {
        match num % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        }
    };
    format!("{num}{suffix}")
}

/// Format whole seconds as `m:ss`, switching to `h:mm:ss` past the hour.
pub fn timestamp(total_secs: u64) -> String {
    let (mins, secs) = (total_secs / 60, total_secs % 60);
    if mins > 60 {
        let (hours, mins) = (mins / 60, mins % 60);
        return format!("{hours}:{mins:02}:{secs:02}");
    }
    format!("{mins}:{secs:02}")
}

/// A track name as shown to the user: everything before the first dot.
pub fn humanize(name: &str) -> &str {
    name.split('.').next().unwrap_or(name)
}
