//! Display helpers for keys, durations and coin amounts.

/// Abbreviate a long key or address as `Mp0eb9...1a43`.
///
/// Keeps the first six and last four characters. Strings too short to
/// benefit are returned unchanged.
pub fn shorten(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= 13 {
        return s.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

/// Render a duration in seconds using its two most significant units.
pub fn format_duration(secs: u64) -> String {
    const MINUTE: u64 = 60;
    const HOUR: u64 = 60 * MINUTE;
    const DAY: u64 = 24 * HOUR;

    match secs {
        s if s < MINUTE => format!("{s}s"),
        s if s < HOUR => format!("{}m {}s", s / MINUTE, s % MINUTE),
        s if s < DAY => format!("{}h {}m", s / HOUR, (s % HOUR) / MINUTE),
        s => format!("{}d {}h", s / DAY, (s % DAY) / HOUR),
    }
}

/// A display amount with four decimals, as shown to owners.
pub fn format_coins(amount: f64) -> String {
    format!("{amount:.4}")
}
