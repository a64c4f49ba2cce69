//! Clock times are carried as zero-padded `"HH:MM"` strings (the wire
//! format of the store and backup files). Lexicographic order matches
//! chronological order, so comparisons stay string comparisons and the
//! arithmetic here works on total minutes.

pub const MINUTES_PER_DAY: i32 = 24 * 60;

/// Parse `"HH:MM"` into total minutes since midnight.
pub fn parse_hm(s: &str) -> Option<i32> {
    let (h, m) = s.split_once(':')?;
    if h.len() != 2 || m.len() != 2 {
        return None;
    }
    let h: i32 = h.parse().ok()?;
    let m: i32 = m.parse().ok()?;
    if h > 23 || m > 59 {
        return None;
    }
    Some(h * 60 + m)
}

/// Format total minutes as zero-padded `"HH:MM"`, wrapping modulo 24h.
pub fn format_hm(total_minutes: i32) -> String {
    let wrapped = total_minutes.rem_euclid(MINUTES_PER_DAY);
    format!("{:02}:{:02}", wrapped / 60, wrapped % 60)
}

/// Hour of day as a fraction, e.g. `"09:30"` -> 9.5. Used by the grid to
/// decide which hour rows an event overlaps.
pub fn hour_fraction(s: &str) -> f32 {
    match parse_hm(s) {
        Some(mins) => mins as f32 / 60.0,
        None => 0.0,
    }
}

/// Retime an event to a new start hour, keeping the original start minute
/// and the original duration. Both results wrap modulo 24h, so an event
/// moved late enough spills past midnight rather than clamping.
///
/// Malformed inputs are returned unchanged; the edit form is the only
/// producer of time strings and validates before saving.
pub fn shift_preserving_duration(
    start: &str,
    end: &str,
    new_start_hour: u32,
) -> (String, String) {
    let (Some(start_mins), Some(end_mins)) = (parse_hm(start), parse_hm(end)) else {
        return (start.to_string(), end.to_string());
    };
    let duration = end_mins - start_mins;
    let new_start = new_start_hour as i32 * 60 + start_mins % 60;
    let new_end = new_start + duration;
    (format_hm(new_start), format_hm(new_end))
}
