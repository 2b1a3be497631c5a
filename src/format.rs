/// Format seconds as "MM:SS:CC" (minutes, seconds, hundredths).
///
/// Every field is truncated, never rounded. Minutes do not wrap.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return String::from("00:00:00");
    }

    let whole = seconds.floor();
    let minutes = (seconds / 60.0).floor() as u64;
    let secs = (seconds % 60.0).floor() as u64;
    let hundredths = ((seconds - whole) * 100.0).floor() as u64;

    format!("{:02}:{:02}:{:02}", minutes, secs, hundredths)
}

/// Format a lap duration as fixed-point seconds with one decimal.
pub fn format_split(seconds: f64) -> String {
    format!("{:.1}", seconds)
}
