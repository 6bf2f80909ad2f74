//! Display helpers for simulated durations.

/// Format a duration in seconds as `m:ss`, truncating fractional seconds.
///
/// Minutes are not rolled over into hours; timetable sheets quote long
/// runs as e.g. `95:30`. Negative and non-finite input formats as `0:00`.
///
/// # Examples
///
/// ```
/// use railsim_server::domain::format_mm_ss;
///
/// assert_eq!(format_mm_ss(0.0), "0:00");
/// assert_eq!(format_mm_ss(307.5), "5:07");
/// assert_eq!(format_mm_ss(5730.0), "95:30");
/// ```
pub fn format_mm_ss(seconds: f64) -> String {
    let whole = if seconds.is_finite() && seconds > 0.0 {
        seconds.trunc() as u64
    } else {
        0
    };
    format!("{}:{:02}", whole / 60, whole % 60)
}
