use crate::raw::Scalar;

pub const DURATION_UNAVAILABLE: &str = "N/A";

/// `125` → `"2h 5m"`. Missing, zero and negative counts are `N/A`.
pub fn format_duration(minutes: Option<i64>) -> String {
    match minutes {
        Some(m) if m > 0 => format!("{}h {}m", m / 60, m % 60),
        _ => DURATION_UNAVAILABLE.to_string(),
    }
}

pub fn duration_label(raw: Option<&Scalar>) -> String {
    format_duration(raw.and_then(Scalar::as_whole_number))
}
