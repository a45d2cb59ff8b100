//! Display formatting for file sizes and upload dates.

use chrono::{DateTime, Utc};

/// Binary size units, 1024 apart.
const UNITS: &[&str] = &["Bytes", "KB", "MB", "GB", "TB"];

/// Format a byte count as a human-readable size.
///
/// Uses 1024-based units with at most two decimals and no trailing
/// zeros: `0 Bytes`, `10 Bytes`, `1.5 KB`, `5 MB`.
#[must_use]
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_owned();
    }

    #[allow(clippy::cast_precision_loss)] // display only
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    let rounded = format!("{size:.2}");
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed} {}", UNITS[unit])
}

/// Format an upload timestamp as a calendar date (`YYYY-MM-DD`, UTC).
#[must_use]
pub fn format_upload_date(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d").to_string()
}

/// The current wall-clock time.
///
/// Read through `web-time` so the same call works on WASM
/// (`Date.now()`) and native targets.
#[must_use]
pub fn now_utc() -> DateTime<Utc> {
    let since_epoch = web_time::SystemTime::now()
        .duration_since(web_time::UNIX_EPOCH)
        .unwrap_or_default();
    i64::try_from(since_epoch.as_secs())
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, since_epoch.subsec_nanos()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_bytes() {
        assert_eq!(format_file_size(0), "0 Bytes");
    }

    #[test]
    fn small_sizes_stay_in_bytes() {
        assert_eq!(format_file_size(10), "10 Bytes");
        assert_eq!(format_file_size(1023), "1023 Bytes");
    }

    #[test]
    fn exact_units_have_no_decimals() {
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(5 * 1024 * 1024), "5 MB");
        assert_eq!(format_file_size(1024 * 1024 * 1024), "1 GB");
    }

    #[test]
    fn fractional_sizes_round_to_two_decimals() {
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(1_234_567), "1.18 MB");
    }

    #[test]
    fn huge_sizes_cap_at_largest_unit() {
        assert_eq!(format_file_size(1024_u64.pow(5)), "1024 TB");
    }

    #[test]
    fn upload_date_is_calendar_day() {
        let at = DateTime::from_timestamp(1_700_000_000, 0).unwrap_or_default();
        assert_eq!(format_upload_date(at), "2023-11-14");
    }

    #[test]
    fn now_is_after_epoch() {
        assert!(now_utc().timestamp() > 0);
    }
}
