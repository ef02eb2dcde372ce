use super::model::{Field, Record};

/// Format a duration in seconds as `M:SS`, or `--:--` when unknown.
pub fn format_time(secs: Option<u64>) -> String {
    match secs {
        Some(s) => format!("{}:{:02}", s / 60, s % 60),
        None => "--:--".to_string(),
    }
}

/// Format an aggregate duration as `Hh MMm SSs`, dropping leading zero units.
pub fn format_total(secs: u64) -> String {
    let (h, m, s) = (secs / 3600, (secs / 60) % 60, secs % 60);
    if h > 0 {
        format!("{h}h {m:02}m {s:02}s")
    } else if m > 0 {
        format!("{m}m {s:02}s")
    } else {
        format!("{s}s")
    }
}

/// Build a display row for `record` from `fields`, joined by `sep`.
///
/// Empty fields are skipped. When nothing is produced the file path's last
/// component is used so a row is never blank.
pub fn row_from_fields(record: &Record, fields: &[Field], sep: &str) -> String {
    let parts: Vec<String> = fields
        .iter()
        .map(|f| record.field(*f))
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect();

    if parts.is_empty() {
        record
            .file
            .rsplit('/')
            .next()
            .unwrap_or(record.file.as_str())
            .to_string()
    } else {
        parts.join(sep)
    }
}
