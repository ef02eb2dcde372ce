use std::cmp::Ordering;

use tracing::{debug, warn};

use crate::library::{Field, Record};

use super::SongList;

/// Leading number of a field like `3/12` or `07`; missing numbers sort first.
fn leading_number(s: &str) -> u64 {
    s.trim_start()
        .chars()
        .take_while(char::is_ascii_digit)
        .fold(0u64, |acc, d| {
            acc.saturating_mul(10)
                .saturating_add(u64::from(d.to_digit(10).unwrap_or(0)))
        })
}

/// Every number group of a date like `1999-05-01`, compared in order.
fn date_parts(s: &str) -> Vec<u64> {
    s.split(|c: char| !c.is_ascii_digit())
        .filter(|p| !p.is_empty())
        .map(leading_number)
        .collect()
}

fn compare(a: &Record, b: &Record, field: Field, case_sensitive: bool) -> Ordering {
    match field {
        Field::Time => a.time.cmp(&b.time),
        Field::Date => date_parts(&a.date).cmp(&date_parts(&b.date)),
        f if f.is_numeric() => leading_number(&a.field(f)).cmp(&leading_number(&b.field(f))),
        f if case_sensitive => a.field(f).cmp(&b.field(f)),
        f => a.field(f).to_lowercase().cmp(&b.field(f).to_lowercase()),
    }
}

impl SongList {
    /// Sort by key identifiers such as `"artist"` or `"track"`.
    ///
    /// Unknown identifiers are logged and skipped.
    pub fn sort(&mut self, keys: &[&str]) {
        let fields: Vec<Field> = keys
            .iter()
            .filter_map(|k| match k.parse::<Field>() {
                Ok(f) => Some(f),
                Err(e) => {
                    warn!(key = *k, "skipping sort key: {e}");
                    None
                }
            })
            .collect();
        self.sort_by_fields(&fields);
    }

    /// Stable sort by each field in turn, first field first.
    ///
    /// Each pass keeps the order left by the previous ones among equal
    /// values, so the last field is the most significant.
    pub fn sort_by_fields(&mut self, fields: &[Field]) {
        if fields.is_empty() {
            return;
        }
        let case_sensitive = self.case_sensitive_sort;
        for &field in fields {
            self.records
                .sort_by(|a, b| compare(a, b, field, case_sensitive));
        }
        debug!(keys = ?fields, count = self.records.len(), "sorted list");

        // Filter membership is unchanged; the visible sequence follows the
        // new canonical order.
        let was_empty = self.visible.is_empty();
        self.rebuild_visible(was_empty);
    }
}
