//! Per-record pattern matching.
//!
//! A [`Matcher`] tests a record's fields against one pattern. Fields selected
//! by a [`FieldMask`] are tested in [`Field::MATCH_ORDER`]; the record matches
//! when any tested field passes. `NOT` negates each field's test before the
//! fields are OR'd together.

use bitflags::bitflags;
use regex::{Regex, RegexBuilder};
use tracing::debug;

use crate::error::ListError;
use crate::library::{Field, FieldMask, Record};

bitflags! {
    /// Match semantics and scan direction.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MatchFlags: u8 {
        /// A field passes when its test fails.
        const NOT = 1 << 0;
        /// Whole-field equality instead of substring search.
        const EXACT = 1 << 1;
        /// Case-insensitive regular expression search.
        const REGEX = 1 << 2;
        /// Scan backwards (only meaningful to `SongList::find`).
        const REVERSE = 1 << 3;
    }
}

#[derive(Debug, Clone)]
enum Needle {
    /// Case-folded pattern characters.
    Text(Vec<char>),
    /// `None` when the expression failed to compile.
    Regex(Option<Regex>),
}

/// A compiled pattern ready to be tested against many records.
#[derive(Debug, Clone)]
pub struct Matcher {
    needle: Needle,
    flags: MatchFlags,
    /// An empty pattern passes every field in every mode.
    empty: bool,
}

fn fold(s: &str) -> Vec<char> {
    s.chars().flat_map(char::to_lowercase).collect()
}

fn compile(pattern: &str, flags: MatchFlags) -> Result<Regex, regex::Error> {
    let source = if flags.contains(MatchFlags::EXACT) {
        format!("^(?:{pattern})$")
    } else {
        pattern.to_string()
    };
    RegexBuilder::new(&source).case_insensitive(true).build()
}

/// Naive case-insensitive substring search: every alignment of the needle in
/// the haystack is tried in turn.
fn contains_folded(haystack: &[char], needle: &[char]) -> bool {
    if needle.is_empty() {
        return true;
    }
    if needle.len() > haystack.len() {
        return false;
    }
    (0..=haystack.len() - needle.len()).any(|start| {
        haystack[start..]
            .iter()
            .zip(needle)
            .all(|(h, n)| h == n)
    })
}

impl Matcher {
    /// Compile `pattern` under `flags`. An invalid regular expression yields a
    /// matcher that matches nothing.
    pub fn new(pattern: &str, flags: MatchFlags) -> Self {
        let needle = if flags.contains(MatchFlags::REGEX) {
            match compile(pattern, flags) {
                Ok(re) => Needle::Regex(Some(re)),
                Err(e) => {
                    debug!(pattern, error = %e, "invalid regex, matching nothing");
                    Needle::Regex(None)
                }
            }
        } else {
            Needle::Text(fold(pattern))
        };
        Self {
            needle,
            flags,
            empty: pattern.is_empty(),
        }
    }

    /// Report whether `pattern` is usable under `flags`.
    pub fn check(pattern: &str, flags: MatchFlags) -> Result<(), ListError> {
        if flags.contains(MatchFlags::REGEX) {
            compile(pattern, flags).map_err(|e| ListError::InvalidPattern(e.to_string()))?;
        }
        Ok(())
    }

    pub fn flags(&self) -> MatchFlags {
        self.flags
    }

    fn test_value(&self, value: &str) -> bool {
        if self.empty {
            return true;
        }
        match &self.needle {
            Needle::Text(needle) => {
                let hay = fold(value);
                if self.flags.contains(MatchFlags::EXACT) {
                    hay == *needle
                } else {
                    contains_folded(&hay, needle)
                }
            }
            Needle::Regex(Some(re)) => re.is_match(value),
            Needle::Regex(None) => false,
        }
    }

    /// Whether `record` satisfies this pattern on any field in `mask`.
    pub fn matches(&self, record: &Record, mask: FieldMask) -> bool {
        if matches!(self.needle, Needle::Regex(None)) {
            return false;
        }
        let negate = self.flags.contains(MatchFlags::NOT);
        Field::MATCH_ORDER
            .iter()
            .filter(|f| mask.contains(f.mask()))
            .any(|f| self.test_value(&record.field(*f)) != negate)
    }
}

/// One-shot form of [`Matcher::matches`].
pub fn record_matches(record: &Record, pattern: &str, mask: FieldMask, flags: MatchFlags) -> bool {
    Matcher::new(pattern, flags).matches(record, mask)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(artist: &str, title: &str) -> Record {
        Record {
            artist: artist.into(),
            title: title.into(),
            ..Record::new(format!("{artist} - {title}.mp3"))
        }
    }

    #[test]
    fn substring_is_case_insensitive() {
        let r = track("John Coltrane", "Naima");
        assert!(record_matches(&r, "coltrane", FieldMask::ARTIST, MatchFlags::empty()));
        assert!(record_matches(&r, "HN CO", FieldMask::ARTIST, MatchFlags::empty()));
        assert!(!record_matches(&r, "naima", FieldMask::ARTIST, MatchFlags::empty()));
        assert!(record_matches(&r, "naima", FieldMask::ARTIST | FieldMask::TITLE, MatchFlags::empty()));
    }

    #[test]
    fn substring_retries_every_alignment() {
        let r = track("aaab", "");
        assert!(record_matches(&r, "aab", FieldMask::ARTIST, MatchFlags::empty()));
        assert!(!record_matches(&r, "aaaab", FieldMask::ARTIST, MatchFlags::empty()));
    }

    #[test]
    fn exact_requires_whole_field() {
        let r = track("Miles Davis", "So What");
        assert!(record_matches(&r, "miles davis", FieldMask::ARTIST, MatchFlags::EXACT));
        assert!(!record_matches(&r, "miles", FieldMask::ARTIST, MatchFlags::EXACT));
    }

    #[test]
    fn not_is_applied_per_field_before_or() {
        let r = track("Miles Davis", "So What");
        // Artist equals, so NOT fails there; title differs, so NOT passes there.
        let mask = FieldMask::ARTIST | FieldMask::TITLE;
        assert!(record_matches(&r, "miles davis", mask, MatchFlags::NOT | MatchFlags::EXACT));
        assert!(!record_matches(
            &r,
            "miles davis",
            FieldMask::ARTIST,
            MatchFlags::NOT | MatchFlags::EXACT
        ));
    }

    #[test]
    fn empty_pattern_matches_everything_unless_negated() {
        let r = track("Anyone", "Anything");
        assert!(record_matches(&r, "", FieldMask::ARTIST, MatchFlags::empty()));
        assert!(record_matches(&r, "", FieldMask::ARTIST, MatchFlags::EXACT));
        assert!(record_matches(&r, "", FieldMask::ARTIST, MatchFlags::REGEX));
        assert!(record_matches(&r, "", FieldMask::ARTIST, MatchFlags::REGEX | MatchFlags::EXACT));
        assert!(!record_matches(&r, "", FieldMask::ARTIST, MatchFlags::NOT));
        assert!(!record_matches(&r, "", FieldMask::ARTIST, MatchFlags::NOT | MatchFlags::EXACT));
    }

    #[test]
    fn empty_mask_matches_nothing() {
        let r = track("Anyone", "Anything");
        assert!(!record_matches(&r, "", FieldMask::empty(), MatchFlags::empty()));
    }

    #[test]
    fn regex_mode_is_case_insensitive_and_tolerates_bad_patterns() {
        let r = track("John Coltrane", "Giant Steps");
        assert!(record_matches(&r, "^john.*ane$", FieldMask::ARTIST, MatchFlags::REGEX));
        assert!(record_matches(&r, "giant", FieldMask::TITLE, MatchFlags::REGEX));
        assert!(!record_matches(&r, "giant", FieldMask::TITLE, MatchFlags::REGEX | MatchFlags::EXACT));
        assert!(!record_matches(&r, "(", FieldMask::ARTIST, MatchFlags::REGEX));
        assert!(!record_matches(&r, "(", FieldMask::ARTIST, MatchFlags::REGEX | MatchFlags::NOT));
    }

    #[test]
    fn exact_regex_accepts_any_alternative_spanning_the_field() {
        let r = track("ab", "");
        let exact = MatchFlags::REGEX | MatchFlags::EXACT;
        assert!(record_matches(&r, "a|ab", FieldMask::ARTIST, exact));
        assert!(record_matches(&r, "AB|c", FieldMask::ARTIST, exact));
        assert!(!record_matches(&r, "a|b", FieldMask::ARTIST, exact));
    }

    #[test]
    fn check_reports_invalid_regex() {
        assert!(Matcher::check("(", MatchFlags::empty()).is_ok());
        assert!(matches!(
            Matcher::check("(", MatchFlags::REGEX),
            Err(ListError::InvalidPattern(_))
        ));
    }
}
