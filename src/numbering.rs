//! Record number auditing
//!
//! Records are numbered per type (`ER 1`, `ER 2`, `DI 1`, ...). Archivists
//! assign the numbers by hand, so gaps, reuse and missing numbers are common
//! data-entry slips. The audit reports them as review notices and never stops
//! the run.

use std::collections::BTreeMap;

use tracing::debug;

use crate::review::{RecordSource, ReviewLog};

/// Above this many unused numbers in one range, a single summary notice is
/// logged instead of one notice per number
pub const MAX_SKIPPED_NOTICES: u64 = 100;

/// Record numbers found across a set of labels
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NumberingAudit {
    /// Per record type (in prefix order), number to the labels using it
    pub used: Vec<(String, BTreeMap<u64, Vec<String>>)>,
    /// Labels without a recognizable number
    pub missing: Vec<String>,
}

impl NumberingAudit {
    fn numbers(&self, record_type: &str) -> Option<&BTreeMap<u64, Vec<String>>> {
        self.used
            .iter()
            .find(|(t, _)| t == record_type)
            .map(|(_, numbers)| numbers)
    }

    /// Numbers inside `[min, max]` that no label uses
    pub fn skipped(&self, record_type: &str) -> Vec<u64> {
        let Some(numbers) = self.numbers(record_type) else {
            return Vec::new();
        };
        match (numbers.keys().next(), numbers.keys().next_back()) {
            (Some(&min), Some(&max)) => (min..max).filter(|n| !numbers.contains_key(n)).collect(),
            _ => Vec::new(),
        }
    }

    /// Numbers used by more than one label, with those labels
    pub fn duplicates(&self, record_type: &str) -> Vec<(u64, &[String])> {
        self.numbers(record_type)
            .map(|numbers| {
                numbers
                    .iter()
                    .filter(|(_, labels)| labels.len() > 1)
                    .map(|(n, labels)| (*n, labels.as_slice()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// How many numbers inside `[min, max]` no label uses
    pub fn skipped_count(&self, record_type: &str) -> u64 {
        match (self.range(record_type), self.numbers(record_type)) {
            (Some((min, max)), Some(numbers)) => (max - min + 1).saturating_sub(numbers.len() as u64),
            _ => 0,
        }
    }

    /// Lowest and highest number of a record type
    pub fn range(&self, record_type: &str) -> Option<(u64, u64)> {
        let numbers = self.numbers(record_type)?;
        Some((*numbers.keys().next()?, *numbers.keys().next_back()?))
    }
}

/// Split `"<TYPE> <digits>..."` into type and number
///
/// Bookmark labels must continue with `:` right after the number
/// (`ER 12: Letters`); folder names may continue with anything.
pub fn parse_record_number(
    label: &str,
    prefixes: &[String],
    source: RecordSource,
) -> Option<(String, u64)> {
    prefixes.iter().find_map(|prefix| {
        let rest = label.strip_prefix(prefix.as_str())?.strip_prefix(' ')?;
        let digits_end = rest
            .char_indices()
            .find(|(_, c)| !c.is_ascii_digit())
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        if digits_end == 0 {
            return None;
        }
        if source == RecordSource::Bookmarks && !rest[digits_end..].starts_with(':') {
            return None;
        }
        let number = rest[..digits_end].parse().ok()?;
        Some((prefix.clone(), number))
    })
}

/// Group record numbers by type without emitting notices
pub fn collect_record_numbers<'l>(
    labels: impl IntoIterator<Item = &'l str>,
    prefixes: &[String],
    source: RecordSource,
) -> NumberingAudit {
    let mut audit = NumberingAudit {
        used: prefixes.iter().map(|p| (p.clone(), BTreeMap::new())).collect(),
        missing: Vec::new(),
    };

    for label in labels {
        match parse_record_number(label, prefixes, source) {
            Some((record_type, number)) => {
                if let Some((_, numbers)) = audit.used.iter_mut().find(|(t, _)| *t == record_type) {
                    numbers.entry(number).or_default().push(label.to_string());
                }
            }
            None => audit.missing.push(label.to_string()),
        }
    }

    audit
}

/// Audit record numbers and log gaps, reuse and missing numbers
pub fn audit_record_numbers<'l>(
    labels: impl IntoIterator<Item = &'l str>,
    prefixes: &[String],
    source: RecordSource,
    review: &mut ReviewLog,
) -> NumberingAudit {
    let audit = collect_record_numbers(labels, prefixes, source);

    for label in &audit.missing {
        review.notice(source.number_missing(label));
    }

    for (record_type, _) in &audit.used {
        let Some((min, max)) = audit.range(record_type) else {
            continue;
        };
        let skipped_count = audit.skipped_count(record_type);
        if skipped_count > MAX_SKIPPED_NOTICES {
            review.notice(source.numbers_skipped(record_type, min, max, skipped_count));
            continue;
        }
        for skipped in audit.skipped(record_type) {
            review.notice(source.number_skipped(record_type, min, max, skipped));
        }
    }

    for (record_type, _) in &audit.used {
        for (number, labels) in audit.duplicates(record_type) {
            let names: Vec<&str> = labels.iter().map(String::as_str).collect();
            review.notice(source.number_reused(record_type, number, &names));
        }
    }

    debug!(
        types = audit.used.len(),
        missing = audit.missing.len(),
        "Record numbering audited"
    );
    audit
}
