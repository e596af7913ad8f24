//! Derived statistics over a set of records
//!
//! Used for the summary cards above roster tables (students per status,
//! per grade, average attendance, ...).

use crate::core::Record;
use indexmap::IndexMap;
use serde::Serialize;

/// Count of records per rendered value of a field
///
/// Values keep the order in which they first appear.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub counts: IndexMap<String, usize>,

    /// Records with no (or a blank) value
    pub missing: usize,
}

impl Tally {
    pub fn of<'a, R, I>(records: I, field: R::Field) -> Self
    where
        R: Record,
        I: IntoIterator<Item = &'a R>,
    {
        let mut tally = Tally::default();
        for record in records {
            match record.present_value(field) {
                Some(value) => *tally.counts.entry(value.render()).or_insert(0) += 1,
                None => tally.missing += 1,
            }
        }
        tally
    }

    pub fn get(&self, value: &str) -> usize {
        self.counts.get(value).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum::<usize>() + self.missing
    }

    /// Entries ordered by descending count, ties in first-seen order
    pub fn by_count(&self) -> Vec<(&str, usize)> {
        let mut entries: Vec<(&str, usize)> = self
            .counts
            .iter()
            .map(|(value, count)| (value.as_str(), *count))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries
    }
}

/// Summary of a numeric field
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct NumericSummary {
    /// Records with a numeric value
    pub count: usize,

    /// Records without one
    pub missing: usize,

    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
}

impl NumericSummary {
    pub fn of<'a, R, I>(records: I, field: R::Field) -> Self
    where
        R: Record,
        I: IntoIterator<Item = &'a R>,
    {
        let mut summary = NumericSummary::default();
        let mut sum = 0.0;

        for record in records {
            let Some(n) = record
                .present_value(field)
                .and_then(|value| value.as_number())
            else {
                summary.missing += 1;
                continue;
            };
            summary.count += 1;
            sum += n;
            summary.min = Some(summary.min.map_or(n, |min| min.min(n)));
            summary.max = Some(summary.max.map_or(n, |max| max.max(n)));
        }

        if summary.count > 0 {
            summary.mean = Some(sum / summary.count as f64);
        }
        summary
    }
}
