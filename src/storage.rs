use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::interval::Interval;

/// Per-record storage of interval columns.
pub trait Storage {
    /// Stored interval, or `None` if the slot has never been set.
    fn get(&self, field: &str) -> Option<Interval>;

    /// Replace the stored interval.
    fn set(&mut self, field: &str, interval: Interval);
}

/// In-memory record keyed by field name.
///
/// Serializes as a map of range literals.
#[must_use]
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize, derive_more::From)]
pub struct Record(BTreeMap<String, Interval>);

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the slot back to absent and return the previous interval.
    pub fn unset(&mut self, field: &str) -> Option<Interval> {
        self.0.remove(field)
    }
}

impl Storage for Record {
    fn get(&self, field: &str) -> Option<Interval> {
        self.0.get(field).copied()
    }

    fn set(&mut self, field: &str, interval: Interval) {
        self.0.insert(field.to_owned(), interval);
    }
}
