use std::borrow::Cow;

use crate::{
    assignment::IntoAssignment,
    endpoint::{Endpoint, Instant},
    interval::Interval,
    prelude::*,
    storage::Storage,
};

/// Interval column of a record, accessible as a whole or by its endpoints.
#[must_use]
#[derive(Clone, Debug, Eq, PartialEq, Hash, derive_more::Display)]
#[display("{_0}")]
pub struct IntervalField(Cow<'static, str>);

impl Default for IntervalField {
    fn default() -> Self {
        Self::new(Self::DEFAULT_NAME)
    }
}

impl IntervalField {
    /// Conventional field name when none is configured.
    pub const DEFAULT_NAME: &'static str = "period";

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }

    /// Stored interval as is, `None` when the slot has not been set yet.
    #[must_use]
    pub fn get<S: Storage + ?Sized>(&self, storage: &S) -> Option<Interval> {
        storage.get(&self.0)
    }

    /// Coerce the value and replace the stored interval.
    ///
    /// The storage is left untouched if the value cannot be coerced.
    #[instrument(skip_all, fields(field = %self))]
    pub fn set<S: Storage + ?Sized>(
        &self,
        storage: &mut S,
        value: impl IntoAssignment,
    ) -> Result {
        let interval = crate::assignment::coerce(value)
            .inspect_err(|error| debug!(%error, "rejected the assignment"))?;
        debug!(%interval, "storing…");
        storage.set(&self.0, interval);
        Ok(())
    }

    #[must_use]
    pub fn begin<S: Storage + ?Sized>(&self, storage: &S) -> Option<Instant> {
        self.get(storage).and_then(Interval::begin)
    }

    #[must_use]
    pub fn end<S: Storage + ?Sized>(&self, storage: &S) -> Option<Instant> {
        self.get(storage).and_then(Interval::end)
    }

    /// Replace the begin and keep the current end.
    #[instrument(skip_all, fields(field = %self))]
    pub fn set_begin<S: Storage + ?Sized>(
        &self,
        storage: &mut S,
        begin: Option<impl Into<Endpoint>>,
    ) -> Result {
        let interval = Interval::normalize(begin, self.end(&*storage))?;
        self.set(storage, interval)
    }

    /// Replace the end and keep the current begin.
    #[instrument(skip_all, fields(field = %self))]
    pub fn set_end<S: Storage + ?Sized>(
        &self,
        storage: &mut S,
        end: Option<impl Into<Endpoint>>,
    ) -> Result {
        let interval = Interval::normalize(self.begin(&*storage), end)?;
        self.set(storage, interval)
    }
}
