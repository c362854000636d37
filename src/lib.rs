#![doc = include_str!("../README.md")]

pub mod assignment;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod field;
pub mod fields;
pub mod interval;
pub mod literal;
mod prelude;
pub mod storage;

pub use crate::{
    assignment::{Assignment, Bounds, IntoAssignment},
    config::Config,
    endpoint::{Endpoint, Instant},
    error::Error,
    field::IntervalField,
    fields::{Accessor, Fields},
    interval::Interval,
    storage::{Record, Storage},
};

/// Print the spans and events while testing.
#[cfg(test)]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::TRACE)
        .without_time()
        .compact()
        .try_init();
}
