#![allow(unused_imports)]

pub use anyhow::{Context, bail, ensure};
pub use tracing::{Level, debug, instrument, trace, warn};

pub use crate::error::Error;

pub type Result<T = (), E = Error> = std::result::Result<T, E>;
