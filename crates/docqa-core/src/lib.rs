//! DocQA Core: error taxonomy and configuration lookup shared by every crate.

pub mod config;
pub mod error;

pub use config::{EnvLookup, MapEnv, ProcessEnv};
pub use error::{BoxError, Error, Result};
