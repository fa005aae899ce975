//! DocQA Runtime: request validation and the end-to-end answer flow.
//!
//! A request is validated, its document loaded (or taken verbatim), a model
//! handle resolved from configuration and a QA chain built and invoked. Any
//! failing stage ends the request with that stage's error.

pub mod orchestrator;
pub mod types;
pub mod validate;

pub use orchestrator::Orchestrator;
pub use types::{DocumentSource, QaRequest, QaResult, ValidatedRequest};
pub use validate::validate;
