//! # outcomelog-core
//!
//! Fluent outcome builder over an injected structured logging backend.
//! Every emitted record carries a nested `outcome` field with the result
//! status and, when set, the wrapped error, the unit-of-work identifier and
//! the tax year.
//!
//! ### Key Submodules:
//! - `builder`: the reusable accumulate-then-flush [`OutcomeLogger`]
//! - `outcome`: [`ResultStatus`] and the composed [`Outcome`] field
//! - `backend`: the [`Backend`] seam records are dispatched through
//! - `memory`: an in-memory capturing backend
//!
//! ```
//! use outcomelog_core::{MemoryBackend, OutcomeLogger};
//!
//! let backend = MemoryBackend::new();
//! let mut log = OutcomeLogger::new(backend.clone(), "billing", "process");
//! log.info().with_identifier("inv-42").with_tax_year(2023).send().unwrap();
//!
//! let record = backend.last().unwrap();
//! assert_eq!(record.pkg, "billing.process");
//! assert_eq!(record.outcome.identifier.as_deref(), Some("inv-42"));
//! ```

pub mod backend;
pub mod builder;
pub mod error;
pub mod memory;
pub mod outcome;
pub mod severity;

pub mod prelude {
    pub use crate::backend::*;
    pub use crate::builder::*;
    pub use crate::error::*;
    pub use crate::outcome::*;
    pub use crate::severity::*;
}

pub use backend::{Backend, Record};
pub use builder::OutcomeLogger;
pub use error::OutcomeError;
pub use memory::{CapturedRecord, MemoryBackend};
pub use outcome::{Outcome, ResultStatus};
pub use severity::Severity;
