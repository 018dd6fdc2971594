//! ## outcomelog-core::backend
//! Seam between the outcome builder and whatever structured logger
//! actually encodes and writes records.

use std::sync::Arc;

use crate::outcome::Outcome;
use crate::severity::Severity;

/// One composed log line handed to a [`Backend`].
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    pub severity: Severity,
    /// Standing `component.operation` name of the emitting logger.
    pub pkg: &'a str,
    pub outcome: &'a Outcome,
    pub message: Option<&'a str>,
}

/// Structured logging backend an [`OutcomeLogger`](crate::OutcomeLogger) dispatches into.
///
/// Level filtering, encoding, sinks and level-specific side effects (a
/// fatal record terminating the process, for instance) belong to the backend.
pub trait Backend {
    fn dispatch(&self, record: &Record<'_>);
}

impl<B: Backend + ?Sized> Backend for &B {
    fn dispatch(&self, record: &Record<'_>) {
        (**self).dispatch(record)
    }
}

impl<B: Backend + ?Sized> Backend for Box<B> {
    fn dispatch(&self, record: &Record<'_>) {
        (**self).dispatch(record)
    }
}

impl<B: Backend + ?Sized> Backend for Arc<B> {
    fn dispatch(&self, record: &Record<'_>) {
        (**self).dispatch(record)
    }
}
