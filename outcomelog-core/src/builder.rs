//! ## outcomelog-core::builder
//! Reusable accumulate-then-flush outcome logger.
//!
//! A cycle is: select a severity, set any context, then make one terminal
//! call. The terminal call composes the `outcome` field, dispatches the
//! record and resets everything except the bound `component.operation`
//! name, so one instance serves many sequential log lines.
//!
//! One instance belongs to one logical unit of work. It is `&mut`-driven
//! and carries no synchronization; share the backend, not the logger.

use std::backtrace::BacktraceStatus;
use std::fmt;

use crate::backend::{Backend, Record};
use crate::error::OutcomeError;
use crate::outcome::{Outcome, ResultStatus};
use crate::severity::Severity;

/// Name bound when no component is given.
pub const UNKNOWN_COMPONENT: &str = "unknown";

pub struct OutcomeLogger<B> {
    backend: B,
    pkg: String,
    pending_error: Option<anyhow::Error>,
    severity: Option<Severity>,
    identifier: String,
    result: ResultStatus,
    tax_year: Option<i32>,
}

impl<B: Backend> OutcomeLogger<B> {
    /// Binds a logger to `component.operation`.
    ///
    /// An empty `component` becomes `"unknown"`; an empty `operation` is
    /// left off the name entirely.
    pub fn new(backend: B, component: &str, operation: &str) -> Self {
        let mut pkg = if component.is_empty() {
            UNKNOWN_COMPONENT.to_string()
        } else {
            component.to_string()
        };
        if !operation.is_empty() {
            pkg.push('.');
            pkg.push_str(operation);
        }
        Self {
            backend,
            pkg,
            pending_error: None,
            severity: None,
            identifier: String::new(),
            result: ResultStatus::Success,
            tax_year: None,
        }
    }

    pub fn pkg(&self) -> &str {
        &self.pkg
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Opens the cycle at `severity`. Error, fatal and panic also mark the
    /// outcome as failed. A later selection replaces an earlier one.
    pub fn level(&mut self, severity: Severity) -> &mut Self {
        self.severity = Some(severity);
        if severity.forces_failure() {
            self.result = ResultStatus::Fail;
        }
        self
    }

    pub fn trace(&mut self) -> &mut Self {
        self.level(Severity::Trace)
    }

    pub fn debug(&mut self) -> &mut Self {
        self.level(Severity::Debug)
    }

    pub fn info(&mut self) -> &mut Self {
        self.level(Severity::Info)
    }

    pub fn warning(&mut self) -> &mut Self {
        self.level(Severity::Warning)
    }

    pub fn error(&mut self) -> &mut Self {
        self.level(Severity::Error)
    }

    pub fn fatal(&mut self) -> &mut Self {
        self.level(Severity::Fatal)
    }

    pub fn panic(&mut self) -> &mut Self {
        self.level(Severity::Panic)
    }

    /// An empty identifier counts as unset.
    pub fn with_identifier(&mut self, identifier: impl Into<String>) -> &mut Self {
        self.identifier = identifier.into();
        self
    }

    /// Only positive years are emitted.
    pub fn with_tax_year(&mut self, tax_year: i32) -> &mut Self {
        self.tax_year = Some(tax_year);
        self
    }

    pub fn with_result(&mut self, result: ResultStatus) -> &mut Self {
        self.result = result;
        self
    }

    pub fn mark_success(&mut self) -> &mut Self {
        self.with_result(ResultStatus::Success)
    }

    pub fn mark_failure(&mut self) -> &mut Self {
        self.with_result(ResultStatus::Fail)
    }

    /// Emits the outcome without a message.
    pub fn send(&mut self) -> Result<(), OutcomeError> {
        self.flush(None)
    }

    pub fn message(&mut self, message: &str) -> Result<(), OutcomeError> {
        self.flush(Some(message))
    }

    /// `log.info().message_fmt(format_args!("settled {} invoices", n))`
    pub fn message_fmt(&mut self, args: fmt::Arguments<'_>) -> Result<(), OutcomeError> {
        let message = args.to_string();
        self.flush(Some(&message))
    }

    /// Wraps `err` with `context`, attaches it and emits without a message.
    ///
    /// The result status is left as it is: pair this with
    /// [`error`](Self::error) or [`mark_failure`](Self::mark_failure) to
    /// report a failure.
    pub fn error_with_message<E>(&mut self, err: E, context: &str) -> Result<(), OutcomeError>
    where
        E: Into<anyhow::Error>,
    {
        self.pending_error = Some(err.into().context(context.to_string()));
        self.send()
    }

    pub fn error_with_message_fmt<E>(
        &mut self,
        err: E,
        args: fmt::Arguments<'_>,
    ) -> Result<(), OutcomeError>
    where
        E: Into<anyhow::Error>,
    {
        self.pending_error = Some(err.into().context(args.to_string()));
        self.send()
    }

    pub fn severity(&self) -> Option<Severity> {
        self.severity
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn tax_year(&self) -> Option<i32> {
        self.tax_year
    }

    pub fn result(&self) -> ResultStatus {
        self.result
    }

    pub fn pending_error(&self) -> Option<&anyhow::Error> {
        self.pending_error.as_ref()
    }

    /// True when no cycle is in progress.
    pub fn is_reset(&self) -> bool {
        self.pending_error.is_none()
            && self.severity.is_none()
            && self.identifier.is_empty()
            && self.tax_year.is_none()
            && self.result == ResultStatus::Success
    }

    /// Composes the outcome of the current cycle without emitting it.
    pub fn compose_outcome(&self) -> Outcome {
        let mut outcome = Outcome {
            result: self.result,
            ..Outcome::default()
        };
        if let Some(err) = &self.pending_error {
            let backtrace = err.backtrace();
            if backtrace.status() == BacktraceStatus::Captured {
                outcome.stack = Some(backtrace.to_string());
            }
            outcome.error = Some(format!("{:#}", err));
        }
        if !self.identifier.is_empty() {
            outcome.identifier = Some(self.identifier.clone());
        }
        outcome.tax_year = self.tax_year.filter(|year| *year > 0);
        outcome
    }

    // State is reset before dispatch so a backend that panics or exits
    // still leaves the logger clean.
    fn flush(&mut self, message: Option<&str>) -> Result<(), OutcomeError> {
        let severity = self.severity;
        let outcome = self.compose_outcome();
        self.reset();

        let Some(severity) = severity else {
            return Err(OutcomeError::MissingSeverity {
                pkg: self.pkg.clone(),
                dropped_error: outcome.error,
            });
        };
        self.backend.dispatch(&Record {
            severity,
            pkg: &self.pkg,
            outcome: &outcome,
            message,
        });
        Ok(())
    }

    fn reset(&mut self) {
        self.pending_error = None;
        self.severity = None;
        self.identifier.clear();
        self.tax_year = None;
        self.result = ResultStatus::Success;
    }
}

impl<B> fmt::Debug for OutcomeLogger<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutcomeLogger")
            .field("pkg", &self.pkg)
            .field("severity", &self.severity)
            .field("identifier", &self.identifier)
            .field("result", &self.result)
            .field("tax_year", &self.tax_year)
            .field("pending_error", &self.pending_error.as_ref().map(|e| format!("{:#}", e)))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryBackend;
    use proptest::prelude::*;
    use std::io;

    fn logger(component: &str, operation: &str) -> (MemoryBackend, OutcomeLogger<MemoryBackend>) {
        let backend = MemoryBackend::new();
        let logger = OutcomeLogger::new(backend.clone(), component, operation);
        (backend, logger)
    }

    fn conn_reset() -> io::Error {
        io::Error::new(io::ErrorKind::ConnectionReset, "connection reset")
    }

    #[test]
    fn binds_component_and_operation() {
        assert_eq!(logger("billing", "process").1.pkg(), "billing.process");
        assert_eq!(logger("billing", "").1.pkg(), "billing");
        assert_eq!(logger("", "process").1.pkg(), "unknown.process");
        assert_eq!(logger("", "").1.pkg(), "unknown");
    }

    #[test]
    fn info_with_identifier_and_year() {
        let (backend, mut log) = logger("billing", "process");
        log.info()
            .with_identifier("inv-42")
            .with_tax_year(2023)
            .send()
            .unwrap();

        let record = backend.last().unwrap();
        assert_eq!(record.severity, Severity::Info);
        assert_eq!(record.pkg, "billing.process");
        assert_eq!(record.message, None);
        assert_eq!(
            record.outcome.to_string(),
            r#"{"result":"success","identifier":"inv-42","tax_year":2023}"#
        );
    }

    #[test]
    fn error_level_with_wrapped_error() {
        let (backend, mut log) = logger("billing", "process");
        log.error()
            .with_identifier("inv-42")
            .error_with_message(conn_reset(), "db write failed")
            .unwrap();

        assert_eq!(backend.len(), 1);
        let record = backend.last().unwrap();
        assert_eq!(record.severity, Severity::Error);
        assert_eq!(record.outcome.result, ResultStatus::Fail);
        assert_eq!(
            record.outcome.error.as_deref(),
            Some("db write failed: connection reset")
        );
        assert_eq!(record.outcome.identifier.as_deref(), Some("inv-42"));
        assert_eq!(record.outcome.tax_year, None);
    }

    #[test]
    fn unknown_component_with_bare_outcome() {
        let (backend, mut log) = logger("", "");
        log.info().send().unwrap();
        let record = backend.last().unwrap();
        assert_eq!(record.pkg, "unknown");
        assert_eq!(record.outcome.to_string(), r#"{"result":"success"}"#);
    }

    #[test]
    fn reuse_does_not_leak_identifier() {
        let (backend, mut log) = logger("billing", "process");
        log.info().with_identifier("inv-1").send().unwrap();
        log.info().with_identifier("inv-2").send().unwrap();
        log.info().send().unwrap();

        let records = backend.records();
        assert_eq!(records[0].outcome.identifier.as_deref(), Some("inv-1"));
        assert_eq!(records[1].outcome.identifier.as_deref(), Some("inv-2"));
        assert_eq!(records[2].outcome.identifier, None);
        assert!(records.iter().all(|r| r.pkg == "billing.process"));
    }

    #[test]
    fn terminal_calls_reset_state() {
        let (_backend, mut log) = logger("billing", "process");
        log.fatal()
            .with_identifier("inv-42")
            .with_tax_year(2021)
            .error_with_message(conn_reset(), "ledger sync")
            .unwrap();
        assert!(log.is_reset());
        assert_eq!(log.severity(), None);
        assert_eq!(log.identifier(), "");
        assert_eq!(log.tax_year(), None);
        assert_eq!(log.result(), ResultStatus::Success);
        assert!(log.pending_error().is_none());
        assert_eq!(log.pkg(), "billing.process");

        log.warning().mark_failure().message("retrying").unwrap();
        assert!(log.is_reset());
    }

    #[test]
    fn failure_forcing_levels_yield_fail() {
        for severity in Severity::ALL {
            let (backend, mut log) = logger("svc", "op");
            log.level(severity).send().unwrap();
            let expected = if severity.forces_failure() {
                ResultStatus::Fail
            } else {
                ResultStatus::Success
            };
            assert_eq!(backend.last().unwrap().outcome.result, expected, "{severity}");
        }
    }

    #[test]
    fn explicit_success_overrides_forced_failure() {
        let (backend, mut log) = logger("svc", "op");
        log.error().mark_success().send().unwrap();
        assert_eq!(backend.last().unwrap().outcome.result, ResultStatus::Success);
    }

    #[test]
    fn error_convenience_keeps_success() {
        let (backend, mut log) = logger("svc", "op");
        log.info()
            .error_with_message(conn_reset(), "cache refresh")
            .unwrap();
        let record = backend.last().unwrap();
        assert_eq!(record.outcome.result, ResultStatus::Success);
        assert_eq!(
            record.outcome.error.as_deref(),
            Some("cache refresh: connection reset")
        );
    }

    #[test]
    fn formatted_variants() {
        let (backend, mut log) = logger("svc", "op");
        let batch = 7;
        log.info()
            .message_fmt(format_args!("settled batch {}", batch))
            .unwrap();
        log.warning()
            .mark_failure()
            .error_with_message_fmt(conn_reset(), format_args!("batch {} upload", batch))
            .unwrap();

        let records = backend.records();
        assert_eq!(records[0].message.as_deref(), Some("settled batch 7"));
        assert_eq!(
            records[1].outcome.error.as_deref(),
            Some("batch 7 upload: connection reset")
        );
        assert_eq!(records[1].outcome.result, ResultStatus::Fail);
        assert_eq!(records[1].message, None);
    }

    #[test]
    fn error_chain_is_preserved() {
        let (backend, mut log) = logger("svc", "op");
        let inner = anyhow::Error::new(conn_reset()).context("flush ledger");
        log.error().error_with_message(inner, "close period").unwrap();
        assert_eq!(
            backend.last().unwrap().outcome.error.as_deref(),
            Some("close period: flush ledger: connection reset")
        );
    }

    #[test]
    fn no_stack_without_pending_error() {
        let (backend, mut log) = logger("svc", "op");
        log.error().with_identifier("req-3").send().unwrap();
        let outcome = backend.last().unwrap().outcome;
        assert_eq!(outcome.stack, None);
        assert_eq!(outcome.error, None);
        assert!(!outcome.to_string().contains("stack"));
    }

    #[test]
    fn non_positive_year_is_omitted() {
        let (backend, mut log) = logger("svc", "op");
        log.info().with_tax_year(0).send().unwrap();
        log.info().with_tax_year(-1).send().unwrap();
        assert!(backend.records().iter().all(|r| r.outcome.tax_year.is_none()));
    }

    #[test]
    fn empty_identifier_is_omitted() {
        let (backend, mut log) = logger("svc", "op");
        log.info().with_identifier("").send().unwrap();
        assert_eq!(backend.last().unwrap().outcome.identifier, None);
    }

    #[test]
    fn last_severity_selection_wins() {
        let (backend, mut log) = logger("svc", "op");
        log.debug().warning().send().unwrap();
        assert_eq!(backend.last().unwrap().severity, Severity::Warning);
    }

    #[test]
    fn missing_severity_is_reported_and_resets() {
        let (backend, mut log) = logger("billing", "process");
        log.with_identifier("inv-42");
        let err = log
            .error_with_message(conn_reset(), "db write failed")
            .unwrap_err();
        assert_eq!(
            err,
            OutcomeError::MissingSeverity {
                pkg: "billing.process".into(),
                dropped_error: Some("db write failed: connection reset".into()),
            }
        );
        assert!(backend.is_empty());
        assert!(log.is_reset());

        log.info().send().unwrap();
        assert_eq!(backend.len(), 1);
    }

    struct ExplodingBackend;

    impl Backend for ExplodingBackend {
        fn dispatch(&self, _record: &Record<'_>) {
            panic!("sink down");
        }
    }

    #[test]
    fn panicking_backend_still_resets() {
        let mut log = OutcomeLogger::new(ExplodingBackend, "svc", "op");
        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            log.error().with_identifier("req-1").send()
        }));
        assert!(outcome.is_err());
        assert!(log.is_reset());
    }

    #[test]
    fn compose_does_not_consume_cycle() {
        let (backend, mut log) = logger("svc", "op");
        log.info().with_identifier("req-9");
        let preview = log.compose_outcome();
        assert_eq!(preview.identifier.as_deref(), Some("req-9"));
        assert!(backend.is_empty());
        assert!(!log.is_reset());
    }

    #[derive(Debug, Clone)]
    enum Step {
        Identifier(String),
        TaxYear(i32),
        Result(ResultStatus),
    }

    fn step() -> impl Strategy<Value = Step> {
        prop_oneof![
            "[a-z0-9-]{0,8}".prop_map(Step::Identifier),
            (-5i32..3000).prop_map(Step::TaxYear),
            prop_oneof![Just(ResultStatus::Success), Just(ResultStatus::Fail)]
                .prop_map(Step::Result),
        ]
    }

    fn apply(log: &mut OutcomeLogger<MemoryBackend>, step: &Step) {
        match step {
            Step::Identifier(id) => log.with_identifier(id.clone()),
            Step::TaxYear(year) => log.with_tax_year(*year),
            Step::Result(result) => log.with_result(*result),
        };
    }

    proptest! {
        #[test]
        fn setter_order_does_not_change_outcome(
            id in "[a-z0-9-]{0,8}",
            year in -5i32..3000,
            fail in any::<bool>(),
            reversed in any::<bool>(),
        ) {
            let result = if fail { ResultStatus::Fail } else { ResultStatus::Success };
            let mut steps = vec![Step::Identifier(id), Step::TaxYear(year), Step::Result(result)];
            let (forward_backend, mut forward) = logger("svc", "op");
            forward.info();
            for s in &steps {
                apply(&mut forward, s);
            }
            forward.send().unwrap();

            if reversed {
                steps.reverse();
            } else {
                steps.rotate_left(1);
            }
            let (other_backend, mut other) = logger("svc", "op");
            other.info();
            for s in &steps {
                apply(&mut other, s);
            }
            other.send().unwrap();

            prop_assert_eq!(forward_backend.last(), other_backend.last());
        }

        #[test]
        fn any_cycle_ends_reset(steps in proptest::collection::vec(step(), 0..6), level in 0usize..7) {
            let (backend, mut log) = logger("svc", "op");
            log.level(Severity::ALL[level]);
            for s in &steps {
                apply(&mut log, s);
            }
            log.send().unwrap();
            prop_assert!(log.is_reset());
            prop_assert_eq!(backend.len(), 1);
        }
    }
}
