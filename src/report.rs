//! Step-level reporting, injected by the caller.

/// Sink for the informational and warning lines the fetch steps emit.
///
/// The binary hands the steps a [`ConsoleReporter`]; tests hand them a
/// recorder so outcomes can be asserted on.
pub trait Reporter {
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
}

/// Forwards reports to the `tracing` subscriber installed by `main`.
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn info(&self, message: &str) {
        tracing::info!("{}", message);
    }

    fn warn(&self, message: &str) {
        tracing::warn!("{}", message);
    }
}
