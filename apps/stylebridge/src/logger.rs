//! Logging collaborator injected into the translator.

/// Warn-level sink for translator feedback.
pub trait Logger: Send + Sync {
    fn warn(&self, message: &str);
}

/// Forwards to `tracing::warn!`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn warn(&self, message: &str) {
        tracing::warn!("{}", message);
    }
}
