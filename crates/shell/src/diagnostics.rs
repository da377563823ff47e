//! Diagnostic sinks for contained render faults.
//!
//! The crash boundary hands every fault and its component stack to a
//! [`DiagnosticSink`]. Sinks return nothing, and a sink that panics is caught
//! and logged so reporting can never take the boundary down with it.

use std::panic::{self, AssertUnwindSafe};

use crate::boundary::RenderFault;

/// Destination for render fault reports.
pub trait DiagnosticSink: Send + Sync {
    /// Record `fault`, raised under `component_stack`.
    fn report(&self, fault: &RenderFault, component_stack: &str);
}

/// Logs faults through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, fault: &RenderFault, component_stack: &str) {
        tracing::error!(error = %fault, component_stack, "Render fault contained");
    }
}

/// Sends faults to Sentry with the component stack attached, then logs them.
#[derive(Debug, Default, Clone, Copy)]
pub struct SentrySink;

impl DiagnosticSink for SentrySink {
    fn report(&self, fault: &RenderFault, component_stack: &str) {
        let event_id = sentry::with_scope(
            |scope| {
                scope.set_tag("fault.kind", fault.kind());
                scope.set_extra("component_stack", component_stack.into());
            },
            || sentry::capture_error(fault),
        );
        tracing::error!(
            error = %fault,
            component_stack,
            sentry_event_id = %event_id,
            "Render fault contained"
        );
    }
}

/// Hand a fault to `sink`, swallowing any panic raised by the sink itself.
pub fn report_safely(sink: &dyn DiagnosticSink, fault: &RenderFault, component_stack: &str) {
    let delivered = panic::catch_unwind(AssertUnwindSafe(|| sink.report(fault, component_stack)));
    if delivered.is_err() {
        tracing::error!(error = %fault, "Diagnostic sink panicked while reporting a render fault");
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{PanickingSink, RecordingSink};
    use super::*;

    #[test]
    fn test_report_safely_delivers() {
        let sink = RecordingSink::default();
        report_safely(&sink, &RenderFault::Panic("boom".into()), "Shell > X");
        assert_eq!(sink.count(), 1);
        assert_eq!(sink.last().map(|(_, stack)| stack), Some("Shell > X".to_string()));
    }

    #[test]
    fn test_report_safely_survives_panicking_sink() {
        report_safely(&PanickingSink, &RenderFault::Panic("boom".into()), "Shell");
    }
}
