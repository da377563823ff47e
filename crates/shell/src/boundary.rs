//! Crash containment for the rendered shell.
//!
//! Every dashboard render runs inside [`CrashBoundary::contain`]. Errors and
//! panics raised while composing, rendering a section or rendering the page
//! template are captured together with the render scope path, reported to a
//! [`DiagnosticSink`] and latched: while faulted, the subtree is not rendered
//! again until [`CrashBoundary::reset`] is called.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::diagnostics::{DiagnosticSink, report_safely};

/// A failure raised while rendering part of the shell.
#[derive(Debug, Error)]
pub enum RenderFault {
    #[error("section {section} failed to render: {reason}")]
    Section {
        section: &'static str,
        reason: String,
    },

    #[error("template error: {0}")]
    Template(#[from] askama::Error),

    #[error("render panicked: {0}")]
    Panic(String),
}

impl RenderFault {
    /// Short tag used when reporting the fault.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Section { .. } => "section",
            Self::Template(_) => "template",
            Self::Panic(_) => "panic",
        }
    }
}

/// Path of components entered during a render, e.g.
/// `Shell > AdminDashboard > Section(users)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderScope {
    frames: Vec<String>,
}

impl RenderScope {
    #[must_use]
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            frames: vec![root.into()],
        }
    }

    /// Record entry into a nested component.
    pub fn enter(&mut self, frame: impl Into<String>) {
        self.frames.push(frame.into());
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }
}

impl fmt::Display for RenderScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.frames.join(" > "))
    }
}

/// Fault latched by a boundary, ready for the fallback view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedFault {
    pub message: String,
    pub component_stack: String,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BoundaryState {
    #[default]
    Healthy,
    Faulted(CapturedFault),
}

/// Outcome of a contained render.
#[derive(Debug)]
pub enum Contained<T> {
    Rendered(T),
    Fallback(CapturedFault),
}

impl<T> Contained<T> {
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }
}

/// Two-state crash boundary wrapping the interactive tree.
#[derive(Debug, Clone, Default)]
pub struct CrashBoundary {
    state: BoundaryState,
}

impl CrashBoundary {
    #[must_use]
    pub const fn state(&self) -> &BoundaryState {
        &self.state
    }

    #[must_use]
    pub const fn is_faulted(&self) -> bool {
        matches!(self.state, BoundaryState::Faulted(_))
    }

    /// Run `render` under the boundary.
    ///
    /// While faulted the closure is not invoked and the latched fault is
    /// returned. A fresh error or panic moves the boundary to faulted and is
    /// handed to `sink` with the scope path reached at the time of failure.
    pub fn contain<T>(
        &mut self,
        root: &str,
        sink: &dyn DiagnosticSink,
        render: impl FnOnce(&mut RenderScope) -> Result<T, RenderFault>,
    ) -> Contained<T> {
        if let BoundaryState::Faulted(fault) = &self.state {
            return Contained::Fallback(fault.clone());
        }

        let mut scope = RenderScope::new(root);
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| render(&mut scope)));
        let fault = match outcome {
            Ok(Ok(rendered)) => return Contained::Rendered(rendered),
            Ok(Err(fault)) => fault,
            Err(payload) => RenderFault::Panic(panic_message(payload.as_ref())),
        };

        let component_stack = scope.to_string();
        report_safely(sink, &fault, &component_stack);

        let captured = CapturedFault {
            message: fault.to_string(),
            component_stack,
            occurred_at: Utc::now(),
        };
        self.state = BoundaryState::Faulted(captured.clone());
        Contained::Fallback(captured)
    }

    /// Clear a latched fault so the next render re-attempts the subtree.
    pub fn reset(&mut self) {
        if self.is_faulted() {
            tracing::info!("Crash boundary reset");
        }
        self.state = BoundaryState::Healthy;
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "non-string panic payload".to_string())
}
