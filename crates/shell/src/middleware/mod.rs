//! HTTP middleware stack.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request span with status and latency)
//! 3. Request ID (recorded on the request span)
//! 4. Session layer (tower-sessions, `PostgreSQL` or memory store)
//!
//! The access gate is not a layer: protected handlers take a
//! [`RequireSession`] or [`CurrentShell`] extractor, so the decision is made
//! per request from the live session.

pub mod auth;
pub mod request_id;
pub mod session;

pub use auth::{AccessGate, CurrentShell, GateDecision, LOGIN_PATH, OptionalSession, RequireSession};
pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
pub use session::{SESSION_COOKIE_NAME, create_memory_session_layer, create_session_layer};
