//! Application orchestration layer
//!
//! This module owns the session state, the background worker that
//! recomputes results, and the line shell that drives them.

pub mod session;
pub mod shell;
pub mod worker;

pub use session::{SessionSnapshot, SessionState, SubscriptionId};
pub use worker::WorkerError;
