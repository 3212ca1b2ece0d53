//! Decimal to hexadecimal, octal and binary number conversion
//!
//! The pure converter lives in [`domain`], the session state that
//! recomputes off the interactive thread in [`app`], and the screen layout
//! in [`ui`].

pub mod app;
pub mod config;
pub mod domain;
pub mod ui;

pub use app::{WorkerError, SessionState};
pub use domain::{ConversionResult, TargetBase, convert};
