//! Public runtime API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate so
//! the service and repositories can stay focused on orchestration and storage.

pub mod clock;
pub mod errors;

pub use clock::{Clock, StepClock, SystemClock};
pub use errors::{Result, RuntimeError};
