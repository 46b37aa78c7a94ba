//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Cache sweep: removes expired responses at the configured interval

mod cleanup;

pub use cleanup::spawn_cleanup_task;
