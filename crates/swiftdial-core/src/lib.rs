//! Swiftdial - Core Library
//!
//! Runtime-free logic for the outbound-calling console: the calling-window
//! guard, contact CSV import/export, duration formatting, and the
//! client-side campaign session state machine.

pub mod csv;
pub mod duration;
pub mod error;
pub mod session;
pub mod window;

pub use error::*;
pub use session::*;
pub use window::*;
