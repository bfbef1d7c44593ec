//! Swiftdial Types - Pure type definitions
//!
//! This crate contains only plain data types with no async runtime or HTTP
//! dependencies, shared by the core logic and the console binary.

pub mod analytics;
pub mod campaign;
pub mod contact;
pub mod log;
pub mod settings;

pub use analytics::*;
pub use campaign::*;
pub use contact::*;
pub use log::*;
pub use settings::*;
