//! Core types for Hemline.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod source;

pub use email::{Email, EmailError};
pub use id::*;
pub use source::SourceKind;
