//! Core processing logic for chatviz.
//!
//! This module contains:
//! - [`filter`] - Narrowing a chat log by date and contact
//! - [`output`] - Chart writers (text, CSV, JSON)
//!
//! # Quick Start
//!
//! ```rust
//! use chatviz::core::{FilterConfig, apply_filters, to_text};
//! ```

pub mod filter;
pub mod output;

pub use filter::{FilterConfig, apply_filters};

#[cfg(feature = "csv-output")]
pub use output::{to_csv, write_csv};
pub use output::{to_json, to_text, write_json, write_text};
