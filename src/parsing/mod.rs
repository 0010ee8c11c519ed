//! Line-level parsing utilities.
//!
//! This module holds the WhatsApp header grammar (layouts, timestamps,
//! sender splitting and system-notice detection) used by
//! [`WhatsAppParser`](crate::parser::WhatsAppParser).

pub mod whatsapp;

// Re-export commonly used items
pub use whatsapp::{
    Header, Layout, detect_layout, is_system_message, match_header, normalize_line,
    parse_timestamp, resolve_date_order, split_sender,
};
