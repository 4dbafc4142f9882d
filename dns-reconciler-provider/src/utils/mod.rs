//! Utility modules.

/// Log sanitization so credentials and long bodies never land in logs verbatim.
pub mod log_sanitizer;
