//! Configuration schema and loader for iptvrec.
//!
//! The on-disk format is TOML. Every key is optional; a missing file means
//! defaults throughout.

pub mod app;

pub use app::{AppConfig, ClockConfig, ClockModeConfig, FieldsConfig, WindowConfig};
