//! Terminal rendering for the iptvrec window.
//!
//! Draws the header bar with its clock label, the entry column, the buttons,
//! and the output pane. All rendering uses [`ratatui`]; state lives in
//! [`iptvrec_core`].

pub mod form;
pub mod header;
pub mod layout;
pub mod output;
pub mod window;
