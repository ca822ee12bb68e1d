//! Core state and behavior for the iptvrec form window.
//!
//! Everything here is independent of the terminal backend: the periodic
//! clock updater and its scheduler seam, the form model, button actions and
//! key bindings, the output transcript, the event bus, and logging setup.

pub mod actions;
pub mod bus;
pub mod clock;
pub mod event;
pub mod form;
pub mod keymap;
pub mod logging;
pub mod scheduler;
pub mod state;
pub mod transcript;
