//! ReadEscape — a distraction-free reading mode engine for web pages.
//!
//! This library crate exposes all modules for use by the binary and
//! integration tests.

pub mod app;
pub mod dom;
pub mod message_handler;
pub mod platform;
pub mod services;
pub mod types;
