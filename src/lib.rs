//! Spinless - keeps Kodi from spinning up drives to re-hash local artwork
//!
//! This library crate exposes the core functionality for integration testing.

pub mod applier;
pub mod config;
pub mod library;
pub mod report;
pub mod scanner;
pub mod texture;
pub mod worker;
