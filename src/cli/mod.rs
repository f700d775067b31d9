//! Command-line interface. Not part of the library API.

pub mod args;
pub mod commands;

pub use args::Riposte;
