//! Starfish CLI library.
//!
//! Command implementations and input loading for the `starfish` binary.

pub mod commands;
pub mod input;
