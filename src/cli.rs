//! Command-line interface for the shiftclean binary.
//!
//! Argument definitions live in [`args`]; command execution, logging setup
//! and result reporting live in [`commands`].

pub mod args;
pub mod commands;
