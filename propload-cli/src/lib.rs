//! Library interface for the `propload` command-line host.
//!
//! The binary parses [`cli::Args`], installs logging, and hands over to
//! [`app::run`]. Report rendering lives in [`output`] so it can be tested
//! without spawning the binary.

pub mod app;
pub mod cli;
pub mod error;
pub mod logging;
pub mod output;
