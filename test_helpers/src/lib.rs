//! Test helpers shared across the `propload` crates.
//!
//! - [`env`] mutates process environment variables behind a global lock and
//!   restores them on drop.
//! - [`fixtures`] writes properties files into a temporary directory.
//! - [`logs`] records `tracing` events emitted by the code under test.

pub mod env;
pub mod fixtures;
pub mod logs;
