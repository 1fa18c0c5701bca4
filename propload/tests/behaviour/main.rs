//! Behavioural tests for `propload`, driven by the feature files under
//! `tests/features`.

mod fixtures;
mod scenarios;
mod steps;
