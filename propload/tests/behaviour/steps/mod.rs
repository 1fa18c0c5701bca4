//! Step definitions for the `propload` behavioural tests.

mod load_steps;
mod settings_steps;

/// Expand the `\n` escapes used to write multi-line bodies on one step line.
pub(crate) fn unescape_lines(body: &str) -> String {
    body.replace("\\n", "\n")
}
