//! Reading and writing flat `.properties` files.

pub(crate) mod helpers;
mod loader;
mod parser;
mod writer;

pub use loader::{LoadOutcome, LoadedFile, load_all, load_properties_file};
pub use parser::{SyntaxError, parse_properties};
pub use writer::{format_property_line, write_properties};

#[cfg(test)]
mod tests;
