//! Core crate for `propload`.
//!
//! Loads flat `.properties` files, resolves `${name:default}` placeholders
//! against a frozen environment snapshot, and builds the `-Dkey=value`
//! aggregate strings consumed by tools that take JVM-style arguments.
//!
//! ```rust,no_run
//! use propload::{EnvironmentSnapshot, MemorySink, PropertySink, run_files};
//!
//! let env = EnvironmentSnapshot::capture();
//! let files = ["defaults.properties", "local.properties"];
//! let mut report = run_files(files, "loaded.properties", &env);
//! let mut project = MemorySink::new("project");
//! report.publish(&mut [&mut project as &mut dyn PropertySink]);
//! ```

mod aggregate;
mod error;
mod file;
mod placeholder;
mod property;
mod run;
pub mod settings;
mod sink;
mod snapshot;

pub use aggregate::{AggregateState, Aggregates, NO_SPACE_SUFFIX};
pub use error::{AggregatedErrors, PropsError, PropsResult};
pub use file::{
    LoadOutcome, LoadedFile, SyntaxError, format_property_line, load_all, load_properties_file,
    parse_properties, write_properties,
};
pub use placeholder::{Resolution, resolve, resolve_placeholder};
pub use property::{PropertyEntry, PropertyMap, ResolvedProperty};
pub use run::{RunReport, resolve_entries, run_files};
pub use settings::{ListEnv, LoaderSettings};
pub use sink::{MemorySink, ProcessEnvSink, PropertiesFileSink, PropertySink, publish};
pub use snapshot::EnvironmentSnapshot;

pub use figment;
