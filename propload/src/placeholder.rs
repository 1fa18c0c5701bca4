//! Resolution of the `${name:default}` placeholder form.
//!
//! A raw value is a placeholder only when, after trimming, the whole value
//! starts with `${` and ends with `}`. The body must split on `:` into exactly
//! a lookup key and a fallback; anything else is passed through untouched.
//! Resolution is single-level: neither the key nor the resolved value is
//! scanned again.

use crate::EnvironmentSnapshot;

const OPEN: &str = "${";
const CLOSE: char = '}';
const SEPARATOR: char = ':';

/// How a raw value was resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// Not a placeholder; the original value is kept.
    Literal(&'a str),
    /// The lookup key was present in the snapshot.
    Environment {
        /// Key looked up in the snapshot.
        key: &'a str,
        /// Value found in the snapshot.
        value: &'a str,
    },
    /// The lookup key was absent so the fallback applies.
    Default {
        /// Key looked up in the snapshot.
        key: &'a str,
        /// Fallback written after the separator.
        value: &'a str,
    },
    /// Placeholder syntax with zero, one or several separators.
    Malformed(&'a str),
}

impl<'a> Resolution<'a> {
    /// The value this resolution produces.
    #[must_use]
    pub const fn value(&self) -> &'a str {
        match *self {
            Self::Literal(raw) | Self::Malformed(raw) => raw,
            Self::Environment { value, .. } | Self::Default { value, .. } => value,
        }
    }
}

/// Classify `raw` against `env` without logging.
///
/// # Examples
///
/// ```
/// use propload::{EnvironmentSnapshot, Resolution, resolve_placeholder};
///
/// let env = EnvironmentSnapshot::empty();
/// assert_eq!(
///     resolve_placeholder("${sys.y:default}", &env),
///     Resolution::Default { key: "sys.y", value: "default" },
/// );
/// assert_eq!(resolve_placeholder("${a:b:c}", &env), Resolution::Malformed("${a:b:c}"));
/// ```
#[must_use]
pub fn resolve_placeholder<'a>(raw: &'a str, env: &'a EnvironmentSnapshot) -> Resolution<'a> {
    let Some(body) = raw
        .trim()
        .strip_prefix(OPEN)
        .and_then(|rest| rest.strip_suffix(CLOSE))
    else {
        return Resolution::Literal(raw);
    };
    let mut parts = body.split(SEPARATOR);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(key), Some(fallback), None) => env.get(key).map_or(
            Resolution::Default {
                key,
                value: fallback,
            },
            |value| Resolution::Environment { key, value },
        ),
        _ => Resolution::Malformed(raw),
    }
}

/// Resolve `raw` against `env`, warning when the placeholder is malformed.
///
/// Literal and malformed values come back exactly as given, including any
/// surrounding whitespace.
///
/// # Examples
///
/// ```
/// use propload::{EnvironmentSnapshot, resolve};
///
/// let env = EnvironmentSnapshot::from_iter([("sys.y", "override")]);
/// assert_eq!(resolve("${sys.y:default}", &env), "override");
/// assert_eq!(resolve("${other:default}", &env), "default");
/// assert_eq!(resolve(" plain ", &env), " plain ");
/// ```
#[must_use]
pub fn resolve<'a>(raw: &'a str, env: &'a EnvironmentSnapshot) -> &'a str {
    let resolution = resolve_placeholder(raw, env);
    if let Resolution::Malformed(original) = resolution {
        tracing::warn!(
            value = original,
            "malformed placeholder, expected ${{name:default}}; keeping value unchanged"
        );
    }
    resolution.value()
}
