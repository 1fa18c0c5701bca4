//! Binds the `propload` feature files to the step registry.

use crate::fixtures::{LoadContext, SettingsContext, load_context, settings_context};
use rstest_bdd_macros::scenarios;

scenarios!(
    "tests/features/load_properties.feature",
    fixtures = [load_context: LoadContext]
);
scenarios!(
    "tests/features/settings.feature",
    fixtures = [settings_context: SettingsContext]
);
