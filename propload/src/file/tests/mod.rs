//! Tests for the file module, split by concern.
