//! Synthesis configuration, consumed but not owned.
//!
//! Loaded from a JSON file by the CLI or built in code by an embedding
//! renderer. `validate` runs before the first synthesis call; a bad limit is
//! a precondition violation, not a runtime fault of the synthesizer.

use std::collections::BTreeSet;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Whether a document describes a request or a response body. Field naming
/// and transient handling are configured independently per direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Request,
    Response,
}

/// Output naming convention for field names.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NamingStyle {
    /// Keep the declared (camelCase) name.
    #[default]
    AsDeclared,
    SnakeCase,
    KebabCase,
}

impl NamingStyle {
    pub fn apply(&self, name: &str) -> String {
        match self {
            NamingStyle::AsDeclared => name.to_string(),
            NamingStyle::SnakeCase => split_words(name, '_'),
            NamingStyle::KebabCase => split_words(name, '-'),
        }
    }
}

fn split_words(name: &str, sep: char) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                out.push(sep);
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// How an enum renders in the example document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnumMode {
    /// Name of the first declared constant, as a string.
    #[default]
    Name,
    /// Ordinal of the first declared constant (always 0).
    Ordinal,
    /// Underlying value of the first declared constant, falling back to its
    /// name when the analyzer recorded none.
    Value,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SynthConfig {
    /// Maximum expansion depth per root call.
    pub recursion_limit: u32,

    /// How many times one type may be entered on a single root-to-leaf path
    /// before it is forced to a reference placeholder. Sibling branches are
    /// not affected.
    pub max_type_repeats: u32,

    pub request_field_style: NamingStyle,
    pub response_field_style: NamingStyle,

    /// Transient fields are skipped unless the toggle for the direction is on.
    pub serialize_request_transients: bool,
    pub serialize_response_transients: bool,

    /// Field names excluded from every document.
    pub ignored_fields: BTreeSet<String>,

    /// Extra parameter types treated as non-data (beyond the built-in set).
    pub ignored_param_types: BTreeSet<String>,

    /// Wrapper class applied around return types before synthesis.
    pub response_wrapper: Option<String>,

    pub enum_mode: EnumMode,
}

impl Default for SynthConfig {
    fn default() -> Self {
        SynthConfig {
            recursion_limit: 7,
            max_type_repeats: 1,
            request_field_style: NamingStyle::AsDeclared,
            response_field_style: NamingStyle::AsDeclared,
            serialize_request_transients: false,
            serialize_response_transients: false,
            ignored_fields: BTreeSet::new(),
            ignored_param_types: BTreeSet::new(),
            response_wrapper: None,
            enum_mode: EnumMode::Name,
        }
    }
}

impl SynthConfig {
    pub fn validate(&self) -> Result<()> {
        if self.recursion_limit == 0 {
            return Err(Error::Config("recursionLimit must be a positive integer".into()));
        }
        if self.max_type_repeats == 0 {
            return Err(Error::Config("maxTypeRepeats must be a positive integer".into()));
        }
        Ok(())
    }

    pub fn field_style(&self, direction: Direction) -> NamingStyle {
        match direction {
            Direction::Request => self.request_field_style,
            Direction::Response => self.response_field_style,
        }
    }

    pub fn serialize_transients(&self, direction: Direction) -> bool {
        match direction {
            Direction::Request => self.serialize_request_transients,
            Direction::Response => self.serialize_response_transients,
        }
    }
}

// ------------------------------- Tests ------------------------------------ //
