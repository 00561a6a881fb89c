//! Conversion properties
//!
//! A converter is configured through a set of named options. Each option has
//! a typed value and a short description. Properties can be loaded from and
//! stored as JSON, which is how the command line tool accepts them.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Typed value of a conversion option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Int(i64),
    Double(f64),
    String(String),
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Bool(value) => write!(f, "{value}"),
            OptionValue::Int(value) => write!(f, "{value}"),
            OptionValue::Double(value) => write!(f, "{value}"),
            OptionValue::String(value) => write!(f, "{value}"),
        }
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Bool(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        OptionValue::Int(value)
    }
}

impl From<f64> for OptionValue {
    fn from(value: f64) -> Self {
        OptionValue::Double(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::String(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::String(value)
    }
}

/// A single named option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionOption {
    pub key: String,
    pub value: OptionValue,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

/// Options passed to a converter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversionProperties {
    #[serde(default)]
    options: BTreeMap<String, ConversionOption>,
}

impl ConversionProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an option, replacing any option with the same key.
    pub fn add_option(
        &mut self,
        key: impl Into<String>,
        value: impl Into<OptionValue>,
        description: impl Into<String>,
    ) -> &mut Self {
        let key = key.into();
        self.options.insert(
            key.clone(),
            ConversionOption {
                key,
                value: value.into(),
                description: description.into(),
            },
        );
        self
    }

    /// Builder-style variant of [`ConversionProperties::add_option`].
    pub fn with_option(
        mut self,
        key: impl Into<String>,
        value: impl Into<OptionValue>,
        description: impl Into<String>,
    ) -> Self {
        self.add_option(key, value, description);
        self
    }

    pub fn has_option(&self, key: &str) -> bool {
        self.options.contains_key(key)
    }

    pub fn get_option(&self, key: &str) -> Option<&ConversionOption> {
        self.options.get(key)
    }

    pub fn remove_option(&mut self, key: &str) -> Option<ConversionOption> {
        self.options.remove(key)
    }

    /// Boolean value of an option.
    ///
    /// Returns `None` if the option is missing or not a boolean.
    pub fn get_bool_value(&self, key: &str) -> Option<bool> {
        match self.options.get(key).map(|o| &o.value) {
            Some(OptionValue::Bool(value)) => Some(*value),
            _ => None,
        }
    }

    /// Sets the value of an option, keeping its description.
    pub fn set_bool_value(&mut self, key: &str, value: bool) {
        match self.options.get_mut(key) {
            Some(option) => option.value = OptionValue::Bool(value),
            None => {
                self.add_option(key, value, "");
            }
        }
    }

    /// Overlays the options of `other` on top of these.
    pub fn merge(&mut self, other: &ConversionProperties) {
        for (key, option) in &other.options {
            self.options.insert(key.clone(), option.clone());
        }
    }

    pub fn options(&self) -> impl Iterator<Item = &ConversionOption> {
        self.options.values()
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}
