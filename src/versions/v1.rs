//! SBML object model with serde serialization.
//!
//! Documents are stored as JSON. Field names follow the SBML attribute names in
//! snake case; math is kept as an infix string and parsed on demand.

use derive_builder::Builder;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::validation::consistency::Report;

//
// Type definitions
//
/// The SBMLDocument is the root container. It records the SBML level and
/// version the model was written against and owns at most one model.
/// Diagnostics produced by consistency checks are kept in the error log,
/// which is never serialized.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Builder)]
#[allow(non_snake_case)]
pub struct SBMLDocument {
    /// SBML level of the document.
    #[serde(default = "default_level")]
    #[builder(default = "3")]
    pub level: u32,

    /// SBML version within the level.
    #[serde(default = "default_version")]
    #[builder(default = "2")]
    pub version: u32,

    /// The model contained in the document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(into, strip_option))]
    pub model: Option<Model>,

    /// Diagnostics of the last consistency check.
    #[serde(skip)]
    #[schemars(skip)]
    #[builder(default)]
    pub error_log: Report,
}

impl Default for SBMLDocument {
    fn default() -> Self {
        Self {
            level: default_level(),
            version: default_version(),
            model: None,
            error_log: Report::default(),
        }
    }
}

fn default_level() -> u32 {
    3
}

fn default_version() -> u32 {
    2
}

/// The Model holds the quantities of a biological system and the rules
/// relating them. The order of `rules` is significant: assignment rules are
/// evaluated in list order by simulators that do not sort them themselves.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Builder, Default, PartialEq)]
#[allow(non_snake_case)]
pub struct Model {
    /// Identifier of the model.
    ///
    #[builder(setter(into))]
    pub id: String,

    /// Name of the model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(into, strip_option))]
    pub name: Option<String>,

    /// Compartments that species live in.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[builder(default, setter(into, each(name = "to_compartments")))]
    pub compartments: Vec<Compartment>,

    /// Species of the model.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[builder(default, setter(into, each(name = "to_species")))]
    pub species: Vec<Species>,

    /// Global parameters of the model.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[builder(default, setter(into, each(name = "to_parameters")))]
    pub parameters: Vec<Parameter>,

    /// Ordered list of rules of all kinds.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[builder(default, setter(into, each(name = "to_rules")))]
    pub rules: Vec<Rule>,
}

/// A Compartment is a bounded container of finite size in which species
/// are located.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Builder, Default, PartialEq)]
#[allow(non_snake_case)]
pub struct Compartment {
    /// Identifier of the compartment.
    ///
    #[builder(setter(into))]
    pub id: String,

    /// Name of the compartment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(into, strip_option))]
    pub name: Option<String>,

    /// Size of the compartment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(into, strip_option))]
    pub size: Option<f64>,

    /// Whether the size is fixed over time.
    #[serde(default = "default_true")]
    #[builder(default = "true")]
    pub constant: bool,
}

/// A Species is a pool of entities located in a compartment.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Builder, Default, PartialEq)]
#[allow(non_snake_case)]
pub struct Species {
    /// Identifier of the species.
    ///
    #[builder(setter(into))]
    pub id: String,

    /// Name of the species.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(into, strip_option))]
    pub name: Option<String>,

    /// Identifier of the compartment the species is located in.
    ///
    #[builder(setter(into))]
    pub compartment: String,

    /// Initial concentration of the species.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(into, strip_option))]
    pub initial_concentration: Option<f64>,

    /// Whether the amount is fixed over time.
    #[serde(default)]
    #[builder(default)]
    pub constant: bool,
}

/// A Parameter is a named quantity that may be fixed or changed by rules.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Builder, Default, PartialEq)]
#[allow(non_snake_case)]
pub struct Parameter {
    /// Identifier of the parameter.
    ///
    #[builder(setter(into))]
    pub id: String,

    /// Name of the parameter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(into, strip_option))]
    pub name: Option<String>,

    /// Value of the parameter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(into, strip_option))]
    pub value: Option<f64>,

    /// Unit of the parameter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(into, strip_option))]
    pub unit: Option<String>,

    /// Whether the value is fixed over time.
    #[serde(default = "default_true")]
    #[builder(default = "true")]
    pub constant: bool,
}

/// A Rule constrains a quantity through a mathematical expression. Assignment
/// and rate rules name the quantity in `variable`; algebraic rules do not.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Builder, Default, PartialEq)]
#[allow(non_snake_case)]
pub struct Rule {
    /// Kind of the rule.
    ///
    #[builder(setter(into))]
    pub rule_type: RuleType,

    /// Identifier of the quantity this rule determines.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(into, strip_option))]
    pub variable: Option<String>,

    /// Infix expression forming the right hand side of the rule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(into, strip_option))]
    pub math: Option<String>,

    /// Meta identifier used to refer to the rule itself.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(into, strip_option))]
    pub meta_id: Option<String>,
}

fn default_true() -> bool {
    true
}

//
// Enum definitions
//
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, Default, PartialEq, Eq, Hash)]
pub enum RuleType {
    #[default]
    #[serde(rename = "assignment")]
    ASSIGNMENT,

    #[serde(rename = "rate")]
    RATE,

    #[serde(rename = "algebraic")]
    ALGEBRAIC,
}
