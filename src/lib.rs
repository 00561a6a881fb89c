//! SBML Rule Ordering Library
//!
//! This library provides functionality for working with the rules of SBML models, including:
//! - A JSON-serializable SBML object model
//! - Parsing rule math into expression trees
//! - Building dependency graphs between assignment rules
//! - Sorting assignment rules so that dependencies are evaluated first
//! - Validating SBML documents before conversion
//! - Displaying documents and rule orders as tables

#![warn(unused_imports)]

pub mod versions {
    pub use crate::versions::v1 as latest;
    pub mod v1;
}

/// Commonly used types and functionality re-exported for convenience
pub mod prelude {
    pub use crate::conversion::{
        ConversionError, ConversionOption, ConversionProperties, Converter, ConverterRegistry,
        OptionValue, RuleConverter, SORT_RULES,
    };
    pub use crate::io::*;
    pub use crate::ordering::{reorder_rules, DependencyGraph, OrderingError};
    pub use crate::versions::latest::*;
}

/// Expression trees for rule math
pub mod math {
    /// Expression tree and parsing
    pub mod ast;
    /// Error types for math parsing
    pub mod error;
}

/// Symbol extraction from rule math
pub mod equation;

/// Rule list access on models
pub mod model;

/// Dependency graph and ordering of assignment rules
pub mod ordering {
    pub use crate::ordering::error::*;
    pub use crate::ordering::graph::*;
    pub use crate::ordering::order::*;

    /// Error types for rule ordering
    pub mod error;
    /// Dependency graph between assignment rules
    pub mod graph;
    /// Stable dependency ordering
    pub mod order;
}

/// Document conversions and their configuration
pub mod conversion {
    pub use crate::conversion::error::*;
    pub use crate::conversion::properties::*;
    pub use crate::conversion::registry::*;
    pub use crate::conversion::rules::*;

    pub mod error;
    /// Options passed to converters
    pub mod properties;
    /// Explicit converter registry
    pub mod registry;
    /// Sorting of assignment rules
    pub mod rules;
}

/// Validation of SBML documents and components
pub mod validation {
    pub use crate::validation::schema::*;
    /// Main consistency interface
    pub mod consistency;
    /// Validation of identifier syntax and uniqueness
    pub mod identifiers;
    /// Validation of parameters
    mod parameters;
    /// Validation of rule variables, math and cycles
    mod rules;
    /// Main schema validation interface
    pub mod schema;
    /// Validation of species references
    mod species;
}

/// Procedural and helper macros
pub mod macros {
    /// Macros for data extraction
    #[macro_use]
    pub mod extract_macro;
}

/// Table display of documents
pub mod info;

/// IO functionality
pub mod io;
