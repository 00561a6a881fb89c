//! Extraction Macro Module
//!
//! This module provides the macro `extract_all` for field extraction from
//! nested structs of the SBML object model.
//!
//! # Macro Behavior
//!
//! The macro supports these extraction patterns:
//! - Simple field access
//! - Nested field traversal
//! - Vector element extraction with the wildcard `[*]` or an explicit index

#[macro_export]
/// `extract_all` yields an iterator over references to the addressed fields.
///
/// ```
/// use sbml_rules::extract_all;
/// use sbml_rules::prelude::*;
///
/// let model = ModelBuilder::default()
///     .id("m")
///     .to_parameters(ParameterBuilder::default().id("k").build().unwrap())
///     .build()
///     .unwrap();
///
/// let ids: Vec<&String> = extract_all!(model, parameters[*].id).collect();
/// assert_eq!(ids, vec!["k"]);
/// ```
macro_rules! extract_all {
    // Base case: a single field of the struct
    ($struct:expr, $field:ident) => {
        std::iter::once(&$struct.$field)
    };

    // All elements of a vector
    ($struct:expr, $vec_path:ident [*] ) => {
        $struct.$vec_path.iter()
    };

    // All elements of a vector, continuing the path on each element
    ($struct:expr, $vec_path:ident [*] . $($rest:tt)*) => {
        $struct.$vec_path.iter().flat_map(|item| $crate::extract_all!(item, $($rest)*))
    };

    // A single element of a vector, continuing the path on it
    ($struct:expr, $vec_path:ident [$idx:expr] . $($rest:tt)*) => {
        $crate::extract_all!($struct.$vec_path[$idx], $($rest)*)
    };

    // Nested field access
    ($struct:expr, $field:ident . $($rest:tt)*) => {
        $crate::extract_all!($struct.$field, $($rest)*)
    };
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test]
    fn test_extract_nested() {
        let doc = SBMLDocumentBuilder::default()
            .model(
                ModelBuilder::default()
                    .id("m")
                    .to_rules(Rule::assignment("A", "1"))
                    .to_rules(Rule::assignment("B", "2"))
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap();
        let model = doc.model.as_ref().unwrap();

        let variables: Vec<_> = extract_all!(model, rules[*].variable).collect();
        assert_eq!(variables.len(), 2);

        let first: Vec<_> = extract_all!(model, rules[0].math).collect();
        assert_eq!(first, vec![&Some("1".to_string())]);

        assert_eq!(extract_all!(model, rules[*]).count(), 2);
        assert_eq!(extract_all!(model, id).next(), Some(&"m".to_string()));
    }
}
