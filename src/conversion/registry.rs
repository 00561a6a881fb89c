//! Converter registry
//!
//! Converters are registered with an explicit [`ConverterRegistry`] owned by
//! the host application. A conversion request is described by
//! [`ConversionProperties`]; the registry hands it to the most recently
//! registered converter that accepts these properties.

use std::fmt;

use log::debug;

use super::{error::ConversionError, properties::ConversionProperties, rules::RuleConverter};
use crate::prelude::SBMLDocument;

/// A document conversion that can be selected through properties.
pub trait Converter {
    /// Human readable name of the converter.
    fn name(&self) -> &str;

    /// Options understood by the converter, with their default values.
    fn default_properties(&self) -> ConversionProperties;

    /// Whether the converter is responsible for the given request.
    fn matches_properties(&self, props: &ConversionProperties) -> bool;

    /// Converts the document in place.
    ///
    /// On error, the document is left unchanged except for its error log.
    fn convert(
        &self,
        sbmldoc: &mut SBMLDocument,
        props: &ConversionProperties,
    ) -> Result<(), ConversionError>;
}

/// Collection of available converters.
#[derive(Default)]
pub struct ConverterRegistry {
    converters: Vec<Box<dyn Converter>>,
}

impl fmt::Debug for ConverterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.converters.iter().map(|c| c.name()))
            .finish()
    }
}

impl ConverterRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the converters of this crate.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(RuleConverter::new());
        registry
    }

    pub fn register<C: Converter + 'static>(&mut self, converter: C) -> &mut Self {
        self.converters.push(Box::new(converter));
        self
    }

    pub fn len(&self) -> usize {
        self.converters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.converters.is_empty()
    }

    /// Finds the converter for a request. Later registrations win.
    pub fn converter_for(&self, props: &ConversionProperties) -> Option<&dyn Converter> {
        self.converters
            .iter()
            .rev()
            .find(|converter| converter.matches_properties(props))
            .map(|converter| converter.as_ref())
    }

    /// Converts `sbmldoc` with the converter matching `props`.
    pub fn convert(
        &self,
        sbmldoc: &mut SBMLDocument,
        props: &ConversionProperties,
    ) -> Result<(), ConversionError> {
        let converter = self
            .converter_for(props)
            .ok_or(ConversionError::NoConverter)?;

        debug!("Converting document with '{}'", converter.name());
        converter.convert(sbmldoc, props)
    }
}

impl SBMLDocument {
    /// Converts the document with the converter of `registry` that matches
    /// `props`.
    pub fn convert(
        &mut self,
        props: &ConversionProperties,
        registry: &ConverterRegistry,
    ) -> Result<(), ConversionError> {
        registry.convert(self, props)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversion::rules::SORT_RULES;

    struct NamedConverter(&'static str);

    impl Converter for NamedConverter {
        fn name(&self) -> &str {
            self.0
        }

        fn default_properties(&self) -> ConversionProperties {
            ConversionProperties::new().with_option(self.0, true, "")
        }

        fn matches_properties(&self, props: &ConversionProperties) -> bool {
            props.has_option(self.0) || props.has_option(SORT_RULES)
        }

        fn convert(
            &self,
            _sbmldoc: &mut SBMLDocument,
            _props: &ConversionProperties,
        ) -> Result<(), ConversionError> {
            Err(ConversionError::OperationFailed(self.0.to_string()))
        }
    }

    #[test]
    fn test_with_defaults() {
        let registry = ConverterRegistry::with_defaults();
        let props = ConversionProperties::new().with_option(SORT_RULES, true, "sort rules");

        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.converter_for(&props).map(|c| c.name()),
            Some("SBML Rule Converter")
        );
    }

    #[test]
    fn test_no_converter() {
        let registry = ConverterRegistry::new();
        let mut doc = SBMLDocument::default();

        assert!(registry.is_empty());
        let result = doc.convert(&ConversionProperties::new(), &registry);
        assert!(matches!(result, Err(ConversionError::NoConverter)));
    }

    #[test]
    fn test_later_registration_wins() {
        let mut registry = ConverterRegistry::with_defaults();
        registry.register(NamedConverter("custom"));

        let props = ConversionProperties::new().with_option(SORT_RULES, true, "");
        assert_eq!(registry.converter_for(&props).map(|c| c.name()), Some("custom"));

        let mut doc = SBMLDocument::default();
        let result = registry.convert(&mut doc, &props);
        assert!(matches!(result, Err(ConversionError::OperationFailed(name)) if name == "custom"));
    }
}
