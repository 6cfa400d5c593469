use serde::Deserialize;
use std::collections::BTreeMap;

/// Prefix the loader uses to address recipe elements.
pub const RECIPE_PREFIX: &str = "rcp";

/// Schema URI bound to [`RECIPE_PREFIX`] unless overridden.
pub const RECIPES_NAMESPACE: &str = "http://www.brics.dk/ixwt/recipes";

/// Mapping from namespace prefix to namespace URI.
///
/// Element matching happens on the resolved URI, so the prefixes used inside
/// the document itself are irrelevant; only the URI bound here to `rcp` has to
/// agree with the document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Namespaces(BTreeMap<String, String>);

impl Namespaces {
    /// An empty mapping with no prefixes bound
    pub fn empty() -> Self {
        Namespaces(BTreeMap::new())
    }

    /// Bind `prefix` to `uri`, replacing any previous binding
    pub fn with(mut self, prefix: impl Into<String>, uri: impl Into<String>) -> Self {
        self.0.insert(prefix.into(), uri.into());
        self
    }

    pub fn resolve(&self, prefix: &str) -> Option<&str> {
        self.0.get(prefix).map(String::as_str)
    }
}

impl Default for Namespaces {
    fn default() -> Self {
        Namespaces::empty().with(RECIPE_PREFIX, RECIPES_NAMESPACE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_binds_recipe_prefix() {
        let namespaces = Namespaces::default();
        assert_eq!(namespaces.resolve("rcp"), Some(RECIPES_NAMESPACE));
        assert_eq!(namespaces.resolve("xsl"), None);
    }

    #[test]
    fn test_with_overrides_binding() {
        let namespaces = Namespaces::default().with("rcp", "urn:example:recipes");
        assert_eq!(namespaces.resolve("rcp"), Some("urn:example:recipes"));
    }
}
