use std::path::PathBuf;

use quick_xml::events::attributes::AttrError;
use thiserror::Error;

/// Errors that can occur while loading or querying recipes
#[derive(Error, Debug)]
pub enum RecipeError {
    /// Failed to read the recipe document from disk
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not well-formed XML
    #[error("Malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    /// An attribute could not be read
    #[error("Malformed XML attribute: {0}")]
    Attribute(#[from] AttrError),

    /// The document parsed but has no usable structure
    #[error("Malformed document: {0}")]
    Malformed(String),

    /// The namespace mapping does not bind a prefix the loader needs
    #[error("Namespace prefix '{0}' is not bound in the namespace mapping")]
    UnboundPrefix(String),

    /// A recipe lacks a required child element
    #[error("Recipe '{recipe}' is missing required element <{element}>")]
    MissingElement {
        recipe: String,
        element: &'static str,
    },

    /// A required attribute is absent
    #[error("Recipe '{recipe}': <{element}> is missing required attribute '{attribute}'")]
    MissingAttribute {
        recipe: String,
        element: &'static str,
        attribute: &'static str,
    },

    /// A numeric attribute in the document could not be parsed
    #[error("Recipe '{recipe}': invalid {field} '{value}'")]
    InvalidNumber {
        recipe: String,
        field: &'static str,
        value: String,
    },

    /// No recipe has the requested title
    #[error("No recipe titled '{0}'")]
    NotFound(String),

    /// A text field expected to hold a number does not
    #[error("Cannot parse {field} value '{value}' as a number")]
    ParseError { field: &'static str, value: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}
