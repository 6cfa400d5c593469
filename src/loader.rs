//! Parses a namespaced recipe collection into [`Recipe`] records.
//!
//! The document is read once into a small owned element tree and recipes are
//! then extracted with descendant searches, so nested structures (an
//! ingredient made of sub-ingredients with its own preparation) contribute
//! their ingredients and steps in document order.

use std::collections::HashMap;
use std::path::Path;

use log::{debug, info};
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::reader::NsReader;

use crate::error::RecipeError;
use crate::model::{Ingredient, Nutrition, Preparation, Recipe, Related, Step};
use crate::namespaces::{Namespaces, RECIPE_PREFIX};

/// Amount placeholder meaning "to taste".
const AMOUNT_PLACEHOLDER: &str = "*";

/// Read the document at `path` and return its recipes in document order.
pub fn load_recipes(
    path: impl AsRef<Path>,
    namespaces: &Namespaces,
) -> Result<Vec<Recipe>, RecipeError> {
    let path = path.as_ref();
    debug!("Loading recipes from {}", path.display());
    let xml = std::fs::read_to_string(path).map_err(|source| RecipeError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let recipes = parse_recipes(&xml, namespaces)?;
    info!("Loaded {} recipes from {}", recipes.len(), path.display());
    Ok(recipes)
}

/// Parse an in-memory document and return its recipes in document order.
pub fn parse_recipes(xml: &str, namespaces: &Namespaces) -> Result<Vec<Recipe>, RecipeError> {
    let uri = namespaces
        .resolve(RECIPE_PREFIX)
        .ok_or_else(|| RecipeError::UnboundPrefix(RECIPE_PREFIX.to_string()))?;
    debug!("Matching recipe elements in namespace {}", uri);

    let root = parse_tree(xml)?;
    let scope = Scope {
        uri: uri.to_string(),
    };
    root.descendants()
        .filter(|element| scope.is(element, "recipe"))
        .map(|element| scope.recipe(element))
        .collect()
}

#[derive(Debug)]
struct Element {
    namespace: Option<String>,
    name: String,
    attributes: HashMap<String, String>,
    /// Text before the first child element.
    text: Option<String>,
    children: Vec<Element>,
}

impl Element {
    fn open(resolved: ResolveResult, start: &BytesStart) -> Result<Self, RecipeError> {
        let namespace = match resolved {
            ResolveResult::Bound(Namespace(uri)) => Some(String::from_utf8_lossy(uri).into_owned()),
            _ => None,
        };
        let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();

        let mut attributes = HashMap::new();
        for attribute in start.attributes() {
            let attribute = attribute?;
            if attribute.key.as_namespace_binding().is_some() {
                continue;
            }
            let key = String::from_utf8_lossy(attribute.key.local_name().as_ref()).into_owned();
            attributes.insert(key, attribute.unescape_value()?.into_owned());
        }

        Ok(Element {
            namespace,
            name,
            attributes,
            text: None,
            children: Vec::new(),
        })
    }

    /// Gather raw text; leading whitespace and anything after the first
    /// child are dropped, the rest is trimmed once by [`Element::text`].
    fn push_text(&mut self, text: &str) {
        if !self.children.is_empty() {
            return;
        }
        if self.text.is_none() && text.trim().is_empty() {
            return;
        }
        self.text.get_or_insert_with(String::new).push_str(text);
    }

    fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    fn text(&self) -> String {
        self.text.as_deref().map(str::trim).unwrap_or_default().to_string()
    }

    /// All elements below this one, in document order.
    fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.children.iter().rev().collect(),
        }
    }
}

struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let element = self.stack.pop()?;
        self.stack.extend(element.children.iter().rev());
        Some(element)
    }
}

fn parse_tree(xml: &str) -> Result<Element, RecipeError> {
    let mut reader = NsReader::from_str(xml);

    let mut open: Vec<Element> = Vec::new();
    let mut root = None;

    loop {
        match reader.read_resolved_event()? {
            (resolved, Event::Start(start)) => open.push(Element::open(resolved, &start)?),
            (resolved, Event::Empty(start)) => {
                let element = Element::open(resolved, &start)?;
                close(&mut open, &mut root, element)?;
            }
            (_, Event::End(_)) => {
                let element = open
                    .pop()
                    .ok_or_else(|| RecipeError::Malformed("unexpected closing tag".to_string()))?;
                close(&mut open, &mut root, element)?;
            }
            (_, Event::Text(text)) => {
                if let Some(element) = open.last_mut() {
                    element.push_text(&text.unescape()?);
                }
            }
            (_, Event::CData(data)) => {
                if let Some(element) = open.last_mut() {
                    element.push_text(&String::from_utf8_lossy(&data));
                }
            }
            (_, Event::Eof) => break,
            _ => {}
        }
    }

    if let Some(element) = open.last() {
        return Err(RecipeError::Malformed(format!(
            "element <{}> is never closed",
            element.name
        )));
    }
    root.ok_or_else(|| RecipeError::Malformed("document has no root element".to_string()))
}

fn close(
    open: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), RecipeError> {
    match open.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_none() => *root = Some(element),
        None => {
            return Err(RecipeError::Malformed(
                "document has more than one root element".to_string(),
            ))
        }
    }
    Ok(())
}

/// Extraction rules for elements in the recipe namespace.
struct Scope {
    uri: String,
}

impl Scope {
    fn is(&self, element: &Element, name: &str) -> bool {
        element.name == name && element.namespace.as_deref() == Some(self.uri.as_str())
    }

    fn first<'e>(&self, parent: &'e Element, name: &str) -> Option<&'e Element> {
        parent.descendants().find(|element| self.is(element, name))
    }

    fn all<'e>(
        &'e self,
        parent: &'e Element,
        name: &'e str,
    ) -> impl Iterator<Item = &'e Element> + 'e {
        parent
            .descendants()
            .filter(move |element| self.is(element, name))
    }

    fn required_text(
        &self,
        recipe: &Element,
        id: &str,
        name: &'static str,
    ) -> Result<String, RecipeError> {
        self.first(recipe, name)
            .map(Element::text)
            .ok_or_else(|| RecipeError::MissingElement {
                recipe: id.to_string(),
                element: name,
            })
    }

    fn optional_text(&self, recipe: &Element, name: &str) -> String {
        self.first(recipe, name).map(Element::text).unwrap_or_default()
    }

    fn recipe(&self, element: &Element) -> Result<Recipe, RecipeError> {
        let id = element.attribute("id").unwrap_or_default().to_string();
        let title = self.required_text(element, &id, "title")?;
        let date = self.required_text(element, &id, "date")?;

        let ingredients = self
            .all(element, "ingredient")
            .map(|ingredient| ingredient_from(ingredient, &id))
            .collect::<Result<Vec<_>, _>>()?;

        let steps = self
            .all(element, "step")
            .map(|step| Step {
                description: step.text(),
            })
            .collect();

        let nutrition = self
            .first(element, "nutrition")
            .ok_or_else(|| RecipeError::MissingElement {
                recipe: id.clone(),
                element: "nutrition",
            })
            .and_then(|nutrition| nutrition_from(nutrition, &id))?;

        let related = match self.first(element, "related") {
            Some(related) => Related {
                reference: related.attribute("ref").unwrap_or_default().to_string(),
                description: related.text(),
            },
            None => Related::default(),
        };

        Ok(Recipe {
            comment: self.optional_text(element, "comment"),
            id,
            title,
            date,
            ingredients,
            preparation: Preparation { steps },
            nutrition,
            related,
        })
    }
}

fn ingredient_from(element: &Element, recipe: &str) -> Result<Ingredient, RecipeError> {
    let name = element
        .attribute("name")
        .ok_or_else(|| RecipeError::MissingAttribute {
            recipe: recipe.to_string(),
            element: "ingredient",
            attribute: "name",
        })?;

    let amount = match element.attribute("amount").map(str::trim) {
        None | Some("") | Some(AMOUNT_PLACEHOLDER) => 0.0,
        Some(raw) => match raw.parse::<f64>() {
            Ok(amount) if amount.is_finite() && amount >= 0.0 => amount,
            _ => {
                return Err(RecipeError::InvalidNumber {
                    recipe: recipe.to_string(),
                    field: "amount",
                    value: raw.to_string(),
                })
            }
        },
    };

    Ok(Ingredient {
        name: name.to_string(),
        amount,
        unit: element.attribute("unit").unwrap_or_default().to_string(),
    })
}

fn nutrition_from(element: &Element, recipe: &str) -> Result<Nutrition, RecipeError> {
    let required = |attribute: &'static str| {
        element
            .attribute(attribute)
            .map(str::to_string)
            .ok_or_else(|| RecipeError::MissingAttribute {
                recipe: recipe.to_string(),
                element: "nutrition",
                attribute,
            })
    };

    let raw_calories = required("calories")?;
    let calories = raw_calories
        .trim()
        .parse::<i64>()
        .map_err(|_| RecipeError::InvalidNumber {
            recipe: recipe.to_string(),
            field: "calories",
            value: raw_calories.clone(),
        })?;

    Ok(Nutrition {
        calories,
        fat: required("fat")?,
        carbohydrates: required("carbohydrates")?,
        protein: required("protein")?,
    })
}
