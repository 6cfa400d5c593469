pub mod catalog;
pub mod chart;
pub mod config;
pub mod error;
pub mod loader;
pub mod model;
pub mod namespaces;
pub mod ordered_map;
pub mod repository;

pub use catalog::{catalog, ChartKind, ChartSpec, Measure, QueryDescriptor, QueryId, QueryOutput};
pub use crate::config::AppConfig;
pub use error::RecipeError;
pub use loader::{load_recipes, parse_recipes};
pub use model::{Ingredient, Nutrition, Preparation, Recipe, Related, Step};
pub use namespaces::{Namespaces, RECIPES_NAMESPACE};
pub use ordered_map::OrderedMap;
pub use repository::{RecipeRepository, DEFAULT_RECIPE_TITLE};
