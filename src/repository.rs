use std::collections::HashSet;
use std::path::Path;

use log::debug;

use crate::error::RecipeError;
use crate::loader::load_recipes;
use crate::model::{Ingredient, Recipe, Step};
use crate::namespaces::Namespaces;
use crate::ordered_map::OrderedMap;

/// Recipe used by the named-recipe queries when the caller has no preference.
pub const DEFAULT_RECIPE_TITLE: &str = "Zuppa Inglese";

/// Read-only query layer over a recipe collection loaded once.
///
/// Every query is a pure function of the held recipes, so a repository can be
/// shared freely between readers.
#[derive(Debug, Clone)]
pub struct RecipeRepository {
    recipes: Vec<Recipe>,
}

impl RecipeRepository {
    /// Load the document at `path` using the default `rcp` namespace binding
    pub fn open(path: impl AsRef<Path>) -> Result<Self, RecipeError> {
        Self::open_with_namespaces(path, &Namespaces::default())
    }

    pub fn open_with_namespaces(
        path: impl AsRef<Path>,
        namespaces: &Namespaces,
    ) -> Result<Self, RecipeError> {
        Ok(Self::from_recipes(load_recipes(path, namespaces)?))
    }

    pub fn from_recipes(recipes: Vec<Recipe>) -> Self {
        RecipeRepository { recipes }
    }

    /// All recipes, in document order
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    /// Every recipe's ingredients, concatenated in recipe order
    pub fn ingredients(&self) -> Vec<&Ingredient> {
        self.all_ingredients().collect()
    }

    pub fn titles(&self) -> Vec<&str> {
        self.recipes.iter().map(|r| r.title.as_str()).collect()
    }

    /// Total amount of egg ingredients across the whole collection
    pub fn total_eggs(&self) -> f64 {
        self.all_ingredients()
            .filter(|ing| name_contains(ing, "egg"))
            .map(|ing| ing.amount)
            .sum()
    }

    pub fn olive_oil_recipes(&self) -> Vec<&Recipe> {
        self.recipes
            .iter()
            .filter(|r| uses(r, "olive oil"))
            .collect()
    }

    /// Egg amount per recipe title. A repeated title keeps the last recipe's amount.
    pub fn eggs_by_recipe(&self) -> OrderedMap<String, f64> {
        self.recipes
            .iter()
            .map(|r| (r.title.clone(), quantity_of(r, "egg")))
            .collect()
    }

    pub fn under_500_calories(&self) -> Vec<&Recipe> {
        self.recipes
            .iter()
            .filter(|r| r.nutrition.calories < 500)
            .collect()
    }

    /// Sugar amount in the first recipe titled `title`
    pub fn sugar_quantity(&self, title: &str) -> Result<f64, RecipeError> {
        Ok(quantity_of(self.find_by_title(title)?, "sugar"))
    }

    /// Up to the first two steps of the first recipe titled `title`
    pub fn first_two_steps(&self, title: &str) -> Result<&[Step], RecipeError> {
        let steps = &self.find_by_title(title)?.preparation.steps;
        Ok(&steps[..steps.len().min(2)])
    }

    pub fn more_than_5_steps(&self) -> Vec<&Recipe> {
        self.recipes
            .iter()
            .filter(|r| r.preparation.steps.len() > 5)
            .collect()
    }

    pub fn butter_free(&self) -> Vec<&Recipe> {
        self.recipes.iter().filter(|r| !uses(r, "butter")).collect()
    }

    /// Recipes sharing at least one ingredient name (ignoring case) with the
    /// recipe titled `comparator`. The comparator itself is part of the result.
    pub fn common_ingredients(&self, comparator: &str) -> Result<Vec<&Recipe>, RecipeError> {
        let reference = ingredient_names(self.find_by_title(comparator)?);
        Ok(self
            .recipes
            .iter()
            .filter(|r| !ingredient_names(r).is_disjoint(&reference))
            .collect())
    }

    /// Highest-calorie recipe; the earliest one wins a tie
    pub fn most_caloric(&self) -> Option<&Recipe> {
        self.recipes.iter().reduce(|best, r| {
            if r.nutrition.calories > best.nutrition.calories {
                r
            } else {
                best
            }
        })
    }

    /// Most frequent non-empty ingredient unit; the first seen wins a tie
    pub fn most_common_unit(&self) -> Option<&str> {
        most_common(
            self.all_ingredients()
                .map(|ing| ing.unit.as_str())
                .filter(|unit| !unit.is_empty()),
        )
    }

    pub fn ingredient_count_by_recipe(&self) -> OrderedMap<String, usize> {
        self.recipes
            .iter()
            .map(|r| (r.title.clone(), r.ingredients.len()))
            .collect()
    }

    /// Recipe with the highest fat value, read as a number once `%` is removed.
    /// The earliest one wins a tie.
    pub fn fattest(&self) -> Result<Option<&Recipe>, RecipeError> {
        let mut fattest: Option<(&Recipe, f64)> = None;
        for recipe in &self.recipes {
            let fat = percentage(&recipe.nutrition.fat, "fat")?;
            if fattest.map_or(true, |(_, best)| fat > best) {
                fattest = Some((recipe, fat));
            }
        }
        Ok(fattest.map(|(recipe, _)| recipe))
    }

    /// Most frequent ingredient name, compared exactly; the first seen wins a tie
    pub fn most_common_ingredient(&self) -> Option<&str> {
        most_common(self.all_ingredients().map(|ing| ing.name.as_str()))
    }

    /// All recipes ordered by ingredient count, keeping document order among equals
    pub fn sorted_by_ingredient_count(&self) -> Vec<&Recipe> {
        let mut sorted: Vec<&Recipe> = self.recipes.iter().collect();
        sorted.sort_by_key(|r| r.ingredients.len());
        sorted
    }

    /// Titles of the recipes using each distinct ingredient name.
    /// Look up with [`OrderedMap::value_or_default`] to get an empty list for
    /// unknown ingredients.
    pub fn recipes_by_ingredient(&self) -> OrderedMap<String, Vec<String>> {
        let mut groups: OrderedMap<String, Vec<String>> = OrderedMap::new();
        for recipe in &self.recipes {
            let mut seen = HashSet::new();
            for ingredient in &recipe.ingredients {
                let titles = groups.entry_or_default(ingredient.name.clone());
                if seen.insert(ingredient.name.as_str()) {
                    titles.push(recipe.title.clone());
                }
            }
        }
        groups
    }

    /// Step count buckets, built by writing `(step count, 1)` for each recipe.
    ///
    /// Later recipes overwrite earlier ones in the same bucket instead of
    /// adding to them, so every present bucket holds 1. Missing buckets read
    /// as 0 through [`OrderedMap::value_or_default`].
    pub fn recipes_by_step_count(&self) -> OrderedMap<usize, usize> {
        self.recipes
            .iter()
            .map(|r| (r.preparation.steps.len(), 1))
            .collect()
    }

    /// Recipe with the fewest steps; the earliest one wins a tie
    pub fn simplest(&self) -> Option<&Recipe> {
        self.recipes.iter().reduce(|best, r| {
            if r.preparation.steps.len() < best.preparation.steps.len() {
                r
            } else {
                best
            }
        })
    }

    fn all_ingredients(&self) -> impl Iterator<Item = &Ingredient> {
        self.recipes.iter().flat_map(|r| r.ingredients.iter())
    }

    fn find_by_title(&self, title: &str) -> Result<&Recipe, RecipeError> {
        self.recipes
            .iter()
            .find(|r| r.title == title)
            .ok_or_else(|| {
                debug!("No recipe titled '{}'", title);
                RecipeError::NotFound(title.to_string())
            })
    }
}

fn name_contains(ingredient: &Ingredient, needle: &str) -> bool {
    ingredient.name.to_lowercase().contains(needle)
}

fn uses(recipe: &Recipe, needle: &str) -> bool {
    recipe.ingredients.iter().any(|ing| name_contains(ing, needle))
}

fn quantity_of(recipe: &Recipe, needle: &str) -> f64 {
    recipe
        .ingredients
        .iter()
        .filter(|ing| name_contains(ing, needle))
        .map(|ing| ing.amount)
        .sum()
}

fn ingredient_names(recipe: &Recipe) -> HashSet<String> {
    recipe
        .ingredients
        .iter()
        .map(|ing| ing.name.to_lowercase())
        .collect()
}

fn most_common<'a>(values: impl Iterator<Item = &'a str>) -> Option<&'a str> {
    let mut counts: OrderedMap<&str, usize> = OrderedMap::new();
    for value in values {
        *counts.entry_or_default(value) += 1;
    }
    counts
        .iter()
        .fold(None, |best: Option<(&'a str, usize)>, (value, count)| match best {
            Some((_, top)) if top >= *count => best,
            _ => Some((*value, *count)),
        })
        .map(|(value, _)| value)
}

fn percentage(raw: &str, field: &'static str) -> Result<f64, RecipeError> {
    raw.replace('%', "")
        .trim()
        .parse::<f64>()
        .map_err(|_| RecipeError::ParseError {
            field,
            value: raw.to_string(),
        })
}
