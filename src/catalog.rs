//! Static description of the queries a front end can present.
//!
//! Each query has a stable key, a display name, a description and, when its
//! result can be drawn, a chart directive naming how to read the y value.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::RecipeError;
use crate::model::{Ingredient, Recipe, Step};
use crate::ordered_map::OrderedMap;
use crate::repository::{RecipeRepository, DEFAULT_RECIPE_TITLE};

/// Variants are declared in catalog order; a variant's discriminant is its
/// index in [`catalog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryId {
    Recipes,
    Ingredients,
    Titles,
    TotalEggs,
    OliveOilRecipes,
    EggsByRecipe,
    Under500Calories,
    SugarQuantity,
    FirstTwoSteps,
    MoreThan5Steps,
    ButterFree,
    CommonIngredients,
    MostCaloric,
    MostCommonUnit,
    IngredientCountByRecipe,
    Fattest,
    MostCommonIngredient,
    SortedByIngredientCount,
    RecipesByIngredient,
    RecipesByStepCount,
    Simplest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Bar,
}

/// How a bar's height is read from a query result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Measure {
    Calories,
    StepCount,
    IngredientCount,
    /// The value stored under each key of a mapping result
    MappedValue,
}

impl Measure {
    fn of_recipe(self, recipe: &Recipe) -> Option<f64> {
        match self {
            Measure::Calories => Some(recipe.nutrition.calories as f64),
            Measure::StepCount => Some(recipe.preparation.steps.len() as f64),
            Measure::IngredientCount => Some(recipe.ingredients.len() as f64),
            Measure::MappedValue => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub measure: Measure,
}

#[derive(Debug, Clone, Copy)]
pub struct QueryDescriptor {
    pub id: QueryId,
    pub key: &'static str,
    pub display: &'static str,
    pub description: &'static str,
    pub chart: Option<ChartSpec>,
}

const fn bar(y_label: &'static str, measure: Measure) -> Option<ChartSpec> {
    Some(ChartSpec {
        kind: ChartKind::Bar,
        x_label: "recipe",
        y_label,
        measure,
    })
}

static CATALOG: [QueryDescriptor; QueryId::Simplest as usize + 1] = [
    QueryDescriptor {
        id: QueryId::Recipes,
        key: "recipes",
        display: "All recipes",
        description: "Every recipe in the collection, in document order.",
        chart: None,
    },
    QueryDescriptor {
        id: QueryId::Ingredients,
        key: "ingredients",
        display: "All ingredients",
        description: "Every ingredient of every recipe, in recipe order.",
        chart: None,
    },
    QueryDescriptor {
        id: QueryId::Titles,
        key: "titles",
        display: "Recipe titles",
        description: "The title of each recipe, in document order.",
        chart: None,
    },
    QueryDescriptor {
        id: QueryId::TotalEggs,
        key: "total-eggs",
        display: "Total eggs",
        description: "Total amount of eggs used across all recipes.",
        chart: None,
    },
    QueryDescriptor {
        id: QueryId::OliveOilRecipes,
        key: "olive-oil",
        display: "Olive oil recipes",
        description: "Recipes that use olive oil.",
        chart: None,
    },
    QueryDescriptor {
        id: QueryId::EggsByRecipe,
        key: "eggs-by-recipe",
        display: "Eggs per recipe",
        description: "Amount of eggs used by each recipe, keyed by title.",
        chart: bar("eggs", Measure::MappedValue),
    },
    QueryDescriptor {
        id: QueryId::Under500Calories,
        key: "under-500-calories",
        display: "Recipes under 500 calories",
        description: "Recipes providing fewer than 500 calories.",
        chart: bar("calories", Measure::Calories),
    },
    QueryDescriptor {
        id: QueryId::SugarQuantity,
        key: "sugar-quantity",
        display: "Sugar in \"Zuppa Inglese\"",
        description: "Amount of sugar used by the recipe \"Zuppa Inglese\".",
        chart: None,
    },
    QueryDescriptor {
        id: QueryId::FirstTwoSteps,
        key: "first-two-steps",
        display: "First two steps of \"Zuppa Inglese\"",
        description: "The first two preparation steps of the recipe \"Zuppa Inglese\".",
        chart: None,
    },
    QueryDescriptor {
        id: QueryId::MoreThan5Steps,
        key: "more-than-5-steps",
        display: "Recipes with more than 5 steps",
        description: "Recipes whose preparation needs more than five steps.",
        chart: bar("steps", Measure::StepCount),
    },
    QueryDescriptor {
        id: QueryId::ButterFree,
        key: "butter-free",
        display: "Butter-free recipes",
        description: "Recipes that contain no butter.",
        chart: None,
    },
    QueryDescriptor {
        id: QueryId::CommonIngredients,
        key: "common-ingredients",
        display: "Ingredients shared with \"Zuppa Inglese\"",
        description: "Recipes sharing at least one ingredient with \"Zuppa Inglese\", itself included.",
        chart: bar("ingredients", Measure::IngredientCount),
    },
    QueryDescriptor {
        id: QueryId::MostCaloric,
        key: "most-caloric",
        display: "Most caloric recipe",
        description: "The recipe with the most calories.",
        chart: None,
    },
    QueryDescriptor {
        id: QueryId::MostCommonUnit,
        key: "most-common-unit",
        display: "Most common unit",
        description: "The measuring unit used most often by ingredients.",
        chart: None,
    },
    QueryDescriptor {
        id: QueryId::IngredientCountByRecipe,
        key: "ingredient-count",
        display: "Ingredients per recipe",
        description: "Number of ingredients of each recipe, keyed by title.",
        chart: bar("ingredients", Measure::MappedValue),
    },
    QueryDescriptor {
        id: QueryId::Fattest,
        key: "fattest",
        display: "Fattest recipe",
        description: "The recipe with the highest fat percentage.",
        chart: None,
    },
    QueryDescriptor {
        id: QueryId::MostCommonIngredient,
        key: "most-common-ingredient",
        display: "Most common ingredient",
        description: "The ingredient name that appears most often.",
        chart: None,
    },
    QueryDescriptor {
        id: QueryId::SortedByIngredientCount,
        key: "sorted-by-ingredient-count",
        display: "Sorted by ingredient count",
        description: "All recipes ordered by their number of ingredients.",
        chart: bar("ingredients", Measure::IngredientCount),
    },
    QueryDescriptor {
        id: QueryId::RecipesByIngredient,
        key: "recipes-by-ingredient",
        display: "Recipes per ingredient",
        description: "For each ingredient, the titles of the recipes that use it.",
        chart: None,
    },
    QueryDescriptor {
        id: QueryId::RecipesByStepCount,
        key: "recipes-by-step-count",
        display: "Recipes per step count",
        description: "Recipes grouped by their number of preparation steps.",
        chart: None,
    },
    QueryDescriptor {
        id: QueryId::Simplest,
        key: "simplest",
        display: "Simplest recipe",
        description: "The recipe with the fewest preparation steps.",
        chart: None,
    },
];

/// Every presentable query, in menu order
pub fn catalog() -> &'static [QueryDescriptor] {
    &CATALOG
}

/// Look up a query by its key
pub fn find(key: &str) -> Option<&'static QueryDescriptor> {
    CATALOG.iter().find(|d| d.key == key)
}

impl QueryId {
    pub fn descriptor(self) -> &'static QueryDescriptor {
        &CATALOG[self as usize]
    }

    /// Run the query. Queries taking a recipe title use "Zuppa Inglese".
    pub fn run(self, repo: &RecipeRepository) -> Result<QueryOutput<'_>, RecipeError> {
        let output = match self {
            QueryId::Recipes => QueryOutput::Recipes(repo.recipes().iter().collect()),
            QueryId::Ingredients => QueryOutput::Ingredients(repo.ingredients()),
            QueryId::Titles => QueryOutput::Titles(repo.titles()),
            QueryId::TotalEggs => QueryOutput::Quantity(repo.total_eggs()),
            QueryId::OliveOilRecipes => QueryOutput::Recipes(repo.olive_oil_recipes()),
            QueryId::EggsByRecipe => QueryOutput::Amounts(repo.eggs_by_recipe()),
            QueryId::Under500Calories => QueryOutput::Recipes(repo.under_500_calories()),
            QueryId::SugarQuantity => {
                QueryOutput::Quantity(repo.sugar_quantity(DEFAULT_RECIPE_TITLE)?)
            }
            QueryId::FirstTwoSteps => QueryOutput::Steps(repo.first_two_steps(DEFAULT_RECIPE_TITLE)?),
            QueryId::MoreThan5Steps => QueryOutput::Recipes(repo.more_than_5_steps()),
            QueryId::ButterFree => QueryOutput::Recipes(repo.butter_free()),
            QueryId::CommonIngredients => {
                QueryOutput::Recipes(repo.common_ingredients(DEFAULT_RECIPE_TITLE)?)
            }
            QueryId::MostCaloric => QueryOutput::Recipe(repo.most_caloric()),
            QueryId::MostCommonUnit => QueryOutput::Label(repo.most_common_unit()),
            QueryId::IngredientCountByRecipe => {
                QueryOutput::Counts(repo.ingredient_count_by_recipe())
            }
            QueryId::Fattest => QueryOutput::Recipe(repo.fattest()?),
            QueryId::MostCommonIngredient => QueryOutput::Label(repo.most_common_ingredient()),
            QueryId::SortedByIngredientCount => {
                QueryOutput::Recipes(repo.sorted_by_ingredient_count())
            }
            QueryId::RecipesByIngredient => QueryOutput::Groups(repo.recipes_by_ingredient()),
            QueryId::RecipesByStepCount => QueryOutput::Buckets(repo.recipes_by_step_count()),
            QueryId::Simplest => QueryOutput::Recipe(repo.simplest()),
        };
        Ok(output)
    }
}

impl fmt::Display for QueryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.descriptor().key)
    }
}

impl FromStr for QueryId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        find(s)
            .map(|d| d.id)
            .ok_or_else(|| format!("unknown query '{s}'"))
    }
}

/// The result of a catalog query, tagged by shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QueryOutput<'a> {
    Recipes(Vec<&'a Recipe>),
    Recipe(Option<&'a Recipe>),
    Ingredients(Vec<&'a Ingredient>),
    Steps(&'a [Step]),
    Titles(Vec<&'a str>),
    Quantity(f64),
    Label(Option<&'a str>),
    Amounts(OrderedMap<String, f64>),
    Counts(OrderedMap<String, usize>),
    Groups(OrderedMap<String, Vec<String>>),
    Buckets(OrderedMap<usize, usize>),
}

impl QueryOutput<'_> {
    /// Bars for `chart`: one `(label, height)` pair per recipe or mapping entry.
    ///
    /// Returns `None` when this result shape cannot be drawn with that measure.
    pub fn bar_series(&self, chart: &ChartSpec) -> Option<Vec<(String, f64)>> {
        match (self, chart.measure) {
            (QueryOutput::Recipes(recipes), measure) => recipes
                .iter()
                .map(|r| measure.of_recipe(r).map(|y| (r.title.clone(), y)))
                .collect(),
            (QueryOutput::Amounts(amounts), Measure::MappedValue) => {
                Some(amounts.iter().map(|(k, v)| (k.clone(), *v)).collect())
            }
            (QueryOutput::Counts(counts), Measure::MappedValue) => Some(
                counts
                    .iter()
                    .map(|(k, v)| (k.clone(), *v as f64))
                    .collect(),
            ),
            (QueryOutput::Buckets(buckets), Measure::MappedValue) => Some(
                buckets
                    .iter()
                    .map(|(k, v)| (k.to_string(), *v as f64))
                    .collect(),
            ),
            _ => None,
        }
    }
}
