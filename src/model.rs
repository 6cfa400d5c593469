use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ingredient {
    pub name: String,
    /// Zero when the document gives no amount or the `*` placeholder.
    pub amount: f64,
    /// Empty when the document gives no unit.
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Step {
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Preparation {
    pub steps: Vec<Step>,
}

/// Nutrition facts. The macro-nutrients are kept verbatim, percent sign included.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Nutrition {
    pub calories: i64,
    pub fat: String,
    pub carbohydrates: String,
    pub protein: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Related {
    #[serde(rename = "ref")]
    pub reference: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recipe {
    pub id: String,
    pub title: String,
    pub date: String,
    pub ingredients: Vec<Ingredient>,
    pub preparation: Preparation,
    pub comment: String,
    pub nutrition: Nutrition,
    pub related: Related,
}
