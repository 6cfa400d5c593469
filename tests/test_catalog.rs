use recipebook::chart::render_bar_chart;
use recipebook::{catalog, QueryId, QueryOutput, RecipeError, RecipeRepository};
use std::path::PathBuf;

fn repository() -> RecipeRepository {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/recipes.xml");
    RecipeRepository::open(path).unwrap()
}

#[test]
fn test_every_query_runs_on_fixture() {
    let repo = repository();
    for descriptor in catalog() {
        let output = descriptor.id.run(&repo);
        assert!(output.is_ok(), "{} failed: {:?}", descriptor.key, output.err());
    }
}

#[test]
fn test_every_chart_directive_yields_a_series() {
    let repo = repository();
    for descriptor in catalog() {
        let Some(chart) = descriptor.chart else {
            continue;
        };
        let output = descriptor.id.run(&repo).unwrap();
        let series = output.bar_series(&chart);
        assert!(series.is_some(), "{} has no series", descriptor.key);
    }
}

#[test]
fn test_parameterised_queries_use_default_title() {
    let repo = repository();

    assert_eq!(QueryId::SugarQuantity.run(&repo).unwrap(), QueryOutput::Quantity(4.0));
    match QueryId::FirstTwoSteps.run(&repo).unwrap() {
        QueryOutput::Steps(steps) => assert_eq!(steps[0].description, "Warm the milk in a saucepan."),
        other => panic!("Expected steps, got {other:?}"),
    }
}

#[test]
fn test_named_query_without_default_recipe_fails() {
    let repo = RecipeRepository::from_recipes(Vec::new());
    assert!(matches!(
        QueryId::CommonIngredients.run(&repo),
        Err(RecipeError::NotFound(_))
    ));
}

#[test]
fn test_eggs_chart_uses_mapping_values() {
    let repo = repository();
    let chart = QueryId::EggsByRecipe.descriptor().chart.unwrap();
    let series = QueryId::EggsByRecipe
        .run(&repo)
        .unwrap()
        .bar_series(&chart)
        .unwrap();

    assert_eq!(series.len(), 5);
    assert_eq!(series[1], ("Ricotta Pie".to_string(), 16.0));

    let rendered = render_bar_chart(&chart, &series, 16);
    assert!(rendered.starts_with("eggs per recipe\n"));
    assert!(rendered.contains("################ 16"));
}

#[test]
fn test_steps_chart_reads_step_count() {
    let repo = repository();
    let chart = QueryId::MoreThan5Steps.descriptor().chart.unwrap();
    let series = QueryId::MoreThan5Steps
        .run(&repo)
        .unwrap()
        .bar_series(&chart)
        .unwrap();

    assert_eq!(
        series,
        vec![("Beef Parmesan with Garlic Angel Hair Pasta".to_string(), 6.0)]
    );
}

#[test]
fn test_output_serializes_to_json() {
    let repo = repository();

    let most_caloric = serde_json::to_value(QueryId::MostCaloric.run(&repo).unwrap()).unwrap();
    assert_eq!(most_caloric["id"], "r101");
    assert_eq!(most_caloric["related"]["ref"], "r102");
    assert_eq!(most_caloric["nutrition"]["calories"], 1167);

    let buckets = serde_json::to_value(QueryId::RecipesByStepCount.run(&repo).unwrap()).unwrap();
    assert_eq!(buckets, serde_json::json!({"6": 1, "4": 1, "3": 1}));

    let unit = serde_json::to_value(QueryId::MostCommonUnit.run(&repo).unwrap()).unwrap();
    assert_eq!(unit, "cup");
}
