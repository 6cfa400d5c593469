use recipebook::{load_recipes, Namespaces, RecipeError, RecipeRepository};
use std::io::Write;
use std::path::PathBuf;

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/recipes.xml")
}

fn write_document(xml: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(xml.as_bytes()).unwrap();
    file
}

#[test]
fn test_loads_every_recipe_in_document_order() {
    let recipes = load_recipes(fixture(), &Namespaces::default()).unwrap();

    let ids: Vec<_> = recipes.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["r101", "r102", "r103", "r104", "r105"]);
    assert_eq!(recipes[0].date, "Fri, 28 Jul 2006");
}

#[test]
fn test_amounts_are_never_negative_and_placeholders_are_zero() {
    let recipes = load_recipes(fixture(), &Namespaces::default()).unwrap();

    for ingredient in recipes.iter().flat_map(|r| &r.ingredients) {
        assert!(ingredient.amount >= 0.0, "{} has a negative amount", ingredient.name);
    }

    let linguine = &recipes[2];
    let parsley = linguine
        .ingredients
        .iter()
        .find(|i| i.name == "flat-leaf parsley")
        .unwrap();
    assert_eq!(parsley.amount, 0.0);
    assert_eq!(parsley.unit, "");

    // composite ingredients carry no amount attribute
    let filling = &recipes[1].ingredients[0];
    assert_eq!(filling.name, "filling");
    assert_eq!(filling.amount, 0.0);
}

#[test]
fn test_optional_fields_default_to_empty_text() {
    let recipes = load_recipes(fixture(), &Namespaces::default()).unwrap();

    let beef = &recipes[0];
    assert_eq!(beef.related.reference, "r102");
    assert_eq!(beef.related.description, "Ricotta Pie for dessert");

    let pie = &recipes[1];
    assert_eq!(pie.comment, "");
    assert_eq!(pie.related.reference, "");
    assert_eq!(pie.related.description, "");

    // related element without text
    let zuppa = &recipes[3];
    assert_eq!(zuppa.related.reference, "r102");
    assert_eq!(zuppa.related.description, "");

    assert_eq!(recipes[2].comment, "Use fresh clams & good oil.");
}

#[test]
fn test_nutrition_keeps_percent_signs() {
    let recipes = load_recipes(fixture(), &Namespaces::default()).unwrap();
    let nutrition = &recipes[0].nutrition;

    assert_eq!(nutrition.calories, 1167);
    assert_eq!(nutrition.fat, "23%");
    assert_eq!(nutrition.carbohydrates, "45%");
    assert_eq!(nutrition.protein, "32%");
}

#[test]
fn test_nested_steps_come_first_in_document_order() {
    let recipes = load_recipes(fixture(), &Namespaces::default()).unwrap();
    let steps: Vec<_> = recipes[1]
        .preparation
        .steps
        .iter()
        .map(|s| s.description.as_str())
        .collect();

    assert_eq!(steps.len(), 4);
    assert_eq!(steps[0], "Beat the eggs, then mix with the ricotta and sugar.");
    assert_eq!(steps[3], "Bake for one hour.");
}

#[test]
fn test_document_prefix_does_not_matter() {
    let file = write_document(
        r#"<book xmlns:r="http://www.brics.dk/ixwt/recipes">
             <r:recipe id="x1">
               <r:title>Toast</r:title>
               <r:date>today</r:date>
               <r:nutrition calories="90" fat="1%" carbohydrates="90%" protein="9%"/>
             </r:recipe>
           </book>"#,
    );
    let repo = RecipeRepository::open(file.path()).unwrap();
    assert_eq!(repo.titles(), vec!["Toast"]);
    assert!(repo.recipes()[0].ingredients.is_empty());
}

#[test]
fn test_missing_nutrition_fails_fast() {
    let file = write_document(
        r#"<rcp:collection xmlns:rcp="http://www.brics.dk/ixwt/recipes">
             <rcp:recipe id="x1">
               <rcp:title>Toast</rcp:title>
               <rcp:date>today</rcp:date>
             </rcp:recipe>
           </rcp:collection>"#,
    );
    let result = RecipeRepository::open(file.path());
    assert!(matches!(
        result,
        Err(RecipeError::MissingElement {
            element: "nutrition",
            ..
        })
    ));
}

#[test]
fn test_missing_fat_attribute_fails_fast() {
    let file = write_document(
        r#"<rcp:collection xmlns:rcp="http://www.brics.dk/ixwt/recipes">
             <rcp:recipe id="x1">
               <rcp:title>Toast</rcp:title>
               <rcp:date>today</rcp:date>
               <rcp:nutrition calories="90" carbohydrates="90%" protein="9%"/>
             </rcp:recipe>
           </rcp:collection>"#,
    );
    let result = RecipeRepository::open(file.path());
    assert!(matches!(
        result,
        Err(RecipeError::MissingAttribute {
            attribute: "fat",
            ..
        })
    ));
}

#[test]
fn test_non_numeric_amount_fails_fast() {
    let file = write_document(
        r#"<rcp:collection xmlns:rcp="http://www.brics.dk/ixwt/recipes">
             <rcp:recipe id="x1">
               <rcp:title>Toast</rcp:title>
               <rcp:date>today</rcp:date>
               <rcp:ingredient name="bread" amount="two"/>
               <rcp:nutrition calories="90" fat="1%" carbohydrates="90%" protein="9%"/>
             </rcp:recipe>
           </rcp:collection>"#,
    );
    let result = RecipeRepository::open(file.path());
    assert!(matches!(
        result,
        Err(RecipeError::InvalidNumber {
            field: "amount",
            ..
        })
    ));
}

#[test]
fn test_missing_file_is_an_io_error() {
    let result = RecipeRepository::open("does/not/exist.xml");
    assert!(matches!(result, Err(RecipeError::Io { .. })));
}

#[test]
fn test_custom_namespace_mapping() {
    let file = write_document(
        r#"<c xmlns="urn:example:cookbook">
             <recipe id="x1">
               <title>Toast</title>
               <date>today</date>
               <nutrition calories="90" fat="1%" carbohydrates="90%" protein="9%"/>
             </recipe>
           </c>"#,
    );

    let default = RecipeRepository::open(file.path()).unwrap();
    assert!(default.recipes().is_empty());

    let namespaces = Namespaces::default().with("rcp", "urn:example:cookbook");
    let custom = RecipeRepository::open_with_namespaces(file.path(), &namespaces).unwrap();
    assert_eq!(custom.titles(), vec!["Toast"]);
}
