use recipe_box::{parse, ParseError, Step};

#[test]
fn test_implicit_component_with_two_steps() {
    let recipe =
        parse("= My Recipe\n# First step\n- Ingredient A\n- Ingredient B\n# Second step\n").unwrap();

    assert_eq!(recipe.title, "My Recipe");
    assert_eq!(recipe.id, None);
    assert_eq!(recipe.components.len(), 1);

    let component = &recipe.components[0];
    assert_eq!(component.name, None);
    assert_eq!(
        component.steps,
        vec![
            Step::with_ingredients("First step", ["Ingredient A", "Ingredient B"]),
            Step::new("Second step"),
        ]
    );
}

#[test]
fn test_orphan_ingredient() {
    assert_eq!(
        parse("- orphan\n# step\n").unwrap_err(),
        ParseError::OrphanIngredient { line: 1 }
    );
}

#[test]
fn test_empty_input() {
    assert_eq!(parse("").unwrap_err(), ParseError::EmptyInput);
    assert_eq!(parse("   \n").unwrap_err(), ParseError::EmptyInput);
    assert_eq!(parse("\n\t\n  ").unwrap_err(), ParseError::EmptyInput);
}

#[test]
fn test_note_only_is_missing_title() {
    assert_eq!(parse("> note only\n").unwrap_err(), ParseError::MissingTitle);
}

#[test]
fn test_title_without_steps_is_empty_recipe() {
    assert_eq!(
        parse("= Lonely\n+ Nothing here\n> note\n").unwrap_err(),
        ParseError::EmptyRecipe
    );
}

#[test]
fn test_last_title_wins() {
    let recipe = parse("=A\n#s\n=B\n").unwrap();
    assert_eq!(recipe.title, "B");
    assert_eq!(recipe.components[0].steps[0].text, "s");
}

#[test]
fn test_unknown_lines_are_ignored() {
    let recipe = parse(
        "Some intro prose\n= Salad\n* not a bullet we know\n# Toss\n1. numbered\n- leaves\n",
    )
    .unwrap();
    assert_eq!(recipe.title, "Salad");
    assert_eq!(recipe.components[0].steps[0].ingredients(), ["leaves"]);
}

#[test]
fn test_indented_and_unspaced_prefixes() {
    let recipe = parse("   =Salad\n\t#Toss\n    -   leaves   \n").unwrap();
    assert_eq!(recipe.title, "Salad");
    let step = &recipe.components[0].steps[0];
    assert_eq!(step.text, "Toss");
    assert_eq!(step.ingredients(), ["leaves"]);
}

#[test]
fn test_named_components() {
    let text = "\
= Pie

# Preheat the oven

+ Crust

# Rub in the butter
- 200g flour
- 100g butter

+ Filling
# Slice the apples
- 4 apples
";
    let recipe = parse(text).unwrap();
    let names: Vec<_> = recipe
        .components
        .iter()
        .map(|c| c.name.as_deref())
        .collect();
    assert_eq!(names, [None, Some("Crust"), Some("Filling")]);
    assert_eq!(recipe.step_count(), 3);
    assert_eq!(
        recipe.components[1].steps[0].ingredients(),
        ["200g flour", "100g butter"]
    );
}

#[test]
fn test_metadata_and_notes() {
    let text = "\
---
category: Dessert
prep_time: 20
source: Family cookbook
---

= Cake

> Best on day two.
> Keeps for a week.

# Bake
";
    let recipe = parse(text).unwrap();
    assert_eq!(recipe.category(), "Dessert");
    assert_eq!(recipe.prep_time(), Some(20));
    assert_eq!(recipe.source(), Some("Family cookbook"));
    assert_eq!(recipe.notes(), Some("Best on day two.\nKeeps for a week."));
}

#[test]
fn test_metadata_value_keeps_later_colons() {
    let recipe = parse("---\nsource: https://example.com/cake\n---\n= Cake\n# Bake\n").unwrap();
    assert_eq!(recipe.source(), Some("https://example.com/cake"));
}

#[test]
fn test_unclosed_metadata_block_is_body_text() {
    // Without a closing delimiter the header lines are ordinary body lines.
    let recipe = parse("--- \ncategory: Dessert\n= Cake\n# Bake\n");
    assert_eq!(recipe.unwrap_err(), ParseError::OrphanIngredient { line: 1 });
}

#[test]
fn test_metadata_block_must_come_first() {
    let recipe = parse("= Cake\n# Bake\n---\ncategory: Dessert\n---\n");
    // The `---` lines are ingredients of "Bake", `category:` is ignored.
    let recipe = recipe.unwrap();
    assert!(recipe.metadata.is_empty());
    assert_eq!(recipe.components[0].steps[0].ingredients(), ["--", "--"]);
}

#[test]
fn test_from_str() {
    let recipe: recipe_box::Recipe = "= Tea\n# Steep\n".parse().unwrap();
    assert_eq!(recipe.title, "Tea");
}

#[test]
fn test_error_messages() {
    assert_eq!(ParseError::EmptyInput.to_string(), "Cannot parse an empty recipe.");
    assert_eq!(ParseError::MissingTitle.to_string(), "No recipe title.");
    assert_eq!(
        ParseError::OrphanIngredient { line: 3 }.to_string(),
        "Ingredients must belong to a step (line 3)."
    );
}
