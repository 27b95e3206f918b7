//! [`Recipe`] to canonical text.

use crate::model::{Component, Recipe, DEFAULT_CATEGORY};

/// Renders a recipe in canonical form.
///
/// The output does not depend on how the text that produced `recipe` was
/// laid out, and `serialize(&parse(&serialize(r))?) == serialize(r)` holds
/// for every valid recipe.
pub fn serialize(recipe: &Recipe) -> String {
    let mut lines: Vec<String> = Vec::new();

    let mut metadata = recipe.metadata.clone();
    let notes = metadata.remove("notes");

    // A lone default category is not worth a header.
    if metadata.len() == 1
        && metadata.get("category").map(String::as_str) == Some(DEFAULT_CATEGORY)
    {
        metadata.clear();
    }

    if !metadata.is_empty() {
        let width = metadata.keys().map(|key| key.chars().count()).max().unwrap_or(0);
        lines.push("---".to_string());
        for (key, value) in &metadata {
            let padding = " ".repeat(width - key.chars().count());
            lines.push(format!("{key}:{padding} {value}"));
        }
        lines.push("---".to_string());
        lines.push(String::new());
    }

    lines.push(format!("= {}", recipe.title));

    if let Some(notes) = notes.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
        lines.push(String::new());
        lines.extend(notes.split('\n').map(|line| format!("> {}", line.trim())));
    }

    for component in &recipe.components {
        push_component(&mut lines, component);
    }

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

fn push_component(lines: &mut Vec<String>, component: &Component) {
    if lines.last().is_some_and(|line| !line.is_empty()) {
        lines.push(String::new());
    }

    let name = component.name.as_deref().filter(|name| !name.is_empty());
    if let Some(name) = name {
        lines.push(format!("+ {name}"));
    }

    if component.steps.is_empty() {
        return;
    }
    if name.is_some() {
        lines.push(String::new());
    }

    let last = component.steps.len() - 1;
    for (index, step) in component.steps.iter().enumerate() {
        lines.push(format!("# {}", step.text));

        let ingredients = step.ingredients();
        if !ingredients.is_empty() {
            lines.push(String::new());
            lines.extend(ingredients.iter().map(|ingredient| format!("- {ingredient}")));
        }

        if index < last {
            lines.push(String::new());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Step;
    use std::collections::BTreeMap;

    fn recipe(metadata: &[(&str, &str)], components: Vec<Component>) -> Recipe {
        Recipe {
            id: None,
            title: "Flatbread".to_string(),
            metadata: metadata
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<BTreeMap<_, _>>(),
            components,
        }
    }

    #[test]
    fn test_minimal() {
        let r = recipe(&[], vec![Component::new(None, vec![Step::new("Knead")])]);
        assert_eq!(serialize(&r), "= Flatbread\n\n# Knead\n");
    }

    #[test]
    fn test_metadata_values_align() {
        let r = recipe(
            &[("yields", "4"), ("cuisine", "Levantine"), ("category", "Bread")],
            vec![Component::new(None, vec![Step::new("Knead")])],
        );
        assert_eq!(
            serialize(&r),
            "---\ncategory: Bread\ncuisine:  Levantine\nyields:   4\n---\n\n= Flatbread\n\n# Knead\n"
        );
    }

    #[test]
    fn test_alignment_counts_characters() {
        let r = recipe(
            &[("größe", "2"), ("cuisine", "Thai")],
            vec![Component::new(None, vec![Step::new("Knead")])],
        );
        assert_eq!(
            serialize(&r),
            "---\ncuisine: Thai\ngröße:   2\n---\n\n= Flatbread\n\n# Knead\n"
        );
    }

    #[test]
    fn test_lone_default_category_is_dropped() {
        let r = recipe(
            &[("category", "Uncategorized"), ("notes", "Best warm")],
            vec![Component::new(None, vec![Step::new("Knead")])],
        );
        assert_eq!(serialize(&r), "= Flatbread\n\n> Best warm\n\n# Knead\n");
    }

    #[test]
    fn test_default_category_kept_alongside_other_keys() {
        let r = recipe(
            &[("category", "Uncategorized"), ("draft", "yes")],
            vec![Component::new(None, vec![Step::new("Knead")])],
        );
        assert!(serialize(&r).starts_with("---\ncategory: Uncategorized\ndraft:    yes\n---\n"));
    }

    #[test]
    fn test_notes_lines_are_trimmed() {
        let r = recipe(
            &[("notes", "  first \n second")],
            vec![Component::new(None, vec![Step::new("Knead")])],
        );
        assert_eq!(serialize(&r), "= Flatbread\n\n> first\n> second\n\n# Knead\n");
    }

    #[test]
    fn test_named_components_and_ingredients() {
        let r = recipe(
            &[],
            vec![
                Component::new(
                    Some("Dough".to_string()),
                    vec![
                        Step::with_ingredients("Mix", ["flour", "water"]),
                        Step::new("Rest"),
                    ],
                ),
                Component::new(
                    Some("Topping".to_string()),
                    vec![Step::with_ingredients("Spread", ["za'atar"])],
                ),
            ],
        );
        let expected = "\
= Flatbread

+ Dough

# Mix

- flour
- water

# Rest

+ Topping

# Spread

- za'atar
";
        assert_eq!(serialize(&r), expected);
    }

    #[test]
    fn test_empty_ingredient_list_is_omitted() {
        let step = Step {
            text: "Knead".to_string(),
            ingredients: Some(Vec::new()),
        };
        let r = recipe(&[], vec![Component::new(None, vec![step])]);
        assert_eq!(serialize(&r), "= Flatbread\n\n# Knead\n");
    }
}
