use super::clean::{clean_html, clean_line, convert_duration};
use super::Extractor;
use crate::config::ImportConfig;
use crate::error::ImportError;
use crate::model::Recipe;
use log::debug;
use scraper::{Html, Selector};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::BTreeMap;

/// Reads schema.org `Recipe` objects from `application/ld+json` scripts
pub struct JsonLdExtractor {
    gather_step: String,
    max_denominator: u32,
}

impl Default for JsonLdExtractor {
    fn default() -> Self {
        Self::new(&ImportConfig::default())
    }
}

impl JsonLdExtractor {
    pub fn new(config: &ImportConfig) -> Self {
        Self {
            gather_step: config.gather_step.clone(),
            max_denominator: config.max_denominator,
        }
    }

    fn line(&self, text: &str) -> String {
        clean_line(text, self.max_denominator)
    }

    /// Renders the JSON-LD object as recipe text.
    fn to_recipe_text(
        &self,
        recipe: JsonLdRecipe,
        source: Option<String>,
    ) -> Result<String, ImportError> {
        let mut metadata = BTreeMap::new();

        if let Some(prep) = recipe.prep_time.as_deref().and_then(convert_duration) {
            metadata.insert("prep_time", self.line(&prep));
        }
        if let Some(cook) = recipe.cook_time.as_deref().and_then(convert_duration) {
            metadata.insert("cook_time", self.line(&cook));
        }
        if let Some(yields) = recipe.recipe_yield.and_then(OneOrMany::first) {
            metadata.insert("yields", self.line(&yields.to_string()));
        }
        if let Some(cuisine) = recipe.recipe_cuisine.and_then(OneOrMany::first) {
            metadata.insert("cuisine", self.line(&cuisine));
        }
        if let Some(category) = recipe.recipe_category.and_then(OneOrMany::first) {
            metadata.insert("category", self.line(&category));
        }
        if let Some(source) = source {
            metadata.insert("source", self.line(&source));
        }
        metadata.retain(|_, value| !value.is_empty());

        let title = recipe
            .name
            .map(|name| self.line(&name))
            .filter(|name| !name.is_empty())
            .ok_or(ImportError::MissingName)?;

        let mut lines = Vec::new();
        if !metadata.is_empty() {
            lines.push("---".to_string());
            lines.extend(metadata.iter().map(|(key, value)| format!("{key}: {value}")));
            lines.push("---".to_string());
            lines.push(String::new());
        }

        lines.push(format!("= {title}"));
        lines.push(String::new());

        if let Some(description) = recipe.description {
            let description = clean_html(description.text(), self.max_denominator);
            let notes: Vec<&str> = description
                .split('\n')
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .collect();
            if !notes.is_empty() {
                lines.extend(notes.iter().map(|line| format!("> {line}")));
                lines.push(String::new());
            }
        }

        let ingredients: Vec<String> = recipe
            .recipe_ingredient
            .map(OneOrMany::into_vec)
            .unwrap_or_default()
            .iter()
            .map(|ingredient| self.line(ingredient))
            .filter(|ingredient| !ingredient.is_empty())
            .collect();
        if !ingredients.is_empty() {
            lines.push(format!("# {}", self.gather_step));
            lines.extend(ingredients.iter().map(|ingredient| format!("- {ingredient}")));
            lines.push(String::new());
        }

        let instructions = recipe
            .recipe_instructions
            .map(OneOrMany::into_vec)
            .unwrap_or_default();
        for instruction in &instructions {
            self.push_instruction(&mut lines, instruction);
        }

        Ok(lines.join("\n"))
    }

    fn push_instruction(&self, lines: &mut Vec<String>, instruction: &Instruction) {
        match instruction {
            Instruction::Text(text) => self.push_step(lines, text),
            Instruction::Nested(instructions) => {
                for instruction in instructions {
                    self.push_instruction(lines, instruction);
                }
            }
            Instruction::Item(item) if item.is_a("HowToSection") => {
                if let Some(name) = item.name.as_deref().map(|name| self.line(name)) {
                    if !name.is_empty() {
                        lines.push(format!("+ {name}"));
                    }
                }
                for step in item.item_list_element.iter().flatten() {
                    self.push_instruction(lines, step);
                }
                lines.push(String::new());
            }
            Instruction::Item(item) if item.kind.is_none() || item.is_a("HowToStep") => {
                if let Some(text) = item.step_text() {
                    self.push_step(lines, text);
                }
            }
            Instruction::Item(item) => {
                debug!("Skipping instruction of type {:?}", item.kind);
            }
        }
    }

    fn push_step(&self, lines: &mut Vec<String>, text: &str) {
        let text = self.line(text);
        if !text.is_empty() {
            lines.push(format!("# {text}"));
            lines.push(String::new());
        }
    }
}

impl Extractor for JsonLdExtractor {
    fn can_parse(&self, document: &Html) -> bool {
        find_recipe_json(document).is_some()
    }

    fn parse(&self, document: &Html) -> Result<Recipe, ImportError> {
        let json = find_recipe_json(document).ok_or(ImportError::NoRecipeFound)?;
        debug!("Found recipe JSON-LD: {:#?}", json);

        let recipe: JsonLdRecipe =
            serde_json::from_value(json).map_err(|_| ImportError::MissingName)?;
        let text = self.to_recipe_text(recipe, canonical_url(document))?;
        debug!("Generated recipe text:\n{}", text);

        Ok(crate::parser::parse(&text)?)
    }
}

/// First recipe object found in the page's JSON-LD scripts
fn find_recipe_json(document: &Html) -> Option<Value> {
    let Ok(selector) = Selector::parse("script[type='application/ld+json']") else {
        return None;
    };

    document.select(&selector).find_map(|script| {
        let content = script.inner_html();
        if content.trim().is_empty() {
            return None;
        }
        let json = serde_json::from_str::<Value>(&content)
            .or_else(|_| serde_json::from_str::<Value>(&sanitize_json(&content)))
            .ok()?;

        let candidates = match json {
            Value::Array(items) => items,
            other => vec![other],
        };
        candidates.into_iter().find_map(|item| {
            if is_recipe(&item) {
                return Some(item);
            }
            match item.get("@graph") {
                Some(Value::Array(graph)) => graph.iter().find(|node| is_recipe(node)).cloned(),
                _ => None,
            }
        })
    })
}

fn is_recipe(item: &Value) -> bool {
    match item.get("@type") {
        Some(Value::String(kind)) => kind.contains("Recipe"),
        Some(Value::Array(kinds)) => kinds.iter().any(|kind| kind == "Recipe"),
        _ => false,
    }
}

fn canonical_url(document: &Html) -> Option<String> {
    let candidates = [
        ("link[rel='canonical']", "href"),
        ("meta[property='og:url']", "content"),
    ];
    candidates.iter().find_map(|(selector, attribute)| {
        let selector = Selector::parse(selector).ok()?;
        document
            .select(&selector)
            .find_map(|element| element.value().attr(attribute))
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(str::to_string)
    })
}

/// Fixes the usual hand-written JSON mistakes found on recipe sites
fn sanitize_json(json_str: &str) -> String {
    let mut cleaned = json_str.trim().to_string();

    // Skip anything before the first object
    if !cleaned.starts_with('{') && !cleaned.starts_with('[') {
        if let Some(start) = cleaned.find('{') {
            cleaned = cleaned[start..].to_string();
        }
    }

    cleaned = cleaned.replace(",]", "]").replace(",}", "}");
    cleaned.replace("<!--", "").replace("-->", "")
}

/// Deserializes to `None` instead of failing when a field has an odd shape
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

#[derive(Debug, Deserialize)]
struct JsonLdRecipe {
    #[serde(default, deserialize_with = "lenient")]
    name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    description: Option<DescriptionType>,
    #[serde(rename = "recipeIngredient", default, deserialize_with = "lenient")]
    recipe_ingredient: Option<OneOrMany<String>>,
    #[serde(rename = "recipeInstructions", default, deserialize_with = "lenient")]
    recipe_instructions: Option<OneOrMany<Instruction>>,
    #[serde(rename = "recipeYield", default, deserialize_with = "lenient")]
    recipe_yield: Option<OneOrMany<Scalar>>,
    #[serde(rename = "prepTime", default, deserialize_with = "lenient")]
    prep_time: Option<String>,
    #[serde(rename = "cookTime", default, deserialize_with = "lenient")]
    cook_time: Option<String>,
    #[serde(rename = "recipeCategory", default, deserialize_with = "lenient")]
    recipe_category: Option<OneOrMany<String>>,
    #[serde(rename = "recipeCuisine", default, deserialize_with = "lenient")]
    recipe_cuisine: Option<OneOrMany<String>>,
}

// Many is tried first: serde will happily build a struct from an array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    fn first(self) -> Option<T> {
        self.into_vec().into_iter().next()
    }

    fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(item) => vec![item],
            OneOrMany::Many(items) => items,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Number(serde_json::Number),
}

impl std::fmt::Display for Scalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scalar::Text(text) => f.write_str(text),
            Scalar::Number(number) => write!(f, "{number}"),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TextObject {
    text: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DescriptionType {
    String(String),
    Object(TextObject),
}

impl DescriptionType {
    fn text(&self) -> &str {
        match self {
            DescriptionType::String(text) => text,
            DescriptionType::Object(object) => &object.text,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Instruction {
    Text(String),
    Nested(Vec<Instruction>),
    Item(InstructionItem),
}

/// A `HowToStep` or `HowToSection`
#[derive(Debug, Deserialize)]
struct InstructionItem {
    #[serde(rename = "@type", default, deserialize_with = "lenient")]
    kind: Option<OneOrMany<String>>,
    #[serde(default, deserialize_with = "lenient")]
    text: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    name: Option<String>,
    #[serde(rename = "itemListElement", default, deserialize_with = "lenient")]
    item_list_element: Option<Vec<Instruction>>,
}

impl InstructionItem {
    fn is_a(&self, kind: &str) -> bool {
        match &self.kind {
            Some(OneOrMany::One(k)) => k == kind,
            Some(OneOrMany::Many(kinds)) => kinds.iter().any(|k| k == kind),
            None => false,
        }
    }

    // Prefer text over name
    fn step_text(&self) -> Option<&str> {
        self.text
            .as_deref()
            .filter(|text| !text.trim().is_empty())
            .or(self.name.as_deref())
    }
}
