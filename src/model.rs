use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Category reported for recipes whose metadata does not name one
pub const DEFAULT_CATEGORY: &str = "Uncategorized";

/// One instruction line, optionally followed by the ingredients it consumes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub text: String,
    /// `None` and an empty list both mean "no ingredients"; the parser only
    /// ever produces `None` for that case.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Vec<String>>,
}

impl Step {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ingredients: None,
        }
    }

    pub fn with_ingredients<I, S>(text: impl Into<String>, ingredients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let ingredients: Vec<String> = ingredients.into_iter().map(Into::into).collect();
        Self {
            text: text.into(),
            ingredients: if ingredients.is_empty() {
                None
            } else {
                Some(ingredients)
            },
        }
    }

    /// Ingredients as a slice, empty when the step has none
    pub fn ingredients(&self) -> &[String] {
        self.ingredients.as_deref().unwrap_or_default()
    }
}

/// A named or implicit group of steps, e.g. "Dough" or "Filling"
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Component {
    pub fn new(name: Option<String>, steps: Vec<Step>) -> Self {
        Self { name, steps }
    }
}

/// A parsed recipe
///
/// Values are never edited in place: changing a recipe means parsing new
/// text into a new value. `id` is assigned by whoever stores the recipe and
/// is not part of the text format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub title: String,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
    pub components: Vec<Component>,
}

impl Recipe {
    /// Parse recipe text, see [`crate::parse`]
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        crate::parser::parse(text)
    }

    /// Canonical text, see [`crate::serialize`]
    pub fn serialize(&self) -> String {
        crate::serializer::serialize(self)
    }

    /// Same as [`Recipe::serialize`]; the text a collaborator would store
    pub fn content(&self) -> String {
        self.serialize()
    }

    /// Returns a copy of this recipe carrying the given storage identifier
    pub fn with_id(self, id: i64) -> Self {
        Self {
            id: Some(id),
            ..self
        }
    }

    fn meta(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }

    pub fn draft(&self) -> Option<&str> {
        self.meta("draft")
    }

    pub fn favorite(&self) -> Option<&str> {
        self.meta("favorite")
    }

    pub fn notes(&self) -> Option<&str> {
        self.meta("notes")
    }

    /// Preparation time, only when the stored value is a plain number
    pub fn prep_time(&self) -> Option<u32> {
        self.meta("prep_time").and_then(parse_digits)
    }

    /// Cooking time, only when the stored value is a plain number
    pub fn cook_time(&self) -> Option<u32> {
        self.meta("cook_time").and_then(parse_digits)
    }

    pub fn yields(&self) -> Option<&str> {
        self.meta("yields")
    }

    pub fn category(&self) -> &str {
        self.meta("category").unwrap_or(DEFAULT_CATEGORY)
    }

    pub fn cuisine(&self) -> Option<&str> {
        self.meta("cuisine")
    }

    pub fn source(&self) -> Option<&str> {
        self.meta("source")
    }

    /// Total number of steps across all components
    pub fn step_count(&self) -> usize {
        self.components.iter().map(|c| c.steps.len()).sum()
    }
}

fn parse_digits(value: &str) -> Option<u32> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}

impl FromStr for Recipe {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize())
    }
}
