use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while parsing recipe text
///
/// Every variant is fatal to the single `parse` call; no partial recipe is
/// ever returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Input is empty or whitespace only
    #[error("Cannot parse an empty recipe.")]
    EmptyInput,

    /// An ingredient line appeared before any step was opened
    #[error("Ingredients must belong to a step (line {line}).")]
    OrphanIngredient { line: usize },

    /// No `=` title line, or the last one was empty
    #[error("No recipe title.")]
    MissingTitle,

    /// Every component was discarded for having no steps
    #[error("Recipe content is missing or invalid.")]
    EmptyRecipe,
}

/// Errors that can occur while importing a recipe from a web page
#[derive(Error, Debug)]
pub enum ImportError {
    /// No JSON-LD block on the page describes a recipe
    #[error("Could not find recipe JSON-LD in the page")]
    NoRecipeFound,

    /// The recipe JSON-LD has no usable `name`
    #[error("Recipe JSON-LD has no 'name' field")]
    MissingName,

    /// The generated recipe text was rejected by the parser
    #[error("Failed to parse the generated recipe text: {0}")]
    InvalidRecipe(#[from] ParseError),
}

/// Errors that can occur while loading a recipe folder
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The folder itself could not be listed
    #[error("Failed to read recipe folder {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
