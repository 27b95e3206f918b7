//! # Recipe Box
//!
//! Reads and writes the Recipe Box plain-text recipe format:
//!
//! ```text
//! ---
//! category: Dessert
//! ---
//!
//! = Cake
//!
//! > Best on day two
//!
//! + Batter
//!
//! # Cream the butter and sugar
//!
//! - 200g butter
//! - 200g sugar
//!
//! # Bake
//! ```
//!
//! [`parse`] turns text into a [`Recipe`] and [`serialize`] turns a recipe
//! back into canonical text. Both are pure functions. Everything else in the
//! crate (the web page importer, the folder catalog, the CLI) is built on
//! those two calls.

pub mod catalog;
pub mod config;
pub mod error;
pub mod extractors;
pub mod model;
pub mod parser;
pub mod serializer;

use log::debug;
use scraper::Html;

pub use catalog::{Catalog, CategoryGroup};
pub use config::{ImportConfig, LibraryConfig, Settings};
pub use error::{CatalogError, ImportError, ParseError};
pub use extractors::{Extractor, JsonLdExtractor};
pub use model::{Component, Recipe, Step, DEFAULT_CATEGORY};
pub use parser::parse;
pub use serializer::serialize;

/// Imports the schema.org recipe embedded in an HTML page, using default
/// import settings.
pub fn recipe_from_html(html: &str) -> Result<Recipe, ImportError> {
    recipe_from_html_with_config(html, &ImportConfig::default())
}

/// Imports the schema.org recipe embedded in an HTML page.
pub fn recipe_from_html_with_config(
    html: &str,
    config: &ImportConfig,
) -> Result<Recipe, ImportError> {
    let document = Html::parse_document(html);
    let extractor = JsonLdExtractor::new(config);
    if !extractor.can_parse(&document) {
        debug!("No JSON-LD recipe found in page");
        return Err(ImportError::NoRecipeFound);
    }
    extractor.parse(&document)
}
