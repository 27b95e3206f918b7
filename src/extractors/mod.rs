use crate::error::ImportError;
use crate::model::Recipe;
use scraper::Html;

pub mod clean;
mod json_ld;

pub use self::json_ld::JsonLdExtractor;

/// Turns a fetched web page into a recipe
pub trait Extractor {
    fn can_parse(&self, document: &Html) -> bool;
    fn parse(&self, document: &Html) -> Result<Recipe, ImportError>;
}
