//! Read-only view over a folder of recipe files.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use log::{debug, warn};

use crate::error::CatalogError;
use crate::model::Recipe;

/// One category and its recipes, in display order
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryGroup<'a> {
    pub category: &'a str,
    pub recipes: Vec<&'a Recipe>,
}

/// Recipes loaded from a folder, each with an id assigned on load
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    recipes: Vec<Recipe>,
}

impl Catalog {
    pub fn new(recipes: Vec<Recipe>) -> Self {
        Self { recipes }
    }

    /// Loads every `*.<extension>` file in `dir`.
    ///
    /// Files are read in name order and numbered from 1. Files that cannot be
    /// read or parsed are logged and skipped.
    pub fn load(dir: &Path, extension: &str) -> Result<Self, CatalogError> {
        let entries = fs::read_dir(dir).map_err(|source| CatalogError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut paths: Vec<_> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .filter(|path| path.extension().is_some_and(|ext| ext == extension))
            .collect();
        paths.sort();

        let mut recipes = Vec::new();
        for path in paths {
            let content = match fs::read_to_string(&path) {
                Ok(content) => content,
                Err(e) => {
                    warn!("Skipping unreadable recipe {}: {}", path.display(), e);
                    continue;
                }
            };
            match Recipe::parse(&content) {
                Ok(recipe) => {
                    let id = recipes.len() as i64 + 1;
                    debug!("Loaded {} as recipe {}", path.display(), id);
                    recipes.push(recipe.with_id(id));
                }
                Err(e) => warn!("Skipping malformed recipe {}: {}", path.display(), e),
            }
        }

        Ok(Self { recipes })
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn get(&self, id: i64) -> Option<&Recipe> {
        self.recipes.iter().find(|recipe| recipe.id == Some(id))
    }

    /// Recipes grouped by category; drafts sort after finished recipes.
    pub fn groups(&self) -> Vec<CategoryGroup<'_>> {
        group(self.recipes.iter())
    }

    /// Like [`Catalog::groups`], keeping only titles containing `text`
    /// (case-insensitive). Categories left empty are dropped.
    pub fn filter(&self, text: &str) -> Vec<CategoryGroup<'_>> {
        let needle = text.to_lowercase();
        group(
            self.recipes
                .iter()
                .filter(|recipe| recipe.title.to_lowercase().contains(&needle)),
        )
    }
}

fn group<'a>(recipes: impl Iterator<Item = &'a Recipe>) -> Vec<CategoryGroup<'a>> {
    let mut by_category: BTreeMap<&str, Vec<&Recipe>> = BTreeMap::new();
    for recipe in recipes {
        by_category.entry(recipe.category()).or_default().push(recipe);
    }

    by_category
        .into_iter()
        .map(|(category, mut recipes)| {
            recipes.sort_by(|a, b| {
                (a.draft().is_some(), &a.title).cmp(&(b.draft().is_some(), &b.title))
            });
            CategoryGroup { category, recipes }
        })
        .collect()
}
