//! Text to [`Recipe`].
//!
//! Parsing runs in two stages: [`metadata::extract`] peels off the optional
//! `---` header, then [`body::BodyParser`] walks the remaining lines one at
//! a time.

pub mod body;
pub mod metadata;

use log::debug;

use crate::error::ParseError;
use crate::model::Recipe;

use self::body::BodyParser;

/// Parses recipe text into a [`Recipe`].
///
/// The returned recipe never carries an `id`. Any failure aborts the whole
/// parse; there are no partial results.
pub fn parse(text: &str) -> Result<Recipe, ParseError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ParseError::EmptyInput);
    }

    // Line numbers in errors refer to the untrimmed input.
    let leading = text.len() - text.trim_start().len();
    let line_offset = text[..leading].matches('\n').count();

    let lines: Vec<&str> = trimmed.lines().collect();
    let (mut metadata, body_start) = metadata::extract(&lines);

    let mut parser = BodyParser::new();
    for (index, line) in lines.iter().enumerate().skip(body_start) {
        parser.feed(line, line_offset + index + 1)?;
    }
    let body = parser.finish()?;

    if let Some(notes) = body.notes {
        metadata.insert("notes".to_string(), notes);
    }

    debug!(
        "Parsed recipe '{}' with {} component(s) and {} metadata key(s)",
        body.title,
        body.components.len(),
        metadata.len()
    );

    Ok(Recipe {
        id: None,
        title: body.title,
        metadata,
        components: body.components,
    })
}
