use crate::error::ParseError;
use crate::model::{Component, Step};

/// What a body line does, chosen by its first character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// `=`
    Title,
    /// `>`
    Note,
    /// `+`
    Component,
    /// `#`
    Step,
    /// `-`
    Ingredient,
}

impl LineKind {
    fn from_prefix(c: char) -> Option<Self> {
        match c {
            '=' => Some(Self::Title),
            '>' => Some(Self::Note),
            '+' => Some(Self::Component),
            '#' => Some(Self::Step),
            '-' => Some(Self::Ingredient),
            _ => None,
        }
    }
}

/// Classifies a body line, returning its kind and trimmed text.
///
/// Blank lines and lines without a recognised prefix yield `None`.
pub fn classify(line: &str) -> Option<(LineKind, &str)> {
    let line = line.trim_start();
    let mut chars = line.chars();
    let kind = LineKind::from_prefix(chars.next()?)?;
    Some((kind, chars.as_str().trim()))
}

/// Everything the body contributes to a recipe
#[derive(Debug)]
pub struct Body {
    pub title: String,
    /// Note lines joined with `\n`; `None` when there were no `>` lines
    pub notes: Option<String>,
    pub components: Vec<Component>,
}

#[derive(Debug, Default)]
pub struct BodyParser {
    title: Option<String>,
    notes: Vec<String>,
    components: Vec<Component>,
    component_name: Option<String>,
    component_steps: Vec<Step>,
    step_text: Option<String>,
    step_ingredients: Vec<String>,
}

impl BodyParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one line; `number` is its 1-based position in the input.
    pub fn feed(&mut self, line: &str, number: usize) -> Result<(), ParseError> {
        let Some((kind, text)) = classify(line) else {
            return Ok(());
        };

        match kind {
            LineKind::Title => self.title = Some(text.to_string()),
            LineKind::Note => self.notes.push(text.to_string()),
            LineKind::Component => {
                self.flush_component();
                self.component_name = (!text.is_empty()).then(|| text.to_string());
            }
            LineKind::Step => {
                self.flush_step();
                self.step_text = Some(text.to_string());
            }
            LineKind::Ingredient => {
                if self.step_text.is_none() {
                    return Err(ParseError::OrphanIngredient { line: number });
                }
                self.step_ingredients.push(text.to_string());
            }
        }

        Ok(())
    }

    /// Closes the open step and component and validates the result.
    pub fn finish(mut self) -> Result<Body, ParseError> {
        self.flush_component();

        let notes = (!self.notes.is_empty()).then(|| self.notes.join("\n"));

        let title = match self.title {
            Some(title) if !title.is_empty() => title,
            _ => return Err(ParseError::MissingTitle),
        };

        if self.components.is_empty() {
            return Err(ParseError::EmptyRecipe);
        }

        Ok(Body {
            title,
            notes,
            components: self.components,
        })
    }

    fn flush_step(&mut self) {
        let ingredients = std::mem::take(&mut self.step_ingredients);
        match self.step_text.take() {
            Some(text) if !text.is_empty() => {
                self.component_steps
                    .push(Step::with_ingredients(text, ingredients));
            }
            _ => {}
        }
    }

    fn flush_component(&mut self) {
        self.flush_step();
        let name = self.component_name.take();
        let steps = std::mem::take(&mut self.component_steps);
        if !steps.is_empty() {
            self.components.push(Component::new(name, steps));
        }
    }
}
