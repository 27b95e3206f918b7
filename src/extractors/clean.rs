//! Text clean-up shared by the extractors.

use html_escape::decode_html_entities;
use scraper::Html;

/// Strips markup and normalises whitespace and decimals in scraped text.
///
/// Newlines are kept; use [`clean_line`] for single-line fields.
pub fn clean_html(text: &str, max_denominator: u32) -> String {
    if text.trim().is_empty() {
        return String::new();
    }

    let fragment = Html::parse_fragment(text);
    let plain: String = fragment.root_element().text().collect();
    // `text()` already decodes one level; escaped entities in JSON strings need one more
    let decoded = decode_html_entities(&plain).into_owned();
    let decoded = decoded.replace(['\u{a0}', '\u{202f}', '\t', '\r'], " ");
    let fractions = decimals_to_fractions(&decoded, max_denominator);

    fractions
        .split('\n')
        .map(collapse_spaces)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Like [`clean_html`], but folds everything onto one line.
pub fn clean_line(text: &str, max_denominator: u32) -> String {
    clean_html(text, max_denominator)
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn collapse_spaces(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut previous_space = false;
    for c in line.chars() {
        if c == ' ' {
            if !previous_space {
                out.push(c);
            }
            previous_space = true;
        } else {
            out.push(c);
            previous_space = false;
        }
    }
    out
}

/// Rewrites every decimal (`1.5`, `.25`) as a mixed fraction (`1 1/2`, `1/4`).
pub fn decimals_to_fractions(text: &str, max_denominator: u32) -> String {
    let bytes = text.as_bytes();
    let digits_end = |from: usize| {
        let mut end = from;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        end
    };

    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    let mut i = 0;
    while i < bytes.len() {
        if !bytes[i].is_ascii_digit() && bytes[i] != b'.' {
            i += 1;
            continue;
        }

        let dot = digits_end(i);
        let has_fraction =
            dot + 1 < bytes.len() && bytes[dot] == b'.' && bytes[dot + 1].is_ascii_digit();
        if !has_fraction {
            i = dot.max(i + 1);
            continue;
        }

        let end = digits_end(dot + 1);
        out.push_str(&text[copied..i]);
        out.push_str(&decimal_to_fraction(&text[i..end], max_denominator));
        copied = end;
        i = end;
    }
    out.push_str(&text[copied..]);
    out
}

fn decimal_to_fraction(decimal: &str, max_denominator: u32) -> String {
    let padded;
    let decimal = if decimal.starts_with('.') {
        padded = format!("0{decimal}");
        padded.as_str()
    } else {
        decimal
    };
    let Ok(value) = decimal.parse::<f64>() else {
        return decimal.to_string();
    };

    let (numerator, denominator) = closest_fraction(value, max_denominator.max(1));
    let whole = numerator / denominator;
    let remainder = numerator % denominator;

    let mut parts = Vec::new();
    if whole > 0 {
        parts.push(whole.to_string());
    }
    if remainder > 0 {
        parts.push(format!("{remainder}/{denominator}"));
    }
    if parts.is_empty() {
        "0".to_string()
    } else {
        parts.join(" ")
    }
}

/// Closest `n/d` to `value` with `d <= max_denominator`, smallest `d` on ties.
fn closest_fraction(value: f64, max_denominator: u32) -> (u64, u64) {
    let mut best = (value.round() as u64, 1u64);
    let mut best_error = (value - best.0 as f64).abs();
    for denominator in 2..=u64::from(max_denominator) {
        let numerator = (value * denominator as f64).round() as u64;
        let error = (value - numerator as f64 / denominator as f64).abs();
        if error < best_error - f64::EPSILON {
            best = (numerator, denominator);
            best_error = error;
        }
    }
    best
}

/// Renders an ISO 8601 `PT..H..M` duration as words.
///
/// Values that are not `PT` durations are returned unchanged; durations
/// with neither hours nor minutes yield `None`.
pub fn convert_duration(duration: &str) -> Option<String> {
    let Some(rest) = duration.strip_prefix("PT") else {
        return Some(duration.to_string());
    };

    let hours = duration_field(rest, 'H');
    let minutes = duration_field(rest, 'M');

    let mut parts = Vec::new();
    if hours > 0 {
        parts.push(format!("{} hour{}", hours, if hours > 1 { "s" } else { "" }));
    }
    if minutes > 0 {
        parts.push(format!(
            "{} minute{}",
            minutes,
            if minutes > 1 { "s" } else { "" }
        ));
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

/// The digits directly before `unit`, or 0.
fn duration_field(duration: &str, unit: char) -> u32 {
    let Some(pos) = duration.find(unit) else {
        return 0;
    };
    let before = &duration[..pos];
    let start = before.trim_end_matches(|c: char| c.is_ascii_digit()).len();
    before[start..].parse().unwrap_or(0)
}
