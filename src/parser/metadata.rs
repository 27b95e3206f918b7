use std::collections::BTreeMap;

const DELIMITER: &str = "---";

/// Splits an optional leading `---` block off the recipe lines.
///
/// Returns the parsed `key: value` pairs and the index of the first body
/// line. An unclosed block is not an error: nothing is extracted and the
/// body starts at line 0, so the opening delimiter is parsed as body text.
pub fn extract(lines: &[&str]) -> (BTreeMap<String, String>, usize) {
    let mut metadata = BTreeMap::new();

    let Some(first) = lines.first() else {
        return (metadata, 0);
    };
    if first.trim() != DELIMITER {
        return (metadata, 0);
    }

    let Some(close) = lines[1..].iter().position(|line| *line == DELIMITER) else {
        return (metadata, 0);
    };
    let close = close + 1;

    for line in &lines[1..close] {
        if let Some((key, value)) = line.split_once(':') {
            metadata.insert(key.trim().to_string(), value.trim().to_string());
        }
    }

    (metadata, close + 1)
}
