//! Tolerant parser for bracketed list-text CSV fields.
//!
//! Dataset exports store `highlights` and `ingredients` as Python-style
//! list literals (`"['a', 'b']"`), but real rows also arrive truncated,
//! unquoted, or as plain comma-joined text. Parsing never fails: a clean
//! literal is decoded element by element, anything else goes through the
//! bracket-strip-and-split fallback, and empty input yields an empty list.

/// Parse a list-text field into its elements.
pub fn parse_list_field(value: &str) -> Vec<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    if let Some(items) = parse_quoted_list(trimmed) {
        return items;
    }
    let inner =
        trimmed.strip_prefix('[').and_then(|v| v.strip_suffix(']')).unwrap_or(trimmed);
    inner
        .split(',')
        .map(|part| part.trim().trim_matches(|c| c == '\'' || c == '"').to_string())
        .filter(|part| !part.is_empty())
        .collect()
}

/// Strict pass: a bracketed sequence of quoted strings. Returns `None` as
/// soon as the input deviates, handing control to the fallback splitter.
fn parse_quoted_list(value: &str) -> Option<Vec<String>> {
    let inner = value.strip_prefix('[')?.strip_suffix(']')?;
    let mut items = Vec::new();
    let mut chars = inner.chars().peekable();

    loop {
        while matches!(chars.peek(), Some(c) if c.is_whitespace()) {
            chars.next();
        }
        let quote = match chars.next() {
            None => break,
            Some(c @ ('\'' | '"')) => c,
            Some(_) => return None,
        };

        let mut item = String::new();
        loop {
            match chars.next() {
                None => return None,
                Some('\\') => {
                    if let Some(escaped) = chars.next() {
                        item.push(escaped);
                    }
                }
                Some(c) if c == quote => break,
                Some(c) => item.push(c),
            }
        }
        items.push(item.trim().to_string());

        while matches!(chars.peek(), Some(c) if c.is_whitespace()) {
            chars.next();
        }
        match chars.next() {
            None => break,
            Some(',') => continue,
            Some(_) => return None,
        }
    }

    Some(items)
}

#[cfg(test)]
mod tests {
    use super::parse_list_field;

    #[test]
    fn well_formed_literal_round_trips() {
        assert_eq!(parse_list_field("['Vitamin C', 'Retinol']"), vec!["Vitamin C", "Retinol"]);
    }

    #[test]
    fn double_quoted_elements_parse() {
        assert_eq!(parse_list_field(r#"["Good for: dry", "Vegan"]"#), vec!["Good for: dry", "Vegan"]);
    }

    #[test]
    fn escaped_quote_inside_element_survives() {
        assert_eq!(parse_list_field(r"['L\'Oreal Gloss']"), vec!["L'Oreal Gloss"]);
    }

    #[test]
    fn unquoted_elements_fall_back_to_splitting() {
        assert_eq!(parse_list_field("[Niacinamide, Zinc]"), vec!["Niacinamide", "Zinc"]);
    }

    #[test]
    fn plain_comma_text_splits_without_brackets() {
        assert_eq!(parse_list_field("Aqua, Glycerin , 'Panthenol'"), vec![
            "Aqua",
            "Glycerin",
            "Panthenol"
        ]);
    }

    #[test]
    fn mixed_quoting_falls_back() {
        // One unquoted element makes the strict pass bail for the whole row.
        assert_eq!(parse_list_field("['Aqua', Glycerin]"), vec!["Aqua", "Glycerin"]);
    }

    #[test]
    fn empty_and_blank_inputs_yield_empty() {
        assert!(parse_list_field("").is_empty());
        assert!(parse_list_field("   ").is_empty());
        assert!(parse_list_field("[]").is_empty());
    }
}
