//! Text cleanup for the `;`-delimited, fully quoted import format.
//!
//! Every free-text value that reaches a row passes through
//! [`sanitize_text`]. Values embedded in the `Name:Value:Position` and
//! `Value:Position` list formats additionally go through
//! [`sanitize_list_item`].

use rust_decimal::Decimal;

/// Appended to text cut by [`truncate_with_ellipsis`].
pub const ELLIPSIS: &str = "...";

/// Cleans a free-text value for the delimited output.
///
/// `&nbsp;` and line/tab characters become spaces, double quotes are removed,
/// `;` becomes `,`, `|` becomes `-`, remaining ASCII control characters are
/// dropped, and whitespace runs collapse to one space.
#[must_use]
pub fn sanitize_text(input: &str) -> String {
    let replaced = input.replace("&nbsp;", " ");

    let mut cleaned = String::with_capacity(replaced.len());
    for c in replaced.chars() {
        match c {
            '\n' | '\r' | '\t' => cleaned.push(' '),
            '"' => {}
            ';' => cleaned.push(','),
            '|' => cleaned.push('-'),
            c if c.is_ascii_control() => {}
            c => cleaned.push(c),
        }
    }

    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Like [`sanitize_text`], then neutralizes the `:` and `,` separators used
/// by the attribute/value list columns.
///
/// A comma between two digits is a decimal comma and becomes `.`
/// (`"80,5 cm"` → `"80.5 cm"`); any other comma and every colon become a space.
#[must_use]
pub fn sanitize_list_item(input: &str) -> String {
    let text = sanitize_text(input);
    let chars: Vec<char> = text.chars().collect();

    let mut out = String::with_capacity(text.len());
    for (i, &c) in chars.iter().enumerate() {
        match c {
            ',' => {
                let digit_before = i > 0 && chars[i - 1].is_ascii_digit();
                let digit_after = chars.get(i + 1).is_some_and(char::is_ascii_digit);
                out.push(if digit_before && digit_after { '.' } else { ' ' });
            }
            ':' => out.push(' '),
            c => out.push(c),
        }
    }

    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Keeps at most `max_chars` characters.
#[must_use]
pub fn truncate_chars(input: &str, max_chars: usize) -> String {
    input.chars().take(max_chars).collect()
}

/// Keeps at most `max_chars` characters and appends [`ELLIPSIS`] when
/// anything was cut.
#[must_use]
pub fn truncate_with_ellipsis(input: &str, max_chars: usize) -> String {
    if input.chars().count() <= max_chars {
        return input.to_string();
    }
    let mut cut = truncate_chars(input, max_chars);
    cut.push_str(ELLIPSIS);
    cut
}

/// Turns a technical-attribute dimension such as `"80 cm"` or `"45,5cm"` into
/// a bare number (`"80"`, `"45.5"`). Anything that is not a number once the
/// unit is gone yields an empty string.
#[must_use]
pub fn clean_dimension_value(input: &str) -> String {
    let stripped: String = input
        .trim()
        .replace("cm", "")
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    if stripped.is_empty() {
        return String::new();
    }

    stripped
        .parse::<Decimal>()
        .map(|d| d.normalize().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "sanitize_test.rs"]
mod tests;
