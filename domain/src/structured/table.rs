//! Key/value tables for displaying structured results.

use serde_json::Value;

/// Render a value the way it should read in a table cell
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Two-column HTML table, one `<tr>` per field.
///
/// ```
/// use troubleshoot_domain::structured::table::html_table;
///
/// let html = html_table(&[("service_name".to_string(), "X".to_string())]);
/// assert_eq!(
///     html,
///     "<table><tr><td> <strong>service_name</strong> </td><td> X </td></tr>\n</table>"
/// );
/// ```
pub fn html_table(rows: &[(String, String)]) -> String {
    let mut html = String::from("<table>");
    for (key, value) in rows {
        html.push_str(&format!(
            "<tr><td> <strong>{}</strong> </td><td> {} </td></tr>\n",
            key, value
        ));
    }
    html.push_str("</table>");
    html
}

/// Markdown key/value layout: a bold title-cased key row followed by its
/// value row. The separator after the first key row makes it the header.
///
/// ```text
/// | **Score** |
/// | ----- |
/// | 85 |
/// | **Rca** |
/// | ESB timeout |
/// ```
pub fn markdown_key_value_table(rows: &[(String, String)]) -> String {
    let mut markdown = String::new();
    for (index, (key, value)) in rows.iter().enumerate() {
        markdown.push_str(&format!("| **{}** |\n", title_case(key)));
        if index == 0 {
            markdown.push_str("| ----- |\n");
        }
        markdown.push_str(&format!("| {} |\n", value));
    }
    markdown
}

/// Title-case a key: a letter following a non-letter is upper-cased, every
/// other letter lower-cased (`transaction_id` → `Transaction_Id`).
pub fn title_case(key: &str) -> String {
    let mut result = String::with_capacity(key.len());
    let mut previous_is_letter = false;
    for c in key.chars() {
        if c.is_alphabetic() {
            if previous_is_letter {
                result.extend(c.to_lowercase());
            } else {
                result.extend(c.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            result.push(c);
            previous_is_letter = false;
        }
    }
    result
}
