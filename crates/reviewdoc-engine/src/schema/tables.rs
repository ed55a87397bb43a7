use serde_json::{Map, Value};

use super::order::is_scalar;
use crate::emit::Table;
use crate::model::{Token, TokenKind};

pub const PARAMETER_COLUMNS: [&str; 5] = ["name", "in", "type", "required", "description"];

/// Lays out an operation's parameter list as a table. Returns `None` unless
/// every entry is an object of scalars.
pub(super) fn parameter_table(
    definition_id: &str,
    parameters: &Value,
    link_ref: impl Fn(&str) -> Option<String>,
) -> Option<Table> {
    let entries = parameters.as_array()?;
    if entries.is_empty() {
        return None;
    }
    let objects: Vec<&Map<String, Value>> = entries
        .iter()
        .map(|entry| entry.as_object().filter(|o| o.values().all(is_scalar)))
        .collect::<Option<_>>()?;

    let mut table = Table::new(definition_id, PARAMETER_COLUMNS);
    for parameter in objects {
        let row = PARAMETER_COLUMNS
            .iter()
            .map(|&column| cell(parameter, column, &link_ref))
            .collect();
        table.push_row(row);
    }
    Some(table)
}

fn cell(
    parameter: &Map<String, Value>,
    column: &str,
    link_ref: &impl Fn(&str) -> Option<String>,
) -> Vec<Token> {
    if column == "name"
        && !parameter.contains_key("name")
        && let Some(reference) = parameter.get("$ref").and_then(Value::as_str)
    {
        let shown = reference.rsplit('/').next().unwrap_or(reference);
        let mut token = Token::new(TokenKind::TypeName, shown);
        if let Some(target) = link_ref(reference) {
            token = token.with_navigate_to(target);
        }
        return vec![token];
    }

    match parameter.get(column) {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::String(s)) if s.is_empty() => Vec::new(),
        Some(Value::String(s)) => vec![Token::new(TokenKind::Text, s.as_str())],
        Some(Value::Bool(b)) => vec![Token::new(TokenKind::Keyword, b.to_string())],
        Some(other) => vec![Token::new(TokenKind::Literal, other.to_string())],
    }
}
