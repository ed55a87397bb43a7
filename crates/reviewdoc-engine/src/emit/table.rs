use crate::error::EmitError;
use crate::model::{Token, TokenKind};

/// Rows and columns laid out by the caller, ready for
/// [`TokenWriter::table`](super::TokenWriter::table).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub definition_id: String,
    pub columns: Vec<String>,
    /// Each cell is the token run rendered inside it.
    pub rows: Vec<Vec<Vec<Token>>>,
}

impl Table {
    pub fn new<I, S>(definition_id: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            definition_id: definition_id.into(),
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, cells: Vec<Vec<Token>>) {
        self.rows.push(cells);
    }

    /// Adds a row of plain text cells. Empty strings become empty cells.
    pub fn push_text_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let row = cells
            .into_iter()
            .map(|cell| {
                let text = cell.as_ref();
                if text.is_empty() {
                    Vec::new()
                } else {
                    vec![Token::new(TokenKind::Text, text)]
                }
            })
            .collect();
        self.rows.push(row);
    }

    pub(crate) fn check_shape(&self) -> Result<(), EmitError> {
        let expected = self.columns.len();
        match self
            .rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != expected)
        {
            Some((row, cells)) => Err(EmitError::TableShape {
                row,
                expected,
                found: cells.len(),
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emit::TokenWriter;
    use pretty_assertions::assert_eq;

    #[test]
    fn table_tokens_follow_header_then_cells() {
        let mut table = Table::new("api_params", ["name", "in"]);
        table.push_text_row(["id", "path"]);
        table.push_text_row(["filter", ""]);
        let mut w = TokenWriter::new(2);

        w.table(&table).unwrap();
        let tokens = w.finish().unwrap();

        let summary: Vec<_> = tokens
            .iter()
            .map(|t| (t.kind, t.value.clone().unwrap_or_default()))
            .collect();
        let expected: Vec<(TokenKind, String)> = vec![
            (TokenKind::TableBegin, ""),
            (TokenKind::TableRowCount, "2"),
            (TokenKind::TableColumnCount, "2"),
            (TokenKind::TableColumnName, "name"),
            (TokenKind::TableColumnName, "in"),
            (TokenKind::TableCellBegin, ""),
            (TokenKind::Text, "id"),
            (TokenKind::TableCellEnd, ""),
            (TokenKind::TableCellBegin, ""),
            (TokenKind::Text, "path"),
            (TokenKind::TableCellEnd, ""),
            (TokenKind::TableCellBegin, ""),
            (TokenKind::Text, "filter"),
            (TokenKind::TableCellEnd, ""),
            (TokenKind::TableCellBegin, ""),
            (TokenKind::TableCellEnd, ""),
            (TokenKind::TableEnd, ""),
        ]
        .into_iter()
        .map(|(kind, value)| (kind, value.to_string()))
        .collect();
        assert_eq!(summary, expected);
        assert_eq!(tokens[0].definition_id.as_deref(), Some("api_params"));
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let mut table = Table::new("t", ["a", "b"]);
        table.push_text_row(["1", "2"]);
        table.push_text_row(["3"]);
        let mut w = TokenWriter::new(2);

        let err = w.table(&table).unwrap_err();

        assert!(matches!(
            err,
            EmitError::TableShape {
                row: 1,
                expected: 2,
                found: 1
            }
        ));
        assert!(w.tokens().is_empty());
    }
}
