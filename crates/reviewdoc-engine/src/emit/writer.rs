use super::spacing::Spacing;
use super::table::Table;
use crate::error::EmitError;
use crate::model::{Token, TokenKind, render_tokens};

/// Writes the flat token stream: spacing, newlines and indentation are tokens
/// of their own, and collapsible or tabular regions are delimited by paired
/// marker tokens.
#[derive(Debug)]
pub struct TokenWriter {
    tokens: Vec<Token>,
    indent: usize,
    indent_text: String,
    at_line_start: bool,
}

impl TokenWriter {
    pub fn new(indent_width: usize) -> Self {
        Self {
            tokens: Vec::new(),
            indent: 0,
            indent_text: " ".repeat(indent_width),
            at_line_start: true,
        }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn depth(&self) -> usize {
        self.indent
    }

    /// Writes a token, preceded by indentation if it starts a line.
    pub fn write(&mut self, kind: TokenKind, value: impl Into<String>) {
        self.write_indent();
        self.tokens.push(Token::new(kind, value));
    }

    /// Writes a text-less marker. Markers never trigger indentation.
    pub fn marker(&mut self, kind: TokenKind) -> &mut Token {
        self.tokens.push(Token::marker(kind));
        let index = self.tokens.len() - 1;
        &mut self.tokens[index]
    }

    pub fn keyword(&mut self, value: &str, spacing: Spacing) {
        self.spaced(TokenKind::Keyword, value, spacing);
    }

    pub fn punctuation(&mut self, value: &str, spacing: Spacing) {
        self.spaced(TokenKind::Punctuation, value, spacing);
    }

    /// Writes `count` spaces unless the line already ends in whitespace.
    pub fn whitespace(&mut self, count: usize) {
        if count == 0 || self.tokens.last().is_some_and(Token::is_whitespace) {
            return;
        }
        self.write(TokenKind::Whitespace, " ".repeat(count));
    }

    /// Ends the line. A line that is already ended stays ended, and trailing
    /// whitespace is dropped unless it is all the line holds.
    pub fn newline(&mut self) {
        self.at_line_start = true;
        let line = &self.tokens[self.line_start()..];
        let mut content = line.iter().filter(|token| !token.kind.is_marker()).peekable();
        if content.peek().is_none() {
            return;
        }
        let whitespace_only = content.all(Token::is_whitespace);

        if !whitespace_only {
            self.trim_trailing_whitespace();
        }
        self.tokens.push(Token::marker(TokenKind::Newline));
    }

    /// Leaves exactly `count` blank lines before the cursor. Markers written
    /// since the last line end stay after the blank lines.
    pub fn blank_lines(&mut self, count: usize) {
        self.newline();
        self.set_trailing_blank_lines(count);
        self.at_line_start = true;
    }

    pub fn push_scope(&mut self) {
        self.indent += 1;
    }

    /// Closes the innermost scope. Blank lines left at the end of the block are
    /// dropped.
    pub fn pop_scope(&mut self) -> Result<(), EmitError> {
        if self.indent == 0 {
            return Err(EmitError::ScopeUnderflow);
        }
        self.set_trailing_blank_lines(0);
        self.indent -= 1;
        Ok(())
    }

    /// Runs `body` one indentation level deeper.
    pub fn indent<T>(&mut self, body: impl FnOnce(&mut Self) -> T) -> T {
        self.push_scope();
        let result = body(self);
        self.set_trailing_blank_lines(0);
        self.indent = self.indent.saturating_sub(1);
        result
    }

    /// Writes `start`, the indented body and `end`. Multi-line scopes put the
    /// body on its own lines.
    pub fn scope<T>(
        &mut self,
        start: &str,
        end: &str,
        multiline: bool,
        body: impl FnOnce(&mut Self) -> T,
    ) -> T {
        self.write(TokenKind::Punctuation, start);
        if multiline {
            self.newline();
        }
        let result = self.indent(body);
        if multiline {
            self.newline();
        }
        self.write(TokenKind::Punctuation, end);
        result
    }

    /// Makes the last token the definition of `id`.
    pub fn annotate_definition(&mut self, id: &str) {
        if let Some(last) = self.last_content_token() {
            last.definition_id = Some(id.to_string());
        }
    }

    /// Links the last token of `kind` to `id`.
    pub fn annotate_link(&mut self, id: &str, kind: TokenKind) {
        if let Some(last) = self.tokens.iter_mut().rev().find(|token| token.kind == kind) {
            last.navigate_to_id = Some(id.to_string());
        }
    }

    pub fn line_id_marker(&mut self, id: &str) {
        self.marker(TokenKind::LineIdMarker).definition_id = Some(id.to_string());
    }

    /// Heading marker of a foldable section, written just after its title.
    pub fn fold_heading(&mut self, id: &str) {
        let heading = self.marker(TokenKind::FoldableSectionHeading);
        heading.value = Some(id.to_string());
        heading.definition_id = Some(id.to_string());
    }

    /// Wraps the collapsible body of a section in content markers.
    pub fn fold_content<T>(&mut self, body: impl FnOnce(&mut Self) -> T) -> T {
        self.ranged(
            TokenKind::FoldableSectionContentStart,
            TokenKind::FoldableSectionContentEnd,
            body,
        )
    }

    pub fn deprecated_range<T>(&mut self, body: impl FnOnce(&mut Self) -> T) -> T {
        self.ranged(TokenKind::DeprecatedRangeStart, TokenKind::DeprecatedRangeEnd, body)
    }

    pub fn skip_diff_range<T>(&mut self, body: impl FnOnce(&mut Self) -> T) -> T {
        self.ranged(TokenKind::SkipDiffRangeStart, TokenKind::SkipDiffRangeEnd, body)
    }

    pub fn document_range<T>(&mut self, body: impl FnOnce(&mut Self) -> T) -> T {
        self.ranged(TokenKind::DocumentRangeStart, TokenKind::DocumentRangeEnd, body)
    }

    /// Writes a pre-aggregated table.
    pub fn table(&mut self, table: &Table) -> Result<(), EmitError> {
        table.check_shape()?;

        self.marker(TokenKind::TableBegin).definition_id = Some(table.definition_id.clone());
        self.marker(TokenKind::TableRowCount).value = Some(table.rows.len().to_string());
        self.marker(TokenKind::TableColumnCount).value = Some(table.columns.len().to_string());
        for column in &table.columns {
            self.marker(TokenKind::TableColumnName).value = Some(column.clone());
        }
        for row in &table.rows {
            for cell in row {
                self.marker(TokenKind::TableCellBegin);
                self.tokens.extend(cell.iter().cloned());
                self.marker(TokenKind::TableCellEnd);
            }
        }
        self.marker(TokenKind::TableEnd);
        Ok(())
    }

    /// Plain text of everything written so far.
    pub fn render(&self) -> String {
        let mut out = String::new();
        render_tokens(&self.tokens, &mut out);
        out
    }

    pub fn finish(self) -> Result<Vec<Token>, EmitError> {
        if self.indent != 0 {
            return Err(EmitError::UnclosedScope { depth: self.indent });
        }
        Ok(self.tokens)
    }

    fn spaced(&mut self, kind: TokenKind, value: &str, spacing: Spacing) {
        if spacing == Spacing::TrimLeft {
            self.trim_trailing_whitespace();
        }
        if spacing.leading() {
            self.whitespace(1);
        }
        self.write(kind, value);
        if spacing.trailing() {
            self.whitespace(1);
        }
    }

    fn ranged<T>(
        &mut self,
        start: TokenKind,
        end: TokenKind,
        body: impl FnOnce(&mut Self) -> T,
    ) -> T {
        self.marker(start);
        let result = body(self);
        self.marker(end);
        result
    }

    fn write_indent(&mut self) {
        if !self.at_line_start {
            return;
        }
        self.at_line_start = false;
        if self.indent > 0 {
            let indent = self.indent_text.repeat(self.indent);
            self.tokens.push(Token::new(TokenKind::Whitespace, indent));
        }
    }

    /// Removes whitespace at the end of the current line, looking past markers.
    fn trim_trailing_whitespace(&mut self) {
        let start = self.line_start();
        let mut index = self.tokens.len();
        while index > start {
            index -= 1;
            let kind = self.tokens[index].kind;
            if kind == TokenKind::Whitespace {
                self.tokens.remove(index);
            } else if !kind.is_marker() {
                break;
            }
        }
    }

    /// Adds or removes newlines after the last content token until `count`
    /// blank lines remain. Only newlines move; markers keep their order.
    fn set_trailing_blank_lines(&mut self, count: usize) {
        let tail = self
            .tokens
            .iter()
            .rposition(|token| token.kind != TokenKind::Newline && !token.kind.is_marker())
            .map_or(0, |index| index + 1);
        let newlines: Vec<usize> = (tail..self.tokens.len())
            .filter(|&index| self.tokens[index].kind == TokenKind::Newline)
            .collect();
        // The first newline after content only ends that line.
        let line_end = usize::from(tail > 0 && !newlines.is_empty());
        let existing = newlines.len() - line_end;

        if existing > count {
            for &index in newlines.iter().rev().take(existing - count) {
                self.tokens.remove(index);
            }
        } else if existing < count {
            let at = newlines.last().map_or(self.tokens.len(), |&index| index + 1);
            for _ in existing..count {
                self.tokens.insert(at, Token::marker(TokenKind::Newline));
            }
        }
    }

    /// Index of the first token after the last newline.
    fn line_start(&self) -> usize {
        self.tokens
            .iter()
            .rposition(|token| token.kind == TokenKind::Newline)
            .map_or(0, |index| index + 1)
    }

    fn last_content_token(&mut self) -> Option<&mut Token> {
        self.tokens
            .iter_mut()
            .rev()
            .find(|token| !token.kind.is_marker() && token.kind != TokenKind::Newline)
    }
}
