use serde::{Deserialize, Serialize};

/// Every kind of token a review document can carry.
///
/// Serialized as a stable small integer. The numbering is part of the document
/// format, so new kinds may only ever be appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
#[repr(u8)]
pub enum TokenKind {
    Text = 0,
    Newline = 1,
    Whitespace = 2,
    Punctuation = 3,
    Keyword = 4,
    LineIdMarker = 5,
    TypeName = 6,
    MemberName = 7,
    StringLiteral = 8,
    Literal = 9,
    Comment = 10,
    DocumentRangeStart = 11,
    DocumentRangeEnd = 12,
    DeprecatedRangeStart = 13,
    DeprecatedRangeEnd = 14,
    SkipDiffRangeStart = 15,
    SkipDiffRangeEnd = 16,
    FoldableSectionHeading = 17,
    FoldableSectionContentStart = 18,
    FoldableSectionContentEnd = 19,
    TableBegin = 20,
    TableEnd = 21,
    TableRowCount = 22,
    TableColumnCount = 23,
    TableColumnName = 24,
    TableCellBegin = 25,
    TableCellEnd = 26,
}

impl TokenKind {
    pub const ALL: [TokenKind; 27] = [
        TokenKind::Text,
        TokenKind::Newline,
        TokenKind::Whitespace,
        TokenKind::Punctuation,
        TokenKind::Keyword,
        TokenKind::LineIdMarker,
        TokenKind::TypeName,
        TokenKind::MemberName,
        TokenKind::StringLiteral,
        TokenKind::Literal,
        TokenKind::Comment,
        TokenKind::DocumentRangeStart,
        TokenKind::DocumentRangeEnd,
        TokenKind::DeprecatedRangeStart,
        TokenKind::DeprecatedRangeEnd,
        TokenKind::SkipDiffRangeStart,
        TokenKind::SkipDiffRangeEnd,
        TokenKind::FoldableSectionHeading,
        TokenKind::FoldableSectionContentStart,
        TokenKind::FoldableSectionContentEnd,
        TokenKind::TableBegin,
        TokenKind::TableEnd,
        TokenKind::TableRowCount,
        TokenKind::TableColumnCount,
        TokenKind::TableColumnName,
        TokenKind::TableCellBegin,
        TokenKind::TableCellEnd,
    ];

    /// Structural markers locate regions for the renderer and contribute no text.
    pub fn is_marker(self) -> bool {
        use TokenKind::*;
        matches!(
            self,
            LineIdMarker
                | DocumentRangeStart
                | DocumentRangeEnd
                | DeprecatedRangeStart
                | DeprecatedRangeEnd
                | SkipDiffRangeStart
                | SkipDiffRangeEnd
                | FoldableSectionHeading
                | FoldableSectionContentStart
                | FoldableSectionContentEnd
                | TableBegin
                | TableEnd
                | TableRowCount
                | TableColumnCount
                | TableColumnName
                | TableCellBegin
                | TableCellEnd
        )
    }
}

impl From<TokenKind> for u8 {
    fn from(kind: TokenKind) -> Self {
        kind as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown token kind {0}")]
pub struct UnknownTokenKind(pub u8);

impl TryFrom<u8> for TokenKind {
    type Error = UnknownTokenKind;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        TokenKind::ALL
            .get(value as usize)
            .copied()
            .ok_or(UnknownTokenKind(value))
    }
}

/// One renderable unit of a review document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Token {
    pub kind: TokenKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub navigate_to_id: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub has_prefix_space: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub has_suffix_space: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub skip_diff: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_deprecated: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::marker(kind)
        }
    }

    /// A token with no text.
    pub fn marker(kind: TokenKind) -> Self {
        Self {
            kind,
            value: None,
            definition_id: None,
            navigate_to_id: None,
            has_prefix_space: false,
            has_suffix_space: false,
            skip_diff: false,
            is_deprecated: false,
        }
    }

    pub fn with_definition_id(mut self, id: impl Into<String>) -> Self {
        self.definition_id = Some(id.into());
        self
    }

    pub fn with_navigate_to(mut self, id: impl Into<String>) -> Self {
        self.navigate_to_id = Some(id.into());
        self
    }

    pub fn value(&self) -> &str {
        self.value.as_deref().unwrap_or_default()
    }

    pub fn is_whitespace(&self) -> bool {
        self.kind == TokenKind::Whitespace
    }
}

/// Renders tokens as plain text, collapsing adjacent spacing hints to one space.
///
/// Markers contribute nothing and newline tokens break the line.
pub fn render_tokens(tokens: &[Token], out: &mut String) {
    let mut line_has_text = false;
    let mut pending_space = false;
    for token in tokens {
        if token.kind == TokenKind::Newline {
            out.push('\n');
            line_has_text = false;
            pending_space = false;
            continue;
        }
        if token.kind.is_marker() {
            continue;
        }
        if line_has_text && (pending_space || token.has_prefix_space) && !out.ends_with(' ') {
            out.push(' ');
        }
        out.push_str(token.value());
        line_has_text = true;
        pending_space = token.has_suffix_space;
    }
}
