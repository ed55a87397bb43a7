use serde::{Deserialize, Serialize};

use super::token::{Token, render_tokens};

/// A rendered line of the review document and the lines nested beneath it.
///
/// A line with no tokens and no children is an intentional blank separator.
/// A line with no tokens but with children only groups them one level deeper
/// and renders nothing of its own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Line {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cross_language_id: Option<String>,
    #[serde(default)]
    pub tokens: Vec<Token>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Line>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_hidden: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_context_end_line: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_to_line: Option<String>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl Line {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_blank(&self) -> bool {
        self.tokens.is_empty() && self.children.is_empty()
    }

    /// True when the last token is punctuation with exactly this text.
    pub fn ends_with_punctuation(&self, text: &str) -> bool {
        self.tokens.last().is_some_and(|token| {
            token.kind == super::TokenKind::Punctuation && token.value() == text
        })
    }

    /// Renders this line and its subtree.
    pub fn render(&self, depth: usize, indent_width: usize, out: &mut String) {
        if !self.tokens.is_empty() {
            out.push_str(&" ".repeat(depth * indent_width));
            render_tokens(&self.tokens, out);
            out.push('\n');
        } else if self.children.is_empty() {
            out.push('\n');
        }
        for child in &self.children {
            child.render(depth + 1, indent_width, out);
        }
    }

    pub fn text(&self, indent_width: usize) -> String {
        let mut out = String::new();
        self.render(0, indent_width, &mut out);
        out
    }

    /// Visits this line and every descendant depth-first, parents before children.
    pub fn walk<'a>(&'a self, depth: usize, visit: &mut impl FnMut(&'a Line, usize)) {
        visit(self, depth);
        for child in &self.children {
            child.walk(depth + 1, visit);
        }
    }
}

/// Renders a forest of top-level lines.
pub fn render_lines(lines: &[Line], indent_width: usize) -> String {
    let mut out = String::new();
    for line in lines {
        line.render(0, indent_width, &mut out);
    }
    out
}
