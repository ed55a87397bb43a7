use crate::model::Token;

/// Where a token wants a space around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Spacing {
    #[default]
    None,
    Leading,
    Trailing,
    Both,
    /// No spacing, and any whitespace already trailing on the line is removed
    /// so the token hugs whatever precedes it.
    TrimLeft,
}

impl Spacing {
    pub fn leading(self) -> bool {
        matches!(self, Spacing::Leading | Spacing::Both)
    }

    pub fn trailing(self) -> bool {
        matches!(self, Spacing::Trailing | Spacing::Both)
    }

    pub(crate) fn apply(self, token: &mut Token) {
        token.has_prefix_space = self.leading();
        token.has_suffix_space = self.trailing();
    }
}

/// Extra metadata for [`ReviewBuilder::line_marker`](super::ReviewBuilder::line_marker).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineMarkerOptions {
    /// Also use the line ID as the line's cross-language ID.
    pub add_cross_language_id: bool,
    pub related_line_id: Option<String>,
}

impl LineMarkerOptions {
    pub fn cross_language() -> Self {
        Self {
            add_cross_language_id: true,
            related_line_id: None,
        }
    }

    pub fn related_to(id: impl Into<String>) -> Self {
        Self {
            add_cross_language_id: false,
            related_line_id: Some(id.into()),
        }
    }
}
