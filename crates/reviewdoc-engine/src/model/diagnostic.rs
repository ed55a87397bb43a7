use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DiagnosticLevel {
    Info,
    Warning,
    Error,
    Fatal,
}

/// A recoverable problem found while emitting a document.
///
/// Diagnostics travel with the document for the review service to surface and
/// never stop traversal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Diagnostic {
    pub target_id: String,
    pub text: String,
    pub level: DiagnosticLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_link_uri: Option<String>,
}

impl Diagnostic {
    pub fn new(
        level: DiagnosticLevel,
        target_id: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            target_id: target_id.into(),
            text: text.into(),
            level,
            help_link_uri: None,
        }
    }

    pub fn info(target_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Info, target_id, text)
    }

    pub fn warning(target_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Warning, target_id, text)
    }

    pub fn error(target_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Error, target_id, text)
    }

    pub fn with_help_link(mut self, uri: impl Into<String>) -> Self {
        self.help_link_uri = Some(uri.into());
        self
    }
}

/// Collects diagnostics and mirrors each one to the log as it arrives.
#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        let target = &diagnostic.target_id;
        let text = &diagnostic.text;
        match diagnostic.level {
            DiagnosticLevel::Info => log::info!("{target}: {text}"),
            DiagnosticLevel::Warning => log::warn!("{target}: {text}"),
            DiagnosticLevel::Error | DiagnosticLevel::Fatal => log::error!("{target}: {text}"),
        }
        self.items.push(diagnostic);
    }

    pub fn warn(&mut self, target_id: impl Into<String>, text: impl Into<String>) {
        self.push(Diagnostic::warning(target_id, text));
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }
}
