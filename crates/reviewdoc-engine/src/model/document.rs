use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{Diagnostic, Line, NavigationNode, Token, render_lines, render_tokens};
use crate::error::EmitError;

/// Identity of the package a document describes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DocumentInfo {
    pub name: String,
    pub package_name: String,
    #[serde(default)]
    pub version_string: String,
    pub language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_variant: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cross_language_package_id: Option<String>,
    #[serde(default)]
    pub parser_version: String,
}

impl DocumentInfo {
    pub fn new(
        name: impl Into<String>,
        package_name: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            package_name: package_name.into(),
            language: language.into(),
            ..Self::default()
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version_string = version.into();
        self
    }

    pub fn with_parser_version(mut self, version: impl Into<String>) -> Self {
        self.parser_version = version.into();
        self
    }
}

/// The two emission styles a document body can take.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentBody {
    ReviewLines(Vec<Line>),
    Tokens(Vec<Token>),
}

/// A finished review document as handed to the review service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReviewDocument {
    #[serde(flatten)]
    pub info: DocumentInfo,
    #[serde(flatten)]
    pub body: DocumentBody,
    #[serde(default)]
    pub navigation: Vec<NavigationNode>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

impl ReviewDocument {
    pub fn new(info: DocumentInfo, body: DocumentBody) -> Self {
        Self {
            info,
            body,
            navigation: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn with_navigation(mut self, navigation: Vec<NavigationNode>) -> Self {
        self.navigation = navigation;
        self
    }

    pub fn with_diagnostics(mut self, diagnostics: Vec<Diagnostic>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Plain-text rendering of the body. `indent_width` applies to line trees only;
    /// flat token lists carry their own whitespace.
    pub fn render_text(&self, indent_width: usize) -> String {
        match &self.body {
            DocumentBody::ReviewLines(lines) => render_lines(lines, indent_width),
            DocumentBody::Tokens(tokens) => {
                let mut out = String::new();
                render_tokens(tokens, &mut out);
                out
            }
        }
    }

    /// Line IDs that occur on more than one line, in order of first repeat.
    pub fn duplicate_line_ids(&self) -> Vec<String> {
        let DocumentBody::ReviewLines(lines) = &self.body else {
            return Vec::new();
        };

        let mut counts: HashMap<&str, usize> = HashMap::new();
        let mut duplicates = Vec::new();
        for line in lines {
            line.walk(0, &mut |line, _| {
                if let Some(id) = line.line_id.as_deref() {
                    let count = counts.entry(id).or_default();
                    *count += 1;
                    if *count == 2 {
                        duplicates.push(id.to_string());
                    }
                }
            });
        }
        duplicates
    }

    pub fn to_json(&self) -> Result<String, EmitError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, EmitError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TokenKind;
    use pretty_assertions::assert_eq;

    fn line_with_id(id: &str) -> Line {
        Line {
            line_id: Some(id.to_string()),
            tokens: vec![Token::new(TokenKind::Text, id)],
            ..Line::default()
        }
    }

    #[test]
    fn json_keeps_body_under_style_key() {
        let info = DocumentInfo::new("pkg.swift", "Pkg", "Swift").with_version("1.0.0");
        let document =
            ReviewDocument::new(info, DocumentBody::ReviewLines(vec![line_with_id("Pkg")]));

        let json: serde_json::Value = serde_json::from_str(&document.to_json().unwrap()).unwrap();

        assert_eq!(json["Name"], "pkg.swift");
        assert_eq!(json["PackageName"], "Pkg");
        assert_eq!(json["VersionString"], "1.0.0");
        assert_eq!(json["ReviewLines"][0]["LineId"], "Pkg");
        assert!(json.get("Tokens").is_none());
        assert!(json.get("Diagnostics").is_none());
    }

    #[test]
    fn json_round_trips_flat_documents() {
        let info = DocumentInfo::new("api.json", "Api", "Swagger");
        let document = ReviewDocument::new(
            info,
            DocumentBody::Tokens(vec![
                Token::new(TokenKind::Punctuation, "{"),
                Token::marker(TokenKind::Newline),
            ]),
        )
        .with_diagnostics(vec![Diagnostic::warning("Api", "careful")]);

        let parsed = ReviewDocument::from_json(&document.to_json().unwrap()).unwrap();

        assert_eq!(parsed, document);
    }

    #[test]
    fn duplicate_line_ids_are_found_at_any_depth() {
        let mut root = line_with_id("Pkg.Foo");
        root.children.push(line_with_id("Pkg.Foo.bar"));
        root.children.push(line_with_id("Pkg.Foo"));
        let document = ReviewDocument::new(
            DocumentInfo::default(),
            DocumentBody::ReviewLines(vec![
                root,
                line_with_id("Pkg.Foo.bar"),
                line_with_id("Pkg.Baz"),
            ]),
        );

        assert_eq!(
            document.duplicate_line_ids(),
            vec!["Pkg.Foo".to_string(), "Pkg.Foo.bar".to_string()]
        );
    }
}
