//! Walks a JSON schema document (Swagger/OpenAPI) and emits it as a flat
//! token stream.
//!
//! The listing reads like the JSON itself, but every property is a definition
//! reviewers can comment on, local `$ref` strings link to the definition they
//! name, and the large collections (paths, definitions, responses, ...) fold.
//!
//! ## Modules
//! - `order`: key ordering and the inline-or-multiline decision
//! - `tree`: navigation nodes gathered during the walk
//! - `tables`: parameter lists laid out as tables

mod order;
mod tables;
mod tree;

pub use order::{compare_operation_keys, fits_inline};
pub use tables::PARAMETER_COLUMNS;

use reviewdoc_config::SchemaConfig;
use serde_json::{Map, Value};

use crate::emit::{Spacing, Table, TokenWriter};
use crate::error::EmitError;
use crate::model::{
    Diagnostic, Diagnostics, DocumentBody, DocumentInfo, ReviewDocument, TokenKind,
};
use crate::registry::{DefinitionRegistry, Registration, normalize_id};
use tree::{NavIndex, NavTree, is_paths_collection};

pub const LANGUAGE: &str = "Swagger";

/// Emits `document` as a review document. `name` is the file the schema came
/// from; it prefixes every definition ID and names the package when the
/// schema has no `info.title`.
pub fn generate_listing(
    name: &str,
    document: &Value,
    config: &SchemaConfig,
) -> Result<ReviewDocument, EmitError> {
    let mut visitor = SchemaVisitor::new(name, config);
    let root = visitor.nav.root();
    visitor.visit(document, Some(root))?;

    let SchemaVisitor {
        writer,
        nav,
        registry,
        diagnostics,
        ..
    } = visitor;
    let tokens = writer.finish()?;
    log::debug!(
        "schema `{name}`: {} tokens, {} definitions, {} diagnostics",
        tokens.len(),
        registry.len(),
        diagnostics.len()
    );

    let package_name = string_at(document, &["info", "title"]).unwrap_or(name);
    let mut info = DocumentInfo::new(name, package_name, LANGUAGE)
        .with_parser_version(env!("CARGO_PKG_VERSION"));
    if let Some(version) = string_at(document, &["info", "version"]) {
        info = info.with_version(version);
    }

    Ok(ReviewDocument::new(info, DocumentBody::Tokens(tokens))
        .with_navigation(nav.build())
        .with_diagnostics(diagnostics.into_vec()))
}

fn string_at<'a>(value: &'a Value, path: &[&str]) -> Option<&'a str> {
    path.iter()
        .try_fold(value, |current, key| current.get(key))
        .and_then(Value::as_str)
}

struct SchemaVisitor<'c> {
    writer: TokenWriter,
    nav: NavTree,
    /// JSON path of the property being written, starting at `#`.
    path: Vec<String>,
    id_prefix: String,
    registry: DefinitionRegistry,
    diagnostics: Diagnostics,
    config: &'c SchemaConfig,
}

impl<'c> SchemaVisitor<'c> {
    fn new(name: &str, config: &'c SchemaConfig) -> Self {
        Self {
            writer: TokenWriter::new(config.indent_width),
            nav: NavTree::new(),
            path: vec!["#".to_string()],
            id_prefix: if name.is_empty() {
                String::new()
            } else {
                format!("{name}_")
            },
            registry: DefinitionRegistry::new(),
            diagnostics: Diagnostics::new(),
            config,
        }
    }

    fn visit(&mut self, value: &Value, nav: Option<NavIndex>) -> Result<(), EmitError> {
        let multiline = !fits_inline(value, self.config);
        match value {
            Value::Object(map) => self.visit_object(map, nav, multiline),
            Value::Array(items) => self.visit_array(items, multiline),
            Value::Null => {
                self.writer.write(TokenKind::Keyword, "null");
                Ok(())
            }
            Value::Bool(b) => {
                self.writer.write(TokenKind::Keyword, b.to_string());
                Ok(())
            }
            Value::Number(n) => {
                self.writer.write(TokenKind::Literal, n.to_string());
                Ok(())
            }
            Value::String(s) => {
                self.writer.write(TokenKind::Punctuation, "\"");
                self.writer.write(TokenKind::StringLiteral, s.as_str());
                self.writer.write(TokenKind::Punctuation, "\"");
                Ok(())
            }
        }
    }

    fn visit_object(
        &mut self,
        map: &Map<String, Value>,
        nav: Option<NavIndex>,
        multiline: bool,
    ) -> Result<(), EmitError> {
        if map.is_empty() {
            self.writer.write(TokenKind::Punctuation, "{}");
            return Ok(());
        }
        let entries = self.ordered_entries(map, nav);
        let (start, end) = if multiline { ("{", "}") } else { ("{ ", " }") };

        self.open(start, multiline);
        for (index, (name, value)) in entries.iter().enumerate() {
            let last = index + 1 == entries.len();
            self.visit_property(name, value, nav, !last, multiline)?;
        }
        self.close(end, multiline)
    }

    fn visit_array(&mut self, items: &[Value], multiline: bool) -> Result<(), EmitError> {
        if items.is_empty() {
            self.writer.write(TokenKind::Punctuation, "[]");
            return Ok(());
        }
        let (start, end) = if multiline { ("[", "]") } else { ("[ ", " ]") };

        self.open(start, multiline);
        for (index, item) in items.iter().enumerate() {
            if index > 0 {
                self.separator(multiline);
            }
            self.path.push(index.to_string());
            self.visit(item, None)?;
            self.path.pop();
        }
        self.close(end, multiline)
    }

    fn visit_property(
        &mut self,
        name: &str,
        value: &Value,
        nav: Option<NavIndex>,
        separated: bool,
        multiline: bool,
    ) -> Result<(), EmitError> {
        self.path.push(name.to_string());
        let id = self.property_id();
        let collapsible = self.is_collapsible(nav, value);

        self.writer.write(TokenKind::Punctuation, "\"");
        let kind = if collapsible {
            TokenKind::TypeName
        } else {
            TokenKind::MemberName
        };
        self.writer.write(kind, name);
        self.writer.annotate_definition(&id);
        if self.registry.register(&id) == Registration::Duplicate {
            self.diagnostics.warn(&id, format!("duplicate definition id `{id}`"));
        }
        if collapsible {
            self.writer.fold_heading(&id);
        }
        let child = self.navigation_child(nav, name, value, &id);
        self.writer.write(TokenKind::Punctuation, "\"");
        self.writer.punctuation(":", Spacing::Trailing);

        if let Some(table) = self.operation_parameter_table(nav, name, value, &id) {
            self.writer.newline();
            self.writer.table(&table)?;
            if separated {
                self.separator(multiline);
            }
        } else if collapsible {
            self.writer.newline();
            self.writer.marker(TokenKind::FoldableSectionContentStart);
            self.visit(value, child)?;
            if separated {
                self.separator(multiline);
            }
            self.writer.marker(TokenKind::FoldableSectionContentEnd);
        } else {
            self.visit(value, child)?;
            if separated {
                self.separator(multiline);
            }
        }

        if name == "$ref"
            && let Value::String(reference) = value
        {
            self.link_reference(reference);
        }
        self.path.pop();
        Ok(())
    }

    fn open(&mut self, start: &str, multiline: bool) {
        self.writer.write(TokenKind::Punctuation, start);
        if multiline {
            self.writer.newline();
        }
        self.writer.push_scope();
    }

    fn close(&mut self, end: &str, multiline: bool) -> Result<(), EmitError> {
        self.writer.pop_scope()?;
        if multiline {
            self.writer.newline();
        }
        self.writer.write(TokenKind::Punctuation, end);
        Ok(())
    }

    fn separator(&mut self, multiline: bool) {
        self.writer.write(TokenKind::Punctuation, ",");
        if multiline {
            self.writer.newline();
        } else {
            self.writer.whitespace(1);
        }
    }

    fn ordered_entries<'v>(
        &self,
        map: &'v Map<String, Value>,
        nav: Option<NavIndex>,
    ) -> Vec<(&'v String, &'v Value)> {
        let mut entries: Vec<_> = map.iter().collect();
        match nav {
            Some(index) if self.nav.is_root(index) => {}
            Some(index) if self.nav.is_path(index) => entries.sort_by(|a, b| {
                compare_operation_keys(operation_name(a.0, a.1), operation_name(b.0, b.1))
            }),
            _ => entries.sort_by(|a, b| a.0.cmp(b.0)),
        }
        entries
    }

    fn is_collapsible(&self, nav: Option<NavIndex>, value: &Value) -> bool {
        let Some(nav) = nav else {
            return false;
        };
        if order::is_scalar(value) {
            return false;
        }
        let text = self.nav.text(nav);
        is_paths_collection(text)
            || matches!(
                text,
                "definitions" | "parameters" | "securityDefinitions" | "responses"
            )
            || self.nav.is_path(nav)
    }

    fn navigation_child(
        &mut self,
        nav: Option<NavIndex>,
        name: &str,
        value: &Value,
        id: &str,
    ) -> Option<NavIndex> {
        let nav = nav?;
        let under_operation = self.nav.parent(nav).is_some_and(|p| self.nav.is_path(p))
            && matches!(name, "responses" | "parameters");
        if !self.nav.has_navigable_children(nav) && !under_operation {
            return None;
        }
        let text = if self.nav.is_path(nav) {
            operation_name(name, value)
        } else {
            name
        };
        Some(self.nav.add(nav, text, id))
    }

    fn operation_parameter_table(
        &self,
        nav: Option<NavIndex>,
        name: &str,
        value: &Value,
        id: &str,
    ) -> Option<Table> {
        let nav = nav?;
        let operation_parameters = name == "parameters"
            && self.nav.parent(nav).is_some_and(|p| self.nav.is_path(p));
        if !self.config.parameter_tables || !operation_parameters {
            return None;
        }
        tables::parameter_table(id, value, |reference| self.reference_id(reference))
    }

    fn property_id(&self) -> String {
        let path = self.path.join("-");
        normalize_id(&format!("{}{}", self.id_prefix, path.trim_start_matches('#')))
    }

    /// ID of the property a local `$ref` points at.
    fn reference_id(&self, reference: &str) -> Option<String> {
        if !reference.starts_with("#/") {
            return None;
        }
        let path = reference.trim_start_matches('#').replace('/', "-");
        Some(normalize_id(&format!("{}{path}", self.id_prefix)))
    }

    fn link_reference(&mut self, reference: &str) {
        match self.reference_id(reference) {
            Some(target) => self.writer.annotate_link(&target, TokenKind::StringLiteral),
            None => self.diagnostics.push(Diagnostic::info(
                self.property_id(),
                format!("external reference `{reference}` is not linked"),
            )),
        }
    }
}

/// Operations are listed by operation ID when they have one.
fn operation_name<'v>(key: &'v str, value: &'v Value) -> &'v str {
    value
        .get("operationId")
        .and_then(Value::as_str)
        .unwrap_or(key)
}
