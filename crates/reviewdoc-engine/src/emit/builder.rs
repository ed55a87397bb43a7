use reviewdoc_config::EmitConfig;

use super::spacing::{LineMarkerOptions, Spacing};
use crate::declarations::DeclRef;
use crate::model::{
    Diagnostic, Diagnostics, DocumentBody, DocumentInfo, Line, NavigationNode, ReviewDocument,
    Token, TokenKind, render_lines,
};
use crate::registry::{DefinitionRegistry, Registration};
use crate::resolve::{DependencyIndex, Resolution, Resolver};

const COMMENT_PREFIX: &str = "\\\\ ";
const MULTILINE_QUOTE: &str = "\"\"\"";

/// Builds the nested line tree for one document.
///
/// The builder owns a cursor line that tokens are appended to. `newline`
/// moves the cursor line into the current scope, and `indent` makes the last
/// finished line the parent of everything emitted inside its body. The scope
/// stack is a path of child indices from the document root, so the tree stays
/// singly owned while it is being built.
pub struct ReviewBuilder {
    lines: Vec<Line>,
    current: Line,
    scope: Vec<usize>,
    registry: DefinitionRegistry,
    diagnostics: Diagnostics,
    dependencies: Option<DependencyIndex>,
    indent_width: usize,
    parser_version: String,
    deprecated_depth: usize,
    skip_diff_depth: usize,
}

impl Default for ReviewBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReviewBuilder {
    pub fn new() -> Self {
        Self::with_config(&EmitConfig::default())
    }

    pub fn with_config(config: &EmitConfig) -> Self {
        Self {
            lines: Vec::new(),
            current: Line::new(),
            scope: Vec::new(),
            registry: DefinitionRegistry::new(),
            diagnostics: Diagnostics::new(),
            dependencies: None,
            indent_width: config.indent_width,
            parser_version: config.parser_version.clone(),
            deprecated_depth: 0,
            skip_diff_depth: 0,
        }
    }

    /// Lets type references fall back to IDs from already processed packages.
    pub fn with_dependencies(mut self, dependencies: DependencyIndex) -> Self {
        self.dependencies = Some(dependencies);
        self
    }

    pub fn registry(&self) -> &DefinitionRegistry {
        &self.registry
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Number of open indentation scopes.
    pub fn depth(&self) -> usize {
        self.scope.len()
    }

    pub fn token(&mut self, mut token: Token) {
        self.decorate(&mut token);
        if self.current.line_id.is_none()
            && let Some(id) = &token.definition_id
        {
            self.current.line_id = Some(id.clone());
        }
        self.current.tokens.push(token);
    }

    pub fn text(&mut self, value: &str, definition_id: Option<&str>) {
        let mut token = Token::new(TokenKind::Text, value);
        if let Some(id) = definition_id {
            self.declare(id);
            token.definition_id = Some(id.to_string());
        }
        self.token(token);
    }

    pub fn keyword(&mut self, value: &str, spacing: Spacing) {
        self.spaced(TokenKind::Keyword, value, spacing);
    }

    pub fn punctuation(&mut self, value: &str, spacing: Spacing) {
        if value == "}" {
            if spacing == Spacing::TrimLeft {
                self.trim_trailing_space();
            }
            let mut token = Token::new(TokenKind::Punctuation, value);
            spacing.apply(&mut token);
            self.close_brace(token);
            return;
        }
        self.spaced(TokenKind::Punctuation, value, spacing);
    }

    pub fn literal(&mut self, value: &str) {
        self.token(Token::new(TokenKind::Literal, value));
    }

    /// Emits a quoted string literal. Values spanning several lines render as a
    /// triple-quoted block with one literal per line.
    pub fn string_literal(&mut self, value: &str) {
        if !value.contains('\n') {
            self.token(Token::new(TokenKind::StringLiteral, format!("\"{value}\"")));
            return;
        }

        self.punctuation(MULTILINE_QUOTE, Spacing::None);
        self.newline();
        for line in value.lines() {
            if line.is_empty() {
                self.scope_lines_mut().push(Line::new());
                continue;
            }
            self.literal(line);
            self.newline();
        }
        self.punctuation(MULTILINE_QUOTE, Spacing::None);
    }

    pub fn comment(&mut self, text: &str) {
        let value = if text.starts_with('\\') {
            text.to_string()
        } else {
            format!("{COMMENT_PREFIX}{text}")
        };
        self.token(Token::new(TokenKind::Comment, value));
    }

    pub fn member(&mut self, name: &str, definition_id: Option<&str>) {
        let mut token = Token::new(TokenKind::MemberName, name);
        if let Some(id) = definition_id {
            self.declare(id);
            token.definition_id = Some(id.to_string());
        }
        self.token(token);
    }

    /// Emits a declared type name that links to itself and marks its line.
    ///
    /// Without an ID the name is emitted unlinked and a warning is recorded.
    pub fn type_declaration(&mut self, name: &str, definition_id: Option<&str>) {
        let Some(id) = definition_id else {
            let target = self.diagnostic_target();
            self.diagnostics.warn(
                target,
                format!("type declaration `{name}` has no definition id and is not linkable"),
            );
            self.token(Token::new(TokenKind::TypeName, name));
            return;
        };

        self.declare(id);
        self.line_marker(Some(id), LineMarkerOptions::cross_language());
        self.token(
            Token::new(TokenKind::TypeName, name)
                .with_definition_id(id)
                .with_navigate_to(id),
        );
    }

    /// Emits the extended type of an extension declaration.
    ///
    /// Extensions of one type share `definition_id`; only the first one marks
    /// its line so line IDs stay unique.
    pub fn extension_declaration(
        &mut self,
        name: &str,
        definition_id: &str,
        parent: Option<DeclRef<'_>>,
    ) {
        match self.registry.register_extension(definition_id) {
            Registration::Inserted => {
                self.line_marker(Some(definition_id), LineMarkerOptions::default())
            }
            Registration::Merged => {}
            Registration::Duplicate => self.diagnostics.warn(
                definition_id,
                format!("extension id `{definition_id}` is already used by another declaration"),
            ),
        }
        self.type_reference(name, parent);
    }

    /// Emits a type name linked to the best matching definition.
    pub fn type_reference(&mut self, name: &str, parent: Option<DeclRef<'_>>) {
        let resolution = {
            let mut resolver = Resolver::new(&self.registry);
            if let Some(dependencies) = &self.dependencies {
                resolver = resolver.with_dependencies(dependencies);
            }
            resolver.resolve(name, parent)
        };

        match &resolution {
            Resolution::Ambiguous { chosen, candidates } => {
                let target = self.diagnostic_target();
                self.diagnostics.warn(
                    target,
                    format!(
                        "ambiguous reference `{name}` matches {} definitions, linked to `{chosen}`",
                        candidates.len()
                    ),
                );
            }
            Resolution::Unresolved => log::debug!("no definition found for `{name}`"),
            Resolution::Resolved(_) => {}
        }

        self.token(Token::new(TokenKind::TypeName, name).with_navigate_to(resolution.target()));
    }

    /// Emits a node the front end could not handle as raw text and records a warning.
    pub fn unsupported(&mut self, raw: &str, description: &str) {
        let target = self.diagnostic_target();
        self.diagnostics.warn(
            target,
            format!("unsupported {description}, rendered as raw text"),
        );
        self.token(Token::new(TokenKind::Text, raw));
    }

    /// Builds and registers `prefix.name`, warning when the ID is already taken.
    pub fn build_id(&mut self, name: &str, prefix: Option<&str>) -> String {
        let (id, outcome) = self.registry.build_id(name, prefix);
        if outcome == Registration::Duplicate {
            self.diagnostics
                .warn(id.as_str(), format!("duplicate definition id `{id}`"));
        }
        id
    }

    pub fn diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Ends the cursor line. Repeated calls without tokens in between do nothing.
    pub fn newline(&mut self) {
        if self.current.tokens.is_empty() {
            return;
        }

        let tokens = &mut self.current.tokens;
        let whitespace_only = tokens.iter().all(Token::is_whitespace);
        if !whitespace_only && tokens.last().is_some_and(Token::is_whitespace) {
            tokens.pop();
        }
        if let Some(first) = tokens.first_mut() {
            first.has_prefix_space = false;
        }
        if let Some(last) = tokens.last_mut() {
            last.has_suffix_space = false;
        }

        let line = std::mem::take(&mut self.current);
        self.scope_lines_mut().push(line);
    }

    /// Leaves exactly `count` blank lines before the cursor in the current scope.
    pub fn blank_lines(&mut self, count: usize) {
        self.newline();
        let lines = self.scope_lines_mut();
        let existing = lines.iter().rev().take_while(|line| line.is_blank()).count();
        if existing > count {
            lines.truncate(lines.len() - (existing - count));
        } else {
            lines.extend((existing..count).map(|_| Line::new()));
        }
    }

    /// Runs `body` one level deeper and restores the scope afterwards, whatever
    /// `body` returns.
    ///
    /// Lines emitted by `body` become children of the line just finished (or of
    /// the cursor line, which is finished first). Trailing blank lines inside the
    /// block are dropped.
    pub fn indent<T>(&mut self, body: impl FnOnce(&mut Self) -> T) -> T {
        self.open_scope();
        let result = body(self);
        self.close_scope();
        result
    }

    /// Sets the cursor line's ID. Without an ID the line takes the ID of the
    /// nearest enclosing line that has one.
    pub fn line_marker(&mut self, id: Option<&str>, options: LineMarkerOptions) {
        let id = match id {
            Some(id) => Some(id.to_string()),
            None => self.context_line_id(),
        };
        if let Some(id) = id {
            if options.add_cross_language_id {
                self.current.cross_language_id = Some(id.clone());
            }
            self.current.line_id = Some(id);
        }
        if let Some(related) = options.related_line_id {
            self.current.related_to_line = Some(related);
        }
    }

    /// Hides the cursor line from the default rendering.
    pub fn hide_line(&mut self) {
        self.current.is_hidden = true;
    }

    /// Flags every token emitted by `body` as deprecated.
    pub fn deprecated<T>(&mut self, body: impl FnOnce(&mut Self) -> T) -> T {
        self.deprecated_depth += 1;
        let result = body(self);
        self.deprecated_depth -= 1;
        result
    }

    /// Flags every token emitted by `body` to be ignored when diffing revisions.
    pub fn skip_diff<T>(&mut self, body: impl FnOnce(&mut Self) -> T) -> T {
        self.skip_diff_depth += 1;
        let result = body(self);
        self.skip_diff_depth -= 1;
        result
    }

    pub fn finish(mut self) -> Emitted {
        self.newline();
        log::debug!(
            "emitted {} top-level line(s), {} definition(s), {} diagnostic(s)",
            self.lines.len(),
            self.registry.len(),
            self.diagnostics.len()
        );
        Emitted {
            lines: self.lines,
            registry: self.registry,
            diagnostics: self.diagnostics.into_vec(),
            indent_width: self.indent_width,
            parser_version: self.parser_version,
        }
    }

    fn spaced(&mut self, kind: TokenKind, value: &str, spacing: Spacing) {
        if spacing == Spacing::TrimLeft {
            self.trim_trailing_space();
        }
        let mut token = Token::new(kind, value);
        spacing.apply(&mut token);
        self.token(token);
    }

    fn declare(&mut self, id: &str) {
        if self.registry.declare(id) == Registration::Duplicate {
            self.diagnostics
                .warn(id, format!("duplicate definition id `{id}`"));
        }
    }

    fn decorate(&self, token: &mut Token) {
        if self.deprecated_depth > 0 {
            token.is_deprecated = true;
        }
        if self.skip_diff_depth > 0 {
            token.skip_diff = true;
        }
    }

    fn trim_trailing_space(&mut self) {
        let tokens = &mut self.current.tokens;
        while tokens.last().is_some_and(Token::is_whitespace) {
            tokens.pop();
        }
        if let Some(last) = tokens.last_mut() {
            last.has_suffix_space = false;
        }
    }

    fn close_brace(&mut self, mut token: Token) {
        if self.current.tokens.is_empty() {
            self.decorate(&mut token);
            if let Some(last) = self.scope_lines_mut().last_mut()
                && last.children.is_empty()
                && last.ends_with_punctuation("{")
            {
                if let Some(open) = last.tokens.last_mut() {
                    open.has_suffix_space = false;
                }
                token.has_prefix_space = false;
                last.tokens.push(token);
                return;
            }
            self.current.is_context_end_line = true;
        }
        self.token(token);
    }

    fn open_scope(&mut self) {
        self.newline();
        let adopt_last = self
            .scope_lines_mut()
            .last()
            .is_some_and(|line| !line.is_blank());
        if !adopt_last {
            let parent = std::mem::take(&mut self.current);
            self.scope_lines_mut().push(parent);
        }
        let index = self.scope_lines_mut().len() - 1;
        self.scope.push(index);
    }

    fn close_scope(&mut self) {
        self.newline();
        let lines = self.scope_lines_mut();
        while lines.last().is_some_and(Line::is_blank) {
            lines.pop();
        }
        self.scope.pop();
    }

    fn scope_lines_mut(&mut self) -> &mut Vec<Line> {
        let mut lines = &mut self.lines;
        for &index in &self.scope {
            lines = &mut lines[index].children;
        }
        lines
    }

    fn context_line_id(&self) -> Option<String> {
        let mut lines = &self.lines;
        let mut context = None;
        for &index in &self.scope {
            let line = &lines[index];
            if line.line_id.is_some() {
                context = line.line_id.clone();
            }
            lines = &line.children;
        }
        context
    }

    fn diagnostic_target(&self) -> String {
        self.current
            .line_id
            .clone()
            .or_else(|| self.context_line_id())
            .unwrap_or_default()
    }
}

/// The result of a finished line-tree build.
#[derive(Debug)]
pub struct Emitted {
    pub lines: Vec<Line>,
    pub registry: DefinitionRegistry,
    pub diagnostics: Vec<Diagnostic>,
    pub indent_width: usize,
    pub parser_version: String,
}

impl Emitted {
    pub fn render(&self) -> String {
        render_lines(&self.lines, self.indent_width)
    }

    /// Assembles the document. `info` keeps its parser version when it has one.
    pub fn into_document(
        self,
        mut info: DocumentInfo,
        navigation: Vec<NavigationNode>,
    ) -> ReviewDocument {
        if info.parser_version.is_empty() {
            info.parser_version = self.parser_version;
        }
        ReviewDocument::new(info, DocumentBody::ReviewLines(self.lines))
            .with_navigation(navigation)
            .with_diagnostics(self.diagnostics)
    }
}
