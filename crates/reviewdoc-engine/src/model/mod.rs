//! # Document Model
//!
//! Passive data structures shared by both emission styles.
//!
//! ## Modules
//!
//! - **`token`**: `Token` and the closed `TokenKind` enumeration
//! - **`line`**: `Line`, the nested line tree and its text rendering
//! - **`navigation`**: `NavigationNode` for the sidebar
//! - **`diagnostic`**: recoverable problems attached to a document
//! - **`document`**: `ReviewDocument`, the assembled output
//!
//! ## Key Invariants
//!
//! - Lines own their children; the tree has no shared nodes and no cycles
//! - A line with no tokens and no children is a blank separator
//! - Token kind numbers never change once assigned

pub mod diagnostic;
pub mod document;
pub mod line;
pub mod navigation;
pub mod token;

pub use diagnostic::{Diagnostic, DiagnosticLevel, Diagnostics};
pub use document::{DocumentBody, DocumentInfo, ReviewDocument};
pub use line::{Line, render_lines};
pub use navigation::{NavigationNode, sort_nodes};
pub use token::{Token, TokenKind, UnknownTokenKind, render_tokens};
