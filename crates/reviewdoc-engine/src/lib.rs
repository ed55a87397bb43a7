pub mod declarations;
pub mod emit;
pub mod error;
pub mod model;
pub mod navigation;
pub mod registry;
pub mod resolve;
pub mod schema;

// Re-export key types for easier usage
pub use declarations::*;
pub use emit::{Emitted, LineMarkerOptions, ReviewBuilder, Spacing, Table, TokenWriter};
pub use error::EmitError;
pub use model::{
    Diagnostic, DiagnosticLevel, Diagnostics, DocumentBody, DocumentInfo, Line, NavigationNode,
    ReviewDocument, Token, TokenKind,
};
pub use navigation::{build_navigation, build_package_navigation};
pub use registry::{DefinitionRegistry, Registration, normalize_id};
pub use resolve::{DependencyIndex, Resolution, Resolver, UNRESOLVED};
pub use schema::generate_listing;
