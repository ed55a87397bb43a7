//! # Emission
//!
//! The calls front ends make while walking their syntax trees.
//!
//! ## Modules
//!
//! - **`builder`**: `ReviewBuilder`, the nested line-tree style where spacing is
//!   token metadata and indentation is line nesting
//! - **`writer`**: `TokenWriter`, the flat style where whitespace, newlines and
//!   region boundaries are tokens
//! - **`table`**: pre-aggregated tables for the flat style
//! - **`spacing`**: spacing and line-marker options shared by both styles
//!
//! ## Key Invariants
//!
//! - `blank_lines(n)` leaves exactly `n` blank lines, however often it is called
//! - Scopes opened by a closure are closed when it returns
//! - An indented block never ends with a blank line

pub mod builder;
pub mod spacing;
pub mod table;
pub mod writer;

pub use builder::{Emitted, ReviewBuilder};
pub use spacing::{LineMarkerOptions, Spacing};
pub use table::Table;
pub use writer::TokenWriter;
