//! Reader and writer for Xcode `project.pbxproj` files.
//!
//! Project descriptors use the OpenStep ASCII property-list syntax. The
//! parser keeps the byte span of every value so callers can splice new
//! text into the original file instead of re-serializing it, which keeps
//! every untouched byte intact.

mod edit;
mod error;
mod lexer;
mod parser;
mod value;
mod writer;

pub use edit::{line_indent, line_start, PatchError, TextPatch};
pub use error::ParseError;
pub use parser::{contains_comma, is_trivia, parse};
pub use value::{DictEntry, Node, NodeKind, Span, Value};
pub use writer::{indent, needs_quotes, quote, write_value};
