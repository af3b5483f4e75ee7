//! Tool-use JSON schema generation from Python function definitions.
//!
//! Two entry paths converge on the same pipeline: parse a `def` header out
//! of source text ([`generator::generate_from_source`]) or describe the
//! function as a value ([`generator::generate_from_decl`]). Either way the
//! docstring is parsed for descriptions, annotations are mapped to JSON
//! Schema primitive types, and the result is assembled into a
//! [`schema::ToolSchema`].

pub mod annotation;
pub mod chat;
pub mod docparse;
pub mod generator;
pub mod pysrc;
pub mod schema;
pub mod signature;
pub mod typemap;
