use crate::docparse;
use crate::pysrc::{self, FunctionDef};
use crate::schema::{self, ToolSchema};
use crate::signature::{self, FunctionDecl};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("no function definition found in source")]
    NoFunctionFound,
    #[error("function `{name}` not found (available: {available})")]
    FunctionNotFound { name: String, available: String },
}

/// Generate a schema for the first function defined in `source`.
pub fn generate_from_source(source: &str) -> Result<ToolSchema, GenerateError> {
    let defs = pysrc::parse_module(source);
    let def = defs.first().ok_or(GenerateError::NoFunctionFound)?;
    Ok(generate_from_def(def))
}

/// Generate a schema for the named function in `source`.
pub fn generate_for_function(source: &str, name: &str) -> Result<ToolSchema, GenerateError> {
    let defs = pysrc::parse_module(source);
    if defs.is_empty() {
        return Err(GenerateError::NoFunctionFound);
    }
    match defs.iter().find(|def| def.name == name) {
        Some(def) => Ok(generate_from_def(def)),
        None => Err(GenerateError::FunctionNotFound {
            name: name.to_string(),
            available: defs
                .iter()
                .map(|def| def.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        }),
    }
}

/// Generate a schema from a runtime declaration. When the declaration
/// carries source text the source path is preferred; if that text fails to
/// parse, the declared parameter list is used instead, so this entry point
/// never fails.
pub fn generate_from_decl(decl: &FunctionDecl) -> ToolSchema {
    if let Some(source) = &decl.source
        && let Ok(schema) = generate_from_source(source)
    {
        return schema;
    }
    let doc = docparse::parse(decl.doc.as_deref());
    let params = signature::from_decl(decl);
    schema::assemble(&decl.name, &doc, &params)
}

fn generate_from_def(def: &FunctionDef) -> ToolSchema {
    let doc = docparse::parse(def.docstring.as_deref());
    let params = signature::from_source(def);
    schema::assemble(&def.name, &doc, &params)
}
