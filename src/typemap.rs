use crate::annotation::{Annotation, Container, Primitive};

/// The JSON Schema primitive types a parameter can map to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonType {
    String,
    Number,
    Boolean,
    Array,
    Object,
}

impl JsonType {
    pub fn as_str(self) -> &'static str {
        match self {
            JsonType::String => "string",
            JsonType::Number => "number",
            JsonType::Boolean => "boolean",
            JsonType::Array => "array",
            JsonType::Object => "object",
        }
    }
}

/// Total mapping from annotation to JSON Schema type. Anything
/// unrecognized falls back to `"string"` rather than failing; optionality
/// is not modeled here (it only affects the `required` list).
pub fn map_annotation(annotation: &Annotation) -> JsonType {
    match annotation {
        Annotation::Missing => JsonType::String,
        Annotation::Primitive(Primitive::Str) => JsonType::String,
        Annotation::Primitive(Primitive::Int | Primitive::Float) => JsonType::Number,
        Annotation::Primitive(Primitive::Bool) => JsonType::Boolean,
        Annotation::Container(Container::List) => JsonType::Array,
        Annotation::Container(Container::Dict) => JsonType::Object,
        Annotation::Optional(inner) => map_annotation(inner),
        Annotation::Union(members) => map_union(members),
        Annotation::Named(name) => map_named(name),
    }
}

// A two-member union with a null member is Optional in disguise; any other
// union is ambiguous and maps to "string".
fn map_union(members: &[Annotation]) -> JsonType {
    if members.len() == 2
        && members.iter().any(Annotation::is_none_type)
        && let Some(other) = members.iter().find(|member| !member.is_none_type())
    {
        return map_annotation(other);
    }
    JsonType::String
}

fn map_named(name: &str) -> JsonType {
    match name {
        "str" | "Any" => JsonType::String,
        "int" | "float" => JsonType::Number,
        "bool" => JsonType::Boolean,
        "list" | "List" => JsonType::Array,
        "dict" | "Dict" => JsonType::Object,
        _ => JsonType::String,
    }
}
