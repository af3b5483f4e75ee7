use crate::docparse::ParsedDoc;
use crate::signature::ParameterSpec;
use crate::typemap::{self, JsonType};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// The generator's sole output artifact, shaped for a tool-calling API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSchema {
    pub name: String,
    pub description: String,
    pub input_schema: InputSchema,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputSchema {
    #[serde(rename = "type")]
    pub schema_type: String,
    // Keeps parameter declaration order (serde_json preserve_order).
    pub properties: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertySchema {
    #[serde(rename = "type")]
    pub schema_type: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Value>,
    #[serde(
        rename = "additionalProperties",
        skip_serializing_if = "Option::is_none"
    )]
    pub additional_properties: Option<bool>,
}

impl From<PropertySchema> for Value {
    fn from(property: PropertySchema) -> Value {
        let mut map = Map::new();
        map.insert("type".to_string(), json!(property.schema_type));
        map.insert("description".to_string(), json!(property.description));
        if let Some(items) = property.items {
            map.insert("items".to_string(), items);
        }
        if let Some(additional) = property.additional_properties {
            map.insert("additionalProperties".to_string(), json!(additional));
        }
        Value::Object(map)
    }
}

pub fn assemble(name: &str, doc: &ParsedDoc, params: &[ParameterSpec]) -> ToolSchema {
    let mut properties = Map::new();
    let mut required = Vec::new();

    for param in params {
        let json_type = typemap::map_annotation(&param.annotation);
        let description = doc
            .params
            .get(&param.name)
            .cloned()
            .unwrap_or_else(|| format!("Parameter {}", param.name));
        let property = PropertySchema {
            schema_type: json_type.as_str().to_string(),
            description,
            // Element types are not inspected; arrays default to string items.
            items: matches!(json_type, JsonType::Array).then(|| json!({"type": "string"})),
            additional_properties: matches!(json_type, JsonType::Object).then_some(true),
        };
        properties.insert(param.name.clone(), property.into());
        if !param.has_default {
            required.push(param.name.clone());
        }
    }

    let description = if doc.description.is_empty() {
        format!("Function {name}")
    } else {
        doc.description.clone()
    };

    ToolSchema {
        name: name.to_string(),
        description,
        input_schema: InputSchema {
            schema_type: "object".to_string(),
            properties,
            required,
        },
    }
}

/// Structural conformance check, not a full JSON Schema validator: it does
/// not verify that `type` values are within the recognized enum or that
/// `required` entries exist in `properties`. Never fails; reports a bool.
pub fn validate(schema: &Value) -> bool {
    let Some(top) = schema.as_object() else {
        return false;
    };
    if !top.contains_key("name") || !top.contains_key("description") {
        return false;
    }
    let Some(input_schema) = top.get("input_schema").and_then(Value::as_object) else {
        return false;
    };
    if input_schema.get("type").and_then(Value::as_str) != Some("object") {
        return false;
    }
    let Some(properties) = input_schema.get("properties").and_then(Value::as_object) else {
        return false;
    };
    properties.values().all(|property| {
        property
            .as_object()
            .is_some_and(|p| p.contains_key("type") && p.contains_key("description"))
    })
}
