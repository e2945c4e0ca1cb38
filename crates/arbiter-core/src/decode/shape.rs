use serde_json::{json, Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    TextList,
}

impl FieldKind {
    fn schema(&self) -> Value {
        match self {
            Self::Text => json!({ "type": "string" }),
            Self::TextList => json!({ "type": "array", "items": { "type": "string" } }),
        }
    }

    fn describe(&self) -> &'static str {
        match self {
            Self::Text => "string",
            Self::TextList => "string[]",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: String,
    pub kind: FieldKind,
    /// Rendered in place of the bare type when describing the shape to the model.
    pub hint: Option<String>,
}

/// Descriptor of the JSON object a judge expects back from the model.
///
/// Every declared field is required. Fields the shape does not declare are tolerated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseShape {
    name: String,
    fields: Vec<FieldSpec>,
}

impl ResponseShape {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.fields.push(FieldSpec {
            name: name.into(),
            kind,
            hint: None,
        });
        self
    }

    pub fn hinted_field(
        mut self,
        name: impl Into<String>,
        kind: FieldKind,
        hint: impl Into<String>,
    ) -> Self {
        self.fields.push(FieldSpec {
            name: name.into(),
            kind,
            hint: Some(hint.into()),
        });
        self
    }

    /// `{missing: string[], verdict: "Complete" | "Incomplete"}`
    pub fn verdict() -> Self {
        Self::new("verdict")
            .field("missing", FieldKind::TextList)
            .hinted_field("verdict", FieldKind::Text, r#""Complete" | "Incomplete""#)
    }

    /// `{reason: string}`
    pub fn reason() -> Self {
        Self::new("reason").field("reason", FieldKind::Text)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.name == name)
    }

    pub fn json_schema(&self) -> Value {
        let mut properties = Map::new();
        for f in &self.fields {
            properties.insert(f.name.clone(), f.kind.schema());
        }
        let required: Vec<&str> = self.fields.iter().map(|f| f.name.as_str()).collect();
        json!({
            "$schema": "https://json-schema.org/draft/2020-12/schema",
            "title": self.name,
            "type": "object",
            "required": required,
            "properties": properties,
        })
    }

    /// Compact one-line description used inside prompts, e.g. `{"reason": string}`.
    pub fn describe(&self) -> String {
        let parts: Vec<String> = self
            .fields
            .iter()
            .map(|f| {
                let ty = f.hint.as_deref().unwrap_or_else(|| f.kind.describe());
                format!("\"{}\": {}", f.name, ty)
            })
            .collect();
        format!("{{{}}}", parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verdict_shape_describes_labels() {
        assert_eq!(
            ResponseShape::verdict().describe(),
            r#"{"missing": string[], "verdict": "Complete" | "Incomplete"}"#
        );
        assert_eq!(ResponseShape::reason().describe(), r#"{"reason": string}"#);
    }

    #[test]
    fn schema_requires_every_field() {
        let schema = ResponseShape::verdict().json_schema();
        assert_eq!(schema["required"], json!(["missing", "verdict"]));
        assert_eq!(schema["properties"]["missing"]["items"]["type"], "string");
    }
}
