use serde_json::Value;

/// Field-level validation messages returned with a 400 response
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<(String, Vec<String>)>);

impl FieldErrors {
    /// Parse a DRF error body: an object of field name to message list.
    ///
    /// Returns `None` when the body is not an object or carries no messages.
    pub fn from_body(body: &Value) -> Option<Self> {
        let Value::Object(fields) = body else {
            return None;
        };
        let errors: Vec<(String, Vec<String>)> = fields
            .iter()
            .map(|(field, messages)| (field.clone(), flatten_messages(messages)))
            .filter(|(_, messages)| !messages.is_empty())
            .collect();
        if errors.is_empty() {
            None
        } else {
            Some(Self(errors))
        }
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, messages)| messages.as_slice())
    }

    /// Every message in field order, joined into one line
    pub fn joined(&self) -> String {
        self.0
            .iter()
            .flat_map(|(_, messages)| messages.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

fn flatten_messages(value: &Value) -> Vec<String> {
    match value {
        Value::Null => Vec::new(),
        Value::String(s) => vec![s.clone()],
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect(),
        other => vec![other.to_string()],
    }
}

/// Failure talking to the backend API
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Transport(String),
    #[error("Not authenticated")]
    Unauthorized,
    #[error("{}", .0.joined())]
    Validation(FieldErrors),
    #[error("API error ({status}): {message}")]
    Status { status: u16, message: String },
    #[error("Failed to decode response: {0}")]
    Decode(String),
}
