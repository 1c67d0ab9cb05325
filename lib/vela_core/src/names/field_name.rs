use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Clone, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldName(pub String);

impl std::fmt::Display for FieldName {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub fn field_name(s: impl Into<String>) -> FieldName {
    FieldName(s.into())
}

impl From<&str> for FieldName {
    fn from(s: &str) -> FieldName {
        field_name(s)
    }
}
