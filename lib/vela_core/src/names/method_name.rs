use super::class_name::ClassName;
use serde::{Deserialize, Serialize};

/// Method name without the class, eg. `area`
#[derive(Debug, PartialEq, Clone, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MethodFirstname(pub String);

impl std::fmt::Display for MethodFirstname {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub fn method_firstname(s: impl Into<String>) -> MethodFirstname {
    MethodFirstname(s.into())
}

impl From<&str> for MethodFirstname {
    fn from(s: &str) -> MethodFirstname {
        method_firstname(s)
    }
}

/// Method name qualified with the class which declares it, eg. `Circle#area`.
/// This is the identity of a method body.
#[derive(Debug, PartialEq, Clone, Eq, Hash, Serialize, Deserialize)]
pub struct MethodFullname {
    pub full_name: String,
    pub class_name: ClassName,
    pub first_name: MethodFirstname,
}

pub fn method_fullname(class_name: &ClassName, first_name_: impl Into<String>) -> MethodFullname {
    let first_name = first_name_.into();
    debug_assert!(!first_name.is_empty());
    MethodFullname {
        full_name: class_name.0.clone() + "#" + &first_name,
        class_name: class_name.clone(),
        first_name: MethodFirstname(first_name),
    }
}

impl std::fmt::Display for MethodFullname {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.full_name)
    }
}
