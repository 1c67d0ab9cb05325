use super::method_name::{method_fullname, MethodFirstname, MethodFullname};
use serde::{Deserialize, Serialize};

/// Name of the implicit root class. Every class without an explicit
/// superclass extends this one.
pub const ROOT_CLASS: &str = "AnyRef";

#[derive(Debug, PartialEq, Clone, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassName(pub String);

impl std::fmt::Display for ClassName {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub fn class_name(s: impl Into<String>) -> ClassName {
    let name = s.into();
    debug_assert!(!name.is_empty());
    debug_assert!(!name.contains('#'));
    ClassName(name)
}

impl ClassName {
    /// The class `AnyRef`
    pub fn root() -> ClassName {
        class_name(ROOT_CLASS)
    }

    pub fn is_root(&self) -> bool {
        self.0 == ROOT_CLASS
    }

    pub fn method_fullname(&self, method_firstname: &MethodFirstname) -> MethodFullname {
        method_fullname(self, &method_firstname.0)
    }
}

impl From<&str> for ClassName {
    fn from(s: &str) -> ClassName {
        class_name(s)
    }
}
