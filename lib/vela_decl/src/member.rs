use crate::literal::Literal;
use crate::signature::MethodSignature;
use serde::{Deserialize, Serialize};
use vela_core::names::*;
use vela_core::ty::Ty;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Serialize, Deserialize)]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    /// Private methods are not virtual
    Private,
}

/// How the initial value of a field is made
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub enum FieldInit {
    /// Copy the constructor parameter of this name
    Param(String),
    /// A constant default
    Const(Literal),
    /// Call the initializer registered under `Class#name`. It can read the
    /// fields initialized before this one.
    Computed(MethodFirstname),
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct FieldDecl {
    pub name: FieldName,
    pub ty: Ty,
    pub init: FieldInit,
    #[serde(default)]
    pub mutable: bool,
    #[serde(default)]
    pub visibility: Visibility,
}

impl FieldDecl {
    pub fn new(name: impl Into<String>, ty: Ty, init: FieldInit) -> FieldDecl {
        FieldDecl {
            name: field_name(name),
            ty,
            init,
            mutable: false,
            visibility: Visibility::Public,
        }
    }

    /// A field backed by the constructor parameter of the same name
    pub fn param(name: impl Into<String>, ty: Ty) -> FieldDecl {
        let name = name.into();
        FieldDecl::new(name.clone(), ty, FieldInit::Param(name))
    }

    pub fn mutable(mut self) -> FieldDecl {
        self.mutable = true;
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> FieldDecl {
        self.visibility = visibility;
        self
    }
}

#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
pub enum MethodBody {
    /// An opaque body registered in the runtime under the method's fullname
    #[default]
    Extern,
    /// Returns the value of the field (seen from the declaring class)
    Getter { field: FieldName },
    /// Updates the value of the field (seen from the declaring class)
    Setter { field: FieldName },
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct MethodDecl {
    pub name: MethodFirstname,
    pub signature: MethodSignature,
    #[serde(default)]
    pub body: MethodBody,
    #[serde(default)]
    pub overrides: bool,
    #[serde(default)]
    pub visibility: Visibility,
}

impl MethodDecl {
    pub fn new(name: impl Into<String>, signature: MethodSignature) -> MethodDecl {
        MethodDecl {
            name: method_firstname(name),
            signature,
            body: MethodBody::Extern,
            overrides: false,
            visibility: Visibility::Public,
        }
    }

    /// A getter method `name` which returns the field `name`
    pub fn getter(name: impl Into<String>, ty: Ty) -> MethodDecl {
        let name = name.into();
        let mut m = MethodDecl::new(name.clone(), MethodSignature::nullary(ty));
        m.body = MethodBody::Getter {
            field: field_name(name),
        };
        m
    }

    /// A setter method `name=` which updates the field `name`
    pub fn setter(name: impl Into<String>, ty: Ty) -> MethodDecl {
        let name = name.into();
        let mut m = MethodDecl::new(
            format!("{}=", name),
            MethodSignature::new(vec![ty], Ty::Unit),
        );
        m.body = MethodBody::Setter {
            field: field_name(name),
        };
        m
    }

    pub fn overriding(mut self) -> MethodDecl {
        self.overrides = true;
        self
    }

    pub fn private(mut self) -> MethodDecl {
        self.visibility = Visibility::Private;
        self
    }

    pub fn with_body(mut self, body: MethodBody) -> MethodDecl {
        self.body = body;
        self
    }

    /// Private methods are bound statically
    pub fn is_virtual(&self) -> bool {
        self.visibility != Visibility::Private
    }
}
