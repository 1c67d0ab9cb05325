use crate::literal::Literal;
use crate::member::{FieldDecl, MethodDecl};
use serde::{Deserialize, Serialize};
use vela_core::names::*;
use vela_core::ty::Ty;

/// The class named in `extends`. Defaults to the root class.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Superclass(ClassName);

impl Superclass {
    pub fn new(name: ClassName) -> Superclass {
        Superclass(name)
    }

    /// Shortcut from a class name
    pub fn simple(s: &str) -> Superclass {
        Superclass(class_name(s))
    }

    pub fn name(&self) -> &ClassName {
        &self.0
    }
}

impl Default for Superclass {
    fn default() -> Superclass {
        Superclass(ClassName::root())
    }
}

/// A constructor parameter
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    pub ty: Ty,
}

/// An argument passed to the superclass constructor,
/// eg. `x` of `class B(x: Int, y: Int) extends A(x)`
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub enum SuperArg {
    Param(String),
    Const(Literal),
}

/// Declaration of a class, as handed over by the front-end
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct ClassDecl {
    pub name: ClassName,
    #[serde(default)]
    pub superclass: Superclass,
    #[serde(default)]
    pub params: Vec<Param>,
    #[serde(default)]
    pub super_args: Vec<SuperArg>,
    /// Own fields (not including inherited ones), in source order
    #[serde(default)]
    pub fields: Vec<FieldDecl>,
    /// Own methods (not including inherited ones), in source order
    #[serde(default)]
    pub methods: Vec<MethodDecl>,
}

impl ClassDecl {
    /// Create a class which extends the root class
    pub fn new(name: impl Into<String>) -> ClassDecl {
        ClassDecl {
            name: class_name(name),
            superclass: Superclass::default(),
            params: vec![],
            super_args: vec![],
            fields: vec![],
            methods: vec![],
        }
    }

    /// Declaration of the root class `AnyRef`
    pub fn root() -> ClassDecl {
        ClassDecl::new(ROOT_CLASS)
    }

    pub fn extends(mut self, superclass: &str, super_args: Vec<SuperArg>) -> ClassDecl {
        self.superclass = Superclass::simple(superclass);
        self.super_args = super_args;
        self
    }

    pub fn param(mut self, name: impl Into<String>, ty: Ty) -> ClassDecl {
        self.params.push(Param {
            name: name.into(),
            ty,
        });
        self
    }

    pub fn field(mut self, field: FieldDecl) -> ClassDecl {
        self.fields.push(field);
        self
    }

    pub fn method(mut self, method: MethodDecl) -> ClassDecl {
        self.methods.push(method);
        self
    }

    /// Number of constructor parameters
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Returns the index of the constructor parameter
    pub fn param_idx(&self, name: &str) -> Option<usize> {
        self.params.iter().position(|p| p.name == name)
    }

    pub fn find_method(&self, name: &MethodFirstname) -> Option<&MethodDecl> {
        self.methods.iter().find(|m| &m.name == name)
    }

    /// Methods which go into the vtable
    pub fn virtual_methods(&self) -> impl Iterator<Item = &MethodDecl> {
        self.methods.iter().filter(|m| m.is_virtual())
    }

    /// Methods bound statically
    pub fn private_methods(&self) -> impl Iterator<Item = &MethodDecl> {
        self.methods.iter().filter(|m| !m.is_virtual())
    }

    pub fn method_fullname(&self, name: &MethodFirstname) -> MethodFullname {
        self.name.method_fullname(name)
    }
}
