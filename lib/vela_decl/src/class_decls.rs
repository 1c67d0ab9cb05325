use crate::class_decl::ClassDecl;
use crate::member::MethodDecl;
use anyhow::{Context, Result};
use std::collections::HashMap;
use vela_core::error;
use vela_core::names::*;

/// The immutable set of class declarations, including the root class.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDecls {
    decls: HashMap<ClassName, ClassDecl>,
    /// Class names in the order of declaration, the root first
    order: Vec<ClassName>,
}

impl Default for ClassDecls {
    fn default() -> ClassDecls {
        let root = ClassDecl::root();
        ClassDecls {
            order: vec![root.name.clone()],
            decls: HashMap::from([(root.name.clone(), root)]),
        }
    }
}

impl ClassDecls {
    /// Create the store. Fails if a class name is declared twice (`AnyRef`
    /// cannot be declared at all).
    pub fn new(decls: Vec<ClassDecl>) -> Result<ClassDecls> {
        let mut store = ClassDecls::default();
        for decl in decls {
            store.add(decl)?;
        }
        log::debug!("indexed {} class(es)", store.len());
        Ok(store)
    }

    /// Parse a JSON array of class declarations
    pub fn from_json(s: &str) -> Result<ClassDecls> {
        let decls: Vec<ClassDecl> =
            serde_json::from_str(s).context("broken class declarations")?;
        ClassDecls::new(decls)
    }

    fn add(&mut self, decl: ClassDecl) -> Result<()> {
        if self.decls.contains_key(&decl.name) {
            return Err(error::duplicate_class(&decl.name));
        }
        self.order.push(decl.name.clone());
        self.decls.insert(decl.name.clone(), decl);
        Ok(())
    }

    /// Number of classes, including the root
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn get(&self, name: &ClassName) -> Option<&ClassDecl> {
        self.decls.get(name)
    }

    pub fn contains(&self, name: &ClassName) -> bool {
        self.decls.contains_key(name)
    }

    /// Class names in the order of declaration
    pub fn names(&self) -> impl Iterator<Item = &ClassName> {
        self.order.iter()
    }

    /// Returns the superclass of the class. `None` for the root class and
    /// unknown classes.
    pub fn superclass_of(&self, name: &ClassName) -> Option<&ClassName> {
        if name.is_root() {
            return None;
        }
        self.get(name).map(|decl| decl.superclass.name())
    }

    /// Find the declaration of the method body
    pub fn find_method(&self, fullname: &MethodFullname) -> Option<&MethodDecl> {
        self.get(&fullname.class_name)
            .and_then(|decl| decl.find_method(&fullname.first_name))
    }
}
