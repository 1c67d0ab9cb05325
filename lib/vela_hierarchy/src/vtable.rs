use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use vela_core::error;
use vela_core::names::*;
use vela_decl::{ClassDecl, MethodDecl, MethodSignature};

/// An entry of a vtable
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct MethodSlot {
    pub name: MethodFirstname,
    pub signature: MethodSignature,
    /// The method body selected for the class
    pub implementation: MethodFullname,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct VTable {
    pub class_name: ClassName,
    /// List of methods, ordered by index
    slots: Vec<MethodSlot>,
    /// Mapping from firstname to index
    index: HashMap<MethodFirstname, usize>,
}

impl fmt::Display for VTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slots = self
            .slots
            .iter()
            .enumerate()
            .map(|(i, s)| format!("{}@{}→{}", s.name, i, s.implementation))
            .collect::<Vec<_>>();
        write!(f, "[{}]", slots.join(", "))
    }
}

impl VTable {
    /// Create an empty VTable
    pub fn null(class_name: ClassName) -> VTable {
        VTable {
            class_name,
            slots: vec![],
            index: HashMap::new(),
        }
    }

    /// Build a VTable of a class.
    /// Overriding methods replace the slot of the superclass in place, then
    /// new methods are appended in the order of declaration.
    pub fn build(super_vtable: &VTable, decl: &ClassDecl) -> Result<VTable> {
        check_duplicates(decl)?;
        let mut vtable = super_vtable.clone();
        vtable.class_name = decl.name.clone();

        for method in decl.methods.iter().filter(|m| m.overrides) {
            if !method.is_virtual() {
                return Err(error::invalid_override(
                    &decl.name,
                    &method.name,
                    "private methods cannot override",
                ));
            }
            let Some(idx) = vtable.get(&method.name) else {
                return Err(error::invalid_override(
                    &decl.name,
                    &method.name,
                    format!("{} has no such method", decl.superclass.name()),
                ));
            };
            let inherited = &vtable.slots[idx];
            if !method.signature.overridable(&inherited.signature) {
                return Err(error::invalid_override(
                    &decl.name,
                    &method.name,
                    format!(
                        "signature {} does not match {} of {}",
                        method.signature, inherited.signature, inherited.implementation
                    ),
                ));
            }
            vtable.update(idx, &decl.name, method);
        }

        for method in decl.virtual_methods().filter(|m| !m.overrides) {
            if vtable.contains(&method.name) {
                // Same name as an inherited method but not marked as override
                return Err(error::duplicate_method(&decl.name, &method.name));
            }
            vtable.push(&decl.name, method);
        }
        Ok(vtable)
    }

    fn contains(&self, name: &MethodFirstname) -> bool {
        self.index.contains_key(name)
    }

    fn update(&mut self, idx: usize, class_name: &ClassName, method: &MethodDecl) {
        let slot = &mut self.slots[idx];
        slot.signature = method.signature.clone();
        slot.implementation = class_name.method_fullname(&method.name);
    }

    fn push(&mut self, class_name: &ClassName, method: &MethodDecl) {
        let i = self.slots.len();
        self.index.insert(method.name.clone(), i);
        self.slots.push(MethodSlot {
            name: method.name.clone(),
            signature: method.signature.clone(),
            implementation: class_name.method_fullname(&method.name),
        });
    }

    /// Returns the size
    pub fn size(&self) -> usize {
        self.slots.len()
    }

    /// Returns the index of the method
    pub fn get(&self, name: &MethodFirstname) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn slot(&self, idx: usize) -> Option<&MethodSlot> {
        self.slots.get(idx)
    }

    /// Returns the slot of the method
    pub fn find(&self, name: &MethodFirstname) -> Option<&MethodSlot> {
        self.get(name).and_then(|idx| self.slot(idx))
    }

    /// Returns the list of slots, ordered by the index.
    pub fn slots(&self) -> &[MethodSlot] {
        &self.slots
    }
}

/// Two own declarations must not share a name, whether virtual or not
fn check_duplicates(decl: &ClassDecl) -> Result<()> {
    let mut seen = HashSet::new();
    for method in &decl.methods {
        if !seen.insert(&method.name) {
            return Err(error::duplicate_method(&decl.name, &method.name));
        }
    }
    Ok(())
}

/// Compute the vtable of `decl` from the vtable of its superclass
pub fn build_vtable(decl: &ClassDecl, super_vtable: &VTable) -> Result<VTable> {
    VTable::build(super_vtable, decl)
}
