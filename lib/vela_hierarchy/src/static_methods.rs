use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use vela_core::names::*;
use vela_decl::{ClassDecl, MethodSignature};

/// Private methods of a class. They are bound at the declaring class and
/// never inherited nor overridden.
#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
pub struct StaticMethods {
    methods: HashMap<MethodFirstname, (MethodFullname, MethodSignature)>,
}

impl StaticMethods {
    /// Collect the private methods of the class. Duplicates are rejected by
    /// the vtable builder beforehand.
    pub fn build(decl: &ClassDecl) -> StaticMethods {
        let methods = decl
            .private_methods()
            .map(|m| {
                (
                    m.name.clone(),
                    (decl.method_fullname(&m.name), m.signature.clone()),
                )
            })
            .collect();
        StaticMethods { methods }
    }

    pub fn get(&self, name: &MethodFirstname) -> Option<(&MethodFullname, &MethodSignature)> {
        self.methods.get(name).map(|(fullname, sig)| (fullname, sig))
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}
