use std::collections::HashSet;
use vela_core::names::*;

/// A class and all of its superclasses, up to the root.
/// Precomputed once so that subtype queries are a set lookup.
#[derive(Debug, PartialEq, Clone)]
pub struct Ancestors {
    /// The class itself first, the root last
    chain: Vec<ClassName>,
    set: HashSet<ClassName>,
}

impl Ancestors {
    /// Ancestors of the root class
    pub fn root() -> Ancestors {
        Ancestors::from_chain(vec![ClassName::root()])
    }

    /// Ancestors of a direct subclass of `self`
    pub fn extend(&self, class_name: &ClassName) -> Ancestors {
        let mut chain = Vec::with_capacity(self.chain.len() + 1);
        chain.push(class_name.clone());
        chain.extend(self.chain.iter().cloned());
        Ancestors::from_chain(chain)
    }

    fn from_chain(chain: Vec<ClassName>) -> Ancestors {
        let set = chain.iter().cloned().collect();
        Ancestors { chain, set }
    }

    /// Returns true if `name` is the class itself or one of its superclasses
    pub fn contains(&self, name: &ClassName) -> bool {
        self.set.contains(name)
    }

    /// The direct superclass, if any
    pub fn superclass(&self) -> Option<&ClassName> {
        self.chain.get(1)
    }

    /// Number of classes in the chain. The root has depth 1.
    pub fn depth(&self) -> usize {
        self.chain.len()
    }

    pub fn chain(&self) -> &[ClassName] {
        &self.chain
    }
}
