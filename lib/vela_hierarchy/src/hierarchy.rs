use crate::ancestors::Ancestors;
use crate::layout::{build_layout, Layout};
use crate::static_methods::StaticMethods;
use crate::vtable::{build_vtable, MethodSlot, VTable};
use anyhow::Result;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;
use vela_core::error;
use vela_core::names::*;
use vela_decl::{ClassDecl, ClassDecls, FieldInit, MethodBody, SuperArg};

/// Everything computed for a class. Immutable once built; instances share
/// the layout and the vtable.
#[derive(Debug, Clone)]
pub struct ClassInfo {
    pub layout: Arc<Layout>,
    pub vtable: Arc<VTable>,
    pub static_methods: Arc<StaticMethods>,
    pub ancestors: Ancestors,
}

impl ClassInfo {
    /// The class `AnyRef` has no fields and no methods
    fn root() -> ClassInfo {
        ClassInfo {
            layout: Arc::new(Layout::empty(ClassName::root())),
            vtable: Arc::new(VTable::null(ClassName::root())),
            static_methods: Default::default(),
            ancestors: Ancestors::root(),
        }
    }

    fn build(decl: &ClassDecl, super_info: &ClassInfo) -> Result<ClassInfo> {
        let layout = build_layout(decl, &super_info.layout)?;
        check_accessors(decl, &layout)?;
        let vtable = build_vtable(decl, &super_info.vtable)?;
        Ok(ClassInfo {
            layout: Arc::new(layout),
            vtable: Arc::new(vtable),
            static_methods: Arc::new(StaticMethods::build(decl)),
            ancestors: super_info.ancestors.extend(&decl.name),
        })
    }
}

/// A class which could not be built
#[derive(Debug)]
pub struct BuildFailure {
    pub class_name: ClassName,
    pub error: anyhow::Error,
}

/// Layouts and vtables of all the classes, built at once from the
/// declarations and read-only afterwards.
#[derive(Debug)]
pub struct Hierarchy {
    decls: ClassDecls,
    classes: HashMap<ClassName, ClassInfo>,
}

impl Hierarchy {
    /// Build layouts and vtables of the classes. A class which fails to
    /// build (and its subclasses) is reported in the returned list; the
    /// other classes are built anyway.
    pub fn build(decls: ClassDecls) -> (Hierarchy, Vec<BuildFailure>) {
        let mut classes = HashMap::new();
        classes.insert(ClassName::root(), ClassInfo::root());
        let mut failures = vec![];
        let mut failed = HashSet::new();
        let mut queue = decls
            .names()
            .filter(|name| !name.is_root())
            .cloned()
            .collect::<VecDeque<_>>();
        while let Some(name) = queue.pop_front() {
            // Check if already processed
            if classes.contains_key(&name) || failed.contains(&name) {
                continue;
            }
            let Some(decl) = decls.get(&name) else {
                continue;
            };
            let super_name = decl.superclass.name();
            let result = if let Err(e) = check_superclass_chain(&decls, decl) {
                Err(e)
            } else if failed.contains(super_name) {
                Err(error::broken_superclass(&name, super_name))
            } else if let Some(super_info) = classes.get(super_name) {
                check_constructor(&decls, decl).and_then(|_| ClassInfo::build(decl, super_info))
            } else {
                // Build the superclass first
                queue.push_front(name);
                queue.push_front(super_name.clone());
                continue;
            };
            match result {
                Ok(info) => {
                    log::debug!(
                        "built {}: layout {}, vtable {}",
                        &name,
                        &info.layout,
                        &info.vtable
                    );
                    classes.insert(name, info);
                }
                Err(e) => {
                    log::warn!("failed to build {}: {}", &name, &e);
                    failed.insert(name.clone());
                    failures.push(BuildFailure {
                        class_name: name,
                        error: e,
                    });
                }
            }
        }
        (Hierarchy { decls, classes }, failures)
    }

    /// Build the hierarchy, failing if any of the classes is invalid
    pub fn build_all(decls: ClassDecls) -> Result<Hierarchy> {
        let (hierarchy, failures) = Hierarchy::build(decls);
        match failures.into_iter().next() {
            Some(failure) => Err(failure.error),
            None => Ok(hierarchy),
        }
    }

    pub fn decls(&self) -> &ClassDecls {
        &self.decls
    }

    /// Names of the classes successfully built, in the order of declaration
    pub fn class_names(&self) -> impl Iterator<Item = &ClassName> {
        self.decls
            .names()
            .filter(|name| self.classes.contains_key(*name))
    }

    pub fn class_info(&self, name: &ClassName) -> Option<&ClassInfo> {
        self.classes.get(name)
    }

    /// Find a class. Returns Err if not found (or failed to build)
    pub fn get_class_info(&self, name: &ClassName) -> Result<&ClassInfo> {
        self.class_info(name).ok_or_else(|| error::no_such_class(name))
    }

    pub fn layout(&self, name: &ClassName) -> Option<&Arc<Layout>> {
        self.class_info(name).map(|info| &info.layout)
    }

    pub fn vtable(&self, name: &ClassName) -> Option<&Arc<VTable>> {
        self.class_info(name).map(|info| &info.vtable)
    }

    pub fn static_methods(&self, name: &ClassName) -> Option<&Arc<StaticMethods>> {
        self.class_info(name).map(|info| &info.static_methods)
    }

    /// Return true if `sub` is `sup` or one of its subclasses.
    /// Unknown classes are not subtypes of anything.
    pub fn is_subtype(&self, sub: &ClassName, sup: &ClassName) -> bool {
        self.class_info(sub)
            .map(|info| info.ancestors.contains(sup))
            .unwrap_or(false)
    }

    /// Returns the class and its superclasses, the root last
    pub fn ancestors(&self, name: &ClassName) -> Option<&[ClassName]> {
        self.class_info(name).map(|info| info.ancestors.chain())
    }

    /// The direct superclass. `None` for the root class
    pub fn superclass_of(&self, name: &ClassName) -> Option<&ClassName> {
        self.class_info(name).and_then(|info| info.ancestors.superclass())
    }

    /// Returns the vtable slot which a call of `method` on an instance of
    /// `class` is dispatched to
    pub fn resolve(&self, class: &ClassName, method: &MethodFirstname) -> Result<&MethodSlot> {
        let vtable = &self.get_class_info(class)?.vtable;
        vtable
            .find(method)
            .ok_or_else(|| error::no_such_method(class, method))
    }
}

/// Check that the superclass exists and the class does not inherit from
/// itself
fn check_superclass_chain(decls: &ClassDecls, decl: &ClassDecl) -> Result<()> {
    let super_name = decl.superclass.name();
    if !decls.contains(super_name) {
        return Err(error::unknown_superclass(&decl.name, super_name));
    }
    let mut visited = HashSet::new();
    visited.insert(&decl.name);
    let mut current = super_name;
    while let Some(next) = decls.superclass_of(current) {
        if !visited.insert(current) {
            return Err(error::cyclic_inheritance(&decl.name));
        }
        current = next;
    }
    Ok(())
}

/// Check that constructor parameters referred from fields and superclass
/// arguments exist
fn check_constructor(decls: &ClassDecls, decl: &ClassDecl) -> Result<()> {
    let referred = decl
        .fields
        .iter()
        .filter_map(|f| match &f.init {
            FieldInit::Param(p) => Some(p),
            _ => None,
        })
        .chain(decl.super_args.iter().filter_map(|a| match a {
            SuperArg::Param(p) => Some(p),
            _ => None,
        }));
    for param in referred {
        if decl.param_idx(param).is_none() {
            return Err(error::unknown_param(&decl.name, param));
        }
    }
    let super_name = decl.superclass.name();
    let super_arity = decls.get(super_name).map(|d| d.arity()).unwrap_or(0);
    if decl.super_args.len() != super_arity {
        return Err(error::arity_error(
            format!("constructor of {} (called from {})", super_name, &decl.name),
            super_arity,
            decl.super_args.len(),
        ));
    }
    Ok(())
}

/// Check that getters and setters refer to fields visible from the class,
/// and that setters only update mutable ones
fn check_accessors(decl: &ClassDecl, layout: &Layout) -> Result<()> {
    for method in &decl.methods {
        let (field, is_setter) = match &method.body {
            MethodBody::Extern => continue,
            MethodBody::Getter { field } => (field, false),
            MethodBody::Setter { field } => (field, true),
        };
        let Some((_, slot)) = layout.find(field) else {
            return Err(error::no_such_field(&decl.name, field));
        };
        if is_setter && !slot.mutable {
            return Err(error::immutable_field(&slot.declared_in, field));
        }
    }
    Ok(())
}
