use crate::loader;
use anyhow::Result;
use serde::Serialize;
use std::path::Path;
use vela_core::error;
use vela_core::names::*;
use vela_hierarchy::Hierarchy;

#[derive(Serialize)]
struct LayoutReport<'a> {
    class: &'a ClassName,
    size: usize,
    slots: Vec<SlotReport<'a>>,
}

#[derive(Serialize)]
struct SlotReport<'a> {
    name: &'a FieldName,
    declared_in: &'a ClassName,
    offset: usize,
    size: usize,
}

#[derive(Serialize)]
struct VTableReport<'a> {
    class: &'a ClassName,
    slots: Vec<MethodReport<'a>>,
}

#[derive(Serialize)]
struct MethodReport<'a> {
    index: usize,
    name: &'a MethodFirstname,
    implementation: &'a str,
}

/// Load the hierarchy file and build it. Fails if any class is invalid.
pub fn load_hierarchy(path: &Path) -> Result<Hierarchy> {
    let decls = loader::load(path)?;
    let (hierarchy, failures) = Hierarchy::build(decls);
    for failure in &failures {
        log::error!("{}: {}", failure.class_name, failure.error);
    }
    match failures.into_iter().next() {
        Some(failure) => Err(failure
            .error
            .context(format!("failed to build class {}", failure.class_name))),
        None => Ok(hierarchy),
    }
}

/// Layouts of all the classes, as JSON
pub fn layouts(path: &Path) -> Result<String> {
    let hierarchy = load_hierarchy(path)?;
    let reports = hierarchy
        .class_names()
        .filter_map(|name| hierarchy.layout(name))
        .map(|layout| LayoutReport {
            class: &layout.class_name,
            size: layout.size(),
            slots: layout
                .slots()
                .iter()
                .map(|s| SlotReport {
                    name: &s.name,
                    declared_in: &s.declared_in,
                    offset: s.offset,
                    size: s.size,
                })
                .collect(),
        })
        .collect::<Vec<_>>();
    Ok(serde_json::to_string_pretty(&reports)?)
}

/// Vtables of all the classes, as JSON
pub fn vtables(path: &Path) -> Result<String> {
    let hierarchy = load_hierarchy(path)?;
    let reports = hierarchy
        .class_names()
        .filter_map(|name| hierarchy.vtable(name))
        .map(|vtable| VTableReport {
            class: &vtable.class_name,
            slots: vtable
                .slots()
                .iter()
                .enumerate()
                .map(|(index, s)| MethodReport {
                    index,
                    name: &s.name,
                    implementation: &s.implementation.full_name,
                })
                .collect(),
        })
        .collect::<Vec<_>>();
    Ok(serde_json::to_string_pretty(&reports)?)
}

pub fn subtype(path: &Path, sub: &str, sup: &str) -> Result<String> {
    let hierarchy = load_hierarchy(path)?;
    let result = hierarchy.is_subtype(&class_name(sub), &class_name(sup));
    Ok(serde_json::to_string_pretty(&serde_json::json!({
        "sub": sub,
        "sup": sup,
        "is_subtype": result,
    }))?)
}

pub fn ancestors(path: &Path, class: &str) -> Result<String> {
    let hierarchy = load_hierarchy(path)?;
    let class = class_name(class);
    let chain = hierarchy
        .ancestors(&class)
        .ok_or_else(|| error::no_such_class(&class))?;
    Ok(serde_json::to_string_pretty(chain)?)
}

pub fn resolve(path: &Path, class: &str, method: &str) -> Result<String> {
    let hierarchy = load_hierarchy(path)?;
    let class = class_name(class);
    let method = method_firstname(method);
    let slot = hierarchy.resolve(&class, &method)?;
    let index = hierarchy
        .vtable(&class)
        .and_then(|vtable| vtable.get(&method));
    Ok(serde_json::to_string_pretty(&serde_json::json!({
        "class": class,
        "method": method,
        "slot": index,
        "implementation": slot.implementation.full_name,
    }))?)
}
