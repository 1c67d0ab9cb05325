// Resolve "require"
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use vela_decl::{ClassDecl, ClassDecls};

/// Contents of a hierarchy file (.json or .json5)
#[derive(Debug, Deserialize)]
struct HierarchyFile {
    /// Files to be loaded before this one, relative to this file
    #[serde(default)]
    require: Vec<String>,
    classes: Vec<ClassDecl>,
}

/// Read a hierarchy file (and those require'd by it)
pub fn load(path: &Path) -> Result<ClassDecls> {
    let mut decls = vec![];
    let mut loading_files = vec![];
    load_file(path, &mut decls, &mut loading_files)?;
    ClassDecls::new(decls)
}

fn load_file(
    path: &Path,
    decls: &mut Vec<ClassDecl>,
    loading_files: &mut Vec<PathBuf>,
) -> Result<()> {
    if loading_files.contains(&path.into()) {
        return Ok(());
    }
    loading_files.push(path.into());

    let content =
        fs::read_to_string(path).context(format!("failed to load {}", path.display()))?;
    let file = parse(path, &content)?;
    // Load require'd files first
    for required in &file.require {
        load_file(&path.with_file_name(required), decls, loading_files)?;
    }
    log::debug!("loaded {} class(es) from {}", file.classes.len(), path.display());
    decls.extend(file.classes);
    Ok(())
}

fn parse(path: &Path, content: &str) -> Result<HierarchyFile> {
    let broken = || format!("{} is broken", path.display());
    if path.extension().map_or(false, |ext| ext == "json5") {
        json5::from_str(content).with_context(broken)
    } else {
        serde_json::from_str(content).with_context(broken)
    }
}
