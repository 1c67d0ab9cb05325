use anyhow::Result;
use insta::assert_snapshot;
use serde_json::Value;
use std::path::{Path, PathBuf};
use vela::error::{as_vela_error, Error};
use vela::runner;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn find<'a>(reports: &'a Value, class: &str) -> &'a Value {
    reports
        .as_array()
        .and_then(|items| items.iter().find(|item| item["class"] == class))
        .unwrap_or_else(|| panic!("{} not in the output", class))
}

#[test]
fn test_layouts() -> Result<()> {
    let output: Value = serde_json::from_str(&runner::layouts(&fixture("shapes.json5"))?)?;
    let circle = find(&output, "Circle");
    assert_eq!(circle["size"], 16);
    assert_eq!(circle["slots"][0]["name"], "name");
    assert_eq!(circle["slots"][0]["declared_in"], "Shape");
    assert_eq!(circle["slots"][1]["name"], "r");
    assert_eq!(circle["slots"][1]["offset"], 8);

    let square = find(&output, "Square");
    assert_eq!(square["size"], 12);
    assert_eq!(square["slots"][1]["size"], 4);
    Ok(())
}

#[test]
fn test_vtables() -> Result<()> {
    let output: Value = serde_json::from_str(&runner::vtables(&fixture("shapes.json5"))?)?;
    let names = |class: &str| {
        find(&output, class)["slots"]
            .as_array()
            .map(|slots| {
                slots
                    .iter()
                    .map(|s| format!("{}→{}", s["name"].as_str().unwrap(), s["implementation"].as_str().unwrap()))
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .unwrap_or_default()
    };
    assert_snapshot!(names("Shape"), @"area→Shape#area, name→Shape#name");
    assert_snapshot!(names("Square"), @"area→Square#area, name→Shape#name, grow→Square#grow");
    Ok(())
}

#[test]
fn test_subtype_and_ancestors() -> Result<()> {
    let path = fixture("shapes.json5");
    let output: Value = serde_json::from_str(&runner::subtype(&path, "Circle", "Shape")?)?;
    assert_eq!(output["is_subtype"], true);
    let output: Value = serde_json::from_str(&runner::subtype(&path, "Shape", "Circle")?)?;
    assert_eq!(output["is_subtype"], false);

    let output: Value = serde_json::from_str(&runner::ancestors(&path, "Circle")?)?;
    assert_eq!(output, serde_json::json!(["Circle", "Shape", "AnyRef"]));
    let err = runner::ancestors(&path, "Triangle").unwrap_err();
    assert!(matches!(
        as_vela_error(&err),
        Some(Error::NoSuchClassError { .. })
    ));
    Ok(())
}

#[test]
fn test_resolve() -> Result<()> {
    let path = fixture("scenario.json");
    let output: Value = serde_json::from_str(&runner::resolve(&path, "B", "m")?)?;
    assert_eq!(output["slot"], 0);
    assert_eq!(output["implementation"], "B#m");
    let output: Value = serde_json::from_str(&runner::resolve(&path, "A", "m")?)?;
    assert_eq!(output["implementation"], "A#m");

    let err = runner::resolve(&path, "A", "m3").unwrap_err();
    assert_snapshot!(err.to_string(), @"method `m3' not found on A");
    Ok(())
}

#[test]
fn test_broken_hierarchy() {
    let err = runner::layouts(&fixture("broken.json")).unwrap_err();
    assert_snapshot!(
        format!("{:#}", err),
        @"failed to build class B: method `m' is declared twice in B (hint: mark it as override)"
    );
}
