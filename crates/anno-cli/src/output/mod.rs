use std::io::Read;
use std::path::Path;

use anyhow::Context;
use serde::Serialize;
use serde_json::Value;

/// Render a serializable value as pretty or single-line JSON.
pub fn render<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<String> {
    if pretty {
        Ok(serde_json::to_string_pretty(value)?)
    } else {
        Ok(serde_json::to_string(value)?)
    }
}

/// Print a serializable value to stdout.
pub fn output<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let rendered = render(value, pretty)?;
    println!("{rendered}");
    Ok(())
}

/// Read a JSON document from `path`, or stdin when `path` is absent or `-`.
pub fn read_json(path: Option<&Path>) -> anyhow::Result<Value> {
    match path.filter(|p| p.as_os_str() != "-") {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("{} is not valid JSON", path.display()))
        }
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read stdin")?;
            serde_json::from_str(&text).context("stdin is not valid JSON")
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use serde_json::json;

    use super::{read_json, render};

    #[test]
    fn pretty_render_is_multiline() {
        let out = render(&json!({ "id": 7, "name": "x" }), true).expect("render should work");
        assert!(out.contains('\n'));
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["id"], 7);
    }

    #[test]
    fn compact_render_is_single_line() {
        let out = render(&json!({ "id": 7, "name": "x" }), false).expect("render should work");
        assert!(!out.contains('\n'));
    }

    #[test]
    fn reads_json_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"{{"uniqueName": "a.wav"}}"#).expect("write");

        let value = read_json(Some(file.path())).expect("file should parse");
        assert_eq!(value, json!({ "uniqueName": "a.wav" }));
    }

    #[test]
    fn invalid_json_names_the_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "not json").expect("write");

        let err = read_json(Some(file.path())).unwrap_err();
        assert!(format!("{err:#}").contains("is not valid JSON"));
    }
}
