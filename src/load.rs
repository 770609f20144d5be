//! Loading and merging of model and configuration files.
//!
//! Model inputs may be literal paths or glob patterns; every matched file is
//! parsed and merged into one `TypeModel` (later files win on conflict).
//! Deserialization errors carry the JSON path to the offending node.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::config::SynthConfig;
use crate::error::{Error, Result};
use crate::model::TypeModel;

/// Deserialize with JSON-path context in error messages.
pub fn from_str_with_path<T: DeserializeOwned>(src: &str) -> std::result::Result<T, String> {
    let de = &mut serde_json::Deserializer::from_str(src);
    match serde_path_to_error::deserialize::<_, T>(de) {
        Ok(v) => Ok(v),
        Err(err) => {
            let path = err.path().to_string();
            Err(format!("at JSON path {path}: {}", err.into_inner()))
        }
    }
}

/// Load every matched model file and merge into one model.
pub fn load_model<S: AsRef<str>>(patterns: &[S]) -> Result<TypeModel> {
    let paths = resolve_file_path_patterns(patterns)?;
    let mut merged = TypeModel::default();
    for path in paths {
        let display = path.to_string_lossy().to_string();
        let source = std::fs::read_to_string(&path)
            .map_err(|e| Error::Model { path: display.clone(), detail: e.to_string() })?;
        let model: TypeModel = from_str_with_path(&source)
            .map_err(|detail| Error::Model { path: display.clone(), detail })?;
        merged.merge(model);
    }
    Ok(merged)
}

/// Load a configuration file, or defaults when none is given. The result is
/// validated here so callers can rely on it.
pub fn load_config(path: Option<&Path>) -> Result<SynthConfig> {
    let config = match path {
        None => SynthConfig::default(),
        Some(path) => {
            let display = path.to_string_lossy().to_string();
            let source = std::fs::read_to_string(path)
                .map_err(|e| Error::Config(format!("{display}: {e}")))?;
            from_str_with_path(&source)
                .map_err(|detail| Error::Config(format!("{display}: {detail}")))?
        }
    };
    config.validate()?;
    Ok(config)
}

fn resolve_file_path_patterns<S: AsRef<str>>(patterns: &[S]) -> Result<Vec<PathBuf>> {
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{'))
    }

    let mut out = Vec::<PathBuf>::new();
    for raw in patterns {
        let pattern = raw.as_ref();
        if has_glob_chars(pattern) {
            let mut matched_any = false;
            let entries = glob::glob(pattern).map_err(|e| Error::Model {
                path: pattern.to_string(),
                detail: e.to_string(),
            })?;
            for entry in entries {
                let p = entry.map_err(|e| Error::Model {
                    path: pattern.to_string(),
                    detail: e.to_string(),
                })?;
                matched_any = true;
                out.push(p);
            }
            if !matched_any {
                // An explicit glob matching nothing is a caller mistake.
                return Err(Error::Model {
                    path: pattern.to_string(),
                    detail: "glob pattern matched no files".into(),
                });
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }
    Ok(out)
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_context_appears_in_parse_errors() {
        let err = from_str_with_path::<TypeModel>(
            r#"{"classes": {"com.x.Task": {"kind": "nonsense"}}}"#,
        )
        .unwrap_err();
        assert!(err.contains("com.x.Task"), "got: {err}");
    }

    #[test]
    fn missing_model_file_is_a_model_error() {
        let err = load_model(&["/nonexistent/model.json"]).unwrap_err();
        assert!(matches!(err, Error::Model { .. }));
    }

    #[test]
    fn absent_config_falls_back_to_validated_defaults() {
        let config = load_config(None).unwrap();
        assert_eq!(config.recursion_limit, 7);
    }
}
