//! Project outline configuration.
//!
//! A config is a JSON document describing the prototype to scaffold:
//!
//! ```json
//! {
//!   "project_name": "Shop",
//!   "project_description": "Checkout flow wireframes",
//!   "roles": [
//!     {
//!       "name": "Buyer",
//!       "description": "Primary audience",
//!       "modules": [
//!         {
//!           "name": "Cart",
//!           "description": "Basket management",
//!           "pages": [
//!             { "name": "Cart overview", "description": "Lists items" },
//!             { "name": "Checkout", "description": "Payment", "status": "in_progress" }
//!           ]
//!         }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! ## Merging
//!
//! User configs are merged **shallowly** over the stock default: each
//! top-level key present in the user file replaces the default's key wholesale.
//! Supplying `roles` replaces every default role; supplying only
//! `project_name` keeps the default roles.
//!
//! The default is rebuilt on every call to [`default_config`], so nothing
//! shared is ever mutated.
//!
//! ## Validation
//!
//! Only the top level is checked structurally (`project_name`,
//! `project_description` and `roles` present, `roles` a non-empty array).
//! Nested shapes are checked by deserializing into [`Project`], which then
//! enforces sibling-unique names.

use crate::types::{Project, StructureError};
use serde_json::{Map, Value, json};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("config validation error: {0}")]
    Validation(String),
    #[error("config structure error: {0}")]
    Structure(#[from] StructureError),
}

const REQUIRED_KEYS: [&str; 3] = ["project_name", "project_description", "roles"];

/// Command-line overrides applied after merging.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// The stock outline: two roles, three modules, six pages.
pub fn default_config() -> Value {
    json!({
        "project_name": "Product Prototype",
        "project_description": "Low-fidelity prototype generated from the requirements outline",
        "roles": [
            {
                "name": "Primary User",
                "description": "Main user group",
                "modules": [
                    {
                        "name": "Core Features",
                        "description": "Main business functions",
                        "pages": [
                            { "name": "Feature Page 1", "description": "Page purpose" },
                            { "name": "Feature Page 2", "description": "Page purpose" }
                        ]
                    },
                    {
                        "name": "Support Features",
                        "description": "Supporting business functions",
                        "pages": [
                            { "name": "Support Page 1", "description": "Page purpose" },
                            { "name": "Support Page 2", "description": "Page purpose" }
                        ]
                    }
                ]
            },
            {
                "name": "Secondary User",
                "description": "Secondary user group",
                "modules": [
                    {
                        "name": "Administration",
                        "description": "Management functions",
                        "pages": [
                            { "name": "Admin Page 1", "description": "Page purpose" },
                            { "name": "Admin Page 2", "description": "Page purpose" }
                        ]
                    }
                ]
            }
        ]
    })
}

/// Pretty-printed stock config, for the `gen-config` command.
pub fn stock_config_json() -> String {
    // Serializing a `Value` built from `json!` cannot fail.
    serde_json::to_string_pretty(&default_config()).unwrap_or_default()
}

/// Replace top-level keys of `base` with those of `overlay`.
///
/// Non-object overlays are ignored; the caller validates shape afterwards.
pub fn merge_shallow(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                base_map.insert(key, value);
            }
            Value::Object(base_map)
        }
        (base, _) => base,
    }
}

/// Read a user config file as raw JSON.
pub fn load_raw_config(path: &Path) -> Result<Value, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&content)?;
    if !value.is_object() {
        return Err(ConfigError::Validation(
            "config root must be a JSON object".into(),
        ));
    }
    Ok(value)
}

/// Apply `--title` / `--description` on top of a merged config.
pub fn apply_overrides(mut config: Value, overrides: &ConfigOverrides) -> Value {
    if let Value::Object(map) = &mut config {
        if let Some(title) = overrides.title.as_ref().filter(|t| !t.is_empty()) {
            map.insert("project_name".into(), Value::String(title.clone()));
        }
        if let Some(desc) = overrides.description.as_ref().filter(|d| !d.is_empty()) {
            map.insert("project_description".into(), Value::String(desc.clone()));
        }
    }
    config
}

/// Top-level shape check.
pub fn validate_config(config: &Value) -> Result<(), ConfigError> {
    let map: &Map<String, Value> = config
        .as_object()
        .ok_or_else(|| ConfigError::Validation("config root must be a JSON object".into()))?;
    for key in REQUIRED_KEYS {
        if !map.contains_key(key) {
            return Err(ConfigError::Validation(format!(
                "missing required field: {key}"
            )));
        }
    }
    match map.get("roles") {
        Some(Value::Array(roles)) if !roles.is_empty() => Ok(()),
        _ => Err(ConfigError::Validation(
            "roles must be a non-empty array".into(),
        )),
    }
}

/// Merge, override, validate and type a config.
pub fn resolve_config(
    overlay: Option<Value>,
    overrides: &ConfigOverrides,
) -> Result<Project, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_shallow(default_config(), ov),
        None => default_config(),
    };
    let merged = apply_overrides(merged, overrides);
    validate_config(&merged)?;
    let project: Project = serde_json::from_value(merged)?;
    project.validate()?;
    Ok(project)
}

/// Load the project outline from an optional config file.
pub fn load_config(
    path: Option<&Path>,
    overrides: &ConfigOverrides,
) -> Result<Project, ConfigError> {
    let overlay = path.map(load_raw_config).transpose()?;
    resolve_config(overlay, overrides)
}
