//! Shared types used across config loading, menu handling and rendering.
//!
//! Two parallel trees describe a prototype:
//!
//! - [`Project`] → [`Role`] → [`Module`] → [`PageSpec`]: the *outline*, built
//!   from the JSON config at creation time. Carries descriptions.
//! - [`crate::menu::Menu`]: the navigational mirror persisted as `menu.json`.
//!   Carries URLs and progress state, and is the source of truth after creation.
//!
//! Sibling names are unique at every level of both trees. Lookups by name
//! (`--role`, `--module`, `update-page <name>`) depend on it.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum StructureError {
    #[error("{kind} name must not be empty")]
    EmptyName { kind: &'static str },
    #[error("duplicate {kind} name '{name}'")]
    Duplicate { kind: &'static str, name: String },
    #[error("role '{0}' not found")]
    RoleNotFound(String),
    #[error("module '{module}' not found in role '{role}'")]
    ModuleNotFound { role: String, module: String },
    #[error("page '{0}' not found")]
    PageNotFound(String),
    #[error("page name '{name}' matches {count} pages; narrow it with --role/--module")]
    AmbiguousPage { name: String, count: usize },
    #[error("project must have at least one role")]
    NoRoles,
}

/// Progress state of a single page.
///
/// The order of the variants is the order the generated site's tracker cycles
/// through on right-click.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum PageStatus {
    #[default]
    Pending,
    InProgress,
    PendingReview,
    Optimizing,
    Completed,
}

impl PageStatus {
    pub const ALL: [PageStatus; 5] = [
        PageStatus::Pending,
        PageStatus::InProgress,
        PageStatus::PendingReview,
        PageStatus::Optimizing,
        PageStatus::Completed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PageStatus::Pending => "pending",
            PageStatus::InProgress => "in_progress",
            PageStatus::PendingReview => "pending_review",
            PageStatus::Optimizing => "optimizing",
            PageStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for PageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rendering target. Changes layout constants and whether pages get the
/// phone frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Platform {
    #[default]
    Mobile,
    Pc,
}

impl Platform {
    pub fn label(self) -> &'static str {
        match self {
            Platform::Mobile => "mobile",
            Platform::Pc => "desktop",
        }
    }
}

/// The project outline as read from the config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(rename = "project_name")]
    pub name: String,
    #[serde(rename = "project_description")]
    pub description: String,
    pub roles: Vec<Role>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub modules: Vec<Module>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub pages: Vec<PageSpec>,
}

/// A page as declared in the config. Progress fields are optional so a config
/// can seed pages that are already underway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSpec {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: PageStatus,
    #[serde(default)]
    pub completed_at: Option<chrono::NaiveDateTime>,
    #[serde(default = "default_priority")]
    pub priority: String,
}

pub fn default_priority() -> String {
    "normal".to_string()
}

impl PageSpec {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            status: PageStatus::Pending,
            completed_at: None,
            priority: default_priority(),
        }
    }
}

impl Project {
    /// Build a project, enforcing non-empty, sibling-unique names throughout.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        roles: Vec<Role>,
    ) -> Result<Self, StructureError> {
        let project = Self {
            name: name.into(),
            description: description.into(),
            roles,
        };
        project.validate()?;
        Ok(project)
    }

    pub fn validate(&self) -> Result<(), StructureError> {
        if self.roles.is_empty() {
            return Err(StructureError::NoRoles);
        }
        ensure_unique("role", self.roles.iter().map(|r| r.name.as_str()))?;
        for role in &self.roles {
            ensure_unique("module", role.modules.iter().map(|m| m.name.as_str()))?;
            for module in &role.modules {
                ensure_unique("page", module.pages.iter().map(|p| p.name.as_str()))?;
            }
        }
        Ok(())
    }

    pub fn page_count(&self) -> usize {
        self.roles
            .iter()
            .flat_map(|r| &r.modules)
            .map(|m| m.pages.len())
            .sum()
    }
}

/// Check that every name is non-empty and appears once.
pub(crate) fn ensure_unique<'a>(
    kind: &'static str,
    names: impl IntoIterator<Item = &'a str>,
) -> Result<(), StructureError> {
    let mut seen = HashSet::new();
    for name in names {
        if name.trim().is_empty() {
            return Err(StructureError::EmptyName { kind });
        }
        if !seen.insert(name) {
            return Err(StructureError::Duplicate {
                kind,
                name: name.to_string(),
            });
        }
    }
    Ok(())
}
