//! Filesystem output for a prototype project.
//!
//! [`ProjectWriter`] is rooted at the project directory and takes paths
//! relative to it, the same form `menu.json` stores page URLs in. Parent
//! directories are created on demand and existing files are overwritten.
//!
//! Every failure carries the path involved and is logged before it is
//! returned. Nothing is rolled back: a failure halfway through
//! [`ProjectWriter::write_pages`] leaves the pages written so far on disk.

use crate::docs::{self, README_FILE};
use crate::generate::{self, PageContext};
use crate::menu::Menu;
use crate::naming::{self, PagePosition};
use crate::types::{Platform, Project};
use std::fs;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WriteError {
    #[error("could not create directory {path:?}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path:?}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not read {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("page content file not found: {0:?}")]
    SourceNotFound(PathBuf),
    #[error("could not read page content {path:?}: {source}")]
    ReadSource {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("unsupported page content {0:?}; expected .html, .htm or .md")]
    UnsupportedContent(PathBuf),
    #[error("could not remove page content {path:?}: {source}")]
    RemoveSource {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("refusing to write outside the project: {0}")]
    UnsafePath(String),
}

/// Kind of page content accepted by `update-page --page-content`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Html,
    Markdown,
}

impl ContentKind {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "html" | "htm" => Some(ContentKind::Html),
            "md" | "markdown" => Some(ContentKind::Markdown),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProjectWriter {
    root: PathBuf,
    platform: Platform,
}

impl ProjectWriter {
    pub fn new(root: impl Into<PathBuf>, platform: Platform) -> Self {
        Self {
            root: root.into(),
            platform,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn create_root(&self) -> Result<(), WriteError> {
        self.create_dir(&self.root)
    }

    /// Create the project root and one directory per module.
    pub fn create_structure(&self, project: &Project) -> Result<(), WriteError> {
        self.create_root()?;
        for (ri, role) in project.roles.iter().enumerate() {
            for mi in 0..role.modules.len() {
                self.create_dir(&self.resolve(&naming::module_dir(ri, mi))?)?;
            }
        }
        tracing::debug!(root = %self.root.display(), "created project structure");
        Ok(())
    }

    /// Write `content` to `rel` under the root, creating parents.
    pub fn write_file(&self, rel: &str, content: &str) -> Result<PathBuf, WriteError> {
        let path = self.resolve(rel)?;
        if let Some(parent) = path.parent() {
            self.create_dir(parent)?;
        }
        fs::write(&path, content).map_err(|source| {
            tracing::error!(path = %path.display(), error = %source, "write failed");
            WriteError::Write {
                path: path.clone(),
                source,
            }
        })?;
        tracing::debug!(path = %path.display(), bytes = content.len(), "wrote file");
        Ok(path)
    }

    /// Render and write a placeholder page for every page in the outline.
    pub fn write_pages(&self, project: &Project) -> Result<usize, WriteError> {
        let mut written = 0;
        for (ri, role) in project.roles.iter().enumerate() {
            for (mi, module) in role.modules.iter().enumerate() {
                for (pi, page) in module.pages.iter().enumerate() {
                    let ctx = PageContext {
                        page_name: &page.name,
                        page_description: &page.description,
                        role_name: &role.name,
                        module_name: &module.name,
                    };
                    self.write_page(&PagePosition::new(ri, mi, pi).url(), &ctx)?;
                    written += 1;
                }
            }
        }
        Ok(written)
    }

    /// Render and write one placeholder page at `url`.
    pub fn write_page(&self, url: &str, ctx: &PageContext<'_>) -> Result<PathBuf, WriteError> {
        let html = generate::render_page(ctx, self.platform).into_string();
        self.write_file(url, &html)
    }

    /// Replace the page at `url` with user-supplied content.
    ///
    /// `.html` is framed for the platform; `.md` is converted first. The source
    /// file is deleted after a successful write unless `keep_source` is set.
    pub fn import_page_content(
        &self,
        url: &str,
        source: &Path,
        ctx: &PageContext<'_>,
        keep_source: bool,
    ) -> Result<PathBuf, WriteError> {
        let kind = ContentKind::from_path(source)
            .ok_or_else(|| WriteError::UnsupportedContent(source.to_path_buf()))?;
        if !source.is_file() {
            return Err(WriteError::SourceNotFound(source.to_path_buf()));
        }
        let raw = fs::read_to_string(source).map_err(|e| WriteError::ReadSource {
            path: source.to_path_buf(),
            source: e,
        })?;
        let body = match kind {
            ContentKind::Html => raw,
            ContentKind::Markdown => generate::markdown_to_html(&raw),
        };
        let html = generate::render_imported_page(ctx, &body, self.platform);
        let written = self.write_file(url, &html)?;

        if !keep_source {
            fs::remove_file(source).map_err(|e| WriteError::RemoveSource {
                path: source.to_path_buf(),
                source: e,
            })?;
            tracing::debug!(source = %source.display(), "removed page content source");
        }
        Ok(written)
    }

    /// Rebuild the page listing in `README.md` from `menu`.
    ///
    /// Returns `false` without writing when there is no README.
    pub fn refresh_readme(&self, menu: &Menu) -> Result<bool, WriteError> {
        let path = self.resolve(README_FILE)?;
        let existing = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no README to refresh");
                return Ok(false);
            }
            Err(source) => return Err(WriteError::Read { path, source }),
        };
        self.write_file(README_FILE, &docs::refresh_readme(&existing, menu))?;
        Ok(true)
    }

    /// Join a project-relative path, rejecting anything that escapes the root.
    fn resolve(&self, rel: &str) -> Result<PathBuf, WriteError> {
        let rel_path = Path::new(rel);
        let safe = !rel.is_empty()
            && rel_path
                .components()
                .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
        if !safe {
            return Err(WriteError::UnsafePath(rel.to_string()));
        }
        Ok(self.root.join(rel_path))
    }

    fn create_dir(&self, path: &Path) -> Result<(), WriteError> {
        fs::create_dir_all(path).map_err(|source| {
            tracing::error!(path = %path.display(), error = %source, "mkdir failed");
            WriteError::CreateDir {
                path: path.to_path_buf(),
                source,
            }
        })
    }
}
