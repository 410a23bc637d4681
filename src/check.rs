//! Consistency check between `menu.json` and the files on disk.
//!
//! Reports three kinds of problems:
//!
//! - **Missing**: a menu URL whose file does not exist
//! - **Irregular**: a menu URL that does not follow
//!   `pages/role{R}/module{L}/page{P}.html`
//! - **Orphan**: an `.html` file under `pages/` that no menu entry points at
//! - **Markup**: problems [`crate::markup::scan`] finds in a page file
//!
//! Missing and irregular entries make the check fail. Orphans and markup
//! findings are warnings: orphans are what a hand-removed menu entry leaves
//! behind, and markup problems come from imported content.

use crate::lock::LOCK_FILE;
use crate::markup::{self, MarkupIssue};
use crate::menu::{Menu, MenuError};
use crate::naming::{self, PAGES_DIR};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum CheckError {
    #[error(transparent)]
    Menu(#[from] MenuError),
    #[error("could not walk pages/: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("could not read page {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// A markup finding in one page file.
#[derive(Debug, Clone, PartialEq)]
pub struct PageMarkup {
    pub url: String,
    pub issue: MarkupIssue,
}

#[derive(Debug, Default, PartialEq)]
pub struct CheckReport {
    pub pages: usize,
    pub missing: Vec<String>,
    pub irregular: Vec<String>,
    pub orphans: Vec<String>,
    pub markup: Vec<PageMarkup>,
    /// Set when a `.protogen.lock` is present.
    pub stale_lock: bool,
}

impl CheckReport {
    pub fn is_ok(&self) -> bool {
        self.missing.is_empty() && self.irregular.is_empty()
    }
}

pub fn check(project_dir: &Path) -> Result<CheckReport, CheckError> {
    let menu = Menu::load(project_dir)?;
    let mut report = CheckReport {
        stale_lock: project_dir.join(LOCK_FILE).exists(),
        ..Default::default()
    };

    let mut referenced = BTreeSet::new();
    for (_, page) in menu.pages() {
        report.pages += 1;
        if naming::parse_page_url(&page.url).is_none() {
            report.irregular.push(page.url.clone());
        }
        let path = project_dir.join(&page.url);
        if path.is_file() {
            let html = fs::read_to_string(&path)
                .map_err(|source| CheckError::Read { path, source })?;
            for issue in markup::scan(&html) {
                tracing::warn!(url = %page.url, %issue, "markup problem");
                report.markup.push(PageMarkup {
                    url: page.url.clone(),
                    issue,
                });
            }
        } else {
            report.missing.push(page.url.clone());
        }
        referenced.insert(page.url.clone());
    }

    let pages_root = project_dir.join(PAGES_DIR);
    if pages_root.is_dir() {
        for entry in WalkDir::new(&pages_root).sort_by_file_name() {
            let entry = entry?;
            if !entry.file_type().is_file()
                || entry.path().extension().is_none_or(|ext| ext != "html")
            {
                continue;
            }
            let Ok(rel) = entry.path().strip_prefix(project_dir) else {
                continue;
            };
            let url = rel
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            if !referenced.contains(&url) {
                tracing::warn!(%url, "page file not referenced by menu");
                report.orphans.push(url);
            }
        }
    }
    Ok(report)
}
