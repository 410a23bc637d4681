//! The command layer behind each CLI subcommand.
//!
//! Every command validates its arguments and the current project state before
//! it writes anything. Commands that change an existing project hold the
//! project lock from loading `menu.json` until the new menu is saved, and
//! write page files before the menu so a failed write never leaves the menu
//! pointing at a page that does not exist. Growth commands also rebuild the
//! page listing in `README.md` before the menu is saved.

use crate::config::{self, ConfigError, ConfigOverrides};
use crate::docs::{self, README_FILE};
use crate::generate::{self, PageContext};
use crate::lock::{LockError, ProjectLock};
use crate::menu::{AddedPage, Menu, MenuError, MenuPage};
use crate::types::{PageStatus, Platform, Project, StructureError};
use crate::writer::{ContentKind, ProjectWriter, WriteError};
use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Page created by `add-module` when no `--pages` are given.
pub const DEFAULT_PAGE_NAME: &str = "Overview";
/// Module created by `add-role`.
pub const DEFAULT_MODULE_NAME: &str = "Main Features";

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("project directory {0:?} already exists; pass --force to overwrite")]
    ProjectExists(PathBuf),
    #[error("project directory {0:?} not found")]
    ProjectNotFound(PathBuf),
    #[error("nothing to update: pass --status and/or --page-content")]
    NothingToUpdate,
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Menu(#[from] MenuError),
    #[error(transparent)]
    Structure(#[from] StructureError),
    #[error(transparent)]
    Write(#[from] WriteError),
    #[error(transparent)]
    Lock(#[from] LockError),
}

// ============================================================================
// create
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct CreateOptions {
    pub config: Option<PathBuf>,
    pub overrides: ConfigOverrides,
    pub platform: Platform,
    pub force: bool,
}

#[derive(Debug)]
pub struct CreateReport {
    pub root: PathBuf,
    pub project: Project,
    pub platform: Platform,
    pub pages_written: usize,
}

/// Scaffold a new prototype in `project_dir`.
pub fn create(project_dir: &Path, opts: &CreateOptions) -> Result<CreateReport, CommandError> {
    if project_dir.exists() && !opts.force {
        return Err(CommandError::ProjectExists(project_dir.to_path_buf()));
    }
    let project = config::load_config(opts.config.as_deref(), &opts.overrides)?;
    let menu = Menu::from_project(&project);

    let writer = ProjectWriter::new(project_dir, opts.platform);
    writer.create_root()?;
    let _lock = ProjectLock::acquire(project_dir)?;
    writer.create_structure(&project)?;

    writer.write_file("index.html", &generate::render_index(&project.name).into_string())?;
    writer.write_file("style.css", &generate::render_style_css(opts.platform))?;
    writer.write_file("progress.js", generate::render_progress_js())?;
    writer.write_file(
        "design-standards.md",
        &docs::render_design_standards(&project, opts.platform),
    )?;
    writer.write_file(README_FILE, &docs::render_readme(&project))?;
    tracing::info!(root = %project_dir.display(), "wrote site files");

    let pages_written = writer.write_pages(&project)?;
    tracing::info!(count = pages_written, "wrote pages");

    menu.save(project_dir)?;
    Ok(CreateReport {
        root: project_dir.to_path_buf(),
        project,
        platform: opts.platform,
        pages_written,
    })
}

// ============================================================================
// update-page
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct UpdatePageOptions {
    pub page: String,
    pub role: Option<String>,
    pub module: Option<String>,
    pub status: Option<PageStatus>,
    pub content: Option<PathBuf>,
    pub keep_source: bool,
    pub platform: Platform,
}

#[derive(Debug)]
pub struct UpdateReport {
    pub role: String,
    pub module: String,
    pub page: MenuPage,
    pub status_changed: bool,
    pub content_written: Option<PathBuf>,
}

/// Change a page's status and/or replace its content.
pub fn update_page(
    project_dir: &Path,
    opts: &UpdatePageOptions,
    now: NaiveDateTime,
) -> Result<UpdateReport, CommandError> {
    if opts.status.is_none() && opts.content.is_none() {
        return Err(CommandError::NothingToUpdate);
    }
    if let Some(source) = &opts.content {
        if ContentKind::from_path(source).is_none() {
            return Err(WriteError::UnsupportedContent(source.clone()).into());
        }
        if !source.is_file() {
            return Err(WriteError::SourceNotFound(source.clone()).into());
        }
    }
    ensure_project(project_dir)?;
    let _lock = ProjectLock::acquire(project_dir)?;

    let mut menu = Menu::load(project_dir)?;
    let idx = menu.locate_page(&opts.page, opts.role.as_deref(), opts.module.as_deref())?;
    let role = menu.roles[idx.role].name.clone();
    let module = menu.roles[idx.role].modules[idx.module].name.clone();

    if let Some(status) = opts.status {
        menu.set_status(idx, status, now)?;
    }

    let content_written = match &opts.content {
        Some(source) => {
            let page = &menu.roles[idx.role].modules[idx.module].pages[idx.page];
            let ctx = PageContext {
                page_name: &page.name,
                page_description: "",
                role_name: &role,
                module_name: &module,
            };
            let writer = ProjectWriter::new(project_dir, opts.platform);
            Some(writer.import_page_content(&page.url, source, &ctx, opts.keep_source)?)
        }
        None => None,
    };

    menu.save(project_dir)?;
    let page = menu.roles[idx.role].modules[idx.module].pages[idx.page].clone();
    tracing::info!(page = %page.name, status = %page.status, "updated page");
    Ok(UpdateReport {
        role,
        module,
        page,
        status_changed: opts.status.is_some(),
        content_written,
    })
}

// ============================================================================
// add-page / add-module / add-role
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct AddPageOptions {
    pub role: String,
    pub module: String,
    pub page: String,
    pub description: Option<String>,
    pub platform: Platform,
}

#[derive(Debug, Clone, Default)]
pub struct AddModuleOptions {
    pub role: String,
    pub module: String,
    pub description: Option<String>,
    pub pages: Vec<String>,
    pub platform: Platform,
}

#[derive(Debug, Clone, Default)]
pub struct AddRoleOptions {
    pub role: String,
    pub description: Option<String>,
    pub platform: Platform,
}

/// What an `add-*` command appended.
#[derive(Debug)]
pub struct AddReport {
    pub role: String,
    pub module: String,
    pub description: Option<String>,
    pub added: Vec<AddedPage>,
}

pub fn add_page(project_dir: &Path, opts: &AddPageOptions) -> Result<AddReport, CommandError> {
    ensure_project(project_dir)?;
    let _lock = ProjectLock::acquire(project_dir)?;

    let mut menu = Menu::load(project_dir)?;
    let added = menu.add_page(&opts.role, &opts.module, &opts.page)?;
    let description = opts.description.clone().unwrap_or_default();

    let writer = ProjectWriter::new(project_dir, opts.platform);
    writer.write_page(
        &added.url,
        &PageContext {
            page_name: &added.name,
            page_description: &description,
            role_name: &opts.role,
            module_name: &opts.module,
        },
    )?;
    writer.refresh_readme(&menu)?;
    menu.save(project_dir)?;
    tracing::info!(url = %added.url, "added page");

    Ok(AddReport {
        role: opts.role.clone(),
        module: opts.module.clone(),
        description: opts.description.clone(),
        added: vec![added],
    })
}

pub fn add_module(project_dir: &Path, opts: &AddModuleOptions) -> Result<AddReport, CommandError> {
    let pages = page_names_or_default(&opts.pages);
    ensure_project(project_dir)?;
    let _lock = ProjectLock::acquire(project_dir)?;

    let mut menu = Menu::load(project_dir)?;
    let description = opts.description.as_deref().unwrap_or_default();
    let added = menu.add_module(&opts.role, &opts.module, description, &pages)?;

    let writer = ProjectWriter::new(project_dir, opts.platform);
    write_added(&writer, &opts.role, &opts.module, &added)?;
    writer.refresh_readme(&menu)?;
    menu.save(project_dir)?;
    tracing::info!(module = %opts.module, pages = added.len(), "added module");

    Ok(AddReport {
        role: opts.role.clone(),
        module: opts.module.clone(),
        description: opts.description.clone(),
        added,
    })
}

pub fn add_role(project_dir: &Path, opts: &AddRoleOptions) -> Result<AddReport, CommandError> {
    ensure_project(project_dir)?;
    let _lock = ProjectLock::acquire(project_dir)?;

    let mut menu = Menu::load(project_dir)?;
    let pages = vec![DEFAULT_PAGE_NAME.to_string()];
    let description = opts.description.as_deref().unwrap_or_default();
    let added = menu.add_role(&opts.role, description, DEFAULT_MODULE_NAME, &pages)?;

    let writer = ProjectWriter::new(project_dir, opts.platform);
    write_added(&writer, &opts.role, DEFAULT_MODULE_NAME, &added)?;
    writer.refresh_readme(&menu)?;
    menu.save(project_dir)?;
    tracing::info!(role = %opts.role, "added role");

    Ok(AddReport {
        role: opts.role.clone(),
        module: DEFAULT_MODULE_NAME.to_string(),
        description: opts.description.clone(),
        added,
    })
}

// ============================================================================
// status
// ============================================================================

/// Load the menu for a read-only progress report. Takes no lock.
pub fn status(project_dir: &Path) -> Result<Menu, CommandError> {
    ensure_project(project_dir)?;
    Ok(Menu::load(project_dir)?)
}

// ============================================================================
// Helpers
// ============================================================================

fn ensure_project(project_dir: &Path) -> Result<(), CommandError> {
    if !project_dir.is_dir() {
        return Err(CommandError::ProjectNotFound(project_dir.to_path_buf()));
    }
    Ok(())
}

/// Trimmed, non-empty names; a single default page if none remain.
fn page_names_or_default(pages: &[String]) -> Vec<String> {
    let names: Vec<String> = pages
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect();
    if names.is_empty() {
        vec![DEFAULT_PAGE_NAME.to_string()]
    } else {
        names
    }
}

fn write_added(
    writer: &ProjectWriter,
    role: &str,
    module: &str,
    added: &[AddedPage],
) -> Result<(), WriteError> {
    for page in added {
        let description = format!("{} page", page.name);
        writer.write_page(
            &page.url,
            &PageContext {
                page_name: &page.name,
                page_description: &description,
                role_name: role,
                module_name: module,
            },
        )?;
    }
    Ok(())
}
