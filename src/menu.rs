//! The `menu.json` navigation tree.
//!
//! `menu.json` is what the generated `index.html` fetches to build its sidebar,
//! and after creation it is also the authoritative record of the project's
//! shape. The original config is not consulted again: `add-*` and
//! `update-page` load the menu, mutate it, and write it back.
//!
//! ```json
//! [
//!   {
//!     "name": "Buyer",
//!     "description": "Shoppers placing orders",
//!     "modules": [
//!       {
//!         "name": "Cart",
//!         "description": "Basket and checkout",
//!         "pages": [
//!           {
//!             "name": "Cart overview",
//!             "url": "pages/role1/moduleA/page1.html",
//!             "status": "pending",
//!             "completed_at": null,
//!             "priority": "normal"
//!           }
//!         ]
//!       }
//!     ]
//!   }
//! ]
//! ```
//!
//! ## Append-only growth
//!
//! A page's URL is fixed when it is first added. New roles, modules and pages
//! take the next free slot after every existing sibling, so files generated
//! earlier are never renamed or overwritten.
//!
//! ## Persistence
//!
//! [`Menu::save`] writes to a temporary file next to `menu.json` and renames
//! it into place. A crash mid-write leaves the previous menu intact. The
//! replacement keeps the old file's permissions, or gets the same umask-derived
//! mode as the other generated files when there is no old file, so a web server
//! running as another user can still fetch it.

use crate::naming::{self, PagePosition};
use crate::types::{PageStatus, Project, StructureError, default_priority, ensure_unique};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const MENU_FILE: &str = "menu.json";

#[derive(Error, Debug)]
pub enum MenuError {
    #[error("menu file not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("menu JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("could not replace menu file: {0}")]
    Persist(#[from] tempfile::PersistError),
    #[error("menu structure error: {0}")]
    Structure(#[from] StructureError),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Menu {
    pub roles: Vec<MenuRole>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuRole {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default)]
    pub modules: Vec<MenuModule>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuModule {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default)]
    pub pages: Vec<MenuPage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuPage {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub status: PageStatus,
    #[serde(default)]
    pub completed_at: Option<NaiveDateTime>,
    #[serde(default = "default_priority")]
    pub priority: String,
}

impl MenuPage {
    fn pending(name: &str, url: String) -> Self {
        Self {
            name: name.to_string(),
            url,
            status: PageStatus::Pending,
            completed_at: None,
            priority: default_priority(),
        }
    }
}

/// Indices of a page inside the menu vectors (not its URL position).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuIndex {
    pub role: usize,
    pub module: usize,
    pub page: usize,
}

/// Where a newly added page landed.
#[derive(Debug, Clone, PartialEq)]
pub struct AddedPage {
    pub name: String,
    pub position: PagePosition,
    pub url: String,
}

/// Completion summary across the whole menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub total: usize,
    pub completed: usize,
}

impl Progress {
    /// Whole-number percentage, rounded half up. Zero pages is 0%.
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        ((self.completed as f64 / self.total as f64) * 100.0).round() as u32
    }
}

impl Menu {
    /// Derive the menu from a project outline, assigning positional URLs.
    pub fn from_project(project: &Project) -> Self {
        let roles = project
            .roles
            .iter()
            .enumerate()
            .map(|(ri, role)| MenuRole {
                name: role.name.clone(),
                description: role.description.clone(),
                modules: role
                    .modules
                    .iter()
                    .enumerate()
                    .map(|(mi, module)| MenuModule {
                        name: module.name.clone(),
                        description: module.description.clone(),
                        pages: module
                            .pages
                            .iter()
                            .enumerate()
                            .map(|(pi, page)| MenuPage {
                                name: page.name.clone(),
                                url: PagePosition::new(ri, mi, pi).url(),
                                status: page.status,
                                completed_at: page.completed_at,
                                priority: page.priority.clone(),
                            })
                            .collect(),
                    })
                    .collect(),
            })
            .collect();
        Self { roles }
    }

    pub fn path(project_dir: &Path) -> PathBuf {
        project_dir.join(MENU_FILE)
    }

    /// Read and validate `menu.json` from a project directory.
    pub fn load(project_dir: &Path) -> Result<Self, MenuError> {
        let path = Self::path(project_dir);
        if !path.exists() {
            return Err(MenuError::NotFound(path));
        }
        let content = fs::read_to_string(&path)?;
        let menu: Menu = serde_json::from_str(&content)?;
        menu.validate()?;
        Ok(menu)
    }

    pub fn to_json(&self) -> Result<String, MenuError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Atomically replace `menu.json` in `project_dir`.
    pub fn save(&self, project_dir: &Path) -> Result<(), MenuError> {
        let json = self.to_json()?;
        let path = Self::path(project_dir);
        let mut tmp = menu_temp_file(project_dir)?;
        tmp.write_all(json.as_bytes())?;
        tmp.flush()?;
        if let Ok(meta) = fs::metadata(&path) {
            tmp.as_file().set_permissions(meta.permissions())?;
        }
        tmp.persist(path)?;
        Ok(())
    }

    /// Sibling names unique at every level.
    pub fn validate(&self) -> Result<(), StructureError> {
        ensure_unique("role", self.roles.iter().map(|r| r.name.as_str()))?;
        for role in &self.roles {
            ensure_unique("module", role.modules.iter().map(|m| m.name.as_str()))?;
            for module in &role.modules {
                ensure_unique("page", module.pages.iter().map(|p| p.name.as_str()))?;
            }
        }
        Ok(())
    }

    pub fn pages(&self) -> impl Iterator<Item = (MenuIndex, &MenuPage)> {
        self.roles.iter().enumerate().flat_map(|(ri, role)| {
            role.modules.iter().enumerate().flat_map(move |(mi, module)| {
                module.pages.iter().enumerate().map(move |(pi, page)| {
                    (
                        MenuIndex {
                            role: ri,
                            module: mi,
                            page: pi,
                        },
                        page,
                    )
                })
            })
        })
    }

    pub fn page(&self, idx: MenuIndex) -> Option<&MenuPage> {
        self.roles
            .get(idx.role)?
            .modules
            .get(idx.module)?
            .pages
            .get(idx.page)
    }

    pub fn page_mut(&mut self, idx: MenuIndex) -> Option<&mut MenuPage> {
        self.roles
            .get_mut(idx.role)?
            .modules
            .get_mut(idx.module)?
            .pages
            .get_mut(idx.page)
    }

    pub fn role_index(&self, name: &str) -> Option<usize> {
        self.roles.iter().position(|r| r.name == name)
    }

    /// Find a page by name, optionally narrowed to a role and module.
    ///
    /// Page names are only unique within a module, so a bare name that matches
    /// in several modules is reported as ambiguous rather than guessed.
    pub fn locate_page(
        &self,
        name: &str,
        role: Option<&str>,
        module: Option<&str>,
    ) -> Result<MenuIndex, StructureError> {
        let matches: Vec<MenuIndex> = self
            .pages()
            .filter(|(idx, page)| {
                page.name == name
                    && role.is_none_or(|r| self.roles[idx.role].name == r)
                    && module.is_none_or(|m| self.roles[idx.role].modules[idx.module].name == m)
            })
            .map(|(idx, _)| idx)
            .collect();
        match matches.as_slice() {
            [] => Err(StructureError::PageNotFound(name.to_string())),
            [only] => Ok(*only),
            many => Err(StructureError::AmbiguousPage {
                name: name.to_string(),
                count: many.len(),
            }),
        }
    }

    /// Set a page's status. Completing a page stamps `completed_at`; any other
    /// status leaves the existing timestamp alone.
    pub fn set_status(
        &mut self,
        idx: MenuIndex,
        status: PageStatus,
        now: NaiveDateTime,
    ) -> Result<&MenuPage, StructureError> {
        let page = self
            .page_mut(idx)
            .ok_or_else(|| StructureError::PageNotFound(format!("{idx:?}")))?;
        page.status = status;
        if status == PageStatus::Completed {
            page.completed_at = Some(now);
        }
        Ok(&*page)
    }

    /// Append a page to an existing module.
    ///
    /// Fails without touching the menu if the role or module is missing or the
    /// module already has a page with that name.
    pub fn add_page(
        &mut self,
        role: &str,
        module: &str,
        page: &str,
    ) -> Result<AddedPage, StructureError> {
        let ri = self
            .role_index(role)
            .ok_or_else(|| StructureError::RoleNotFound(role.to_string()))?;
        let mi = self.roles[ri]
            .modules
            .iter()
            .position(|m| m.name == module)
            .ok_or_else(|| StructureError::ModuleNotFound {
                role: role.to_string(),
                module: module.to_string(),
            })?;
        let target = &self.roles[ri].modules[mi];
        ensure_unique(
            "page",
            target.pages.iter().map(|p| p.name.as_str()).chain([page]),
        )?;

        let position = PagePosition {
            role: self.role_slot(ri),
            module: self.module_slot(ri, mi),
            page: next_slot(
                target.pages.len(),
                target
                    .pages
                    .iter()
                    .filter_map(|p| naming::parse_page_url(&p.url))
                    .map(|p| p.page),
            ),
        };
        let added = AddedPage {
            name: page.to_string(),
            position,
            url: position.url(),
        };
        self.roles[ri].modules[mi]
            .pages
            .push(MenuPage::pending(page, added.url.clone()));
        Ok(added)
    }

    /// Append a module, with its pages, to an existing role.
    pub fn add_module(
        &mut self,
        role: &str,
        module: &str,
        description: &str,
        pages: &[String],
    ) -> Result<Vec<AddedPage>, StructureError> {
        let ri = self
            .role_index(role)
            .ok_or_else(|| StructureError::RoleNotFound(role.to_string()))?;
        let existing = &self.roles[ri].modules;
        ensure_unique(
            "module",
            existing.iter().map(|m| m.name.as_str()).chain([module]),
        )?;
        ensure_unique("page", pages.iter().map(String::as_str))?;

        let role_slot = self.role_slot(ri);
        let module_slot = next_slot(
            existing.len(),
            existing
                .iter()
                .flat_map(|m| &m.pages)
                .filter_map(|p| naming::parse_page_url(&p.url))
                .map(|p| p.module),
        );
        let added = appended_pages(role_slot, module_slot, pages);
        self.roles[ri].modules.push(MenuModule {
            name: module.to_string(),
            description: description.to_string(),
            pages: added
                .iter()
                .map(|a| MenuPage::pending(&a.name, a.url.clone()))
                .collect(),
        });
        Ok(added)
    }

    /// Append a role holding a single module with the given pages.
    pub fn add_role(
        &mut self,
        role: &str,
        description: &str,
        module: &str,
        pages: &[String],
    ) -> Result<Vec<AddedPage>, StructureError> {
        ensure_unique(
            "role",
            self.roles.iter().map(|r| r.name.as_str()).chain([role]),
        )?;
        ensure_unique("module", [module])?;
        ensure_unique("page", pages.iter().map(String::as_str))?;

        let role_slot = next_slot(
            self.roles.len(),
            self.pages()
                .filter_map(|(_, p)| naming::parse_page_url(&p.url))
                .map(|p| p.role),
        );
        let added = appended_pages(role_slot, 0, pages);
        self.roles.push(MenuRole {
            name: role.to_string(),
            description: description.to_string(),
            modules: vec![MenuModule {
                name: module.to_string(),
                description: String::new(),
                pages: added
                    .iter()
                    .map(|a| MenuPage::pending(&a.name, a.url.clone()))
                    .collect(),
            }],
        });
        Ok(added)
    }

    pub fn progress(&self) -> Progress {
        let mut progress = Progress {
            total: 0,
            completed: 0,
        };
        for (_, page) in self.pages() {
            progress.total += 1;
            if page.status == PageStatus::Completed {
                progress.completed += 1;
            }
        }
        progress
    }

    /// Directory slot of role `ri`: taken from its pages' URLs when they
    /// follow the positional pattern, else its index.
    fn role_slot(&self, ri: usize) -> usize {
        self.roles[ri]
            .modules
            .iter()
            .flat_map(|m| &m.pages)
            .find_map(|p| naming::parse_page_url(&p.url))
            .map(|p| p.role)
            .unwrap_or(ri)
    }

    fn module_slot(&self, ri: usize, mi: usize) -> usize {
        self.roles[ri].modules[mi]
            .pages
            .iter()
            .find_map(|p| naming::parse_page_url(&p.url))
            .map(|p| p.module)
            .unwrap_or(mi)
    }
}

/// Temp files are created 0600 by default. Ask for 0666 so the umask applies
/// exactly as it does to a plain write.
fn menu_temp_file(dir: &Path) -> std::io::Result<tempfile::NamedTempFile> {
    let mut builder = tempfile::Builder::new();
    builder.prefix(".menu-");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    builder.tempfile_in(dir)
}

/// First slot after both the sibling count and every slot already in use.
fn next_slot(len: usize, used: impl Iterator<Item = usize>) -> usize {
    used.map(|u| u + 1).max().unwrap_or(0).max(len)
}

fn appended_pages(role: usize, module: usize, pages: &[String]) -> Vec<AddedPage> {
    pages
        .iter()
        .enumerate()
        .map(|(pi, name)| {
            let position = PagePosition::new(role, module, pi);
            AddedPage {
                name: name.clone(),
                position,
                url: position.url(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    #[test]
    fn counts_match_project() {
        let project = sample_project();
        let menu = Menu::from_project(&project);

        assert_eq!(menu.roles.len(), project.roles.len());
        for (role, menu_role) in project.roles.iter().zip(&menu.roles) {
            assert_eq!(role.modules.len(), menu_role.modules.len());
            for (module, menu_module) in role.modules.iter().zip(&menu_role.modules) {
                assert_eq!(module.pages.len(), menu_module.pages.len());
            }
        }
    }

    #[test]
    fn urls_follow_position() {
        let menu = Menu::from_project(&sample_project());
        for (idx, page) in menu.pages() {
            let expected = format!(
                "pages/role{}/module{}/page{}.html",
                idx.role + 1,
                naming::module_letter(idx.module),
                idx.page + 1
            );
            assert_eq!(page.url, expected);
        }
    }

    #[test]
    fn serializes_null_completed_at() {
        let menu = Menu::from_project(&sample_project());
        let json = menu.to_json().unwrap();
        assert!(json.trim_start().starts_with('['));
        assert!(json.contains(r#""completed_at": null"#));
        assert!(json.contains(r#""priority": "normal""#));
        assert!(json.contains(r#""status": "pending""#));
    }

    #[test]
    fn save_then_load_roundtrip() {
        let tmp = TempDir::new().unwrap();
        let mut menu = Menu::from_project(&sample_project());
        let idx = menu.locate_page("Checkout", None, None).unwrap();
        menu.set_status(idx, PageStatus::Completed, fixed_now())
            .unwrap();

        menu.save(tmp.path()).unwrap();
        let loaded = Menu::load(tmp.path()).unwrap();
        assert_eq!(loaded, menu);
    }

    #[test]
    fn save_leaves_no_temp_files() {
        let tmp = TempDir::new().unwrap();
        Menu::from_project(&sample_project())
            .save(tmp.path())
            .unwrap();
        let names: Vec<String> = fs::read_dir(tmp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec![MENU_FILE.to_string()]);
    }

    #[cfg(unix)]
    #[test]
    fn saved_menu_has_plain_file_mode() {
        use std::os::unix::fs::PermissionsExt;
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("index.html"), "<html></html>").unwrap();
        Menu::default().save(tmp.path()).unwrap();

        let mode = |name: &str| {
            fs::metadata(tmp.path().join(name))
                .unwrap()
                .permissions()
                .mode()
                & 0o777
        };
        assert_eq!(mode(MENU_FILE), mode("index.html"));
    }

    #[cfg(unix)]
    #[test]
    fn save_keeps_existing_menu_mode() {
        use std::os::unix::fs::PermissionsExt;
        let tmp = TempDir::new().unwrap();
        let menu = Menu::from_project(&sample_project());
        menu.save(tmp.path()).unwrap();
        let path = Menu::path(tmp.path());
        fs::set_permissions(&path, fs::Permissions::from_mode(0o640)).unwrap();

        menu.save(tmp.path()).unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o640);
    }

    #[test]
    fn descriptions_round_trip_and_stay_optional() {
        let tmp = TempDir::new().unwrap();
        let menu = Menu::from_project(&sample_project());
        assert_eq!(menu.roles[0].description, "Buyer role");
        assert_eq!(menu.roles[0].modules[0].description, "Cart module");
        menu.save(tmp.path()).unwrap();
        assert_eq!(Menu::load(tmp.path()).unwrap(), menu);

        let mut bare = menu.clone();
        bare.roles[1].description.clear();
        let json = bare.to_json().unwrap();
        assert_eq!(json.matches(r#""description""#).count(), 4);
    }

    #[test]
    fn load_missing_menu() {
        let tmp = TempDir::new().unwrap();
        assert!(matches!(Menu::load(tmp.path()), Err(MenuError::NotFound(_))));
    }

    #[test]
    fn load_accepts_microsecond_timestamp() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(MENU_FILE),
            r#"[{"name": "R", "modules": [{"name": "M", "pages": [
                {"name": "P", "url": "pages/role1/moduleA/page1.html",
                 "status": "completed", "completed_at": "2024-05-01T09:30:12.123456",
                 "priority": "high"}
            ]}]}]"#,
        )
        .unwrap();
        let menu = Menu::load(tmp.path()).unwrap();
        let page = &menu.roles[0].modules[0].pages[0];
        assert_eq!(page.status, PageStatus::Completed);
        assert!(page.completed_at.is_some());
        assert_eq!(page.priority, "high");
    }

    #[test]
    fn load_rejects_duplicate_roles() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(MENU_FILE),
            r#"[{"name": "R", "modules": []}, {"name": "R", "modules": []}]"#,
        )
        .unwrap();
        assert!(matches!(
            Menu::load(tmp.path()),
            Err(MenuError::Structure(StructureError::Duplicate { .. }))
        ));
    }

    // =========================================================================
    // Mutation tests
    // =========================================================================

    #[test]
    fn add_page_appends() {
        let mut menu = Menu::from_project(&sample_project());
        let before = menu_urls(&menu);

        let added = menu.add_page("Buyer", "Cart", "Coupons").unwrap();
        assert_eq!(added.url, "pages/role1/moduleA/page3.html");

        let after = menu_urls(&menu);
        assert!(before.iter().all(|u| after.contains(u)));
        assert_eq!(after.len(), before.len() + 1);
    }

    #[test]
    fn add_page_unknown_role_leaves_menu_unchanged() {
        let mut menu = Menu::from_project(&sample_project());
        let original = menu.clone();
        let err = menu.add_page("Nobody", "Cart", "X").unwrap_err();
        assert_eq!(err, StructureError::RoleNotFound("Nobody".into()));
        assert_eq!(menu, original);
    }

    #[test]
    fn add_page_unknown_module_leaves_menu_unchanged() {
        let mut menu = Menu::from_project(&sample_project());
        let original = menu.clone();
        let err = menu.add_page("Buyer", "Wishlist", "X").unwrap_err();
        assert!(matches!(err, StructureError::ModuleNotFound { .. }));
        assert_eq!(menu, original);
    }

    #[test]
    fn add_page_duplicate_name_leaves_menu_unchanged() {
        let mut menu = Menu::from_project(&sample_project());
        let original = menu.clone();
        let err = menu.add_page("Buyer", "Cart", "Checkout").unwrap_err();
        assert!(matches!(err, StructureError::Duplicate { kind: "page", .. }));
        assert_eq!(menu, original);
    }

    #[test]
    fn add_page_skips_slots_still_on_disk() {
        // page2 was removed from the menu by hand; page3 still exists.
        let mut menu = Menu::from_project(&sample_project());
        menu.roles[0].modules[0].pages[1].url = "pages/role1/moduleA/page3.html".into();

        let added = menu.add_page("Buyer", "Cart", "Coupons").unwrap();
        assert_eq!(added.url, "pages/role1/moduleA/page4.html");
    }

    #[test]
    fn add_module_appends_letter() {
        let mut menu = Menu::from_project(&sample_project());
        let added = menu
            .add_module("Buyer", "Wishlist", "", &["Saved".into(), "Shared".into()])
            .unwrap();
        let urls: Vec<&str> = added.iter().map(|a| a.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "pages/role1/moduleC/page1.html",
                "pages/role1/moduleC/page2.html"
            ]
        );
        assert_eq!(menu.roles[0].modules.last().unwrap().name, "Wishlist");
        assert!(menu.roles[0].modules.last().unwrap().description.is_empty());
    }

    #[test]
    fn add_module_duplicate_rejected() {
        let mut menu = Menu::from_project(&sample_project());
        let original = menu.clone();
        assert!(menu.add_module("Buyer", "Cart", "", &["A".into()]).is_err());
        assert!(
            menu.add_module("Buyer", "New", "", &["A".into(), "A".into()])
                .is_err()
        );
        assert_eq!(menu, original);
    }

    #[test]
    fn add_role_appends_role_dir() {
        let mut menu = Menu::from_project(&sample_project());
        let added = menu
            .add_role("Auditor", "Compliance checks", "Reports", &["Summary".into()])
            .unwrap();
        assert_eq!(added[0].url, "pages/role3/moduleA/page1.html");
        assert_eq!(menu.roles.len(), 3);
        assert_eq!(menu.roles[2].description, "Compliance checks");
        assert!(menu.roles[2].modules[0].description.is_empty());
    }

    #[test]
    fn add_role_duplicate_rejected() {
        let mut menu = Menu::from_project(&sample_project());
        let err = menu.add_role("Buyer", "", "M", &["P".into()]).unwrap_err();
        assert!(matches!(err, StructureError::Duplicate { kind: "role", .. }));
    }

    // =========================================================================
    // Lookup and status tests
    // =========================================================================

    #[test]
    fn locate_page_by_name() {
        let menu = Menu::from_project(&sample_project());
        let idx = menu.locate_page("Checkout", None, None).unwrap();
        assert_eq!(menu.page(idx).unwrap().name, "Checkout");
    }

    #[test]
    fn locate_page_ambiguous_without_filters() {
        let menu = Menu::from_project(&sample_project());
        // "Dashboard" exists under both roles.
        let err = menu.locate_page("Dashboard", None, None).unwrap_err();
        assert_eq!(
            err,
            StructureError::AmbiguousPage {
                name: "Dashboard".into(),
                count: 2
            }
        );
        let idx = menu.locate_page("Dashboard", Some("Seller"), None).unwrap();
        assert_eq!(menu.roles[idx.role].name, "Seller");
    }

    #[test]
    fn locate_missing_page() {
        let menu = Menu::from_project(&sample_project());
        assert_eq!(
            menu.locate_page("Nope", None, None).unwrap_err(),
            StructureError::PageNotFound("Nope".into())
        );
    }

    #[test]
    fn completing_sets_timestamp() {
        let mut menu = Menu::from_project(&sample_project());
        let idx = menu.locate_page("Checkout", None, None).unwrap();
        let page = menu
            .set_status(idx, PageStatus::Completed, fixed_now())
            .unwrap();
        assert_eq!(page.completed_at, Some(fixed_now()));
    }

    #[test]
    fn other_status_keeps_timestamp() {
        let mut menu = Menu::from_project(&sample_project());
        let idx = menu.locate_page("Checkout", None, None).unwrap();

        menu.set_status(idx, PageStatus::InProgress, fixed_now())
            .unwrap();
        assert_eq!(menu.page(idx).unwrap().completed_at, None);

        menu.set_status(idx, PageStatus::Completed, fixed_now())
            .unwrap();
        let later = fixed_now() + chrono::Duration::hours(1);
        menu.set_status(idx, PageStatus::Optimizing, later).unwrap();
        let page = menu.page(idx).unwrap();
        assert_eq!(page.status, PageStatus::Optimizing);
        assert_eq!(page.completed_at, Some(fixed_now()));
    }

    #[test]
    fn progress_rounds() {
        let mut menu = Menu::from_project(&sample_project());
        assert_eq!(menu.progress().percent(), 0);

        let idx = menu.locate_page("Checkout", None, None).unwrap();
        menu.set_status(idx, PageStatus::Completed, fixed_now())
            .unwrap();
        let progress = menu.progress();
        assert_eq!(progress.completed, 1);
        assert_eq!(progress.total, 5);
        assert_eq!(progress.percent(), 20);
    }

    #[test]
    fn empty_progress_is_zero() {
        assert_eq!(Menu::default().progress().percent(), 0);
    }
}
