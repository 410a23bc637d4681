//! Shared test utilities for the protogen test suite.
//!
//! Provides a small in-memory project outline, a fixed clock, and lookup
//! helpers over the menu tree.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let menu = Menu::from_project(&sample_project());
//! let page = find_menu_page(&menu, "Buyer", "Cart", "Checkout");
//! assert_eq!(page.url, "pages/role1/moduleA/page2.html");
//!
//! assert_menu_shape(&menu, &[
//!     ("Buyer", &["Cart", "Account"]),
//!     ("Seller", &["Inventory"]),
//! ]);
//! ```

use chrono::{NaiveDate, NaiveDateTime};
use std::path::Path;

use crate::menu::{Menu, MenuPage};
use crate::types::{Module, PageSpec, Project, Role};

// =========================================================================
// Fixtures
// =========================================================================

/// Two roles, three modules, five pages. `Dashboard` appears under both
/// roles so bare-name lookups are ambiguous.
pub fn sample_project() -> Project {
    Project::new(
        "Shop",
        "Checkout flow wireframes",
        vec![
            role(
                "Buyer",
                vec![
                    module("Cart", &["Cart overview", "Checkout"]),
                    module("Account", &["Dashboard"]),
                ],
            ),
            role("Seller", vec![module("Inventory", &["Dashboard", "Stock"])]),
        ],
    )
    .unwrap()
}

pub fn role(name: &str, modules: Vec<Module>) -> Role {
    Role {
        name: name.to_string(),
        description: format!("{name} role"),
        modules,
    }
}

pub fn module(name: &str, pages: &[&str]) -> Module {
    Module {
        name: name.to_string(),
        description: format!("{name} module"),
        pages: pages
            .iter()
            .map(|p| PageSpec::new(*p, format!("{p} page")))
            .collect(),
    }
}

/// 2024-05-01 09:30:00.
pub fn fixed_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, 1)
        .and_then(|d| d.and_hms_opt(9, 30, 0))
        .unwrap()
}

// =========================================================================
// Menu lookups: panic with a clear message on miss
// =========================================================================

/// Find a page by role, module and page name. Panics if not found.
pub fn find_menu_page<'a>(menu: &'a Menu, role: &str, module: &str, page: &str) -> &'a MenuPage {
    let found_role = menu
        .roles
        .iter()
        .find(|r| r.name == role)
        .unwrap_or_else(|| panic!("role '{role}' not found. Available: {:?}", role_names(menu)));
    let found_module = found_role
        .modules
        .iter()
        .find(|m| m.name == module)
        .unwrap_or_else(|| {
            let names: Vec<&str> = found_role.modules.iter().map(|m| m.name.as_str()).collect();
            panic!("module '{module}' not found in role '{role}'. Available: {names:?}")
        });
    found_module
        .pages
        .iter()
        .find(|p| p.name == page)
        .unwrap_or_else(|| {
            let names: Vec<&str> = found_module.pages.iter().map(|p| p.name.as_str()).collect();
            panic!("page '{page}' not found in '{role} > {module}'. Available: {names:?}")
        })
}

pub fn role_names(menu: &Menu) -> Vec<&str> {
    menu.roles.iter().map(|r| r.name.as_str()).collect()
}

/// Every page URL in menu order.
pub fn menu_urls(menu: &Menu) -> Vec<String> {
    menu.pages().map(|(_, p)| p.url.clone()).collect()
}

/// Assert the role/module outline of a menu.
///
/// Each entry is `(role, modules)`.
pub fn assert_menu_shape(menu: &Menu, expected: &[(&str, &[&str])]) {
    let expected_roles: Vec<&str> = expected.iter().map(|(r, _)| *r).collect();
    assert_eq!(role_names(menu), expected_roles, "menu roles mismatch");

    for (role, modules) in expected {
        let actual: Vec<&str> = menu
            .roles
            .iter()
            .find(|r| r.name == *role)
            .map(|r| r.modules.iter().map(|m| m.name.as_str()).collect())
            .unwrap_or_default();
        assert_eq!(actual, modules.to_vec(), "modules of '{role}' mismatch");
    }
}

/// Read a file under the project root. Panics with the path on failure.
pub fn read_project_file(project_dir: &Path, rel: &str) -> String {
    std::fs::read_to_string(project_dir.join(rel))
        .unwrap_or_else(|e| panic!("could not read {rel}: {e}"))
}
