//! CLI output formatting for every command.
//!
//! # Outline-First Display
//!
//! Output follows the prototype's outline, not the filesystem. Each role,
//! module and page leads with its 1-based position among its siblings and its
//! name; the generated file is shown after an arrow.
//!
//! ## create
//!
//! ```text
//! Created Shop (mobile) in proto
//! 001 Buyer
//!     001 Cart
//!         001 Cart overview → pages/role1/moduleA/page1.html
//!         002 Checkout → pages/role1/moduleA/page2.html
//!
//! Generated 2 roles, 3 modules, 5 pages
//! ```
//!
//! ## status
//!
//! ```text
//! 001 Buyer
//!     001 Cart
//!         001 Cart overview [pending]
//!         002 Checkout [completed 2024-05-01 09:30]
//!
//! Progress: 1/5 pages completed (20%)
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::check::CheckReport;
use crate::commands::{AddReport, CreateReport, UpdateReport};
use crate::menu::{Menu, MenuPage};
use crate::naming::PagePosition;
use crate::types::PageStatus;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn status_label(page: &MenuPage) -> String {
    match (page.status, page.completed_at) {
        (PageStatus::Completed, Some(at)) => {
            format!("[completed {}]", at.format("%Y-%m-%d %H:%M"))
        }
        (status, _) => format!("[{status}]"),
    }
}

// ============================================================================
// create
// ============================================================================

pub fn format_create_output(report: &CreateReport) -> Vec<String> {
    let mut lines = vec![format!(
        "Created {} ({}) in {}",
        report.project.name,
        report.platform.label(),
        report.root.display()
    )];
    let mut modules = 0;
    for (ri, role) in report.project.roles.iter().enumerate() {
        lines.push(format!("{} {}", format_index(ri + 1), role.name));
        for (mi, module) in role.modules.iter().enumerate() {
            modules += 1;
            lines.push(format!(
                "{}{} {}",
                indent(1),
                format_index(mi + 1),
                module.name
            ));
            for (pi, page) in module.pages.iter().enumerate() {
                lines.push(format!(
                    "{}{} {} → {}",
                    indent(2),
                    format_index(pi + 1),
                    page.name,
                    PagePosition::new(ri, mi, pi).url()
                ));
            }
        }
    }
    lines.push(String::new());
    lines.push(format!(
        "Generated {} roles, {} modules, {} pages",
        report.project.roles.len(),
        modules,
        report.pages_written
    ));
    lines
}

pub fn print_create_output(report: &CreateReport) {
    for line in format_create_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// update-page
// ============================================================================

pub fn format_update_output(report: &UpdateReport) -> Vec<String> {
    let mut lines = vec![format!(
        "{} > {} > {}",
        report.role, report.module, report.page.name
    )];
    if report.status_changed {
        lines.push(format!("{}Status: {}", indent(1), status_label(&report.page)));
    }
    if report.content_written.is_some() {
        lines.push(format!("{}Content → {}", indent(1), report.page.url));
    }
    lines
}

pub fn print_update_output(report: &UpdateReport) {
    for line in format_update_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// add-page / add-module / add-role
// ============================================================================

/// `kind` is what was added: `page`, `module` or `role`.
pub fn format_add_output(kind: &str, report: &AddReport) -> Vec<String> {
    let mut lines = vec![format!("Added {kind} to {} > {}", report.role, report.module)];
    if let Some(desc) = report.description.as_deref().filter(|d| !d.is_empty()) {
        lines.push(format!("{}Description: {}", indent(1), desc));
    }
    for page in &report.added {
        lines.push(format!(
            "{}{} {} → {}",
            indent(1),
            format_index(page.position.page + 1),
            page.name,
            page.url
        ));
    }
    lines
}

pub fn print_add_output(kind: &str, report: &AddReport) {
    for line in format_add_output(kind, report) {
        println!("{}", line);
    }
}

// ============================================================================
// status
// ============================================================================

pub fn format_status_output(menu: &Menu) -> Vec<String> {
    let mut lines = Vec::new();
    for (ri, role) in menu.roles.iter().enumerate() {
        lines.push(format!("{} {}", format_index(ri + 1), role.name));
        for (mi, module) in role.modules.iter().enumerate() {
            lines.push(format!(
                "{}{} {}",
                indent(1),
                format_index(mi + 1),
                module.name
            ));
            for (pi, page) in module.pages.iter().enumerate() {
                lines.push(format!(
                    "{}{} {} {}",
                    indent(2),
                    format_index(pi + 1),
                    page.name,
                    status_label(page)
                ));
            }
        }
    }
    let progress = menu.progress();
    lines.push(String::new());
    lines.push(format!(
        "Progress: {}/{} pages completed ({}%)",
        progress.completed,
        progress.total,
        progress.percent()
    ));
    lines
}

pub fn print_status_output(menu: &Menu) {
    for line in format_status_output(menu) {
        println!("{}", line);
    }
}

// ============================================================================
// check
// ============================================================================

pub fn format_check_output(report: &CheckReport) -> Vec<String> {
    let mut lines = Vec::new();
    for url in &report.missing {
        lines.push(format!("Missing: {url}"));
    }
    for url in &report.irregular {
        lines.push(format!("Irregular URL: {url}"));
    }
    for url in &report.orphans {
        lines.push(format!("Orphan: {url}"));
    }
    for found in &report.markup {
        lines.push(format!("Markup: {}: {}", found.url, found.issue));
    }
    if report.stale_lock {
        lines.push("Lock file present: another run is active or one was interrupted".into());
    }
    lines.push(format!("Checked {} pages", report.pages));
    lines
}

pub fn print_check_output(report: &CheckReport) {
    for line in format_check_output(report) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::PageMarkup;
    use crate::markup::MarkupIssue;
    use crate::menu::AddedPage;
    use crate::test_helpers::*;
    use crate::types::Platform;
    use std::path::PathBuf;

    fn create_report() -> CreateReport {
        CreateReport {
            root: PathBuf::from("proto"),
            project: sample_project(),
            platform: Platform::Mobile,
            pages_written: 5,
        }
    }

    #[test]
    fn create_output_lists_outline() {
        let lines = format_create_output(&create_report());
        assert_eq!(lines[0], "Created Shop (mobile) in proto");
        assert_eq!(lines[1], "001 Buyer");
        assert_eq!(lines[2], "    001 Cart");
        assert_eq!(
            lines[3],
            "        001 Cart overview → pages/role1/moduleA/page1.html"
        );
        assert_eq!(
            lines.last().unwrap(),
            "Generated 2 roles, 3 modules, 5 pages"
        );
    }

    #[test]
    fn status_output_shows_completion() {
        let mut menu = Menu::from_project(&sample_project());
        let idx = menu.locate_page("Checkout", None, None).unwrap();
        menu.set_status(idx, PageStatus::Completed, fixed_now())
            .unwrap();

        let lines = format_status_output(&menu);
        assert!(lines.contains(&"        001 Cart overview [pending]".to_string()));
        assert!(lines.contains(&"        002 Checkout [completed 2024-05-01 09:30]".to_string()));
        assert_eq!(
            lines.last().unwrap(),
            "Progress: 1/5 pages completed (20%)"
        );
    }

    #[test]
    fn update_output_only_reports_changes() {
        let menu = Menu::from_project(&sample_project());
        let page = find_menu_page(&menu, "Buyer", "Cart", "Checkout").clone();
        let report = UpdateReport {
            role: "Buyer".into(),
            module: "Cart".into(),
            page,
            status_changed: true,
            content_written: None,
        };
        let lines = format_update_output(&report);
        assert_eq!(lines, vec!["Buyer > Cart > Checkout", "    Status: [pending]"]);
    }

    #[test]
    fn add_output_lists_pages() {
        let position = PagePosition::new(0, 2, 0);
        let report = AddReport {
            role: "Buyer".into(),
            module: "Wishlist".into(),
            description: Some("Saved items".into()),
            added: vec![AddedPage {
                name: "Saved".into(),
                position,
                url: position.url(),
            }],
        };
        let lines = format_add_output("module", &report);
        assert_eq!(
            lines,
            vec![
                "Added module to Buyer > Wishlist",
                "    Description: Saved items",
                "    001 Saved → pages/role1/moduleC/page1.html",
            ]
        );
    }

    #[test]
    fn check_output_lists_problems() {
        let report = CheckReport {
            pages: 3,
            missing: vec!["pages/role1/moduleA/page1.html".into()],
            irregular: vec![],
            orphans: vec!["pages/role1/moduleA/page9.html".into()],
            markup: vec![PageMarkup {
                url: "pages/role1/moduleA/page2.html".into(),
                issue: MarkupIssue::ImageWithoutAlt,
            }],
            stale_lock: false,
        };
        assert_eq!(
            format_check_output(&report),
            vec![
                "Missing: pages/role1/moduleA/page1.html",
                "Orphan: pages/role1/moduleA/page9.html",
                "Markup: pages/role1/moduleA/page2.html: <img> without alt",
                "Checked 3 pages",
            ]
        );
    }
}
