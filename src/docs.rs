//! Markdown documents written alongside a generated prototype.
//!
//! - `design-standards.md`: typography, spacing and layout rules for the
//!   chosen platform, taken from the same [`Layout`] the stylesheet uses
//! - `README.md`: how to open the prototype, the file layout, and a listing
//!   of every role, module and page
//!
//! The page listing is the last section of the README and is rebuilt from
//! `menu.json` whenever the project grows. Everything above it is left as
//! written.

use crate::generate::{Layout, layout};
use crate::menu::{MENU_FILE, Menu};
use crate::types::{Platform, Project};
use std::fmt::Write;

pub const README_FILE: &str = "README.md";

pub fn render_design_standards(project: &Project, platform: Platform) -> String {
    let l: Layout = layout(platform);
    let mut out = String::new();
    let _ = writeln!(out, "# {} - Design Standards\n", project.name);
    let _ = writeln!(out, "Target platform: **{}**\n", platform.label());

    out.push_str("## Typography\n\n");
    out.push_str("| Element | Size |\n|---|---|\n");
    let _ = writeln!(out, "| Title | {}px |", l.title_px);
    let _ = writeln!(out, "| Body | {}px |", l.body_px);
    let _ = writeln!(out, "| Small text | {}px |\n", l.small_px);

    out.push_str("## Spacing\n\n");
    out.push_str("| Rule | Value |\n|---|---|\n");
    let _ = writeln!(out, "| Page margin | {}px |", l.page_margin_px);
    let _ = writeln!(out, "| Between components | {}px |", l.component_gap_px);
    let _ = writeln!(out, "| Between content blocks | {}px |", l.content_gap_px);
    let _ = writeln!(out, "| Button padding | {} |", l.button_padding);
    let _ = writeln!(out, "| Input padding | {}px |", l.input_padding_px);
    let _ = writeln!(out, "| Card padding | {}px |\n", l.card_padding_px);

    out.push_str("## Layout\n\n");
    let _ = writeln!(out, "- Container width: {}", l.container_width);
    let _ = writeln!(out, "- Grid: {}", l.grid);
    let _ = writeln!(out, "- Sizing: {}", l.sizing);
    if platform == Platform::Mobile {
        out.push_str(
            "- Every page renders inside a 375x812 phone frame with a simulated \
             status bar; keep content inside `.page-content`\n",
        );
    }
    out.push('\n');

    out.push_str("## Wireframe Conventions\n\n");
    out.push_str("- Grayscale only; placeholder areas use dashed borders\n");
    out.push_str("- Each page starts with a `role > module` breadcrumb and the page title\n");
    out.push_str("- Primary action first, then secondary actions, then back\n");
    out.push_str("- Page notes list purpose, target user and module\n\n");

    out.push_str("## Status Workflow\n\n");
    out.push_str("`pending` → `in_progress` → `pending_review` → `optimizing` → `completed`\n");
    out
}

pub fn render_readme(project: &Project) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# {}\n", project.name);
    if !project.description.is_empty() {
        let _ = writeln!(out, "{}\n", project.description);
    }

    out.push_str("## Usage\n\n");
    out.push_str(
        "Serve this directory over HTTP (the navigator fetches `menu.json`) and \
         open `index.html`:\n\n```sh\npython3 -m http.server 8000\n```\n\n",
    );
    out.push_str(
        "Right-click a page in the menu to cycle its status. Browser-side status \
         is kept in localStorage; `protogen update-page` records it in `menu.json`.\n\n",
    );

    out.push_str("## Structure\n\n```text\n");
    out.push_str("index.html             # navigator\n");
    out.push_str("style.css              # shared styles\n");
    out.push_str("progress.js            # status tracking\n");
    let _ = writeln!(out, "{MENU_FILE:<23}# navigation tree and progress");
    out.push_str("design-standards.md\n");
    out.push_str("pages/role{N}/module{L}/page{N}.html\n```\n\n");

    out.push_str(&render_page_listing(&Menu::from_project(project)));
    out
}

const PAGES_HEADING: &str = "## Pages\n";

/// The `## Pages` section: counts, then every role, module and page.
pub fn render_page_listing(menu: &Menu) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{PAGES_HEADING}\n{} roles, {} pages.\n",
        menu.roles.len(),
        menu.progress().total
    );
    for role in &menu.roles {
        let _ = writeln!(out, "### {}\n", role.name);
        if !role.description.is_empty() {
            let _ = writeln!(out, "{}\n", role.description);
        }
        for module in &role.modules {
            let _ = write!(out, "- **{}**", module.name);
            if !module.description.is_empty() {
                let _ = write!(out, ": {}", module.description);
            }
            out.push('\n');
            for page in &module.pages {
                let _ = writeln!(out, "  - {}", page.name);
            }
        }
        out.push('\n');
    }
    out
}

/// Replace the page listing of an existing README, or append one if the
/// heading was removed.
pub fn refresh_readme(existing: &str, menu: &Menu) -> String {
    let head = match existing.find(PAGES_HEADING) {
        Some(at) => &existing[..at],
        None => existing,
    };
    let mut out = head.to_string();
    if !out.is_empty() && !out.ends_with("\n\n") {
        out.push_str(if out.ends_with('\n') { "\n" } else { "\n\n" });
    }
    out.push_str(&render_page_listing(menu));
    out
}
