//! # Protogen
//!
//! Scaffolds low-fidelity HTML prototypes from a role → module → page outline.
//! A generated project is a folder of static files: a navigator page with a
//! searchable menu and progress bar, one wireframe per page, and a
//! `menu.json` that records every page's URL and progress status.
//!
//! # Architecture: Outline In, Menu Forward
//!
//! ```text
//! create       config.json  →  Project  →  Menu + files     (full scaffold)
//! add-*        menu.json    →  Menu     →  menu.json + new page files
//! update-page  menu.json    →  Menu     →  menu.json (+ replaced page file)
//! ```
//!
//! The JSON config is only read by `create`. After that `menu.json` is the
//! record of the project's shape and every other command goes through it.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | JSON outline loading, shallow merge over the stock default, validation |
//! | [`types`] | The typed outline (`Project`, `Role`, `Module`, `PageSpec`) and `PageStatus` |
//! | [`naming`] | Positional page paths: `pages/role{R}/module{L}/page{P}.html` |
//! | [`menu`] | `menu.json` model: derivation, lookups, append-only growth, atomic save |
//! | [`generate`] | Maud renderers for the navigator, pages, stylesheet and tracker script |
//! | [`docs`] | `design-standards.md` and `README.md` |
//! | [`writer`] | Filesystem output rooted at the project directory |
//! | [`lock`] | Exclusive lock file held by commands that rewrite `menu.json` |
//! | [`commands`] | One function per subcommand |
//! | [`check`] | `menu.json` vs. disk consistency check |
//! | [`markup`] | Tag-balance and accessibility scan of page files |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Positions, Not Names, in Paths
//!
//! Page files are named by position, so a page can be renamed in `menu.json`
//! without touching disk. The cost is that reordering would move files, which
//! is why `add-*` commands only ever append and always take a slot past every
//! one already in use.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/). Outline names
//! come from user config and are escaped on interpolation; the only raw HTML
//! written is page content the user imports on purpose.
//!
//! ## Read-Modify-Write Under a Lock
//!
//! `menu.json` is saved through a temp file and rename, and every command that
//! changes it holds `.protogen.lock` from load to save. A concurrent run fails
//! immediately instead of losing an update.

pub mod check;
pub mod commands;
pub mod config;
pub mod docs;
pub mod generate;
pub mod lock;
pub mod markup;
pub mod menu;
pub mod naming;
pub mod output;
pub mod types;
pub mod writer;

#[cfg(test)]
pub(crate) mod test_helpers;
