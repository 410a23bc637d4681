//! Positional naming for generated page files.
//!
//! Every page lives at a path derived purely from its position in the tree:
//!
//! ```text
//! pages/role{R}/module{L}/page{P}.html
//!        │          │          └── 1-based page index within the module
//!        │          └── module letter: A, B, … Z, AA, AB, …
//!        └── 1-based role index within the project
//! ```
//!
//! Names never appear in paths, so renaming a page in `menu.json` is free, but
//! reordering siblings would move files. Incremental additions therefore only
//! ever append.

/// Root directory (relative to the project) holding all page files.
pub const PAGES_DIR: &str = "pages";

/// 0-based position of a page in the role/module/page tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagePosition {
    pub role: usize,
    pub module: usize,
    pub page: usize,
}

impl PagePosition {
    pub fn new(role: usize, module: usize, page: usize) -> Self {
        Self { role, module, page }
    }

    /// `pages/role{R}/module{L}/page{P}.html`, relative to the project root.
    pub fn url(&self) -> String {
        format!("{}/{}", module_dir(self.role, self.module), page_file(self.page))
    }
}

/// `role{N}` directory name for a 0-based role index.
pub fn role_dir_name(role: usize) -> String {
    format!("role{}", role + 1)
}

/// `module{L}` directory name for a 0-based module index.
pub fn module_dir_name(module: usize) -> String {
    format!("module{}", module_letter(module))
}

/// `pages/role{N}` relative to the project root.
pub fn role_dir(role: usize) -> String {
    format!("{}/{}", PAGES_DIR, role_dir_name(role))
}

/// `pages/role{N}/module{L}` relative to the project root.
pub fn module_dir(role: usize, module: usize) -> String {
    format!("{}/{}", role_dir(role), module_dir_name(module))
}

/// `page{N}.html` for a 0-based page index.
pub fn page_file(page: usize) -> String {
    format!("page{}.html", page + 1)
}

/// Letter label for a 0-based module index.
///
/// - `0` → `"A"`, `25` → `"Z"`
/// - `26` → `"AA"`, `27` → `"AB"`, `701` → `"ZZ"`, `702` → `"AAA"`
pub fn module_letter(index: usize) -> String {
    let mut n = index + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(char::from(b'A' + rem as u8));
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

/// Inverse of [`module_letter`]. Returns `None` for anything but uppercase
/// ASCII letters.
pub fn parse_module_letter(label: &str) -> Option<usize> {
    if label.is_empty() || !label.bytes().all(|b| b.is_ascii_uppercase()) {
        return None;
    }
    let mut n: usize = 0;
    for b in label.bytes() {
        n = n.checked_mul(26)?.checked_add((b - b'A') as usize + 1)?;
    }
    Some(n - 1)
}

/// Parse a page URL produced by [`PagePosition::url`] back into a position.
///
/// Returns `None` if the URL does not follow the positional pattern (for
/// example a hand-edited `menu.json` pointing elsewhere).
pub fn parse_page_url(url: &str) -> Option<PagePosition> {
    let mut parts = url.split('/');
    if parts.next()? != PAGES_DIR {
        return None;
    }
    let role = parse_indexed(parts.next()?, "role")?;
    let module = parse_module_letter(parts.next()?.strip_prefix("module")?)?;
    let page = parse_indexed(parts.next()?.strip_suffix(".html")?, "page")?;
    if parts.next().is_some() {
        return None;
    }
    Some(PagePosition { role, module, page })
}

/// `role3` → `Some(2)`. Zero and leading `+` are rejected.
fn parse_indexed(segment: &str, prefix: &str) -> Option<usize> {
    let digits = segment.strip_prefix(prefix)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse::<usize>().ok()?.checked_sub(1)
}
