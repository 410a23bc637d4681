//! HTML, CSS and JS rendering for generated prototypes.
//!
//! Every renderer here is a pure function of its arguments. Writing the
//! results to disk is [`crate::writer`]'s job.
//!
//! ## Generated Documents
//!
//! - **Navigator** (`index.html`): sidebar menu built from `menu.json`, progress
//!   bar, search box, and an iframe previewing the selected page
//! - **Pages** (`pages/role{R}/module{L}/page{P}.html`): one wireframe per page.
//!   Mobile pages sit inside a fixed-size phone frame with a simulated status
//!   bar; desktop pages use a full-width layout
//! - **Stylesheet** (`style.css`): static base styles plus a block of
//!   platform-specific spacing and sizing
//! - **Tracker** (`progress.js`): client-side status tracking
//!
//! ## Static Assets
//!
//! Embedded at compile time:
//! - `static/style.css`: wireframe, status and menu styles
//! - `static/progress.js`: the `ProgressTracker` used by the navigator
//! - `static/nav.js`: menu rendering, search and preview switching
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Names from the outline are interpolated escaped. Imported page content is
//! the only raw HTML that reaches output.

use crate::types::Platform;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Options, Parser, html as md_html};

const CSS_STATIC: &str = include_str!("../static/style.css");
const PROGRESS_JS: &str = include_str!("../static/progress.js");
const NAV_JS: &str = include_str!("../static/nav.js");

const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";
const FONT_AWESOME_CDN: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.4.0/css/all.min.css";

/// Pages sit three levels below the project root.
pub const PAGE_STYLESHEET: &str = "../../../style.css";

const TAILWIND_CONFIG: &str = r#"tailwind.config = {
  theme: {
    extend: {
      colors: {
        'gray-custom': '#f5f5f5',
        'border-custom': '#cccccc',
        'text-primary': '#333333',
        'text-secondary': '#666666'
      }
    }
  }
}"#;

/// Fields every page renderer needs.
#[derive(Debug, Clone, Copy)]
pub struct PageContext<'a> {
    pub page_name: &'a str,
    pub page_description: &'a str,
    pub role_name: &'a str,
    pub module_name: &'a str,
}

/// Spacing and sizing constants for one platform.
///
/// Shared by the generated stylesheet and `design-standards.md` so the two
/// never disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub title_px: u32,
    pub body_px: u32,
    pub small_px: u32,
    pub page_margin_px: u32,
    pub component_gap_px: u32,
    pub content_gap_px: u32,
    pub button_padding: &'static str,
    pub input_padding_px: u32,
    pub card_padding_px: u32,
    pub container_width: &'static str,
    pub grid: &'static str,
    pub sizing: &'static str,
}

pub fn layout(platform: Platform) -> Layout {
    match platform {
        Platform::Mobile => Layout {
            title_px: 18,
            body_px: 14,
            small_px: 12,
            page_margin_px: 15,
            component_gap_px: 10,
            content_gap_px: 20,
            button_padding: "10px 20px",
            input_padding_px: 10,
            card_padding_px: 15,
            container_width: "375px",
            grid: "single column",
            sizing: "fixed width",
        },
        Platform::Pc => Layout {
            title_px: 24,
            body_px: 16,
            small_px: 14,
            page_margin_px: 20,
            component_gap_px: 15,
            content_gap_px: 30,
            button_padding: "12px 24px",
            input_padding_px: 12,
            card_padding_px: 20,
            container_width: "1200px",
            grid: "two-column grid",
            sizing: "responsive",
        },
    }
}

// ============================================================================
// HTML Components
// ============================================================================

/// Shared `<head>` contents: CDN styles, the tailwind palette and a stylesheet.
fn head(title: &str, stylesheet: &str) -> Markup {
    html! {
        meta charset="UTF-8";
        meta name="viewport" content="width=device-width, initial-scale=1.0";
        title { (title) }
        script src=(TAILWIND_CDN) {}
        link rel="stylesheet" href=(FONT_AWESOME_CDN);
        link rel="stylesheet" href=(stylesheet);
        script { (PreEscaped(TAILWIND_CONFIG)) }
    }
}

/// Simulated phone status bar.
fn status_bar() -> Markup {
    html! {
        div.status-bar {
            div.status-left {
                span.carrier { "Carrier" }
                i.fas.fa-wifi {}
            }
            div.status-center {
                span.time { "9:41" }
            }
            div.status-right {
                span.battery { "100%" }
            }
        }
    }
}

/// Wrap page content in the platform shell.
fn page_document(ctx: &PageContext<'_>, platform: Platform, content: Markup) -> Markup {
    let title = format!("{} - {}", ctx.page_name, ctx.role_name);
    html! {
        (DOCTYPE)
        html lang="en" {
            head { (head(&title, PAGE_STYLESHEET)) }
            @match platform {
                Platform::Mobile => {
                    body class="m-0 p-0 font-sans bg-gray-custom" {
                        div.phone-frame {
                            div.phone-screen {
                                (status_bar())
                                div.page-content { (content) }
                            }
                        }
                    }
                }
                Platform::Pc => {
                    body class="font-sans bg-gray-custom" {
                        div class="max-w-6xl mx-auto p-5" { (content) }
                    }
                }
            }
        }
    }
}

fn placeholder_area(icon: &str, title: &str, hint: &str) -> Markup {
    html! {
        div class="block rounded" {
            h3 class="font-semibold mb-2" {
                i class={ "fas " (icon) " mr-2" } {}
                (title)
            }
            p class="text-sm text-text-secondary" { (hint) }
        }
    }
}

/// Wireframe body: breadcrumb, heading, placeholder areas and notes.
fn placeholder_content(ctx: &PageContext<'_>, platform: Platform) -> Markup {
    let areas = match platform {
        Platform::Mobile => "space-y-2",
        Platform::Pc => "grid grid-cols-1 md:grid-cols-2 gap-5",
    };
    html! {
        header class="page-header border-b border-gray-200 pb-2 mb-4" {
            div class="breadcrumb text-xs text-text-secondary mb-1" {
                i class="fas fa-home mr-1" {}
                (ctx.role_name) " > " (ctx.module_name)
            }
            h1 class="page-title font-bold text-text-primary" {
                i class="fas fa-file-alt mr-2" {}
                (ctx.page_name)
            }
            @if platform == Platform::Pc && !ctx.page_description.is_empty() {
                p class="page-description text-text-secondary mt-2" { (ctx.page_description) }
            }
        }
        div class=(areas) {
            (placeholder_area("fa-cogs", "Main area", "Core content of this page"))
            (placeholder_area("fa-tools", "Secondary area", "Supporting content"))
        }
        div class="actions flex flex-wrap gap-2 my-4" {
            button class="primary-action rounded" { "Primary action" }
            button class="secondary-action rounded" { "Secondary action" }
            button class="back-action rounded" { "Back" }
        }
        aside class="page-notes bg-gray-100 rounded p-4" {
            h4 class="font-semibold mb-2" { "Page notes" }
            ul class="text-xs space-y-1" {
                li { strong { "Purpose: " } (ctx.page_description) }
                li { strong { "Target user: " } (ctx.role_name) }
                li { strong { "Module: " } (ctx.module_name) }
            }
        }
    }
}

// ============================================================================
// Document Renderers
// ============================================================================

/// The navigator: menu sidebar, progress bar and page preview.
pub fn render_index(project_name: &str) -> Markup {
    let title = format!("{project_name} - Prototype");
    html! {
        (DOCTYPE)
        html lang="en" {
            head { (head(&title, "style.css")) }
            body class="font-sans bg-gray-custom h-screen flex" {
                aside class="sidebar w-72 bg-white border-r border-border-custom flex flex-col" {
                    div class="p-4 border-b border-border-custom" {
                        h1 class="text-lg font-bold text-text-primary" { (project_name) }
                        div class="progress mt-2" {
                            div class="flex justify-between text-xs text-text-secondary" {
                                span { "Progress" }
                                span id="progressText" { "0%" }
                            }
                            div class="w-full bg-gray-200 rounded h-2 mt-1" {
                                div id="progressFill" class="bg-green-500 h-2 rounded" style="width: 0%" {}
                            }
                        }
                        input id="search" class="mt-3 w-full border rounded p-2 text-sm"
                            type="search" placeholder="Search roles, modules, pages";
                        ul id="searchResults" class="mt-2" {}
                    }
                    nav class="flex-1 overflow-y-auto p-2" {
                        ul id="menu" class="space-y-1" {}
                    }
                }
                main class="flex-1" {
                    iframe id="preview" class="w-full h-full border-0" title="Page preview" {}
                }
                script src="progress.js" {}
                script { (PreEscaped(NAV_JS)) }
            }
        }
    }
}

/// A placeholder wireframe page.
pub fn render_page(ctx: &PageContext<'_>, platform: Platform) -> Markup {
    page_document(ctx, platform, placeholder_content(ctx, platform))
}

/// A page carrying user-supplied HTML.
///
/// Mobile pages always get the phone frame, so only the `<body>` of a full
/// document is kept. On desktop a full document is written unchanged and a
/// fragment gets the desktop shell.
pub fn render_imported_page(ctx: &PageContext<'_>, source_html: &str, platform: Platform) -> String {
    let body = extract_body(source_html);
    if platform == Platform::Pc && body.is_some() {
        return source_html.to_string();
    }
    let inner = body.unwrap_or(source_html);
    page_document(ctx, platform, html! { (PreEscaped(inner)) }).into_string()
}

/// Inner HTML of the first `<body>` element, if any.
pub fn extract_body(html: &str) -> Option<&str> {
    let lower = html.to_ascii_lowercase();
    let open = lower.match_indices("<body").map(|(i, _)| i).find(|&i| {
        lower[i + "<body".len()..]
            .starts_with(|c: char| c == '>' || c == '/' || c.is_ascii_whitespace())
    })?;
    let content_start = open + lower[open..].find('>')? + 1;
    let content_end = lower[content_start..]
        .rfind("</body>")
        .map(|i| content_start + i)
        .unwrap_or(html.len());
    Some(html[content_start..content_end].trim())
}

/// Convert Markdown to an HTML fragment.
pub fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    let parser = Parser::new_ext(markdown, options);
    let mut out = String::new();
    md_html::push_html(&mut out, parser);
    out
}

// ============================================================================
// CSS and JS
// ============================================================================

pub fn render_style_css(platform: Platform) -> String {
    format!("{}\n{}", CSS_STATIC, platform_css(platform))
}

pub fn render_progress_js() -> &'static str {
    PROGRESS_JS
}

fn platform_css(platform: Platform) -> String {
    let l = layout(platform);
    let mut css = format!(
        r#"/* Layout: {label} */
:root {{
  --title-size: {title}px;
  --body-size: {body}px;
  --small-size: {small}px;
  --page-margin: {margin}px;
  --component-gap: {gap}px;
  --content-gap: {content}px;
  --card-padding: {card}px;
}}

body {{ font-size: var(--body-size); }}
.page-title {{ font-size: var(--title-size); }}
.page-content, .page-header {{ padding: 0 var(--page-margin); }}
.block {{ padding: var(--card-padding); margin: var(--component-gap) 0; }}
.page-notes {{ margin-top: var(--content-gap); font-size: var(--small-size); }}
.actions button {{ padding: {button}; border: 1px solid #333333; }}
input, select, textarea {{ padding: {input}px; }}
"#,
        label = platform.label(),
        title = l.title_px,
        body = l.body_px,
        small = l.small_px,
        margin = l.page_margin_px,
        gap = l.component_gap_px,
        content = l.content_gap_px,
        card = l.card_padding_px,
        button = l.button_padding,
        input = l.input_padding_px,
    );
    if platform == Platform::Mobile {
        css.push_str(PHONE_FRAME_CSS);
    }
    css
}

const PHONE_FRAME_CSS: &str = r#"
.phone-frame {
  width: 375px;
  height: 812px;
  margin: 20px auto;
  border: 10px solid #1f2937;
  border-radius: 40px;
  overflow: hidden;
  background: #ffffff;
  box-shadow: 0 10px 30px rgba(0, 0, 0, 0.2);
}

.phone-screen {
  height: 100%;
  display: flex;
  flex-direction: column;
}

.status-bar {
  height: 44px;
  padding: 0 20px;
  display: flex;
  align-items: center;
  justify-content: space-between;
  font-size: 14px;
  font-weight: 600;
}

.phone-screen .page-content {
  flex: 1;
  overflow-y: auto;
}
"#;

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> PageContext<'static> {
        PageContext {
            page_name: "Checkout",
            page_description: "Collect payment",
            role_name: "Buyer",
            module_name: "Cart",
        }
    }

    #[test]
    fn index_includes_doctype_and_title() {
        let html = render_index("Shop").into_string();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Shop - Prototype</title>"));
    }

    #[test]
    fn index_has_navigator_hooks() {
        let html = render_index("Shop").into_string();
        for id in ["id=\"menu\"", "id=\"search\"", "id=\"preview\"", "id=\"progressFill\""] {
            assert!(html.contains(id), "missing {id}");
        }
        assert!(html.contains("progress.js"));
        assert!(html.contains("fetch('menu.json')"));
    }

    #[test]
    fn mobile_page_has_phone_frame() {
        let html = render_page(&ctx(), Platform::Mobile).into_string();
        assert!(html.contains("phone-frame"));
        assert!(html.contains("status-bar"));
        assert!(html.contains("9:41"));
        assert!(html.contains("breadcrumb"));
        assert!(html.contains("Cart"));
    }

    #[test]
    fn desktop_page_is_full_width() {
        let html = render_page(&ctx(), Platform::Pc).into_string();
        assert!(!html.contains("phone-frame"));
        assert!(html.contains("max-w-6xl"));
        assert!(html.contains("page-description"));
    }

    #[test]
    fn page_links_shared_stylesheet() {
        let html = render_page(&ctx(), Platform::Mobile).into_string();
        assert!(html.contains(r#"href="../../../style.css""#));
        assert!(html.contains("<title>Checkout - Buyer</title>"));
    }

    #[test]
    fn page_notes_list_context() {
        let html = render_page(&ctx(), Platform::Mobile).into_string();
        assert!(html.contains("Collect payment"));
        assert!(html.contains("Target user: "));
    }

    #[test]
    fn names_are_escaped() {
        let evil = PageContext {
            page_name: "<script>alert('x')</script>",
            ..ctx()
        };
        let html = render_page(&evil, Platform::Pc).into_string();
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn extract_body_from_full_document() {
        let doc = "<html><head></head><BODY class=\"x\">\n<p>Hi</p>\n</BODY></html>";
        assert_eq!(extract_body(doc), Some("<p>Hi</p>"));
    }

    #[test]
    fn extract_body_none_for_fragment() {
        assert_eq!(extract_body("<p>Hi</p>"), None);
    }

    #[test]
    fn extract_body_ignores_tags_that_only_start_with_body() {
        assert_eq!(extract_body("<body-text>Hi</body-text>"), None);
        let doc = "<bodyguard>x</bodyguard><BODY class=\"m\">\n<p>Hi</p>\n</BODY>";
        assert_eq!(extract_body(doc), Some("<p>Hi</p>"));
    }

    #[test]
    fn extract_body_tolerates_missing_close() {
        assert_eq!(extract_body("<body><p>Hi</p>"), Some("<p>Hi</p>"));
    }

    #[test]
    fn imported_mobile_document_is_framed() {
        let doc = "<html><body><p id=\"mine\">Hi</p></body></html>";
        let html = render_imported_page(&ctx(), doc, Platform::Mobile);
        assert!(html.contains("phone-frame"));
        assert!(html.contains("<p id=\"mine\">Hi</p>"));
        assert_eq!(html.matches("<body").count(), 1);
    }

    #[test]
    fn imported_desktop_document_kept_verbatim() {
        let doc = "<html><body><p>Hi</p></body></html>";
        assert_eq!(render_imported_page(&ctx(), doc, Platform::Pc), doc);
    }

    #[test]
    fn imported_desktop_fragment_gets_shell() {
        let html = render_imported_page(&ctx(), "<p>Hi</p>", Platform::Pc);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("max-w-6xl"));
        assert!(html.contains("<p>Hi</p>"));
    }

    #[test]
    fn markdown_converts() {
        let html = markdown_to_html("# Title\n\nThis is **bold**.\n\n| a | b |\n|---|---|\n| 1 | 2 |");
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<strong>bold</strong>"));
        assert!(html.contains("<table>"));
    }

    #[test]
    fn style_css_differs_by_platform() {
        let mobile = render_style_css(Platform::Mobile);
        let pc = render_style_css(Platform::Pc);
        assert!(mobile.contains(".status-completed"));
        assert!(mobile.contains("--title-size: 18px"));
        assert!(mobile.contains(".phone-frame"));
        assert!(pc.contains("--title-size: 24px"));
        assert!(pc.contains("padding: 12px 24px"));
        assert!(!pc.contains(".phone-frame"));
    }

    #[test]
    fn progress_js_defines_tracker() {
        let js = render_progress_js();
        assert!(js.contains("class ProgressTracker"));
        assert!(js.contains("'prototype_progress'"));
    }
}
