//! Markdown rendering and HTML post-processing for versioned documentation.
//!
//! This crate turns a page's Markdown source into the HTML served to readers.
//! The pipeline has three stages, each usable on its own:
//!
//! 1. [`MarkdownRenderer`] converts Markdown to compact HTML
//! 2. [`rewrite_links`] substitutes the `{{version}}` placeholder
//! 3. [`annotate_icons`] replaces the first `{note}`-style marker with an icon
//!    from an [`IconSet`] and tags its enclosing blockquote
//!
//! # Example
//!
//! ```
//! use vdoc_renderer::{BuiltinIcons, MarkdownRenderer, annotate_icons, rewrite_links};
//!
//! let markdown = "> {tip} See [routing](/docs/{{version}}/routing).";
//! let html = MarkdownRenderer::new().render(markdown);
//! let html = annotate_icons(&rewrite_links("5.4", &html), &BuiltinIcons);
//!
//! assert!(html.starts_with(r#"<blockquote class="has-icon tip">"#));
//! assert!(html.contains(r#"href="/docs/5.4/routing""#));
//! ```

mod blockquote;
mod icons;
mod links;
mod renderer;
mod toc;
mod writer;

pub use icons::{BuiltinIcons, DirectoryIcons, Icon, IconSet, annotate_icons};
pub use links::{VERSION_PLACEHOLDER, rewrite_links};
pub use renderer::MarkdownRenderer;
