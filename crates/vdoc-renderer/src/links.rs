//! Version placeholder substitution in rendered links.

/// Literal placeholder authors write in link targets.
pub const VERSION_PLACEHOLDER: &str = "{{version}}";

/// Replace every `{{version}}` placeholder in `content` with `version`.
///
/// The substitution is literal: no pattern matching, no escaping of
/// `version`.
///
/// # Examples
///
/// ```
/// use vdoc_renderer::rewrite_links;
///
/// let html = r#"<a href="/docs/{{version}}/routing">Routing</a>"#;
/// assert_eq!(
///     rewrite_links("5.4", html),
///     r#"<a href="/docs/5.4/routing">Routing</a>"#
/// );
/// ```
#[must_use]
pub fn rewrite_links(version: &str, content: &str) -> String {
    content.replace(VERSION_PLACEHOLDER, version)
}
