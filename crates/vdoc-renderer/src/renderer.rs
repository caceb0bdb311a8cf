//! Markdown to HTML conversion.

use pulldown_cmark::{Options, Parser};

use crate::writer::HtmlWriter;

/// Markdown renderer producing compact HTML fragments.
///
/// GFM tables, strikethrough and task lists are enabled alongside definition
/// lists. Headings get ids that are unique within the document.
///
/// Link destinations are HTML-escaped but never percent-encoded, so template
/// placeholders such as `{{version}}` reach the output intact. GitHub alert
/// syntax (`> [!NOTE]`) is not recognized; such quotes render as ordinary
/// blockquotes.
#[derive(Clone, Copy, Debug, Default)]
pub struct MarkdownRenderer;

impl MarkdownRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn options() -> Options {
        Options::ENABLE_DEFINITION_LIST
            | Options::ENABLE_TABLES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
    }

    /// Render a Markdown document to HTML.
    #[must_use]
    pub fn render(&self, markdown: &str) -> String {
        let mut writer = HtmlWriter::with_capacity(markdown.len() + markdown.len() / 2);
        for event in Parser::new_ext(markdown, Self::options()) {
            writer.event(event);
        }
        writer.finish()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn render_html(markdown: &str) -> String {
        MarkdownRenderer::new().render(markdown)
    }

    /// Every `id="..."` in order of appearance.
    fn heading_ids(html: &str) -> Vec<&str> {
        html.split(r#" id=""#)
            .skip(1)
            .filter_map(|rest| rest.split('"').next())
            .collect()
    }

    #[test]
    fn test_basic_paragraph() {
        assert_eq!(render_html("Hello, world!"), "<p>Hello, world!</p>");
    }

    #[test]
    fn test_heading_with_id() {
        assert_eq!(
            render_html("## Section Title"),
            r#"<h2 id="section-title">Section Title</h2>"#
        );
    }

    #[test]
    fn test_duplicate_heading_ids() {
        let html = render_html("## FAQ\n\n## FAQ\n\n## FAQ");
        assert_eq!(heading_ids(&html), ["faq", "faq-1", "faq-2"]);
        assert!(html.contains(r#"<h2 id="faq-2">FAQ</h2>"#));
    }

    #[test]
    fn test_heading_ids_never_repeat() {
        let html = render_html("## FAQ\n\n## FAQ\n\n## FAQ 1");
        assert_eq!(heading_ids(&html), ["faq", "faq-1", "faq-1-1"]);
    }

    #[test]
    fn test_non_ascii_headings_get_ids() {
        let html = render_html("## Überblick\n\n## 日本語\n\n## 中文");
        assert_eq!(heading_ids(&html), ["berblick", "section", "section-1"]);
    }

    #[test]
    fn test_heading_with_inline_markup() {
        assert_eq!(
            render_html("## Install `composer` *now*"),
            r#"<h2 id="install-composer-now">Install <code>composer</code> <em>now</em></h2>"#
        );
    }

    #[test]
    fn test_heading_with_link_keeps_placeholder() {
        assert_eq!(
            render_html("### [Queues](/docs/{{version}}/queues)"),
            r#"<h3 id="queues"><a href="/docs/{{version}}/queues">Queues</a></h3>"#
        );
    }

    #[test]
    fn test_fenced_code_block() {
        let result = render_html("```php\nRoute::get('/', fn () => view('welcome'));\n```");
        assert_eq!(
            result,
            "<pre><code class=\"language-php\">Route::get(&#x27;/&#x27;, fn () =&gt; view(&#x27;welcome&#x27;));\n</code></pre>"
        );
    }

    #[test]
    fn test_fence_info_attributes_are_ignored_for_language() {
        let result = render_html("```bash title=\"setup\"\nphp artisan serve\n```");
        assert!(result.contains(r#"class="language-bash""#));
    }

    #[test]
    fn test_code_keeps_braces() {
        let result = render_html("```blade\n{{ $name }}\n```");
        assert!(result.contains("{{ $name }}"));
    }

    #[test]
    fn test_indented_code_block() {
        let result = render_html("    composer install");
        assert_eq!(result, "<pre><code>composer install\n</code></pre>");
    }

    #[test]
    fn test_blockquote() {
        assert_eq!(
            render_html("> {note} Mind the gap."),
            "<blockquote><p>{note} Mind the gap.</p></blockquote>"
        );
    }

    #[test]
    fn test_gfm_alert_syntax_renders_as_blockquote() {
        let result = render_html("> [!NOTE]\n> Plain quote.");
        assert!(result.starts_with("<blockquote>"));
        assert!(!result.contains("alert"));
    }

    #[test]
    fn test_link_keeps_version_placeholder() {
        assert_eq!(
            render_html("[Routing](/docs/{{version}}/routing)"),
            r#"<p><a href="/docs/{{version}}/routing">Routing</a></p>"#
        );
    }

    #[test]
    fn test_link_with_title_and_ampersand() {
        assert_eq!(
            render_html(r#"[Search](/search?a=1&b=2 "Find it")"#),
            r#"<p><a href="/search?a=1&amp;b=2" title="Find it">Search</a></p>"#
        );
    }

    #[test]
    fn test_image() {
        assert_eq!(
            render_html("![Alt `text`](image.png)"),
            r#"<p><img src="image.png" alt="Alt text"></p>"#
        );
        assert_eq!(
            render_html(r#"![Logo](logo.png 'The "logo"')"#),
            r#"<p><img src="logo.png" title="The &quot;logo&quot;" alt="Logo"></p>"#
        );
    }

    #[test]
    fn test_table() {
        let result = render_html("| A | B |\n|:--|--:|\n| 1 | 2 |");
        assert_eq!(
            result,
            "<table><thead><tr>\
             <th style=\"text-align:left\">A</th><th style=\"text-align:right\">B</th>\
             </tr></thead><tbody><tr>\
             <td style=\"text-align:left\">1</td><td style=\"text-align:right\">2</td>\
             </tr></tbody></table>"
        );
    }

    #[test]
    fn test_emphasis_and_strikethrough() {
        let result = render_html("*italic*, **bold** and ~~deleted~~");
        assert_eq!(
            result,
            "<p><em>italic</em>, <strong>bold</strong> and <s>deleted</s></p>"
        );
    }

    #[test]
    fn test_lists() {
        assert_eq!(
            render_html("- Item 1\n- Item 2"),
            "<ul><li>Item 1</li><li>Item 2</li></ul>"
        );
        assert_eq!(
            render_html("3. Third\n4. Fourth"),
            r#"<ol start="3"><li>Third</li><li>Fourth</li></ol>"#
        );
        assert_eq!(render_html("1. One"), "<ol><li>One</li></ol>");
    }

    #[test]
    fn test_task_list() {
        let result = render_html("- [ ] Unchecked\n- [x] Checked");
        assert!(result.contains(r#"<input type="checkbox" disabled> Unchecked"#));
        assert!(result.contains(r#"<input type="checkbox" checked disabled> Checked"#));
    }

    #[test]
    fn test_definition_list() {
        let result = render_html("Term\n: Definition");
        assert!(result.starts_with("<dl><dt>"));
        assert!(result.contains("Term"));
        assert!(result.contains("<dd>"));
        assert!(result.ends_with("</dd></dl>"));
    }

    #[test]
    fn test_raw_html_passthrough() {
        let result = render_html(
            "<div class=\"content-list\" markdown=\"1\">\n\n- [Intro](/docs/{{version}}/intro)\n\n</div>",
        );
        assert!(result.starts_with(r#"<div class="content-list" markdown="1">"#));
        assert!(result.contains(r#"href="/docs/{{version}}/intro""#));
        assert!(result.trim_end().ends_with("</div>"));
    }

    #[test]
    fn test_hard_break_and_rule() {
        assert_eq!(render_html("a  \nb\n\n---"), "<p>a<br>b</p><hr>");
    }

    #[test]
    fn test_text_is_escaped() {
        assert_eq!(render_html("a < b & c"), "<p>a &lt; b &amp; c</p>");
    }

    #[test]
    fn test_renderer_is_reusable() {
        let renderer = MarkdownRenderer::default();
        assert_eq!(renderer.render("# Hello"), r#"<h1 id="hello">Hello</h1>"#);
        assert_eq!(renderer.render("# Hello"), r#"<h1 id="hello">Hello</h1>"#);
    }

    #[test]
    fn test_options() {
        let options = MarkdownRenderer::options();
        assert!(options.contains(Options::ENABLE_TABLES));
        assert!(options.contains(Options::ENABLE_STRIKETHROUGH));
        assert!(options.contains(Options::ENABLE_TASKLISTS));
        assert!(options.contains(Options::ENABLE_DEFINITION_LIST));
        assert!(!options.contains(Options::ENABLE_GFM));
    }
}
