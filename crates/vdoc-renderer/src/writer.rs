//! Event-driven HTML writer behind [`MarkdownRenderer`](crate::MarkdownRenderer).
//!
//! One writer renders one document. Output is compact: block elements are
//! not separated by newlines, and raw HTML is copied through untouched.

use std::fmt::Write;

use pulldown_cmark::{Alignment, CodeBlockKind, CowStr, Event, HeadingLevel, Tag, TagEnd};

use crate::toc::Anchors;

/// Append `s` escaped for HTML content or a double-quoted attribute.
///
/// Braces are left alone so `{{version}}` and `{note}` survive rendering.
fn escape_into(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
}

/// Fenced or indented code being collected.
struct CodeBlock {
    lang: Option<String>,
    body: String,
}

/// Image whose alt text is being collected.
struct Image {
    src: String,
    title: String,
    alt: String,
}

/// Heading being collected; the tag is written once its id is known.
struct Heading {
    level: u8,
    text: String,
    html: String,
}

struct Table {
    alignments: Vec<Alignment>,
    column: usize,
    in_head: bool,
}

impl Table {
    fn cell_tag(&self) -> &'static str {
        if self.in_head { "th" } else { "td" }
    }

    fn cell_style(&self) -> &'static str {
        match self.alignments.get(self.column) {
            Some(Alignment::Left) => r#" style="text-align:left""#,
            Some(Alignment::Center) => r#" style="text-align:center""#,
            Some(Alignment::Right) => r#" style="text-align:right""#,
            Some(Alignment::None) | None => "",
        }
    }
}

#[derive(Default)]
pub(crate) struct HtmlWriter {
    out: String,
    code: Option<CodeBlock>,
    image: Option<Image>,
    heading: Option<Heading>,
    table: Option<Table>,
    anchors: Anchors,
}

impl HtmlWriter {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            out: String::with_capacity(capacity),
            ..Self::default()
        }
    }

    pub(crate) fn finish(self) -> String {
        self.out
    }

    /// Buffer receiving inline markup: the open heading, or the document.
    fn sink(&mut self) -> &mut String {
        match &mut self.heading {
            Some(heading) => &mut heading.html,
            None => &mut self.out,
        }
    }

    pub(crate) fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => self.code_span(&code),
            Event::Html(html) | Event::InlineHtml(html) => self.sink().push_str(&html),
            Event::SoftBreak => self.soft_break(),
            Event::HardBreak => self.sink().push_str("<br>"),
            Event::Rule => self.out.push_str("<hr>"),
            Event::TaskListMarker(true) => {
                self.out.push_str(r#"<input type="checkbox" checked disabled> "#);
            }
            Event::TaskListMarker(false) => {
                self.out.push_str(r#"<input type="checkbox" disabled> "#);
            }
            Event::FootnoteReference(_) | Event::InlineMath(_) | Event::DisplayMath(_) => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => self.out.push_str("<p>"),
            Tag::Heading { level, .. } => {
                self.heading = Some(Heading {
                    level: heading_level(level),
                    text: String::new(),
                    html: String::new(),
                });
            }
            Tag::BlockQuote(_) => self.out.push_str("<blockquote>"),
            Tag::CodeBlock(kind) => {
                let lang = match kind {
                    CodeBlockKind::Fenced(info) => {
                        info.split_whitespace().next().map(str::to_owned)
                    }
                    CodeBlockKind::Indented => None,
                };
                self.code = Some(CodeBlock {
                    lang,
                    body: String::new(),
                });
            }
            Tag::List(None) => self.out.push_str("<ul>"),
            Tag::List(Some(1)) => self.out.push_str("<ol>"),
            Tag::List(Some(start)) => write!(self.out, r#"<ol start="{start}">"#).unwrap(),
            Tag::Item => self.out.push_str("<li>"),
            Tag::DefinitionList => self.out.push_str("<dl>"),
            Tag::DefinitionListTitle => self.out.push_str("<dt>"),
            Tag::DefinitionListDefinition => self.out.push_str("<dd>"),
            Tag::Table(alignments) => {
                self.table = Some(Table {
                    alignments,
                    column: 0,
                    in_head: false,
                });
                self.out.push_str("<table>");
            }
            Tag::TableHead => {
                if let Some(table) = &mut self.table {
                    table.in_head = true;
                    table.column = 0;
                }
                self.out.push_str("<thead><tr>");
            }
            Tag::TableRow => {
                if let Some(table) = &mut self.table {
                    table.column = 0;
                }
                self.out.push_str("<tr>");
            }
            Tag::TableCell => {
                if let Some(table) = &self.table {
                    write!(self.out, "<{}{}>", table.cell_tag(), table.cell_style()).unwrap();
                }
            }
            Tag::Emphasis => self.sink().push_str("<em>"),
            Tag::Strong => self.sink().push_str("<strong>"),
            Tag::Strikethrough => self.sink().push_str("<s>"),
            Tag::Superscript => self.sink().push_str("<sup>"),
            Tag::Subscript => self.sink().push_str("<sub>"),
            Tag::Link {
                dest_url, title, ..
            } => self.link_open(&dest_url, &title),
            Tag::Image {
                dest_url, title, ..
            } => {
                self.image = Some(Image {
                    src: dest_url.into_string(),
                    title: title.into_string(),
                    alt: String::new(),
                });
            }
            Tag::HtmlBlock | Tag::FootnoteDefinition(_) | Tag::MetadataBlock(_) => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => self.out.push_str("</p>"),
            TagEnd::Heading(_) => self.heading_close(),
            TagEnd::BlockQuote(_) => self.out.push_str("</blockquote>"),
            TagEnd::CodeBlock => self.code_block_close(),
            TagEnd::List(true) => self.out.push_str("</ol>"),
            TagEnd::List(false) => self.out.push_str("</ul>"),
            TagEnd::Item => self.out.push_str("</li>"),
            TagEnd::DefinitionList => self.out.push_str("</dl>"),
            TagEnd::DefinitionListTitle => self.out.push_str("</dt>"),
            TagEnd::DefinitionListDefinition => self.out.push_str("</dd>"),
            TagEnd::Table => {
                self.table = None;
                self.out.push_str("</tbody></table>");
            }
            TagEnd::TableHead => {
                if let Some(table) = &mut self.table {
                    table.in_head = false;
                }
                self.out.push_str("</tr></thead><tbody>");
            }
            TagEnd::TableRow => self.out.push_str("</tr>"),
            TagEnd::TableCell => {
                if let Some(table) = &mut self.table {
                    write!(self.out, "</{}>", table.cell_tag()).unwrap();
                    table.column += 1;
                }
            }
            TagEnd::Emphasis => self.sink().push_str("</em>"),
            TagEnd::Strong => self.sink().push_str("</strong>"),
            TagEnd::Strikethrough => self.sink().push_str("</s>"),
            TagEnd::Superscript => self.sink().push_str("</sup>"),
            TagEnd::Subscript => self.sink().push_str("</sub>"),
            TagEnd::Link => self.sink().push_str("</a>"),
            TagEnd::Image => self.image_close(),
            TagEnd::HtmlBlock | TagEnd::FootnoteDefinition | TagEnd::MetadataBlock(_) => {}
        }
    }

    fn text(&mut self, text: &CowStr<'_>) {
        if let Some(code) = &mut self.code {
            code.body.push_str(text);
        } else if let Some(image) = &mut self.image {
            image.alt.push_str(text);
        } else {
            if let Some(heading) = &mut self.heading {
                heading.text.push_str(text);
            }
            escape_into(self.sink(), text);
        }
    }

    fn code_span(&mut self, code: &str) {
        if let Some(image) = &mut self.image {
            image.alt.push_str(code);
            return;
        }
        if let Some(heading) = &mut self.heading {
            heading.text.push_str(code);
        }
        let sink = self.sink();
        sink.push_str("<code>");
        escape_into(sink, code);
        sink.push_str("</code>");
    }

    fn soft_break(&mut self) {
        if let Some(heading) = &mut self.heading {
            heading.text.push(' ');
        }
        self.sink().push('\n');
    }

    /// Write `<a href>` with the destination escaped but not percent-encoded.
    fn link_open(&mut self, dest: &str, title: &str) {
        let sink = self.sink();
        sink.push_str(r#"<a href=""#);
        escape_into(sink, dest);
        if !title.is_empty() {
            sink.push_str(r#"" title=""#);
            escape_into(sink, title);
        }
        sink.push_str(r#"">"#);
    }

    fn heading_close(&mut self) {
        let Some(heading) = self.heading.take() else {
            return;
        };
        let id = self.anchors.assign(heading.text.trim());
        let level = heading.level;
        write!(
            self.out,
            r#"<h{level} id="{id}">{}</h{level}>"#,
            heading.html.trim()
        )
        .unwrap();
    }

    fn code_block_close(&mut self) {
        let Some(code) = self.code.take() else {
            return;
        };
        match code.lang {
            Some(lang) => {
                self.out.push_str(r#"<pre><code class="language-"#);
                escape_into(&mut self.out, &lang);
                self.out.push_str(r#"">"#);
            }
            None => self.out.push_str("<pre><code>"),
        }
        escape_into(&mut self.out, &code.body);
        self.out.push_str("</code></pre>");
    }

    fn image_close(&mut self) {
        let Some(image) = self.image.take() else {
            return;
        };
        let sink = self.sink();
        sink.push_str(r#"<img src=""#);
        escape_into(sink, &image.src);
        if !image.title.is_empty() {
            sink.push_str(r#"" title=""#);
            escape_into(sink, &image.title);
        }
        sink.push_str(r#"" alt=""#);
        escape_into(sink, &image.alt);
        sink.push_str(r#"">"#);
    }
}

fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn escaped(s: &str) -> String {
        let mut out = String::new();
        escape_into(&mut out, s);
        out
    }

    #[test]
    fn test_escape() {
        assert_eq!(escaped("<script>"), "&lt;script&gt;");
        assert_eq!(escaped("a & b"), "a &amp; b");
        assert_eq!(escaped(r#""quoted""#), "&quot;quoted&quot;");
        assert_eq!(escaped("it's"), "it&#x27;s");
        assert_eq!(escaped("{{version}}"), "{{version}}");
    }

    #[test]
    fn test_table_cell_styles() {
        let mut table = Table {
            alignments: vec![Alignment::Left, Alignment::None, Alignment::Right],
            column: 0,
            in_head: true,
        };
        assert_eq!(table.cell_tag(), "th");
        assert_eq!(table.cell_style(), r#" style="text-align:left""#);

        table.column = 1;
        assert_eq!(table.cell_style(), "");
        table.column = 2;
        assert_eq!(table.cell_style(), r#" style="text-align:right""#);
        table.column = 3;
        assert_eq!(table.cell_style(), "");

        table.in_head = false;
        assert_eq!(table.cell_tag(), "td");
    }

    #[test]
    fn test_events_without_parser() {
        let mut writer = HtmlWriter::default();
        for event in [
            Event::Start(Tag::Paragraph),
            Event::Text("x < y".into()),
            Event::HardBreak,
            Event::Code("{note}".into()),
            Event::End(TagEnd::Paragraph),
            Event::Rule,
        ] {
            writer.event(event);
        }

        assert_eq!(
            writer.finish(),
            "<p>x &lt; y<br><code>{note}</code></p><hr>"
        );
    }
}
