//! Blockquote class promotion over an HTML event stream.
//!
//! Rendered pages are HTML fragments, not well-formed XML: void elements
//! (`<br>`, `<img>`) are never closed, raw HTML from authors may leave
//! paragraphs open, attributes may lack values or repeat, and a bare `<` may
//! appear in text. The reader is therefore configured to tolerate mismatched
//! and unmatched end tags, reads a copy with stray `<` blanked out, and keeps
//! a stack of open elements with HTML's void elements skipped.
//!
//! Only the start tag of the chosen blockquote is rewritten; every other byte
//! of the document is copied through untouched.

use std::borrow::Cow;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// HTML elements that never have an end tag.
const VOID_ELEMENTS: &[&[u8]] = &[
    b"area", b"base", b"br", b"col", b"embed", b"hr", b"img", b"input", b"link", b"meta",
    b"source", b"track", b"wbr",
];

const BLOCKQUOTE: &str = "blockquote";

/// An element that is open at the current reader position.
struct OpenElement {
    name: Vec<u8>,
    /// Byte range of the start tag, present for blockquotes only.
    blockquote: Option<(usize, usize)>,
}

/// Copy of `html` where every `<` that cannot open a tag, comment or
/// declaration is replaced by a space. Byte offsets are unchanged.
fn blank_stray_angles(html: &str) -> Cow<'_, str> {
    let bytes = html.as_bytes();
    let is_stray = |i: usize| {
        bytes[i] == b'<'
            && !bytes
                .get(i + 1)
                .is_some_and(|&next| next.is_ascii_alphabetic() || matches!(next, b'/' | b'!' | b'?'))
    };
    if !(0..bytes.len()).any(is_stray) {
        return Cow::Borrowed(html);
    }

    let masked: String = html
        .char_indices()
        .map(|(i, c)| if c == '<' && is_stray(i) { ' ' } else { c })
        .collect();
    Cow::Owned(masked)
}

/// Set `class="<class>"` on the outermost blockquote enclosing the element
/// whose start tag begins at byte `target`.
///
/// Returns `None` when the document cannot be read up to `target`, when no
/// element starts at `target`, or when no blockquote encloses it.
pub(crate) fn promote_enclosing_blockquote(html: &str, target: usize, class: &str) -> Option<String> {
    let readable = blank_stray_angles(html);
    let mut reader = Reader::from_str(&readable);
    let config = reader.config_mut();
    config.check_end_names = false;
    config.allow_unmatched_ends = true;

    let mut stack: Vec<OpenElement> = Vec::new();

    loop {
        let start = usize::try_from(reader.buffer_position()).ok()?;
        if start > target {
            // The target is inside a comment, CDATA, or a tag's attributes
            return None;
        }

        let event = match reader.read_event() {
            Ok(event) => event,
            Err(e) => {
                let resumed = usize::try_from(reader.buffer_position()).ok()?;
                tracing::debug!(error = %e, position = start, "Skipping unreadable HTML");
                if resumed <= start {
                    return None;
                }
                continue;
            }
        };

        match event {
            Event::Start(e) => {
                if start == target {
                    let &(bq_start, bq_end) = stack.iter().find_map(|el| el.blockquote.as_ref())?;
                    let rewritten = rewrite_start_tag(&html[bq_start..bq_end], class)?;
                    let mut out = String::with_capacity(html.len() + class.len() + 8);
                    out.push_str(&html[..bq_start]);
                    out.push_str(&rewritten);
                    out.push_str(&html[bq_end..]);
                    return Some(out);
                }

                let name = e.name().as_ref().to_ascii_lowercase();
                if VOID_ELEMENTS.contains(&name.as_slice()) {
                    continue;
                }
                let blockquote = if name == BLOCKQUOTE.as_bytes() {
                    let end = usize::try_from(reader.buffer_position()).ok()?;
                    Some((start, end))
                } else {
                    None
                };
                stack.push(OpenElement { name, blockquote });
            }
            Event::End(e) => {
                let name = e.name().as_ref().to_ascii_lowercase();
                // Close the nearest matching element and anything left open inside it
                if let Some(pos) = stack.iter().rposition(|el| el.name == name) {
                    stack.truncate(pos);
                }
            }
            Event::Eof => return None,
            _ => {}
        }
    }
}

/// Serialize a blockquote start tag (`<blockquote ...>`, taken verbatim from
/// the document) with its `class` attribute replaced.
///
/// Other attributes keep their order and raw (already escaped) values. A
/// repeated `class` is dropped, as browsers ignore it; a missing one is
/// appended.
fn rewrite_start_tag(source: &str, class: &str) -> Option<String> {
    let content = source.strip_prefix('<')?.strip_suffix('>')?;
    let tag = BytesStart::from_content(content, BLOCKQUOTE.len());
    let mut attrs = tag.html_attributes();
    attrs.with_checks(false);

    let mut out = String::from("<blockquote");
    let mut replaced = false;

    for attr in attrs {
        let attr = attr.ok()?;
        let key = std::str::from_utf8(attr.key.as_ref()).ok()?;
        if key.eq_ignore_ascii_case("class") {
            if replaced {
                continue;
            }
            replaced = true;
            out.push_str(r#" class=""#);
            out.push_str(class);
            out.push('"');
        } else {
            let value = std::str::from_utf8(&attr.value).ok()?;
            out.push(' ');
            out.push_str(key);
            out.push_str(r#"=""#);
            out.push_str(&value.replace('"', "&quot;"));
            out.push('"');
        }
    }

    if !replaced {
        out.push_str(r#" class=""#);
        out.push_str(class);
        out.push('"');
    }
    out.push('>');
    Some(out)
}
