//! Annotation markers and their icon markup.
//!
//! Authors flag call-outs by starting them with a single bracketed word:
//!
//! ```markdown
//! > {tip} Run `composer update` after changing the lock file.
//! ```
//!
//! [`annotate_icons`] swaps the first such marker for an icon and, when the
//! marker sits inside a blockquote, tags that blockquote with
//! `class="has-icon <word>"` so stylesheets can decorate it.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::blockquote::promote_enclosing_blockquote;

/// First `{...}` token, shortest match, never spanning lines.
static MARKER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{(.*?)\}").unwrap());

/// Recognized annotation words.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Icon {
    Note,
    Tip,
    Laracast,
    Video,
}

impl Icon {
    /// Every icon, in declaration order.
    pub const ALL: [Icon; 4] = [Icon::Note, Icon::Tip, Icon::Laracast, Icon::Video];

    /// Look up an icon by its exact (case-sensitive) marker word.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "note" => Some(Self::Note),
            "tip" => Some(Self::Tip),
            "laracast" => Some(Self::Laracast),
            "video" => Some(Self::Video),
            _ => None,
        }
    }

    /// Marker word, also used as the icon file stem.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Note => "note",
            Self::Tip => "tip",
            Self::Laracast => "laracast",
            Self::Video => "video",
        }
    }
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Source of inline SVG markup for icons.
pub trait IconSet: Send + Sync {
    /// SVG markup for `icon`.
    fn svg(&self, icon: Icon) -> Cow<'_, str>;
}

const SVG_NOTE: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 20 20" width="20" height="20" aria-hidden="true"><path d="M10 1a9 9 0 1 0 0 18 9 9 0 0 0 0-18zm1 14H9V9h2zm0-8H9V5h2z"/></svg>"#;
const SVG_TIP: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 20 20" width="20" height="20" aria-hidden="true"><path d="M10 1a6 6 0 0 0-3.5 10.9V14a1 1 0 0 0 1 1h5a1 1 0 0 0 1-1v-2.1A6 6 0 0 0 10 1zM8 17h4v1a1 1 0 0 1-1 1H9a1 1 0 0 1-1-1z"/></svg>"#;
const SVG_LARACAST: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 20 20" width="20" height="20" aria-hidden="true"><path d="M2 3h16a1 1 0 0 1 1 1v10a1 1 0 0 1-1 1h-6v2h3v1H5v-1h3v-2H2a1 1 0 0 1-1-1V4a1 1 0 0 1 1-1zm6 3v6l5-3z"/></svg>"#;
const SVG_VIDEO: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 20 20" width="20" height="20" aria-hidden="true"><path d="M2 4h11a1 1 0 0 1 1 1v3l4-3v10l-4-3v3a1 1 0 0 1-1 1H2a1 1 0 0 1-1-1V5a1 1 0 0 1 1-1z"/></svg>"#;

/// Icon markup compiled into the binary.
#[derive(Clone, Copy, Debug, Default)]
pub struct BuiltinIcons;

impl BuiltinIcons {
    fn markup(icon: Icon) -> &'static str {
        match icon {
            Icon::Note => SVG_NOTE,
            Icon::Tip => SVG_TIP,
            Icon::Laracast => SVG_LARACAST,
            Icon::Video => SVG_VIDEO,
        }
    }
}

impl IconSet for BuiltinIcons {
    fn svg(&self, icon: Icon) -> Cow<'_, str> {
        Cow::Borrowed(Self::markup(icon))
    }
}

/// Icons loaded once from `<dir>/<name>.svg` files.
#[derive(Clone, Debug, Default)]
pub struct DirectoryIcons {
    svgs: HashMap<Icon, String>,
}

impl DirectoryIcons {
    /// Read every icon file under `dir`.
    ///
    /// Icons whose file is missing or unreadable keep the builtin markup.
    pub fn load(dir: &Path) -> Self {
        let mut svgs = HashMap::new();
        for icon in Icon::ALL {
            let path = dir.join(format!("{}.svg", icon.name()));
            match std::fs::read_to_string(&path) {
                Ok(svg) => {
                    svgs.insert(icon, svg.trim().to_owned());
                }
                Err(e) => {
                    tracing::warn!(
                        icon = %icon,
                        path = %path.display(),
                        error = %e,
                        "Icon file unavailable, using builtin markup"
                    );
                }
            }
        }
        Self { svgs }
    }

    /// Number of icons loaded from disk.
    #[must_use]
    pub fn loaded(&self) -> usize {
        self.svgs.len()
    }
}

impl IconSet for DirectoryIcons {
    fn svg(&self, icon: Icon) -> Cow<'_, str> {
        match self.svgs.get(&icon) {
            Some(svg) => Cow::Borrowed(svg),
            None => BuiltinIcons.svg(icon),
        }
    }
}

/// Replace the first annotation marker in `content` with its icon.
///
/// Only the first `{...}` token is considered. When its inner word is not a
/// known [`Icon`], `content` is returned unchanged. Otherwise that exact span
/// becomes `<span class="flag"><span class="svg"> SVG </span></span>`, and the
/// outermost blockquote enclosing it (if any) gets `class="has-icon <word>"`.
///
/// Markup that cannot be read as HTML never fails the call; the marker is
/// still replaced and the blockquote is left alone.
pub fn annotate_icons(content: &str, icons: &dyn IconSet) -> String {
    let Some(caps) = MARKER_RE.captures(content) else {
        return content.to_owned();
    };
    let (Some(marker), Some(word)) = (caps.get(0), caps.get(1)) else {
        return content.to_owned();
    };
    let Some(icon) = Icon::from_name(word.as_str()) else {
        return content.to_owned();
    };

    let mut flagged = String::with_capacity(content.len() + 512);
    flagged.push_str(&content[..marker.start()]);
    flagged.push_str(r#"<span class="flag"><span class="svg"> "#);
    flagged.push_str(&icons.svg(icon));
    flagged.push_str(" </span></span>");
    flagged.push_str(&content[marker.end()..]);

    let class = format!("has-icon {icon}");
    match promote_enclosing_blockquote(&flagged, marker.start(), &class) {
        Some(promoted) => promoted,
        None => flagged,
    }
}
