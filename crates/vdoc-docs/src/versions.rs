//! Ordered registry of published documentation versions.

/// Published documentation versions mapped to display labels.
///
/// Order is significant: it is the order versions are offered to readers,
/// and the first entry is the default version. The registry is built once
/// at startup and never changes afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocVersions {
    entries: Vec<(String, String)>,
}

impl DocVersions {
    /// Build a registry from `(id, label)` pairs.
    ///
    /// A repeated id keeps its first position and label.
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut out: Vec<(String, String)> = Vec::new();
        for (id, label) in entries {
            let id = id.into();
            if out.iter().any(|(existing, _)| *existing == id) {
                tracing::debug!(version = %id, "Ignoring duplicate version");
                continue;
            }
            out.push((id, label.into()));
        }
        Self { entries: out }
    }

    /// Iterate `(id, label)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(id, label)| (id.as_str(), label.as_str()))
    }

    /// Display label for a version id.
    #[must_use]
    pub fn label(&self, id: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == id)
            .map(|(_, label)| label.as_str())
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.label(id).is_some()
    }

    /// The first registered version.
    #[must_use]
    pub fn default_version(&self) -> Option<&str> {
        self.entries.first().map(|(id, _)| id.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for DocVersions {
    fn default() -> Self {
        Self::new([
            ("master", "Master"),
            ("5.4", "5.4"),
            ("5.3", "5.3"),
            ("5.2", "5.2"),
            ("5.1", "5.1"),
            ("5.0", "5.0"),
            ("4.2", "4.2"),
        ])
    }
}
