//! Ordered multi-valued header storage.
//!
//! Emission order is an observable contract (`Set-Cookie` repetition must
//! survive serialization byte-for-byte), so this is a plain insertion-ordered
//! sequence of pairs rather than a hash map. Names are compared byte-exact;
//! case folding, if any, is the wire writer's business.

use compact_str::CompactString;

pub const CONTENT_TYPE: &str = "Content-Type";
pub const CONTENT_LENGTH: &str = "Content-Length";

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HeaderMap {
    entries: Vec<(CompactString, CompactString)>,
}

impl HeaderMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry. Existing entries with the same name are kept,
    /// duplicates included.
    pub fn add(&mut self, name: impl Into<CompactString>, value: impl Into<CompactString>) {
        self.entries.push((name.into(), value.into()));
    }

    /// Drops every entry named `name`, then appends the new one.
    pub fn set(&mut self, name: impl Into<CompactString>, value: impl Into<CompactString>) {
        let name = name.into();
        self.clear(&name);
        self.add(name, value);
    }

    /// Removes all entries named `name`. No-op if there are none.
    pub fn clear(&mut self, name: &str) {
        self.entries.retain(|(n, _)| n.as_str() != name);
    }

    pub fn clear_all(&mut self) {
        self.entries.clear();
    }

    pub fn has(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n.as_str() == name)
    }

    /// True if some entry named `name` holds exactly `value`.
    pub fn has_value(&self, name: &str, value: &str) -> bool {
        self.entries.iter().any(|(n, v)| n.as_str() == name && v.as_str() == value)
    }

    /// First value for `name`, if any.
    pub fn first(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n.as_str() == name)
            .map(|(_, v)| v.as_str())
    }

    /// Every value for `name`, in insertion order.
    pub fn values(&self, name: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(n, _)| n.as_str() == name)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// All entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
