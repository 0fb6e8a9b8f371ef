use std::slice;

/// Labels stripped when the command line adds nothing else.
pub const DEFAULT_LABELS: [&str; 3] = ["dev", "debug", "assert"];

/// Ordered, duplicate free list of labels.
///
/// Order is significant: each label's strip pass runs on the output of the
/// previous one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelSet {
    labels: Vec<String>,
}

impl LabelSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults() -> Self {
        DEFAULT_LABELS.iter().collect()
    }

    /// Adds a label, dropping one leading `@`. Returns false for duplicates
    /// and empty names.
    pub fn insert(&mut self, label: &str) -> bool {
        let label = label.strip_prefix('@').unwrap_or(label);
        if label.is_empty() || self.contains(label) {
            return false;
        }
        self.labels.push(label.to_string());
        true
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, String> {
        self.labels.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.labels
    }
}

impl AsRef<[String]> for LabelSet {
    fn as_ref(&self) -> &[String] {
        &self.labels
    }
}

impl<S: AsRef<str>> Extend<S> for LabelSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for label in iter {
            self.insert(label.as_ref());
        }
    }
}

impl<S: AsRef<str>> FromIterator<S> for LabelSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = LabelSet::new();
        set.extend(iter);
        set
    }
}

impl<'a> IntoIterator for &'a LabelSet {
    type Item = &'a String;
    type IntoIter = slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
