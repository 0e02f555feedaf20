//! Path template tokenizing and matching.
//!
//! # Responsibilities
//! - Split paths and templates into tokens
//! - Test a path against a template (arity + literal equality)
//! - Capture named parameters from `:name` tokens
//! - Select the candidate templates for a request path
//!
//! # Design Decisions
//! - A token is a run of `[A-Za-z0-9_-]`, optionally prefixed by `:`
//! - Every other byte is a separator and is dropped, so `/a.b/:id` and
//!   `/a/b/5` have the same shape
//! - No regex: a single byte scan per string
//! - An exact string hit in the template set short-circuits token matching

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Marker byte that turns a template token into a capture.
pub const CAPTURE_MARKER: u8 = b':';

fn is_token_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_'
}

/// Split `s` into its ordered tokens.
///
/// Returns an empty vector when `s` holds no token at all (`"/"`, `""`).
pub fn tokenize(s: &str) -> Vec<&str> {
    let bytes = s.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let start = i;
        if bytes[i] == CAPTURE_MARKER && bytes.get(i + 1).copied().is_some_and(is_token_byte) {
            i += 1;
        } else if !is_token_byte(bytes[i]) {
            i += 1;
            continue;
        }

        while i < bytes.len() && is_token_byte(bytes[i]) {
            i += 1;
        }
        // Token boundaries are always ASCII, so the slice is valid UTF-8.
        tokens.push(&s[start..i]);
    }

    tokens
}

/// Parameters captured from a matched path.
///
/// Keeps template order. Inserting a name twice keeps the first position and
/// replaces the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    entries: Vec<(String, String)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a capture. Returns the previous value for `name`, if any.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((name, value));
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl Serialize for Params {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Capture names of `template`, in token order, duplicates included.
pub fn capture_names(template: &str) -> Vec<&str> {
    tokenize(template)
        .into_iter()
        .filter_map(|t| t.strip_prefix(':'))
        .collect()
}

/// Match `path` against `template`.
///
/// Returns `None` when either side has no tokens, when the token counts
/// differ, or when a literal template token differs from the path token.
/// Capture tokens accept any path token.
pub fn match_template(path: &str, template: &str) -> Option<Params> {
    let path_tokens = tokenize(path);
    let template_tokens = tokenize(template);

    if path_tokens.is_empty() || template_tokens.is_empty() {
        return None;
    }
    if path_tokens.len() != template_tokens.len() {
        return None;
    }

    let mut params = Params::new();
    for (segment, token) in path_tokens.iter().zip(&template_tokens) {
        match token.strip_prefix(':') {
            Some(name) => {
                params.insert(name, *segment);
            }
            None if segment == token => {}
            None => return None,
        }
    }

    Some(params)
}

/// Select the templates a request path can be dispatched to.
///
/// An exact string hit returns that template alone. Otherwise every template
/// that token-matches `path`, in set order.
pub fn select_candidates<'a, I>(templates: I, path: &str) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
    I::IntoIter: Clone,
{
    let templates = templates.into_iter();

    if let Some(exact) = templates.clone().find(|t| *t == path) {
        return vec![exact];
    }

    templates
        .filter(|t| match_template(path, t).is_some())
        .collect()
}
