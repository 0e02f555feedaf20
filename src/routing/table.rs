//! Route entries and the template set.

use std::fmt;
use std::sync::Arc;

use crate::dispatch::Handler;
use crate::routing::Method;

/// One registered handler. Immutable once pushed.
#[derive(Clone)]
pub struct RouteEntry {
    pub method: Method,
    pub template: Arc<str>,
    pub handler: Arc<dyn Handler>,
}

impl fmt::Debug for RouteEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteEntry")
            .field("method", &self.method)
            .field("template", &self.template)
            .finish_non_exhaustive()
    }
}

/// Deduplicated, insertion-ordered set of declared templates.
#[derive(Debug, Clone, Default)]
pub struct TemplateSet {
    templates: Vec<Arc<str>>,
}

impl TemplateSet {
    /// Insert `template` if absent. Returns the shared copy either way.
    pub fn insert(&mut self, template: &str) -> Arc<str> {
        if let Some(existing) = self.templates.iter().find(|t| &***t == template) {
            return existing.clone();
        }
        let shared: Arc<str> = Arc::from(template);
        self.templates.push(shared.clone());
        shared
    }

    pub fn contains(&self, template: &str) -> bool {
        self.templates.iter().any(|t| &**t == template)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + Clone {
        self.templates.iter().map(|t| &**t)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

/// Registration-ordered route entries plus the templates they reference.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
    templates: TemplateSet,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn declare(&mut self, template: &str) -> Arc<str> {
        self.templates.insert(template)
    }

    pub fn push(&mut self, method: Method, template: Arc<str>, handler: Arc<dyn Handler>) {
        self.entries.push(RouteEntry {
            method,
            template,
            handler,
        });
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    pub fn templates(&self) -> &TemplateSet {
        &self.templates
    }
}
