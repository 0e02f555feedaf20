//! Router construction.
//!
//! # Responsibilities
//! - Declare templates and register handler chains per template
//! - Validate the table once, at `build()`
//! - Freeze the table into an immutable `Router`
//!
//! # Design Decisions
//! - Handlers can only be registered on a `TemplateScope`, so there is no
//!   way to register without a declared template
//! - Immutable after construction (thread-safe without locks)
//! - Re-declaring a template is allowed and extends its chain

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dispatch::Handler;
use crate::routing::table::RouteTable;
use crate::routing::template::capture_names;
use crate::routing::Method;

/// What to do with a template that repeats a capture name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateCapturePolicy {
    /// Accept; the later capture's value overwrites the earlier one.
    #[default]
    LastWins,
    /// Fail `build()`.
    Reject,
}

/// Errors raised while freezing a router.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("template `{template}` repeats capture `{name}`")]
    DuplicateCapture { template: String, name: String },
}

/// Collects templates and handlers before building a [`Router`].
#[derive(Debug, Default)]
pub struct RouterBuilder {
    table: RouteTable,
    duplicate_captures: DuplicateCapturePolicy,
    emit_failure_diagnostics: bool,
}

impl RouterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn duplicate_captures(mut self, policy: DuplicateCapturePolicy) -> Self {
        self.duplicate_captures = policy;
        self
    }

    /// Write serialization errors to the sink in place of the payload.
    pub fn emit_failure_diagnostics(mut self, enabled: bool) -> Self {
        self.emit_failure_diagnostics = enabled;
        self
    }

    /// Declare `template` and open a registration scope for it.
    pub fn route(mut self, template: &str) -> TemplateScope {
        let template = self.table.declare(template);
        TemplateScope {
            builder: self,
            template,
        }
    }

    pub fn build(self) -> Result<Router, BuildError> {
        if self.duplicate_captures == DuplicateCapturePolicy::Reject {
            for template in self.table.templates().iter() {
                let names = capture_names(template);
                for (i, name) in names.iter().enumerate() {
                    if names[..i].contains(name) {
                        return Err(BuildError::DuplicateCapture {
                            template: template.to_string(),
                            name: name.to_string(),
                        });
                    }
                }
            }
        }

        tracing::debug!(
            templates = self.table.templates().len(),
            entries = self.table.entries().len(),
            "Router built"
        );

        Ok(Router {
            table: self.table,
            emit_failure_diagnostics: self.emit_failure_diagnostics,
        })
    }
}

/// Registration scope for one declared template.
#[derive(Debug)]
pub struct TemplateScope {
    builder: RouterBuilder,
    template: Arc<str>,
}

impl TemplateScope {
    /// Register `handlers` under `method`, in iteration order.
    pub fn on<I>(mut self, method: Method, handlers: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn Handler>>,
    {
        for handler in handlers {
            self.builder
                .table
                .push(method, self.template.clone(), handler);
        }
        self
    }

    fn one(self, method: Method, handler: impl Handler) -> Self {
        let handler: Arc<dyn Handler> = Arc::new(handler);
        self.on(method, [handler])
    }

    /// Register a handler for every request method.
    pub fn use_(self, handler: impl Handler) -> Self {
        self.one(Method::Use, handler)
    }

    pub fn get(self, handler: impl Handler) -> Self {
        self.one(Method::Get, handler)
    }

    pub fn post(self, handler: impl Handler) -> Self {
        self.one(Method::Post, handler)
    }

    pub fn put(self, handler: impl Handler) -> Self {
        self.one(Method::Put, handler)
    }

    pub fn patch(self, handler: impl Handler) -> Self {
        self.one(Method::Patch, handler)
    }

    pub fn delete(self, handler: impl Handler) -> Self {
        self.one(Method::Delete, handler)
    }

    /// Template this scope registers under.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Close this scope and declare the next template.
    pub fn route(self, template: &str) -> TemplateScope {
        self.builder.route(template)
    }

    /// Close this scope without declaring another template.
    pub fn done(self) -> RouterBuilder {
        self.builder
    }

    pub fn build(self) -> Result<Router, BuildError> {
        self.builder.build()
    }
}

/// Frozen route table. Dispatch lives in `dispatch::engine`.
#[derive(Debug, Clone)]
pub struct Router {
    pub(crate) table: RouteTable,
    pub(crate) emit_failure_diagnostics: bool,
}

impl Router {
    pub fn builder() -> RouterBuilder {
        RouterBuilder::new()
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }
}
