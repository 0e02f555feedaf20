//! Demo item API served by the `chain-router` binary.
//!
//! A fixed, read-only catalogue behind a few handler chains: a request
//! logger on every item route, a JSON body guard in front of writes, and
//! the handlers themselves. Writes are echoed back, never stored.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::config::RoutingConfig;
use crate::dispatch::{HandlerRequest, Next, Reply};
use crate::routing::{BuildError, Method, Router};

static ITEMS: [(&str, &str); 3] = [("1", "lamp"), ("2", "desk"), ("3", "chair")];

#[derive(Debug, Serialize)]
struct Item<'a> {
    id: &'a str,
    name: &'a str,
}

#[derive(Debug, Deserialize)]
struct ItemBody {
    name: String,
}

fn find(id: &str) -> Option<Item<'static>> {
    ITEMS
        .iter()
        .find(|(item_id, _)| *item_id == id)
        .map(|(id, name)| Item { id: *id, name: *name })
}

fn log_request(req: &HandlerRequest<'_>, next: &mut Next) -> Reply {
    tracing::info!(method = %req.method(), path = %req.path(), params = ?req.params(), "Item request");
    next.resume();
    Reply::Empty
}

/// Lets reads through; writes continue only with a valid JSON body.
fn require_json_body(req: &HandlerRequest<'_>, next: &mut Next) -> Reply {
    if req.method() == Method::Get || req.method() == Method::Delete {
        next.resume();
        return Reply::Empty;
    }
    match req.json::<ItemBody>() {
        Ok(_) => {
            next.resume();
            Reply::Empty
        }
        Err(e) => Reply::json(json!({ "error": format!("invalid item body: {e}") })),
    }
}

fn health(_: &HandlerRequest<'_>, _: &mut Next) -> Reply {
    Reply::json(json!({ "status": "ok" }))
}

fn list_items(req: &HandlerRequest<'_>, _: &mut Next) -> Reply {
    let limit = req
        .data_value("limit")
        .and_then(|l| l.parse().ok())
        .unwrap_or(ITEMS.len());
    let items: Vec<_> = ITEMS
        .iter()
        .take(limit)
        .map(|(id, name)| Item { id: *id, name: *name })
        .collect();
    Reply::json(items)
}

fn create_item(req: &HandlerRequest<'_>, _: &mut Next) -> Reply {
    Reply::from(req.json::<ItemBody>().ok().map(|body| {
        json!({ "created": { "name": body.name } })
    }))
}

fn get_item(req: &HandlerRequest<'_>, _: &mut Next) -> Reply {
    match req.param("id").and_then(find) {
        Some(item) => Reply::json(item),
        None => Reply::json(json!({ "error": "item not found" })),
    }
}

fn update_item(req: &HandlerRequest<'_>, _: &mut Next) -> Reply {
    let id = req.param("id").unwrap_or_default().to_string();
    Reply::from(req.json::<ItemBody>().ok().map(|body| {
        json!({ "updated": { "id": id, "name": body.name } })
    }))
}

fn delete_item(req: &HandlerRequest<'_>, _: &mut Next) -> Reply {
    Reply::json(json!({ "deleted": req.param("id") }))
}

fn user_post(req: &HandlerRequest<'_>, _: &mut Next) -> Reply {
    Reply::json(json!({ "params": req.params() }))
}

/// Build the demo router.
pub fn router(config: &RoutingConfig) -> Result<Router, BuildError> {
    Router::builder()
        .duplicate_captures(config.duplicate_captures)
        .emit_failure_diagnostics(config.emit_failure_diagnostics)
        .route("/health")
        .get(health)
        .route("/items")
        .use_(log_request)
        .use_(require_json_body)
        .get(list_items)
        .post(create_item)
        .route("/items/:id")
        .use_(log_request)
        .use_(require_json_body)
        .get(get_item)
        .put(update_item)
        .patch(update_item)
        .delete(delete_item)
        .route("/users/:id/posts/:postId")
        .get(user_post)
        .build()
}
