//! Local stand-in for the JSONPlaceholder collection endpoints.
//!
//! Serves `GET /posts`, `/users`, `/comments` and `/todos` from in-memory
//! fixtures. A route can be dropped (→ 404) or replaced with a canned status
//! and body to exercise client error paths.

use std::sync::Arc;

use axum::{
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

pub use axum::http::StatusCode;

pub const RESOURCES: [&str; 4] = ["posts", "users", "comments", "todos"];

#[derive(Clone, Debug)]
enum Reply {
    Items(Vec<Value>),
    Raw { status: StatusCode, body: String },
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        match self {
            Reply::Items(items) => Json(items).into_response(),
            Reply::Raw { status, body } => (status, body).into_response(),
        }
    }
}

/// Per-resource replies, one route each.
#[derive(Clone, Debug)]
pub struct Fixtures {
    routes: Vec<(&'static str, Reply)>,
}

impl Default for Fixtures {
    /// All four routes present, each serving an empty list.
    fn default() -> Self {
        Self {
            routes: RESOURCES
                .iter()
                .map(|name| (*name, Reply::Items(Vec::new())))
                .collect(),
        }
    }
}

impl Fixtures {
    /// JSONPlaceholder-shaped items in the requested quantities.
    pub fn sample(posts: usize, users: usize, comments: usize, todos: usize) -> Self {
        Self::default()
            .with("posts", (1..=posts).map(sample_post).collect())
            .with("users", (1..=users).map(sample_user).collect())
            .with("comments", (1..=comments).map(sample_comment).collect())
            .with("todos", (1..=todos).map(sample_todo).collect())
    }

    /// Serve `items` on `/{resource}`, adding the route if needed.
    pub fn with(self, resource: &'static str, items: Vec<Value>) -> Self {
        self.set(resource, Reply::Items(items))
    }

    /// Answer `/{resource}` with `status` and a raw text body.
    pub fn failing(self, resource: &'static str, status: StatusCode, body: &str) -> Self {
        self.set(
            resource,
            Reply::Raw {
                status,
                body: body.to_string(),
            },
        )
    }

    /// Drop the route for `resource`, so it answers 404.
    pub fn without(mut self, resource: &str) -> Self {
        self.routes.retain(|(name, _)| *name != resource);
        self
    }

    /// Items served on `/{resource}`, if it serves a list.
    pub fn items(&self, resource: &str) -> Option<&[Value]> {
        self.routes.iter().find_map(|(name, reply)| match reply {
            Reply::Items(items) if *name == resource => Some(items.as_slice()),
            _ => None,
        })
    }

    fn set(mut self, resource: &'static str, reply: Reply) -> Self {
        match self.routes.iter_mut().find(|(name, _)| *name == resource) {
            Some(slot) => slot.1 = reply,
            None => self.routes.push((resource, reply)),
        }
        self
    }
}

pub fn app(fixtures: Fixtures) -> Router {
    fixtures
        .routes
        .into_iter()
        .fold(Router::new(), |router, (name, reply)| {
            let reply = Arc::new(reply);
            router.route(
                &format!("/{name}"),
                get(move || {
                    let reply = Arc::clone(&reply);
                    async move { (*reply).clone() }
                }),
            )
        })
}

pub async fn run(listener: TcpListener, fixtures: Fixtures) -> Result<(), std::io::Error> {
    axum::serve(listener, app(fixtures)).await
}

fn sample_post(id: usize) -> Value {
    json!({
        "userId": (id - 1) / 10 + 1,
        "id": id,
        "title": format!("post title {id}"),
        "body": format!("post body {id}"),
    })
}

fn sample_user(id: usize) -> Value {
    json!({
        "id": id,
        "name": format!("User {id}"),
        "username": format!("user{id}"),
        "email": format!("user{id}@example.com"),
        "address": {
            "street": "Kulas Light",
            "suite": format!("Apt. {id}"),
            "city": "Gwenborough",
            "zipcode": "92998-3874",
            "geo": { "lat": "-37.3159", "lng": "81.1496" }
        },
        "phone": "1-770-736-8031 x56442",
        "website": "example.org",
        "company": {
            "name": "Romaguera-Crona",
            "catchPhrase": "Multi-layered client-server neural-net",
            "bs": "harness real-time e-markets"
        }
    })
}

fn sample_comment(id: usize) -> Value {
    json!({
        "postId": (id - 1) / 5 + 1,
        "id": id,
        "name": format!("comment {id}"),
        "email": format!("commenter{id}@example.com"),
        "body": format!("comment body {id}"),
    })
}

fn sample_todo(id: usize) -> Value {
    json!({
        "userId": (id - 1) / 20 + 1,
        "id": id,
        "title": format!("todo {id}"),
        "completed": id % 3 == 0,
    })
}
