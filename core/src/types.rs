//! Resource shapes and the aggregate record.
//!
//! # Design
//! The remote API owns the shape of every item, so an item keeps the JSON
//! object exactly as served (key order and explicit `null`s included) and
//! writes it back with the same keys, order and values. On parse, the fields the
//! collector knows about are checked against a private shape struct: a known
//! field of the wrong type (an `id` that is a string, say) is rejected, while
//! absent, `null` and unknown fields pass through.

use std::fmt;

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

/// One of the four collections fetched from the API, in fetch order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Posts,
    Users,
    Comments,
    Todos,
}

impl Resource {
    pub const ALL: [Resource; 4] = [
        Resource::Posts,
        Resource::Users,
        Resource::Comments,
        Resource::Todos,
    ];

    /// Path segment appended to the base URL.
    pub fn path(self) -> &'static str {
        match self {
            Resource::Posts => "posts",
            Resource::Users => "users",
            Resource::Comments => "comments",
            Resource::Todos => "todos",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Decode `value` as `S` to type-check its known fields. Only objects
/// qualify; serde would otherwise accept a positional array for a struct.
fn check_shape<S: DeserializeOwned>(value: &Value) -> Result<(), serde_json::Error> {
    if !value.is_object() {
        return Err(de::Error::invalid_type(unexpected(value), &"a JSON object"));
    }
    S::deserialize(value).map(|_| ())
}

fn unexpected(value: &Value) -> de::Unexpected<'_> {
    match value {
        Value::Null => de::Unexpected::Unit,
        Value::Bool(b) => de::Unexpected::Bool(*b),
        Value::Number(_) => de::Unexpected::Other("number"),
        Value::String(s) => de::Unexpected::Str(s),
        Value::Array(_) => de::Unexpected::Seq,
        Value::Object(_) => de::Unexpected::Map,
    }
}

macro_rules! api_item {
    ($(#[$doc:meta])* $name:ident, $shape:ty) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name {
            value: Value,
        }

        impl $name {
            pub fn id(&self) -> Option<u64> {
                self.value.get("id").and_then(Value::as_u64)
            }

            /// Raw value of `key` as served.
            pub fn get(&self, key: &str) -> Option<&Value> {
                self.value.get(key)
            }

            /// The whole item as served. Always a JSON object.
            pub fn as_value(&self) -> &Value {
                &self.value
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                self.value.serialize(serializer)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let value = Value::deserialize(deserializer)?;
                check_shape::<$shape>(&value).map_err(de::Error::custom)?;
                Ok(Self { value })
            }
        }
    };
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(dead_code)]
struct PostShape {
    id: Option<u64>,
    user_id: Option<u64>,
    title: Option<String>,
    body: Option<String>,
}

// `address` and `company` are free-form.
#[derive(Deserialize)]
#[allow(dead_code)]
struct UserShape {
    id: Option<u64>,
    name: Option<String>,
    username: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    website: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(dead_code)]
struct CommentShape {
    id: Option<u64>,
    post_id: Option<u64>,
    name: Option<String>,
    email: Option<String>,
    body: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(dead_code)]
struct TodoShape {
    id: Option<u64>,
    user_id: Option<u64>,
    title: Option<String>,
    completed: Option<bool>,
}

api_item!(
    /// A blog post: `userId`, `id`, `title`, `body`.
    Post,
    PostShape
);
api_item!(
    /// A user account: `id`, `name`, `username`, `email`, `phone`, `website`,
    /// plus nested `address` and `company` objects.
    User,
    UserShape
);
api_item!(
    /// A comment on a post: `postId`, `id`, `name`, `email`, `body`.
    Comment,
    CommentShape
);
api_item!(
    /// A todo item: `userId`, `id`, `title`, `completed`.
    Todo,
    TodoShape
);

impl Post {
    pub fn user_id(&self) -> Option<u64> {
        self.value.get("userId").and_then(Value::as_u64)
    }

    pub fn title(&self) -> Option<&str> {
        self.value.get("title").and_then(Value::as_str)
    }
}

impl User {
    pub fn username(&self) -> Option<&str> {
        self.value.get("username").and_then(Value::as_str)
    }
}

impl Comment {
    pub fn post_id(&self) -> Option<u64> {
        self.value.get("postId").and_then(Value::as_u64)
    }
}

impl Todo {
    pub fn completed(&self) -> Option<bool> {
        self.value.get("completed").and_then(Value::as_bool)
    }
}

/// Run metadata written alongside the collections. Field order is the
/// serialized key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub timestamp: String,
    pub total_posts: usize,
    pub total_users: usize,
    pub total_comments: usize,
    pub total_todos: usize,
    pub api_source: String,
}

/// The four collections plus their metadata.
///
/// Only `AggregateRecord::new` builds one from parts, so the `total_*`
/// counts always match the collection lengths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateRecord {
    posts: Vec<Post>,
    users: Vec<User>,
    comments: Vec<Comment>,
    todos: Vec<Todo>,
    metadata: Metadata,
}

impl AggregateRecord {
    /// Number of top-level categories in the serialized record.
    pub const CATEGORIES: usize = 5;

    pub fn new(
        posts: Vec<Post>,
        users: Vec<User>,
        comments: Vec<Comment>,
        todos: Vec<Todo>,
        api_source: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        let metadata = Metadata {
            timestamp: timestamp.into(),
            total_posts: posts.len(),
            total_users: users.len(),
            total_comments: comments.len(),
            total_todos: todos.len(),
            api_source: api_source.into(),
        };
        Self {
            posts,
            users,
            comments,
            todos,
            metadata,
        }
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Whether every `total_*` count equals its collection length. Always
    /// true for records built with `new`; a record read back from disk may
    /// have been edited.
    pub fn totals_match(&self) -> bool {
        self.metadata.total_posts == self.posts.len()
            && self.metadata.total_users == self.users.len()
            && self.metadata.total_comments == self.comments.len()
            && self.metadata.total_todos == self.todos.len()
    }
}
