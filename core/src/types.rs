//! Record types for the mock data API.
//!
//! # Design
//! Each record kind comes in three shapes: the stored record (`User`, `Post`,
//! `Todo`), a create payload (`NewUser`, ...) where every field falls back to
//! an empty default, and a patch (`UserPatch`, ...) where every field is
//! optional. Patches carry no `id` field, so an `id` in an update payload is
//! dropped during deserialization and can never reach a stored record.
//!
//! JSON field names are camelCase (`userId`, `catchPhrase`) to match the wire
//! format clients already use.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Identifier assigned by the store.
pub type RecordId = u64;

/// Geographic coordinates, kept as strings the way the fixtures carry them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Geo {
    pub lat: String,
    pub lng: String,
}

impl Default for Geo {
    fn default() -> Self {
        Self {
            lat: "0".to_string(),
            lng: "0".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Address {
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub suite: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub zipcode: String,
    #[serde(default)]
    pub geo: Geo,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub catch_phrase: String,
    #[serde(default)]
    pub bs: String,
}

/// A user record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: RecordId,
    pub name: String,
    pub email: String,
    pub username: String,
    pub phone: String,
    pub website: String,
    pub address: Address,
    pub company: Company,
}

/// A post record. `user_id` is not checked against the users collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: RecordId,
    pub user_id: RecordId,
    pub title: String,
    pub body: String,
}

/// A todo record. `user_id` is not checked against the users collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: RecordId,
    pub user_id: RecordId,
    pub title: String,
    pub completed: bool,
}

/// Create payload for a user. A nested structure that is absent or `null`
/// becomes an empty default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub username: String,
    pub phone: String,
    pub website: String,
    pub address: Option<Address>,
    pub company: Option<Company>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NewPost {
    pub user_id: RecordId,
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NewTodo {
    pub user_id: RecordId,
    pub title: String,
    pub completed: bool,
}

/// Partial update for a user. Nested structures are replaced whole, not
/// merged field by field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<Company>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

/// Any stored record. Serializes as the inner record with no tag.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Record {
    User(User),
    Post(Post),
    Todo(Todo),
}

impl Record {
    pub fn id(&self) -> RecordId {
        match self {
            Record::User(u) => u.id,
            Record::Post(p) => p.id,
            Record::Todo(t) => t.id,
        }
    }

    pub fn kind(&self) -> RecordKind {
        match self {
            Record::User(_) => RecordKind::User,
            Record::Post(_) => RecordKind::Post,
            Record::Todo(_) => RecordKind::Todo,
        }
    }
}

impl From<User> for Record {
    fn from(user: User) -> Self {
        Record::User(user)
    }
}

impl From<Post> for Record {
    fn from(post: Post) -> Self {
        Record::Post(post)
    }
}

impl From<Todo> for Record {
    fn from(todo: Todo) -> Self {
        Record::Todo(todo)
    }
}

/// The three collections, named in the singular form used by mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    User,
    Post,
    Todo,
}

impl RecordKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RecordKind::User => "user",
            RecordKind::Post => "post",
            RecordKind::Todo => "todo",
        }
    }

    /// Capitalized name used in "not found" messages.
    pub fn label(self) -> &'static str {
        match self {
            RecordKind::User => "User",
            RecordKind::Post => "Post",
            RecordKind::Todo => "Todo",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordKind {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(RecordKind::User),
            "post" => Ok(RecordKind::Post),
            "todo" => Ok(RecordKind::Todo),
            _ => Err(StoreError::InvalidArgument(
                "Invalid type. Use: user, post, todo".to_string(),
            )),
        }
    }
}

/// Read query selector, named in the plural form used by reads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DataQuery {
    #[default]
    Users,
    Posts,
    Todos,
    PostsByUser,
    TodosByUser,
}

impl DataQuery {
    pub fn as_str(self) -> &'static str {
        match self {
            DataQuery::Users => "users",
            DataQuery::Posts => "posts",
            DataQuery::Todos => "todos",
            DataQuery::PostsByUser => "posts-by-user",
            DataQuery::TodosByUser => "todos-by-user",
        }
    }

    /// Collection the query reads from.
    pub fn kind(self) -> RecordKind {
        match self {
            DataQuery::Users => RecordKind::User,
            DataQuery::Posts | DataQuery::PostsByUser => RecordKind::Post,
            DataQuery::Todos | DataQuery::TodosByUser => RecordKind::Todo,
        }
    }

    pub fn is_by_user(self) -> bool {
        matches!(self, DataQuery::PostsByUser | DataQuery::TodosByUser)
    }
}

impl fmt::Display for DataQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataQuery {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "users" => Ok(DataQuery::Users),
            "posts" => Ok(DataQuery::Posts),
            "todos" => Ok(DataQuery::Todos),
            "posts-by-user" => Ok(DataQuery::PostsByUser),
            "todos-by-user" => Ok(DataQuery::TodosByUser),
            _ => Err(StoreError::InvalidArgument(
                "Invalid type. Use: users, posts, todos, posts-by-user, todos-by-user".to_string(),
            )),
        }
    }
}
