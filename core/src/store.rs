//! In-memory record store.
//!
//! # Design
//! `RecordStore` owns three independent `Collection`s. A collection keeps its
//! records in insertion order next to a `next_id` counter. The counter only
//! moves forward, so an identifier freed by `delete` is never handed out
//! again.
//!
//! The generic `Collection<T>` API is typed. The kind-dispatched methods on
//! `RecordStore` take raw JSON payloads and return `Record`. The HTTP layer
//! uses the dispatched form because it only learns the kind at runtime.
//!
//! The store does no locking. Callers that share it wrap it themselves (the
//! server keeps it behind an async `RwLock`).

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::StoreError;
use crate::fixtures;
use crate::types::{
    NewPost, NewTodo, NewUser, Post, PostPatch, Record, RecordId, RecordKind, Todo, TodoPatch,
    User, UserPatch,
};

/// A record type the store can hold.
pub trait Entity: Clone + Into<Record> {
    /// Create payload; missing fields take their defaults.
    type Draft: DeserializeOwned;
    /// Partial update payload.
    type Patch: DeserializeOwned;

    const KIND: RecordKind;

    fn id(&self) -> RecordId;

    fn from_draft(id: RecordId, draft: Self::Draft) -> Self;

    /// Shallow merge. Fields present in `patch` win; `id` never changes.
    fn apply(&mut self, patch: Self::Patch);
}

/// A record that references a user.
pub trait Owned {
    fn user_id(&self) -> RecordId;
}

impl Entity for User {
    type Draft = NewUser;
    type Patch = UserPatch;

    const KIND: RecordKind = RecordKind::User;

    fn id(&self) -> RecordId {
        self.id
    }

    fn from_draft(id: RecordId, draft: NewUser) -> Self {
        User {
            id,
            name: draft.name,
            email: draft.email,
            username: draft.username,
            phone: draft.phone,
            website: draft.website,
            address: draft.address.unwrap_or_default(),
            company: draft.company.unwrap_or_default(),
        }
    }

    fn apply(&mut self, patch: UserPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(username) = patch.username {
            self.username = username;
        }
        if let Some(phone) = patch.phone {
            self.phone = phone;
        }
        if let Some(website) = patch.website {
            self.website = website;
        }
        if let Some(address) = patch.address {
            self.address = address;
        }
        if let Some(company) = patch.company {
            self.company = company;
        }
    }
}

impl Entity for Post {
    type Draft = NewPost;
    type Patch = PostPatch;

    const KIND: RecordKind = RecordKind::Post;

    fn id(&self) -> RecordId {
        self.id
    }

    fn from_draft(id: RecordId, draft: NewPost) -> Self {
        Post {
            id,
            user_id: draft.user_id,
            title: draft.title,
            body: draft.body,
        }
    }

    fn apply(&mut self, patch: PostPatch) {
        if let Some(user_id) = patch.user_id {
            self.user_id = user_id;
        }
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(body) = patch.body {
            self.body = body;
        }
    }
}

impl Entity for Todo {
    type Draft = NewTodo;
    type Patch = TodoPatch;

    const KIND: RecordKind = RecordKind::Todo;

    fn id(&self) -> RecordId {
        self.id
    }

    fn from_draft(id: RecordId, draft: NewTodo) -> Self {
        Todo {
            id,
            user_id: draft.user_id,
            title: draft.title,
            completed: draft.completed,
        }
    }

    fn apply(&mut self, patch: TodoPatch) {
        if let Some(user_id) = patch.user_id {
            self.user_id = user_id;
        }
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
    }
}

impl Owned for Post {
    fn user_id(&self) -> RecordId {
        self.user_id
    }
}

impl Owned for Todo {
    fn user_id(&self) -> RecordId {
        self.user_id
    }
}

/// Ordered records of one kind plus the next identifier to assign.
#[derive(Debug, Clone)]
pub struct Collection<T> {
    records: Vec<T>,
    next_id: RecordId,
}

impl<T: Entity> Default for Collection<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            next_id: 1,
        }
    }
}

impl<T: Entity> Collection<T> {
    /// Start from existing records; the counter resumes after the largest id.
    pub fn with_records(records: Vec<T>) -> Self {
        let next_id = records.iter().map(T::id).max().map_or(1, |max| max + 1);
        Self { records, next_id }
    }

    pub fn list(&self) -> &[T] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Identifier the next `create` will assign.
    pub fn next_id(&self) -> RecordId {
        self.next_id
    }

    pub fn get(&self, id: RecordId) -> Result<&T, StoreError> {
        self.records
            .iter()
            .find(|r| r.id() == id)
            .ok_or(StoreError::NotFound(T::KIND))
    }

    pub fn create(&mut self, draft: T::Draft) -> T {
        let record = T::from_draft(self.next_id, draft);
        self.next_id += 1;
        self.records.push(record.clone());
        record
    }

    pub fn update(&mut self, id: RecordId, patch: T::Patch) -> Result<T, StoreError> {
        let record = self
            .records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or(StoreError::NotFound(T::KIND))?;
        record.apply(patch);
        Ok(record.clone())
    }

    /// Remove a record and return its last value.
    pub fn delete(&mut self, id: RecordId) -> Result<T, StoreError> {
        let index = self
            .records
            .iter()
            .position(|r| r.id() == id)
            .ok_or(StoreError::NotFound(T::KIND))?;
        Ok(self.records.remove(index))
    }

    fn contains(&self, id: RecordId) -> bool {
        self.records.iter().any(|r| r.id() == id)
    }

    fn create_from_json(&mut self, data: Value) -> Result<Record, StoreError> {
        let draft = decode::<T::Draft>(T::KIND, data)?;
        Ok(self.create(draft).into())
    }

    fn update_from_json(&mut self, id: RecordId, data: Value) -> Result<Record, StoreError> {
        if !self.contains(id) {
            return Err(StoreError::NotFound(T::KIND));
        }
        let patch = decode::<T::Patch>(T::KIND, data)?;
        self.update(id, patch).map(Into::into)
    }

    fn to_records(&self) -> Vec<Record> {
        self.records.iter().cloned().map(Into::into).collect()
    }
}

impl<T: Entity + Owned> Collection<T> {
    /// Records whose `userId` matches, in insertion order. An unknown user
    /// yields an empty list.
    pub fn filter_by_user(&self, user_id: RecordId) -> Vec<T> {
        self.records
            .iter()
            .filter(|r| r.user_id() == user_id)
            .cloned()
            .collect()
    }
}

/// The three collections backing the mock data API.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    users: Collection<User>,
    posts: Collection<Post>,
    todos: Collection<Todo>,
}

impl RecordStore {
    /// Two fixture rows per collection; every counter starts at 3.
    pub fn seeded() -> Self {
        Self {
            users: Collection::with_records(fixtures::users()),
            posts: Collection::with_records(fixtures::posts()),
            todos: Collection::with_records(fixtures::todos()),
        }
    }

    pub fn users(&self) -> &Collection<User> {
        &self.users
    }

    pub fn posts(&self) -> &Collection<Post> {
        &self.posts
    }

    pub fn todos(&self) -> &Collection<Todo> {
        &self.todos
    }

    pub fn list(&self, kind: RecordKind) -> Vec<Record> {
        match kind {
            RecordKind::User => self.users.to_records(),
            RecordKind::Post => self.posts.to_records(),
            RecordKind::Todo => self.todos.to_records(),
        }
    }

    pub fn get(&self, kind: RecordKind, id: RecordId) -> Result<Record, StoreError> {
        match kind {
            RecordKind::User => self.users.get(id).cloned().map(Into::into),
            RecordKind::Post => self.posts.get(id).cloned().map(Into::into),
            RecordKind::Todo => self.todos.get(id).cloned().map(Into::into),
        }
    }

    /// Only posts and todos carry a `userId`.
    pub fn filter_by_user(
        &self,
        kind: RecordKind,
        user_id: RecordId,
    ) -> Result<Vec<Record>, StoreError> {
        match kind {
            RecordKind::Post => Ok(into_records(self.posts.filter_by_user(user_id))),
            RecordKind::Todo => Ok(into_records(self.todos.filter_by_user(user_id))),
            RecordKind::User => Err(StoreError::InvalidArgument(
                "users cannot be filtered by userId".to_string(),
            )),
        }
    }

    /// `data` of `None` or JSON `null` counts as absent.
    pub fn create(&mut self, kind: RecordKind, data: Option<Value>) -> Result<Record, StoreError> {
        let data = present(data).ok_or_else(|| {
            StoreError::InvalidArgument("Both type and data are required".to_string())
        })?;
        match kind {
            RecordKind::User => self.users.create_from_json(data),
            RecordKind::Post => self.posts.create_from_json(data),
            RecordKind::Todo => self.todos.create_from_json(data),
        }
    }

    pub fn update(
        &mut self,
        kind: RecordKind,
        id: RecordId,
        data: Value,
    ) -> Result<Record, StoreError> {
        match kind {
            RecordKind::User => self.users.update_from_json(id, data),
            RecordKind::Post => self.posts.update_from_json(id, data),
            RecordKind::Todo => self.todos.update_from_json(id, data),
        }
    }

    pub fn delete(&mut self, kind: RecordKind, id: RecordId) -> Result<Record, StoreError> {
        match kind {
            RecordKind::User => self.users.delete(id).map(Into::into),
            RecordKind::Post => self.posts.delete(id).map(Into::into),
            RecordKind::Todo => self.todos.delete(id).map(Into::into),
        }
    }
}

/// Strict numeric parse of an `id` parameter.
pub fn parse_id(raw: Option<&str>) -> Result<RecordId, StoreError> {
    parse_numeric("id", raw)
}

/// Strict numeric parse of a `userId` parameter.
pub fn parse_user_id(raw: Option<&str>) -> Result<RecordId, StoreError> {
    parse_numeric("userId", raw)
}

fn parse_numeric(name: &str, raw: Option<&str>) -> Result<RecordId, StoreError> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| StoreError::InvalidArgument(format!("{name} parameter is required")))?;
    raw.parse()
        .map_err(|_| StoreError::InvalidArgument(format!("{name} must be a non-negative integer")))
}

fn present(data: Option<Value>) -> Option<Value> {
    data.filter(|v| !v.is_null())
}

fn decode<P: DeserializeOwned>(kind: RecordKind, data: Value) -> Result<P, StoreError> {
    if !data.is_object() {
        return Err(StoreError::InvalidArgument(format!(
            "Invalid {kind} data: expected a JSON object"
        )));
    }
    serde_json::from_value(data)
        .map_err(|e| StoreError::InvalidArgument(format!("Invalid {kind} data: {e}")))
}

fn into_records<T: Into<Record>>(records: Vec<T>) -> Vec<Record> {
    records.into_iter().map(Into::into).collect()
}
