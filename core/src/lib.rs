//! Domain core for the mock data and weather service.
//!
//! # Overview
//! `RecordStore` holds the in-memory users, posts and todos behind the
//! `/data` API. `WeatherClient` builds provider requests and reshapes
//! provider responses for the `/weather` API without touching the network
//! (host-does-IO pattern).
//!
//! # Design
//! - The store is a plain owned value. Sharing and locking belong to the
//!   caller.
//! - Creates take defaulted drafts and updates take all-optional patches.
//!   Neither has an `id` field, so a stored identifier cannot be overwritten.
//! - `userId` references are stored as given and never validated.

pub mod error;
mod fixtures;
pub mod http;
pub mod store;
pub mod types;
pub mod weather;

pub use error::{StoreError, WeatherError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use store::{parse_id, parse_user_id, Collection, Entity, Owned, RecordStore};
pub use types::{
    Address, Company, DataQuery, Geo, NewPost, NewTodo, NewUser, Post, PostPatch, Record,
    RecordId, RecordKind, Todo, TodoPatch, User, UserPatch,
};
pub use weather::{
    settle, BatchEntry, CitySummary, Conditions, Coordinates, CurrentWeather, Location, Units,
    WeatherClient,
};
