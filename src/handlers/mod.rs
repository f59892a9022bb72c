//! HTTP layer: one module per resource family, each exposing a `router()`
//! that lib.rs merges into the app. Handlers parse the request, call the
//! matching service, and shape the response (status, Location, pagination
//! headers).

pub mod comments;
pub mod email_list;
pub mod events;
pub mod groups;
pub mod health;
pub mod likes;
pub mod programs;
pub mod tags;
pub mod tasks;
pub mod troops;
pub mod users;
pub mod workspaces;
