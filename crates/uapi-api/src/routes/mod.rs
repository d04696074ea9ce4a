//! # Route Handlers
//!
//! One module per record kind. Each handler validates its input against the
//! schema its route contract names, then echoes the typed record back with a
//! server-assigned identifier. Nothing is persisted.

pub mod comments;
pub mod posts;
pub mod users;
