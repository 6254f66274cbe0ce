//! Hero records as exchanged with the REST API.

use serde::{Deserialize, Serialize};

/// A hero record. The server owns `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hero {
    pub id: i64,
    pub name: String,
}

/// Payload for `POST <base>`; the server assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewHero {
    pub name: String,
}

impl NewHero {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Acknowledgement for requests whose response body is not used (PUT, DELETE).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ack;
