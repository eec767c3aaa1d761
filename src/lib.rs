//! Library crate for the quiz data node, exposing modules for binaries and integration tests.
//!
//! The node stores one JSON document per match under its storage root, next to the media files
//! referenced by the match's questions. Every mutation of a match goes through
//! [`state::MutationQueue`], so writes to one document never interleave.

pub mod config;
pub mod dao;
pub mod dto;
pub mod error;
pub mod routes;
pub mod services;
pub mod state;
