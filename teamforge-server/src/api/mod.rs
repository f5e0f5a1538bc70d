//! HTTP API handlers.

pub mod hackathons;
