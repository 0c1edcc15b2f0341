//! Command-line client for the Buffer GraphQL API.
//!
//! Every invocation is one stateless request/response cycle: build a
//! GraphQL document and variables from CLI flags, POST it with a bearer
//! token, print the unwrapped `data` as pretty JSON or fail with a
//! normalized error.
pub mod buffer;
pub mod commands;
pub mod config;
pub mod media;
