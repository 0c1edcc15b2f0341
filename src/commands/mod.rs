//! One submodule per Buffer entity. Each owns its CLI arguments, its
//! GraphQL documents, a pure variables builder, and an async handler
//! over [`crate::buffer::BufferApi`] returning the shaped output.
pub mod channels;
pub mod ideas;
pub mod organizations;
pub mod posts;
