//! Modules layer - adapters for collaborators external to the engine.

pub mod store;
