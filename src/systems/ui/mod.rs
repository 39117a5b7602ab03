//! Shared UI primitives.
//!
//! Surfaces here are built from world-space sprites and text and rely on
//! `systems::interaction` for hover and click handling.
pub mod dropdown;
