//! Ember Core - Foundational types for the Ember engine
//!
//! This crate provides the core types that all other Ember crates depend on:
//! - `EntityId`, `ComponentId` - Stable handles into a world
//! - `Vec2`, `Transform` - Spatial types
//! - `Color`, `Gradient` - Paint types for the renderer components
//! - Error types and Result alias

mod error;
mod gradient;
mod id;
mod types;

pub use error::{EngineError, Result};
pub use gradient::{Gradient, GradientStop};
pub use id::{ColliderId, ComponentId, EntityId};
pub use types::{lerp, Color, Transform, Vec2};
