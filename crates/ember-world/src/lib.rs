//! Ember World - Entity/component simulation core
//!
//! Owns the pieces that make up one running simulation:
//! - `World` - entity arena, collider registry, input, clock, event bus
//! - `Component` / `ComponentKind` - the closed set of component variants
//! - `Phase` and the three-phase frame scheduler
//! - `BoxCollider` - pairwise overlap with enter/exit edge detection
//! - `Surface` and the renderer components that draw through it

mod button;
mod collide;
mod component;
mod render;
mod schedule;
mod world;

pub use button::{Button, ClickHook};
pub use collide::{BoxCollider, CollisionHit, CollisionHook};
pub use component::{Component, ComponentKind, Script, ScriptHook};
pub use render::{
    Image, ImageRenderer, NullSurface, RectRenderer, Surface, TextAlign, TextRenderer, TextStyle,
    TrailPoint, TrailRenderer,
};
pub use schedule::Phase;
pub use world::{Entity, World};
