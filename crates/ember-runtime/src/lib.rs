//! Ember Runtime - Frame loop infrastructure
//!
//! Provides the building blocks a frame driver ticks every refresh:
//! - `Clock` - variable-delta frame clock
//! - `Input` - edge-triggered key/mouse state machine with smoothed axes
//! - `InputBindings` - TOML-described key and axis registration
//! - `GameEvent` / `EventBus` - typed event queue drained by the driver

mod axis;
mod bindings;
mod clock;
mod event;
mod input;

pub use axis::Axis;
pub use bindings::{AxisBinding, InputBindings};
pub use clock::Clock;
pub use event::{EventBus, GameEvent};
pub use input::{Input, KeyState};
