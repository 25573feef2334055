//! Pointer-hit button logic, resolved during the Update phase

use crate::component::ComponentKind;
use crate::world::World;
use ember_core::{ComponentId, Result};
use ember_runtime::GameEvent;

/// Click callback. No world access; fires once per press inside the
/// bounds.
pub type ClickHook = Box<dyn FnMut() -> Result<()>>;

/// A clickable region centered on the owning transform.
///
/// `clicked` latches for as long as the press that fired it is held, so a
/// held button cannot re-fire; releasing inside the bounds, or leaving
/// them, re-arms it. `hovered` tracks plain containment. Both flags are
/// readable by same-frame components that run later in the phase.
pub struct Button {
    pub width: f32,
    pub height: f32,
    pub hovered: bool,
    pub clicked: bool,
    pub on_click: Option<ClickHook>,
}

impl Button {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            hovered: false,
            clicked: false,
            on_click: None,
        }
    }

    pub fn with_on_click(mut self, hook: impl FnMut() -> Result<()> + 'static) -> Self {
        self.on_click = Some(Box::new(hook));
        self
    }
}

/// One button's Update. Bounds are closed intervals, matching the
/// collider containment rule.
///
/// The click callback runs before `clicked` latches; a failing hook
/// aborts the frame un-latched, so the next press fires it again.
pub(crate) fn run_button_update(world: &mut World, id: ComponentId) -> Result<()> {
    let Some(center) = world.transform(id.entity).map(|t| t.position) else {
        return Ok(());
    };
    let mouse = world.input().mouse_position();
    let just_pressed = world.input().is_mouse_just_pressed();
    let held = world.input().is_mouse_held();

    let mut fired = false;
    {
        let Some(component) = world.component_mut(id) else {
            return Ok(());
        };
        let ComponentKind::Button(ref mut button) = component.kind else {
            return Ok(());
        };

        let inside = mouse.x >= center.x - button.width / 2.0
            && mouse.x <= center.x + button.width / 2.0
            && mouse.y >= center.y - button.height / 2.0
            && mouse.y <= center.y + button.height / 2.0;

        if inside {
            button.hovered = true;
            if just_pressed {
                if !button.clicked {
                    if let Some(ref mut hook) = button.on_click {
                        hook()?;
                    }
                    fired = true;
                }
                button.clicked = true;
            } else if !held {
                button.clicked = false;
            }
        } else {
            button.hovered = false;
            button.clicked = false;
        }
    }

    if fired {
        log::debug!("button clicked on entity {}", id.entity);
        world.push_event(GameEvent::ButtonClicked { entity: id.entity });
    }
    Ok(())
}
