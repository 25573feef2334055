//! The three-phase frame scheduler
//!
//! Each frame advances the clock, resolves input, then sweeps EarlyUpdate,
//! Update, and LateUpdate across every active entity's enabled components.
//! Ordering is an observable contract: entity registration order, then
//! component attachment order within the entity.

use crate::button;
use crate::collide;
use crate::component::{ComponentKind, ScriptHook};
use crate::render::{self, Surface};
use crate::world::World;
use ember_core::{ComponentId, EngineError, EntityId, Result};

/// The update phases, in frame order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    EarlyUpdate,
    Update,
    LateUpdate,
}

impl Phase {
    /// Every phase, in execution order
    pub const ALL: [Phase; 3] = [Phase::EarlyUpdate, Phase::Update, Phase::LateUpdate];

    pub fn name(self) -> &'static str {
        match self {
            Phase::EarlyUpdate => "EarlyUpdate",
            Phase::Update => "Update",
            Phase::LateUpdate => "LateUpdate",
        }
    }
}

/// What a visited component slot runs as
enum Op {
    Script,
    Collider,
    Button,
    Renderer,
}

impl World {
    /// Run one frame against the wall clock
    pub fn run_frame(&mut self, surface: &mut dyn Surface) -> Result<()> {
        self.clock_mut().tick();
        self.run_phases(surface)
    }

    /// Run one frame with an explicit delta, for deterministic hosts and
    /// tests
    pub fn run_frame_with_dt(&mut self, dt: f64, surface: &mut dyn Surface) -> Result<()> {
        self.clock_mut().step(dt);
        self.run_phases(surface)
    }

    fn run_phases(&mut self, surface: &mut dyn Surface) -> Result<()> {
        let dt = self.clock().delta_time as f32;
        self.input_mut().begin_frame(dt);
        for phase in Phase::ALL {
            self.run_phase(phase, surface)?;
        }
        Ok(())
    }

    /// Run a single phase over a snapshot of the currently active
    /// entities.
    ///
    /// Membership is fixed when the phase starts: entities spawned during
    /// it first run in the next phase, and entities despawned during it
    /// stop resolving and are skipped. Each entity's slot range is
    /// captured at its visit, so a component appended to the entity being
    /// visited also waits for the next phase.
    pub fn run_phase(&mut self, phase: Phase, surface: &mut dyn Surface) -> Result<()> {
        log::trace!("running {} phase", phase.name());
        let ids: Vec<EntityId> = self
            .entities()
            .iter()
            .filter(|e| e.active)
            .map(|e| e.id())
            .collect();

        for id in ids {
            let Some(count) = self.entity(id).map(|e| e.components().len()) else {
                continue;
            };
            for slot in 0..count {
                self.dispatch(phase, ComponentId::new(id, slot), surface)?;
            }
        }
        Ok(())
    }

    fn dispatch(&mut self, phase: Phase, id: ComponentId, surface: &mut dyn Surface) -> Result<()> {
        let op = {
            let Some(component) = self.component(id) else {
                return Ok(());
            };
            if !component.enabled {
                return Ok(());
            }
            match (&component.kind, phase) {
                (ComponentKind::Script(_), _) => Op::Script,
                (ComponentKind::BoxCollider(_), Phase::Update) => Op::Collider,
                (ComponentKind::Button(_), Phase::Update) => Op::Button,
                (
                    ComponentKind::RectRenderer(_)
                    | ComponentKind::ImageRenderer(_)
                    | ComponentKind::TrailRenderer(_)
                    | ComponentKind::TextRenderer(_),
                    Phase::LateUpdate,
                ) => Op::Renderer,
                _ => return Ok(()),
            }
        };

        let result = match op {
            Op::Script => self.run_script(phase, id),
            Op::Collider => collide::run_collider_update(self, id),
            Op::Button => button::run_button_update(self, id),
            Op::Renderer => {
                render::run_late_update(self, id, surface);
                Ok(())
            }
        };
        result.map_err(|source| self.hook_error(phase, id, source))
    }

    /// Run one script hook with the world handed back to it.
    ///
    /// The hook is taken out of its slot for the duration so the closure
    /// can mutate the world freely, its own entity included. If it
    /// despawned its owner the hook is dropped with it, and if it set a
    /// new hook in its own slot the new hook wins.
    fn run_script(&mut self, phase: Phase, id: ComponentId) -> Result<()> {
        let Some(mut hook) = self.take_script_hook(id, phase) else {
            return Ok(());
        };
        let result = hook(self, id.entity);
        self.restore_script_hook(id, phase, hook);
        result
    }

    fn take_script_hook(&mut self, id: ComponentId, phase: Phase) -> Option<ScriptHook> {
        let script = self.component_mut(id)?.as_script_mut()?;
        script.hook_mut(phase).take()
    }

    fn restore_script_hook(&mut self, id: ComponentId, phase: Phase, hook: ScriptHook) {
        let Some(script) = self.component_mut(id).and_then(|c| c.as_script_mut()) else {
            return;
        };
        let slot = script.hook_mut(phase);
        if slot.is_none() {
            *slot = Some(hook);
        }
    }

    /// Wrap a failed hook with the site it failed at. Hook faults are
    /// fatal to the frame; the caller stops sweeping and propagates.
    fn hook_error(&self, phase: Phase, id: ComponentId, source: EngineError) -> EngineError {
        let entity = self
            .entity(id.entity)
            .map(|e| e.name.clone())
            .unwrap_or_else(|| id.entity.to_string());
        let component = self
            .component(id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| format!("slot {}", id.slot));
        log::error!(
            "{} hook on '{entity}.{component}' failed: {source}",
            phase.name()
        );
        EngineError::HookFailed {
            phase: phase.name(),
            entity,
            component,
            source: Box::new(source),
        }
    }
}
