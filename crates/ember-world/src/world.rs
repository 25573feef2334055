//! World: the entity arena and everything one simulation owns

use crate::collide::BoxCollider;
use crate::component::{Component, ComponentKind};
use ember_core::{ColliderId, ComponentId, EntityId, Transform};
use ember_runtime::{Clock, EventBus, GameEvent, Input};

/// A named, independently activatable container of components.
///
/// Slot 0 is always the Transform, attached by `World::spawn`; everything
/// else is appended in attachment order, which is the order the scheduler
/// visits. Entities are built and owned by a `World` only.
pub struct Entity {
    id: EntityId,
    pub name: String,
    pub active: bool,
    components: Vec<Component>,
}

impl Entity {
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Components in attachment order
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// First component with this name, in attachment order
    pub fn find_component(&self, name: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.name == name)
    }

    pub fn find_component_mut(&mut self, name: &str) -> Option<&mut Component> {
        self.components.iter_mut().find(|c| c.name == name)
    }

    /// The entity's transform. Present on anything spawned normally.
    pub fn transform(&self) -> Option<&Transform> {
        self.components.iter().find_map(|c| c.as_transform())
    }

    pub fn transform_mut(&mut self) -> Option<&mut Transform> {
        self.components.iter_mut().find_map(|c| c.as_transform_mut())
    }
}

/// One running simulation.
///
/// Owns the entity arena, the collider registry, input, the clock, and
/// the event bus, so multiple worlds can coexist and tests run in
/// isolation. Entity ids come from a per-world monotonic counter and are
/// never reused; a handle held across a despawn resolves to `None`.
///
/// The collider registry is append-only: despawning an entity does NOT
/// remove its collider entry. Stale entries are skipped by the overlap
/// pass, which freezes any touching relation they were part of. Callers
/// that need a clean exit should separate the boxes before despawning.
pub struct World {
    entities: Vec<Entity>,
    colliders: Vec<ColliderId>,
    input: Input,
    clock: Clock,
    events: EventBus,
    next_id: u64,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    /// Create a new empty world
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
            colliders: Vec::new(),
            input: Input::new(),
            clock: Clock::new(),
            events: EventBus::new(),
            next_id: 1,
        }
    }

    /// Spawn a new entity with a name and a fresh Transform at the origin.
    ///
    /// Names need not be unique; name lookups return the first match in
    /// registration order.
    pub fn spawn(&mut self, name: impl Into<String>) -> EntityId {
        let id = EntityId::from_raw(self.next_id);
        self.next_id += 1;

        let name = name.into();
        log::debug!("spawned entity '{name}' ({id})");

        self.entities.push(Entity {
            id,
            name,
            active: true,
            components: vec![Component::new(Transform::IDENTITY)],
        });
        id
    }

    /// Remove an entity from the arena by identity.
    ///
    /// Returns whether anything was removed. Does not cascade into the
    /// collider registry; see the type-level note on stale entries.
    pub fn despawn(&mut self, id: EntityId) -> bool {
        let before = self.entities.len();
        self.entities.retain(|e| e.id != id);
        let removed = self.entities.len() != before;
        if removed {
            log::debug!("despawned entity {id}");
        }
        removed
    }

    /// Append a component to an entity.
    ///
    /// BoxCollider components are registered with the collider overlap
    /// pass here; attachment and registration coincide. Returns `None`
    /// when the entity does not exist.
    pub fn add_component(&mut self, id: EntityId, component: Component) -> Option<ComponentId> {
        let is_collider = matches!(component.kind, ComponentKind::BoxCollider(_));

        let entity = self.entities.iter_mut().find(|e| e.id == id)?;
        let slot = entity.components.len();
        entity.components.push(component);

        let component_id = ComponentId::new(id, slot);
        if is_collider {
            log::debug!("registered collider for entity {id} at slot {slot}");
            self.colliders.push(component_id);
        }
        Some(component_id)
    }

    // --- Entity access ---

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    /// First entity with this name, in registration order
    pub fn find_entity(&self, name: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.name == name)
    }

    pub fn find_entity_mut(&mut self, name: &str) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.name == name)
    }

    /// All live entities in registration order
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.iter().any(|e| e.id == id)
    }

    // --- Component access ---

    /// First component with this name on an entity
    pub fn find_component(&self, id: EntityId, name: &str) -> Option<&Component> {
        self.entity(id)?.find_component(name)
    }

    pub fn find_component_mut(&mut self, id: EntityId, name: &str) -> Option<&mut Component> {
        self.entity_mut(id)?.find_component_mut(name)
    }

    /// Component by slot handle; `None` once the owning entity is gone
    pub fn component(&self, id: ComponentId) -> Option<&Component> {
        self.entity(id.entity)?.components.get(id.slot)
    }

    pub fn component_mut(&mut self, id: ComponentId) -> Option<&mut Component> {
        self.entity_mut(id.entity)?.components.get_mut(id.slot)
    }

    /// An entity's transform
    pub fn transform(&self, id: EntityId) -> Option<&Transform> {
        self.entity(id)?.transform()
    }

    pub fn transform_mut(&mut self, id: EntityId) -> Option<&mut Transform> {
        self.entity_mut(id)?.transform_mut()
    }

    // --- Collider registry ---

    /// Every collider ever registered, in registration order. Entries are
    /// never removed, so some may no longer resolve.
    pub fn colliders(&self) -> &[ColliderId] {
        &self.colliders
    }

    /// Resolve a registry entry; `None` for stale entries or slots that
    /// no longer hold a collider
    pub fn collider(&self, id: ColliderId) -> Option<&BoxCollider> {
        self.component(id)?.as_box_collider()
    }

    pub fn collider_mut(&mut self, id: ColliderId) -> Option<&mut BoxCollider> {
        self.component_mut(id)?.as_box_collider_mut()
    }

    // --- Shared runtime state ---

    pub fn input(&self) -> &Input {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut Input {
        &mut self.input
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut Clock {
        &mut self.clock
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Drain events pushed since the last drain, in push order
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain()
    }
}
