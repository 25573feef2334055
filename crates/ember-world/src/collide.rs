//! Box collision with enter/exit edge detection
//!
//! Every BoxCollider independently scans the full registry during its own
//! Update and manages its pair states, so each unordered pair is evaluated
//! from both sides. The first side to observe a transition updates both
//! `touching` lists, which is what keeps the redundant evaluation
//! consistent and each edge firing exactly once.

use crate::world::World;
use ember_core::{ColliderId, EntityId, Result, Vec2};
use ember_runtime::GameEvent;

/// Collision edge callback. Runs while the scheduler is mid-pass, so it
/// cannot reach back into the world; use a `Script` with
/// `BoxCollider::touching` or the event bus for world-mutating reactions.
pub type CollisionHook = Box<dyn FnMut(&CollisionHit) -> Result<()>>;

/// What a collision callback learns about the edge it is observing
pub struct CollisionHit {
    /// The collider whose callback is running
    pub own: ColliderId,
    /// The collider on the other side of the edge
    pub other: ColliderId,
    pub other_entity: EntityId,
    pub other_name: String,
}

/// An axis-aligned box collider.
///
/// Overlap is tested with a 4-corner containment check run from both
/// directions, not a full interval intersection: two boxes count as
/// overlapping only when some corner of one lies inside the other. A
/// narrow box piercing clean through a wide box's side has no contained
/// corner and is NOT detected. This approximation is the documented
/// behavior; do not tighten it without retesting everything built on it.
pub struct BoxCollider {
    pub width: f32,
    pub height: f32,
    pub on_enter: Option<CollisionHook>,
    pub on_exit: Option<CollisionHook>,
    touching: Vec<ColliderId>,
}

impl BoxCollider {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            on_enter: None,
            on_exit: None,
            touching: Vec::new(),
        }
    }

    pub fn with_on_enter(mut self, hook: impl FnMut(&CollisionHit) -> Result<()> + 'static) -> Self {
        self.on_enter = Some(Box::new(hook));
        self
    }

    pub fn with_on_exit(mut self, hook: impl FnMut(&CollisionHit) -> Result<()> + 'static) -> Self {
        self.on_exit = Some(Box::new(hook));
        self
    }

    /// Colliders currently overlapping this one, oldest contact first
    pub fn touching(&self) -> &[ColliderId] {
        &self.touching
    }

    pub fn is_touching(&self, other: ColliderId) -> bool {
        self.touching.contains(&other)
    }
}

/// Axis-aligned bounds with closed-interval containment
#[derive(Clone, Copy, Debug)]
pub(crate) struct Bounds {
    min: Vec2,
    max: Vec2,
}

impl Bounds {
    pub(crate) fn from_center(center: Vec2, width: f32, height: f32) -> Self {
        let half = Vec2::new(width / 2.0, height / 2.0);
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Boundary points count as inside
    pub(crate) fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }

    pub(crate) fn corners(&self) -> [Vec2; 4] {
        [
            Vec2::new(self.min.x, self.min.y),
            Vec2::new(self.min.x, self.max.y),
            Vec2::new(self.max.x, self.min.y),
            Vec2::new(self.max.x, self.max.y),
        ]
    }
}

/// The corner containment test, run from both directions
pub(crate) fn boxes_overlap(a: &Bounds, b: &Bounds) -> bool {
    b.corners().iter().any(|c| a.contains(*c)) || a.corners().iter().any(|c| b.contains(*c))
}

/// Resolve a registry entry to world-space bounds. `None` when the owner
/// is gone or the slot no longer holds a collider.
fn collider_bounds(world: &World, id: ColliderId) -> Option<Bounds> {
    let center = world.transform(id.entity)?.position;
    let collider = world.collider(id)?;
    Some(Bounds::from_center(center, collider.width, collider.height))
}

/// One collider's Update: scan the whole registry and commit any pair
/// transitions observed from this side.
///
/// Stale entries are skipped, which freezes any touching relation their
/// owner was part of: no exit fires for a despawned collider. Inactive
/// entities and disabled collider components are skipped as *drivers* by
/// the scheduler but still scanned as targets here.
pub(crate) fn run_collider_update(world: &mut World, id: ColliderId) -> Result<()> {
    let Some(own_bounds) = collider_bounds(world, id) else {
        return Ok(());
    };

    let registry: Vec<ColliderId> = world.colliders().to_vec();
    for other in registry {
        if other == id {
            continue;
        }
        let Some(other_bounds) = collider_bounds(world, other) else {
            continue;
        };

        let overlapping = boxes_overlap(&own_bounds, &other_bounds);
        let was_touching = world.collider(id).map(|c| c.is_touching(other)).unwrap_or(false);

        if overlapping && !was_touching {
            begin_contact(world, id, other)?;
        } else if !overlapping && was_touching {
            end_contact(world, id, other)?;
        }
    }
    Ok(())
}

#[derive(Clone, Copy)]
enum ContactEdge {
    Enter,
    Exit,
}

/// Apart -> Touching. Callbacks run before the membership commit, so a
/// failing hook aborts the frame with the transition unrecorded and the
/// same edge fires again next frame.
fn begin_contact(world: &mut World, own: ColliderId, other: ColliderId) -> Result<()> {
    fire_hook(world, own, other, ContactEdge::Enter)?;
    fire_hook(world, other, own, ContactEdge::Enter)?;

    if let Some(collider) = world.collider_mut(own) {
        collider.touching.push(other);
    }
    if let Some(collider) = world.collider_mut(other) {
        collider.touching.push(own);
    }
    log::debug!("collision started: {own:?} <-> {other:?}");
    world.push_event(GameEvent::CollisionStarted {
        collider_a: own,
        collider_b: other,
    });
    Ok(())
}

/// Touching -> Apart, same commit discipline as `begin_contact`
fn end_contact(world: &mut World, own: ColliderId, other: ColliderId) -> Result<()> {
    fire_hook(world, own, other, ContactEdge::Exit)?;
    fire_hook(world, other, own, ContactEdge::Exit)?;

    if let Some(collider) = world.collider_mut(own) {
        collider.touching.retain(|t| *t != other);
    }
    if let Some(collider) = world.collider_mut(other) {
        collider.touching.retain(|t| *t != own);
    }
    log::debug!("collision ended: {own:?} <-> {other:?}");
    world.push_event(GameEvent::CollisionEnded {
        collider_a: own,
        collider_b: other,
    });
    Ok(())
}

fn fire_hook(world: &mut World, own: ColliderId, other: ColliderId, edge: ContactEdge) -> Result<()> {
    let other_name = world
        .entity(other.entity)
        .map(|e| e.name.clone())
        .unwrap_or_default();
    let hit = CollisionHit {
        own,
        other,
        other_entity: other.entity,
        other_name,
    };

    let Some(collider) = world.collider_mut(own) else {
        return Ok(());
    };
    let hook = match edge {
        ContactEdge::Enter => collider.on_enter.as_mut(),
        ContactEdge::Exit => collider.on_exit.as_mut(),
    };
    match hook {
        Some(hook) => hook(&hit),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::Component;
    use crate::render::NullSurface;
    use crate::schedule::Phase;
    use ember_core::EngineError;
    use std::cell::Cell;
    use std::rc::Rc;

    const DT: f64 = 1.0 / 60.0;

    fn spawn_box(
        world: &mut World,
        name: &str,
        position: Vec2,
        width: f32,
        height: f32,
    ) -> (EntityId, ColliderId) {
        let id = world.spawn(name);
        world.transform_mut(id).unwrap().position = position;
        let collider_id = world
            .add_component(id, Component::new(BoxCollider::new(width, height)))
            .unwrap();
        (id, collider_id)
    }

    fn count_edges(world: &mut World, id: ColliderId) -> (Rc<Cell<u32>>, Rc<Cell<u32>>) {
        let enters = Rc::new(Cell::new(0));
        let exits = Rc::new(Cell::new(0));
        let collider = world.collider_mut(id).unwrap();

        let counter = Rc::clone(&enters);
        collider.on_enter = Some(Box::new(move |_| {
            counter.set(counter.get() + 1);
            Ok(())
        }));
        let counter = Rc::clone(&exits);
        collider.on_exit = Some(Box::new(move |_| {
            counter.set(counter.get() + 1);
            Ok(())
        }));
        (enters, exits)
    }

    #[test]
    fn test_bounds_contains_closed_interval() {
        let bounds = Bounds::from_center(Vec2::ZERO, 10.0, 10.0);
        assert!(bounds.contains(Vec2::ZERO));
        assert!(bounds.contains(Vec2::new(5.0, 5.0)));
        assert!(bounds.contains(Vec2::new(-5.0, 3.0)));
        assert!(!bounds.contains(Vec2::new(5.1, 0.0)));
    }

    #[test]
    fn test_corner_free_overlap_is_missed() {
        // A tall thin box through a wide flat box: real overlap, but no
        // corner of either lies inside the other
        let tall = Bounds::from_center(Vec2::ZERO, 2.0, 40.0);
        let wide = Bounds::from_center(Vec2::ZERO, 40.0, 2.0);
        assert!(!boxes_overlap(&tall, &wide));
    }

    #[test]
    fn test_far_apart_never_touch() {
        let mut world = World::new();
        let (_, a) = spawn_box(&mut world, "a", Vec2::ZERO, 10.0, 10.0);
        let (_, b) = spawn_box(&mut world, "b", Vec2::new(100.0, 100.0), 10.0, 10.0);
        let (enters, _) = count_edges(&mut world, a);

        for _ in 0..3 {
            world.run_frame_with_dt(DT, &mut NullSurface).unwrap();
        }

        assert_eq!(enters.get(), 0);
        assert!(world.collider(a).unwrap().touching().is_empty());
        assert!(world.collider(b).unwrap().touching().is_empty());
    }

    #[test]
    fn test_enter_fires_once_per_side() {
        let mut world = World::new();
        let (_, a) = spawn_box(&mut world, "a", Vec2::ZERO, 10.0, 10.0);
        let (_, b) = spawn_box(&mut world, "b", Vec2::new(5.0, 0.0), 10.0, 10.0);
        let (a_enters, _) = count_edges(&mut world, a);
        let (b_enters, _) = count_edges(&mut world, b);

        for _ in 0..3 {
            world.run_frame_with_dt(DT, &mut NullSurface).unwrap();
        }

        assert_eq!(a_enters.get(), 1);
        assert_eq!(b_enters.get(), 1);
        assert_eq!(world.collider(a).unwrap().touching(), &[b]);
        assert_eq!(world.collider(b).unwrap().touching(), &[a]);

        let started: Vec<_> = world
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::CollisionStarted { .. }))
            .collect();
        assert_eq!(
            started,
            vec![GameEvent::CollisionStarted {
                collider_a: a,
                collider_b: b
            }]
        );
    }

    #[test]
    fn test_exit_fires_once_after_separation() {
        let mut world = World::new();
        let (mover, a) = spawn_box(&mut world, "a", Vec2::ZERO, 10.0, 10.0);
        let (_, b) = spawn_box(&mut world, "b", Vec2::new(5.0, 0.0), 10.0, 10.0);
        let (a_enters, a_exits) = count_edges(&mut world, a);
        let (_, b_exits) = count_edges(&mut world, b);

        world.run_frame_with_dt(DT, &mut NullSurface).unwrap();
        assert_eq!(a_enters.get(), 1);

        world.transform_mut(mover).unwrap().position = Vec2::new(100.0, 100.0);
        for _ in 0..3 {
            world.run_frame_with_dt(DT, &mut NullSurface).unwrap();
        }

        assert_eq!(a_exits.get(), 1);
        assert_eq!(b_exits.get(), 1);
        assert!(world.collider(a).unwrap().touching().is_empty());
        assert!(world.collider(b).unwrap().touching().is_empty());

        let ended = world
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::CollisionEnded { .. }))
            .count();
        assert_eq!(ended, 1);
    }

    #[test]
    fn test_edge_contact_counts_as_touch() {
        // Boxes meeting exactly at an edge share boundary corners, and
        // boundary points are inside
        let mut world = World::new();
        let (_, a) = spawn_box(&mut world, "a", Vec2::ZERO, 10.0, 10.0);
        let (_, b) = spawn_box(&mut world, "b", Vec2::new(10.0, 0.0), 10.0, 10.0);

        world.run_frame_with_dt(DT, &mut NullSurface).unwrap();

        assert!(world.collider(a).unwrap().is_touching(b));
    }

    #[test]
    fn test_repeated_update_phase_is_noop() {
        let mut world = World::new();
        let (_, a) = spawn_box(&mut world, "a", Vec2::ZERO, 10.0, 10.0);
        let (_, b) = spawn_box(&mut world, "b", Vec2::new(5.0, 0.0), 10.0, 10.0);
        let (a_enters, _) = count_edges(&mut world, a);

        world.run_frame_with_dt(DT, &mut NullSurface).unwrap();
        world.run_phase(Phase::Update, &mut NullSurface).unwrap();
        world.run_phase(Phase::Update, &mut NullSurface).unwrap();

        assert_eq!(a_enters.get(), 1);
        assert_eq!(world.collider(a).unwrap().touching(), &[b]);
        assert_eq!(world.collider(b).unwrap().touching(), &[a]);
    }

    #[test]
    fn test_stale_entry_skipped_without_exit() {
        let mut world = World::new();
        let (_, a) = spawn_box(&mut world, "a", Vec2::ZERO, 10.0, 10.0);
        let (victim, b) = spawn_box(&mut world, "b", Vec2::new(5.0, 0.0), 10.0, 10.0);
        let (_, a_exits) = count_edges(&mut world, a);

        world.run_frame_with_dt(DT, &mut NullSurface).unwrap();
        assert!(world.collider(a).unwrap().is_touching(b));

        world.despawn(victim);
        for _ in 0..3 {
            world.run_frame_with_dt(DT, &mut NullSurface).unwrap();
        }

        // The relation freezes: no exit, membership persists, and the
        // registry still carries the stale entry
        assert_eq!(a_exits.get(), 0);
        assert!(world.collider(a).unwrap().is_touching(b));
        assert_eq!(world.colliders().len(), 2);
    }

    #[test]
    fn test_enter_hook_error_leaves_transition_uncommitted() {
        let mut world = World::new();
        let (_, a) = spawn_box(&mut world, "a", Vec2::ZERO, 10.0, 10.0);
        let (_, b) = spawn_box(&mut world, "b", Vec2::new(5.0, 0.0), 10.0, 10.0);
        let (b_enters, _) = count_edges(&mut world, b);

        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        world.collider_mut(a).unwrap().on_enter = Some(Box::new(move |_| {
            counter.set(counter.get() + 1);
            if counter.get() == 1 {
                Err(EngineError::ScriptError("first contact refused".into()))
            } else {
                Ok(())
            }
        }));

        // Frame 1 aborts before the other side's hook or any commit
        assert!(world.run_frame_with_dt(DT, &mut NullSurface).is_err());
        assert_eq!(calls.get(), 1);
        assert_eq!(b_enters.get(), 0);
        assert!(world.collider(a).unwrap().touching().is_empty());

        // The edge is still pending, so the next frame fires it again
        world.run_frame_with_dt(DT, &mut NullSurface).unwrap();
        assert_eq!(calls.get(), 2);
        assert_eq!(b_enters.get(), 1);
        assert!(world.collider(a).unwrap().is_touching(b));
        assert!(world.collider(b).unwrap().is_touching(a));
    }

    #[test]
    fn test_inactive_entity_is_still_a_target() {
        let mut world = World::new();
        let (_, a) = spawn_box(&mut world, "a", Vec2::ZERO, 10.0, 10.0);
        let (sleeper, b) = spawn_box(&mut world, "b", Vec2::new(5.0, 0.0), 10.0, 10.0);
        let (b_enters, _) = count_edges(&mut world, b);
        world.entity_mut(sleeper).unwrap().active = false;

        world.run_frame_with_dt(DT, &mut NullSurface).unwrap();

        // The sleeper's own update never runs, but the active side's scan
        // still sees it and notifies both
        assert_eq!(b_enters.get(), 1);
        assert!(world.collider(a).unwrap().is_touching(b));
        assert!(world.collider(b).unwrap().is_touching(a));
    }

    #[test]
    fn test_disabled_collider_is_still_a_target() {
        let mut world = World::new();
        let (_, a) = spawn_box(&mut world, "a", Vec2::ZERO, 10.0, 10.0);
        let (_, b) = spawn_box(&mut world, "b", Vec2::new(5.0, 0.0), 10.0, 10.0);
        world.component_mut(b).unwrap().enabled = false;

        world.run_frame_with_dt(DT, &mut NullSurface).unwrap();

        assert!(world.collider(a).unwrap().is_touching(b));
        assert!(world.collider(b).unwrap().is_touching(a));
    }

    #[test]
    fn test_hook_sees_other_side() {
        let mut world = World::new();
        let (_, a) = spawn_box(&mut world, "a", Vec2::ZERO, 10.0, 10.0);
        let (other_id, b) = spawn_box(&mut world, "obstacle", Vec2::new(5.0, 0.0), 10.0, 10.0);

        let seen = Rc::new(Cell::new(None));
        let slot = Rc::clone(&seen);
        world.collider_mut(a).unwrap().on_enter = Some(Box::new(move |hit| {
            slot.set(Some((hit.own, hit.other, hit.other_entity, hit.other_name == "obstacle")));
            Ok(())
        }));

        world.run_frame_with_dt(DT, &mut NullSurface).unwrap();

        assert_eq!(seen.get(), Some((a, b, other_id, true)));
    }
}
