//! Ember Demo - Scripted scene stepped headlessly
//!
//! Builds a small scene (an axis-driven mover with a trail, an obstacle,
//! a clickable button), feeds it synthetic host input, and steps it at a
//! fixed 60 Hz delta, printing collision and click events as they fire.
//!
//! Usage:
//!   ember-demo [--frames <n>] [--bindings <path.toml>]
//!
//! Set RUST_LOG=trace to see every draw call.

use anyhow::{Context, Result};
use clap::Parser;
use ember_core::{ColliderId, Color, Gradient, Vec2};
use ember_runtime::{GameEvent, InputBindings};
use ember_world::{
    BoxCollider, Button, Component, RectRenderer, Script, Surface, TextRenderer, TextStyle,
    TrailRenderer, World,
};

const DT: f64 = 1.0 / 60.0;

#[derive(Parser)]
#[command(name = "ember-demo")]
#[command(about = "Scripted Ember scene stepped headlessly at a fixed delta")]
struct Args {
    /// Number of frames to simulate
    #[arg(long, default_value_t = 240)]
    frames: u32,

    /// TOML input bindings file; the built-in WASD layout otherwise
    #[arg(long)]
    bindings: Option<String>,
}

/// Counts draw calls and traces each one
#[derive(Default)]
struct ConsoleSurface {
    rects: u32,
    images: u32,
    circles: u32,
    texts: u32,
}

impl Surface for ConsoleSurface {
    fn fill_rect(&mut self, min: Vec2, size: Vec2, color: Color) {
        self.rects += 1;
        log::trace!(
            "rect at ({:.1}, {:.1}) size {}x{} {:?}",
            min.x,
            min.y,
            size.x,
            size.y,
            color
        );
    }

    fn draw_image(&mut self, source: &str, min: Vec2, _size: Vec2) {
        self.images += 1;
        log::trace!("image '{source}' at ({:.1}, {:.1})", min.x, min.y);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, _color: Color, alpha: f32) {
        self.circles += 1;
        log::trace!(
            "circle at ({:.1}, {:.1}) r={radius:.2} alpha={alpha:.2}",
            center.x,
            center.y
        );
    }

    fn draw_text(&mut self, text: &str, position: Vec2, _style: &TextStyle) {
        self.texts += 1;
        log::trace!("text '{text}' at ({:.1}, {:.1})", position.x, position.y);
    }
}

fn build_scene(world: &mut World) {
    // A mover that rides the horizontal axis and leaves a trail
    let mover = world.spawn("mover");
    world
        .transform_mut(mover)
        .expect("mover was just spawned")
        .position = Vec2::new(0.0, 60.0);
    world.add_component(mover, Component::new(RectRenderer::new(20.0, 20.0, Color::RED)));
    world.add_component(
        mover,
        Component::new(
            TrailRenderer::new(6.0, Gradient::new(Color::from_hex(0xffa028), Color::BLACK), 0.5)
                .with_alpha(0.8, 0.0),
        ),
    );
    world.add_component(
        mover,
        Component::new(
            BoxCollider::new(20.0, 20.0)
                .with_on_enter(|hit| {
                    println!("        mover ran into '{}'", hit.other_name);
                    Ok(())
                })
                .with_on_exit(|hit| {
                    println!("        mover cleared '{}'", hit.other_name);
                    Ok(())
                }),
        ),
    );
    world.add_component(
        mover,
        Component::new(Script::new().with_update(|world, me| {
            let dt = world.clock().delta_time as f32;
            let axis = world.input().axis("horizontal");
            if let Some(transform) = world.transform_mut(me) {
                transform.translate(Vec2::RIGHT * (axis * 150.0 * dt));
            }
            Ok(())
        })),
    );

    // Something to run into
    let obstacle = world.spawn("obstacle");
    world
        .transform_mut(obstacle)
        .expect("obstacle was just spawned")
        .position = Vec2::new(240.0, 60.0);
    world.add_component(
        obstacle,
        Component::new(RectRenderer::new(20.0, 20.0, Color::BLUE)),
    );
    world.add_component(obstacle, Component::new(BoxCollider::new(20.0, 20.0)));

    // A labeled button the synthetic pointer clicks partway through
    let button = world.spawn("start-button");
    world
        .transform_mut(button)
        .expect("button was just spawned")
        .position = Vec2::new(60.0, 16.0);
    world.add_component(
        button,
        Component::new(Button::new(80.0, 24.0).with_on_click(|| {
            println!("        start pressed");
            Ok(())
        })),
    );
    world.add_component(
        button,
        Component::new(TextRenderer::new("Start", TextStyle::default()).with_height_offset(4.0)),
    );
}

/// The host side of the demo: key and pointer events on a fixed script
fn feed_input(world: &mut World, frame: u32) {
    match frame {
        5 => world.input_mut().press_key("d"),
        30 => {
            world.input_mut().set_mouse_position(Vec2::new(60.0, 16.0));
            world.input_mut().press_mouse();
        }
        33 => world.input_mut().release_mouse(),
        200 => world.input_mut().release_key("d"),
        _ => {}
    }
}

fn owner_name(world: &World, id: ColliderId) -> String {
    world
        .entity(id.entity)
        .map(|e| e.name.clone())
        .unwrap_or_else(|| id.entity.to_string())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut world = World::new();
    let bindings = match &args.bindings {
        Some(path) => InputBindings::from_path(path)
            .with_context(|| format!("failed to load bindings from {path}"))?,
        None => InputBindings::wasd(),
    };
    bindings.apply(world.input_mut());
    build_scene(&mut world);

    println!(
        "stepping {} frames at {:.1} ms ({} entities)",
        args.frames,
        DT * 1000.0,
        world.entity_count()
    );

    let mut surface = ConsoleSurface::default();
    for frame in 0..args.frames {
        feed_input(&mut world, frame);
        world
            .run_frame_with_dt(DT, &mut surface)
            .with_context(|| format!("frame {frame} aborted"))?;

        for event in world.drain_events() {
            match event {
                GameEvent::CollisionStarted { collider_a, collider_b } => println!(
                    "[{frame:3}] collision started: {} <-> {}",
                    owner_name(&world, collider_a),
                    owner_name(&world, collider_b)
                ),
                GameEvent::CollisionEnded { collider_a, collider_b } => println!(
                    "[{frame:3}] collision ended:   {} <-> {}",
                    owner_name(&world, collider_a),
                    owner_name(&world, collider_b)
                ),
                GameEvent::ButtonClicked { entity } => println!(
                    "[{frame:3}] button clicked on '{}'",
                    world.entity(entity).map(|e| e.name.as_str()).unwrap_or("?")
                ),
            }
        }
    }

    let final_position = world
        .find_entity("mover")
        .and_then(|e| e.transform())
        .map(|t| t.position)
        .unwrap_or(Vec2::ZERO);
    println!();
    println!(
        "done: mover at ({:.1}, {:.1}) after {:.2}s simulated",
        final_position.x,
        final_position.y,
        world.clock().total_time
    );
    println!(
        "draw calls: {} rects, {} circles, {} texts, {} images",
        surface.rects, surface.circles, surface.texts, surface.images
    );
    Ok(())
}
