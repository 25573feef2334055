//! Renderer components and the surface they draw through
//!
//! Renderers are thin LateUpdate adapters: they read the already-settled
//! transform state and issue immediate-mode draw calls. Nothing here reads
//! back from the surface.

use crate::component::ComponentKind;
use crate::world::World;
use ember_core::{lerp, Color, ComponentId, Gradient, Vec2};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A 2D immediate-mode drawing surface.
///
/// Every call carries its full draw state, so implementations need no
/// save/restore discipline. Positions are in surface coordinates with +y
/// down, matching `Vec2::DOWN`.
pub trait Surface {
    /// Fill an axis-aligned rectangle from its top-left corner
    fn fill_rect(&mut self, min: Vec2, size: Vec2, color: Color);
    /// Blit an image asset by source identifier into a rectangle
    fn draw_image(&mut self, source: &str, min: Vec2, size: Vec2);
    /// Fill a circle with an explicit opacity in [0, 1]
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color, alpha: f32);
    /// Draw a run of text positioned per its style's alignment
    fn draw_text(&mut self, text: &str, position: Vec2, style: &TextStyle);
}

/// A surface that ignores every draw call, for headless hosts and tests
pub struct NullSurface;

impl Surface for NullSurface {
    fn fill_rect(&mut self, _min: Vec2, _size: Vec2, _color: Color) {}
    fn draw_image(&mut self, _source: &str, _min: Vec2, _size: Vec2) {}
    fn fill_circle(&mut self, _center: Vec2, _radius: f32, _color: Color, _alpha: f32) {}
    fn draw_text(&mut self, _text: &str, _position: Vec2, _style: &TextStyle) {}
}

/// Horizontal anchoring of drawn text
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Draw state for one run of text
#[derive(Clone, Debug)]
pub struct TextStyle {
    /// Font description as the surface understands it, e.g. "16px sans-serif"
    pub font: String,
    pub color: Color,
    pub align: TextAlign,
    /// Stroke the outline instead of filling
    pub stroke: bool,
    /// Cap on the rendered width; the surface condenses to fit
    pub max_width: Option<f32>,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font: "16px sans-serif".to_string(),
            color: Color::default(),
            align: TextAlign::default(),
            stroke: false,
            max_width: None,
        }
    }
}

/// A shared handle to an asset the host loads asynchronously.
///
/// Renderers poll `is_loaded` and skip drawing until the host flips the
/// flag; a load that never finishes just never draws. Clones share the
/// flag.
#[derive(Clone)]
pub struct Image {
    pub source: String,
    loaded: Arc<AtomicBool>,
}

impl Image {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            loaded: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Host-side: signal that the asset is ready to blit
    pub fn mark_loaded(&self) {
        self.loaded.store(true, Ordering::Relaxed);
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.load(Ordering::Relaxed)
    }
}

/// Fills a rectangle centered on the owning transform
pub struct RectRenderer {
    pub width: f32,
    pub height: f32,
    pub color: Color,
    pub visible: bool,
}

impl RectRenderer {
    pub fn new(width: f32, height: f32, color: Color) -> Self {
        Self {
            width,
            height,
            color,
            visible: true,
        }
    }
}

/// Blits an image centered on the owning transform, once it has loaded
pub struct ImageRenderer {
    pub image: Option<Image>,
    pub width: f32,
    pub height: f32,
    pub visible: bool,
}

impl ImageRenderer {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            image: None,
            width,
            height,
            visible: true,
        }
    }

    pub fn with_image(mut self, image: Image) -> Self {
        self.image = Some(image);
        self
    }
}

/// One recorded trail sample
#[derive(Clone, Copy, Debug)]
pub struct TrailPoint {
    pub position: Vec2,
    pub age: f32,
}

/// Draws a fading, shrinking trail of circles along the transform's path.
///
/// Each visible frame records the current position (while `emitting`),
/// draws every sample newest-first, then ages the samples and drops those
/// past `duration`. `visible = false` freezes the whole trail in place,
/// ages included; `emitting = false` only stops new samples, letting the
/// existing trail burn out.
pub struct TrailRenderer {
    pub radius: f32,
    pub gradient: Gradient,
    /// Sample lifetime in seconds
    pub duration: f32,
    pub start_alpha: f32,
    pub end_alpha: f32,
    pub visible: bool,
    pub emitting: bool,
    points: Vec<TrailPoint>,
}

impl TrailRenderer {
    pub fn new(radius: f32, gradient: Gradient, duration: f32) -> Self {
        Self {
            radius,
            gradient,
            duration,
            start_alpha: 1.0,
            end_alpha: 0.0,
            visible: true,
            emitting: true,
            points: Vec::new(),
        }
    }

    pub fn with_alpha(mut self, start: f32, end: f32) -> Self {
        self.start_alpha = start;
        self.end_alpha = end;
        self
    }

    /// Live samples, oldest first
    pub fn points(&self) -> &[TrailPoint] {
        &self.points
    }
}

/// Draws a run of text at the transform, offset vertically
pub struct TextRenderer {
    pub text: String,
    pub style: TextStyle,
    pub height_offset: f32,
}

impl TextRenderer {
    pub fn new(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            style,
            height_offset: 0.0,
        }
    }

    pub fn with_height_offset(mut self, offset: f32) -> Self {
        self.height_offset = offset;
        self
    }
}

/// LateUpdate for whichever renderer kind occupies the slot
pub(crate) fn run_late_update(world: &mut World, id: ComponentId, surface: &mut dyn Surface) {
    let dt = world.clock().delta_time as f32;
    let Some(position) = world.transform(id.entity).map(|t| t.position) else {
        return;
    };
    let Some(component) = world.component_mut(id) else {
        return;
    };

    match component.kind {
        ComponentKind::RectRenderer(ref rect) => draw_rect(rect, position, surface),
        ComponentKind::ImageRenderer(ref image) => draw_image(image, position, surface),
        ComponentKind::TrailRenderer(ref mut trail) => update_trail(trail, position, dt, surface),
        ComponentKind::TextRenderer(ref text) => draw_text(text, position, surface),
        _ => {}
    }
}

fn draw_rect(rect: &RectRenderer, center: Vec2, surface: &mut dyn Surface) {
    if !rect.visible {
        return;
    }
    let size = Vec2::new(rect.width, rect.height);
    surface.fill_rect(center - size * 0.5, size, rect.color);
}

fn draw_image(renderer: &ImageRenderer, center: Vec2, surface: &mut dyn Surface) {
    if !renderer.visible {
        return;
    }
    let Some(ref image) = renderer.image else {
        return;
    };
    if !image.is_loaded() {
        return;
    }
    let size = Vec2::new(renderer.width, renderer.height);
    surface.draw_image(&image.source, center - size * 0.5, size);
}

fn update_trail(trail: &mut TrailRenderer, position: Vec2, dt: f32, surface: &mut dyn Surface) {
    if !trail.visible {
        return;
    }
    if trail.emitting {
        trail.points.push(TrailPoint { position, age: 0.0 });
    }

    // Newest samples draw first so the fresh end of the trail sits on top
    for point in trail.points.iter().rev() {
        let t = point.age / trail.duration;
        let color = trail.gradient.color_at(t);
        let alpha = lerp(trail.start_alpha, trail.end_alpha, t);
        let radius = trail.radius * (1.0 - t);
        surface.fill_circle(point.position, radius, color, alpha);
    }

    for point in &mut trail.points {
        point.age += dt;
    }
    trail.points.retain(|p| p.age <= trail.duration);
}

fn draw_text(renderer: &TextRenderer, position: Vec2, surface: &mut dyn Surface) {
    let anchor = position + Vec2::new(0.0, renderer.height_offset);
    surface.draw_text(&renderer.text, anchor, &renderer.style);
}

#[cfg(test)]
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum DrawCall {
    Rect {
        min: Vec2,
        size: Vec2,
        color: Color,
    },
    Image {
        source: String,
        min: Vec2,
        size: Vec2,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
        alpha: f32,
    },
    Text {
        text: String,
        position: Vec2,
    },
}

/// Records draw calls for assertions
#[cfg(test)]
#[derive(Default)]
pub(crate) struct RecordingSurface {
    pub calls: Vec<DrawCall>,
}

#[cfg(test)]
impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn circles(&self) -> Vec<&DrawCall> {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Circle { .. }))
            .collect()
    }
}

#[cfg(test)]
impl Surface for RecordingSurface {
    fn fill_rect(&mut self, min: Vec2, size: Vec2, color: Color) {
        self.calls.push(DrawCall::Rect { min, size, color });
    }

    fn draw_image(&mut self, source: &str, min: Vec2, size: Vec2) {
        self.calls.push(DrawCall::Image {
            source: source.to_string(),
            min,
            size,
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color, alpha: f32) {
        self.calls.push(DrawCall::Circle {
            center,
            radius,
            color,
            alpha,
        });
    }

    fn draw_text(&mut self, text: &str, position: Vec2, _style: &TextStyle) {
        self.calls.push(DrawCall::Text {
            text: text.to_string(),
            position,
        });
    }
}
