//! Components: the closed set of behaviors an entity can carry

use crate::button::Button;
use crate::collide::BoxCollider;
use crate::render::{ImageRenderer, RectRenderer, TextRenderer, TrailRenderer};
use crate::schedule::Phase;
use crate::world::World;
use ember_core::{EntityId, Result, Transform};

/// A per-phase script hook. Receives the world and the id of the owning
/// entity; returning an error aborts the rest of the frame.
pub type ScriptHook = Box<dyn FnMut(&mut World, EntityId) -> Result<()>>;

/// User-defined behavior, hooking whichever phases it needs.
///
/// This is the extension point of the component set: instead of deriving
/// new component types, game logic attaches a `Script` carrying closures
/// for the phases it cares about. Unset phases cost nothing.
#[derive(Default)]
pub struct Script {
    pub on_early_update: Option<ScriptHook>,
    pub on_update: Option<ScriptHook>,
    pub on_late_update: Option<ScriptHook>,
}

impl Script {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_early_update(
        mut self,
        hook: impl FnMut(&mut World, EntityId) -> Result<()> + 'static,
    ) -> Self {
        self.on_early_update = Some(Box::new(hook));
        self
    }

    pub fn with_update(
        mut self,
        hook: impl FnMut(&mut World, EntityId) -> Result<()> + 'static,
    ) -> Self {
        self.on_update = Some(Box::new(hook));
        self
    }

    pub fn with_late_update(
        mut self,
        hook: impl FnMut(&mut World, EntityId) -> Result<()> + 'static,
    ) -> Self {
        self.on_late_update = Some(Box::new(hook));
        self
    }

    /// The hook slot for a phase
    pub(crate) fn hook_mut(&mut self, phase: Phase) -> &mut Option<ScriptHook> {
        match phase {
            Phase::EarlyUpdate => &mut self.on_early_update,
            Phase::Update => &mut self.on_update,
            Phase::LateUpdate => &mut self.on_late_update,
        }
    }
}

/// The closed set of component variants.
///
/// The scheduler dispatches on this tag: colliders and buttons run during
/// Update, renderers during LateUpdate, scripts in whichever phases they
/// hook. `Transform` carries no behavior; it is pure state that the other
/// components read through the world.
pub enum ComponentKind {
    Transform(Transform),
    BoxCollider(BoxCollider),
    Button(Button),
    RectRenderer(RectRenderer),
    ImageRenderer(ImageRenderer),
    TrailRenderer(TrailRenderer),
    TextRenderer(TextRenderer),
    Script(Script),
}

impl ComponentKind {
    /// The conventional name a component of this kind is looked up by
    pub fn default_name(&self) -> &'static str {
        match self {
            ComponentKind::Transform(_) => "Transform",
            ComponentKind::BoxCollider(_) => "BoxCollider",
            ComponentKind::Button(_) => "Button",
            ComponentKind::RectRenderer(_) => "RectRenderer",
            ComponentKind::ImageRenderer(_) => "ImageRenderer",
            ComponentKind::TrailRenderer(_) => "TrailRenderer",
            ComponentKind::TextRenderer(_) => "TextRenderer",
            ComponentKind::Script(_) => "Script",
        }
    }
}

impl From<Transform> for ComponentKind {
    fn from(value: Transform) -> Self {
        ComponentKind::Transform(value)
    }
}

impl From<BoxCollider> for ComponentKind {
    fn from(value: BoxCollider) -> Self {
        ComponentKind::BoxCollider(value)
    }
}

impl From<Button> for ComponentKind {
    fn from(value: Button) -> Self {
        ComponentKind::Button(value)
    }
}

impl From<RectRenderer> for ComponentKind {
    fn from(value: RectRenderer) -> Self {
        ComponentKind::RectRenderer(value)
    }
}

impl From<ImageRenderer> for ComponentKind {
    fn from(value: ImageRenderer) -> Self {
        ComponentKind::ImageRenderer(value)
    }
}

impl From<TrailRenderer> for ComponentKind {
    fn from(value: TrailRenderer) -> Self {
        ComponentKind::TrailRenderer(value)
    }
}

impl From<TextRenderer> for ComponentKind {
    fn from(value: TextRenderer) -> Self {
        ComponentKind::TextRenderer(value)
    }
}

impl From<Script> for ComponentKind {
    fn from(value: Script) -> Self {
        ComponentKind::Script(value)
    }
}

/// One component slot on an entity: a name for lookup, an enabled flag,
/// and the variant payload.
///
/// Names need not be unique; lookups return the first match in attachment
/// order. A disabled component is skipped in every phase but keeps its
/// state.
pub struct Component {
    pub name: String,
    pub enabled: bool,
    pub kind: ComponentKind,
}

impl Component {
    /// Wrap a payload under its conventional name
    pub fn new(kind: impl Into<ComponentKind>) -> Self {
        let kind = kind.into();
        Self {
            name: kind.default_name().to_string(),
            enabled: true,
            kind,
        }
    }

    /// Wrap a payload under an explicit name
    pub fn named(name: impl Into<String>, kind: impl Into<ComponentKind>) -> Self {
        Self {
            name: name.into(),
            enabled: true,
            kind: kind.into(),
        }
    }

    // --- Payload accessors ---

    pub fn as_transform(&self) -> Option<&Transform> {
        match &self.kind {
            ComponentKind::Transform(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_transform_mut(&mut self) -> Option<&mut Transform> {
        match &mut self.kind {
            ComponentKind::Transform(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_box_collider(&self) -> Option<&BoxCollider> {
        match &self.kind {
            ComponentKind::BoxCollider(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_box_collider_mut(&mut self) -> Option<&mut BoxCollider> {
        match &mut self.kind {
            ComponentKind::BoxCollider(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_button(&self) -> Option<&Button> {
        match &self.kind {
            ComponentKind::Button(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_button_mut(&mut self) -> Option<&mut Button> {
        match &mut self.kind {
            ComponentKind::Button(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_rect_renderer(&self) -> Option<&RectRenderer> {
        match &self.kind {
            ComponentKind::RectRenderer(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_rect_renderer_mut(&mut self) -> Option<&mut RectRenderer> {
        match &mut self.kind {
            ComponentKind::RectRenderer(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_image_renderer(&self) -> Option<&ImageRenderer> {
        match &self.kind {
            ComponentKind::ImageRenderer(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_image_renderer_mut(&mut self) -> Option<&mut ImageRenderer> {
        match &mut self.kind {
            ComponentKind::ImageRenderer(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_trail_renderer(&self) -> Option<&TrailRenderer> {
        match &self.kind {
            ComponentKind::TrailRenderer(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_trail_renderer_mut(&mut self) -> Option<&mut TrailRenderer> {
        match &mut self.kind {
            ComponentKind::TrailRenderer(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_text_renderer(&self) -> Option<&TextRenderer> {
        match &self.kind {
            ComponentKind::TextRenderer(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_text_renderer_mut(&mut self) -> Option<&mut TextRenderer> {
        match &mut self.kind {
            ComponentKind::TextRenderer(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_script(&self) -> Option<&Script> {
        match &self.kind {
            ComponentKind::Script(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_script_mut(&mut self) -> Option<&mut Script> {
        match &mut self.kind {
            ComponentKind::Script(s) => Some(s),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_names() {
        assert_eq!(Component::new(Transform::IDENTITY).name, "Transform");
        assert_eq!(Component::new(BoxCollider::new(1.0, 1.0)).name, "BoxCollider");
        assert_eq!(Component::new(Script::new()).name, "Script");
    }

    #[test]
    fn test_named_overrides_default() {
        let component = Component::named("Hitbox", BoxCollider::new(2.0, 2.0));
        assert_eq!(component.name, "Hitbox");
        assert!(component.enabled);
        assert!(component.as_box_collider().is_some());
    }

    #[test]
    fn test_accessors_reject_other_kinds() {
        let component = Component::new(Transform::IDENTITY);
        assert!(component.as_transform().is_some());
        assert!(component.as_box_collider().is_none());
        assert!(component.as_button().is_none());
        assert!(component.as_script().is_none());
    }
}
