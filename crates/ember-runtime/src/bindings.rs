//! TOML-described input bindings

use crate::axis::Axis;
use crate::input::Input;
use ember_core::{EngineError, Result};
use serde::Deserialize;
use std::path::Path;

/// One axis description from a bindings file
#[derive(Clone, Debug, Deserialize)]
pub struct AxisBinding {
    pub name: String,
    /// Keys that pull the value toward -1
    pub negative: Vec<String>,
    /// Keys that pull the value toward +1
    pub positive: Vec<String>,
    pub acceleration: f32,
    pub deceleration: f32,
}

/// Declarative key and axis registration, usually loaded from TOML:
///
/// ```toml
/// keys = ["space"]
///
/// [[axes]]
/// name = "horizontal"
/// negative = ["a", "arrowleft"]
/// positive = ["d", "arrowright"]
/// acceleration = 10.0
/// deceleration = 5.0
/// ```
#[derive(Clone, Debug, Default, Deserialize)]
pub struct InputBindings {
    /// Keys tracked on their own, outside any axis
    #[serde(default)]
    pub keys: Vec<String>,
    /// Smoothed axes
    #[serde(default)]
    pub axes: Vec<AxisBinding>,
}

impl InputBindings {
    /// Parse bindings from TOML text
    pub fn from_toml(text: &str) -> Result<Self> {
        let bindings: InputBindings = toml::from_str(text)?;
        bindings.validate()?;
        Ok(bindings)
    }

    /// Load bindings from a TOML file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    /// The layout the original engine registers at startup: WASD plus the
    /// arrow keys feeding a horizontal and a vertical axis. Up is the
    /// negative vertical side (+y points down in surface coordinates).
    pub fn wasd() -> Self {
        Self {
            keys: Vec::new(),
            axes: vec![
                AxisBinding {
                    name: "horizontal".into(),
                    negative: vec!["a".into(), "arrowleft".into()],
                    positive: vec!["d".into(), "arrowright".into()],
                    acceleration: 10.0,
                    deceleration: 5.0,
                },
                AxisBinding {
                    name: "vertical".into(),
                    negative: vec!["w".into(), "arrowup".into()],
                    positive: vec!["s".into(), "arrowdown".into()],
                    acceleration: 10.0,
                    deceleration: 5.0,
                },
            ],
        }
    }

    fn validate(&self) -> Result<()> {
        for (i, axis) in self.axes.iter().enumerate() {
            if axis.name.is_empty() {
                return Err(EngineError::InvalidBindings(format!(
                    "axis {} has an empty name",
                    i
                )));
            }
            if self.axes[..i].iter().any(|a| a.name == axis.name) {
                return Err(EngineError::InvalidBindings(format!(
                    "duplicate axis name '{}'",
                    axis.name
                )));
            }
            if axis.acceleration <= 0.0 || axis.deceleration <= 0.0 {
                return Err(EngineError::InvalidBindings(format!(
                    "axis '{}' rates must be positive",
                    axis.name
                )));
            }
            if let Some(key) = axis.negative.iter().find(|k| axis.positive.contains(k)) {
                return Err(EngineError::InvalidBindings(format!(
                    "axis '{}' lists '{}' on both sides",
                    axis.name, key
                )));
            }
        }
        Ok(())
    }

    /// Register every key and axis into an input table
    pub fn apply(&self, input: &mut Input) {
        input.add_keys(self.keys.iter().cloned());
        for axis in &self.axes {
            input.add_axis(Axis::new(
                &axis.name,
                axis.negative.clone(),
                axis.positive.clone(),
                axis.acceleration,
                axis.deceleration,
            ));
        }
        log::debug!(
            "applied input bindings: {} keys, {} axes",
            self.keys.len(),
            self.axes.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_apply() {
        let text = r#"
            keys = ["space"]

            [[axes]]
            name = "horizontal"
            negative = ["a"]
            positive = ["d"]
            acceleration = 10.0
            deceleration = 5.0
        "#;

        let bindings = InputBindings::from_toml(text).unwrap();
        assert_eq!(bindings.keys, vec!["space"]);
        assert_eq!(bindings.axes.len(), 1);

        let mut input = Input::new();
        bindings.apply(&mut input);

        input.press_key("space");
        input.press_key("d");
        input.begin_frame(0.1);
        assert!(input.is_key_just_pressed("space"));
        assert!(input.axis("horizontal") > 0.0);
    }

    #[test]
    fn test_missing_sections_default_empty() {
        let bindings = InputBindings::from_toml("").unwrap();
        assert!(bindings.keys.is_empty());
        assert!(bindings.axes.is_empty());
    }

    #[test]
    fn test_duplicate_axis_name_rejected() {
        let text = r#"
            [[axes]]
            name = "move"
            negative = ["a"]
            positive = ["d"]
            acceleration = 1.0
            deceleration = 1.0

            [[axes]]
            name = "move"
            negative = ["q"]
            positive = ["e"]
            acceleration = 1.0
            deceleration = 1.0
        "#;
        assert!(matches!(
            InputBindings::from_toml(text),
            Err(EngineError::InvalidBindings(_))
        ));
    }

    #[test]
    fn test_nonpositive_rate_rejected() {
        let text = r#"
            [[axes]]
            name = "move"
            negative = ["a"]
            positive = ["d"]
            acceleration = 0.0
            deceleration = 5.0
        "#;
        assert!(matches!(
            InputBindings::from_toml(text),
            Err(EngineError::InvalidBindings(_))
        ));
    }

    #[test]
    fn test_key_on_both_sides_rejected() {
        let text = r#"
            [[axes]]
            name = "move"
            negative = ["a"]
            positive = ["a", "d"]
            acceleration = 1.0
            deceleration = 1.0
        "#;
        assert!(matches!(
            InputBindings::from_toml(text),
            Err(EngineError::InvalidBindings(_))
        ));
    }

    #[test]
    fn test_wasd_defaults_validate() {
        let defaults = InputBindings::wasd();
        assert!(defaults.validate().is_ok());

        let mut input = Input::new();
        defaults.apply(&mut input);
        assert_eq!(input.axes().len(), 2);
    }
}
