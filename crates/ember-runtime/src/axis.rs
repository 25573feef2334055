//! Smoothed input axes

use crate::input::Input;

/// A named scalar in [-1, 1] driven by two opposing key sets.
///
/// The value ramps toward the held side and decays back to zero when
/// neither (or both) sides are held, so digital keys produce an
/// analog-feeling response.
#[derive(Clone, Debug)]
pub struct Axis {
    pub name: String,
    /// Keys that pull the value toward -1
    negative_keys: Vec<String>,
    /// Keys that pull the value toward +1
    positive_keys: Vec<String>,
    /// Ramp rate toward the held side, value units per second
    pub acceleration_rate: f32,
    /// Return rate toward zero, value units per second
    pub deceleration_rate: f32,
    value: f32,
}

impl Axis {
    pub fn new(
        name: impl Into<String>,
        negative_keys: Vec<String>,
        positive_keys: Vec<String>,
        acceleration_rate: f32,
        deceleration_rate: f32,
    ) -> Self {
        Self {
            name: name.into(),
            negative_keys,
            positive_keys,
            acceleration_rate,
            deceleration_rate,
            value: 0.0,
        }
    }

    /// Current smoothed value in [-1, 1]
    pub fn value(&self) -> f32 {
        self.value
    }

    /// All keys this axis reads, negative side first
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.negative_keys
            .iter()
            .chain(self.positive_keys.iter())
            .map(String::as_str)
    }

    /// Advance one frame against the already-resolved key states.
    ///
    /// Exactly one side held ramps toward that bound at the acceleration
    /// rate. Both or neither held decays toward zero at the deceleration
    /// rate, clamped at the zero crossing. A press on the opposite side
    /// ramps straight through zero with no decay phase first.
    pub(crate) fn advance(&mut self, input: &Input, dt: f32) {
        let negative = any_held(&self.negative_keys, input);
        let positive = any_held(&self.positive_keys, input);

        if negative == positive {
            if self.value > 0.0 {
                self.value = (self.value - self.deceleration_rate * dt).max(0.0);
            } else if self.value < 0.0 {
                self.value = (self.value + self.deceleration_rate * dt).min(0.0);
            }
        } else if positive {
            self.value = (self.value + self.acceleration_rate * dt).min(1.0);
        } else {
            self.value = (self.value - self.acceleration_rate * dt).max(-1.0);
        }
    }
}

fn any_held(keys: &[String], input: &Input) -> bool {
    keys.iter().any(|k| input.is_key_held(k))
}
