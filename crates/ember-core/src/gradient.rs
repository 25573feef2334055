//! Color gradients sampled by normalized offset

use crate::types::Color;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A single color stop on a gradient
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    /// Normalized position in [0, 1]
    pub offset: f32,
    pub color: Color,
}

/// A sequence of color stops interpolated by normalized offset
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Gradient {
    stops: Vec<GradientStop>,
}

impl Gradient {
    /// Create a gradient running from `start` at offset 0 to `end` at offset 1
    pub fn new(start: Color, end: Color) -> Self {
        Self {
            stops: vec![
                GradientStop {
                    offset: 0.0,
                    color: start,
                },
                GradientStop {
                    offset: 1.0,
                    color: end,
                },
            ],
        }
    }

    /// Insert a stop, keeping the list sorted by offset (stable for ties)
    pub fn add_stop(&mut self, offset: f32, color: Color) {
        self.stops.push(GradientStop {
            offset: offset.clamp(0.0, 1.0),
            color,
        });
        self.stops
            .sort_by(|a, b| a.offset.partial_cmp(&b.offset).unwrap_or(Ordering::Equal));
    }

    /// Builder form of [`add_stop`](Self::add_stop)
    pub fn with_stop(mut self, offset: f32, color: Color) -> Self {
        self.add_stop(offset, color);
        self
    }

    pub fn stops(&self) -> &[GradientStop] {
        &self.stops
    }

    /// Sample the gradient at `t`, clamped into [0, 1].
    ///
    /// The segment is bounded by the first stop whose offset exceeds `t`;
    /// past the last stop the last color is returned unchanged.
    pub fn color_at(&self, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);

        let mut i = 1;
        while i < self.stops.len() && self.stops[i].offset <= t {
            i += 1;
        }
        if i == self.stops.len() {
            return self.stops[i - 1].color;
        }

        let a = self.stops[i - 1];
        let b = self.stops[i];
        let u = (t - a.offset) / (b.offset - a.offset);
        Color::lerp(a.color, b.color, u)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints() {
        let g = Gradient::new(Color::BLACK, Color::WHITE);
        assert_eq!(g.color_at(0.0), Color::BLACK);
        assert_eq!(g.color_at(1.0), Color::WHITE);
    }

    #[test]
    fn midpoint() {
        let g = Gradient::new(Color::BLACK, Color::WHITE);
        assert_eq!(g.color_at(0.5), Color::new(128, 128, 128));
    }

    #[test]
    fn sample_clamps_outside_range() {
        let g = Gradient::new(Color::RED, Color::BLUE);
        assert_eq!(g.color_at(-2.0), Color::RED);
        assert_eq!(g.color_at(3.5), Color::BLUE);
    }

    #[test]
    fn added_stop_brackets_samples() {
        let g = Gradient::new(Color::BLACK, Color::BLACK).with_stop(0.5, Color::WHITE);
        assert_eq!(g.color_at(0.5), Color::WHITE);
        assert_eq!(g.color_at(0.25), Color::new(128, 128, 128));
        assert_eq!(g.color_at(0.75), Color::new(128, 128, 128));
    }

    #[test]
    fn stops_stay_sorted() {
        let g = Gradient::new(Color::BLACK, Color::WHITE)
            .with_stop(0.8, Color::RED)
            .with_stop(0.2, Color::BLUE);
        let offsets: Vec<f32> = g.stops().iter().map(|s| s.offset).collect();
        assert_eq!(offsets, vec![0.0, 0.2, 0.8, 1.0]);
    }
}
