//! Player / pursuer data and the bounding boxes used for drawing and collision.

#[cfg(feature = "serde")]
use serde::Serialize;

/// Drawing-surface bounds in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Field {
    pub width: f64,
    pub height: f64,
}

impl Field {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle; (x, y) is the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    /// Strict overlap on both axes: shared edges do not count.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }
}

/// A square actor. Size is the side length, speed is pixels per tick.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Entity {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub speed: f64,
    pub color: String,
}

impl Entity {
    pub fn new(x: f64, y: f64, size: f64, speed: f64, color: impl Into<String>) -> Self {
        Self {
            x,
            y,
            size,
            speed,
            color: color.into(),
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect {
            x: self.x,
            y: self.y,
            w: self.size,
            h: self.size,
        }
    }

    pub fn distance_to(&self, other: &Entity) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_edges_do_not_overlap() {
        let a = Rect { x: 0.0, y: 0.0, w: 10.0, h: 10.0 };
        let b = Rect { x: 10.0, y: 0.0, w: 10.0, h: 10.0 };
        assert!(!a.overlaps(&b));
        let c = Rect { x: 9.5, y: 9.5, w: 10.0, h: 10.0 };
        assert!(a.overlaps(&c));
    }

    #[test]
    fn bounds_follow_position_and_size() {
        let e = Entity::new(3.0, 4.0, 5.0, 1.0, "red");
        assert_eq!(e.bounds(), Rect { x: 3.0, y: 4.0, w: 5.0, h: 5.0 });
        assert_eq!(e.distance_to(&Entity::new(0.0, 0.0, 1.0, 1.0, "red")), 5.0);
    }
}
