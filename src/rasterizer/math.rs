//! Vector math for 2D rasterization

use std::ops::{Add, Div, Mul, Neg, Sub};
use serde::{Serialize, Deserialize};

/// Squared lengths below this count as zero
const EPSILON: f32 = 1.0e-6;

pub fn radians_to_degrees(radians: f32) -> f32 {
    radians * (180.0 / std::f32::consts::PI)
}

/// 2D Vector (NDC or pixel-space point, or a direction)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

impl Vector2 {
    pub const ZERO: Vector2 = Vector2 { x: 0.0, y: 0.0 };
    pub const ONE: Vector2 = Vector2 { x: 1.0, y: 1.0 };
    /// Points along -X: "right" in the left-handed convention these constants came from
    pub const RIGHT: Vector2 = Vector2 { x: -1.0, y: 0.0 };
    /// There is no depth axis in 2D, so forward is the zero vector
    pub const FORWARD: Vector2 = Vector2 { x: 0.0, y: 0.0 };
    pub const UP: Vector2 = Vector2 { x: 0.0, y: 1.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Truncate both components toward zero
    pub fn to_i32(self) -> (i32, i32) {
        (self.x as i32, self.y as i32)
    }

    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    pub fn is_zero(self) -> bool {
        self.length_squared().abs() < EPSILON
    }

    /// Unit vector in the same direction, or zero for a (near) zero vector
    pub fn normalize(self) -> Vector2 {
        if self.is_zero() {
            return Vector2::ZERO;
        }
        let inv = 1.0 / self.length();
        Vector2 {
            x: self.x * inv,
            y: self.y * inv,
        }
    }

    pub fn dot(self, other: Vector2) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// 2D cross product: the signed area of the parallelogram spanned by `self` and `other`
    pub fn cross(self, other: Vector2) -> f32 {
        self.x * other.y - self.y * other.x
    }

    /// Clockwise perpendicular (in +y up space)
    pub fn perpendicular(self) -> Vector2 {
        Vector2 { x: self.y, y: -self.x }
    }

    /// Vector triple product `other × (self × other)`, i.e. the component of
    /// `self` orthogonal to `other`, scaled by `|other|²`
    pub fn triple_product(self, other: Vector2) -> Vector2 {
        self * other.length_squared() - other * other.dot(self)
    }

    /// Angle in degrees between `facing` and the direction from `self` towards `target`
    pub fn angle_between(self, target: Vector2, facing: Vector2) -> f32 {
        let to_target = (target - self).normalize();
        let cos = facing.normalize().dot(to_target).clamp(-1.0, 1.0);
        radians_to_degrees(cos.acos())
    }

    /// Whether `target` lies in front of `facing` as seen from `self`.
    /// Also returns the cosine of the angle between the two directions.
    pub fn direction_between(self, target: Vector2, facing: Vector2) -> (bool, f32) {
        let to_target = (target - self).normalize();
        let cos = facing.normalize().dot(to_target);
        (cos > 0.0, cos)
    }
}

impl Add for Vector2 {
    type Output = Vector2;
    fn add(self, other: Vector2) -> Vector2 {
        Vector2 {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl Sub for Vector2 {
    type Output = Vector2;
    fn sub(self, other: Vector2) -> Vector2 {
        Vector2 {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl Mul for Vector2 {
    type Output = Vector2;
    fn mul(self, other: Vector2) -> Vector2 {
        Vector2 {
            x: self.x * other.x,
            y: self.y * other.y,
        }
    }
}

impl Mul<f32> for Vector2 {
    type Output = Vector2;
    fn mul(self, s: f32) -> Vector2 {
        Vector2 {
            x: self.x * s,
            y: self.y * s,
        }
    }
}

impl Div for Vector2 {
    type Output = Vector2;
    fn div(self, other: Vector2) -> Vector2 {
        Vector2 {
            x: self.x / other.x,
            y: self.y / other.y,
        }
    }
}

impl Neg for Vector2 {
    type Output = Vector2;
    fn neg(self) -> Vector2 {
        Vector2 { x: -self.x, y: -self.y }
    }
}

/// Edge function for point `c` against the directed edge `a -> b`.
///
/// Positive on one side, negative on the other, zero on the line. The absolute
/// value is twice the area of triangle (a, b, c).
pub fn edge_function(a: Vector2, b: Vector2, c: Vector2) -> f32 {
    (c.x - a.x) * (b.y - a.y) - (c.y - a.y) * (b.x - a.x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector2_dot() {
        let a = Vector2::new(1.0, 2.0);
        let b = Vector2::new(3.0, 4.0);
        assert!((a.dot(b) - 11.0).abs() < 0.001);
    }

    #[test]
    fn test_vector2_cross() {
        let a = Vector2::new(1.0, 0.0);
        let b = Vector2::new(0.0, 1.0);
        assert!((a.cross(b) - 1.0).abs() < 0.001);
        assert!((b.cross(a) + 1.0).abs() < 0.001);
    }

    #[test]
    fn test_operators_do_not_mutate() {
        let a = Vector2::new(1.0, 2.0);
        let b = Vector2::new(3.0, 5.0);
        let sum = a + b;
        assert_eq!(a, Vector2::new(1.0, 2.0));
        assert_eq!(sum, Vector2::new(4.0, 7.0));
        assert_eq!(b - a, Vector2::new(2.0, 3.0));
        assert_eq!(a * b, Vector2::new(3.0, 10.0));
        assert_eq!(b / Vector2::new(3.0, 5.0), Vector2::ONE);
    }

    #[test]
    fn test_normalize() {
        let n = Vector2::new(3.0, 4.0).normalize();
        assert!((n.length() - 1.0).abs() < 0.001);
        assert!((n.x - 0.6).abs() < 0.001);
        assert_eq!(Vector2::ZERO.normalize(), Vector2::ZERO);
    }

    #[test]
    fn test_angle_and_direction() {
        let origin = Vector2::ZERO;
        let target = Vector2::new(0.0, 5.0);
        assert!(origin.angle_between(target, Vector2::UP).abs() < 0.01);
        assert!((origin.angle_between(target, Vector2::new(1.0, 0.0)) - 90.0).abs() < 0.01);

        let (ahead, _) = origin.direction_between(target, Vector2::UP);
        assert!(ahead);
        let (ahead, cos) = origin.direction_between(target, -Vector2::UP);
        assert!(!ahead);
        assert!((cos + 1.0).abs() < 0.001);
    }

    #[test]
    fn test_triple_product_is_orthogonal() {
        let v = Vector2::new(2.0, 1.0);
        let w = Vector2::new(1.0, 1.0);
        assert!(v.triple_product(w).dot(w).abs() < 0.001);
    }

    #[test]
    fn test_edge_function_degenerate_edge() {
        let a = Vector2::new(3.5, -2.0);
        for c in [Vector2::ZERO, Vector2::new(10.0, 7.0), Vector2::new(-4.0, 0.25)] {
            assert_eq!(edge_function(a, a, c), 0.0);
        }
    }

    #[test]
    fn test_edge_function_sign_flips_with_winding() {
        let a = Vector2::new(0.0, 0.0);
        let b = Vector2::new(10.0, 0.0);
        let c = Vector2::new(0.0, 10.0);
        let area = edge_function(a, b, c);
        assert!((area.abs() - 100.0).abs() < 0.001);
        assert!((edge_function(a, c, b) + area).abs() < 0.001);
    }
}
