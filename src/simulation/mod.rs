use nalgebra::{Vector2, Point2};

pub mod map;
pub mod vehicle;
pub mod radar;
pub mod collision;
pub mod intersection;
pub mod registry;
pub mod traffic;
pub mod episode;

pub use map::*;
pub use vehicle::*;
pub use radar::*;
pub use collision::*;
pub use intersection::*;
pub use registry::*;
pub use traffic::*;
pub use episode::*;

pub type Vec2 = Vector2<f32>;
pub type Point = Point2<f32>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VehicleId(pub usize);

/// Unit vector for a heading in degrees, 0 = up (screen y decreases), clockwise positive.
pub fn heading_vector(heading_deg: f32) -> Vec2 {
    let radians = heading_deg.to_radians();
    Vec2::new(radians.sin(), -radians.cos())
}

/// Axis-aligned rectangle in map coordinates (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Point,
    pub max: Point,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Point::new(x, y),
            max: Point::new(x + width, y + height),
        }
    }

    pub fn from_center(center: Point, width: f32, height: f32) -> Self {
        let half = Vec2::new(width / 2.0, height / 2.0);
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Point {
        Point::from((self.min.coords + self.max.coords) / 2.0)
    }

    /// Half-open containment: the left/top edges are inside, the right/bottom edges are not.
    pub fn contains(&self, point: &Point) -> bool {
        point.x >= self.min.x && point.x < self.max.x && point.y >= self.min.y && point.y < self.max.y
    }

    /// Strict overlap; rectangles that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }
}
