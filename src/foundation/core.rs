pub use kurbo::{Point, Size, Vec2};

/// Straight-alpha RGBA color with channels in `0..=1`, matching the host
/// document's paint space.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Fully opaque color.
    pub const fn opaque(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn transparent() -> Self {
        Self {
            r: 0.0,
            g: 0.0,
            b: 0.0,
            a: 0.0,
        }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }
}

/// Per-side padding in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Edges {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Edges {
    pub const fn all(v: f64) -> Self {
        Self {
            top: v,
            right: v,
            bottom: v,
            left: v,
        }
    }

    pub const fn symmetric(horizontal: f64, vertical: f64) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    pub const fn vertical(v: f64) -> Self {
        Self {
            top: v,
            right: 0.0,
            bottom: v,
            left: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opaque_sets_full_alpha() {
        let c = Rgba::opaque(0.2, 0.4, 0.6);
        assert_eq!(c.a, 1.0);
        assert_eq!(c.with_alpha(0.5).a, 0.5);
    }

    #[test]
    fn edges_constructors() {
        assert_eq!(Edges::all(8.0).left, 8.0);
        let e = Edges::symmetric(16.0, 4.0);
        assert_eq!(e.left, 16.0);
        assert_eq!(e.top, 4.0);
        assert_eq!(Edges::vertical(80.0).bottom, 80.0);
        assert_eq!(Edges::vertical(80.0).right, 0.0);
    }
}
