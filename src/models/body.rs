/// Read-only view of one body, produced on demand from the body store.
///
/// The store never holds `Body` values; it keeps one array per field.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Body {
    pub x: f32,
    pub y: f32,
    pub mass: f32,
}

impl Body {
    pub fn new(x: f32, y: f32, mass: f32) -> Self {
        Self { x, y, mass }
    }

    /// Euclidean distance to another body.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_nbody::models::Body;
    ///
    /// let a = Body::new(0.0, 0.0, 1.0);
    /// let b = Body::new(3.0, 4.0, 1.0);
    /// assert_eq!(a.distance_to(&b), 5.0);
    /// ```
    pub fn distance_to(&self, other: &Body) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}
