use crate::physics::math::{Scalar, Vector};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb3d {
    pub min: Vector,
    pub max: Vector,
}

impl Aabb3d {
    pub fn new(min: Vector, max: Vector) -> Self {
        Self { min, max }
    }

    /// Axis-aligned cube centred on `center` extending `half_extent` along each axis.
    pub fn cube(center: Vector, half_extent: Scalar) -> Self {
        let half = Vector::splat(half_extent);
        Self::new(center - half, center + half)
    }

    #[inline]
    pub fn center(&self) -> Vector {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn size(&self) -> Vector {
        self.max - self.min
    }

    #[inline]
    pub fn half_extent(&self) -> Vector {
        self.size() * 0.5
    }

    /// Length of the box diagonal
    #[inline]
    pub fn diagonal(&self) -> Scalar {
        self.size().length()
    }

    /// Closed containment test, faces included.
    #[inline]
    pub fn contains(&self, point: Vector) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Conservative box/sphere overlap: distance from the sphere centre to the
    /// closest point of the box.
    #[inline]
    pub fn intersects_sphere(&self, center: Vector, radius: Scalar) -> bool {
        let closest = center.clamp(self.min, self.max);
        closest.distance_squared(center) <= radius * radius
    }

    /// Index of the octant of this box that owns `point`.
    ///
    /// Points on a splitting plane go to the lower octant, so the eight children
    /// partition the parent without overlap.
    #[inline]
    pub fn octant_index(&self, point: Vector) -> usize {
        let center = self.center();
        ((point.x > center.x) as usize)
            | (((point.y > center.y) as usize) << 1)
            | (((point.z > center.z) as usize) << 2)
    }

    /// The eight half-size children, ordered to match [`Aabb3d::octant_index`].
    pub fn octants(self) -> [Aabb3d; 8] {
        let center = self.center();

        [
            Aabb3d::new(self.min, center),
            Aabb3d::new(
                Vector::new(center.x, self.min.y, self.min.z),
                Vector::new(self.max.x, center.y, center.z),
            ),
            Aabb3d::new(
                Vector::new(self.min.x, center.y, self.min.z),
                Vector::new(center.x, self.max.y, center.z),
            ),
            Aabb3d::new(
                Vector::new(center.x, center.y, self.min.z),
                Vector::new(self.max.x, self.max.y, center.z),
            ),
            Aabb3d::new(
                Vector::new(self.min.x, self.min.y, center.z),
                Vector::new(center.x, center.y, self.max.z),
            ),
            Aabb3d::new(
                Vector::new(center.x, self.min.y, center.z),
                Vector::new(self.max.x, center.y, self.max.z),
            ),
            Aabb3d::new(
                Vector::new(self.min.x, center.y, center.z),
                Vector::new(center.x, self.max.y, self.max.z),
            ),
            Aabb3d::new(center, self.max),
        ]
    }
}
