use crate::error::Result;

/// Validate structural integrity of a curve or one of its derived tables.
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Compute an axis-aligned bounding box.
pub trait BoundingBox {
    type Bounds;
    fn bounding_box(&self) -> Option<Self::Bounds>;
}
