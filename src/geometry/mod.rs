pub mod curve;

pub use curve::{Arc, Circle, Curve, CurveDomain, Ray, Segment};

use crate::math::Point3;

/// The five interchange primitives, as a closed tagged union.
///
/// Kind membership is structural: the encoder dispatches on the variant, and
/// the decoder picks the variant from the element name. Boundedness is a
/// property of the variant, never a stored flag: a bounded straight curve is
/// a [`Segment`], its unbounded counterpart a [`Ray`]; a bounded circular
/// curve is an [`Arc`], a full revolution a [`Circle`].
#[derive(Debug, Clone)]
pub enum Primitive {
    Point(Point3),
    Segment(Segment),
    Ray(Ray),
    Arc(Arc),
    Circle(Circle),
}

impl Primitive {
    /// Returns the wire element name of this primitive.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Primitive::Point(_) => "Point",
            Primitive::Segment(_) => "Line",
            Primitive::Ray(_) => "Ray",
            Primitive::Arc(_) => "Arc",
            Primitive::Circle(_) => "Circle",
        }
    }

    /// Returns whether the primitive has defined start/end limits.
    #[must_use]
    pub fn is_bounded(&self) -> bool {
        match self {
            Primitive::Point(_) | Primitive::Segment(_) | Primitive::Arc(_) => true,
            Primitive::Ray(_) | Primitive::Circle(_) => false,
        }
    }
}
