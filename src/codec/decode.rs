//! Element → primitive decoding, including three-point arc reconstruction.

use crate::document::XmlElement;
use crate::error::{DocumentError, Result};
use crate::geometry::{Arc, Circle, Primitive, Ray, Segment};
use crate::math::{Point3, Vector3};
use crate::units::Units;

/// Decodes one wire element into its primitive, applying the inverse unit
/// conversion to every scalar.
///
/// Coordinate attributes are independently optional: a missing or
/// unparseable component falls back to `0.0` so one malformed value never
/// aborts the batch. Geometry that stays degenerate after the fallback
/// (collinear arc points, zero ray direction, non-positive circle radius)
/// fails this element only.
///
/// # Errors
///
/// Returns an error for unrecognized element names and for per-element
/// geometric or value failures.
pub fn decode_element(element: &XmlElement, units: Units) -> Result<Primitive> {
    match element.name.as_str() {
        "Point" => Ok(Primitive::Point(point_from_attrs(Some(element), units))),
        "Line" => decode_line(element, units),
        "Ray" => decode_ray(element, units),
        "Arc" => decode_arc(element, units),
        "Circle" => decode_circle(element, units),
        other => Err(DocumentError::UnknownElement(other.to_string()).into()),
    }
}

fn decode_line(element: &XmlElement, units: Units) -> Result<Primitive> {
    let start = point_from_attrs(element.child("StartPoint"), units);
    let end = point_from_attrs(element.child("EndPoint"), units);
    Ok(Primitive::Segment(Segment::new(start, end)?))
}

fn decode_ray(element: &XmlElement, units: Units) -> Result<Primitive> {
    let origin = point_from_attrs(element.child("Origin"), units);
    // A direction vector, not a second endpoint; the constructor normalizes.
    let direction = vector_from_attrs(element.child("Direction"), units);
    Ok(Primitive::Ray(Ray::new(origin, direction)?))
}

fn decode_arc(element: &XmlElement, units: Units) -> Result<Primitive> {
    let start = point_from_attrs(element.child("StartPoint"), units);
    let end = point_from_attrs(element.child("EndPoint"), units);
    let point_on_arc = point_from_attrs(element.child("PointOnArc"), units);
    Ok(Primitive::Arc(Arc::from_three_points(
        &start,
        &end,
        &point_on_arc,
    )?))
}

fn decode_circle(element: &XmlElement, units: Units) -> Result<Primitive> {
    let center = point_from_attrs(element.child("CenterPoint"), units);
    let normal = vector_from_attrs(element.child("VectorNormal"), units);
    let radius = element
        .child("Radius")
        .and_then(|r| parse_scalar(&r.text))
        .ok_or(DocumentError::InvalidValue {
            element: "Circle",
            field: "Radius",
        })?;
    Ok(Primitive::Circle(Circle::from_center_normal_radius(
        center,
        normal,
        units.from_wire(radius),
    )?))
}

fn point_from_attrs(element: Option<&XmlElement>, units: Units) -> Point3 {
    let [x, y, z] = triple_from_attrs(element, units);
    Point3::new(x, y, z)
}

fn vector_from_attrs(element: Option<&XmlElement>, units: Units) -> Vector3 {
    let [x, y, z] = triple_from_attrs(element, units);
    Vector3::new(x, y, z)
}

fn triple_from_attrs(element: Option<&XmlElement>, units: Units) -> [f64; 3] {
    ["X", "Y", "Z"].map(|name| {
        element
            .and_then(|el| el.attr(name))
            .and_then(parse_scalar)
            .map_or(0.0, |v| units.from_wire(v))
    })
}

/// Parses a decimal scalar, accepting both `.` and `,` as the decimal
/// separator.
fn parse_scalar(raw: &str) -> Option<f64> {
    let normalized = raw.trim().replace(',', ".");
    if normalized.is_empty() {
        return None;
    }
    normalized.parse().ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::document::parser;

    fn decode(input: &str) -> Result<Primitive> {
        decode_element(&parser::parse(input).unwrap(), Units::Native)
    }

    #[test]
    fn missing_component_falls_back_to_zero() {
        let decoded = decode(
            "<Line><StartPoint X=\"0\" Y=\"0\" Z=\"0\"/><EndPoint X=\"1\" Y=\"2\"/></Line>",
        )
        .unwrap();
        let Primitive::Segment(segment) = decoded else {
            panic!("expected a segment");
        };
        assert!((segment.end() - Point3::new(1.0, 2.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn comma_decimal_separator_accepted() {
        let decoded = decode("<Point X=\"1,5\" Y=\"2,25\" Z=\"0\"/>").unwrap();
        let Primitive::Point(p) = decoded else {
            panic!("expected a point");
        };
        assert!((p - Point3::new(1.5, 2.25, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn collinear_arc_fails_without_nan() {
        let result = decode(
            "<Arc><StartPoint X=\"0\" Y=\"0\" Z=\"0\"/><EndPoint X=\"2\" Y=\"0\" Z=\"0\"/>\
             <PointOnArc X=\"1\" Y=\"0\" Z=\"0\"/></Arc>",
        );
        assert!(result.is_err());
    }

    #[test]
    fn semicircle_scenario() {
        let decoded = decode(
            "<Arc><StartPoint X=\"0\" Y=\"0\" Z=\"0\"/><EndPoint X=\"10\" Y=\"0\" Z=\"0\"/>\
             <PointOnArc X=\"5\" Y=\"5\" Z=\"0\"/></Arc>",
        )
        .unwrap();
        let Primitive::Arc(arc) = decoded else {
            panic!("expected an arc");
        };
        assert!((arc.center() - Point3::new(5.0, 0.0, 0.0)).norm() < 1e-9);
        assert!((arc.radius() - 5.0).abs() < 1e-9);
        assert!(arc.normal().cross(&Vector3::z()).norm() < 1e-9);
        assert!((arc.sweep_angle() - std::f64::consts::PI).abs() < 1e-9);
    }

    #[test]
    fn circle_without_radius_fails() {
        let result = decode(
            "<Circle><CenterPoint X=\"0\" Y=\"0\" Z=\"0\"/>\
             <VectorNormal X=\"0\" Y=\"0\" Z=\"1\"/></Circle>",
        );
        assert!(result.is_err());
    }

    #[test]
    fn ray_with_zero_direction_fails() {
        let result = decode("<Ray><Origin X=\"1\" Y=\"1\" Z=\"1\"/><Direction/></Ray>");
        assert!(result.is_err());
    }

    #[test]
    fn unknown_element_rejected() {
        assert!(decode("<Spline/>").is_err());
    }

    #[test]
    fn millimeter_units_inverted() {
        let decoded = decode_element(
            &parser::parse("<Point X=\"304.8\" Y=\"0\" Z=\"0\"/>").unwrap(),
            Units::Millimeters,
        )
        .unwrap();
        let Primitive::Point(p) = decoded else {
            panic!("expected a point");
        };
        assert!((p.x - 1.0).abs() < 1e-12);
    }
}
