//! Primitive → element encoding.

use crate::document::XmlElement;
use crate::error::Result;
use crate::geometry::{Arc, Circle, Primitive, Ray, Segment};
use crate::math::{Point3, Vector3};
use crate::tessellation::sample_curve;
use crate::units::Units;

/// Encodes one primitive as its wire element, with every scalar converted to
/// the configured output unit.
///
/// # Errors
///
/// Returns an error if the primitive's geometry cannot be sampled (for
/// example an arc whose interior point extraction fails); batch callers skip
/// such elements and continue.
pub fn encode_primitive(primitive: &Primitive, units: Units) -> Result<XmlElement> {
    match primitive {
        Primitive::Point(point) => Ok(triple_element("Point", point.coords.as_slice(), units)),
        Primitive::Segment(segment) => Ok(encode_segment(segment, units)),
        Primitive::Ray(ray) => Ok(encode_ray(ray, units)),
        Primitive::Arc(arc) => encode_arc(arc, units),
        Primitive::Circle(circle) => Ok(encode_circle(circle, units)),
    }
}

fn encode_segment(segment: &Segment, units: Units) -> XmlElement {
    let mut element = XmlElement::new("Line");
    element.push_child(point_child("StartPoint", segment.start(), units));
    element.push_child(point_child("EndPoint", segment.end(), units));
    element
}

fn encode_ray(ray: &Ray, units: Units) -> XmlElement {
    let mut element = XmlElement::new("Ray");
    element.push_child(point_child("Origin", ray.origin(), units));
    element.push_child(vector_child("Direction", ray.direction(), units));
    element
}

fn encode_arc(arc: &Arc, units: Units) -> Result<XmlElement> {
    // Index 1 of a 3-point tessellation is the parametric midpoint: on the
    // curve, strictly between the endpoints for any positive sweep.
    let samples = sample_curve(arc, 3)?;

    let mut element = XmlElement::new("Arc");
    element.push_child(point_child("StartPoint", &arc.start_point(), units));
    element.push_child(point_child("EndPoint", &arc.end_point(), units));
    element.push_child(point_child("PointOnArc", &samples[1], units));
    Ok(element)
}

fn encode_circle(circle: &Circle, units: Units) -> XmlElement {
    let mut element = XmlElement::new("Circle");
    element.push_child(point_child("CenterPoint", circle.center(), units));
    element.push_child(vector_child("VectorNormal", circle.normal(), units));
    let mut radius = XmlElement::new("Radius");
    radius.text = format_scalar(units.to_wire(circle.radius()));
    element.push_child(radius);
    element
}

fn point_child(name: &str, point: &Point3, units: Units) -> XmlElement {
    triple_element(name, point.coords.as_slice(), units)
}

fn vector_child(name: &str, vector: &Vector3, units: Units) -> XmlElement {
    triple_element(name, vector.as_slice(), units)
}

fn triple_element(name: &str, xyz: &[f64], units: Units) -> XmlElement {
    let mut element = XmlElement::new(name);
    for (attr, value) in ["X", "Y", "Z"].into_iter().zip(xyz) {
        element.set_attr(attr, format_scalar(units.to_wire(*value)));
    }
    element
}

fn format_scalar(value: f64) -> String {
    // Avoid "-0" on the wire; shortest round-trippable form otherwise.
    if value == 0.0 {
        "0".to_string()
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn segment_element_shape() {
        let segment =
            Segment::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)).unwrap();
        let element = encode_primitive(&Primitive::Segment(segment), Units::Native).unwrap();
        assert_eq!(element.name, "Line");
        let start = element.child("StartPoint").unwrap();
        assert_eq!(start.attr("X"), Some("0"));
        assert_eq!(element.child("EndPoint").unwrap().attr("X"), Some("1"));
    }

    #[test]
    fn millimeter_scaling_applied() {
        let element = encode_primitive(
            &Primitive::Point(Point3::new(1.0, 0.0, 0.0)),
            Units::Millimeters,
        )
        .unwrap();
        assert_eq!(element.attr("X"), Some("304.8"));
    }

    #[test]
    fn arc_interior_point_is_on_the_curve() {
        let arc = Arc::from_three_points(
            &Point3::new(0.0, 0.0, 0.0),
            &Point3::new(10.0, 0.0, 0.0),
            &Point3::new(5.0, 5.0, 0.0),
        )
        .unwrap();
        let element = encode_primitive(&Primitive::Arc(arc), Units::Native).unwrap();
        let p = element.child("PointOnArc").unwrap();
        let x: f64 = p.attr("X").unwrap().parse().unwrap();
        let y: f64 = p.attr("Y").unwrap().parse().unwrap();
        // Midpoint of the semicircle is its apex.
        assert!((x - 5.0).abs() < 1e-9);
        assert!((y - 5.0).abs() < 1e-9);
    }

    #[test]
    fn circle_radius_in_output_units() {
        let circle =
            Circle::from_center_normal_radius(Point3::origin(), Vector3::z(), 2.0).unwrap();
        let element = encode_primitive(&Primitive::Circle(circle), Units::Millimeters).unwrap();
        assert_eq!(element.child("Radius").unwrap().text, "609.6");
    }
}
