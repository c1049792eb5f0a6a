//! Batch export: grouping, file naming and output-directory management.
//!
//! Encoding is best-effort over a heterogeneous batch: an element that fails
//! to encode is skipped and reported, never aborting the batch. The document
//! is built whole in memory and written once.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, Timelike};

use crate::codec::encode_primitive;
use crate::document::{self, XmlElement};
use crate::error::{DocumentError, Result};
use crate::geometry::{Arc, Primitive, Segment};
use crate::math::Point3;
use crate::units::Units;

/// Per-call export configuration. Immutable; there is no process-wide state.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Directory the interchange documents are written into. Created on
    /// demand if absent.
    pub folder: PathBuf,
    /// Output unit for every scalar written to the wire.
    pub units: Units,
}

impl ExportConfig {
    /// Creates a configuration writing native units into `folder`.
    #[must_use]
    pub fn new(folder: impl Into<PathBuf>) -> Self {
        Self {
            folder: folder.into(),
            units: Units::default(),
        }
    }

    /// Sets the output unit.
    #[must_use]
    pub fn with_units(mut self, units: Units) -> Self {
        self.units = units;
        self
    }
}

/// An input element that could not be encoded and was left out of the
/// document.
#[derive(Debug)]
pub struct SkippedElement {
    /// Position in the input batch.
    pub index: usize,
    /// Wire kind of the skipped primitive.
    pub kind: &'static str,
    pub reason: String,
}

/// Result of one batch export.
#[derive(Debug)]
pub struct BatchOutcome {
    /// Path of the written document.
    pub path: PathBuf,
    /// Number of elements written.
    pub written: usize,
    /// Input elements skipped because they failed to encode.
    pub skipped: Vec<SkippedElement>,
}

/// Exports a batch of primitives as one sectioned document under a `Curves`
/// root: `Lines` (lines and rays), `Arcs` (arcs and circles) and `Points`.
/// Empty sections are omitted.
///
/// # Errors
///
/// Returns an error if the output directory cannot be created or the
/// document cannot be written. Per-element encode failures are reported in
/// the outcome instead.
pub fn export_batch(
    primitives: &[Primitive],
    header: &str,
    config: &ExportConfig,
) -> Result<BatchOutcome> {
    let mut lines = XmlElement::new("Lines");
    let mut arcs = XmlElement::new("Arcs");
    let mut points = XmlElement::new("Points");
    let mut written = 0;
    let mut skipped = Vec::new();

    for (index, primitive) in primitives.iter().enumerate() {
        let section = match primitive {
            Primitive::Segment(_) | Primitive::Ray(_) => &mut lines,
            Primitive::Arc(_) | Primitive::Circle(_) => &mut arcs,
            Primitive::Point(_) => &mut points,
        };
        match encode_primitive(primitive, config.units) {
            Ok(element) => {
                section.push_child(element);
                written += 1;
            }
            Err(reason) => {
                tracing::warn!(
                    "skipping {} at index {index}: {reason}",
                    primitive.kind_name()
                );
                skipped.push(SkippedElement {
                    index,
                    kind: primitive.kind_name(),
                    reason: reason.to_string(),
                });
            }
        }
    }

    let mut root = XmlElement::new("Curves");
    for section in [lines, arcs, points] {
        if section.has_children() {
            root.push_child(section);
        }
    }

    let path = write_document(&root, header, config)?;
    tracing::info!(
        "exported {written} elements ({} skipped) to {}",
        skipped.len(),
        path.display()
    );

    Ok(BatchOutcome {
        path,
        written,
        skipped,
    })
}

/// Exports primitives as an ungrouped single-section document whose root is
/// the section element itself (`Lines`, `Arcs` or `Points` depending on the
/// batch content). The decoder's secondary discovery path reads these.
///
/// # Errors
///
/// Returns an error if the batch mixes section kinds, or on I/O failure.
pub fn export_section(
    primitives: &[Primitive],
    header: &str,
    config: &ExportConfig,
) -> Result<BatchOutcome> {
    let mut section_name = None;
    for primitive in primitives {
        let name = match primitive {
            Primitive::Segment(_) | Primitive::Ray(_) => "Lines",
            Primitive::Arc(_) | Primitive::Circle(_) => "Arcs",
            Primitive::Point(_) => "Points",
        };
        match section_name {
            None => section_name = Some(name),
            Some(existing) if existing == name => {}
            Some(existing) => {
                return Err(DocumentError::MixedSections {
                    first: existing,
                    second: name,
                }
                .into());
            }
        }
    }

    let mut root = XmlElement::new(section_name.unwrap_or("Curves"));
    let mut written = 0;
    let mut skipped = Vec::new();
    for (index, primitive) in primitives.iter().enumerate() {
        match encode_primitive(primitive, config.units) {
            Ok(element) => {
                root.push_child(element);
                written += 1;
            }
            Err(reason) => skipped.push(SkippedElement {
                index,
                kind: primitive.kind_name(),
                reason: reason.to_string(),
            }),
        }
    }

    let path = write_document(&root, header, config)?;
    Ok(BatchOutcome {
        path,
        written,
        skipped,
    })
}

/// Exports line segments as an ungrouped `Lines` document.
///
/// # Errors
///
/// Returns an error on I/O failure.
pub fn export_lines(
    segments: &[Segment],
    header: &str,
    config: &ExportConfig,
) -> Result<BatchOutcome> {
    let primitives: Vec<Primitive> = segments
        .iter()
        .map(|s| Primitive::Segment(s.clone()))
        .collect();
    export_section(&primitives, header, config)
}

/// Exports arcs as an ungrouped `Arcs` document.
///
/// # Errors
///
/// Returns an error on I/O failure.
pub fn export_arcs(arcs: &[Arc], header: &str, config: &ExportConfig) -> Result<BatchOutcome> {
    let primitives: Vec<Primitive> = arcs.iter().map(|a| Primitive::Arc(a.clone())).collect();
    export_section(&primitives, header, config)
}

/// Exports bare points as an ungrouped `Points` document.
///
/// # Errors
///
/// Returns an error on I/O failure.
pub fn export_points(points: &[Point3], header: &str, config: &ExportConfig) -> Result<BatchOutcome> {
    let primitives: Vec<Primitive> = points.iter().map(|p| Primitive::Point(*p)).collect();
    export_section(&primitives, header, config)
}

/// Deletes every file in `folder`, regardless of extension. Subdirectories
/// are left alone. A missing folder is a no-op. Invoked only on demand.
///
/// # Errors
///
/// Returns an error if the directory cannot be read or a file cannot be
/// removed.
pub fn clear_folder(folder: &Path) -> Result<usize> {
    if !folder.exists() {
        return Ok(0);
    }

    let mut removed = 0;
    for entry in fs::read_dir(folder).map_err(DocumentError::Io)? {
        let entry = entry.map_err(DocumentError::Io)?;
        if entry.file_type().map_err(DocumentError::Io)?.is_file() {
            fs::remove_file(entry.path()).map_err(DocumentError::Io)?;
            removed += 1;
        }
    }
    tracing::info!("cleared {removed} files from {}", folder.display());
    Ok(removed)
}

fn write_document(root: &XmlElement, header: &str, config: &ExportConfig) -> Result<PathBuf> {
    fs::create_dir_all(&config.folder).map_err(DocumentError::Io)?;
    let path = config.folder.join(file_name(header, &Local::now()));
    document::save(root, &path)?;
    Ok(path)
}

/// Builds the document file name: `{minute}_{second}_{millisecond}_{header}.xml`
/// with filesystem-hostile characters stripped from the header.
///
/// Known limitation, kept deliberately: the timestamp has millisecond
/// resolution and carries no date, so two exports of the same header within
/// one millisecond silently overwrite each other.
fn file_name(header: &str, time: &DateTime<Local>) -> String {
    format!(
        "{}_{}_{}_{}.xml",
        time.minute(),
        time.second(),
        time.timestamp_subsec_millis(),
        sanitize_header(header)
    )
}

fn sanitize_header(header: &str) -> String {
    header
        .chars()
        .filter(|c| !matches!(c, '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*') && !c.is_control())
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::Circle;
    use crate::math::Vector3;
    use chrono::TimeZone;

    fn temp_folder(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("curvex_export_{tag}_{}", std::process::id()))
    }

    #[test]
    fn names_differ_across_seconds() {
        let t1 = Local.with_ymd_and_hms(2024, 5, 1, 10, 30, 5).unwrap();
        let t2 = Local.with_ymd_and_hms(2024, 5, 1, 10, 30, 6).unwrap();
        let a = file_name("walls", &t1);
        let b = file_name("walls", &t2);
        assert_ne!(a, b);
        assert_eq!(a, "30_5_0_walls.xml");
    }

    #[test]
    fn header_is_sanitized() {
        let t = Local.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        assert_eq!(file_name("a/b:c*d?", &t), "0_0_0_abcd.xml");
    }

    #[test]
    fn batch_export_writes_sectioned_document() {
        let folder = temp_folder("batch");
        let config = ExportConfig::new(&folder);

        let primitives = vec![
            Primitive::Segment(
                Segment::new(Point3::origin(), Point3::new(1.0, 0.0, 0.0)).unwrap(),
            ),
            Primitive::Circle(
                Circle::from_center_normal_radius(Point3::origin(), Vector3::z(), 2.0).unwrap(),
            ),
            Primitive::Point(Point3::new(1.0, 2.0, 3.0)),
        ];

        let outcome = export_batch(&primitives, "fixture", &config).unwrap();
        assert_eq!(outcome.written, 3);
        assert!(outcome.skipped.is_empty());

        let root = crate::document::load(&outcome.path).unwrap();
        assert_eq!(root.name, "Curves");
        assert!(root.child("Lines").is_some());
        assert!(root.child("Arcs").is_some());
        assert!(root.child("Points").is_some());

        fs::remove_dir_all(&folder).ok();
    }

    #[test]
    fn empty_sections_omitted() {
        let folder = temp_folder("empty_sections");
        let config = ExportConfig::new(&folder);

        let primitives = vec![Primitive::Point(Point3::origin())];
        let outcome = export_batch(&primitives, "points_only", &config).unwrap();
        let root = crate::document::load(&outcome.path).unwrap();
        assert!(root.child("Lines").is_none());
        assert!(root.child("Arcs").is_none());
        assert!(root.child("Points").is_some());

        fs::remove_dir_all(&folder).ok();
    }

    #[test]
    fn section_export_uses_section_root() {
        let folder = temp_folder("section");
        let config = ExportConfig::new(&folder);

        let outcome =
            export_points(&[Point3::origin(), Point3::new(1.0, 1.0, 1.0)], "pts", &config)
                .unwrap();
        let root = crate::document::load(&outcome.path).unwrap();
        assert_eq!(root.name, "Points");
        assert_eq!(root.children_named("Point").count(), 2);

        fs::remove_dir_all(&folder).ok();
    }

    #[test]
    fn typed_exports_use_matching_roots() {
        let folder = temp_folder("typed");
        let config = ExportConfig::new(&folder);
        let segment = Segment::new(Point3::origin(), Point3::new(1.0, 0.0, 0.0)).unwrap();

        let outcome = export_lines(&[segment], "seg", &config).unwrap();
        let root = crate::document::load(&outcome.path).unwrap();
        assert_eq!(root.name, "Lines");
        assert_eq!(root.children_named("Line").count(), 1);

        fs::remove_dir_all(&folder).ok();
    }

    #[test]
    fn mixed_section_kinds_rejected() {
        let folder = temp_folder("mixed");
        let config = ExportConfig::new(&folder);
        let primitives = vec![
            Primitive::Point(Point3::origin()),
            Primitive::Segment(
                Segment::new(Point3::origin(), Point3::new(1.0, 0.0, 0.0)).unwrap(),
            ),
        ];
        let err = export_section(&primitives, "mixed", &config).unwrap_err();
        assert!(matches!(
            err,
            crate::error::CurvexError::Document(DocumentError::MixedSections {
                first: "Points",
                second: "Lines",
            })
        ));
        fs::remove_dir_all(&folder).ok();
    }

    #[test]
    fn clear_folder_removes_everything() {
        let folder = temp_folder("clear");
        fs::create_dir_all(&folder).unwrap();
        fs::write(folder.join("a.xml"), "x").unwrap();
        fs::write(folder.join("b.txt"), "y").unwrap();
        fs::write(folder.join("c"), "z").unwrap();

        let removed = clear_folder(&folder).unwrap();
        assert_eq!(removed, 3);
        assert_eq!(fs::read_dir(&folder).unwrap().count(), 0);

        fs::remove_dir_all(&folder).ok();
    }

    #[test]
    fn clear_missing_folder_is_noop() {
        let folder = temp_folder("clear_missing_does_not_exist");
        assert_eq!(clear_folder(&folder).unwrap(), 0);
    }
}
