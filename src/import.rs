//! Import: document discovery and per-element decoding.
//!
//! A document-level failure (missing file, malformed document) is terminal
//! for the call and distinct from an empty report. Per-element decode
//! failures are collected and reported, never aborting the batch.

use std::path::{Path, PathBuf};

use crate::codec::decode_element;
use crate::document::{self, XmlElement};
use crate::error::{DocumentError, Result};
use crate::geometry::Primitive;
use crate::units::Units;

/// Per-call import configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImportConfig {
    /// Unit the document was encoded with; the inverse conversion is applied
    /// to every scalar read.
    pub units: Units,
}

impl ImportConfig {
    /// Creates a configuration expecting the given wire unit.
    #[must_use]
    pub fn new(units: Units) -> Self {
        Self { units }
    }
}

/// A single element that failed to decode.
#[derive(Debug)]
pub struct ElementFailure {
    /// Wire kind of the failed element.
    pub kind: String,
    /// Position among the elements of that kind, in discovery order.
    pub index: usize,
    pub reason: String,
}

/// Result of importing one document.
#[derive(Debug, Default)]
pub struct ImportReport {
    /// Successfully reconstructed primitives, in discovery order.
    pub primitives: Vec<Primitive>,
    /// Elements that failed to decode.
    pub failures: Vec<ElementFailure>,
}

/// Imports one interchange document.
///
/// Elements are discovered in a fixed order: bare `Line`, `Ray`, `Arc`,
/// `Circle`, `Point` children of the root first (the ungrouped secondary
/// path), then the `Lines`, `Arcs` and `Points` sections.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed; per-element
/// failures land in the report instead.
pub fn import_file(path: &Path, config: &ImportConfig) -> Result<ImportReport> {
    let root = document::load(path)?;
    let report = decode_document(&root, config);
    tracing::info!(
        "imported {} primitives ({} failed) from {}",
        report.primitives.len(),
        report.failures.len(),
        path.display()
    );
    Ok(report)
}

/// Imports every top-level `*.xml` file of a directory, each independently:
/// one unreadable or malformed file fails its own entry only.
///
/// # Errors
///
/// Returns an error if the directory itself cannot be read.
pub fn import_folder(folder: &Path, config: &ImportConfig) -> Result<Vec<FileImport>> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(folder)
        .map_err(DocumentError::Io)?
        .filter_map(std::result::Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("xml"))
        })
        .collect();
    paths.sort();

    Ok(paths
        .into_iter()
        .map(|path| {
            let result = import_file(&path, config);
            FileImport { path, result }
        })
        .collect())
}

/// Outcome of one file within a folder import.
#[derive(Debug)]
pub struct FileImport {
    pub path: PathBuf,
    pub result: Result<ImportReport>,
}

fn decode_document(root: &XmlElement, config: &ImportConfig) -> ImportReport {
    let mut report = ImportReport::default();

    // Ungrouped elements directly under the root.
    for kind in ["Line", "Ray", "Arc", "Circle", "Point"] {
        collect_kind(root, kind, config.units, &mut report);
    }

    // Grouped sections.
    if let Some(lines) = root.child("Lines") {
        collect_kind(lines, "Line", config.units, &mut report);
        collect_kind(lines, "Ray", config.units, &mut report);
    }
    if let Some(arcs) = root.child("Arcs") {
        collect_kind(arcs, "Arc", config.units, &mut report);
        collect_kind(arcs, "Circle", config.units, &mut report);
    }
    if let Some(points) = root.child("Points") {
        collect_kind(points, "Point", config.units, &mut report);
    }

    report
}

fn collect_kind(parent: &XmlElement, kind: &str, units: Units, report: &mut ImportReport) {
    for (index, element) in parent.children_named(kind).enumerate() {
        match decode_element(element, units) {
            Ok(primitive) => report.primitives.push(primitive),
            Err(reason) => {
                tracing::warn!("failed to decode {kind} #{index}: {reason}");
                report.failures.push(ElementFailure {
                    kind: kind.to_string(),
                    index,
                    reason: reason.to_string(),
                });
            }
        }
    }
}
