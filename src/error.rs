use thiserror::Error;

/// Top-level error type for the Curvex interchange codec.
#[derive(Debug, Error)]
pub enum CurvexError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Document(#[from] DocumentError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,

    #[error("collinear or coincident points do not define a circle")]
    CollinearPoints,
}

/// Errors related to interchange documents and the filesystem.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("syntax error at line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("unrecognized element: {0}")]
    UnknownElement(String),

    #[error("element {element} has an invalid {field} value")]
    InvalidValue {
        element: &'static str,
        field: &'static str,
    },

    #[error("ungrouped export cannot mix {first} and {second} elements")]
    MixedSections {
        first: &'static str,
        second: &'static str,
    },
}

/// Convenience type alias for results using [`CurvexError`].
pub type Result<T> = std::result::Result<T, CurvexError>;
