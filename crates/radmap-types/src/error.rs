use std::fmt;

#[derive(Debug)]
pub enum RadMapError {
    EmptySurvey,

    InsufficientGeometry { points: usize, message: String },

    InvalidThresholdTable(String),

    UnknownMaterial { material: String },

    NonPositiveDose { source: f64, target: f64 },

    ConfigError(String),

    GridOutOfBounds { row: usize, col: usize },

    Io(std::io::Error),

    Json(serde_json::Error),
}

impl fmt::Display for RadMapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RadMapError::EmptySurvey => {
                write!(f, "Survey contains no sample points")
            }
            RadMapError::InsufficientGeometry { points, message } => {
                write!(
                    f,
                    "Triangulation impossible with {points} usable points: {message}"
                )
            }
            RadMapError::InvalidThresholdTable(msg) => {
                write!(f, "Invalid threshold table: {msg}")
            }
            RadMapError::UnknownMaterial { material } => {
                write!(f, "Unknown shielding material: {material}")
            }
            RadMapError::NonPositiveDose { source, target } => {
                write!(
                    f,
                    "Dose rates must be positive: source={source}, target={target}"
                )
            }
            RadMapError::ConfigError(msg) => {
                write!(f, "Configuration error: {msg}")
            }
            RadMapError::GridOutOfBounds { row, col } => {
                write!(f, "Grid index out of bounds: row={row}, col={col}")
            }
            RadMapError::Io(err) => {
                write!(f, "IO error: {err}")
            }
            RadMapError::Json(err) => {
                write!(f, "JSON error: {err}")
            }
        }
    }
}

impl std::error::Error for RadMapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RadMapError::Io(err) => Some(err),
            RadMapError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for RadMapError {
    fn from(err: std::io::Error) -> Self {
        RadMapError::Io(err)
    }
}

impl From<serde_json::Error> for RadMapError {
    fn from(err: serde_json::Error) -> Self {
        RadMapError::Json(err)
    }
}

pub type RadMapResult<T> = Result<T, RadMapError>;
