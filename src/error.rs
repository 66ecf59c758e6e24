use std::{fmt::Display, path::PathBuf};
use thiserror::Error;

/// The kind of a fatal namelist error, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorKind {
    MissingFile,
    Io,
    DimensionMismatch,
    UnsupportedDimensionality,
    UnknownParameter,
    UnterminatedString,
    LengthExceeded,
    InvalidNumber,
    InvalidBoolean,
    UnknownScalarType,
    InvalidSubscript,
    SubscriptOutOfRange,
    DanglingValues,
    InvalidMultiplier,
    InvalidSchema,
    ScatterBounds,
}

#[derive(Debug, Error)]
pub(crate) enum NamelistError {
    #[error("namelist file \"{}\" does not exist", .0.display())]
    MissingFile(PathBuf),

    #[error("could not read \"{}\": {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "invalid dimensions ({given}) used for parameter {param}; the parameter definition expects {expected}"
    )]
    DimensionMismatch {
        param: String,
        given: usize,
        expected: usize,
    },

    #[error("parameter {param} has {dims} dimensions, at most 3 are supported")]
    UnsupportedDimensionality { param: String, dims: usize },

    #[error("invalid parameter ({token}) provided, please remove it from the namelist file and try again")]
    UnknownParameter { token: String },

    #[error("string value {token} is not fully contained in quotes")]
    UnterminatedString { token: String },

    #[error("string value {token} exceeds the maximum length of {max_len} characters")]
    LengthExceeded { token: String, max_len: usize },

    #[error("invalid {expected} value {token}")]
    InvalidNumber {
        token: String,
        expected: &'static str,
    },

    #[error("invalid boolean value {token}, expected .TRUE. or .FALSE.")]
    InvalidBoolean { token: String },

    #[error("unknown scalar type code \"{code}\" for parameter {param}")]
    UnknownScalarType { param: String, code: String },

    #[error("invalid subscript for parameter {param}: {token}")]
    InvalidSubscript { param: String, token: String },

    #[error("subscript ({subscript}) of parameter {param} is outside of its dimensions ({dims})")]
    SubscriptOutOfRange {
        param: String,
        subscript: String,
        dims: String,
    },

    #[error("values {token} are not preceded by a parameter assignment")]
    DanglingValues { token: String },

    #[error("invalid repetition count in {token}")]
    InvalidMultiplier { token: String },

    #[error("invalid parameter catalog: {0}")]
    InvalidSchema(String),

    #[error("values for parameter {param} overflow row {row} of an entity record")]
    ScatterBounds { param: String, row: usize },

    #[error("line {line}: {source}")]
    Located {
        line: usize,
        #[source]
        source: Box<NamelistError>,
    },
}

impl NamelistError {
    pub(crate) fn kind(&self) -> ErrorKind {
        match self {
            NamelistError::MissingFile(_) => ErrorKind::MissingFile,
            NamelistError::Io { .. } => ErrorKind::Io,
            NamelistError::DimensionMismatch { .. } => ErrorKind::DimensionMismatch,
            NamelistError::UnsupportedDimensionality { .. } => {
                ErrorKind::UnsupportedDimensionality
            }
            NamelistError::UnknownParameter { .. } => ErrorKind::UnknownParameter,
            NamelistError::UnterminatedString { .. } => ErrorKind::UnterminatedString,
            NamelistError::LengthExceeded { .. } => ErrorKind::LengthExceeded,
            NamelistError::InvalidNumber { .. } => ErrorKind::InvalidNumber,
            NamelistError::InvalidBoolean { .. } => ErrorKind::InvalidBoolean,
            NamelistError::UnknownScalarType { .. } => ErrorKind::UnknownScalarType,
            NamelistError::InvalidSubscript { .. } => ErrorKind::InvalidSubscript,
            NamelistError::SubscriptOutOfRange { .. } => ErrorKind::SubscriptOutOfRange,
            NamelistError::DanglingValues { .. } => ErrorKind::DanglingValues,
            NamelistError::InvalidMultiplier { .. } => ErrorKind::InvalidMultiplier,
            NamelistError::InvalidSchema(_) => ErrorKind::InvalidSchema,
            NamelistError::ScatterBounds { .. } => ErrorKind::ScatterBounds,
            NamelistError::Located { source, .. } => source.kind(),
        }
    }

    pub(crate) fn at_line(self, line: usize) -> Self {
        match self {
            // never wrap twice
            NamelistError::Located { .. } => self,
            _ => NamelistError::Located {
                line,
                source: Box::new(self),
            },
        }
    }
}

/// A recoverable problem. Parsing continues after it has been recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Diagnostic {
    CapacityExceeded {
        param: String,
        line: usize,
        capacity: usize,
        trimmed: usize,
    },
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::CapacityExceeded {
                param,
                line,
                capacity,
                trimmed,
            } => write!(
                f,
                "line {line}: exceeded the {capacity} values allowed by parameter {param}, trimmed off {trimmed} excess values"
            ),
        }
    }
}
