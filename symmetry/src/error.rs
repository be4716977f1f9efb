use std::fmt;

use gdl::{Symbol, Term};
use thiserror::Error;

/// Whether a root term describes a base feature or a legal action. The two are registered in
/// independent namespaces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FeatureKind {
    Base,
    Action,
}

impl fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FeatureKind::Base => f.write_str("base"),
            FeatureKind::Action => f.write_str("action"),
        }
    }
}

/// The symmetry descriptor is inconsistent with itself or with the board.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("rotations of 90 and 180 degrees cannot both be configured")]
    ConflictingRotationFamilies,
    #[error("{kind} root term {root} is already registered")]
    DuplicateRegistration { kind: FeatureKind, root: Symbol },
    #[error("rotation requires a square board but the x axis has {x_len} coordinates and the y axis has {y_len}")]
    AxisMismatch { x_len: usize, y_len: usize },
    #[error("root term {root} has {x_len} x indices but {y_len} y indices")]
    IndexCountMismatch {
        root: Symbol,
        x_len: usize,
        y_len: usize,
    },
    #[error("{kind} root term {root} cannot take a coordinate from position {index}")]
    InvalidTermIndex {
        kind: FeatureKind,
        root: Symbol,
        index: usize,
    },
}

/// A term could not be translated. The symmetry descriptor does not describe the game.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnsupportedTermError {
    #[error("{kind} {term} is neither registered nor skipped")]
    UnsupportedTerm { kind: FeatureKind, term: Term },
    #[error("translated action {term} is not a legal action of role {role}")]
    TranslationNotFound { role: usize, term: Term },
    #[error("base {term} was translated to {translated} which is not a base feature")]
    BaseNotFound { term: Term, translated: Term },
    #[error("coordinate {coordinate} is not on the board")]
    CoordinateNotFound { coordinate: String },
    #[error("{term} has no sub-term at position {index}")]
    TermIndexOutOfRange { term: Term, index: usize },
    #[error("role {role} does not exist")]
    UnknownRole { role: usize },
    #[error("role {role} has no action at index {index}")]
    UnknownAction { role: usize, index: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SymmetryError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    UnsupportedTerm(#[from] UnsupportedTermError),
    #[error("expected a state of {expected} features but found {actual}")]
    StateLength { expected: usize, actual: usize },
}
