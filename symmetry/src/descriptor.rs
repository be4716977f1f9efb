use std::path::PathBuf;

use anyhow::Result;
use common::{Config, ConfigLoader};
use gdl::{Symbol, Term};
use serde::{Deserialize, Serialize};

use super::indices::TermIndices;

/// Registers the coordinate positions of a root term.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ApplySymmetry {
    #[serde(alias = "base_term")]
    pub root_term: Symbol,
    #[serde(alias = "x_terms_idx")]
    pub x_indices: TermIndices,
    #[serde(alias = "y_terms_idx")]
    pub y_indices: TermIndices,
}

/// Which geometric transforms are symmetries of a game, and how its terms carry coordinates.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct SymmetryDescriptor {
    pub apply_bases: Vec<ApplySymmetry>,
    pub apply_actions: Vec<ApplySymmetry>,
    pub skip_bases: Vec<Symbol>,
    pub skip_actions: Vec<Symbol>,
    #[serde(alias = "do_rotations_90")]
    pub rotate90: bool,
    #[serde(alias = "do_rotations_180")]
    pub rotate180: bool,
    #[serde(alias = "do_reflection")]
    pub reflect: bool,
}

impl SymmetryDescriptor {
    pub fn rotates(&self) -> bool {
        self.rotate90 || self.rotate180
    }
}

/// The coordinate labels of the board, in order along each axis.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BoardDesc {
    pub x_cords: Vec<String>,
    pub y_cords: Vec<String>,
}

impl BoardDesc {
    pub fn x_axis(&self) -> Vec<Term> {
        self.x_cords.iter().map(|c| Term::atom(c.as_str())).collect()
    }

    pub fn y_axis(&self) -> Vec<Term> {
        self.y_cords.iter().map(|c| Term::atom(c.as_str())).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SymmetryConfig {
    pub board: BoardDesc,
    pub symmetries: SymmetryDescriptor,
    /// A json [`gdl::GameDescription`], relative to the config file.
    pub game_file: Option<PathBuf>,
}

impl Config for SymmetryConfig {
    fn load(config: &ConfigLoader) -> Result<Self> {
        Ok(Self {
            board: config.get_section("board")?,
            symmetries: config.get_section("symmetries")?,
            game_file: config.get_relative_path("game_file").ok(),
        })
    }
}
