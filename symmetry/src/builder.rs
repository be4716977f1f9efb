use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use common::ConfigLoader;
use gdl::{GameDescription, GameModel, TermParser};
use log::info;

use super::descriptor::{BoardDesc, SymmetryConfig, SymmetryDescriptor};
use super::error::ConfigurationError;
use super::prescription::Prescription;
use super::translator::Translator;

/// Registers every base and action type of the descriptor on a new translator for `model`.
pub fn create_translator(
    model: GameModel,
    board: &BoardDesc,
    symmetries: &SymmetryDescriptor,
) -> Result<Translator, ConfigurationError> {
    if symmetries.rotates() && board.x_cords.len() != board.y_cords.len() {
        return Err(ConfigurationError::AxisMismatch {
            x_len: board.x_cords.len(),
            y_len: board.y_cords.len(),
        });
    }

    let mut translator = Translator::new(model, board.x_axis(), board.y_axis());

    for ab in &symmetries.apply_bases {
        translator.add_basetype(ab.root_term.clone(), ab.x_indices.clone(), ab.y_indices.clone())?;
    }

    for ac in &symmetries.apply_actions {
        translator.add_action_type(ac.root_term.clone(), ac.x_indices.clone(), ac.y_indices.clone())?;
    }

    for term in &symmetries.skip_bases {
        translator.add_skip_base(term.clone())?;
    }

    for term in &symmetries.skip_actions {
        translator.add_skip_action(term.clone())?;
    }

    info!(
        "Created translator for {} bases with {} base types, {} action types, {} skipped bases and {} skipped actions",
        translator.base_count(),
        symmetries.apply_bases.len(),
        symmetries.apply_actions.len(),
        symmetries.skip_bases.len(),
        symmetries.skip_actions.len()
    );

    Ok(translator)
}

/// Symbolizes the textual game description with `parser` before creating the translator.
pub fn create_translator_with_parser<P: TermParser + ?Sized>(
    parser: &P,
    description: &GameDescription,
    board: &BoardDesc,
    symmetries: &SymmetryDescriptor,
) -> Result<Translator> {
    let model = GameModel::from_description(parser, description)?;
    let translator = create_translator(model, board, symmetries)?;

    Ok(translator)
}

/// Loads the `symmetry` scope of a config file along with the game file it references.
pub fn load_translator<P: TermParser + ?Sized>(
    config_path: impl AsRef<Path>,
    parser: &P,
) -> Result<(Translator, Prescription)> {
    let config = ConfigLoader::new(config_path, "symmetry".to_string())?;
    let symmetry_config: SymmetryConfig = config.load()?;

    let game_file = symmetry_config
        .game_file
        .as_ref()
        .ok_or_else(|| anyhow!("The symmetry config must specify a game_file"))?;

    let contents = fs::read_to_string(game_file)
        .with_context(|| format!("Failed to read game file at: {:?}", game_file))?;
    let description: GameDescription = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse game file at: {:?}", game_file))?;

    let prescription = Prescription::new(&symmetry_config.symmetries)?;
    let translator = create_translator_with_parser(
        parser,
        &description,
        &symmetry_config.board,
        &symmetry_config.symmetries,
    )?;

    info!(
        "Loaded symmetries for {:?} prescribing {} transforms",
        game_file,
        prescription.len()
    );

    Ok((translator, prescription))
}
