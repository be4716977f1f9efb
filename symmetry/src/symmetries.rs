use serde::{Deserialize, Serialize};

use super::error::SymmetryError;
use super::prescription::Prescription;
use super::translator::Translator;

/// A training sample: the encoded state, each role's policy over its legal action indices and
/// the final score of each role.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Sample {
    pub state: Vec<bool>,
    pub policies: Vec<Vec<(usize, f32)>>,
    pub final_score: Vec<f32>,
}

/// One sample per element of the prescription, in prescription order. Scores are invariant.
pub fn get_symmetries(
    translator: &mut Translator,
    prescription: &Prescription,
    sample: &Sample,
) -> Result<Vec<Sample>, SymmetryError> {
    prescription
        .iter()
        .map(|(reflect, rotation_count)| -> Result<Sample, SymmetryError> {
            let state =
                translator.translate_basestate_faster(&sample.state, reflect, rotation_count)?;

            let policies = sample
                .policies
                .iter()
                .enumerate()
                .map(|(role_index, policy)| {
                    translator.translate_policy(role_index, policy, reflect, rotation_count)
                })
                .collect::<Result<Vec<_>, _>>()?;

            Ok(Sample {
                state,
                policies,
                final_score: sample.final_score.clone(),
            })
        })
        .collect()
}
