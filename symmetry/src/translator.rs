use fnv::{FnvHashMap, FnvHashSet};
use gdl::{GameModel, Symbol, Term};
use itertools::Itertools;
use log::debug;

use super::error::{ConfigurationError, FeatureKind, SymmetryError, UnsupportedTermError};
use super::geometry::{reflect_vertical, rotate_90};
use super::indices::TermIndices;

/// The positions within a term that hold x and y coordinates, zipped pairwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoordinatePositions {
    x_positions: Vec<usize>,
    y_positions: Vec<usize>,
}

impl CoordinatePositions {
    fn new(
        kind: FeatureKind,
        root: &Symbol,
        x: TermIndices,
        y: TermIndices,
    ) -> Result<Self, ConfigurationError> {
        let x_positions = x.into_positions();
        let y_positions = y.into_positions();

        if x_positions.len() != y_positions.len() {
            return Err(ConfigurationError::IndexCountMismatch {
                root: root.clone(),
                x_len: x_positions.len(),
                y_len: y_positions.len(),
            });
        }

        // Position 0 is the root symbol.
        if let Some(&index) = x_positions.iter().chain(&y_positions).find(|&&i| i == 0) {
            return Err(ConfigurationError::InvalidTermIndex {
                kind,
                root: root.clone(),
                index,
            });
        }

        Ok(Self {
            x_positions,
            y_positions,
        })
    }

    pub fn x_positions(&self) -> &[usize] {
        &self.x_positions
    }

    pub fn y_positions(&self) -> &[usize] {
        &self.y_positions
    }
}

/// Maps encoded states and legal actions of a game to their images under the board's
/// reflections and rotations.
///
/// Every translation is memoized for the lifetime of the translator. A translator is meant to be
/// driven by a single thread, use one instance per thread.
#[derive(Debug)]
pub struct Translator {
    model: GameModel,
    x_axis: Vec<Term>,
    y_axis: Vec<Term>,

    base_types: FnvHashMap<Symbol, CoordinatePositions>,
    action_types: FnvHashMap<Symbol, CoordinatePositions>,
    skip_bases: FnvHashSet<Symbol>,
    skip_actions: FnvHashSet<Symbol>,

    /// Per base root term, the sub-terms of each base mapped to its index in the state vector.
    base_mappings: FnvHashMap<Symbol, FnvHashMap<Vec<Term>, usize>>,
    /// Base indices the fast path has to move, set on first use.
    worklist: Option<Vec<usize>>,

    base_cache: FnvHashMap<(usize, bool, usize), usize>,
    action_cache: FnvHashMap<(usize, usize, bool, usize), usize>,
}

impl Translator {
    pub fn new(model: GameModel, x_axis: Vec<Term>, y_axis: Vec<Term>) -> Self {
        Self {
            model,
            x_axis,
            y_axis,
            base_types: FnvHashMap::default(),
            action_types: FnvHashMap::default(),
            skip_bases: FnvHashSet::default(),
            skip_actions: FnvHashSet::default(),
            base_mappings: FnvHashMap::default(),
            worklist: None,
            base_cache: FnvHashMap::default(),
            action_cache: FnvHashMap::default(),
        }
    }

    pub fn model(&self) -> &GameModel {
        &self.model
    }

    pub fn x_axis(&self) -> &[Term] {
        &self.x_axis
    }

    pub fn y_axis(&self) -> &[Term] {
        &self.y_axis
    }

    pub fn base_count(&self) -> usize {
        self.model.bases().len()
    }

    pub fn action_count(&self, role_index: usize) -> Option<usize> {
        self.model.actions(role_index).map(|a| a.len())
    }

    pub fn add_basetype(
        &mut self,
        root_term: impl Into<Symbol>,
        x_indices: TermIndices,
        y_indices: TermIndices,
    ) -> Result<(), ConfigurationError> {
        let root = root_term.into();
        if self.base_types.contains_key(&root) || self.skip_bases.contains(&root) {
            return Err(ConfigurationError::DuplicateRegistration {
                kind: FeatureKind::Base,
                root,
            });
        }

        let positions = CoordinatePositions::new(FeatureKind::Base, &root, x_indices, y_indices)?;

        self.base_types.insert(root, positions);
        self.worklist = None;

        Ok(())
    }

    pub fn add_action_type(
        &mut self,
        root_term: impl Into<Symbol>,
        x_indices: TermIndices,
        y_indices: TermIndices,
    ) -> Result<(), ConfigurationError> {
        let root = root_term.into();
        if self.action_types.contains_key(&root) || self.skip_actions.contains(&root) {
            return Err(ConfigurationError::DuplicateRegistration {
                kind: FeatureKind::Action,
                root,
            });
        }

        let positions = CoordinatePositions::new(FeatureKind::Action, &root, x_indices, y_indices)?;

        self.action_types.insert(root, positions);

        Ok(())
    }

    pub fn add_skip_base(&mut self, root_term: impl Into<Symbol>) -> Result<(), ConfigurationError> {
        let root = root_term.into();
        if self.base_types.contains_key(&root) {
            return Err(ConfigurationError::DuplicateRegistration {
                kind: FeatureKind::Base,
                root,
            });
        }

        self.skip_bases.insert(root);
        self.worklist = None;

        Ok(())
    }

    pub fn add_skip_action(&mut self, root_term: impl Into<Symbol>) -> Result<(), ConfigurationError> {
        let root = root_term.into();
        if self.action_types.contains_key(&root) {
            return Err(ConfigurationError::DuplicateRegistration {
                kind: FeatureKind::Action,
                root,
            });
        }

        self.skip_actions.insert(root);

        Ok(())
    }

    pub fn base_type(&self, root_term: &Symbol) -> Option<&CoordinatePositions> {
        self.base_types.get(root_term)
    }

    pub fn action_type(&self, root_term: &Symbol) -> Option<&CoordinatePositions> {
        self.action_types.get(root_term)
    }

    pub fn is_skip_base(&self, root_term: &Symbol) -> bool {
        self.skip_bases.contains(root_term)
    }

    pub fn is_skip_action(&self, root_term: &Symbol) -> bool {
        self.skip_actions.contains(root_term)
    }

    /// Reflects (when requested) and then rotates each coordinate pair of `term`. Every other
    /// sub-term is left untouched.
    pub fn translate_terms(
        &self,
        term: &Term,
        x_indices: &[usize],
        y_indices: &[usize],
        reflect: bool,
        rotation_count: usize,
    ) -> Result<Term, SymmetryError> {
        if x_indices.len() != y_indices.len() {
            return Err(ConfigurationError::IndexCountMismatch {
                root: term.root().clone(),
                x_len: x_indices.len(),
                y_len: y_indices.len(),
            }
            .into());
        }

        let mut translated = term.clone();
        for (&x_index, &y_index) in x_indices.iter().zip_eq(y_indices) {
            let mut x = coordinate(term, x_index)?.clone();
            let mut y = coordinate(term, y_index)?.clone();

            if reflect {
                (x, y) = reflect_vertical(&x, &y, &self.x_axis, &self.y_axis)?;
            }

            for _ in 0..rotation_count % 4 {
                (x, y) = rotate_90(&x, &y, &self.x_axis, &self.y_axis)?;
            }

            translated.replace_sub_term(x_index, x);
            translated.replace_sub_term(y_index, y);
        }

        Ok(translated)
    }

    /// Reference translation of a flat state vector.
    ///
    /// Fails for any set base whose root term is neither registered nor skipped.
    pub fn translate_basestate(
        &mut self,
        basestate: &[bool],
        reflect: bool,
        rotation_count: usize,
    ) -> Result<Vec<bool>, SymmetryError> {
        self.check_state_len(basestate)?;
        let rotation_count = rotation_count % 4;

        let mut new_basestate = vec![false; basestate.len()];

        for (index, &set) in basestate.iter().enumerate() {
            if !set {
                continue;
            }

            if self.skip_bases.contains(self.model.bases()[index].root()) {
                new_basestate[index] = true;
                continue;
            }

            let new_index = self.translate_base_index(index, reflect, rotation_count)?;
            new_basestate[new_index] = true;
        }

        Ok(new_basestate)
    }

    /// Translation of a flat state vector which only visits the bases that move.
    ///
    /// Bases with skipped root terms are copied as is. Unlike [`Translator::translate_basestate`]
    /// bases whose root term is unregistered are copied as well instead of failing.
    pub fn translate_basestate_faster(
        &mut self,
        basestate: &[bool],
        reflect: bool,
        rotation_count: usize,
    ) -> Result<Vec<bool>, SymmetryError> {
        self.check_state_len(basestate)?;
        let rotation_count = rotation_count % 4;

        let mut new_basestate = basestate.to_vec();

        if !reflect && rotation_count == 0 {
            return Ok(new_basestate);
        }

        let moved = self
            .worklist()
            .iter()
            .copied()
            .filter(|&index| basestate[index])
            .collect::<Vec<_>>();

        // Translated indices may still need to be read, only set them once every index is cleared.
        let mut set_these = Vec::with_capacity(moved.len());
        for index in moved {
            set_these.push(self.translate_base_index(index, reflect, rotation_count)?);
            new_basestate[index] = false;
        }

        for index in set_these {
            new_basestate[index] = true;
        }

        Ok(new_basestate)
    }

    pub fn translate_action(
        &mut self,
        role_index: usize,
        legal_action_index: usize,
        reflect: bool,
        rotation_count: usize,
    ) -> Result<usize, SymmetryError> {
        let rotation_count = rotation_count % 4;
        let key = (role_index, legal_action_index, reflect, rotation_count);
        if let Some(&index) = self.action_cache.get(&key) {
            return Ok(index);
        }

        let actions = self
            .model
            .actions(role_index)
            .ok_or(UnsupportedTermError::UnknownRole { role: role_index })?;

        let term = actions
            .get(legal_action_index)
            .ok_or(UnsupportedTermError::UnknownAction {
                role: role_index,
                index: legal_action_index,
            })?;

        if self.skip_actions.contains(term.root()) {
            self.action_cache.insert(key, legal_action_index);
            return Ok(legal_action_index);
        }

        let positions = self.action_types.get(term.root()).ok_or_else(|| {
            UnsupportedTermError::UnsupportedTerm {
                kind: FeatureKind::Action,
                term: term.clone(),
            }
        })?;

        let new_index = if !reflect && rotation_count == 0 {
            legal_action_index
        } else {
            let translated = self.translate_terms(
                term,
                &positions.x_positions,
                &positions.y_positions,
                reflect,
                rotation_count,
            )?;

            actions
                .iter()
                .position(|other| *other == translated)
                .ok_or(UnsupportedTermError::TranslationNotFound {
                    role: role_index,
                    term: translated,
                })?
        };

        self.action_cache.insert(key, new_index);

        Ok(new_index)
    }

    /// Translates each `(legal_action_index, probability)` pair of a role's policy.
    pub fn translate_policy(
        &mut self,
        role_index: usize,
        policy: &[(usize, f32)],
        reflect: bool,
        rotation_count: usize,
    ) -> Result<Vec<(usize, f32)>, SymmetryError> {
        policy
            .iter()
            .map(|&(legal, probability)| {
                self.translate_action(role_index, legal, reflect, rotation_count)
                    .map(|index| (index, probability))
            })
            .collect()
    }

    fn translate_base_index(
        &mut self,
        index: usize,
        reflect: bool,
        rotation_count: usize,
    ) -> Result<usize, SymmetryError> {
        let key = (index, reflect, rotation_count);
        if let Some(&new_index) = self.base_cache.get(&key) {
            return Ok(new_index);
        }

        let term = &self.model.bases()[index];
        let positions = self.base_types.get(term.root()).ok_or_else(|| {
            UnsupportedTermError::UnsupportedTerm {
                kind: FeatureKind::Base,
                term: term.clone(),
            }
        })?;

        let translated = self.translate_terms(
            term,
            &positions.x_positions,
            &positions.y_positions,
            reflect,
            rotation_count,
        )?;

        let bases = self.model.bases();
        let mapping = self
            .base_mappings
            .entry(term.root().clone())
            .or_insert_with(|| reverse_mapping(bases, term.root()));

        let new_index = *mapping.get(translated.args()).ok_or_else(|| {
            UnsupportedTermError::BaseNotFound {
                term: term.clone(),
                translated: translated.clone(),
            }
        })?;

        self.base_cache.insert(key, new_index);

        Ok(new_index)
    }

    fn worklist(&mut self) -> &[usize] {
        let bases = self.model.bases();
        let base_types = &self.base_types;
        let skip_bases = &self.skip_bases;

        self.worklist.get_or_insert_with(|| {
            let worklist = bases
                .iter()
                .enumerate()
                .filter(|(_, term)| {
                    !skip_bases.contains(term.root()) && base_types.contains_key(term.root())
                })
                .map(|(index, _)| index)
                .collect::<Vec<_>>();

            debug!(
                "Built worklist of {} translatable bases out of {}",
                worklist.len(),
                bases.len()
            );

            worklist
        })
    }

    fn check_state_len(&self, basestate: &[bool]) -> Result<(), SymmetryError> {
        let expected = self.base_count();
        if basestate.len() != expected {
            return Err(SymmetryError::StateLength {
                expected,
                actual: basestate.len(),
            });
        }

        Ok(())
    }
}

fn reverse_mapping(bases: &[Term], root: &Symbol) -> FnvHashMap<Vec<Term>, usize> {
    let mapping = bases
        .iter()
        .enumerate()
        .filter(|(_, term)| term.root() == root)
        .map(|(index, term)| (term.args().to_vec(), index))
        .collect::<FnvHashMap<_, _>>();

    debug!("Built mapping of {} bases for root term {}", mapping.len(), root);

    mapping
}

fn coordinate(term: &Term, index: usize) -> Result<&Term, UnsupportedTermError> {
    term.sub_term(index)
        .ok_or_else(|| UnsupportedTermError::TermIndexOutOfRange {
            term: term.clone(),
            index,
        })
}
