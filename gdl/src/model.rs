use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};

use super::parser::{symbolize, TermParser};
use super::term::{Symbol, Term};

/// The textual game facts as produced by a game description compiler.
///
/// Bases are of the form `(true <fact>)`, actions of the form `(does <role> <move>)`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GameDescription {
    pub roles: Vec<String>,
    pub bases: Vec<String>,
    pub actions: Vec<Vec<String>>,
}

/// Symbolized game model. The order of `bases` defines the layout of a flat state vector, the
/// order of each role's actions defines its legal action indices.
#[derive(Debug, Clone, PartialEq)]
pub struct GameModel {
    roles: Vec<Symbol>,
    bases: Vec<Term>,
    actions: Vec<Vec<Term>>,
}

impl GameModel {
    pub fn new(roles: Vec<Symbol>, bases: Vec<Term>, actions: Vec<Vec<Term>>) -> Result<Self> {
        ensure!(
            roles.len() == actions.len(),
            "Expected an action list for each of the {} roles but found {}",
            roles.len(),
            actions.len()
        );

        Ok(Self {
            roles,
            bases,
            actions,
        })
    }

    pub fn from_description<P: TermParser + ?Sized>(
        parser: &P,
        description: &GameDescription,
    ) -> Result<Self> {
        let roles = description
            .roles
            .iter()
            .map(|r| Symbol::new(r))
            .collect();

        let bases = description
            .bases
            .iter()
            .map(|b| symbolize(parser, b, 1).with_context(|| format!("Failed to parse base {}", b)))
            .collect::<Result<Vec<_>>>()?;

        let actions = description
            .actions
            .iter()
            .map(|role_actions| {
                role_actions
                    .iter()
                    .map(|a| {
                        symbolize(parser, a, 2)
                            .with_context(|| format!("Failed to parse action {}", a))
                    })
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?;

        Self::new(roles, bases, actions)
    }

    pub fn roles(&self) -> &[Symbol] {
        &self.roles
    }

    pub fn bases(&self) -> &[Term] {
        &self.bases
    }

    pub fn actions(&self, role_index: usize) -> Option<&[Term]> {
        self.actions.get(role_index).map(Vec::as_slice)
    }
}
