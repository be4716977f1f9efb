use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use super::parser::{ParseError, SExprParser, TermParser};

/// A label appearing in a game description. Cheap to clone.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(Arc<str>);

impl Symbol {
    pub fn new(name: &str) -> Self {
        Self(Arc::from(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Symbol::new(name)
    }
}

impl From<String> for Symbol {
    fn from(name: String) -> Self {
        Self(Arc::from(name))
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self)
    }
}

/// A root symbol followed by an ordered sequence of sub-terms.
///
/// Atoms such as coordinate labels are terms without any sub-terms. Terms are compared and
/// hashed structurally.
///
/// Positions address the flattened form `(root sub_1 sub_2 ...)`: position 0 is the root and
/// position `n` is the `n`th sub-term.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Term {
    root: Symbol,
    args: Vec<Term>,
}

impl Term {
    pub fn new(root: impl Into<Symbol>, args: Vec<Term>) -> Self {
        Self {
            root: root.into(),
            args,
        }
    }

    pub fn atom(root: impl Into<Symbol>) -> Self {
        Self::new(root, Vec::new())
    }

    pub fn root(&self) -> &Symbol {
        &self.root
    }

    pub fn args(&self) -> &[Term] {
        &self.args
    }

    pub fn is_atom(&self) -> bool {
        self.args.is_empty()
    }

    /// The sub-term at `position`. The root at position 0 is not a sub-term.
    pub fn sub_term(&self, position: usize) -> Option<&Term> {
        position.checked_sub(1).and_then(|i| self.args.get(i))
    }

    /// Replaces the sub-term at `position`, returning the previous one.
    pub fn replace_sub_term(&mut self, position: usize, term: Term) -> Option<Term> {
        position
            .checked_sub(1)
            .and_then(|i| self.args.get_mut(i))
            .map(|slot| std::mem::replace(slot, term))
    }
}

impl FromStr for Term {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SExprParser::new().parse(s)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_atom() {
            return write!(f, "{}", self.root);
        }

        write!(f, "({}", self.root)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        write!(f, ")")
    }
}

impl fmt::Debug for Term {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self)
    }
}
