use serde::{Deserialize, Serialize};

/// Positions of coordinates within a term, as written in a symmetry descriptor.
///
/// Terms with several coordinate pairs list their positions in order, the x and y lists are
/// zipped pairwise.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum TermIndices {
    SingleIndex(usize),
    IndexList(Vec<usize>),
}

impl TermIndices {
    pub fn into_positions(self) -> Vec<usize> {
        match self {
            TermIndices::SingleIndex(index) => vec![index],
            TermIndices::IndexList(indices) => indices,
        }
    }
}

impl From<usize> for TermIndices {
    fn from(index: usize) -> Self {
        TermIndices::SingleIndex(index)
    }
}

impl From<Vec<usize>> for TermIndices {
    fn from(indices: Vec<usize>) -> Self {
        TermIndices::IndexList(indices)
    }
}
