use std::slice;

use super::descriptor::SymmetryDescriptor;
use super::error::ConfigurationError;

/// The ordered `(reflect, rotation_count)` pairs to materialize for each sample.
///
/// The first pair is always the identity `(false, 0)`. Reflected pairs follow all of the
/// unreflected rotations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prescription {
    prescription: Vec<(bool, usize)>,
}

impl Prescription {
    pub fn new(descriptor: &SymmetryDescriptor) -> Result<Self, ConfigurationError> {
        Self::from_flags(descriptor.rotate90, descriptor.rotate180, descriptor.reflect)
    }

    pub fn from_flags(rotate90: bool, rotate180: bool, reflect: bool) -> Result<Self, ConfigurationError> {
        if rotate90 && rotate180 {
            return Err(ConfigurationError::ConflictingRotationFamilies);
        }

        let rotations: &[usize] = if rotate90 {
            &[0, 1, 2, 3]
        } else if rotate180 {
            &[0, 2]
        } else {
            &[]
        };

        let prescription = if !rotations.is_empty() {
            let mut prescription = rotations.iter().map(|&r| (false, r)).collect::<Vec<_>>();

            if reflect {
                prescription.extend(rotations.iter().map(|&r| (true, r)));
            }

            prescription
        } else if reflect {
            vec![(false, 0), (true, 0)]
        } else {
            vec![(false, 0)]
        };

        Ok(Self { prescription })
    }

    pub fn iter(&self) -> impl Iterator<Item = (bool, usize)> + '_ {
        self.into_iter()
    }

    pub fn len(&self) -> usize {
        self.prescription.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prescription.is_empty()
    }
}

impl<'a> IntoIterator for &'a Prescription {
    type Item = (bool, usize);
    type IntoIter = std::iter::Copied<slice::Iter<'a, (bool, usize)>>;

    fn into_iter(self) -> Self::IntoIter {
        self.prescription.iter().copied()
    }
}
