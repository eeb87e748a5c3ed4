//! Big integer type definition.

use super::math::{Limb, Math};

/// Storage for a big integer type.
#[derive(Clone, PartialEq, Eq)]
pub(crate) struct Bigint {
    /// Internal storage for the Bigint, in little-endian order.
    pub(crate) data: Vec<Limb>,
}

impl Default for Bigint {
    fn default() -> Self {
        // We want to avoid repeated reallocations at smaller volumes.
        let mut bigint = Bigint {
            data: Vec::<Limb>::default(),
        };
        bigint.data.reserve(20);
        bigint
    }
}

impl Math for Bigint {
    #[inline]
    fn data(&self) -> &Vec<Limb> {
        &self.data
    }

    #[inline]
    fn data_mut(&mut self) -> &mut Vec<Limb> {
        &mut self.data
    }
}
