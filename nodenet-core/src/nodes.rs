//! Per-node scalar storage.
//!
//! Node identity is positional: the value at offset `n` belongs to node `n`,
//! and the store length is always the network's node count.

use crate::{error::RandomSourceError, random::RandomSource};

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct NodeStore {
    values: Vec<f64>,
}

impl NodeStore {
    pub(crate) fn len(&self) -> usize {
        self.values.len()
    }

    pub(crate) fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub(crate) fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// Replaces the store with `new_len` values, keeping the first `retain`
    /// existing ones and drawing the rest from the standard normal
    /// distribution.
    ///
    /// Draws happen into a fresh buffer, so a sampling failure leaves the
    /// store untouched.
    pub(crate) fn redraw<R: RandomSource>(
        &mut self,
        new_len: usize,
        retain: usize,
        source: &mut R,
    ) -> Result<(), RandomSourceError> {
        let kept = retain.min(new_len).min(self.values.len());
        let mut values = Vec::with_capacity(new_len);
        values.extend(self.values.iter().take(kept).copied());
        for _ in kept..new_len {
            values.push(source.normal(0.0, 1.0)?);
        }
        self.values = values;
        Ok(())
    }

    /// Overwrites the leading entries with `new_values` and returns how many
    /// were written.
    pub(crate) fn overwrite(&mut self, new_values: &[f64]) -> usize {
        let mut written = 0;
        for (slot, value) in self.values.iter_mut().zip(new_values) {
            *slot = *value;
            written += 1;
        }
        written
    }

    /// Copies the values in descending order.
    pub(crate) fn sorted_descending(&self) -> Vec<f64> {
        let mut sorted = self.values.clone();
        sorted.sort_unstable_by(|left, right| right.total_cmp(left));
        sorted
    }
}
