//! Solution sinks: where the enumerator delivers the boards it finds.

use crate::board::Column;
use crate::error::Result;

/// Capability handed to the enumerator; called once per solution found at
/// the boundary level.
///
/// The slice is only valid for the duration of the call. Implementations
/// that need the solution later must copy it. Returning an error aborts the
/// enumeration and the error is propagated to the caller.
pub trait SolutionSink {
    fn accept(&mut self, solution: &[Column]) -> Result<()>;
}

impl<F> SolutionSink for F
where
    F: FnMut(&[Column]) -> Result<()>,
{
    fn accept(&mut self, solution: &[Column]) -> Result<()> {
        self(solution)
    }
}

/// Ordered accumulator of equally sized solutions stored as one flat
/// sequence, which is also the wire layout of a solution batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolutionStore {
    width: usize,
    flat: Vec<Column>,
}

impl SolutionStore {
    /// Create an empty store for solutions of `width` columns.
    pub fn new(width: usize) -> Self {
        Self {
            width,
            flat: Vec::new(),
        }
    }

    /// Number of columns per solution.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of solutions stored.
    pub fn len(&self) -> usize {
        if self.width == 0 {
            0
        } else {
            self.flat.len() / self.width
        }
    }

    pub fn is_empty(&self) -> bool {
        self.flat.is_empty()
    }

    /// Append one solution.
    pub fn push(&mut self, solution: &[Column]) {
        self.flat.extend_from_slice(solution);
    }

    /// Append a whole flat batch, keeping its internal order.
    pub fn extend_batch(&mut self, batch: &[Column]) {
        self.flat.extend_from_slice(batch);
    }

    /// Drain the contents into an outgoing batch, leaving the store empty.
    pub fn take_batch(&mut self) -> Vec<Column> {
        std::mem::take(&mut self.flat)
    }

    pub fn as_flat(&self) -> &[Column] {
        &self.flat
    }

    /// The flat result sequence, `width` columns per solution.
    pub fn into_flat(self) -> Vec<Column> {
        self.flat
    }

    /// Iterate over the stored solutions in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &[Column]> {
        self.flat.chunks_exact(self.width.max(1))
    }
}

impl SolutionSink for SolutionStore {
    fn accept(&mut self, solution: &[Column]) -> Result<()> {
        self.push(solution);
        Ok(())
    }
}
