//! Level-bounded backtracking enumerator.
//!
//! Explores every assignment of columns to rows `start..max` on top of a
//! fixed prefix `[0, start)` and hands each non-attacking board of `max`
//! rows to a [`SolutionSink`]. The master runs it over `[0, k)` to produce
//! work units, the workers run it over `[k, n)` to complete them.
//!
//! The search is an unrolled depth-first walk: one "next column to try"
//! cursor per level instead of one stack frame per level, so stack usage
//! does not grow with the board size.

use crate::board::{is_safe, Column};
use crate::error::{QueensError, Result};
use crate::search::result::SearchStatistics;
use crate::search::sink::SolutionSink;
use std::time::Instant;
use tracing::trace;

/// Reusable enumerator. Keeps its cursor buffer between runs and totals the
/// statistics of every run until [`Enumerator::reset`].
#[derive(Debug, Default)]
pub struct Enumerator {
    cursors: Vec<Column>,
    totals: SearchStatistics,
}

impl Enumerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enumerate rows `[start_level, max_level)` of `board`.
    ///
    /// `board.len()` is the board size `n`: every row tries columns `0..n`
    /// in increasing order, so solutions reach the sink in lexicographic
    /// order. Rows `[0, start_level)` must already be mutually
    /// non-attacking; they are read but never written.
    ///
    /// When `start_level == max_level` the prefix itself is the only
    /// solution and is delivered once.
    pub fn search<S>(
        &mut self,
        board: &mut [Column],
        start_level: usize,
        max_level: usize,
        sink: &mut S,
    ) -> Result<SearchStatistics>
    where
        S: SolutionSink + ?Sized,
    {
        let invalid = || QueensError::InvalidRange {
            start: start_level,
            max: max_level,
            len: board.len(),
        };
        if start_level > max_level || max_level > board.len() {
            return Err(invalid());
        }
        let columns = Column::try_from(board.len()).map_err(|_| invalid())?;

        let started = Instant::now();
        let mut stats = SearchStatistics::default();

        if start_level == max_level {
            sink.accept(&board[..max_level])?;
            stats.solutions_found = 1;
        } else {
            self.cursors.clear();
            self.cursors.resize(max_level, 0);
            self.walk(board, start_level, max_level, columns, sink, &mut stats)?;
        }

        stats.elapsed_time = started.elapsed();
        self.totals += stats;
        trace!(
            start_level,
            max_level,
            placements = stats.placements_tried,
            solutions = stats.solutions_found,
            "enumeration finished"
        );
        Ok(stats)
    }

    fn walk<S>(
        &mut self,
        board: &mut [Column],
        start_level: usize,
        max_level: usize,
        columns: Column,
        sink: &mut S,
        stats: &mut SearchStatistics,
    ) -> Result<()>
    where
        S: SolutionSink + ?Sized,
    {
        let cursors = &mut self.cursors;
        let mut level = start_level;

        loop {
            let col = cursors[level];
            if col >= columns {
                // Row exhausted. Backing out of the first free row ends the search.
                if level == start_level {
                    return Ok(());
                }
                level -= 1;
                cursors[level] += 1;
                continue;
            }

            stats.placements_tried += 1;
            if !is_safe(&board[..level], level, col) {
                cursors[level] += 1;
                continue;
            }

            board[level] = col;
            if level + 1 == max_level {
                sink.accept(&board[..max_level])?;
                stats.solutions_found += 1;
                cursors[level] += 1;
            } else {
                level += 1;
                cursors[level] = 0;
            }
        }
    }

    /// Statistics summed over every run since creation or the last reset.
    pub fn statistics(&self) -> SearchStatistics {
        self.totals
    }

    pub fn reset(&mut self) {
        self.totals = SearchStatistics::default();
    }
}

/// One-shot form of [`Enumerator::search`].
pub fn search_levels<S>(
    board: &mut [Column],
    start_level: usize,
    max_level: usize,
    sink: &mut S,
) -> Result<SearchStatistics>
where
    S: SolutionSink + ?Sized,
{
    Enumerator::new().search(board, start_level, max_level, sink)
}
