//! Board assignments and the queen attack rules.
//!
//! A board assignment is a slice of column indices where slot `i` holds the
//! column of the queen in row `i`. One queen per row is structural, so only
//! column and diagonal conflicts ever need checking.

/// Column index of a queen. Matches the unsigned wire type of a batch.
pub type Column = u32;

/// Number of solutions for `n = 0..=14` (OEIS A000170).
const KNOWN_COUNTS: [u64; 15] = [
    1, 1, 0, 0, 2, 10, 4, 40, 92, 352, 724, 2680, 14200, 73712, 365596,
];

/// Returns true if a queen at (`row`, `col`) attacks none of the queens in
/// `placed`, where `placed[i]` is the column of the queen in row `i` and
/// every placed row lies above `row`.
pub fn is_safe(placed: &[Column], row: usize, col: Column) -> bool {
    placed.iter().enumerate().all(|(i, &c)| {
        let row_gap = row.abs_diff(i) as u64;
        let col_gap = col.abs_diff(c) as u64;
        c != col && row_gap != col_gap
    })
}

/// Checks that every pair of rows in `assignment` is non-attacking and that
/// every column lies in `[0, n)`.
pub fn is_valid_assignment(assignment: &[Column], n: usize) -> bool {
    (0..assignment.len()).all(|row| {
        let col = assignment[row];
        (col as usize) < n && is_safe(&assignment[..row], row, col)
    })
}

/// Known total solution count for an `n`×`n` board, if tabulated.
pub fn known_solution_count(n: usize) -> Option<u64> {
    KNOWN_COUNTS.get(n).copied()
}
