//! Winning line generation for square boards.

/// Builds every winning line for a `side × side` board.
///
/// Lines are ordered rows, then columns, then the main diagonal and the
/// anti-diagonal. Each line holds `side` row-major indices. For the 3×3
/// board this yields the classic eight lines.
pub fn winning_lines(side: usize) -> Vec<Vec<usize>> {
    let mut lines = Vec::with_capacity(2 * side + 2);

    // Rows
    lines.extend((0..side).map(|row| (0..side).map(|col| row * side + col).collect()));
    // Columns
    lines.extend((0..side).map(|col| (0..side).map(|row| row * side + col).collect()));
    // Diagonals
    lines.push((0..side).map(|i| i * side + i).collect());
    lines.push((0..side).map(|i| i * side + (side - 1 - i)).collect());

    lines
}
