use super::defs::*;

/// Row-major flat index to (row, col).
pub fn to_coords(index: Discrete, size: usize) -> Coords {
    (index / size, index % size)
}

pub fn to_index((row, col): Coords, size: usize) -> Discrete {
    row * size + col
}

/// L1 distance between two cells.
pub fn manhattan(a: Coords, b: Coords) -> usize {
    a.0.abs_diff(b.0) + a.1.abs_diff(b.1)
}

/// Apply `delta` and keep each axis inside [0, size - 1] on its own.
pub fn clamp_move((row, col): Coords, (d_row, d_col): (isize, isize), size: usize) -> Coords {
    let max = size as isize - 1;
    (
        (row as isize + d_row).clamp(0, max) as usize,
        (col as isize + d_col).clamp(0, max) as usize,
    )
}
