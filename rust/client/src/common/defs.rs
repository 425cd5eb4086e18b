pub type Discrete = usize;
pub type Continous = f64;

/// (row, col) on the grid.
pub type Coords = (usize, usize);
