use crate::error::ConfigError;
use world_grid::{GridCell, Loc, Random, WorldGrid, WorldGridCells};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LifeCell {
    pub alive: bool,
}

impl LifeCell {
    pub const ALIVE: LifeCell = LifeCell { alive: true };
    pub const DEAD: LifeCell = LifeCell { alive: false };
}

impl GridCell for LifeCell {
    fn is_alive(&self) -> bool {
        self.alive
    }

    fn next(&self, live_neighbors: u8) -> Self {
        Self {
            alive: next_alive(self.alive, live_neighbors),
        }
    }
}

/// Born on 3, survives on 2 or 3.
pub fn next_alive(alive: bool, live_neighbors: u8) -> bool {
    if alive {
        (2..=3).contains(&live_neighbors)
    } else {
        live_neighbors == 3
    }
}

/// A cell whose alive state flipped during a generation step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellChange {
    pub index: usize,
    pub born: bool,
}

/// Advances the grid one generation, recording every flipped cell in `changes`.
/// `changes` is cleared first.
pub fn step_generation(grid: &mut WorldGrid<LifeCell>, changes: &mut Vec<CellChange>) {
    changes.clear();
    grid.update(|index, _old, new| {
        changes.push(CellChange {
            index,
            born: new.alive,
        });
    });
}

#[derive(Clone, Debug, PartialEq)]
pub enum InitialPattern {
    Empty,
    /// Each cell starts alive with this probability.
    Random { density: f64 },
    /// Exactly these cells start alive.
    Cells(Vec<Loc>),
}

impl InitialPattern {
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            InitialPattern::Random { density } if !(0.0..=1.0).contains(density) => {
                Err(ConfigError::InvalidDensity(*density))
            }
            _ => Ok(()),
        }
    }

    pub fn apply(&self, cells: &mut WorldGridCells<LifeCell>, rand: &mut Random) {
        match self {
            InitialPattern::Empty => {}
            InitialPattern::Random { density } => {
                for cell in cells.cells_iter_mut() {
                    *cell = if rand.next_bool(*density) {
                        LifeCell::ALIVE
                    } else {
                        LifeCell::DEAD
                    };
                }
            }
            InitialPattern::Cells(locs) => {
                for &loc in locs {
                    cells[loc] = LifeCell::ALIVE;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use world_grid::{EdgePolicy, GridSize};

    fn grid_with(size: GridSize, live: &[(u32, u32)]) -> WorldGrid<LifeCell> {
        let mut grid = WorldGrid::new(size, EdgePolicy::Bounded);
        let locs = live.iter().map(|&(x, y)| Loc::from_xy(x, y)).collect();
        InitialPattern::Cells(locs).apply(&mut grid.cells, &mut Random::from_seed(0));
        grid
    }

    #[test]
    fn rule_table_is_exhaustive() {
        for live_neighbors in 0..=8u8 {
            assert_eq!(
                next_alive(true, live_neighbors),
                live_neighbors == 2 || live_neighbors == 3,
                "alive with {live_neighbors} neighbors"
            );
            assert_eq!(
                next_alive(false, live_neighbors),
                live_neighbors == 3,
                "dead with {live_neighbors} neighbors"
            );
        }
    }

    #[test]
    fn block_is_still_life() {
        let mut grid = grid_with(GridSize::new(4, 4), &[(1, 1), (2, 1), (1, 2), (2, 2)]);
        let before = grid.snapshot();
        let mut changes = Vec::new();
        step_generation(&mut grid, &mut changes);
        assert!(changes.is_empty());
        assert_eq!(grid.cells, before);
        assert_eq!(grid.cells[Loc::from_xy(1, 1)], LifeCell::ALIVE);
        assert_eq!(grid.cells[Loc::from_xy(0, 0)], LifeCell::DEAD);
        assert_eq!(grid.generation(), 1);
    }

    #[test]
    fn lone_cell_dies_and_is_reported() {
        let mut grid = grid_with(GridSize::new(3, 3), &[(1, 1)]);
        let mut changes = vec![CellChange {
            index: 99,
            born: true,
        }];
        step_generation(&mut grid, &mut changes);
        assert_eq!(changes, vec![CellChange { index: 4, born: false }]);
    }

    #[test]
    fn next_generation_reads_only_the_previous_one() {
        // A glider: if cells were updated in place, births early in the scan would leak
        // into the neighbor counts of later cells.
        let mut grid = grid_with(
            GridSize::new(6, 6),
            &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)],
        );
        let mut changes = Vec::new();
        step_generation(&mut grid, &mut changes);
        let live: Vec<Loc> = [(0, 1), (2, 1), (1, 2), (2, 2), (1, 3)]
            .iter()
            .map(|&(x, y)| Loc::from_xy(x, y))
            .collect();
        for (index, cell) in grid.cells_iter().enumerate() {
            let loc = Loc::from_grid_index(index, grid.size());
            assert_eq!(cell.alive, live.contains(&loc), "at {loc:?}");
        }
    }

    #[test]
    fn random_density_outside_unit_range_is_rejected() {
        assert_eq!(
            InitialPattern::Random { density: 1.5 }.validate(),
            Err(ConfigError::InvalidDensity(1.5))
        );
        assert_eq!(
            InitialPattern::Random { density: -0.1 }.validate(),
            Err(ConfigError::InvalidDensity(-0.1))
        );
        assert_eq!(InitialPattern::Random { density: 1.0 }.validate(), Ok(()));
        assert_eq!(InitialPattern::Cells(vec![]).validate(), Ok(()));
    }

    #[test]
    fn full_density_fills_the_grid() {
        let mut cells = WorldGridCells::<LifeCell>::new(GridSize::new(5, 4));
        InitialPattern::Random { density: 1.0 }.apply(&mut cells, &mut Random::from_seed(2));
        assert!(cells.cells_iter().all(|&cell| cell == LifeCell::ALIVE));
    }

    #[test]
    fn random_pattern_is_reproducible_with_a_seed() {
        let size = GridSize::new(20, 10);
        let pattern = InitialPattern::Random { density: 0.3 };
        let mut a = WorldGridCells::<LifeCell>::new(size);
        let mut b = WorldGridCells::<LifeCell>::new(size);
        pattern.apply(&mut a, &mut Random::from_seed(11));
        pattern.apply(&mut b, &mut Random::from_seed(11));
        assert_eq!(a, b);
        assert!(a.cells_iter().any(|cell| cell.alive));
    }
}
