#![deny(clippy::all)]
#![forbid(unsafe_code)]

use rand::distr::uniform::{SampleRange, SampleUniform};
use rand::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::fmt::Debug;
use std::mem;
use std::ops::{Index, IndexMut};
use std::time::Duration;

/// Something the display loop can drive and paint, one RGBA color per grid cell.
pub trait World {
    fn size(&self) -> GridSize;

    /// Called once per host frame with the time since the loop started.
    /// Returns true if the world stepped.
    fn update(&mut self, elapsed: Duration) -> bool;

    fn cell_colors_rgba(&self) -> impl Iterator<Item = [u8; 4]> + '_;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridSize {
    pub width: u32,
    pub height: u32,
}

impl GridSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of whole squares of `square_size` pixels that fit in the area, or `None` if
    /// not even one row or column fits.
    pub fn from_area(area_width: u32, area_height: u32, square_size: u32) -> Option<Self> {
        if square_size == 0 {
            return None;
        }
        let size = Self::new(area_width / square_size, area_height / square_size);
        (size.width > 0 && size.height > 0).then_some(size)
    }

    pub fn num_cells(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn contains(&self, loc: Loc) -> bool {
        loc.row < self.height && loc.col < self.width
    }
}

/// How neighborhoods treat coordinates past the grid edges.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EdgePolicy {
    /// Everything outside the grid counts as permanently dead.
    #[default]
    Bounded,
    /// Opposite edges are adjacent (torus).
    Wrapping,
}

pub trait GridCell
where
    Self: Copy + Default + Debug,
{
    fn is_alive(&self) -> bool;

    /// The state this cell takes in the next generation, given the number of live cells
    /// around it in the current one.
    fn next(&self, live_neighbors: u8) -> Self;
}

/// Two equally sized cell buffers. The current generation is only ever read while the next
/// one is written, then the buffers trade places.
#[derive(Clone, Debug)]
pub struct WorldGrid<C>
where
    C: GridCell,
{
    edges: EdgePolicy,
    generation: u64,
    pub cells: WorldGridCells<C>,
    next_cells: WorldGridCells<C>,
}

impl<C> WorldGrid<C>
where
    C: GridCell,
{
    pub fn new(size: GridSize, edges: EdgePolicy) -> Self {
        assert!(size.width > 0 && size.height > 0);
        Self {
            edges,
            generation: 0,
            cells: WorldGridCells::new(size),
            next_cells: WorldGridCells::new(size),
        }
    }

    pub fn size(&self) -> GridSize {
        self.cells.size()
    }

    pub fn edges(&self) -> EdgePolicy {
        self.edges
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn num_cells(&self) -> usize {
        self.cells.num_cells()
    }

    pub fn cells_iter(&self) -> impl DoubleEndedIterator<Item = &C> + Clone {
        self.cells.cells_iter()
    }

    pub fn get(&self, loc: Loc) -> Option<&C> {
        self.cells.cell(loc)
    }

    pub fn neighbor_count(&self, loc: Loc) -> u8 {
        assert!(
            self.size().contains(loc),
            "neighbor_count indices {}, {} out of bounds",
            loc.row,
            loc.col
        );
        Neighborhood::new(&self.cells, loc, self.edges).live_neighbor_count()
    }

    /// An independent copy of the current generation.
    pub fn snapshot(&self) -> WorldGridCells<C> {
        self.cells.clone()
    }

    /// Replaces the current generation wholesale. Does not count as a step.
    pub fn replace_cells(&mut self, cells: WorldGridCells<C>) {
        assert_eq!(cells.size(), self.size());
        self.cells = cells;
    }

    /// Computes the next generation purely from the current one, then swaps buffers.
    /// `on_change` sees the flat index of every cell whose state changed, with its old and
    /// new value.
    pub fn update<F>(&mut self, mut on_change: F)
    where
        F: FnMut(usize, &C, &C),
        C: PartialEq,
    {
        let size = self.size();
        for row in 0..size.height {
            for col in 0..size.width {
                let loc = Loc::new(row, col);
                let index = loc.flat_index(size);
                let cell = &self.cells.cells[index];
                let live_neighbors =
                    Neighborhood::new(&self.cells, loc, self.edges).live_neighbor_count();
                let next_cell = cell.next(live_neighbors);
                if next_cell != *cell {
                    on_change(index, cell, &next_cell);
                }
                self.next_cells.cells[index] = next_cell;
            }
        }
        mem::swap(&mut self.next_cells, &mut self.cells);
        self.generation += 1;
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct WorldGridCells<C>
where
    C: GridCell,
{
    cells: Vec<C>,
    size: GridSize,
}

impl<C> WorldGridCells<C>
where
    C: GridCell,
{
    pub fn new(size: GridSize) -> Self {
        assert!(size.width != 0 && size.height != 0);
        Self {
            cells: vec![C::default(); size.num_cells()],
            size,
        }
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    pub fn num_cells(&self) -> usize {
        self.cells.len()
    }

    pub fn cells_iter(&self) -> impl DoubleEndedIterator<Item = &C> + Clone {
        self.cells.iter()
    }

    pub fn cells_iter_mut(&mut self) -> impl DoubleEndedIterator<Item = &mut C> {
        self.cells.iter_mut()
    }

    pub fn cell(&self, loc: Loc) -> Option<&C> {
        loc.grid_index(self.size).map(|index| &self.cells[index])
    }

    pub fn cell_mut(&mut self, loc: Loc) -> Option<&mut C> {
        loc.grid_index(self.size).map(|index| &mut self.cells[index])
    }
}

impl<C> Index<Loc> for WorldGridCells<C>
where
    C: GridCell,
{
    type Output = C;

    fn index(&self, loc: Loc) -> &Self::Output {
        self.cell(loc)
            .unwrap_or_else(|| panic!("Index indices {}, {} out of bounds", loc.row, loc.col))
    }
}

impl<C> IndexMut<Loc> for WorldGridCells<C>
where
    C: GridCell,
{
    fn index_mut(&mut self, loc: Loc) -> &mut Self::Output {
        self.cell_mut(loc)
            .unwrap_or_else(|| panic!("Index_mut indices {}, {} out of bounds", loc.row, loc.col))
    }
}

/// The up-to-eight cells around a center cell. Under `EdgePolicy::Bounded` the positions
/// that fall off the grid are simply absent.
pub struct Neighborhood<'a, C>
where
    C: GridCell,
{
    cells: &'a WorldGridCells<C>,
    rows: [Option<u32>; 3],
    cols: [Option<u32>; 3],
}

impl<'a, C> Neighborhood<'a, C>
where
    C: GridCell,
{
    pub fn new(cells: &'a WorldGridCells<C>, center: Loc, edges: EdgePolicy) -> Self {
        let size = cells.size();
        let (row_above, row_below) = Self::adjacent_indexes(center.row, size.height, edges);
        let (col_left, col_right) = Self::adjacent_indexes(center.col, size.width, edges);
        Self {
            cells,
            rows: [row_above, Some(center.row), row_below],
            cols: [col_left, Some(center.col), col_right],
        }
    }

    pub fn for_neighbor_cells<F>(&self, mut f: F)
    where
        F: FnMut(&C),
    {
        self.for_cell(0, 0, &mut f);
        self.for_cell(0, 1, &mut f);
        self.for_cell(0, 2, &mut f);

        self.for_cell(1, 0, &mut f);
        self.for_cell(1, 2, &mut f);

        self.for_cell(2, 0, &mut f);
        self.for_cell(2, 1, &mut f);
        self.for_cell(2, 2, &mut f);
    }

    pub fn live_neighbor_count(&self) -> u8 {
        let mut result = 0;
        self.for_neighbor_cells(|neighbor| {
            if neighbor.is_alive() {
                result += 1;
            }
        });
        result
    }

    fn for_cell<F>(&self, row: usize, col: usize, f: &mut F)
    where
        F: FnMut(&C),
    {
        if let (Some(r), Some(c)) = (self.rows[row], self.cols[col]) {
            f(&self.cells[Loc::new(r, c)]);
        }
    }

    fn adjacent_indexes(index: u32, max: u32, edges: EdgePolicy) -> (Option<u32>, Option<u32>) {
        match edges {
            EdgePolicy::Bounded => (
                index.checked_sub(1),
                Some(index + 1).filter(|&next| next < max),
            ),
            EdgePolicy::Wrapping => {
                // Below 3 wide, wrapped indexes can land on the center or on each other.
                let before = Some(Self::modulo(index as i64 - 1, max)).filter(|&i| i != index);
                let after = Some(Self::modulo(index as i64 + 1, max))
                    .filter(|&i| i != index && Some(i) != before);
                (before, after)
            }
        }
    }

    fn modulo(val: i64, max: u32) -> u32 {
        val.rem_euclid(max as i64) as u32
    }
}

/// A grid coordinate. `row` is y and `col` is x.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Loc {
    pub row: u32,
    pub col: u32,
}

impl Loc {
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    pub fn from_xy(x: u32, y: u32) -> Self {
        Self::new(y, x)
    }

    pub fn grid_index(&self, size: GridSize) -> Option<usize> {
        size.contains(*self).then(|| self.flat_index(size))
    }

    pub fn from_grid_index(index: usize, size: GridSize) -> Self {
        let width = size.width as usize;
        Self::new((index / width) as u32, (index % width) as u32)
    }

    fn flat_index(&self, size: GridSize) -> usize {
        self.row as usize * size.width as usize + self.col as usize
    }
}

#[derive(Debug)]
pub struct Random {
    rng: SmallRng,
}

impl Random {
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_rng(&mut rand::rng()),
        }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn next_bool(&mut self, p: f64) -> bool {
        self.rng.random_bool(p)
    }

    pub fn next_in_range<T, R>(&mut self, range: R) -> T
    where
        T: SampleUniform,
        R: SampleRange<T>,
    {
        self.rng.random_range(range)
    }

    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.rng)
    }
}

impl Default for Random {
    fn default() -> Self {
        Self::new()
    }
}
