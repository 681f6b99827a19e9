use crate::life::{CellChange, LifeCell};
use crate::palette::PaletteSlot;
use std::mem;
use world_grid::{GridSize, Loc, Random, WorldGridCells};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisplayColor {
    None,
    Alive(PaletteSlot),
    Fading(PaletteSlot),
}

/// What the renderer needs to paint one cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellVisual {
    pub color: DisplayColor,
    /// 0.0 shows the cell's color fully, 1.0 shows only background.
    pub fade_progress: f32,
    /// Generation in which the cell last changed alive state.
    pub changed_at: u64,
}

impl CellVisual {
    fn alive(slot: PaletteSlot, generation: u64) -> Self {
        Self {
            color: DisplayColor::Alive(slot),
            fade_progress: 0.0,
            changed_at: generation,
        }
    }

    pub fn is_fading(&self) -> bool {
        matches!(self.color, DisplayColor::Fading(_))
    }

    pub fn slot(&self) -> Option<PaletteSlot> {
        match self.color {
            DisplayColor::None => None,
            DisplayColor::Alive(slot) | DisplayColor::Fading(slot) => Some(slot),
        }
    }

    pub fn ticks_since_change(&self, generation: u64) -> u64 {
        generation.saturating_sub(self.changed_at)
    }

    /// This state as seen `phase` of the way through the current tick interval.
    pub fn interpolated(&self, phase: f32, fade_step: f32) -> Self {
        if self.is_fading() {
            Self {
                fade_progress: (self.fade_progress + phase * fade_step).min(1.0),
                ..*self
            }
        } else {
            *self
        }
    }
}

impl Default for CellVisual {
    fn default() -> Self {
        Self {
            color: DisplayColor::None,
            fade_progress: 1.0,
            changed_at: 0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VisualPolicy {
    pub death_fade: bool,
    pub shifting_colors: bool,
    pub fade_ticks: u32,
    pub palette_len: usize,
}

/// Per-cell color and fade state, updated once per tick from the list of cells that
/// flipped plus the cells still fading. Stable cells are never visited.
#[derive(Clone, Debug)]
pub struct VisualStateTracker {
    size: GridSize,
    cells: Vec<CellVisual>,
    fading: Vec<usize>,
    policy: VisualPolicy,
    fade_step: f32,
    touched_last_tick: usize,
}

impl VisualStateTracker {
    pub fn new(size: GridSize, policy: VisualPolicy) -> Self {
        assert!(policy.fade_ticks > 0 && policy.palette_len > 0);
        Self {
            size,
            cells: vec![CellVisual::default(); size.num_cells()],
            fading: Vec::new(),
            policy,
            fade_step: 1.0 / policy.fade_ticks as f32,
            touched_last_tick: 0,
        }
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    pub fn policy(&self) -> VisualPolicy {
        self.policy
    }

    pub fn fade_step(&self) -> f32 {
        self.fade_step
    }

    pub fn cell(&self, loc: Loc) -> &CellVisual {
        let index = loc
            .grid_index(self.size)
            .unwrap_or_else(|| panic!("Visual indices {}, {} out of bounds", loc.row, loc.col));
        &self.cells[index]
    }

    pub fn cells_iter(&self) -> impl DoubleEndedIterator<Item = &CellVisual> + Clone {
        self.cells.iter()
    }

    pub fn fading_count(&self) -> usize {
        self.fading.len()
    }

    /// Cell visits made by the last `update`.
    pub fn touched_last_tick(&self) -> usize {
        self.touched_last_tick
    }

    /// Gives every initially living cell a color. Used once, at generation 0.
    pub fn seed(&mut self, cells: &WorldGridCells<LifeCell>, rand: &mut Random) {
        assert_eq!(cells.size(), self.size);
        for (index, cell) in cells.cells_iter().enumerate() {
            let visual = if cell.alive {
                CellVisual::alive(self.birth_color(rand), 0)
            } else {
                CellVisual::default()
            };
            self.cells[index] = visual;
        }
        self.fading.clear();
    }

    pub fn update(&mut self, generation: u64, changes: &[CellChange], rand: &mut Random) {
        let mut touched = self.advance_fades(generation);
        for change in changes {
            touched += 1;
            if change.born {
                let slot = self.birth_color(rand);
                self.cells[change.index] = CellVisual::alive(slot, generation);
            } else {
                self.on_death(change.index, generation);
            }
        }
        self.touched_last_tick = touched;
    }

    fn advance_fades(&mut self, generation: u64) -> usize {
        let fade_ticks = u64::from(self.policy.fade_ticks);
        let mut fading = mem::take(&mut self.fading);
        let touched = fading.len();
        fading.retain(|&index| {
            let visual = &mut self.cells[index];
            // Reborn since the fade started.
            if !visual.is_fading() {
                return false;
            }
            let ticks = visual.ticks_since_change(generation);
            if ticks >= fade_ticks {
                visual.color = DisplayColor::None;
                visual.fade_progress = 1.0;
                false
            } else {
                visual.fade_progress = ticks as f32 / fade_ticks as f32;
                true
            }
        });
        self.fading = fading;
        touched
    }

    fn on_death(&mut self, index: usize, generation: u64) {
        let visual = &mut self.cells[index];
        visual.changed_at = generation;
        match visual.slot() {
            Some(slot) if self.policy.death_fade => {
                visual.color = DisplayColor::Fading(slot);
                visual.fade_progress = 0.0;
                self.fading.push(index);
            }
            _ => {
                visual.color = DisplayColor::None;
                visual.fade_progress = 1.0;
            }
        }
    }

    fn birth_color(&self, rand: &mut Random) -> PaletteSlot {
        if self.policy.shifting_colors {
            let index = rand.next_in_range(0..self.policy.palette_len);
            PaletteSlot::from_index(index).unwrap_or(PaletteSlot::Color1)
        } else {
            PaletteSlot::Color1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(death_fade: bool, shifting_colors: bool, fade_ticks: u32) -> VisualPolicy {
        VisualPolicy {
            death_fade,
            shifting_colors,
            fade_ticks,
            palette_len: 3,
        }
    }

    fn born(index: usize) -> CellChange {
        CellChange { index, born: true }
    }

    fn died(index: usize) -> CellChange {
        CellChange { index, born: false }
    }

    fn tracker(policy: VisualPolicy) -> VisualStateTracker {
        VisualStateTracker::new(GridSize::new(4, 4), policy)
    }

    #[test]
    fn death_without_fade_snaps_to_background() {
        let mut tracker = tracker(policy(false, false, 1));
        let mut rand = Random::from_seed(1);
        tracker.update(1, &[born(5)], &mut rand);
        tracker.update(2, &[died(5)], &mut rand);
        let visual = tracker.cell(Loc::new(1, 1));
        assert_eq!(visual.color, DisplayColor::None);
        assert_eq!(visual.fade_progress, 1.0);
        assert_eq!(visual.changed_at, 2);
        assert_eq!(tracker.fading_count(), 0);
    }

    #[test]
    fn death_with_fade_ramps_over_fade_ticks() {
        let mut tracker = tracker(policy(true, false, 4));
        let mut rand = Random::from_seed(1);
        tracker.update(1, &[born(0)], &mut rand);
        tracker.update(2, &[died(0)], &mut rand);
        let loc = Loc::new(0, 0);
        assert_eq!(tracker.cell(loc).color, DisplayColor::Fading(PaletteSlot::Color1));
        assert_eq!(tracker.cell(loc).fade_progress, 0.0);

        for (generation, expected) in [(3, 0.25), (4, 0.5), (5, 0.75)] {
            tracker.update(generation, &[], &mut rand);
            assert_eq!(tracker.cell(loc).fade_progress, expected);
            assert!(tracker.cell(loc).is_fading());
        }
        tracker.update(6, &[], &mut rand);
        assert_eq!(tracker.cell(loc).color, DisplayColor::None);
        assert_eq!(tracker.cell(loc).fade_progress, 1.0);
        assert_eq!(tracker.fading_count(), 0);
    }

    #[test]
    fn birth_cancels_fade() {
        let mut tracker = tracker(policy(true, false, 3));
        let mut rand = Random::from_seed(1);
        tracker.update(1, &[born(2)], &mut rand);
        tracker.update(2, &[died(2)], &mut rand);
        tracker.update(3, &[born(2)], &mut rand);
        assert_eq!(
            tracker.cell(Loc::new(0, 2)).color,
            DisplayColor::Alive(PaletteSlot::Color1)
        );
        tracker.update(4, &[], &mut rand);
        assert_eq!(tracker.fading_count(), 0);
        assert_eq!(tracker.cell(Loc::new(0, 2)).fade_progress, 0.0);
    }

    #[test]
    fn fixed_color_for_every_birth() {
        let mut tracker = tracker(policy(true, false, 1));
        let mut rand = Random::from_seed(3);
        let births: Vec<CellChange> = (0..16).map(born).collect();
        tracker.update(1, &births, &mut rand);
        assert!(
            tracker
                .cells_iter()
                .all(|visual| visual.color == DisplayColor::Alive(PaletteSlot::Color1))
        );
    }

    #[test]
    fn shifting_colors_pick_from_the_palette() {
        let mut tracker = tracker(policy(true, true, 1));
        let mut rand = Random::from_seed(3);
        let births: Vec<CellChange> = (0..16).map(born).collect();
        tracker.update(1, &births, &mut rand);
        let slots: Vec<PaletteSlot> = tracker.cells_iter().filter_map(CellVisual::slot).collect();
        assert_eq!(slots.len(), 16);
        assert!(slots.iter().any(|&slot| slot != PaletteSlot::Color1));
    }

    #[test]
    fn shifting_colors_respect_short_palettes() {
        let mut tracker = tracker(VisualPolicy {
            palette_len: 1,
            ..policy(true, true, 1)
        });
        let mut rand = Random::from_seed(9);
        let births: Vec<CellChange> = (0..16).map(born).collect();
        tracker.update(1, &births, &mut rand);
        assert!(
            tracker
                .cells_iter()
                .all(|visual| visual.slot() == Some(PaletteSlot::Color1))
        );
    }

    #[test]
    fn work_is_bounded_by_changed_and_fading_cells() {
        let mut tracker = tracker(policy(true, false, 2));
        let mut rand = Random::from_seed(1);
        tracker.update(1, &[born(0), born(1), born(2)], &mut rand);
        assert_eq!(tracker.touched_last_tick(), 3);
        tracker.update(2, &[died(0)], &mut rand);
        assert_eq!(tracker.touched_last_tick(), 1);
        tracker.update(3, &[], &mut rand);
        assert_eq!(tracker.touched_last_tick(), 1);
        tracker.update(4, &[], &mut rand);
        assert_eq!(tracker.touched_last_tick(), 1);
        tracker.update(5, &[], &mut rand);
        assert_eq!(tracker.touched_last_tick(), 0);
    }

    #[test]
    fn interpolation_only_moves_fading_cells() {
        let fading = CellVisual {
            color: DisplayColor::Fading(PaletteSlot::Color2),
            fade_progress: 0.5,
            changed_at: 3,
        };
        assert_eq!(fading.interpolated(0.5, 0.5).fade_progress, 0.75);
        assert_eq!(fading.interpolated(1.0, 1.0).fade_progress, 1.0);

        let alive = CellVisual::alive(PaletteSlot::Color1, 3);
        assert_eq!(alive.interpolated(0.9, 1.0), alive);
        assert_eq!(alive.ticks_since_change(10), 7);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn out_of_range_visual_panics() {
        tracker(policy(true, false, 1)).cell(Loc::new(4, 0));
    }
}
