use crate::config::ConfigSnapshot;
use crate::error::ConfigError;
use crate::life::{step_generation, CellChange, InitialPattern, LifeCell};
use crate::palette::{Palette, PRESETS};
use crate::render::cell_rgba;
use crate::scheduler::TickScheduler;
use crate::visual::{CellVisual, VisualPolicy, VisualStateTracker};
use log::{debug, info};
use std::time::Duration;
use world_grid::{GridSize, Loc, Random, World, WorldGrid};

/// One display session: the grid, its visual state and the tick clock, all driven from a
/// single frame callback.
#[derive(Debug)]
pub struct LifeEngine {
    config: ConfigSnapshot,
    grid: WorldGrid<LifeCell>,
    visuals: VisualStateTracker,
    scheduler: TickScheduler,
    rand: Random,
    changes: Vec<CellChange>,
}

impl LifeEngine {
    pub fn new(
        mut config: ConfigSnapshot,
        size: GridSize,
        pattern: &InitialPattern,
        mut rand: Random,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        pattern.validate()?;
        if config.random_color_preset
            && let Some(preset) = rand.choose(PRESETS)
        {
            info!("Using random color preset {:?}", preset.title);
            config.palette = preset.palette();
        }

        let mut grid = WorldGrid::new(size, config.edge_policy);
        pattern.apply(&mut grid.cells, &mut rand);

        let mut visuals = VisualStateTracker::new(
            size,
            VisualPolicy {
                death_fade: config.death_fade,
                shifting_colors: config.shifting_colors,
                fade_ticks: config.fade_ticks,
                palette_len: config.palette.len(),
            },
        );
        visuals.seed(&grid.cells, &mut rand);

        info!(
            "Life grid {}x{} ({}px squares), ticking every {:?}, {:?} edges",
            size.width, size.height, config.square_size, config.tick_interval, config.edge_policy
        );
        Ok(Self {
            scheduler: TickScheduler::new(config.tick_interval),
            config,
            grid,
            visuals,
            rand,
            changes: Vec::new(),
        })
    }

    /// Session sized to a display area and seeded randomly at the configured density.
    pub fn for_display(
        config: ConfigSnapshot,
        area_width: u32,
        area_height: u32,
        rand: Random,
    ) -> Result<Self, ConfigError> {
        let size = config.grid_size(area_width, area_height)?;
        let pattern = InitialPattern::Random {
            density: config.initial_density,
        };
        Self::new(config, size, &pattern, rand)
    }

    /// Feeds one frame's elapsed time to the scheduler, stepping at most once.
    pub fn advance(&mut self, delta: Duration) -> bool {
        let ticked = self.scheduler.advance(delta);
        if ticked {
            self.step();
        }
        ticked
    }

    pub fn advance_to(&mut self, timestamp: Duration) -> bool {
        let ticked = self.scheduler.advance_to(timestamp);
        if ticked {
            self.step();
        }
        ticked
    }

    /// One generation plus one visual pass, regardless of the clock.
    pub fn step(&mut self) {
        step_generation(&mut self.grid, &mut self.changes);
        let generation = self.grid.generation();
        self.visuals.update(generation, &self.changes, &mut self.rand);
        debug!(
            "Generation {}: {} changed, {} fading",
            generation,
            self.changes.len(),
            self.visuals.fading_count()
        );
    }

    pub fn config(&self) -> &ConfigSnapshot {
        &self.config
    }

    /// The palette in use, which differs from the configured one under a random preset.
    pub fn palette(&self) -> &Palette {
        &self.config.palette
    }

    pub fn size(&self) -> GridSize {
        self.grid.size()
    }

    pub fn generation(&self) -> u64 {
        self.grid.generation()
    }

    pub fn grid(&self) -> &WorldGrid<LifeCell> {
        &self.grid
    }

    pub fn visuals(&self) -> &VisualStateTracker {
        &self.visuals
    }

    pub fn scheduler(&self) -> &TickScheduler {
        &self.scheduler
    }

    pub fn last_changes(&self) -> &[CellChange] {
        &self.changes
    }

    pub fn is_alive(&self, x: u32, y: u32) -> bool {
        self.grid.cells[Loc::from_xy(x, y)].alive
    }

    pub fn neighbor_count(&self, x: u32, y: u32) -> u8 {
        self.grid.neighbor_count(Loc::from_xy(x, y))
    }

    /// Visual state of a cell as of now, with fades advanced by the time since the last
    /// tick.
    pub fn cell_visual(&self, x: u32, y: u32) -> CellVisual {
        self.visuals
            .cell(Loc::from_xy(x, y))
            .interpolated(self.scheduler.phase(), self.visuals.fade_step())
    }

    pub fn cell_rgba(&self, x: u32, y: u32) -> [u8; 4] {
        cell_rgba(
            &self.cell_visual(x, y),
            &self.config.palette,
            self.config.background,
        )
    }
}

impl World for LifeEngine {
    fn size(&self) -> GridSize {
        self.grid.size()
    }

    fn update(&mut self, elapsed: Duration) -> bool {
        self.advance_to(elapsed)
    }

    fn cell_colors_rgba(&self) -> impl Iterator<Item = [u8; 4]> + '_ {
        let phase = self.scheduler.phase();
        let fade_step = self.visuals.fade_step();
        self.visuals.cells_iter().map(move |visual| {
            cell_rgba(
                &visual.interpolated(phase, fade_step),
                &self.config.palette,
                self.config.background,
            )
        })
    }
}
