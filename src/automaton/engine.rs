//! The double-buffered 3D automaton engine
//!
//! Two equally sized padded grids are allocated once. `active` selects the
//! readable buffer; a tick reads only from it, writes every interior cell of
//! the other buffer, then flips `active`. The flip is the only point where the
//! roles change, so a [`Snapshot`] never observes a half-written generation.

use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use super::grid::{Cell, Grid};
use super::rule::Rule;
use super::snapshot::Snapshot;
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::simulation::clock::FixedStepClock;
use crate::simulation::traits::Simulation;

/// 3D life engine with decaying cells and a fixed-step clock
pub struct AutomatonEngine {
    worlds: [Grid; 2],
    active: usize,
    rule: Rule,
    clock: FixedStepClock,
    rng: StdRng,
    seed_radius: f32,
    seed_density: f64,
    parallel: bool,
    generation: u64,
}

impl AutomatonEngine {
    /// Create an engine of side `size` with the default configuration
    pub fn new(size: usize) -> Result<Self, EngineError> {
        Self::with_config(&EngineConfig::default().with_size(size))
    }

    /// Create an engine from a full configuration and seed it
    pub fn with_config(config: &EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;

        let current = Grid::new(config.size)?;
        let next = current.clone();

        let mut clock = FixedStepClock::new(config.ticks_per_second)?;
        clock.set_max_frame_delta(config.max_frame_delta)?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let mut engine = Self {
            worlds: [current, next],
            active: 0,
            rule: config.rule,
            clock,
            rng,
            seed_radius: config.seed_radius,
            seed_density: config.seed_density,
            parallel: config.parallel,
            generation: 0,
        };

        info!(
            "Created {}^3 engine with rule {} at {} ticks/s",
            config.size, config.rule, config.ticks_per_second
        );

        engine.restart();
        Ok(engine)
    }

    /// Interior side length
    pub fn size(&self) -> usize {
        self.worlds[0].size()
    }

    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    /// Ticks since the last restart
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Index of the readable buffer (0 or 1)
    pub fn active_buffer(&self) -> usize {
        self.active
    }

    pub fn clock(&self) -> &FixedStepClock {
        &self.clock
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    pub fn set_parallel(&mut self, parallel: bool) {
        self.parallel = parallel;
    }

    /// Replace the rule and reseed
    ///
    /// The old grid is discarded because its states may not fit the new
    /// `0..=max_age` range.
    pub fn set_rule(&mut self, rule: Rule) {
        info!("Rule changed from {} to {}", self.rule, rule);
        self.rule = rule;
        self.restart();
    }

    /// Set the tick rate; the accumulated budget is kept
    pub fn set_speed(&mut self, ticks_per_second: f32) -> Result<(), EngineError> {
        self.clock.set_rate(ticks_per_second)?;
        debug!("Speed set to {} ticks/s", ticks_per_second);
        Ok(())
    }

    pub fn play(&mut self) {
        if !self.clock.is_running() {
            debug!("Playing at generation {}", self.generation);
        }
        self.clock.set_running(true);
    }

    pub fn pause(&mut self) {
        if self.clock.is_running() {
            debug!("Paused at generation {}", self.generation);
        }
        self.clock.set_running(false);
    }

    pub fn is_running(&self) -> bool {
        self.clock.is_running()
    }

    /// Reseed a random sphere around the center and run one tick
    ///
    /// Cells within `seed_radius` of the center are alive with probability
    /// `seed_density`; everything else is dead. The tick populates the
    /// neighbour counts before the first snapshot is taken.
    pub fn restart(&mut self) {
        self.active = 0;
        self.generation = 0;

        let alive = self.rule.max_age();
        let size = self.size();
        let center = (size as f32 - 1.0) / 2.0;
        let radius_sq = self.seed_radius * self.seed_radius;

        let [current, next] = &mut self.worlds;
        current.clear();
        next.clear();

        let mut seeded = 0usize;
        for z in 0..size {
            for y in 0..size {
                for x in 0..size {
                    let dx = x as f32 - center;
                    let dy = y as f32 - center;
                    let dz = z as f32 - center;
                    if dx * dx + dy * dy + dz * dz > radius_sq {
                        continue;
                    }
                    if self.rng.random_bool(self.seed_density) {
                        let idx = current.padded_index(x + 1, y + 1, z + 1);
                        current.cells[idx].state = alive;
                        seeded += 1;
                    }
                }
            }
        }

        info!("Restarted with {} seeded cells", seeded);
        self.tick();
    }

    /// Feed one frame's elapsed time and run however many ticks are due
    ///
    /// Returns the number of ticks executed.
    pub fn advance(&mut self, delta_seconds: f32) -> u32 {
        let ticks = self.clock.advance(delta_seconds);
        for _ in 0..ticks {
            self.tick();
        }
        ticks
    }

    /// One discrete generation: compute the next buffer, then flip
    pub fn tick(&mut self) {
        let rule = self.rule;
        let [a, b] = &mut self.worlds;
        let (current, next) = if self.active == 0 {
            (&*a, b)
        } else {
            (&*b, a)
        };

        let size = current.size();
        let slab_len = current.slab_len();

        if self.parallel {
            next.cells
                .par_chunks_mut(slab_len)
                .enumerate()
                .skip(1)
                .take(size)
                .for_each(|(pz, slab)| step_slab(current, &rule, pz, slab));
        } else {
            next.cells
                .chunks_mut(slab_len)
                .enumerate()
                .skip(1)
                .take(size)
                .for_each(|(pz, slab)| step_slab(current, &rule, pz, slab));
        }

        self.active ^= 1;
        self.generation += 1;

        trace!("Tick {} complete", self.generation);
    }

    /// Read-only view of the current generation
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot::new(&self.worlds[self.active], &self.rule, self.generation)
    }

    /// Write a state into the current buffer
    ///
    /// Used to inject patterns between ticks. The neighbour count of the
    /// written cell is reset to 0.
    pub fn set_cell(&mut self, x: usize, y: usize, z: usize, state: u8) -> Result<(), EngineError> {
        let max_age = self.rule.max_age();
        if state > max_age {
            return Err(EngineError::StateOutOfRange { state, max_age });
        }
        self.worlds[self.active].set_state(x, y, z, state)
    }

    /// Kill every cell in the current buffer
    pub fn clear(&mut self) {
        self.worlds[self.active].clear();
    }

    /// True if every border cell of both buffers is dead
    pub fn borders_dead(&self) -> bool {
        self.worlds.iter().all(|grid| {
            let stride = grid.stride();
            (0..stride).all(|pz| {
                (0..stride).all(|py| {
                    (0..stride).all(|px| {
                        !grid.is_border(px, py, pz)
                            || grid.cells[grid.padded_index(px, py, pz)].state == 0
                    })
                })
            })
        })
    }
}

/// Compute one padded z-slab of the next generation
///
/// Reads only from `current`; writes only the interior rows of `slab`.
fn step_slab(current: &Grid, rule: &Rule, pz: usize, slab: &mut [Cell]) {
    let size = current.size();
    let stride = current.stride();
    let alive = rule.max_age();
    let base = pz * stride * stride;

    for py in 1..=size {
        for px in 1..=size {
            let local = py * stride + px;
            let idx = base + local;
            let last = current.cells[idx].state;
            let neighbours = current.count_alive_neighbours(idx, alive);
            slab[local] = Cell {
                state: rule.next_state(last, neighbours),
                neighbours,
            };
        }
    }
}

impl Simulation for AutomatonEngine {
    fn update(&mut self, delta_time: f32) {
        self.advance(delta_time);
    }

    fn name(&self) -> &str {
        "3D Life"
    }

    fn is_running(&self) -> bool {
        self.clock.is_running()
    }

    fn set_running(&mut self, running: bool) {
        if running {
            self.play();
        } else {
            self.pause();
        }
    }

    fn reset(&mut self) {
        self.restart();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::rule::NeighbourSet;

    fn seeded(size: usize, seed: u64) -> AutomatonEngine {
        let config = EngineConfig::default()
            .with_size(size)
            .with_seed(seed)
            .with_speed(16.0);
        AutomatonEngine::with_config(&config).unwrap()
    }

    /// Engine with an empty current buffer under `rule`, generation 0
    fn blank(size: usize, rule: Rule) -> AutomatonEngine {
        let config = EngineConfig::default()
            .with_size(size)
            .with_seed(1)
            .with_rule(rule)
            .with_seed_radius(0.0)
            .with_seed_density(0.0);
        let mut engine = AutomatonEngine::with_config(&config).unwrap();
        engine.clear();
        engine.generation = 0;
        engine
    }

    fn states(engine: &AutomatonEngine) -> Vec<u8> {
        engine.snapshot().cells().map(|(_, c)| c.state).collect()
    }

    #[test]
    fn test_new_rejects_zero_size() {
        assert!(matches!(
            AutomatonEngine::new(0),
            Err(EngineError::ZeroSize)
        ));
    }

    #[test]
    fn test_restart_runs_one_tick() {
        let engine = seeded(16, 7);
        assert_eq!(engine.generation(), 1);
        assert_eq!(engine.active_buffer(), 1);
        assert!(engine.is_running());
    }

    #[test]
    fn test_seed_confined_to_radius() {
        // No births and every count survives, so the seed tick leaves it unchanged
        let rule = Rule::new(
            NeighbourSet::from_range(0..=26).unwrap(),
            NeighbourSet::EMPTY,
            1,
        )
        .unwrap();
        let config = EngineConfig::default()
            .with_size(16)
            .with_seed(3)
            .with_rule(rule)
            .with_seed_density(1.0);
        let engine = AutomatonEngine::with_config(&config).unwrap();

        let center = 7.5f32;
        let mut alive = 0;
        for ((x, y, z), cell) in engine.snapshot().cells() {
            let d = ((x as f32 - center).powi(2)
                + (y as f32 - center).powi(2)
                + (z as f32 - center).powi(2))
            .sqrt();
            if cell.state == 1 {
                alive += 1;
                assert!(d <= 3.0);
            } else {
                assert!(d > 3.0);
            }
        }
        assert!(alive > 0);
    }

    #[test]
    fn test_same_seed_same_history() {
        let mut a = seeded(12, 42);
        let mut b = seeded(12, 42);
        assert_eq!(states(&a), states(&b));

        for _ in 0..10 {
            a.advance(1.0 / 16.0);
            b.advance(1.0 / 16.0);
        }
        assert_eq!(a.snapshot().raw(), b.snapshot().raw());
    }

    #[test]
    fn test_parallel_matches_serial() {
        let mut a = seeded(20, 5);
        let mut b = seeded(20, 5);
        a.set_parallel(true);
        b.set_parallel(false);
        for _ in 0..8 {
            a.tick();
            b.tick();
            assert_eq!(a.snapshot().raw(), b.snapshot().raw());
        }
    }

    #[test]
    fn test_states_stay_in_range_and_borders_dead() {
        let mut engine = seeded(16, 11);
        let max_age = engine.rule().max_age();
        for _ in 0..30 {
            engine.tick();
            assert!(engine.borders_dead());
            assert!(engine
                .snapshot()
                .raw()
                .iter()
                .all(|c| c.state <= max_age));
        }
    }

    #[test]
    fn test_single_cell_dies_alone() {
        let mut engine = blank(5, Rule::classic());
        engine.set_cell(2, 2, 2, 1).unwrap();
        engine.tick();

        let snapshot = engine.snapshot();
        assert!(snapshot.cells().all(|(_, c)| c.state == 0));
        assert_eq!(snapshot.cell(2, 2, 2).map(|c| c.neighbours), Some(0));
    }

    #[test]
    fn test_full_block_center_sees_26() {
        let mut engine = blank(3, Rule::classic());
        for z in 0..3 {
            for y in 0..3 {
                for x in 0..3 {
                    engine.set_cell(x, y, z, 1).unwrap();
                }
            }
        }
        engine.tick();

        let snapshot = engine.snapshot();
        assert_eq!(snapshot.cell(1, 1, 1).map(|c| c.neighbours), Some(26));
        // Corners see 7, edges 11, face centers 17
        assert_eq!(snapshot.cell(0, 0, 0).map(|c| c.neighbours), Some(7));
        assert_eq!(snapshot.cell(1, 0, 0).map(|c| c.neighbours), Some(11));
        assert_eq!(snapshot.cell(1, 1, 0).map(|c| c.neighbours), Some(17));
        assert_eq!(snapshot.population(), 0);
    }

    #[test]
    fn test_decaying_cell_counts_down() {
        let rule = Rule::new(
            NeighbourSet::from_range(0..=26).unwrap(),
            NeighbourSet::from_range(0..=26).unwrap(),
            5,
        )
        .unwrap();
        let mut engine = blank(3, rule);
        engine.set_cell(1, 1, 1, 3).unwrap();
        engine.tick();
        assert_eq!(engine.snapshot().cell(1, 1, 1).map(|c| c.state), Some(2));
        engine.tick();
        assert_eq!(engine.snapshot().cell(1, 1, 1).map(|c| c.state), Some(1));
        engine.tick();
        assert_eq!(engine.snapshot().cell(1, 1, 1).map(|c| c.state), Some(0));
    }

    #[test]
    fn test_alive_cell_starts_decay() {
        let rule = "4/27-27/6".parse::<Rule>();
        assert!(rule.is_err());

        let rule = Rule::new(
            NeighbourSet::from_counts([4]).unwrap(),
            NeighbourSet::EMPTY,
            5,
        )
        .unwrap();
        let mut engine = blank(4, rule);
        engine.set_cell(1, 1, 1, 5).unwrap();
        engine.tick();
        assert_eq!(engine.snapshot().cell(1, 1, 1).map(|c| c.state), Some(4));
    }

    #[test]
    fn test_ticks_do_not_wrap_around_edges() {
        // A cell on the low face would be born if the grid wrapped
        let rule = Rule::new(
            NeighbourSet::EMPTY,
            NeighbourSet::from_counts([1]).unwrap(),
            1,
        )
        .unwrap();
        let mut engine = blank(5, rule);
        engine.set_cell(4, 2, 2, 1).unwrap();
        engine.tick();
        let snapshot = engine.snapshot();
        assert_eq!(snapshot.cell(0, 2, 2).map(|c| c.state), Some(0));
        assert_eq!(snapshot.cell(3, 2, 2).map(|c| c.state), Some(1));
        assert!(engine.borders_dead());
    }

    #[test]
    fn test_paused_advance_changes_nothing() {
        let mut engine = seeded(10, 9);
        engine.pause();
        let before = engine.snapshot().raw().to_vec();
        let active = engine.active_buffer();

        for dt in [0.0, 0.01, 0.5, 3.0, 1.0 / 16.0] {
            assert_eq!(engine.advance(dt), 0);
        }

        assert_eq!(engine.snapshot().raw(), &before[..]);
        assert_eq!(engine.active_buffer(), active);
        assert_eq!(engine.generation(), 1);
    }

    #[test]
    fn test_pause_drops_owed_ticks() {
        let mut engine = seeded(8, 1);
        engine.pause();
        engine.advance(0.75);
        engine.play();
        assert_eq!(engine.advance(0.0), 0);
        assert_eq!(engine.generation(), 1);
    }

    #[test]
    fn test_rate_decoupling() {
        let mut a = seeded(10, 21);
        let mut b = seeded(10, 21);

        let ta = a.advance(0.5);
        let tb: u32 = (0..4).map(|_| b.advance(0.125)).sum();

        assert_eq!(ta, 8);
        assert_eq!(ta, tb);
        assert_eq!(a.snapshot().raw(), b.snapshot().raw());

        let mut c = seeded(10, 21);
        let tc: u32 = (0..5).map(|_| c.advance(0.1)).sum();
        assert!((tc as i64 - ta as i64).abs() <= 1);
    }

    #[test]
    fn test_long_stall_is_clamped() {
        let mut engine = seeded(6, 2);
        assert_eq!(engine.advance(120.0), 16);
        assert_eq!(engine.generation(), 17);
    }

    #[test]
    fn test_set_rule_restarts() {
        let mut engine = seeded(10, 4);
        for _ in 0..5 {
            engine.tick();
        }
        let rule: Rule = "4/4/3".parse().unwrap();
        engine.set_rule(rule);

        assert_eq!(engine.rule(), &rule);
        assert_eq!(engine.generation(), 1);
        assert!(engine.snapshot().raw().iter().all(|c| c.state <= 2));
    }

    #[test]
    fn test_set_speed_validation() {
        let mut engine = seeded(4, 0);
        assert!(engine.set_speed(0.0).is_err());
        assert!(engine.set_speed(-1.0).is_err());
        engine.set_speed(4.0).unwrap();
        assert_eq!(engine.advance(0.5), 2);
    }

    #[test]
    fn test_set_cell_validation() {
        let mut engine = blank(4, Rule::classic());
        assert_eq!(
            engine.set_cell(0, 0, 0, 2),
            Err(EngineError::StateOutOfRange {
                state: 2,
                max_age: 1
            })
        );
        assert!(matches!(
            engine.set_cell(4, 0, 0, 1),
            Err(EngineError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_simulation_trait() {
        let mut engine = seeded(6, 8);
        let sim: &mut dyn Simulation = &mut engine;
        assert_eq!(sim.name(), "3D Life");
        sim.set_running(false);
        assert!(!sim.is_running());
        sim.update(1.0);
        sim.set_running(true);
        sim.update(0.0625);
        sim.reset();
        assert_eq!(engine.generation(), 1);
    }
}
