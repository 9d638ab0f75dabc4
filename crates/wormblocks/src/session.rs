//! # Session
//!
//! Headless tick driver owning the pools and the play area.
//!
//! ```text
//! Tick N:
//!   for each active worm:
//!     ├─ peek the cell ahead (fruit?)
//!     ├─ Worm::step()            collision check + follow shift
//!     └─ ate fruit → Fruit::despawn() + Worm::grow(1)
//! ```
//!
//! Blocks don't tick; they only take up cells until despawned.
//!
//! Rendering and input live outside; they read worms through
//! [`Session::worms`] and steer them through [`Session::worm_mut`].

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use wormblocks_core::{PoolId, Poolable, Pooler, TracingObserver};

use crate::block::{Block, BlockModule};
use crate::config::Config;
use crate::error::{GameError, GameResult};
use crate::fruit::Fruit;
use crate::grid::{Cell, Color, Direction};
use crate::spatial::{Occupant, PlayArea, SpatialIndex};
use crate::worm::{Segment, Worm};

/// What happened during one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Worms that moved.
    pub moved: usize,
    /// Worms whose move was refused.
    pub blocked: usize,
    /// Fruit eaten.
    pub eaten: usize,
}

/// Pools, play area and RNG for one game.
pub struct Session {
    config: Config,
    worms: Pooler<Worm>,
    tails: Pooler<Segment>,
    fruits: Pooler<Fruit>,
    blocks: Pooler<Block>,
    modules: Pooler<BlockModule>,
    area: PlayArea,
    rng: ChaCha8Rng,
    ticks: u64,
}

impl Session {
    /// Builds every pool up front from `config`.
    ///
    /// # Errors
    ///
    /// [`GameError::Config`] if the configuration is invalid.
    pub fn new(config: Config) -> GameResult<Self> {
        config.validate()?;

        let worms = Pooler::new(config.worm_pool, |id| Worm::new(id, &config))
            .with_observer(TracingObserver);
        let tails = Pooler::new(config.segment_pool, |id| Segment::new(id, &config))
            .with_observer(TracingObserver);
        let fruits = Pooler::new(config.fruit_pool, |id| Fruit::new(id, &config))
            .with_observer(TracingObserver);
        let blocks = Pooler::new(config.block_pool, |id| Block::new(id, &config))
            .with_observer(TracingObserver);
        let modules = Pooler::new(config.module_pool, |id| BlockModule::new(id, &config))
            .with_observer(TracingObserver);

        tracing::info!(
            worms = config.worm_pool,
            segments = config.segment_pool,
            fruits = config.fruit_pool,
            blocks = config.block_pool,
            modules = config.module_pool,
            "session pools allocated"
        );

        Ok(Self {
            area: PlayArea::new(config.bounds()),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
            worms,
            tails,
            fruits,
            blocks,
            modules,
            ticks: 0,
        })
    }

    /// The configuration this session was built from.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Ticks run so far.
    #[inline]
    #[must_use]
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    /// The worm pool.
    #[inline]
    #[must_use]
    pub const fn worms(&self) -> &Pooler<Worm> {
        &self.worms
    }

    /// The shared segment pool.
    #[inline]
    #[must_use]
    pub const fn tails(&self) -> &Pooler<Segment> {
        &self.tails
    }

    /// The fruit pool.
    #[inline]
    #[must_use]
    pub const fn fruits(&self) -> &Pooler<Fruit> {
        &self.fruits
    }

    /// The block pool.
    #[inline]
    #[must_use]
    pub const fn blocks(&self) -> &Pooler<Block> {
        &self.blocks
    }

    /// The shared block module pool.
    #[inline]
    #[must_use]
    pub const fn modules(&self) -> &Pooler<BlockModule> {
        &self.modules
    }

    /// The play area.
    #[inline]
    #[must_use]
    pub const fn area(&self) -> &PlayArea {
        &self.area
    }

    /// Looks a worm up by identity.
    #[inline]
    #[must_use]
    pub fn worm(&self, id: PoolId) -> Option<&Worm> {
        self.worms.get(id)
    }

    /// Looks a worm up mutably, e.g. to steer it.
    #[inline]
    pub fn worm_mut(&mut self, id: PoolId) -> Option<&mut Worm> {
        self.worms.get_mut(id)
    }

    /// Spawns a worm of `length` segments on `at`.
    ///
    /// Nothing stays borrowed on failure: segments go back to their pool
    /// and the worm slot is released.
    ///
    /// # Errors
    ///
    /// - [`GameError::CellOccupied`] unless `at` is a free cell
    /// - [`GameError::PoolExhausted`] if either pool is full
    /// - [`GameError::InvalidLength`] for a bad length
    pub fn spawn_worm(
        &mut self,
        at: Cell,
        length: usize,
        color: Color,
        direction: Direction,
    ) -> GameResult<PoolId> {
        if !self.area.is_free(at) {
            return Err(GameError::CellOccupied(at));
        }

        let pool = self.worms.label();
        let Some(worm) = self.worms.enable() else {
            return Err(GameError::PoolExhausted {
                pool,
                requested: 1,
            });
        };
        let id = worm.id();

        let spawned = worm.spawn(&mut self.tails, &mut self.area, at, length, color, direction);
        if let Err(err) = spawned {
            self.worms.disable(id);
            tracing::warn!(worm = %id, %err, "worm spawn failed");
            return Err(err);
        }
        Ok(id)
    }

    /// Tears a worm down and returns it to its pool.
    ///
    /// # Returns
    ///
    /// `false` if the worm wasn't enabled.
    pub fn despawn_worm(&mut self, id: PoolId) -> bool {
        match self.worms.get_mut(id) {
            Some(worm) if worm.is_enabled() => {
                worm.disable(&mut self.tails, &mut self.area);
                true
            }
            _ => false,
        }
    }

    /// Turns an active worm into a block.
    ///
    /// On failure the block slot is released and the worm keeps moving.
    ///
    /// # Errors
    ///
    /// - [`GameError::NotSpawned`] unless `worm` is active
    /// - [`GameError::PoolExhausted`] if the block or module pool is full
    pub fn spawn_block(&mut self, worm: PoolId) -> GameResult<PoolId> {
        let Self {
            worms,
            tails,
            blocks,
            modules,
            area,
            ..
        } = self;
        let Some(worm) = worms.get_mut(worm).filter(|worm| worm.is_active()) else {
            return Err(GameError::NotSpawned);
        };

        let pool = blocks.label();
        let Some(block) = blocks.enable() else {
            return Err(GameError::PoolExhausted {
                pool,
                requested: 1,
            });
        };
        let id = block.id();

        if let Err(err) = block.spawn(worm, modules, tails, area) {
            tracing::warn!(block = %id, worm = %worm.id(), %err, "block spawn failed");
            return Err(err);
        }
        Ok(id)
    }

    /// Tears a block down and returns it to its pool.
    ///
    /// # Returns
    ///
    /// `false` if the block wasn't enabled.
    pub fn despawn_block(&mut self, id: PoolId) -> bool {
        match self.blocks.get_mut(id) {
            Some(block) if block.is_enabled() => {
                block.disable(&mut self.modules, &mut self.area);
                true
            }
            _ => false,
        }
    }

    /// Spawns a fruit on a random free cell.
    ///
    /// # Returns
    ///
    /// The fruit's ID, or `None` if no cell is free.
    ///
    /// # Errors
    ///
    /// [`GameError::PoolExhausted`] if the fruit pool is full.
    pub fn spawn_fruit(&mut self) -> GameResult<Option<PoolId>> {
        let pool = self.fruits.label();
        let Some(fruit) = self.fruits.enable() else {
            return Err(GameError::PoolExhausted {
                pool,
                requested: 1,
            });
        };
        Ok(fruit.spawn(&mut self.area, &mut self.rng).map(|_| fruit.id()))
    }

    /// Advances every active worm by one cell.
    pub fn tick(&mut self) -> TickReport {
        let Self {
            worms,
            tails,
            fruits,
            area,
            ..
        } = self;
        let mut report = TickReport::default();

        for worm in worms.iter_enabled_mut() {
            if !worm.is_active() {
                continue;
            }

            let ahead = worm.head().target().offset(worm.direction().delta());
            let food = match area.occupant(ahead) {
                Some(Occupant::Fruit(id)) => Some(id),
                _ => None,
            };

            match worm.step(tails, area) {
                Ok(true) => report.moved += 1,
                Ok(false) => {
                    report.blocked += 1;
                    continue;
                }
                Err(err) => {
                    tracing::warn!(worm = %worm.id(), %err, "worm step failed");
                    continue;
                }
            }

            if let Some(fruit) = food.and_then(|id| fruits.get_mut(id)) {
                fruit.despawn(area);
                report.eaten += 1;
                if worm.len() < worm.max_length() {
                    if let Err(err) = worm.grow(tails, 1) {
                        tracing::warn!(worm = %worm.id(), %err, "worm could not grow");
                    }
                }
            }
        }

        self.ticks += 1;
        report
    }

    /// Level restart: every worm, block and fruit goes back to its pool.
    pub fn reset(&mut self) {
        let Self {
            worms,
            tails,
            fruits,
            blocks,
            modules,
            area,
            ..
        } = self;
        worms.reset_with(|worm| worm.disable(tails, area));
        blocks.reset_with(|block| block.disable(modules, area));
        fruits.reset_with(|fruit| fruit.despawn(area));
        tails.reset();
        modules.reset();
        area.clear();
        tracing::info!(ticks = self.ticks, "session reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(width: u32, height: u32) -> Config {
        Config {
            width,
            height,
            ..Config::default()
        }
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let result = Session::new(Config {
            worm_pool: 0,
            ..Config::default()
        });
        assert!(matches!(result, Err(GameError::Config(_))));
    }

    #[test]
    fn test_spawn_and_despawn_worm() {
        let mut session = Session::new(config(10, 5)).unwrap();
        let id = session
            .spawn_worm(Cell::new(2, 2), 3, Color::GREEN, Direction::Right)
            .unwrap();

        assert_eq!(session.worm(id).map(Worm::len), Some(3));
        assert_eq!(session.tails().enabled_count(), 2);
        assert_eq!(session.area().occupied_count(), 1);

        assert!(session.despawn_worm(id));
        assert!(!session.despawn_worm(id));
        assert_eq!(session.worms().enabled_count(), 0);
        assert_eq!(session.tails().enabled_count(), 0);
        assert_eq!(session.area().occupied_count(), 0);
    }

    #[test]
    fn test_spawn_worm_rejects_taken_cell() {
        let mut session = Session::new(config(2, 1)).unwrap();
        let fruit = session.spawn_fruit().unwrap().unwrap();
        let cell = session.fruits().get(fruit).unwrap().position();

        let err = session
            .spawn_worm(cell, 1, Color::GREEN, Direction::Up)
            .unwrap_err();
        assert!(matches!(err, GameError::CellOccupied(at) if at == cell));
        assert_eq!(session.worms().enabled_count(), 0);
        assert!(session.fruits().get(fruit).unwrap().is_enabled());
        assert_eq!(session.area().occupant(cell), Some(Occupant::Fruit(fruit)));

        // The other cell takes one worm, then it is taken too.
        let other = Cell::new(1 - cell.x, 0);
        session
            .spawn_worm(other, 1, Color::GREEN, Direction::Up)
            .unwrap();
        assert!(matches!(
            session.spawn_worm(other, 1, Color::RED, Direction::Up),
            Err(GameError::CellOccupied(_))
        ));
        assert!(matches!(
            session.spawn_worm(Cell::new(5, 5), 1, Color::RED, Direction::Up),
            Err(GameError::CellOccupied(_))
        ));
        assert_eq!(session.worms().enabled_count(), 1);
        assert_eq!(session.tails().enabled_count(), 0);
    }

    #[test]
    fn test_worm_pool_exhausted() {
        let mut session = Session::new(Config {
            worm_pool: 1,
            ..config(10, 5)
        })
        .unwrap();
        session
            .spawn_worm(Cell::new(0, 0), 1, Color::WHITE, Direction::Down)
            .unwrap();

        let err = session
            .spawn_worm(Cell::new(5, 0), 1, Color::WHITE, Direction::Down)
            .unwrap_err();
        assert!(matches!(err, GameError::PoolExhausted { pool: "Worm", requested: 1 }));
    }

    #[test]
    fn test_failed_spawn_leaves_nothing_borrowed() {
        let mut session = Session::new(Config {
            segment_pool: 2,
            ..config(10, 5)
        })
        .unwrap();

        let err = session
            .spawn_worm(Cell::new(4, 4), 5, Color::RED, Direction::Up)
            .unwrap_err();
        assert!(matches!(err, GameError::PoolExhausted { .. }));
        assert_eq!(session.worms().enabled_count(), 0);
        assert_eq!(session.tails().enabled_count(), 0);
        assert_eq!(session.area().occupied_count(), 0);
    }

    #[test]
    fn test_tick_eats_fruit_and_grows() {
        let mut session = Session::new(config(3, 1)).unwrap();
        let id = session
            .spawn_worm(Cell::new(0, 0), 1, Color::GREEN, Direction::Right)
            .unwrap();
        assert!(session.spawn_fruit().unwrap().is_some());

        let eaten: usize = (0..2).map(|_| session.tick().eaten).sum();
        assert_eq!(eaten, 1);
        assert_eq!(session.worm(id).map(Worm::len), Some(2));
        assert_eq!(session.fruits().enabled_count(), 0);
        assert_eq!(session.tails().enabled_count(), 1);
        assert_eq!(session.ticks(), 2);
    }

    #[test]
    fn test_tick_reports_blocked() {
        let mut session = Session::new(config(4, 4)).unwrap();
        let id = session
            .spawn_worm(Cell::new(0, 0), 2, Color::GREEN, Direction::Up)
            .unwrap();

        assert_eq!(
            session.tick(),
            TickReport {
                moved: 0,
                blocked: 1,
                eaten: 0
            }
        );

        if let Some(worm) = session.worm_mut(id) {
            worm.set_direction(Direction::Right);
        }
        assert_eq!(session.tick().moved, 1);
        assert_eq!(session.worm(id).map(|w| w.head().target()), Some(Cell::new(1, 0)));
    }

    #[test]
    fn test_fruit_pool_exhausted() {
        let mut session = Session::new(Config {
            fruit_pool: 1,
            ..config(4, 4)
        })
        .unwrap();
        assert!(session.spawn_fruit().unwrap().is_some());
        assert!(matches!(
            session.spawn_fruit(),
            Err(GameError::PoolExhausted { pool: "Fruit", .. })
        ));
    }

    #[test]
    fn test_spawn_and_despawn_block() {
        let mut session = Session::new(config(10, 5)).unwrap();
        let worm = session
            .spawn_worm(Cell::new(2, 2), 3, Color::GREEN, Direction::Right)
            .unwrap();
        session.tick();
        session.tick();

        let block = session.spawn_block(worm).unwrap();
        assert_eq!(session.worms().enabled_count(), 0);
        assert_eq!(session.tails().enabled_count(), 0);
        assert_eq!(session.blocks().get(block).map(Block::len), Some(3));
        assert_eq!(session.modules().enabled_count(), 3);
        assert_eq!(session.area().occupied_by(Occupant::Block(block)), 3);

        // The worm is gone, so it can't be turned twice.
        assert!(matches!(session.spawn_block(worm), Err(GameError::NotSpawned)));

        assert!(session.despawn_block(block));
        assert!(!session.despawn_block(block));
        assert_eq!(session.blocks().enabled_count(), 0);
        assert_eq!(session.modules().enabled_count(), 0);
        assert_eq!(session.area().occupied_count(), 0);
    }

    #[test]
    fn test_block_stops_worm() {
        let mut session = Session::new(config(6, 1)).unwrap();
        let stone = session
            .spawn_worm(Cell::new(3, 0), 1, Color::WHITE, Direction::Left)
            .unwrap();
        session.spawn_block(stone).unwrap();
        session
            .spawn_worm(Cell::new(0, 0), 1, Color::GREEN, Direction::Right)
            .unwrap();

        let moved: usize = (0..4).map(|_| session.tick().moved).sum();
        assert_eq!(moved, 2);
        assert_eq!(session.tick().blocked, 1);
    }

    #[test]
    fn test_failed_block_keeps_worm() {
        let mut session = Session::new(Config {
            module_pool: 1,
            ..config(10, 5)
        })
        .unwrap();
        let worm = session
            .spawn_worm(Cell::new(2, 2), 2, Color::GREEN, Direction::Right)
            .unwrap();
        session.tick();

        let err = session.spawn_block(worm).unwrap_err();
        assert!(matches!(err, GameError::PoolExhausted { pool: "BlockModule", .. }));
        assert_eq!(session.blocks().enabled_count(), 0);
        assert_eq!(session.modules().enabled_count(), 0);
        assert!(session.worm(worm).is_some_and(Worm::is_active));
        assert_eq!(session.tick().moved, 1);
    }

    #[test]
    fn test_reset_returns_everything() {
        let mut session = Session::new(config(10, 10)).unwrap();
        for x in 0..3 {
            session
                .spawn_worm(Cell::new(x * 3, 5), 4, Color::RED, Direction::Up)
                .unwrap();
        }
        session.spawn_fruit().unwrap();
        session.tick();
        session.spawn_block(PoolId::new(0)).unwrap();

        session.reset();
        assert_eq!(session.blocks().enabled_count(), 0);
        assert_eq!(session.modules().enabled_count(), 0);
        assert_eq!(session.worms().enabled_count(), 0);
        assert_eq!(session.tails().enabled_count(), 0);
        assert_eq!(session.fruits().enabled_count(), 0);
        assert_eq!(session.area().occupied_count(), 0);

        assert!(session
            .spawn_worm(Cell::new(1, 1), 4, Color::WHITE, Direction::Down)
            .is_ok());
    }
}
