//! # Segment Chain
//!
//! The worm body is one ordered sequence of segment IDs, head-adjacent
//! first. "Next" is simply the following entry, so there is no linked list
//! to keep in sync with a positional index.
//!
//! ```text
//! index:   0      1      2      3
//!        [head] [body0] [body1] [body2]
//!          │       └──── Pooler<Segment> (by PoolId)
//!          └─ embedded in the Worm, which lives in Pooler<Worm>
//! ```

use wormblocks_core::{BoundsError, PoolId, Poolable, Pooler};

use super::segment::Segment;
use crate::config::Config;
use crate::error::{GameError, GameResult};
use crate::grid::{Cell, Color, Direction};
use crate::spatial::{Collision, Occupant, SpatialIndex};

/// Lifecycle of a worm slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WormState {
    /// Enabled by its pool but no chain built yet.
    Unspawned,
    /// Chain built; the worm moves.
    Active,
    /// Back in its pool.
    Disabled,
}

/// A pooled worm.
///
/// The head is embedded and shares the worm's pool identity. Body segments
/// are on loan from a `Pooler<Segment>` and are given back through
/// [`Worm::disable`], the only teardown entry point. Flipping the pool flag
/// of a live worm (`Poolable::disable`, `Pooler::disable`) is a contract
/// violation: it trips a debug assertion, and the worm keeps reporting
/// [`WormState::Active`] until its chain is released.
#[derive(Clone, Debug)]
pub struct Worm {
    head: Segment,
    /// Borrowed body segments, head-adjacent first. Capacity is reserved up
    /// front so growth never allocates.
    body: Vec<PoolId>,
    max_length: usize,
    direction: Direction,
    noclip: bool,
    spawned: bool,
}

impl Worm {
    /// Builds a disabled worm slot.
    #[must_use]
    pub fn new(id: PoolId, config: &Config) -> Self {
        let max_length = config.max_worm_length.max(1);
        Self {
            head: Segment::new(id, config),
            body: Vec::with_capacity(max_length - 1),
            max_length,
            direction: Direction::default(),
            noclip: config.noclip,
            spawned: false,
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> WormState {
        match (self.spawned, self.is_enabled()) {
            (true, _) => WormState::Active,
            (false, true) => WormState::Unspawned,
            (false, false) => WormState::Disabled,
        }
    }

    /// Whether the worm has a live chain.
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state() == WormState::Active
    }

    /// Number of segments, head included. Zero until spawned.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        if self.spawned {
            self.body.len() + 1
        } else {
            0
        }
    }

    /// Whether the worm has no segments.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Longest chain this worm can hold.
    #[inline]
    #[must_use]
    pub const fn max_length(&self) -> usize {
        self.max_length
    }

    /// The head segment.
    #[inline]
    #[must_use]
    pub const fn head(&self) -> &Segment {
        &self.head
    }

    /// Borrowed body segment IDs, head-adjacent first.
    #[inline]
    #[must_use]
    pub fn body(&self) -> &[PoolId] {
        &self.body
    }

    /// Facing used by the next step.
    #[inline]
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Changes the facing.
    #[inline]
    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Whether collision checks are bypassed.
    #[inline]
    #[must_use]
    pub const fn noclip(&self) -> bool {
        self.noclip
    }

    /// Toggles the collision bypass (debug/testing only).
    #[inline]
    pub fn set_noclip(&mut self, noclip: bool) {
        self.noclip = noclip;
    }

    /// The worm's color.
    #[inline]
    #[must_use]
    pub const fn color(&self) -> Color {
        self.head.color()
    }

    /// Recolors the head and every body segment.
    pub fn set_color(&mut self, color: Color, tails: &mut Pooler<Segment>) {
        self.head.set_color(color);
        for id in &self.body {
            if let Some(segment) = tails.get_mut(*id) {
                segment.set_color(color);
            }
        }
    }

    /// Segment `index`, where 0 is the head.
    ///
    /// # Errors
    ///
    /// Returns a [`BoundsError`] unless `index < self.len()`.
    pub fn at<'a>(&'a self, index: usize, tails: &'a Pooler<Segment>) -> Result<&'a Segment, BoundsError> {
        let len = self.len();
        let index = BoundsError::check(index, len)?;
        if index == 0 {
            return Ok(&self.head);
        }
        tails
            .get(self.body[index - 1])
            .ok_or(BoundsError { index, len })
    }

    /// Cells held by the worm, head first.
    pub fn targets<'a>(&'a self, tails: &'a Pooler<Segment>) -> impl Iterator<Item = Cell> + 'a {
        let head = self.spawned.then(|| self.head.target());
        head.into_iter().chain(
            self.body
                .iter()
                .filter_map(move |id| tails.get(*id).map(Segment::target)),
        )
    }

    /// Builds a chain of `length` segments on `at`.
    ///
    /// Borrows `length - 1` body segments from `tails`, stacks them all on
    /// the spawn cell and registers the head with the spatial index. Any
    /// chain left from an earlier life is returned first.
    ///
    /// # Errors
    ///
    /// - [`GameError::InvalidLength`] unless `1 <= length <= max_length`
    /// - [`GameError::PoolExhausted`] if `tails` runs dry; segments borrowed
    ///   by this call are returned and the worm is left disabled
    pub fn spawn<S>(
        &mut self,
        tails: &mut Pooler<Segment>,
        area: &mut S,
        at: Cell,
        length: usize,
        color: Color,
        direction: Direction,
    ) -> GameResult<()>
    where
        S: SpatialIndex + ?Sized,
    {
        if length == 0 || length > self.max_length {
            return Err(GameError::InvalidLength {
                length,
                max: self.max_length,
            });
        }
        if self.spawned {
            self.release(tails, area);
        }

        if let Err(err) = self.extend(tails, at, length - 1, color) {
            self.head.disable();
            return Err(err);
        }

        self.head.place(at);
        self.head.set_color(color);
        self.head.set_enabled(true);
        self.direction = direction;
        self.spawned = true;
        area.occupy(at, Occupant::Worm(self.id()));

        tracing::debug!(worm = %self.id(), %at, length, "worm spawned");
        Ok(())
    }

    /// Advances the worm one cell in its facing.
    ///
    /// Asks the collision service first. On success the head moves by the
    /// facing's delta and every body segment takes over its predecessor's
    /// previous position and target.
    ///
    /// # Returns
    ///
    /// `true` if the worm moved, `false` if the move was blocked.
    ///
    /// # Errors
    ///
    /// [`GameError::NotSpawned`] if the worm has no live chain.
    pub fn step<A>(&mut self, tails: &mut Pooler<Segment>, area: &mut A) -> GameResult<bool>
    where
        A: Collision + SpatialIndex + ?Sized,
    {
        if !self.is_active() {
            return Err(GameError::NotSpawned);
        }

        let delta = self.direction.delta();
        if !area.can_move(self.id(), self.head.target(), delta, self.noclip) {
            return Ok(false);
        }

        let old_tail = self.tail_target(tails);

        // Each segment hands its pre-move state to the next one down.
        let mut carried = (self.head.position(), self.head.target());
        self.head.shift(delta);
        for id in &self.body {
            if let Some(segment) = tails.get_mut(*id) {
                carried = segment.follow(carried);
            }
        }

        area.occupy(self.head.target(), Occupant::Worm(self.id()));
        // A segment still stacked on the old tail cell keeps it occupied.
        if self.tail_target(tails) != old_tail {
            area.vacate(old_tail);
        }
        Ok(true)
    }

    /// Appends `amount` segments stacked on the current tail cell.
    ///
    /// All or nothing: on exhaustion the segments borrowed by this call
    /// are returned.
    ///
    /// # Errors
    ///
    /// - [`GameError::NotSpawned`] if the worm has no live chain
    /// - [`GameError::InvalidLength`] if the result would exceed `max_length`
    /// - [`GameError::PoolExhausted`] if `tails` runs dry
    pub fn grow(&mut self, tails: &mut Pooler<Segment>, amount: usize) -> GameResult<()> {
        if !self.is_active() {
            return Err(GameError::NotSpawned);
        }
        let length = self.len() + amount;
        if length > self.max_length {
            return Err(GameError::InvalidLength {
                length,
                max: self.max_length,
            });
        }

        let tail = self.tail_target(tails);
        self.extend(tails, tail, amount, self.color())
    }

    /// Returns every body segment to `tails`, frees every cell the worm
    /// holds and disables the worm.
    ///
    /// Safe on a chain of length 1 and on a worm that was never spawned.
    pub fn disable<S>(&mut self, tails: &mut Pooler<Segment>, area: &mut S)
    where
        S: SpatialIndex + ?Sized,
    {
        if self.spawned {
            let returned = self.body.len();
            self.release(tails, area);
            tracing::debug!(worm = %self.id(), returned, "worm disabled");
        }
        self.head.disable();
    }

    /// Hands the body back to the pool and clears the worm's cells.
    fn release<S>(&mut self, tails: &mut Pooler<Segment>, area: &mut S)
    where
        S: SpatialIndex + ?Sized,
    {
        for id in self.body.drain(..) {
            if let Some(segment) = tails.get_mut(id) {
                area.vacate(segment.target());
                segment.disable();
            }
        }
        area.vacate(self.head.target());
        self.spawned = false;
    }

    /// Borrows `amount` segments placed on `at`, rolling back on failure.
    fn extend(
        &mut self,
        tails: &mut Pooler<Segment>,
        at: Cell,
        amount: usize,
        color: Color,
    ) -> GameResult<()> {
        let start = self.body.len();
        for _ in 0..amount {
            let Some(segment) = tails.enable() else {
                let borrowed = self.body.len() - start;
                for id in self.body.drain(start..) {
                    tails.disable(id);
                }
                tracing::warn!(
                    worm = %self.id(),
                    requested = amount,
                    returned = borrowed,
                    "segment pool exhausted, rolled back"
                );
                return Err(GameError::PoolExhausted {
                    pool: tails.label(),
                    requested: amount,
                });
            };
            segment.place(at);
            segment.set_color(color);
            self.body.push(segment.id());
        }
        Ok(())
    }

    /// The cell held by the last segment.
    fn tail_target(&self, tails: &Pooler<Segment>) -> Cell {
        self.body
            .last()
            .and_then(|id| tails.get(*id))
            .map_or(self.head.target(), Segment::target)
    }
}

impl Poolable for Worm {
    #[inline]
    fn id(&self) -> PoolId {
        self.head.id()
    }

    #[inline]
    fn is_enabled(&self) -> bool {
        self.head.is_enabled()
    }

    #[inline]
    fn set_enabled(&mut self, enabled: bool) {
        debug_assert!(
            enabled || !self.spawned,
            "worm {} disabled with a live chain; use Worm::disable",
            self.id()
        );
        self.head.set_enabled(enabled);
    }
}
