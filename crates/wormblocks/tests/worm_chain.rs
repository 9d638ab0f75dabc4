//! # Worm Chain Tests
//!
//! Drives worms through the public API against a real play area and a
//! shared segment pool, checking:
//!
//! 1. **Follow law**: after a move every segment holds its predecessor's
//!    previous target
//! 2. **Grid sync**: the play area marks exactly the cells the chain covers
//! 3. **Teardown**: disable hands every segment back, including after
//!    the pool has compacted under the worm

use proptest::prelude::*;
use wormblocks::core::{PoolId, Poolable, Pooler};
use wormblocks::{
    Cell, Color, Config, Direction, GameError, Occupant, PlayArea, Segment, SpatialIndex, Worm,
    WormState,
};

fn setup(config: &Config) -> (Pooler<Worm>, Pooler<Segment>, PlayArea) {
    let worms = Pooler::new(config.worm_pool, |id| Worm::new(id, config));
    let tails = Pooler::new(config.segment_pool, |id| Segment::new(id, config));
    (worms, tails, PlayArea::new(config.bounds()))
}

fn enable_worm(worms: &mut Pooler<Worm>) -> PoolId {
    worms.enable().map(|worm| worm.id()).unwrap()
}

// ============================================================================
// LIFECYCLE
// ============================================================================

#[test]
fn test_two_worms_share_segment_pool() {
    let config = Config {
        segment_pool: 6,
        ..Config::default()
    };
    let (mut worms, mut tails, mut area) = setup(&config);

    let a = enable_worm(&mut worms);
    let b = enable_worm(&mut worms);
    worms
        .get_mut(a)
        .unwrap()
        .spawn(&mut tails, &mut area, Cell::new(1, 1), 4, Color::RED, Direction::Right)
        .unwrap();
    worms
        .get_mut(b)
        .unwrap()
        .spawn(&mut tails, &mut area, Cell::new(9, 9), 4, Color::GREEN, Direction::Left)
        .unwrap();
    assert_eq!(tails.enabled_count(), 6);

    // Pool is dry; a third worm can't borrow anything and leaves no trace.
    let c = enable_worm(&mut worms);
    let err = worms
        .get_mut(c)
        .unwrap()
        .spawn(&mut tails, &mut area, Cell::new(5, 5), 2, Color::WHITE, Direction::Up)
        .unwrap_err();
    assert!(matches!(err, GameError::PoolExhausted { pool: "Segment", requested: 1 }));
    assert_eq!(worms.get(c).unwrap().state(), WormState::Disabled);
    assert_eq!(area.occupant(Cell::new(5, 5)), None);

    // Freeing one worm makes room for the other.
    worms.get_mut(a).unwrap().disable(&mut tails, &mut area);
    assert_eq!(tails.enabled_count(), 3);
    worms
        .get_mut(c)
        .unwrap()
        .spawn(&mut tails, &mut area, Cell::new(5, 5), 2, Color::WHITE, Direction::Up)
        .unwrap();
    assert_eq!(tails.enabled_count(), 4);
}

#[test]
fn test_worms_block_each_other() {
    let config = Config::default();
    let (mut worms, mut tails, mut area) = setup(&config);

    let a = enable_worm(&mut worms);
    let b = enable_worm(&mut worms);
    worms
        .get_mut(a)
        .unwrap()
        .spawn(&mut tails, &mut area, Cell::new(3, 3), 1, Color::RED, Direction::Right)
        .unwrap();
    worms
        .get_mut(b)
        .unwrap()
        .spawn(&mut tails, &mut area, Cell::new(4, 3), 1, Color::GREEN, Direction::Left)
        .unwrap();

    assert!(!worms.get_mut(a).unwrap().step(&mut tails, &mut area).unwrap());

    // With noclip the move goes through and the cell changes hands.
    let worm = worms.get_mut(a).unwrap();
    worm.set_noclip(true);
    assert!(worm.step(&mut tails, &mut area).unwrap());
    assert_eq!(area.occupant(Cell::new(4, 3)), Some(Occupant::Worm(a)));
}

#[test]
fn test_teardown_after_segment_pool_compaction() {
    let config = Config {
        segment_pool: 12,
        ..Config::default()
    };
    let (mut worms, mut tails, mut area) = setup(&config);

    let ids: Vec<_> = (0..3).map(|_| enable_worm(&mut worms)).collect();
    for (i, id) in ids.iter().enumerate() {
        worms
            .get_mut(*id)
            .unwrap()
            .spawn(&mut tails, &mut area, Cell::new(i as i32 * 4, 0), 4, Color::RED, Direction::Down)
            .unwrap();
    }
    assert_eq!(tails.enabled_count(), 9);

    // Punch a hole below the others and force compaction.
    worms.get_mut(ids[0]).unwrap().disable(&mut tails, &mut area);
    tails.sort();
    assert_eq!(tails.enable_index(), 6);

    for id in &ids[1..] {
        let worm = worms.get_mut(*id).unwrap();
        assert!(worm.step(&mut tails, &mut area).unwrap());
        assert_eq!(worm.len(), 4);
    }
    for id in &ids[1..] {
        worms.get_mut(*id).unwrap().disable(&mut tails, &mut area);
    }
    assert_eq!(tails.enabled_count(), 0);
    assert_eq!(area.occupied_count(), 0);
}

// ============================================================================
// PROPERTIES
// ============================================================================

fn direction() -> impl Strategy<Value = Direction> {
    prop::sample::select(Direction::ALL.to_vec())
}

proptest! {
    #[test]
    fn follow_law_and_grid_sync(
        length in 1usize..10,
        moves in prop::collection::vec(direction(), 1..60),
    ) {
        let config = Config {
            width: 12,
            height: 12,
            ..Config::default()
        };
        let (mut worms, mut tails, mut area) = setup(&config);
        let id = enable_worm(&mut worms);
        let worm = worms.get_mut(id).unwrap();
        worm.spawn(&mut tails, &mut area, Cell::new(6, 6), length, Color::GREEN, Direction::Up)
            .unwrap();

        for facing in moves {
            worm.set_direction(facing);
            let before: Vec<Cell> = worm.targets(&tails).collect();

            let moved = worm.step(&mut tails, &mut area).unwrap();
            let after: Vec<Cell> = worm.targets(&tails).collect();

            prop_assert_eq!(after.len(), length);
            if moved {
                prop_assert_eq!(after[0], before[0].offset(facing.delta()));
                prop_assert_eq!(&after[1..], &before[..length - 1]);
            } else {
                prop_assert_eq!(&after, &before);
            }

            let mut covered = after.clone();
            covered.sort_by_key(|cell| (cell.x, cell.y));
            covered.dedup();
            prop_assert_eq!(area.occupied_count(), covered.len());
            for cell in covered {
                prop_assert_eq!(area.occupant(cell), Some(Occupant::Worm(id)));
            }
        }

        worm.disable(&mut tails, &mut area);
        prop_assert_eq!(tails.enabled_count(), 0);
        prop_assert_eq!(area.occupied_count(), 0);
    }
}
