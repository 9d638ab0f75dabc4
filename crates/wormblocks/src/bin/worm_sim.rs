//! # Worm Simulation
//!
//! Headless run of a seeded session: spawns a few worms and fruit, runs a
//! fixed number of ticks and prints pool utilization. Halfway through, the
//! first worm turns into a block.
//!
//! ```text
//! worm_sim [config.toml] [ticks]
//! ```

use std::process;

use wormblocks::core::Poolable;
use wormblocks::{Cell, Color, Config, Direction, Session};

const DEFAULT_TICKS: u64 = 200;
const WORMS: [(i32, Color, Direction); 4] = [
    (0, Color::GREEN, Direction::Right),
    (1, Color::RED, Direction::Down),
    (2, Color::WHITE, Direction::Left),
    (3, Color::BLACK, Direction::Up),
];

const fn clockwise(direction: Direction) -> Direction {
    match direction {
        Direction::Up => Direction::Right,
        Direction::Right => Direction::Down,
        Direction::Down => Direction::Left,
        Direction::Left => Direction::Up,
    }
}

fn main() {
    let mut args = std::env::args().skip(1);

    let config = match args.next() {
        Some(path) => match Config::load(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("✗ FATAL: could not load {path}: {e}");
                process::exit(1);
            }
        },
        None => Config::default(),
    };
    let ticks = args
        .next()
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(DEFAULT_TICKS);

    println!("═══════════════════════════════════════════════════════════════════");
    println!("                      WORM BLOCKS SIMULATION");
    println!("═══════════════════════════════════════════════════════════════════");
    println!("  Area:      {} x {} cells", config.width, config.height);
    println!(
        "  Pools:     {} worms / {} segments / {} fruit / {} blocks",
        config.worm_pool, config.segment_pool, config.fruit_pool, config.block_pool
    );
    println!("  Seed:      {:#x}", config.seed);
    println!();

    let mut session = match Session::new(config) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("✗ FATAL: {e}");
            process::exit(1);
        }
    };

    let bounds = session.config().bounds();
    let length = session.config().max_worm_length.min(4);
    for (i, color, direction) in WORMS {
        #[allow(clippy::cast_possible_wrap)]
        let at = Cell::new(
            (bounds.width as i32 / 5) * (i + 1),
            bounds.height as i32 / 2,
        );
        match session.spawn_worm(at, length, color, direction) {
            Ok(id) => println!("  ✓ worm {id} spawned at {at} facing {direction:?}"),
            Err(e) => println!("  ✗ worm at {at}: {e}"),
        }
    }

    let mut moved = 0;
    let mut blocked = 0;
    let mut eaten = 0;
    for tick in 0..ticks {
        if tick == ticks / 2 {
            let first = session.worms().iter_enabled().next().map(|worm| worm.id());
            if let Some(worm) = first {
                match session.spawn_block(worm) {
                    Ok(id) => println!("  ✓ tick {tick}: worm {worm} turned into block {id}"),
                    Err(e) => println!("  ✗ tick {tick}: worm {worm}: {e}"),
                }
            }
        }

        if session.fruits().enabled_count() == 0 {
            if let Err(e) = session.spawn_fruit() {
                println!("  ✗ tick {tick}: {e}");
            }
        }

        let before: Vec<_> = session
            .worms()
            .iter_enabled()
            .map(|worm| (worm.id(), worm.head().target()))
            .collect();

        let report = session.tick();
        moved += report.moved;
        blocked += report.blocked;
        eaten += report.eaten;

        // Blocked worms turn clockwise.
        for (id, head) in before {
            if let Some(worm) = session.worm_mut(id) {
                if worm.head().target() == head {
                    worm.set_direction(clockwise(worm.direction()));
                }
            }
        }
    }

    println!();
    println!("═══════════════════════════════════════════════════════════════════");
    println!("  Ticks:     {}", session.ticks());
    println!("  Moves:     {moved}  blocked: {blocked}  eaten: {eaten}");
    println!(
        "  Worms:     {}/{}",
        session.worms().enabled_count(),
        session.worms().count()
    );
    println!(
        "  Segments:  {}/{}",
        session.tails().enabled_count(),
        session.tails().count()
    );
    println!(
        "  Fruit:     {}/{}",
        session.fruits().enabled_count(),
        session.fruits().count()
    );
    println!(
        "  Blocks:    {}/{} ({} modules)",
        session.blocks().enabled_count(),
        session.blocks().count(),
        session.modules().enabled_count()
    );
    for worm in session.worms().iter_enabled() {
        println!("    worm {} length {}", worm.id(), worm.len());
    }
    println!("═══════════════════════════════════════════════════════════════════");
}
