//! Group laws and scheduling properties of whole turns, driven through the engine.

use nalgebra::{Point3, Vector3};
use rand::rngs::StdRng;
use rand::SeedableRng;

use cube::animation::AnimationState;
use cube::moves::Move;
use cube::registry::{coord_to_idx, Coord};
use cube::{Engine, EngineConfig, HeadlessSink, QueueOrder};

/// Generous tick budget per move at the default speed (17 ticks per turn).
const TICKS_PER_MOVE: usize = 20;

fn engine_with(queue_order: QueueOrder) -> Engine<HeadlessSink> {
    let config = EngineConfig {
        queue_order,
        ..EngineConfig::default()
    };
    Engine::new(config, HeadlessSink::default()).unwrap()
}

fn slots(engine: &Engine<HeadlessSink>) -> Vec<Coord> {
    engine
        .registry()
        .cubies()
        .iter()
        .map(|cubie| cubie.slot())
        .collect()
}

fn play(engine: &mut Engine<HeadlessSink>, moves: &[Move]) {
    for &mv in moves {
        engine.submit(mv);
    }
    engine
        .run_until_idle(moves.len() * TICKS_PER_MOVE)
        .expect("moves should settle");
}

#[test]
fn test_inverse_law() {
    for mv in Move::ALL {
        let mut engine = engine_with(QueueOrder::Fifo);
        play(&mut engine, &[Move::ALL[4], Move::ALL[9]]);
        let before = slots(&engine);

        play(&mut engine, &[mv]);
        assert_ne!(slots(&engine), before, "{mv} should move something");
        play(&mut engine, &[mv.inverse()]);
        assert_eq!(slots(&engine), before, "{mv} then {} should cancel", mv.inverse());
    }
}

#[test]
fn test_order_four_law() {
    for mv in Move::ALL {
        let mut engine = engine_with(QueueOrder::Fifo);
        play(&mut engine, &[mv, mv, mv]);
        assert!(!engine.registry().is_solved(), "{mv} x3 is not the identity");
        play(&mut engine, &[mv]);
        assert!(engine.registry().is_solved(), "{mv} x4 should restore the cube");
    }
}

#[test]
fn test_mutual_exclusion_while_rotating() {
    let mut engine = engine_with(QueueOrder::Fifo);
    engine.request_move("F");
    engine.tick();
    let in_flight = engine.scheduler().animator().state();
    assert!(matches!(in_flight, AnimationState::Rotating { .. }));

    for token in ["U", "R'", "D"] {
        engine.request_move(token);
        assert_eq!(engine.scheduler().animator().state(), in_flight);
    }
    assert_eq!(engine.scheduler().pending().len(), 3);
}

#[test]
fn test_drain_fifo() {
    let mut engine = engine_with(QueueOrder::Fifo);
    let tokens = ["F", "B'", "L", "R'", "U", "D'"];
    for token in tokens {
        engine.request_move(token);
    }
    engine
        .run_until_idle(tokens.len() * TICKS_PER_MOVE)
        .unwrap();

    assert!(engine.scheduler().pending().is_empty());
    assert!(engine.scheduler().active().is_none());
    let history: Vec<String> = engine.history().iter().map(ToString::to_string).collect();
    assert_eq!(history, tokens);
}

#[test]
fn test_drain_lifo() {
    let mut engine = engine_with(QueueOrder::Lifo);
    for token in ["F", "B'", "L", "R'", "U", "D'"] {
        engine.request_move(token);
    }
    engine.run_until_idle(6 * TICKS_PER_MOVE).unwrap();

    assert!(engine.is_idle());
    let history: Vec<String> = engine.history().iter().map(ToString::to_string).collect();
    assert_eq!(history, ["F", "D'", "U", "R'", "L", "B'"]);
}

#[test]
fn test_front_corner_scenario() {
    let mut engine = engine_with(QueueOrder::Fifo);
    let corner = coord_to_idx((-1, -1, -1));
    let position = |engine: &Engine<HeadlessSink>| engine.registry().cubie(corner).lattice_position();
    assert_eq!(position(&engine), Point3::new(-3.5, -3.5, -3.5));

    engine.request_move("F");
    engine.run_until_idle(TICKS_PER_MOVE).unwrap();
    assert_eq!(position(&engine), Point3::new(-3.5, 3.5, -3.5));

    engine.request_move("F'");
    engine.run_until_idle(TICKS_PER_MOVE).unwrap();
    assert_eq!(position(&engine), Point3::new(-3.5, -3.5, -3.5));
    assert!(engine.registry().is_solved());
}

#[test]
fn test_long_random_sequence_stays_on_lattice() {
    let mut engine = engine_with(QueueOrder::Fifo);
    let mut rng = StdRng::seed_from_u64(2024);
    engine.shuffle(&mut rng, 500);
    engine.run_until_idle(500 * TICKS_PER_MOVE).unwrap();

    assert_eq!(engine.history().len(), 500);
    assert!(engine.registry().is_permutation());
    for cubie in engine.registry().cubies() {
        let transform = cubie.world_transform().expect("no cubie left in the pivot");
        assert_eq!(transform.translation.vector, cubie.lattice_position().coords);

        // every orientation is one of the 24 cube rotations
        let matrix = transform.rotation.to_rotation_matrix().into_inner();
        assert!(matrix.iter().all(|v| (v - v.round()).abs() < 1e-5));
        let axis_image = transform.rotation * Vector3::x();
        assert!((axis_image.norm() - 1.0).abs() < 1e-5);
    }

    // undoing the history in reverse restores the cube
    let undo: Vec<Move> = engine.history().iter().rev().map(|mv| mv.inverse()).collect();
    play(&mut engine, &undo);
    assert!(engine.registry().is_solved());
}

#[test]
fn test_each_tick_draws_once() {
    let mut engine = engine_with(QueueOrder::Fifo);
    engine.request_move("R");
    let ticks = engine.run_until_idle(TICKS_PER_MOVE).unwrap();
    assert_eq!(ticks, 17);
    assert_eq!(engine.sink().frames, 17);
}
