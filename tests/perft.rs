use plywood::perft::{divide, perft};
use plywood::Position;

#[test]
fn perft_startpos_small_depths() {
    let mut pos = Position::startpos();
    assert_eq!(perft(&mut pos, 1), 20);
    assert_eq!(perft(&mut pos, 2), 400);
    assert_eq!(perft(&mut pos, 3), 8902);
    assert_eq!(pos.history_len(), 0);
}

#[test]
fn perft_kiwipete() {
    let mut pos = Position::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1").unwrap();
    assert_eq!(perft(&mut pos, 1), 48);
    assert_eq!(perft(&mut pos, 2), 2039);
}

#[test]
fn perft_endgame_position() {
    let mut pos = Position::from_fen("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1").unwrap();
    assert_eq!(perft(&mut pos, 1), 14);
    assert_eq!(perft(&mut pos, 2), 191);
    assert_eq!(perft(&mut pos, 3), 2812);
}

#[test]
fn divide_covers_every_root_move() {
    let mut pos = Position::startpos();
    let split = divide(&mut pos, 2);
    assert_eq!(split.len(), 20);
    assert!(split.iter().all(|(_, n)| *n == 20));
}

#[test]
#[ignore]
fn perft_startpos_depth_four() {
    let mut pos = Position::startpos();
    assert_eq!(perft(&mut pos, 4), 197281);
}
