use pretty_assertions::assert_eq;
use plywood::uci::UciEngine;
use plywood::Position;

fn send(engine: &mut UciEngine, lines: &[&str]) -> String {
    let mut out = Vec::new();
    for l in lines {
        engine.handle_line(l, &mut out).unwrap();
    }
    String::from_utf8(out).unwrap()
}

#[test]
fn handshake() {
    let mut e = UciEngine::default();
    let out = send(&mut e, &["uci", "isready"]);
    assert!(out.contains("uciok"));
    assert!(out.trim_end().ends_with("readyok"));
}

#[test]
fn position_startpos_with_moves() {
    let mut e = UciEngine::default();
    send(&mut e, &["position startpos moves e2e4 e7e5 g1f3"]);
    let mut expect = Position::startpos();
    for m in ["e2e4", "e7e5", "g1f3"] { expect.make_move_uci(m).unwrap(); }
    assert_eq!(e.position().fen(), expect.fen());
}

#[test]
fn position_fen_applies_moves_to_that_fen() {
    let mut e = UciEngine::default();
    send(&mut e, &["position fen r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1 moves e1g1 e8c8"]);
    assert!(e.position().fen().starts_with("2kr3r/8/8/8/8/8/8/R4RK1 w"));
}

#[test]
fn bad_position_command_keeps_previous_position() {
    let mut e = UciEngine::default();
    send(&mut e, &["position startpos moves e2e4", "position startpos moves e2e5"]);
    assert!(e.position().fen().starts_with("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b"));
}

#[test]
fn go_reports_mate_and_bestmove() {
    let mut e = UciEngine::default();
    let out = send(&mut e, &["position fen r5k1/8/8/8/8/8/5PPP/6K1 b - - 0 1", "go depth 2"]);
    assert!(out.contains("score mate 1"), "{out}");
    assert!(out.trim_end().ends_with("bestmove a8a1"), "{out}");
}

#[test]
fn go_without_moves_reports_null_move() {
    let mut e = UciEngine::default();
    let out = send(&mut e, &["position fen k7/8/1Q6/8/8/8/8/7K b - - 0 1", "go depth 3"]);
    assert_eq!(out.trim(), "bestmove 0000");
}

#[test]
fn quit_stops_the_loop() {
    let mut e = UciEngine::default();
    let input = "isready\nquit\nisready\n";
    let mut out = Vec::new();
    e.run(input.as_bytes(), &mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap().matches("readyok").count(), 1);
}

#[test]
fn go_needs_a_word_boundary() {
    let mut e = UciEngine::default();
    assert_eq!(send(&mut e, &["gofoo", "godepth 1"]), "");
    let out = send(&mut e, &["go"]);
    assert!(out.contains("bestmove "), "{out}");
}
