use pretty_assertions::assert_eq;
use plywood::{Position, Searcher};

#[test]
fn search_returns_legal_move_startpos() {
    let mut pos = Position::startpos();
    let legal: Vec<String> = pos.legal_moves().iter().map(|m| m.to_string()).collect();
    let mut searcher = Searcher::default();
    let res = searcher.search(&mut pos, 2);
    let bm = res.best_move.expect("expected a best move at depth 2");
    assert!(legal.contains(&bm.to_string()), "{bm} not in legal list");
    assert_eq!(res.depth, 2);
    assert!(res.nodes > 20);
}

#[test]
fn search_is_deterministic() {
    let fen = "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3";
    let run = || {
        let mut pos = Position::from_fen(fen).unwrap();
        Searcher::default().search(&mut pos, 2)
    };
    assert_eq!(run(), run());
}

#[test]
fn search_leaves_position_unchanged() {
    let mut pos = Position::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1").unwrap();
    let before = (pos.fen(), pos.hash());
    Searcher::default().search(&mut pos, 2);
    assert_eq!((pos.fen(), pos.hash()), before);
    assert_eq!(pos.history_len(), 0);
}

#[test]
fn depth_is_clamped_to_ceiling() {
    let mut pos = Position::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1").unwrap();
    let mut searcher = Searcher::default();
    assert_eq!(searcher.search(&mut pos, 9).depth, plywood::config::MAX_SEARCH_DEPTH);
    assert_eq!(searcher.search(&mut pos, 0).depth, 1);
    assert_eq!(searcher.clamp_depth(3), 3);
}

#[test]
fn search_prefers_winning_queen_capture() {
    // Qe2xd2 wins the only black piece besides the king.
    let mut pos = Position::from_fen("k7/8/8/8/8/8/3qQ3/7K w - - 0 1").unwrap();
    let mut searcher = Searcher::default();
    for depth in 1..=2 {
        let bm = searcher.best_move(&mut pos, depth).expect("expected a best move");
        assert_eq!(bm.to_string(), "e2d2", "depth {depth}");
    }
}

#[test]
fn black_minimizes() {
    // Mirror of the capture above with Black to move.
    let mut pos = Position::from_fen("7k/3qQ3/8/8/8/8/8/K7 b - - 0 1").unwrap();
    let res = Searcher::default().search(&mut pos, 1);
    assert_eq!(res.best_move.map(|m| m.to_string()).as_deref(), Some("d7e7"));
    assert!(res.score < -500, "score {}", res.score);
}

#[test]
fn equal_root_values_keep_the_ranked_head() {
    use plywood::{EngineConfig, MoveOrderer, OrderingPolicy};
    // Bare kings: every reply is drawn, so every root move is worth exactly 0.
    let fen = "8/8/4k3/8/8/3K4/8/8 w - - 0 1";
    let mut cfg = EngineConfig::default();
    cfg.eval.mobility_weight = 0;
    let mut pos = Position::from_fen(fen).unwrap();
    let moves = pos.legal_moves();
    assert!(moves.len() > 1);
    let head = MoveOrderer::default().order(&mut pos, moves.clone())[0];

    let mut searcher = Searcher::new(cfg);
    let res = searcher.search(&mut pos, 1);
    assert_eq!(res.score, 0);
    assert_eq!(res.best_move, Some(head));

    // Reversing the list changes which move is first; the tie still goes to it.
    searcher.set_ordering(OrderingPolicy::Reversed);
    let res = searcher.search(&mut pos, 2);
    assert_eq!(res.score, 0);
    assert_eq!(res.best_move, moves.last().copied());
}
