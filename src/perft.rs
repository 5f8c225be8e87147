use crate::board::Position;

/// Counts leaf nodes of the legal move tree using make/unmake on one position.
pub fn perft(pos: &mut Position, depth: u32) -> u64 {
    if depth == 0 { return 1; }
    if depth == 1 { return pos.legal_move_count() as u64; }
    let mut nodes = 0u64;
    for mv in pos.legal_moves() {
        let mut child = pos.apply(mv);
        nodes += perft(&mut child, depth - 1);
    }
    nodes
}

/// Per-root-move node counts, in generation order.
pub fn divide(pos: &mut Position, depth: u32) -> Vec<(String, u64)> {
    if depth == 0 { return Vec::new(); }
    pos.legal_moves()
        .into_iter()
        .map(|mv| {
            let mut child = pos.apply(mv);
            (mv.to_string(), perft(&mut child, depth - 1))
        })
        .collect()
}
