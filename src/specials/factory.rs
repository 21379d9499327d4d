//! Special creation from matched shapes.

use tracing::debug;

use crate::board::Grid;
use crate::core::{Pos, SpecialKind};
use crate::events::BoardEvent;
use crate::matching::{
    choose_line_host, find_bomb_host, find_square_host, matched_lines, MoveContext, Orientation,
};

/// Special kind earned by a straight line, if any.
fn line_reward(len: usize, orientation: Orientation) -> Option<SpecialKind> {
    match len {
        0..=3 => None,
        4 => Some(SpecialKind::rocket(orientation == Orientation::Horizontal)),
        _ => Some(SpecialKind::DiscoBall),
    }
}

/// Promote hosts of the shapes in the current marks.
///
/// All shapes are read from the marks before any promotion happens, then
/// applied in order: L/T bomb, square plane, lines. A host that is already
/// special (including one promoted earlier in this call) is left alone.
/// Promoted hosts are un-marked so they survive the wave.
///
/// Returns the promotions in the order they were applied.
pub fn promote_matches(
    grid: &mut Grid,
    context: &MoveContext,
    events: &mut Vec<BoardEvent>,
) -> Vec<(Pos, SpecialKind)> {
    let lines = matched_lines(grid);
    let bomb_host = find_bomb_host(grid);
    let square_host = find_square_host(grid, context);

    let mut plan: Vec<(Pos, SpecialKind)> = Vec::new();
    plan.extend(bomb_host.map(|pos| (pos, SpecialKind::Bomb)));
    plan.extend(square_host.map(|pos| (pos, SpecialKind::Plane)));
    for line in &lines {
        if let Some(kind) = line_reward(line.len(), line.orientation) {
            plan.extend(choose_line_host(grid, line, context).map(|pos| (pos, kind)));
        }
    }

    let mut promoted = Vec::new();
    for (pos, kind) in plan {
        let Some(piece) = grid.get_mut(pos) else {
            continue;
        };
        if piece.is_special() {
            continue;
        }

        piece.special = kind;
        piece.marked = false;
        debug!(piece = %piece.id, %pos, ?kind, "special promoted");
        events.push(BoardEvent::Promoted { id: piece.id, pos, kind });
        promoted.push((pos, kind));
    }

    promoted
}
