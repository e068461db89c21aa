//! Coordinate math for the toroidal board

use rand::Rng;

use super::state::Position;

/// Map any coordinate into `[0, size)`, re-entering from the opposite edge.
pub fn wrap(coordinate: i32, size: i32) -> i32 {
    coordinate.rem_euclid(size)
}

/// Wrap both axes of a position onto a `size` x `size` board
pub fn wrap_position(pos: Position, size: i32) -> Position {
    Position::new(wrap(pos.x, size), wrap(pos.y, size))
}

/// Pick a uniformly random cell, resampling while it lands on `exclude`.
///
/// Needs `size >= 2` when `exclude` is set, otherwise the loop never ends.
pub fn random_position<R: Rng>(
    rng: &mut R,
    size: i32,
    exclude: Option<Position>,
) -> Position {
    debug_assert!(size >= 2 || exclude.is_none());
    loop {
        let pos = Position::new(rng.gen_range(0..size), rng.gen_range(0..size));
        if Some(pos) != exclude {
            return pos;
        }
    }
}
