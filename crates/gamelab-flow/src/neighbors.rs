use gamelab_core::Point;

/// Append the walkable 8-way neighbors of `p` into `buf`.
///
/// `walkable` must return `false` for out-of-bounds points. A diagonal
/// neighbor is skipped when either of the two orthogonal cells flanking it is
/// not walkable, so movement never cuts an obstacle corner.
pub fn walkable_neighbors(p: Point, walkable: impl Fn(Point) -> bool, buf: &mut Vec<Point>) {
    for d in Point::DIRECTIONS_8 {
        let n = p + d;
        if !walkable(n) {
            continue;
        }
        if d.is_diagonal() && !(walkable(p.shift(d.x, 0)) && walkable(p.shift(0, d.y))) {
            continue;
        }
        buf.push(n);
    }
}
