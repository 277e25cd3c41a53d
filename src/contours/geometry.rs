//! Polygon helpers used by the feature extractor and blob filters.
use super::Point;

/// Perimeter of a polygon; `closed` adds the edge from last to first point.
pub fn arc_length(points: &[Point], closed: bool) -> f64 {
    let mut total: f64 = points
        .windows(2)
        .map(|w| distance(w[0], w[1]))
        .sum();
    if closed && points.len() > 1 {
        total += distance(points[points.len() - 1], points[0]);
    }
    total
}

/// Absolute shoelace area.
pub fn polygon_area(points: &[Point]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut twice = 0i64;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        twice += a.x as i64 * b.y as i64 - b.x as i64 * a.y as i64;
    }
    (twice as f64 * 0.5).abs()
}

/// Convex hull by Andrew's monotone chain, counter-clockwise in math axes.
pub fn convex_hull(points: &[Point]) -> Vec<Point> {
    let mut pts = points.to_vec();
    pts.sort_by_key(|p| (p.x, p.y));
    pts.dedup();
    if pts.len() < 3 {
        return pts;
    }

    let mut hull: Vec<Point> = Vec::with_capacity(pts.len() + 1);
    for &p in &pts {
        while hull.len() >= 2 && cross(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0 {
            hull.pop();
        }
        hull.push(p);
    }
    let lower_len = hull.len() + 1;
    for &p in pts.iter().rev().skip(1) {
        while hull.len() >= lower_len && cross(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0
        {
            hull.pop();
        }
        hull.push(p);
    }
    hull.pop();
    hull
}

/// Douglas–Peucker simplification of a closed outline.
///
/// Points closer than `epsilon` to the simplified edge are dropped. An
/// `epsilon` of zero or fewer than three points returns the input unchanged.
pub fn simplify_closed(points: &[Point], epsilon: f64) -> Vec<Point> {
    if epsilon <= 0.0 || points.len() < 3 {
        return points.to_vec();
    }
    // Anchor on the first point and the point farthest from it so the split
    // is stable for any starting vertex.
    let first = points[0];
    let (far, _) = points
        .iter()
        .enumerate()
        .map(|(i, &p)| (i, distance(first, p)))
        .fold((0, 0.0), |best, cur| if cur.1 > best.1 { cur } else { best });
    if far == 0 {
        return vec![first];
    }

    let mut keep = vec![false; points.len()];
    keep[0] = true;
    keep[far] = true;
    douglas_peucker(points, 0, far, epsilon, &mut keep);
    let mut tail: Vec<Point> = points[far..].to_vec();
    tail.push(first);
    let mut keep_tail = vec![false; tail.len()];
    douglas_peucker(&tail, 0, tail.len() - 1, epsilon, &mut keep_tail);
    for (i, k) in keep_tail.iter().enumerate().take(tail.len() - 1) {
        if *k {
            keep[far + i] = true;
        }
    }

    points
        .iter()
        .zip(keep)
        .filter_map(|(&p, k)| k.then_some(p))
        .collect()
}

fn douglas_peucker(points: &[Point], start: usize, end: usize, epsilon: f64, keep: &mut [bool]) {
    if end <= start + 1 {
        return;
    }
    let (a, b) = (points[start], points[end]);
    let mut worst = (start, 0.0f64);
    for (i, &p) in points.iter().enumerate().take(end).skip(start + 1) {
        let d = segment_distance(p, a, b);
        if d > worst.1 {
            worst = (i, d);
        }
    }
    if worst.1 > epsilon {
        keep[worst.0] = true;
        douglas_peucker(points, start, worst.0, epsilon, keep);
        douglas_peucker(points, worst.0, end, epsilon, keep);
    }
}

fn segment_distance(p: Point, a: Point, b: Point) -> f64 {
    let (px, py) = (p.x as f64, p.y as f64);
    let (ax, ay) = (a.x as f64, a.y as f64);
    let (dx, dy) = (b.x as f64 - ax, b.y as f64 - ay);
    let len2 = dx * dx + dy * dy;
    if len2 == 0.0 {
        return distance(p, a);
    }
    let t = (((px - ax) * dx + (py - ay) * dy) / len2).clamp(0.0, 1.0);
    let (qx, qy) = (ax + t * dx, ay + t * dy);
    ((px - qx).powi(2) + (py - qy).powi(2)).sqrt()
}

#[inline]
fn distance(a: Point, b: Point) -> f64 {
    let dx = (a.x - b.x) as f64;
    let dy = (a.y - b.y) as f64;
    (dx * dx + dy * dy).sqrt()
}

#[inline]
fn cross(o: Point, a: Point, b: Point) -> i64 {
    (a.x - o.x) as i64 * (b.y - o.y) as i64 - (a.y - o.y) as i64 * (b.x - o.x) as i64
}
