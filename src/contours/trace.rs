use super::{Moments, Point};
use crate::image::ImageU8;
use std::collections::VecDeque;

/// Neighbour offsets in clockwise order (image y axis points down).
const DIRS: [(i32, i32); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];
const WEST: usize = 4;

/// Outer boundary of one connected component.
#[derive(Clone, Debug, PartialEq)]
pub struct Contour {
    /// Discovery index (row-major order of the component's first pixel).
    pub index: usize,
    /// Compressed boundary polygon, clockwise on screen.
    pub points: Vec<Point>,
    /// Number of foreground pixels in the component.
    pub pixel_count: usize,
}

impl Contour {
    pub fn moments(&self) -> Moments {
        Moments::from_polygon(&self.points)
    }
}

/// Trace the outer boundary of every 8-connected foreground component.
pub fn find_external_contours(mask: ImageU8<'_>) -> Vec<Contour> {
    let (w, h) = (mask.w, mask.h);
    let mut labels = vec![0u32; w * h];
    let mut contours = Vec::new();
    let mut queue = VecDeque::new();

    for y in 0..h {
        for x in 0..w {
            if mask.get(x, y) == 0 || labels[y * w + x] != 0 {
                continue;
            }
            let label = contours.len() as u32 + 1;
            let pixel_count = flood_label(mask, &mut labels, &mut queue, (x, y), label);
            let raw = trace_boundary(mask, Point::new(x as i32, y as i32));
            contours.push(Contour {
                index: contours.len(),
                points: compress_chain(raw),
                pixel_count,
            });
        }
    }
    contours
}

fn flood_label(
    mask: ImageU8<'_>,
    labels: &mut [u32],
    queue: &mut VecDeque<(usize, usize)>,
    seed: (usize, usize),
    label: u32,
) -> usize {
    let w = mask.w;
    queue.clear();
    labels[seed.1 * w + seed.0] = label;
    queue.push_back(seed);
    let mut count = 0;
    while let Some((x, y)) = queue.pop_front() {
        count += 1;
        for &(dx, dy) in &DIRS {
            let (nx, ny) = (x as isize + dx as isize, y as isize + dy as isize);
            if !mask.is_set(nx, ny) {
                continue;
            }
            let idx = ny as usize * w + nx as usize;
            if labels[idx] == 0 {
                labels[idx] = label;
                queue.push_back((nx as usize, ny as usize));
            }
        }
    }
    count
}

fn dir_between(from: Point, to: Point) -> usize {
    let delta = (to.x - from.x, to.y - from.y);
    DIRS.iter().position(|&d| d == delta).unwrap_or(WEST)
}

/// Moore-neighbour boundary following from the component's first raster
/// pixel. Its west, north-west, north and north-east neighbours are
/// background, so the walk starts with west as the backtrack direction.
fn trace_boundary(mask: ImageU8<'_>, start: Point) -> Vec<Point> {
    let fg = |p: Point| mask.is_set(p.x as isize, p.y as isize);
    let step = |p: Point, d: usize| Point::new(p.x + DIRS[d].0, p.y + DIRS[d].1);

    let mut points = vec![start];
    let mut current = start;
    let mut back = WEST;
    let mut first_move: Option<Point> = None;

    // A closed boundary visits each pixel at most four times.
    let limit = 4 * mask.w * mask.h + 4;
    for _ in 0..limit {
        let Some(d) = (1..=8).map(|k| (back + k) % 8).find(|&d| fg(step(current, d))) else {
            break; // isolated pixel
        };
        let next = step(current, d);
        if current == start {
            match first_move {
                None => first_move = Some(next),
                Some(first) if first == next => break,
                Some(_) => {}
            }
        }
        back = dir_between(next, step(current, (d + 7) % 8));
        points.push(next);
        current = next;
    }
    if points.len() > 1 && points.last() == Some(&start) {
        points.pop();
    }
    points
}

/// Drop points that lie on a straight run between their neighbours.
fn compress_chain(points: Vec<Point>) -> Vec<Point> {
    let n = points.len();
    if n < 3 {
        return points;
    }
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let prev = points[(i + n - 1) % n];
        let cur = points[i];
        let next = points[(i + 1) % n];
        let d0 = (cur.x - prev.x, cur.y - prev.y);
        let d1 = (next.x - cur.x, next.y - cur.y);
        if d0 != d1 {
            out.push(cur);
        }
    }
    out
}
