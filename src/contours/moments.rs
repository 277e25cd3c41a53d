use super::Point;

/// Spatial moments (up to second order) of a closed polygon.
///
/// Computed with Green's theorem over the polygon edges, so the values
/// describe the area enclosed by the traced boundary through pixel centres.
/// Orientation is normalised: a clockwise and a counter-clockwise trace of
/// the same outline give identical, non-negative `m00`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Moments {
    pub m00: f64,
    pub m10: f64,
    pub m01: f64,
    pub m20: f64,
    pub m11: f64,
    pub m02: f64,
}

const AREA_EPS: f64 = 1e-7;

impl Moments {
    pub fn from_polygon(points: &[Point]) -> Self {
        let Some(&last) = points.last() else {
            return Self::default();
        };
        let (mut a00, mut a10, mut a01) = (0.0f64, 0.0f64, 0.0f64);
        let (mut a20, mut a11, mut a02) = (0.0f64, 0.0f64, 0.0f64);

        let (mut xp, mut yp) = (last.x as f64, last.y as f64);
        for p in points {
            let (xi, yi) = (p.x as f64, p.y as f64);
            let dxy = xp * yi - xi * yp;
            let xs = xp + xi;
            let ys = yp + yi;

            a00 += dxy;
            a10 += dxy * xs;
            a01 += dxy * ys;
            a20 += dxy * (xp * xs + xi * xi);
            a11 += dxy * (xp * (ys + yp) + xi * (ys + yi));
            a02 += dxy * (yp * ys + yi * yi);

            xp = xi;
            yp = yi;
        }

        if a00.abs() <= AREA_EPS {
            return Self::default();
        }
        let sign = a00.signum();
        Self {
            m00: a00 * 0.5 * sign,
            m10: a10 / 6.0 * sign,
            m01: a01 / 6.0 * sign,
            m20: a20 / 12.0 * sign,
            m11: a11 / 24.0 * sign,
            m02: a02 / 12.0 * sign,
        }
    }

    /// True when the outline encloses no area.
    pub fn is_degenerate(&self) -> bool {
        self.m00 <= AREA_EPS
    }

    /// `(m10 / m00, m01 / m00)`, or `None` for degenerate outlines.
    pub fn centroid(&self) -> Option<(f64, f64)> {
        (!self.is_degenerate()).then(|| (self.m10 / self.m00, self.m01 / self.m00))
    }

    /// Central second-order moments `(mu20, mu11, mu02)`.
    pub fn central(&self) -> (f64, f64, f64) {
        let Some((cx, cy)) = self.centroid() else {
            return (0.0, 0.0, 0.0);
        };
        (
            self.m20 - cx * self.m10,
            self.m11 - cx * self.m01,
            self.m02 - cy * self.m01,
        )
    }

    /// Ratio of the minor to the major principal inertia, in `[0, 1]`.
    ///
    /// 1 for isotropic shapes (discs, squares), near 0 for elongated ones.
    pub fn inertia_ratio(&self) -> f64 {
        let (mu20, mu11, mu02) = self.central();
        let denom = ((2.0 * mu11).powi(2) + (mu20 - mu02).powi(2)).sqrt();
        if denom <= 1e-2 {
            return 1.0;
        }
        let cos_min = (mu20 - mu02) / denom;
        let sin_min = 2.0 * mu11 / denom;
        let half_sum = 0.5 * (mu20 + mu02);
        let half_diff = 0.5 * (mu20 - mu02);
        let i_min = half_sum - half_diff * cos_min - mu11 * sin_min;
        let i_max = half_sum + half_diff * cos_min + mu11 * sin_min;
        if i_max <= 0.0 {
            return 0.0;
        }
        (i_min / i_max).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x0: i32, y0: i32, x1: i32, y1: i32) -> Vec<Point> {
        vec![
            Point::new(x0, y0),
            Point::new(x1, y0),
            Point::new(x1, y1),
            Point::new(x0, y1),
        ]
    }

    #[test]
    fn rectangle_area_and_centroid() {
        let m = Moments::from_polygon(&rect(2, 4, 6, 6));
        assert!((m.m00 - 8.0).abs() < 1e-9);
        let (cx, cy) = m.centroid().unwrap();
        assert!((cx - 4.0).abs() < 1e-9);
        assert!((cy - 5.0).abs() < 1e-9);
    }

    #[test]
    fn orientation_does_not_change_moments() {
        let cw = rect(0, 0, 3, 2);
        let mut ccw = cw.clone();
        ccw.reverse();
        assert_eq!(Moments::from_polygon(&cw), Moments::from_polygon(&ccw));
    }

    #[test]
    fn lines_and_points_are_degenerate() {
        assert!(Moments::from_polygon(&[Point::new(3, 3)]).is_degenerate());
        let line = [Point::new(0, 0), Point::new(5, 0)];
        assert!(Moments::from_polygon(&line).centroid().is_none());
        assert!(Moments::from_polygon(&[]).is_degenerate());
    }

    #[test]
    fn square_is_isotropic_and_bar_is_not() {
        let square = Moments::from_polygon(&rect(0, 0, 10, 10));
        assert!((square.inertia_ratio() - 1.0).abs() < 1e-6);
        let bar = Moments::from_polygon(&rect(0, 0, 40, 2));
        assert!(bar.inertia_ratio() < 0.01, "ratio {}", bar.inertia_ratio());
    }
}
