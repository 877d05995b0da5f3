//! Brush geometry for area painting

use glam::IVec2;

/// All integer points within `radius` of `(cx, cy)` (Euclidean, inclusive)
///
/// Points are not clipped to any grid, only to the `i32` range. A negative
/// radius yields nothing.
pub fn circle_points(cx: i32, cy: i32, radius: i32) -> Vec<IVec2> {
    let (lo, hi) = (i32::MIN as i64, i32::MAX as i64);
    disk(cx, cy, radius, (lo, hi), (lo, hi))
}

/// The part of the disk that lies on a `width` x `height` grid
///
/// Only the grid-clipped bounding box is visited, so huge radii or far-away
/// centers cost no more than the grid itself.
pub fn circle_points_within(
    cx: i32,
    cy: i32,
    radius: i32,
    width: usize,
    height: usize,
) -> Vec<IVec2> {
    disk(
        cx,
        cy,
        radius,
        (0, width as i64 - 1),
        (0, height as i64 - 1),
    )
}

fn disk(cx: i32, cy: i32, radius: i32, xs: (i64, i64), ys: (i64, i64)) -> Vec<IVec2> {
    if radius < 0 {
        return Vec::new();
    }

    // |dx|, |dy| <= radius < 2^31, so the squared sum fits in i64
    let (cx, cy, r) = (cx as i64, cy as i64, radius as i64);
    let r2 = r * r;
    let mut points = Vec::new();

    for y in (cy - r).max(ys.0)..=(cy + r).min(ys.1) {
        let dy = y - cy;
        for x in (cx - r).max(xs.0)..=(cx + r).min(xs.1) {
            let dx = x - cx;
            if dx * dx + dy * dy <= r2 {
                points.push(IVec2::new(x as i32, y as i32));
            }
        }
    }

    points
}

/// Points of the straight segment `(x0, y0)`-`(x1, y1)` that lie on a
/// `width` x `height` grid, both ends included
///
/// One point per step along the longer axis; the other coordinate is rounded
/// half away from zero. Only steps whose long-axis coordinate is on the grid
/// are visited.
pub fn line_points_within(
    (x0, y0): (i32, i32),
    (x1, y1): (i32, i32),
    width: usize,
    height: usize,
) -> Vec<IVec2> {
    let (x0, y0, x1, y1) = (x0 as i64, y0 as i64, x1 as i64, y1 as i64);
    let (dx, dy) = (x1 - x0, y1 - y0);
    let (w, h) = (width as i64, height as i64);

    let x_major = dx.abs() >= dy.abs();
    let (start, delta, len, minor_start, minor_delta, minor_len) = if x_major {
        (x0, dx, w, y0, dy, h)
    } else {
        (y0, dy, h, x0, dx, w)
    };
    let steps = delta.abs();
    let dir = delta.signum();

    // Step indices whose major coordinate lands in [0, len)
    let (first, last) = match dir {
        1 => ((-start).max(0), (len - 1 - start).min(steps)),
        -1 => ((start - (len - 1)).max(0), start.min(steps)),
        _ => (0, 0),
    };

    let mut points = Vec::new();
    for i in first..=last {
        let major = start + dir * i;
        let minor = minor_start + round_div(i as i128 * minor_delta as i128, steps as i128) as i64;
        if !(0..len).contains(&major) || !(0..minor_len).contains(&minor) {
            continue;
        }
        let (x, y) = if x_major { (major, minor) } else { (minor, major) };
        points.push(IVec2::new(x as i32, y as i32));
    }

    points
}

/// `n / d` rounded half away from zero; zero when `d` is zero
fn round_div(n: i128, d: i128) -> i128 {
    if d == 0 {
        return 0;
    }
    let q = (2 * n.abs() + d) / (2 * d);
    if n < 0 { -q } else { q }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radius_zero_is_center() {
        assert_eq!(circle_points(7, -3, 0), vec![IVec2::new(7, -3)]);
    }

    #[test]
    fn test_negative_radius_is_empty() {
        assert!(circle_points(0, 0, -1).is_empty());
    }

    #[test]
    fn test_radius_one_is_plus_shape() {
        let mut points = circle_points(0, 0, 1);
        points.sort_by_key(|p| (p.x, p.y));
        assert_eq!(
            points,
            vec![
                IVec2::new(-1, 0),
                IVec2::new(0, -1),
                IVec2::new(0, 0),
                IVec2::new(0, 1),
                IVec2::new(1, 0),
            ]
        );
    }

    #[test]
    fn test_circle_points_near_i32_limits() {
        let mut points = circle_points(i32::MAX, i32::MIN, 1);
        points.sort_by_key(|p| (p.x, p.y));
        assert_eq!(
            points,
            vec![
                IVec2::new(i32::MAX - 1, i32::MIN),
                IVec2::new(i32::MAX, i32::MIN),
                IVec2::new(i32::MAX, i32::MIN + 1),
            ]
        );
    }

    #[test]
    fn test_circle_within_clips_huge_radius() {
        assert_eq!(circle_points_within(2, 1, i32::MAX, 4, 3).len(), 12);
        assert_eq!(circle_points_within(i32::MIN, 0, i32::MAX, 4, 3).len(), 0);
        assert_eq!(circle_points_within(i32::MAX, i32::MAX, 5, 4, 3).len(), 0);
    }

    #[test]
    fn test_circle_within_matches_clipped_disk() {
        for radius in 0..6 {
            let mut clipped: Vec<_> = circle_points(3, 0, radius)
                .into_iter()
                .filter(|p| (0..5).contains(&p.x) && (0..4).contains(&p.y))
                .collect();
            let mut within = circle_points_within(3, 0, radius, 5, 4);
            clipped.sort_by_key(|p| (p.x, p.y));
            within.sort_by_key(|p| (p.x, p.y));
            assert_eq!(within, clipped);
        }
    }

    #[test]
    fn test_line_includes_both_ends() {
        let points = line_points_within((1, 1), (6, 3), 10, 10);
        assert_eq!(points.len(), 6);
        assert_eq!(points.first(), Some(&IVec2::new(1, 1)));
        assert_eq!(points.last(), Some(&IVec2::new(6, 3)));
        assert!(points.contains(&IVec2::new(3, 2)));
    }

    #[test]
    fn test_line_steep_and_reversed() {
        let points = line_points_within((2, 7), (1, 0), 10, 10);
        assert_eq!(points.len(), 8);
        assert_eq!(points.first(), Some(&IVec2::new(2, 7)));
        assert_eq!(points.last(), Some(&IVec2::new(1, 0)));
    }

    #[test]
    fn test_line_single_point() {
        assert_eq!(line_points_within((4, 4), (4, 4), 5, 5), vec![IVec2::new(4, 4)]);
        assert!(line_points_within((5, 4), (5, 4), 5, 5).is_empty());
    }

    #[test]
    fn test_line_with_extreme_ends_is_clipped() {
        let row = line_points_within((i32::MIN, 2), (i32::MAX, 2), 10, 5);
        assert_eq!(row.len(), 10);
        assert!(row.iter().all(|p| p.y == 2));

        let diagonal = line_points_within((i32::MIN, i32::MIN), (i32::MAX, i32::MAX), 10, 10);
        assert_eq!(diagonal.len(), 10);
        assert!(diagonal.iter().all(|p| p.x == p.y));

        let reversed = line_points_within((i32::MAX, 0), (i32::MIN, 0), 3, 1);
        assert_eq!(reversed.len(), 3);
        assert_eq!(reversed.first(), Some(&IVec2::new(2, 0)));
    }

    #[test]
    fn test_disk_is_exact() {
        for radius in 0..12 {
            let (cx, cy) = (5, -2);
            let points = circle_points(cx, cy, radius);

            let mut expected = 0;
            for y in (cy - radius - 1)..=(cy + radius + 1) {
                for x in (cx - radius - 1)..=(cx + radius + 1) {
                    let inside = (x - cx).pow(2) + (y - cy).pow(2) <= radius * radius;
                    assert_eq!(points.contains(&IVec2::new(x, y)), inside);
                    expected += inside as usize;
                }
            }
            assert_eq!(points.len(), expected);
        }
    }
}
