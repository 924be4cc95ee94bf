use std::f64::consts::{PI, TAU};

use cgmath::Vector2;

pub fn lerp(a: f64, b: f64, v: f64) -> f64 {
    a + v * (b - a)
}

#[inline]
pub fn calc_progress(current: f64, start: f64, end: f64) -> f64 {
    (current - start) / (end - start)
}

pub fn distance(a: Vector2<f64>, b: Vector2<f64>) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    (dx * dx + dy * dy).sqrt()
}

/// Point along a control path at parameter `t`, clamped to `[0, 1]`.
///
/// One point pins the path in place, two points interpolate linearly,
/// three trace a quadratic Bézier with the middle point as control.
pub fn point_at(points: &[Vector2<f64>], t: f64) -> Vector2<f64> {
    let t = t.clamp(0.0, 1.0);

    match points {
        [] => Vector2::new(0.0, 0.0),
        [p] => *p,
        [a, b] => Vector2::new(lerp(a.x, b.x, t), lerp(a.y, b.y, t)),
        [a, c, b, ..] => {
            let u = 1.0 - t;
            Vector2::new(
                u * u * a.x + 2.0 * u * t * c.x + t * t * b.x,
                u * u * a.y + 2.0 * u * t * c.y + t * t * b.y,
            )
        }
    }
}

/// Angle of `p` around `center`, in radians within `[-PI, PI]`.
pub fn angle_about(center: Vector2<f64>, p: Vector2<f64>) -> f64 {
    (p.y - center.y).atan2(p.x - center.x)
}

/// Signed angular difference `to - from`, wrapped into `[-PI, PI]` so a
/// sweep across the `+PI/-PI` seam never reads as a near-full turn.
pub fn wrap_angle_delta(from: f64, to: f64) -> f64 {
    let mut delta = to - from;

    while delta > PI {
        delta -= TAU;
    }
    while delta < -PI {
        delta += TAU;
    }

    delta
}

#[test]
pub fn test_progress() {
    assert_eq!(calc_progress(50.0, 0.0, 100.0), 0.50);
}

#[test]
pub fn test_distance() {
    let a = Vector2::new(0.0, 0.0);
    let b = Vector2::new(3.0, 4.0);

    assert_eq!(distance(a, b), 5.0);
    assert_eq!(distance(b, a), 5.0);
}

#[test]
pub fn test_point_at_endpoints() {
    let straight = [Vector2::new(10.0, 20.0), Vector2::new(50.0, 80.0)];
    assert_eq!(point_at(&straight, 0.0), straight[0]);
    assert_eq!(point_at(&straight, 1.0), straight[1]);

    let curved = [
        Vector2::new(0.0, 0.0),
        Vector2::new(50.0, 100.0),
        Vector2::new(100.0, 0.0),
    ];
    assert_eq!(point_at(&curved, 0.0), curved[0]);
    assert_eq!(point_at(&curved, 1.0), curved[2]);

    // out-of-range parameters clamp instead of extrapolating
    assert_eq!(point_at(&straight, -2.0), straight[0]);
    assert_eq!(point_at(&straight, 3.0), straight[1]);
}

#[test]
pub fn test_point_at_quadratic_midpoint() {
    let curved = [
        Vector2::new(0.0, 0.0),
        Vector2::new(50.0, 100.0),
        Vector2::new(100.0, 0.0),
    ];

    // 0.25*P0 + 0.5*P1 + 0.25*P2
    let mid = point_at(&curved, 0.5);
    assert_eq!(mid, Vector2::new(50.0, 50.0));
}

#[test]
pub fn test_wrap_angle_delta_seam() {
    let before = PI - 0.1;
    let after = -PI + 0.1;

    let delta = wrap_angle_delta(before, after);
    assert!((delta - 0.2).abs() < 1e-9);
    assert!(delta.abs() <= PI);

    let back = wrap_angle_delta(after, before);
    assert!((back + 0.2).abs() < 1e-9);
}
