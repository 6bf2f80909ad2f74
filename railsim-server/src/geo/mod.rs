//! Geodesic helpers.
//!
//! Distances use the Hubeny approximation on the GRS80/WGS84 ellipsoid,
//! which is accurate to well under a metre over the station-to-station
//! spans this crate deals with. Curve radii are derived from three points
//! via the circumscribed circle of the triangle they form.

use serde::{Deserialize, Serialize};

/// Equatorial radius of the reference ellipsoid (metres).
pub const EQUATORIAL_RADIUS_M: f64 = 6_378_137.000;

/// Polar radius of the reference ellipsoid (metres).
pub const POLAR_RADIUS_M: f64 = 6_356_752.314;

/// Largest curve radius ever reported. Anything flatter counts as straight.
pub const MAX_CURVE_RADIUS_M: f64 = 6000.0;

/// Triangles with a smaller area (square metres) are treated as collinear.
const MIN_TRIANGLE_AREA_M2: f64 = 0.01;

/// A point on the map, in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coord {
    pub lat: f64,
    pub lon: f64,
}

impl Coord {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Ellipsoidal distance between two points in metres (Hubeny formula).
///
/// # Examples
///
/// ```
/// use railsim_server::geo::{Coord, distance};
///
/// let tokyo = Coord::new(35.681236, 139.767125);
/// assert_eq!(distance(tokyo, tokyo), 0.0);
///
/// // One minute of latitude is roughly one nautical mile.
/// let north = Coord::new(35.681236 + 1.0 / 60.0, 139.767125);
/// let d = distance(tokyo, north);
/// assert!((d - 1850.0).abs() < 10.0);
/// ```
pub fn distance(a: Coord, b: Coord) -> f64 {
    let e2 = (EQUATORIAL_RADIUS_M.powi(2) - POLAR_RADIUS_M.powi(2)) / EQUATORIAL_RADIUS_M.powi(2);

    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();
    let mean_lat = (lat_a + lat_b) / 2.0;
    let d_lat = lat_a - lat_b;
    let d_lon = a.lon.to_radians() - b.lon.to_radians();

    let w = (1.0 - e2 * mean_lat.sin().powi(2)).sqrt();
    // Meridian and prime-vertical radii of curvature at the mean latitude.
    let m = EQUATORIAL_RADIUS_M * (1.0 - e2) / w.powi(3);
    let n = EQUATORIAL_RADIUS_M / w;

    ((d_lat * m).powi(2) + (d_lon * n * mean_lat.cos()).powi(2)).sqrt()
}

/// Radius (metres) of the circle through three points.
///
/// Near-collinear input yields [`MAX_CURVE_RADIUS_M`]; the result is
/// never negative and never exceeds it.
pub fn curvature_radius(p1: Coord, p2: Coord, p3: Coord) -> f64 {
    let a = distance(p1, p2);
    let b = distance(p2, p3);
    let c = distance(p3, p1);

    // Heron's formula
    let s = (a + b + c) / 2.0;
    let area_sq = s * (s - a) * (s - b) * (s - c);
    if area_sq.is_nan() || area_sq <= 0.0 {
        return MAX_CURVE_RADIUS_M;
    }
    let area = area_sq.sqrt();
    if area < MIN_TRIANGLE_AREA_M2 {
        return MAX_CURVE_RADIUS_M;
    }

    let radius = (a * b * c) / (4.0 * area);
    if radius.is_finite() {
        radius.min(MAX_CURVE_RADIUS_M)
    } else {
        MAX_CURVE_RADIUS_M
    }
}

/// Total length of a polyline in metres.
pub fn polyline_length(points: &[Coord]) -> f64 {
    points.windows(2).map(|w| distance(w[0], w[1])).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coincident_points_are_zero() {
        let p = Coord::new(34.7025, 135.4959);
        assert_eq!(distance(p, p), 0.0);
    }

    #[test]
    fn matches_reference_value() {
        // Tokyo station to Shin-Osaka station.
        let tokyo = Coord::new(35.681236, 139.767125);
        let shin_osaka = Coord::new(34.733480, 135.500299);
        let d = distance(tokyo, shin_osaka);
        assert!((d - 402_502.493_264).abs() < 1e-3, "got {d}");
    }

    #[test]
    fn east_west_shrinks_with_latitude() {
        let equator = distance(Coord::new(0.0, 0.0), Coord::new(0.0, 0.01));
        let north = distance(Coord::new(60.0, 0.0), Coord::new(60.0, 0.01));
        assert!(north < equator * 0.55);
        assert!(north > equator * 0.45);
    }

    #[test]
    fn collinear_points_are_straight() {
        let p1 = Coord::new(35.0, 139.0);
        let p2 = Coord::new(35.001, 139.0);
        let p3 = Coord::new(35.002, 139.0);
        assert_eq!(curvature_radius(p1, p2, p3), MAX_CURVE_RADIUS_M);
    }

    #[test]
    fn repeated_points_are_straight() {
        let p = Coord::new(35.0, 139.0);
        assert_eq!(curvature_radius(p, p, p), MAX_CURVE_RADIUS_M);
    }

    #[test]
    fn tight_curve_has_small_radius() {
        // Three points on a circle of ~200 m radius.
        let centre = Coord::new(35.0, 139.0);
        let r_deg_lat = 200.0 / 111_000.0;
        let r_deg_lon = 200.0 / (111_000.0 * 35.0_f64.to_radians().cos());
        let on_circle = |theta: f64| {
            Coord::new(
                centre.lat + r_deg_lat * theta.sin(),
                centre.lon + r_deg_lon * theta.cos(),
            )
        };
        let r = curvature_radius(on_circle(0.0), on_circle(0.5), on_circle(1.0));
        assert!((r - 200.0).abs() < 5.0, "got {r}");
    }

    #[test]
    fn polyline_length_sums_segments() {
        let pts = [
            Coord::new(35.0, 139.0),
            Coord::new(35.001, 139.0),
            Coord::new(35.002, 139.0),
        ];
        let whole = distance(pts[0], pts[2]);
        assert!((polyline_length(&pts) - whole).abs() < 1e-3);
        assert_eq!(polyline_length(&pts[..1]), 0.0);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn coord() -> impl Strategy<Value = Coord> {
        (-85.0f64..85.0, -180.0f64..180.0).prop_map(|(lat, lon)| Coord::new(lat, lon))
    }

    /// Points within a few kilometres of each other, as on a rail line.
    fn nearby_triple() -> impl Strategy<Value = (Coord, Coord, Coord)> {
        (coord(), -0.02f64..0.02, -0.02f64..0.02, -0.02f64..0.02, -0.02f64..0.02).prop_map(
            |(base, a, b, c, d)| {
                (
                    base,
                    Coord::new(base.lat + a, base.lon + b),
                    Coord::new(base.lat + c, base.lon + d),
                )
            },
        )
    }

    proptest! {
        #[test]
        fn distance_to_self_is_zero(p in coord()) {
            prop_assert_eq!(distance(p, p), 0.0);
        }

        #[test]
        fn distance_is_symmetric(a in coord(), b in coord()) {
            prop_assert_eq!(distance(a, b), distance(b, a));
        }

        #[test]
        fn distance_is_finite_and_non_negative(a in coord(), b in coord()) {
            let d = distance(a, b);
            prop_assert!(d.is_finite());
            prop_assert!(d >= 0.0);
        }

        #[test]
        fn radius_is_bounded((p1, p2, p3) in nearby_triple()) {
            let r = curvature_radius(p1, p2, p3);
            prop_assert!(r >= 0.0);
            prop_assert!(r <= MAX_CURVE_RADIUS_M);
        }

        #[test]
        fn collinear_radius_is_capped(base in coord(), step in 0.0001f64..0.01, n in 1u32..4) {
            let p1 = base;
            let p2 = Coord::new(base.lat + step, base.lon);
            let p3 = Coord::new(base.lat + step * f64::from(n + 1), base.lon);
            prop_assert_eq!(curvature_radius(p1, p2, p3), MAX_CURVE_RADIUS_M);
        }
    }
}
