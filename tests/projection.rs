// Cross-checks the projector against an independent spherical Mercator (proj4rs).

use geo::Coord;
use muland_data::{project, unproject, MAX_LATITUDE};
use proj4rs::{proj::Proj, transform::transform};
use rand::{rngs::StdRng, Rng, SeedableRng};

const GEOGRAPHIC: &str = "+proj=longlat +a=6378137 +b=6378137 +no_defs";
const MERCATOR: &str = "+proj=merc +a=6378137 +b=6378137 +lat_ts=0 +lon_0=0 +x_0=0 +y_0=0 +k=1 +units=m +no_defs";

fn reference(lng: f64, lat: f64) -> Coord<f64> {
    let from = Proj::from_proj_string(GEOGRAPHIC).unwrap();
    let to = Proj::from_proj_string(MERCATOR).unwrap();
    let mut point = (lng.to_radians(), lat.to_radians(), 0.0);
    transform(&from, &to, &mut point).unwrap();
    Coord { x: point.0, y: point.1 }
}

#[test]
fn matches_reference_mercator() {
    let mut rng = StdRng::seed_from_u64(900913);
    for _ in 0..500 {
        let lng = rng.random_range(-180.0..180.0);
        let lat = rng.random_range(-85.0..85.0);

        let ours = project(lng, lat);
        let theirs = reference(lng, lat);
        assert!((ours.x - theirs.x).abs() < 1e-3, "x at ({lng}, {lat}): {} vs {}", ours.x, theirs.x);
        assert!((ours.y - theirs.y).abs() < 1e-3, "y at ({lng}, {lat}): {} vs {}", ours.y, theirs.y);
    }
}

#[test]
fn inverse_recovers_coordinates() {
    let mut rng = StdRng::seed_from_u64(3857);
    for _ in 0..500 {
        let lng = rng.random_range(-180.0..180.0);
        let lat = rng.random_range(-MAX_LATITUDE..MAX_LATITUDE);

        let (back_lng, back_lat) = unproject(project(lng, lat));
        assert!((back_lng - lng).abs() < 1e-9);
        assert!((back_lat - lat).abs() < 1e-9);
    }
}

#[test]
fn polar_latitudes_clamp_to_the_bound() {
    let bound = project(0.0, MAX_LATITUDE);
    for lat in [85.06, 88.0, 90.0, 120.0] {
        assert_eq!(project(0.0, lat), bound);
        assert!((project(0.0, -lat).y + bound.y).abs() < 1e-6);
    }
}
