#![allow(dead_code)]

use geo::{polygon, MultiPolygon};
use muland_data::{project, Headers, Location, ModelData, RowKey, TableName, ZoneId};
use rand::{rngs::StdRng, seq::SliceRandom};

pub const MODEL: &str = "boston";
pub const AGENTS: [i64; 2] = [1, 2];
pub const TYPES: [i64; 2] = [1, 2];

/// 2x2 grid of zones over Boston, split at (-71.05, 42.35):
/// 101 SW, 102 SE, 103 NW, 104 NE.
pub const CELLS: [(ZoneId, [f64; 4]); 4] = [
    (101, [-71.10, 42.30, -71.05, 42.35]),
    (102, [-71.05, 42.30, -71.00, 42.35]),
    (103, [-71.10, 42.35, -71.05, 42.40]),
    (104, [-71.05, 42.35, -71.00, 42.40]),
];

pub fn make_headers() -> Headers {
    Headers {
        zones: vec!["INDAREA".into(), "COMAREA".into()],
        agents: vec!["HHINC".into()],
        agents_zones: vec!["ACC".into()],
        real_estates_zones: vec!["LOTSIZE".into(), "BUILT".into()],
    }
}

/// A lon/lat rectangle as a polygon in the projected plane.
pub fn cell_shape([west, south, east, north]: [f64; 4]) -> MultiPolygon<f64> {
    let sw = project(west, south);
    let ne = project(east, north);
    MultiPolygon(vec![polygon![
        (x: sw.x, y: sw.y),
        (x: ne.x, y: sw.y),
        (x: ne.x, y: ne.y),
        (x: sw.x, y: ne.y),
        (x: sw.x, y: sw.y),
    ]])
}

pub fn zone_data(zone: ZoneId) -> Vec<f64> {
    vec![zone as f64 / 1000.0, zone as f64 / 100.0]
}

pub fn rent_adjustment(ty: i64, zone: ZoneId) -> f64 {
    ty as f64 + zone as f64 * 0.001
}

pub fn bid_adjustment(agent: i64, ty: i64, zone: ZoneId) -> f64 {
    (agent * 100 + ty * 10 + zone % 100) as f64
}

pub fn accessibility(agent: i64, zone: ZoneId) -> f64 {
    zone as f64 * 10.0 + agent as f64
}

/// The boston model. With `rng`, every row is inserted in shuffled order.
pub fn make_model(id: i64, headers: Headers, rng: Option<&mut StdRng>) -> ModelData {
    let mut zones = CELLS.iter()
        .map(|&(zone, bounds)| (zone, cell_shape(bounds), zone_data(zone)))
        .collect::<Vec<_>>();

    let mut keyed = Vec::new();
    for &(zone, _) in &CELLS {
        for agent in AGENTS {
            keyed.push((TableName::AgentsZones, RowKey::agent_zone(agent, zone), vec![accessibility(agent, zone)]));
            for ty in TYPES {
                let key = RowKey::agent_zone_type(agent, ty, zone);
                keyed.push((TableName::BidsAdjustments, key, vec![bid_adjustment(agent, ty, zone)]));
                keyed.push((TableName::DemandExogenousCutoff, key, vec![1.0]));
                keyed.push((TableName::Subsidies, key, vec![0.5]));
            }
        }
        for ty in TYPES {
            let key = RowKey::zone_type(ty, zone);
            keyed.push((TableName::RealEstatesZones, key, vec![1.0, zone as f64, ty as f64]));
            keyed.push((TableName::RentAdjustments, key, vec![rent_adjustment(ty, zone)]));
            keyed.push((TableName::Supply, key, vec![ty as f64 * 10.0]));
        }
    }

    let mut records = vec![
        (TableName::Agents, vec![1.0, 1.0, 1.0, 0.0, 35_000.0]),
        (TableName::Agents, vec![2.0, 1.0, 2.0, 0.0, 90_000.0]),
        (TableName::Demand, vec![1.0, 1200.0]),
        (TableName::Demand, vec![2.0, 800.0]),
        (TableName::BidsFunctions, vec![1.0, 1.0, 1.0, 0.5, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 1.0, 0.0, 0.0, 1.0]),
        (TableName::BidsFunctions, vec![1.0, 2.0, 1.0, 0.7, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 1.0, 0.0, 0.0, 1.0]),
        (TableName::RentFunctions, vec![1.0, 1.0, 1.0, 0.2, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0]),
        (TableName::RentFunctions, vec![1.0, 2.0, 1.5, 0.1, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0]),
    ];

    if let Some(rng) = rng {
        zones.shuffle(rng);
        keyed.shuffle(rng);
        records.shuffle(rng);
    }

    let mut model = ModelData::new(id, MODEL, headers);
    for (zone, shape, data) in zones {
        model.add_zone(zone, shape, data);
    }
    for (table, key, payload) in keyed {
        model.add_row(table, key, payload).unwrap();
    }
    for (table, record) in records {
        model.add_record(table, record).unwrap();
    }
    model
}

/// SW with type 1, NE with types 1 and 2, SE with no types.
pub fn make_locations() -> Vec<Location> {
    vec![
        Location::new(-71.07, 42.32, vec![1]),
        Location::new(-71.02, 42.38, vec![1, 2]),
        Location::new(-71.03, 42.31, vec![]),
    ]
}
