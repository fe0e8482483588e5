use crate::{
    error::{Error, Result},
    model::{AgentId, Model, TypeId},
    point::Point,
    resolve::ZoneMap,
    store::LookupKey,
    table::Scope,
};

/// Build the lookup list of a keyed table, in caller point order.
///
/// Zone: one key per point. AgentZone: one per (point, agent).
/// ZoneType: one per (point, type). AgentZoneType: one per (point, type, agent).
/// Agents are expected in ascending id order.
pub(crate) fn expand_keys(
    model: &Model,
    scope: Scope,
    points: &[Point],
    zones: &ZoneMap,
    agents: &[AgentId],
) -> Result<Vec<LookupKey>> {
    let mut keys = Vec::new();
    for point in points {
        let zone = zones.get(point.index).ok_or_else(|| Error::PointOutsideCoverage {
            model: model.name().to_string(),
            indices: vec![point.index],
        })?;
        let key = |ty: Option<TypeId>, agent: Option<AgentId>| LookupKey { point: point.index, zone, ty, agent };

        match scope {
            Scope::Model => {}
            Scope::Zone => keys.push(key(None, None)),
            Scope::AgentZone => keys.extend(agents.iter().map(|&agent| key(None, Some(agent)))),
            Scope::ZoneType => keys.extend(point.types.iter().map(|&ty| key(Some(ty), None))),
            Scope::AgentZoneType => {
                for &ty in &point.types {
                    keys.extend(agents.iter().map(|&agent| key(Some(ty), Some(agent))));
                }
            }
        }
    }
    Ok(keys)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        model::{Headers, ModelHandle},
        point::Location,
    };

    fn make_test_model() -> Model {
        Model::new(ModelHandle { id: 1, name: "test".into() }, Headers::default())
    }

    fn make_test_points() -> Vec<Point> {
        Point::from_locations(&[
            Location::new(0.0, 0.0, vec![2, 1]),
            Location::new(0.0, 0.0, vec![]),
            Location::new(0.0, 0.0, vec![3]),
        ])
    }

    fn make_test_zones() -> ZoneMap {
        [(0, 40), (1, 40), (2, 7)].into_iter().collect()
    }

    fn summary(keys: &[LookupKey]) -> Vec<(usize, i64, Option<i64>, Option<i64>)> {
        keys.iter().map(|k| (k.point, k.zone, k.ty, k.agent)).collect()
    }

    #[test]
    fn zone_scope_is_one_key_per_point() {
        let keys = expand_keys(&make_test_model(), Scope::Zone, &make_test_points(), &make_test_zones(), &[1, 2]).unwrap();
        assert_eq!(summary(&keys), vec![(0, 40, None, None), (1, 40, None, None), (2, 7, None, None)]);
    }

    #[test]
    fn type_scope_follows_requested_type_order() {
        let keys = expand_keys(&make_test_model(), Scope::ZoneType, &make_test_points(), &make_test_zones(), &[]).unwrap();
        assert_eq!(summary(&keys), vec![(0, 40, Some(2), None), (0, 40, Some(1), None), (2, 7, Some(3), None)]);
    }

    #[test]
    fn agent_type_scope_nests_agents_inside_types() {
        let keys = expand_keys(&make_test_model(), Scope::AgentZoneType, &make_test_points(), &make_test_zones(), &[1, 5]).unwrap();
        assert_eq!(summary(&keys), vec![
            (0, 40, Some(2), Some(1)),
            (0, 40, Some(2), Some(5)),
            (0, 40, Some(1), Some(1)),
            (0, 40, Some(1), Some(5)),
            (2, 7, Some(3), Some(1)),
            (2, 7, Some(3), Some(5)),
        ]);
    }

    #[test]
    fn agent_zone_scope_ignores_types() {
        let keys = expand_keys(&make_test_model(), Scope::AgentZone, &make_test_points(), &make_test_zones(), &[3]).unwrap();
        assert_eq!(summary(&keys), vec![(0, 40, None, Some(3)), (1, 40, None, Some(3)), (2, 7, None, Some(3))]);
    }

    #[test]
    fn unresolved_point_is_outside_coverage() {
        let zones = [(0, 40)].into_iter().collect::<ZoneMap>();
        let err = expand_keys(&make_test_model(), Scope::Zone, &make_test_points(), &zones, &[]).unwrap_err();
        assert!(matches!(err, Error::PointOutsideCoverage { ref indices, .. } if indices == &vec![1]));
    }
}
