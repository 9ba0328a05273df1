//! Unit tests for hazmap-routing.
//!
//! Networks are hand-built lines and grids around central Taipei, plus one
//! generated road for the end-to-end distance check.

#[cfg(test)]
mod helpers {
    use hazmap_core::{GeoPoint, NodeId, RoadType};
    use hazmap_network::{NodeAttrs, RoadNetwork, RoadNetworkBuilder};

    pub const ORIGIN: GeoPoint = GeoPoint { lat: 25.0418, lon: 121.5120 };

    /// `n` nodes due east of [`ORIGIN`], `spacing_m` apart, on one named
    /// local street.
    pub fn named_line(n: usize, spacing_m: f64, name: &str) -> (RoadNetwork, Vec<NodeId>) {
        let mut b = RoadNetworkBuilder::new();
        let ids: Vec<NodeId> = (0..n)
            .map(|i| b.upsert_node(ORIGIN.offset_m(0.0, i as f64 * spacing_m), named(name)))
            .collect();
        for w in ids.windows(2) {
            b.add_road(w[0], w[1], RoadType::Local, 40.0);
        }
        (b.build(), ids)
    }

    pub fn named(name: &str) -> NodeAttrs {
        NodeAttrs { road_name: Some(name.to_string()), ..NodeAttrs::default() }
    }

    /// `rows × cols` lattice with `spacing_m` between neighbours.  Node
    /// `r * cols + c` sits `r` rows north and `c` columns east of
    /// [`ORIGIN`].  Rows listed in `highway_rows` are built as highways.
    pub fn grid(rows: usize, cols: usize, spacing_m: f64, highway_rows: &[usize]) -> RoadNetwork {
        let mut b = RoadNetworkBuilder::new();
        for r in 0..rows {
            for c in 0..cols {
                b.add_node(ORIGIN.offset_m(r as f64 * spacing_m, c as f64 * spacing_m));
            }
        }
        let id = |r: usize, c: usize| NodeId((r * cols + c) as u32);
        for r in 0..rows {
            for c in 0..cols {
                if c + 1 < cols {
                    if highway_rows.contains(&r) {
                        b.add_road(id(r, c), id(r, c + 1), RoadType::Highway, 100.0);
                    } else {
                        b.add_road(id(r, c), id(r, c + 1), RoadType::Local, 40.0);
                    }
                }
                if r + 1 < rows {
                    b.add_road(id(r, c), id(r + 1, c), RoadType::Local, 40.0);
                }
            }
        }
        b.build()
    }

    pub fn pos(net: &RoadNetwork, id: u32) -> GeoPoint {
        net.node(NodeId(id)).pos
    }
}

// ── Cost model ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod cost {
    use hazmap_core::{NodeId, TrafficCondition, TravelMode};
    use crate::{CostModel, Objective};
    use super::helpers::{grid, named_line};

    #[test]
    fn base_costs_follow_objective() {
        let (net, ids) = named_line(2, 100.0, "Roosevelt Rd");
        let e = net.edge_between(ids[0], ids[1]).unwrap();
        let seg = net.segment(e);

        assert_eq!(CostModel::new(Objective::Distance).edge_cost(&net, e), seg.distance_m);
        assert!((CostModel::new(Objective::Time).edge_cost(&net, e) - seg.travel_time_s * 10.0).abs() < 1e-9);
        assert_eq!(CostModel::new(Objective::Safety).edge_cost(&net, e), seg.distance_m);
    }

    #[test]
    fn hazard_penalty_uses_entered_node() {
        let (mut net, ids) = named_line(2, 100.0, "Roosevelt Rd");
        net.set_hazard_level(ids[1], 2.0).unwrap();
        let fwd = net.edge_between(ids[0], ids[1]).unwrap();
        let back = net.edge_between(ids[1], ids[0]).unwrap();
        let d = net.segment(fwd).distance_m;

        let safety = CostModel::new(Objective::Safety);
        assert!((safety.edge_cost(&net, fwd) - (d + 2000.0)).abs() < 1e-9);
        assert!((safety.edge_cost(&net, back) - d).abs() < 1e-9);
    }

    #[test]
    fn traffic_multiplies_cost() {
        let (mut net, ids) = named_line(2, 100.0, "Roosevelt Rd");
        let e = net.edge_between(ids[0], ids[1]).unwrap();
        let d = net.segment(e).distance_m;
        let model = CostModel::new(Objective::Distance);

        for (cond, factor) in [
            (TrafficCondition::Smooth, 1.0),
            (TrafficCondition::Slow, 1.5),
            (TrafficCondition::Congested, 2.0),
            (TrafficCondition::Blocked, 10.0),
        ] {
            net.set_traffic(e, cond).unwrap();
            assert!((model.edge_cost(&net, e) - d * factor).abs() < 1e-9, "{cond:?}");
        }
    }

    #[test]
    fn avoid_hazards_adds_penalty_once() {
        let (mut net, ids) = named_line(2, 100.0, "Roosevelt Rd");
        net.set_hazard_level(ids[1], 3.0).unwrap();
        let e = net.edge_between(ids[0], ids[1]).unwrap();
        let d = net.segment(e).distance_m;

        let avoid = |objective| CostModel { avoid_hazards: true, ..CostModel::new(objective) };
        assert!((avoid(Objective::Distance).edge_cost(&net, e) - (d + 3000.0)).abs() < 1e-9);
        assert_eq!(
            avoid(Objective::Safety).edge_cost(&net, e),
            CostModel::new(Objective::Safety).edge_cost(&net, e),
        );
    }

    #[test]
    fn prefer_highways_discounts_highway_segments_only() {
        let net = grid(2, 2, 100.0, &[0]);
        let highway = net.edge_between(NodeId(0), NodeId(1)).unwrap();
        let local = net.edge_between(NodeId(0), NodeId(2)).unwrap();
        let model = CostModel { prefer_highways: true, ..CostModel::new(Objective::Distance) };

        assert!((model.edge_cost(&net, highway) - net.segment(highway).distance_m * 0.8).abs() < 1e-9);
        assert_eq!(model.edge_cost(&net, local), net.segment(local).distance_m);
    }

    #[test]
    fn non_driving_modes_use_average_speed() {
        let (net, ids) = named_line(2, 140.0, "Roosevelt Rd");
        let e = net.edge_between(ids[0], ids[1]).unwrap();
        let seg = net.segment(e);
        let walk = CostModel { mode: TravelMode::Walking, ..CostModel::new(Objective::Time) };
        assert!((walk.segment_time_s(seg) - seg.distance_m / 1.4).abs() < 1e-9);
        assert_eq!(CostModel::new(Objective::Time).segment_time_s(seg), seg.travel_time_s);
    }

    #[test]
    fn per_meter_bound_holds_on_every_segment() {
        let mut net = grid(3, 3, 100.0, &[1]);
        net.set_hazard_level(NodeId(4), 5.0).unwrap();
        for objective in [Objective::Distance, Objective::Time, Objective::Safety] {
            for prefer_highways in [false, true] {
                let model = CostModel { prefer_highways, ..CostModel::new(objective) };
                let per_meter = model.min_cost_per_meter(&net);
                for (i, seg) in net.segments.iter().enumerate() {
                    let cost = model.edge_cost(&net, hazmap_core::EdgeId(i as u32));
                    assert!(cost + 1e-9 >= seg.distance_m * per_meter, "{objective} edge {i}");
                }
            }
        }
    }

    #[test]
    fn unknown_objective_falls_back_to_distance() {
        assert_eq!(Objective::from("scenic"), Objective::Distance);
        assert_eq!(Objective::from(""), Objective::Distance);
        assert_eq!(Objective::from("TIME"), Objective::Time);
        assert_eq!(Objective::from(" safety "), Objective::Safety);
        assert_eq!(Objective::from("fastest".to_string()), Objective::Time);
    }
}

// ── Path search ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod search {
    use hazmap_core::{GeoPoint, NodeId, RoadType, TrafficCondition};
    use hazmap_network::{NetworkError, RoadNetworkBuilder};
    use crate::{AStarRouter, CostModel, HeuristicPolicy, Objective, RouteError, Router};
    use super::helpers::{grid, named_line, ORIGIN};

    #[test]
    fn same_node_is_trivial_path() {
        let (net, ids) = named_line(3, 100.0, "Roosevelt Rd");
        let path = AStarRouter.find_path(&net, ids[1], ids[1], &CostModel::default()).unwrap();
        assert_eq!(path.nodes, vec![ids[1]]);
        assert!(path.is_trivial());
        assert_eq!(path.cost, 0.0);
    }

    #[test]
    fn follows_line() {
        let (net, ids) = named_line(5, 100.0, "Roosevelt Rd");
        let path = AStarRouter.find_path(&net, ids[0], ids[4], &CostModel::default()).unwrap();
        assert_eq!(path.nodes, ids);
        assert_eq!(path.edges.len(), 4);
        for (k, &e) in path.edges.iter().enumerate() {
            assert_eq!(net.segment(e).from, path.nodes[k]);
            assert_eq!(net.segment(e).to, path.nodes[k + 1]);
        }
    }

    #[test]
    fn disconnected_is_no_route() {
        let mut b = RoadNetworkBuilder::new();
        let a = b.add_node(ORIGIN);
        let c = b.add_node(ORIGIN.offset_m(0.0, 100.0));
        let far = b.add_node(ORIGIN.offset_m(0.0, 500.0));
        let far2 = b.add_node(ORIGIN.offset_m(0.0, 600.0));
        b.add_road(a, c, RoadType::Local, 40.0);
        b.add_road(far, far2, RoadType::Local, 40.0);
        let net = b.build();

        let err = AStarRouter.find_path(&net, a, far2, &CostModel::default()).unwrap_err();
        assert!(matches!(err, RouteError::NoRoute { from, to } if from == a && to == far2));
    }

    #[test]
    fn unknown_node_is_network_error() {
        let (net, ids) = named_line(2, 100.0, "Roosevelt Rd");
        let err = AStarRouter.find_path(&net, ids[0], NodeId(99), &CostModel::default()).unwrap_err();
        assert!(matches!(err, RouteError::Network(NetworkError::NodeNotFound(NodeId(99)))));
    }

    #[test]
    fn distance_prefers_direct_link() {
        let mut b = RoadNetworkBuilder::new();
        let a = b.add_node(ORIGIN);
        let via = b.add_node(ORIGIN.offset_m(300.0, 250.0));
        let goal = b.add_node(ORIGIN.offset_m(0.0, 500.0));
        b.add_road(a, via, RoadType::Arterial, 60.0);
        b.add_road(via, goal, RoadType::Arterial, 60.0);
        b.add_road(a, goal, RoadType::Alley, 20.0);
        let net = b.build();

        let short = AStarRouter.find_path(&net, a, goal, &CostModel::new(Objective::Distance)).unwrap();
        assert_eq!(short.nodes, vec![a, goal]);

        // The detour is ~780 m at 60 km/h against 500 m at 20 km/h.
        let fast = AStarRouter.find_path(&net, a, goal, &CostModel::new(Objective::Time)).unwrap();
        assert_eq!(fast.nodes, vec![a, via, goal]);
    }

    #[test]
    fn safety_detours_around_hazard() {
        let mut net = grid(3, 3, 100.0, &[]);
        net.set_hazard_level(NodeId(4), 5.0).unwrap();
        let (from, to) = (NodeId(3), NodeId(5));

        let short = AStarRouter.find_path(&net, from, to, &CostModel::new(Objective::Distance)).unwrap();
        assert_eq!(short.nodes, vec![from, NodeId(4), to]);

        let safe = AStarRouter.find_path(&net, from, to, &CostModel::new(Objective::Safety)).unwrap();
        assert!(!safe.nodes.contains(&NodeId(4)));
        assert_eq!(safe.nodes.len(), 5);
    }

    #[test]
    fn blocked_segment_is_bypassed_but_not_forbidden() {
        let mut net = grid(3, 3, 100.0, &[]);
        let blocked = net.edge_between(NodeId(3), NodeId(4)).unwrap();
        net.set_traffic(blocked, TrafficCondition::Blocked).unwrap();

        let path = AStarRouter.find_path(&net, NodeId(3), NodeId(5), &CostModel::default()).unwrap();
        assert!(!path.edges.contains(&blocked));

        // With no alternative the blocked segment is still usable.
        let (mut line, ids) = named_line(2, 100.0, "Roosevelt Rd");
        let e = line.edge_between(ids[0], ids[1]).unwrap();
        line.set_traffic(e, TrafficCondition::Blocked).unwrap();
        let path = AStarRouter.find_path(&line, ids[0], ids[1], &CostModel::default()).unwrap();
        assert_eq!(path.edges, vec![e]);
    }

    #[test]
    fn equal_cost_tie_goes_to_lowest_id() {
        // Mirror-image detours on the equator have bit-identical lengths.
        let mut b = RoadNetworkBuilder::new();
        let a = b.add_node(GeoPoint::new(0.0, 0.0));
        let south = b.add_node(GeoPoint::new(-0.001, 0.001));
        let north = b.add_node(GeoPoint::new(0.001, 0.001));
        let goal = b.add_node(GeoPoint::new(0.0, 0.002));
        for mid in [north, south] {
            b.add_road(a, mid, RoadType::Local, 40.0);
            b.add_road(mid, goal, RoadType::Local, 40.0);
        }
        let net = b.build();

        for heuristic in [HeuristicPolicy::Admissible, HeuristicPolicy::Zero] {
            let model = CostModel { heuristic, ..CostModel::default() };
            let path = AStarRouter.find_path(&net, a, goal, &model).unwrap();
            assert_eq!(path.nodes, vec![a, south, goal], "{heuristic:?}");
        }
    }

    #[test]
    fn admissible_matches_dijkstra() {
        let mut net = grid(5, 5, 120.0, &[2]);
        net.set_hazard_level(NodeId(12), 4.0).unwrap();
        net.set_hazard_level(NodeId(7), 1.5).unwrap();
        let slow = net.edge_between(NodeId(10), NodeId(11)).unwrap();
        net.set_traffic(slow, TrafficCondition::Congested).unwrap();

        for objective in [Objective::Distance, Objective::Time, Objective::Safety] {
            for prefer_highways in [false, true] {
                let model = CostModel { prefer_highways, ..CostModel::new(objective) };
                let dijkstra = CostModel { heuristic: HeuristicPolicy::Zero, ..model };
                let a = AStarRouter.find_path(&net, NodeId(0), NodeId(24), &model).unwrap();
                let d = AStarRouter.find_path(&net, NodeId(0), NodeId(24), &dijkstra).unwrap();
                assert!(
                    (a.cost - d.cost).abs() <= 1e-9 * d.cost.max(1.0),
                    "{objective} highways={prefer_highways}: {} vs {}",
                    a.cost,
                    d.cost,
                );
            }
        }
    }

    #[test]
    fn haversine_heuristic_can_miss_fast_detour() {
        // Local street straight to the goal, or a highway loop to the north
        // that takes far less time.  Raw metres overestimate time cost on the
        // highway, so the haversine search settles for the street.
        let mut b = RoadNetworkBuilder::new();
        let street: Vec<NodeId> = (0..=10).map(|i| b.add_node(ORIGIN.offset_m(0.0, i as f64 * 100.0))).collect();
        for w in street.windows(2) {
            b.add_road(w[0], w[1], RoadType::Local, 40.0);
        }
        let on_ramp = b.add_node(ORIGIN.offset_m(100.0, 0.0));
        let off_ramp = b.add_node(ORIGIN.offset_m(100.0, 1_000.0));
        b.add_road(street[0], on_ramp, RoadType::Local, 40.0);
        b.add_road(on_ramp, off_ramp, RoadType::Highway, 100.0);
        b.add_road(off_ramp, street[10], RoadType::Local, 40.0);
        let net = b.build();

        let (from, to) = (street[0], street[10]);
        let search_with = |heuristic: HeuristicPolicy| {
            let model = CostModel { heuristic, ..CostModel::new(Objective::Time) };
            AStarRouter.find_path(&net, from, to, &model).unwrap()
        };
        let haversine = search_with(HeuristicPolicy::Haversine);
        let admissible = search_with(HeuristicPolicy::Admissible);
        let dijkstra = search_with(HeuristicPolicy::Zero);

        assert_eq!(haversine.nodes, street);
        assert_eq!(dijkstra.nodes, vec![from, on_ramp, off_ramp, to]);
        assert_eq!(admissible.nodes, dijkstra.nodes);
        assert!((admissible.cost - dijkstra.cost).abs() < 1e-9);
        assert!(haversine.cost > dijkstra.cost * 1.5, "{} vs {}", haversine.cost, dijkstra.cost);
    }

    #[test]
    fn path_cost_matches_edge_sum() {
        let mut net = grid(4, 4, 100.0, &[1]);
        net.set_hazard_level(NodeId(5), 2.0).unwrap();
        let model = CostModel { avoid_hazards: true, ..CostModel::new(Objective::Time) };
        let path = AStarRouter.find_path(&net, NodeId(0), NodeId(15), &model).unwrap();
        let sum: f64 = path.edges.iter().map(|&e| model.edge_cost(&net, e)).sum();
        assert!((path.cost - sum).abs() < 1e-6);
    }
}

// ── Instructions ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod instructions {
    use hazmap_core::geo::turn_angle_deg;
    use crate::instructions::build_instructions;
    use crate::{classify_turn, format_distance, Maneuver, Turn};
    use super::helpers::ORIGIN;

    #[test]
    fn turn_boundaries() {
        assert_eq!(classify_turn(0.0), Turn::Straight);
        assert_eq!(classify_turn(14.99), Turn::Straight);
        assert_eq!(classify_turn(-14.99), Turn::Straight);
        assert_eq!(classify_turn(15.0), Turn::SlightRight);
        assert_eq!(classify_turn(-15.0), Turn::SlightLeft);
        assert_eq!(classify_turn(44.99), Turn::SlightRight);
        assert_eq!(classify_turn(45.0), Turn::Right);
        assert_eq!(classify_turn(-45.0), Turn::Left);
        assert_eq!(classify_turn(134.99), Turn::Right);
        assert_eq!(classify_turn(135.0), Turn::SharpRight);
        assert_eq!(classify_turn(-135.0), Turn::SharpLeft);
        assert_eq!(classify_turn(180.0), Turn::SharpRight);
    }

    #[test]
    fn colinear_is_straight() {
        let a = ORIGIN;
        let b = ORIGIN.offset_m(0.0, 100.0);
        let c = ORIGIN.offset_m(0.0, 200.0);
        let angle = turn_angle_deg(a.bearing_deg(b), b.bearing_deg(c));
        assert_eq!(classify_turn(angle), Turn::Straight);
    }

    #[test]
    fn right_angle_bend_is_right() {
        let a = ORIGIN;
        let b = ORIGIN.offset_m(0.0, 100.0);
        let c = b.offset_m(-100.0, 0.0);
        let angle = turn_angle_deg(a.bearing_deg(b), b.bearing_deg(c));
        assert_eq!(classify_turn(angle), Turn::Right);

        let left = b.offset_m(100.0, 0.0);
        let angle = turn_angle_deg(a.bearing_deg(b), b.bearing_deg(left));
        assert_eq!(classify_turn(angle), Turn::Left);
    }

    #[test]
    fn distance_formatting() {
        assert_eq!(format_distance(0.0), "0 m");
        assert_eq!(format_distance(123.0), "120 m");
        assert_eq!(format_distance(996.0), "1.0 km");
        assert_eq!(format_distance(1234.0), "1.2 km");
        assert_eq!(format_distance(15_500.0), "15.5 km");
    }

    #[test]
    fn l_shaped_route() {
        let corner = ORIGIN.offset_m(0.0, 200.0);
        let points = vec![
            ORIGIN,
            ORIGIN.offset_m(0.0, 100.0),
            corner,
            corner.offset_m(-100.0, 0.0),
            corner.offset_m(-200.0, 0.0),
        ];
        let roads = vec![
            Some("Zhongxiao E. Rd"),
            Some("Zhongxiao E. Rd"),
            Some("Zhongxiao E. Rd"),
            Some("Fuxing S. Rd"),
            Some("Fuxing S. Rd"),
        ];
        let steps = build_instructions(&points, &roads, 0);
        let texts: Vec<&str> = steps.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(
            texts,
            vec![
                "Head east on Zhongxiao E. Rd",
                "In 200 m, turn right onto Fuxing S. Rd",
                "In 200 m, arrive at your destination",
            ]
        );
        assert_eq!(steps[1].maneuver, Maneuver::Turn(Turn::Right));
        assert_eq!(steps[1].point_index, 2);
        assert_eq!(steps[1].road.as_deref(), Some("Fuxing S. Rd"));
        assert_eq!(steps[2].maneuver, Maneuver::Arrive);
    }

    #[test]
    fn straight_name_change_announced() {
        let points: Vec<_> = (0..5).map(|i| ORIGIN.offset_m(0.0, i as f64 * 100.0)).collect();
        let roads = vec![
            Some("Roosevelt Rd"),
            Some("Roosevelt Rd"),
            Some("Roosevelt Rd"),
            Some("Xinsheng S. Rd"),
            Some("Xinsheng S. Rd"),
        ];
        let steps = build_instructions(&points, &roads, 0);
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[1].maneuver, Maneuver::Continue);
        assert_eq!(steps[1].point_index, 2);
        assert_eq!(steps[1].text, "In 200 m, continue onto Xinsheng S. Rd");
    }

    #[test]
    fn sampling_adds_straight_reminders() {
        let points: Vec<_> = (0..6).map(|i| ORIGIN.offset_m(0.0, i as f64 * 100.0)).collect();
        let roads = vec![None; 6];

        let turns_only = build_instructions(&points, &roads, 0);
        assert_eq!(turns_only.len(), 2);
        assert_eq!(turns_only[0].text, "Head east");
        assert_eq!(turns_only[1].text, "In 500 m, arrive at your destination");

        let sampled = build_instructions(&points, &roads, 2);
        assert_eq!(sampled.len(), 4);
        assert_eq!(sampled[1].point_index, 2);
        assert_eq!(sampled[1].text, "In 200 m, continue straight");
        assert_eq!(sampled[2].point_index, 4);
    }

    #[test]
    fn repeated_points_are_ignored() {
        let b = ORIGIN.offset_m(0.0, 100.0);
        let points = vec![ORIGIN, ORIGIN, b, b];
        let steps = build_instructions(&points, &[None; 4], 0);
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].maneuver, Maneuver::Depart);

        let still = build_instructions(&[ORIGIN, ORIGIN], &[None, None], 0);
        assert_eq!(still.len(), 1);
        assert_eq!(still[0].maneuver, Maneuver::Arrive);
    }

    #[test]
    fn wobbly_dense_corner_announced_once() {
        // 10 m sampling east then south, with 1.5 m sideways wobble on every
        // fifth point away from the corner.
        let wobble = |i: usize| if i % 5 == 3 { if (i / 5) % 2 == 0 { 1.5 } else { -1.5 } } else { 0.0 };
        let corner = ORIGIN.offset_m(0.0, 200.0);
        let mut points: Vec<_> = (0..=20).map(|i| ORIGIN.offset_m(wobble(i), i as f64 * 10.0)).collect();
        points.extend((21..=40).map(|i| corner.offset_m(-((i - 20) as f64) * 10.0, wobble(i))));

        let steps = build_instructions(&points, &vec![None; points.len()], 0);
        let texts: Vec<&str> = steps.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(
            texts,
            vec!["Head east", "In 200 m, turn right", "In 200 m, arrive at your destination"]
        );
        assert_eq!(steps[1].point_index, 20);
        assert_eq!(steps[1].maneuver, Maneuver::Turn(Turn::Right));
    }
}

// ── Route assembly & planner ──────────────────────────────────────────────────

#[cfg(test)]
mod planner {
    use hazmap_core::{CoreError, GeoPoint, NodeId, RoadType, TravelMode};
    use hazmap_network::{GeneratorConfig, MajorRoad, NetworkGenerator, RoadNetwork, RoadNetworkBuilder};
    use crate::route::risk_score;
    use crate::{
        plan_route, Maneuver, Objective, RouteError, RouteOptions, RoutePlanner, VariantRequest,
    };
    use super::helpers::{grid, named, named_line, pos, ORIGIN};

    #[test]
    fn eleven_node_straight_road() {
        let start = GeoPoint::new(25.0418, 121.5120);
        let end = GeoPoint::new(25.0418, 121.5720);
        let len = start.distance_m(end);
        let config = GeneratorConfig { road_interval_m: len / 10.0, ..GeneratorConfig::straight() };
        let road = MajorRoad {
            name:            "Civic Blvd".to_string(),
            road_type:       RoadType::Arterial,
            speed_limit_kmh: None,
            width_m:         None,
            waypoints:       vec![start, end],
        };
        let net = NetworkGenerator::new(config).unwrap().generate(&[], &[road]).unwrap();
        assert_eq!(net.node_count(), 11);

        let route = plan_route(&net, start, end, &RouteOptions::default()).unwrap();
        assert_eq!(route.nodes.len(), 11);
        assert!((route.total_distance_m - len).abs() / len < 0.01, "{}", route.total_distance_m);
        let expected_time = len / (60.0 / 3.6);
        assert!((route.total_time_s - expected_time).abs() / expected_time < 0.01);
        assert_eq!(route.risk_score, 0.0);
        assert_eq!(route.instruction_texts().first(), Some(&"Head east on Civic Blvd"));
    }

    #[test]
    fn generated_road_with_default_jitter_reads_straight() {
        let start = GeoPoint::new(25.0418, 121.5120);
        let end = GeoPoint::new(25.0418, 121.5720);
        let road = MajorRoad {
            name:            "Civic Blvd".to_string(),
            road_type:       RoadType::Arterial,
            speed_limit_kmh: None,
            width_m:         None,
            waypoints:       vec![start, end],
        };
        let net = NetworkGenerator::new(GeneratorConfig::default())
            .unwrap()
            .generate(&[], &[road])
            .unwrap();
        assert!(net.node_count() > 500);

        let route = plan_route(&net, start, end, &RouteOptions::default()).unwrap();
        assert_eq!(route.nodes.len(), net.node_count());
        let maneuvers: Vec<Maneuver> = route.instructions.iter().map(|s| s.maneuver).collect();
        assert_eq!(maneuvers, vec![Maneuver::Depart, Maneuver::Arrive], "{:?}", route.instruction_texts());
        assert_eq!(route.instruction_texts()[0], "Head east on Civic Blvd");
    }

    #[test]
    fn endpoints_are_snapped_nodes() {
        let (net, ids) = named_line(6, 100.0, "Roosevelt Rd");
        let start = net.node(ids[1]).pos.offset_m(20.0, 0.0);
        let end = net.node(ids[4]).pos.offset_m(-15.0, 0.0);
        let route = plan_route(&net, start, end, &RouteOptions::default()).unwrap();

        assert_eq!(route.start_node(), Some(ids[1]));
        assert_eq!(route.end_node(), Some(ids[4]));
        assert_eq!(route.points.first(), Some(&start));
        assert_eq!(route.points.last(), Some(&end));
        assert_eq!(route.points.len(), route.nodes.len() + 2);
        assert!((route.total_distance_m - (300.0 + 20.0 + 15.0)).abs() < 1.0);
    }

    #[test]
    fn connector_legs_use_mode_speed() {
        let (net, ids) = named_line(3, 100.0, "Roosevelt Rd");
        let start = net.node(ids[0]).pos.offset_m(50.0, 0.0);
        let end = net.node(ids[2]).pos;

        let drive = plan_route(&net, start, end, &RouteOptions::default()).unwrap();
        let network_s: f64 = drive.segments.iter().map(|&e| net.segment(e).travel_time_s).sum();
        let connector_s = start.distance_m(net.node(ids[0]).pos) / (30.0 / 3.6);
        assert!((drive.total_time_s - (network_s + connector_s)).abs() < 1e-6);

        let walk_opts = RouteOptions { mode: TravelMode::Walking, ..RouteOptions::default() };
        let walk = plan_route(&net, start, end, &walk_opts).unwrap();
        assert!((walk.total_time_s - walk.total_distance_m / 1.4).abs() < 1e-6);
    }

    #[test]
    fn risk_score_is_rounded_mean() {
        assert_eq!(risk_score([1.0, 2.0, 2.0]), 1.7);
        assert_eq!(risk_score([0.0, 0.0, 5.0, 5.0]), 2.5);
        assert_eq!(risk_score(std::iter::empty()), 0.0);

        let (mut net, ids) = named_line(3, 100.0, "Roosevelt Rd");
        net.set_hazard_level(ids[1], 2.0).unwrap();
        let route = RoutePlanner::new(&net)
            .plan_between_nodes(ids[0], ids[2], &RouteOptions::default())
            .unwrap();
        assert_eq!(route.risk_score, 0.7);
    }

    #[test]
    fn unmappable_point_rejected() {
        let (net, _) = named_line(3, 100.0, "Roosevelt Rd");
        let far = ORIGIN.offset_m(5_000.0, 0.0);
        let err = plan_route(&net, far, ORIGIN, &RouteOptions::default()).unwrap_err();
        match err {
            RouteError::Unmappable { point, distance_m, max_m } => {
                assert_eq!(point, far);
                assert!(distance_m > 4_900.0);
                assert_eq!(max_m, 1_000.0);
            }
            other => panic!("unexpected error {other:?}"),
        }

        let loose = RouteOptions { max_snap_distance_m: 10_000.0, ..RouteOptions::default() };
        assert!(plan_route(&net, far, ORIGIN, &loose).is_ok());
    }

    #[test]
    fn empty_network_and_bad_coordinates() {
        let empty = RoadNetwork::empty();
        let err = plan_route(&empty, ORIGIN, ORIGIN, &RouteOptions::default()).unwrap_err();
        assert!(matches!(err, RouteError::EmptyNetwork));

        let (net, _) = named_line(2, 100.0, "Roosevelt Rd");
        let bad = GeoPoint::new(95.0, 121.5);
        let err = plan_route(&net, bad, ORIGIN, &RouteOptions::default()).unwrap_err();
        assert!(matches!(err, RouteError::Core(CoreError::InvalidCoordinate { .. })));
    }

    #[test]
    fn disconnected_points_fail_with_no_route() {
        let mut b = RoadNetworkBuilder::new();
        let a = b.upsert_node(ORIGIN, named("Roosevelt Rd"));
        let c = b.upsert_node(ORIGIN.offset_m(0.0, 100.0), named("Roosevelt Rd"));
        let d = b.upsert_node(ORIGIN.offset_m(0.0, 800.0), named("Heping E. Rd"));
        let e = b.upsert_node(ORIGIN.offset_m(0.0, 900.0), named("Heping E. Rd"));
        b.add_road(a, c, RoadType::Local, 40.0);
        b.add_road(d, e, RoadType::Local, 40.0);
        let net = b.build();

        let err = plan_route(&net, ORIGIN, net.node(e).pos, &RouteOptions::default()).unwrap_err();
        assert!(matches!(err, RouteError::NoRoute { .. }));
    }

    #[test]
    fn same_point_gives_trivial_route() {
        let (net, ids) = named_line(3, 100.0, "Roosevelt Rd");
        let p = net.node(ids[1]).pos;
        let route = plan_route(&net, p, p, &RouteOptions::default()).unwrap();
        assert!(route.is_trivial());
        assert_eq!(route.nodes, vec![ids[1]]);
        assert_eq!(route.total_distance_m, 0.0);
        assert_eq!(route.instruction_texts(), vec!["Arrive at your destination"]);
    }

    #[test]
    fn planned_turns_reach_instructions() {
        let mut b = RoadNetworkBuilder::new();
        let corner = ORIGIN.offset_m(0.0, 200.0);
        let ids = [
            b.upsert_node(ORIGIN, named("Zhongxiao E. Rd")),
            b.upsert_node(ORIGIN.offset_m(0.0, 100.0), named("Zhongxiao E. Rd")),
            b.upsert_node(corner, named("Zhongxiao E. Rd")),
            b.upsert_node(corner.offset_m(-100.0, 0.0), named("Fuxing S. Rd")),
            b.upsert_node(corner.offset_m(-200.0, 0.0), named("Fuxing S. Rd")),
        ];
        for w in ids.windows(2) {
            b.add_road(w[0], w[1], RoadType::Arterial, 60.0);
        }
        let net = b.build();

        let route = plan_route(&net, ORIGIN, corner.offset_m(-200.0, 0.0), &RouteOptions::default()).unwrap();
        assert_eq!(
            route.instruction_texts(),
            vec![
                "Head east on Zhongxiao E. Rd",
                "In 200 m, turn right onto Fuxing S. Rd",
                "In 200 m, arrive at your destination",
            ]
        );
    }

    #[test]
    fn variants_trade_risk_for_distance() {
        let mut net = grid(3, 3, 100.0, &[]);
        net.set_hazard_level(NodeId(4), 5.0).unwrap();
        let planner = RoutePlanner::new(&net);
        let (start, end) = (pos(&net, 3), pos(&net, 5));

        let v = planner.plan_variants(start, end, &VariantRequest::default()).unwrap();
        assert_eq!(v.safest.objective, Objective::Safety);
        assert_eq!(v.fastest.objective, Objective::Time);
        assert_eq!(v.balanced.objective, Objective::Distance);

        assert!(!v.safest.nodes.contains(&NodeId(4)));
        assert!(v.balanced.nodes.contains(&NodeId(4)));
        assert!(v.fastest.nodes.contains(&NodeId(4)));
        assert_eq!(v.safest.risk_score, 0.0);
        assert!(v.balanced.risk_score > v.safest.risk_score);
        assert!(v.safest.total_distance_m > v.balanced.total_distance_m);

        let names: Vec<&str> = v.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["safest", "fastest", "balanced"]);
    }

    #[test]
    fn prefer_safety_applies_to_every_variant() {
        let mut net = grid(3, 3, 100.0, &[]);
        net.set_hazard_level(NodeId(4), 5.0).unwrap();
        let planner = RoutePlanner::new(&net);
        let request = VariantRequest { prefer_safety: true, ..VariantRequest::default() };

        let v = planner.plan_variants(pos(&net, 3), pos(&net, 5), &request).unwrap();
        for (name, route) in v.iter() {
            assert!(!route.nodes.contains(&NodeId(4)), "{name}");
        }
    }

    #[test]
    fn unknown_objective_plans_by_distance() {
        let mut net = grid(3, 3, 100.0, &[]);
        net.set_hazard_level(NodeId(4), 5.0).unwrap();
        let (start, end) = (pos(&net, 3), pos(&net, 5));

        let fallback = RouteOptions::optimize_for(Objective::from("scenic"));
        let distance = RouteOptions::optimize_for(Objective::Distance);
        let a = plan_route(&net, start, end, &fallback).unwrap();
        let b = plan_route(&net, start, end, &distance).unwrap();
        assert_eq!(a.nodes, b.nodes);
        assert_eq!(a.objective, Objective::Distance);
    }
}
