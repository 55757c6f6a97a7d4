use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use junction_lanes::{
    assign_lanes, fold_sharp_turns, mirror_assignments, Handedness, JunctionTally, LaneAssignment, LaneConnector,
    LaneDirectionCounts, LaneId, OrderedLanes, Settings, TurnFlags,
};

const SCENARIOS: usize = 400;

/// Representative turn angle for each direction bucket, left to right.
const ROAD_ANGLES: [f32; 5] = [-150.0, -90.0, 0.0, 90.0, 150.0];

struct Scenario {
    incoming: Vec<(LaneId, f32, bool)>,
    tally: JunctionTally,
}

fn random_scenario(rng: &mut StdRng) -> Scenario {
    let incoming_count = rng.gen_range(1..=6);
    let incoming = (0..incoming_count)
        .map(|i| (LaneId(i as u32 + 1), i as f32 * 3.0, rng.gen_bool(0.2)))
        .collect();

    let mut tally = JunctionTally::new();
    let mut next_id = 100;
    for angle in ROAD_ANGLES {
        let lane_count = rng.gen_range(0..=3);
        if lane_count == 0 {
            continue;
        }
        let lanes = OrderedLanes::from_lanes((0..lane_count).map(|i| {
            next_id += 1;
            (LaneId(next_id), i as f32 * 3.0, rng.gen_bool(0.2))
        }));
        tally.add_road(&lanes, angle);
    }

    Scenario { incoming, tally }
}

fn all_settings() -> Vec<Settings> {
    let mut settings = Vec::new();
    for traffic in [Handedness::RightHand, Handedness::LeftHand] {
        for legacy_mode in [false, true] {
            settings.push(Settings::new(traffic, legacy_mode));
        }
    }
    settings
}

fn union(a: &LaneAssignment, b: &LaneAssignment) -> (usize, usize) {
    (a.first_target.min(b.first_target), a.last_target.max(b.last_target))
}

#[test]
fn test_assignments_cover_every_lane_within_bounds() {
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..SCENARIOS {
        let scenario = random_scenario(&mut rng);
        let incoming = OrderedLanes::from_lanes(scenario.incoming.iter().copied());

        for settings in all_settings() {
            let connector = LaneConnector::new(settings);
            let result = connector.connect(&incoming, &scenario.tally);

            if scenario.tally.lane_count() == 0 {
                assert!(result.is_none());
                continue;
            }

            let result = result.expect("junction with outgoing lanes is always connected");
            assert_eq!(result.lanes.len(), incoming.len());
            assert_eq!(result.outgoing_lane_count, scenario.tally.lane_count());

            let ids: Vec<LaneId> = result.lanes.iter().map(|(id, _)| *id).collect();
            assert_eq!(ids, incoming.ids());

            for (_, assignment) in &result.lanes {
                assert!(assignment.first_target <= assignment.last_target, "{}", assignment);
                assert!(assignment.last_target < result.outgoing_lane_count, "{}", assignment);
            }
        }
    }
}

#[test]
fn test_assignment_is_deterministic() {
    let mut rng = StdRng::seed_from_u64(11);

    for _ in 0..SCENARIOS {
        let scenario = random_scenario(&mut rng);
        let incoming = OrderedLanes::from_lanes(scenario.incoming.iter().copied());

        for settings in all_settings() {
            let connector = LaneConnector::new(settings);
            assert_eq!(
                connector.connect(&incoming, &scenario.tally),
                connector.connect(&incoming, &scenario.tally)
            );
        }
    }
}

#[test]
fn test_bus_lanes_do_not_disturb_ordinary_lanes() {
    let mut rng = StdRng::seed_from_u64(23);

    for _ in 0..SCENARIOS {
        let scenario = random_scenario(&mut rng);
        if scenario.tally.lane_count() == 0 || scenario.incoming.iter().all(|(_, _, is_bus)| *is_bus) {
            continue;
        }

        let with_bus = OrderedLanes::from_lanes(scenario.incoming.iter().copied());
        let without_bus =
            OrderedLanes::from_lanes(scenario.incoming.iter().copied().filter(|(_, _, is_bus)| !is_bus));
        let is_bus: Vec<bool> = with_bus.iter().map(|lane| lane.is_transit).collect();

        for settings in all_settings() {
            let connector = LaneConnector::new(settings);
            let full = connector
                .connect(&with_bus, &scenario.tally)
                .expect("scenario has outgoing lanes")
                .assignments();
            let ordinary = connector
                .connect(&without_bus, &scenario.tally)
                .expect("scenario has outgoing lanes")
                .assignments();

            let kept: Vec<LaneAssignment> = full
                .iter()
                .zip(&is_bus)
                .filter(|(_, bus)| !**bus)
                .map(|(assignment, _)| *assignment)
                .collect();
            assert_eq!(kept, ordinary);

            for (index, assignment) in full.iter().enumerate().filter(|(i, _)| is_bus[*i]) {
                assert_eq!(assignment.direction, TurnFlags::NONE);

                let left = index.checked_sub(1).map(|i| full[i]);
                let right = (index + 1..full.len()).find(|&i| !is_bus[i]).map(|i| full[i]);
                let expected = match (left, right) {
                    (Some(left), Some(right)) => union(&left, &right),
                    (Some(only), None) | (None, Some(only)) => (only.first_target, only.last_target),
                    (None, None) => unreachable!("at least one ordinary lane"),
                };
                assert_eq!((assignment.first_target, assignment.last_target), expected);
            }
        }
    }
}

#[test]
fn test_mirroring_twice_restores_assignments() {
    let mut rng = StdRng::seed_from_u64(31);

    for _ in 0..SCENARIOS {
        let counts = LaneDirectionCounts::new(0, rng.gen_range(0..=3), rng.gen_range(0..=3), rng.gen_range(0..=3), 0);
        let incoming = rng.gen_range(1..=6);
        let outgoing = counts.total();

        let original = assign_lanes(incoming, &counts, Handedness::RightHand);
        let mut lanes = original.clone();

        mirror_assignments(&mut lanes, outgoing);
        for lane in &lanes {
            assert!(lane.last_target < outgoing.max(1));
        }
        mirror_assignments(&mut lanes, outgoing);

        assert_eq!(lanes, original);
    }
}

#[test]
fn test_sharp_fold_stops_as_soon_as_lanes_fit() {
    let mut rng = StdRng::seed_from_u64(43);

    for _ in 0..SCENARIOS {
        let mut counts = LaneDirectionCounts::new(
            rng.gen_range(0..=3),
            rng.gen_range(0..=2),
            rng.gen_range(0..=2),
            rng.gen_range(0..=2),
            rng.gen_range(0..=3),
        );
        let before = counts;
        let incoming = rng.gen_range(1..=6);

        let folded = fold_sharp_turns(&mut counts, incoming);

        assert_eq!(counts.total(), before.total());
        assert_eq!(counts.sharp() + folded, before.sharp());
        assert!(counts.connectable() >= incoming || counts.sharp() == 0);
        if folded > 0 {
            assert!(counts.connectable() - 1 < incoming);
        }
    }
}

/// Roads as (angle, lane kinds left to right); `true` marks a bus lane.
fn random_roads(rng: &mut StdRng) -> Vec<(f32, Vec<bool>)> {
    ROAD_ANGLES
        .iter()
        .map(|&angle| {
            let lane_count = rng.gen_range(0..=3);
            (angle, (0..lane_count).map(|_| rng.gen_bool(0.35)).collect::<Vec<bool>>())
        })
        .filter(|(_, lanes)| !lanes.is_empty())
        .collect()
}

/// Builds the tally, or the tally of the junction's mirror image: angles
/// negated and every road's lanes reversed.
fn tally_of(roads: &[(f32, Vec<bool>)], mirrored: bool) -> JunctionTally {
    let mut tally = JunctionTally::new();
    let mut next_id = 100;
    for (angle, kinds) in roads {
        let lanes = OrderedLanes::from_lanes(kinds.iter().enumerate().map(|(i, &is_bus)| {
            next_id += 1;
            let position = i as f32 * 3.0;
            (LaneId(next_id), if mirrored { -position } else { position }, is_bus)
        }));
        tally.add_road(&lanes, if mirrored { -angle } else { *angle });
    }
    tally
}

fn incoming_of(kinds: &[bool], mirrored: bool) -> OrderedLanes {
    OrderedLanes::from_lanes(kinds.iter().enumerate().map(|(i, &is_bus)| {
        let position = i as f32 * 3.0;
        (LaneId(i as u32 + 1), if mirrored { -position } else { position }, is_bus)
    }))
}

#[test]
fn test_left_hand_is_the_mirror_of_right_hand() {
    let mut rng = StdRng::seed_from_u64(59);
    let mut with_outgoing_bus = 0;

    for _ in 0..SCENARIOS * 2 {
        let roads = random_roads(&mut rng);
        let incoming: Vec<bool> = (0..rng.gen_range(1..=5)).map(|_| rng.gen_bool(0.15)).collect();

        let tally = tally_of(&roads, false);
        if tally.lane_count() == 0 {
            continue;
        }
        let mirrored_tally = tally_of(&roads, true);
        if tally.transit_lane_count() > 0 {
            with_outgoing_bus += 1;
        }

        for legacy_mode in [false, true] {
            let right_hand = LaneConnector::new(Settings::new(Handedness::RightHand, legacy_mode))
                .connect(&incoming_of(&incoming, false), &tally)
                .expect("junction has outgoing lanes");
            let left_hand = LaneConnector::new(Settings::new(Handedness::LeftHand, legacy_mode))
                .connect(&incoming_of(&incoming, true), &mirrored_tally)
                .expect("junction has outgoing lanes");

            let mut mirrored = left_hand.assignments();
            mirror_assignments(&mut mirrored, left_hand.outgoing_lane_count);
            assert_eq!(mirrored, right_hand.assignments(), "roads {:?}, incoming {:?}", roads, incoming);
        }
    }

    assert!(with_outgoing_bus > 0);
}
