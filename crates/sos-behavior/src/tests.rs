//! Unit tests for sos-behavior.

use sos_core::{Location, ObservationMode, ScenarioConfig, SimRng, SosType, Tick};
use sos_env::Environment;

use crate::{Action, Message, Purpose, SimContext, COORDINATOR, FieldKey};

// ── Helpers ───────────────────────────────────────────────────────────────────

const CENTRE: Location = Location::new(9, 9);

fn placed_env(seed: u64) -> Environment {
    let mut env = Environment::new(&ScenarioConfig::default()).unwrap();
    env.reset(&mut SimRng::new(seed)).unwrap();
    env
}

fn make_context(env: &Environment, sos_type: SosType) -> SimContext<'_> {
    SimContext::new(Tick(0), sos_type, ObservationMode::Local, &[], env)
}

fn coordinator_request() -> Message {
    Message::new(COORDINATOR, "Rescue", Purpose::RequestInfo)
        .named("Request location and discovery")
        .requesting(FieldKey::Location)
        .requesting(FieldKey::Discovered)
}

fn moves(actions: &[crate::CandidateAction]) -> Vec<Action> {
    actions.iter().map(|c| c.action.clone()).collect()
}

// ── Decision core ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod decision_tests {
    use sos_core::Direction;

    use super::*;
    use crate::{CandidateAction, DecisionCore, Phase};

    fn candidate(direction: Direction, benefit: i32, cost: i32) -> CandidateAction {
        CandidateAction::new(Action::Move(direction), benefit, cost)
    }

    /// Run the override + generation half of a step and return the acting phase.
    fn tick(core: &mut DecisionCore) -> Phase {
        core.apply_phase_override();
        core.begin_generation()
    }

    #[test]
    fn receive_classifies_by_purpose() {
        let mut core = DecisionCore::new();
        for purpose in [Purpose::RequestInfo, Purpose::RequestAction, Purpose::Response, Purpose::Inform] {
            core.receive(Message::new("A", "B", purpose));
        }
        assert_eq!(core.requests().len(), 2);
        assert_eq!(core.information().len(), 2);
        assert!(core.requests().iter().all(|m| m.purpose.is_request()));
    }

    #[test]
    fn idle_unit_alternates_active_and_normal() {
        let mut core = DecisionCore::new();
        let acting: Vec<Phase> = (0..6).map(|_| tick(&mut core)).collect();
        assert_eq!(
            acting,
            [
                Phase::ActiveImmediate,
                Phase::Normal,
                Phase::ActiveImmediate,
                Phase::Normal,
                Phase::ActiveImmediate,
                Phase::Normal,
            ]
        );
    }

    #[test]
    fn pending_requests_preempt_normal() {
        let mut core = DecisionCore::new();
        assert_eq!(tick(&mut core), Phase::ActiveImmediate);

        core.receive(Message::new(COORDINATOR, "Rescue1", Purpose::RequestInfo));
        assert_eq!(tick(&mut core), Phase::PassiveImmediate);
        // Scheduled phase is now Normal, but the undrained request wins.
        assert_eq!(core.phase(), Phase::Normal);
        assert_eq!(tick(&mut core), Phase::PassiveImmediate);

        core.take_requests();
        assert_eq!(tick(&mut core), Phase::Normal);
    }

    #[test]
    fn begin_generation_clears_candidates() {
        let mut core = DecisionCore::new();
        core.push_immediate(candidate(Direction::Up, 1, 0));
        core.push_normal(candidate(Direction::Down, 1, 0));
        core.begin_generation();
        assert!(core.immediate().is_empty());
        assert!(core.normal().is_empty());
    }

    #[test]
    fn empty_lists_select_noop_without_drawing() {
        let mut core = DecisionCore::new();
        let mut rng = SimRng::new(5);
        assert_eq!(core.select(&mut rng), Action::Noop);
        let next: u64 = rng.gen_range(0..u64::MAX);
        assert_eq!(next, SimRng::new(5).gen_range(0..u64::MAX));
    }

    #[test]
    fn immediate_beats_better_normal() {
        let mut core = DecisionCore::new();
        core.push_normal(candidate(Direction::Left, 100, 0));
        core.push_immediate(candidate(Direction::Right, 0, 50));
        assert_eq!(core.select(&mut SimRng::new(0)), Action::Move(Direction::Right));
    }

    #[test]
    fn highest_utility_wins() {
        for seed in 0..20 {
            let mut core = DecisionCore::new();
            core.push_normal(candidate(Direction::Left, 0, 3));
            core.push_normal(candidate(Direction::Right, 5, 1));
            core.push_normal(candidate(Direction::Up, 2, 2));
            assert_eq!(core.select(&mut SimRng::new(seed)), Action::Move(Direction::Right));
            assert_eq!(core.normal().len(), 2);
        }
    }

    #[test]
    fn ties_break_reproducibly() {
        let pick = |seed: u64| {
            let mut core = DecisionCore::new();
            core.push_normal(candidate(Direction::Left, 1, 0));
            core.push_normal(candidate(Direction::Right, 1, 0));
            core.select(&mut SimRng::new(seed))
        };
        for seed in 0..20 {
            assert_eq!(pick(seed), pick(seed));
        }
        let picked: Vec<Action> = (0..64).map(pick).collect();
        assert!(picked.contains(&Action::Move(Direction::Left)));
        assert!(picked.contains(&Action::Move(Direction::Right)));
    }

    #[test]
    fn reset_returns_to_active() {
        let mut core = DecisionCore::new();
        tick(&mut core);
        core.receive(Message::new("A", "B", Purpose::Inform));
        core.reset();
        assert_eq!(core.phase(), Phase::ActiveImmediate);
        assert_eq!(core.acting_phase(), None);
        assert!(core.information().is_empty());
    }
}

// ── Rescue units ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod rescue_tests {
    use sos_core::{Direction, PatientId, SosError};

    use super::*;
    use crate::{
        BehaviorError, DISCOVER_BENEFIT, DISCOVER_COST, FieldValue, Phase, RescueUnit, Unit,
    };

    fn rescue_at(location: Location) -> RescueUnit {
        RescueUnit::new("Rescue1", location, 19, 19).unwrap()
    }

    #[test]
    fn start_outside_grid_rejected() {
        let err = RescueUnit::new("Rescue1", Location::new(19, 0), 19, 19).unwrap_err();
        assert!(matches!(err, BehaviorError::Core(SosError::OutOfBounds { x: 19, y: 0, .. })));
    }

    #[test]
    fn active_phase_offers_discover() {
        let env = placed_env(1);
        let ctx = make_context(&env, SosType::Collaborative);
        let mut unit = rescue_at(Location::new(0, 0));
        unit.generate_active_actions(&ctx);
        let offered = unit.core().immediate();
        assert_eq!(offered.len(), 1);
        assert_eq!(offered[0].action, Action::DiscoverPatient);
        assert_eq!((offered[0].benefit, offered[0].cost), (DISCOVER_BENEFIT, DISCOVER_COST));
    }

    #[test]
    fn first_step_selects_discover() {
        let env = placed_env(1);
        let ctx = make_context(&env, SosType::Directed);
        let mut unit = Unit::from(rescue_at(CENTRE));
        assert_eq!(unit.step(&ctx, &mut SimRng::new(0)), Action::DiscoverPatient);
        assert_eq!(unit.core().acting_phase(), Some(Phase::ActiveImmediate));
    }

    #[test]
    fn acknowledging_topologies_answer_coordinator() {
        for sos_type in [SosType::Directed, SosType::Acknowledged] {
            let env = placed_env(1);
            let ctx = make_context(&env, sos_type);
            let mut rng = SimRng::new(0);
            let mut unit = Unit::from(rescue_at(CENTRE));

            unit.step(&ctx, &mut rng);
            unit.receive_message(coordinator_request());
            let action = unit.step(&ctx, &mut rng);
            assert_eq!(unit.core().acting_phase(), Some(Phase::PassiveImmediate));
            assert!(unit.core().requests().is_empty(), "requests are drained");

            let Action::SendMessage(first) = action else {
                panic!("{sos_type}: expected a response, got {action:?}");
            };
            let remaining = unit.core().immediate();
            assert_eq!(remaining.len(), 1);
            let Action::SendMessage(second) = &remaining[0].action else {
                panic!("{sos_type}: second candidate is not a response");
            };

            let mut replies = [first, second.clone()];
            replies.sort_by_key(|m| m.name.clone());
            for reply in &replies {
                assert_eq!(reply.sender, "Rescue1");
                assert_eq!(reply.receiver, COORDINATOR);
                assert_eq!(reply.purpose, Purpose::Response);
            }
            assert_eq!(replies[0].name, "Respond discovery report");
            assert_eq!(replies[0].get(FieldKey::Discovered), Some(&FieldValue::Discovered(None)));
            assert_eq!(replies[1].name, "Respond location report");
            assert_eq!(replies[1].get(FieldKey::Location), Some(&FieldValue::Location(CENTRE)));
        }
    }

    #[test]
    fn collaborative_ignores_requests() {
        let env = placed_env(1);
        let ctx = make_context(&env, SosType::Collaborative);
        let mut rng = SimRng::new(0);
        let mut unit = Unit::from(rescue_at(CENTRE));

        unit.step(&ctx, &mut rng);
        unit.receive_message(coordinator_request());
        assert_eq!(unit.step(&ctx, &mut rng), Action::Noop);
        assert!(unit.core().requests().is_empty());
        assert!(matches!(unit.step(&ctx, &mut rng), Action::Move(_)));
    }

    #[test]
    fn requests_from_other_senders_ignored() {
        let env = placed_env(1);
        let ctx = make_context(&env, SosType::Acknowledged);
        let mut unit = rescue_at(CENTRE);
        unit.core.receive(
            Message::new("Rescue2", "Rescue1", Purpose::RequestInfo).requesting(FieldKey::Location),
        );
        unit.generate_passive_actions(&ctx);
        assert!(unit.core().immediate().is_empty());
        assert!(unit.core().requests().is_empty());
    }

    #[test]
    fn discovery_report_carries_last_discovered() {
        let mut env = placed_env(2);
        let cell = env.patients()[0].location();
        let mut unit = rescue_at(cell);
        let found = unit.discover(&mut env).unwrap();

        let ctx = make_context(&env, SosType::Acknowledged);
        unit.core.receive(
            Message::new(COORDINATOR, "Rescue", Purpose::RequestInfo).requesting(FieldKey::Discovered),
        );
        unit.generate_passive_actions(&ctx);
        let Action::SendMessage(reply) = &unit.core().immediate()[0].action else {
            panic!("expected a response");
        };
        assert_eq!(reply.get(FieldKey::Discovered), Some(&FieldValue::Discovered(Some(found))));
    }

    #[test]
    fn directed_offers_no_moves() {
        let env = placed_env(1);
        let ctx = make_context(&env, SosType::Directed);
        let mut unit = rescue_at(CENTRE);
        unit.generate_normal_actions(&ctx, &mut SimRng::new(0));
        assert!(unit.core().normal().is_empty());
    }

    #[test]
    fn corner_offers_only_inward_moves() {
        let env = placed_env(1);
        let ctx = make_context(&env, SosType::Collaborative);
        let mut unit = rescue_at(Location::new(0, 0));
        unit.generate_normal_actions(&ctx, &mut SimRng::new(0));
        assert_eq!(
            moves(unit.core().normal()),
            [Action::Move(Direction::Right), Action::Move(Direction::Down)]
        );
    }

    #[test]
    fn never_offers_reversal() {
        let env = placed_env(1);
        let ctx = make_context(&env, SosType::Acknowledged);
        let mut unit = rescue_at(CENTRE);
        unit.apply_move(Direction::Right);
        unit.generate_normal_actions(&ctx, &mut SimRng::new(0));
        assert_eq!(
            moves(unit.core().normal()),
            [Action::Move(Direction::Right), Action::Move(Direction::Up), Action::Move(Direction::Down)]
        );
    }

    #[test]
    fn long_walk_stays_in_bounds_without_reversing() {
        let mut env = placed_env(4);
        let mut rng = SimRng::new(4);
        let mut unit = Unit::from(rescue_at(CENTRE));

        for t in 0..400 {
            let action = {
                let ctx = SimContext::new(Tick(t), SosType::Collaborative, ObservationMode::Local, &[], &env);
                unit.step(&ctx, &mut rng)
            };
            match action {
                Action::DiscoverPatient => {
                    unit.execute_discovery(&mut env);
                }
                Action::Move(direction) => {
                    let last = unit.as_rescue().unwrap().last_direction();
                    assert_ne!(last, Some(direction.opposite()), "reversed at tick {t}");
                    unit.execute_move(direction);
                }
                Action::Noop | Action::SendMessage(_) => {}
            }
            assert!(env.contains(unit.location().unwrap()));
        }
        assert!(env.discovered_count() > 0);
    }

    #[test]
    fn move_cost_is_uncertainty_minus_expected() {
        let env = placed_env(1);
        let ctx = make_context(&env, SosType::Collaborative);
        let unit = rescue_at(CENTRE);
        let next = CENTRE.step(Direction::Up);
        let expected = env.expected_density()[next] as i32;
        let mut rng = SimRng::new(0);
        let costs: Vec<i32> = (0..100).map(|_| unit.move_cost(next, &ctx, &mut rng)).collect();
        assert!(costs.iter().all(|&c| c == -expected || c == -expected + 1), "{costs:?}");
        assert!(costs.contains(&-expected));
        assert!(costs.contains(&(-expected + 1)));
    }

    #[test]
    fn known_patients_raise_move_cost() {
        let mut env = placed_env(2);
        let cell = env.patients()[0].location();
        let mut unit = rescue_at(cell);
        unit.discover(&mut env).unwrap();

        let ctx = make_context(&env, SosType::Collaborative);
        let expected = env.expected_density()[cell] as i32;
        let cost = unit.move_cost(cell, &ctx, &mut SimRng::new(0));
        assert!(cost == 1 - expected || cost == 2 - expected);
    }

    #[test]
    fn discover_on_empty_cell_changes_nothing() {
        let mut env = placed_env(1);
        let empty = env
            .occupancy()
            .iter()
            .find(|(_, ids)| ids.is_empty())
            .map(|(l, _)| l)
            .unwrap();
        let mut unit = rescue_at(empty);
        assert_eq!(unit.discover(&mut env), None);
        assert_eq!(unit.last_discovered(), None);
        assert_eq!(env.discovered_count(), 0);
    }

    #[test]
    fn local_observation_sees_current_cell_only() {
        let mut env = placed_env(3);
        let cell = env.patients()[0].location();
        let id = env.take_undiscovered_patient(cell).unwrap();

        let far = if cell == Location::new(0, 0) { Location::new(18, 18) } else { Location::new(0, 0) };
        let mut away = rescue_at(far);
        let mut here = rescue_at(cell);
        let ctx = make_context(&env, SosType::Collaborative);
        away.observe(&ctx);
        here.observe(&ctx);

        assert!(away.belief()[cell].is_empty());
        assert!(here.belief()[cell].contains(&id));
    }

    #[test]
    fn global_observation_sees_every_cell() {
        let mut env = placed_env(3);
        let claimed: Vec<(Location, PatientId)> = env.patients()[..5]
            .iter()
            .map(|p| p.location())
            .collect::<Vec<_>>()
            .into_iter()
            .filter_map(|l| env.take_undiscovered_patient(l).map(|id| (l, id)))
            .collect();

        let ctx = SimContext::new(Tick(0), SosType::Collaborative, ObservationMode::Global, &[], &env);
        let mut unit = rescue_at(Location::new(0, 0));
        unit.observe(&ctx);
        for (cell, id) in claimed {
            assert!(unit.belief()[cell].contains(&id));
        }
    }

    #[test]
    fn information_merges_confirmed_discoveries() {
        let mut env = placed_env(3);
        let cell = env.patients()[0].location();
        let found = env.take_undiscovered_patient(cell).unwrap();
        let undiscovered = env.patients().iter().find(|p| !p.is_discovered()).unwrap().id();

        let far = if cell == Location::new(0, 0) { Location::new(18, 18) } else { Location::new(0, 0) };
        let mut unit = Unit::from(rescue_at(far));
        for id in [found, undiscovered] {
            unit.receive_message(
                Message::new("Rescue2", "Rescue", Purpose::Inform)
                    .with(FieldKey::Discovered, FieldValue::Discovered(Some(id))),
            );
        }

        let ctx = make_context(&env, SosType::Collaborative);
        unit.update_belief(&ctx);
        let belief = unit.belief().unwrap();
        assert!(belief[cell].contains(&found));
        let total: usize = belief.iter().map(|(_, ids)| ids.len()).sum();
        assert_eq!(total, 1, "unconfirmed report must be ignored");
        assert!(unit.core().information().is_empty());
    }

    #[test]
    fn reset_restores_start_state() {
        let mut env = placed_env(2);
        let cell = env.patients()[0].location();
        let mut unit = rescue_at(cell);
        unit.discover(&mut env).unwrap();
        let dir = if cell.x > 0 { Direction::Left } else { Direction::Right };
        unit.apply_move(dir);

        unit.reset();
        assert_eq!(unit.location(), cell);
        assert_eq!(unit.last_direction(), None);
        assert_eq!(unit.last_discovered(), None);
        assert!(unit.belief().iter().all(|(_, ids)| ids.is_empty()));
    }

    #[test]
    #[should_panic(expected = "leaves the grid")]
    fn off_grid_move_panics() {
        let mut unit = rescue_at(Location::new(0, 0));
        unit.apply_move(Direction::Left);
    }
}

// ── Facilities and unit dispatch ──────────────────────────────────────────────

#[cfg(test)]
mod unit_tests {
    use super::*;
    use crate::{Facility, Phase, RescueUnit, Unit, UnitRole};

    #[test]
    fn facility_always_idles() {
        let mut env = placed_env(1);
        let ctx = make_context(&env, SosType::Acknowledged);
        let mut rng = SimRng::new(0);
        let mut hospital = Unit::from(Facility::new("Hospital1", CENTRE));

        hospital.receive_message(coordinator_request());
        for _ in 0..4 {
            assert_eq!(hospital.step(&ctx, &mut rng), Action::Noop);
        }
        assert!(hospital.core().requests().is_empty());
        assert_eq!(hospital.execute_discovery(&mut env), None);
    }

    #[test]
    fn roles_and_properties() {
        let rescue = Unit::from(RescueUnit::new("Rescue1", CENTRE, 19, 19).unwrap());
        let hospital = Unit::from(Facility::new("Hospital1", Location::new(2, 3)));

        assert_eq!(rescue.role(), UnitRole::Rescue);
        assert_eq!(hospital.role().to_string(), "facility");
        assert!(hospital.belief().is_none());

        let props = rescue.properties();
        assert_eq!(props.name, "Rescue1");
        assert_eq!(props.location, Some(CENTRE));
        assert_eq!(props.phase, None);
        assert_eq!(props.believed, 0);
        assert!(props.belief.is_some());

        let hospital_props = hospital.properties();
        assert_eq!(hospital_props.location, Some(Location::new(2, 3)));
        assert!(hospital_props.belief.is_none());
    }

    #[test]
    fn properties_report_phase_just_acted() {
        let env = placed_env(1);
        let ctx = make_context(&env, SosType::Collaborative);
        let mut rng = SimRng::new(0);
        let mut unit = Unit::from(RescueUnit::new("Rescue1", CENTRE, 19, 19).unwrap());

        unit.step(&ctx, &mut rng);
        assert_eq!(unit.properties().phase, Some(Phase::ActiveImmediate));
        assert_eq!(unit.core().phase(), Phase::PassiveImmediate);
        unit.step(&ctx, &mut rng);
        assert_eq!(unit.properties().phase, Some(Phase::Normal));
    }

    #[test]
    fn properties_carry_belief_by_cell() {
        let mut env = placed_env(1);
        let cell = env
            .occupancy()
            .iter()
            .find(|(_, ids)| !ids.is_empty())
            .map(|(l, _)| l)
            .unwrap();
        let mut unit = Unit::from(RescueUnit::new("Rescue1", cell, 19, 19).unwrap());

        let ctx = make_context(&env, SosType::Collaborative);
        unit.step(&ctx, &mut SimRng::new(0));
        let found = unit.execute_discovery(&mut env).unwrap();

        let props = unit.properties();
        let belief = props.belief.unwrap();
        assert_eq!(belief[cell].len(), 1);
        assert!(belief[cell].contains(&found));
        assert!(belief.iter().filter(|&(l, _)| l != cell).all(|(_, ids)| ids.is_empty()));
        assert_eq!(props.believed, 1);
        assert_eq!(props.last_discovered, Some(found));
    }

    #[test]
    #[should_panic(expected = "facilities cannot move")]
    fn facility_move_panics() {
        let mut hospital = Unit::from(Facility::new("Hospital1", CENTRE));
        hospital.execute_move(sos_core::Direction::Up);
    }
}

// ── Resources ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod context_tests {
    use sos_core::UnitId;

    use super::*;
    use crate::{AgentInfo, Resource, ResourceKey, UnitRole};

    #[test]
    fn named_lookup_matches_keys() {
        let env = placed_env(1);
        let roster = vec![AgentInfo { id: UnitId(0), name: "Rescue1".into(), role: UnitRole::Rescue }];
        let ctx = SimContext::new(Tick(7), SosType::Directed, ObservationMode::Local, &roster, &env);

        assert!(matches!(ctx.resource_named("Time"), Some(Resource::Time(Tick(7)))));
        assert!(matches!(ctx.resource_named("Type"), Some(Resource::Type(SosType::Directed))));
        assert!(matches!(ctx.resource_named("Agents"), Some(Resource::Agents(a)) if a.len() == 1));
        assert!(matches!(ctx.resource_named("Patients"), Some(Resource::Patients(p)) if p.len() == 100));
        assert!(matches!(
            ctx.resource(ResourceKey::ExpectedPatientsMap),
            Resource::ExpectedPatientsMap(g) if g.total() == env.expected_density().total()
        ));
    }

    #[test]
    fn unknown_names_are_none() {
        let env = placed_env(1);
        let ctx = make_context(&env, SosType::Collaborative);
        assert!(ctx.resource_named("time").is_none());
        assert!(ctx.resource_named("Weather").is_none());
        assert!("Agents".parse::<ResourceKey>().is_ok());
    }

    #[test]
    fn message_prefix_addressing() {
        let msg = Message::new(COORDINATOR, "Rescue", Purpose::Inform);
        assert!(msg.addresses("Rescue1"));
        assert!(msg.addresses("Rescue"));
        assert!(!msg.addresses("Hospital1"));
    }
}
