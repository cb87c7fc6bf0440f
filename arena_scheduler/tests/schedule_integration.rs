//! Integration tests for reservation-slot synchronization
//!
//! These tests run the class, tournament and event synchronizers against one
//! shared slot list, the way a save transaction does.

#[cfg(test)]
mod schedule_tests {
    use arena_scheduler::bracket::{BracketBuilder, Participant};
    use arena_scheduler::schedule::{
        Court, EventCourt, EventStatus, PrivateEventScheduleSource, RecurringScheduleDefinition,
        ReservationSlot, ScheduleError, ScheduleSynchronizer, SchedulerConfig, SlotKind,
        SlotSource, TournamentScheduleSource, TournamentStatus, WeeklyRule, find_conflicts,
    };
    use chrono::{NaiveDate, NaiveTime, TimeDelta};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn courts() -> Vec<Court> {
        vec![
            Court {
                id: "arena-1".into(),
                name: "Arena 1".into(),
                slot_minutes: Some(90),
            },
            Court {
                id: "arena-2".into(),
                name: "Arena 2".into(),
                slot_minutes: None,
            },
        ]
    }

    fn monday_class() -> RecurringScheduleDefinition {
        RecurringScheduleDefinition {
            id: "turma-10".into(),
            name: "Adults intermediate".into(),
            court_id: "arena-1".into(),
            rules: vec![WeeklyRule::new(1, "18:00", "20:00")],
            start_date: date(2024, 1, 1),
            end_date: Some(date(2024, 1, 15)),
        }
    }

    fn tournament() -> TournamentScheduleSource {
        let participants: Vec<Participant> = ["Ana", "Bia", "Caio", "Duda"]
            .iter()
            .map(|name| Participant::new(name.to_lowercase(), *name))
            .collect();
        let bracket = BracketBuilder::with_rng(StdRng::seed_from_u64(4))
            .build_bracket(&participants, "mixed-b")
            .unwrap();

        TournamentScheduleSource {
            id: "torneio-3".into(),
            name: "Winter Cup".into(),
            status: TournamentStatus::InProgress,
            participants,
            matches: bracket.into_matches(),
        }
    }

    #[test]
    fn test_weekly_class_scenario() {
        let sync = ScheduleSynchronizer::default();
        let outcome = sync.sync_class_slots(&monday_class(), Vec::new());

        assert!(outcome.is_clean());
        assert_eq!(outcome.slots.len(), 6);
        assert!(outcome.slots.iter().all(|s| s.duration() == TimeDelta::hours(1)));
        assert!(outcome.slots.iter().all(|s| s.source.kind == SlotKind::Class));

        let mut ids: Vec<_> = outcome.slots.iter().map(|s| s.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 6);
    }

    #[test]
    fn test_class_ids_are_stable_across_runs() {
        let sync = ScheduleSynchronizer::default();
        let first = sync.sync_class_slots(&monday_class(), Vec::new()).into_slots();
        let second = sync.sync_class_slots(&monday_class(), Vec::new()).into_slots();
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_midnight_class_spills_into_next_day() {
        // 2024-03-02 is a Saturday
        let class = RecurringScheduleDefinition {
            id: "night-owls".into(),
            name: "Night league".into(),
            court_id: "arena-2".into(),
            rules: vec![WeeklyRule::new(6, "22:00", "01:00")],
            start_date: date(2024, 3, 2),
            end_date: Some(date(2024, 3, 2)),
        };
        let slots = ScheduleSynchronizer::default()
            .sync_class_slots(&class, Vec::new())
            .into_slots();

        let total: i64 = slots.iter().map(|s| s.duration().num_minutes()).sum();
        assert_eq!(total, 180);
        assert_eq!(slots.last().unwrap().date, date(2024, 3, 3));
        assert!(find_conflicts(&slots).is_empty());
    }

    #[test]
    fn test_match_appears_once_scheduled() {
        let sync = ScheduleSynchronizer::with_catalog(SchedulerConfig::default(), courts());
        let mut tournament = tournament();

        // Court assigned but no date yet
        tournament.matches[0].court_id = Some("arena-1".into());
        tournament.matches[0].start_time = Some("10:00".into());
        let baseline = vec![ReservationSlot {
            id: "walk-in".into(),
            court_id: "arena-1".into(),
            date: date(2024, 7, 1),
            start_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            source: SlotSource::ad_hoc("walk-in"),
            label: "Walk-in".into(),
        }];

        let outcome = sync.sync_tournament_slots(&tournament, baseline.clone());
        assert_eq!(outcome.slots, baseline);

        tournament.matches[0].date = Some(date(2024, 7, 6));
        let outcome = sync.sync_tournament_slots(&tournament, outcome.slots);
        assert_eq!(outcome.slots.len(), 2);
        assert_eq!(outcome.slots[0], baseline[0]);

        let slot = &outcome.slots[1];
        assert_eq!(slot.source, SlotSource::tournament("torneio-3"));
        assert_eq!(slot.duration(), TimeDelta::minutes(90));
        assert!(slot.label.starts_with("Winter Cup: "));
    }

    #[test]
    fn test_rescheduling_a_match_moves_its_slot() {
        let sync = ScheduleSynchronizer::with_catalog(SchedulerConfig::default(), courts());
        let mut tournament = tournament();
        tournament.matches[0].schedule("arena-2", date(2024, 7, 6), "09:00");

        let slots = sync.sync_tournament_slots(&tournament, Vec::new()).into_slots();
        assert_eq!(slots.len(), 1);
        let id = slots[0].id.clone();

        tournament.matches[0].schedule("arena-1", date(2024, 7, 7), "15:30");
        let slots = sync.sync_tournament_slots(&tournament, slots).into_slots();
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].id, id);
        assert_eq!(slots[0].court_id, "arena-1");
        assert_eq!(slots[0].date, date(2024, 7, 7));
    }

    #[test]
    fn test_unresolved_final_uses_placeholder() {
        let sync = ScheduleSynchronizer::with_catalog(
            SchedulerConfig {
                placeholder_label: "A definir".into(),
                ..Default::default()
            },
            courts(),
        );
        let mut tournament = tournament();
        let final_index = tournament
            .matches
            .iter()
            .position(|m| m.is_final())
            .unwrap();
        tournament.matches[final_index].schedule("arena-2", date(2024, 7, 7), "18:00");

        let slots = sync.sync_tournament_slots(&tournament, Vec::new()).into_slots();
        assert_eq!(slots[0].label, "Winter Cup: A definir vs A definir");
        assert_eq!(slots[0].duration(), TimeDelta::minutes(60));
    }

    #[test]
    fn test_two_day_event_on_two_courts() {
        let event = PrivateEventScheduleSource {
            id: "evento-5".into(),
            name: "Corporate games".into(),
            status: EventStatus::Confirmed,
            start_date: date(2024, 8, 10),
            end_date: Some(date(2024, 8, 11)),
            start_time: "09:00".into(),
            end_time: "17:00".into(),
            courts: vec![EventCourt::new("arena-1"), EventCourt::new("arena-2")],
        };
        let outcome = ScheduleSynchronizer::default().sync_event_slots(&event, Vec::new());
        assert_eq!(outcome.slots.len(), 4);
        assert!(outcome.is_clean());
    }

    #[test]
    fn test_all_sources_share_one_calendar() {
        let sync = ScheduleSynchronizer::with_catalog(SchedulerConfig::default(), courts());

        let mut tournament = tournament();
        // Clashes with the Monday class on 2024-01-08 18:30
        tournament.matches[0].schedule("arena-1", date(2024, 1, 8), "18:30");

        let event = PrivateEventScheduleSource {
            id: "evento-6".into(),
            name: "Birthday".into(),
            status: EventStatus::Completed,
            start_date: date(2024, 1, 13),
            end_date: None,
            start_time: "14:00".into(),
            end_time: "16:00".into(),
            courts: vec![EventCourt::new("arena-2")],
        };

        let mut issues: Vec<ScheduleError> = Vec::new();
        let outcome = sync.sync_class_slots(&monday_class(), Vec::new());
        issues.extend(outcome.issues);
        let outcome = sync.sync_tournament_slots(&tournament, outcome.slots);
        issues.extend(outcome.issues);
        let outcome = sync.sync_event_slots(&event, outcome.slots);
        issues.extend(outcome.issues);

        assert!(issues.is_empty());
        assert_eq!(outcome.slots.len(), 6 + 1 + 1);

        let conflicts = find_conflicts(&outcome.slots);
        assert_eq!(conflicts.len(), 2);
        assert!(conflicts.iter().all(|c| c.court_id == "arena-1"));

        // Re-running the class leaves the other sources alone
        let again = sync.sync_class_slots(&monday_class(), outcome.slots.clone());
        assert_eq!(again.slots.len(), outcome.slots.len());
        assert!(
            again
                .slots
                .iter()
                .any(|s| s.source == SlotSource::event("evento-6"))
        );
    }

    #[test]
    fn test_invalid_window_does_not_touch_other_sources() {
        let sync = ScheduleSynchronizer::default();
        let good = sync
            .sync_class_slots(&monday_class(), Vec::new())
            .into_slots();

        let mut broken = monday_class();
        broken.id = "turma-11".into();
        broken.start_date = date(2024, 2, 1);
        let outcome = sync.sync_class_slots(&broken, good.clone());

        assert_eq!(outcome.slots, good);
        assert_eq!(outcome.issues.len(), 1);
        assert_eq!(outcome.issues[0].origin(), &SlotSource::class("turma-11"));
    }
}
