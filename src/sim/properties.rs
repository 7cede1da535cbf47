//! Property tests over whole seeded runs

use std::collections::BTreeSet;

use proptest::prelude::*;

use super::*;

fn names(n: usize) -> Vec<String> {
    (1..=n).map(|i| format!("Head {i}")).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn run_invariants_hold(
        seed in any::<u64>(),
        width in 300.0f32..1200.0,
        height in 300.0f32..900.0,
        count in 2usize..6,
        dts in prop::collection::vec(0.001f32..0.25, 400),
    ) {
        let viewport = Viewport::new(width, height);
        let mut state = HeadsState::new(seed, Tuning::default(), &names(count), viewport);
        let tuning = state.tuning;
        let max = viewport.max_pos(tuning.head_size);
        let mut resolved_events = 0;
        let mut hit_this_contact = BTreeSet::new();

        for dt in dts {
            let before: Vec<i32> = state.heads.iter().map(|h| h.health).collect();
            let was_resolved = state.is_resolved();
            let snapshot: Vec<_> = state.heads.iter().map(|h| (h.pos, h.vel)).collect();

            let report = step(&mut state, viewport, dt);
            resolved_events += report
                .events
                .iter()
                .filter(|e| matches!(e, SimEvent::Resolved(_)))
                .count();

            // At most one hit per pair per contact interval
            hit_this_contact.retain(|pair| state.contacts.contains(pair));
            let mut hits = 0;
            for event in &report.events {
                if let SimEvent::Collision { a, b } = event {
                    prop_assert!(state.contacts.contains(&(*a, *b)));
                    prop_assert!(hit_this_contact.insert((*a, *b)));
                    hits += 1;
                }
            }
            let damaged = report
                .events
                .iter()
                .filter(|e| matches!(e, SimEvent::Damaged { .. }))
                .count();
            prop_assert_eq!(damaged, 2 * hits);

            if was_resolved {
                prop_assert!(!report.advanced);
                for (h, (pos, vel)) in state.heads.iter().zip(&snapshot) {
                    prop_assert_eq!(h.pos, *pos);
                    prop_assert_eq!(h.vel, *vel);
                }
            }

            for (h, prev) in state.heads.iter().zip(&before) {
                prop_assert!(h.health <= *prev);
                prop_assert!(h.health <= tuning.max_health);
                if h.health <= 0 {
                    prop_assert!(!h.alive);
                }
            }

            for h in state.heads.iter().filter(|h| h.alive) {
                prop_assert!((h.vel.length() - tuning.speed).abs() < 1e-2);
                prop_assert!(h.pos.x >= 0.0 && h.pos.x <= max.x);
                prop_assert!(h.pos.y >= 0.0 && h.pos.y <= max.y);
                prop_assert!((0.0..360.0).contains(&h.rotation));
            }
        }

        prop_assert!(resolved_events <= 1);
        prop_assert_eq!(resolved_events == 1, state.is_resolved());
    }
}
