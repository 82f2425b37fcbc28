mod common;

use proptest::prelude::*;
use std::collections::HashMap;

use calcutta_core::{compute_standings, tie_groups, Competitor, PayoutSchedule, TIE_EPSILON};
use common::competitor;

/// Returns drawn from a small pool so exact and near ties are common.
fn return_value() -> impl Strategy<Value = f64> {
    prop::sample::select(vec![0.0, 1.25, 3.0, 3.00004, 7.5, 12.0, 12.00009, 40.0])
}

/// Distinct creation timestamps in random order.
fn created_timestamps(n: usize) -> impl Strategy<Value = Vec<i64>> {
    Just((0..n as i64).map(|i| 1_700_000_000 + i * 60).collect::<Vec<_>>()).prop_shuffle()
}

fn pool_inputs() -> impl Strategy<Value = (Vec<Competitor>, HashMap<String, f64>, PayoutSchedule)> {
    (1usize..16)
        .prop_flat_map(|n| {
            (
                prop::collection::vec(return_value(), n),
                created_timestamps(n),
                prop::collection::vec(0i64..20_000, 0..10),
            )
        })
        .prop_map(|(values, created, amounts)| {
            let competitors: Vec<Competitor> = created
                .iter()
                .enumerate()
                .map(|(i, secs)| competitor(&format!("p{i}"), *secs))
                .collect();
            let returns = competitors
                .iter()
                .zip(values)
                .map(|(c, v)| (c.id.clone(), v))
                .collect();
            let schedule = PayoutSchedule::new(
                amounts
                    .into_iter()
                    .enumerate()
                    .map(|(i, cents)| (i as u32 + 1, cents)),
            )
            .unwrap();
            (competitors, returns, schedule)
        })
}

proptest! {
    #[test]
    fn prop_tie_group_payout_conserved((competitors, returns, schedule) in pool_inputs()) {
        let standings = compute_standings(Some(competitors.as_slice()), &returns, &schedule).unwrap();
        let by_id: HashMap<&str, i64> = standings
            .iter()
            .map(|s| (s.competitor_id.as_str(), s.payout_cents))
            .collect();

        for group in tie_groups(&standings) {
            let k = group.len() as i64;
            let pooled = schedule.pooled(group.first_position, group.len() as u32);
            let paid: Vec<i64> = group.competitor_ids.iter().map(|id| by_id[id.as_str()]).collect();

            prop_assert_eq!(paid.iter().sum::<i64>(), pooled);
            let base = pooled / k;
            let extra = paid.iter().filter(|&&p| p == base + 1).count() as i64;
            prop_assert!(paid.iter().all(|&p| p == base || p == base + 1));
            prop_assert!(extra <= pooled % k);
        }

        let total: i64 = standings.iter().map(|s| s.payout_cents).sum();
        prop_assert_eq!(total, schedule.pooled(1, competitors.len() as u32));
    }

    #[test]
    fn prop_finish_positions_contiguous((competitors, returns, schedule) in pool_inputs()) {
        let standings = compute_standings(Some(competitors.as_slice()), &returns, &schedule).unwrap();
        prop_assert_eq!(standings.len(), competitors.len());

        let groups = tie_groups(&standings);
        let mut next = 1;
        for group in &groups {
            prop_assert_eq!(group.first_position, next);
            prop_assert_eq!(group.last_position - group.first_position + 1, group.len() as u32);
            next = group.last_position + 1;
        }
        prop_assert_eq!(next - 1, competitors.len() as u32);

        for s in &standings {
            let group = groups.iter().find(|g| g.first_position == s.finish_position).unwrap();
            prop_assert_eq!(s.is_tied, group.len() > 1);
            prop_assert_eq!(s.in_the_money, s.payout_cents > 0);
        }
    }

    #[test]
    fn prop_ranking_order_and_tie_break((competitors, returns, schedule) in pool_inputs()) {
        let standings = compute_standings(Some(competitors.as_slice()), &returns, &schedule).unwrap();
        let created: HashMap<&str, _> = competitors
            .iter()
            .map(|c| (c.id.as_str(), c.created_at))
            .collect();

        for pair in standings.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            if a.finish_position == b.finish_position {
                // Inside a tie group: newer portfolio first, never paid less
                prop_assert!(created[a.competitor_id.as_str()] > created[b.competitor_id.as_str()]);
                prop_assert!(a.payout_cents >= b.payout_cents);
                prop_assert!((a.total_returns - b.total_returns).abs() < TIE_EPSILON * 2.0);
            } else {
                prop_assert!(a.total_returns > b.total_returns);
            }
        }
    }

    #[test]
    fn prop_newer_competitor_leads_near_tie(
        base in return_value(),
        offset in 0.0..TIE_EPSILON / 2.0,
        older_is_higher in any::<bool>(),
        (older, newer) in (0i64..1_000, 1i64..1_000).prop_map(|(t, gap)| (t, t + gap)),
    ) {
        let competitors = vec![competitor("older", older), competitor("newer", newer)];
        let (older_return, newer_return) = if older_is_higher {
            (base + offset, base)
        } else {
            (base, base + offset)
        };
        let returns: HashMap<String, f64> = [
            ("older".to_string(), older_return),
            ("newer".to_string(), newer_return),
        ]
        .into_iter()
        .collect();
        let schedule = PayoutSchedule::new(vec![(1, 1000), (2, 501)]).unwrap();

        let standings = compute_standings(Some(competitors.as_slice()), &returns, &schedule).unwrap();
        prop_assert_eq!(standings[0].competitor_id.as_str(), "newer");
        prop_assert!(standings.iter().all(|s| s.is_tied && s.finish_position == 1));
        prop_assert_eq!(standings[0].payout_cents, 751);
        prop_assert_eq!(standings[1].payout_cents, 750);
    }

    #[test]
    fn prop_input_order_irrelevant((competitors, returns, schedule) in pool_inputs()) {
        let forward = compute_standings(Some(competitors.as_slice()), &returns, &schedule).unwrap();
        let mut reversed_input = competitors.clone();
        reversed_input.reverse();
        let reversed = compute_standings(Some(reversed_input.as_slice()), &returns, &schedule).unwrap();
        prop_assert_eq!(forward, reversed);
    }
}
