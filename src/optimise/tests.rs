use proptest::prelude::*;

use super::*;
use crate::lp_solver::{OptimisationStatus, SolverBackend};
use crate::scenario::{Plant, ProductMix};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-6 * (1.0 + a.abs().max(b.abs()))
}

fn with_capacities(capacities: [f64; 3]) -> ProductMix {
    let mut mix = ProductMix::default();
    for (plant, capacity) in mix.plants.iter_mut().zip(capacities) {
        plant.capacity = capacity;
    }
    mix
}

fn backends() -> impl Iterator<Item = SolverBackend> {
    [
        SolverBackend::Vertex,
        SolverBackend::Microlp,
        SolverBackend::CoinCbc,
    ]
    .into_iter()
    .filter(|backend| backend.is_available())
}

#[test]
fn test_textbook_scenario() {
    for backend in backends() {
        let result = solve_with(&ProductMix::default(), backend).unwrap();

        assert_eq!(result.status, OptimisationStatus::Optimal, "{backend}");
        assert!(close(result.doors_units, 2.0), "{backend}");
        assert!(close(result.windows_units, 6.0), "{backend}");
        assert!(close(result.max_profit, 3600.0), "{backend}");

        let binding: Vec<bool> = result.plants.iter().map(|p| p.binding).collect();
        assert_eq!(binding, [false, true, true], "{backend}");
        assert!(close(result.plants[0].slack, 2.0), "{backend}");

        let labels: Vec<&str> = result.binding_plants().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, ["Plant 2", "Plant 3"], "{backend}");
    }
}

#[test]
fn test_default_backend_solves_textbook_scenario() {
    let result = solve(&ProductMix::default()).unwrap();
    assert!(result.is_optimal());
    assert!(close(result.max_profit, 3600.0));
}

#[test]
fn test_negative_capacity_is_infeasible() {
    let mix = with_capacities([-1.0, 12.0, 18.0]);

    for backend in backends() {
        let result = solve_with(&mix, backend).unwrap();
        assert_eq!(result.status, OptimisationStatus::Infeasible, "{backend}");
        assert!(!result.is_optimal());
        assert_eq!(result.doors_units, 0.0);
        assert_eq!(result.windows_units, 0.0);
        assert_eq!(result.max_profit, 0.0);
        assert!(result.plants.is_empty());
    }
}

#[test]
fn test_zero_capacity_stops_doors() {
    let mix = with_capacities([0.0, 12.0, 18.0]);

    for backend in backends() {
        let result = solve_with(&mix, backend).unwrap();
        assert_eq!(result.status, OptimisationStatus::Optimal, "{backend}");
        assert!(result.doors_units.abs() < 1e-6, "{backend}");
        assert!(close(result.windows_units, 6.0), "{backend}");
        assert!(close(result.max_profit, 3000.0), "{backend}");
        assert!(result.plants[0].binding);
        assert!(!result.plants[2].binding);
    }
}

#[test]
fn test_all_plants_binding() {
    let mix = with_capacities([2.0, 12.0, 18.0]);

    for backend in backends() {
        let result = solve_with(&mix, backend).unwrap();
        assert_eq!(result.status, OptimisationStatus::Optimal, "{backend}");
        assert!(close(result.max_profit, 3600.0), "{backend}");
        assert_eq!(result.binding_plants().count(), 3, "{backend}");
    }
}

#[test]
fn test_windows_free_everywhere_is_unbounded() {
    let mut mix = ProductMix::default();
    mix.plants = [
        Plant::new("Plant 1", 1.0, 0.0, 4.0),
        Plant::new("Plant 2", 0.0, 0.0, 12.0),
        Plant::new("Plant 3", 3.0, 0.0, 18.0),
    ];

    for backend in backends() {
        let result = solve_with(&mix, backend).unwrap();
        assert_eq!(result.status, OptimisationStatus::Unbounded, "{backend}");
        assert_eq!(result.max_profit, 0.0);
        assert!(result.plants.is_empty());
    }
}

#[test]
fn test_non_finite_input_is_undefined() {
    let cases: [fn(&mut ProductMix); 4] = [
        |mix| mix.windows_profit = f64::NAN,
        |mix| mix.doors_profit = f64::INFINITY,
        |mix| mix.plants[2].doors_time = f64::NAN,
        |mix| mix.plants[1].capacity = f64::NEG_INFINITY,
    ];

    for backend in backends() {
        for (i, corrupt) in cases.iter().enumerate() {
            let mut mix = ProductMix::default();
            corrupt(&mut mix);

            let result = solve_with(&mix, backend).unwrap();
            assert_eq!(result.status, OptimisationStatus::Undefined, "{backend} case {i}");
            assert_eq!(result.max_profit, 0.0);
            assert!(result.plants.is_empty());
        }
    }
}

#[test]
fn test_backends_agree_on_profit() {
    let scenarios = [
        ProductMix::default(),
        with_capacities([10.0, 3.0, 7.5]),
        with_capacities([4.0, 100.0, 18.0]),
    ];

    for mix in &scenarios {
        let reference = solve_with(mix, SolverBackend::Vertex).unwrap();
        for backend in backends() {
            let result = solve_with(mix, backend).unwrap();
            assert_eq!(result.status, reference.status, "{backend}");
            assert!(close(result.max_profit, reference.max_profit), "{backend}");
        }
    }
}

prop_compose! {
    fn arb_plant(label: &'static str)(
        doors_time in 0.0..10.0f64,
        windows_time in 0.0..10.0f64,
        capacity in 0.5..100.0f64,
    ) -> Plant {
        Plant::new(label, doors_time, windows_time, capacity)
    }
}

prop_compose! {
    fn arb_mix()(
        doors_profit in 1.0..1000.0f64,
        windows_profit in 1.0..1000.0f64,
        p1 in arb_plant("Plant 1"),
        p2 in arb_plant("Plant 2"),
        p3 in arb_plant("Plant 3"),
    ) -> ProductMix {
        ProductMix {
            doors_profit,
            windows_profit,
            plants: [p1, p2, p3],
        }
    }
}

proptest! {
    #[test]
    fn prop_optimum_is_feasible(mix in arb_mix()) {
        for backend in backends() {
            let result = solve_with(&mix, backend).unwrap();
            if result.is_optimal() {
                prop_assert!(result.doors_units >= -1e-6, "{}", backend);
                prop_assert!(result.windows_units >= -1e-6, "{}", backend);
                for plant in &result.plants {
                    prop_assert!(plant.time_used <= plant.capacity + 1e-6, "{}", backend);
                }
            }
        }
    }

    #[test]
    fn prop_profit_matches_quantities(mix in arb_mix()) {
        for backend in backends() {
            let result = solve_with(&mix, backend).unwrap();
            prop_assert_eq!(
                result.max_profit,
                if result.is_optimal() {
                    mix.doors_profit * result.doors_units + mix.windows_profit * result.windows_units
                } else {
                    0.0
                }
            );
        }
    }

    #[test]
    fn prop_slack_identity(mix in arb_mix()) {
        for backend in backends() {
            let result = solve_with(&mix, backend).unwrap();
            for plant in &result.plants {
                prop_assert_eq!(plant.slack, plant.capacity - plant.time_used);
                prop_assert!((plant.slack + plant.time_used - plant.capacity).abs() <= 1e-9 * plant.capacity.abs().max(1.0));
                prop_assert_eq!(plant.binding, plant.slack.abs() < BINDING_TOLERANCE);
            }
        }
    }

    #[test]
    fn prop_more_capacity_never_lowers_profit(
        mix in arb_mix(),
        plant in 0usize..3,
        extra in 0.0..50.0f64,
    ) {
        let mut grown = mix.clone();
        grown.plants[plant].capacity += extra;

        for backend in backends() {
            let before = solve_with(&mix, backend).unwrap();
            let after = solve_with(&grown, backend).unwrap();

            if before.is_optimal() {
                prop_assert!(after.is_optimal(), "{}", backend);
                prop_assert!(
                    after.max_profit >= before.max_profit - 1e-6 * (1.0 + before.max_profit),
                    "{}: {} then {}", backend, before.max_profit, after.max_profit
                );
            }
        }
    }

    #[test]
    fn prop_solving_is_deterministic(mix in arb_mix()) {
        for backend in backends() {
            let first = solve_with(&mix, backend).unwrap();
            let second = solve_with(&mix, backend).unwrap();
            prop_assert_eq!(first, second);
        }
    }

    #[test]
    fn prop_backends_agree_with_vertex(mix in arb_mix()) {
        let reference = solve_with(&mix, SolverBackend::Vertex).unwrap();
        for backend in backends() {
            let result = solve_with(&mix, backend).unwrap();
            prop_assert_eq!(result.status, reference.status, "{}", backend);
            prop_assert!(
                close(result.max_profit, reference.max_profit),
                "{}: {} vs {}", backend, result.max_profit, reference.max_profit
            );
        }
    }
}
