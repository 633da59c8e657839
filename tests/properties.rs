#![allow(non_snake_case)]

//! Property tests over the parameter ranges accepted by the validator.

use proptest::prelude::*;
use qsolvers::{
    registry::Registry,
    result::Parity,
    schema::RawParams,
    solvers::{
        finite_well::{ self, FiniteWell },
        tunneling::{ self, Tunneling },
        Solver,
    },
};
use serde_json::json;

fn barrier() -> impl Strategy<Value = tunneling::Params> {
    (0.1..10.0_f64, 0.1..5.0_f64, 0.1..5.0_f64, 0.1..10.0_f64, 0.1..10.0_f64)
        .prop_map(|(V0, L, E, m, hbar)| tunneling::Params {
            barrier_height: V0,
            barrier_width: L,
            particle_energy: E,
            m,
            hbar,
        })
}

fn well() -> impl Strategy<Value = finite_well::Params> {
    (0.1..10.0_f64, 0.1..50.0_f64, 0.1..10.0_f64, 0.1..10.0_f64)
        .prop_map(|(a, V0, m, hbar)| finite_well::Params { a, V0, m, hbar, precision: 10 })
}

proptest! {
    /// Transmission and reflection always account for every particle.
    #[test]
    fn probabilities_sum_to_one_hundred(params in barrier()) {
        let res = Tunneling::default().solve(&params).tunneling_results;
        prop_assert!((0.0..=100.0).contains(&res.transmission_probability));
        prop_assert!(
            (res.transmission_probability + res.reflection_probability - 100.0).abs() < 1e-6);
    }

    /// The sum rule also holds exactly at the barrier top.
    #[test]
    fn probabilities_sum_at_threshold(
        V0 in 0.1..5.0_f64,
        L in 0.1..5.0_f64,
        m in 0.1..10.0_f64,
    ) {
        let params = tunneling::Params {
            barrier_height: V0,
            barrier_width: L,
            particle_energy: V0,
            m,
            hbar: 1.0,
        };
        let sol = Tunneling::default().solve(&params);
        prop_assert_eq!(sol.system_info.regime, tunneling::Regime::Threshold);
        let res = sol.tunneling_results;
        prop_assert!(
            (res.transmission_probability + res.reflection_probability - 100.0).abs() < 1e-6);
    }

    /// Bound states are ordered, alternate in parity, and never exceed the
    /// counting bound.
    #[test]
    fn bound_states_are_well_formed(params in well()) {
        let sol = FiniteWell::default().solve(&params);
        let states = &sol.bound_states;
        prop_assert!(states.len() <= sol.system_info.max_bound_states);
        for (i, state) in states.iter().enumerate() {
            prop_assert_eq!(state.n, i + 1);
            prop_assert!(state.energy < 0.0);
            prop_assert!(state.binding_energy > 0.0 && state.binding_energy < params.V0);
            prop_assert!(state.penetration_depth.is_some());
        }
        prop_assert!(states.windows(2).all(|w| w[0].z < w[1].z && w[0].energy < w[1].energy));
        if let Some(first) = states.first() {
            prop_assert_eq!(first.parity, Parity::Even);
        }
    }

    /// Identical requests give identical serialized outcomes.
    #[test]
    fn solving_is_deterministic(params in well()) {
        let registry = Registry::default();
        let raw: RawParams = match json!({
            "a": params.a,
            "V0": params.V0,
            "m": params.m,
            "hbar": params.hbar,
            "precision": params.precision,
        }) {
            serde_json::Value::Object(map) => map,
            _ => unreachable!(),
        };
        let a = serde_json::to_string(&registry.solve("finite_well", &raw).unwrap()).unwrap();
        let b = serde_json::to_string(&registry.solve("finite_well", &raw).unwrap()).unwrap();
        prop_assert_eq!(a, b);
    }
}
