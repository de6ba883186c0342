// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Training run tests.

These tests validate:
- A single edge converges on the weight that maps the input to the target
- Fan-out to several receivers still trains
- Runs are reproducible for a given seed
- Outside cancellation ends a run early, and promptly, without an error
*/

use neuroport_training::{Regimen, Trainer, TrainerConfig, TrainingSample};
use neuroport_units::{ActivationPair, CancelSignal, FanSpec};
use std::time::Duration;

fn doubling_config(cycles: u64) -> TrainerConfig {
    TrainerConfig {
        activation: ActivationPair::identity(),
        learnrate: 0.1,
        initial_weight: 0.75,
        regimen: Regimen::new(vec![TrainingSample::new(1.0, 2.0)]).unwrap(),
        cycles,
        ..TrainerConfig::default()
    }
}

#[test]
fn test_identity_edge_learns_doubling() {
    let report = Trainer::new(doubling_config(500)).unwrap().run().unwrap();

    assert_eq!(report.cycles, 500);
    assert_eq!(report.nucleus_cycles, 500);
    assert!(!report.interrupted);
    assert!(
        (report.final_weight - 2.0).abs() < 1e-9,
        "weight {} did not converge",
        report.final_weight
    );
    assert!(report.last_margin.abs() < 1e-9);
    assert!(report.mean_abs_margin > 0.0);
}

#[test]
fn test_single_cycle_update() {
    // output 0.75, margin 1.25, adjustment 0.125, weight 0.75 + 0.125 * 0.75
    let report = Trainer::new(doubling_config(1)).unwrap().run().unwrap();
    assert_eq!(report.cycles, 1);
    assert!((report.last_margin - 1.25).abs() < 1e-12);
    assert!((report.final_weight - 0.84375).abs() < 1e-12);
}

#[test]
fn test_fan_out_to_two_receivers_trains() {
    let config = TrainerConfig {
        fan: FanSpec::new(1, 2).unwrap(),
        ..doubling_config(100)
    };
    let report = Trainer::new(config).unwrap().run().unwrap();

    assert_eq!(report.nucleus_cycles, 100);
    assert!((report.final_weight - 2.0).abs() < 1e-9);
}

#[test]
fn test_same_seed_reproduces_run() {
    let config = TrainerConfig {
        cycles: 200,
        seed: 42,
        ..TrainerConfig::default()
    };
    let first = Trainer::new(config.clone()).unwrap().run().unwrap();
    let second = Trainer::new(config).unwrap().run().unwrap();

    assert_eq!(first.final_weight, second.final_weight);
    assert_eq!(first.mean_abs_margin, second.mean_abs_margin);
    assert_eq!(first.activation, "sigmoid");
}

#[test]
fn test_outside_cancel_interrupts_run() {
    let cancel = CancelSignal::new();
    cancel.cancel();

    let config = TrainerConfig {
        exchange_timeout: Duration::from_millis(100),
        ..doubling_config(500)
    };
    let report = Trainer::new(config)
        .unwrap()
        .run_with_signal(&cancel)
        .unwrap();

    assert!(report.interrupted);
    assert_eq!(report.cycles, 0);
    assert_eq!(report.final_weight, 0.75);
}

#[test]
fn test_cancel_mid_run_returns_promptly() {
    let cancel = CancelSignal::new();
    let config = TrainerConfig {
        exchange_timeout: Duration::from_secs(10),
        ..doubling_config(1_000_000_000)
    };
    let trainer = Trainer::new(config).unwrap();

    let canceller = {
        let cancel = cancel.clone();
        std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(50));
            cancel.cancel();
        })
    };
    let started = std::time::Instant::now();
    let report = trainer.run_with_signal(&cancel).unwrap();
    canceller.join().unwrap();

    // The pending exchange is abandoned instead of waiting out its timeout
    assert!(started.elapsed() < Duration::from_secs(5));
    assert!(report.interrupted);
    assert!(report.cycles < 1_000_000_000);
}
