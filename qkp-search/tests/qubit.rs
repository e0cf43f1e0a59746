use qkp_search::{balanced_register, measure_register, Qubit};
use rand::{rngs::SmallRng, SeedableRng};
use std::f64::consts::PI;

fn assert_close(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-12, "{} != {}", a, b);
}

#[test]
fn test_balanced_is_equal_superposition() {
    let qubit = Qubit::balanced();
    assert_close(qubit.alpha * qubit.alpha + qubit.beta * qubit.beta, 1.0);
    assert_close(qubit.beta * qubit.beta, 0.5);
}

#[test]
fn test_measure_extremes() {
    let mut rng = SmallRng::seed_from_u64(0);
    let never = Qubit {
        alpha: 1.0,
        beta: 0.0,
    };
    let always = Qubit {
        alpha: 0.0,
        beta: 1.0,
    };
    for _ in 0..200 {
        assert_eq!(never.measure(&mut rng), 0);
        assert_eq!(always.measure(&mut rng), 1);
    }
}

#[test]
fn test_measure_does_not_collapse() {
    let mut rng = SmallRng::seed_from_u64(1);
    let qubit = Qubit::balanced();
    for _ in 0..10 {
        qubit.measure(&mut rng);
    }
    assert_eq!(qubit, Qubit::balanced());
}

#[test]
fn test_rotate_zero_is_identity() {
    let mut qubit = Qubit {
        alpha: 0.3,
        beta: -0.8,
    };
    qubit.rotate(0.0);
    assert_close(qubit.alpha, 0.3);
    assert_close(qubit.beta, -0.8);
}

#[test]
fn test_rotate_round_trip() {
    let mut qubit = Qubit::balanced();
    qubit.rotate(0.37);
    qubit.rotate(-0.37);
    assert_close(qubit.alpha, Qubit::balanced().alpha);
    assert_close(qubit.beta, Qubit::balanced().beta);
}

#[test]
fn test_rotate_quarter_turn_from_balanced() {
    // cos(pi/4) = sin(pi/4), so the balanced state maps to (0, 1).
    let mut qubit = Qubit::balanced();
    qubit.rotate(PI / 4.0);
    assert_close(qubit.alpha, 0.0);
    assert_close(qubit.beta, 1.0);
}

#[test]
fn test_rotate_preserves_norm() {
    let mut qubit = Qubit::balanced();
    for _ in 0..1000 {
        qubit.rotate(0.013);
    }
    let norm = qubit.alpha * qubit.alpha + qubit.beta * qubit.beta;
    assert!((norm - 1.0).abs() < 1e-9);
}

#[test]
fn test_measure_register_is_binary() {
    let mut rng = SmallRng::seed_from_u64(2);
    let register = balanced_register(32);
    let bits = measure_register(&register, &mut rng);
    assert_eq!(bits.len(), 32);
    assert!(bits.iter().all(|&bit| bit == 0 || bit == 1));
}
