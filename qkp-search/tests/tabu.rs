use qkp_search::{balanced_register, steer, Qubit, TabuLedger};

#[test]
fn test_freeze_and_decay() {
    let mut ledger = TabuLedger::new();
    ledger.freeze(2, 3);
    assert!(ledger.is_frozen(2));
    assert_eq!(ledger.remaining(2), 3);

    ledger.decay();
    assert_eq!(ledger.remaining(2), 2);
    ledger.decay();
    ledger.decay();
    assert!(!ledger.is_frozen(2));
    assert_eq!(ledger.remaining(2), 0);
    assert!(ledger.is_empty());
}

#[test]
fn test_decay_removes_expired_entries_only() {
    let mut ledger = TabuLedger::new();
    ledger.freeze(0, 1);
    ledger.freeze(5, 2);
    ledger.decay();
    assert!(!ledger.is_frozen(0));
    assert!(ledger.is_frozen(5));
    assert_eq!(ledger.len(), 1);
}

#[test]
fn test_refreeze_resets_tenure() {
    let mut ledger = TabuLedger::new();
    ledger.freeze(1, 2);
    ledger.decay();
    assert_eq!(ledger.remaining(1), 1);
    ledger.freeze(1, 2);
    assert_eq!(ledger.remaining(1), 2);
}

#[test]
fn test_decay_never_goes_negative() {
    let mut ledger = TabuLedger::new();
    ledger.decay();
    ledger.freeze(3, 1);
    ledger.decay();
    ledger.decay();
    ledger.decay();
    assert_eq!(ledger.remaining(3), 0);
    assert!(ledger.is_empty());
}

#[test]
fn test_steer_rotates_disagreements_and_freezes() {
    let mut register = balanced_register(3);
    let mut ledger = TabuLedger::new();
    // toward = [1, 0, 1], away = [0, 0, 0]: positions 0 and 2 disagree.
    steer(&mut register, &mut ledger, 2, &[1, 0, 1], &[0, 0, 0], 0.1);

    assert!(register[0].beta.powi(2) > 0.5);
    assert_eq!(register[1], Qubit::balanced());
    assert!(register[2].beta.powi(2) > 0.5);
    assert!(ledger.is_frozen(0));
    assert!(!ledger.is_frozen(1));
    assert!(ledger.is_frozen(2));
    assert_eq!(ledger.remaining(0), 2);
}

#[test]
fn test_steer_skips_frozen_positions() {
    let mut register = balanced_register(2);
    let mut ledger = TabuLedger::new();
    ledger.freeze(0, 3);
    steer(&mut register, &mut ledger, 3, &[1, 1], &[0, 0], 0.1);
    assert_eq!(register[0], Qubit::balanced());
    assert!(register[1].beta.powi(2) > 0.5);
}

#[test]
fn test_steer_sign_correction_keeps_the_pull_direction() {
    // In the alpha*beta < 0 quadrant a positive angle would push the state
    // away from 1; the flipped sign still raises the probability of 1.
    let mut register = vec![Qubit {
        alpha: -std::f64::consts::FRAC_1_SQRT_2,
        beta: std::f64::consts::FRAC_1_SQRT_2,
    }];
    let mut ledger = TabuLedger::new();
    steer(&mut register, &mut ledger, 1, &[1], &[0], 0.1);
    assert!(register[0].beta.powi(2) > 0.5);
}

#[test]
fn test_steer_ignores_agreeing_positions() {
    let mut register = balanced_register(2);
    let mut ledger = TabuLedger::new();
    steer(&mut register, &mut ledger, 2, &[1, 0], &[1, 0], 0.2);
    assert_eq!(register[0], Qubit::balanced());
    assert_eq!(register[1], Qubit::balanced());
    assert!(ledger.is_empty());
}
