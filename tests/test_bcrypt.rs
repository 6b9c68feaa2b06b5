extern crate passata;

mod common;

use passata::errors::ErrorKind;

// Token produced by another bcrypt implementation for the password "monkey".
static MONKEY_HASH: &'static str = "$2b$12$CglFdXEV5UmbyMVmCtOApuefAMZdplsPSgn.3rJ870C.ToxB9r16e";

#[test]
fn roundtrip() {
    common::init_test();

    let password = "monkey";
    let password_hash = passata::hash_password(password).unwrap();
    assert!(passata::verify_password(&password_hash, password).unwrap());
}

#[test]
fn near_miss_is_rejected() {
    let password_hash = passata::hash_password("monkey!").unwrap();
    assert!(passata::verify_password(&password_hash, "monkey!").unwrap());
    assert!(!passata::verify_password(&password_hash, "monkey").unwrap());
}

#[test]
fn interoperates_with_stored_tokens() {
    assert!(passata::verify_password(MONKEY_HASH, "monkey").unwrap());
    assert!(!passata::verify_password(MONKEY_HASH, "monkey!").unwrap());
}

#[test]
fn salt_randomness_produces_unique_tokens() {
    let first = passata::hash_password_with_work_factor("monkey", 6).unwrap();
    let second = passata::hash_password_with_work_factor("monkey", 6).unwrap();
    assert_ne!(first, second);
    assert!(passata::verify_password(&first, "monkey").unwrap());
    assert!(passata::verify_password(&second, "monkey").unwrap());
}

#[test]
fn stored_work_factor_survives_default_change() {
    // Hashed when the deployment default was 10; verification must keep
    // using the embedded parameters under today's default of 12.
    let old_hash = passata::hash_password_with_work_factor("monkey", 10).unwrap();
    assert!(old_hash.starts_with("$2b$10$"));
    assert!(passata::verify_password(&old_hash, "monkey").unwrap());
}

#[test]
fn empty_password_signals_invalid_input() {
    let err = passata::hash_password("").unwrap_err();
    match *err.kind() {
        ErrorKind::InvalidInput => {}
        ref k => panic!("unexpected error kind: {:?}", k),
    }
}

#[test]
fn out_of_range_cost_signals_unsupported_cost() {
    let err = passata::hash_password_with_work_factor("monkey", 32).unwrap_err();
    match *err.kind() {
        ErrorKind::UnsupportedCost(32) => {}
        ref k => panic!("unexpected error kind: {:?}", k),
    }
}

#[test]
fn malformed_token_is_distinguished_from_mismatch() {
    let err = passata::verify_password("not-a-real-token", "monkey").unwrap_err();
    match *err.kind() {
        ErrorKind::MalformedHash => {}
        ref k => panic!("unexpected error kind: {:?}", k),
    }
}

#[test]
fn update_hash_rewrites_weak_tokens() {
    let mut hash = passata::hash_password_with_work_factor("monkey", 10).unwrap();

    assert!(passata::verify_password_update_hash(&mut hash, "monkey").unwrap());
    assert!(hash.starts_with("$2b$12$"));
    assert!(passata::verify_password(&hash, "monkey").unwrap());
}
