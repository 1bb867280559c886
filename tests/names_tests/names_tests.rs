//! Name Generator Tests
//!
//! Tests verify:
//! - Same seed, same sequence
//! - Generated ids stay in range
//! - Store population is reproducible from the seed

use std::collections::HashSet;

use snapbench::names::{is_valid_name, NameGenerator, COLORS, MAX_NAME_LEN};
use snapbench::store::Store;
use snapbench::BenchError;

#[test]
fn test_same_seed_same_names() {
    let mut a = NameGenerator::new(42);
    let mut b = NameGenerator::new(42);

    for _ in 0..500 {
        assert_eq!(a.next_name(), b.next_name());
        assert_eq!(a.next_id(10_000).unwrap(), b.next_id(10_000).unwrap());
    }
}

#[test]
fn test_different_seeds_differ() {
    let mut a = NameGenerator::new(1);
    let mut b = NameGenerator::new(2);

    let first: Vec<String> = (0..20).map(|_| a.next_name()).collect();
    let second: Vec<String> = (0..20).map(|_| b.next_name()).collect();
    assert_ne!(first, second);
}

#[test]
fn test_next_id_in_range() {
    let mut generator = NameGenerator::new(0);
    let mut seen = HashSet::new();

    for _ in 0..10_000 {
        let id = generator.next_id(16).unwrap();
        assert!(id < 16);
        seen.insert(id);
    }

    // Uniform over a small range hits every id
    assert_eq!(seen.len(), 16);
}

#[test]
fn test_next_id_empty_population_is_error() {
    let mut generator = NameGenerator::new(0);
    assert!(matches!(generator.next_id(0), Err(BenchError::Config(_))));

    // The generator is still usable afterwards
    assert_eq!(generator.next_id(1).unwrap(), 0);
}

#[test]
fn test_name_format() {
    let mut generator = NameGenerator::new(3);

    for _ in 0..1000 {
        let name = generator.next_name();
        let (color, digits) = name.rsplit_once('-').unwrap();
        assert!(COLORS.contains(&color));
        assert_eq!(digits.len(), 8);
        assert_ne!(digits, "00000000");
        assert!(name.len() <= MAX_NAME_LEN);
        assert!(is_valid_name(&name));
    }
}

#[test]
fn test_population_reproducible() {
    let first = Store::populate(1000, &mut NameGenerator::new(0)).unwrap();
    let second = Store::populate(1000, &mut NameGenerator::new(0)).unwrap();

    for id in 0..1000 {
        assert_eq!(first.get(id).unwrap().name(), second.get(id).unwrap().name());
    }
}
