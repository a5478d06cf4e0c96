mod common;

use common::{element, TestKind};
use seqcfg_core::search::{MaxError, Mode, Output, SearchConfigId};
use seqcfg_core::{
    check_domain, compatible, ConfigElement, ConfigError, Configuration, ElementKind, Tagged,
};

#[test]
fn test_domain_definition_is_consistent() {
    assert_eq!(check_domain::<TestKind>(), Ok(()));
}

#[test]
fn test_compatible_pair_combines() {
    let config = element(TestKind::A, 1).combine(element(TestKind::C, 3)).unwrap();
    assert_eq!(config.len(), 2);
    assert!(config.contains(TestKind::A));
    assert!(config.contains(TestKind::C));
    assert!(!config.contains(TestKind::B));
}

#[test]
fn test_incompatible_pair_is_identified() {
    let err = element(TestKind::A, 1).combine(element(TestKind::B, 2)).unwrap_err();
    assert_eq!(
        err,
        ConfigError::IncompatibleKinds {
            domain: "test",
            first: TestKind::A,
            second: TestKind::B,
        }
    );
    assert_eq!(
        err.to_string(),
        "incompatible test configuration elements: `a` cannot be combined with `b`"
    );
}

#[test]
fn test_same_kind_is_a_duplicate() {
    let err = element(TestKind::A, 1).combine(element(TestKind::A, 2)).unwrap_err();
    assert_eq!(
        err,
        ConfigError::DuplicateKind {
            domain: "test",
            kind: TestKind::A,
        }
    );
}

#[test]
fn test_incompatibility_found_through_a_chain() {
    let config = element(TestKind::C, 3).combine(element(TestKind::A, 1)).unwrap();
    let err = config.with(element(TestKind::B, 2)).unwrap_err();
    assert_eq!(err, ConfigError::incompatible(TestKind::A, TestKind::B));
}

#[test]
fn test_get_returns_constructed_value() {
    let config = element(TestKind::C, 30).combine(element(TestKind::B, 20)).unwrap();

    let b = config
        .get(TestKind::B)
        .and_then(|found| found.downcast_ref::<Tagged<TestKind, i64>>())
        .unwrap();
    assert_eq!(*b.value(), 20);
    assert_eq!(config.value_of::<Tagged<TestKind, i64>>(), Some(&30));
    assert!(config.get(TestKind::A).is_none());
}

#[test]
fn test_iteration_follows_combination_order() {
    let left = element(TestKind::C, 3).into_configuration();
    let right = element(TestKind::B, 2).into_configuration();

    let kinds: Vec<_> = right
        .combine(&left)
        .unwrap()
        .iter()
        .map(|found| found.element_kind())
        .collect();
    assert_eq!(kinds, vec![TestKind::B, TestKind::C]);

    // the kind set itself is always in index order
    let set: Vec<_> = right.combine(&left).unwrap().kinds().iter().collect();
    assert_eq!(set, vec![TestKind::B, TestKind::C]);
}

#[test]
fn test_table_lookup_is_symmetric() {
    for &a in TestKind::all() {
        for &b in TestKind::all() {
            assert_eq!(compatible(a, b), compatible(b, a));
        }
    }
}

#[test]
fn test_search_configuration_end_to_end() {
    let config = Configuration::new()
        .with(Output::IndexCursor)
        .and_then(|config| config.with(MaxError::total(1)))
        .and_then(|config| config.with(Mode::AllBest))
        .unwrap();

    assert_eq!(
        config.kinds().iter().collect::<Vec<_>>(),
        vec![SearchConfigId::MaxError, SearchConfigId::Output, SearchConfigId::Mode]
    );
    assert!(config.validate().is_ok());

    let shared = config.clone();
    let handle = std::thread::spawn(move || shared.get_as::<Mode>().copied());
    assert_eq!(handle.join().unwrap(), Some(Mode::AllBest));
}
