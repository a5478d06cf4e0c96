//! Algebraic properties of combination and aggregation

mod common;

use common::{element, TestKind};
use proptest::prelude::*;
use seqcfg_core::align::AlignConfigId;
use seqcfg_core::search::SearchConfigId;
use seqcfg_core::{
    compatible, ConfigElement, ConfigError, ElementKind, ErrorBudget, ErrorCount, ErrorField,
};

fn test_kind() -> impl Strategy<Value = TestKind> {
    prop::sample::select(TestKind::all().to_vec())
}

fn search_kind() -> impl Strategy<Value = SearchConfigId> {
    prop::sample::select(SearchConfigId::all().to_vec())
}

fn align_kind() -> impl Strategy<Value = AlignConfigId> {
    prop::sample::select(AlignConfigId::all().to_vec())
}

proptest! {
    #[test]
    fn compatibility_is_symmetric(
        a in search_kind(),
        b in search_kind(),
        x in align_kind(),
        y in align_kind(),
    ) {
        prop_assert_eq!(compatible(a, b), compatible(b, a));
        prop_assert_eq!(compatible(x, y), compatible(y, x));
    }

    #[test]
    fn no_kind_is_compatible_with_itself(a in search_kind(), x in align_kind(), t in test_kind()) {
        prop_assert!(!compatible(a, a));
        prop_assert!(!compatible(x, x));
        prop_assert!(!compatible(t, t));
    }

    #[test]
    fn same_kind_always_duplicates(
        kind in test_kind(),
        left in any::<i64>(),
        right in any::<i64>(),
    ) {
        let err = element(kind, left).combine(element(kind, right)).unwrap_err();
        prop_assert_eq!(err, ConfigError::duplicate(kind));
    }

    #[test]
    fn validity_does_not_depend_on_grouping(
        a in test_kind(),
        b in test_kind(),
        c in test_kind(),
    ) {
        let left = element(a, 1)
            .combine(element(b, 2))
            .and_then(|ab| ab.with(element(c, 3)));
        let right = element(b, 2)
            .combine(element(c, 3))
            .and_then(|bc| element(a, 1).into_configuration().combine(&bc));

        prop_assert_eq!(left.is_ok(), right.is_ok());
        if let (Ok(left), Ok(right)) = (left, right) {
            prop_assert_eq!(left.kinds(), right.kinds());
            prop_assert_eq!(left.len(), 3);
        }
    }

    #[test]
    fn combined_values_round_trip(values in prop::collection::vec(any::<i64>(), 2)) {
        let config = element(TestKind::A, values[0])
            .combine(element(TestKind::C, values[1]))
            .unwrap();
        for (kind, value) in [(TestKind::A, values[0]), (TestKind::C, values[1])] {
            prop_assert!(config.contains(kind));
            let found = config
                .get(kind)
                .and_then(|found| found.downcast_ref::<seqcfg_core::Tagged<TestKind, i64>>())
                .map(|found| *found.value());
            prop_assert_eq!(found, Some(value));
        }
    }

    #[test]
    fn total_only_broadcasts(total in any::<u8>()) {
        let budget = ErrorBudget::reconcile(&[ErrorCount::total(total)]).unwrap();
        for field in ErrorField::ALL {
            prop_assert_eq!(budget.get(field), total);
        }
    }

    #[test]
    fn parts_only_sum_saturates(s in any::<u8>(), i in any::<u8>(), d in any::<u8>()) {
        let budget = ErrorBudget::reconcile(&[
            ErrorCount::substitution(s),
            ErrorCount::insertion(i),
            ErrorCount::deletion(d),
        ]).unwrap();
        let expected = (u32::from(s) + u32::from(i) + u32::from(d)).min(255) as u8;
        prop_assert_eq!(budget.total(), expected);
    }

    #[test]
    fn repeated_field_is_rejected(
        field in prop::sample::select(ErrorField::ALL.to_vec()),
        a in any::<u8>(),
        b in any::<u8>(),
    ) {
        let result =
            ErrorBudget::reconcile(&[ErrorCount::new(field, a), ErrorCount::new(field, b)]);
        prop_assert!(result.is_err());
    }
}
