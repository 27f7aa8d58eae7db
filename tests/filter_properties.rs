use double_bloom::{
    false_positive_rate, false_positive_rate_approx, BloomError, BloomFilter,
};
use proptest::prelude::*;

fn elements() -> impl Strategy<Value = Vec<Vec<u8>>> {
    prop::collection::vec(prop::collection::vec(any::<u8>(), 0..32), 1..200)
}

fn filter_shape() -> impl Strategy<Value = (u32, u32)> {
    (3u32..16, 1u32..12).prop_map(|(log_size, k)| (1 << log_size, k))
}

proptest! {
    #[test]
    fn added_elements_are_always_found((size, k) in filter_shape(), elements in elements()) {
        let mut bloom = BloomFilter::with_fnv(size, k).unwrap();
        for element in &elements {
            bloom.add(element);
            prop_assert!(bloom.check(element));
        }
        for element in elements.iter().rev() {
            prop_assert!(bloom.check(element));
        }
    }

    #[test]
    fn empty_filter_finds_nothing((size, k) in filter_shape(), elements in elements()) {
        let bloom = BloomFilter::with_fnv(size, k).unwrap();
        for element in &elements {
            prop_assert!(!bloom.check(element));
        }
    }

    #[test]
    fn repeated_add_is_idempotent(
        (size, k) in filter_shape(),
        element in prop::collection::vec(any::<u8>(), 0..64),
        repeats in 2usize..10,
    ) {
        let mut once = BloomFilter::with_fnv(size, k).unwrap();
        let mut many = BloomFilter::with_fnv(size, k).unwrap();

        once.add(&element);
        for _ in 0..repeats {
            many.add(&element);
        }

        prop_assert_eq!(once.stats(), many.stats());
    }

    #[test]
    fn reset_matches_fresh_filter((size, k) in filter_shape(), elements in elements()) {
        let mut bloom = BloomFilter::with_fnv(size, k).unwrap();
        for element in &elements {
            bloom.add(element);
        }

        bloom.reset();

        prop_assert!(bloom.is_empty());
        prop_assert_eq!(bloom.stats(), BloomFilter::with_fnv(size, k).unwrap().stats());
        for element in &elements {
            prop_assert!(!bloom.check(element));
        }
    }

    #[test]
    fn rates_are_bounded_and_monotonic(
        log_m in 3u32..32,
        k in 1u32..32,
        n1 in 0u64..1_000_000,
        extra in 0u64..1_000_000,
    ) {
        let m = 1u64 << log_m;
        let n2 = n1 + extra;

        let exact1 = false_positive_rate(m, k, n1);
        let exact2 = false_positive_rate(m, k, n2);
        prop_assert!((0.0..=1.0).contains(&exact1));
        prop_assert!((0.0..=1.0).contains(&exact2));
        prop_assert!(exact1 <= exact2);

        let approx1 = false_positive_rate_approx(m, k, n1);
        let approx2 = false_positive_rate_approx(m, k, n2);
        prop_assert!((0.0..=1.0).contains(&approx1));
        prop_assert!(approx1 <= approx2);
    }

    #[test]
    fn non_power_of_two_sizes_are_rejected(size in 9u32..100_000, k in 1u32..8) {
        prop_assume!(!size.is_power_of_two());
        prop_assert_eq!(
            BloomFilter::with_fnv(size, k).unwrap_err(),
            BloomError::InvalidSize(size as u64)
        );
    }
}

#[test]
fn sizes_below_eight_are_rejected() {
    for size in [0u32, 1, 2, 4] {
        assert_eq!(
            BloomFilter::with_fnv(size, 4).unwrap_err(),
            BloomError::InvalidSize(size as u64)
        );
    }
}
