//! Basic usage examples for double-bloom

use double_bloom::{
    false_positive_rate, false_positive_rate_approx, optimal_parameters, BloomFilter,
    BuildHasherFunction, Fnv1,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Double Bloom Filter Examples ===\n");

    // Example 1: Default FNV pair
    println!("1. Basic Bloom Filter:");
    let mut bloom = BloomFilter::with_fnv(1024, 4)?;

    let test_data: [&[u8]; 3] = [b"A stormy ocean", b"A towering wave", b"A rickety boat"];
    for item in test_data {
        bloom.add(item);
    }

    for item in test_data {
        println!("  {:?} in filter: {}", String::from_utf8_lossy(item), bloom.check(item));
    }
    for item in [b"A calm lake".as_slice(), b"A sturdy ship".as_slice()] {
        println!("  {:?} in filter: {}", String::from_utf8_lossy(item), bloom.check(item));
    }

    println!("  {}", bloom.stats());
    println!();

    // Example 2: Custom hash pair
    println!("2. Custom hash functions:");
    let mut custom = BloomFilter::with_hash_functions(
        4096,
        6,
        Fnv1,
        BuildHasherFunction::new(std::collections::hash_map::RandomState::new()),
    )?;
    custom.add(b"hello");
    println!("  \"hello\" in filter: {}", custom.check(b"hello"));
    println!("  \"world\" in filter: {}", custom.check(b"world"));
    println!();

    // Example 3: Measured vs predicted false positives
    println!("3. False positive rates:");
    let params = optimal_parameters(1_000, 0.01)?;
    println!(
        "  Suggested for 1000 elements at 1%: m = {}, k = {}, expected = {:.6}",
        params.num_bits, params.num_positions, params.expected_fpr
    );

    let (m, k) = (8192u32, 4u32);
    let mut measured = BloomFilter::with_fnv(m, k)?;
    let num_items = 1_000u64;
    for i in 0..num_items {
        measured.add(&i.to_le_bytes());
    }

    let trials = 10_000u64;
    let false_positives = (num_items..num_items + trials)
        .filter(|i| measured.check(&i.to_le_bytes()))
        .count();

    println!("  m = {}, k = {}, n = {}", m, k, num_items);
    println!(
        "  Measured:    {:.6}",
        false_positives as f64 / trials as f64
    );
    println!(
        "  Exact:       {:.6}",
        false_positive_rate(m as u64, k, num_items)
    );
    println!(
        "  Approximate: {:.6}",
        false_positive_rate_approx(m as u64, k, num_items)
    );
    println!("  From fill:   {:.6}", measured.estimated_fpr());

    measured.reset();
    println!("  After reset, empty: {}", measured.is_empty());

    Ok(())
}
