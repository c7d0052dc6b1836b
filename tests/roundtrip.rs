//! End-to-end encode/decode coverage, mirroring the scenarios a caller
//! integrating this crate into a storage system would exercise: fixed
//! erasure patterns at several `(m, k)` pairs, the no-data-loss
//! short-circuit, and cache/no-cache equivalence.

use rand::Rng;
use rs_erasure_core::Codec;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn seeded_source(size: usize, seed: u64) -> Vec<u8> {
    use rand::SeedableRng;
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    (0..size).map(|_| rng.random::<u8>()).collect()
}

fn corrupt(layout: &[u8], err_list: &[usize], shard_len: usize) -> Vec<u8> {
    let mut corrupted = layout.to_vec();
    for &e in err_list {
        for b in &mut corrupted[e * shard_len..(e + 1) * shard_len] {
            *b = 0;
        }
    }
    corrupted
}

#[test]
fn basic_erasure_12_8() {
    init_tracing();
    let shard_len = 16;
    let code = Codec::new(12, 8, 8 * shard_len).unwrap();
    let source = seeded_source(8 * shard_len, 100);
    let layout = code.encode_layout(&source).unwrap();

    let err_list = [0usize, 2, 3, 4];
    let corrupted = corrupt(&layout, &err_list, shard_len);
    let recovered = code.decode(&corrupted, &err_list, false).unwrap();
    assert_eq!(source, recovered, "source was not recovered with 4 errors");
}

#[test]
fn basic_erasure_16_8_all_data_shards_lost() {
    let shard_len = 16;
    let code = Codec::new(16, 8, 8 * shard_len).unwrap();
    let source = seeded_source(8 * shard_len, 101);
    let layout = code.encode_layout(&source).unwrap();

    let err_list: Vec<usize> = (0..8).collect();
    let corrupted = corrupt(&layout, &err_list, shard_len);
    let recovered = code.decode(&corrupted, &err_list, false).unwrap();
    assert_eq!(source, recovered, "source was not recovered with 8 errors");
}

#[test]
fn basic_erasure_20_8_at_max_erasure_budget() {
    let shard_len = 16;
    let code = Codec::new(20, 8, 8 * shard_len).unwrap();
    let source = seeded_source(8 * shard_len, 102);
    let layout = code.encode_layout(&source).unwrap();

    let err_list = [0usize, 1, 2, 3, 4, 5, 6, 7, 8, 9, 16, 17];
    let corrupted = corrupt(&layout, &err_list, shard_len);
    let recovered = code.decode(&corrupted, &err_list, false).unwrap();
    assert_eq!(source, recovered, "source was not recovered at max erasures");
}

#[test]
fn basic_erasure_9_5() {
    let shard_len = 16;
    let code = Codec::new(9, 5, 5 * shard_len).unwrap();
    let source = seeded_source(5 * shard_len, 103);
    let layout = code.encode_layout(&source).unwrap();

    let err_list = [0usize, 2, 3, 4];
    let corrupted = corrupt(&layout, &err_list, shard_len);
    let recovered = code.decode(&corrupted, &err_list, false).unwrap();
    assert_eq!(source, recovered, "source was not recovered with 4 errors");
}

#[test]
fn all_parity_erased_returns_source_via_short_circuit() {
    let shard_len = 16;
    let code = Codec::new(12, 8, 8 * shard_len).unwrap();
    let source = seeded_source(8 * shard_len, 104);
    let layout = code.encode_layout(&source).unwrap();

    let err_list = [8usize, 9, 10, 11];
    let corrupted = corrupt(&layout, &err_list, shard_len);
    let recovered = code.decode(&corrupted, &err_list, false).unwrap();
    assert_eq!(source, recovered);
}

#[test]
fn cache_and_no_cache_decode_byte_identical() {
    let shard_len = 16;
    let code = Codec::new(12, 8, 8 * shard_len).unwrap();
    let source = seeded_source(8 * shard_len, 105);
    let layout = code.encode_layout(&source).unwrap();

    let err_list = [0usize, 2, 3, 4];
    let corrupted = corrupt(&layout, &err_list, shard_len);

    let cached = code.decode(&corrupted, &err_list, true).unwrap();
    let uncached = code.decode(&corrupted, &err_list, false).unwrap();
    assert_eq!(cached, uncached);
    assert_eq!(cached, source);
}

#[test]
fn randomized_erasure_sweep() {
    let shard_len = 16;
    let mut rng = rand::rng();

    for &(m, k) in &[(9usize, 5usize), (12, 8), (16, 8), (20, 8)] {
        let code = Codec::new(m, k, k * shard_len).unwrap();
        for trial in 0..6u64 {
            let source = seeded_source(k * shard_len, 1000 + m as u64 * 10 + k as u64 + trial);
            let layout = code.encode_layout(&source).unwrap();

            let max_erasures = m - k;
            let count = rng.random_range(0..=max_erasures);
            let mut indices: Vec<usize> = (0..m).collect();
            for i in 0..count {
                let j = rng.random_range(i..m);
                indices.swap(i, j);
            }
            let mut err_list = indices[0..count].to_vec();
            err_list.sort_unstable();

            let corrupted = corrupt(&layout, &err_list, shard_len);
            for use_cache in [false, true] {
                let recovered = code.decode(&corrupted, &err_list, use_cache).unwrap();
                assert_eq!(recovered, source, "m={m} k={k} err_list={err_list:?}");
            }
        }
    }
}

#[test]
fn invalid_construction_parameters_are_rejected() {
    assert!(Codec::new(4, 4, 16).is_err());
    assert!(Codec::new(4, 0, 16).is_err());
    assert!(Codec::new(6, 4, 17).is_err());
}

#[test]
fn oversized_erasure_list_is_rejected() {
    let shard_len = 16;
    let code = Codec::new(12, 8, 8 * shard_len).unwrap();
    let source = seeded_source(8 * shard_len, 106);
    let layout = code.encode_layout(&source).unwrap();
    // m - k == 4, so a 5-element erasure list must be InvalidParameters.
    assert!(code.decode(&layout, &[0, 1, 2, 3, 4], false).is_err());
}
