use std::collections::HashSet;
use std::hash::Hash;

use probe_set::IntHashSet;
use probe_set::Primitive;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;

const OPERATIONS: usize = 20_000;

fn sorted<T: Ord>(mut values: Vec<T>) -> Vec<T> {
    values.sort_unstable();
    values
}

fn assert_matches<T>(set: &IntHashSet<T>, model: &HashSet<T>)
where
    T: Primitive + Hash + Ord,
{
    assert_eq!(set.len(), model.len());
    assert_eq!(set.iter().len(), model.len());
    assert_eq!(
        sorted(set.to_vec()),
        sorted(model.iter().copied().collect())
    );
}

fn run_model<T>(seed: u64, pool_size: usize, load_factor: f32, sample: fn(&mut SmallRng) -> T)
where
    T: Primitive + Hash + Ord,
{
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut pool: Vec<T> = (0..pool_size).map(|_| sample(&mut rng)).collect();
    pool.push(T::ZERO);

    let mut set = IntHashSet::<T>::with_capacity_and_load_factor(4, load_factor).unwrap();
    let mut model = HashSet::new();

    for step in 0..OPERATIONS {
        let value = pool[rng.random_range(0..pool.len())];
        match rng.random_range(0..100) {
            0..45 => assert_eq!(set.add(value), model.insert(value), "add {value}"),
            45..75 => assert_eq!(set.remove(value), model.remove(&value), "remove {value}"),
            75..95 => assert_eq!(set.contains(value), model.contains(&value)),
            95..97 => {
                let keep: Vec<T> = pool.iter().copied().filter(|_| rng.random_bool(0.5)).collect();
                let changed = set.retain_all(&keep);
                let before = model.len();
                model.retain(|v| keep.contains(v));
                assert_eq!(changed, model.len() != before);
            }
            97..99 => {
                let mut cursor = set.cursor();
                while cursor.has_next() {
                    let v = cursor.next(&set).unwrap();
                    if rng.random_bool(0.3) {
                        cursor.remove(&mut set).unwrap();
                        assert!(model.remove(&v));
                    }
                }
            }
            _ => {
                if rng.random_bool(0.1) {
                    set.clear();
                    model.clear();
                } else {
                    set.compact();
                }
            }
        }

        assert_eq!(set.len(), model.len(), "step {step}");
        if step % 1000 == 0 {
            assert_matches(&set, &model);
        }
    }

    assert_matches(&set, &model);
    for &v in &pool {
        assert_eq!(set.contains(v), model.contains(&v), "value {v}");
    }
}

#[test]
fn model_u8() {
    run_model(1, 200, 0.55, |rng| rng.random::<u8>());
}

#[test]
fn model_i8_dense() {
    run_model(2, 256, 0.9, |rng| rng.random::<i8>());
}

#[test]
fn model_i16() {
    run_model(3, 300, 0.75, |rng| rng.random::<i16>());
}

#[test]
fn model_u32_sparse() {
    run_model(4, 500, 0.1, |rng| rng.random::<u32>());
}

#[test]
fn model_i64() {
    run_model(5, 400, 0.55, |rng| rng.random::<i64>());
}

#[test]
fn model_u64() {
    run_model(6, 1000, 0.9, |rng| rng.random::<u64>());
}

#[test]
fn model_usize() {
    // No uniform distribution exists for `usize`; sample 64 bits and truncate.
    run_model(7, 128, 0.5, |rng| rng.random::<u64>() as usize);
}

#[test]
fn model_isize_clustered() {
    // Multiples of 1024 pile into two home slots in every table up to 1024 slots.
    run_model(8, 64, 0.75, |rng| (rng.random_range(-32..32i64) * 1024) as isize);
}

#[test]
fn equal_sets_hash_alike_across_histories() {
    let mut rng = SmallRng::seed_from_u64(42);
    let values: Vec<i32> = (0..500).map(|_| rng.random_range(-1000..1000)).collect();

    let forward: IntHashSet<i32> = values.iter().copied().collect();
    let mut backward = IntHashSet::<i32>::with_capacity_and_load_factor(2048, 0.3).unwrap();
    for &v in values.iter().rev() {
        backward.add(v);
        backward.add(v + 5000);
        backward.remove(v + 5000);
    }

    assert_eq!(forward, backward);
    assert_eq!(forward.hash_code(), backward.hash_code());
}
