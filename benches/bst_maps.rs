use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::Rng;

const NUM_OF_OPERATIONS: usize = 1000;

macro_rules! ordered_map_benches {
    ($($module_name:ident: $type_name:ty,)*) => {
        $(
            mod $module_name {
                use criterion::{black_box, Criterion};
                use rand::Rng;
                use super::NUM_OF_OPERATIONS;

                fn build() -> ($type_name, Vec<u32>) {
                    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
                    let mut map = <$type_name>::new();
                    let mut keys = Vec::new();
                    for _ in 0..NUM_OF_OPERATIONS {
                        let key = rng.next_u32();
                        let val = rng.next_u32();

                        map.insert(key, val);
                        keys.push(key);
                    }
                    (map, keys)
                }

                pub fn bench_insert(c: &mut Criterion) {
                    c.bench_function(&format!("bench {} insert", stringify!($module_name)), |b| b.iter(|| {
                        let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
                        let mut map = <$type_name>::new();
                        for _ in 0..NUM_OF_OPERATIONS {
                            let key = rng.next_u32();
                            let val = rng.next_u32();

                            map.insert(key, val);
                        }
                        black_box(map)
                    }));
                }

                pub fn bench_get(c: &mut Criterion) {
                    let (map, keys) = build();
                    c.bench_function(&format!("bench {} get", stringify!($module_name)), move |b| b.iter(|| {
                        for key in &keys {
                            black_box(map.get(key));
                        }
                    }));
                }

                pub fn bench_remove(c: &mut Criterion) {
                    c.bench_function(&format!("bench {} remove", stringify!($module_name)), |b| b.iter(|| {
                        let (mut map, keys) = build();
                        for key in &keys {
                            black_box(map.remove(key));
                        }
                    }));
                }
            }
        )*

        criterion_group!(
            benches,
            bench_iter,
            $(
                $module_name::bench_insert,
                $module_name::bench_get,
                $module_name::bench_remove,
            )*
        );
    }
}

fn bench_iter(c: &mut Criterion) {
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    let mut map = rbtree_index::RedBlackMap::new();
    for _ in 0..NUM_OF_OPERATIONS {
        map.insert(rng.next_u32(), rng.next_u32());
    }

    c.bench_function("bench red_black_tree iter", move |b| {
        b.iter(|| black_box(map.iter().count()))
    });
}

ordered_map_benches!(
    btreemap: std::collections::BTreeMap<u32, u32>,
    red_black_tree: rbtree_index::RedBlackMap<u32, u32>,
);

criterion_main!(benches);
