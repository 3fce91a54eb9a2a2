#![no_main]
use arbitrary::Arbitrary;
use commonware_runtime::deterministic;
use field_index::{index::Index, values::ValueMap};
use libfuzzer_sys::fuzz_target;
use std::collections::HashMap;

const MAX_OPERATIONS: usize = 128;

// A small key universe so operations collide often.
const KEYS: [&str; 4] = ["first_name", "last_name", "city", "friend"];

#[derive(Arbitrary, Debug, Clone)]
enum Operation {
    Insert { key: u8, value: u8, position: u8 },
    Get { key: u8, value: u8 },
    Remove { position: u8 },
}

#[derive(Arbitrary, Debug)]
struct FuzzInput {
    operations: Vec<Operation>,
}

fn fuzz(input: FuzzInput) {
    if input.operations.is_empty() || input.operations.len() > MAX_OPERATIONS {
        return;
    }
    let context = deterministic::Context::default();
    let mut index: Index<ValueMap<u8, u8>> = Index::init(context);

    // Reference model: (key, value) -> insertion-ordered positions.
    let mut reference: HashMap<(usize, u8), Vec<u8>> = HashMap::new();

    for op in &input.operations {
        match op {
            Operation::Insert {
                key,
                value,
                position,
            } => {
                let key = *key as usize % KEYS.len();
                let inserted = index.insert(KEYS[key], *value, *position);

                let positions = reference.entry((key, *value)).or_default();
                let fresh = !positions.contains(position);
                if fresh {
                    positions.push(*position);
                }
                assert_eq!(
                    inserted, fresh,
                    "insert of ({}, {}, {}) disagreed with the model",
                    KEYS[key], value, position
                );
            }

            Operation::Get { key, value } => {
                let key = *key as usize % KEYS.len();
                let got: Vec<u8> = index.get(KEYS[key], value).copied().collect();
                let expected = reference
                    .get(&(key, *value))
                    .cloned()
                    .unwrap_or_default();
                assert_eq!(
                    got, expected,
                    "get of ({}, {}) disagreed with the model",
                    KEYS[key], value
                );
            }

            Operation::Remove { position } => {
                let removed = index.remove(position);

                let mut expected_removed = false;
                for positions in reference.values_mut() {
                    let before = positions.len();
                    positions.retain(|p| p != position);
                    if positions.len() != before {
                        expected_removed = true;
                    }
                }
                assert_eq!(
                    removed, expected_removed,
                    "remove of {position} disagreed with the model"
                );
            }
        }
    }

    // The index's accounting must match the model's surviving entries.
    let live: usize = reference.values().map(Vec::len).sum();
    assert_eq!(index.items(), live);
    assert!(index.keys() <= KEYS.len());
}

fuzz_target!(|input: FuzzInput| {
    fuzz(input);
});
