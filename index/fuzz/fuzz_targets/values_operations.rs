#![no_main]
use arbitrary::Arbitrary;
use field_index::values::{ValueIndex, ValueMap};
use libfuzzer_sys::fuzz_target;
use std::collections::HashMap;

const MAX_OPERATIONS: usize = 128;

#[derive(Arbitrary, Debug, Clone)]
enum Operation {
    Insert { value: u8, position: u8 },
    Get { value: u8 },
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
    let mut values: ValueMap<u8, u8> = ValueMap::default();

    // Reference model: value -> insertion-ordered positions.
    let mut reference: HashMap<u8, Vec<u8>> = HashMap::new();

    for op in &input.operations {
        match op {
            Operation::Insert { value, position } => {
                let inserted = values.insert(*value, *position);

                let positions = reference.entry(*value).or_default();
                let fresh = !positions.contains(position);
                if fresh {
                    positions.push(*position);
                }
                assert_eq!(
                    inserted, fresh,
                    "insert of ({value}, {position}) disagreed with the model"
                );
            }

            Operation::Get { value } => {
                let got: Vec<u8> = values.get(value).copied().collect();
                let expected = reference.get(value).cloned().unwrap_or_default();
                assert_eq!(got, expected, "get of {value} disagreed with the model");
            }

            Operation::Remove { position } => {
                let removed = values.remove(position);

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

    let live: usize = reference.values().map(Vec::len).sum();
    assert_eq!(values.items(), live);
}

fuzz_target!(|input: FuzzInput| {
    fuzz(input);
});
