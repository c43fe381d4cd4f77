//! A key-value store whose commands carry arguments that shrink.

use std::collections::BTreeMap;

use reynard::{Gen, Runner, TestConfig, choose};
use reynard_stateful::prelude::*;

#[derive(Debug, Clone, PartialEq)]
enum StoreCommand {
    Put(u8, i32),
    Get(u8),
    Remove(u8),
}

/// Store that corrupts large values on write
struct LossyStore {
    entries: BTreeMap<u8, i32>,
    lossy: bool,
}

impl Command for StoreCommand {
    type State = BTreeMap<u8, i32>;
    type Subject = LossyStore;
    type Output = Option<i32>;

    fn precondition(&self, state: &BTreeMap<u8, i32>) -> bool {
        match self {
            StoreCommand::Get(key) | StoreCommand::Remove(key) => state.contains_key(key),
            StoreCommand::Put(..) => true,
        }
    }

    fn next_state(&self, state: &BTreeMap<u8, i32>) -> BTreeMap<u8, i32> {
        let mut next = state.clone();
        match self {
            StoreCommand::Put(key, value) => {
                next.insert(*key, *value);
            }
            StoreCommand::Remove(key) => {
                next.remove(key);
            }
            StoreCommand::Get(_) => {}
        }
        next
    }

    fn run(&self, store: &mut LossyStore) -> Option<i32> {
        match self {
            StoreCommand::Put(key, value) => {
                let stored = if store.lossy && *value >= 50 { value - 1 } else { *value };
                store.entries.insert(*key, stored);
                None
            }
            StoreCommand::Get(key) => store.entries.get(key).copied(),
            StoreCommand::Remove(key) => store.entries.remove(key),
        }
    }

    fn postcondition(&self, state_before: &BTreeMap<u8, i32>, output: &Option<i32>) -> bool {
        match self {
            StoreCommand::Put(..) => output.is_none(),
            StoreCommand::Get(key) | StoreCommand::Remove(key) => {
                *output == state_before.get(key).copied()
            }
        }
    }
}

struct StoreMachine;

impl StateMachine for StoreMachine {
    type Command = StoreCommand;

    fn initial_state(&self) -> BTreeMap<u8, i32> {
        BTreeMap::new()
    }

    fn command_generators(&self) -> Vec<Gen<StoreCommand>> {
        let keys = || choose(0u8, 3);
        vec![
            keys()
                .bind(|key| choose(0i32, 100).map(move |value| StoreCommand::Put(key, value))),
            keys().map(StoreCommand::Get),
            keys().map(StoreCommand::Remove),
        ]
    }
}

fn store(lossy: bool) -> impl Fn() -> LossyStore {
    move || LossyStore {
        entries: BTreeMap::new(),
        lossy,
    }
}

#[test]
fn test_faithful_store_passes() {
    let property = execute_commands(StoreMachine, store(false));
    let result = Runner::new(TestConfig::new(8, 200, 25).unwrap())
        .run(&property)
        .unwrap();
    assert!(result.succeeded, "{}", result.summary());
}

#[test]
fn test_lossy_store_shrinks_to_put_then_read() {
    let property = execute_commands(StoreMachine, store(true));
    let result = Runner::new(TestConfig::new(8, 200, 25).unwrap())
        .run(&property)
        .unwrap();

    assert!(!result.succeeded);
    let smallest = result.smallest_failing_value.unwrap();
    let commands = smallest.commands();
    assert_eq!(commands.len(), 2, "unexpected counterexample: {smallest:?}");

    match (&commands[0], &commands[1]) {
        (StoreCommand::Put(put_key, 50), StoreCommand::Get(read_key))
        | (StoreCommand::Put(put_key, 50), StoreCommand::Remove(read_key)) => {
            assert_eq!(put_key, read_key)
        }
        other => panic!("unexpected counterexample: {other:?}"),
    }
}

#[test]
fn test_generated_reads_only_touch_written_keys() {
    use reynard::{Generator, RandomSource};

    let generator = commands(StoreMachine);
    for seed in 0..30 {
        let sequence = generator
            .generate(15, RandomSource::from_seed(seed))
            .unwrap()
            .into_value();
        for (command, state) in sequence.steps() {
            if let StoreCommand::Get(key) | StoreCommand::Remove(key) = command {
                assert!(state.contains_key(key));
            }
        }
    }
}
