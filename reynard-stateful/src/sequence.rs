//! Generation and shrinking of valid command sequences.

use std::fmt;
use std::rc::Rc;

use reynard::{Gen, Generator, RoseTree};
use tracing::trace;

use crate::command::{Command, StateMachine, trajectory};

/// Commands together with the model states they pass through.
///
/// `states[i]` is the state before `commands[i]`, and the last state is the
/// state after the final command, so there is always one more state than
/// commands. Every command's precondition holds in the state before it.
#[derive(Clone)]
pub struct CommandSequence<C: Command> {
    commands: Vec<C>,
    states: Vec<C::State>,
}

impl<C: Command> CommandSequence<C> {
    /// Validate `commands` from `initial`; `None` if a precondition fails
    pub fn new(initial: C::State, commands: Vec<C>) -> Option<Self> {
        let states = trajectory(&initial, &commands)?;
        Some(Self { commands, states })
    }

    pub fn commands(&self) -> &[C] {
        &self.commands
    }

    pub fn states(&self) -> &[C::State] {
        &self.states
    }

    pub fn initial_state(&self) -> &C::State {
        &self.states[0]
    }

    pub fn final_state(&self) -> &C::State {
        &self.states[self.states.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Pairs of each command with the state it runs in
    pub fn steps(&self) -> impl Iterator<Item = (&C, &C::State)> {
        self.commands.iter().zip(&self.states)
    }
}

impl<C: Command> fmt::Debug for CommandSequence<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.commands).finish()
    }
}

/// Sequences of commands valid for `machine`.
///
/// Length is drawn from `[0, size]`. At each step one candidate is drawn
/// from every command generator and one of those whose precondition holds
/// is picked; generation stops early when none does. Shrinking removes
/// commands (contiguous runs first) and shrinks each command's arguments;
/// candidates that break a precondition further along are dropped.
pub fn commands<M: StateMachine>(machine: M) -> Gen<CommandSequence<M::Command>> {
    let machine = Rc::new(machine);

    Gen::new(move |size, source| {
        let generators = machine.command_generators();
        let initial = machine.initial_state();

        let (mut pick, mut rest) = source.split();
        let target_len = pick.next_in_range(0, size);

        let mut state = initial.clone();
        let mut trees: Vec<RoseTree<M::Command>> = Vec::with_capacity(target_len);
        for _ in 0..target_len {
            let (step, remaining) = rest.split();
            rest = remaining;
            let (mut chooser, candidates) = step.split();

            let mut applicable = Vec::with_capacity(generators.len());
            for (generator, slot) in generators.iter().zip(candidates.split_n(generators.len())) {
                let tree = generator.generate(size, slot)?;
                if tree.value().precondition(&state) {
                    applicable.push(tree);
                }
            }
            if applicable.is_empty() {
                trace!(step = trees.len(), "no applicable command, stopping early");
                break;
            }

            let index = chooser.next_in_range(0, applicable.len() - 1);
            let chosen = applicable.swap_remove(index);
            state = chosen.value().next_state(&state);
            trees.push(chosen);
        }

        let validator = initial.clone();
        let tree = RoseTree::sequence(trees, 0)
            .filter(move |commands| trajectory(&validator, commands).is_some())
            .map(move |commands| {
                let states = replay_states(&initial, &commands);
                CommandSequence { commands, states }
            });
        Ok(tree)
    })
}

/// Trajectory of commands already known to satisfy their preconditions
fn replay_states<C: Command>(initial: &C::State, commands: &[C]) -> Vec<C::State> {
    let mut states = Vec::with_capacity(commands.len() + 1);
    let mut current = initial.clone();
    for command in commands {
        let next = command.next_state(&current);
        states.push(current);
        current = next;
    }
    states.push(current);
    states
}
