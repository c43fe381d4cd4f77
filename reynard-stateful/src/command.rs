//! Commands and the state machines that generate them.

use std::fmt::Debug;

use reynard::Gen;

/// One step of a protocol, checked against a model.
///
/// The model state is a pure value: `next_state` returns the state after the
/// command without touching the system under test. `run` is the only method
/// that talks to the real subject.
pub trait Command: Clone + Debug + 'static {
    /// Model of the system under test
    type State: Clone + Debug + 'static;

    /// The real system under test
    type Subject;

    /// What `run` observes from the subject
    type Output: Clone + Debug + 'static;

    /// Whether this command may run in `state`
    fn precondition(&self, _state: &Self::State) -> bool {
        true
    }

    /// Model state after this command
    fn next_state(&self, state: &Self::State) -> Self::State;

    /// Apply the command to the subject
    fn run(&self, subject: &mut Self::Subject) -> Self::Output;

    /// Whether `output` is acceptable given the state before the command
    fn postcondition(&self, _state_before: &Self::State, _output: &Self::Output) -> bool {
        true
    }

    /// Human-readable description
    fn description(&self) -> String {
        format!("{:?}", self)
    }
}

/// Model state at the start, plus generators for every kind of command
pub trait StateMachine: 'static {
    type Command: Command;

    fn initial_state(&self) -> <Self::Command as Command>::State;

    /// One generator per command kind. Each draw proposes one candidate per
    /// generator and picks among those whose precondition holds.
    fn command_generators(&self) -> Vec<Gen<Self::Command>>;
}

/// Model states visited by `commands` starting from `initial`, or `None` as
/// soon as a precondition does not hold
pub fn trajectory<C: Command>(initial: &C::State, commands: &[C]) -> Option<Vec<C::State>> {
    let mut states = Vec::with_capacity(commands.len() + 1);
    states.push(initial.clone());
    for command in commands {
        let current = states.last()?;
        if !command.precondition(current) {
            return None;
        }
        let next = command.next_state(current);
        states.push(next);
    }
    Some(states)
}
