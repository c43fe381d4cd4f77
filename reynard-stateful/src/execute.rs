//! Replaying command sequences against a real subject.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use reynard::property::panic_message;
use reynard::{Property, PropertyStatus, TrialResult};
use tracing::debug;

use crate::command::{Command, StateMachine};
use crate::sequence::{CommandSequence, commands};

/// Outcome of running one command against the subject
#[derive(Debug, Clone)]
pub struct ExecutedCommand<C: Command> {
    pub command: C,
    /// Model state the command ran in
    pub state_before: C::State,
    /// Output of `run`, or the panic message if it panicked
    pub output: Result<C::Output, String>,
    pub postcondition_held: bool,
    /// Panic message if the postcondition itself panicked
    pub postcondition_panic: Option<String>,
}

impl<C: Command> ExecutedCommand<C> {
    pub fn succeeded(&self) -> bool {
        self.output.is_ok() && self.postcondition_held
    }

    fn failure_reason(&self) -> String {
        match (&self.output, &self.postcondition_panic) {
            (Ok(_), Some(message)) => format!(
                "postcondition for {} panicked: {}",
                self.command.description(),
                message
            ),
            (Ok(output), None) => format!(
                "postcondition failed for {} (state: {:?}, output: {:?})",
                self.command.description(),
                self.state_before,
                output
            ),
            (Err(message), _) => format!("{} panicked: {}", self.command.description(), message),
        }
    }
}

/// A replayed sequence: the commands generated and what happened when
/// each one ran. Execution stops at the first failing command, so
/// `executed` may be shorter than the sequence.
#[derive(Clone)]
pub struct ExecutionTrace<C: Command> {
    pub sequence: CommandSequence<C>,
    pub executed: Vec<ExecutedCommand<C>>,
}

impl<C: Command> ExecutionTrace<C> {
    pub fn succeeded(&self) -> bool {
        executed_successfully(&self.executed)
    }

    /// The command that failed, if any
    pub fn failure(&self) -> Option<&ExecutedCommand<C>> {
        self.executed.iter().find(|executed| !executed.succeeded())
    }

    pub fn commands(&self) -> &[C] {
        self.sequence.commands()
    }
}

impl<C: Command> fmt::Debug for ExecutionTrace<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        for executed in &self.executed {
            match (&executed.output, &executed.postcondition_panic) {
                (Ok(output), _) if executed.postcondition_held => {
                    list.entry(&format_args!("{:?} => {:?}", executed.command, output))
                }
                (Ok(output), Some(message)) => list.entry(&format_args!(
                    "{:?} => {:?} (postcondition panicked: {})",
                    executed.command, output, message
                )),
                (Ok(output), None) => list.entry(&format_args!(
                    "{:?} => {:?} (postcondition failed)",
                    executed.command, output
                )),
                (Err(message), _) => {
                    list.entry(&format_args!("{:?} => panicked: {}", executed.command, message))
                }
            };
        }
        list.finish()
    }
}

/// True when every command ran without panicking and met its postcondition
pub fn executed_successfully<C: Command>(executed: &[ExecutedCommand<C>]) -> bool {
    executed.iter().all(ExecutedCommand::succeeded)
}

/// Run `sequence` against `subject`, stopping at the first failure
pub fn replay<C: Command>(sequence: CommandSequence<C>, subject: &mut C::Subject) -> ExecutionTrace<C> {
    let mut executed = Vec::with_capacity(sequence.len());

    for (index, (command, state_before)) in sequence.steps().enumerate() {
        let output = panic::catch_unwind(AssertUnwindSafe(|| command.run(subject)))
            .map_err(|payload| panic_message(&*payload));
        let (postcondition_held, postcondition_panic) = match &output {
            Ok(output) => match panic::catch_unwind(AssertUnwindSafe(|| {
                command.postcondition(state_before, output)
            })) {
                Ok(held) => (held, None),
                Err(payload) => (false, Some(panic_message(&*payload))),
            },
            Err(_) => (false, None),
        };

        executed.push(ExecutedCommand {
            command: command.clone(),
            state_before: state_before.clone(),
            output,
            postcondition_held,
            postcondition_panic,
        });

        if !postcondition_held {
            debug!(step = index, command = ?command, "command failed");
            break;
        }
    }

    ExecutionTrace { sequence, executed }
}

/// Property that every generated command sequence of `machine` runs
/// successfully against a fresh subject built by `subject_factory`.
///
/// Shrinking replays each candidate sequence against its own fresh subject.
pub fn execute_commands<M, F>(machine: M, subject_factory: F) -> Property<ExecutionTrace<M::Command>>
where
    M: StateMachine,
    F: Fn() -> <M::Command as Command>::Subject + 'static,
{
    commands(machine).map(move |sequence| {
        let mut subject = subject_factory();
        let trace = replay(sequence, &mut subject);
        let status = match trace.failure() {
            None => PropertyStatus::Success,
            Some(failed) => PropertyStatus::Failure(failed.failure_reason()),
        };
        TrialResult {
            value: trace,
            status,
        }
    })
}
