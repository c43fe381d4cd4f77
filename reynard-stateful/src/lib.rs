//! # Reynard Stateful
//!
//! Model-based testing for reynard: describe a system as commands over a
//! pure model state, generate valid command sequences, replay them against
//! the real system, and shrink failing sequences to a minimal protocol.
//!
//! ## Quick Example
//!
//! ```rust
//! use reynard::{AssertOptions, Gen, assert_property, returns};
//! use reynard_stateful::prelude::*;
//!
//! #[derive(Debug, Clone)]
//! enum StackOp {
//!     Push,
//!     Pop,
//! }
//!
//! impl Command for StackOp {
//!     type State = usize;
//!     type Subject = Vec<u8>;
//!     type Output = Option<u8>;
//!
//!     fn precondition(&self, depth: &usize) -> bool {
//!         !matches!(self, StackOp::Pop) || *depth > 0
//!     }
//!
//!     fn next_state(&self, depth: &usize) -> usize {
//!         match self {
//!             StackOp::Push => depth + 1,
//!             StackOp::Pop => depth - 1,
//!         }
//!     }
//!
//!     fn run(&self, stack: &mut Vec<u8>) -> Option<u8> {
//!         match self {
//!             StackOp::Push => {
//!                 stack.push(0);
//!                 None
//!             }
//!             StackOp::Pop => stack.pop(),
//!         }
//!     }
//!
//!     fn postcondition(&self, _depth: &usize, output: &Option<u8>) -> bool {
//!         matches!(self, StackOp::Push) || output.is_some()
//!     }
//! }
//!
//! struct Stack;
//!
//! impl StateMachine for Stack {
//!     type Command = StackOp;
//!
//!     fn initial_state(&self) -> usize {
//!         0
//!     }
//!
//!     fn command_generators(&self) -> Vec<Gen<StackOp>> {
//!         vec![returns(StackOp::Push), returns(StackOp::Pop)]
//!     }
//! }
//!
//! let property = execute_commands(Stack, Vec::new);
//! assert_property(&property, AssertOptions::new().number_of_tests(50));
//! ```

pub mod command;
pub mod execute;
pub mod sequence;

pub use command::{Command, StateMachine, trajectory};
pub use execute::{ExecutedCommand, ExecutionTrace, execute_commands, executed_successfully, replay};
pub use sequence::{CommandSequence, commands};

/// Re-exports for convenient imports
pub mod prelude {
    pub use crate::command::{Command, StateMachine};
    pub use crate::execute::{ExecutionTrace, execute_commands, executed_successfully};
    pub use crate::sequence::{CommandSequence, commands};
}
