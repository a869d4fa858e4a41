//! Off-chain, bit-exact reference interpreter for Rain scripts.
//!
//! Reproduces the on-chain VM opcode for opcode: the same stack effects,
//! 256-bit overflow behavior and bit-packed encodings, so callers can preview
//! a script's outcome before submitting a transaction. External state reads
//! go through a pluggable [`resolver::Resolver`]; the bundled
//! [`resolver::SimLedger`] answers them from an in-memory mock store, making
//! simulated runs fully deterministic and network-free.
//!
//! ```
//! use ethereum_types::U256;
//! use rainvm::{assemble, resolver::SimLedger, Interpreter, Opcode, Script};
//!
//! let script = Script::new(
//!     vec![assemble(&[
//!         (Opcode::Constant, 0),
//!         (Opcode::Constant, 1),
//!         (Opcode::Constant, 2),
//!         (Opcode::Add, 3),
//!     ])],
//!     vec![U256::from(1), U256::from(2), U256::from(3)],
//! );
//! let vm = Interpreter::new(Box::new(SimLedger::new()));
//! assert_eq!(vm.run(&script).unwrap(), vec![U256::from(6)]);
//! ```

mod error;
mod execution;
pub mod math;
mod opcodes;
mod ops;
pub mod registry;
pub mod resolver;
mod script;
mod state;
pub mod tier;
mod util;

pub use error::InterpreterError;
pub use execution::{EvalContext, Interpreter, InterpreterConfig, OpcodeFn, RunData};
pub use opcodes::Opcode;
pub use script::{assemble, Script};
pub use state::{ExecutionState, Operands};
pub use util::init_logger;
