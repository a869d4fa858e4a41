mod context;
mod interpreter;

pub use context::EvalContext;
pub use interpreter::{Interpreter, InterpreterConfig, OpcodeFn, RunData};
