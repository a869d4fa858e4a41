#![allow(dead_code)]

use ethereum_types::{H160, U256};
use rainvm::{assemble, resolver::SimLedger, Interpreter, Opcode, Script};

pub fn u(n: u64) -> U256 {
    U256::from(n)
}

pub fn addr(byte: u8) -> H160 {
    H160::repeat_byte(byte)
}

/// Single-source script from `(opcode, operand)` pairs.
pub fn script(pairs: &[(Opcode, u8)], constants: Vec<U256>) -> Script {
    Script::new(vec![assemble(pairs)], constants)
}

/// Interpreter over an empty simulation ledger, enough for every opcode that
/// never touches the resolver.
pub fn sim_vm() -> Interpreter {
    Interpreter::new(Box::new(SimLedger::new()))
}

/// Packs eight 32-bit lanes (least significant first, i.e. tier 1 first)
/// into a report word.
pub fn report_from_lanes(lanes: [u32; 8]) -> U256 {
    lanes
        .iter()
        .enumerate()
        .fold(U256::zero(), |report, (index, lane)| {
            report | (U256::from(*lane) << (index * 32))
        })
}
