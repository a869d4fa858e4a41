mod common;

use std::cell::RefCell;

use ahash::AHashMap;
use common::{addr, script, u};
use ethereum_types::{H160, U256};
use rainvm::{
    resolver::{
        CallTransport, Erc20Snapshot, Erc20View, RpcResolver, SimAsset, SimErc1155, SimErc20,
        SimErc721, SimLedger, TransportError,
    },
    Interpreter, InterpreterError, Opcode, RunData,
};

fn h160_word(byte: u8) -> U256 {
    U256::from_big_endian(addr(byte).as_bytes())
}

fn seeded_ledger() -> SimLedger {
    let mut ledger = SimLedger::new();
    ledger.add_assets([
        (
            addr(0x20),
            SimAsset::Erc20(SimErc20 {
                total_supply: u(1_000),
                decimals: 18,
                balances: AHashMap::from_iter([(addr(0xaa), u(250))]),
                view: Erc20View::Snapshot {
                    snapshots: AHashMap::from_iter([(
                        u(1),
                        Erc20Snapshot {
                            total_supply: u(900),
                            balances: AHashMap::from_iter([(addr(0xaa), u(150))]),
                        },
                    )]),
                },
            }),
        ),
        (
            addr(0x21),
            SimAsset::Erc721(SimErc721 {
                owners: AHashMap::from_iter([(u(7), addr(0xaa)), (u(8), addr(0xbb))]),
            }),
        ),
        (
            addr(0x22),
            SimAsset::Erc1155(SimErc1155 {
                balances: AHashMap::from_iter([
                    (u(1), AHashMap::from_iter([(addr(0xaa), u(5))])),
                    (u(2), AHashMap::from_iter([(addr(0xbb), u(9))])),
                ]),
            }),
        ),
    ]);
    ledger.set_block_number(1234);
    ledger.set_timestamp(99_000);
    ledger.set_sender(addr(0xaa));
    ledger.set_this_address(addr(0xfe));
    ledger
}

fn sim_vm() -> Interpreter {
    Interpreter::new(Box::new(seeded_ledger()))
}

#[test]
fn erc20_reads_through_a_script() {
    let s = script(
        &[
            (Opcode::Constant, 0),
            (Opcode::Constant, 1),
            (Opcode::Ierc20BalanceOf, 0),
            (Opcode::Constant, 0),
            (Opcode::Ierc20TotalSupply, 0),
        ],
        vec![h160_word(0x20), h160_word(0xaa)],
    );
    assert_eq!(sim_vm().run(&s).unwrap(), vec![u(250), u(1_000)]);
}

#[test]
fn erc20_snapshot_reads_are_by_id() {
    let s = script(
        &[
            (Opcode::Constant, 0),
            (Opcode::Constant, 1),
            (Opcode::Constant, 2),
            (Opcode::Ierc20SnapshotBalanceOfAt, 0),
            (Opcode::Constant, 0),
            (Opcode::Constant, 2),
            (Opcode::Ierc20SnapshotTotalSupplyAt, 0),
        ],
        vec![h160_word(0x20), h160_word(0xaa), u(1)],
    );
    assert_eq!(sim_vm().run(&s).unwrap(), vec![u(150), u(900)]);
}

#[test]
fn erc721_reads_through_a_script() {
    let s = script(
        &[
            (Opcode::Constant, 0),
            (Opcode::Constant, 1),
            (Opcode::Ierc721BalanceOf, 0),
            (Opcode::Constant, 0),
            (Opcode::Constant, 2),
            (Opcode::Ierc721OwnerOf, 0),
        ],
        vec![h160_word(0x21), h160_word(0xaa), u(8)],
    );
    assert_eq!(sim_vm().run(&s).unwrap(), vec![u(1), h160_word(0xbb)]);
}

#[test]
fn erc1155_single_and_batch_reads() {
    let single = script(
        &[
            (Opcode::Constant, 0),
            (Opcode::Constant, 1),
            (Opcode::Constant, 3),
            (Opcode::Ierc1155BalanceOf, 0),
        ],
        vec![h160_word(0x22), h160_word(0xaa), h160_word(0xbb), u(1)],
    );
    assert_eq!(sim_vm().run(&single).unwrap(), vec![u(5)]);

    // Token, two accounts, two ids; two balances pushed in order.
    let batch = script(
        &[
            (Opcode::Constant, 0),
            (Opcode::Constant, 1),
            (Opcode::Constant, 2),
            (Opcode::Constant, 3),
            (Opcode::Constant, 4),
            (Opcode::Ierc1155BalanceOfBatch, 2),
        ],
        vec![
            h160_word(0x22),
            h160_word(0xaa),
            h160_word(0xbb),
            u(1),
            u(2),
        ],
    );
    assert_eq!(sim_vm().run(&batch).unwrap(), vec![u(5), u(9)]);
}

#[test]
fn evm_context_comes_from_the_ledger() {
    let s = script(
        &[
            (Opcode::BlockNumber, 0),
            (Opcode::BlockTimestamp, 0),
            (Opcode::Sender, 0),
            (Opcode::ThisAddress, 0),
        ],
        vec![],
    );
    assert_eq!(
        sim_vm().run(&s).unwrap(),
        vec![u(1234), u(99_000), h160_word(0xaa), h160_word(0xfe)]
    );
}

#[test]
fn run_data_pins_block_values_over_the_resolver() {
    let s = script(&[(Opcode::BlockNumber, 0), (Opcode::BlockTimestamp, 0)], vec![]);
    let data = RunData {
        block_number: Some(42),
        timestamp: Some(7_777),
        ..Default::default()
    };
    // Exactly one push per opcode even with both sources available.
    assert_eq!(
        sim_vm().run_with(&s, &data, 0).unwrap(),
        vec![u(42), u(7_777)]
    );
}

#[test]
fn missing_record_aborts_the_run() {
    let s = script(
        &[(Opcode::Constant, 0), (Opcode::Ierc20TotalSupply, 0)],
        vec![h160_word(0x77)],
    );
    assert_eq!(
        sim_vm().run(&s),
        Err(InterpreterError::ResolverNotFound(addr(0x77)))
    );
}

/// Transport that records every call and answers from a canned table keyed
/// by selector.
#[derive(Default)]
struct MockTransport {
    calls: RefCell<Vec<(H160, Vec<u8>)>>,
    responses: AHashMap<[u8; 4], Vec<u8>>,
}

impl MockTransport {
    fn respond(&mut self, selector: [u8; 4], words: &[U256]) {
        let mut data = Vec::with_capacity(words.len() * 32);
        for value in words {
            let mut word = [0u8; 32];
            value.to_big_endian(&mut word);
            data.extend_from_slice(&word);
        }
        self.responses.insert(selector, data);
    }
}

impl CallTransport for MockTransport {
    fn call(&self, to: H160, data: &[u8]) -> Result<Vec<u8>, TransportError> {
        self.calls.borrow_mut().push((to, data.to_vec()));
        let mut selector = [0u8; 4];
        selector.copy_from_slice(&data[..4]);
        self.responses
            .get(&selector)
            .cloned()
            .ok_or_else(|| TransportError(format!("no canned response for {selector:02x?}")))
    }

    fn block_number(&self) -> Result<u64, TransportError> {
        Ok(500)
    }

    fn block_timestamp(&self) -> Result<u64, TransportError> {
        Ok(1_700_000_000)
    }

    fn sender(&self) -> Result<H160, TransportError> {
        Ok(H160::repeat_byte(0xaa))
    }
}

const BALANCE_OF: [u8; 4] = [0x70, 0xa0, 0x82, 0x31];

#[test]
fn live_resolver_encodes_an_eth_call() {
    let mut transport = MockTransport::default();
    transport.respond(BALANCE_OF, &[u(250)]);
    let vm = Interpreter::new(Box::new(RpcResolver::new(transport, addr(0xfe))));

    let s = script(
        &[
            (Opcode::Constant, 0),
            (Opcode::Constant, 1),
            (Opcode::Ierc20BalanceOf, 0),
        ],
        vec![h160_word(0x20), h160_word(0xaa)],
    );
    assert_eq!(vm.run(&s).unwrap(), vec![u(250)]);
}

#[test]
fn live_resolver_calldata_layout_is_canonical() {
    use rainvm::resolver::Resolver;

    let mut transport = MockTransport::default();
    transport.respond(BALANCE_OF, &[u(1)]);
    let resolver = RpcResolver::new(transport, addr(0xfe));

    resolver.erc20_balance_of(addr(0x20), addr(0xaa)).unwrap();

    // Exactly one call: `balanceOf(address)` with the account
    // right-aligned in a single word.
    let calls = resolver.transport().calls.borrow();
    assert_eq!(calls.len(), 1);
    let (to, data) = &calls[0];
    assert_eq!(*to, addr(0x20));
    assert_eq!(data.len(), 36);
    assert_eq!(&data[..4], &BALANCE_OF);
    assert_eq!(&data[16..36], addr(0xaa).as_bytes());
}

#[test]
fn live_batch_read_rejects_mismatched_lengths_without_calling() {
    use rainvm::resolver::Resolver;

    let resolver = RpcResolver::new(MockTransport::default(), addr(0xfe));
    assert_eq!(
        resolver.erc1155_balance_of_batch(addr(0x22), &[addr(0xaa)], &[u(1), u(2)]),
        Err(InterpreterError::BatchLengthMismatch { accounts: 1, ids: 2 })
    );
    assert!(resolver.transport().calls.borrow().is_empty());
}

#[test]
fn transport_failure_propagates_as_a_typed_error() {
    let transport = MockTransport::default(); // no canned responses
    let vm = Interpreter::new(Box::new(RpcResolver::new(transport, addr(0xfe))));
    let s = script(
        &[
            (Opcode::Constant, 0),
            (Opcode::Constant, 1),
            (Opcode::Ierc20BalanceOf, 0),
        ],
        vec![h160_word(0x20), h160_word(0xaa)],
    );
    assert!(matches!(
        vm.run(&s),
        Err(InterpreterError::Transport(_))
    ));
}

#[test]
fn live_evm_context_reads_the_transport() {
    let vm = Interpreter::new(Box::new(RpcResolver::new(
        MockTransport::default(),
        addr(0xfe),
    )));
    let s = script(
        &[
            (Opcode::BlockNumber, 0),
            (Opcode::BlockTimestamp, 0),
            (Opcode::Sender, 0),
            (Opcode::ThisAddress, 0),
        ],
        vec![],
    );
    assert_eq!(
        vm.run(&s).unwrap(),
        vec![u(500), u(1_700_000_000), h160_word(0xaa), h160_word(0xfe)]
    );
}
