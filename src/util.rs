use ethereum_types::{H160, U256};
use tracing_forest::ForestLayer;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter};

/// Initializes the global tracing subscriber.
///
/// The default `Level` is `INFO`. It can be overridden with `RUST_LOG`.
pub fn init_logger() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(ForestLayer::default())
        .init();
}

/// Truncates a stack word to its low 160 bits, the address convention shared
/// with the on-chain VM.
pub(crate) fn u256_to_h160(value: U256) -> H160 {
    let mut bytes = [0u8; 32];
    value.to_big_endian(&mut bytes);
    H160::from_slice(&bytes[12..])
}

/// Widens an address back to a stack word.
pub(crate) fn h160_to_u256(address: H160) -> U256 {
    U256::from_big_endian(address.as_bytes())
}
