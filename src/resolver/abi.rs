//! Minimal ABI encoding for the resolver's fixed set of read calls.
//!
//! Only what those ten signatures need: static address/uint words plus
//! dynamic `address[]`/`uint256[]` arguments with the standard head/tail
//! offset layout, and single-word or `uint256[]` return data.

use ethereum_types::{H160, U256};
use keccak_hash::keccak;

use super::TransportError;

const WORD: usize = 32;

/// One ABI argument.
pub(crate) enum Token {
    Address(H160),
    Uint(U256),
    AddressArray(Vec<H160>),
    UintArray(Vec<U256>),
}

impl Token {
    fn is_dynamic(&self) -> bool {
        matches!(self, Token::AddressArray(_) | Token::UintArray(_))
    }
}

fn word_of_uint(value: U256) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    value.to_big_endian(&mut word);
    word
}

fn word_of_address(address: H160) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    word[12..].copy_from_slice(address.as_bytes());
    word
}

fn tail_of_array(words: Vec<[u8; WORD]>) -> Vec<u8> {
    let mut tail = Vec::with_capacity((words.len() + 1) * WORD);
    tail.extend_from_slice(&word_of_uint(U256::from(words.len())));
    for word in words {
        tail.extend_from_slice(&word);
    }
    tail
}

/// The 4-byte selector of a canonical signature.
pub(crate) fn selector(signature: &str) -> [u8; 4] {
    let hash = keccak(signature.as_bytes());
    let mut out = [0u8; 4];
    out.copy_from_slice(&hash.as_bytes()[..4]);
    out
}

/// Encodes `signature(tokens...)` as `eth_call` calldata.
pub(crate) fn encode_call(signature: &str, tokens: &[Token]) -> Vec<u8> {
    let head_len = tokens.len() * WORD;
    let mut head: Vec<u8> = Vec::with_capacity(4 + head_len);
    let mut tail: Vec<u8> = Vec::new();
    head.extend_from_slice(&selector(signature));
    for token in tokens {
        if token.is_dynamic() {
            head.extend_from_slice(&word_of_uint(U256::from(head_len + tail.len())));
        }
        match token {
            Token::Address(address) => head.extend_from_slice(&word_of_address(*address)),
            Token::Uint(value) => head.extend_from_slice(&word_of_uint(*value)),
            Token::AddressArray(addresses) => tail.extend_from_slice(&tail_of_array(
                addresses.iter().map(|a| word_of_address(*a)).collect(),
            )),
            Token::UintArray(values) => tail.extend_from_slice(&tail_of_array(
                values.iter().map(|v| word_of_uint(*v)).collect(),
            )),
        }
    }
    head.extend_from_slice(&tail);
    head
}

/// Decodes a single-word `uint256` return.
pub(crate) fn decode_uint(data: &[u8]) -> Result<U256, TransportError> {
    if data.len() < WORD {
        return Err(TransportError(format!(
            "expected a 32-byte return word, got {} byte(s)",
            data.len()
        )));
    }
    Ok(U256::from_big_endian(&data[..WORD]))
}

/// Decodes a single-word `address` return.
pub(crate) fn decode_address(data: &[u8]) -> Result<H160, TransportError> {
    let word = decode_uint(data)?;
    let mut bytes = [0u8; WORD];
    word.to_big_endian(&mut bytes);
    Ok(H160::from_slice(&bytes[12..]))
}

/// Decodes a `uint256[]` return (offset word, length word, items).
pub(crate) fn decode_uint_array(data: &[u8]) -> Result<Vec<U256>, TransportError> {
    let bounded = |word: U256, what: &str| -> Result<usize, TransportError> {
        if word > U256::from(data.len()) {
            return Err(TransportError(format!("{what} past end of return data")));
        }
        Ok(word.low_u64() as usize)
    };
    let offset = bounded(decode_uint(data)?, "array offset")?;
    let length_word = data
        .get(offset..offset + WORD)
        .ok_or_else(|| TransportError("array offset past end of return data".into()))?;
    let length = bounded(U256::from_big_endian(length_word), "array length")?;
    let items = data
        .get(offset + WORD..offset + WORD + length * WORD)
        .ok_or_else(|| TransportError("array length past end of return data".into()))?;
    Ok(items
        .chunks_exact(WORD)
        .map(U256::from_big_endian)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selectors_match_the_canonical_values() {
        // Cross-checked against the deployed interfaces.
        assert_eq!(selector("balanceOf(address)"), [0x70, 0xa0, 0x82, 0x31]);
        assert_eq!(selector("totalSupply()"), [0x18, 0x16, 0x0d, 0xdd]);
        assert_eq!(selector("ownerOf(uint256)"), [0x63, 0x52, 0x21, 0x1e]);
        assert_eq!(
            selector("balanceOf(address,uint256)"),
            [0x00, 0xfd, 0xd5, 0x8e]
        );
        assert_eq!(
            selector("balanceOfBatch(address[],uint256[])"),
            [0x4e, 0x12, 0x73, 0xf4]
        );
        assert_eq!(
            selector("balanceOfAt(address,uint256)"),
            [0x4e, 0xe2, 0xcd, 0x7e]
        );
        assert_eq!(selector("totalSupplyAt(uint256)"), [0x98, 0x1b, 0x24, 0xd0]);
    }

    #[test]
    fn static_call_layout() {
        let account = H160::repeat_byte(0x11);
        let data = encode_call("balanceOf(address)", &[Token::Address(account)]);
        assert_eq!(data.len(), 4 + 32);
        assert_eq!(&data[..4], &[0x70, 0xa0, 0x82, 0x31]);
        assert_eq!(&data[16..36], account.as_bytes());
    }

    #[test]
    fn dynamic_call_layout() {
        let data = encode_call(
            "balanceOfBatch(address[],uint256[])",
            &[
                Token::AddressArray(vec![H160::repeat_byte(1), H160::repeat_byte(2)]),
                Token::UintArray(vec![U256::from(7)]),
            ],
        );
        let body = &data[4..];
        // Head: two offsets. Address tail starts after the 2-word head.
        assert_eq!(U256::from_big_endian(&body[..32]), U256::from(64));
        // Uint tail starts after the 3-word address tail.
        assert_eq!(U256::from_big_endian(&body[32..64]), U256::from(64 + 96));
        // Address tail: length 2.
        assert_eq!(U256::from_big_endian(&body[64..96]), U256::from(2));
        // Uint tail: length 1, then the value.
        assert_eq!(U256::from_big_endian(&body[160..192]), U256::from(1));
        assert_eq!(U256::from_big_endian(&body[192..224]), U256::from(7));
    }

    #[test]
    fn uint_array_round_trip() {
        let mut data = Vec::new();
        let mut word = [0u8; 32];
        U256::from(32).to_big_endian(&mut word);
        data.extend_from_slice(&word);
        U256::from(2).to_big_endian(&mut word);
        data.extend_from_slice(&word);
        U256::from(5).to_big_endian(&mut word);
        data.extend_from_slice(&word);
        U256::from(6).to_big_endian(&mut word);
        data.extend_from_slice(&word);
        assert_eq!(
            decode_uint_array(&data).unwrap(),
            vec![U256::from(5), U256::from(6)]
        );
    }
}
