//! ARM v7-A 32-bit instruction decoder (C3).
//!
//! Classifies a 4-byte little-endian ARM word into one of the memory-access
//! categories the simulator drives the cache hierarchy from, following the
//! top-level discriminator of ARM ARM Table A5-1 (`op1 = bits[27:25]`,
//! `op = bit[4]`).

mod block;
mod cache_control;
mod coproc;
mod extra;
mod fields;
mod regular;
mod sync;
pub mod types;

use fields::{bit, bits, op1_class};
use types::DecodedInstruction;

pub use cache_control::{classify as classify_cache_maintenance, CacheMaintenanceOp};
pub use types::{
    BlockForm, BlockLoadStore, Coprocessor, CoprocForm, Direction, ExtraForm, ExtraLoadStore,
    RegularForm, RegularLoadStore, SyncForm, Synchronization,
};

/// Decodes a single 4-byte ARM instruction word.
///
/// `bytes` must be exactly 4 bytes, little-endian, as fetched from the
/// simulated `.text` range. Returns [`DecodeError::SizeMismatch`] otherwise.
pub fn decode_instruction(bytes: &[u8]) -> Result<DecodedInstruction, crate::error::DecodeError> {
    if bytes.len() != 4 {
        return Err(crate::error::DecodeError::SizeMismatch(bytes.len()));
    }
    let word = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    Ok(decode_word(word))
}

fn decode_word(word: u32) -> DecodedInstruction {
    let op1 = op1_class(word);
    let op = bit(word, 4);
    let bit7 = bit(word, 7);

    match op1 {
        0b000 | 0b001 => {
            if bit7 == 1 && op == 1 {
                let op2 = bits(word, 6, 5);
                if op2 == 0 {
                    DecodedInstruction::Synchronization(sync::decode(word))
                } else {
                    DecodedInstruction::Extra(extra::decode(word))
                }
            } else {
                DecodedInstruction::NotMemoryOp
            }
        }
        0b010 => DecodedInstruction::Regular(regular::decode(word)),
        0b011 => {
            if op == 0 {
                DecodedInstruction::Regular(regular::decode(word))
            } else {
                DecodedInstruction::NotMemoryOp
            }
        }
        0b100 => DecodedInstruction::Block(block::decode(word)),
        0b101 => DecodedInstruction::NotMemoryOp,
        0b110 => DecodedInstruction::Coprocessor(coproc::decode(word)),
        0b111 => {
            let bit24 = bit(word, 24);
            if bit24 == 1 {
                DecodedInstruction::NotMemoryOp
            } else if op == 1 {
                DecodedInstruction::Coprocessor(coproc::decode(word))
            } else {
                DecodedInstruction::NotMemoryOp
            }
        }
        _ => unreachable!("op1_class is a 3-bit field"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_word_length() {
        let err = decode_instruction(&[0, 1, 2]).unwrap_err();
        assert_eq!(err, crate::error::DecodeError::SizeMismatch(3));
    }

    #[test]
    fn decodes_pop_scenario() {
        let bytes = 0xE8BD_000Fu32.to_le_bytes();
        let decoded = decode_instruction(&bytes).unwrap();
        match decoded {
            DecodedInstruction::Block(b) => {
                assert_eq!(b.form, BlockForm::PopMult);
                assert_eq!(b.rn, 0xD);
                assert_eq!(b.register_list, 0x000F);
            }
            other => panic!("expected block form, got {other:?}"),
        }
    }

    #[test]
    fn decodes_ldr_scenario() {
        let word = 0b1110_01_0_1_1_0_0_1_0001_0000_000000000000u32;
        let decoded = decode_instruction(&word.to_le_bytes()).unwrap();
        assert!(decoded.is_memory_op());
        assert_eq!(decoded.direction(), Some(Direction::Load));
    }

    #[test]
    fn branch_is_not_a_memory_op() {
        // B #0: cond=AL, op1=101
        let word = 0b1110_101_0_0000_0000_0000_0000_0000_0000u32;
        let decoded = decode_instruction(&word.to_le_bytes()).unwrap();
        assert!(!decoded.is_memory_op());
    }
}
