//! Coprocessor load/store and register-transfer decoding (ARM ARM A5-22).

use super::fields::{bit, bits, cond, rn, rt};
use super::types::{Coprocessor, CoprocForm, Direction};

pub(super) fn decode(word: u32) -> Coprocessor {
    let op1 = bits(word, 25, 20);
    let coproc = bits(word, 11, 8) as u8;
    let rn_val = rn(word);
    let is_transfer = bit(word, 25) != 0 && bit(word, 4) != 0;

    if is_transfer {
        let load = bit(word, 20) != 0;
        let form = if load {
            CoprocForm::MoveFromCoproc
        } else {
            CoprocForm::MoveToCoproc
        };
        Coprocessor {
            cond: cond(word),
            coproc,
            opc1: bits(word, 23, 21) as u8,
            crn: rn_val,
            crm: bits(word, 3, 0) as u8,
            opc2: bits(word, 7, 5) as u8,
            rt: rt(word),
            form,
            direction: if load { Direction::Load } else { Direction::Store },
        }
    } else {
        let load = bit(word, 20) != 0;
        let literal = rn_val == 0xF;
        let form = match (load, literal) {
            (false, _) => CoprocForm::Store,
            (true, true) => CoprocForm::LoadLiteral,
            (true, false) => CoprocForm::LoadImmediate,
        };
        Coprocessor {
            cond: cond(word),
            coproc,
            opc1: (op1 >> 2) as u8 & 0x0F,
            crn: rn_val,
            crm: 0,
            opc2: 0,
            rt: rt(word),
            form,
            direction: if load { Direction::Load } else { Direction::Store },
        }
    }
}
