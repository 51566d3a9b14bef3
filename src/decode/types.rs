//! The decoded-instruction sum type shared by every category decoder.

/// Whether an access reads memory, writes memory, or (for the atomic swap)
/// does both in that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Load,
    Store,
    LoadStore,
}

/// One of the 14 regular load/store identifiers from A5-15.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegularForm {
    LdrImm,
    LdrReg,
    LdrLit,
    LdrbImm,
    LdrbReg,
    LdrbLit,
    LdrtImm,
    LdrtReg,
    LdrbtImm,
    LdrbtReg,
    StrImm,
    StrReg,
    StrbImm,
    StrbReg,
}

/// Operand payload shared by every regular (A5-15) load/store form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegularLoadStore {
    pub cond: u8,
    pub rn: u8,
    pub rt: u8,
    pub add: bool,
    pub index: bool,
    pub wback: bool,
    pub byte: bool,
    pub direction: Direction,
    pub form: RegularForm,
    /// Valid when the form is register-indexed.
    pub rm: u8,
    pub shift_type: u8,
    pub imm5: u8,
    /// Valid when the form is immediate-indexed or literal.
    pub imm12: u16,
}

/// Sub-category of the extra (halfword/dual/signed) load/store group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtraForm {
    Halfword,
    DualOrSignedByte,
    SignedHalfwordOrStoreDual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtraLoadStore {
    pub cond: u8,
    pub rn: u8,
    pub rt: u8,
    pub rt2: u8,
    pub add: bool,
    pub index: bool,
    pub wback: bool,
    pub unprivileged: bool,
    pub direction: Direction,
    pub form: ExtraForm,
    pub rm: u8,
    pub imm32: u32,
    pub register_indexed: bool,
}

/// Sub-category of a recognized synchronization primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncForm {
    SwapWord,
    SwapByte,
    ExclusiveLoadStore(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Synchronization {
    pub cond: u8,
    pub rn: u8,
    pub rt: u8,
    pub rt2: u8,
    pub direction: Direction,
    pub form: SyncForm,
}

/// A well-known block-transfer identifier, where applicable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockForm {
    Generic,
    PushMult,
    PopMult,
    LdmUserRegisters,
    LdmExceptionReturn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockLoadStore {
    pub cond: u8,
    pub rn: u8,
    pub direction: Direction,
    pub form: BlockForm,
    pub add: bool,
    pub index: bool,
    pub wback: bool,
    pub register_list: u16,
}

/// Coprocessor load/store or register-transfer identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoprocForm {
    Store,
    LoadImmediate,
    LoadLiteral,
    MoveToCoproc,
    MoveFromCoproc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coprocessor {
    pub cond: u8,
    pub coproc: u8,
    pub opc1: u8,
    pub crn: u8,
    pub crm: u8,
    pub opc2: u8,
    pub rt: u8,
    pub form: CoprocForm,
    pub direction: Direction,
}

/// Output of the top-level classifier: a sum type tagged by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodedInstruction {
    Regular(RegularLoadStore),
    Extra(ExtraLoadStore),
    Block(BlockLoadStore),
    Coprocessor(Coprocessor),
    Synchronization(Synchronization),
    /// Valid 4-byte ARM word that is not a memory access in this model
    /// (data-processing, branch, media, ...).
    NotMemoryOp,
}

impl DecodedInstruction {
    pub fn direction(&self) -> Option<Direction> {
        match self {
            DecodedInstruction::Regular(r) => Some(r.direction),
            DecodedInstruction::Extra(e) => Some(e.direction),
            DecodedInstruction::Block(b) => Some(b.direction),
            DecodedInstruction::Coprocessor(c) => Some(c.direction),
            DecodedInstruction::Synchronization(s) => Some(s.direction),
            DecodedInstruction::NotMemoryOp => None,
        }
    }

    pub fn is_memory_op(&self) -> bool {
        !matches!(self, DecodedInstruction::NotMemoryOp)
    }
}
