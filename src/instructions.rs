use crate::{constants, enum_to_u16, Opcode, RegisterId, Word};

/// Constructs an instruction word from raw 4-bit field values.
///
/// `dest` holds branch condition flags for BRA and `left` holds memory
/// access flags for MEM; the caller is responsible for the meaning of
/// each nibble.
#[inline]
pub fn make_instruction(oc: Opcode, dest: u8, left: u8, right: u8) -> Word {
    ((enum_to_u16(oc) << constants::OPCODE_OFFSET) & constants::OPCODE_MASK)
        | ((Word::from(dest) << constants::DEST_OFFSET) & constants::DEST_MASK)
        | ((Word::from(left) << constants::LEFT_OFFSET) & constants::LEFT_MASK)
        | ((Word::from(right) << constants::RIGHT_OFFSET) & constants::RIGHT_MASK)
}

/// Constructs a three-register instruction word.
#[inline]
pub fn make_register_instruction(
    oc: Opcode,
    dest: RegisterId,
    left: RegisterId,
    right: RegisterId,
) -> Word {
    make_instruction(
        oc,
        enum_to_u16(dest) as u8,
        enum_to_u16(left) as u8,
        enum_to_u16(right) as u8,
    )
}

/// Constructs a three-register instruction word.
#[macro_export]
macro_rules! instr {
    ($opcode:ident, $dest:ident, $left:ident, $right:ident) => {
        make_register_instruction(
            Opcode::$opcode,
            RegisterId::$dest,
            RegisterId::$left,
            RegisterId::$right,
        )
    };
}
