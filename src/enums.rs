use num::traits::ToPrimitive;
use num_derive::{FromPrimitive, ToPrimitive};

/// Hardware opcodes, one per 4-bit pattern.
///
/// Instruction word layout:
///
/// | Bits 15-12 | Bits 11-8            | Bits 7-4            | Bits 3-0 |
/// |------------|----------------------|---------------------|----------|
/// | opcode     | dest / branch flags  | left / memory flags | right    |
///
/// A `right` field of zero selects an immediate second operand, fetched
/// from the bytes following the instruction word (one byte for
/// ADD/LSL/LSR/ASR, two for SUB/XOR/OR/AND).
#[derive(Clone, Copy, PartialEq, Eq, Debug, ToPrimitive, FromPrimitive)]
pub enum Opcode {
    //  Mnemonic    | Effect
    //--------------+--------------------------------------------------------
    ADD, // 0      | dest = left + right
    SUB, // 1      | dest = left - right
    RS0, // 2      | reserved
    RS1, // 3      | reserved
    RS2, // 4      | reserved
    RS3, // 5      | reserved
    RS4, // 6      | reserved
    LSL, // 7      | dest = left << (right & 0xF)
    LSR, // 8      | dest = left >> (right & 0xF), inserting zeros
    ASR, // 9      | dest = left >> (right & 0xF), inserting the sign bit
    XOR, // A      | dest = left ^ right
    OR,  // B      | dest = left | right
    AND, // C      | dest = left & right
    BRA, // D      | conditional branch by a trailing signed displacement byte
    JMP, // E      | dest = return address; jump to right or to an immediate
    MEM, // F      | load or store through the address in right
}

impl Opcode {
    /// Arithmetic, reserved and branch opcodes all latch `left` and
    /// `right` through the bus in cycles 2 and 3.
    pub fn uses_alu_operands(self) -> bool {
        !matches!(self, Opcode::JMP | Opcode::MEM)
    }

    /// Opcodes that write an ALU result in cycle 4 (reserved codes
    /// included; they execute as no-ops on the ALU).
    pub fn is_arithmetic(self) -> bool {
        !matches!(self, Opcode::BRA | Opcode::JMP | Opcode::MEM)
    }
}

/// Architectural registers.
#[derive(Clone, Copy, PartialEq, Eq, Debug, ToPrimitive, FromPrimitive)]
pub enum RegisterId {
    ZERO, // Hard-wired zero
    RA,   // Return address
    SP,   // Stack pointer

    A0, // Arguments (callee saved)
    A1,
    A2,
    A3,

    T0, // Temporary (caller saved)
    T1,
    T2,
    T3,
    T4,

    S0, // Saved (callee saved)
    S1,
    S2,
    S3,
}

#[inline]
pub fn enum_to_u16<T: ToPrimitive + Copy>(val: T) -> u16 {
    val.to_u16().unwrap()
}

macro_rules! impl_enum_display {
    ($e:ty) => {
        impl std::fmt::Display for $e {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                std::fmt::Debug::fmt(self, f)
            }
        }
    };
}

impl_enum_display!(Opcode);
impl_enum_display!(RegisterId);

#[inline]
pub fn register_index(id: RegisterId) -> usize {
    enum_to_u16(id) as usize
}
