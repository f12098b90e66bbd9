use byteorder::ByteOrder;

use crate::args::Argument;
use crate::instructions::Mnemonic;
use mcpu::{
    make_instruction, register_index, Endian, Opcode, BRA_EQ, BRA_LT, BRA_NOT, BRA_U, MEM_LOAD,
    MEM_SEX, MEM_WORD,
};

/// Source of label addresses during encoding.
///
/// Implementations answer with the address assumed after the previous
/// fixed-point pass; on the first pass that is a lower bound computed
/// from the smallest variant sizes.
pub trait AddressOracle {
    fn address_of(&self, label: &str) -> Option<u16>;
}

/// Everything an encoder may consult besides its operands.
pub struct EncodeContext<'a> {
    pub oracle: &'a dyn AddressOracle,
    /// The encoded instance's currently assumed byte address.
    pub pc: u16,
}

/// A variant encoder. Writes exactly the variant's size to `out` and
/// returns true, or returns false when the operands cannot be
/// represented in this form (the output is then unspecified). Encoders
/// are pure: identical inputs produce identical results.
pub type Encoder = fn(Mnemonic, &[Argument], &EncodeContext, &mut [u8]) -> bool;

/// Branch condition flag nibble for a branch mnemonic; everything else
/// gets the unconditional NOT flag.
pub fn branch_flags(mnemonic: Mnemonic) -> u8 {
    match mnemonic {
        Mnemonic::BEQ => BRA_EQ,
        Mnemonic::BNE => BRA_EQ | BRA_NOT,
        Mnemonic::BLT => BRA_LT,
        Mnemonic::BLE => BRA_LT | BRA_EQ,
        Mnemonic::BGT => BRA_LT | BRA_EQ | BRA_NOT,
        Mnemonic::BGE => BRA_LT | BRA_NOT,
        Mnemonic::BLTU => BRA_U | BRA_LT,
        Mnemonic::BLEU => BRA_U | BRA_LT | BRA_EQ,
        Mnemonic::BGTU => BRA_U | BRA_LT | BRA_EQ | BRA_NOT,
        Mnemonic::BGEU => BRA_U | BRA_LT | BRA_NOT,
        _ => BRA_NOT,
    }
}

/// Memory access flag nibble for a load/store mnemonic.
pub fn mem_flags(mnemonic: Mnemonic) -> u8 {
    match mnemonic {
        Mnemonic::LDW => MEM_LOAD | MEM_WORD,
        Mnemonic::LDB => MEM_LOAD | MEM_SEX,
        Mnemonic::LBU => MEM_LOAD,
        Mnemonic::STW => MEM_WORD,
        Mnemonic::STB => 0,
        _ => 0,
    }
}

fn arith_opcode(mnemonic: Mnemonic) -> Opcode {
    match mnemonic {
        Mnemonic::ADD => Opcode::ADD,
        Mnemonic::SUB => Opcode::SUB,
        Mnemonic::LSL => Opcode::LSL,
        Mnemonic::LSR => Opcode::LSR,
        Mnemonic::ASR => Opcode::ASR,
        Mnemonic::XOR => Opcode::XOR,
        Mnemonic::OR => Opcode::OR,
        Mnemonic::AND => Opcode::AND,
        _ => unreachable!("not an arithmetic mnemonic"),
    }
}

/// Two's-complement value of an immediate operand.
pub fn immediate_word(negative: bool, value: u16) -> u16 {
    if negative {
        value.wrapping_neg()
    } else {
        value
    }
}

/// True when `value` round-trips through an 8-bit store and a
/// sign-extending load.
pub fn fits_sign_extended_byte(value: u16) -> bool {
    value <= 0x007F || value >= 0xFF80
}

fn fits_i8(value: i32) -> bool {
    value >= -128 && value <= 127
}

fn register_nibble(arg: &Argument) -> u8 {
    match arg {
        Argument::Register(id) => register_index(*id) as u8,
        _ => unreachable!("signature guarantees a register operand"),
    }
}

fn immediate_signed(arg: &Argument) -> i32 {
    match arg {
        Argument::Immediate { negative, value } => {
            if *negative {
                -i32::from(*value)
            } else {
                i32::from(*value)
            }
        }
        _ => unreachable!("signature guarantees an immediate operand"),
    }
}

// The second ALU operand as a 16-bit value. A register in that position
// can only be R0 (otherwise the register variant would have been used),
// which contributes zero.
fn second_operand_word(args: &[Argument]) -> u16 {
    match &args[2] {
        Argument::Immediate { negative, value } => immediate_word(*negative, *value),
        Argument::Register(_) => 0,
        Argument::Label(_) => unreachable!("arithmetic operands are never labels"),
    }
}

/// Absolute 16-bit target of a jump operand: an immediate is taken as an
/// address, a label is resolved through the oracle.
fn absolute_target(arg: &Argument, ctx: &EncodeContext) -> Option<u16> {
    match arg {
        Argument::Immediate { negative, value } => Some(immediate_word(*negative, *value)),
        Argument::Label(name) => ctx.oracle.address_of(name),
        Argument::Register(_) => None,
    }
}

// Branch operands are (left, right, target) for the conditional forms
// and just (target) for unconditional BRA.
fn branch_operands<'a>(args: &'a [Argument]) -> (u8, u8, &'a Argument) {
    if args.len() == 3 {
        (
            register_nibble(&args[0]),
            register_nibble(&args[1]),
            &args[2],
        )
    } else {
        (0, 0, &args[0])
    }
}

/// Displacement of a branch target relative to the end of the short form
/// (the byte after the displacement byte, `pc + 3`).
fn branch_displacement(arg: &Argument, ctx: &EncodeContext) -> Option<i32> {
    match arg {
        Argument::Immediate { .. } => Some(immediate_signed(arg)),
        Argument::Label(name) => ctx
            .oracle
            .address_of(name)
            .map(|target| i32::from(target) - (i32::from(ctx.pc) + 3)),
        Argument::Register(_) => None,
    }
}

fn put_word(out: &mut [u8], offset: usize, word: u16) {
    Endian::write_u16(&mut out[offset..offset + 2], word);
}

fn link_nibble(mnemonic: Mnemonic) -> u8 {
    match mnemonic {
        Mnemonic::JSR | Mnemonic::CALL => register_index(mcpu::RegisterId::RA) as u8,
        _ => 0,
    }
}

pub fn encode_arith_register(
    mnemonic: Mnemonic,
    args: &[Argument],
    _ctx: &EncodeContext,
    out: &mut [u8],
) -> bool {
    let right = register_nibble(&args[2]);
    if right == 0 {
        // A zero right nibble selects an immediate; fall back to the
        // immediate-zero variant.
        return false;
    }
    put_word(
        out,
        0,
        make_instruction(
            arith_opcode(mnemonic),
            register_nibble(&args[0]),
            register_nibble(&args[1]),
            right,
        ),
    );
    true
}

pub fn encode_arith_byte(
    mnemonic: Mnemonic,
    args: &[Argument],
    _ctx: &EncodeContext,
    out: &mut [u8],
) -> bool {
    let value = second_operand_word(args);
    if !fits_sign_extended_byte(value) {
        return false;
    }
    put_word(
        out,
        0,
        make_instruction(
            arith_opcode(mnemonic),
            register_nibble(&args[0]),
            register_nibble(&args[1]),
            0,
        ),
    );
    out[2] = value as u8;
    true
}

pub fn encode_arith_word(
    mnemonic: Mnemonic,
    args: &[Argument],
    _ctx: &EncodeContext,
    out: &mut [u8],
) -> bool {
    put_word(
        out,
        0,
        make_instruction(
            arith_opcode(mnemonic),
            register_nibble(&args[0]),
            register_nibble(&args[1]),
            0,
        ),
    );
    put_word(out, 2, second_operand_word(args));
    true
}

pub fn encode_branch_short(
    mnemonic: Mnemonic,
    args: &[Argument],
    ctx: &EncodeContext,
    out: &mut [u8],
) -> bool {
    let (left, right, target) = branch_operands(args);
    let displacement = match branch_displacement(target, ctx) {
        Some(d) if fits_i8(d) => d,
        _ => return false,
    };
    put_word(
        out,
        0,
        make_instruction(Opcode::BRA, branch_flags(mnemonic), left, right),
    );
    out[2] = displacement as i8 as u8;
    true
}

/// Long conditional branch: an inverted-condition branch over an
/// absolute jump to the real target.
pub fn encode_branch_long(
    mnemonic: Mnemonic,
    args: &[Argument],
    ctx: &EncodeContext,
    out: &mut [u8],
) -> bool {
    let (left, right, target) = branch_operands(args);
    let displacement = match branch_displacement(target, ctx) {
        Some(d) => d,
        None => return false,
    };
    let target = ctx.pc.wrapping_add(3).wrapping_add(displacement as u16);

    put_word(
        out,
        0,
        make_instruction(Opcode::BRA, branch_flags(mnemonic) ^ BRA_NOT, left, right),
    );
    out[2] = 4; // skip the 4-byte jump below
    put_word(out, 3, make_instruction(Opcode::JMP, 0, 0, 0));
    put_word(out, 5, target);
    true
}

/// Long unconditional branch: a plain absolute jump.
pub fn encode_branch_jump(
    _mnemonic: Mnemonic,
    args: &[Argument],
    ctx: &EncodeContext,
    out: &mut [u8],
) -> bool {
    let (_, _, target) = branch_operands(args);
    let displacement = match branch_displacement(target, ctx) {
        Some(d) => d,
        None => return false,
    };
    let target = ctx.pc.wrapping_add(3).wrapping_add(displacement as u16);

    put_word(out, 0, make_instruction(Opcode::JMP, 0, 0, 0));
    put_word(out, 2, target);
    true
}

pub fn encode_jump_absolute(
    mnemonic: Mnemonic,
    args: &[Argument],
    ctx: &EncodeContext,
    out: &mut [u8],
) -> bool {
    let target = match absolute_target(&args[0], ctx) {
        Some(t) => t,
        None => return false,
    };
    put_word(out, 0, make_instruction(Opcode::JMP, link_nibble(mnemonic), 0, 0));
    put_word(out, 2, target);
    true
}

pub fn encode_jump_register(
    mnemonic: Mnemonic,
    args: &[Argument],
    _ctx: &EncodeContext,
    out: &mut [u8],
) -> bool {
    let right = register_nibble(&args[0]);
    if right == 0 {
        return false;
    }
    put_word(
        out,
        0,
        make_instruction(Opcode::JMP, link_nibble(mnemonic), 0, right),
    );
    true
}

/// Fallback for jumping through R0: an absolute jump to address zero,
/// which is what the register always holds.
pub fn encode_jump_zero(
    mnemonic: Mnemonic,
    _args: &[Argument],
    _ctx: &EncodeContext,
    out: &mut [u8],
) -> bool {
    put_word(out, 0, make_instruction(Opcode::JMP, link_nibble(mnemonic), 0, 0));
    put_word(out, 2, 0);
    true
}

/// Indexed register jump: the immediate byte lands in the processor's
/// index register and offsets the first fetch after the jump.
pub fn encode_jump_indexed(
    _mnemonic: Mnemonic,
    args: &[Argument],
    _ctx: &EncodeContext,
    out: &mut [u8],
) -> bool {
    let offset = immediate_signed(&args[1]);
    if !fits_i8(offset) {
        return false;
    }
    put_word(
        out,
        0,
        make_instruction(Opcode::JMP, 0, 1, register_nibble(&args[0])),
    );
    out[2] = offset as i8 as u8;
    true
}

pub fn encode_ret(
    _mnemonic: Mnemonic,
    _args: &[Argument],
    _ctx: &EncodeContext,
    out: &mut [u8],
) -> bool {
    put_word(
        out,
        0,
        make_instruction(Opcode::JMP, 0, 0, register_index(mcpu::RegisterId::RA) as u8),
    );
    true
}

pub fn encode_mem(
    mnemonic: Mnemonic,
    args: &[Argument],
    _ctx: &EncodeContext,
    out: &mut [u8],
) -> bool {
    let offset = if args.len() == 3 {
        let offset = immediate_signed(&args[2]);
        if !fits_i8(offset) {
            return false;
        }
        offset
    } else {
        0
    };
    put_word(
        out,
        0,
        make_instruction(
            Opcode::MEM,
            register_nibble(&args[0]),
            mem_flags(mnemonic),
            register_nibble(&args[1]),
        ),
    );
    out[2] = offset as i8 as u8;
    true
}

pub fn encode_snop(
    _mnemonic: Mnemonic,
    _args: &[Argument],
    _ctx: &EncodeContext,
    out: &mut [u8],
) -> bool {
    put_word(out, 0, make_instruction(Opcode::ADD, 0, 0, 1));
    true
}

pub fn encode_nop(
    _mnemonic: Mnemonic,
    _args: &[Argument],
    _ctx: &EncodeContext,
    out: &mut [u8],
) -> bool {
    put_word(out, 0, make_instruction(Opcode::ADD, 0, 0, 0));
    out[2] = 0;
    true
}

pub fn encode_lnop(
    _mnemonic: Mnemonic,
    _args: &[Argument],
    _ctx: &EncodeContext,
    out: &mut [u8],
) -> bool {
    put_word(out, 0, make_instruction(Opcode::SUB, 0, 0, 0));
    put_word(out, 2, 0);
    true
}

/// Short load-immediate: `add rd, zero, #value` with a sign-extended
/// byte.
pub fn encode_ldi_short(
    _mnemonic: Mnemonic,
    args: &[Argument],
    ctx: &EncodeContext,
    out: &mut [u8],
) -> bool {
    let value = match absolute_target(&args[1], ctx) {
        Some(v) => v,
        None => return false,
    };
    if !fits_sign_extended_byte(value) {
        return false;
    }
    put_word(
        out,
        0,
        make_instruction(Opcode::ADD, register_nibble(&args[0]), 0, 0),
    );
    out[2] = value as u8;
    true
}

/// Long load-immediate: `or rd, zero, #value` with a full 16-bit
/// immediate.
pub fn encode_ldi_long(
    _mnemonic: Mnemonic,
    args: &[Argument],
    ctx: &EncodeContext,
    out: &mut [u8],
) -> bool {
    let value = match absolute_target(&args[1], ctx) {
        Some(v) => v,
        None => return false,
    };
    put_word(
        out,
        0,
        make_instruction(Opcode::OR, register_nibble(&args[0]), 0, 0),
    );
    put_word(out, 2, value);
    true
}

/// `mov rd, rs` is `add rd, rs, #0`.
pub fn encode_move(
    _mnemonic: Mnemonic,
    args: &[Argument],
    _ctx: &EncodeContext,
    out: &mut [u8],
) -> bool {
    put_word(
        out,
        0,
        make_instruction(
            Opcode::ADD,
            register_nibble(&args[0]),
            register_nibble(&args[1]),
            0,
        ),
    );
    out[2] = 0;
    true
}
