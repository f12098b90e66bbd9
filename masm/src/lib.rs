//! Assembler for the [mcpu](../mcpu/index.html) processor.
//!
//! The entry points are [`assemble`](fn.assemble.html), which returns the
//! program bytes, and [`assemble_image`](fn.assemble_image.html), which
//! returns a complete 64 KiB boot image with the reset vector pointing at
//! the program. Parsing is implemented with [pest]; parse errors carry
//! the offending source span and pretty-print through `Display`.
//!
//! Instruction selection is iterative: every instruction starts at its
//! smallest encoding variant and grows until its operands fit, so short
//! forms are used wherever operand values and label distances permit.
//! Because label addresses move while sizes settle, encoding repeats
//! until a whole pass succeeds without any instruction changing size.
//!
//! # Assembly language
//!
//! A program is a sequence of instructions and `label:` markers.
//! Comments start with `;` and run to the end of the line. Mnemonics and
//! register names match case-insensitively.
//!
//! Registers are written by name (`zero`, `ra`, `sp`, `a0`-`a3`,
//! `t0`-`t4`, `s0`-`s3`) or by index (`r0`-`r15`). Immediate literals
//! take an optional `#` marker, an optional sign and an optional base
//! prefix (`0x`, `0b`). Memory operands are `[reg]` or `[reg, #offset]`.
//!
//! Mnemonic  | Syntax                  | Notes
//! ----------|-------------------------|---------------------------------
//! `ADD`     | `add rd, rl, rr`        | also `sub`, `lsl`, `lsr`, `asr`, `xor`, `or`, `and`
//! `ADD`     | `add rd, rl, #value`    | byte immediate for `add`/`lsl`/`lsr`/`asr`, word for the rest
//! `BEQ`     | `beq rl, rr, target`    | also `bne`, `blt`, `ble`, `bgt`, `bge` and `u` variants; target is a label or displacement
//! `BRA`     | `bra target`            | unconditional
//! `JMP`     | `jmp target` / `jmp rr` / `jmp rr, #offset` | absolute, register, indexed register
//! `JSR`     | `jsr target` / `jsr rr` | like `jmp` but links `ra`; `call` is a synonym
//! `RET`     | `ret`                   | `jmp ra`
//! `LDW`     | `ldw rd, [rr]`          | also `ldb`, `lbu`; optional `[rr, #offset]`
//! `STW`     | `stw rd, [rr]`          | also `stb`
//! `LDI`     | `ldi rd, #value`        | value may also be a label address
//! `MOV`     | `mov rd, rs`            |
//! `SNOP`    | `snop` / `nop` / `lnop` | 2-, 3- and 4-byte padding
//!
//! Branch displacements count from the byte after the displacement byte.
//! Jump immediates are absolute addresses.
//!
//! [pest]: https://docs.rs/pest/

mod args;
mod buffer;
mod encoding;
mod error;
mod instructions;
mod parser;
mod program;
mod signature;


use byteorder::ByteOrder;
use mcpu::Endian;

pub use crate::args::{parse_immediate, parse_register, ArgKind, Argument};
pub use crate::encoding::{AddressOracle, EncodeContext, Encoder};
pub use crate::error::{AssembleError, Error};
pub use crate::instructions::{InstructionDef, InstructionSet, Mnemonic, Variant};
pub use crate::parser::{parse_program, Rule};
pub use crate::program::{InstrInstance, Program};
pub use crate::signature::Signature;

pub type Result<T> = std::result::Result<T, Error>;

/// Assembles source text into program bytes.
pub fn assemble(input: &str) -> Result<Vec<u8>> {
    let mut program = parse_program(input)?;
    let mut dest = vec![0u8; mcpu::MEM_SIZE];
    let size = program.assemble(&mut dest)?;
    dest.truncate(size);
    Ok(dest)
}

/// Assembles source text into a complete boot image: the program is
/// placed at address 0 and the reset vector points at it.
pub fn assemble_image(input: &str) -> Result<Vec<u8>> {
    let mut image = vec![0u8; mcpu::MEM_SIZE];
    let mut program = parse_program(input)?;
    program.assemble(&mut image)?;

    let vector = mcpu::RESET_VECTOR as usize;
    Endian::write_u16(&mut image[vector..vector + 2], 0);
    Ok(image)
}
