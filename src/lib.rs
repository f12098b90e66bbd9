//! Cycle-accurate model of a small 16-bit processor.
//!
//! The machine has 64 KiB of byte-addressed memory, sixteen 16-bit
//! registers and a single shared bus connecting memory, the register file
//! and the ALU. One call to [`Processor::update`](struct.Processor.html)
//! advances the machine by exactly one micro-cycle; instructions take
//! four to six cycles depending on how many bytes of memory traffic they
//! generate.
//!
//! The instruction word layout and the per-cycle behavior are documented
//! on [`Processor`](struct.Processor.html); the assembler for this
//! machine lives in the `masm` crate.

pub mod bus;
pub mod constants;
pub mod enums;
pub mod instructions;
pub mod memory;
pub mod processor;

pub use crate::bus::Bus;
pub use crate::constants::*;
pub use crate::enums::*;
pub use crate::instructions::*;
pub use crate::memory::Memory;
pub use crate::processor::Processor;

/// Width of the machine's registers, bus and address space.
pub type Word = u16;

/// Byte order of every multi-byte value in memory and in image files.
pub type Endian = byteorder::LittleEndian;
