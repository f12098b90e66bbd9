use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::args::ArgKind::{self, Immediate, Label, Register};
use crate::encoding::{self, Encoder};
use crate::signature::Signature;

/// Assembly mnemonics: the hardware opcodes the programmer can name
/// directly plus the pseudo-instructions the assembler expands. The
/// reserved opcodes 2-6 have no mnemonic and can never be emitted.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Mnemonic {
    ADD,
    SUB,
    LSL,
    LSR,
    ASR,
    XOR,
    OR,
    AND,
    BRA,
    JMP,

    BEQ,
    BNE,
    BLT,
    BLE,
    BGT,
    BGE,
    BLTU,
    BLEU,
    BGTU,
    BGEU,

    JSR,
    CALL,
    RET,

    LDW,
    LDB,
    LBU,
    STW,
    STB,

    SNOP,
    NOP,
    LNOP,

    LDI,
    MOV,
}

impl Mnemonic {
    /// Looks a lower-cased source token up in the mnemonic table.
    pub fn lookup(token: &str) -> Option<Mnemonic> {
        use Mnemonic::*;

        Some(match token {
            "add" => ADD,
            "sub" => SUB,
            "lsl" => LSL,
            "lsr" => LSR,
            "asr" => ASR,
            "xor" => XOR,
            "or" => OR,
            "and" => AND,
            "bra" => BRA,
            "jmp" => JMP,

            "beq" => BEQ,
            "bne" => BNE,
            "blt" => BLT,
            "ble" => BLE,
            "bgt" => BGT,
            "bge" => BGE,
            "bltu" => BLTU,
            "bleu" => BLEU,
            "bgtu" => BGTU,
            "bgeu" => BGEU,

            "jsr" => JSR,
            "call" => CALL,
            "ret" => RET,

            "ldw" => LDW,
            "ldb" => LDB,
            "lbu" => LBU,
            "stw" => STW,
            "stb" => STB,

            "snop" => SNOP,
            "nop" => NOP,
            "lnop" => LNOP,

            "ldi" => LDI,
            "mov" => MOV,

            _ => return None,
        })
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// One possible encoding of an instruction: a byte size and the encoder
/// that produces it.
#[derive(Clone, Copy)]
pub struct Variant {
    pub size: usize,
    pub encoder: Encoder,
}

/// Definition of an instruction. A definition may have multiple size
/// variants; they are sorted by non-decreasing size so that optimistic
/// short encodings are attempted first.
///
/// Invariants:
///   - at least one variant
///   - variant sizes are non-decreasing
///   - `independent` implies the smallest variant never fails
pub struct InstructionDef {
    pub signature: Signature,
    pub variants: Vec<Variant>,
    pub independent: bool,
}

/// The signature-keyed instruction table.
pub struct InstructionSet {
    defs: HashMap<Signature, Rc<InstructionDef>>,
}

impl InstructionSet {
    pub fn new() -> InstructionSet {
        let mut set = InstructionSet {
            defs: HashMap::new(),
        };
        set.fill();
        set
    }

    pub fn find(&self, signature: &Signature) -> Option<Rc<InstructionDef>> {
        self.defs.get(signature).cloned()
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    pub fn defs(&self) -> impl Iterator<Item = &Rc<InstructionDef>> {
        self.defs.values()
    }

    fn def(
        &mut self,
        mnemonic: Mnemonic,
        args: &[ArgKind],
        variants: &[(usize, Encoder)],
        independent: bool,
    ) {
        let signature = Signature::new(mnemonic, args.to_vec());
        let def = InstructionDef {
            signature: signature.clone(),
            variants: variants
                .iter()
                .map(|&(size, encoder)| Variant { size, encoder })
                .collect(),
            independent,
        };
        self.defs.insert(signature, Rc::new(def));
    }

    fn fill(&mut self) {
        use Mnemonic::*;

        // Arithmetic. A register right operand cannot be R0 (the zero
        // nibble selects an immediate), so the register form falls back
        // to an immediate-zero encoding. ADD/LSL/LSR/ASR immediates are
        // a single sign-extended byte; SUB/XOR/OR/AND take a full word.
        for &mnemonic in &[ADD, LSL, LSR, ASR] {
            self.def(
                mnemonic,
                &[Register, Register, Register],
                &[
                    (2, encoding::encode_arith_register as Encoder),
                    (3, encoding::encode_arith_byte),
                ],
                false,
            );
            self.def(
                mnemonic,
                &[Register, Register, Immediate],
                &[(3, encoding::encode_arith_byte as Encoder)],
                false,
            );
        }
        for &mnemonic in &[SUB, XOR, OR, AND] {
            self.def(
                mnemonic,
                &[Register, Register, Register],
                &[
                    (2, encoding::encode_arith_register as Encoder),
                    (4, encoding::encode_arith_word),
                ],
                false,
            );
            self.def(
                mnemonic,
                &[Register, Register, Immediate],
                &[(4, encoding::encode_arith_word as Encoder)],
                true,
            );
        }

        // Conditional branches, by label or explicit displacement. The
        // long form is an inverted-condition branch over an absolute
        // jump.
        for &mnemonic in &[BEQ, BNE, BLT, BLE, BGT, BGE, BLTU, BLEU, BGTU, BGEU] {
            for &target in &[Label, Immediate] {
                self.def(
                    mnemonic,
                    &[Register, Register, target],
                    &[
                        (3, encoding::encode_branch_short as Encoder),
                        (7, encoding::encode_branch_long),
                    ],
                    false,
                );
            }
        }

        // Unconditional branch; the long form degenerates to a plain
        // absolute jump.
        for &target in &[Label, Immediate] {
            self.def(
                BRA,
                &[target],
                &[
                    (3, encoding::encode_branch_short as Encoder),
                    (4, encoding::encode_branch_jump),
                ],
                false,
            );
        }

        // Jumps and calls.
        self.def(
            JMP,
            &[Label],
            &[(4, encoding::encode_jump_absolute as Encoder)],
            false,
        );
        self.def(
            JMP,
            &[Immediate],
            &[(4, encoding::encode_jump_absolute as Encoder)],
            true,
        );
        self.def(
            JMP,
            &[Register],
            &[
                (2, encoding::encode_jump_register as Encoder),
                (4, encoding::encode_jump_zero),
            ],
            false,
        );
        self.def(
            JMP,
            &[Register, Immediate],
            &[(3, encoding::encode_jump_indexed as Encoder)],
            false,
        );
        for &mnemonic in &[JSR, CALL] {
            self.def(
                mnemonic,
                &[Label],
                &[(4, encoding::encode_jump_absolute as Encoder)],
                false,
            );
            self.def(
                mnemonic,
                &[Immediate],
                &[(4, encoding::encode_jump_absolute as Encoder)],
                true,
            );
            self.def(
                mnemonic,
                &[Register],
                &[
                    (2, encoding::encode_jump_register as Encoder),
                    (4, encoding::encode_jump_zero),
                ],
                false,
            );
        }
        self.def(RET, &[], &[(2, encoding::encode_ret as Encoder)], true);

        // Loads and stores, with an optional signed byte offset.
        for &mnemonic in &[LDW, LDB, LBU, STW, STB] {
            self.def(
                mnemonic,
                &[Register, Register],
                &[(3, encoding::encode_mem as Encoder)],
                true,
            );
            self.def(
                mnemonic,
                &[Register, Register, Immediate],
                &[(3, encoding::encode_mem as Encoder)],
                false,
            );
        }

        // Padding in the three hardware sizes.
        self.def(SNOP, &[], &[(2, encoding::encode_snop as Encoder)], true);
        self.def(NOP, &[], &[(3, encoding::encode_nop as Encoder)], true);
        self.def(LNOP, &[], &[(4, encoding::encode_lnop as Encoder)], true);

        // Load immediate / load address and register move.
        for &value in &[Immediate, Label] {
            self.def(
                LDI,
                &[Register, value],
                &[
                    (3, encoding::encode_ldi_short as Encoder),
                    (4, encoding::encode_ldi_long),
                ],
                false,
            );
        }
        self.def(
            MOV,
            &[Register, Register],
            &[(3, encoding::encode_move as Encoder)],
            true,
        );
    }
}

impl Default for InstructionSet {
    fn default() -> InstructionSet {
        InstructionSet::new()
    }
}
