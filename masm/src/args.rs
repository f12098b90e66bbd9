use crate::error::AssembleError;
use mcpu::RegisterId;
use num::FromPrimitive;

/// A parsed operand.
#[derive(Clone, Debug, PartialEq)]
pub enum Argument {
    Register(RegisterId),
    /// Magnitude plus sign. Two's-complement conversion happens at
    /// encode time, not here.
    Immediate { negative: bool, value: u16 },
    Label(String),
}

/// Operand kind. Kinds, not values, are what make up a signature.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArgKind {
    Register,
    Immediate,
    Label,
}

impl Argument {
    pub fn kind(&self) -> ArgKind {
        match self {
            Argument::Register(_) => ArgKind::Register,
            Argument::Immediate { .. } => ArgKind::Immediate,
            Argument::Label(_) => ArgKind::Label,
        }
    }
}

impl std::fmt::Display for ArgKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(match self {
            ArgKind::Register => "register",
            ArgKind::Immediate => "immediate",
            ArgKind::Label => "label",
        })
    }
}

/// Parses an immediate literal: an optional leading `-`, an optional
/// base prefix (`0x` hexadecimal, `0b` binary, decimal otherwise), then
/// digits. The magnitude must fit in 16 bits unsigned.
pub fn parse_immediate(text: &str) -> Result<Argument, AssembleError> {
    let (negative, rest) = if text.starts_with('-') {
        (true, &text[1..])
    } else {
        (false, text)
    };

    let (radix, digits) = if rest.starts_with("0x") || rest.starts_with("0X") {
        (16, &rest[2..])
    } else if rest.starts_with("0b") || rest.starts_with("0B") {
        (2, &rest[2..])
    } else {
        (10, rest)
    };

    if digits.is_empty() {
        return Err(AssembleError::BadImmediate(text.to_string()));
    }

    let value = u16::from_str_radix(digits, radix)
        .map_err(|_| AssembleError::BadImmediate(text.to_string()))?;

    Ok(Argument::Immediate { negative, value })
}

// The symbolic register names the assembler accepts.
fn symbolic_register(name: &str) -> Option<RegisterId> {
    match name {
        "zero" => Some(RegisterId::ZERO),
        "ra" => Some(RegisterId::RA),
        "sp" => Some(RegisterId::SP),
        "a0" => Some(RegisterId::A0),
        "a1" => Some(RegisterId::A1),
        "a2" => Some(RegisterId::A2),
        "a3" => Some(RegisterId::A3),
        "t0" => Some(RegisterId::T0),
        "t1" => Some(RegisterId::T1),
        "t2" => Some(RegisterId::T2),
        "t3" => Some(RegisterId::T3),
        "t4" => Some(RegisterId::T4),
        "s0" => Some(RegisterId::S0),
        "s1" => Some(RegisterId::S1),
        "s2" => Some(RegisterId::S2),
        "s3" => Some(RegisterId::S3),
        _ => None,
    }
}

/// Looks a register name up, accepting the numeric aliases `r0`..`r15`
/// and the symbolic names, case-insensitively.
pub fn parse_register(text: &str) -> Result<RegisterId, AssembleError> {
    let name = text.to_lowercase();

    if let Some(id) = symbolic_register(&name) {
        return Ok(id);
    }

    // r0..r15 map straight to register file indices.
    if name.starts_with('r') {
        if let Ok(index) = name[1..].parse::<u8>() {
            if let Some(id) = RegisterId::from_u8(index) {
                return Ok(id);
            }
        }
    }

    Err(AssembleError::UnknownRegister(text.to_string()))
}
