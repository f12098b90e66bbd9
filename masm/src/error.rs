use crate::parser::Rule;
use pest::error::Error as PestError;
use std::error::Error as StdError;
use std::fmt;

/// Errors raised while turning instructions into bytes.
#[derive(Clone, Debug, PartialEq)]
pub enum AssembleError {
    /// No signature match in the instruction table.
    UnknownInstruction(String),
    /// An instance exhausted its encoding variants.
    CannotEncode { index: usize, signature: String },
    /// The assembled program does not fit the destination image.
    ProgramTooLarge(usize),
    /// Attempted to write out an instance that has no successful encoding.
    WriteBeforeEmit,
    /// Malformed or out-of-range immediate literal.
    BadImmediate(String),
    /// Register name lookup miss.
    UnknownRegister(String),
}

impl fmt::Display for AssembleError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AssembleError::UnknownInstruction(signature) => {
                write!(f, "Unknown instruction {}.", signature)
            }
            AssembleError::CannotEncode { index, signature } => write!(
                f,
                "Cannot encode instruction {} (#{}): all variants failed.",
                signature, index
            ),
            AssembleError::ProgramTooLarge(size) => {
                write!(f, "Program of {} bytes does not fit the image.", size)
            }
            AssembleError::WriteBeforeEmit => {
                f.write_str("Cannot write an instruction that has not been emitted.")
            }
            AssembleError::BadImmediate(text) => {
                write!(f, "Bad immediate value \"{}\".", text)
            }
            AssembleError::UnknownRegister(text) => {
                write!(f, "Unknown register \"{}\".", text)
            }
        }
    }
}

impl StdError for AssembleError {}

/// Any error the assembler can produce: a parse failure with source
/// position, or an assembly failure.
#[derive(Clone, Debug, PartialEq)]
pub enum Error {
    Parse(PestError<Rule>),
    Assemble(AssembleError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Parse(err) => write!(f, "{}", err),
            Error::Assemble(err) => write!(f, "{}", err),
        }
    }
}

impl StdError for Error {}

impl From<PestError<Rule>> for Error {
    fn from(err: PestError<Rule>) -> Error {
        Error::Parse(err)
    }
}

impl From<AssembleError> for Error {
    fn from(err: AssembleError) -> Error {
        Error::Assemble(err)
    }
}
