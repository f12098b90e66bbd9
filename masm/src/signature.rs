use crate::args::{ArgKind, Argument};
use crate::instructions::Mnemonic;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Lookup key for the instruction table: a mnemonic plus the ordered
/// kinds of its operands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    pub mnemonic: Mnemonic,
    pub args: Vec<ArgKind>,
}

impl Signature {
    pub fn new(mnemonic: Mnemonic, args: Vec<ArgKind>) -> Signature {
        Signature { mnemonic, args }
    }

    pub fn of(mnemonic: Mnemonic, args: &[Argument]) -> Signature {
        Signature {
            mnemonic,
            args: args.iter().map(Argument::kind).collect(),
        }
    }
}

impl Hash for Signature {
    // Additive accumulation with a 3-bit rotation per element, so that
    // permutations of the same kinds hash differently.
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut hash = self.mnemonic as u64;
        for kind in &self.args {
            hash = hash.wrapping_add(*kind as u64);
            hash = hash.rotate_left(3);
        }
        state.write_u64(hash);
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}(", self.mnemonic)?;
        for (i, kind) in self.args.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", kind)?;
        }
        f.write_str(")")
    }
}
