use std::collections::HashMap;
use std::rc::Rc;

use crate::args::Argument;
use crate::buffer::InstrBuffer;
use crate::encoding::{AddressOracle, EncodeContext};
use crate::error::AssembleError;
use crate::instructions::{InstructionDef, InstructionSet, Mnemonic};
use crate::signature::Signature;

/// A single instruction of a program, tracking its currently selected
/// size variant and the bytes of its last successful encoding.
pub struct InstrInstance {
    def: Rc<InstructionDef>,
    args: Vec<Argument>,
    curr_variant: usize,
    success: bool,
    buffer: InstrBuffer,
    address: u16,
}

impl InstrInstance {
    /// Type-checks the operands against the instruction table.
    pub fn new(
        set: &InstructionSet,
        mnemonic: Mnemonic,
        args: Vec<Argument>,
    ) -> Result<InstrInstance, AssembleError> {
        let signature = Signature::of(mnemonic, &args);
        let def = set
            .find(&signature)
            .ok_or_else(|| AssembleError::UnknownInstruction(signature.to_string()))?;
        Ok(InstrInstance::with_def(def, args))
    }

    pub(crate) fn with_def(def: Rc<InstructionDef>, args: Vec<Argument>) -> InstrInstance {
        InstrInstance {
            def,
            args,
            curr_variant: 0,
            success: false,
            buffer: InstrBuffer::new(),
            address: 0,
        }
    }

    pub fn signature(&self) -> &Signature {
        &self.def.signature
    }

    /// Byte size of the currently selected variant.
    pub fn size(&self) -> usize {
        self.def.variants[self.curr_variant].size
    }

    pub fn variant_index(&self) -> usize {
        self.curr_variant
    }

    /// Byte address within the image, valid after assembly succeeds.
    pub fn address(&self) -> u16 {
        self.address
    }

    /// Attempts to encode with the current variant. On failure the
    /// instance advances to the next larger variant; running out of
    /// variants is an error.
    fn try_emit(&mut self, index: usize, ctx: &EncodeContext) -> Result<bool, AssembleError> {
        if self.def.independent && self.success {
            return Ok(true);
        }
        let variant = self.def.variants[self.curr_variant];
        let out = self.buffer.ensure(variant.size);
        self.success = (variant.encoder)(self.def.signature.mnemonic, &self.args, ctx, out);
        if !self.success {
            self.curr_variant += 1;
            if self.curr_variant == self.def.variants.len() {
                return Err(AssembleError::CannotEncode {
                    index,
                    signature: self.def.signature.to_string(),
                });
            }
        }
        Ok(self.success)
    }

    fn write(&self, dest: &mut [u8]) -> Result<(), AssembleError> {
        if !self.success {
            return Err(AssembleError::WriteBeforeEmit);
        }
        dest.copy_from_slice(self.buffer.as_slice());
        Ok(())
    }
}

/// An ordered sequence of instruction instances plus a label table,
/// assembled to bytes by iterating encoding attempts to a fixed point.
pub struct Program {
    set: InstructionSet,
    instances: Vec<InstrInstance>,
    labels: HashMap<String, usize>,
}

impl Program {
    pub fn new() -> Program {
        Program {
            set: InstructionSet::new(),
            instances: Vec::new(),
            labels: HashMap::new(),
        }
    }

    /// Appends an instruction, type-checking it against the table.
    pub fn push(&mut self, mnemonic: Mnemonic, args: Vec<Argument>) -> Result<(), AssembleError> {
        let instance = InstrInstance::new(&self.set, mnemonic, args)?;
        self.instances.push(instance);
        Ok(())
    }

    /// Binds `name` to the next instruction to be pushed. A label after
    /// the last instruction points at the end of the program.
    pub fn mark_label(&mut self, name: &str) -> bool {
        self.labels
            .insert(name.to_string(), self.instances.len())
            .is_none()
    }

    pub fn has_label(&self, name: &str) -> bool {
        self.labels.contains_key(name)
    }

    pub fn instances(&self) -> &[InstrInstance] {
        &self.instances
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Runs the fixed-point loop and writes the final image into `dest`,
    /// returning the total size.
    pub fn assemble(&mut self, dest: &mut [u8]) -> Result<usize, AssembleError> {
        run_fixed_point(&mut self.instances, &self.labels, dest)
    }
}

impl Default for Program {
    fn default() -> Program {
        Program::new()
    }
}

struct LabelOracle<'a> {
    labels: &'a HashMap<String, usize>,
    addresses: &'a [u16],
}

impl AddressOracle for LabelOracle<'_> {
    fn address_of(&self, label: &str) -> Option<u16> {
        self.labels.get(label).map(|&index| self.addresses[index])
    }
}

// Instance addresses implied by the currently selected variant sizes.
// The final entry is the end of the program, so trailing labels resolve.
fn layout(instances: &[InstrInstance]) -> Vec<u16> {
    let mut addresses = Vec::with_capacity(instances.len() + 1);
    let mut offset = 0u16;
    for instance in instances {
        addresses.push(offset);
        offset = offset.wrapping_add(instance.size() as u16);
    }
    addresses.push(offset);
    addresses
}

pub(crate) fn run_fixed_point(
    instances: &mut [InstrInstance],
    labels: &HashMap<String, usize>,
    dest: &mut [u8],
) -> Result<usize, AssembleError> {
    // Encode every instance against the addresses implied by the
    // previous pass until a full pass succeeds. Variant indices only
    // grow and sizes are bounded, so this terminates.
    loop {
        let addresses = layout(instances);
        let oracle = LabelOracle { labels, addresses: &addresses };
        let mut retry = false;
        for (index, instance) in instances.iter_mut().enumerate() {
            let ctx = EncodeContext {
                oracle: &oracle,
                pc: addresses[index],
            };
            if !instance.try_emit(index, &ctx)? {
                retry = true;
            }
        }
        if !retry {
            break;
        }
    }

    let total: usize = instances.iter().map(InstrInstance::size).sum();
    if total > dest.len() {
        return Err(AssembleError::ProgramTooLarge(total));
    }

    let mut offset = 0;
    for instance in instances.iter_mut() {
        instance.address = offset as u16;
        let size = instance.size();
        instance.write(&mut dest[offset..offset + size])?;
        offset += size;
    }
    Ok(total)
}
