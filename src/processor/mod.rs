mod alu;

use num::FromPrimitive;

use crate::bus::Bus;
use crate::constants::{MEM_LOAD, MEM_SEX, MEM_WORD, REGISTER_COUNT, RESET_VECTOR};
use crate::enums::{register_index, Opcode, RegisterId};
use crate::instructions::make_instruction;
use crate::memory::Memory;
use crate::Word;

/// The micro-cycle CPU model.
///
/// Each instruction executes over a fixed sequence of cycles that share
/// the bus, the address register and the ALU:
///
/// * cycle 0: fetch the low instruction byte
/// * cycle 1: fetch the high instruction byte, decode
/// * cycle 2: second operand (register, or one/two immediate bytes)
/// * cycle 3: first operand, jump linking, or memory address staging
/// * cycle 4: execute (ALU write-back, branch test, jump, load/store)
/// * cycle 5: branch commit
///
/// Between cycles the address register advances by +1 when `inc_addr` was
/// set, otherwise by the sign-extended `index` byte (which is then
/// cleared). Branches and memory offsets work by planting a displacement
/// in `index` instead of touching the address directly.
pub struct Processor {
    memory: Memory,
    registers: [Word; REGISTER_COUNT],
    bus: Bus,
    address: Word,
    temp_pc: Word,
    alu_left: Word,
    alu_right: Word,
    alu_result: Word,

    cycle: u8,
    opcode: Opcode,
    dest: u8,
    left: u8,
    right: u8,
    index: u8,
    inc_addr: bool,
    load_imm: bool,
    load_word: bool,
    load_high: bool,
    imm_to_idx: bool,
    take_branch: bool,
}

impl Processor {
    /// Constructs a processor in its reset state.
    ///
    /// The decoder wakes up as if a JMP through a word immediate were
    /// already half-way done, so the first four `update` calls fetch the
    /// 16-bit word at [`RESET_VECTOR`](../constants/constant.RESET_VECTOR.html)
    /// and jump there.
    pub fn new() -> Processor {
        Processor {
            memory: Memory::new(),
            registers: [0; REGISTER_COUNT],
            bus: Bus::new(),
            address: RESET_VECTOR,
            temp_pc: 0,
            alu_left: 0,
            alu_right: 0,
            alu_result: 0,

            cycle: 2,
            opcode: Opcode::JMP,
            dest: 0,
            left: 0,
            right: 0,
            index: 0,
            inc_addr: false,
            load_imm: true,
            load_word: true,
            load_high: true,
            imm_to_idx: false,
            take_branch: false,
        }
    }

    /// Advances the machine by one micro-cycle.
    pub fn update(&mut self) {
        self.registers[register_index(RegisterId::ZERO)] = 0;
        if self.inc_addr {
            self.address = self.address.wrapping_add(1);
            self.inc_addr = false;
        } else {
            self.address = self.address.wrapping_add(self.index as i8 as Word);
            self.index = 0;
        }

        match self.cycle {
            0 => self.cycle_0(),
            1 => self.cycle_1(),
            2 => self.cycle_2(),
            3 => self.cycle_3(),
            4 => self.cycle_4(),
            5 => self.cycle_5(),
            _ => {}
        }
    }

    // Fetch the low instruction byte.
    fn cycle_0(&mut self) {
        self.inc_addr = true;
        self.bus.write_low(self.memory.byte(self.address));
        self.cycle += 1;
    }

    // Fetch the high instruction byte and decode.
    fn cycle_1(&mut self) {
        self.inc_addr = true;
        self.bus.write_high(self.memory.byte(self.address));
        let instruction = self.bus.read(false);
        self.decode(instruction);
        self.cycle += 1;
    }

    // Second operand: immediate bytes or a register through the bus.
    fn cycle_2(&mut self) {
        if self.load_imm {
            self.load_immediate();
        } else {
            self.bus.write(self.registers[self.right as usize]);
            self.alu_right = self.bus.read(false);
            self.cycle += 1;
        }
    }

    // First operand, jump linking or memory address staging.
    fn cycle_3(&mut self) {
        if self.opcode.uses_alu_operands() {
            self.bus.write(self.registers[self.left as usize]);
            self.alu_left = self.bus.read(false);
            self.cycle += 1;
        } else if self.opcode == Opcode::JMP {
            self.inc_addr = self.imm_to_idx;
            self.bus.write(self.address);
            let link = self.bus.read(false);
            self.write_register(self.dest, link);
            self.cycle += 1;
        } else {
            self.temp_pc = self.address;
            self.bus.write(self.registers[self.right as usize]);
            self.address = self.bus.read(false);
            self.cycle += 1;
        }
    }

    // Execute.
    fn cycle_4(&mut self) {
        if self.opcode.is_arithmetic() {
            self.execute_alu();
            self.bus.write(self.alu_result);
            let result = self.bus.read(false);
            self.write_register(self.dest, result);
            self.cycle = 0;
        } else if self.opcode == Opcode::BRA {
            self.inc_addr = true;
            self.bus.write_low(self.memory.byte(self.address));
            self.execute_alu();
            self.cycle += 1;
        } else if self.opcode == Opcode::JMP {
            if !self.imm_to_idx {
                self.bus.write(self.alu_right);
            } else {
                self.bus.write(self.registers[self.right as usize]);
            }
            self.address = self.bus.read(false);
            self.cycle = 0;
        } else if self.left & MEM_LOAD != 0 {
            self.load();
        } else {
            self.store();
        }
    }

    // Branch commit: route the fetched displacement into `index`.
    fn cycle_5(&mut self) {
        if self.opcode == Opcode::BRA {
            if self.take_branch {
                self.index = self.bus.read(false) as u8;
            }
            self.cycle = 0;
        }
    }

    fn decode(&mut self, instruction: Word) {
        // Masked to four bits; every pattern decodes, reserved codes
        // included.
        self.opcode = Opcode::from_u16(instruction >> 12).unwrap_or(Opcode::RS0);
        self.dest = ((instruction >> 8) & 0xF) as u8;
        self.left = ((instruction >> 4) & 0xF) as u8;
        self.right = (instruction & 0xF) as u8;

        self.load_imm = false;
        self.load_word = false;
        self.imm_to_idx = false;
        match self.opcode {
            Opcode::ADD | Opcode::LSL | Opcode::LSR | Opcode::ASR => {
                self.load_imm = self.right == 0;
                self.load_word = false;
            }
            Opcode::SUB | Opcode::XOR | Opcode::OR | Opcode::AND => {
                self.load_imm = self.right == 0;
                self.load_word = true;
            }
            Opcode::JMP => {
                self.load_imm = self.right == 0 || self.left != 0;
                self.load_word = self.left == 0;
                self.imm_to_idx = self.left != 0;
            }
            Opcode::BRA => {
                // The displacement byte is fetched in cycle 4 instead.
                self.load_imm = false;
            }
            Opcode::MEM => {
                self.load_imm = true;
                self.load_word = false;
                self.imm_to_idx = true;
            }
            _ => {}
        }
        self.load_high = true;
    }

    fn execute_alu(&mut self) {
        match self.opcode {
            Opcode::ADD => self.alu_result = self.alu_left.wrapping_add(self.alu_right),
            Opcode::SUB => self.alu_result = self.alu_left.wrapping_sub(self.alu_right),
            Opcode::LSL => self.alu_result = self.alu_left << (self.alu_right & 0xF),
            Opcode::LSR => self.alu_result = self.alu_left >> (self.alu_right & 0xF),
            Opcode::ASR => self.alu_result = alu::asr(self.alu_left, self.alu_right as u8),
            Opcode::XOR => self.alu_result = self.alu_left ^ self.alu_right,
            Opcode::OR => self.alu_result = self.alu_left | self.alu_right,
            Opcode::AND => self.alu_result = self.alu_left & self.alu_right,
            Opcode::BRA => {
                self.take_branch = alu::test_branch(self.dest, self.alu_left, self.alu_right)
            }
            _ => {}
        }
    }

    // Fetch one or two immediate bytes. A word immediate keeps the
    // machine in cycle 2 for a second call via `load_high`.
    fn load_immediate(&mut self) {
        self.inc_addr = true;
        if self.load_word {
            if self.load_high {
                self.bus.write_low(self.memory.byte(self.address));
                self.load_high = false;
            } else {
                self.bus.write_high(self.memory.byte(self.address));
                let value = self.bus.read(false);
                if self.imm_to_idx {
                    self.index = value as u8;
                } else {
                    self.alu_right = value;
                }
                self.cycle += 1;
            }
        } else {
            self.bus.write_low(self.memory.byte(self.address));
            if self.imm_to_idx {
                self.index = self.bus.read(false) as u8;
            } else {
                self.alu_right = self.bus.read(true);
            }
            self.cycle += 1;
        }
    }

    fn load(&mut self) {
        if self.left & MEM_WORD != 0 {
            if self.load_high {
                self.inc_addr = true;
                self.bus.write_low(self.memory.byte(self.address));
                self.load_high = false;
            } else {
                self.bus.write_high(self.memory.byte(self.address));
                let value = self.bus.read(false);
                self.write_register(self.dest, value);
                self.address = self.temp_pc;
                self.cycle = 0;
            }
        } else {
            self.bus.write_low(self.memory.byte(self.address));
            let value = self.bus.read(self.left & MEM_SEX != 0);
            self.write_register(self.dest, value);
            self.address = self.temp_pc;
            self.cycle = 0;
        }
    }

    fn store(&mut self) {
        if self.left & MEM_WORD != 0 {
            if self.load_high {
                self.inc_addr = true;
                self.bus.write_low(self.registers[self.dest as usize] as u8);
                let value = self.bus.read(false);
                self.memory.set_byte(self.address, value as u8);
                self.load_high = false;
            } else {
                self.bus
                    .write_low((self.registers[self.dest as usize] >> 8) as u8);
                let value = self.bus.read(false);
                self.memory.set_byte(self.address, value as u8);
                self.address = self.temp_pc;
                self.cycle = 0;
            }
        } else {
            self.bus.write_low(self.registers[self.dest as usize] as u8);
            let value = self.bus.read(false);
            self.memory.set_byte(self.address, value as u8);
            self.address = self.temp_pc;
            self.cycle = 0;
        }
    }

    // R0 reads as zero; stores into it are dropped.
    fn write_register(&mut self, id: u8, value: Word) {
        if id != 0 {
            self.registers[id as usize] = value;
        }
    }

    pub fn load_memory(&mut self, data: &[u8], address: Word) {
        self.memory.load(data, address);
    }

    pub fn memory(&self) -> &[u8] {
        self.memory.data()
    }

    pub fn register(&self, id: RegisterId) -> Word {
        self.registers[register_index(id)]
    }

    pub fn set_register(&mut self, id: RegisterId, value: Word) {
        self.registers[register_index(id)] = value;
    }

    pub fn registers(&self) -> &[Word; REGISTER_COUNT] {
        &self.registers
    }

    pub fn cycle(&self) -> u8 {
        self.cycle
    }

    /// The most recently decoded instruction word, reassembled from its
    /// fields.
    pub fn instruction(&self) -> Word {
        make_instruction(self.opcode, self.dest, self.left, self.right)
    }

    pub fn address(&self) -> Word {
        self.address
    }

    pub fn temp_pc(&self) -> Word {
        self.temp_pc
    }

    pub fn bus(&self) -> Word {
        self.bus.peek()
    }

    pub fn alu_left(&self) -> Word {
        self.alu_left
    }

    pub fn alu_right(&self) -> Word {
        self.alu_right
    }

    pub fn alu_result(&self) -> Word {
        self.alu_result
    }

    pub fn take_branch(&self) -> bool {
        self.take_branch
    }
}

impl Default for Processor {
    fn default() -> Processor {
        Processor::new()
    }
}
