use super::*;

fn mem_instruction(flags: u8, offset: u8) -> Vec<u8> {
    let mut program = Vec::new();
    push_word(&mut program, make_instruction(Opcode::MEM, 3, flags, 2));
    program.push(offset);
    program
}

#[test]
fn word() {
    // ldw a0, [sp] with SP = 0x0100.
    let program = mem_instruction(MEM_LOAD | MEM_WORD, 0);

    let mut processor = boot(&program);
    processor.set_register(RegisterId::SP, 0x0100);
    processor.load_memory(&[0xCD, 0xAB], 0x0100);
    let ticks = step_instruction(&mut processor);

    assert_eq!(ticks, 6);
    assert_eq!(processor.register(RegisterId::A0), 0xABCD);
    // The address register is restored to the next instruction.
    assert_eq!(processor.address(), 3);
    assert_eq!(fetch_address(&mut processor), 3);
}

#[test]
fn byte_sign_extended() {
    let program = mem_instruction(MEM_LOAD | MEM_SEX, 0);

    let mut processor = boot(&program);
    processor.set_register(RegisterId::SP, 0x0100);
    processor.load_memory(&[0x80], 0x0100);
    let ticks = step_instruction(&mut processor);

    assert_eq!(ticks, 5);
    assert_eq!(processor.register(RegisterId::A0), 0xFF80);
}

#[test]
fn byte_unsigned() {
    let program = mem_instruction(MEM_LOAD, 0);

    let mut processor = boot(&program);
    processor.set_register(RegisterId::SP, 0x0100);
    processor.load_memory(&[0x80], 0x0100);
    step_instruction(&mut processor);

    assert_eq!(processor.register(RegisterId::A0), 0x0080);
}

#[test]
fn offset_adjusts_operand_address() {
    // ldw a0, [sp, #2]: the index byte shifts the access, not the PC.
    let program = mem_instruction(MEM_LOAD | MEM_WORD, 2);

    let mut processor = boot(&program);
    processor.set_register(RegisterId::SP, 0x0100);
    processor.load_memory(&[0x11, 0x22, 0x34, 0x12], 0x0100);
    step_instruction(&mut processor);

    assert_eq!(processor.register(RegisterId::A0), 0x1234);
    assert_eq!(fetch_address(&mut processor), 3);
}

#[test]
fn negative_offset() {
    let program = mem_instruction(MEM_LOAD, 0xFF); // -1

    let mut processor = boot(&program);
    processor.set_register(RegisterId::SP, 0x0100);
    processor.load_memory(&[0x42], 0x00FF);
    step_instruction(&mut processor);

    assert_eq!(processor.register(RegisterId::A0), 0x0042);
}
