use super::*;

#[test]
fn absolute_immediate() {
    // jmp #0x1234: four bytes, link discarded into R0.
    let mut program = Vec::new();
    push_word(&mut program, make_instruction(Opcode::JMP, 0, 0, 0));
    push_word(&mut program, 0x1234);

    let mut processor = boot(&program);
    let ticks = step_instruction(&mut processor);

    assert_eq!(ticks, 6);
    assert_eq!(processor.address(), 0x1234);
    assert_eq!(processor.register(RegisterId::ZERO), 0);
}

#[test]
fn absolute_immediate_links() {
    // jsr #0x0200: the link register receives the address of the next
    // instruction.
    let mut program = Vec::new();
    push_word(&mut program, make_instruction(Opcode::JMP, 1, 0, 0));
    push_word(&mut program, 0x0200);

    let mut processor = boot(&program);
    step_instruction(&mut processor);

    assert_eq!(processor.address(), 0x0200);
    assert_eq!(processor.register(RegisterId::RA), 4);
}

#[test]
fn register_jump() {
    let mut program = Vec::new();
    push_word(&mut program, make_instruction(Opcode::JMP, 0, 0, 7));

    let mut processor = boot(&program);
    processor.set_register(RegisterId::T0, 0x0300);
    let ticks = step_instruction(&mut processor);

    assert_eq!(ticks, 5);
    assert_eq!(processor.address(), 0x0300);
}

#[test]
fn register_jump_links() {
    // jsr t0: two-byte call through a register.
    let mut program = Vec::new();
    push_word(&mut program, make_instruction(Opcode::JMP, 1, 0, 7));

    let mut processor = boot(&program);
    processor.set_register(RegisterId::T0, 0x0300);
    step_instruction(&mut processor);

    assert_eq!(processor.address(), 0x0300);
    assert_eq!(processor.register(RegisterId::RA), 2);
}

#[test]
fn indexed_register_jump() {
    // jmp t0, #4: the immediate byte lands in the index register and
    // post-adjusts the first fetch after the jump.
    let mut program = Vec::new();
    push_word(&mut program, make_instruction(Opcode::JMP, 0, 1, 7));
    program.push(4);

    let mut processor = boot(&program);
    processor.set_register(RegisterId::T0, 0x0100);
    step_instruction(&mut processor);

    assert_eq!(processor.address(), 0x0100);
    assert_eq!(fetch_address(&mut processor), 0x0104);
}

#[test]
fn indexed_register_jump_negative_offset() {
    let mut program = Vec::new();
    push_word(&mut program, make_instruction(Opcode::JMP, 0, 1, 7));
    program.push(0xFE); // -2

    let mut processor = boot(&program);
    processor.set_register(RegisterId::T0, 0x0100);
    step_instruction(&mut processor);

    assert_eq!(fetch_address(&mut processor), 0x00FE);
}
