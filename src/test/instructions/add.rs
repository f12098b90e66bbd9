use super::*;

#[test]
fn register_form() {
    let mut program = Vec::new();
    push_word(&mut program, instr!(ADD, A0, A1, A2));

    let mut processor = boot(&program);
    processor.set_register(RegisterId::A1, 3);
    processor.set_register(RegisterId::A2, 4);
    let ticks = step_instruction(&mut processor);

    assert_eq!(ticks, 5);
    assert_eq!(processor.register(RegisterId::A0), 7);
    assert_eq!(processor.register(RegisterId::A1), 3);
    assert_eq!(processor.register(RegisterId::A2), 4);
}

#[test]
fn negative_byte_immediate() {
    // add a0, a0, #-1: the single immediate byte is sign extended.
    let mut program = Vec::new();
    push_word(&mut program, make_instruction(Opcode::ADD, 3, 3, 0));
    program.push(0xFF);

    let mut processor = boot(&program);
    step_instruction(&mut processor);

    assert_eq!(processor.register(RegisterId::A0), 0xFFFF);
}

#[test]
fn positive_byte_immediate() {
    let mut program = Vec::new();
    push_word(&mut program, make_instruction(Opcode::ADD, 3, 3, 0));
    program.push(0x10);

    let mut processor = boot(&program);
    processor.set_register(RegisterId::A0, 0x0100);
    step_instruction(&mut processor);

    assert_eq!(processor.register(RegisterId::A0), 0x0110);
}

#[test]
fn byte_immediate_instruction_is_three_bytes() {
    let mut program = Vec::new();
    push_word(&mut program, make_instruction(Opcode::ADD, 3, 3, 0));
    program.push(0x01);

    let mut processor = boot(&program);
    step_instruction(&mut processor);

    assert_eq!(fetch_address(&mut processor), 3);
}

#[test]
fn wraps_around() {
    let mut program = Vec::new();
    push_word(&mut program, instr!(ADD, A0, A1, A2));

    let mut processor = boot(&program);
    processor.set_register(RegisterId::A1, 0xFFFF);
    processor.set_register(RegisterId::A2, 2);
    step_instruction(&mut processor);

    assert_eq!(processor.register(RegisterId::A0), 1);
}
