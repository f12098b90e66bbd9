use super::*;

#[test]
fn register_form() {
    let mut program = Vec::new();
    push_word(&mut program, instr!(SUB, A0, A1, A2));

    let mut processor = boot(&program);
    processor.set_register(RegisterId::A1, 10);
    processor.set_register(RegisterId::A2, 4);
    step_instruction(&mut processor);

    assert_eq!(processor.register(RegisterId::A0), 6);
}

#[test]
fn word_immediate() {
    // sub a0, a0, #0x1234: SUB takes a full 16-bit immediate, low byte
    // first.
    let mut program = Vec::new();
    push_word(&mut program, make_instruction(Opcode::SUB, 3, 3, 0));
    push_word(&mut program, 0x1234);

    let mut processor = boot(&program);
    processor.set_register(RegisterId::A0, 0x2000);
    let ticks = step_instruction(&mut processor);

    assert_eq!(ticks, 6);
    assert_eq!(processor.register(RegisterId::A0), 0x0DCC);
}

#[test]
fn word_immediate_instruction_is_four_bytes() {
    let mut program = Vec::new();
    push_word(&mut program, make_instruction(Opcode::SUB, 3, 3, 0));
    push_word(&mut program, 0x0001);

    let mut processor = boot(&program);
    step_instruction(&mut processor);

    assert_eq!(fetch_address(&mut processor), 4);
}

#[test]
fn word_immediate_is_not_sign_extended() {
    let mut program = Vec::new();
    push_word(&mut program, make_instruction(Opcode::SUB, 3, 3, 0));
    push_word(&mut program, 0x0080);

    let mut processor = boot(&program);
    processor.set_register(RegisterId::A0, 0x0100);
    step_instruction(&mut processor);

    assert_eq!(processor.register(RegisterId::A0), 0x0080);
}

#[test]
fn wraps_around() {
    let mut program = Vec::new();
    push_word(&mut program, instr!(SUB, A0, A1, A2));

    let mut processor = boot(&program);
    processor.set_register(RegisterId::A1, 0);
    processor.set_register(RegisterId::A2, 1);
    step_instruction(&mut processor);

    assert_eq!(processor.register(RegisterId::A0), 0xFFFF);
}
