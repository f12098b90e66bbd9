use super::*;

#[test]
fn register_form() {
    let mut program = Vec::new();
    push_word(&mut program, instr!(XOR, A0, A1, A2));

    let mut processor = boot(&program);
    processor.set_register(RegisterId::A1, 0xFF00);
    processor.set_register(RegisterId::A2, 0x0FF0);
    step_instruction(&mut processor);

    assert_eq!(processor.register(RegisterId::A0), 0xF0F0);
}

#[test]
fn word_immediate() {
    let mut program = Vec::new();
    push_word(&mut program, make_instruction(Opcode::XOR, 3, 4, 0));
    push_word(&mut program, 0xFFFF);

    let mut processor = boot(&program);
    processor.set_register(RegisterId::A1, 0x1234);
    step_instruction(&mut processor);

    assert_eq!(processor.register(RegisterId::A0), 0xEDCB);
}
