use super::*;

#[test]
fn register_form() {
    let mut program = Vec::new();
    push_word(&mut program, instr!(OR, A0, A1, A2));

    let mut processor = boot(&program);
    processor.set_register(RegisterId::A1, 0xF000);
    processor.set_register(RegisterId::A2, 0x000F);
    step_instruction(&mut processor);

    assert_eq!(processor.register(RegisterId::A0), 0xF00F);
}

#[test]
fn word_immediate_loads_into_zero_source() {
    // or a0, zero, #imm is how 16-bit constants reach a register.
    let mut program = Vec::new();
    push_word(&mut program, make_instruction(Opcode::OR, 3, 0, 0));
    push_word(&mut program, 0xABCD);

    let mut processor = boot(&program);
    step_instruction(&mut processor);

    assert_eq!(processor.register(RegisterId::A0), 0xABCD);
}
