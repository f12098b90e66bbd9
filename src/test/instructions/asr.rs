use super::*;

#[test]
fn sign_bit_set() {
    // asr a0, a0, #4 with A0 = 0x8000 pads with ones.
    let mut program = Vec::new();
    push_word(&mut program, make_instruction(Opcode::ASR, 3, 3, 0));
    program.push(4);

    let mut processor = boot(&program);
    processor.set_register(RegisterId::A0, 0x8000);
    step_instruction(&mut processor);

    assert_eq!(processor.register(RegisterId::A0), 0xF800);
}

#[test]
fn sign_bit_clear() {
    let mut program = Vec::new();
    push_word(&mut program, instr!(ASR, A0, A1, A2));

    let mut processor = boot(&program);
    processor.set_register(RegisterId::A1, 0x4000);
    processor.set_register(RegisterId::A2, 4);
    step_instruction(&mut processor);

    assert_eq!(processor.register(RegisterId::A0), 0x0400);
}

#[test]
fn zero_count_is_identity() {
    let mut program = Vec::new();
    push_word(&mut program, instr!(ASR, A0, A1, A2));

    let mut processor = boot(&program);
    processor.set_register(RegisterId::A1, 0xBEEF);
    processor.set_register(RegisterId::A2, 0x10);
    step_instruction(&mut processor);

    assert_eq!(processor.register(RegisterId::A0), 0xBEEF);
}
