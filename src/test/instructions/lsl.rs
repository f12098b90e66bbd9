use super::*;

#[test]
fn register_form() {
    let mut program = Vec::new();
    push_word(&mut program, instr!(LSL, A0, A1, A2));

    let mut processor = boot(&program);
    processor.set_register(RegisterId::A1, 0x0001);
    processor.set_register(RegisterId::A2, 12);
    step_instruction(&mut processor);

    assert_eq!(processor.register(RegisterId::A0), 0x1000);
}

#[test]
fn shift_count_is_masked() {
    // Only the low four bits of the count matter: 0x13 shifts by 3.
    let mut program = Vec::new();
    push_word(&mut program, instr!(LSL, A0, A1, A2));

    let mut processor = boot(&program);
    processor.set_register(RegisterId::A1, 0x0001);
    processor.set_register(RegisterId::A2, 0x13);
    step_instruction(&mut processor);

    assert_eq!(processor.register(RegisterId::A0), 0x0008);
}
