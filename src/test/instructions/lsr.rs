use super::*;

#[test]
fn inserts_zeros() {
    let mut program = Vec::new();
    push_word(&mut program, instr!(LSR, A0, A1, A2));

    let mut processor = boot(&program);
    processor.set_register(RegisterId::A1, 0x8000);
    processor.set_register(RegisterId::A2, 4);
    step_instruction(&mut processor);

    assert_eq!(processor.register(RegisterId::A0), 0x0800);
}

#[test]
fn byte_immediate() {
    let mut program = Vec::new();
    push_word(&mut program, make_instruction(Opcode::LSR, 3, 4, 0));
    program.push(8);

    let mut processor = boot(&program);
    processor.set_register(RegisterId::A1, 0xAB00);
    step_instruction(&mut processor);

    assert_eq!(processor.register(RegisterId::A0), 0x00AB);
}
