use super::*;

fn branch_program(flags: u8, displacement: u8) -> Vec<u8> {
    let mut program = Vec::new();
    push_word(&mut program, make_instruction(Opcode::BRA, flags, 3, 4));
    program.push(displacement);
    program
}

#[test]
fn equal_taken() {
    // beq a0, a1, +4 with equal registers: the next fetch lands four
    // bytes past the displacement byte.
    let program = branch_program(BRA_EQ, 4);

    let mut processor = boot(&program);
    let ticks = step_instruction(&mut processor);

    assert_eq!(ticks, 6);
    assert!(processor.take_branch());
    assert_eq!(fetch_address(&mut processor), 7);
}

#[test]
fn equal_not_taken() {
    let program = branch_program(BRA_EQ, 4);

    let mut processor = boot(&program);
    processor.set_register(RegisterId::A1, 1);
    step_instruction(&mut processor);

    assert!(!processor.take_branch());
    assert_eq!(fetch_address(&mut processor), 3);
}

#[test]
fn backward_displacement() {
    let program = branch_program(BRA_EQ, 0xFD); // -3: branch to itself

    let mut processor = boot(&program);
    step_instruction(&mut processor);

    assert_eq!(fetch_address(&mut processor), 0);
}

#[test]
fn not_equal() {
    let program = branch_program(BRA_EQ | BRA_NOT, 4);

    let mut processor = boot(&program);
    processor.set_register(RegisterId::A0, 7);
    step_instruction(&mut processor);

    assert!(processor.take_branch());
}

#[test]
fn signed_less_than() {
    // blt with A0 = -1, A1 = 0.
    let program = branch_program(BRA_LT, 4);

    let mut processor = boot(&program);
    processor.set_register(RegisterId::A0, 0xFFFF);
    step_instruction(&mut processor);

    assert!(processor.take_branch());
}

#[test]
fn unsigned_less_than() {
    // bltu with A0 = 0xFFFF, A1 = 0: not taken under unsigned compare.
    let program = branch_program(BRA_U | BRA_LT, 4);

    let mut processor = boot(&program);
    processor.set_register(RegisterId::A0, 0xFFFF);
    step_instruction(&mut processor);

    assert!(!processor.take_branch());
}

#[test]
fn unconditional() {
    let program = branch_program(BRA_NOT, 10);

    let mut processor = boot(&program);
    processor.set_register(RegisterId::A0, 1);
    processor.set_register(RegisterId::A1, 2);
    step_instruction(&mut processor);

    assert!(processor.take_branch());
    assert_eq!(fetch_address(&mut processor), 13);
}
