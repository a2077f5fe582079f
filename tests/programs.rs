use ls8::compiler::compiler::compile;
use ls8::computer::registers::FL_EQUAL;
use ls8::config::DEFAULT_STACK_TOP;
use ls8::{loader, Computer, ComputerError, LineSink, LoadError};

fn run(program: &[u8]) -> Computer<Vec<u8>> {
    let mut computer = Computer::new(Vec::new());
    computer.load_program(program).unwrap();
    computer.run().unwrap();
    computer
}

#[test]
fn print8() {
    let program = loader::parse(include_str!("../demos/print8.ls8")).unwrap();
    assert_eq!(run(&program).into_sink(), vec![8]);
}

#[test]
fn mult() {
    let program = loader::parse(include_str!("../demos/mult.ls8")).unwrap();
    assert_eq!(run(&program).into_sink(), vec![72]);
}

#[test]
fn stack() {
    let program = loader::parse(include_str!("../demos/stack.ls8")).unwrap();
    let computer = run(&program);
    assert_eq!(computer.sink(), &vec![2, 4, 1]);
    assert_eq!(computer.registers().stack_pointer(), DEFAULT_STACK_TOP);
}

#[test]
fn call() {
    let program = loader::parse(include_str!("../demos/call.ls8")).unwrap();
    let computer = run(&program);
    assert_eq!(computer.sink(), &vec![20, 30, 36, 60]);
    assert_eq!(computer.registers().stack_pointer(), DEFAULT_STACK_TOP);
}

#[test]
fn assembled_call_matches_binary_listing() {
    let binary = loader::parse(include_str!("../demos/call.ls8")).unwrap();
    let assembled = compile(include_str!("../demos/call.asm")).unwrap();
    assert_eq!(assembled, binary);
}

#[test]
fn sctest() {
    let program = compile(include_str!("../demos/sctest.asm")).unwrap();
    let computer = run(&program);
    assert_eq!(computer.sink(), &vec![1, 2]);
    assert_eq!(computer.flags(), FL_EQUAL);
}

#[test]
fn prints_decimal_lines() {
    let program = loader::parse(include_str!("../demos/call.ls8")).unwrap();
    let mut computer = Computer::new(LineSink::new(Vec::new()));
    computer.load_program(&program).unwrap();
    assert_eq!(computer.run().unwrap(), 22);

    let output = String::from_utf8(computer.into_sink().into_inner()).unwrap();
    assert_eq!(output, "20\n30\n36\n60\n");
}

#[test]
fn print_before_and_after_call() {
    let program = compile(
        "
            LDI R0,41
            LDI R1,Inc
            PRN R0
            CALL R1
            PRN R0
            HLT
        Inc:
            LDI R2,1
            ADD R0,R2
            RET
        ",
    )
    .unwrap();
    assert_eq!(run(&program).into_sink(), vec![41, 42]);
}

#[test]
fn malformed_program_loads_nothing() {
    let source = "10000010\n00000000\n00001000\nLDI\n01000111\n00000000\n00000001\n";
    let mut computer = Computer::new(Vec::new());

    let error = loader::parse(source)
        .and_then(|program| {
            computer.load_program(&program).map_err(|e| match e {
                ComputerError::Load(e) => e,
                other => panic!("unexpected {other:?}"),
            })
        })
        .unwrap_err();

    assert!(matches!(error, LoadError::InvalidLiteral { line: 4, .. }));
    assert!(computer.memory().as_slice().iter().all(|&byte| byte == 0));
}

#[test]
fn running_off_the_end_hits_unknown_opcode() {
    let program = loader::parse("10000010\n00000000\n00001000\n").unwrap();
    let mut computer = Computer::new(Vec::new());
    computer.load_program(&program).unwrap();
    assert!(matches!(
        computer.run(),
        Err(ComputerError::UnknownOpcode { opcode: 0, pc: 3 })
    ));
}
