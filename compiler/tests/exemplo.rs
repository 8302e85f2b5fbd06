use compiler::{compile, compile_into, ErrorKind, Instruction, Listing};

const EXEMPLO1: &str = "
program exemplo1;
var fat, num, cont: integer;
begin
  read(num);
  fat := 1;
  cont := 2;
  while cont <= num do
  begin
    fat := fat * num;
    cont := cont + 1
  end;
  write(fat)
end.
";

const LISTING: &str = "\
INPP
AMEM 3
LEIT
ARMZ 1
CRCT 1
ARMZ 0
CRCT 2
ARMZ 2
L1: NADA
CRVL 2
CRVL 1
CMEG
DSVF L2
CRVL 0
CRVL 1
MULT
ARMZ 0
CRVL 2
CRCT 1
SOMA
ARMZ 2
DSVS L1
L2: NADA
CRVL 0
IMPR
PARA
";

#[test]
fn exemplo1_listing() {
    let instructions = compile(EXEMPLO1).expect("failed to compile");

    assert_eq!(Listing(&instructions).to_string(), LISTING);
}

#[test]
fn exemplo1_symbols() {
    let mut instructions = Vec::new();
    let symbols = compile_into(EXEMPLO1, &mut instructions).expect("failed to compile");

    let addresses: Vec<_> = symbols
        .iter()
        .map(|symbol| (symbol.identifier.as_str(), symbol.address))
        .collect();
    assert_eq!(addresses, [("fat", 0), ("num", 1), ("cont", 2)]);

    let allocations: Vec<_> = instructions
        .iter()
        .filter(|instruction| matches!(instruction, Instruction::Allocate(_)))
        .collect();
    assert_eq!(allocations, [&Instruction::Allocate(symbols.len())]);
}

#[test]
fn exemplo1_brackets_with_entry_and_halt() {
    let instructions = compile(EXEMPLO1).expect("failed to compile");

    assert_eq!(instructions.first(), Some(&Instruction::Start));
    assert_eq!(instructions.last(), Some(&Instruction::Halt));
    assert_eq!(
        &instructions[instructions.len() - 3..],
        [Instruction::Load(0), Instruction::Write, Instruction::Halt]
    );
}

#[test]
fn exemplo1_without_final_dot() {
    let source = EXEMPLO1.trim_end().trim_end_matches('.');
    let mut instructions = Vec::new();
    let error = compile_into(source, &mut instructions).expect_err("should fail to compile");

    assert_eq!(error.kind(), ErrorKind::Syntax);
    assert_eq!((error.line(), error.column()), (14, 4));
    assert_eq!(
        error.to_string(),
        "Line 14, Column 4: Syntax error: expected \".\", found end of input"
    );
    assert!(!instructions.contains(&Instruction::Halt));
}
