use pretty_assertions::assert_eq;
use tac_backend::{compile_program, LoweringOptions};
use tac_codegen::{emit_program, Reg};
use tac_common::CompilerError;
use tac_frontend::Frontend;

fn compile(source: &str, options: &LoweringOptions) -> Result<String, CompilerError> {
    let unit = Frontend::compile_to_ir(source, "test.c")?;
    let asm = compile_program(unit.program, options)?;
    Ok(emit_program(&asm))
}

fn pool(registers: &[Reg]) -> LoweringOptions {
    LoweringOptions {
        registers: registers.to_vec(),
    }
}

#[test]
fn test_golden_precedence_program() {
    let source = "int a;\na = 1 + 2 * 3;\nreturn a;\n";

    let unit = Frontend::compile_to_ir(source, "test.c").unwrap();
    assert_eq!(unit.program.dump(), "$0 = 2 * 3\n$1 = 1 + $0\na = $1\nreturn a\n");

    let text = compile(source, &pool(&[Reg::T0, Reg::T1, Reg::T2])).unwrap();
    assert_eq!(text, ".text\n\tli t0, 6\n\taddi t1, t0, 1\n\tmv t2, t1\n\tmv a0, t2\n");
}

#[test]
fn test_default_pool_matches_small_pool() {
    let source = "int a; a = 1 + 2 * 3; return a;";
    assert_eq!(
        compile(source, &LoweringOptions::default()).unwrap(),
        compile(source, &pool(&[Reg::T0, Reg::T1, Reg::T2])).unwrap()
    );
}

#[test]
fn test_variables_and_materialization() {
    let source = "int x; int y; x = 4; y = 10 - x * 3; return y;";
    // x = 4; $0 = x * 3 -> $2 = 3, $0 = x * $2; $1 = 10 - $0 -> $3 = 10, $1 = $3 - $0; y = $1
    let text = compile(source, &LoweringOptions::default()).unwrap();
    assert_eq!(
        text,
        ".text\n\
         \tli t0, 4\n\
         \tli t1, 3\n\
         \tmul t2, t1, t0\n\
         \tli t3, 10\n\
         \tsub t4, t3, t2\n\
         \tmv t5, t4\n\
         \tmv a0, t5\n"
    );
}

#[test]
fn test_small_pool_reuses_dead_registers() {
    let source = "int x; int y; x = 4; y = 10 - x * 3; return y;";
    let text = compile(source, &pool(&[Reg::T0, Reg::T1, Reg::T2])).unwrap();
    assert_eq!(
        text,
        ".text\n\
         \tli t0, 4\n\
         \tli t1, 3\n\
         \tmul t2, t1, t0\n\
         \tli t0, 10\n\
         \tsub t1, t0, t2\n\
         \tmv t0, t1\n\
         \tmv a0, t0\n"
    );
}

#[test]
fn test_register_exhaustion() {
    let source = "int x; int y; int z; x = 1; y = 2; z = x + y; return z;";
    let err = compile(source, &pool(&[Reg::T0, Reg::T1])).unwrap_err();
    match err {
        CompilerError::CodegenError { message } => {
            assert!(message.contains("instruction 3"), "{message}");
        }
        other => panic!("expected a codegen error, got {other:?}"),
    }
}

#[test]
fn test_lex_error_stops_compilation() {
    let err = compile("int a; a = 1 $ 2; return a;", &LoweringOptions::default()).unwrap_err();
    assert!(matches!(err, CompilerError::LexError { .. }));
}

#[test]
fn test_code_after_return_is_dropped() {
    let text = compile("return 7; return 8;", &LoweringOptions::default()).unwrap();
    assert_eq!(text, ".text\n\tmv a0, 7\n");
}

#[test]
fn test_compilation_is_deterministic() {
    let source = "int a; int b; a = 3; b = a * a - (a + 2) * 5; return b - a;";
    let first = compile(source, &LoweringOptions::default()).unwrap();
    for _ in 0..5 {
        assert_eq!(compile(source, &LoweringOptions::default()).unwrap(), first);
    }
}

#[test]
fn test_deeply_nested_expression() {
    let depth = 10_000;
    let source = format!(
        "int a; a = {}2 * 3{}; return a - 1;",
        "(".repeat(depth),
        ")".repeat(depth)
    );
    let text = compile(&source, &LoweringOptions::default()).unwrap();
    assert_eq!(text, ".text\n\tli t0, 6\n\tmv t1, t0\n\tsubi t2, t1, 1\n\tmv a0, t2\n");
}

#[test]
fn test_redeclaration_stops_compilation() {
    let err = compile("int a; int a; return 0;", &LoweringOptions::default()).unwrap_err();
    assert!(matches!(err, CompilerError::SemanticError { .. }));
}
