use super::*;
use crate::legalize::{legalize, LastUseTable};
use tac_codegen::Reg;
use tac_common::TempGenerator;
use tac_frontend::ir::{Instruction, Program, Value, Variable};

fn var(name: &str) -> Variable {
    Variable::named(name)
}

fn last_uses(entries: &[(&str, usize)]) -> LastUseTable {
    entries.iter().map(|(name, pos)| (var(name), *pos)).collect()
}

#[test]
fn test_bimap_insert_breaks_old_pairs() {
    let mut map: BiMap<&str, u8> = BiMap::new();
    map.insert("a", 1);
    map.insert("b", 2);
    assert_eq!(map.len(), 2);

    // "c" takes 1 away from "a"
    map.insert("c", 1);
    assert!(!map.contains_left(&"a"));
    assert_eq!(map.get_by_right(&1), Some(&"c"));

    // "b" moves from 2 to 3, freeing 2
    map.insert("b", 3);
    assert!(!map.contains_right(&2));
    assert_eq!(map.get_by_left(&"b"), Some(&3));

    // Both sides conflict at once
    map.insert("c", 3);
    assert_eq!(map.len(), 1);
    assert_eq!(map.iter().collect::<Vec<_>>(), vec![(&"c", &3)]);
    assert!(map.is_consistent());
}

#[test]
fn test_first_sight_takes_first_free_register() {
    let table = last_uses(&[("x", 5), ("y", 5)]);
    let mut alloc = RegisterAllocator::new(vec![Reg::T3, Reg::T1], &table).unwrap();

    assert_eq!(alloc.resolve_variable(&var("x"), 1).unwrap(), Reg::T3);
    assert_eq!(alloc.resolve_variable(&var("y"), 2).unwrap(), Reg::T1);
    assert_eq!(alloc.resolve_variable(&var("x"), 3).unwrap(), Reg::T3);
    assert_eq!(alloc.register_of(&var("y")), Some(Reg::T1));
}

#[test]
fn test_immediate_is_rejected() {
    let table = LastUseTable::new();
    let mut alloc = RegisterAllocator::new(Reg::SCRATCH.to_vec(), &table).unwrap();
    assert_eq!(
        alloc.resolve(&Value::immediate(4), 1),
        Err(RegAllocError::IllegalImmediate(4))
    );
}

#[test]
fn test_dead_variable_is_evicted_in_pool_order() {
    let table = last_uses(&[("x", 2), ("y", 2), ("z", 4)]);
    let mut alloc = RegisterAllocator::new(vec![Reg::T0, Reg::T1], &table).unwrap();

    alloc.resolve_variable(&var("x"), 1).unwrap();
    alloc.resolve_variable(&var("y"), 2).unwrap();

    // Both are dead at 3; T0 comes first in the pool
    assert_eq!(alloc.resolve_variable(&var("z"), 3).unwrap(), Reg::T0);
    assert_eq!(alloc.register_of(&var("x")), None);
    assert_eq!(alloc.register_of(&var("y")), Some(Reg::T1));
    assert!(alloc.bindings_consistent());
}

#[test]
fn test_variable_used_at_current_position_is_not_evicted() {
    let table = last_uses(&[("x", 3), ("y", 3), ("z", 3)]);
    let mut alloc = RegisterAllocator::new(vec![Reg::T0, Reg::T1], &table).unwrap();

    alloc.resolve_variable(&var("x"), 1).unwrap();
    alloc.resolve_variable(&var("y"), 2).unwrap();

    assert_eq!(
        alloc.resolve_variable(&var("z"), 3),
        Err(RegAllocError::OutOfRegisters {
            position: 3,
            variable: "z".to_string(),
        })
    );
    assert_eq!(alloc.register_of(&var("x")), Some(Reg::T0));
}

#[test]
fn test_exhaustion_through_legalized_program() {
    let program = Program::new(
        vec![
            Instruction::mov(var("x"), Value::immediate(1)),
            Instruction::mov(var("y"), Value::immediate(2)),
            Instruction::add(var("z"), var("x").into(), var("y").into()),
            Instruction::ret(var("z").into()),
        ],
        TempGenerator::new(),
    );
    let legalized = legalize(program);
    let mut alloc = RegisterAllocator::new(vec![Reg::T0, Reg::T1], legalized.last_use()).unwrap();

    alloc.resolve_variable(&var("x"), 1).unwrap();
    alloc.resolve_variable(&var("y"), 2).unwrap();
    let err = alloc.resolve_variable(&var("z"), 3).unwrap_err();
    assert!(matches!(err, RegAllocError::OutOfRegisters { position: 3, .. }));
}

#[test]
fn test_bindings_stay_bijective() {
    let table = last_uses(&[("a", 2), ("b", 3), ("c", 4), ("d", 5), ("e", 6)]);
    let mut alloc = RegisterAllocator::new(vec![Reg::T0, Reg::T1], &table).unwrap();

    for (position, name) in ["a", "b", "c", "d", "e"].iter().enumerate() {
        alloc.resolve_variable(&var(name), position + 1).unwrap();
        assert!(alloc.bindings_consistent());

        let regs: Vec<Reg> = alloc.bindings().map(|(_, reg)| *reg).collect();
        let mut unique = regs.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(regs.len(), unique.len());
    }
}

#[test]
fn test_allocation_is_deterministic() {
    let table = last_uses(&[("a", 2), ("b", 3), ("c", 4)]);
    let run = || {
        let mut alloc = RegisterAllocator::new(vec![Reg::T2, Reg::T0], &table).unwrap();
        ["a", "b", "c"]
            .iter()
            .enumerate()
            .map(|(i, name)| alloc.resolve_variable(&var(name), i + 1).unwrap())
            .collect::<Vec<_>>()
    };
    assert_eq!(run(), run());
    assert_eq!(run(), vec![Reg::T2, Reg::T0, Reg::T2]);
}

#[test]
fn test_pool_validation() {
    let table = LastUseTable::new();
    assert!(matches!(
        RegisterAllocator::new(Vec::new(), &table),
        Err(RegAllocError::EmptyPool)
    ));
    assert!(matches!(
        RegisterAllocator::new(vec![Reg::T0, Reg::A0], &table),
        Err(RegAllocError::InvalidRegister(Reg::A0))
    ));
    assert!(matches!(
        RegisterAllocator::new(vec![Reg::T0, Reg::T1, Reg::T0], &table),
        Err(RegAllocError::DuplicateRegister(Reg::T0))
    ));
}

#[test]
fn test_error_converts_to_codegen_error() {
    let err: tac_common::CompilerError = RegAllocError::OutOfRegisters {
        position: 7,
        variable: "$3".to_string(),
    }
    .into();
    assert_eq!(
        err.to_string(),
        "Code generation error: No register available for $3 at instruction 7"
    );
}
