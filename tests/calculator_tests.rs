//! End-to-end scenarios for the calculator facade, covering the
//! documented behavior of record/undo/redo/clear/load, eviction under
//! the history bound, and persistence through the observer seam.

use reckon::core::{CalcError, Calculation, Calculator, OperationRegistry};
use reckon::persist::{self, AutoSaveObserver};

#[test]
fn record_undo_redo_scenario() {
    let mut calc = Calculator::new(100);
    calc.evaluate("add", 15.0, 7.0).unwrap();
    calc.evaluate("power", 2.0, 8.0).unwrap();

    calc.undo().unwrap();
    let after_undo: Vec<String> = calc.snapshot().iter().map(|c| c.to_string()).collect();
    assert_eq!(after_undo, vec!["add(15, 7) = 22"]);

    calc.redo().unwrap();
    let after_redo: Vec<String> = calc.snapshot().iter().map(|c| c.to_string()).collect();
    assert_eq!(after_redo, vec!["add(15, 7) = 22", "power(2, 8) = 256"]);
}

#[test]
fn eviction_with_capacity_two() {
    let mut calc = Calculator::new(2);
    calc.evaluate("add", 1.0, 0.0).unwrap();
    calc.evaluate("add", 2.0, 0.0).unwrap();
    calc.evaluate("add", 3.0, 0.0).unwrap();

    let operands: Vec<f64> = calc.snapshot().iter().map(|c| c.operand1).collect();
    assert_eq!(operands, vec![2.0, 3.0]);

    // The undo snapshot predates the third record: entries one and two.
    // The eviction itself is not reconstructible beyond that.
    calc.undo().unwrap();
    let operands: Vec<f64> = calc.snapshot().iter().map(|c| c.operand1).collect();
    assert_eq!(operands, vec![1.0, 2.0]);
}

#[test]
fn divide_by_zero_leaves_all_state_untouched() {
    let mut calc = Calculator::new(100);
    calc.evaluate("add", 1.0, 1.0).unwrap();
    calc.evaluate("add", 2.0, 2.0).unwrap();
    calc.undo().unwrap();
    let snapshot: Vec<Calculation> = calc.snapshot().to_vec();
    assert!(calc.can_redo());

    let err = calc.evaluate("divide", 10.0, 0.0).unwrap_err();
    assert!(matches!(&err, CalcError::Domain(msg) if msg.contains("zero")));

    // History unchanged and the redo branch still intact: the failed
    // call never reached the mutation step.
    assert_eq!(calc.snapshot(), &snapshot[..]);
    assert!(calc.can_redo());
    calc.redo().unwrap();
    assert_eq!(calc.snapshot().len(), 2);
}

#[test]
fn negative_radicand_records_nothing() {
    let mut calc = Calculator::new(100);
    let err = calc.evaluate("root", -25.0, 2.0).unwrap_err();
    assert!(matches!(&err, CalcError::Domain(msg) if msg.contains("negative")));
    assert!(calc.snapshot().is_empty());
    assert!(!calc.can_undo());
}

#[test]
fn undo_exhaustion_then_rebuild() {
    let mut calc = Calculator::new(100);
    calc.evaluate("add", 1.0, 1.0).unwrap();
    calc.undo().unwrap();
    assert_eq!(calc.undo().unwrap_err(), CalcError::NothingToUndo);
    assert!(calc.snapshot().is_empty());

    calc.evaluate("multiply", 6.0, 7.0).unwrap();
    assert_eq!(calc.snapshot()[0].result, 42.0);
}

#[test]
fn autosaved_file_reloads_into_a_fresh_calculator() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.csv");

    let mut calc = Calculator::new(100);
    calc.subscribe(Box::new(AutoSaveObserver::new(&path)));
    calc.evaluate("add", 15.0, 7.0).unwrap();
    calc.evaluate("divide", 10.0, 4.0).unwrap();
    let saved: Vec<Calculation> = calc.snapshot().to_vec();

    let entries = persist::load_csv(&path, &OperationRegistry::with_builtins()).unwrap();
    let mut fresh = Calculator::new(100);
    fresh.load(entries);

    assert_eq!(fresh.snapshot(), &saved[..]);

    // The load itself is one more undoable mutation.
    fresh.undo().unwrap();
    assert!(fresh.snapshot().is_empty());
    fresh.redo().unwrap();
    assert_eq!(fresh.snapshot(), &saved[..]);
}

#[test]
fn load_respects_the_history_bound() {
    let mut calc = Calculator::new(2);
    calc.load(vec![
        Calculation::new("add", 1.0, 0.0, 1.0),
        Calculation::new("add", 2.0, 0.0, 2.0),
        Calculation::new("add", 3.0, 0.0, 3.0),
    ]);

    let operands: Vec<f64> = calc.snapshot().iter().map(|c| c.operand1).collect();
    assert_eq!(operands, vec![2.0, 3.0]);
}

#[test]
fn interleaved_clear_and_undo_chain() {
    let mut calc = Calculator::new(100);
    calc.evaluate("add", 1.0, 1.0).unwrap();
    calc.evaluate("add", 2.0, 2.0).unwrap();
    calc.clear();
    calc.evaluate("add", 3.0, 3.0).unwrap();

    // Walk the whole chain back down.
    calc.undo().unwrap(); // undo record(3)
    assert!(calc.snapshot().is_empty());
    calc.undo().unwrap(); // undo clear
    assert_eq!(calc.snapshot().len(), 2);
    calc.undo().unwrap(); // undo record(2)
    assert_eq!(calc.snapshot().len(), 1);
    calc.undo().unwrap(); // undo record(1)
    assert!(calc.snapshot().is_empty());
    assert_eq!(calc.undo().unwrap_err(), CalcError::NothingToUndo);

    // And forward again.
    calc.redo().unwrap();
    calc.redo().unwrap();
    calc.redo().unwrap();
    calc.redo().unwrap();
    assert_eq!(calc.snapshot().len(), 1);
    assert_eq!(calc.snapshot()[0].result, 6.0);
    assert_eq!(calc.redo().unwrap_err(), CalcError::NothingToRedo);
}
