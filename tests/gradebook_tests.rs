// SPDX-License-Identifier: MIT

//! Gradebook storage tests, including projection over stored records.

use study_hub::models::{Category, UserContext};
use study_hub::services::{grades, Gradebook};
use study_hub::Error;

mod common;
use common::{local_store, signed_in};

fn seeded_gradebook() -> (Gradebook<study_hub::db::MemoryLocalStore>, UserContext) {
    let book = Gradebook::new(local_store());
    let ctx = signed_in("alice");
    book.save_weights(&ctx, "AP Calc", 60.0, 40.0).unwrap();
    book.add_assignment(&ctx, "AP Calc", "Unit 1 Test", Category::Summative, 90.0)
        .unwrap();
    book.add_assignment(&ctx, "AP Calc", "Unit 2 Test", Category::Summative, 80.0)
        .unwrap();
    book.add_assignment(&ctx, "AP Calc", "Homework 3", Category::Formative, 95.0)
        .unwrap();
    (book, ctx)
}

#[test]
fn test_projection_over_stored_record() {
    let (book, ctx) = seeded_gradebook();
    let record = book.load(&ctx, "AP Calc");

    // 85 * 0.6 + 95 * 0.4
    let grade = grades::current_grade(&record).unwrap();
    assert!((grade - 89.5).abs() < 1e-9);

    // Desired 92 over the 95 formative average needs a perfect next test.
    let needed = grades::required_next_score(&record, 92.0).unwrap();
    assert!((needed - 100.0).abs() < 1e-9);
}

#[test]
fn test_unknown_class_loads_empty_record() {
    let book = Gradebook::new(local_store());
    let ctx = signed_in("alice");

    let record = book.load(&ctx, "Never Written");
    assert!(record.assignments.is_empty());
    assert_eq!(grades::current_grade(&record), None);
}

#[test]
fn test_invalid_weights_rejected_and_record_unchanged() {
    let (book, ctx) = seeded_gradebook();

    assert!(matches!(
        book.save_weights(&ctx, "AP Calc", 60.0, 39.0),
        Err(Error::InvalidWeights)
    ));
    assert!(matches!(
        book.save_weights(&ctx, "AP Calc", 110.0, -10.0),
        Err(Error::InvalidWeights)
    ));

    let record = book.load(&ctx, "AP Calc");
    assert_eq!(record.weights.summative, 60.0);
    assert_eq!(record.weights.formative, 40.0);
}

#[test]
fn test_invalid_assignment_blocked() {
    let (book, ctx) = seeded_gradebook();

    assert!(matches!(
        book.add_assignment(&ctx, "AP Calc", "  ", Category::Summative, 90.0),
        Err(Error::Validation(_))
    ));
    assert!(matches!(
        book.add_assignment(&ctx, "AP Calc", "Quiz", Category::Formative, 101.0),
        Err(Error::InvalidScore)
    ));
    assert!(matches!(
        book.add_assignment(&ctx, "AP Calc", "Quiz", Category::Formative, -0.5),
        Err(Error::InvalidScore)
    ));

    assert_eq!(book.load(&ctx, "AP Calc").assignments.len(), 3);
}

#[test]
fn test_delete_out_of_bounds_is_noop() {
    let (book, ctx) = seeded_gradebook();

    book.delete_assignment(&ctx, "AP Calc", 10).unwrap();
    book.delete_assignment(&ctx, "No Such Class", 0).unwrap();
    assert_eq!(book.load(&ctx, "AP Calc").assignments.len(), 3);

    book.delete_assignment(&ctx, "AP Calc", 0).unwrap();
    let record = book.load(&ctx, "AP Calc");
    assert_eq!(record.assignments.len(), 2);
    assert_eq!(record.assignments[0].name, "Unit 2 Test");
}

#[test]
fn test_clear_assignments_keeps_weights() {
    let (book, ctx) = seeded_gradebook();

    book.clear_assignments(&ctx, "AP Calc").unwrap();
    let record = book.load(&ctx, "AP Calc");
    assert!(record.assignments.is_empty());
    assert_eq!(record.weights.summative, 60.0);
}

#[test]
fn test_records_isolated_per_identity() {
    let local = local_store();
    let book = Gradebook::new(local);

    let alice = signed_in("alice");
    let guest = UserContext::guest();
    book.save_weights(&alice, "AP Calc", 70.0, 30.0).unwrap();
    book.save_weights(&guest, "AP Calc", 50.0, 50.0).unwrap();

    assert_eq!(book.load(&alice, "AP Calc").weights.summative, 70.0);
    assert_eq!(book.load(&guest, "AP Calc").weights.summative, 50.0);
    assert!(book.class_names(&signed_in("bob")).is_empty());
}

#[test]
fn test_class_names_sorted() {
    let book = Gradebook::new(local_store());
    let ctx = signed_in("alice");

    book.save_weights(&ctx, "Physics", 50.0, 50.0).unwrap();
    book.save_weights(&ctx, "AP Calc", 60.0, 40.0).unwrap();
    book.save_weights(&ctx, "History", 40.0, 60.0).unwrap();

    assert_eq!(book.class_names(&ctx), ["AP Calc", "History", "Physics"]);
}
