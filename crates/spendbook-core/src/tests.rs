use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use spendbook_domain::ExpenseDraft;

use crate::{CoreError, DocumentStore, LedgerPaths, LedgerService};

#[derive(Default)]
struct MemoryInner {
    files: Mutex<HashMap<PathBuf, Value>>,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

/// In-memory document store whose state stays inspectable after it is
/// handed to a service.
#[derive(Clone, Default)]
struct MemoryStore {
    inner: Arc<MemoryInner>,
}

impl MemoryStore {
    fn with_document(self, path: &Path, document: Value) -> Self {
        self.inner
            .files
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), document);
        self
    }

    fn document(&self, path: &Path) -> Option<Value> {
        self.inner.files.lock().unwrap().get(path).cloned()
    }

    fn writes(&self) -> usize {
        self.inner.writes.load(Ordering::SeqCst)
    }

    fn fail_writes(&self, fail: bool) {
        self.inner.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl DocumentStore for MemoryStore {
    fn load(&self, path: &Path) -> Result<Value, CoreError> {
        Ok(self
            .document(path)
            .unwrap_or_else(|| Value::Object(Default::default())))
    }

    fn save(&self, document: &Value, path: &Path) -> Result<(), CoreError> {
        if self.inner.fail_writes.load(Ordering::SeqCst) {
            return Err(CoreError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only store",
            )));
        }
        self.inner.writes.fetch_add(1, Ordering::SeqCst);
        self.inner
            .files
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), document.clone());
        Ok(())
    }
}

fn paths() -> LedgerPaths {
    LedgerPaths::in_dir(Path::new("/data"))
}

fn open(store: &MemoryStore) -> LedgerService {
    LedgerService::open(Box::new(store.clone()), paths()).expect("open ledger")
}

fn draft(amount: Decimal) -> ExpenseDraft {
    ExpenseDraft::new("2024-01-05", amount, "food", "lunch")
}

#[test]
fn missing_documents_open_an_empty_ledger() {
    let store = MemoryStore::default();
    let service = open(&store);

    assert!(service.list_expenses().is_empty());
    assert_eq!(service.total_spent(), Decimal::ZERO);
    assert_eq!(service.budget(), None);
    assert_eq!(service.remaining_budget(), None);
    assert_eq!(store.writes(), 0);
}

#[test]
fn add_expense_appends_and_persists() {
    let store = MemoryStore::default();
    let mut service = open(&store);

    let position = service
        .add_expense(ExpenseDraft::new("2024-01-05", dec!(120.50), "food", "lunch"))
        .expect("add expense");

    assert_eq!(position, 0);
    assert_eq!(service.list_expenses().len(), 1);
    assert_eq!(service.total_spent(), dec!(120.50));

    let stored = store.document(&paths().expenses).expect("expenses saved");
    let records = stored["records"].as_array().expect("records array");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["date"], json!("2024-01-05"));
    assert_eq!(records[0]["amount"].to_string(), "120.50");
    assert_eq!(records[0]["category"], json!("food"));
    assert_eq!(records[0]["note"], json!("lunch"));
}

#[test]
fn add_expense_grows_count_and_total_by_exactly_the_amount() {
    let store = MemoryStore::default();
    let mut service = open(&store);

    for amount in [dec!(0), dec!(0.01), dec!(3.33), dec!(1000000.99), dec!(42)] {
        let before_len = service.list_expenses().len();
        let before_total = service.total_spent();

        service.add_expense(draft(amount)).expect("add expense");

        assert_eq!(service.list_expenses().len(), before_len + 1);
        assert_eq!(service.total_spent(), before_total + amount);
    }
}

#[test]
fn negative_amount_is_rejected_without_mutation() {
    let store = MemoryStore::default();
    let mut service = open(&store);
    service.add_expense(draft(dec!(10))).unwrap();
    let writes = store.writes();

    for amount in [dec!(-0.01), dec!(-1), dec!(-999.99)] {
        let err = service.add_expense(draft(amount)).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert!(err.is_user_error());
    }

    assert_eq!(service.list_expenses().len(), 1);
    assert_eq!(service.total_spent(), dec!(10));
    assert_eq!(store.writes(), writes);
}

#[test]
fn empty_category_and_note_are_accepted() {
    let store = MemoryStore::default();
    let mut service = open(&store);

    service
        .add_expense(ExpenseDraft::new("not a date", dec!(1), "", ""))
        .expect("free text fields");

    let record = &service.list_expenses()[0];
    assert_eq!(record.date, "not a date");
    assert_eq!(record.category, "");
    assert_eq!(record.note, "");
}

#[test]
fn update_expense_replaces_fields_in_place() {
    let store = MemoryStore::default();
    let mut service = open(&store);
    service.add_expense(draft(dec!(120.50))).unwrap();
    let id = service.list_expenses()[0].id;
    let writes = store.writes();

    service
        .update_expense(0, ExpenseDraft::new("2024-02-01", dec!(50), "transport", ""))
        .expect("update expense");

    let records = service.list_expenses();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, id);
    assert_eq!(records[0].date, "2024-02-01");
    assert_eq!(records[0].amount, dec!(50));
    assert_eq!(records[0].category, "transport");
    assert_eq!(records[0].note, "");
    assert_eq!(store.writes(), writes + 1);

    let stored = store.document(&paths().expenses).unwrap();
    assert_eq!(stored["records"][0]["category"], json!("transport"));
}

#[test]
fn update_expense_rejects_bad_index_and_negative_amount() {
    let store = MemoryStore::default();
    let mut service = open(&store);
    service.add_expense(draft(dec!(5))).unwrap();
    let writes = store.writes();

    let err = service.update_expense(1, draft(dec!(1))).unwrap_err();
    assert!(matches!(err, CoreError::IndexOutOfRange { index: 1, len: 1 }));

    let err = service.update_expense(0, draft(dec!(-1))).unwrap_err();
    assert!(matches!(err, CoreError::Validation(_)));

    assert_eq!(service.list_expenses()[0].amount, dec!(5));
    assert_eq!(store.writes(), writes);
}

#[test]
fn delete_expense_shifts_later_records_down() {
    let store = MemoryStore::default();
    let mut service = open(&store);
    for amount in [dec!(1), dec!(2), dec!(3)] {
        service.add_expense(draft(amount)).unwrap();
    }

    let removed = service.delete_expense(1).expect("delete expense");

    assert_eq!(removed.amount, dec!(2));
    let amounts: Vec<_> = service.list_expenses().iter().map(|r| r.amount).collect();
    assert_eq!(amounts, vec![dec!(1), dec!(3)]);
    assert_eq!(service.total_spent(), dec!(4));
    let stored = store.document(&paths().expenses).unwrap();
    assert_eq!(stored["records"].as_array().unwrap().len(), 2);
}

#[test]
fn repeated_delete_at_same_index_hits_a_different_record() {
    let store = MemoryStore::default();
    let mut service = open(&store);
    for amount in [dec!(1), dec!(2), dec!(3)] {
        service.add_expense(draft(amount)).unwrap();
    }

    let first = service.delete_expense(1).unwrap();
    let second = service.delete_expense(1).unwrap();
    assert_ne!(first.id, second.id);
    assert_eq!(second.amount, dec!(3));

    let err = service.delete_expense(1).unwrap_err();
    assert!(matches!(err, CoreError::IndexOutOfRange { index: 1, len: 1 }));
    assert_eq!(service.list_expenses().len(), 1);
}

#[test]
fn delete_on_empty_ledger_is_index_error() {
    let store = MemoryStore::default();
    let mut service = open(&store);

    let err = service.delete_expense(0).unwrap_err();

    assert!(matches!(err, CoreError::IndexOutOfRange { index: 0, len: 0 }));
    assert_eq!(store.writes(), 0);
}

#[test]
fn position_of_tracks_records_across_deletes() {
    let store = MemoryStore::default();
    let mut service = open(&store);
    service.add_expense(draft(dec!(1))).unwrap();
    service.add_expense(draft(dec!(2))).unwrap();
    let position = service.add_expense(draft(dec!(3))).unwrap();
    let id = service.expense(position).unwrap().id;

    service.delete_expense(0).unwrap();

    assert_eq!(service.position_of(id), Some(1));
    service.delete_expense(1).unwrap();
    assert_eq!(service.position_of(id), None);
}

#[test]
fn reads_are_idempotent() {
    let store = MemoryStore::default();
    let mut service = open(&store);
    service.add_expense(draft(dec!(7.25))).unwrap();
    service.add_expense(draft(dec!(2.75))).unwrap();

    let first_list = service.list_expenses().to_vec();
    let first_total = service.total_spent();
    for _ in 0..3 {
        assert_eq!(service.list_expenses(), first_list.as_slice());
        assert_eq!(service.total_spent(), first_total);
    }
}

#[test]
fn unset_budget_reports_no_remaining_even_with_records() {
    let store = MemoryStore::default();
    let mut service = open(&store);
    service.add_expense(draft(dec!(30))).unwrap();

    assert_eq!(service.budget(), None);
    assert_eq!(service.remaining_budget(), None);
}

#[test]
fn remaining_budget_subtracts_total_spent() {
    let store = MemoryStore::default();
    let mut service = open(&store);
    service.set_budget(dec!(1000)).expect("set budget");
    service.add_expense(draft(dec!(100))).unwrap();
    service.add_expense(draft(dec!(200))).unwrap();

    assert_eq!(service.remaining_budget(), Some(dec!(700)));
    assert_eq!(
        store.document(&paths().budget),
        Some(json!({ "monthly_budget": 1000 }))
    );
}

#[test]
fn overspend_is_a_negative_remaining_budget() {
    let store = MemoryStore::default();
    let mut service = open(&store);
    service.set_budget(dec!(100)).unwrap();
    service.add_expense(draft(dec!(150))).unwrap();

    let summary = service.summary();
    assert_eq!(summary.remaining, Some(dec!(-50)));
    assert!(summary.is_overspent());
}

#[test]
fn zero_budget_is_configured_but_has_no_remaining() {
    let store = MemoryStore::default();
    let mut service = open(&store);
    service.set_budget(Decimal::ZERO).unwrap();

    assert_eq!(service.budget(), Some(Decimal::ZERO));
    assert_eq!(service.remaining_budget(), None);
}

#[test]
fn add_expense_rejects_a_total_beyond_the_decimal_range() {
    let store = MemoryStore::default();
    let mut service = open(&store);
    let large = dec!(50000000000000000000000000000);
    service.add_expense(draft(large)).expect("first large amount fits");
    let writes = store.writes();

    let err = service.add_expense(draft(large)).unwrap_err();

    assert!(matches!(err, CoreError::Validation(_)));
    assert!(err.is_user_error());
    assert_eq!(service.list_expenses().len(), 1);
    assert_eq!(service.total_spent(), large);
    assert_eq!(store.writes(), writes);
}

#[test]
fn update_expense_rejects_a_total_beyond_the_decimal_range() {
    let store = MemoryStore::default();
    let mut service = open(&store);
    service.add_expense(draft(Decimal::MAX)).unwrap();
    service.add_expense(draft(Decimal::ZERO)).unwrap();

    let err = service.update_expense(1, draft(dec!(1))).unwrap_err();

    assert!(matches!(err, CoreError::Validation(_)));
    assert_eq!(service.list_expenses()[1].amount, Decimal::ZERO);
    assert_eq!(service.total_spent(), Decimal::MAX);

    service
        .update_expense(0, draft(dec!(1)))
        .expect("shrinking an amount is always allowed");
    service.update_expense(1, draft(dec!(1))).unwrap();
    assert_eq!(service.total_spent(), dec!(2));
}

#[test]
fn remaining_budget_saturates_for_hand_edited_negative_amounts() {
    let edited: Value = serde_json::from_str(
        r#"{ "records": [
            { "date": "2024-01-05", "amount": -50000000000000000000000000000, "category": "refund", "note": "" }
        ]}"#,
    )
    .unwrap();
    let store = MemoryStore::default().with_document(&paths().expenses, edited);
    let mut service = open(&store);
    service.set_budget(Decimal::MAX).unwrap();

    assert_eq!(service.remaining_budget(), Some(Decimal::MAX));
}

#[test]
fn high_precision_amounts_reopen_exactly() {
    let store = MemoryStore::default();
    let precise = dec!(0.1234567890123456789);
    {
        let mut service = open(&store);
        service.add_expense(draft(precise)).unwrap();
        service.set_budget(Decimal::MAX).unwrap();
    }

    let reopened = open(&store);

    assert_eq!(reopened.list_expenses()[0].amount, precise);
    assert_eq!(reopened.total_spent(), precise);
    assert_eq!(reopened.budget(), Some(Decimal::MAX));
}

#[test]
fn maximal_amount_reopens_exactly() {
    let store = MemoryStore::default();
    open(&store).add_expense(draft(Decimal::MAX)).unwrap();

    let reopened = open(&store);

    assert_eq!(reopened.total_spent(), Decimal::MAX);
    let stored = store.document(&paths().expenses).unwrap();
    assert_eq!(
        stored["records"][0]["amount"].to_string(),
        "79228162514264337593543950335"
    );
}

#[test]
fn negative_budget_is_rejected() {
    let store = MemoryStore::default();
    let mut service = open(&store);
    service.set_budget(dec!(200)).unwrap();

    let err = service.set_budget(dec!(-1)).unwrap_err();

    assert!(matches!(err, CoreError::Validation(_)));
    assert_eq!(service.budget(), Some(dec!(200)));
}

#[test]
fn failed_persist_leaves_state_untouched() {
    let store = MemoryStore::default();
    let mut service = open(&store);
    service.add_expense(draft(dec!(10))).unwrap();
    service.set_budget(dec!(50)).unwrap();
    let before = service.list_expenses().to_vec();
    store.fail_writes(true);

    let errors = [
        service.add_expense(draft(dec!(1))).unwrap_err(),
        service.update_expense(0, draft(dec!(99))).unwrap_err(),
        service.delete_expense(0).unwrap_err(),
        service.set_budget(dec!(75)).unwrap_err(),
    ];

    for err in &errors {
        assert!(matches!(err, CoreError::Io(_)));
        assert!(!err.is_user_error());
    }
    assert_eq!(service.list_expenses(), before.as_slice());
    assert_eq!(service.total_spent(), dec!(10));
    assert_eq!(service.budget(), Some(dec!(50)));

    store.fail_writes(false);
    service.add_expense(draft(dec!(1))).expect("retry after recovery");
    assert_eq!(service.list_expenses().len(), 2);
}

#[test]
fn open_loads_existing_documents() {
    let store = MemoryStore::default()
        .with_document(
            &paths().expenses,
            json!({ "records": [
                { "date": "2024-01-05", "amount": 120.5, "category": "餐飲", "note": "午餐" },
                { "date": "2024-01-06", "amount": 30, "category": "交通", "note": "" }
            ]}),
        )
        .with_document(&paths().budget, json!({ "monthly_budget": 500 }));

    let service = open(&store);

    assert_eq!(service.list_expenses().len(), 2);
    assert_eq!(service.list_expenses()[0].category, "餐飲");
    assert_eq!(service.total_spent(), dec!(150.5));
    assert_eq!(service.remaining_budget(), Some(dec!(349.5)));
}

#[test]
fn wrongly_shaped_document_is_a_parse_error() {
    let store =
        MemoryStore::default().with_document(&paths().expenses, json!({ "records": "oops" }));

    let err = LedgerService::open(Box::new(store), paths())
        .err()
        .expect("open should fail");

    assert!(matches!(err, CoreError::Parse(_)));
    assert!(!err.is_user_error());
}
