//! The same behaviour checks run against every store backend

use matrix_sheets_core::{assemble, Cell, Label, MatrixId, UserId};
use matrix_sheets_store::{
    authenticate, register_user, seed_mock_data, MatrixContents, MatrixStore, MemoryStore,
    NewMatrix, SqliteStore, StoreError,
};
use pretty_assertions::assert_eq;

fn contents(values: &[&[&str]]) -> MatrixContents {
    let cells = values
        .iter()
        .enumerate()
        .flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .map(move |(c, v)| Cell::new(r as u32, c as u32, *v))
        })
        .collect();
    MatrixContents::new(cells, vec![Label::row(0, "first"), Label::column(0, "x")])
}

fn new_matrix(owner: UserId, name: &str, slug: &str) -> NewMatrix {
    NewMatrix {
        name: name.to_string(),
        slug: slug.to_string(),
        owner,
        contents: contents(&[&["a", "b"], &["c", "d"]]),
    }
}

fn check_users(store: &dyn MatrixStore) {
    let user = register_user(store, "ann", "secret").unwrap();
    assert_eq!(store.user(user.id).unwrap(), Some(user.clone()));
    assert_eq!(store.user(UserId(9999)).unwrap(), None);

    assert!(matches!(
        register_user(store, "ann", "other"),
        Err(StoreError::Conflict(_))
    ));

    assert_eq!(authenticate(store, "ann", "secret").unwrap(), Some(user));
    assert_eq!(authenticate(store, "ann", "nope").unwrap(), None);
}

fn check_matrix_lifecycle(store: &dyn MatrixStore) {
    let owner = register_user(store, "owner", "pw").unwrap();
    let other = register_user(store, "other", "pw").unwrap();

    let zeta = store.create_matrix(new_matrix(owner.id, "Zeta", "z")).unwrap();
    let alpha = store.create_matrix(new_matrix(owner.id, "Alpha", "a")).unwrap();
    let theirs = store.create_matrix(new_matrix(other.id, "Mid", "m")).unwrap();

    let names: Vec<String> = store.matrices().unwrap().into_iter().map(|m| m.name).collect();
    assert_eq!(names, vec!["Alpha", "Mid", "Zeta"]);

    let mine: Vec<MatrixId> = store
        .matrices_for_user(owner.id)
        .unwrap()
        .into_iter()
        .map(|m| m.id)
        .collect();
    assert_eq!(mine, vec![alpha.id, zeta.id]);

    assert_eq!(store.matrix(theirs.id).unwrap(), Some(theirs.clone()));
    assert_eq!(store.matrix_by_slug("z").unwrap(), Some(zeta.clone()));

    let stored = store.contents(alpha.id).unwrap();
    let out = assemble(&stored.cells, &stored.labels).unwrap();
    assert_eq!(out.grid, vec![vec!["a", "b"], vec!["c", "d"]]);
    assert_eq!(out.row_labels, vec!["first"]);

    // Slugs are unique, owners must exist
    assert!(matches!(
        store.create_matrix(new_matrix(owner.id, "Again", "z")),
        Err(StoreError::Conflict(_))
    ));
    assert!(matches!(
        store.create_matrix(new_matrix(UserId(4242), "Orphan", "o")),
        Err(StoreError::NotFound { kind: "user", .. })
    ));

    let renamed = store
        .replace_matrix(zeta.id, Some("Beta"), contents(&[&["only"]]))
        .unwrap();
    assert_eq!(renamed.name, "Beta");
    let stored = store.contents(zeta.id).unwrap();
    assert_eq!(assemble(&stored.cells, &stored.labels).unwrap().grid, vec![vec!["only"]]);

    let kept_name = store
        .replace_matrix(zeta.id, None, contents(&[&["x", "y"]]))
        .unwrap();
    assert_eq!(kept_name.name, "Beta");

    store.delete_matrix(zeta.id).unwrap();
    assert_eq!(store.matrix(zeta.id).unwrap(), None);
    assert!(store.cells(zeta.id).unwrap().is_empty());
    assert!(store.labels(zeta.id).unwrap().is_empty());
    assert!(matches!(
        store.delete_matrix(zeta.id),
        Err(StoreError::NotFound { kind: "matrix", .. })
    ));
    assert!(matches!(
        store.replace_matrix(zeta.id, None, MatrixContents::default()),
        Err(StoreError::NotFound { .. })
    ));
}

fn check_seed(store: &dyn MatrixStore) {
    let summary = seed_mock_data(store, 12).unwrap();
    assert_eq!(summary.created, 12);

    // Ordered by name as strings: "Matrix 0", "Matrix 1", "Matrix 10", ...
    let names: Vec<String> = store
        .matrices()
        .unwrap()
        .into_iter()
        .take(4)
        .map(|m| m.name)
        .collect();
    assert_eq!(names, vec!["Matrix 0", "Matrix 1", "Matrix 10", "Matrix 11"]);

    for matrix in store.matrices().unwrap() {
        let stored = store.contents(matrix.id).unwrap();
        let out = assemble(&stored.cells, &stored.labels).unwrap();
        assert_eq!((out.rows(), out.cols()), (3, 3));
    }
}

#[test]
fn memory_store_users() {
    check_users(&MemoryStore::new());
}

#[test]
fn memory_store_matrix_lifecycle() {
    check_matrix_lifecycle(&MemoryStore::new());
}

#[test]
fn memory_store_seed() {
    check_seed(&MemoryStore::new());
}

#[test]
fn sqlite_store_users() {
    check_users(&SqliteStore::open_in_memory().unwrap());
}

#[test]
fn sqlite_store_matrix_lifecycle() {
    check_matrix_lifecycle(&SqliteStore::open_in_memory().unwrap());
}

#[test]
fn sqlite_store_seed() {
    check_seed(&SqliteStore::open_in_memory().unwrap());
}

#[test]
fn sqlite_store_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("matrices.db");

    {
        let store = SqliteStore::open(&path).unwrap();
        seed_mock_data(&store, 2).unwrap();
    }

    let store = SqliteStore::open(&path).unwrap();
    assert_eq!(store.matrices().unwrap().len(), 2);
    assert!(authenticate(&store, "nate", "123baby").unwrap().is_some());

    let again = seed_mock_data(&store, 2).unwrap();
    assert_eq!((again.created, again.skipped), (0, 2));
}
