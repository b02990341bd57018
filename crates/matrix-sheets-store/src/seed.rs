//! Mock data for development servers
//!
//! One user (`nate` / `123baby`) owning `count` labelled 3x3 matrices.

use matrix_sheets_core::{Cell, Label, User};

use crate::auth::register_user;
use crate::error::StoreResult;
use crate::store::{MatrixContents, MatrixStore, NewMatrix};

pub const MOCK_USERNAME: &str = "nate";
pub const MOCK_PASSWORD: &str = "123baby";

const MOCK_SIZE: u32 = 3;

/// What [`seed_mock_data`] did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedSummary {
    pub user: User,
    pub created: usize,
    pub skipped: usize,
}

/// Contents of one mock matrix: cell `(r, c)` holds `text{c}{r}`
pub fn mock_contents() -> MatrixContents {
    let mut cells = Vec::new();
    let mut labels = Vec::new();

    for i in 0..MOCK_SIZE {
        for j in 0..MOCK_SIZE {
            cells.push(Cell::new(j, i, format!("text{i}{j}")));
        }
        labels.push(Label::column(i, format!("col{i}")));
        labels.push(Label::row(i, format!("row{i}")));
    }

    MatrixContents::new(cells, labels)
}

/// Create the mock user (if missing) and `count` mock matrices
///
/// Matrices whose slug already exists are skipped, so seeding a persistent
/// database twice does not fail.
pub fn seed_mock_data<S: MatrixStore + ?Sized>(store: &S, count: usize) -> StoreResult<SeedSummary> {
    let user = match store.user_credentials(MOCK_USERNAME)? {
        Some((user, _)) => user,
        None => register_user(store, MOCK_USERNAME, MOCK_PASSWORD)?,
    };

    let mut created = 0;
    let mut skipped = 0;
    for i in 0..count {
        let slug = format!("123123{i}");
        if store.matrix_by_slug(&slug)?.is_some() {
            skipped += 1;
            continue;
        }

        store.create_matrix(NewMatrix {
            name: format!("Matrix {i}"),
            slug,
            owner: user.id,
            contents: mock_contents(),
        })?;
        created += 1;
    }

    tracing::info!(created, skipped, user = %user.username, "Seeded mock matrices");
    Ok(SeedSummary {
        user,
        created,
        skipped,
    })
}
