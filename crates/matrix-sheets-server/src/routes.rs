//! Route table and request handlers

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::routing::{any, get, post};
use axum::{Json, Router};
use matrix_sheets::{
    authenticate, AssembledGrid, Error, MatrixId, MatrixStore, MatrixView, StoreExt, UserId,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::state::AppState;

/// Build the `/api` router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api", get(index))
        .route("/api/auth", post(auth))
        .route("/api/matrix", get(list_matrices).post(create_matrix))
        .route(
            "/api/matrix/:id",
            get(get_matrix).put(update_matrix).delete(delete_matrix),
        )
        .route("/api/user/:user_id/matrix", get(list_user_matrices))
        .route(
            "/api/user/:user_id/matrix/:matrix_id",
            get(get_user_matrix),
        )
        .route("/api/*rest", any(nada))
        .with_state(state)
}

async fn index() -> Json<Value> {
    Json(json!({
        "auth": "POST /api/auth",
        "matrix": "GET, POST /api/matrix, GET, PUT, DELETE /api/matrix/:id",
        "user/:id/matrix/(:id)": "GET /api/user/:id/matrix/(:id)",
    }))
}

async fn nada(uri: Uri) -> (StatusCode, Json<&'static str>) {
    tracing::debug!(%uri, "No such resource");
    (StatusCode::NOT_FOUND, Json("nada"))
}

#[derive(Debug, Deserialize)]
pub struct AuthRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthResponse {
    pub message: String,
    pub username: String,
}

async fn auth(
    State(state): State<AppState>,
    body: Result<Json<AuthRequest>, JsonRejection>,
) -> Result<Json<AuthResponse>, ApiError> {
    let Json(req) = body?;
    let username = req.username.clone();
    let user = state
        .run(move |store, _| authenticate(store, &req.username, &req.password))
        .await?;

    match user {
        Some(user) => {
            tracing::info!(username = %user.username, "Authenticated");
            Ok(Json(AuthResponse {
                message: "Welcome :)".into(),
                username: user.username,
            }))
        }
        None => {
            tracing::warn!(%username, "Rejected credentials");
            Err(ApiError::Unauthorized)
        }
    }
}

async fn list_matrices(State(state): State<AppState>) -> Result<Json<Vec<MatrixView>>, ApiError> {
    let views = state.run(|store, assembler| store.views(assembler)).await?;
    tracing::debug!(count = views.len(), "Listed matrices");
    Ok(Json(views))
}

async fn get_matrix(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MatrixView>, ApiError> {
    let id = MatrixId(id);
    state
        .run(move |store, assembler| store.view(id, assembler))
        .await?
        .map(Json)
        .ok_or_else(|| matrix_not_found(id))
}

/// Body of `POST /api/matrix`
#[derive(Debug, Deserialize)]
pub struct CreateMatrix {
    pub owner: UserId,
    pub name: String,
    /// Derived from `name` when omitted
    #[serde(default)]
    pub slug: Option<String>,
    pub grid: Vec<Vec<String>>,
    #[serde(default)]
    pub row_names: Vec<String>,
    #[serde(default)]
    pub col_names: Vec<String>,
}

async fn create_matrix(
    State(state): State<AppState>,
    body: Result<Json<CreateMatrix>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = body?;
    let slug = req.slug.clone().unwrap_or_else(|| slugify(&req.name));
    if slug.is_empty() {
        return Err(ApiError::Unprocessable(format!(
            "no slug given and none can be derived from name '{}'",
            req.name
        )));
    }
    let grid = AssembledGrid {
        grid: req.grid,
        row_labels: req.row_names,
        col_labels: req.col_names,
    };
    let (owner, name) = (req.owner, req.name);

    let (id, view) = state
        .run(move |store, assembler| -> Result<_, Error> {
            let matrix = store.create_from_grid(owner, &name, &slug, &grid)?;
            let view = store.assemble_matrix(&matrix, assembler)?;
            Ok((matrix.id, view))
        })
        .await?;

    tracing::info!(matrix_id = %id, "Created matrix");
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/api/matrix/{id}"))],
        Json(view),
    ))
}

/// Body of `PUT /api/matrix/:id`
#[derive(Debug, Deserialize)]
pub struct UpdateMatrix {
    #[serde(default)]
    pub name: Option<String>,
    pub grid: Vec<Vec<String>>,
    #[serde(default)]
    pub row_names: Vec<String>,
    #[serde(default)]
    pub col_names: Vec<String>,
}

async fn update_matrix(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    body: Result<Json<UpdateMatrix>, JsonRejection>,
) -> Result<Json<MatrixView>, ApiError> {
    let Json(req) = body?;
    let id = MatrixId(id);
    let grid = AssembledGrid {
        grid: req.grid,
        row_labels: req.row_names,
        col_labels: req.col_names,
    };
    let name = req.name;

    let view = state
        .run(move |store, assembler| -> Result<_, Error> {
            let matrix = store.replace_grid(id, name.as_deref(), &grid)?;
            store.assemble_matrix(&matrix, assembler)
        })
        .await?;

    tracing::info!(matrix_id = %id, "Replaced matrix");
    Ok(Json(view))
}

async fn delete_matrix(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let id = MatrixId(id);
    state.run(move |store, _| store.delete_matrix(id)).await?;
    tracing::info!(matrix_id = %id, "Deleted matrix");
    Ok(StatusCode::NO_CONTENT)
}

async fn list_user_matrices(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<MatrixView>>, ApiError> {
    let owner = UserId(user_id);
    let views = state
        .run(move |store, assembler| -> Result<_, ApiError> {
            require_user(store, owner)?;
            Ok(store.user_views(owner, assembler)?)
        })
        .await?;
    Ok(Json(views))
}

async fn get_user_matrix(
    State(state): State<AppState>,
    Path((user_id, matrix_id)): Path<(i64, i64)>,
) -> Result<Json<MatrixView>, ApiError> {
    let owner = UserId(user_id);
    let id = MatrixId(matrix_id);
    let view = state
        .run(move |store, assembler| -> Result<_, ApiError> {
            require_user(store, owner)?;
            match store.matrix(id)? {
                Some(matrix) if matrix.owner == owner => {
                    Ok(store.assemble_matrix(&matrix, assembler)?)
                }
                _ => Err(matrix_not_found(id)),
            }
        })
        .await?;
    Ok(Json(view))
}

fn require_user(store: &dyn MatrixStore, id: UserId) -> Result<(), ApiError> {
    match store.user(id)? {
        Some(_) => Ok(()),
        None => Err(ApiError::NotFound(format!("user {id} not found"))),
    }
}

fn matrix_not_found(id: MatrixId) -> ApiError {
    ApiError::NotFound(format!("matrix {id} not found"))
}

/// Lowercase ASCII alphanumerics joined by single dashes
fn slugify(name: &str) -> String {
    name.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Matrix 12"), "matrix-12");
        assert_eq!(slugify("  Q3 -- Sales! "), "q3-sales");
        assert_eq!(slugify("***"), "");
    }
}
