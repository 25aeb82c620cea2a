use crate::models::book::{Book, CreateBookRequest};
use crate::models::errors::ApiError;
use crate::models::responses::DeleteResponse;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
};

pub async fn list_books(State(state): State<AppState>) -> Result<Json<Vec<Book>>, ApiError> {
    let books = state.catalog.list().await?;
    Ok(Json(books))
}

pub async fn get_book(
    Path(book_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Book>, ApiError> {
    let book = state.catalog.get(&book_id).await?;
    Ok(Json(book))
}

pub async fn create_book(
    State(state): State<AppState>,
    payload: Result<Json<CreateBookRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Book>), ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        ApiError::Validation(format!("Invalid request body: {}", rejection.body_text()))
    })?;
    let book = state.catalog.create(&request).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

pub async fn delete_book(
    Path(book_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<DeleteResponse>, ApiError> {
    state.catalog.delete(&book_id).await?;
    Ok(Json(DeleteResponse {
        message: "Book deleted successfully".to_string(),
    }))
}
