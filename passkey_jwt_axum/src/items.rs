use axum::{
    Json,
    extract::Path,
    routing::{Router, get},
};
use http::StatusCode;
use serde::Deserialize;

use passkey_jwt::{
    Item, create_item_core, delete_item_core, get_item_core, list_items_core, update_item_core,
};

use crate::auth::AuthUser;
use crate::error::{ApiError, IntoResponseError};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_items).post(create_item))
        .route(
            "/{item_id}",
            get(get_item).put(update_item).delete(delete_item),
        )
}

#[derive(Deserialize)]
pub(crate) struct ItemRequest {
    pub name: String,
    pub description: Option<String>,
}

pub(crate) async fn create_item(
    user: AuthUser,
    Json(request): Json<ItemRequest>,
) -> Result<(StatusCode, Json<Item>), ApiError> {
    let item = create_item_core(&user.id, &request.name, request.description.as_deref())
        .await
        .into_response_error()?;

    Ok((StatusCode::CREATED, Json(item)))
}

pub(crate) async fn list_items(user: AuthUser) -> Result<Json<Vec<Item>>, ApiError> {
    let items = list_items_core(&user.id).await.into_response_error()?;

    Ok(Json(items))
}

pub(crate) async fn get_item(
    user: AuthUser,
    Path(item_id): Path<String>,
) -> Result<Json<Item>, ApiError> {
    let item = get_item_core(&user.id, &item_id)
        .await
        .into_response_error()?;

    Ok(Json(item))
}

pub(crate) async fn update_item(
    user: AuthUser,
    Path(item_id): Path<String>,
    Json(request): Json<ItemRequest>,
) -> Result<Json<Item>, ApiError> {
    let item = update_item_core(
        &user.id,
        &item_id,
        &request.name,
        request.description.as_deref(),
    )
    .await
    .into_response_error()?;

    Ok(Json(item))
}

pub(crate) async fn delete_item(
    user: AuthUser,
    Path(item_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    delete_item_core(&user.id, &item_id)
        .await
        .into_response_error()?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use http::{Request, header};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Body should be readable")
            .to_bytes();
        serde_json::from_slice(&bytes).expect("Body should be JSON")
    }

    #[tokio::test]
    async fn test_missing_bearer_token_is_unauthorized() {
        let response = router()
            .oneshot(
                Request::builder()
                    .uri("/")
                    .body(Body::empty())
                    .expect("Request should build"),
            )
            .await
            .expect("Request should complete");

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let json = body_json(response).await;
        assert_eq!(json["error"], "Missing bearer token");
        // Nothing beyond the error message leaks
        assert_eq!(json.as_object().map(|o| o.len()), Some(1));
    }

    #[tokio::test]
    async fn test_malformed_authorization_header_is_unauthorized() {
        let response = router()
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header(header::AUTHORIZATION, "Basic bm90LWEtdG9rZW4")
                    .body(Body::empty())
                    .expect("Request should build"),
            )
            .await
            .expect("Request should complete");

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let json = body_json(response).await;
        assert_eq!(json["error"], "Missing bearer token");
        assert_eq!(json.as_object().map(|o| o.len()), Some(1));
    }
}
