use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::post};
use axum_helpers::{
    JsonBody, ValidatedJson,
    errors::responses::{
        BadRequestValidationResponse, InternalServerErrorResponse, NotFoundResponse,
        UnauthorizedResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::entity;
use crate::error::UserResult;
use crate::models::{CreateUser, TokenRequest, TokenResponse, UserResponse};
use crate::repository::UserRepository;
use crate::service::UserService;

/// OpenAPI documentation for Users API
#[derive(OpenApi)]
#[openapi(
    paths(create_user, generate_token),
    components(
        schemas(CreateUser, UserResponse, TokenRequest, TokenResponse),
        responses(
            BadRequestValidationResponse,
            NotFoundResponse,
            UnauthorizedResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = entity::Model::TAG, description = "Registration and access tokens")
    )
)]
pub struct ApiDoc;

/// Create the users router. Both routes are open.
pub fn router<R: UserRepository + 'static>(service: UserService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", post(create_user))
        .route("/generate_token", post(generate_token))
        .with_state(shared_service)
}

/// Register a new user
#[utoipa::path(
    post,
    path = "",
    tag = entity::Model::TAG,
    request_body = CreateUser,
    responses(
        (status = 201, description = "User registered", body = UserResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    JsonBody(input): JsonBody<CreateUser>,
) -> UserResult<impl IntoResponse> {
    let user = service.register(input).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// Exchange email and password for a bearer token
#[utoipa::path(
    post,
    path = "/generate_token",
    tag = entity::Model::TAG,
    request_body = TokenRequest,
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn generate_token<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ValidatedJson(input): ValidatedJson<TokenRequest>,
) -> UserResult<Json<TokenResponse>> {
    let access_token = service.generate_token(&input.email, &input.password).await?;
    Ok(Json(TokenResponse { access_token }))
}
