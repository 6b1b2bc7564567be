use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{Credentials, LoginResponse, PublicUser, RegisteredUser, SignupResponse},
        error::ApiError,
        password::{hash_password_blocking, verify_password_blocking, verify_unknown_user_blocking},
    },
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/signup", post(signup))
}

fn credentials(payload: Result<Json<Credentials>, JsonRejection>) -> Result<Credentials, ApiError> {
    let Json(creds) = payload.map_err(|e| {
        warn!(error = %e, "unreadable credentials body");
        ApiError::MissingCredentials
    })?;
    if !creds.is_complete() {
        warn!("credentials missing username or password");
        return Err(ApiError::MissingCredentials);
    }
    Ok(creds)
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let creds = credentials(payload)?;

    // Unknown user and wrong password share one response and the same argon2 cost.
    let Some(user) = state.users.find_by_username(&creds.username).await? else {
        warn!(username = %creds.username, "login unknown username");
        verify_unknown_user_blocking(creds.password).await?;
        return Err(ApiError::InvalidCredentials);
    };

    let ok = verify_password_blocking(creds.password, user.password_hash).await?;
    if !ok {
        warn!(user_id = user.id, "login invalid password");
        return Err(ApiError::InvalidCredentials);
    }

    info!(user_id = user.id, username = %user.username, "user logged in");
    Ok(Json(LoginResponse {
        message: "Login successful",
        user: PublicUser {
            id: user.id,
            username: user.username,
        },
    }))
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<(StatusCode, Json<SignupResponse>), ApiError> {
    let creds = credentials(payload)?;

    let hash = hash_password_blocking(creds.password).await?;

    // The unique constraint on username decides duplicates; no prior read.
    let user_id = match state.users.insert_user(&creds.username, &hash).await {
        Ok(id) => id,
        Err(e) => {
            let err = ApiError::from(e);
            if matches!(err, ApiError::UsernameTaken) {
                warn!(username = %creds.username, "username already taken");
            }
            return Err(err);
        }
    };

    info!(user_id, username = %creds.username, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            message: "User registered successfully",
            user: RegisteredUser {
                username: creds.username,
                user_id,
            },
        }),
    ))
}
