use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use propelty_auth_types::cookie::{clear_session_cookie, session_key, set_session_cookie};

use crate::domain::types::ClientMeta;
use crate::error::ApiServiceError;
use crate::handlers::extract::{AdminSession, CurrentSession};
use crate::handlers::user::UserResponse;
use crate::state::AppState;
use crate::usecase::auth::{
    SignInInput, SignInUseCase, SignOutUseCase, SignUpInput, SignUpUseCase,
};

// ── POST /auth/sign-up ───────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub display_name: Option<String>,
    pub user_timezone: Option<String>,
}

pub async fn sign_up(
    State(state): State<AppState>,
    Json(body): Json<SignUpRequest>,
) -> Result<impl IntoResponse, ApiServiceError> {
    let usecase = SignUpUseCase {
        repo: state.user_repo(),
        hasher: state.hasher(),
        policy: state.password_policy.clone(),
    };
    let user = usecase
        .execute(SignUpInput {
            email: body.email,
            password: body.password,
            username: body.username,
            first_name: body.first_name,
            last_name: body.last_name,
            display_name: body.display_name,
            user_timezone: body.user_timezone,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

// ── POST /auth/sign-in, POST /auth/admin/sign-in ─────────────────────────────

#[derive(Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

pub async fn sign_in(
    State(state): State<AppState>,
    meta: ClientMeta,
    jar: CookieJar,
    Json(body): Json<SignInRequest>,
) -> Result<impl IntoResponse, ApiServiceError> {
    let policy = &state.settings.session_cookie;
    let usecase = SignInUseCase {
        users: state.user_repo(),
        hasher: state.hasher(),
        sessions: state.session_store(),
        session_ttl_secs: policy.max_age_secs,
        require_staff: false,
    };
    let out = usecase
        .execute(SignInInput {
            email: body.email,
            password: body.password,
            meta,
            previous_session: session_key(&jar, policy),
        })
        .await?;

    let jar = set_session_cookie(jar, policy, out.session_key);
    Ok((jar, Json(UserResponse::from(out.user))))
}

pub async fn admin_sign_in(
    State(state): State<AppState>,
    meta: ClientMeta,
    jar: CookieJar,
    Json(body): Json<SignInRequest>,
) -> Result<impl IntoResponse, ApiServiceError> {
    let policy = &state.settings.admin_session_cookie;
    let usecase = SignInUseCase {
        users: state.user_repo(),
        hasher: state.hasher(),
        sessions: state.admin_session_store(),
        session_ttl_secs: policy.max_age_secs,
        require_staff: true,
    };
    let out = usecase
        .execute(SignInInput {
            email: body.email,
            password: body.password,
            meta,
            previous_session: session_key(&jar, policy),
        })
        .await?;

    let jar = set_session_cookie(jar, policy, out.session_key);
    Ok((jar, Json(UserResponse::from(out.user))))
}

// ── POST /auth/sign-out ──────────────────────────────────────────────────────

pub async fn sign_out(
    State(state): State<AppState>,
    session: CurrentSession,
    meta: ClientMeta,
    jar: CookieJar,
) -> Result<impl IntoResponse, ApiServiceError> {
    let usecase = SignOutUseCase {
        users: state.user_repo(),
        sessions: state.session_store(),
    };
    usecase
        .execute(session.user_id, &session.session_key, &meta)
        .await?;

    let jar = clear_session_cookie(jar, &state.settings.session_cookie);
    Ok((StatusCode::NO_CONTENT, jar))
}

// ── POST /auth/admin/sign-out ────────────────────────────────────────────────

pub async fn admin_sign_out(
    State(state): State<AppState>,
    session: AdminSession,
    meta: ClientMeta,
    jar: CookieJar,
) -> Result<impl IntoResponse, ApiServiceError> {
    let usecase = SignOutUseCase {
        users: state.user_repo(),
        sessions: state.admin_session_store(),
    };
    usecase
        .execute(session.user_id, &session.session_key, &meta)
        .await?;

    let jar = clear_session_cookie(jar, &state.settings.admin_session_cookie);
    Ok((StatusCode::NO_CONTENT, jar))
}
