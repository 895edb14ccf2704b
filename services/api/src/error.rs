use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use propelty_domain::password::PasswordIssue;
use validator::ValidationErrors;

/// API service error variants.
#[derive(Debug, thiserror::Error)]
pub enum ApiServiceError {
    #[error("user not found")]
    UserNotFound,
    #[error("user already exists")]
    UserAlreadyExists,
    #[error("invalid email")]
    InvalidEmail,
    #[error("invalid timezone")]
    InvalidTimezone,
    #[error(
        "invalid password: {}",
        .0.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
    )]
    InvalidPassword(Vec<PasswordIssue>),
    #[error("invalid input: {0}")]
    InvalidInput(ValidationErrors),
    #[error("missing data")]
    MissingData,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("authentication required")]
    Unauthenticated,
    #[error("account deactivated")]
    AccountDeactivated,
    #[error("forbidden")]
    Forbidden,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl ApiServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::UserAlreadyExists => "USER_ALREADY_EXISTS",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::InvalidTimezone => "INVALID_TIMEZONE",
            Self::InvalidPassword(_) => "INVALID_PASSWORD",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::MissingData => "MISSING_DATA",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::AccountDeactivated => "ACCOUNT_DEACTIVATED",
            Self::Forbidden => "FORBIDDEN",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::UserNotFound => StatusCode::NOT_FOUND,
            Self::UserAlreadyExists => StatusCode::CONFLICT,
            Self::InvalidEmail
            | Self::InvalidTimezone
            | Self::InvalidPassword(_)
            | Self::InvalidInput(_)
            | Self::MissingData => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials | Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::AccountDeactivated | Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Email and timezone failures keep their own kinds; anything else is `INVALID_INPUT`.
impl From<ValidationErrors> for ApiServiceError {
    fn from(errors: ValidationErrors) -> Self {
        let fields = errors.errors();
        if fields.contains_key("email") {
            Self::InvalidEmail
        } else if fields.contains_key("user_timezone") {
            Self::InvalidTimezone
        } else {
            Self::InvalidInput(errors)
        }
    }
}

impl IntoResponse for ApiServiceError {
    fn into_response(self) -> Response {
        // 4xx are expected client errors and already visible in the trace layer.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = ?e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (self.status(), axum::Json(body)).into_response()
    }
}
