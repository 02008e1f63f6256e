use crate::application::access::Actor;
use crate::application::ports::account_repository::Account;
use crate::application::use_cases::auth::login::{Login as LoginUc, LoginRequest as LoginDto};
use crate::application::use_cases::auth::me::GetMe;
use crate::application::use_cases::auth::register::{
    Register as RegisterUc, RegisterError, RegisterRequest as RegisterDto,
};
use crate::bootstrap::app_context::AppContext;
use crate::bootstrap::config::Config;
use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::{get, post},
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub email: String,
    pub name: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub name: String,
}

impl From<Account> for UserResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            email: account.email,
            name: account.name,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: UserResponse,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(me))
        .with_state(ctx)
}

#[utoipa::path(post, path = "/api/auth/register", tag = "Auth", request_body = RegisterRequest, security(()), responses(
    (status = 200, body = UserResponse),
    (status = 400, description = "Malformed email, empty name or short password"),
    (status = 409, description = "Email already registered")
))]
pub async fn register(
    State(ctx): State<AppContext>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<UserResponse>, StatusCode> {
    let repo = ctx.account_repo();
    let uc = RegisterUc {
        repo: repo.as_ref(),
    };
    let dto = RegisterDto {
        email: req.email,
        name: req.name,
        password: req.password,
    };
    let account = uc.execute(&dto).await.map_err(|e| match e {
        RegisterError::Invalid(field) => {
            tracing::debug!(field, "register_rejected");
            StatusCode::BAD_REQUEST
        }
        RegisterError::Conflict => StatusCode::CONFLICT,
        RegisterError::Hash(err) => {
            tracing::error!(error = ?err, "register_hash_failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
        RegisterError::Store(err) => {
            tracing::error!(error = ?err, "register_store_failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    })?;
    tracing::info!(user_id = %account.id, "user_registered");
    Ok(Json(account.into()))
}

#[utoipa::path(post, path = "/api/auth/login", tag = "Auth", request_body = LoginRequest, security(()), responses(
    (status = 200, body = LoginResponse),
    (status = 401, description = "Unknown email or wrong password")
))]
pub async fn login(
    State(ctx): State<AppContext>,
    Json(req): Json<LoginRequest>,
) -> Result<(HeaderMap, Json<LoginResponse>), StatusCode> {
    let repo = ctx.account_repo();
    let uc = LoginUc {
        repo: repo.as_ref(),
    };
    let dto = LoginDto {
        email: req.email,
        password: req.password,
    };
    let user: UserResponse = uc
        .execute(&dto)
        .await
        .map_err(|e| {
            tracing::error!(error = ?e, "login_failed");
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .ok_or(StatusCode::UNAUTHORIZED)?
        .into();
    let token = issue_token(&ctx.cfg, user.id).map_err(|e| {
        tracing::error!(error = ?e, "token_encode_failed");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    // Set HttpOnly cookie with the access token
    let mut headers = HeaderMap::new();
    let cookie = build_access_cookie(&token, ctx.cfg.jwt_expires_secs, secure_cookies(&ctx.cfg));
    headers.insert(
        axum::http::header::SET_COOKIE,
        axum::http::HeaderValue::from_str(&cookie)
            .unwrap_or(axum::http::HeaderValue::from_static("")),
    );

    Ok((
        headers,
        Json(LoginResponse {
            access_token: token,
            user,
        }),
    ))
}

#[utoipa::path(get, path = "/api/auth/me", tag = "Auth", responses(
    (status = 200, body = UserResponse),
    (status = 401, description = "Missing or invalid token")
))]
pub async fn me(
    State(ctx): State<AppContext>,
    bearer: Result<Bearer, StatusCode>,
) -> Result<Json<UserResponse>, StatusCode> {
    let id = require_user(&ctx.cfg, bearer?)?;
    let repo = ctx.account_repo();
    let uc = GetMe {
        repo: repo.as_ref(),
    };
    let account = uc
        .execute(id)
        .await
        .map_err(|e| {
            tracing::error!(error = ?e, "me_lookup_failed");
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .ok_or(StatusCode::UNAUTHORIZED)?;
    Ok(Json(account.into()))
}

#[utoipa::path(post, path = "/api/auth/logout", tag = "Auth", responses((status = 204)))]
pub async fn logout(State(ctx): State<AppContext>) -> Result<(HeaderMap, StatusCode), StatusCode> {
    // Clear cookie by setting it expired
    let mut headers = HeaderMap::new();
    let cookie = build_access_cookie("", 0, secure_cookies(&ctx.cfg));
    headers.insert(
        axum::http::header::SET_COOKIE,
        axum::http::HeaderValue::from_str(&cookie)
            .unwrap_or(axum::http::HeaderValue::from_static("")),
    );
    Ok((headers, StatusCode::NO_CONTENT))
}

// --- Bearer extractor & JWT utils ---
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

pub struct Bearer(pub String);

#[axum::async_trait]
impl<S> FromRequestParts<S> for Bearer
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // 1) Prefer Authorization header if present
        if let Some(auth) = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
        {
            if let Some(t) = auth.strip_prefix("Bearer ") {
                return Ok(Bearer(t.to_string()));
            }
        }

        // 2) Fallback to HttpOnly cookie `access_token`
        if let Some(cookie_hdr) = parts
            .headers
            .get(axum::http::header::COOKIE)
            .and_then(|v| v.to_str().ok())
        {
            if let Some(token) = get_cookie(cookie_hdr, "access_token") {
                return Ok(Bearer(token));
            }
        }

        Err(StatusCode::UNAUTHORIZED)
    }
}

pub(crate) fn issue_token(cfg: &Config, user_id: Uuid) -> jsonwebtoken::errors::Result<String> {
    let now = chrono::Utc::now().timestamp() as usize;
    let claims = Claims {
        sub: user_id.to_string(),
        exp: now + (cfg.jwt_expires_secs.max(0) as usize),
    };
    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(cfg.jwt_secret_pem.as_bytes()),
    )
}

pub(crate) fn validate_bearer(cfg: &Config, bearer: Bearer) -> Result<String, StatusCode> {
    let data = jsonwebtoken::decode::<Claims>(
        &bearer.0,
        &DecodingKey::from_secret(cfg.jwt_secret_pem.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| StatusCode::UNAUTHORIZED)?;
    Ok(data.claims.sub)
}

/// The authenticated principal, or 401.
pub fn require_user(cfg: &Config, bearer: Bearer) -> Result<Uuid, StatusCode> {
    let sub = validate_bearer(cfg, bearer)?;
    Uuid::parse_str(&sub).map_err(|_| StatusCode::UNAUTHORIZED)
}

/// Missing or invalid credentials resolve to an anonymous actor.
pub fn resolve_actor(cfg: &Config, bearer: Option<Bearer>) -> Actor {
    bearer
        .and_then(|b| require_user(cfg, b).ok())
        .map(Actor::User)
        .unwrap_or(Actor::Anonymous)
}

// --- Cookie helpers ---

fn secure_cookies(cfg: &Config) -> bool {
    cfg.frontend_url
        .as_deref()
        .is_some_and(|u| u.starts_with("https://"))
}

fn get_cookie(cookie_header: &str, name: &str) -> Option<String> {
    for part in cookie_header.split(';') {
        let kv = part.trim();
        if let Some((k, v)) = kv.split_once('=') {
            if k.trim() == name {
                return Some(v.trim().to_string());
            }
        }
    }
    None
}

fn build_access_cookie(token: &str, max_age_secs: i64, secure: bool) -> String {
    let secure_attr = if secure { "; Secure" } else { "" };
    format!(
        "access_token={}; HttpOnly{}; Path=/; Max-Age={}; SameSite=Lax",
        token,
        secure_attr,
        max_age_secs.max(0)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> Config {
        Config {
            api_port: 0,
            frontend_url: Some("https://learn.example.com".into()),
            database_url: String::new(),
            jwt_secret_pem: "test-secret-with-enough-length".into(),
            jwt_expires_secs: 600,
            media_url: "/media/".into(),
            is_production: false,
        }
    }

    #[test]
    fn issued_tokens_resolve_to_the_user() {
        let cfg = cfg();
        let id = Uuid::new_v4();
        let token = issue_token(&cfg, id).unwrap();
        assert_eq!(require_user(&cfg, Bearer(token.clone())).unwrap(), id);
        match resolve_actor(&cfg, Some(Bearer(token))) {
            Actor::User(uid) => assert_eq!(uid, id),
            other => panic!("unexpected actor {other:?}"),
        }
    }

    #[test]
    fn bad_tokens_are_anonymous() {
        let cfg = cfg();
        assert_eq!(
            require_user(&cfg, Bearer("garbage".into())).unwrap_err(),
            StatusCode::UNAUTHORIZED
        );
        assert!(matches!(
            resolve_actor(&cfg, Some(Bearer("garbage".into()))),
            Actor::Anonymous
        ));
        assert!(matches!(resolve_actor(&cfg, None), Actor::Anonymous));
    }

    #[test]
    fn cookie_lookup_and_attributes() {
        assert_eq!(
            get_cookie("theme=dark; access_token=abc.def ; x=1", "access_token").as_deref(),
            Some("abc.def")
        );
        assert_eq!(get_cookie("theme=dark", "access_token"), None);
        let cookie = build_access_cookie("t", 60, secure_cookies(&cfg()));
        assert_eq!(
            cookie,
            "access_token=t; HttpOnly; Secure; Path=/; Max-Age=60; SameSite=Lax"
        );
    }
}
