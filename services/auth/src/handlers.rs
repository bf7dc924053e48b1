//! Register, login and session-check handlers

use std::sync::Arc;

use axum::http::{HeaderMap, StatusCode};
use common::{Reply, ServiceError, ServiceResult};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::info;

use crate::{
    middleware::bearer_token,
    models::{Credentials, User, UserView},
    store::CredentialStore,
    token::generate_token,
    validation::validate_credentials,
};

pub const EMAIL_TAKEN: &str = "email already registered";
pub const INVALID_CREDENTIALS: &str = "invalid credentials";
pub const MISSING_TOKEN: &str = "missing token";
pub const INVALID_TOKEN: &str = "invalid token";

/// Response for register and login
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user: UserView,
    pub token: String,
}

/// Response for a session check
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    pub user: UserView,
}

/// Authentication handlers over a shared credential store
#[derive(Clone)]
pub struct AuthService {
    store: Arc<CredentialStore>,
    /// Held across the duplicate check and the insert of a registration
    registration: Arc<Mutex<()>>,
}

impl AuthService {
    /// Create a new auth service
    pub fn new(store: Arc<CredentialStore>) -> Self {
        Self {
            store,
            registration: Arc::new(Mutex::new(())),
        }
    }

    /// The underlying credential store
    pub fn store(&self) -> &Arc<CredentialStore> {
        &self.store
    }

    /// Register a new account and open a session for it
    pub async fn register(&self, credentials: &Credentials) -> ServiceResult<Reply> {
        self.store.seed_default_user_once().await;
        let credentials = validate_credentials(credentials)?;
        info!("Registration attempt for user: {}", credentials.email);

        let user = {
            let _guard = self.registration.lock().await;

            if self
                .store
                .find_user_by_email(&credentials.email)
                .await
                .is_some()
            {
                return Err(ServiceError::Conflict(EMAIL_TAKEN));
            }

            let user = User::new(credentials.email, credentials.password);
            self.store.add_user(user.clone()).await;
            user
        };

        let token = self.open_session(&user).await;
        info!("Registered user: {}", user.email);

        Ok(Reply::json(
            StatusCode::CREATED,
            &AuthResponse {
                user: UserView::from(&user),
                token,
            },
        ))
    }

    /// Check credentials and open a new session
    pub async fn login(&self, credentials: &Credentials) -> ServiceResult<Reply> {
        self.store.seed_default_user_once().await;
        let credentials = validate_credentials(credentials)?;
        info!("Login attempt for user: {}", credentials.email);

        let user = self
            .store
            .find_user_by_email(&credentials.email)
            .await
            .filter(|user| user.password == credentials.password)
            .ok_or(ServiceError::Authentication(INVALID_CREDENTIALS))?;

        let token = self.open_session(&user).await;

        Ok(Reply::ok(&AuthResponse {
            user: UserView::from(&user),
            token,
        }))
    }

    /// Resolve the bearer token in `headers` to its user
    pub async fn session(&self, headers: &HeaderMap) -> ServiceResult<Reply> {
        self.store.seed_default_user_once().await;

        let token = bearer_token(headers).ok_or(ServiceError::Authentication(MISSING_TOKEN))?;

        let session = self
            .store
            .get_session(token)
            .await
            .ok_or(ServiceError::Authentication(INVALID_TOKEN))?;

        Ok(Reply::ok(&SessionResponse {
            user: UserView {
                email: session.email,
            },
        }))
    }

    async fn open_session(&self, user: &User) -> String {
        let token = generate_token(&user.email);
        self.store.put_session(&token, &user.email).await;
        token
    }
}
