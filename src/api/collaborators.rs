use super::client::ApiResult;
use crate::types::{AuthState, AuthUser, PaymentResult};
use async_trait::async_trait;

/// Source of the signed-in user's identity and bearer token.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn auth_state(&self) -> ApiResult<AuthState>;
}

/// Billing hook that reports the outcome of a checkout redirect once at startup.
#[async_trait]
pub trait PaymentService: Send + Sync {
    /// Resolves once the payment provider is initialized.
    async fn ready(&self);

    async fn handle_payment_result(&self) -> ApiResult<Option<PaymentResult>>;
}

/// Auth state fixed at construction, typically from configuration.
#[derive(Clone, Debug, Default)]
pub struct StaticAuth {
    state: AuthState,
}

impl StaticAuth {
    pub fn new(state: AuthState) -> Self {
        Self { state }
    }

    pub fn anonymous() -> Self {
        Self::new(AuthState::anonymous())
    }

    /// Signed-in state when a token is present, anonymous otherwise.
    pub fn from_token(access_token: Option<String>, email: Option<String>) -> Self {
        match access_token {
            Some(token) => Self::new(AuthState {
                is_authenticated: true,
                user: Some(AuthUser { email, name: None }),
                access_token: Some(token),
            }),
            None => Self::anonymous(),
        }
    }
}

#[async_trait]
impl AuthProvider for StaticAuth {
    async fn auth_state(&self) -> ApiResult<AuthState> {
        Ok(self.state.clone())
    }
}

/// Payment service for builds without a checkout flow.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoPayments;

#[async_trait]
impl PaymentService for NoPayments {
    async fn ready(&self) {}

    async fn handle_payment_result(&self) -> ApiResult<Option<PaymentResult>> {
        Ok(None)
    }
}
