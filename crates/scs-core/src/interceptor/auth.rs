//! Auth token injection

use std::fmt;

use async_trait::async_trait;

use crate::call::{UnaryCall, UnaryResponse};
use crate::status::Status;

use super::{Interceptor, Next};

pub const AUTHORIZATION_HEADER: &str = "authorization";

/// Sets the `authorization` header on every attempt
pub struct AuthInterceptor {
    token: String,
}

impl AuthInterceptor {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl fmt::Debug for AuthInterceptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthInterceptor")
            .field("token", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl Interceptor for AuthInterceptor {
    fn name(&self) -> &'static str {
        "auth"
    }

    async fn intercept(&self, mut call: UnaryCall, next: Next<'_>) -> Result<UnaryResponse, Status> {
        call.metadata
            .insert(AUTHORIZATION_HEADER, self.token.as_str());
        next.run(call).await
    }
}
