use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use shared::Role;

use crate::utils::AppError;

const USER_ID_HEADER: &str = "x-user-id";
const USER_ROLE_HEADER: &str = "x-user-role";

/// Identity of the caller, resolved once per request
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub user_id: String,
    pub role: Role,
}

impl RequestContext {
    /// Guard for admin-only operations
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.role.is_admin() {
            Ok(())
        } else {
            Err(AppError::forbidden("Cafe admin role required"))
        }
    }
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.is_empty())
            .ok_or(AppError::Unauthorized)?
            .to_string();

        let role = parts
            .headers
            .get(USER_ROLE_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse::<Role>().ok())
            .ok_or(AppError::Unauthorized)?;

        Ok(Self { user_id, role })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(headers: &[(&str, &str)]) -> Result<RequestContext, AppError> {
        let mut builder = Request::builder().uri("/");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        let (mut parts, ()) = builder.body(()).unwrap().into_parts();
        RequestContext::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn resolves_customer_identity() {
        let ctx = extract(&[("x-user-id", "alice"), ("x-user-role", "customer")])
            .await
            .unwrap();
        assert_eq!(ctx.user_id, "alice");
        assert!(ctx.require_admin().is_err());
    }

    #[tokio::test]
    async fn resolves_admin_identity() {
        let ctx = extract(&[("x-user-id", "boss"), ("x-user-role", "cafeadmin")])
            .await
            .unwrap();
        assert!(ctx.require_admin().is_ok());
    }

    #[tokio::test]
    async fn missing_or_unknown_headers_are_unauthorized() {
        assert!(matches!(
            extract(&[("x-user-role", "customer")]).await,
            Err(AppError::Unauthorized)
        ));
        assert!(matches!(
            extract(&[("x-user-id", "alice")]).await,
            Err(AppError::Unauthorized)
        ));
        assert!(matches!(
            extract(&[("x-user-id", "alice"), ("x-user-role", "wizard")]).await,
            Err(AppError::Unauthorized)
        ));
    }
}
