//! Authentication and permission guards
//!
//! The earliest possible resolution point for 401/403: handlers call
//! these before touching business logic, so authorization failures never
//! travel further. All guards share the resolver's short-circuit and
//! wildcard rules - there is exactly one matching semantic in the system.

use uuid::Uuid;

use keystone_auth::{CredentialSource, SessionService, SessionStore};
use keystone_resolver::{AccessResolver, DirectoryStore};

use crate::error::{ApiError, ApiResult};

/// Require a valid session, yielding the user id.
///
/// The 401 carries no detail about why the credential failed.
pub async fn require_auth<S: SessionStore>(
    sessions: &SessionService<S>,
    credentials: &CredentialSource,
) -> ApiResult<Uuid> {
    sessions
        .verify(credentials)
        .await
        .ok_or(ApiError::Unauthenticated)
}

/// Require one permission, yielding 403 when it is not granted.
pub async fn require_permission<D: DirectoryStore>(
    resolver: &AccessResolver<D>,
    user_id: Uuid,
    tenant_id: Option<Uuid>,
    code: &str,
) -> ApiResult<()> {
    if user_has_permission(resolver, user_id, tenant_id, code).await? {
        Ok(())
    } else {
        Err(ApiError::Forbidden)
    }
}

/// Whether the user holds one permission.
pub async fn user_has_permission<D: DirectoryStore>(
    resolver: &AccessResolver<D>,
    user_id: Uuid,
    tenant_id: Option<Uuid>,
    code: &str,
) -> ApiResult<bool> {
    let perms = resolver.effective_permissions(user_id, tenant_id).await?;
    Ok(perms.allows_code(code))
}

/// Whether the user holds at least one of the permissions.
pub async fn user_has_any_permission<D: DirectoryStore>(
    resolver: &AccessResolver<D>,
    user_id: Uuid,
    tenant_id: Option<Uuid>,
    codes: &[&str],
) -> ApiResult<bool> {
    let perms = resolver.effective_permissions(user_id, tenant_id).await?;
    Ok(perms.allows_any(codes.iter().copied()))
}

/// Whether the user holds every one of the permissions.
pub async fn user_has_all_permissions<D: DirectoryStore>(
    resolver: &AccessResolver<D>,
    user_id: Uuid,
    tenant_id: Option<Uuid>,
    codes: &[&str],
) -> ApiResult<bool> {
    let perms = resolver.effective_permissions(user_id, tenant_id).await?;
    Ok(perms.allows_all(codes.iter().copied()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use keystone_auth::InMemorySessionStore;
    use keystone_resolver::{InMemoryDirectory, Role, RoleAssignment, UserRecord};

    async fn fixture() -> (
        SessionService<InMemorySessionStore>,
        AccessResolver<InMemoryDirectory>,
        Uuid,
        String,
    ) {
        let mut directory = InMemoryDirectory::new();
        let user = UserRecord::new(Uuid::now_v7());
        let user_id = user.id;
        directory.add_user(user);

        let role = Role::new("ORDER_MANAGER", "Order Manager");
        let role_id = role.id;
        directory.add_role(role);
        directory.assign(RoleAssignment::new(user_id, role_id));
        directory.grant(role_id, "orders:read");
        directory.grant(role_id, "carts:*");

        let sessions = SessionService::new(InMemorySessionStore::new());
        let token = sessions.issue(user_id).await.unwrap();

        (sessions, AccessResolver::new(directory), user_id, token)
    }

    #[tokio::test]
    async fn test_require_auth() {
        let (sessions, _, user_id, token) = fixture().await;

        let ok = require_auth(&sessions, &CredentialSource::from_cookie(token)).await;
        assert_eq!(ok.unwrap(), user_id);

        let err = require_auth(&sessions, &CredentialSource::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unauthenticated));
    }

    #[tokio::test]
    async fn test_require_permission() {
        let (_, resolver, user_id, _) = fixture().await;

        assert!(require_permission(&resolver, user_id, None, "orders:read")
            .await
            .is_ok());

        let err = require_permission(&resolver, user_id, None, "orders:delete")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Forbidden));
        assert_eq!(err.status_code(), 403);
    }

    #[tokio::test]
    async fn test_has_any_and_all() {
        let (_, resolver, user_id, _) = fixture().await;

        assert!(
            user_has_any_permission(&resolver, user_id, None, &["users:read", "carts:delete"])
                .await
                .unwrap()
        );
        assert!(
            !user_has_any_permission(&resolver, user_id, None, &["users:read", "products:read"])
                .await
                .unwrap()
        );

        assert!(
            user_has_all_permissions(&resolver, user_id, None, &["orders:read", "carts:read"])
                .await
                .unwrap()
        );
        assert!(
            !user_has_all_permissions(&resolver, user_id, None, &["orders:read", "users:read"])
                .await
                .unwrap()
        );
    }
}
