//! User service
//!
//! Handles user accounts and their role assignments. Passwords are hashed
//! here and only the hash reaches the repository.

use catalog_core::entities::{Role, User};
use catalog_core::value_objects::{EntityId, PageRequest};
use tracing::{info, instrument};

use crate::dto::{PageResponse, UserDto, UserInsertDto};

use super::context::ServiceContext;
use super::error::{role_not_found, user_not_found, ServiceResult};
use super::reconcile::reconcile;

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// List one page of users with their roles
    #[instrument(skip(self))]
    pub async fn list_users(&self, request: PageRequest) -> ServiceResult<PageResponse<UserDto>> {
        request.ensure_sortable(User::SORTABLE)?;

        let page = self.ctx.user_repo().find_page(&request).await?;
        Ok(page.map(|u| UserDto::from(&u)).into())
    }

    /// Get a user by ID
    #[instrument(skip(self))]
    pub async fn get_user(&self, id: EntityId) -> ServiceResult<UserDto> {
        let user = self.find(id).await?;
        Ok(UserDto::from(&user))
    }

    /// Register a user. Any id in the request is ignored.
    #[instrument(skip(self, request))]
    pub async fn create_user(&self, request: UserInsertDto) -> ServiceResult<UserDto> {
        let (request, password) = request.into_parts();

        let mut user = User::new(String::new(), String::new(), String::new());
        reconcile(
            &mut user,
            &request,
            request.role_ids(),
            UserDto::copy_scalars,
            move |id| self.resolve_role(id),
        )
        .await?;

        let password_hash = self.ctx.password_service().hash(&password)?;
        let created = self.ctx.user_repo().insert(&user, &password_hash).await?;

        info!(user_id = ?created.id, roles = created.roles.len(), "User created");

        Ok(UserDto::from(&created))
    }

    /// Replace a user's fields and roles. The password is kept.
    #[instrument(skip(self, request))]
    pub async fn update_user(&self, id: EntityId, request: UserDto) -> ServiceResult<UserDto> {
        let mut user = self.find(id).await?;
        reconcile(
            &mut user,
            &request,
            request.role_ids(),
            UserDto::copy_scalars,
            move |id| self.resolve_role(id),
        )
        .await?;

        self.ctx.user_repo().update(&user).await?;

        info!(user_id = %id, roles = user.roles.len(), "User updated");

        Ok(UserDto::from(&user))
    }

    /// Delete a user and their role links
    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: EntityId) -> ServiceResult<()> {
        self.ctx.user_repo().delete_by_id(id).await?;

        info!(user_id = %id, "User deleted");

        Ok(())
    }

    /// Check a plaintext password against the user's stored hash
    #[instrument(skip(self, password))]
    pub async fn check_password(&self, id: EntityId, password: &str) -> ServiceResult<bool> {
        let hash = self
            .ctx
            .user_repo()
            .get_password_hash(id)
            .await?
            .ok_or_else(|| user_not_found(id))?;

        Ok(self.ctx.password_service().verify(password, &hash)?)
    }

    // === Helper Methods ===

    async fn find(&self, id: EntityId) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| user_not_found(id))
    }

    async fn resolve_role(&self, id: EntityId) -> ServiceResult<Role> {
        self.ctx
            .role_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| role_not_found(id))
    }
}
