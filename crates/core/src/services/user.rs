//! User account service.

use argon2::password_hash::{rand_core::OsRng, PasswordHash, SaltString};
use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use daybook_common::{AppError, AppResult, IdGenerator};
use daybook_db::{
    entities::{friend_group, user},
    repositories::{
        CheckInRepository, FriendGroupRepository, MomentRepository, NoteRepository,
        ResponseRepository, UserRepository,
    },
};
use sea_orm::Set;

use crate::services::notification::NotificationService;

/// Name of the friend group every account starts with.
const DEFAULT_GROUP_NAME: &str = "close friends";

/// Signup input.
#[derive(Debug, Clone)]
pub struct SignupInput {
    /// Unique handle. Letters, digits and underscore; at most 20 chars.
    pub handle: String,
    /// Unique email address.
    pub email: String,
    /// Plaintext password; hashed before storage.
    pub password: String,
    /// Preferred language code.
    pub language: Option<String>,
    /// IANA timezone name.
    pub timezone: Option<String>,
}

fn random_profile_color() -> String {
    // Random so early accounts start with distinct colors
    format!("#{:06X}", rand::random::<u32>() & 0x00FF_FFFF)
}

fn validate_handle(handle: &str) -> AppResult<()> {
    if handle.is_empty() || handle.len() > 20 {
        return Err(AppError::Validation(
            "Handle must be between 1 and 20 characters".to_string(),
        ));
    }
    if !handle.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return Err(AppError::Validation(
            "Handle may only contain letters, digits and _".to_string(),
        ));
    }
    Ok(())
}

/// User account service.
#[derive(Clone)]
pub struct UserService {
    user_repo: UserRepository,
    friend_group_repo: FriendGroupRepository,
    response_repo: ResponseRepository,
    note_repo: NoteRepository,
    check_in_repo: CheckInRepository,
    moment_repo: MomentRepository,
    notifications: NotificationService,
    id_gen: IdGenerator,
}

impl UserService {
    /// Create a new user service.
    #[must_use]
    pub const fn new(
        user_repo: UserRepository,
        friend_group_repo: FriendGroupRepository,
        response_repo: ResponseRepository,
        note_repo: NoteRepository,
        check_in_repo: CheckInRepository,
        moment_repo: MomentRepository,
        notifications: NotificationService,
    ) -> Self {
        Self {
            user_repo,
            friend_group_repo,
            response_repo,
            note_repo,
            check_in_repo,
            moment_repo,
            notifications,
            id_gen: IdGenerator::new(),
        }
    }

    /// Create a new account.
    ///
    /// Sends the onboarding notification and sets up the default friend
    /// group.
    pub async fn signup(&self, input: SignupInput) -> AppResult<user::Model> {
        validate_handle(&input.handle)?;

        if self.user_repo.find_by_handle(&input.handle).await?.is_some() {
            return Err(AppError::Conflict("Handle already taken".to_string()));
        }

        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(input.password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(e.to_string()))?
            .to_string();

        let model = user::ActiveModel {
            id: Set(self.id_gen.generate()),
            handle: Set(input.handle.clone()),
            handle_lower: Set(input.handle.to_lowercase()),
            email: Set(input.email),
            password_hash: Set(password_hash),
            token: Set(Some(self.id_gen.generate_token())),
            display_name: Set(None),
            bio: Set(None),
            profile_color: Set(random_profile_color()),
            language: Set(input.language.unwrap_or_else(|| "en".to_string())),
            timezone: Set(input.timezone.unwrap_or_else(|| "UTC".to_string())),
            is_admin: Set(false),
            deleted_at: Set(None),
            created_at: Set(chrono::Utc::now().into()),
            updated_at: Set(None),
        };
        let user = self.user_repo.create(model).await?;

        self.notifications.notify_welcome(&user).await?;

        let group = friend_group::ActiveModel {
            id: Set(self.id_gen.generate()),
            user_id: Set(user.id.clone()),
            name: Set(DEFAULT_GROUP_NAME.to_string()),
            order_index: Set(0),
            deleted_at: Set(None),
            created_at: Set(chrono::Utc::now().into()),
        };
        self.friend_group_repo.create(group).await?;

        tracing::info!(user_id = %user.id, handle = %user.handle, "Created account");
        Ok(user)
    }

    /// Authenticate by handle or email plus password; returns the user and
    /// a fresh access token.
    pub async fn login(&self, name: &str, password: &str) -> AppResult<(user::Model, String)> {
        let user = self
            .user_repo
            .find_by_handle_or_email(name)
            .await?
            .ok_or_else(|| AppError::UserNotFound(name.to_string()))?;

        let parsed = PasswordHash::new(&user.password_hash)
            .map_err(|e| AppError::Internal(e.to_string()))?;
        if Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_err()
        {
            return Err(AppError::Unauthorized);
        }

        let token = self.id_gen.generate_token();
        let mut model: user::ActiveModel = user.into();
        model.token = Set(Some(token.clone()));
        let user = self.user_repo.update(model).await?;
        Ok((user, token))
    }

    /// Resolve a bearer token to a user.
    pub async fn authenticate_by_token(&self, token: &str) -> AppResult<user::Model> {
        self.user_repo
            .find_by_token(token)
            .await?
            .ok_or(AppError::Unauthorized)
    }

    /// Get a user by ID.
    pub async fn get_by_id(&self, id: &str) -> AppResult<user::Model> {
        self.user_repo.get_by_id(id).await
    }

    /// Get a user by handle.
    pub async fn get_by_handle(&self, handle: &str) -> AppResult<user::Model> {
        self.user_repo
            .find_by_handle(handle)
            .await?
            .ok_or_else(|| AppError::UserNotFound(handle.to_string()))
    }

    /// Search users by handle.
    pub async fn search(
        &self,
        query: &str,
        viewer_id: &str,
        limit: u64,
    ) -> AppResult<Vec<user::Model>> {
        if query.is_empty() {
            return Ok(Vec::new());
        }
        self.user_repo.search_by_handle(query, viewer_id, limit).await
    }

    /// Soft-delete an account and cascade to its content.
    ///
    /// The cascade is an explicit list of dependent soft-deletes, not
    /// inherited behavior.
    pub async fn delete_account(&self, user_id: &str) -> AppResult<()> {
        self.user_repo.soft_delete(user_id).await?;

        self.response_repo.soft_delete_by_author(user_id).await?;
        self.note_repo.soft_delete_by_author(user_id).await?;
        self.check_in_repo.soft_delete_by_author(user_id).await?;
        self.moment_repo.soft_delete_by_author(user_id).await?;

        tracing::info!(user_id, "Soft-deleted account and owned content");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_handle_accepts_word_characters() {
        assert!(validate_handle("alice_01").is_ok());
    }

    #[test]
    fn test_validate_handle_rejects_punctuation() {
        assert!(validate_handle("alice@home").is_err());
        assert!(validate_handle("a.b").is_err());
    }

    #[test]
    fn test_validate_handle_rejects_overlong() {
        assert!(validate_handle(&"a".repeat(21)).is_err());
        assert!(validate_handle("").is_err());
    }

    #[test]
    fn test_random_profile_color_format() {
        let color = random_profile_color();
        assert_eq!(color.len(), 7);
        assert!(color.starts_with('#'));
        assert!(color[1..].chars().all(|c| c.is_ascii_hexdigit()));
    }
}
