//! Account registration, login, and profile self-service.

use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde::Serialize;
use tracing::{info, warn};

use leasehub_auth::jwt::IssuedToken;
use leasehub_auth::{JwtEncoder, PasswordHasher, PasswordValidator};
use leasehub_core::error::AppError;
use leasehub_core::types::id::UserId;
use leasehub_entity::user::{CreateUser, UpdateUser, User};

/// Data for creating an account.
#[derive(Debug, Clone)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
}

/// Credentials for logging in.
#[derive(Debug, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// A signed token together with the public user record.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub token: String,
    pub expires_at: chrono::DateTime<Utc>,
    pub user: User,
}

impl AuthSession {
    fn new(issued: IssuedToken, user: User) -> Self {
        Self {
            token: issued.token,
            expires_at: issued.expires_at,
            user,
        }
    }
}

/// In-memory user accounts indexed by id and by email.
#[derive(Debug, Clone)]
pub struct UserService {
    users: Arc<DashMap<UserId, User>>,
    /// Lowercased email to owning user.
    emails: Arc<DashMap<String, UserId>>,
    hasher: Arc<PasswordHasher>,
    validator: Arc<PasswordValidator>,
    encoder: Arc<JwtEncoder>,
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl UserService {
    /// Creates a user service with no accounts.
    pub fn new(
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
        encoder: Arc<JwtEncoder>,
    ) -> Self {
        Self {
            users: Arc::new(DashMap::new()),
            emails: Arc::new(DashMap::new()),
            hasher,
            validator,
            encoder,
        }
    }

    /// Create an account and sign the user in.
    pub fn register(&self, req: RegisterRequest) -> Result<AuthSession, AppError> {
        self.validator.validate(&req.password)?;
        if req.first_name.trim().is_empty() || req.last_name.trim().is_empty() {
            return Err(AppError::validation("First and last name are required"));
        }

        let email = normalize_email(&req.email);
        if !email.contains('@') || !email.contains('.') {
            return Err(AppError::validation("Invalid email format"));
        }
        let password_hash = self.hasher.hash_password(&req.password)?;
        let input = CreateUser {
            email,
            password_hash,
            first_name: req.first_name.trim().to_string(),
            last_name: req.last_name.trim().to_string(),
            phone: req.phone.filter(|p| !p.trim().is_empty()),
        };

        let user = match self.emails.entry(input.email.clone()) {
            Entry::Occupied(_) => {
                return Err(AppError::conflict("User already exists with this email"));
            }
            Entry::Vacant(slot) => {
                let user = Self::build_user(input);
                slot.insert(user.id);
                self.users.insert(user.id, user.clone());
                user
            }
        };

        info!(user_id = %user.id, email = %user.email, "User registered");

        let issued = self.encoder.issue(user.id)?;
        Ok(AuthSession::new(issued, user))
    }

    /// Verify credentials and issue a token.
    pub fn login(&self, req: LoginRequest) -> Result<AuthSession, AppError> {
        let invalid = || AppError::authentication("Invalid credentials");

        let email = normalize_email(&req.email);
        let user_id = self.emails.get(&email).map(|id| *id).ok_or_else(invalid)?;
        let user = self.get(user_id)?;

        if !self.hasher.verify_password(&req.password, &user.password_hash)? {
            warn!(email = %email, "Login failed: wrong password");
            return Err(invalid());
        }
        if !user.can_login() {
            return Err(AppError::authentication("Account is deactivated"));
        }

        info!(user_id = %user.id, "User logged in");

        let issued = self.encoder.issue(user.id)?;
        Ok(AuthSession::new(issued, user))
    }

    /// Look up a user by id.
    pub fn get(&self, user_id: UserId) -> Result<User, AppError> {
        self.users
            .get(&user_id)
            .map(|u| u.clone())
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Change the caller's own profile. Absent fields stay as they are.
    pub fn update_profile(&self, user_id: UserId, update: UpdateUser) -> Result<User, AppError> {
        let mut user = self.get(user_id)?;

        if let Some(first_name) = update.first_name {
            if first_name.trim().is_empty() {
                return Err(AppError::validation("First name cannot be empty"));
            }
            user.first_name = first_name.trim().to_string();
        }
        if let Some(last_name) = update.last_name {
            if last_name.trim().is_empty() {
                return Err(AppError::validation("Last name cannot be empty"));
            }
            user.last_name = last_name.trim().to_string();
        }
        if let Some(phone) = update.phone {
            user.phone = Some(phone);
        }
        if let Some(address) = update.address {
            user.address = Some(address);
        }
        if let Some(picture) = update.profile_picture {
            user.profile_picture = Some(picture);
        }

        if let Some(email) = update.email {
            let email = normalize_email(&email);
            if !email.contains('@') || !email.contains('.') {
                return Err(AppError::validation("Invalid email format"));
            }
            if email != user.email {
                self.claim_email(user_id, &user.email, &email)?;
                user.email = email;
            }
        }

        user.updated_at = Utc::now();
        self.users.insert(user_id, user.clone());

        info!(user_id = %user_id, "Profile updated");

        Ok(user)
    }

    /// Move the email index entry from `old` to `new` for this user.
    fn claim_email(&self, user_id: UserId, old: &str, new: &str) -> Result<(), AppError> {
        match self.emails.entry(new.to_string()) {
            Entry::Occupied(owner) if *owner.get() != user_id => {
                return Err(AppError::conflict("Email is already in use"));
            }
            Entry::Occupied(_) => {}
            Entry::Vacant(slot) => {
                slot.insert(user_id);
            }
        }
        self.emails.remove(old);
        Ok(())
    }

    fn build_user(input: CreateUser) -> User {
        let now = Utc::now();
        User {
            id: UserId::new(),
            email: input.email,
            password_hash: input.password_hash,
            first_name: input.first_name,
            last_name: input.last_name,
            phone: input.phone,
            address: None,
            profile_picture: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[cfg(test)]
    fn deactivate(&self, user_id: UserId) {
        if let Some(mut user) = self.users.get_mut(&user_id) {
            user.is_active = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use leasehub_auth::JwtDecoder;
    use leasehub_core::config::AuthConfig;
    use leasehub_core::error::ErrorKind;

    use super::*;

    fn service() -> (UserService, JwtDecoder) {
        let config = AuthConfig::default();
        let svc = UserService::new(
            Arc::new(PasswordHasher::new()),
            Arc::new(PasswordValidator::new(&config)),
            Arc::new(JwtEncoder::new(&config)),
        );
        (svc, JwtDecoder::new(&config))
    }

    fn register(svc: &UserService, email: &str) -> AuthSession {
        svc.register(RegisterRequest {
            email: email.to_string(),
            password: "hunter22".to_string(),
            first_name: "Ana".to_string(),
            last_name: "Silva".to_string(),
            phone: None,
        })
        .expect("register")
    }

    #[test]
    fn test_register_then_login() {
        let (svc, decoder) = service();
        let session = register(&svc, "Ana@Example.com");
        assert_eq!(session.user.email, "ana@example.com");

        let claims = decoder.decode(&session.token).expect("valid token");
        assert_eq!(claims.user_id(), session.user.id);

        let login = svc
            .login(LoginRequest {
                email: "ANA@example.com ".to_string(),
                password: "hunter22".to_string(),
            })
            .expect("login");
        assert_eq!(login.user.id, session.user.id);
    }

    #[test]
    fn test_duplicate_email_conflicts() {
        let (svc, _) = service();
        register(&svc, "ana@example.com");
        let err = svc
            .register(RegisterRequest {
                email: "ANA@example.com".to_string(),
                password: "another1".to_string(),
                first_name: "A".to_string(),
                last_name: "B".to_string(),
                phone: None,
            })
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[test]
    fn test_short_password_rejected() {
        let (svc, _) = service();
        let err = svc
            .register(RegisterRequest {
                email: "ana@example.com".to_string(),
                password: "abc".to_string(),
                first_name: "Ana".to_string(),
                last_name: "Silva".to_string(),
                phone: None,
            })
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[test]
    fn test_login_failures_are_uniform() {
        let (svc, _) = service();
        register(&svc, "ana@example.com");

        let wrong = svc
            .login(LoginRequest {
                email: "ana@example.com".to_string(),
                password: "wrong-pass".to_string(),
            })
            .unwrap_err();
        let unknown = svc
            .login(LoginRequest {
                email: "nobody@example.com".to_string(),
                password: "hunter22".to_string(),
            })
            .unwrap_err();
        assert_eq!(wrong.kind, ErrorKind::Authentication);
        assert_eq!(wrong.message, unknown.message);
    }

    #[test]
    fn test_deactivated_account_cannot_login() {
        let (svc, _) = service();
        let session = register(&svc, "ana@example.com");
        svc.deactivate(session.user.id);
        let err = svc
            .login(LoginRequest {
                email: "ana@example.com".to_string(),
                password: "hunter22".to_string(),
            })
            .unwrap_err();
        assert_eq!(err.message, "Account is deactivated");
    }

    #[test]
    fn test_update_profile_partial_and_email_conflict() {
        let (svc, _) = service();
        let ana = register(&svc, "ana@example.com").user;
        register(&svc, "bo@example.com");

        let updated = svc
            .update_profile(
                ana.id,
                UpdateUser {
                    address: Some("1 Main St".into()),
                    ..UpdateUser::default()
                },
            )
            .expect("update");
        assert_eq!(updated.address.as_deref(), Some("1 Main St"));
        assert_eq!(updated.first_name, "Ana");

        let err = svc
            .update_profile(
                ana.id,
                UpdateUser {
                    email: Some("BO@example.com".into()),
                    ..UpdateUser::default()
                },
            )
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);

        svc.update_profile(
            ana.id,
            UpdateUser {
                email: Some("ana.silva@example.com".into()),
                ..UpdateUser::default()
            },
        )
        .expect("email change");
        let login = svc.login(LoginRequest {
            email: "ana.silva@example.com".to_string(),
            password: "hunter22".to_string(),
        });
        assert!(login.is_ok());
        let old = svc.login(LoginRequest {
            email: "ana@example.com".to_string(),
            password: "hunter22".to_string(),
        });
        assert!(old.is_err());
    }

    #[test]
    fn test_get_unknown_user() {
        let (svc, _) = service();
        let err = svc.get(UserId::new()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }
}
