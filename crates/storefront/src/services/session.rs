//! Session and identity service.
//!
//! Holds the current authenticated user (or none) and checks credentials
//! against a fixed set of demo accounts plus any accounts created through
//! signup. The session persists under the `currentUser` key so a restart
//! re-hydrates it; malformed persisted state is discarded by the store.
//!
//! Identity transitions (login, signup, logout) drive the cart and wishlist
//! stores, orchestrated explicitly by the auth routes.

use std::sync::{Arc, Mutex, PoisonError};

use chrono::Utc;
use thiserror::Error;
use tracing::instrument;
use uuid::Uuid;

use skinaura_core::{Email, EmailError, UserId, UserRole};

use crate::models::User;
use crate::storage::{KvStore, StorageError, keys};

/// Errors from authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Email/password pair did not match an account.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Signup with an email that already has an account.
    #[error("email already in use")]
    EmailInUse,

    /// Malformed email on signup.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Persisting the session failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

struct Account {
    user: User,
    password: String,
}

/// The session service.
pub struct SessionService {
    storage: Arc<KvStore>,
    accounts: Mutex<Vec<Account>>,
    current: Mutex<Option<User>>,
}

impl SessionService {
    /// Create the service, seeding the demo accounts and re-hydrating any
    /// persisted session.
    #[must_use]
    pub fn new(storage: Arc<KvStore>) -> Self {
        let current = storage.get::<User>(keys::CURRENT_USER);
        Self {
            storage,
            accounts: Mutex::new(seed_accounts()),
            current: Mutex::new(current),
        }
    }

    /// The currently authenticated user, if any.
    #[must_use]
    pub fn current(&self) -> Option<User> {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Authenticate with email and password.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] on a mismatch, or a storage
    /// error if the session cannot be persisted.
    #[instrument(skip(self, password))]
    pub fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let accounts = self.accounts.lock().unwrap_or_else(PoisonError::into_inner);
        let user = accounts
            .iter()
            .find(|a| a.user.email.as_str() == email && a.password == password)
            .map(|a| a.user.clone())
            .ok_or(AuthError::InvalidCredentials)?;
        drop(accounts);

        self.set_current(Some(user.clone()))?;
        tracing::info!(user_id = %user.id, "User logged in");
        Ok(user)
    }

    /// Create an account and log it in.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::EmailInUse`] for a duplicate email,
    /// [`AuthError::InvalidEmail`] for a malformed one, or a storage error
    /// if the session cannot be persisted.
    #[instrument(skip(self, password))]
    pub fn signup(&self, name: &str, email: &str, password: &str) -> Result<User, AuthError> {
        let email = Email::parse(email)?;

        let mut accounts = self.accounts.lock().unwrap_or_else(PoisonError::into_inner);
        if accounts.iter().any(|a| a.user.email == email) {
            return Err(AuthError::EmailInUse);
        }

        let user = User {
            id: UserId::new(Uuid::new_v4().to_string()),
            name: name.to_owned(),
            email,
            role: UserRole::User,
            created_at: Utc::now(),
        };
        accounts.push(Account {
            user: user.clone(),
            password: password.to_owned(),
        });
        drop(accounts);

        self.set_current(Some(user.clone()))?;
        tracing::info!(user_id = %user.id, "Account created");
        Ok(user)
    }

    /// End the session.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the persisted session cannot be removed.
    #[instrument(skip(self))]
    pub fn logout(&self) -> Result<(), AuthError> {
        self.set_current(None)?;
        tracing::info!("User logged out");
        Ok(())
    }

    fn set_current(&self, user: Option<User>) -> Result<(), StorageError> {
        match &user {
            Some(u) => self.storage.set(keys::CURRENT_USER, u)?,
            None => self.storage.remove(keys::CURRENT_USER)?,
        }
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = user;
        Ok(())
    }
}

/// The two demo accounts every fresh install carries.
fn seed_accounts() -> Vec<Account> {
    let demo = |id: &str, name: &str, email: &str, role| User {
        id: UserId::new(id),
        name: name.to_owned(),
        email: Email::parse(email).unwrap_or_else(|_| unreachable!("seed emails are valid")),
        role,
        created_at: Utc::now(),
    };

    vec![
        Account {
            user: demo("1", "Test User", "user@example.com", UserRole::User),
            password: "password123".to_owned(),
        },
        Account {
            user: demo("2", "Admin User", "admin@example.com", UserRole::Admin),
            password: "admin123".to_owned(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> (tempfile::TempDir, SessionService) {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = Arc::new(KvStore::open(dir.path().join("data.json")).expect("open"));
        (dir, SessionService::new(storage))
    }

    #[test]
    fn test_login_demo_account() {
        let (_dir, sessions) = service();
        let user = sessions
            .login("user@example.com", "password123")
            .expect("login");
        assert_eq!(user.name, "Test User");
        assert_eq!(sessions.current().map(|u| u.id), Some(UserId::new("1")));
    }

    #[test]
    fn test_login_wrong_password() {
        let (_dir, sessions) = service();
        let result = sessions.login("user@example.com", "wrong");
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
        assert!(sessions.current().is_none());
    }

    #[test]
    fn test_signup_then_login() {
        let (_dir, sessions) = service();
        let user = sessions
            .signup("Asha", "asha@example.com", "hunter22")
            .expect("signup");
        assert_eq!(sessions.current().map(|u| u.id), Some(user.id.clone()));

        sessions.logout().expect("logout");
        assert!(sessions.current().is_none());

        let back = sessions.login("asha@example.com", "hunter22").expect("login");
        assert_eq!(back.id, user.id);
    }

    #[test]
    fn test_signup_duplicate_email() {
        let (_dir, sessions) = service();
        let result = sessions.signup("Imposter", "user@example.com", "pw");
        assert!(matches!(result, Err(AuthError::EmailInUse)));
    }

    #[test]
    fn test_signup_invalid_email() {
        let (_dir, sessions) = service();
        let result = sessions.signup("No At", "not-an-email", "pw");
        assert!(matches!(result, Err(AuthError::InvalidEmail(_))));
    }

    #[test]
    fn test_session_rehydrates_across_restart() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("data.json");
        {
            let storage = Arc::new(KvStore::open(&path).expect("open"));
            let sessions = SessionService::new(storage);
            sessions
                .login("admin@example.com", "admin123")
                .expect("login");
        }
        let storage = Arc::new(KvStore::open(&path).expect("reopen"));
        let sessions = SessionService::new(storage);
        assert_eq!(sessions.current().map(|u| u.name), Some("Admin User".to_owned()));
    }

    #[test]
    fn test_corrupt_session_discarded() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("data.json");
        {
            let storage = KvStore::open(&path).expect("open");
            storage.set(keys::CURRENT_USER, &42).expect("set garbage");
        }
        let storage = Arc::new(KvStore::open(&path).expect("reopen"));
        let sessions = SessionService::new(storage);
        assert!(sessions.current().is_none());
    }
}
