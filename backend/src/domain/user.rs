//! Cellar owner identity.

use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

use super::identifier::define_identifier;

define_identifier!(
    /// Stable user identifier. Opaque to the domain beyond being non-empty.
    UserId,
    "user id"
);

/// Cellar owner.
///
/// ## Invariants
/// - `updated_at >= created_at`; nothing mutates a user after construction.
/// - `email` is carried verbatim; format checks belong to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "UserSnapshot", into = "UserSnapshot")]
pub struct User {
    id: UserId,
    email: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Plain-data projection of a [`User`] used at persistence and wire boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSnapshot {
    pub id: UserId,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user stamped with the current time.
    ///
    /// # Examples
    /// ```
    /// use celleret::domain::{User, UserId};
    /// use mockable::DefaultClock;
    ///
    /// let id = UserId::new("user-1").expect("valid id");
    /// let user = User::create(id, "ada@example.com", &DefaultClock);
    /// assert_eq!(user.created_at(), user.updated_at());
    /// ```
    pub fn create(id: UserId, email: impl Into<String>, clock: &dyn Clock) -> Self {
        let now = clock.utc();
        Self {
            id,
            email: email.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuild a user from storage without touching its timestamps.
    pub fn reconstitute(snapshot: UserSnapshot) -> Self {
        let UserSnapshot {
            id,
            email,
            created_at,
            updated_at,
        } = snapshot;
        Self {
            id,
            email,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Copy every attribute into a [`UserSnapshot`].
    pub fn to_snapshot(&self) -> UserSnapshot {
        self.clone().into()
    }
}

impl From<User> for UserSnapshot {
    fn from(value: User) -> Self {
        let User {
            id,
            email,
            created_at,
            updated_at,
        } = value;
        Self {
            id,
            email,
            created_at,
            updated_at,
        }
    }
}

impl From<UserSnapshot> for User {
    fn from(value: UserSnapshot) -> Self {
        Self::reconstitute(value)
    }
}
