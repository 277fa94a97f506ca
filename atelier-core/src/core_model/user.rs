//! User account and profile data

use super::types::{Timestamp, UserId};
use serde::{Deserialize, Serialize};

/// A registered user account
///
/// The password hash is opaque to this crate; it is produced and verified by
/// the credential subsystem and only stored here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    pub id: UserId,

    /// Display name, unique across the service
    pub username: String,

    /// Email address, unique across the service
    pub email: String,

    /// Opaque credential hash
    pub password_hash: String,

    /// Optional profile details
    pub profile: UserProfile,

    /// When the account was created
    pub created_at: Timestamp,
}

/// Profile details attached to a user account
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserProfile {
    /// Avatar image URL
    pub avatar_url: Option<String>,

    /// Short self-description
    pub bio: Option<String>,

    /// Interest tags shown on the profile page
    pub interests: Vec<String>,
}

impl User {
    pub fn new(username: String, email: String, password_hash: String) -> Self {
        User {
            id: UserId::generate(),
            username,
            email,
            password_hash,
            profile: UserProfile::default(),
            created_at: Timestamp::now(),
        }
    }
}

/// User view safe for client responses (no credential hash)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: UserId,
    pub username: String,
    pub profile: UserProfile,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        PublicUser {
            id: user.id.clone(),
            username: user.username.clone(),
            profile: user.profile.clone(),
        }
    }
}
