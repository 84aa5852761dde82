//! Admin Bootstrap
//!
//! Seeds the first administrator when the users table is empty. Failures are
//! logged; the server starts regardless.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHasher, SaltString};
use argon2::Argon2;

use crate::config::AdminSeed;
use crate::domain::{DomainError, DomainResult, Role, User};
use crate::repository::UserRepository;

/// Argon2id PHC string for `password`
pub fn hash_password(password: &str) -> DomainResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| DomainError::Internal(format!("password hashing failed: {}", e)))
}

/// Returns the created admin, or `None` when users already exist
pub async fn seed_admin(users: &UserRepository, seed: &AdminSeed) -> DomainResult<Option<User>> {
    if users.count().await? > 0 {
        let seeded = users.find_by_email(&seed.email).await?.is_some();
        tracing::debug!(seeded, "users present, admin bootstrap skipped");
        return Ok(None);
    }

    let admin = User {
        id: 0,
        name: seed.name.clone(),
        email: seed.email.clone(),
        password_hash: hash_password(&seed.password)?,
        role: Role::Admin,
        email_verified: true,
    };
    let created = users.create(&admin).await?;
    tracing::info!(email = %created.email, "seeded initial admin user");
    Ok(Some(created))
}

/// Run the seed, logging instead of failing
pub async fn run(users: &UserRepository, seed: &AdminSeed) {
    if let Err(e) = seed_admin(users, seed).await {
        tracing::error!(error = %e, "admin bootstrap failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::init_db;
    use argon2::password_hash::{PasswordHash, PasswordVerifier};
    use std::path::PathBuf;

    #[tokio::test]
    async fn test_seeds_once() {
        let db = init_db(&PathBuf::from(":memory:")).await.unwrap();
        let users = UserRepository::new(db.conn.clone());
        let seed = AdminSeed::default();

        let created = seed_admin(&users, &seed).await.unwrap().expect("admin created");
        assert_eq!(created.role, Role::Admin);
        assert!(seed_admin(&users, &seed).await.unwrap().is_none());
        assert_eq!(users.count().await.unwrap(), 1);

        let stored = users.find_by_email(&seed.email).await.unwrap().unwrap();
        let parsed = PasswordHash::new(&stored.password_hash).unwrap();
        assert!(Argon2::default().verify_password(b"password", &parsed).is_ok());
    }
}
