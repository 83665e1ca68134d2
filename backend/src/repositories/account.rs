//! Account repository for database operations
//!
//! Every mutation is a single SQL statement. Token consumption is a
//! conditional UPDATE (match + guard + clear in one statement), so two
//! concurrent consumers of the same token race on row-level atomicity
//! and exactly one observes the pending token. Uniqueness of username
//! and email is enforced by the table's constraints, not by pre-reads.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// Account record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AccountRecord {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub is_email_confirmed: bool,
    pub password_reset_token: Option<String>,
    pub password_reset_expires_at: Option<DateTime<Utc>>,
    pub email_confirmation_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Account repository for database operations
pub struct AccountRepository;

impl AccountRepository {
    /// Insert a new account with a pending confirmation token
    ///
    /// Fails with a unique-violation database error when the username or
    /// email is already taken; callers map that to `AlreadyExists`.
    pub async fn create(
        pool: &PgPool,
        username: &str,
        email: &str,
        password_hash: &str,
        confirmation_token: &str,
    ) -> Result<AccountRecord, sqlx::Error> {
        sqlx::query_as::<_, AccountRecord>(
            r#"
            INSERT INTO accounts (username, email, password_hash, email_confirmation_token)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, email, password_hash, is_email_confirmed,
                      password_reset_token, password_reset_expires_at,
                      email_confirmation_token, created_at, updated_at
            "#,
        )
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .bind(confirmation_token)
        .fetch_one(pool)
        .await
    }

    /// Find account by username (case-sensitive)
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<AccountRecord>, sqlx::Error> {
        sqlx::query_as::<_, AccountRecord>(
            r#"
            SELECT id, username, email, password_hash, is_email_confirmed,
                   password_reset_token, password_reset_expires_at,
                   email_confirmation_token, created_at, updated_at
            FROM accounts
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(pool)
        .await
    }

    /// Find account by email
    pub async fn find_by_email(
        pool: &PgPool,
        email: &str,
    ) -> Result<Option<AccountRecord>, sqlx::Error> {
        sqlx::query_as::<_, AccountRecord>(
            r#"
            SELECT id, username, email, password_hash, is_email_confirmed,
                   password_reset_token, password_reset_expires_at,
                   email_confirmation_token, created_at, updated_at
            FROM accounts
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(pool)
        .await
    }

    /// Find account by ID
    pub async fn find_by_id(
        pool: &PgPool,
        id: Uuid,
    ) -> Result<Option<AccountRecord>, sqlx::Error> {
        sqlx::query_as::<_, AccountRecord>(
            r#"
            SELECT id, username, email, password_hash, is_email_confirmed,
                   password_reset_token, password_reset_expires_at,
                   email_confirmation_token, created_at, updated_at
            FROM accounts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Store a pending password reset token and its expiry
    ///
    /// Overwrites any previous pending reset, expired or not.
    pub async fn set_reset_token(
        pool: &PgPool,
        account_id: Uuid,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            UPDATE accounts
            SET password_reset_token = $2,
                password_reset_expires_at = $3,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(account_id)
        .bind(token)
        .bind(expires_at)
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Consume a pending reset token, installing the new password hash
    ///
    /// The token match, the expiry guard, the hash update and the token
    /// clear happen in one statement. Returns `None` when no row matched:
    /// unknown token, expired token, or a concurrent consumer won.
    pub async fn consume_reset_token(
        pool: &PgPool,
        token: &str,
        new_password_hash: &str,
    ) -> Result<Option<AccountRecord>, sqlx::Error> {
        sqlx::query_as::<_, AccountRecord>(
            r#"
            UPDATE accounts
            SET password_hash = $2,
                password_reset_token = NULL,
                password_reset_expires_at = NULL,
                updated_at = NOW()
            WHERE password_reset_token = $1
              AND password_reset_expires_at > NOW()
            RETURNING id, username, email, password_hash, is_email_confirmed,
                      password_reset_token, password_reset_expires_at,
                      email_confirmation_token, created_at, updated_at
            "#,
        )
        .bind(token)
        .bind(new_password_hash)
        .fetch_optional(pool)
        .await
    }

    /// Store a pending email confirmation token
    pub async fn set_confirmation_token(
        pool: &PgPool,
        account_id: Uuid,
        token: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            UPDATE accounts
            SET email_confirmation_token = $2,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(account_id)
        .bind(token)
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Consume a pending confirmation token, marking the email confirmed
    ///
    /// Returns `None` when no row matched: unknown token or a concurrent
    /// consumer won.
    pub async fn consume_confirmation_token(
        pool: &PgPool,
        token: &str,
    ) -> Result<Option<AccountRecord>, sqlx::Error> {
        sqlx::query_as::<_, AccountRecord>(
            r#"
            UPDATE accounts
            SET is_email_confirmed = TRUE,
                email_confirmation_token = NULL,
                updated_at = NOW()
            WHERE email_confirmation_token = $1
            RETURNING id, username, email, password_hash, is_email_confirmed,
                      password_reset_token, password_reset_expires_at,
                      email_confirmation_token, created_at, updated_at
            "#,
        )
        .bind(token)
        .fetch_optional(pool)
        .await
    }
}

#[cfg(test)]
mod tests {
    // Integration tests require database - see tests/auth_integration_test.rs
}
