use crate::db::connection::DbPool;
use crate::db::models::User;
use sqlx::sqlite::SqliteRow;
use sqlx::{Error, Row};

use super::parse_uuid;

fn row_to_user(row: &SqliteRow) -> Result<User, Error> {
    let id: String = row.get("id");
    Ok(User {
        id: parse_uuid("id", &id)?,
        username: row.get("username"),
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        api_key: row.get("api_key"),
    })
}

pub async fn insert_user(pool: &DbPool, user: &User) -> Result<(), Error> {
    sqlx::query(
        "INSERT INTO users (id, username, email, password_hash, api_key) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(user.id.to_string())
    .bind(&user.username)
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(&user.api_key)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn find_user_by_key(pool: &DbPool, api_key: &str) -> Result<Option<User>, Error> {
    let row = sqlx::query(
        "SELECT id, username, email, password_hash, api_key FROM users WHERE api_key = ?",
    )
    .bind(api_key)
    .fetch_optional(pool)
    .await?;

    match row {
        Some(row) => Ok(Some(row_to_user(&row)?)),
        None => Ok(None),
    }
}

pub async fn find_user_by_username(pool: &DbPool, username: &str) -> Result<Option<User>, Error> {
    let row = sqlx::query(
        "SELECT id, username, email, password_hash, api_key FROM users WHERE username = ?",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    match row {
        Some(row) => Ok(Some(row_to_user(&row)?)),
        None => Ok(None),
    }
}

pub async fn find_user_by_email(pool: &DbPool, email: &str) -> Result<Option<User>, Error> {
    let row = sqlx::query(
        "SELECT id, username, email, password_hash, api_key FROM users WHERE email = ?",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    match row {
        Some(row) => Ok(Some(row_to_user(&row)?)),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connection::init_db;
    use tempfile::TempDir;
    use uuid::Uuid;

    async fn test_pool() -> (TempDir, DbPool) {
        let temp_dir = TempDir::new().expect("create temp dir");
        let pool = init_db(&temp_dir.path().join("test.db"))
            .await
            .expect("init db");
        (temp_dir, pool)
    }

    fn sample_user(name: &str) -> User {
        User {
            id: Uuid::new_v4(),
            username: name.to_string(),
            email: format!("{name}@example.com"),
            password_hash: "$2b$12$abcdefghijklmnopqrstuv".to_string(),
            api_key: format!("key-{name}"),
        }
    }

    #[tokio::test]
    async fn insert_then_find_by_each_column() {
        let (_guard, pool) = test_pool().await;
        let user = sample_user("alice");
        insert_user(&pool, &user).await.expect("insert");

        let by_key = find_user_by_key(&pool, "key-alice")
            .await
            .expect("query")
            .expect("found");
        assert_eq!(by_key.id, user.id);
        assert_eq!(by_key.username, "alice");

        let by_name = find_user_by_username(&pool, "alice")
            .await
            .expect("query")
            .expect("found");
        assert_eq!(by_name.email, "alice@example.com");

        let by_email = find_user_by_email(&pool, "alice@example.com")
            .await
            .expect("query")
            .expect("found");
        assert_eq!(by_email.api_key, "key-alice");
    }

    #[tokio::test]
    async fn find_misses_return_none() {
        let (_guard, pool) = test_pool().await;
        assert!(find_user_by_key(&pool, "nope").await.expect("query").is_none());
        assert!(
            find_user_by_username(&pool, "nobody")
                .await
                .expect("query")
                .is_none()
        );
        assert!(
            find_user_by_email(&pool, "nobody@example.com")
                .await
                .expect("query")
                .is_none()
        );
    }

    #[tokio::test]
    async fn duplicate_username_is_rejected_by_the_schema() {
        let (_guard, pool) = test_pool().await;
        insert_user(&pool, &sample_user("bob")).await.expect("insert");

        let mut clash = sample_user("bob");
        clash.email = "bob2@example.com".to_string();
        clash.api_key = "key-bob2".to_string();
        assert!(insert_user(&pool, &clash).await.is_err());
    }
}
