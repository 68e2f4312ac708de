use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use shared::User;
use tracing::info;

use super::connection::JsonConnection;
use crate::storage::traits::UserStorage;

const COLLECTION: &str = "users";

/// JSON-document user repository.
#[derive(Clone)]
pub struct UserRepository {
    connection: Arc<JsonConnection>,
}

impl UserRepository {
    pub fn new(connection: Arc<JsonConnection>) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl UserStorage for UserRepository {
    async fn store_user(&self, user: &User) -> Result<()> {
        let mut users: Vec<User> = self.connection.read_collection(COLLECTION)?;
        users.push(user.clone());
        self.connection.write_collection(COLLECTION, &users)?;
        info!("Stored user {}", user.id);
        Ok(())
    }

    async fn get_user(&self, user_id: &str) -> Result<Option<User>> {
        let users: Vec<User> = self.connection.read_collection(COLLECTION)?;
        Ok(users.into_iter().find(|user| user.id == user_id))
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let users: Vec<User> = self.connection.read_collection(COLLECTION)?;
        Ok(users.into_iter().find(|user| user.email.eq_ignore_ascii_case(email)))
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        let mut users: Vec<User> = self.connection.read_collection(COLLECTION)?;
        users.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(users)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use shared::UserType;
    use tempfile::TempDir;

    pub(crate) fn sample_user(id: &str, email: &str) -> User {
        User {
            id: id.to_string(),
            name: "Keks".to_string(),
            email: email.to_string(),
            avatar_url: "avatar.jpg".to_string(),
            user_type: UserType::Regular,
        }
    }

    fn setup() -> (UserRepository, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let connection = Arc::new(JsonConnection::new(temp_dir.path()).unwrap());
        (UserRepository::new(connection), temp_dir)
    }

    #[tokio::test]
    async fn store_and_lookup_by_id_and_email() {
        let (repo, _temp_dir) = setup();
        let user = sample_user("user::1", "keks@example.com");
        repo.store_user(&user).await.unwrap();

        assert_eq!(repo.get_user("user::1").await.unwrap(), Some(user.clone()));
        assert_eq!(
            repo.find_user_by_email("KEKS@example.com").await.unwrap(),
            Some(user)
        );
        assert!(repo.find_user_by_email("other@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_is_ordered_by_name() {
        let (repo, _temp_dir) = setup();

        let mut zoe = sample_user("user::1", "zoe@example.com");
        zoe.name = "Zoe".to_string();
        let mut ada = sample_user("user::2", "ada@example.com");
        ada.name = "Ada".to_string();

        repo.store_user(&zoe).await.unwrap();
        repo.store_user(&ada).await.unwrap();

        let names: Vec<String> = repo
            .list_users()
            .await
            .unwrap()
            .into_iter()
            .map(|user| user.name)
            .collect();
        assert_eq!(names, vec!["Ada", "Zoe"]);
    }
}
