use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use shared::Comment;
use tracing::info;

use super::connection::JsonConnection;
use crate::storage::traits::CommentStorage;

const COLLECTION: &str = "comments";

/// JSON-document comment repository.
#[derive(Clone)]
pub struct CommentRepository {
    connection: Arc<JsonConnection>,
}

impl CommentRepository {
    pub fn new(connection: Arc<JsonConnection>) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl CommentStorage for CommentRepository {
    async fn store_comment(&self, comment: &Comment) -> Result<()> {
        let mut comments: Vec<Comment> = self.connection.read_collection(COLLECTION)?;
        comments.push(comment.clone());
        self.connection.write_collection(COLLECTION, &comments)?;
        info!("Stored comment {} on offer {}", comment.id, comment.offer_id);
        Ok(())
    }

    async fn list_comments_for_offer(&self, offer_id: &str) -> Result<Vec<Comment>> {
        let comments: Vec<Comment> = self.connection.read_collection(COLLECTION)?;
        let mut for_offer: Vec<Comment> = comments
            .into_iter()
            .filter(|comment| comment.offer_id == offer_id)
            .collect();
        for_offer.sort_by(|a, b| b.posted_at.cmp(&a.posted_at));
        Ok(for_offer)
    }

    async fn delete_comments_for_offer(&self, offer_id: &str) -> Result<u32> {
        let mut comments: Vec<Comment> = self.connection.read_collection(COLLECTION)?;
        let before = comments.len();
        comments.retain(|comment| comment.offer_id != offer_id);
        let removed = (before - comments.len()) as u32;

        if removed > 0 {
            self.connection.write_collection(COLLECTION, &comments)?;
            info!("Deleted {} comments for offer {}", removed, offer_id);
        }
        Ok(removed)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use tempfile::TempDir;

    pub(crate) fn sample_comment(id: &str, offer_id: &str) -> Comment {
        Comment {
            id: id.to_string(),
            offer_id: offer_id.to_string(),
            text: "Great stay, would book again.".to_string(),
            rating: 5.0,
            author_id: "user::author".to_string(),
            posted_at: Utc::now(),
        }
    }

    fn setup() -> (CommentRepository, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let connection = Arc::new(JsonConnection::new(temp_dir.path()).unwrap());
        (CommentRepository::new(connection), temp_dir)
    }

    #[tokio::test]
    async fn lists_only_the_offers_comments_newest_first() {
        let (repo, _temp_dir) = setup();

        let mut older = sample_comment("comment::1", "offer::a");
        older.posted_at = Utc::now() - Duration::hours(2);
        let newer = sample_comment("comment::2", "offer::a");
        let other = sample_comment("comment::3", "offer::b");

        repo.store_comment(&older).await.unwrap();
        repo.store_comment(&newer).await.unwrap();
        repo.store_comment(&other).await.unwrap();

        let comments = repo.list_comments_for_offer("offer::a").await.unwrap();
        let ids: Vec<String> = comments.into_iter().map(|comment| comment.id).collect();
        assert_eq!(ids, vec!["comment::2", "comment::1"]);
    }

    #[tokio::test]
    async fn delete_removes_all_for_offer() {
        let (repo, _temp_dir) = setup();
        repo.store_comment(&sample_comment("comment::1", "offer::a")).await.unwrap();
        repo.store_comment(&sample_comment("comment::2", "offer::a")).await.unwrap();
        repo.store_comment(&sample_comment("comment::3", "offer::b")).await.unwrap();

        assert_eq!(repo.delete_comments_for_offer("offer::a").await.unwrap(), 2);
        assert!(repo.list_comments_for_offer("offer::a").await.unwrap().is_empty());
        assert_eq!(repo.list_comments_for_offer("offer::b").await.unwrap().len(), 1);
        assert_eq!(repo.delete_comments_for_offer("offer::a").await.unwrap(), 0);
    }
}
