use crate::error::AppError;
use crate::models::content::Prompt;
use crate::store::repository::ContentRepository;

/// Add one vote to a recipe idea and return the new count.
///
/// This is a read, an increment and a plain write. Two concurrent votes can
/// read the same count and both write `n + 1`, losing one increment; the
/// store offers no atomic counter and none is emulated here. There is no
/// per-voter gate either: every call counts.
pub async fn cast_vote(repo: &ContentRepository, prompt_id: &str) -> Result<u64, AppError> {
    let prompt_id = prompt_id.trim();
    if prompt_id.is_empty() {
        return Err(AppError::Validation("Invalid recipe idea.".into()));
    }

    let prompt = repo
        .prompt_by_id(prompt_id)
        .await
        .map_err(AppError::upstream("Failed to vote. Please try again."))?
        .ok_or_else(|| AppError::NotFound("Recipe idea not found.".into()))?;

    let new_count = prompt.votes() + 1;

    repo.set_prompt_votes(prompt_id, new_count)
        .await
        .map_err(AppError::upstream("Failed to update votes. Please try again later."))?;

    tracing::info!(prompt_id, votes = new_count, "vote recorded");
    Ok(new_count)
}

/// Order ideas by votes, most popular first. Ties keep store order.
pub fn rank_prompts(mut prompts: Vec<Prompt>) -> Vec<Prompt> {
    prompts.sort_by(|a, b| b.votes().cmp(&a.votes()));
    prompts
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use serde_json::json;

    use crate::store::memory::MemoryStore;
    use crate::store::{Collection, MockObjectStore, StoreError};

    fn repo_with_prompt(votes: Option<u64>) -> (Arc<MemoryStore>, ContentRepository, String) {
        let store = Arc::new(MemoryStore::new());
        let metadata = match votes {
            Some(v) => json!({ "prompt": "Crispy pork belly", "votes": v }),
            None => json!({ "prompt": "Crispy pork belly" }),
        };
        let id = store.seed(Collection::Prompts, json!({ "title": "Siu yuk", "metadata": metadata }));
        let repo = ContentRepository::new(store.clone());
        (store, repo, id)
    }

    #[tokio::test]
    async fn test_vote_increments_by_one() {
        let (store, repo, id) = repo_with_prompt(Some(7));

        let count = cast_vote(&repo, &id).await.unwrap();
        assert_eq!(count, 8);
        assert_eq!(store.objects(Collection::Prompts)[0]["metadata"]["votes"], 8);
    }

    #[tokio::test]
    async fn test_missing_votes_count_as_zero() {
        let (_, repo, id) = repo_with_prompt(None);
        assert_eq!(cast_vote(&repo, &id).await.unwrap(), 1);
        assert_eq!(cast_vote(&repo, &id).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_float_vote_count_keeps_its_value() {
        let store = Arc::new(MemoryStore::new());
        let id = store.seed(
            Collection::Prompts,
            json!({ "title": "Pho", "metadata": { "prompt": "Beef noodle soup", "votes": 12.0 } }),
        );
        let repo = ContentRepository::new(store.clone());

        assert_eq!(cast_vote(&repo, &id).await.unwrap(), 13);
        assert_eq!(store.objects(Collection::Prompts)[0]["metadata"]["votes"], 13);
    }

    #[tokio::test]
    async fn test_unreadable_vote_count_is_not_overwritten() {
        let store = Arc::new(MemoryStore::new());
        let id = store.seed(
            Collection::Prompts,
            json!({ "title": "Pho", "metadata": { "prompt": "Beef noodle soup", "votes": "lots" } }),
        );
        let repo = ContentRepository::new(store.clone());

        let err = cast_vote(&repo, &id).await.unwrap_err();
        assert!(matches!(err, AppError::Upstream { .. }));
        assert_eq!(store.objects(Collection::Prompts)[0]["metadata"]["votes"], "lots");
    }

    #[tokio::test]
    async fn test_unknown_prompt_is_not_found_and_not_written() {
        let mut store = MockObjectStore::new();
        store
            .expect_find_one()
            .times(1)
            .returning(|_| Err(StoreError::NotFound));
        store.expect_update_one().never();
        let repo = ContentRepository::new(Arc::new(store));

        match cast_vote(&repo, "nonexistent-id").await {
            Err(AppError::NotFound(msg)) => assert_eq!(msg, "Recipe idea not found."),
            other => panic!("Expected NotFound error, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_blank_id_is_rejected_without_store_calls() {
        let mut store = MockObjectStore::new();
        store.expect_find_one().never();
        store.expect_update_one().never();
        let repo = ContentRepository::new(Arc::new(store));

        let err = cast_vote(&repo, "  ").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_write_failure_is_upstream() {
        let mut store = MockObjectStore::new();
        store.expect_find_one().returning(|_| {
            Ok(json!({ "id": "p1", "title": "Mole", "metadata": { "prompt": "Oaxacan", "votes": 2 } }))
        });
        store.expect_update_one().times(1).returning(|_, _| {
            Err(StoreError::Transport("connection reset".into()))
        });
        let repo = ContentRepository::new(Arc::new(store));

        let err = cast_vote(&repo, "p1").await.unwrap_err();
        assert!(matches!(err, AppError::Upstream { .. }));
        assert!(!err.to_string().contains("connection reset"));
    }

    #[tokio::test]
    async fn test_interleaved_votes_lose_an_update() {
        // Both callers read before either writes; the store keeps the last write.
        let (store, repo, id) = repo_with_prompt(Some(3));

        let first = repo.prompt_by_id(&id).await.unwrap().unwrap();
        let second = repo.prompt_by_id(&id).await.unwrap().unwrap();
        repo.set_prompt_votes(&id, first.votes() + 1).await.unwrap();
        repo.set_prompt_votes(&id, second.votes() + 1).await.unwrap();

        assert_eq!(store.objects(Collection::Prompts)[0]["metadata"]["votes"], 4);
    }

    #[test]
    fn test_rank_prompts_most_votes_first() {
        let prompt = |id: &str, votes: Option<u64>| {
            Prompt::decode(json!({ "id": id, "title": id, "metadata": { "prompt": "", "votes": votes } }))
                .unwrap()
        };
        let ranked = rank_prompts(vec![
            prompt("a", Some(1)),
            prompt("b", None),
            prompt("c", Some(9)),
            prompt("d", Some(1)),
        ]);
        let order: Vec<&str> = ranked.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(order, vec!["c", "a", "d", "b"]);
    }
}
