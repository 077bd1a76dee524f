use crate::storage::{RecordStore, StorageError};
use chrono::Utc;
use shared_types::{CompleteSubmission, StoredSubmission};
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
pub struct InMemoryRecordStore {
    rows: Arc<Mutex<Vec<StoredSubmission>>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.lock().map(|rows| rows.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait::async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn save(&self, submission: &CompleteSubmission) -> Result<StoredSubmission, StorageError> {
        let mut rows = self
            .rows
            .lock()
            .map_err(|e| StorageError::OperationFailed(format!("Lock error: {}", e)))?;

        let stored = StoredSubmission {
            id: rows.last().map(|row| row.id + 1).unwrap_or(1),
            budget: submission.budget,
            city: submission.city.clone(),
            investment_type: submission.investment_type.clone(),
            target_audience: submission.target_audience.clone(),
            created_at: Utc::now(),
        };
        rows.push(stored.clone());

        Ok(stored)
    }

    async fn list_all(&self) -> Result<Vec<StoredSubmission>, StorageError> {
        let rows = self
            .rows
            .lock()
            .map_err(|e| StorageError::OperationFailed(format!("Lock error: {}", e)))?;

        let mut listed = rows.clone();
        listed.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        Ok(listed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(city: &str) -> CompleteSubmission {
        CompleteSubmission {
            budget: 500.0,
            city: city.to_string(),
            investment_type: "Lanchonete".to_string(),
            target_audience: "Profissionais liberais".to_string(),
        }
    }

    #[tokio::test]
    async fn test_ids_increase_monotonically() {
        let store = InMemoryRecordStore::new();

        let first = store.save(&submission("Recife")).await.unwrap();
        let second = store.save(&submission("Natal")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(second.submission(), submission("Natal"));
    }

    #[tokio::test]
    async fn test_list_all_newest_first() {
        let store = InMemoryRecordStore::new();
        store.save(&submission("Recife")).await.unwrap();
        store.save(&submission("Natal")).await.unwrap();
        store.save(&submission("Salvador")).await.unwrap();

        let cities: Vec<String> = store
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|row| row.city)
            .collect();

        assert_eq!(cities, vec!["Salvador", "Natal", "Recife"]);
    }

    #[tokio::test]
    async fn test_list_all_is_idempotent() {
        let store = InMemoryRecordStore::new();
        store.save(&submission("Recife")).await.unwrap();
        store.save(&submission("Natal")).await.unwrap();

        let first = store.list_all().await.unwrap();
        let second = store.list_all().await.unwrap();

        assert_eq!(first, second);
        assert_eq!(store.len(), 2);
    }
}
