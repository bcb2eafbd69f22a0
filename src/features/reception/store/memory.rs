use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::core::error::Result;
use crate::features::reception::models::ReceptionSnapshot;
use crate::features::reception::store::ReceptionStore;

/// Keeps the snapshot in process memory. State is lost on restart.
#[derive(Default)]
pub struct InMemoryReceptionStore {
    snapshot: RwLock<Option<ReceptionSnapshot>>,
}

impl InMemoryReceptionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReceptionStore for InMemoryReceptionStore {
    async fn load(&self) -> Result<Option<ReceptionSnapshot>> {
        Ok(self.snapshot.read().await.clone())
    }

    async fn save(&self, snapshot: &ReceptionSnapshot) -> Result<()> {
        *self.snapshot.write().await = Some(snapshot.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::reception::models::Counter;

    #[test]
    fn test_load_returns_last_save() {
        let store = InMemoryReceptionStore::new();
        assert_eq!(tokio_test::block_on(store.load()).unwrap(), None);

        let snapshot = ReceptionSnapshot {
            next_seq: 4,
            tickets: Vec::new(),
            counters: vec![Counter::new(1, "Ana Costa")],
        };
        tokio_test::block_on(store.save(&snapshot)).unwrap();
        assert_eq!(tokio_test::block_on(store.load()).unwrap(), Some(snapshot));
    }
}
