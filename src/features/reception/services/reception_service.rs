use std::sync::Arc;

use tokio::sync::Mutex;

use crate::core::config::ReceptionConfig;
use crate::core::error::{AppError, Result};
use crate::features::reception::dtos::{
    CategoryResponseDto, CounterResponseDto, IssueTicketDto, IssuedTicketDto, QueueEntryDto,
    QueueStatsDto, TicketResponseDto, TicketSlipDto,
};
use crate::features::reception::error::{ReceptionError, ReceptionResult};
use crate::features::reception::models::{CitizenInfo, ServiceCategory};
use crate::features::reception::services::{CounterRegistry, QueueDispatcher};
use crate::features::reception::store::ReceptionStore;
use crate::shared::validation::normalize_cpf;

/// Shared front-desk service.
///
/// All mutations run under one lock: the operation is applied to a copy of
/// the dispatcher, the copy is persisted, and only then does it replace the
/// live state. Two counters can never be handed the same ticket, and a failed
/// save leaves nothing half-applied.
pub struct ReceptionService {
    dispatcher: Mutex<QueueDispatcher>,
    store: Arc<dyn ReceptionStore>,
    municipality: String,
}

impl ReceptionService {
    /// Load the stored queue, or seed fresh counters from configuration on first start
    pub async fn bootstrap(store: Arc<dyn ReceptionStore>, config: &ReceptionConfig) -> Result<Self> {
        let dispatcher = match store.load().await? {
            Some(snapshot) => {
                let dispatcher = QueueDispatcher::from_snapshot(snapshot).map_err(|e| {
                    AppError::Internal(format!("Stored reception state is inconsistent: {}", e))
                })?;
                if dispatcher.counters().len() != config.attendants.len() {
                    tracing::warn!(
                        "Stored counters ({}) differ from RECEPTION_COUNTERS ({}); keeping stored setup",
                        dispatcher.counters().len(),
                        config.attendants.len()
                    );
                }
                tracing::info!(
                    "Reception state restored: tickets={}, counters={}",
                    dispatcher.tickets().len(),
                    dispatcher.counters().len()
                );
                dispatcher
            }
            None => {
                let dispatcher =
                    QueueDispatcher::new(CounterRegistry::new(config.attendants.iter().cloned()));
                store.save(&dispatcher.snapshot()).await?;
                tracing::info!(
                    "Reception state seeded with {} counters",
                    dispatcher.counters().len()
                );
                dispatcher
            }
        };

        Ok(Self {
            dispatcher: Mutex::new(dispatcher),
            store,
            municipality: config.municipality.clone(),
        })
    }

    /// Apply `op` atomically: on error, or if persisting fails, live state is unchanged
    async fn mutate<T, F>(&self, op: F) -> Result<ReceptionResult<T>>
    where
        F: FnOnce(&mut QueueDispatcher) -> ReceptionResult<T>,
    {
        let mut guard = self.dispatcher.lock().await;
        let mut working = guard.clone();

        let outcome = match op(&mut working) {
            Ok(value) => value,
            Err(e) => return Ok(Err(e)),
        };

        self.store.save(&working.snapshot()).await?;
        *guard = working;
        Ok(Ok(outcome))
    }

    pub fn categories(&self) -> Vec<CategoryResponseDto> {
        ServiceCategory::ALL.into_iter().map(Into::into).collect()
    }

    pub async fn issue_ticket(&self, dto: IssueTicketDto) -> Result<IssuedTicketDto> {
        let cpf = match dto.citizen_cpf.as_deref() {
            Some(raw) => Some(normalize_cpf(raw).ok_or_else(|| {
                AppError::Validation("CPF must contain exactly 11 digits".to_string())
            })?),
            None => None,
        };
        let citizen = CitizenInfo {
            name: dto
                .citizen_name
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty()),
            cpf,
        };

        let ticket = self
            .mutate(|d| Ok(d.issue_ticket(dto.category, citizen)))
            .await??;

        tracing::info!(
            "Ticket issued: number={}, category={}",
            ticket.number,
            ticket.category
        );

        let slip = TicketSlipDto {
            municipality: self.municipality.clone(),
            category_label: ticket.category.label().to_string(),
            number: ticket.number.clone(),
            issued_at: ticket.issued_at,
        };
        Ok(IssuedTicketDto {
            ticket: ticket.into(),
            slip,
        })
    }

    /// Assign the oldest waiting ticket to the counter. `None` means nobody is waiting.
    pub async fn call_next(&self, counter_id: u32) -> Result<Option<TicketResponseDto>> {
        match self.mutate(|d| d.call_next(counter_id)).await? {
            Ok(ticket) => {
                tracing::info!("Calling ticket {} to counter {}", ticket.number, counter_id);
                Ok(Some(ticket.into()))
            }
            Err(ReceptionError::EmptyQueue) => {
                tracing::info!("Counter {} called but no tickets are waiting", counter_id);
                Ok(None)
            }
            Err(e) => {
                tracing::warn!("Call next refused for counter {}: {}", counter_id, e);
                Err(e.into())
            }
        }
    }

    pub async fn finish_service(&self, counter_id: u32) -> Result<TicketResponseDto> {
        match self.mutate(|d| d.finish_service(counter_id)).await? {
            Ok(ticket) => {
                tracing::info!(
                    "Service finished: ticket={}, counter={}",
                    ticket.number,
                    counter_id
                );
                Ok(ticket.into())
            }
            Err(e) => {
                tracing::warn!("Finish service refused for counter {}: {}", counter_id, e);
                Err(e.into())
            }
        }
    }

    pub async fn get_ticket(&self, number: &str) -> Result<TicketResponseDto> {
        let dispatcher = self.dispatcher.lock().await;
        let ticket = dispatcher.get_ticket(number)?.clone();
        Ok(ticket.into())
    }

    /// Every ticket issued, in arrival order
    pub async fn list_tickets(&self) -> Vec<TicketResponseDto> {
        let dispatcher = self.dispatcher.lock().await;
        dispatcher
            .tickets()
            .iter()
            .cloned()
            .map(Into::into)
            .collect()
    }

    pub async fn waiting_queue(&self) -> Vec<QueueEntryDto> {
        let dispatcher = self.dispatcher.lock().await;
        dispatcher
            .tickets()
            .waiting()
            .enumerate()
            .map(|(i, t)| QueueEntryDto::new(i, t))
            .collect()
    }

    pub async fn list_counters(&self) -> Vec<CounterResponseDto> {
        let dispatcher = self.dispatcher.lock().await;
        dispatcher
            .counters()
            .iter()
            .cloned()
            .map(Into::into)
            .collect()
    }

    pub async fn stats(&self) -> QueueStatsDto {
        self.dispatcher.lock().await.stats().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::reception::models::{CounterStatus, ReceptionSnapshot, TicketStatus};
    use crate::features::reception::store::InMemoryReceptionStore;
    use crate::shared::test_helpers::{issue_dto, reception_config};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};

    /// Store whose saves can be switched to fail
    #[derive(Default)]
    struct FlakyStore {
        inner: InMemoryReceptionStore,
        failing: AtomicBool,
    }

    #[async_trait]
    impl ReceptionStore for FlakyStore {
        async fn load(&self) -> Result<Option<ReceptionSnapshot>> {
            self.inner.load().await
        }

        async fn save(&self, snapshot: &ReceptionSnapshot) -> Result<()> {
            if self.failing.load(Ordering::SeqCst) {
                return Err(AppError::Internal("store offline".to_string()));
            }
            self.inner.save(snapshot).await
        }
    }

    async fn service() -> (ReceptionService, Arc<InMemoryReceptionStore>) {
        let store = Arc::new(InMemoryReceptionStore::new());
        let service = ReceptionService::bootstrap(store.clone(), &reception_config())
            .await
            .unwrap();
        (service, store)
    }

    #[tokio::test]
    async fn test_bootstrap_seeds_counters_and_persists() {
        let (service, store) = service().await;

        let counters = service.list_counters().await;
        assert_eq!(counters.len(), 3);
        assert_eq!(counters[0].attendant, "Maria Santos");

        let saved = store.load().await.unwrap().unwrap();
        assert_eq!(saved.counters.len(), 3);
        assert!(saved.tickets.is_empty());
    }

    #[tokio::test]
    async fn test_bootstrap_prefers_stored_snapshot() {
        let (service, store) = service().await;
        service
            .issue_ticket(issue_dto(ServiceCategory::Certificate))
            .await
            .unwrap();

        let mut config = reception_config();
        config.attendants = vec!["Someone Else".to_string()];
        let reloaded = ReceptionService::bootstrap(store, &config).await.unwrap();

        assert_eq!(reloaded.list_counters().await.len(), 3);
        assert_eq!(reloaded.list_tickets().await[0].number, "C001");
    }

    #[tokio::test]
    async fn test_bootstrap_refuses_inconsistent_snapshot() {
        let (service, store) = service().await;
        service
            .issue_ticket(issue_dto(ServiceCategory::Protocol))
            .await
            .unwrap();

        let mut snapshot = store.load().await.unwrap().unwrap();
        snapshot.counters[0].status = CounterStatus::Busy;
        snapshot.counters[0].current_ticket = Some("P001".to_string());
        store.save(&snapshot).await.unwrap();

        let result = ReceptionService::bootstrap(store, &reception_config()).await;
        assert!(matches!(result, Err(AppError::Internal(_))));
    }

    #[tokio::test]
    async fn test_issue_ticket_normalizes_citizen_and_builds_slip() {
        let (service, store) = service().await;
        let dto = IssueTicketDto {
            category: ServiceCategory::PropertyTax,
            citizen_name: Some("  Ana Costa ".to_string()),
            citizen_cpf: Some("12345678909".to_string()),
        };

        let issued = service.issue_ticket(dto).await.unwrap();
        assert_eq!(issued.ticket.number, "I001");
        assert_eq!(issued.ticket.citizen_name.as_deref(), Some("Ana Costa"));
        assert_eq!(issued.slip.municipality, "Prefeitura Municipal");
        assert_eq!(issued.slip.category_label, "IPTU");

        let saved = store.load().await.unwrap().unwrap();
        assert_eq!(saved.tickets[0].citizen.cpf.as_deref(), Some("123.456.789-09"));
    }

    #[tokio::test]
    async fn test_call_next_empty_queue_returns_none() {
        let (service, _) = service().await;
        assert!(service.call_next(1).await.unwrap().is_none());
        assert_eq!(service.stats().await.in_service, 0);
    }

    #[tokio::test]
    async fn test_call_next_maps_errors() {
        let (service, _) = service().await;
        service
            .issue_ticket(issue_dto(ServiceCategory::Protocol))
            .await
            .unwrap();
        service
            .issue_ticket(issue_dto(ServiceCategory::Protocol))
            .await
            .unwrap();

        assert!(matches!(
            service.call_next(7).await,
            Err(AppError::NotFound(_))
        ));
        service.call_next(1).await.unwrap();
        assert!(matches!(
            service.call_next(1).await,
            Err(AppError::Conflict(_))
        ));
        assert!(matches!(
            service.finish_service(2).await,
            Err(AppError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn test_failed_save_leaves_state_unchanged() {
        let store = Arc::new(FlakyStore::default());
        let service = ReceptionService::bootstrap(store.clone(), &reception_config())
            .await
            .unwrap();
        service
            .issue_ticket(issue_dto(ServiceCategory::Protocol))
            .await
            .unwrap();

        store.failing.store(true, Ordering::SeqCst);
        assert!(service.call_next(1).await.is_err());
        assert!(service
            .issue_ticket(issue_dto(ServiceCategory::License))
            .await
            .is_err());

        let ticket = service.get_ticket("P001").await.unwrap();
        assert_eq!(ticket.status, TicketStatus::Waiting);
        assert_eq!(service.list_tickets().await.len(), 1);
        assert_eq!(service.list_counters().await[0].current_ticket, None);

        store.failing.store(false, Ordering::SeqCst);
        let called = service.call_next(1).await.unwrap().unwrap();
        assert_eq!(called.number, "P001");
    }

    #[tokio::test]
    async fn test_concurrent_calls_never_share_a_ticket() {
        let (service, _) = service().await;
        let service = Arc::new(service);
        for _ in 0..2 {
            service
                .issue_ticket(issue_dto(ServiceCategory::Other))
                .await
                .unwrap();
        }

        let handles: Vec<_> = (1..=3)
            .map(|id| {
                let service = Arc::clone(&service);
                tokio::spawn(async move { service.call_next(id).await })
            })
            .collect();

        let mut assigned = Vec::new();
        for handle in handles {
            if let Some(ticket) = handle.await.unwrap().unwrap() {
                assigned.push(ticket.number);
            }
        }
        assigned.sort();
        assert_eq!(assigned, vec!["O001".to_string(), "O002".to_string()]);

        let stats = service.stats().await;
        assert_eq!(stats.in_service, 2);
        assert_eq!(stats.waiting, 0);
    }
}
