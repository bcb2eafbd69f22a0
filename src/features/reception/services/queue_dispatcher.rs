use chrono::{DateTime, Utc};

use crate::features::reception::error::{ReceptionError, ReceptionResult};
use crate::features::reception::models::{
    CitizenInfo, Counter, ReceptionSnapshot, ServiceCategory, Ticket, TicketStatus,
};
use crate::features::reception::services::{CounterRegistry, TicketRegistry};

/// Aggregate view of the queue
#[derive(Debug, Clone, PartialEq)]
pub struct QueueStats {
    pub waiting: usize,
    pub in_service: usize,
    pub served: usize,
    pub average_service_minutes: Option<f64>,
}

/// Matches waiting tickets to counters and releases counters when service ends.
///
/// The dispatcher is the only writer of the ticket/counter link. Every
/// operation validates first and mutates after, so a failed call leaves both
/// registries untouched.
#[derive(Debug, Clone)]
pub struct QueueDispatcher {
    tickets: TicketRegistry,
    counters: CounterRegistry,
}

impl QueueDispatcher {
    pub fn new(counters: CounterRegistry) -> Self {
        Self {
            tickets: TicketRegistry::new(),
            counters,
        }
    }

    /// Rebuild from a stored snapshot. Fails with `InvalidState` when busy
    /// counters and in-service tickets do not pair up one to one.
    pub fn from_snapshot(snapshot: ReceptionSnapshot) -> ReceptionResult<Self> {
        let dispatcher = Self {
            tickets: TicketRegistry::restore(snapshot.tickets, snapshot.next_seq),
            counters: CounterRegistry::restore(snapshot.counters),
        };
        dispatcher.check_links()?;
        Ok(dispatcher)
    }

    fn check_links(&self) -> ReceptionResult<()> {
        for counter in self.counters.iter() {
            match (counter.is_busy(), counter.current_ticket.as_deref()) {
                (true, Some(number)) => {
                    let linked = self.tickets.get(number).is_some_and(|t| {
                        t.status == TicketStatus::InService && t.counter == Some(counter.id)
                    });
                    if !linked {
                        return Err(ReceptionError::InvalidState(format!(
                            "Counter {} is busy with {} but that ticket is not in service there",
                            counter.id, number
                        )));
                    }
                }
                (false, None) => {}
                _ => {
                    return Err(ReceptionError::InvalidState(format!(
                        "Counter {} has a mismatched status and current ticket",
                        counter.id
                    )))
                }
            }
        }

        for ticket in self.tickets.iter() {
            let linked = match (ticket.status, ticket.counter) {
                (TicketStatus::InService, Some(id)) => self
                    .counters
                    .get(id)
                    .is_ok_and(|c| c.current_ticket.as_deref() == Some(ticket.number.as_str())),
                (TicketStatus::InService, None) => false,
                (_, counter) => counter.is_none(),
            };
            if !linked {
                return Err(ReceptionError::InvalidState(format!(
                    "Ticket '{}' is {} but its counter link does not match",
                    ticket.number, ticket.status
                )));
            }
        }
        Ok(())
    }

    pub fn snapshot(&self) -> ReceptionSnapshot {
        ReceptionSnapshot {
            next_seq: self.tickets.next_seq(),
            tickets: self.tickets.iter().cloned().collect(),
            counters: self.counters.iter().cloned().collect(),
        }
    }

    pub fn tickets(&self) -> &TicketRegistry {
        &self.tickets
    }

    pub fn counters(&self) -> &CounterRegistry {
        &self.counters
    }

    pub fn issue_ticket(&mut self, category: ServiceCategory, citizen: CitizenInfo) -> Ticket {
        self.tickets.issue(category, citizen, Utc::now())
    }

    pub fn call_next(&mut self, counter_id: u32) -> ReceptionResult<Ticket> {
        self.call_next_at(counter_id, Utc::now())
    }

    pub fn call_next_at(&mut self, counter_id: u32, at: DateTime<Utc>) -> ReceptionResult<Ticket> {
        let counter = self.counters.get(counter_id)?;
        if counter.is_busy() {
            return Err(ReceptionError::InvalidState(format!(
                "Counter {} is busy serving {}",
                counter_id,
                counter.current_ticket.as_deref().unwrap_or("-")
            )));
        }

        let number = self
            .tickets
            .oldest_waiting()
            .map(|t| t.number.clone())
            .ok_or(ReceptionError::EmptyQueue)?;

        let ticket = self.tickets.mark_in_service(&number, counter_id, at)?;
        self.counters.set_busy(counter_id, &number)?;
        Ok(ticket)
    }

    pub fn finish_service(&mut self, counter_id: u32) -> ReceptionResult<Ticket> {
        self.finish_service_at(counter_id, Utc::now())
    }

    pub fn finish_service_at(
        &mut self,
        counter_id: u32,
        at: DateTime<Utc>,
    ) -> ReceptionResult<Ticket> {
        let counter = self.counters.get(counter_id)?;
        let number = match (&counter.current_ticket, counter.is_busy()) {
            (Some(number), true) => number.clone(),
            _ => {
                return Err(ReceptionError::InvalidState(format!(
                    "Counter {} is not serving anyone",
                    counter_id
                )))
            }
        };

        let ticket = self.tickets.mark_served(&number, at)?;
        self.counters.set_free(counter_id)?;
        Ok(ticket)
    }

    pub fn get_ticket(&self, number: &str) -> ReceptionResult<&Ticket> {
        self.tickets
            .get(number)
            .ok_or_else(|| ReceptionError::ticket_not_found(number))
    }

    #[allow(dead_code)]
    pub fn get_counter(&self, counter_id: u32) -> ReceptionResult<&Counter> {
        self.counters.get(counter_id)
    }

    pub fn stats(&self) -> QueueStats {
        let durations: Vec<f64> = self
            .tickets
            .iter()
            .filter_map(|t| t.service_minutes())
            .collect();
        let average_service_minutes = if durations.is_empty() {
            None
        } else {
            Some(durations.iter().sum::<f64>() / durations.len() as f64)
        };

        QueueStats {
            waiting: self.tickets.count(TicketStatus::Waiting),
            in_service: self.tickets.count(TicketStatus::InService),
            served: self.tickets.count(TicketStatus::Served),
            average_service_minutes,
        }
    }
}
