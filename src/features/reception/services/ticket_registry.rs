use chrono::{DateTime, Utc};

use crate::features::reception::error::{ReceptionError, ReceptionResult};
use crate::features::reception::models::{CitizenInfo, ServiceCategory, Ticket, TicketStatus};

/// Ordered collection of every ticket issued in this run, plus the numbering scheme.
///
/// Tickets are only appended. Vector order is arrival order and matches
/// each ticket's `arrival` index.
#[derive(Debug, Clone)]
pub struct TicketRegistry {
    tickets: Vec<Ticket>,
    next_seq: u64,
}

impl Default for TicketRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TicketRegistry {
    pub fn new() -> Self {
        Self {
            tickets: Vec::new(),
            next_seq: 1,
        }
    }

    /// Rebuild from persisted tickets. `next_seq` is raised past any arrival already stored.
    pub fn restore(mut tickets: Vec<Ticket>, next_seq: u64) -> Self {
        tickets.sort_by_key(|t| t.arrival);
        let floor = tickets.last().map(|t| t.arrival + 1).unwrap_or(1);
        Self {
            tickets,
            next_seq: next_seq.max(floor),
        }
    }

    pub fn next_seq(&self) -> u64 {
        self.next_seq
    }

    /// Issue a waiting ticket: takes the next number of the shared sequence,
    /// which is also the ticket's arrival index. Citizen details may be empty.
    pub fn issue(
        &mut self,
        category: ServiceCategory,
        citizen: CitizenInfo,
        issued_at: DateTime<Utc>,
    ) -> Ticket {
        let seq = self.next_seq;
        self.next_seq += 1;

        let ticket = Ticket {
            number: category.ticket_number(seq),
            category,
            status: TicketStatus::Waiting,
            counter: None,
            arrival: seq,
            issued_at,
            called_at: None,
            served_at: None,
            citizen,
        };
        self.tickets.push(ticket.clone());
        ticket
    }

    pub fn mark_in_service(
        &mut self,
        number: &str,
        counter_id: u32,
        at: DateTime<Utc>,
    ) -> ReceptionResult<Ticket> {
        let ticket = self.get_mut(number)?;
        if ticket.status != TicketStatus::Waiting {
            return Err(ReceptionError::InvalidState(format!(
                "Ticket '{}' is {}, not waiting",
                number, ticket.status
            )));
        }

        ticket.status = TicketStatus::InService;
        ticket.counter = Some(counter_id);
        ticket.called_at = Some(at);
        Ok(ticket.clone())
    }

    pub fn mark_served(&mut self, number: &str, at: DateTime<Utc>) -> ReceptionResult<Ticket> {
        let ticket = self.get_mut(number)?;
        if ticket.status != TicketStatus::InService {
            return Err(ReceptionError::InvalidState(format!(
                "Ticket '{}' is {}, not in service",
                number, ticket.status
            )));
        }

        ticket.status = TicketStatus::Served;
        ticket.counter = None;
        ticket.served_at = Some(at);
        Ok(ticket.clone())
    }

    pub fn get(&self, number: &str) -> Option<&Ticket> {
        self.tickets.iter().find(|t| t.number == number)
    }

    fn get_mut(&mut self, number: &str) -> ReceptionResult<&mut Ticket> {
        self.tickets
            .iter_mut()
            .find(|t| t.number == number)
            .ok_or_else(|| ReceptionError::ticket_not_found(number))
    }

    /// Earliest-arrived waiting ticket, regardless of category
    pub fn oldest_waiting(&self) -> Option<&Ticket> {
        self.tickets
            .iter()
            .filter(|t| t.is_waiting())
            .min_by_key(|t| t.arrival)
    }

    /// Waiting tickets in arrival order
    pub fn waiting(&self) -> impl Iterator<Item = &Ticket> {
        self.tickets.iter().filter(|t| t.is_waiting())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ticket> {
        self.tickets.iter()
    }

    pub fn count(&self, status: TicketStatus) -> usize {
        self.tickets.iter().filter(|t| t.status == status).count()
    }

    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashMap, HashSet};

    impl TicketRegistry {
        fn issue_ticket(&mut self, category: ServiceCategory) -> Ticket {
            self.issue(category, CitizenInfo::default(), Utc::now())
        }
    }

    #[test]
    fn test_issue_ticket_numbers_share_one_sequence() {
        let mut registry = TicketRegistry::new();

        let p = registry.issue_ticket(ServiceCategory::Protocol);
        let c = registry.issue_ticket(ServiceCategory::Certificate);
        let p2 = registry.issue_ticket(ServiceCategory::Protocol);

        assert_eq!(p.number, "P001");
        assert_eq!(c.number, "C002");
        assert_eq!(p2.number, "P003");
        assert!(p.arrival < c.arrival && c.arrival < p2.arrival);
        assert_eq!(p.status, TicketStatus::Waiting);
        assert_eq!(p.counter, None);
    }

    #[test]
    fn test_numbers_unique_and_increasing_per_category() {
        let mut registry = TicketRegistry::new();
        let mut seen = HashSet::new();
        let mut last: HashMap<ServiceCategory, u64> = HashMap::new();

        for i in 0..200 {
            let category = ServiceCategory::ALL[(i * 7) % ServiceCategory::ALL.len()];
            let ticket = registry.issue_ticket(category);

            assert!(seen.insert(ticket.number.clone()), "duplicate {}", ticket.number);
            let seq: u64 = ticket.number[1..].parse().unwrap();
            if let Some(prev) = last.insert(category, seq) {
                assert!(seq > prev);
            }
        }
        assert_eq!(registry.len(), 200);
    }

    #[test]
    fn test_mark_in_service_and_served() {
        let mut registry = TicketRegistry::new();
        let ticket = registry.issue_ticket(ServiceCategory::License);
        let now = Utc::now();

        let in_service = registry.mark_in_service(&ticket.number, 2, now).unwrap();
        assert_eq!(in_service.status, TicketStatus::InService);
        assert_eq!(in_service.counter, Some(2));
        assert_eq!(in_service.called_at, Some(now));

        let served = registry.mark_served(&ticket.number, now).unwrap();
        assert_eq!(served.status, TicketStatus::Served);
        assert_eq!(served.counter, None);
        assert_eq!(served.served_at, Some(now));
    }

    #[test]
    fn test_mark_in_service_errors() {
        let mut registry = TicketRegistry::new();
        let ticket = registry.issue_ticket(ServiceCategory::Other);
        let now = Utc::now();

        assert!(matches!(
            registry.mark_in_service("X999", 1, now),
            Err(ReceptionError::NotFound(_))
        ));

        registry.mark_in_service(&ticket.number, 1, now).unwrap();
        assert!(matches!(
            registry.mark_in_service(&ticket.number, 2, now),
            Err(ReceptionError::InvalidState(_))
        ));
        // The failed call must not have relinked the ticket
        assert_eq!(registry.get(&ticket.number).unwrap().counter, Some(1));
    }

    #[test]
    fn test_mark_served_errors() {
        let mut registry = TicketRegistry::new();
        let ticket = registry.issue_ticket(ServiceCategory::Protocol);

        assert!(matches!(
            registry.mark_served("X999", Utc::now()),
            Err(ReceptionError::NotFound(_))
        ));
        assert!(matches!(
            registry.mark_served(&ticket.number, Utc::now()),
            Err(ReceptionError::InvalidState(_))
        ));
        assert_eq!(
            registry.get(&ticket.number).unwrap().status,
            TicketStatus::Waiting
        );
    }

    #[test]
    fn test_oldest_waiting_uses_arrival_not_timestamp() {
        let mut registry = TicketRegistry::new();
        let same_instant = Utc::now();
        let citizen = CitizenInfo::default();

        let first = registry.issue(ServiceCategory::PropertyTax, citizen.clone(), same_instant);
        registry.issue(ServiceCategory::Protocol, citizen.clone(), same_instant);
        registry.issue(ServiceCategory::Certificate, citizen, same_instant);

        assert_eq!(registry.oldest_waiting().unwrap().number, first.number);

        registry
            .mark_in_service(&first.number, 1, same_instant)
            .unwrap();
        assert_eq!(registry.oldest_waiting().unwrap().number, "P002");
        assert_eq!(registry.waiting().count(), 2);
    }

    #[test]
    fn test_restore_continues_numbering() {
        let mut registry = TicketRegistry::new();
        registry.issue_ticket(ServiceCategory::Protocol);
        registry.issue_ticket(ServiceCategory::Protocol);
        let tickets: Vec<Ticket> = registry.iter().cloned().collect();

        // A stale sequence value is raised past the stored arrivals
        let mut restored = TicketRegistry::restore(tickets, 1);
        assert_eq!(restored.next_seq(), 3);
        assert_eq!(
            restored.issue_ticket(ServiceCategory::Certificate).number,
            "C003"
        );
    }
}
