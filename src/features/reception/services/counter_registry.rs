use crate::features::reception::error::{ReceptionError, ReceptionResult};
use crate::features::reception::models::{Counter, CounterStatus};

/// Fixed set of service counters. Counters are created at setup and never added or removed.
#[derive(Debug, Clone, Default)]
pub struct CounterRegistry {
    counters: Vec<Counter>,
}

impl CounterRegistry {
    /// One free counter per attendant, numbered from 1
    pub fn new<I, S>(attendants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let counters = attendants
            .into_iter()
            .zip(1u32..)
            .map(|(attendant, id)| Counter::new(id, attendant))
            .collect();
        Self { counters }
    }

    pub fn restore(mut counters: Vec<Counter>) -> Self {
        counters.sort_by_key(|c| c.id);
        Self { counters }
    }

    pub fn set_busy(&mut self, counter_id: u32, ticket_number: &str) -> ReceptionResult<()> {
        let counter = self.get_mut(counter_id)?;
        if counter.is_busy() {
            return Err(ReceptionError::InvalidState(format!(
                "Counter {} is already serving {}",
                counter_id,
                counter.current_ticket.as_deref().unwrap_or("-")
            )));
        }

        counter.status = CounterStatus::Busy;
        counter.current_ticket = Some(ticket_number.to_string());
        Ok(())
    }

    /// Frees the counter and returns the ticket it was serving, if any
    pub fn set_free(&mut self, counter_id: u32) -> ReceptionResult<Option<String>> {
        let counter = self.get_mut(counter_id)?;
        counter.status = CounterStatus::Free;
        Ok(counter.current_ticket.take())
    }

    pub fn get(&self, counter_id: u32) -> ReceptionResult<&Counter> {
        self.counters
            .iter()
            .find(|c| c.id == counter_id)
            .ok_or_else(|| ReceptionError::counter_not_found(counter_id))
    }

    fn get_mut(&mut self, counter_id: u32) -> ReceptionResult<&mut Counter> {
        self.counters
            .iter_mut()
            .find(|c| c.id == counter_id)
            .ok_or_else(|| ReceptionError::counter_not_found(counter_id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Counter> {
        self.counters.iter()
    }

    pub fn len(&self) -> usize {
        self.counters.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }
}
