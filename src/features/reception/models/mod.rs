mod category;
mod counter;
mod snapshot;
mod ticket;

pub use category::ServiceCategory;
pub use counter::{Counter, CounterStatus};
pub use snapshot::ReceptionSnapshot;
pub use ticket::{CitizenInfo, Ticket, TicketStatus};
