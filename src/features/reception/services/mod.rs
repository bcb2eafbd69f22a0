mod counter_registry;
mod queue_dispatcher;
mod reception_service;
mod ticket_registry;

pub use counter_registry::CounterRegistry;
pub use queue_dispatcher::{QueueDispatcher, QueueStats};
pub use reception_service::ReceptionService;
pub use ticket_registry::TicketRegistry;
