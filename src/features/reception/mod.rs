//! In-person reception queue ("Recepção").
//!
//! Citizens take a category-prefixed ticket at the front desk; counters call
//! the oldest waiting ticket and finish service. Queue order is strict FIFO
//! across categories.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/reception/categories` | Category catalogue |
//! | POST | `/api/reception/tickets` | Issue a ticket |
//! | GET | `/api/reception/tickets` | All tickets in arrival order |
//! | GET | `/api/reception/tickets/{number}` | One ticket |
//! | GET | `/api/reception/queue` | Waiting line |
//! | GET | `/api/reception/counters` | Counters and their current ticket |
//! | POST | `/api/reception/counters/{id}/call-next` | Call next ticket |
//! | POST | `/api/reception/counters/{id}/finish` | Finish service |
//! | GET | `/api/reception/stats` | Queue statistics |

pub mod dtos;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;

pub use services::ReceptionService;
pub use store::{InMemoryReceptionStore, PgReceptionStore, ReceptionStore};
