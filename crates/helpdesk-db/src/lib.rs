//! Database repositories for the helpdesk data access layer.
//!
//! The intake pipeline only touches storage through the [`IntakeRepository`]
//! trait so the orchestrator can be exercised without Postgres; the
//! production implementation is [`TicketRepository`] over a `PgPool`.

mod repository;

pub use repository::{IntakeRepository, TicketRepository};
