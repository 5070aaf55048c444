//! Domain models shared across helpdesk components.

mod attachment;
mod ticket;

pub use attachment::{Attachment, AttachmentResponse};
pub use ticket::{Ticket, TicketResponse, TicketStatus};
