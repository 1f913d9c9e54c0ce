//! Review domain - vendor product proposals and the admin review
//! state machine.

mod aggregate;
mod decision;
mod status;

pub use aggregate::{ProductRequest, ProductRequestDraft};
pub use decision::{ReviewAction, ReviewDecision};
pub use status::ReviewStatus;
