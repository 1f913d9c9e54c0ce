//! Product domain - vendor-owned subscription listings.

mod aggregate;
mod plan;
mod profile;
mod service_type;
mod status;

pub use aggregate::Product;
pub use plan::PricingPlan;
pub use profile::AccountProfile;
pub use service_type::ServiceType;
pub use status::ProductStatus;
