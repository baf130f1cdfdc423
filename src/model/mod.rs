//! Property records and their owned collections
//!
//! Field names follow the bundled dataset (French keys) through serde renames.

pub mod activity;
pub mod lease;
pub mod property;

pub use activity::{Priority, Project, Task};
pub use lease::{Lease, LeaseStatus, LegacyLease, StructuredLease, SubLease};
pub use property::{CategoryFacet, Property, PropertyStatus, SecurityLevel};
