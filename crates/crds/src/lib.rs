//! Hardware Profile CRD Definitions
//!
//! Kubernetes Custom Resource Definitions for the two generations of
//! hardware profile:
//! - `DashboardHardwareProfile`: legacy kind owned by the dashboard
//!   (`dashboard.opendatahub.io`), being phased out
//! - `HardwareProfile`: replacement kind owned by infrastructure
//!   (`infrastructure.opendatahub.io`)
//!
//! Both kinds share the identifier and toleration types, so a legacy
//! profile can be carried over field by field.

pub mod annotations;
pub mod dashboard_hardware_profile;
pub mod hardware_profile;
pub mod identifiers;
pub mod scheduling;

pub use dashboard_hardware_profile::*;
pub use hardware_profile::*;
pub use identifiers::*;
pub use scheduling::*;
