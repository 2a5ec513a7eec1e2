//! Wire types exchanged with clients and services.
//!
//! All types serialize with camelCase field names.

pub mod hostname;
pub mod network;
pub mod outcome;
pub mod product;

pub use hostname::{HostnameRequest, HostnameResponse};
pub use network::{JsonImportPath, Location, NetworkConfiguration, NetworkSegment};
pub use outcome::{CliOperationOutcome, OutcomeStatus};
pub use product::{ProductConfiguration, ProductModel};
