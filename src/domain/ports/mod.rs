//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod asset_source;
pub mod deploy_events;
pub mod transfer;

pub use asset_source::{AssetSource, AssetSourceError};
pub use deploy_events::{DeployEvent, DeployEventSink, NoopEventSink};
pub use transfer::{TransferCollaborator, TransferError, UnitReport};
