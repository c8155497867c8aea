//! Deploy Module
//!
//! Orchestrates the deployment flow for siteship.
//!
//! ## Structure
//!
//! - `options` - Configuration types (`DeployOptions`)
//! - `result` - Result types (`DeployReport`, `UnitResult`)
//! - `use_case` - Core use case logic (`DeployUseCase`)
//!
//! ## Usage
//!
//! ```ignore
//! use siteship::application::deploy::{DeployOptions, DeployUseCase};
//!
//! let use_case = DeployUseCase::new(asset_source, store, partitioner, orchestrator);
//! let report = use_case.execute(&DeployOptions::new("public"))?;
//! ```

mod options;
mod result;
mod use_case;

pub use options::DeployOptions;
pub use result::{DeployReport, UnitResult};
pub use use_case::DeployUseCase;
