//! Domain Services
//!
//! Pure business logic services that operate on domain entities.
//! These services have no I/O dependencies and are easily testable.

mod orchestrator;
mod partitioner;
mod rewriter;
mod sequencer;

pub use orchestrator::{DeploymentOrchestrator, DEFAULT_DEPLOYMENT_ID, DEFAULT_INVALIDATION_PATH};
pub use partitioner::{AssetPartitioner, Partition};
pub use rewriter::{
    rewrite_uri, EdgeEvent, EdgeRequest, EdgeRequestRewriter, ExtensionMatch, RouteKind,
    DEFAULT_INDEX_DOCUMENT,
};
pub use sequencer::{RunOutcome, SequenceError, Sequencer, UnitStatus};
