pub mod assemble;
pub mod error;
pub mod genesis;
pub mod ingest;
pub mod migrate;
pub mod msg;
pub mod pipeline;
pub mod state;
pub mod weights;

pub use error::DistributionError;
pub use pipeline::{distribute, distribute_with_params, DistributionOutput};
