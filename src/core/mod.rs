pub mod connectivity;
pub mod engine;
pub mod forces;
pub mod output;
pub mod pipeline;
pub mod placement;
pub mod runner;
pub mod territory;

pub use crate::domain::model::{AppRecord, LayoutOutput};
pub use crate::domain::ports::{ConfigProvider, InputSource, Pipeline, Storage};
pub use crate::utils::error::Result;
