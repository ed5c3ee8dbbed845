pub mod config;
pub mod error;
pub mod flatten;
pub mod load;
pub mod pipeline;
pub mod schema;
pub mod write;

pub use config::{Args, Config};
pub use error::FlattenError;
pub use flatten::{flatten, Flattened, GroupLabel, HighestCounts, LabelScheme, Record};
pub use load::{CellValue, RawTable};
pub use pipeline::RunSummary;
pub use schema::OutputSchema;
