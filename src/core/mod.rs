pub mod etl;
pub mod export;
pub mod join;
pub mod pipeline;
pub mod queries;
pub mod sources;

pub use crate::domain::model::{
    ExtractedData, LanguageIdentifierSet, MovieLanguageRecord, TransformResult,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
