#![forbid(unsafe_code)]

pub mod error;
pub mod practice_service;
pub mod sampler;
pub mod view;

pub use error::PracticeError;
pub use practice_service::PracticeService;
pub use sampler::Sampler;
pub use view::{FieldView, PracticeCard, PracticeStats, TableInfo};

pub use practice_core::SizeHint;
pub use practice_core::model::SessionId;
pub use storage::{LoadedTable, TableSource};
