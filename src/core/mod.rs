pub mod activity_builder;
pub mod assembler;
pub mod card_builder;
pub mod defaults;
pub mod etl;
pub mod frequency;
pub mod identifier;
pub mod validator;

pub use crate::domain::model::{RowTable, TransformResult};
pub use crate::domain::ports::{Pipeline, RowSource, Storage};
pub use crate::utils::error::Result;
