pub mod fetcher;

pub use crate::domain::model::{ApiToken, DateRange};
pub use crate::domain::ports::{ConfigProvider, SleepSource};
pub use crate::utils::error::Result;
