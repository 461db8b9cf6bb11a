pub mod handler;
pub mod params;

pub use handler::{to_error_data, OuraMcpServer};
pub use params::{DailySleepRequest, SleepDocumentRequest};
