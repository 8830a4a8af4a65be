pub mod app;
pub mod config;
pub mod error;
pub mod fetch;
pub mod methods;
pub mod record;

pub use app::{App, RunOutcome, init, init_with};
pub use methods::{METHOD_COUNT, MethodId, generate_all, test_method};
pub use record::{Category, TestRecord};

