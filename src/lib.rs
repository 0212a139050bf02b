pub mod clock;
pub mod config;
pub mod error;
pub mod model;
pub mod policy;
pub mod seed;
pub mod session;
pub mod storage;
pub mod store;
pub mod views;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::AppConfig;
pub use error::{Error, Result};
pub use session::Session;
pub use store::{FleetStore, Snapshot};
