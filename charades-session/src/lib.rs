pub mod collaborators;
pub mod config;
pub mod controller;
pub mod errors;
pub mod http;
pub mod ticker;

pub use collaborators::*;
pub use config::ClientConfig;
pub use controller::*;
pub use errors::ClientError;
pub use http::HttpCharadesApi;
pub use ticker::{Tick, Ticker};
