// Library for tests to access modules

pub mod aggregate;
pub mod config;
pub mod error;
pub mod metrics;
pub mod models;
pub mod provider;
pub mod report;
pub mod sampler;
pub mod session;
