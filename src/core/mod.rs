//! Framework-independent core: configuration, the HTTP client with token
//! refresh, domain services, session state and route access policy.

pub mod cache;
pub mod config;
pub mod error;
pub mod guard;
pub mod http;
pub mod models;
pub mod navigation;
pub mod notify;
pub mod query;
pub mod services;
pub mod session;
pub mod storage;

#[cfg(test)]
pub(crate) mod test_support;
