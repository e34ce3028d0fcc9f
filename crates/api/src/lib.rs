//! HTTP API: JSON endpoints over the customer repository.

pub mod app;
