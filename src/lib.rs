pub mod api;
pub mod config;
pub mod consumer;
pub mod engine;
pub mod entities;
pub mod error;
pub mod external;
pub mod polyline;
pub mod server;
