pub mod auth;
pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod pagination;
pub mod router;
pub mod services;
pub mod state;

#[cfg(test)]
pub mod testing;
