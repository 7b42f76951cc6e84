//! Core functionality for presentation storage, editing sessions and configuration

pub mod config;
pub mod deck;
pub mod library;
pub mod presentation;
pub mod session;
pub mod storage;
pub mod store;
