pub mod config;
pub mod db;
pub mod error;
pub mod geo;
pub mod models;
pub mod repository;
pub mod screens;
pub mod services;
pub mod state;
pub mod store;
