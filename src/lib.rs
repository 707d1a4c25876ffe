#![doc = "The `taskpad` library crate."]
#![doc = ""]
#![doc = "This crate contains the authentication core (password hashing, token codec,"]
#![doc = "identity resolution, ownership checks), domain models, storage repositories,"]
#![doc = "routing configuration, and error handling for the Taskpad service."]
#![doc = "It is used by the main binary (`main.rs`) to construct and run the application."]

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
