pub mod app;
pub mod cep;
pub mod config;
pub mod consts;
pub mod provider;
pub mod race;
