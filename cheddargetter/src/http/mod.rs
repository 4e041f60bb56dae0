pub mod config;
pub(crate) mod form;
pub(crate) mod http_client;
pub(crate) mod xml;
