#![cfg(test)]

mod auth;
mod blocking;
mod errors;

use cheddargetter::{Client, ClientConfig};
use env_logger::Env;
use mock_server::MockServer;

pub(crate) const PRODUCT: &str = "MY_PRODUCT";

pub(crate) fn init_logger() {
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or("trace"))
        .is_test(true)
        .try_init();
}

pub(crate) fn config(server: &MockServer) -> ClientConfig {
    ClientConfig::new("u", "p", PRODUCT).with_base_url(server.base_url())
}

/// A mock server and a client pointed at it.
pub(crate) fn setup() -> (MockServer, Client) {
    init_logger();

    let server = MockServer::start();
    let client = Client::with_config(config(&server)).unwrap();
    (server, client)
}
