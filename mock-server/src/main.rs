use env_logger::Env;
use log::info;
use mock_server::MockServer;

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("trace")).init();

    let server = MockServer::bind("127.0.0.1:3000");
    server.mock(
        "GET",
        "/plans/get/productCode/MY_PRODUCT",
        "<plans><plan code=\"FREE\"><name>Free</name><recurringChargeAmount>0.00</recurringChargeAmount></plan>\
        <plan code=\"PAID\"><name>Paid</name><recurringChargeAmount>10.00</recurringChargeAmount></plan></plans>",
    );
    server.mock(
        "GET",
        "/customers/get/productCode/MY_PRODUCT",
        "<error id=\"1\" code=\"404\" auxCode=\"\">Bad request: No customers found</error>",
    );
    server.mock(
        "POST",
        "/customers/new/productCode/MY_PRODUCT",
        "<customers><customer code=\"CUSTOMER-1\"><firstName>Justin</firstName></customer></customers>",
    );

    info!("Starting Mock Server at {}", server.base_url());
    loop {
        std::thread::park();
    }
}
