use crate::{config, init_logger};
use cheddargetter::blocking::Client;
use cheddargetter::{Record, Value};
use mock_server::MockServer;

#[test]
fn blocking_client() {
    init_logger();

    let server = MockServer::start();
    server.mock(
        "GET",
        "/plans/get/productCode/MY_PRODUCT",
        "<plans><plan>plan1</plan><plan>plan2</plan></plans>",
    );
    server.mock(
        "GET",
        "/customers/get/productCode/MY_PRODUCT",
        "<error>Bad request: No customers found</error>",
    );
    server.mock(
        "POST",
        "/customers/new/productCode/MY_PRODUCT",
        "<customers><customer>new customer</customer></customers>",
    );

    let client = Client::with_config(config(&server)).unwrap();

    assert_eq!(
        client.list_plans().unwrap(),
        vec![Value::from("plan1"), Value::from("plan2")]
    );
    assert!(client.list_customers().unwrap().is_empty());
    assert_eq!(
        client
            .create_customer(&Record::new().with("name", "justin"))
            .unwrap(),
        Value::from("new customer")
    );

    let requests = server.requests();
    assert_eq!(requests.len(), 3);
    assert!(requests[2].body.contains("name=justin"));
}

#[test]
fn blocking_get_plan_bad_code() {
    init_logger();

    let server = MockServer::start();
    server.mock(
        "GET",
        "/plans/get/productCode/MY_PRODUCT/code/BAD_CODE",
        "<error>bad code</error>",
    );

    let client = Client::with_config(config(&server)).unwrap();
    let error = client.get_plan("BAD_CODE").unwrap_err();

    assert_eq!(error.to_string(), "bad code");
}
