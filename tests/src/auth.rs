use crate::{PRODUCT, config, setup};
use cheddargetter::{Client, ClientConfig, Record};

// base64("u:p")
const BASIC_U_P: &str = "Basic dTpw";

#[tokio::test]
async fn every_request_carries_basic_auth() {
    let (server, client) = setup();
    server.mock("GET", "/plans/get/productCode/MY_PRODUCT", "<plans/>");
    server.mock(
        "POST",
        "/customers/new/productCode/MY_PRODUCT",
        "<customers><customer>new customer</customer></customers>",
    );
    server.mock(
        "POST",
        "/customers/delete/productCode/MY_PRODUCT/code/JB",
        "<success/>",
    );

    client.list_plans().await.unwrap();
    client
        .create_customer(&Record::new().with("name", "justin"))
        .await
        .unwrap();
    client.delete_customer("JB").await.unwrap();

    let requests = server.requests();
    assert_eq!(requests.len(), 3);
    for request in requests {
        assert_eq!(request.authorization.as_deref(), Some(BASIC_U_P));
    }
}

#[tokio::test]
async fn clients_keep_their_own_credentials() {
    let (server, client) = setup();
    server.mock("GET", "/plans/get/productCode/MY_PRODUCT", "<plans/>");
    server.mock("GET", "/plans/get/productCode/OTHER", "<plans/>");

    let other = Client::with_config(
        ClientConfig::new("someone", "else", "OTHER").with_base_url(server.base_url()),
    )
    .unwrap();

    client.list_plans().await.unwrap();
    other.list_plans().await.unwrap();
    client.list_plans().await.unwrap();

    let authorizations: Vec<Option<String>> = server
        .requests()
        .into_iter()
        .map(|request| request.authorization)
        .collect();

    assert_eq!(
        authorizations,
        vec![
            Some(BASIC_U_P.to_string()),
            Some("Basic c29tZW9uZTplbHNl".to_string()),
            Some(BASIC_U_P.to_string()),
        ]
    );
}

#[tokio::test]
async fn construction_sends_nothing() {
    let (server, _client) = setup();
    let another = Client::with_config(config(&server)).unwrap();

    assert!(server.requests().is_empty());
    assert_eq!(another.product_code(), PRODUCT);
}
