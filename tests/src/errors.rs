use crate::{config, init_logger, setup};
use cheddargetter::{Client, ClientConfig, SdkError, TransportError};
use std::time::Duration;

#[tokio::test]
async fn server_error_without_error_element() {
    let (server, client) = setup();
    server.mock_with_status(
        "GET",
        "/plans/get/productCode/MY_PRODUCT",
        500,
        "Internal Server Error",
    );

    match client.list_plans().await {
        Err(SdkError::Transport(TransportError::Status { status, body })) => {
            assert_eq!(status, 500);
            assert_eq!(body, "Internal Server Error");
        }

        other => panic!("expected a status error, got {other:?}"),
    }
}

#[tokio::test]
async fn unknown_path_is_a_transport_error() {
    let (_server, client) = setup();

    assert!(matches!(
        client.get_customer("NOBODY").await,
        Err(SdkError::Transport(TransportError::Status { status: 404, .. }))
    ));
}

#[tokio::test]
async fn malformed_xml() {
    let (server, client) = setup();
    server.mock(
        "GET",
        "/plans/get/productCode/MY_PRODUCT",
        "<plans><plan>oops</plans>",
    );

    assert!(matches!(
        client.list_plans().await,
        Err(SdkError::Transport(TransportError::MalformedXml(_)))
    ));
}

#[tokio::test]
async fn remote_errors_are_not_swallowed_by_any_operation() {
    let (server, client) = setup();
    for (method, path) in [
        ("GET", "/plans/get/productCode/MY_PRODUCT"),
        ("GET", "/customers/get/productCode/MY_PRODUCT"),
        ("POST", "/customers/cancel/productCode/MY_PRODUCT/code/JB"),
        ("POST", "/customers/delete/productCode/MY_PRODUCT/code/JB"),
        ("POST", "/customers/delete-all/confirm/1/productCode/MY_PRODUCT"),
    ] {
        server.mock(method, path, "<error>Something broke</error>");
    }

    let results = [
        client.list_plans().await.map(|_| ()),
        client.list_customers().await.map(|_| ()),
        client.cancel_subscription("JB").await.map(|_| ()),
        client.delete_customer("JB").await.map(|_| ()),
        client.delete_all_customers().await.map(|_| ()),
    ];

    for result in results {
        assert_eq!(
            result.unwrap_err().remote_message(),
            Some("Something broke")
        );
    }
}

#[tokio::test]
async fn connection_refused() {
    init_logger();

    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);

    let client = Client::with_config(
        ClientConfig::new("u", "p", "MY_PRODUCT")
            .with_base_url(format!("http://{address}/xml"))
            .with_timeout(Duration::from_secs(5)),
    )
    .unwrap();

    assert!(matches!(
        client.list_plans().await,
        Err(SdkError::Transport(TransportError::Request(_)))
    ));
}

#[tokio::test]
async fn plain_text_success_is_not_an_empty_list() {
    let (server, client) = setup();
    server.mock(
        "GET",
        "/plans/get/productCode/MY_PRODUCT",
        "Service temporarily unavailable",
    );
    server.mock(
        "GET",
        "/customers/get/productCode/MY_PRODUCT/code/JB",
        "Service temporarily unavailable",
    );

    assert!(matches!(
        client.list_plans().await,
        Err(SdkError::Transport(TransportError::MalformedXml(_)))
    ));
    assert!(matches!(
        client.get_customer("JB").await,
        Err(SdkError::Transport(TransportError::MalformedXml(_)))
    ));
}

#[tokio::test]
async fn slow_reply_times_out() {
    let (server, _client) = setup();
    server.mock_with_delay(
        "GET",
        "/plans/get/productCode/MY_PRODUCT",
        "<plans><plan>late</plan></plans>",
        Duration::from_secs(2),
    );

    let client =
        Client::with_config(config(&server).with_timeout(Duration::from_millis(100))).unwrap();

    match client.list_plans().await {
        Err(SdkError::Transport(TransportError::Request(error))) => assert!(error.is_timeout()),
        other => panic!("expected a timeout, got {other:?}"),
    }
}

#[tokio::test]
async fn slow_reply_within_timeout() {
    let (server, _client) = setup();
    server.mock_with_delay(
        "GET",
        "/plans/get/productCode/MY_PRODUCT",
        "<plans><plan>late</plan></plans>",
        Duration::from_millis(50),
    );

    let client =
        Client::with_config(config(&server).with_timeout(Duration::from_secs(5))).unwrap();

    assert_eq!(client.list_plans().await.unwrap().len(), 1);
}
