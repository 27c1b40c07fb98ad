//! Oversized-line handling drops the connection (spec §8.6).

mod common;

use common::{TestClient, TestServer};

#[tokio::test]
async fn oversized_line_closes_the_connection() {
    let server = TestServer::spawn(17021).await.expect("spawn server");
    let mut client = TestClient::connect(&server.address()).await.expect("connect");
    client.register("Batman", "Bruce Wayne").await.unwrap();

    let huge = "X".repeat(512);
    client.send_raw(&format!("PING :{huge}")).await.unwrap();

    let result = client
        .recv_line_timeout(std::time::Duration::from_secs(2))
        .await;
    assert!(result.is_err(), "expected the socket to be closed, got: {result:?}");
}
