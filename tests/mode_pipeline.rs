//! Channel-mode query and no-op suppression invariants (spec §8, items 6-7).

mod common;

use common::{TestClient, TestServer};

#[tokio::test]
async fn mode_query_never_mutates_and_reports_defaults() {
    let server = TestServer::spawn(17031).await.expect("spawn server");
    let mut batman = TestClient::connect(&server.address()).await.expect("connect");
    batman.register("Batman", "Bruce Wayne").await.unwrap();
    batman.join("#gotham").await.unwrap();
    for _ in 0..4 {
        batman.recv_line().await.unwrap();
    }

    batman.send_raw("MODE #gotham").await.unwrap();
    let reply = batman.recv_line().await.unwrap();
    assert!(reply.starts_with(":irc.localhost 324 Batman #gotham +"), "line was: {reply}");
    assert!(reply.contains('n') && reply.contains('t'));
}

#[tokio::test]
async fn redundant_mode_set_emits_no_broadcast() {
    let server = TestServer::spawn(17032).await.expect("spawn server");
    let mut batman = TestClient::connect(&server.address()).await.expect("connect");
    batman.register("Batman", "Bruce Wayne").await.unwrap();
    batman.join("#gotham").await.unwrap();
    for _ in 0..4 {
        batman.recv_line().await.unwrap();
    }

    // `+t` is already set by default on a freshly-created channel, so
    // this should produce neither a reply nor a broadcast.
    batman.send_raw("MODE #gotham +t").await.unwrap();
    let result = batman
        .recv_line_timeout(std::time::Duration::from_millis(300))
        .await;
    assert!(result.is_err(), "expected no MODE broadcast, got: {result:?}");
}
