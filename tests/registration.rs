//! Registration handshake and nick-collision scenarios (spec §8.1, §8.2).

mod common;

use common::{TestClient, TestServer};

#[tokio::test]
async fn registration_happy_path_emits_welcome_burst() {
    let server = TestServer::spawn(17001).await.expect("spawn server");
    let mut batman = TestClient::connect(&server.address()).await.expect("connect");

    batman.send_raw("NICK Batman").await.unwrap();
    batman
        .send_raw("USER Batman 0 * :Bruce Wayne")
        .await
        .unwrap();

    let welcome = batman.recv_line().await.unwrap();
    assert!(welcome.contains(" 001 Batman"), "line was: {welcome}");
    let yourhost = batman.recv_line().await.unwrap();
    assert!(yourhost.contains(" 002 Batman"), "line was: {yourhost}");
    let created = batman.recv_line().await.unwrap();
    assert!(created.contains(" 003 Batman"), "line was: {created}");
    let no_motd = batman.recv_line().await.unwrap();
    assert!(no_motd.contains(" 422 Batman"), "line was: {no_motd}");
}

#[tokio::test]
async fn nick_collision_refuses_second_claimant() {
    let server = TestServer::spawn(17002).await.expect("spawn server");

    let mut batman = TestClient::connect(&server.address()).await.expect("connect a");
    batman
        .register("Batman", "Bruce Wayne")
        .await
        .expect("batman registers");

    let mut impostor = TestClient::connect(&server.address()).await.expect("connect b");
    impostor.send_raw("NICK Batman").await.unwrap();
    impostor
        .send_raw("USER Batman 0 * :Bruce Wayne")
        .await
        .unwrap();

    let reply = impostor.recv_line().await.unwrap();
    assert_eq!(
        reply,
        ":irc.localhost 433 * Batman :Nickname is already in use"
    );
}
