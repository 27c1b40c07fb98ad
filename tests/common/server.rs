//! Spawns a real `chattyd` process against a temp data directory, for
//! black-box integration testing over actual TCP sockets.

#![allow(dead_code)]

use std::path::PathBuf;
use std::process::{Child, Command};
use std::time::Duration;

use tokio::time::sleep;

pub struct TestServer {
    child: Child,
    port: u16,
    data_dir: PathBuf,
}

impl TestServer {
    pub async fn spawn(port: u16) -> anyhow::Result<Self> {
        let data_dir = std::env::temp_dir().join(format!("chattyd-test-{port}"));
        let _ = std::fs::remove_dir_all(&data_dir);
        std::fs::create_dir_all(&data_dir)?;

        let cargo_manifest_dir = env!("CARGO_MANIFEST_DIR");
        let binary_path = PathBuf::from(cargo_manifest_dir).join("target/debug/chattyd");

        let child = Command::new(&binary_path)
            .arg("--address")
            .arg(format!(":{port}"))
            .arg("--name")
            .arg("irc.localhost")
            .arg("--data")
            .arg(&data_dir)
            .arg("--insecure")
            .spawn()?;

        let server = Self {
            child,
            port,
            data_dir,
        };
        server.wait_until_ready().await?;
        Ok(server)
    }

    async fn wait_until_ready(&self) -> anyhow::Result<()> {
        for _ in 0..30 {
            if tokio::net::TcpStream::connect(("127.0.0.1", self.port))
                .await
                .is_ok()
            {
                return Ok(());
            }
            sleep(Duration::from_millis(100)).await;
        }
        anyhow::bail!("chattyd failed to start listening within 3 seconds")
    }

    pub fn address(&self) -> String {
        format!("127.0.0.1:{}", self.port)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
        let _ = std::fs::remove_dir_all(&self.data_dir);
    }
}
