//! Command-line configuration for `chattyd`.
//!
//! There is no config file; every setting is a flag, following the
//! reference server's own minimal CLI surface rather than the layered
//! TOML config the teacher binary loads.

use std::path::PathBuf;

/// Resolved server configuration, parsed from `std::env::args`.
#[derive(Debug, Clone)]
pub struct Config {
    pub address: String,
    pub server_name: String,
    pub cert_path: Option<PathBuf>,
    pub key_path: Option<PathBuf>,
    pub data_path: PathBuf,
    pub debug: bool,
    pub insecure: bool,
}

impl Config {
    /// Parse flags out of `args` (excluding argv\[0\]). Exits the process
    /// with a message on stderr for a malformed flag, matching the
    /// reference server's "bad flag -> stderr + nonzero exit" contract.
    pub fn parse(args: impl Iterator<Item = String>) -> Config {
        let mut address = ":6697".to_string();
        let mut server_name = hostname();
        let mut cert_path = None;
        let mut key_path = None;
        let mut data_path = PathBuf::from("data");
        let mut debug = false;
        let mut insecure = false;

        let mut args = args.peekable();
        while let Some(flag) = args.next() {
            match flag.as_str() {
                "--address" => address = expect_value(&flag, &mut args),
                "--name" => server_name = expect_value(&flag, &mut args),
                "--cert" => cert_path = Some(PathBuf::from(expect_value(&flag, &mut args))),
                "--key" => key_path = Some(PathBuf::from(expect_value(&flag, &mut args))),
                "--data" => data_path = PathBuf::from(expect_value(&flag, &mut args)),
                "--debug" => debug = true,
                "--insecure" => insecure = true,
                other => {
                    eprintln!("chattyd: unrecognized flag {other}");
                    std::process::exit(1);
                }
            }
        }

        Config {
            address,
            server_name,
            cert_path,
            key_path,
            data_path,
            debug,
            insecure,
        }
    }
}

fn expect_value(flag: &str, args: &mut impl Iterator<Item = String>) -> String {
    args.next().unwrap_or_else(|| {
        eprintln!("chattyd: missing value after {flag}");
        std::process::exit(1);
    })
}

fn hostname() -> String {
    hostname_from_env().unwrap_or_else(|| "irc.localhost".to_string())
}

fn hostname_from_env() -> Option<String> {
    std::env::var("HOSTNAME")
        .ok()
        .filter(|s| !s.is_empty())
        .or_else(|| {
            std::fs::read_to_string("/etc/hostname")
                .ok()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        })
}
