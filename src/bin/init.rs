//! chatty-init - provisions a credential store for `chattyd`.
//!
//! Generates a self-signed TLS certificate and, unless `--no-password`
//! is given, a connection password digest, and writes them into the
//! `redb` store `chattyd` reads at startup. Provisioning itself is out
//! of the core server's scope; this binary is the opaque collaborator
//! that fills the store the core only ever reads from.

use std::path::PathBuf;

use rand::RngCore;
use redb::{Database, TableDefinition};

const CONFIG_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("config");

struct InitArgs {
    data_path: PathBuf,
    no_password: bool,
}

fn parse_args(args: impl Iterator<Item = String>) -> InitArgs {
    let mut data_path = PathBuf::from("data");
    let mut no_password = false;

    let mut args = args.peekable();
    while let Some(flag) = args.next() {
        match flag.as_str() {
            "--data" => {
                data_path = PathBuf::from(args.next().unwrap_or_else(|| {
                    eprintln!("chatty-init: missing value after --data");
                    std::process::exit(1);
                }));
            }
            "--no-password" => no_password = true,
            other => {
                eprintln!("chatty-init: unrecognized flag {other}");
                std::process::exit(1);
            }
        }
    }

    InitArgs {
        data_path,
        no_password,
    }
}

fn random_bytes(len: usize) -> Vec<u8> {
    let mut buf = vec![0u8; len];
    rand::thread_rng().fill_bytes(&mut buf);
    buf
}

/// A minimal self-signed certificate/key pair, PEM-encoded. Real
/// deployments should supply their own via `--cert`/`--key`; this is
/// just enough to let `chattyd` start with TLS out of the box.
fn generate_self_signed_cert(server_name: &str) -> Result<(Vec<u8>, Vec<u8>), anyhow::Error> {
    use rcgen::{CertificateParams, DistinguishedName, DnType, IsCa, KeyPair};

    let mut params = CertificateParams::new(vec![server_name.to_string()])?;
    params.distinguished_name = DistinguishedName::new();
    params
        .distinguished_name
        .push(DnType::CommonName, server_name);
    params.is_ca = IsCa::NoCa;
    let key_pair = KeyPair::generate()?;
    let cert = params.self_signed(&key_pair)?;

    Ok((cert.pem().into_bytes(), key_pair.serialize_pem().into_bytes()))
}

fn main() -> anyhow::Result<()> {
    let args = parse_args(std::env::args().skip(1));

    std::fs::create_dir_all(&args.data_path)?;
    let db = Database::create(args.data_path.join("chattyd.redb"))?;

    let (cert_pem, key_pem) = generate_self_signed_cert("irc.localhost")?;

    let txn = db.begin_write()?;
    {
        let mut table = txn.open_table(CONFIG_TABLE)?;
        table.insert("cert", cert_pem.as_slice())?;
        table.insert("key", key_pem.as_slice())?;

        if !args.no_password {
            let salt = random_bytes(chattyd_auth::SALT_LEN);
            let mut password = vec![0u8; 24];
            rand::thread_rng().fill_bytes(&mut password);
            let password_hex: String = password.iter().map(|b| format!("{b:02x}")).collect();
            let digest = chattyd_auth::encode(password_hex.as_bytes(), &salt);
            table.insert("pass", digest.as_slice())?;
            table.insert("salt", salt.as_slice())?;
            println!("generated connection password: {password_hex}");
        }
    }
    txn.commit()?;

    println!("provisioned credential store at {}", args.data_path.display());
    Ok(())
}

/// Re-exposes the core server's PBKDF2 contract so the digest format
/// this tool writes matches what `chattyd` verifies against, without
/// pulling in `chattyd`'s full module tree as a binary dependency.
mod chattyd_auth {
    use std::num::NonZeroU32;

    use ring::pbkdf2;

    pub const KEY_LEN: usize = 64;
    pub const SALT_LEN: usize = 64;
    const ITERATIONS: u32 = 10_000;

    pub fn encode(plaintext: &[u8], salt: &[u8]) -> [u8; KEY_LEN] {
        let mut out = [0u8; KEY_LEN];
        pbkdf2::derive(
            pbkdf2::PBKDF2_HMAC_SHA512,
            NonZeroU32::new(ITERATIONS).expect("nonzero iteration count"),
            salt,
            plaintext,
            &mut out,
        );
        out
    }
}
