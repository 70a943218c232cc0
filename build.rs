#![allow(unused)]
include!("src/config.rs");

use std::env;
use std::io::Error;

fn main() -> Result<(), Error> {
    println!("cargo:rerun-if-changed=src/config.rs");
    println!("cargo:rerun-if-env-changed=COMMIT_HASH");
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };
    let mut cmd = cli();
    for shell in [Shell::Bash, Shell::Zsh] {
        clap_complete::generate_to(shell, &mut cmd, "uri-open", &outdir)?;
    }
    Ok(())
}
