//! Build script rendering the `rdpframe(1)` manual page from the CLI
//! definition into `OUT_DIR`.

use std::{env, fs, path::PathBuf};

use clap::CommandFactory;
use clap_mangen::Man;

#[path = "src/cli.rs"]
mod cli;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=src/cli.rs");

    let out_dir = PathBuf::from(env::var_os("OUT_DIR").ok_or("OUT_DIR is not set")?).join("man");
    fs::create_dir_all(&out_dir)?;

    let mut page = Vec::new();
    Man::new(cli::Cli::command()).render(&mut page)?;
    let path = out_dir.join("rdpframe.1");
    fs::write(&path, page)?;
    println!("cargo:rustc-env=RDPFRAME_MAN_PAGE={}", path.display());

    Ok(())
}
