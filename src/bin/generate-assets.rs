#![forbid(unsafe_code)]

//! Writes shell completions and the man page for packaging.
//!
//! Usage: `generate-assets [OUT_DIR]`, defaulting to `target/assets`.

use anyhow::Context;
use buftree::cli::Args;
use clap::{CommandFactory, ValueEnum};
use clap_complete::{generate, Generator, Shell};
use clap_mangen::Man;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

fn main() -> anyhow::Result<()> {
    let out = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("target/assets"));

    let mut written = Vec::new();
    for shell in Shell::value_variants() {
        written.push(completion(*shell, &out.join("completions"))?);
    }
    written.push(man_page(&out.join("man"))?);

    for path in written {
        println!("{}", path.display());
    }
    Ok(())
}

fn completion(shell: Shell, dir: &Path) -> anyhow::Result<PathBuf> {
    let mut cmd = Args::command();
    let name = cmd.get_name().to_string();
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let path = dir.join(shell.file_name(&name));
    let mut file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    generate(shell, &mut cmd, name, &mut file);
    Ok(path)
}

fn man_page(dir: &Path) -> anyhow::Result<PathBuf> {
    let cmd = Args::command();
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let path = dir.join(format!("{}.1", cmd.get_name()));
    let mut file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    Man::new(cmd).render(&mut file)?;
    Ok(path)
}
