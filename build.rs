//! Build script for Spotifind.
//!
//! Copies the `.env.example` configuration template into the platform data
//! directory (`<data_local_dir>/spotifind/`), next to where the service looks
//! for its `.env` file at startup.

use std::{env, fs, path::PathBuf};

/// Copies `.env.example` from the crate root into the local data directory.
///
/// A missing template only produces a cargo warning. Failing to create the
/// target directory or to write the copy fails the build.
///
/// Target locations:
/// - Linux: `~/.local/share/spotifind/.env.example`
/// - macOS: `~/Library/Application Support/spotifind/.env.example`
/// - Windows: `%LOCALAPPDATA%/spotifind/.env.example`
fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=.env.example");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let template = manifest_dir.join(".env.example");

    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("spotifind");
    fs::create_dir_all(&out_dir)?;

    if template.is_file() {
        fs::copy(&template, out_dir.join(".env.example"))?;
    } else {
        println!(
            "cargo:warning=.env.example not found at {}",
            template.display()
        );
    }

    Ok(())
}
