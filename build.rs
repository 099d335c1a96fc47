//! Embeds the commit and build date shown by `gofish --version`.

use std::env;
use std::fs;
use std::path::Path;
use std::process::Command;

/// Short hash of HEAD, or "unknown" outside a git checkout.
fn git_commit() -> String {
    Command::new("git")
        .args(["rev-parse", "--short=7", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map(|s| s.trim().to_string())
        .filter(|s| s.len() == 7)
        .unwrap_or_else(|| "unknown".to_string())
}

fn main() {
    // Release packaging sets these; local builds ask git and the clock
    let commit = env::var("GOFISH_BUILD_COMMIT").unwrap_or_else(|_| git_commit());
    let date = env::var("GOFISH_BUILD_DATE")
        .unwrap_or_else(|_| chrono::Utc::now().format("%Y-%m-%d").to_string());

    let out_dir = env::var("OUT_DIR").expect("cargo sets OUT_DIR");
    let contents = format!(
        "pub const BUILD_COMMIT: &str = {:?};\npub const BUILD_DATE: &str = {:?};\n",
        commit, date
    );
    fs::write(Path::new(&out_dir).join("build_info.rs"), contents)
        .expect("failed to write build_info.rs");

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/heads");
    println!("cargo:rerun-if-env-changed=GOFISH_BUILD_COMMIT");
    println!("cargo:rerun-if-env-changed=GOFISH_BUILD_DATE");
}
