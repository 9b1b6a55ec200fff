//! Stamps the short git SHA into `SUBSCRIBELY_GIT_SHA` for `subscribely-quote --version`.
//! Set `SUBSCRIBELY_GIT_SHA` to override (e.g. in CI builds from a tarball).

use std::process::Command;

fn main() {
    let git_sha = std::env::var("SUBSCRIBELY_GIT_SHA").unwrap_or_else(|_| {
        Command::new("git")
            .args(["rev-parse", "--short", "HEAD"])
            .output()
            .ok()
            .filter(|o| o.status.success())
            .and_then(|o| String::from_utf8(o.stdout).ok())
            .map(|s| s.trim().to_string())
            .unwrap_or_else(|| "unknown".into())
    });
    println!("cargo:rustc-env=SUBSCRIBELY_GIT_SHA={}", git_sha);
    println!("cargo:rerun-if-env-changed=SUBSCRIBELY_GIT_SHA");
}
