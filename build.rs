//! Embeds the short git hash so `--version` can tell dev builds apart.

use std::process::Command;

fn git(args: &[&str]) -> Option<String> {
    let out = Command::new("git").args(args).output().ok()?;
    out.status
        .success()
        .then(|| String::from_utf8_lossy(&out.stdout).trim().to_string())
}

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/");

    let hash = git(&["rev-parse", "--short", "HEAD"]).unwrap_or_default();
    let tagged = git(&["describe", "--exact-match", "--tags", "HEAD"]).is_some();

    println!("cargo:rustc-env=COMPRESS_IMAGES_GIT_HASH={hash}");
    println!("cargo:rustc-env=COMPRESS_IMAGES_RELEASE={tagged}");
}
