use std::process::Command;

/// Build hash shown by the stats endpoint. `EVENTOS_BUILD_HASH` wins over git,
/// for builds made outside a checkout.
fn build_hash() -> String {
    if let Ok(hash) = std::env::var("EVENTOS_BUILD_HASH") {
        if !hash.trim().is_empty() {
            return hash.trim().to_string();
        }
    }

    Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn main() {
    println!("cargo:rustc-env=GIT_HASH={}", build_hash());

    println!("cargo:rerun-if-env-changed=EVENTOS_BUILD_HASH");
    println!("cargo:rerun-if-changed=.git/HEAD");
}
