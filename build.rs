//! Build script for persona-order
//!
//! Embeds the git commit, build timestamp, target triple and profile.

use std::env;
use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/index");

    let git_hash = git(&["rev-parse", "--short=8", "HEAD"]).unwrap_or_else(|| "unknown".to_string());
    let git_dirty = git(&["status", "--porcelain"])
        .map(|out| (!out.is_empty()).to_string())
        .unwrap_or_else(|| "false".to_string());
    let build_timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string();
    let target = env::var("TARGET").unwrap_or_else(|_| "unknown".to_string());
    let profile = env::var("PROFILE").unwrap_or_else(|_| "unknown".to_string());

    println!("cargo:rustc-env=PERSONA_ORDER_GIT_HASH={}", git_hash);
    println!("cargo:rustc-env=PERSONA_ORDER_GIT_DIRTY={}", git_dirty);
    println!("cargo:rustc-env=PERSONA_ORDER_BUILD_TIMESTAMP={}", build_timestamp);
    println!("cargo:rustc-env=PERSONA_ORDER_TARGET={}", target);
    println!("cargo:rustc-env=PERSONA_ORDER_PROFILE={}", profile);
}

/// Trimmed stdout of a successful git invocation
fn git(args: &[&str]) -> Option<String> {
    Command::new("git")
        .args(args)
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|s| s.trim().to_string())
}
