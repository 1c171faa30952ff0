use std::path::Path;
use std::process::Command;

fn main() {
    // Capture Git values during compilation (not at runtime)
    let git_hash = git(&["rev-parse", "--short", "HEAD"]);
    let git_date = git(&["log", "-1", "--format=%ci"]);

    // Embed these values as constants in the binary
    println!("cargo:rustc-env=GIT_HASH={}", git_hash);
    println!("cargo:rustc-env=GIT_DATE={}", git_date);

    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    for path in rerun_triggers(Path::new(&manifest_dir)) {
        println!("cargo:rerun-if-changed={}", path);
    }
}

/// Files whose change should rerun this script.
///
/// A missing path makes cargo rerun on every build, so `.git/HEAD` is only
/// watched when the package sits in a git checkout.
pub(crate) fn rerun_triggers(root: &Path) -> Vec<&'static str> {
    let mut triggers = vec!["build.rs"];
    if root.join(".git/HEAD").is_file() {
        triggers.push(".git/HEAD");
    }
    triggers
}

fn git(args: &[&str]) -> String {
    Command::new("git")
        .args(args)
        .output()
        .ok()
        .filter(|output| output.status.success())
        .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}
