use std::{env, fs, path::PathBuf};

fn main() {
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").expect("missing manifest dir"));
    let lock_path = manifest_dir.join("../../Cargo.lock");

    println!("cargo:rerun-if-changed=../../Cargo.lock");

    let version = fs::read_to_string(&lock_path)
        .ok()
        .and_then(|lock| locked_version(&lock, "sqlparser"))
        .unwrap_or_else(|| "unknown".to_string());
    println!("cargo:rustc-env=SCHEMALINT_SQLPARSER_VERSION={version}");
}

/// Version of `package` as pinned in a Cargo.lock file.
fn locked_version(lock: &str, package: &str) -> Option<String> {
    let name_line = format!("name = \"{package}\"");
    lock.split("[[package]]").find_map(|entry| {
        let mut lines = entry.lines().map(str::trim);
        lines.find(|line| *line == name_line)?;
        lines
            .find_map(|line| line.strip_prefix("version = \""))
            .and_then(|rest| rest.strip_suffix('"'))
            .map(str::to_string)
    })
}
