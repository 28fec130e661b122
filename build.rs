use std::env;
use std::path::Path;
use std::process::Command;

/// llvm-config の候補パス（先頭から順に試す）
fn llvm_config_candidates() -> Vec<&'static str> {
    if cfg!(target_os = "macos") {
        vec![
            "/opt/homebrew/opt/llvm@18/bin/llvm-config",
            "/usr/local/opt/llvm@18/bin/llvm-config",
            "llvm-config-18",
        ]
    } else {
        vec!["llvm-config-18", "/usr/lib/llvm-18/bin/llvm-config", "llvm-config"]
    }
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=LLVM_SYS_180_PREFIX");

    if env::var("LLVM_SYS_180_PREFIX").is_err() {
        let prefix = llvm_config_candidates()
            .into_iter()
            .filter(|cmd| !cmd.starts_with('/') || Path::new(cmd).exists())
            .find_map(|cmd| {
                let output = Command::new(cmd).arg("--prefix").output().ok()?;
                output
                    .status
                    .success()
                    .then(|| String::from_utf8_lossy(&output.stdout).trim().to_string())
            });

        match prefix {
            Some(prefix) => println!("cargo:rustc-env=LLVM_SYS_180_PREFIX={}", prefix),
            None => println!(
                "cargo:warning=wist needs LLVM 18 for its JIT backend; set LLVM_SYS_180_PREFIX if llvm-config-18 is not on PATH"
            ),
        }
    }

    // LLVM は C++ で書かれているため標準ライブラリをリンクする
    if cfg!(target_os = "macos") {
        println!("cargo:rustc-link-lib=c++");
        println!("cargo:rustc-link-search=/opt/homebrew/lib");
        println!("cargo:rustc-link-search=/usr/local/lib");
    } else if cfg!(target_os = "linux") {
        println!("cargo:rustc-link-lib=stdc++");
    }
}
