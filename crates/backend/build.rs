use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// target/<profile>, the directory the backend binary is written to
fn binary_dir() -> PathBuf {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let profile = env::var("PROFILE").unwrap();
    out_dir
        .ancestors()
        .find(|dir| dir.ends_with(&profile))
        .map(Path::to_path_buf)
        .expect("OUT_DIR is not inside the target/<profile> directory")
}

fn main() {
    println!("cargo:rerun-if-changed=../../config.toml");

    // crates/backend -> workspace root
    let workspace_root = Path::new(env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(2)
        .expect("backend crate is expected under <workspace>/crates/backend");

    let store_config = workspace_root.join("config.toml");
    if !store_config.exists() {
        println!(
            "cargo:warning=no config.toml at {:?}; the backend will start with its embedded store API and stock defaults",
            store_config
        );
        return;
    }

    // shared::config::load_config looks for config.toml next to the executable
    let dest = binary_dir().join("config.toml");
    fs::copy(&store_config, &dest)
        .unwrap_or_else(|e| panic!("cannot copy config.toml to {:?}: {}", dest, e));
    println!("cargo:warning=Copied store API config to {:?}", dest);
}
