use std::{ env, fs, path::Path, path::PathBuf };
use anyhow::Result;

const REGISTRY_ENV: &str = "LANGUAGE_SUBTAG_REGISTRY";
const REGISTRY_FILE: &str = "language-subtag-registry";

fn main() -> Result<()> {
    let out_path = Path::new(&env::var("OUT_DIR")?).join(REGISTRY_FILE);

    println!("cargo:rerun-if-env-changed={REGISTRY_ENV}");

    // Always create the file, even if empty, so include_str! works
    let Some(registry_path) = find_registry_file()? else {
        println!("cargo:warning=No {REGISTRY_FILE} file found, bundling an empty registry");
        println!("cargo:warning=Set {REGISTRY_ENV} to the IANA registry file to bundle it");
        fs::write(out_path, "")?;
        return Ok(());
    };

    println!("cargo:rerun-if-changed={}", registry_path.display());
    fs::copy(&registry_path, &out_path)?;
    Ok(())
}

fn find_registry_file() -> Result<Option<PathBuf>> {
    // An explicit override wins over the copy shipped with the crate
    if let Some(path) = env::var_os(REGISTRY_ENV) {
        let path = PathBuf::from(path);
        if !path.is_file() {
            anyhow::bail!("{REGISTRY_ENV} points at {}, which is not a file", path.display());
        }
        return Ok(Some(path));
    }

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let bundled = manifest_dir.join("data").join(REGISTRY_FILE);
    if bundled.is_file() {
        return Ok(Some(bundled));
    }

    Ok(None)
}
