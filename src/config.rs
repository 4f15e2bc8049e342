//! Where the registry comes from, and the process-wide instance.

use std::path::PathBuf;

use once_cell::sync::OnceCell;
use tracing::{ debug, error, warn };

use crate::error::{ Error, Result };
use crate::registry::Registry;

/// Environment variable naming a registry file to read instead of the
/// bundled copy. Also read by the build script.
pub const REGISTRY_PATH_ENV: &str = "LANGUAGE_SUBTAG_REGISTRY";

/// Registry file used when the environment does not name one.
pub const DEFAULT_REGISTRY_PATH: &str = "data/language-subtag-registry";

// Copied into OUT_DIR by build.rs, empty when no registry file was found
const BUNDLED_REGISTRY: &str = include_str!(concat!(env!("OUT_DIR"), "/language-subtag-registry"));

static REGISTRY: OnceCell<Registry> = OnceCell::new();

/// Configuration for loading the registry.
///
/// # Example
///
/// ```rust
/// use intl_langtag::RegistryConfig;
///
/// let config = RegistryConfig {
///     use_bundled_registry: false,
///     registry_path: "/usr/share/iana/language-subtag-registry".into(),
/// };
/// ```
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Whether to parse the registry bundled at build time (true) or read
    /// `registry_path` at runtime (false).
    /// Always `true` on WASM targets or with the `bundle-only` feature.
    pub use_bundled_registry: bool,
    /// Registry file for filesystem loading.
    /// Default: `$LANGUAGE_SUBTAG_REGISTRY`, else `data/language-subtag-registry`
    pub registry_path: PathBuf,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        let env_path = std::env::var_os(REGISTRY_PATH_ENV).map(PathBuf::from);
        Self {
            use_bundled_registry: cfg!(target_arch = "wasm32") ||
            cfg!(feature = "bundle-only") ||
            env_path.is_none(),
            registry_path: env_path.unwrap_or_else(|| PathBuf::from(DEFAULT_REGISTRY_PATH)),
        }
    }
}

// ---------- Lifecycle ----------

/// Loads the registry described by `config` and installs it as the
/// process-wide registry.
///
/// Fails with [`Error::AlreadyInitialized`] once a registry is installed,
/// including one installed lazily by [`registry`].
pub fn init(config: &RegistryConfig) -> Result<&'static Registry> {
    if REGISTRY.get().is_some() {
        return Err(Error::AlreadyInitialized);
    }

    let registry = load_registry(config)?;
    REGISTRY.try_insert(registry).map_err(|_| Error::AlreadyInitialized)
}

/// The process-wide registry, loaded with [`RegistryConfig::default`] on
/// first use unless [`init`] ran before.
///
/// A registry that fails to load is logged and replaced by an empty one, in
/// which every code is unregistered.
pub fn registry() -> &'static Registry {
    REGISTRY.get_or_init(|| {
        load_registry(&RegistryConfig::default()).unwrap_or_else(|e| {
            error!(error = %e, "Failed to load language subtag registry");
            Registry::default()
        })
    })
}

// ---------- Loaders ----------

/// Builds a registry from the source `config` selects, without installing it.
pub fn load_registry(config: &RegistryConfig) -> Result<Registry> {
    if config.use_bundled_registry {
        load_bundled_registry(config)
    } else {
        load_filesystem_registry(config)
    }
}

fn load_bundled_registry(config: &RegistryConfig) -> Result<Registry> {
    if BUNDLED_REGISTRY.trim().is_empty() {
        // Built without a registry file, try the filesystem instead
        warn!(
            path = %config.registry_path.display(),
            "Bundled language subtag registry is empty, reading from the filesystem"
        );
        return load_filesystem_registry(config);
    }

    Ok(Registry::parse(BUNDLED_REGISTRY))
}

#[cfg(not(target_arch = "wasm32"))]
fn load_filesystem_registry(config: &RegistryConfig) -> Result<Registry> {
    use std::fs::File;
    use std::io::BufReader;

    debug!(path = %config.registry_path.display(), "Reading language subtag registry");
    let file = File::open(&config.registry_path)?;
    Registry::from_reader(BufReader::new(file))
}

#[cfg(target_arch = "wasm32")]
fn load_filesystem_registry(_config: &RegistryConfig) -> Result<Registry> {
    warn!("Filesystem loading not available on WASM, using the bundled registry");
    Ok(Registry::parse(BUNDLED_REGISTRY))
}
