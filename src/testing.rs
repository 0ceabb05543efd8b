//! Testing utilities for keyforms
//!
//! Only available when compiled with `cfg(test)`.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::config::KeyformsConfig;
use crate::context::CachedValues;
use crate::demo::{DemoForm, FormEnv, FormState, Menus};
use crate::ui::input::AssumeNo;

/// Configuration file in a temporary directory, removed on drop
///
/// # Examples
/// ```ignore
/// let test_config = TestConfig::new(&KeyformsConfig::default());
/// let loaded = KeyformsConfig::load_from(test_config.path()).unwrap();
/// ```
pub struct TestConfig {
    _dir: TempDir,
    path: PathBuf,
}

impl TestConfig {
    /// Write `config` to a fresh temporary file
    ///
    /// # Panics
    /// Panics if the directory or file cannot be created.
    pub fn new(config: &KeyformsConfig) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("config.toml");
        config.save_to(&path).expect("Failed to write test config");

        Self { _dir: dir, path }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Cached values from name/value pairs
#[must_use]
pub fn cached(pairs: &[(&str, &str)]) -> CachedValues {
    pairs.iter().copied().collect()
}

/// Mount a standard form by menu, sub-menu and form slug
///
/// # Panics
/// Panics if no such form exists or it fails to mount.
pub fn mount(menu: &str, sub_menu: &str, form: &str, cached: &CachedValues) -> DemoForm {
    let menus = Menus::standard();
    let path = menus
        .find(menu, sub_menu, form)
        .unwrap_or_else(|| panic!("no form {menu}/{sub_menu}/{form}"));

    menus.mount(path, cached).expect("Failed to mount form")
}

/// Submit without ever confirming bulk creation
pub fn submit_declining(form: &mut DemoForm, cached: &mut CachedValues) -> FormState {
    form.submit(cached, &FormEnv::new(&AssumeNo, 1000)).clone()
}
