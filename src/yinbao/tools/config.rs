//! Configuration record holding every default the orchestrator relies on.
//!
//! Defaults are compiled in; an optional TOML file can replace any subset of
//! them. The loaded [`Settings`] value is handed to the orchestrator, which
//! never consults global state.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, instrument};

use crate::yinbao::tools::error::{Result, ToolError};

/// Rows per cleaned output file when nothing else is requested.
pub const DEFAULT_MAX_ROWS: u32 = 1500;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Program used to run the tool scripts.
    pub interpreter: PathBuf,
    /// Directory containing the tool scripts.
    pub tools_dir: PathBuf,
    pub max_rows: u32,
    pub paths: DefaultPaths,
    pub tools: ToolScripts,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            interpreter: PathBuf::from("python3"),
            tools_dir: PathBuf::from("tools"),
            max_rows: DEFAULT_MAX_ROWS,
            paths: DefaultPaths::default(),
            tools: ToolScripts::default(),
        }
    }
}

/// Default bindings for every path role.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DefaultPaths {
    pub product_source: PathBuf,
    pub relation_original: PathBuf,
    /// Output of the repair step, and the preferred conversion input when present.
    pub relation_fixed: PathBuf,
    pub fix_log: PathBuf,
    pub package_out: PathBuf,
    pub missing_report: PathBuf,
    pub out_prefix: PathBuf,
    pub images_dir: PathBuf,
}

impl Default for DefaultPaths {
    fn default() -> Self {
        let data = Path::new("data");
        Self {
            product_source: data.join("jd_products.xlsx"),
            relation_original: data.join("package_relation.xlsx"),
            relation_fixed: data.join("package_relation_fixed.xlsx"),
            fix_log: data.join("package_relation_fixlog.xlsx"),
            package_out: data.join("package_relation_converted.xlsx"),
            missing_report: data.join("missing_barcodes.xlsx"),
            out_prefix: data.join("product_import_clean"),
            images_dir: data.join("images"),
        }
    }
}

/// Script file names, relative to [`Settings::tools_dir`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolScripts {
    pub clean: PathBuf,
    pub images: PathBuf,
    pub convert: PathBuf,
    pub repair: PathBuf,
}

impl Default for ToolScripts {
    fn default() -> Self {
        Self {
            clean: PathBuf::from("JD2YinBaoProduct.py"),
            images: PathBuf::from("JD2YinBaoDownloadProductImage.py"),
            convert: PathBuf::from("JD2YinBaoPackageRelation.py"),
            repair: PathBuf::from("JDFixPackageRelationByName.py"),
        }
    }
}

impl Settings {
    /// Loads settings from `path`, or returns the built-in defaults when no
    /// path is given.
    #[instrument(level = "debug", skip_all, fields(path = ?path.map(Path::display)))]
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            debug!("using built-in defaults");
            return Ok(Self::default());
        };
        if !path.exists() {
            return Err(ToolError::MissingInput(path.to_path_buf()));
        }
        let source = fs::read_to_string(path)?;
        let settings = Self::from_toml(&source)?;
        debug!("configuration loaded");
        Ok(settings)
    }

    pub fn from_toml(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Full path of a tool script.
    pub fn script(&self, script: &Path) -> PathBuf {
        self.tools_dir.join(script)
    }
}
