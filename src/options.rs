//! Conversion and optimizer options, plus the persisted options store.
//!
//! The store is saved as TOML:
//!
//! ```toml
//! [conversion]
//! component_name = "Icon"
//! typescript = true
//! spread_props = true
//! use_memo = false
//! use_forward_ref = false
//! optimize = true
//!
//! [optimizer]
//! remove_data_attrs = true
//! remove_ids = false
//! remove_empty_groups = true
//! merge_duplicate_attrs = true
//! remove_default_attrs = true
//! optimize_transforms = true
//! ```

use std::fs;
use std::io::ErrorKind as IoErrorKind;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::Svg2TsxError;
use crate::log;

/// Default file name for the persisted options.
pub const OPTIONS_FILE_NAME: &str = "svg2tsx.toml";

/// Which cleanup passes the optimizer runs. Everything is off by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerOptions {
    /// Remove `data-*` attributes
    pub remove_data_attrs: bool,
    /// Remove `id` attributes
    pub remove_ids: bool,
    /// Remove `<g>` elements without children
    pub remove_empty_groups: bool,
    /// Accepted for compatibility; the parser already keeps only the last
    /// occurrence of a repeated attribute, so there is nothing left to merge.
    pub merge_duplicate_attrs: bool,
    /// Remove `fill="black"` and `stroke="none"`
    pub remove_default_attrs: bool,
    /// Remove no-op `translate(0,0)` transforms
    pub optimize_transforms: bool,
}

impl OptimizerOptions {
    /// The preset the application ships with: every pass except `remove_ids`.
    pub fn recommended() -> Self {
        Self {
            remove_data_attrs: true,
            remove_ids: false,
            remove_empty_groups: true,
            merge_duplicate_attrs: true,
            remove_default_attrs: true,
            optimize_transforms: true,
        }
    }

    /// Whether any pass would change the tree.
    pub fn is_noop(&self) -> bool {
        !(self.remove_data_attrs
            || self.remove_ids
            || self.remove_empty_groups
            || self.remove_default_attrs
            || self.optimize_transforms)
    }
}

/// Code generation options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorOptions {
    /// Name of the exported component (default: "Icon")
    pub component_name: String,
    /// Emit TypeScript type annotations (default: true)
    pub typescript: bool,
    /// Spread `props` onto the root `<svg>` (default: true)
    pub spread_props: bool,
    /// Wrap the component in `React.memo` (default: false)
    pub use_memo: bool,
    /// Wrap the component in `React.forwardRef` (default: false)
    pub use_forward_ref: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            component_name: "Icon".into(),
            typescript: true,
            spread_props: true,
            use_memo: false,
            use_forward_ref: false,
        }
    }
}

/// Generator options plus the switch that gates the optimizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionOptions {
    #[serde(flatten)]
    pub generator: GeneratorOptions,
    /// Run the optimizer before generating (default: true)
    pub optimize: bool,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            generator: GeneratorOptions::default(),
            optimize: true,
        }
    }
}

/// A partial update of [`ConversionOptions`]. `None` fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionOptionsPatch {
    pub component_name: Option<String>,
    pub typescript: Option<bool>,
    pub spread_props: Option<bool>,
    pub use_memo: Option<bool>,
    pub use_forward_ref: Option<bool>,
    pub optimize: Option<bool>,
}

/// A partial update of [`OptimizerOptions`]. `None` fields are left alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct OptimizerOptionsPatch {
    pub remove_data_attrs: Option<bool>,
    pub remove_ids: Option<bool>,
    pub remove_empty_groups: Option<bool>,
    pub merge_duplicate_attrs: Option<bool>,
    pub remove_default_attrs: Option<bool>,
    pub optimize_transforms: Option<bool>,
}

fn apply<T>(target: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *target = value;
    }
}

impl ConversionOptions {
    pub fn apply(&mut self, patch: ConversionOptionsPatch) {
        apply(&mut self.generator.component_name, patch.component_name);
        apply(&mut self.generator.typescript, patch.typescript);
        apply(&mut self.generator.spread_props, patch.spread_props);
        apply(&mut self.generator.use_memo, patch.use_memo);
        apply(&mut self.generator.use_forward_ref, patch.use_forward_ref);
        apply(&mut self.optimize, patch.optimize);
    }
}

impl OptimizerOptions {
    pub fn apply(&mut self, patch: OptimizerOptionsPatch) {
        apply(&mut self.remove_data_attrs, patch.remove_data_attrs);
        apply(&mut self.remove_ids, patch.remove_ids);
        apply(&mut self.remove_empty_groups, patch.remove_empty_groups);
        apply(&mut self.merge_duplicate_attrs, patch.merge_duplicate_attrs);
        apply(&mut self.remove_default_attrs, patch.remove_default_attrs);
        apply(&mut self.optimize_transforms, patch.optimize_transforms);
    }
}

/// The user's saved options.
///
/// Keys missing from a saved `[optimizer]` table keep their
/// [`OptimizerOptions::recommended`] value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionsStore {
    pub conversion: ConversionOptions,
    #[serde(deserialize_with = "recommended_with_overrides")]
    pub optimizer: OptimizerOptions,
}

fn recommended_with_overrides<'de, D>(deserializer: D) -> Result<OptimizerOptions, D::Error>
where
    D: Deserializer<'de>,
{
    let patch = OptimizerOptionsPatch::deserialize(deserializer)?;
    let mut options = OptimizerOptions::recommended();
    options.apply(patch);
    Ok(options)
}

impl Default for OptionsStore {
    fn default() -> Self {
        Self {
            conversion: ConversionOptions::default(),
            optimizer: OptimizerOptions::recommended(),
        }
    }
}

impl OptionsStore {
    /// Load the store from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, Svg2TsxError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == IoErrorKind::NotFound => {
                log::debug!(path = %path.display(), "no options file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(Svg2TsxError::Io(path.to_path_buf(), e)),
        };
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, Svg2TsxError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml(&self) -> Result<String, Svg2TsxError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), Svg2TsxError> {
        let content = self.to_toml()?;
        fs::write(path, content).map_err(|e| Svg2TsxError::Io(path.to_path_buf(), e))?;
        log::debug!(path = %path.display(), "saved options");
        Ok(())
    }

    pub fn set_options(&mut self, patch: ConversionOptionsPatch) {
        self.conversion.apply(patch);
    }

    pub fn set_optimizer_options(&mut self, patch: OptimizerOptionsPatch) {
        self.optimizer.apply(patch);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
