use anyhow::{Result, anyhow};
use directories::UserDirs;
use log::info;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Largest accepted `layout.interval`, in px.
pub const MAX_INTERVAL: f32 = 10_000.0;

/// Feature level of the carousel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Directional fades, forced commits, eased settle and auto-advance.
    #[default]
    Rich,
    /// Fixed rest transforms, direct snap, no auto-advance.
    Simplified,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Gap between stacked slots, in px.
    pub interval: f32,
    /// Slot height / slot width.
    pub size_ratio: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            interval: 30.0,
            size_ratio: 0.61,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    pub variant: Variant,
    pub settle_ms: u64,
    pub decelerate_factor: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            variant: Variant::Rich,
            settle_ms: 360,
            decelerate_factor: 1.6,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoAdvanceConfig {
    /// `<= 0` disables auto-advance.
    pub seconds: i32,
}

impl Default for AutoAdvanceConfig {
    fn default() -> Self {
        Self { seconds: 5 }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PileConfig {
    pub layout: LayoutConfig,
    pub motion: MotionConfig,
    pub auto_advance: AutoAdvanceConfig,
}

fn config_dir() -> Result<PathBuf> {
    let dirs = UserDirs::new().ok_or_else(|| anyhow!("cannot resolve home directory"))?;
    Ok(dirs.home_dir().join(".config").join("pile"))
}

pub fn default_config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("pile.toml"))
}

fn default_config_text() -> &'static str {
    include_str!("../config/default.toml")
}

impl PileConfig {
    pub fn from_toml(txt: &str) -> Result<Self> {
        let cfg: PileConfig = toml::from_str(txt).map_err(|e| anyhow!("invalid config: {e}"))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let txt = fs::read_to_string(path)
            .map_err(|e| anyhow!("failed to read {}: {e}", path.display()))?;
        Self::from_toml(&txt).map_err(|e| anyhow!("{}: {e}", path.display()))
    }

    /// Explicit path, else the user config if present, else defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(p) = explicit {
            return Self::load(p);
        }
        match default_config_path() {
            Ok(p) if p.exists() => Self::load(&p),
            _ => Ok(Self::default()),
        }
    }

    /// Writes the bundled default next to the user's other config.
    pub fn install_default() -> Result<PathBuf> {
        let path = default_config_path()?;
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        if path.exists() {
            info!("config already present at {}", path.display());
        } else {
            fs::write(&path, default_config_text())?;
            info!("installed default config at {}", path.display());
        }
        Ok(path)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.layout.size_ratio > 0.0) {
            return Err(anyhow!("layout.size_ratio must be positive"));
        }
        if !(self.layout.interval >= 0.0 && self.layout.interval <= MAX_INTERVAL) {
            return Err(anyhow!("layout.interval must be within 0..={MAX_INTERVAL}"));
        }
        if self.motion.settle_ms == 0 {
            return Err(anyhow!("motion.settle_ms must be a positive duration"));
        }
        if !(self.motion.decelerate_factor > 0.0) {
            return Err(anyhow!("motion.decelerate_factor must be positive"));
        }
        Ok(())
    }

    /// Auto-advance seconds after variant gating.
    pub fn auto_advance_seconds(&self) -> i32 {
        match self.motion.variant {
            Variant::Rich => self.auto_advance.seconds,
            Variant::Simplified => 0,
        }
    }

    pub fn parallax_divisor(&self) -> i32 {
        match self.motion.variant {
            Variant::Rich => 7,
            Variant::Simplified => 10,
        }
    }

    pub fn interval_px(&self) -> i32 {
        self.layout.interval as i32
    }
}
