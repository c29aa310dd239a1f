// crates/motionlab-net/src/config.rs
//
// Where the analysis service lives and where processed videos go.
//
// Resolution order (later wins):
//   1. ServiceConfig::default()            : http://127.0.0.1:5000
//   2. <config_dir>/motionlab/config.json  : any subset of fields
//   3. MOTIONLAB_SERVICE_URL               : base URL only
//
// A missing file is normal. A malformed one is logged and ignored so a typo
// never stops the app from starting.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use motionlab_core::upload_types::FormKind;

pub const ENV_SERVICE_URL: &str = "MOTIONLAB_SERVICE_URL";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub find_scale:      String,
    pub motion_analysis: String,
    pub legacy_upload:   String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            find_scale:      "/find-scale".into(),
            motion_analysis: "/motion-analysis".into(),
            legacy_upload:   "/upload".into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub base_url:     String,
    pub endpoints:    Endpoints,
    /// Whole-request timeout. `None` waits as long as the service needs;
    /// motion analysis of a long video can take minutes.
    pub timeout_secs: Option<u64>,
    /// Save processed videos here without asking. `None` shows a save dialog.
    pub download_dir: Option<PathBuf>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url:     "http://127.0.0.1:5000".into(),
            endpoints:    Endpoints::default(),
            timeout_secs: None,
            download_dir: None,
        }
    }
}

impl ServiceConfig {
    /// `<config_dir>/motionlab/config.json`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("motionlab").join("config.json"))
    }

    /// Load from the default path and apply environment overrides. Never fails.
    pub fn load() -> Self {
        let mut config = match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path).unwrap_or_else(|e| {
                log::warn!("[config] ignoring {}: {e:#}", path.display());
                Self::default()
            }),
            _ => Self::default(),
        };
        if let Ok(url) = std::env::var(ENV_SERVICE_URL) {
            config.apply_url_override(&url);
        }
        log::info!("[config] service at {}", config.base_url);
        config
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("parsing {}", path.display()))
    }

    pub fn apply_url_override(&mut self, url: &str) {
        let url = url.trim();
        if !url.is_empty() {
            self.base_url = url.to_string();
        }
    }

    pub fn endpoint_path(&self, form: FormKind) -> &str {
        match form {
            FormKind::Scaling => &self.endpoints.find_scale,
            FormKind::Motion  => &self.endpoints.motion_analysis,
            FormKind::Legacy  => &self.endpoints.legacy_upload,
        }
    }

    /// Full URL for a form, tolerant of stray slashes on either side.
    pub fn endpoint_url(&self, form: FormKind) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = self.endpoint_path(form).trim_start_matches('/');
        format!("{base}/{path}")
    }
}
