#[cfg(not(target_arch = "wasm32"))]
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Element identifiers the tracker looks up in the host document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomConfig {
    /// Id of the conversion form whose submission starts a cycle.
    pub form_id: String,
    /// Id of the processing overlay container.
    pub overlay_id: String,
    /// CSS selector of the spinner, resolved inside the overlay.
    pub spinner_selector: String,
    /// Id of the text element inside the overlay.
    pub processing_status_id: String,
    /// Id of the success glyph shown once the download is assumed to have begun.
    pub success_indicator_id: String,
    /// Id of the status message container.
    pub status_message_id: String,
    /// Id of the server-rendered flash banner container.
    pub flash_messages_id: String,
    /// Class shared by the mutually exclusive option elements.
    pub option_class: String,
    /// Class marking the selected option.
    pub active_class: String,
}

impl Default for DomConfig {
    fn default() -> Self {
        Self {
            form_id: "pdf-form".to_string(),
            overlay_id: "processing-overlay".to_string(),
            spinner_selector: ".spinner-border".to_string(),
            processing_status_id: "processing-status".to_string(),
            success_indicator_id: "success-animation".to_string(),
            status_message_id: "status-message".to_string(),
            flash_messages_id: "flash-messages".to_string(),
            option_class: "processing-option".to_string(),
            active_class: "processing-active".to_string(),
        }
    }
}

/// Path conventions for download-hosting pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Any path containing this segment is a download-hosting page.
    pub download_segment: String,
    /// Where a download-hosting page sends the user afterwards.
    pub home_path: String,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            download_segment: "/download/".to_string(),
            home_path: "/".to_string(),
        }
    }
}

impl NavigationConfig {
    pub fn is_download_page(&self, path: &str) -> bool {
        !self.download_segment.is_empty() && path.contains(&self.download_segment)
    }
}

/// Delays of the two one-shot timers, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub redirect_delay_ms: u64,
    pub success_hide_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            redirect_delay_ms: 1000,
            success_hide_ms: 5000,
        }
    }
}

impl TimingConfig {
    pub fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.redirect_delay_ms)
    }

    pub fn success_hide(&self) -> Duration {
        Duration::from_millis(self.success_hide_ms)
    }
}

/// User-visible strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessagesConfig {
    /// Overlay text once the download is assumed to have begun.
    pub downloading: String,
    /// Status message shown when completion is detected.
    pub complete: String,
    /// Elapsed-time line; `{seconds}` is replaced by the whole number of seconds.
    pub elapsed: String,
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            downloading: "Complete Conversion!".to_string(),
            complete: "Complete Conversion! Your file has been successfully processed and downloaded."
                .to_string(),
            elapsed: "Processing completed in {seconds} seconds".to_string(),
        }
    }
}

impl MessagesConfig {
    pub fn elapsed_line(&self, seconds: u64) -> String {
        self.elapsed.replace("{seconds}", &seconds.to_string())
    }
}

/// Global configuration loaded from `~/.config/convtrack/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Option element ids the simulated page renders (the browser reads them from the DOM).
    pub options: Vec<String>,
    pub dom: DomConfig,
    pub navigation: NavigationConfig,
    pub timing: TimingConfig,
    pub messages: MessagesConfig,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            options: vec!["no-ocr".to_string(), "ocr".to_string(), "genai".to_string()],
            dom: DomConfig::default(),
            navigation: NavigationConfig::default(),
            timing: TimingConfig::default(),
            messages: MessagesConfig::default(),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn config_path() -> Result<std::path::PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("convtrack")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
#[cfg(not(target_arch = "wasm32"))]
pub fn load_or_init() -> Result<TrackerConfig> {
    load_or_init_at(&config_path()?)
}

/// Same as [`load_or_init`] for an explicit path.
#[cfg(not(target_arch = "wasm32"))]
pub fn load_or_init_at(path: &std::path::Path) -> Result<TrackerConfig> {
    use anyhow::Context;
    use std::fs;

    if !path.exists() {
        let default_cfg = TrackerConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml).with_context(|| format!("write config: {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data =
        fs::read_to_string(path).with_context(|| format!("read config: {}", path.display()))?;
    let cfg: TrackerConfig =
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = TrackerConfig::default();
        assert_eq!(cfg.dom.form_id, "pdf-form");
        assert_eq!(cfg.navigation.download_segment, "/download/");
        assert_eq!(cfg.navigation.home_path, "/");
        assert_eq!(cfg.timing.redirect_delay(), Duration::from_millis(1000));
        assert_eq!(cfg.timing.success_hide(), Duration::from_millis(5000));
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = TrackerConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: TrackerConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn config_toml_partial_sections_fall_back_to_defaults() {
        let toml = r#"
            [timing]
            redirect_delay_ms = 250

            [navigation]
            home_path = "/tool"
        "#;
        let cfg: TrackerConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.timing.redirect_delay_ms, 250);
        assert_eq!(cfg.timing.success_hide_ms, 5000);
        assert_eq!(cfg.navigation.home_path, "/tool");
        assert_eq!(cfg.navigation.download_segment, "/download/");
        assert_eq!(cfg.dom, DomConfig::default());
    }

    #[test]
    fn download_page_detection_uses_segment() {
        let nav = NavigationConfig::default();
        assert!(nav.is_download_page("/download/abc123"));
        assert!(nav.is_download_page("/app/download/x.txt"));
        assert!(!nav.is_download_page("/download"));
        assert!(!nav.is_download_page("/direct-download"));
        assert!(!nav.is_download_page("/"));
    }

    #[test]
    fn elapsed_line_substitutes_seconds() {
        let msgs = MessagesConfig::default();
        assert_eq!(msgs.elapsed_line(7), "Processing completed in 7 seconds");
    }

    #[test]
    fn load_or_init_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let cfg = load_or_init_at(&path).unwrap();
        assert_eq!(cfg, TrackerConfig::default());
        assert!(path.exists());
        let again = load_or_init_at(&path).unwrap();
        assert_eq!(again, cfg);
    }
}
