use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rfe_core::EngineConfig;

/// Environment variable naming a TOML config file.
pub const CONFIG_ENV: &str = "RFE_CONFIG";

/// Resolve the config path: explicit flag wins over the environment.
pub fn config_path(flag: Option<&Path>) -> Option<PathBuf> {
    flag.map(Path::to_path_buf).or_else(|| {
        std::env::var(CONFIG_ENV)
            .ok()
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
    })
}

pub fn parse_config(content: &str) -> Result<EngineConfig> {
    let config: EngineConfig = toml::from_str(content).context("invalid engine config")?;
    config.validate()?;
    Ok(config)
}

/// Load the engine config, falling back to defaults when no path is set.
pub fn load_config(flag: Option<&Path>) -> Result<EngineConfig> {
    let Some(path) = config_path(flag) else {
        return Ok(EngineConfig::default());
    };
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config =
        parse_config(&content).with_context(|| format!("in config {}", path.display()))?;
    tracing::debug!("loaded config from {}: {config:?}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rfe_core::{Phase, Waveform};

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(parse_config("").unwrap(), EngineConfig::default());
    }

    #[test]
    fn test_kebab_case_keys() {
        let cfg = parse_config(
            r#"
            default-phase = "trauma-core"
            default-waveform = "triangle"
            pulse-width = 0.5
            "#,
        )
        .unwrap();
        assert_eq!(cfg.default_phase, Phase::TraumaCore);
        assert_eq!(cfg.default_waveform, Waveform::Triangle);
        assert_eq!(cfg.pulse_width, 0.5);
    }

    #[test]
    fn test_out_of_bounds_rejected() {
        let err = parse_config("noise-factor = 4.0").unwrap_err();
        assert!(format!("{err:#}").contains("noise-factor"), "{err:#}");
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(parse_config("default-colour = \"red\"").is_err());
    }

    #[test]
    fn test_flag_wins() {
        let p = config_path(Some(Path::new("/tmp/a.toml")));
        assert_eq!(p, Some(PathBuf::from("/tmp/a.toml")));
    }
}
