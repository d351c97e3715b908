use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::format::DEFAULT_CURRENCY_SYMBOL;
use crate::machine::MachineType;
use crate::scenario::Scenario;

/// 기본 설정 파일 경로. `--config`를 생략하면 이 경로를 쓴다.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 애플리케이션 설정을 표현한다. 파일에 빠진 키는 기본값으로 채운다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 언어 코드 (auto/en-us/ko-kr)
    pub language: String,
    /// 언어팩 TOML 디렉터리
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_pack_dir: Option<String>,
    /// 가격 표시용 통화 기호
    pub currency_symbol: String,
    /// 시작 시 선택되는 시나리오
    pub default_scenario: Scenario,
    /// 시작 시 선택되는 기종
    pub default_machine: MachineType,
    /// GUI 창 투명도(0.3~1.0)
    pub window_alpha: f32,
    /// GUI에 등록할 사용자 폰트(한글 표시용)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_path: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "auto".into(),
            language_pack_dir: None,
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.into(),
            default_scenario: Scenario::AllVariables,
            default_machine: MachineType::Lathe,
            window_alpha: 1.0,
            font_path: None,
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug)]
pub enum ConfigError {
    /// 파일 입출력 오류
    Io(std::io::Error),
    /// TOML 역직렬화 오류
    Serde(toml::de::Error),
    /// TOML 직렬화 오류
    Serialize(toml::ser::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config file I/O error: {e}"),
            ConfigError::Serde(e) => write!(f, "config parse error: {e}"),
            ConfigError::Serialize(e) => write!(f, "config serialization error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        ConfigError::Io(value)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(value: toml::de::Error) -> Self {
        ConfigError::Serde(value)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(value: toml::ser::Error) -> Self {
        ConfigError::Serialize(value)
    }
}

/// 지정 경로의 설정을 로드한다. 파일이 없으면 기본값을 저장한 뒤 돌려준다.
pub fn load_or_default_at(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(cfg)
    } else {
        let cfg = Config::default();
        save_config(&cfg, path)?;
        tracing::info!(path = %path.display(), "default config written");
        Ok(cfg)
    }
}

fn save_config(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(cfg)?;
    fs::write(path, content)?;
    Ok(())
}

impl Config {
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        save_config(self, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let cfg: Config = toml::from_str(
            "language = \"ko-kr\"\ndefault_machine = \"Milling\"\n",
        )
        .unwrap();
        assert_eq!(cfg.language, "ko-kr");
        assert_eq!(cfg.default_machine, MachineType::Milling);
        assert_eq!(cfg.default_scenario, Scenario::AllVariables);
        assert_eq!(cfg.currency_symbol, "₦");
    }

    #[test]
    fn config_round_trips_through_toml() {
        let cfg = Config {
            default_scenario: Scenario::ExcludingWorkpiecesAndOperators,
            currency_symbol: "$".into(),
            language_pack_dir: Some("locales".into()),
            ..Config::default()
        };
        let text = toml::to_string_pretty(&cfg).unwrap();
        let back: Config = toml::from_str(&text).unwrap();
        assert_eq!(back, cfg);
    }

    #[test]
    fn missing_file_writes_defaults() {
        let path = std::env::temp_dir().join(format!(
            "price_estimator_cfg_{}.toml",
            std::process::id()
        ));
        let _ = fs::remove_file(&path);
        let cfg = load_or_default_at(&path).unwrap();
        assert_eq!(cfg, Config::default());
        assert!(path.exists());
        let again = load_or_default_at(&path).unwrap();
        assert_eq!(again, cfg);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn invalid_scenario_in_file_is_a_parse_error() {
        let err = toml::from_str::<Config>("default_scenario = \"Everything\"").unwrap_err();
        assert!(!err.to_string().is_empty());
    }
}
