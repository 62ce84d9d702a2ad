use crate::commands::CmdResult;
use crate::config::VocabConfig;
use crate::error::{Result, VocabError};

const REDACTED: &str = "***";

/// The effective configuration as TOML, or a commented template of every setting.
/// The API key is never shown.
pub fn run(config: &VocabConfig, template: bool) -> Result<CmdResult> {
    let text = if template {
        VocabConfig::template()
    } else {
        let mut shown = config.clone();
        if shown.dictionary.api_key.is_some() {
            shown.dictionary.api_key = Some(REDACTED.to_string());
        }
        toml::to_string_pretty(&shown).map_err(|e| VocabError::Config(e.to_string()))?
    };
    Ok(CmdResult::default().with_text(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use confique::Config;

    fn config_from(text: &str) -> VocabConfig {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, text).unwrap();
        VocabConfig::from_file(&path).unwrap()
    }

    fn config() -> VocabConfig {
        config_from("[sample]\ncount = 7\n")
    }

    #[test]
    fn shows_effective_values() {
        let text = run(&config(), false).unwrap().text.unwrap();
        assert!(text.contains("count = 7"));
        assert!(text.contains("[review]"));
    }

    #[test]
    fn template_mode_lists_defaults() {
        let text = run(&config(), true).unwrap().text.unwrap();
        assert!(text.contains("default_familiarity"));
        assert!(!text.contains("count = 7"));
    }

    #[test]
    fn api_key_is_redacted() {
        let config = config_from("[dictionary]\napi_key = \"s3cret-key\"\n");
        let text = run(&config, false).unwrap().text.unwrap();
        assert!(!text.contains("s3cret-key"));
        assert!(text.contains("api_key = \"***\""));
        assert_eq!(config.dictionary.api_key.as_deref(), Some("s3cret-key"));
    }
}
