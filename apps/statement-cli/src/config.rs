//! TOML configuration for the statement CLI
//!
//! A config file picks a locale and may override any subset of the engine
//! (`[statement]`) and layout (`[layout]`) settings. Overrides are merged onto
//! the preset for the chosen locale, so a Japanese config only needs to list
//! what differs from the Japanese preset.
//!
//! ```toml
//! locale = "ja"
//!
//! [statement]
//! utc_offset_minutes = 540
//!
//! [statement.normalizer]
//! actor = "相手方"
//!
//! [layout]
//! page_capacity = 12
//! ```

use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared_types::Locale;
use statement_engine::StatementConfig;
use statement_layout::LayoutConfig;
use std::fs;
use std::path::Path;

/// Engine and layout settings resolved for one run
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub statement: StatementConfig,
    pub layout: LayoutConfig,
}

impl AppConfig {
    /// Built-in settings for `locale`
    pub fn preset(locale: Locale) -> Self {
        Self {
            statement: StatementConfig::preset(locale),
            layout: LayoutConfig::preset(locale),
        }
    }

    /// Load configuration from a TOML file
    ///
    /// `locale` takes precedence over the file's own `locale` key.
    pub fn from_file<P: AsRef<Path>>(path: P, locale: Option<Locale>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&content, locale)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(s: &str, locale: Option<Locale>) -> anyhow::Result<Self> {
        let root: toml::Value = toml::from_str(s).context("Failed to parse TOML")?;

        let locale = match (locale, root.get("locale")) {
            (Some(locale), _) => locale,
            (None, Some(value)) => value
                .as_str()
                .context("`locale` must be a string")?
                .parse::<Locale>()
                .map_err(anyhow::Error::msg)?,
            (None, None) => Locale::default(),
        };

        let preset = Self::preset(locale);
        let mut statement: StatementConfig =
            overlay(&preset.statement, root.get("statement")).context("Invalid [statement] table")?;
        let layout: LayoutConfig =
            overlay(&preset.layout, root.get("layout")).context("Invalid [layout] table")?;

        // The top-level choice wins over a stray `statement.locale`
        statement.locale = locale;

        Ok(Self { statement, layout })
    }
}

/// Deep-merge `table` onto the serialized `base` and read the result back
fn overlay<T>(base: &T, table: Option<&toml::Value>) -> anyhow::Result<T>
where
    T: Serialize + DeserializeOwned,
{
    let mut merged = toml::Value::try_from(base).context("Failed to serialize preset")?;
    if let Some(table) = table {
        anyhow::ensure!(table.is_table(), "expected a table");
        merge(&mut merged, table.clone());
    }
    merged.try_into::<T>().context("Failed to apply overrides")
}

fn merge(base: &mut toml::Value, overlay: toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base), toml::Value::Table(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(existing) => merge(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_config_is_english_preset() {
        let config = AppConfig::from_toml("", None).unwrap();
        assert_eq!(config, AppConfig::preset(Locale::English));
    }

    #[test]
    fn test_locale_selects_preset() {
        let config = AppConfig::from_toml(r#"locale = "ja""#, None).unwrap();
        assert_eq!(config, AppConfig::preset(Locale::Japanese));
    }

    #[test]
    fn test_cli_locale_overrides_file() {
        let config = AppConfig::from_toml(r#"locale = "ja""#, Some(Locale::English)).unwrap();
        assert_eq!(config.statement.locale, Locale::English);
        assert_eq!(config.layout.title, "WRITTEN STATEMENT");
    }

    #[test]
    fn test_nested_overrides_keep_preset_siblings() {
        let config = AppConfig::from_toml(
            r#"
            locale = "ja"

            [statement.normalizer]
            actor = "被申立人"

            [layout]
            page_capacity = 12
            "#,
            None,
        )
        .unwrap();

        let preset = AppConfig::preset(Locale::Japanese);
        assert_eq!(config.statement.normalizer.actor, "被申立人");
        assert_eq!(config.statement.normalizer.terminal, preset.statement.normalizer.terminal);
        assert_eq!(config.statement.phrasing, preset.statement.phrasing);
        assert_eq!(config.layout.page_capacity, 12);
        assert_eq!(config.layout.title, "陳 述 書");
    }

    #[test]
    fn test_fact_rules_can_be_replaced() {
        let config = AppConfig::from_toml(
            r#"
            [[statement.normalizer.fact_rules]]
            label = "damage to property"
            any_of = ["(broke|smashed)"]
            "#,
            None,
        )
        .unwrap();

        let rules = &config.statement.normalizer.fact_rules;
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].label, "damage to property");
        assert!(rules[0].all_of.is_empty());
    }

    #[test]
    fn test_bad_locale_is_rejected() {
        assert!(AppConfig::from_toml(r#"locale = "fr""#, None).is_err());
    }

    #[test]
    fn test_malformed_toml_is_rejected() {
        assert!(AppConfig::from_toml("[layout", None).is_err());
    }
}
