use crate::args::SetSettingsArgs;
use crate::commands::Out;
use crate::settings::Settings;
use crate::{Config, Result};

/// Returns the current settings.
pub async fn settings_show(config: Config) -> Result<Out<Settings>> {
    let settings = config.settings().clone();
    let message = format!(
        "name: '{}', currency: {}, locale: {}, timezone: {}, theme: {}",
        settings.display_name, settings.currency, settings.locale, settings.timezone, settings.theme
    );
    Ok(Out::new(message, settings))
}

/// Changes the given settings, leaving the others as they are, and saves them to `config.json`.
pub async fn settings_set(config: Config, args: SetSettingsArgs) -> Result<Out<Settings>> {
    let mut settings = config.settings().clone();
    let mut changed = Vec::new();
    if let Some(display_name) = args.display_name {
        settings.display_name = display_name;
        changed.push("display_name");
    }
    if let Some(currency) = args.currency {
        settings.currency = currency;
        changed.push("currency");
    }
    if let Some(locale) = args.locale {
        settings.locale = locale;
        changed.push("locale");
    }
    if let Some(timezone) = args.timezone {
        settings.timezone = timezone;
        changed.push("timezone");
    }
    if let Some(theme) = args.theme {
        settings.theme = theme;
        changed.push("theme");
    }

    if changed.is_empty() {
        return Ok(Out::new("No settings were changed", settings));
    }

    config.save_settings(settings.clone()).await?;
    Ok(Out::new(
        format!("Updated {}", changed.join(", ")),
        settings,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{Currency, Locale, Theme};
    use crate::test::TestEnv;
    use std::str::FromStr;

    #[tokio::test]
    async fn test_settings_set_and_show() {
        let env = TestEnv::new().await;
        let args = SetSettingsArgs {
            currency: Some(Currency::Jpy),
            locale: Some(Locale::from_str("ja-JP").unwrap()),
            theme: Some(Theme::Dark),
            ..SetSettingsArgs::default()
        };
        let out = settings_set(env.config(), args).await.unwrap();
        assert_eq!(out.message(), "Updated currency, locale, theme");

        let config = Config::load(env.config().root()).await.unwrap();
        let out = settings_show(config).await.unwrap();
        assert!(out.message().contains("currency: JPY"));
        assert!(out.message().contains("locale: ja-JP"));
        assert_eq!(out.structure().unwrap().theme, Theme::Dark);
    }

    #[tokio::test]
    async fn test_settings_set_nothing() {
        let env = TestEnv::new().await;
        let out = settings_set(env.config(), SetSettingsArgs::default())
            .await
            .unwrap();
        assert_eq!(out.message(), "No settings were changed");
    }
}
