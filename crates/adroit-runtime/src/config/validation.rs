//! Configuration validation utilities.

use std::collections::HashSet;

use adroit_core::inflector::camelize;

use super::error::{ConfigError, ConfigResult};
use super::schema::{AdroitConfig, BundleConfig, LanguagesConfig, LogOutput, LoggingConfig};

/// Validates the entire configuration.
pub fn validate_config(config: &AdroitConfig) -> ConfigResult<()> {
    validate_languages(&config.languages)?;
    validate_bundles(&config.bundles)?;
    validate_logging(&config.logging)?;
    Ok(())
}

fn validate_languages(languages: &LanguagesConfig) -> ConfigResult<()> {
    if languages.default.is_empty() {
        return Err(ConfigError::validation("Default language must not be empty"));
    }

    if languages.possible.iter().any(String::is_empty) {
        return Err(ConfigError::validation("Possible languages must not be empty strings"));
    }

    if !languages.possible.contains(&languages.default) {
        return Err(ConfigError::validation(format!(
            "Default language '{}' is not one of the possible languages: {:?}",
            languages.default, languages.possible
        )));
    }

    Ok(())
}

fn validate_bundles(bundles: &[BundleConfig]) -> ConfigResult<()> {
    let mut seen = HashSet::new();

    for bundle in bundles {
        if !seen.insert(bundle.name.as_str()) {
            return Err(ConfigError::DuplicateBundle(bundle.name.clone()));
        }
        validate_bundle(bundle)?;
    }

    Ok(())
}

fn validate_bundle(bundle: &BundleConfig) -> ConfigResult<()> {
    if bundle.name.is_empty() {
        return Err(ConfigError::validation("Bundle name must not be empty"));
    }

    if camelize(&bundle.name) != bundle.name {
        return Err(ConfigError::validation(format!(
            "Bundle name '{}' must be camelized (e.g. '{}')",
            bundle.name,
            camelize(&bundle.name)
        )));
    }

    if bundle.namespace.as_deref().is_some_and(|ns| ns.trim_matches('\\').is_empty()) {
        return Err(ConfigError::validation(format!(
            "Namespace of bundle '{}' must not be empty",
            bundle.name
        )));
    }

    Ok(())
}

fn validate_logging(logging: &LoggingConfig) -> ConfigResult<()> {
    if logging.output == LogOutput::File && logging.file_path.is_none() {
        return Err(ConfigError::validation(
            "logging.file_path is required when logging.output is 'file'",
        ));
    }

    if logging.filters.keys().any(|k| k.trim().is_empty()) {
        return Err(ConfigError::validation("Log filter targets must not be empty"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::config::schema::LogLevel;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&AdroitConfig::default()).is_ok());
    }

    #[test]
    fn test_default_language_must_be_possible() {
        let mut config = AdroitConfig::default();
        config.languages.default = "fr".into();
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { .. }));
        assert!(err.to_string().contains("'fr'"));

        config.languages.default = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_duplicate_bundle() {
        let mut config = AdroitConfig::default();
        config.bundles.push(BundleConfig::named("App"));
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::DuplicateBundle(name)) if name == "App"
        ));
    }

    #[test]
    fn test_bundle_name_rules() {
        let mut config = AdroitConfig::default();
        config.bundles = vec![BundleConfig::named("")];
        assert!(validate_config(&config).is_err());

        config.bundles = vec![BundleConfig::named("admin-panel")];
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("'AdminPanel'"));

        config.bundles = vec![BundleConfig::named("AdminPanel")];
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_empty_namespace() {
        let mut config = AdroitConfig::default();
        config.bundles = vec![BundleConfig::new("Blog", "\\")];
        assert!(validate_config(&config).is_err());

        config.bundles = vec![BundleConfig::new("Blog", "Acme\\Blog\\")];
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_file_output_requires_path() {
        let mut config = AdroitConfig::default();
        config.logging.output = LogOutput::File;
        assert!(validate_config(&config).is_err());

        config.logging.file_path = Some(PathBuf::from("logs/adroit.log"));
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_empty_filter_target() {
        let mut config = AdroitConfig::default();
        config.logging.filters.insert(" ".into(), LogLevel::Debug);
        assert!(validate_config(&config).is_err());
    }
}
