use crate::error::ConfigError;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{AlertConfig, Config, EnrichmentConfig, HeatmapConfig, TensionConfig};

/// Loads and validates the application configuration from a TOML file.
///
/// This function is the primary entry point for this crate. It reads the
/// configuration file, deserializes it into our strongly-typed `Config`
/// struct, runs the cross-field validation, and returns the result. Sections
/// missing from the file fall back to the production defaults.
pub fn load_config(path: &str) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::with_name(path))
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    tracing::debug!("Loaded configuration from '{}'", path);
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::{MissingValuePolicy, RiskDirection, ScorerKind};

    const SAMPLE: &str = r#"
[tension]
missing_policy = "ExcludeAndRenormalize"

[tension.weights]
tone = 0.5
volatility = 0.5

[tension.directions]
tone = "LowerIsWorse"
volatility = "HigherIsWorse"

[alerts]
elevated_index = 55.0
component_risk = 65.0

[enrichment]
scorer_preference = ["Heuristic"]
"#;

    #[test]
    fn loads_a_partial_file_over_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, SAMPLE).expect("write config");

        let config = load_config(path.to_str().expect("utf8 path")).expect("config loads");
        assert_eq!(
            config.tension.missing_policy,
            MissingValuePolicy::ExcludeAndRenormalize
        );
        assert_eq!(config.tension.weights.len(), 2);
        assert_eq!(
            config.tension.direction_for("volatility"),
            Some(RiskDirection::HigherIsWorse)
        );
        assert_eq!(config.alerts.elevated_index, 55.0);
        assert_eq!(
            config.enrichment.scorer_preference,
            vec![ScorerKind::Heuristic]
        );

        // The [heatmap] section was omitted, so the defaults apply.
        assert_eq!(config.heatmap.weights.len(), 4);
        assert!(config.heatmap.weights.contains_key("momentum"));
    }

    #[test]
    fn empty_file_yields_the_production_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "").expect("write config");

        let config = load_config(path.to_str().expect("utf8 path")).expect("config loads");
        let defaults = crate::Config::default();
        assert_eq!(config.tension.weights, defaults.tension.weights);
        assert_eq!(config.heatmap.weights, defaults.heatmap.weights);
        assert_eq!(config.alerts.elevated_index, defaults.alerts.elevated_index);
        assert_eq!(
            config.enrichment.scorer_preference,
            defaults.enrichment.scorer_preference
        );
    }

    #[test]
    fn invalid_weights_in_the_file_are_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[tension.weights]
tone = 0.9

[tension.directions]
tone = "LowerIsWorse"
"#,
        )
        .expect("write config");

        let result = load_config(path.to_str().expect("utf8 path"));
        assert!(
            matches!(result, Err(ConfigError::InvalidWeights(_))),
            "expected weight rejection, got {:?}",
            result
        );
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let result = load_config("/definitely/not/here/config.toml");
        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }
}
