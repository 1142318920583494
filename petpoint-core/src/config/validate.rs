//! Configuration validation rules.

use super::schema::Config;

/// Validate configuration and return aggregated validation errors.
pub fn validate_config(config: &Config) -> crate::Result<()> {
    let mut errors = Vec::new();

    if config.server.host.trim().is_empty() {
        errors.push("server.host must not be empty".to_string());
    }
    if config.server.port == 0 {
        errors.push("server.port must be > 0".to_string());
    }

    if config.session.timeout_secs == 0 {
        errors.push("session.timeout_secs must be > 0".to_string());
    }
    if config.session.sweep_interval_secs == 0 {
        errors.push("session.sweep_interval_secs must be > 0".to_string());
    }
    if config.session.max_history == Some(0) {
        errors.push("session.max_history must be > 0 when set".to_string());
    }

    if config.nlp.dataset_path.trim().is_empty() {
        errors.push("nlp.dataset_path must not be empty".to_string());
    }
    if !(0.0..=1.0).contains(&config.nlp.similarity_threshold) {
        errors.push("nlp.similarity_threshold must be in [0.0, 1.0]".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(crate::Error::Validation(errors.join("; ")))
    }
}
