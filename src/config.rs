// src/config.rs
use std::env;
use thiserror::Error;

use crate::domain::slug::{ConflictPolicy, SlugOptions, SubstitutionChar, TitleFields};

#[derive(Clone, Debug)]
pub struct AppConfig {
    database_url: Option<String>,
    table: String,
    id_column: String,
    slug_options: SlugOptions,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

fn default_table() -> String {
    "records".into()
}

fn default_id_column() -> String {
    "id".into()
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect()
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        other => Err(ConfigError::Invalid(format!("{key} must be a boolean, got {other}"))),
    }
}

impl AppConfig {
    /// Build configuration from environment variables, falling back to the
    /// documented slug defaults for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Allow dotenv files to populate env vars when present.
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`] with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let mut builder = SlugOptions::builder();

        if let Some(fields) = lookup("SLUG_TITLE_FIELDS") {
            let fields = split_list(&fields);
            builder = match fields.len() {
                0 => return Err(ConfigError::Invalid("SLUG_TITLE_FIELDS is empty".into())),
                1 => builder.title_fields(TitleFields::Single(fields[0].clone())),
                _ => builder.title_fields(TitleFields::Many(fields)),
            };
        }

        if let Some(field) = lookup("SLUG_FIELD") {
            builder = builder.slug_field(field.trim());
        }

        if let Some(value) = lookup("SLUG_SUBSTITUTION_CHAR") {
            let mut chars = value.chars();
            let (Some(c), None) = (chars.next(), chars.next()) else {
                return Err(ConfigError::Invalid(
                    "SLUG_SUBSTITUTION_CHAR must be a single character".into(),
                ));
            };
            let c = SubstitutionChar::new(c).map_err(|e| ConfigError::Invalid(e.to_string()))?;
            builder = builder.substitution_char(c);
        }

        if let Some(value) = lookup("SLUG_DOWNCASE") {
            builder = builder.downcase(parse_bool("SLUG_DOWNCASE", &value)?);
        }

        if let Some(value) = lookup("SLUG_MAX_LENGTH") {
            let max_length = value.trim().parse::<usize>().map_err(|_| {
                ConfigError::Invalid(format!("SLUG_MAX_LENGTH must be a positive integer, got {value}"))
            })?;
            builder = builder.max_length(max_length);
        }

        if let Some(value) = lookup("SLUG_CONFLICT_POLICY") {
            let policy = value
                .parse::<ConflictPolicy>()
                .map_err(|e| ConfigError::Invalid(e.to_string()))?;
            builder = builder.conflict_policy(policy);
        }

        if let Some(value) = lookup("SLUG_SCOPE") {
            for field in split_list(&value) {
                builder = builder.scope_field(field);
            }
        }

        if let Some(value) = lookup("SLUG_REQUIRE_UNIQUENESS") {
            builder = builder.require_uniqueness(parse_bool("SLUG_REQUIRE_UNIQUENESS", &value)?);
        }

        if let Some(value) = lookup("SLUG_MAX_ATTEMPTS") {
            let attempts = value.trim().parse::<u32>().map_err(|_| {
                ConfigError::Invalid(format!("SLUG_MAX_ATTEMPTS must be a positive integer, got {value}"))
            })?;
            builder = builder.max_attempts(attempts);
        }

        let slug_options = builder
            .build()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        Ok(Self {
            database_url: lookup("DATABASE_URL"),
            table: lookup("SLUG_TABLE").unwrap_or_else(default_table),
            id_column: lookup("SLUG_ID_COLUMN").unwrap_or_else(default_id_column),
            slug_options,
        })
    }

    /// Database used for collision checks; slugs are only normalized without it.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref()
    }

    pub fn require_database_url(&self) -> Result<&str, ConfigError> {
        self.database_url().ok_or(ConfigError::Missing("DATABASE_URL"))
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn id_column(&self) -> &str {
        &self.id_column
    }

    pub fn slug_options(&self) -> &SlugOptions {
        &self.slug_options
    }
}
