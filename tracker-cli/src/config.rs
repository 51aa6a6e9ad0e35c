//! Configuration module
//!
//! Turns CLI flags into the annotation keys and driver table used by the
//! core.

use anyhow::{Context, Result};
use tracker_core::{AnnotationKeys, Driver, DriverTable};

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Annotation keys consulted on pipeline runs
    pub keys: AnnotationKeys,
    /// Built-in provider hosts plus any registered with `--host`
    pub drivers: DriverTable,
    /// Emit JSON instead of human-readable output
    pub json: bool,
}

impl Config {
    pub fn new(
        source_url_annotation: String,
        source_sha_annotation: String,
        hosts: Vec<(String, Driver)>,
        json: bool,
    ) -> Self {
        let keys =
            AnnotationKeys::default().with_source_keys(source_url_annotation, source_sha_annotation);
        let drivers = hosts
            .into_iter()
            .fold(DriverTable::default(), |table, (domain, driver)| {
                table.with_host(domain, driver)
            });

        Self {
            keys,
            drivers,
            json,
        }
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        self.keys
            .validate()
            .context("Invalid annotation configuration")
    }
}

/// Parse a single DOMAIN=DRIVER pair
pub fn parse_host_mapping(s: &str) -> Result<(String, Driver)> {
    let (domain, driver) = s
        .split_once('=')
        .ok_or_else(|| anyhow::anyhow!("invalid DOMAIN=DRIVER: no `=` found in `{}`", s))?;

    let domain = domain.trim();
    if domain.is_empty() || domain.contains('/') {
        anyhow::bail!("invalid host domain `{}`", domain);
    }

    let driver = driver.trim().parse::<Driver>()?;
    Ok((domain.to_string(), driver))
}
