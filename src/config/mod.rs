//! Configuration layer: typed settings with layered precedence (file → env → CLI).

use std::str::FromStr;

use clap::Parser;
use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;
use url::Url;

use crate::domain::business::{BusinessIdentity, CurrencyCode, PostalAddress};

mod cli;

pub use cli::{BundleArgs, CliArgs, Command, ImagesArgs, SiteOverrides};

const DEFAULT_CONFIG_BASENAME: &str = "config/default";
const LOCAL_CONFIG_BASENAME: &str = "salon-seo";
const ENV_PREFIX: &str = "SALON_SEO";
const DEFAULT_SITE_URL: &str = "http://localhost:4321";
const DEFAULT_SITE_NAME: &str = "CG Aesthetics";
const DEFAULT_BUSINESS_NAME: &str = "CG Aesthetics";
const DEFAULT_STREET_ADDRESS: &str = "Avenue des Alpes, 60";
const DEFAULT_LOCALITY: &str = "Montreux";
const DEFAULT_REGION: &str = "Vaud";
const DEFAULT_POSTAL_CODE: &str = "1820";
const DEFAULT_COUNTRY: &str = "CH";
const DEFAULT_TELEPHONE: &str = "+41763999732";
const DEFAULT_CURRENCY: &str = "CHF";
const DEFAULT_DESCRIPTION_MAX_LENGTH: usize = 160;
const MIN_DESCRIPTION_MAX_LENGTH: usize = 4;
const DEFAULT_IMAGE_QUALITY: u8 = 85;
const DEFAULT_SRCSET_WIDTHS: [u32; 3] = [400, 800, 1200];

/// Fully-resolved settings after precedence resolution and validation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub logging: LoggingSettings,
    pub site: SiteSettings,
    pub business: BusinessIdentity,
    pub seo: SeoSettings,
    pub images: ImageSettings,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy)]
pub enum LogFormat {
    Json,
    Compact,
}

#[derive(Debug, Clone)]
pub struct SiteSettings {
    pub base_url: Url,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct SeoSettings {
    pub description_max_length: usize,
}

#[derive(Debug, Clone)]
pub struct ImageSettings {
    pub quality: u8,
    pub srcset_widths: Vec<u32>,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl LoadError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Load settings using the configured precedence (file → environment → CLI).
pub fn load(cli: &CliArgs) -> Result<Settings, LoadError> {
    let mut builder = Config::builder()
        .add_source(File::with_name(DEFAULT_CONFIG_BASENAME).required(false))
        .add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

    if let Some(path) = cli.config_file.as_ref() {
        builder = builder.add_source(File::from(path.as_path()).required(true));
    }

    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("images.srcset_widths")
            .try_parsing(true),
    );

    let mut raw: RawSettings = builder.build()?.try_deserialize()?;
    raw.apply_site_overrides(&cli.overrides);

    Settings::from_raw(raw)
}

/// Resolve configuration using the supplied CLI arguments, returning both for downstream use.
pub fn load_with_cli() -> Result<(CliArgs, Settings), LoadError> {
    let args = CliArgs::parse();
    let settings = load(&args)?;
    Ok((args, settings))
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    logging: RawLoggingSettings,
    site: RawSiteSettings,
    business: RawBusinessSettings,
    seo: RawSeoSettings,
    images: RawImageSettings,
}

impl RawSettings {
    fn apply_site_overrides(&mut self, overrides: &SiteOverrides) {
        if let Some(url) = overrides.site_url.as_ref() {
            self.site.base_url = Some(url.clone());
        }
        if let Some(level) = overrides.log_level.as_ref() {
            self.logging.level = Some(level.clone());
        }
        if let Some(json) = overrides.log_json {
            self.logging.json = Some(json);
        }
        if let Some(quality) = overrides.image_quality {
            self.images.quality = Some(quality);
        }
    }
}

impl Settings {
    fn from_raw(raw: RawSettings) -> Result<Self, LoadError> {
        let RawSettings {
            logging,
            site,
            business,
            seo,
            images,
        } = raw;

        Ok(Self {
            logging: build_logging_settings(logging)?,
            site: build_site_settings(site)?,
            business: build_business_identity(business)?,
            seo: build_seo_settings(seo)?,
            images: build_image_settings(images)?,
        })
    }
}

fn build_logging_settings(logging: RawLoggingSettings) -> Result<LoggingSettings, LoadError> {
    let level = match logging.level {
        Some(level) => LevelFilter::from_str(level.as_str()).map_err(|err| {
            LoadError::invalid("logging.level", format!("failed to parse: {err}"))
        })?,
        None => LevelFilter::INFO,
    };

    let format = if logging.json.unwrap_or(false) {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };

    Ok(LoggingSettings { level, format })
}

fn build_site_settings(site: RawSiteSettings) -> Result<SiteSettings, LoadError> {
    let raw_url = site
        .base_url
        .unwrap_or_else(|| DEFAULT_SITE_URL.to_string());
    let base_url = Url::parse(raw_url.trim())
        .map_err(|err| LoadError::invalid("site.base_url", format!("`{raw_url}`: {err}")))?;
    if !matches!(base_url.scheme(), "http" | "https") {
        return Err(LoadError::invalid(
            "site.base_url",
            "scheme must be http or https",
        ));
    }

    let name = required_text(site.name, DEFAULT_SITE_NAME, "site.name")?;

    Ok(SiteSettings { base_url, name })
}

fn build_business_identity(business: RawBusinessSettings) -> Result<BusinessIdentity, LoadError> {
    let currency_raw = business
        .currency
        .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());
    let currency = CurrencyCode::parse(&currency_raw)
        .map_err(|err| LoadError::invalid("business.currency", err.to_string()))?;

    Ok(BusinessIdentity {
        name: required_text(business.name, DEFAULT_BUSINESS_NAME, "business.name")?,
        address: PostalAddress {
            street_address: required_text(
                business.street_address,
                DEFAULT_STREET_ADDRESS,
                "business.street_address",
            )?,
            locality: required_text(business.locality, DEFAULT_LOCALITY, "business.locality")?,
            region: optional_text(business.region, DEFAULT_REGION),
            postal_code: optional_text(business.postal_code, DEFAULT_POSTAL_CODE),
            country: required_text(business.country, DEFAULT_COUNTRY, "business.country")?,
        },
        telephone: optional_text(business.telephone, DEFAULT_TELEPHONE),
        currency,
    })
}

fn build_seo_settings(seo: RawSeoSettings) -> Result<SeoSettings, LoadError> {
    let description_max_length = seo
        .description_max_length
        .unwrap_or(DEFAULT_DESCRIPTION_MAX_LENGTH);
    if description_max_length < MIN_DESCRIPTION_MAX_LENGTH {
        return Err(LoadError::invalid(
            "seo.description_max_length",
            format!("must be at least {MIN_DESCRIPTION_MAX_LENGTH}"),
        ));
    }

    Ok(SeoSettings {
        description_max_length,
    })
}

fn build_image_settings(images: RawImageSettings) -> Result<ImageSettings, LoadError> {
    let quality = images.quality.unwrap_or(DEFAULT_IMAGE_QUALITY);
    if !(1..=100).contains(&quality) {
        return Err(LoadError::invalid(
            "images.quality",
            "must be between 1 and 100",
        ));
    }

    let srcset_widths = images
        .srcset_widths
        .unwrap_or_else(|| DEFAULT_SRCSET_WIDTHS.to_vec());
    if srcset_widths.is_empty() {
        return Err(LoadError::invalid(
            "images.srcset_widths",
            "at least one width is required",
        ));
    }
    if srcset_widths.contains(&0) {
        return Err(LoadError::invalid(
            "images.srcset_widths",
            "widths must be greater than zero",
        ));
    }

    Ok(ImageSettings {
        quality,
        srcset_widths,
    })
}

fn required_text(
    value: Option<String>,
    default: &str,
    key: &'static str,
) -> Result<String, LoadError> {
    let value = value.unwrap_or_else(|| default.to_string());
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(LoadError::invalid(key, "must not be empty"));
    }
    Ok(trimmed.to_string())
}

/// Unset keys take the default; an explicitly empty value clears the field.
fn optional_text(value: Option<String>, default: &str) -> Option<String> {
    let value = value.unwrap_or_else(|| default.to_string());
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawLoggingSettings {
    level: Option<String>,
    json: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSiteSettings {
    base_url: Option<String>,
    name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawBusinessSettings {
    name: Option<String>,
    street_address: Option<String>,
    locality: Option<String>,
    region: Option<String>,
    postal_code: Option<String>,
    country: Option<String>,
    telephone: Option<String>,
    currency: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSeoSettings {
    description_max_length: Option<usize>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawImageSettings {
    quality: Option<u8>,
    srcset_widths: Option<Vec<u32>>,
}
