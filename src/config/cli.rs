use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueHint, builder::BoolishValueParser};

/// Command-line arguments for the salon-seo binary.
#[derive(Debug, Parser)]
#[command(
    name = "salon-seo",
    version,
    about = "Page metadata, JSON-LD and sitemaps for the studio site"
)]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(long = "config-file", env = "SALON_SEO_CONFIG_FILE", value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: SiteOverrides,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Print page head metadata and JSON-LD for every item in a content bundle.
    Head(BundleArgs),
    /// Print sitemap.xml for a content bundle.
    Sitemap(BundleArgs),
    /// Print robots.txt.
    Robots,
    /// Print the optimised URL, srcset and sizes attribute for an image.
    Images(ImagesArgs),
}

#[derive(Debug, Args, Clone)]
pub struct BundleArgs {
    /// Content bundle JSON as returned by the content API (`-` for stdin).
    #[arg(value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub file: PathBuf,

    /// Pretty-print JSON output.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub pretty: bool,
}

#[derive(Debug, Args, Clone)]
pub struct ImagesArgs {
    /// Absolute image URL.
    #[arg(value_name = "URL")]
    pub url: String,

    /// Requested width in pixels.
    #[arg(long, value_name = "PX")]
    pub width: Option<u32>,

    /// Requested height in pixels.
    #[arg(long, value_name = "PX")]
    pub height: Option<u32>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct SiteOverrides {
    /// Override the public site URL.
    #[arg(long = "site-url", global = true, value_name = "URL")]
    pub site_url: Option<String>,

    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        global = true,
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub log_json: Option<bool>,

    /// Override the image quality parameter for `src` and `srcset` URLs.
    #[arg(long = "image-quality", global = true, value_name = "1-100")]
    pub image_quality: Option<u8>,
}
