use std::{
    fs,
    io::{self, Read, Write},
    path::Path,
    process,
};

use salon_seo::{
    application::{
        error::{AppError, error_chain},
        images::{default_image_sizes, generate_srcset_with_quality, optimize_image_url},
        page::{PageHead, PageHeadService, SiteContext},
        sitemap::SitemapService,
        structured_data::StructuredData,
    },
    config::{self, BundleArgs, ImagesArgs},
    domain::content::ContentCatalog,
    infra::{
        error::InfraError,
        graphql::{ingest_bundle, parse_bundle},
        telemetry,
    },
};
use serde::Serialize;
use tracing::{Dispatch, Level, dispatcher, error, info};
use tracing_subscriber::fmt as tracing_fmt;

fn main() {
    if let Err(error) = run() {
        report_application_error(&error);
        process::exit(error.exit_code());
    }
}

fn report_application_error(error: &AppError) {
    let chain = error_chain(error);
    if dispatcher::has_been_set() {
        error!(error = %error, chain = ?chain, "application error");
        return;
    }

    let subscriber = tracing_fmt()
        .with_writer(io::stderr)
        .with_max_level(Level::ERROR)
        .finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, chain = ?chain, "application error");
    });
}

fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()?;

    telemetry::init(&settings.logging)?;

    let site = SiteContext::from_settings(&settings);
    match cli_args.command {
        config::Command::Head(args) => run_head(site, &args),
        config::Command::Sitemap(args) => run_sitemap(site, &args),
        config::Command::Robots => {
            let sitemap = SitemapService::new(site.base_url);
            write_stdout(&sitemap.robots_txt())
        }
        config::Command::Images(args) => run_images(&site, &args),
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HeadReport {
    site_name: String,
    pages: Vec<PageHead>,
    #[serde(skip_serializing_if = "Option::is_none")]
    aggregate_rating: Option<StructuredData>,
}

fn run_head(site: SiteContext, args: &BundleArgs) -> Result<(), AppError> {
    let catalog = load_catalog(&args.file)?;
    let service = PageHeadService::new(site);

    let items = catalog.items();
    let pages = service.describe_all(&items);
    let aggregate_rating = service.aggregate_rating(&catalog.testimonials)?;

    info!(pages = pages.len(), "assembled page heads");

    let report = HeadReport {
        site_name: service.site().site_name.clone(),
        pages,
        aggregate_rating,
    };
    let mut json = if args.pretty {
        serde_json::to_string_pretty(&report)
    } else {
        serde_json::to_string(&report)
    }
    .map_err(InfraError::from)?;
    json.push('\n');
    write_stdout(&json)
}

fn run_sitemap(site: SiteContext, args: &BundleArgs) -> Result<(), AppError> {
    let catalog = load_catalog(&args.file)?;
    let sitemap = SitemapService::new(site.base_url);
    write_stdout(&sitemap.sitemap_xml(&catalog.items()))
}

fn run_images(site: &SiteContext, args: &ImagesArgs) -> Result<(), AppError> {
    let optimized = optimize_image_url(&args.url, args.width, args.height, site.image_quality);
    if optimized.is_empty() {
        return Err(AppError::unexpected(format!(
            "`{}` is not an absolute image URL",
            args.url
        )));
    }

    let srcset = generate_srcset_with_quality(&args.url, &site.srcset_widths, site.image_quality);
    let sizes = default_image_sizes();
    write_stdout(&format!("src: {optimized}\nsrcset: {srcset}\nsizes: {sizes}\n"))
}

fn load_catalog(path: &Path) -> Result<ContentCatalog, AppError> {
    let json = if path == Path::new("-") {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(InfraError::from)?;
        buffer
    } else {
        fs::read_to_string(path).map_err(InfraError::from)?
    };

    let bundle = parse_bundle(&json)?;
    let catalog = ingest_bundle(bundle)?;
    info!(
        services = catalog.services.len(),
        team = catalog.team.len(),
        testimonials = catalog.testimonials.len(),
        "ingested content bundle"
    );
    Ok(catalog)
}

fn write_stdout(output: &str) -> Result<(), AppError> {
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(output.as_bytes())
        .and_then(|()| stdout.flush())
        .map_err(InfraError::from)?;
    Ok(())
}
