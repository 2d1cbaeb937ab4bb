//! The `upload` and `normalize` command handlers.
//!
//! `run` owns the whole batch: normalize (with fallback), resolve the
//! requested category against the taxonomy, log in once, then hand products
//! to the driver one at a time. A per-product failure is recorded and the
//! loop continues, so one bad record never aborts the batch.

use std::path::PathBuf;

use clap::Args;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rust_decimal::Decimal;

use uplister_core::{NormalizedProduct, SubmissionOutcome, SubmissionStatus, TaxonPath, Taxonomy};
use uplister_feed::normalize_or_fallback;
use uplister_spree::{SpreeClient, SpreeDriver, SubmissionDriver};

use crate::report::ReportWriter;

#[derive(Debug, Args)]
pub struct UploadArgs {
    /// Path to the JSON product feed. Omitting it submits one synthetic
    /// placeholder product.
    #[arg(long)]
    pub feed: Option<PathBuf>,

    /// Exchange rate: local currency per USD. Must be positive.
    #[arg(long)]
    pub rate: Decimal,

    /// Category breadcrumb to resolve against the taxonomy,
    /// e.g. "Cosmetics > Hair Care > Combs".
    #[arg(long)]
    pub category: Option<String>,

    /// Skip this many feed records before submitting (resume a partial run).
    #[arg(long, default_value_t = 0)]
    pub offset: usize,

    /// Seed for placeholder and markup draws; omit for a random run.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Submit listing data only, without downloading or uploading images.
    #[arg(long)]
    pub skip_images: bool,

    /// Normalize and report what would be submitted, without contacting
    /// the admin console.
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Args)]
pub struct NormalizeArgs {
    /// Path to the JSON product feed.
    #[arg(long)]
    pub feed: Option<PathBuf>,

    /// Exchange rate: local currency per USD. Must be positive.
    #[arg(long)]
    pub rate: Decimal,

    /// Seed for placeholder and markup draws.
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Per-batch totals, one count per outcome.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct BatchTotals {
    pub created: usize,
    pub updated: usize,
    pub failed: usize,
}

pub async fn run(args: &UploadArgs) -> anyhow::Result<()> {
    let config = uplister_core::load_app_config()?;

    let mut rng = make_rng(args.seed);
    let (mut products, fallback) =
        normalize_or_fallback(args.feed.as_deref(), args.rate, &mut rng)?;
    if let Some(fallback) = &fallback {
        tracing::warn!(
            error = %fallback.reason,
            "feed unusable, submitting one synthetic placeholder product"
        );
    }

    if let Some(category) = &args.category {
        let requested = TaxonPath::parse(category);
        let taxonomy = Taxonomy::load(&config.taxonomy_path)?;
        let taxon = apply_category(&taxonomy, &requested, &mut products)?;
        tracing::info!(taxon = %taxon, "resolved category");
    }

    let total = products.len();
    let products = apply_offset(&products, args.offset);
    if args.offset > 0 {
        tracing::info!(offset = args.offset, total, "resuming mid-feed");
    }

    if args.dry_run {
        tracing::info!(count = products.len(), "dry run, nothing submitted");
        println!("{}", serde_json::to_string_pretty(products)?);
        return Ok(());
    }

    let client = SpreeClient::new(
        &config.admin_base_url,
        config.request_timeout_secs,
        &config.user_agent,
        config.max_retries,
        config.retry_backoff_base_ms,
    )?;
    let driver = SpreeDriver::new(
        client,
        config.shipping_category_id.clone(),
        config.sku_suffix.clone(),
        !args.skip_images,
    );
    driver
        .login(&config.admin_email, &config.admin_password)
        .await?;

    let feed_name = feed_name(args.feed.as_deref());
    let mut writer = ReportWriter::create(&config.report_dir, &feed_name)?;
    let totals = run_batch(&driver, products, &mut writer).await?;
    let summary_path = writer.finalize()?;

    tracing::info!(
        created = totals.created,
        updated = totals.updated,
        failed = totals.failed,
        report = %summary_path.display(),
        "run complete"
    );
    Ok(())
}

pub fn normalize_only(args: &NormalizeArgs) -> anyhow::Result<()> {
    let mut rng = make_rng(args.seed);
    let (products, fallback) =
        normalize_or_fallback(args.feed.as_deref(), args.rate, &mut rng)?;
    if let Some(fallback) = &fallback {
        tracing::warn!(error = %fallback.reason, "feed unusable, showing one synthetic product");
    }
    println!("{}", serde_json::to_string_pretty(&products)?);
    Ok(())
}

/// Submits products sequentially, isolating per-product failures: an `Err`
/// from the driver becomes a `failed` report entry and the loop moves on.
pub async fn run_batch<D: SubmissionDriver>(
    driver: &D,
    products: &[NormalizedProduct],
    writer: &mut ReportWriter,
) -> anyhow::Result<BatchTotals> {
    let mut totals = BatchTotals::default();

    for product in products {
        let outcome = match driver.submit(product).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(
                    sku = %product.sku,
                    error = %e,
                    "submission failed, continuing with next product"
                );
                SubmissionOutcome::failed()
            }
        };
        match outcome.status {
            SubmissionStatus::Created => totals.created += 1,
            SubmissionStatus::Updated => totals.updated += 1,
            SubmissionStatus::Failed => totals.failed += 1,
        }
        writer.append(product, &outcome)?;
    }

    Ok(totals)
}

/// Relists the whole batch under the requested category: the resolved tree
/// path's last two segments replace each product's taxon keywords.
///
/// # Errors
///
/// Fails when the breadcrumb matches no declared taxonomy path, so a typo
/// aborts the run before anything is submitted.
fn apply_category(
    taxonomy: &Taxonomy,
    requested: &TaxonPath,
    products: &mut [NormalizedProduct],
) -> anyhow::Result<TaxonPath> {
    let Some(taxon) = taxonomy.resolve(requested) else {
        anyhow::bail!("category \"{requested}\" matches no declared taxonomy path");
    };
    let keywords: Vec<String> = taxon
        .segments()
        .iter()
        .rev()
        .take(2)
        .rev()
        .cloned()
        .collect();
    for product in products.iter_mut() {
        product.taxon_keywords.clone_from(&keywords);
    }
    Ok(taxon.clone())
}

/// Skips the first `offset` products to resume a partial run; an offset past
/// the end yields an empty batch rather than a panic.
fn apply_offset(products: &[NormalizedProduct], offset: usize) -> &[NormalizedProduct] {
    &products[offset.min(products.len())..]
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

fn feed_name(feed: Option<&std::path::Path>) -> String {
    feed.and_then(|p| p.file_stem())
        .map_or_else(|| "synthetic".to_string(), |s| s.to_string_lossy().to_string())
}
