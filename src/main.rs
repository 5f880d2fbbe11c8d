use std::path::PathBuf;
use std::process;
use std::time::Instant;

use clap::{Args, Parser, Subcommand};
use comfy_table::{modifiers, presets, ContentArrangement, Table};
use terminal_size::{terminal_size, Width};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use azsku::api::{probe, ReqwestGateway};
use azsku::cache::{CacheStore, DiskCache};
use azsku::catalog::{cache_key, read_snapshot, write_snapshot, CatalogConfig, CatalogService};
use azsku::config;
use azsku::models::capability::names;
use azsku::models::{SkuRecord, SpecSource};
use azsku::query::{
    CatalogSession, FeatureFilter, FilterOptions, QueryPage, SortConfig, SortKey,
};

fn base_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    if let Some((Width(w), _)) = terminal_size() {
        table.set_width(w - 4);
    }
    table
}

fn capability_cell(record: &SkuRecord, name: &str) -> String {
    record
        .capability(name)
        .map(|v| v.to_string())
        .unwrap_or_else(|| String::from("N/A"))
}

fn feature_tags(record: &SkuRecord) -> String {
    let flags = [
        (names::PREMIUM_IO, "premium-io"),
        (names::ACCELERATED_NETWORKING, "accel-net"),
        (names::EPHEMERAL_OS, "ephemeral-os"),
        (names::NESTED_VIRTUALIZATION, "nested-virt"),
        (names::ENCRYPTION_AT_HOST, "encryption-at-host"),
    ];
    let tags: Vec<&str> = flags
        .iter()
        .filter(|(name, _)| record.feature_enabled(name))
        .map(|(_, tag)| *tag)
        .collect();
    if tags.is_empty() {
        String::from("-")
    } else {
        tags.join(", ")
    }
}

fn print_page(page: &QueryPage, region: &str) {
    if page.items.is_empty() {
        println!(
            "{}",
            yansi::Paint::new(format!("No sizes in {} match the given filters.", region)).yellow()
        );
        return;
    }

    let mut table = base_table();
    table.set_header(vec![
        "Name", "Family", "vCPUs", "RAM (GB)", "$/hr", "Disks", "NICs", "Features", "Source",
    ]);
    for record in &page.items {
        table.add_row(vec![
            record.name.clone(),
            record.family.clone(),
            capability_cell(record, names::VCPUS),
            capability_cell(record, names::MEMORY_GB),
            capability_cell(record, names::PRICE_PER_HOUR),
            capability_cell(record, names::MAX_DATA_DISKS),
            capability_cell(record, names::MAX_NICS),
            feature_tags(record),
            record.source.label().to_string(),
        ]);
    }
    println!("\n{table}");

    println!(
        "\n{}",
        yansi::Paint::new(format!(
            "Page {} of {} | Showing {} of {} matching sizes in {}",
            page.page,
            page.total_pages,
            page.items.len(),
            page.total_records,
            region
        ))
        .cyan()
    );
    if page.page > 1 {
        println!(
            "{} {}",
            yansi::Paint::new("←").bold(),
            yansi::Paint::new(format!("Previous page: azsku list --page {}", page.page - 1)).dim()
        );
    }
    if page.page < page.total_pages {
        println!(
            "{} {}",
            yansi::Paint::new("→").bold(),
            yansi::Paint::new(format!("Next page: azsku list --page {}", page.page + 1)).dim()
        );
    }
    println!();
}

#[derive(Parser)]
#[command(
    name = "azsku",
    author,
    version,
    about = "Azure VM size and price browser",
    long_about = r#"azsku — browse Azure virtual machine sizes and retail prices from the terminal.

The catalog merges the public retail price feed with the authenticated
resource SKU feed (when credentials are configured) and caches the merged
result per region for 24 hours. Sizes missing from the authenticated feed
get their specs from a table of common sizes or from name heuristics.

Examples:
  1) List sizes in the default region:
      azsku list
  2) Memory optimized sizes with at least 8 vCPUs, cheapest first:
      azsku list --min-cpu 8 --family "Memory Optimized" --sort price
  3) Write a JSON snapshot for other tooling:
      azsku fetch --region eastus2 --output data/skus.json
"#,
    after_help = "Use `azsku <subcommand> --help` to get subcommand specific options and usage examples."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
    /// Path to .env file
    #[arg(long, global = true)]
    env_file: Option<String>,
    /// Disable colorized output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List sizes for a region with filters, sorting, and paging
    #[command(
        about = "List sizes for a region",
        long_about = "Filter, sort, and page through the merged catalog for one region. Results come from the on-disk cache when a fresh entry exists; pass --refresh to bypass it, or --snapshot to read a previously written JSON snapshot instead of the network."
    )]
    List(ListArgs),
    /// Fetch a fresh catalog and write it to a JSON snapshot
    #[command(
        about = "Fetch a region and write a JSON snapshot",
        long_about = "Always fetches fresh data (ignoring any cached entry), merges the feeds, and writes the records to a JSON file other tooling can consume. The cache is updated as a side effect."
    )]
    Fetch {
        /// Region to fetch (default: AZSKU_REGION or westeurope)
        #[arg(long)]
        region: Option<String>,
        /// Where to write the snapshot
        #[arg(long, default_value = config::DEFAULT_SNAPSHOT_PATH)]
        output: PathBuf,
    },
    /// Show commonly used region names
    Regions,
    /// Inspect or clear the on-disk cache
    Cache {
        #[command(subcommand)]
        sub: CacheCommands,
    },
    /// Validate configuration (env vars / credentials)
    #[command(
        about = "Validate configuration and optionally probe the price feed.",
        long_about = "Report the resolved endpoints, region, cache directory, and authentication mode. With --ping, issue a one-row request against the public retail price feed to confirm connectivity."
    )]
    CheckConfig {
        /// Issue a one-row request against the retail price feed
        #[arg(long)]
        ping: bool,
    },
}

#[derive(Args)]
struct ListArgs {
    /// Region to list (default: AZSKU_REGION or westeurope)
    #[arg(long)]
    region: Option<String>,
    /// Minimum vCPU count (0 disables the filter)
    #[arg(long, default_value_t = 0)]
    min_cpu: u32,
    /// Minimum memory in GB
    #[arg(long, default_value_t = 0.0)]
    min_ram: f64,
    /// Minimum data disk count
    #[arg(long, default_value_t = 0)]
    min_disks: u32,
    /// Minimum network interface count
    #[arg(long, default_value_t = 0)]
    min_nics: u32,
    /// Family label to match, e.g. "Memory Optimized"
    #[arg(long)]
    family: Option<String>,
    /// Required feature, repeatable (premium-io, accel-net, ephemeral-os, nested-virt, encryption-at-host)
    #[arg(long = "feature")]
    features: Vec<String>,
    /// Sort column: name, family, vcpus, memory, disks, nics, price
    #[arg(long, default_value = "vcpus")]
    sort: String,
    /// Sort descending instead of ascending
    #[arg(long)]
    desc: bool,
    /// Page number to display (1-indexed)
    #[arg(long, short = 'p', default_value_t = 1)]
    page: usize,
    /// Ignore any cached entry and fetch fresh data
    #[arg(long, conflicts_with = "snapshot")]
    refresh: bool,
    /// Read records from a snapshot file instead of the network
    #[arg(long)]
    snapshot: Option<PathBuf>,
    /// Print the matching page as JSON instead of a table
    #[arg(long)]
    json: bool,
}

impl Default for ListArgs {
    fn default() -> Self {
        Self {
            region: None,
            min_cpu: 0,
            min_ram: 0.0,
            min_disks: 0,
            min_nics: 0,
            family: None,
            features: Vec::new(),
            sort: String::from("vcpus"),
            desc: false,
            page: 1,
            refresh: false,
            snapshot: None,
            json: false,
        }
    }
}

#[derive(Subcommand)]
enum CacheCommands {
    /// List cached regions with their age and state
    Status,
    /// Remove cached entries (one region, or every region)
    Clear {
        /// Region to clear; omit to clear all cached regions
        #[arg(long)]
        region: Option<String>,
    },
}

async fn cmd_list(args: ListArgs) {
    let region = args.region.clone().unwrap_or_else(config::get_default_region);

    let features: Vec<FeatureFilter> = match args
        .features
        .iter()
        .map(|raw| raw.parse::<FeatureFilter>())
        .collect()
    {
        Ok(features) => features,
        Err(e) => {
            eprintln!("{}", yansi::Paint::new(&e).red());
            process::exit(1);
        }
    };
    let sort_key = match args.sort.parse::<SortKey>() {
        Ok(key) => key,
        Err(e) => {
            eprintln!("{}", yansi::Paint::new(&e).red());
            process::exit(1);
        }
    };
    let sort = if args.desc {
        SortConfig::descending(sort_key)
    } else {
        SortConfig::ascending(sort_key)
    };
    let filters = FilterOptions {
        min_cpu: (args.min_cpu > 0).then_some(args.min_cpu),
        min_ram: (args.min_ram > 0.0).then_some(args.min_ram),
        min_disks: (args.min_disks > 0).then_some(args.min_disks),
        min_nics: (args.min_nics > 0).then_some(args.min_nics),
        family: args.family.clone(),
        features,
    };

    let mut session = CatalogSession::new();
    let ticket = session.begin_fetch();
    let (records, fetched_at) = if let Some(path) = &args.snapshot {
        match read_snapshot(path) {
            Ok(records) => (records, None),
            Err(e) => {
                tracing::error!(%e, "Failed to read snapshot");
                eprintln!("{}: {}", yansi::Paint::new("Failed to read snapshot").red(), e);
                process::exit(1);
            }
        }
    } else {
        let service = CatalogService::from_env();
        match service.fetch_skus(&region, args.refresh).await {
            Ok(records) => {
                let fetched_at = service.last_updated(&region);
                (records, fetched_at)
            }
            Err(e) => {
                tracing::error!(%e, "Failed to load the catalog");
                eprintln!("{}: {}", yansi::Paint::new("Failed to load the catalog").red(), e);
                process::exit(1);
            }
        }
    };
    let have_api_specs = records.iter().any(|r| r.source == SpecSource::Api);
    let have_records = !records.is_empty();
    session.commit_records(ticket, records);
    session.set_filters(filters);
    session.set_sort(sort);
    session.set_page(args.page);

    let page = session.current_page();
    if args.json {
        match serde_json::to_string_pretty(&page.items) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("{}: {}", yansi::Paint::new("Failed to serialize records").red(), e);
                process::exit(1);
            }
        }
        return;
    }
    print_page(&page, &region);
    if let Some(at) = fetched_at {
        println!(
            "{}",
            yansi::Paint::new(format!("Data fetched {}", at.format("%Y-%m-%d %H:%M UTC"))).dim()
        );
    }
    if have_records && !have_api_specs {
        println!(
            "{}",
            yansi::Paint::new(
                "Specs are inferred from size names; configure credentials to use the resource SKU feed."
            )
            .yellow()
        );
    }
}

async fn cmd_fetch(region: Option<String>, output: PathBuf) {
    let region = region.unwrap_or_else(config::get_default_region);
    let service = CatalogService::from_env();
    let started = Instant::now();

    let records = match service.fetch_skus(&region, true).await {
        Ok(records) => records,
        Err(e) => {
            tracing::error!(%e, "Failed to fetch the catalog");
            eprintln!("{}: {}", yansi::Paint::new("Failed to fetch the catalog").red(), e);
            process::exit(1);
        }
    };
    if let Err(e) = write_snapshot(&output, &records) {
        tracing::error!(%e, "Failed to write snapshot");
        eprintln!("{}: {}", yansi::Paint::new("Failed to write snapshot").red(), e);
        process::exit(1);
    }

    let count_source = |source: SpecSource| records.iter().filter(|r| r.source == source).count();
    println!(
        "{} {} {} {}",
        yansi::Paint::new("Wrote").green(),
        records.len(),
        yansi::Paint::new(format!("records for {} to", region)).green(),
        yansi::Paint::new(output.display().to_string()).cyan()
    );
    println!(
        "{}",
        yansi::Paint::new(format!(
            "Sources: {} api, {} table, {} inferred | {:.1}s",
            count_source(SpecSource::Api),
            count_source(SpecSource::KnownSku),
            count_source(SpecSource::Inferred),
            started.elapsed().as_secs_f32()
        ))
        .dim()
    );
}

fn cmd_regions() {
    let default_region = config::get_default_region();
    let mut table = base_table();
    table.set_header(vec!["Region"]);
    for region in config::POPULAR_REGIONS {
        if *region == default_region {
            table.add_row(vec![format!("{} (default)", region)]);
        } else {
            table.add_row(vec![region.to_string()]);
        }
    }
    println!("\n{table}\n");
    println!(
        "{}",
        yansi::Paint::new("Any Azure region name is accepted; these are just the common ones.")
            .dim()
    );
}

fn cmd_cache_status() {
    let store = DiskCache::new(config::get_cache_dir());
    let regions = match store.list() {
        Ok(regions) => regions,
        Err(e) => {
            eprintln!("{}: {}", yansi::Paint::new("Failed to read the cache").red(), e);
            process::exit(1);
        }
    };
    if regions.is_empty() {
        println!("(cache is empty)");
        return;
    }

    let mut table = base_table();
    table.set_header(vec!["Region", "Records", "Fetched", "State"]);
    for region in &regions {
        match store.get(region) {
            Ok(Some(entry)) => {
                let fetched = entry
                    .fetched_at()
                    .map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string())
                    .unwrap_or_else(|| String::from("unknown"));
                let state = if entry.is_expired() { "expired" } else { "fresh" };
                table.add_row(vec![
                    region.clone(),
                    entry.data.len().to_string(),
                    fetched,
                    state.to_string(),
                ]);
            }
            Ok(None) => {
                table.add_row(vec![
                    region.clone(),
                    String::from("-"),
                    String::from("-"),
                    String::from("unreadable"),
                ]);
            }
            Err(e) => {
                eprintln!("{} '{}': {}", yansi::Paint::new("Failed to read entry for").red(), region, e);
            }
        }
    }
    println!("\n{table}\n");
}

fn cmd_cache_clear(region: Option<String>) {
    let store = DiskCache::new(config::get_cache_dir());
    match region {
        Some(region) => {
            let key = match cache_key(&region) {
                Ok(key) => key,
                Err(e) => {
                    eprintln!("{}", yansi::Paint::new(e.to_string()).red());
                    process::exit(1);
                }
            };
            if let Err(e) = store.remove(&key) {
                eprintln!("{} '{}': {}", yansi::Paint::new("Failed to clear").red(), key, e);
                process::exit(1);
            }
            println!("{} '{}'", yansi::Paint::new("Cleared cache entry for").green(), key);
        }
        None => {
            let regions = match store.list() {
                Ok(regions) => regions,
                Err(e) => {
                    eprintln!("{}: {}", yansi::Paint::new("Failed to read the cache").red(), e);
                    process::exit(1);
                }
            };
            let mut cleared = 0usize;
            for region in &regions {
                match store.remove(region) {
                    Ok(()) => cleared += 1,
                    Err(e) => {
                        eprintln!("{} '{}': {}", yansi::Paint::new("Failed to clear").red(), region, e)
                    }
                }
            }
            println!("{} {} {}", yansi::Paint::new("Cleared").green(), cleared, yansi::Paint::new("cache entries").green());
        }
    }
}

async fn cmd_check_config(ping: bool) {
    let config = CatalogConfig::from_env();
    let region = config::get_default_region();

    println!("{} {}", yansi::Paint::new("Price feed:").bold(), config.price_base_url);
    println!("{} {}", yansi::Paint::new("Management:").bold(), config.mgmt_base_url);
    println!("{} {}", yansi::Paint::new("Identity:").bold(), config.identity_base_url);
    println!("{} {}", yansi::Paint::new("Region:").bold(), region);
    println!("{} {}", yansi::Paint::new("Cache dir:").bold(), config::get_cache_dir().display());

    if config.access_token.is_some() {
        println!("{}", yansi::Paint::new("Auth: pre-acquired access token").green());
    } else if config.credentials.is_some() {
        println!("{}", yansi::Paint::new("Auth: service principal credentials").green());
    } else {
        println!(
            "{}",
            yansi::Paint::new("Auth: none (public retail data only; specs will be inferred)")
                .yellow()
        );
    }
    if (config.access_token.is_some() || config.credentials.is_some())
        && config.subscription_id.is_none()
    {
        println!(
            "{}",
            yansi::Paint::new(
                "AZURE_SUBSCRIPTION_ID is not set; the resource SKU feed will be skipped"
            )
            .yellow()
        );
    }

    if ping {
        let gateway = ReqwestGateway::new();
        match probe(&gateway, &config.price_base_url, &region).await {
            Ok(rows) => {
                println!(
                    "{}",
                    yansi::Paint::new(format!("Price feed reachable ({} row probe)", rows)).green()
                );
            }
            Err(e) => {
                tracing::error!(%e, "Price feed probe failed");
                eprintln!("{}: {}", yansi::Paint::new("Price feed probe failed").red(), e);
                process::exit(1);
            }
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    // CLI parsing
    let cli = Cli::parse();

    if cli.no_color {
        yansi::whenever(yansi::Condition::NEVER);
    }

    config::load_env_file(cli.env_file.as_deref());

    // Dispatch CLI commands. If no command is provided, list the default region.
    match cli.command.unwrap_or(Commands::List(ListArgs::default())) {
        Commands::List(args) => cmd_list(args).await,
        Commands::Fetch { region, output } => cmd_fetch(region, output).await,
        Commands::Regions => cmd_regions(),
        Commands::Cache { sub } => match sub {
            CacheCommands::Status => cmd_cache_status(),
            CacheCommands::Clear { region } => cmd_cache_clear(region),
        },
        Commands::CheckConfig { ping } => cmd_check_config(ping).await,
    }
}
