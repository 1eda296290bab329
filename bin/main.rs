use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;
use tracing_subscriber::{Layer as _, Registry};
use work_items_graphql::{DynamicQueryBuilder, WorkItemWidgets};
use work_items_runtime::logging::LoggingLayerBuilder;

/// Clap styling
const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Debug, Parser)]
#[command(
    version,
    styles = STYLES,
    about = "List work items with every widget the GraphQL backend supports",
)]
struct Args {
    /// Path to the config file. Configuration is read from the environment when omitted.
    #[arg(long, short = 'c', env = "WORK_ITEMS_CONFIG")]
    config: Option<PathBuf>,

    /// Group or project to list work items from, overriding `full_path` in the config
    #[arg(long)]
    full_path: Option<String>,

    /// Comma separated widget types to request, e.g. `LABELS,ASSIGNEES`
    #[arg(long, value_delimiter = ',', conflicts_with = "minimal")]
    widgets: Option<Vec<String>>,

    /// Request widget types only and skip schema introspection
    #[arg(long)]
    minimal: bool,

    /// Print the query document instead of executing it
    #[arg(long)]
    print_query: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => work_items_runtime::read_config(path)
            .with_context(|| format!("failed to read config from {}", path.display()))?,
        None => work_items_runtime::read_config_from_env()
            .context("failed to read config from the environment")?,
    };

    let (logging_layer, _guard) = LoggingLayerBuilder::new().build(&config.logging);
    Registry::default()
        .with(logging_layer.with_filter(config.logging.env_filter()?))
        .init();

    let widgets = WorkItemWidgets::new(config.client()?);
    let requested = args.widgets.as_deref().or(config.widgets.as_deref());

    let document = if args.minimal {
        DynamicQueryBuilder::build_minimal_query()
    } else {
        let builder = widgets.query_builder().await;
        let snapshot = builder.snapshot();
        tracing::info!(
            origin = ?snapshot.origin(),
            widgets = ?builder.resolve_widgets(requested),
            "Resolved widgets"
        );
        builder.build_full_query(requested)
    };

    if args.print_query {
        println!("{document}");
        return Ok(());
    }

    let full_path = args
        .full_path
        .or(config.full_path.clone())
        .context("a group or project path is required, pass --full-path or set full_path")?;
    let variables = config.variables(full_path);

    let data = if args.minimal {
        widgets.fetch_work_items_minimal(&variables).await?
    } else {
        widgets.fetch_work_items(&variables, requested).await?
    };

    tracing::info!(count = data.work_items().len(), "Fetched work items");
    println!("{}", serde_json::to_string_pretty(&data)?);

    Ok(())
}
