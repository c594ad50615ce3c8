//! mcp-explorer CLI: search and browse the MCP client/server directories.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};

use mcp_explorer::aggregate::{self, FrequencyTable};
use mcp_explorer::category::category_label;
use mcp_explorer::config::ExplorerConfig;
use mcp_explorer::error::ExplorerError;
use mcp_explorer::loader::load_catalog;
use mcp_explorer::paths::ExplorerPaths;
use mcp_explorer::query::FilterSpec;
use mcp_explorer::{CanonicalRecord, Catalog, Explorer, RecordId, RecordType};

#[derive(Parser)]
#[command(name = "mcp-explorer", version, about = "Search the MCP client and server directories")]
struct Cli {
    /// Config file (default: $XDG_CONFIG_HOME/mcp-explorer/config.toml if present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Client records: file path or http(s) URL.
    #[arg(long, global = true)]
    clients: Option<String>,

    /// Server records: file path or http(s) URL.
    #[arg(long, global = true)]
    servers: Option<String>,

    /// Records per page.
    #[arg(long, global = true)]
    page_size: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search records by text and filters, one page at a time.
    Search {
        /// Text matched against name, description, author and tags.
        query: Option<String>,

        /// Only clients or only servers.
        #[arg(long = "type")]
        record_type: Option<RecordType>,

        /// Category slug (see `categories`).
        #[arg(long)]
        category: Option<String>,

        /// GitHub primary language.
        #[arg(long)]
        language: Option<String>,

        /// 1-based page number.
        #[arg(long, default_value = "1")]
        page: usize,

        /// Print the result page as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show every field of one record.
    Show {
        /// Record id as printed by `search`.
        id: RecordId,

        /// Print the record as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Dashboard: totals plus category and language distributions.
    Stats,

    /// Most-starred records.
    Top {
        /// Number of records (default: `top_n` from config).
        #[arg(short, long)]
        n: Option<usize>,
    },

    /// All categories with record counts.
    Categories,

    /// All GitHub languages with record counts.
    Languages,

    /// Print the whole catalog as JSON.
    Export,

    /// Inspect or create the config file.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration as TOML.
    Show,
    /// Write the default configuration to the XDG config path.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = ExplorerConfig::discover(cli.config.as_deref())?;
    if let Some(clients) = cli.clients {
        config.clients = clients;
    }
    if let Some(servers) = cli.servers {
        config.servers = servers;
    }
    if let Some(page_size) = cli.page_size {
        config.page_size = page_size;
    }

    match cli.command {
        Commands::Search {
            query,
            record_type,
            category,
            language,
            page,
            json,
        } => {
            let catalog = open_catalog(&config)?;
            let spec = FilterSpec {
                query: query.unwrap_or_default(),
                record_type,
                category,
                language,
            };
            let mut explorer = Explorer::new(catalog, config.page_size, config.quiet_period());
            explorer.set_filter(spec);
            if !explorer.go_to_page(page) && page != 1 {
                tracing::warn!(page, total = explorer.total_pages(), "page out of range, showing page 1");
            }
            let result = explorer.current_page();

            if json {
                println!("{}", serde_json::to_string_pretty(&result).into_diagnostic()?);
            } else if result.total_count == 0 {
                println!("No records match.");
            } else {
                println!(
                    "Page {}/{} ({} matches):",
                    result.page_index, result.total_pages, result.total_count
                );
                for record in &result.items {
                    println!("  {}", summary_line(record));
                }
            }
        }

        Commands::Show { id, json } => {
            let catalog = open_catalog(&config)?;
            let record = catalog
                .get(id)
                .ok_or(ExplorerError::RecordNotFound { id })?;
            if json {
                println!("{}", serde_json::to_string_pretty(record).into_diagnostic()?);
            } else {
                print_detail(record);
            }
        }

        Commands::Stats => {
            let catalog = open_catalog(&config)?;
            let summary = aggregate::summarize(&catalog);
            println!("Records:      {}", summary.total);
            println!("  clients:    {}", summary.clients);
            println!("  servers:    {}", summary.servers);
            println!("  on GitHub:  {}", summary.with_github);
            println!("Total stars:  {}", summary.total_stars);
            println!("Languages:    {}", summary.languages);

            println!("\nTop categories:");
            for cat in aggregate::category_distribution(&catalog)
                .iter()
                .take(config.top_n)
            {
                println!("  {:<32} {:>6}", cat.label, cat.count);
            }

            println!("\nTop languages:");
            print_table(&aggregate::language_distribution(&catalog), Some(config.top_n));
        }

        Commands::Top { n } => {
            let catalog = open_catalog(&config)?;
            let n = n.unwrap_or(config.top_n);
            let top = aggregate::top_by_stars(&catalog, n);
            if top.is_empty() {
                println!("No starred records.");
            } else {
                for (rank, record) in top.iter().enumerate() {
                    println!(
                        "  {:>3}. {} ({} stars) [{}]",
                        rank + 1,
                        record.display_name,
                        record.stars(),
                        record.id
                    );
                }
            }
        }

        Commands::Categories => {
            let catalog = open_catalog(&config)?;
            let dist = aggregate::category_distribution(&catalog);
            if dist.is_empty() {
                println!("No categories.");
            }
            for cat in &dist {
                println!("  {:<32} {:<32} {:>6}", cat.slug, cat.label, cat.count);
            }
        }

        Commands::Languages => {
            let catalog = open_catalog(&config)?;
            let table = aggregate::language_distribution(&catalog);
            if table.is_empty() {
                println!("No languages.");
            }
            print_table(&table, None);
        }

        Commands::Export => {
            let catalog = open_catalog(&config)?;
            let json = serde_json::to_string_pretty(catalog.records()).into_diagnostic()?;
            println!("{json}");
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                print!("{}", config.to_toml()?);
            }
            ConfigAction::Init { force } => {
                let paths = ExplorerPaths::resolve()?;
                let path = paths.config_file();
                if path.exists() && !force {
                    miette::bail!(
                        "config file already exists: {} (pass --force to overwrite)",
                        path.display()
                    );
                }
                paths.ensure_dirs()?;
                ExplorerConfig::default().save(&path)?;
                println!("Wrote {}", path.display());
            }
        },
    }

    Ok(())
}

fn open_catalog(config: &ExplorerConfig) -> Result<Catalog> {
    Ok(load_catalog(&config.clients_source(), &config.servers_source())?)
}

fn summary_line(record: &CanonicalRecord) -> String {
    let mut line = format!("[{}] {} ({})", record.id, record.display_name, record.record_type);
    if let Some(github) = &record.github {
        line.push_str(&format!(" ★{}", github.stars()));
        if let Some(lang) = &github.language {
            line.push_str(&format!(" {lang}"));
        }
    }
    if let Some(desc) = record.description.as_deref().filter(|d| !d.is_empty()) {
        line.push_str(" - ");
        line.push_str(&truncate(desc, 80));
    }
    line
}

fn print_detail(record: &CanonicalRecord) {
    println!("{}", record.display_name);
    println!("  id:          {}", record.id);
    println!("  type:        {}", record.record_type);
    if let Some(name) = &record.name {
        println!("  name:        {name}");
    }
    if let Some(title) = &record.title {
        println!("  title:       {title}");
    }
    println!("  author:      {}", record.author_name);
    if let Some(category) = &record.category {
        println!("  category:    {} ({category})", category_label(category));
    }
    let tags = record.tag_list();
    if !tags.is_empty() {
        println!("  tags:        {}", tags.join(", "));
    }
    if let Some(url) = &record.url {
        println!("  url:         {url}");
    }
    if let Some(sse) = &record.sse_url {
        println!("  sse url:     {sse}");
    }
    if let Some(command) = &record.server_command {
        println!("  command:     {command}");
    }
    if let Some(desc) = &record.description {
        println!("  description: {desc}");
    }
    if let Some(github) = &record.github {
        println!("  github:      {}", github.full_name);
        println!("    stars:        {}", github.stars());
        println!("    forks:        {}", github.forks_count);
        println!("    open issues:  {}", github.open_issues_count);
        println!("    contributors: {}", github.contributors_count);
        if let Some(lang) = &github.language {
            println!("    language:     {lang}");
        }
        if let Some(license) = &github.license {
            println!("    license:      {license}");
        }
        if let Some(last) = &github.last_commit {
            println!("    last commit:  {last}");
        }
        if github.archived {
            println!("    archived");
        }
    }
}

fn print_table(table: &FrequencyTable, limit: Option<usize>) {
    let entries = match limit {
        Some(n) => table.top(n),
        None => table.sorted(),
    };
    for (label, count) in entries {
        println!("  {label:<32} {count:>6}");
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", cut.trim_end())
}
