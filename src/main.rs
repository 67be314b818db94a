mod cli;

use marquee::{
    config,
    lists::{Movie, MovieList},
    radarr::RadarrClient,
    server,
};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "marquee=trace,tower_http=debug".to_string()
        } else {
            "marquee=debug,tower_http=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .init();

    match cli.command {
        Commands::Serve { host, port } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(serve(host, port, cli.config.as_deref()))
        }
        Commands::Fetch { output, name } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(fetch(&output, &name, cli.config.as_deref()))
        }
        Commands::Filter {
            input,
            output,
            keywords,
        } => filter(&input, &output, &keywords),
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate(path.as_deref())
        }
        Commands::Version => {
            println!("marquee {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

async fn serve(host: String, port: u16, config_path: Option<&std::path::Path>) -> Result<()> {
    let mut config = config::load_config_or_default(config_path)?;

    // Override host/port from CLI if specified
    config.server.host = host;
    config.server.port = port;
    config::validate_config(&config)?;

    tracing::info!("Starting Marquee server");

    let host = config.server.host.clone();
    let port = config.server.port;
    let ctx = server::build_context(config)?;
    server::start_server(ctx, &host, port).await
}

async fn fetch(
    output: &std::path::Path,
    name: &str,
    config_path: Option<&std::path::Path>,
) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let radarr = RadarrClient::new(&config.radarr);

    tracing::info!("Fetching movie catalog from {}", config.radarr.url);
    let catalog = radarr.fetch_catalog().await?;

    let movies: Vec<Movie> = catalog
        .iter()
        .filter(|m| m.has_file)
        .map(Movie::from_radarr)
        .collect();
    let total = catalog.len();

    let list = MovieList::new(name, movies);
    write_list(&list, output)?;

    println!(
        "Wrote {} downloaded movies (of {} in Radarr) to {}",
        list.movies.len(),
        total,
        output.display()
    );
    Ok(())
}

fn filter(
    input: &std::path::Path,
    output: &std::path::Path,
    keywords: &[String],
) -> Result<()> {
    let content = std::fs::read_to_string(input)
        .with_context(|| format!("reading list file {}", input.display()))?;
    let mut list: MovieList =
        serde_json::from_str(&content).with_context(|| format!("parsing {}", input.display()))?;

    let keywords: Vec<String> = keywords.iter().map(|k| k.to_lowercase()).collect();
    let before = list.movies.len();
    list.movies.retain(|movie| {
        let title = movie.title.to_lowercase();
        keywords.iter().any(|k| title.contains(k))
    });
    list.updated_at = chrono::Utc::now();

    write_list(&list, output)?;

    println!(
        "Kept {} of {} movies, wrote {}",
        list.movies.len(),
        before,
        output.display()
    );
    Ok(())
}

fn write_list(list: &MovieList, path: &std::path::Path) -> Result<()> {
    let json = serde_json::to_string_pretty(list)?;
    std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

fn validate(path: Option<&std::path::Path>) -> Result<()> {
    let config = match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            config::load_config(p)?
        }
        None => {
            println!("No config file specified, using defaults");
            config::Config::default()
        }
    };

    config::validate_config(&config)?;
    println!("✓ Configuration is valid");
    println!("  Server: {}:{}", config.server.host, config.server.port);
    println!("  Radarr: {}", config.radarr.url);
    println!("  TVDB: {}", config.tvdb.base_url);
    println!("  Cache dir: {}", config.cache.dir.display());
    println!("  Poster TTL: {}h", config.cache.poster_ttl_hours);
    println!("  Lists dir: {}", config.lists.dir.display());

    Ok(())
}
