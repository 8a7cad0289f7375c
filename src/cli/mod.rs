use crate::{
    config::{PlannerConfig, ServerConfig},
    render::render_text,
    server::run_serve,
    services::normalizer::normalize_response,
    Itinerary, Planner, TripRequest,
};
use anyhow::{anyhow, Context};
use clap::{value_parser, Arg, ArgMatches, Command};
use std::{io::Read, time::Duration};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn command() -> Command {
    let format_arg = Arg::new("format")
        .short('f')
        .long("format")
        .value_name("FORMAT")
        .help("Output format")
        .value_parser(["json", "text"])
        .default_value("json");

    Command::new("trip-planner")
        .version("0.1.0")
        .about("Generate travel itineraries with Gemini and normalize the answer")
        .subcommand_required(true)
        .arg(
            Arg::new("model")
                .short('m')
                .long("model")
                .value_name("MODEL")
                .global(true)
                .help("The Gemini model to use (or set GEMINI_MODEL)"),
        )
        .arg(
            Arg::new("api-key")
                .short('k')
                .long("api-key")
                .value_name("KEY")
                .global(true)
                .help("Gemini API key (or set GEMINI_API_KEY env var)"),
        )
        .arg(
            Arg::new("base-url")
                .short('u')
                .long("base-url")
                .value_name("URL")
                .global(true)
                .help("Gemini API base URL (or set GEMINI_BASE_URL)"),
        )
        .arg(
            Arg::new("timeout")
                .short('t')
                .long("timeout")
                .value_name("SECONDS")
                .global(true)
                .value_parser(value_parser!(u64))
                .help("Request timeout in seconds (or set GEMINI_TIMEOUT_SECS)"),
        )
        .subcommand(
            Command::new("serve")
                .about("Run the HTTP server")
                .arg(
                    Arg::new("host")
                        .long("host")
                        .value_name("HOST")
                        .help("Address to bind (or set HOST)"),
                )
                .arg(
                    Arg::new("port")
                        .short('p')
                        .long("port")
                        .value_name("PORT")
                        .value_parser(value_parser!(u16))
                        .help("Port to listen on (or set PORT)"),
                ),
        )
        .subcommand(
            Command::new("plan")
                .about("Generate one itinerary and print it")
                .arg(
                    Arg::new("destination")
                        .help("Where the trip goes")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("days")
                        .short('d')
                        .long("days")
                        .value_name("DAYS")
                        .required(true)
                        .value_parser(value_parser!(u32))
                        .help("Trip length in days"),
                )
                .arg(
                    Arg::new("budget")
                        .short('b')
                        .long("budget")
                        .value_name("BUDGET")
                        .help("Total budget, free text"),
                )
                .arg(
                    Arg::new("prefs")
                        .long("prefs")
                        .value_name("PREFS")
                        .help("Preference tag, or a JSON object of preferences"),
                )
                .arg(format_arg.clone()),
        )
        .subcommand(
            Command::new("normalize")
                .about("Normalize a saved model completion without calling the model")
                .arg(
                    Arg::new("file")
                        .help("File holding the completion text (reads stdin when omitted)")
                        .index(1),
                )
                .arg(
                    Arg::new("destination")
                        .long("destination")
                        .value_name("DESTINATION")
                        .default_value("Unknown destination")
                        .help("Destination used when the completion names none"),
                )
                .arg(format_arg),
        )
}

/// CLI entry point for the trip-planner tool
pub async fn run() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let matches = command().get_matches();

    match matches.subcommand() {
        Some(("serve", sub)) => serve(sub).await,
        Some(("plan", sub)) => plan(sub).await,
        Some(("normalize", sub)) => normalize(sub),
        _ => Err(anyhow!("unknown subcommand")),
    }
}

/// Environment settings with any CLI overrides applied
fn planner_config(matches: &ArgMatches) -> anyhow::Result<PlannerConfig> {
    let api_key = matches.get_one::<String>("api-key").cloned();
    let mut config = PlannerConfig::from_env_with_api_key(api_key).context(
        "Gemini API key is required. Set GEMINI_API_KEY environment variable or use --api-key",
    )?;

    if let Some(model) = matches.get_one::<String>("model") {
        config.model = model.clone();
    }
    if let Some(base_url) = matches.get_one::<String>("base-url") {
        config.base_url = base_url.clone();
    }
    if let Some(timeout) = matches.get_one::<u64>("timeout") {
        config.timeout = Duration::from_secs(*timeout);
    }
    Ok(config)
}

async fn serve(sub: &ArgMatches) -> anyhow::Result<()> {
    let config = planner_config(sub)?;
    let mut server_config = ServerConfig::from_env();
    if let Some(host) = sub.get_one::<String>("host") {
        server_config.host = host.clone();
    }
    if let Some(port) = sub.get_one::<u16>("port") {
        server_config.port = *port;
    }

    info!("Using model: {}", config.model);
    run_serve(&server_config, Planner::from_config(&config))
        .await
        .context("server stopped")
}

async fn plan(sub: &ArgMatches) -> anyhow::Result<()> {
    let config = planner_config(sub)?;

    let destination = sub
        .get_one::<String>("destination")
        .context("destination is required")?;
    let days = *sub.get_one::<u32>("days").context("days is required")?;

    let mut request = TripRequest::new(destination.clone(), days)?;
    if let Some(budget) = sub.get_one::<String>("budget") {
        request = request.with_budget(budget.clone());
    }
    if let Some(prefs) = sub.get_one::<String>("prefs") {
        request = match serde_json::from_str::<serde_json::Value>(prefs) {
            Ok(serde_json::Value::Object(record)) => request.with_prefs(record),
            _ => request.with_prefs(prefs.clone()),
        };
    }

    info!("Using model: {}", config.model);
    let response = Planner::from_config(&config).plan(&request).await?;
    print_itinerary(&response.into_itinerary(), sub)
}

fn normalize(sub: &ArgMatches) -> anyhow::Result<()> {
    let raw = match sub.get_one::<String>("file") {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read completion from {}", path))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read completion from stdin")?;
            buffer
        }
    };

    let destination = sub
        .get_one::<String>("destination")
        .context("destination is required")?;
    let response = normalize_response(&raw, destination);
    info!(structured = response.is_structured(), "normalized completion");
    print_itinerary(&response.into_itinerary(), sub)
}

fn print_itinerary(itinerary: &Itinerary, sub: &ArgMatches) -> anyhow::Result<()> {
    match sub.get_one::<String>("format").map(String::as_str) {
        Some("text") => print!("{}", render_text(itinerary)),
        _ => println!("{}", serde_json::to_string_pretty(itinerary)?),
    }
    Ok(())
}
