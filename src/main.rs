use clap::Parser;
use ingress_xds::{
    observability::{init_logging, log_config_info},
    xds::{new_http_connection_manager, new_route_config, BuiltResource},
    Config, Result, APP_NAME, VERSION,
};
use tracing::info;

#[derive(Parser)]
#[command(name = "ingress-xds")]
#[command(about = "Assemble the ingress connection manager and route table resources")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Name of the route table the connection manager binds to
    #[arg(long, default_value = "ingress-routes")]
    route_config_name: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load .env file if it exists (optional - won't fail if missing)
    if let Err(e) = dotenvy::dotenv() {
        if !e.to_string().contains("not found") {
            eprintln!("Warning: Error loading .env file: {}", e);
        }
    }

    let mut config = Config::from_env()?;
    if cli.verbose {
        config.observability = config.observability.verbose();
    }
    init_logging(&config.observability)?;

    info!(app_name = APP_NAME, version = VERSION, "Assembling ingress xDS resources");
    log_config_info(&config);

    let authz = config.external_authz()?;
    let hcm = new_http_connection_manager(&cli.route_config_name, &authz)?;
    let route_config = new_route_config(cli.route_config_name.as_str(), Vec::new());

    let resources = [
        BuiltResource::http_connection_manager(APP_NAME, &hcm)?,
        BuiltResource::route(&route_config)?,
    ];

    for resource in &resources {
        info!(
            name = %resource.name,
            type_url = %resource.type_url(),
            encoded_bytes = resource.encoded_len(),
            "Built resource"
        );
    }

    Ok(())
}
