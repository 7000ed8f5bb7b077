use clap::Parser;
use radius_proto::{Attribute, Packet, Value};
use radius_server::{Config, RadiusServer, ServerConfig};
use std::net::IpAddr;
use std::process;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// RADIUS packet inspector - decode and explain RFC 2865/2866/5176 packets
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(name = "radius-inspect")]
struct Cli {
    /// Hex-encoded packet to decode
    #[arg(value_name = "PACKET_HEX", required_unless_present_any = ["validate", "init"])]
    packet: Option<String>,

    /// Path to configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<String>,

    /// Shared secret, overriding the configured default
    #[arg(short, long)]
    secret: Option<String>,

    /// Source address the packet is attributed to (selects the client secret)
    #[arg(long, default_value = "127.0.0.1")]
    source: IpAddr,

    /// Honour the declared length: reject truncated packets, ignore padding
    #[arg(long)]
    strict: bool,

    /// Validate configuration and exit
    #[arg(long)]
    validate: bool,

    /// Write an example configuration to the --config path (default
    /// config.json) and exit
    #[arg(long)]
    init: bool,
}

fn main() {
    let cli = Cli::parse();

    if cli.init {
        let path = cli.config.as_deref().unwrap_or("config.json");
        if let Err(e) = Config::example().to_file(path) {
            eprintln!("Error creating example config: {}", e);
            process::exit(1);
        }
        println!("Wrote example configuration to {}", path);
        process::exit(0);
    }

    let mut config = match &cli.config {
        Some(path) => match Config::from_file(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("Configuration validation failed!");
                eprintln!("   Error: {}", e);
                process::exit(1);
            }
        },
        None => Config::default(),
    };

    if let Some(secret) = cli.secret {
        config.secret = secret;
    }
    if cli.strict {
        config.strict_length_check = true;
    }
    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {}", e);
        process::exit(1);
    }

    if cli.validate {
        println!("Configuration validated successfully!");
        println!();
        println!("Configuration summary:");
        println!("  Clients: {}", config.clients.len());
        println!("  Log level: {}", config.log_level());
        println!("  Strict length check: {}", config.strict_length_check);
        println!();

        if !config.clients.is_empty() {
            println!("Known clients:");
            for client in &config.clients {
                let status = if client.enabled { "+" } else { "-" };
                let name = client.name.as_deref().unwrap_or("(unnamed)");
                println!("  {} {} - {}", status, client.address, name);
            }
        } else {
            println!("No clients configured: every source uses the default secret");
        }

        process::exit(0);
    }

    // Initialize tracing with configured log level
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.log_level())),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let Some(packet_hex) = cli.packet else {
        error!("No packet given");
        process::exit(2);
    };

    let data = match hex::decode(packet_hex.trim()) {
        Ok(data) => data,
        Err(e) => {
            error!(error = %e, "Packet is not valid hex");
            process::exit(1);
        }
    };
    debug!(bytes = data.len(), strict = config.strict_length_check, "Decoding packet");

    let server = RadiusServer::new(ServerConfig::from_config(config));
    let packet = match server.parse_request(&data, cli.source) {
        Ok(packet) => packet,
        Err(e) => {
            error!(client_ip = %cli.source, error = %e, "Failed to decode packet");
            process::exit(1);
        }
    };

    println!("Code:          {} ({})", packet.code, packet.code.as_u8());
    println!("Identifier:    {}", packet.identifier);
    println!("Length:        {}", data.len());
    println!("Authenticator: {}", hex::encode(packet.authenticator));
    println!("Attributes:");
    for attr in &packet.attributes {
        let name = server.dictionary().name(attr.attr_type).unwrap_or("Unknown");
        println!(
            "  {} ({}) = {}",
            name,
            attr.attr_type,
            describe_value(&packet, attr)
        );
    }

    if let Some((user, password)) = packet.pap() {
        info!(username = %user, "PAP credentials present");
        println!("PAP:           user={} password={}", user, masked(password));
    }
}

/// Printable form of a single attribute value; octets are shown as hex
fn describe_value(packet: &Packet<'_>, attr: &Attribute) -> String {
    match &attr.value {
        Value::Bytes(bytes) => format!("0x{}", hex::encode(bytes)),
        _ => packet.render(attr),
    }
}

/// Stand-in for a revealed password
fn masked(password: &str) -> String {
    format!("<{} characters hidden>", password.chars().count())
}
