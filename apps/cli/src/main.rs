use std::path::PathBuf;

use anyhow::Result;
use atecc_core::{AteccDevice, DeviceConfig, HalTransport, Message, TransportError};
use clap::{Args, Parser, Subcommand};
use linux_embedded_hal::I2cdev;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(author, version, about = "ATECC608 Secure Element Tool", long_about = None)]
struct Cli {
    /// I2C bus index (/dev/i2c-N)
    #[arg(long, global = true)]
    bus: Option<u8>,

    /// Device address (decimal or 0x-prefixed hex)
    #[arg(long, global = true, value_parser = parse_address)]
    address: Option<u8>,

    /// Path to a TOML device configuration
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Read device serial number and revision
    Info,
    /// Run all built-in self tests
    SelfTest,
    /// Compute SHA-256 on the device
    Sha256(Sha256Args),
    /// Put the device to sleep
    Sleep,
    /// Put the device in idle mode
    Idle,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct Sha256Args {
    /// Message as a hex string
    #[arg(long)]
    hex: Option<String>,

    /// Message as literal text
    #[arg(long)]
    text: Option<String>,
}

impl Sha256Args {
    fn into_message(self) -> Message {
        match self.hex {
            Some(hex) => Message::Hex(hex),
            None => Message::Text(self.text.unwrap_or_default()),
        }
    }
}

fn parse_address(s: &str) -> Result<u8, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|e| format!("invalid address '{}': {}", s, e))
}

fn load_config(cli: &Cli) -> Result<DeviceConfig> {
    let mut config = match &cli.config {
        Some(path) => DeviceConfig::load_from_file(path)?,
        None => DeviceConfig::default(),
    };
    if let Some(bus) = cli.bus {
        config.bus = bus;
    }
    if let Some(address) = cli.address {
        config.address = address;
    }
    Ok(config)
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;

    let path = format!("/dev/i2c-{}", config.bus);
    let i2c = I2cdev::new(&path).map_err(|e| TransportError::OpenFailed {
        bus: config.bus,
        message: e.to_string(),
    })?;
    info!(path = %path, address = %format!("0x{:02X}", config.address), "Opened I2C bus");

    let mut device = AteccDevice::new(HalTransport::new(i2c), config);

    match cli.command {
        Commands::Info => println!("{}", device.info()?),
        Commands::SelfTest => println!("{}", device.self_test()?),
        Commands::Sha256(args) => println!("{}", device.sha256(&args.into_message())?),
        Commands::Sleep => {
            device.sleep()?;
            info!("Device asleep");
        }
        Commands::Idle => {
            device.idle()?;
            info!("Device idle");
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(if cli.verbose {
                    tracing::Level::DEBUG.into()
                } else {
                    tracing::Level::INFO.into()
                })
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    if let Err(e) = run(cli) {
        error!("Error: {:#}", e);
        std::process::exit(1);
    }
}
