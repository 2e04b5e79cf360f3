use hue::bridge::client::Hue;
use hue::bridge::config::HueConfig;
use hue::bridge::discovery;
use hue::bridge::hyper_transport::HyperTransport;
use hue::bridge::response::{GroupActionResponse, StateChangeResponse};
use hue::color::{ColorEngine, Gamut, XyPoint};
use hue::error::{BridgeError, DynResult};
use hue_tools as hue;
#[allow(unused_imports)]
use log::{debug, error, info};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

extern crate clap;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
/// Control Philips Hue lamps
struct CmdArgs {
    /// Read bridge settings from this JSON file
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,
    /// Bridge address
    #[arg(long)]
    ip: Option<String>,
    /// API key
    #[arg(short = 'k', long)]
    key: Option<String>,
    /// Request timeout in milliseconds
    #[arg(long)]
    timeout: Option<u64>,
    /// Color transition time in milliseconds
    #[arg(long)]
    transition: Option<u32>,
    /// Gamut of the lamps (A, B or C)
    #[arg(short = 'g', long, default_value = "B")]
    gamut: Gamut,
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Turn lamp on, all lamps if none given
    On { lamp: Option<u32> },
    /// Turn lamp off, all lamps if none given
    Off { lamp: Option<u32> },
    /// Set color from hex string or CSS name, random if none given
    Color {
        color: Option<String>,
        #[arg(short = 'l', long)]
        lamp: Option<u32>,
    },
    /// Set color temperature in Kelvin
    Temp { lamp: u32, kelvin: f64 },
    /// Set brightness 0 - 254
    Bri {
        brightness: u8,
        #[arg(short = 'l', long, conflicts_with = "group")]
        lamp: Option<u32>,
        #[arg(long)]
        group: Option<u32>,
    },
    /// Decrease brightness
    Dim {
        #[arg(short = 'l', long)]
        lamp: Option<u32>,
        #[arg(long, allow_negative_numbers = true)]
        step: Option<i32>,
    },
    /// Increase brightness
    Brighten {
        #[arg(short = 'l', long)]
        lamp: Option<u32>,
        #[arg(long, allow_negative_numbers = true)]
        step: Option<i32>,
    },
    /// Flash lamp, all lamps if none given
    Flash {
        lamp: Option<u32>,
        /// Flash for 15 seconds
        #[arg(long)]
        long: bool,
    },
    /// Start color loop
    Loop { lamp: u32 },
    /// Stop effects
    Stop { lamp: u32 },
    /// Print lamp state
    State { lamp: u32 },
    /// List all lamps
    Lamps {
        /// Only reachable lamps
        #[arg(long)]
        reachable: bool,
    },
    /// List bridges from a plain HTTP discovery service
    Discover { endpoint: String },
    /// Color conversions, no bridge needed
    #[command(subcommand)]
    Convert(ConvertCmd),
}

#[derive(Subcommand, Debug)]
enum ConvertCmd {
    /// Hex string or CSS name to xy
    Color { color: String },
    /// xy to hex string
    Xy {
        x: f64,
        y: f64,
        /// Brightness 0.0 - 1.0
        #[arg(short = 'b', long, default_value_t = 1.0)]
        bri: f64,
    },
    /// Kelvin to mired and xy
    Kelvin { kelvin: f64 },
    /// Mired to Kelvin
    Mired { mired: f64 },
}

fn report_state(res: Result<StateChangeResponse, BridgeError>) -> ExitCode {
    match res {
        Ok(resp) => {
            for change in &resp.changed_states {
                println!("{} = {}", change.attribute, change.value);
            }
            for e in &resp.errors {
                eprintln!("{}", e);
            }
            if resp.errors.is_empty() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            error!("Request failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn report_group(res: Result<GroupActionResponse, BridgeError>) -> ExitCode {
    match res {
        Ok(resp) => {
            for action in &resp.acknowledged_actions {
                println!("{} = {}", action.address, action.value);
            }
            for e in &resp.errors {
                eprintln!("{}", e);
            }
            if resp.errors.is_empty() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            error!("Request failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn convert(colors: &ColorEngine, cmd: &ConvertCmd) -> ExitCode {
    match cmd {
        ConvertCmd::Color { color } => match colors.resolve_str(Some(color.as_str())) {
            Ok(xy) => println!("{}", xy),
            Err(e) => {
                error!("{}", e);
                return ExitCode::FAILURE;
            }
        },
        ConvertCmd::Xy { x, y, bri } => {
            if !(0.0..=1.0).contains(bri) {
                error!("Brightness out of range");
                return ExitCode::FAILURE;
            }
            println!("#{}", colors.xy_to_hex(&XyPoint::new(*x, *y), *bri));
        }
        ConvertCmd::Kelvin { kelvin } => {
            println!("{} mired", colors.kelvin_to_mired(*kelvin));
            if *kelvin >= 1.0 && *kelvin <= u32::MAX as f64 {
                println!("{}", colors.kelvin_to_xy(*kelvin as u32));
            }
        }
        ConvertCmd::Mired { mired } => {
            println!("{} K", colors.mired_to_kelvin(*mired));
        }
    }
    ExitCode::SUCCESS
}

fn load_config(args: &CmdArgs) -> DynResult<HueConfig> {
    let mut config = match &args.config {
        Some(path) => HueConfig::from_file(path)?,
        None => HueConfig::default(),
    };
    if let Some(ip) = &args.ip {
        config.ip = ip.clone();
    }
    if let Some(key) = &args.key {
        config.key = key.clone();
    }
    if let Some(timeout) = args.timeout {
        config.timeout = timeout;
    }
    if let Some(transition) = args.transition {
        config.transition_time = transition;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt::init();
    let args = CmdArgs::parse();
    let colors = ColorEngine::new().with_gamut(args.gamut);

    if let Cmd::Convert(cmd) = &args.cmd {
        return convert(&colors, cmd);
    }

    if let Cmd::Discover { endpoint } = &args.cmd {
        let transport = HyperTransport::new(Duration::from_millis(args.timeout.unwrap_or(2000)));
        return match discovery::search_at(&transport, endpoint).await {
            Ok(bridges) => {
                for bridge in bridges {
                    println!(
                        "{}: {}",
                        bridge.id.as_deref().unwrap_or("?"),
                        bridge.internal_ip_address.as_deref().unwrap_or("?")
                    );
                }
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!("Discovery failed: {}", e);
                ExitCode::FAILURE
            }
        };
    }

    let config = match load_config(&args) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };
    debug!("Bridge at {} using key {}", config.ip, config.key);
    let transport = HyperTransport::new(config.timeout_duration());
    let hue = Hue::new(config, Box::new(transport)).with_colors(colors);

    match args.cmd {
        Cmd::On { lamp: Some(lamp) } => report_state(hue.turn_on(lamp).await),
        Cmd::On { lamp: None } => report_group(hue.turn_on_all().await),
        Cmd::Off { lamp: Some(lamp) } => report_state(hue.turn_off(lamp).await),
        Cmd::Off { lamp: None } => report_group(hue.turn_off_all().await),
        Cmd::Color { color, lamp } => {
            let input = hue.colors().classify(color.as_deref());
            match lamp {
                Some(lamp) => report_state(hue.set_color(lamp, &input).await),
                None => report_group(hue.set_all_colors(&input).await),
            }
        }
        Cmd::Temp { lamp, kelvin } => report_state(hue.set_color_temperature(lamp, kelvin).await),
        Cmd::Bri {
            brightness,
            lamp,
            group,
        } => match (lamp, group) {
            (Some(lamp), _) => report_state(hue.set_brightness(lamp, brightness).await),
            (None, Some(group)) => {
                report_group(hue.set_group_brightness(group, brightness).await)
            }
            (None, None) => report_group(hue.set_all_brightness(brightness).await),
        },
        Cmd::Dim { lamp: Some(lamp), step } => report_state(hue.dim(lamp, step).await),
        Cmd::Dim { lamp: None, step } => report_group(hue.dim_all(step).await),
        Cmd::Brighten {
            lamp: Some(lamp),
            step,
        } => report_state(hue.brighten(lamp, step).await),
        Cmd::Brighten { lamp: None, step } => report_group(hue.brighten_all(step).await),
        Cmd::Flash {
            lamp: Some(lamp),
            long,
        } => {
            if long {
                report_state(hue.long_flash(lamp).await)
            } else {
                report_state(hue.flash(lamp).await)
            }
        }
        Cmd::Flash { lamp: None, long } => {
            if long {
                report_group(hue.long_flash_all().await)
            } else {
                report_group(hue.flash_all().await)
            }
        }
        Cmd::Loop { lamp } => report_state(hue.start_color_loop(lamp).await),
        Cmd::Stop { lamp } => report_state(hue.stop_effect(lamp).await),
        Cmd::State { lamp } => match hue.get_lamp_state(lamp).await {
            Ok(state) => {
                println!("{:#?}", state);
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!("Failed to get state of lamp {}: {}", lamp, e);
                ExitCode::FAILURE
            }
        },
        Cmd::Lamps { reachable } => match hue.get_lamps().await {
            Ok(lamps) => {
                for lamp in lamps
                    .iter()
                    .filter(|l| !reachable || l.state.reachable == Some(true))
                {
                    println!(
                        "{:3}: {} ({}, {})",
                        lamp.lamp_index, lamp.name, lamp.lamp_type, lamp.modelid
                    );
                }
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!("Failed to list lamps: {}", e);
                ExitCode::FAILURE
            }
        },
        Cmd::Convert(_) | Cmd::Discover { .. } => ExitCode::SUCCESS,
    }
}
