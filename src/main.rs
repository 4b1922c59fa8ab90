mod command;
mod config;
mod error;
mod grid;
mod heading;
mod logging;
mod render;
mod rover;
mod session;
mod telemetry;
mod types;

use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;

use crate::command::parse_script;
use crate::config::{DEFAULT_CONFIG_PATH, MissionConfig};
use crate::session::Mission;

fn print_usage(program: &str) {
    println!("Mars Rover Simulation");
    println!("Usage:");
    println!("  {program} [config]            (interactive session)");
    println!("  {program} run <commands> [config]");
    println!("  {program} demo");
    println!("  {program} --help");
    println!();
    println!("Commands are single letters:");
    println!("  M (move forward), L (turn left), R (turn right), Q (quit).");
    println!("A script such as MMRML runs without prompting; Q ends it early.");
    println!("Defaults:");
    println!("  config={DEFAULT_CONFIG_PATH} (built-in 10x10 grid when the file is missing)");
}

fn exit_with_usage(program: &str, message: &str) -> ! {
    eprintln!("{message}");
    print_usage(program);
    std::process::exit(2);
}

fn exit_with_error(err: anyhow::Error) -> ! {
    tracing::error!("{err:#}");
    eprintln!("error: {err:#}");
    std::process::exit(1);
}

fn load_mission(path: Option<String>) -> anyhow::Result<Mission> {
    let path = path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    let config = MissionConfig::load(&path)?;
    Ok(Mission::from_config(config)?)
}

fn main() {
    logging::init();

    let program = std::env::args()
        .next()
        .unwrap_or_else(|| "mars_rover".to_string());
    let mut args = std::env::args().skip(1);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let result = match args.next().as_deref() {
        Some("demo") => session::run_demo(&mut out),
        Some("run") => {
            let Some(script) = args.next() else {
                exit_with_usage(&program, "run: missing command script");
            };
            let commands = match parse_script(&script) {
                Ok(commands) => commands,
                Err(err) => exit_with_usage(&program, &format!("run: {err}")),
            };
            let config_path = args.next();
            if let Some(extra) = args.next() {
                exit_with_usage(&program, &format!("run: unexpected argument: {extra}"));
            }
            load_mission(config_path).and_then(|mission| mission.run_script(&commands, &mut out))
        }
        Some("--help") | Some("-h") | Some("help") => {
            print_usage(&program);
            return;
        }
        Some(other) if other.starts_with('-') => {
            exit_with_usage(&program, &format!("unknown option: {other}"));
        }
        config_path => {
            let config_path = config_path.map(str::to_string);
            if let Some(extra) = args.next() {
                exit_with_usage(&program, &format!("unexpected argument: {extra}"));
            }
            let stdin = io::stdin();
            let prompt = stdin.is_terminal();
            load_mission(config_path)
                .and_then(|mission| mission.run_interactive(stdin.lock(), &mut out, prompt))
        }
    };

    match result {
        Ok(_) => {
            let _ = out.flush();
        }
        Err(err) => exit_with_error(err),
    }
}
