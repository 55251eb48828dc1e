//! voiceops-gateway - voice-command operations gateway
//!
//! Usage:
//! - Serve skill requests: `voiceops-gateway listen --address :33011 --config alexaops.conf`
//! - Write a sample config: `voiceops-gateway dump-sample-config --config alexaops.conf`

use voiceops_gateway::config::env::constants::VERSION;
use voiceops_gateway::config::env::normalize_address;
use voiceops_gateway::RuntimeConfig;

enum Command {
    Listen(RuntimeConfig),
    DumpSampleConfig { config_path: Option<String> },
    Help,
    Version,
}

/// Parse command line arguments
fn parse_args(args: &[String]) -> Result<Command, String> {
    let Some(command) = args.get(1) else {
        return Ok(Command::Help);
    };

    let mut runtime = RuntimeConfig::default();
    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--address" | "-a" if i + 1 < args.len() => {
                runtime.listen_address = Some(normalize_address(&args[i + 1]));
                i += 2;
            }
            "--config" | "-c" if i + 1 < args.len() => {
                runtime.config_path = Some(args[i + 1].clone());
                i += 2;
            }
            "--help" | "-h" => return Ok(Command::Help),
            other => return Err(format!("Unknown argument: {}", other)),
        }
    }

    match command.as_str() {
        "listen" => Ok(Command::Listen(runtime)),
        "dump-sample-config" => Ok(Command::DumpSampleConfig {
            config_path: runtime.config_path,
        }),
        "--help" | "-h" | "help" => Ok(Command::Help),
        "--version" | "-V" => Ok(Command::Version),
        other => Err(format!("Unknown command: {}", other)),
    }
}

fn print_help() {
    println!("voiceops-gateway {} - endpoint for voice-assistant DevOps skills", VERSION);
    println!();
    println!("USAGE:");
    println!("    voiceops-gateway <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    listen                Listen for skill requests");
    println!("    dump-sample-config    Write a sample configuration file");
    println!();
    println!("OPTIONS:");
    println!("    -a, --address <ADDR>  Address/port to listen on (env: VOICEOPS_LISTEN_ADDRESS)");
    println!("    -c, --config <PATH>   Config file path (env: VOICEOPS_CONFIG)");
    println!("    -h, --help            Print help information");
    println!("    -V, --version         Print version");
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let command = match parse_args(&args) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!();
            print_help();
            std::process::exit(2);
        }
    };

    voiceops_gateway::init_tracing();

    match command {
        Command::Help => print_help(),
        Command::Version => println!("{}", VERSION),
        Command::DumpSampleConfig { config_path } => {
            match voiceops_gateway::dump_sample_config(config_path.as_deref()) {
                Ok(path) => println!("Sample config written to {}", path),
                Err(e) => {
                    eprintln!("{:#}", e);
                    std::process::exit(1);
                }
            }
        }
        Command::Listen(runtime) => {
            let rt = match tokio::runtime::Runtime::new() {
                Ok(rt) => rt,
                Err(e) => {
                    eprintln!("Failed to create runtime: {}", e);
                    std::process::exit(1);
                }
            };

            if let Err(e) = rt.block_on(voiceops_gateway::init_and_run_with_config(runtime)) {
                eprintln!("{:#}", e);
                std::process::exit(1);
            }
        }
    }
}
