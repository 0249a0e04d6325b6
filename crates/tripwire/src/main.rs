use std::error::Error;
use std::process;
use std::thread;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use tripwire_core::prelude::*;
use tripwire_core::{Dispatcher, NativeTrap, SystemProbe, TrapArch};
use tripwire_utils::{debug, init_logging, init_logging_with_level, LogFormat, LogLevel, LoggingError, LoggingGuard};

/// Inspect debugger attachment and exercise Tripwire's breakpoint diagnostics.
#[derive(Parser, Debug)]
#[command(name = "tripwire")]
#[command(version)]
#[command(about = "Inspect debugger attachment and exercise Tripwire's breakpoint diagnostics", long_about = None)]
struct Cli
{
    /// Log level (overrides RUST_LOG)
    #[arg(long, global = true)]
    log_level: Option<LogLevel>,

    /// Log format: pretty, compact or json (overrides TRIPWIRE_LOG_FORMAT)
    #[arg(long, global = true)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands
{
    /// Show architecture, trap sequence, diagnostics mode and attachment state
    Info,
    /// Report whether a debugger is attached
    Probe
    {
        /// Number of times to query
        #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        repeat: u32,
        /// Delay between queries in milliseconds
        #[arg(short, long, default_value_t = 1000)]
        interval_ms: u64,
        /// Fail if the OS cannot answer, instead of assuming no debugger
        #[arg(long, default_value_t = false)]
        strict: bool,
    },
    /// Break into the attached debugger, if any
    Trap,
    /// Run one diagnostic with a failing condition
    Fire
    {
        /// Which diagnostic to fail
        #[arg(value_enum)]
        scenario: Scenario,
    },
}

/// Failing diagnostics the `fire` command can run
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum Scenario
{
    /// Fatal assertion `verify!(1 == 2)`
    Verify,
    /// Recoverable `check!(x > 0)` with x = -1
    Check,
    /// Unreachable-code marker
    NotReached,
    /// Not-yet-validated marker
    NotTested,
    /// Early return with a fallback value
    Bail,
    /// Early return with a computed fallback
    BailWith,
    /// Jump out of a labeled block
    BailTo,
}

impl Scenario
{
    fn name(self) -> &'static str
    {
        match self {
            Scenario::Verify => "verify",
            Scenario::Check => "check",
            Scenario::NotReached => "not-reached",
            Scenario::NotTested => "not-tested",
            Scenario::Bail => "bail",
            Scenario::BailWith => "bail-with",
            Scenario::BailTo => "bail-to",
        }
    }
}

fn main()
{
    let cli = Cli::parse();

    // Initialize logging (flags win over RUST_LOG / TRIPWIRE_LOG_FORMAT)
    let _guard = match init(&cli) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn init(cli: &Cli) -> Result<LoggingGuard, LoggingError>
{
    match (cli.log_level, cli.log_format) {
        (None, None) => init_logging(),
        (level, format) => init_logging_with_level(level.unwrap_or(LogLevel::Warn), format.unwrap_or(LogFormat::Pretty)),
    }
}

fn run_command(cli: Cli) -> Result<(), Box<dyn Error>>
{
    match cli.command {
        Commands::Info => {
            print_info();
            Ok(())
        }
        Commands::Probe {
            repeat,
            interval_ms,
            strict,
        } => probe(repeat, Duration::from_millis(interval_ms), strict),
        Commands::Trap => {
            let outcome = Dispatcher::native().dispatch();
            println!("trap: {outcome}");
            Ok(())
        }
        Commands::Fire { scenario } => {
            fire(scenario);
            Ok(())
        }
    }
}

fn print_info()
{
    let arch = TrapArch::current();
    println!("Tripwire");
    println!("  architecture: {arch} ({})", std::env::consts::ARCH);
    println!("  os:           {}", std::env::consts::OS);
    println!("  trap:         {}", NativeTrap.sequence());
    println!("  diagnostics:  {}", DiagnosticsMode::current());
    match SystemProbe.query() {
        Ok(attached) => println!("  debugger:     {}", describe(attached)),
        Err(e) => println!("  debugger:     unknown ({e})"),
    }
}

fn probe(repeat: u32, interval: Duration, strict: bool) -> Result<(), Box<dyn Error>>
{
    for round in 0..repeat {
        if round > 0 {
            thread::sleep(interval);
        }

        // Queried fresh every round, so attaching mid-run shows up
        let attached = if strict {
            SystemProbe.query()?
        } else {
            is_debugger_attached()
        };
        debug!(round, attached, "probed debugger attachment");
        println!("{}", describe(attached));
    }
    Ok(())
}

fn describe(attached: bool) -> &'static str
{
    if attached {
        "attached"
    } else {
        "not attached"
    }
}

#[derive(Debug, PartialEq, Eq)]
enum ResourceError
{
    MissingHandle,
}

fn open_resource(handle: Option<u32>) -> Result<u32, ResourceError>
{
    bail_unless!(handle.is_some(), Err(ResourceError::MissingHandle));
    Ok(handle.unwrap_or_default())
}

fn parse_port(text: &str) -> Result<u16, String>
{
    bail_unless_with!(!text.is_empty(), || Err(String::from("no port given")), "text = {:?}", text);
    text.parse().map_err(|e| format!("{e}"))
}

fn resolve_host(configured: Option<&str>) -> &str
{
    'resolve: {
        bail_unless_to!(configured.is_some(), 'resolve, "localhost");
        configured.unwrap_or_default()
    }
}

#[allow(clippy::eq_op)]
fn fire(scenario: Scenario)
{
    println!("before {}", scenario.name());

    match scenario {
        Scenario::Verify => verify!(1 == 2),
        Scenario::Check => {
            let x = -1;
            check!(x > 0);
            println!("x = {x}");
        }
        Scenario::NotReached => not_reached!(),
        Scenario::NotTested => not_tested!(),
        Scenario::Bail => println!("returned {:?}", open_resource(None)),
        Scenario::BailWith => println!("returned {:?}", parse_port("")),
        Scenario::BailTo => println!("resolved {}", resolve_host(None)),
    }

    println!("after {}", scenario.name());
}
