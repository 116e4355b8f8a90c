//! solar-size entry point: CLI wiring, logging setup and report output.

use std::path::Path;
use std::process;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use solar_size::catalog::SpecialtyFilter;
use solar_size::catalog::vendors::find_vendors;
use solar_size::config::SiteConfig;
use solar_size::estimate::Estimator;
use solar_size::io::export::{export_panels_csv, export_scenarios_csv};
use solar_size::report::{EstimateReport, OptimizationView, VendorList};

/// Filter used when neither `--log-level` nor `RUST_LOG` is set.
const DEFAULT_LOG_FILTER: &str = "warn";

/// Parsed CLI arguments.
struct CliArgs {
    site_path: Option<String>,
    preset: Option<String>,
    location: Option<String>,
    autonomy_days: Option<u32>,
    max_budget: Option<f64>,
    vendors_city: Option<String>,
    specialty: SpecialtyFilter,
    export_panels: Option<String>,
    export_scenarios: Option<String>,
    log_level: Option<String>,
    #[cfg(feature = "tui")]
    tui: bool,
    #[cfg(feature = "api")]
    serve: bool,
    #[cfg(feature = "api")]
    port: u16,
}

fn print_help() {
    eprintln!("solar-size: residential solar sizing for Nigerian households");
    eprintln!();
    eprintln!("Usage: solar-size [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --site <path>              Load site and appliances from a TOML file");
    eprintln!("  --preset <name>            Use a built-in site (apartment, family_home, small_office)");
    eprintln!("  --location <city>          Override the site location");
    eprintln!("  --autonomy <days>          Override battery backup days (>= 1)");
    eprintln!("  --budget <naira>           Override the optimizer budget");
    eprintln!("  --vendors <city>           List solar vendors in a city");
    eprintln!("  --specialty <name>         Filter vendors by specialty (default: all)");
    eprintln!("  --export-panels <path>     Write panel recommendations to CSV");
    eprintln!("  --export-scenarios <path>  Write optimizer scenarios to CSV");
    eprintln!("  --log-level <filter>       Log filter, e.g. debug or solar_size=trace");
    #[cfg(feature = "tui")]
    eprintln!("  --tui                      Open the interactive appliance editor");
    #[cfg(feature = "api")]
    {
        eprintln!("  --serve                    Start REST API server after the report");
        eprintln!("  --port <u16>               API server port (default: 3000)");
    }
    eprintln!("  --help                     Show this help message");
    eprintln!();
    eprintln!("If no --site or --preset is given, the apartment preset is used.");
}

/// Returns the value following a flag, or exits with an error.
fn flag_value(args: &[String], i: usize, flag: &str, what: &str) -> String {
    match args.get(i) {
        Some(v) => v.clone(),
        None => {
            eprintln!("error: {flag} requires {what}");
            process::exit(1);
        }
    }
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        site_path: None,
        preset: None,
        location: None,
        autonomy_days: None,
        max_budget: None,
        vendors_city: None,
        specialty: SpecialtyFilter::All,
        export_panels: None,
        export_scenarios: None,
        log_level: None,
        #[cfg(feature = "tui")]
        tui: false,
        #[cfg(feature = "api")]
        serve: false,
        #[cfg(feature = "api")]
        port: 3000,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--site" => {
                i += 1;
                cli.site_path = Some(flag_value(&args, i, "--site", "a path argument"));
            }
            "--preset" => {
                i += 1;
                cli.preset = Some(flag_value(&args, i, "--preset", "a name argument"));
            }
            "--location" => {
                i += 1;
                cli.location = Some(flag_value(&args, i, "--location", "a city argument"));
            }
            "--autonomy" => {
                i += 1;
                let v = flag_value(&args, i, "--autonomy", "a day count");
                if let Ok(days) = v.parse::<u32>() {
                    cli.autonomy_days = Some(days);
                } else {
                    eprintln!("error: --autonomy value \"{v}\" is not a valid day count");
                    process::exit(1);
                }
            }
            "--budget" => {
                i += 1;
                let v = flag_value(&args, i, "--budget", "an amount in naira");
                if let Ok(budget) = v.parse::<f64>() {
                    cli.max_budget = Some(budget);
                } else {
                    eprintln!("error: --budget value \"{v}\" is not a number");
                    process::exit(1);
                }
            }
            "--vendors" => {
                i += 1;
                cli.vendors_city = Some(flag_value(&args, i, "--vendors", "a city argument"));
            }
            "--specialty" => {
                i += 1;
                let v = flag_value(&args, i, "--specialty", "a specialty name");
                match v.parse::<SpecialtyFilter>() {
                    Ok(filter) => cli.specialty = filter,
                    Err(e) => {
                        eprintln!("error: {e}");
                        process::exit(1);
                    }
                }
            }
            "--export-panels" => {
                i += 1;
                cli.export_panels = Some(flag_value(&args, i, "--export-panels", "a path argument"));
            }
            "--export-scenarios" => {
                i += 1;
                cli.export_scenarios =
                    Some(flag_value(&args, i, "--export-scenarios", "a path argument"));
            }
            "--log-level" => {
                i += 1;
                cli.log_level = Some(flag_value(&args, i, "--log-level", "a filter argument"));
            }
            #[cfg(feature = "tui")]
            "--tui" => {
                cli.tui = true;
            }
            #[cfg(feature = "api")]
            "--serve" => {
                cli.serve = true;
            }
            #[cfg(feature = "api")]
            "--port" => {
                i += 1;
                let v = flag_value(&args, i, "--port", "a u16 argument");
                if let Ok(p) = v.parse::<u16>() {
                    cli.port = p;
                } else {
                    eprintln!("error: --port value \"{v}\" is not a valid u16");
                    process::exit(1);
                }
            }
            other => {
                eprintln!("error: unknown argument \"{other}\"");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    cli
}

/// Installs the stderr log subscriber.
///
/// `--log-level` wins over `RUST_LOG`; the editor stays silent by default
/// so log lines do not tear the alternate screen.
fn init_tracing(level: Option<&str>, quiet_default: bool) {
    let fallback = if quiet_default { "off" } else { DEFAULT_LOG_FILTER };
    let filter = match level {
        Some(l) => EnvFilter::try_new(l).unwrap_or_else(|e| {
            eprintln!("error: invalid --log-level \"{l}\": {e}");
            process::exit(1);
        }),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_config(cli: &CliArgs) -> SiteConfig {
    // --site takes priority, then --preset, then the apartment default
    let loaded = if let Some(ref path) = cli.site_path {
        SiteConfig::from_toml_file(Path::new(path))
    } else if let Some(ref name) = cli.preset {
        SiteConfig::from_preset(name)
    } else {
        Ok(SiteConfig::apartment())
    };
    let mut cfg = loaded.unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(1);
    });

    if let Some(ref location) = cli.location {
        cfg.site.location = location.clone();
    }
    if let Some(days) = cli.autonomy_days {
        cfg.site.autonomy_days = days;
    }
    if let Some(budget) = cli.max_budget {
        cfg.site.max_budget = budget;
    }

    let errors = cfg.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }
    cfg
}

fn main() {
    let cli = parse_args();

    #[cfg(feature = "tui")]
    let quiet = cli.tui;
    #[cfg(not(feature = "tui"))]
    let quiet = false;
    init_tracing(cli.log_level.as_deref(), quiet);

    let cfg = load_config(&cli);

    #[cfg(feature = "tui")]
    if cli.tui {
        if let Err(e) = solar_size::tui::run(&cfg) {
            eprintln!("error: TUI crashed: {e}");
            process::exit(1);
        }
        return;
    }

    let set = cfg.working_set().unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(1);
    });
    let estimator = Estimator::from_config(&cfg);

    let estimate = estimator.estimate(&set).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        process::exit(1);
    });
    let report = estimator.optimize(&set).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        process::exit(1);
    });

    println!("{}", EstimateReport(&estimate));
    println!("\n{}", OptimizationView(&report));

    if let Some(ref city) = cli.vendors_city {
        let vendors = find_vendors(city, cli.specialty);
        println!("\n{}", VendorList { city, vendors: &vendors });
    }

    if let Some(ref path) = cli.export_panels {
        if let Err(e) = export_panels_csv(&estimate.panels, Path::new(path)) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        eprintln!("Panel recommendations written to {path}");
    }

    if let Some(ref path) = cli.export_scenarios {
        if let Err(e) = export_scenarios_csv(&report.outcomes, Path::new(path)) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        eprintln!("Scenarios written to {path}");
    }

    // Start API server if requested
    #[cfg(feature = "api")]
    if cli.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        let state = Arc::new(solar_size::api::AppState { defaults: cfg });
        let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
        let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
            eprintln!("error: failed to create tokio runtime: {e}");
            process::exit(1);
        });
        if let Err(e) = rt.block_on(solar_size::api::serve(state, addr)) {
            eprintln!("error: API server failed: {e}");
            process::exit(1);
        }
    }
}
