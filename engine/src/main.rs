// Engine command line entry point
use clap::{Parser, Subcommand};
use engine::config::EngineSettings;
use engine::services::HrEngine;
use engine::EngineError;
use shared::models::PayrollInputs;
use std::path::PathBuf;
use std::process;
use tracing::info;

/// Reads AFD punch-clock exports and estimates pay slips.
#[derive(Parser)]
#[command(name = "engine")]
struct Cli {
    /// JSON settings file (payroll tables, log level). Built-in defaults otherwise.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print JSON instead of the human-readable summary
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse an AFD file and group punches by employee and day
    Afd {
        /// AFD text file
        file: PathBuf,
    },
    /// Estimate gross pay, withholdings and net pay for one month
    Payroll {
        #[arg(long)]
        base_salary: f64,
        #[arg(long, default_value_t = 0.0)]
        overtime_hours: f64,
        #[arg(long, default_value_t = 0.0)]
        night_shift_hours: f64,
        #[arg(long, default_value_t = 0.0)]
        absence_hours: f64,
        #[arg(long, default_value_t = 0)]
        dependents: u32,
        #[arg(long, default_value_t = 0.0)]
        commissions: f64,
        #[arg(long, default_value_t = 0.0)]
        other_deductions: f64,
        /// Deduct the transport voucher share from the salary
        #[arg(long)]
        transport_voucher: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => EngineSettings::from_file(path),
        None => EngineSettings::load_default(),
    };
    let settings = match settings {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error loading settings: {e}");
            process::exit(e.exit_code());
        }
    };

    // Logs go to stderr so JSON on stdout stays clean
    let level = settings.log_level.parse::<tracing::Level>().unwrap_or(tracing::Level::INFO);
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    info!("Starting HR engine...");

    let engine = HrEngine::new(&settings);
    if let Err(e) = run(&engine, cli.command, cli.json) {
        eprintln!("Error: {e}");
        process::exit(e.exit_code());
    }
}

fn run(engine: &HrEngine, command: Command, json: bool) -> Result<(), EngineError> {
    match command {
        Command::Afd { file } => {
            let outcome = engine.import_afd_file(&file)?;
            if json {
                println!("{}", outcome.to_json()?);
            } else {
                println!("{}", outcome.message);
                for (key, times) in outcome.log.iter() {
                    println!("  {}  {}", key, times.join(" "));
                }
            }
            if !outcome.success {
                process::exit(1);
            }
        }
        Command::Payroll {
            base_salary,
            overtime_hours,
            night_shift_hours,
            absence_hours,
            dependents,
            commissions,
            other_deductions,
            transport_voucher,
        } => {
            let inputs = PayrollInputs {
                base_salary,
                overtime_hours,
                night_shift_hours,
                absence_hours,
                dependent_count: dependents,
                commissions,
                other_deductions,
                deducts_transport_voucher: transport_voucher,
            };
            let breakdown = engine.estimate_payroll(&inputs);
            if json {
                println!("{}", engine.payroll_report_json(&breakdown)?);
            } else {
                println!("{}", engine.render_payslip(&breakdown));
            }
        }
    }
    Ok(())
}
