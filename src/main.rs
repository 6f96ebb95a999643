use std::process::exit;

use clap::Parser;
use log::info;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use transit_roster::config::PlanConfig;
use transit_roster::demand::RouteGenerator;
use transit_roster::error::ConfigurationError;
use transit_roster::ga::{GaConfig, GeneticOptimizer, RosterProblem};
use transit_roster::models::WeeklySchedule;
use transit_roster::report;
use transit_roster::roster::{CoverageStats, Roster, ShiftAssigner};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Build a weekly bus operating schedule from a fleet size"
)]
struct Cli {
    /// Total vehicles in the fleet.
    #[arg(allow_negative_numbers = true)]
    buses: i64,

    /// Search the driver-type mix with the genetic optimizer instead of
    /// the trial-based greedy pass.
    #[arg(long)]
    optimize: bool,

    /// RNG seed for reproducible optimizer runs.
    #[arg(long)]
    seed: Option<u64>,

    /// Optimizer population size.
    #[arg(long, default_value_t = 50)]
    population: usize,

    /// Optimizer generation count.
    #[arg(long, default_value_t = 25)]
    generations: usize,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        eprintln!("error: {err}");
        exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), ConfigurationError> {
    if cli.buses <= 0 {
        return Err(ConfigurationError::NonPositiveFleet(cli.buses));
    }
    let config = PlanConfig::new(cli.buses as usize);
    let week = RouteGenerator::new(&config)?.generate();

    let roster = if cli.optimize {
        optimize(cli, config, week)
    } else {
        ShiftAssigner::new(&config).assign(week)
    };

    print_table(&roster.schedule);
    let stats = CoverageStats::calculate(&roster);
    println!(
        "coverage: {}/{} routes ({:.0}%), {} drivers ({} A / {} B)",
        stats.closed_routes,
        stats.total_routes,
        stats.coverage_rate * 100.0,
        stats.driver_count,
        stats.type_a_drivers,
        stats.type_b_drivers,
    );
    Ok(())
}

fn optimize(cli: &Cli, config: PlanConfig, week: WeeklySchedule) -> Roster {
    let problem = RosterProblem::with_base(config, week);
    let ga = GaConfig::default()
        .with_population_size(cli.population)
        .with_generations(cli.generations);
    let mut rng = match cli.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    };
    let outcome = GeneticOptimizer::new(ga).run(&problem, &mut rng);
    info!(
        "best fitness {:.1} from a {}-gene script",
        outcome.best_fitness,
        outcome.best.len()
    );
    problem.decode(&outcome.best)
}

fn print_table(schedule: &WeeklySchedule) {
    for (day, rows) in report::week_rows(schedule) {
        println!("=== {} ===", day.name().to_uppercase());
        println!("{:<8} {:<7} {:<7} vehicle", "driver", "start", "end");
        for row in rows {
            let driver = row
                .driver
                .map_or_else(|| "-".to_string(), |d| d.to_string());
            let vehicle = row
                .vehicle
                .map_or_else(|| "-".to_string(), |v| v.to_string());
            println!(
                "{:<8} {:<7} {:<7} {}",
                driver,
                report::clock(row.start_s),
                report::clock(row.end_s),
                vehicle,
            );
        }
        println!();
    }
}
