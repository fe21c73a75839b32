//! BPJS Simulator CLI
//!
//! Command-line interface for simulating contributions and benefits

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};

use bpjs_simulator::{
    participant::{DEFAULT_ANNUAL_YIELD_PERCENT, DEFAULT_TENURE_MONTHS},
    ParticipantInputs, RateTable, ScenarioKind, ScenarioResult, SimulationOrchestrator, SimulationResult,
};

#[derive(Parser, Debug)]
#[command(name = "bpjs_simulator", version, about = "BPJS Ketenagakerjaan contribution and benefit simulator")]
struct Cli {
    /// Directory of rate CSV files; the built-in statutory table is used when omitted
    #[arg(long, global = true)]
    rates: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Simulate one participant
    Simulate {
        #[command(subcommand)]
        segment: SegmentCommand,
    },
    /// Print the active rate table as JSON
    Rates,
}

#[derive(Subcommand, Debug)]
enum SegmentCommand {
    /// Salaried employee (PU)
    Salaried {
        #[arg(long)]
        base_salary: i64,
        #[arg(long, default_value_t = 0)]
        fixed_allowance: i64,
        /// Work-accident risk class, 0 (very low) to 4 (very high)
        #[arg(long, default_value_t = 0)]
        risk_class: usize,
        /// Override the published pension wage cap
        #[arg(long)]
        pension_cap: Option<i64>,
        #[command(flatten)]
        common: CommonArgs,
    },
    /// Independent worker (BPU)
    Independent {
        #[arg(long)]
        income: i64,
        /// Opt in to old-age savings (JHT)
        #[arg(long)]
        old_age_savings: bool,
        #[command(flatten)]
        common: CommonArgs,
    },
    /// Construction contract (JAKON)
    Construction {
        #[arg(long)]
        contract_value: i64,
        /// Average worker wage used for benefit payouts
        #[arg(long)]
        average_wage: i64,
        #[command(flatten)]
        common: CommonArgs,
    },
    /// Migrant worker (PMI)
    Migrant {
        /// Protection package: 0 = 24 months, 1 = 12 months, 2 = 6 months
        #[arg(long, default_value_t = 0)]
        package: usize,
        #[arg(long, default_value_t = 0)]
        income: i64,
        #[arg(long)]
        old_age_savings: bool,
        #[command(flatten)]
        common: CommonArgs,
    },
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Contribution period in months
    #[arg(long, default_value_t = DEFAULT_TENURE_MONTHS)]
    tenure: i64,
    /// Projected annual yield in percent
    #[arg(long = "yield", default_value_t = DEFAULT_ANNUAL_YIELD_PERCENT)]
    annual_yield: f64,
    /// School-age dependents (0-2)
    #[arg(long, default_value_t = 0)]
    dependents: u32,
    /// Only report one scenario
    #[arg(long, value_enum)]
    scenario: Option<ScenarioArg>,
    /// Print JSON instead of a text summary
    #[arg(long)]
    json: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ScenarioArg {
    NaturalDeath,
    WorkDeath,
    Illness,
    JobLoss,
    Retirement,
    ContributionOnly,
}

impl From<ScenarioArg> for ScenarioKind {
    fn from(arg: ScenarioArg) -> Self {
        match arg {
            ScenarioArg::NaturalDeath => ScenarioKind::NaturalDeath,
            ScenarioArg::WorkDeath => ScenarioKind::WorkDeath,
            ScenarioArg::Illness => ScenarioKind::Illness,
            ScenarioArg::JobLoss => ScenarioKind::JobLoss,
            ScenarioArg::Retirement => ScenarioKind::Retirement,
            ScenarioArg::ContributionOnly => ScenarioKind::ContributionOnly,
        }
    }
}

impl SegmentCommand {
    fn into_inputs(self) -> (ParticipantInputs, CommonArgs) {
        let (inputs, common) = match self {
            SegmentCommand::Salaried { base_salary, fixed_allowance, risk_class, pension_cap, common } => {
                let inputs = ParticipantInputs::salaried(base_salary, fixed_allowance, risk_class);
                let inputs = match pension_cap {
                    Some(cap) => inputs.with_pension_cap_override(cap),
                    None => inputs,
                };
                (inputs, common)
            }
            SegmentCommand::Independent { income, old_age_savings, common } => {
                (ParticipantInputs::independent(income, old_age_savings), common)
            }
            SegmentCommand::Construction { contract_value, average_wage, common } => {
                (ParticipantInputs::construction(contract_value, average_wage), common)
            }
            SegmentCommand::Migrant { package, income, old_age_savings, common } => {
                (ParticipantInputs::migrant(package, income, old_age_savings), common)
            }
        };

        let inputs = inputs
            .with_tenure_months(common.tenure)
            .with_annual_yield_percent(common.annual_yield)
            .with_dependents(common.dependents);
        (inputs, common)
    }
}

fn load_rates(path: Option<&PathBuf>) -> Result<RateTable> {
    match path {
        Some(dir) => RateTable::from_csv_path(dir)
            .with_context(|| format!("loading rate table from {}", dir.display())),
        None => Ok(RateTable::statutory()),
    }
}

fn print_summary(result: &SimulationResult) {
    let monthly = &result.monthly;
    let scenarios = &result.scenarios;

    println!("Segment: {} ({})", result.inputs.segment(), result.inputs.segment().code());
    println!("  Tenure: {} months at {:.2}% yield", result.inputs.tenure_months, result.inputs.annual_yield_percent);
    println!();

    println!("Monthly contributions:");
    for item in &monthly.line_items {
        println!("  {:<16} {:>14}", format!("{:?}", item.component), item.amount);
    }
    println!("  {:<16} {:>14}", "Worker", monthly.worker_pay);
    if let Some(payer) = monthly.payer_pay {
        println!("  {:<16} {:>14}", "Payer", payer);
    }
    println!("  {:<16} {:>14}", "Total", monthly.total_monthly());
    if let Some(costs) = &monthly.migrant_costs {
        println!(
            "  Package: {} over {} months, {} extension months, accumulated {}",
            costs.package_price, costs.covered_months, costs.extension_months, costs.accumulated_total
        );
    }
    println!();

    println!("Scenarios:");
    println!("  {:<20} {:>16}", "Natural death", scenarios.natural_death.total);
    println!("  {:<20} {:>16}", "Work death", scenarios.work_death.total);
    println!(
        "  {:<20} {:>16}  ({} months full wage)",
        "Illness (monthly)", scenarios.illness.wage_replacement_monthly, scenarios.illness.full_wage_months
    );
    match scenarios.job_loss.ineligibility {
        None => println!("  {:<20} {:>16}", "Job loss", scenarios.job_loss.total),
        Some(reason) => println!("  {:<20} {:>16}  ({:?})", "Job loss", scenarios.job_loss.total, reason),
    }
    let retirement = &scenarios.retirement;
    println!(
        "  {:<20} {:>16}  ({:?}, pension {} monthly / {} lump sum)",
        "Retirement savings",
        retirement.old_age_savings.map_or(0, |b| b.future_value),
        retirement.note,
        retirement.pension_monthly,
        retirement.pension_lump_sum
    );
    println!("  {:<20} {:>16}", "Contributions paid", scenarios.contribution_only.accumulated_total);
}

fn print_scenario(scenario: &ScenarioResult) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(scenario)?);
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let rates = load_rates(cli.rates.as_ref())?;

    match cli.command {
        Commands::Rates => {
            println!("{}", serde_json::to_string_pretty(&rates)?);
        }
        Commands::Simulate { segment } => {
            let (inputs, common) = segment.into_inputs();
            inputs.check_indices(&rates)?;

            let orchestrator = SimulationOrchestrator::with_rates(rates);
            let result = orchestrator.run(&inputs);

            match (common.scenario, common.json) {
                (Some(kind), _) => print_scenario(&result.scenarios.select(kind.into()))?,
                (None, true) => println!("{}", serde_json::to_string_pretty(&result)?),
                (None, false) => print_summary(&result),
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_salaried() {
        let cli = Cli::try_parse_from([
            "bpjs_simulator", "simulate", "salaried", "--base-salary", "4000000", "--fixed-allowance", "1000000",
            "--risk-class", "2", "--tenure", "120", "--dependents", "1",
        ])
        .unwrap();

        let Commands::Simulate { segment } = cli.command else {
            panic!("expected simulate");
        };
        let (inputs, common) = segment.into_inputs();
        assert_eq!(inputs.benefit_base_wage(), 5_000_000);
        assert_eq!(inputs.tenure_months, 120);
        assert_eq!(inputs.dependents.count(), 1);
        assert!(!common.json);
    }

    #[test]
    fn test_parse_migrant_scenario() {
        let cli = Cli::try_parse_from([
            "bpjs_simulator", "--rates", "data/rates", "simulate", "migrant", "--package", "1",
            "--scenario", "contribution-only",
        ])
        .unwrap();
        assert_eq!(cli.rates, Some(PathBuf::from("data/rates")));

        let Commands::Simulate { segment } = cli.command else {
            panic!("expected simulate");
        };
        let (inputs, common) = segment.into_inputs();
        assert!(matches!(common.scenario, Some(ScenarioArg::ContributionOnly)));
        assert_eq!(inputs.tenure_months, DEFAULT_TENURE_MONTHS);
    }
}
