//! Simulate every participant in a CSV file
//!
//! Outputs one summary row per participant for spreadsheet review

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use bpjs_simulator::participant::load_participants;
use bpjs_simulator::{Rupiah, SimulationOrchestrator, SimulationResult};

#[derive(Parser, Debug)]
#[command(about = "Run the simulator over a participant batch")]
struct Args {
    /// Participant CSV
    #[arg(long, default_value = "data/participants_sample.csv")]
    input: PathBuf,
    /// Summary CSV to write
    #[arg(long, default_value = "batch_summary.csv")]
    output: PathBuf,
    /// Directory of rate CSV files; built-in statutory table when omitted
    #[arg(long)]
    rates: Option<PathBuf>,
}

/// One output row per participant
#[derive(Debug, Serialize)]
struct SummaryRow<'a> {
    participant_id: &'a str,
    segment: &'static str,
    tenure_months: i64,
    worker_monthly: Rupiah,
    payer_monthly: Rupiah,
    old_age_savings_balance: Rupiah,
    pension_balance: Rupiah,
    natural_death_total: Rupiah,
    work_death_total: Rupiah,
    job_loss_cash: Rupiah,
    pension_monthly: Rupiah,
    contributions_paid: Rupiah,
}

impl<'a> SummaryRow<'a> {
    fn new(participant_id: &'a str, result: &SimulationResult) -> Self {
        let scenarios = &result.scenarios;
        Self {
            participant_id,
            segment: result.inputs.segment().code(),
            tenure_months: result.inputs.tenure_months,
            worker_monthly: result.monthly.worker_pay,
            payer_monthly: result.monthly.payer_pay.unwrap_or(0),
            old_age_savings_balance: result.projections.old_age_savings.future_value,
            pension_balance: result.projections.pension.map_or(0, |b| b.future_value),
            natural_death_total: scenarios.natural_death.total,
            work_death_total: scenarios.work_death.total,
            job_loss_cash: scenarios.job_loss.cash_benefit,
            pension_monthly: scenarios.retirement.pension_monthly,
            contributions_paid: scenarios.contribution_only.accumulated_total,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let start = Instant::now();
    let records = load_participants(&args.input)
        .with_context(|| format!("loading participants from {}", args.input.display()))?;
    println!("Loaded {} participants in {:?}", records.len(), start.elapsed());

    let orchestrator = match &args.rates {
        Some(dir) => SimulationOrchestrator::from_csv_path(dir)
            .with_context(|| format!("loading rate table from {}", dir.display()))?,
        None => SimulationOrchestrator::new(),
    };

    for record in &records {
        record
            .inputs
            .check_indices(orchestrator.rates())
            .with_context(|| format!("participant {}", record.participant_id))?;
    }

    let run_start = Instant::now();
    let inputs: Vec<_> = records.iter().map(|r| r.inputs.clone()).collect();
    let results = orchestrator.run_batch(&inputs);
    println!("Simulations complete in {:?}", run_start.elapsed());

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    for (record, result) in records.iter().zip(&results) {
        writer.serialize(SummaryRow::new(&record.participant_id, result))?;
    }
    writer.flush()?;
    println!("Output written to {}", args.output.display());

    let worker_total: Rupiah = results.iter().map(|r| r.monthly.worker_pay).sum();
    let payer_total: Rupiah = results.iter().map(|r| r.monthly.payer_pay.unwrap_or(0)).sum();
    println!("\nBatch Summary:");
    println!("  Participants:   {}", results.len());
    println!("  Worker monthly: {}", worker_total);
    println!("  Payer monthly:  {}", payer_total);
    println!("\nTotal time: {:?}", start.elapsed());

    Ok(())
}
