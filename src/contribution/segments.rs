//! Per-segment contribution formulas

use super::progressive::apply_progressive_tiers;
use super::types::{
    Component, ContributionSplit, Formula, LineItem, MigrantCosts, MonthlyContributionResult,
};
use crate::participant::Segment;
use crate::rates::{BasisPoints, RateTable};
use crate::Rupiah;

/// Salaried employee: employer carries JKK and JKM, JHT and JP are shared.
pub fn salaried(
    base_salary: Rupiah,
    fixed_allowance: Rupiah,
    risk_class: usize,
    pension_wage_cap: Rupiah,
    rates: &RateTable,
) -> MonthlyContributionResult {
    let wage = base_salary.saturating_add(fixed_allowance);
    let schedule = rates.salaried();
    let risk_rate = rates.risk_class(risk_class).rate;

    let work_accident = risk_rate.of(wage);
    let death = schedule.death.of(wage);

    let jht = schedule.old_age_savings;
    let jht_payer = jht.payer.of(wage);
    let jht_worker = jht.worker.of(wage);

    // Cap is a hard clamp on the pension base, not a bracket
    let pension_base = wage.min(pension_wage_cap);
    let jp = schedule.pension;
    let jp_payer = jp.payer.of(pension_base);
    let jp_worker = jp.worker.of(pension_base);

    let line_items = vec![
        LineItem {
            component: Component::WorkAccident,
            split: ContributionSplit::PayerOnly { rate: risk_rate },
            amount: work_accident,
            formula: Formula::RateOfWage { base: wage, rate: risk_rate },
        },
        LineItem {
            component: Component::Death,
            split: ContributionSplit::PayerOnly { rate: schedule.death },
            amount: death,
            formula: Formula::RateOfWage { base: wage, rate: schedule.death },
        },
        LineItem {
            component: Component::OldAgeSavings,
            split: ContributionSplit::Shared { payer_rate: jht.payer, worker_rate: jht.worker },
            amount: jht_payer + jht_worker,
            formula: Formula::SharedRate {
                base: wage,
                worker_amount: jht_worker,
                worker_rate: jht.worker,
                payer_amount: jht_payer,
                payer_rate: jht.payer,
                capped_at: None,
            },
        },
        LineItem {
            component: Component::Pension,
            split: ContributionSplit::Shared { payer_rate: jp.payer, worker_rate: jp.worker },
            amount: jp_payer + jp_worker,
            formula: Formula::SharedRate {
                base: pension_base,
                worker_amount: jp_worker,
                worker_rate: jp.worker,
                payer_amount: jp_payer,
                payer_rate: jp.payer,
                capped_at: (wage > pension_wage_cap).then_some(pension_wage_cap),
            },
        },
        LineItem {
            component: Component::JobLoss,
            split: ContributionSplit::GovernmentSubsidy,
            amount: 0,
            formula: Formula::Subsidized,
        },
    ];

    MonthlyContributionResult {
        segment: Segment::SalariedEmployee,
        worker_pay: jht_worker + jp_worker,
        payer_pay: Some(work_accident + death + jht_payer + jp_payer),
        line_items,
        old_age_savings_monthly: jht_payer + jht_worker,
        pension_monthly: Some(jp_payer + jp_worker),
        tier_breakdown: Vec::new(),
        migrant_costs: None,
    }
}

/// Independent worker: pays everything personally, JHT only when opted in.
pub fn independent(reported_income: Rupiah, old_age_savings: bool, rates: &RateTable) -> MonthlyContributionResult {
    let schedule = rates.independent();

    let work_accident = schedule.work_accident.of(reported_income).max(schedule.work_accident_floor);
    let death = schedule.death_flat_fee;

    let mut line_items = vec![
        LineItem {
            component: Component::WorkAccident,
            split: ContributionSplit::WorkerOnly { rate: schedule.work_accident },
            amount: work_accident,
            formula: Formula::RateWithFloor {
                base: reported_income,
                rate: schedule.work_accident,
                floor: schedule.work_accident_floor,
            },
        },
        LineItem {
            component: Component::Death,
            split: ContributionSplit::WorkerFlat,
            amount: death,
            formula: Formula::FlatFee { amount: death },
        },
    ];

    // Opted-out JHT is omitted entirely rather than shown as zero
    let jht = if old_age_savings {
        let amount = schedule.old_age_savings.of(reported_income);
        line_items.push(voluntary_old_age_savings(reported_income, schedule.old_age_savings, amount));
        amount
    } else {
        0
    };

    MonthlyContributionResult {
        segment: Segment::IndependentWorker,
        worker_pay: work_accident + death + jht,
        payer_pay: None,
        line_items,
        old_age_savings_monthly: jht,
        pension_monthly: None,
        tier_breakdown: Vec::new(),
        migrant_costs: None,
    }
}

/// Construction contract: contractor pays JKK and JKM by contract-value bracket.
pub fn construction(contract_value: Rupiah, rates: &RateTable) -> MonthlyContributionResult {
    let outcome = apply_progressive_tiers(contract_value, rates.construction_tiers());

    let line_items = vec![
        LineItem {
            component: Component::WorkAccident,
            split: ContributionSplit::PayerProgressive,
            amount: outcome.work_accident_total,
            formula: Formula::ProgressiveTiers { contract_value },
        },
        LineItem {
            component: Component::Death,
            split: ContributionSplit::PayerProgressive,
            amount: outcome.death_total,
            formula: Formula::ProgressiveTiers { contract_value },
        },
    ];

    MonthlyContributionResult {
        segment: Segment::ConstructionContract,
        worker_pay: 0,
        payer_pay: Some(outcome.total()),
        line_items,
        old_age_savings_monthly: 0,
        pension_monthly: None,
        tier_breakdown: outcome.breakdown,
        migrant_costs: None,
    }
}

/// Migrant worker: a staged mandatory package plus optional recurring JHT.
///
/// The package total is a one-time/staged cost over the tenure and is kept
/// out of `worker_pay`, which carries only the recurring JHT.
pub fn migrant(
    package_index: usize,
    reported_income: Rupiah,
    old_age_savings: bool,
    tenure_months: i64,
    rates: &RateTable,
) -> MonthlyContributionResult {
    let schedule = rates.migrant();
    let package = rates.migrant_package(package_index);

    let extension_months = (tenure_months - package.covered_months as i64).max(0);
    let extension_cost = extension_months * schedule.extension_fee_per_month;
    let mandatory_total = schedule.pre_placement_fee + package.price + extension_cost;

    let mut line_items = vec![LineItem {
        component: Component::MigrantPackage,
        split: ContributionSplit::WorkerPackage,
        amount: mandatory_total,
        formula: Formula::PackageWithExtension {
            pre_placement_fee: schedule.pre_placement_fee,
            package_price: package.price,
            package_months: package.covered_months,
            extension_months,
            extension_fee: schedule.extension_fee_per_month,
        },
    }];

    let jht = if old_age_savings {
        let amount = schedule.old_age_savings.of(reported_income);
        line_items.push(voluntary_old_age_savings(reported_income, schedule.old_age_savings, amount));
        amount
    } else {
        0
    };

    MonthlyContributionResult {
        segment: Segment::MigrantWorker,
        worker_pay: jht,
        payer_pay: None,
        line_items,
        old_age_savings_monthly: jht,
        pension_monthly: None,
        tier_breakdown: Vec::new(),
        migrant_costs: Some(MigrantCosts {
            pre_placement_fee: schedule.pre_placement_fee,
            package_price: package.price,
            covered_months: package.covered_months,
            extension_months,
            extension_cost,
            mandatory_total,
            accumulated_total: mandatory_total + jht * tenure_months.max(0),
        }),
    }
}

fn voluntary_old_age_savings(base: Rupiah, rate: BasisPoints, amount: Rupiah) -> LineItem {
    LineItem {
        component: Component::OldAgeSavings,
        split: ContributionSplit::WorkerOnly { rate },
        amount,
        formula: Formula::RateOfWage { base, rate },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_salaried_worked_example() {
        let rates = RateTable::statutory();
        let result = salaried(4_000_000, 1_000_000, 0, 10_547_400, &rates);

        assert_eq!(result.old_age_savings_monthly, 285_000);
        assert_eq!(result.pension_monthly, Some(150_000));

        // Worker: JHT 2% (100,000) + JP 1% (50,000)
        assert_eq!(result.worker_pay, 150_000);
        // Payer: JKK 12,000 + JKM 15,000 + JHT 185,000 + JP 100,000
        assert_eq!(result.payer_pay, Some(312_000));
        assert_eq!(result.line_items.len(), 5);
        assert_eq!(result.line_item(Component::JobLoss).map(|i| i.amount), Some(0));
    }

    #[test]
    fn test_salaried_pension_cap_flagged() {
        let rates = RateTable::statutory();
        let result = salaried(15_000_000, 0, 2, 10_547_400, &rates);
        let pension = result.line_item(Component::Pension).unwrap();

        assert_eq!(pension.amount, BasisPoints(300).of(10_547_400));
        match pension.formula {
            Formula::SharedRate { base, capped_at, .. } => {
                assert_eq!(base, 10_547_400);
                assert_eq!(capped_at, Some(10_547_400));
            }
            other => panic!("unexpected formula {:?}", other),
        }

        // JHT is never capped
        assert_eq!(result.old_age_savings_monthly, 855_000);
    }

    #[test]
    fn test_salaried_under_cap_not_flagged() {
        let rates = RateTable::statutory();
        let result = salaried(5_000_000, 0, 0, 10_547_400, &rates);
        let pension = result.line_item(Component::Pension).unwrap();
        assert!(matches!(pension.formula, Formula::SharedRate { capped_at: None, .. }));
    }

    #[test]
    fn test_independent_floor_and_opt_in() {
        let rates = RateTable::statutory();

        let low = independent(500_000, false, &rates);
        assert_eq!(low.line_item(Component::WorkAccident).unwrap().amount, 10_000);
        assert!(low.line_item(Component::OldAgeSavings).is_none());
        assert_eq!(low.worker_pay, 16_800);
        assert_eq!(low.payer_pay, None);

        let opted = independent(1_000_000, true, &rates);
        assert_eq!(opted.line_item(Component::OldAgeSavings).unwrap().amount, 20_000);
        assert_eq!(opted.worker_pay, 10_000 + 6_800 + 20_000);
        assert_eq!(opted.old_age_savings_monthly, 20_000);
    }

    #[test]
    fn test_construction_payer_only() {
        let rates = RateTable::statutory();
        let result = construction(600_000_000, &rates);
        assert_eq!(result.worker_pay, 0);
        assert_eq!(result.line_item(Component::WorkAccident).unwrap().amount, 1_020_000);
        assert_eq!(result.payer_pay, Some(1_020_000 + 130_000));
        assert_eq!(result.tier_breakdown.len(), 3);
    }

    #[test]
    fn test_migrant_extension() {
        let rates = RateTable::statutory();
        let result = migrant(1, 3_000_000, false, 18, &rates);
        let costs = result.migrant_costs.unwrap();

        assert_eq!(costs.extension_months, 6);
        assert_eq!(costs.extension_cost, 81_000);
        assert_eq!(costs.mandatory_total, 307_500);
        assert_eq!(costs.accumulated_total, 307_500);
        assert_eq!(result.worker_pay, 0);
    }

    #[test]
    fn test_migrant_within_package_and_jht() {
        let rates = RateTable::statutory();
        let result = migrant(0, 3_000_000, true, 12, &rates);
        let costs = result.migrant_costs.unwrap();

        assert_eq!(costs.extension_months, 0);
        assert_eq!(costs.mandatory_total, 37_500 + 332_500);
        assert_eq!(result.worker_pay, 60_000);
        assert_eq!(costs.accumulated_total, 370_000 + 60_000 * 12);
    }
}
