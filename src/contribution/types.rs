//! Monthly contribution output structures

use serde::{Deserialize, Serialize};

use crate::participant::Segment;
use crate::rates::BasisPoints;
use crate::Rupiah;

/// Insurance program a line item pays into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Component {
    /// Jaminan Kecelakaan Kerja
    WorkAccident,
    /// Jaminan Kematian
    Death,
    /// Jaminan Hari Tua
    OldAgeSavings,
    /// Jaminan Pensiun
    Pension,
    /// Jaminan Kehilangan Pekerjaan
    JobLoss,
    /// Prepaid migrant worker protection package
    MigrantPackage,
}

/// Who bears a line item, and at what rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ContributionSplit {
    PayerOnly { rate: BasisPoints },
    Shared { payer_rate: BasisPoints, worker_rate: BasisPoints },
    WorkerOnly { rate: BasisPoints },
    WorkerFlat,
    /// Contractor pays by contract-value bracket
    PayerProgressive,
    /// Funded by government subsidy and JKK recomposition
    GovernmentSubsidy,
    /// Worker pays a mandatory prepaid package
    WorkerPackage,
}

/// How a line item amount was derived. Rendering is left to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Formula {
    RateOfWage {
        base: Rupiah,
        rate: BasisPoints,
    },
    SharedRate {
        base: Rupiah,
        worker_amount: Rupiah,
        worker_rate: BasisPoints,
        payer_amount: Rupiah,
        payer_rate: BasisPoints,
        /// Cap applied to the wage, present only when the wage exceeded it
        capped_at: Option<Rupiah>,
    },
    RateWithFloor {
        base: Rupiah,
        rate: BasisPoints,
        floor: Rupiah,
    },
    FlatFee {
        amount: Rupiah,
    },
    ProgressiveTiers {
        contract_value: Rupiah,
    },
    Subsidized,
    PackageWithExtension {
        pre_placement_fee: Rupiah,
        package_price: Rupiah,
        package_months: u32,
        extension_months: i64,
        extension_fee: Rupiah,
    },
}

/// One itemized contribution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub component: Component,
    pub split: ContributionSplit,
    pub amount: Rupiah,
    pub formula: Formula,
}

/// Contribution from one bracket of a progressive schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierBreakdown {
    /// Position of the tier in the schedule (0-indexed)
    pub tier_index: usize,
    pub lower_bound: Rupiah,
    /// `None` for the unbounded top tier
    pub upper_bound: Option<Rupiah>,
    /// Portion of the contract value falling in this tier
    pub portion: Rupiah,
    pub work_accident_amount: Rupiah,
    pub death_amount: Rupiah,
}

/// Migrant worker package costs over the full tenure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrantCosts {
    pub pre_placement_fee: Rupiah,
    pub package_price: Rupiah,
    pub covered_months: u32,
    pub extension_months: i64,
    pub extension_cost: Rupiah,
    /// Pre-placement fee + package price + extension cost
    pub mandatory_total: Rupiah,
    /// Mandatory total + recurring old-age savings over the tenure
    pub accumulated_total: Rupiah,
}

/// Monthly contribution breakdown for one participant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyContributionResult {
    pub segment: Segment,

    /// Recurring monthly amount paid by the worker
    pub worker_pay: Rupiah,

    /// Recurring monthly amount paid by the employer or contractor,
    /// `None` where the segment has no payer
    pub payer_pay: Option<Rupiah>,

    /// Itemized components in display order
    pub line_items: Vec<LineItem>,

    /// Monthly inflow into the old-age savings account (worker + payer)
    pub old_age_savings_monthly: Rupiah,

    /// Monthly inflow into the pension account, salaried only
    pub pension_monthly: Option<Rupiah>,

    /// Construction only: per-tier amounts
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub tier_breakdown: Vec<TierBreakdown>,

    /// Migrant only: package costs across the tenure
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub migrant_costs: Option<MigrantCosts>,
}

impl MonthlyContributionResult {
    /// Total recurring monthly contribution from every party
    pub fn total_monthly(&self) -> Rupiah {
        self.worker_pay + self.payer_pay.unwrap_or(0)
    }

    /// Find the line item for a component, if present
    pub fn line_item(&self, component: Component) -> Option<&LineItem> {
        self.line_items.iter().find(|item| item.component == component)
    }
}
