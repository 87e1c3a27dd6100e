//! Member roster and monthly contributions.
//!
//! Contributions are keyed by member, year and month: recording a second amount for the same
//! month replaces the first. Totals are a [View] fold over the recorded amounts.

use std::collections::BTreeMap;

use chrono::Month;
use serde::{Deserialize, Serialize};

use crate::view::{View, ViewStateComputation};
use crate::Identifier;

/// A member of the community.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    /// Store-assigned identifier
    pub id: String,
    /// Given name
    pub name: String,
    /// Family (house) name
    pub family_name: String,
    /// Contact number
    pub phone: String,
    /// Whether the member pledged a monthly contribution
    pub is_monthly_contributor: bool,
}

/// The amount a member gave for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contribution {
    /// Contributing member
    pub member_id: String,
    /// Calendar year
    pub year: i32,
    /// Calendar month
    pub month: Month,
    /// Amount in whole rupees
    pub amount: u64,
}

impl Identifier for Contribution {
    fn identifier(&self) -> String {
        format!("{}_{}_{}", self.member_id, self.year, self.month.name())
    }
}

/// Members that pledged a monthly contribution, in roster order.
pub fn monthly_contributors(members: &[Member]) -> Vec<&Member> {
    members
        .iter()
        .filter(|member| member.is_monthly_contributor)
        .collect()
}

/// Sums contribution amounts.
pub fn total_received_view<'a>() -> View<'a, u64, Contribution> {
    let amounts: View<'a, u64, u64> = View {
        evolve: Box::new(|total, amount| total.saturating_add(*amount)),
        initial_state: Box::new(|| 0),
    };
    amounts.map_event(|contribution: &Contribution| contribution.amount)
}

/// Recorded contributions, one per member and month.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContributionLedger {
    entries: BTreeMap<String, Contribution>,
}

impl ContributionLedger {
    /// Records `contribution`, returning the one it replaced.
    pub fn upsert(&mut self, contribution: Contribution) -> Option<Contribution> {
        self.entries.insert(contribution.identifier(), contribution)
    }

    /// The contribution of a member for one month.
    pub fn get(&self, member_id: &str, year: i32, month: Month) -> Option<&Contribution> {
        self.entries
            .get(&format!("{member_id}_{year}_{}", month.name()))
    }

    /// Contributions of `year`.
    pub fn for_year(&self, year: i32) -> impl Iterator<Item = &Contribution> {
        self.entries
            .values()
            .filter(move |contribution| contribution.year == year)
    }

    /// Total amount received in `year`.
    pub fn total_received(&self, year: i32) -> u64 {
        let contributions: Vec<&Contribution> = self.for_year(year).collect();
        total_received_view().compute_new_state(None, &contributions)
    }

    /// Total amount one member gave in `year`.
    pub fn member_total(&self, member_id: &str, year: i32) -> u64 {
        let contributions: Vec<&Contribution> = self
            .for_year(year)
            .filter(|contribution| contribution.member_id == member_id)
            .collect();
        total_received_view().compute_new_state(None, &contributions)
    }

    /// Number of recorded contributions across all years.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<Contribution> for ContributionLedger {
    fn from_iter<T: IntoIterator<Item = Contribution>>(iter: T) -> Self {
        let mut ledger = ContributionLedger::default();
        for contribution in iter {
            ledger.upsert(contribution);
        }
        ledger
    }
}
