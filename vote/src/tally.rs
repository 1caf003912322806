//! # Tally
//!
//! Local copy of the server-authoritative vote counts.
//!
//! The results endpoint is the single source of truth. Every refresh replaces
//! the whole set rather than merging, so a dropped partial update can never
//! leave the dashboard drifted from the server. Percentage shares are always
//! recomputed locally from the counts; whatever share the server reports is
//! ignored.
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GadgetTally {
    pub gadget_id: String,
    pub gadget_name: String,
    pub total_votes: u64,

    #[serde(default)]
    pub percentage: f64,
}

#[derive(Deserialize)]
pub struct ResultsResponse {
    pub results: Vec<GadgetTally>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tally {
    pub gadgets: Vec<GadgetTally>,
    pub total_votes: u64,
}

impl Tally {
    /// Replaces the tally wholesale and recomputes every share from the sum.
    pub fn replace(&mut self, gadgets: Vec<GadgetTally>) {
        self.total_votes = gadgets.iter().map(|g| g.total_votes).sum();
        self.gadgets = gadgets;

        for gadget in &mut self.gadgets {
            gadget.percentage = if self.total_votes == 0 {
                0.0
            } else {
                gadget.total_votes as f64 * 100.0 / self.total_votes as f64
            };
        }
    }

    pub fn contains(&self, gadget_id: &str) -> bool {
        self.gadgets.iter().any(|g| g.gadget_id == gadget_id)
    }

    /// Top `n` gadgets by vote count, descending.
    pub fn top(&self, n: usize) -> Vec<GadgetTally> {
        let mut ranked = self.gadgets.clone();
        ranked.sort_by(|a, b| b.total_votes.cmp(&a.total_votes));
        ranked.truncate(n);

        ranked
    }
}
