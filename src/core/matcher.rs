use crate::core::{
    distance::{distance, DEFAULT_PENALTY},
    filters::matches_demographics,
    scoring::Instrument,
};
use crate::models::{ClinicalQuery, ClinicalRecord, Distance, Match, MatchMode, Table};
use thiserror::Error;

/// Errors raised by the matcher
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MatchError {
    #[error("no dataset row matches the query")]
    NoMatchFound,

    #[error("penalty {penalty} must exceed the maximum {instrument} score of {max_score}")]
    PenaltyTooSmall {
        penalty: u32,
        instrument: Instrument,
        max_score: u32,
    },
}

/// Nearest-match selector for clinical datasets
///
/// Every call is a pure scan over the table: distances live only for the
/// duration of the call and the table is never written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Matcher {
    penalty: u32,
}

impl Matcher {
    pub fn new(penalty: u32) -> Self {
        Self { penalty }
    }

    pub fn with_default_penalty() -> Self {
        Self::new(DEFAULT_PENALTY)
    }

    pub fn penalty(&self) -> u32 {
        self.penalty
    }

    /// Check that a demographic mismatch always outweighs any score gap
    pub fn validate_for(&self, instrument: Instrument) -> Result<(), MatchError> {
        let max_score = instrument.max_score();
        if self.penalty <= max_score {
            return Err(MatchError::PenaltyTooSmall {
                penalty: self.penalty,
                instrument,
                max_score,
            });
        }
        Ok(())
    }

    /// Find the row closest to the query
    ///
    /// `HardFilter` drops rows whose demographics differ and ranks the rest
    /// by score difference. `SoftPenalty` keeps every row and adds the
    /// configured penalty per mismatching demographic field.
    ///
    /// Ties resolve to the earliest row in table order.
    pub fn find_best_match<'a>(
        &self,
        table: &'a Table<ClinicalRecord>,
        query: &ClinicalQuery,
        mode: MatchMode,
    ) -> Result<Match<'a>, MatchError> {
        let best = match mode {
            MatchMode::HardFilter => arg_min(
                table
                    .iter()
                    .enumerate()
                    .filter(|(_, record)| matches_demographics(record, query))
                    .map(|(index, record)| (index, record, distance(record, query, 0))),
            ),
            MatchMode::SoftPenalty => arg_min(
                table
                    .iter()
                    .enumerate()
                    .map(|(index, record)| (index, record, distance(record, query, self.penalty))),
            ),
        };

        let result = best.ok_or(MatchError::NoMatchFound);

        match &result {
            Ok(m) => tracing::debug!(
                "{} match for score {}: row {} (distance {})",
                mode,
                query.user_score,
                m.index,
                m.distance.total
            ),
            Err(_) => tracing::debug!(
                "{} found no match for score {} among {} rows",
                mode,
                query.user_score,
                table.len()
            ),
        }

        result
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_penalty()
    }
}

/// Linear arg-min keeping the first row on ties
fn arg_min<'a, I>(candidates: I) -> Option<Match<'a>>
where
    I: Iterator<Item = (usize, &'a ClinicalRecord, Distance)>,
{
    let mut best: Option<Match<'a>> = None;

    for (index, record, distance) in candidates {
        let better = match &best {
            Some(current) => distance.total < current.distance.total,
            None => true,
        };
        if better {
            best = Some(Match { index, record, distance });
        }
    }

    best
}
