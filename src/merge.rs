//! Validation for a proposed merge of several taxa into one.
//!
//! A merge happens within a single taxonomic tier: every input must resolve
//! at the named rank, and the replacement name needs a type specimen. This
//! module only validates and assembles the proposal; executing the merge is
//! a separate workflow.

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TaxonomyError};
use crate::rank::Rank;
use crate::service::TaxonomyService;
use crate::specimen::TypeSpecimen;
use crate::taxon::Taxon;

/// Nothing taxonomic predates Linnaeus by much; reject obvious typos.
const MIN_MERGE_YEAR: i32 = 1601;

/// A merge request as received from the outside — keys only, never records.
#[derive(Debug, Clone, Deserialize)]
pub struct MergeRequest {
    pub rank_id: i32,
    pub input_ids: Vec<i64>,
    pub output_name: String,
    pub author: String,
    pub year: i32,
    pub specimen_id: i64,
}

/// A fully resolved, validated merge proposal. Inert data: building one has
/// no side effects.
#[derive(Debug, Clone, Serialize)]
pub struct MergeProposal {
    pub rank: Rank,
    pub inputs: Vec<Taxon>,
    pub output_name: String,
    pub author: String,
    pub year: i32,
    pub specimen: TypeSpecimen,
}

impl TaxonomyService {
    /// Resolve and validate every key in the request. Which taxa *should*
    /// merge is a human judgement; this only guarantees the request is
    /// well-formed against live data.
    pub async fn validate_merge(&self, request: MergeRequest) -> Result<MergeProposal> {
        let rank = self.rank(request.rank_id).await?;

        if request.input_ids.len() < 2 {
            return Err(TaxonomyError::InvalidInput(
                "a merge needs at least two input taxa".into(),
            ));
        }
        let mut inputs = Vec::with_capacity(request.input_ids.len());
        for id in &request.input_ids {
            inputs.push(self.taxon(rank.id, *id).await?);
        }

        if request.output_name.trim().is_empty() {
            return Err(TaxonomyError::InvalidInput("output name is empty".into()));
        }

        let year = check_year(request.year)?;
        let specimen = self.specimen(request.specimen_id).await?;

        Ok(MergeProposal {
            rank,
            inputs,
            output_name: request.output_name,
            author: request.author,
            year,
            specimen,
        })
    }
}

fn check_year(year: i32) -> Result<i32> {
    let this_year = Utc::now().year();
    if (MIN_MERGE_YEAR..=this_year).contains(&year) {
        Ok(year)
    } else {
        Err(TaxonomyError::InvalidInput(format!(
            "year {year} out of range ({MIN_MERGE_YEAR} to {this_year})"
        )))
    }
}
