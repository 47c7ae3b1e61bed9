//! Merge request validation against in-memory stores.

use std::sync::Arc;

use taxonomy_poc::error::TaxonomyError;
use taxonomy_poc::hierarchy::RankHierarchy;
use taxonomy_poc::merge::MergeRequest;
use taxonomy_poc::specimen::TypeSpecimen;
use taxonomy_poc::TaxonomyService;

#[path = "helpers/mocks.rs"]
mod mocks;

use mocks::{ladder, taxon, MockRankSource, MockSpecimenStore, MockTaxonStore};

fn service() -> TaxonomyService {
    let hierarchy = Arc::new(RankHierarchy::new(Arc::new(MockRankSource::new(ladder()))));
    let taxa = MockTaxonStore::with_taxa(vec![
        // Two genus-level taxa under family 7, both current.
        taxon(2, 10, "Bombus", 7, 10),
        taxon(2, 11, "Psithyrus", 7, 11),
    ]);
    let specimens = MockSpecimenStore::with_specimens(vec![TypeSpecimen {
        id: 5,
        name: "Apis terrestris".into(),
        author: "Linnaeus".into(),
        year: 1758,
    }]);
    TaxonomyService::new(hierarchy, Arc::new(taxa), Arc::new(specimens))
}

fn request() -> MergeRequest {
    MergeRequest {
        rank_id: 2,
        input_ids: vec![10, 11],
        output_name: "Bombus".into(),
        author: "Smith".into(),
        year: 2019,
        specimen_id: 5,
    }
}

#[tokio::test]
async fn valid_request_resolves_every_key() {
    let proposal = service().validate_merge(request()).await.unwrap();

    assert_eq!(proposal.rank.id, 2);
    assert_eq!(proposal.rank.name, "genus");
    assert_eq!(proposal.inputs.len(), 2);
    assert_eq!(proposal.inputs[0].name, "Bombus");
    assert_eq!(proposal.inputs[1].name, "Psithyrus");
    assert_eq!(proposal.specimen.id, 5);
    assert_eq!(proposal.year, 2019);
}

#[tokio::test]
async fn unknown_rank_is_rejected() {
    let req = MergeRequest {
        rank_id: 42,
        ..request()
    };
    let err = service().validate_merge(req).await.unwrap_err();
    assert!(matches!(err, TaxonomyError::NotFound(_)));
}

#[tokio::test]
async fn unknown_input_taxon_is_rejected() {
    let req = MergeRequest {
        input_ids: vec![10, 999],
        ..request()
    };
    let err = service().validate_merge(req).await.unwrap_err();
    assert!(matches!(err, TaxonomyError::NotFound(_)));
}

#[tokio::test]
async fn fewer_than_two_inputs_is_rejected() {
    let req = MergeRequest {
        input_ids: vec![10],
        ..request()
    };
    let err = service().validate_merge(req).await.unwrap_err();
    assert!(matches!(err, TaxonomyError::InvalidInput(_)));
}

#[tokio::test]
async fn out_of_range_year_is_rejected() {
    for year in [1600, 1215, 3000] {
        let req = MergeRequest { year, ..request() };
        let err = service().validate_merge(req).await.unwrap_err();
        assert!(matches!(err, TaxonomyError::InvalidInput(_)), "year {year}");
    }
}

#[tokio::test]
async fn empty_output_name_is_rejected() {
    let req = MergeRequest {
        output_name: "  ".into(),
        ..request()
    };
    let err = service().validate_merge(req).await.unwrap_err();
    assert!(matches!(err, TaxonomyError::InvalidInput(_)));
}

#[tokio::test]
async fn unknown_specimen_is_rejected() {
    let req = MergeRequest {
        specimen_id: 404,
        ..request()
    };
    let err = service().validate_merge(req).await.unwrap_err();
    assert!(matches!(err, TaxonomyError::NotFound(_)));
}
