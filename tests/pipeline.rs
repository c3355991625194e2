// Integration tests for the full refresh: feed fetch, extraction, geometry
// resolution and assembly, with geometry failures kept off the record path.

mod common;

use common::{csv, kml_polygon, row, FakeFetcher};
use impactmap::{
    io::geojson::record_to_geojson, ExtractionError, FetchError, Pipeline, PipelineConfig,
    PipelineError, ResolutionError, RowSelector, Sdg, SourceFeed,
};

const FEED: &str = "https://example.org/tokens.csv";
const KML: &str = "https://example.org/site.kml";

#[test]
fn refresh_assembles_record_and_boundaries() {
    let fetcher = FakeFetcher::new()
        .serve(FEED, csv(&[row("9.0", "9.0", "SDG3", ""), row("1.5", "15.0", "SDG3, SDG11", KML)]))
        .serve(KML, kml_polygon("10,1 20,1 20,2 10,2 10,1"));
    let calls = fetcher.clone();

    let snapshot = Pipeline::with_fetcher(PipelineConfig::new(FEED), fetcher).refresh().unwrap();
    assert_eq!(snapshot.geometry_error, None);

    let record = &snapshot.record;
    assert_eq!(record.location().lat, 1.5);
    assert!(record.sdgs().contains(Sdg::Sdg11));
    assert_eq!(record.boundaries().len(), 1);
    assert!(record.centroid_within_boundaries());
    assert_eq!(calls.calls(), vec![FEED.to_string(), KML.to_string()]);
}

#[test]
fn geometry_failure_keeps_the_record() {
    let fetcher = FakeFetcher::new()
        .serve(FEED, csv(&[row("1.5", "15.0", "SDG7", KML)]))
        .fail(KML, 404);

    let snapshot = Pipeline::with_fetcher(PipelineConfig::new(FEED), fetcher).refresh().unwrap();
    assert_eq!(snapshot.record.project_name(), "Delta Mangroves");
    assert!(snapshot.record.boundaries().is_empty());
    assert_eq!(snapshot.geometry_error, Some(ResolutionError::Retrieval { url: KML.to_string(), status: 404 }));
}

#[test]
fn no_kml_means_one_fetch() {
    let fetcher = FakeFetcher::new().serve(FEED, csv(&[row("1.5", "15.0", "", "")]));
    let calls = fetcher.clone();

    let snapshot = Pipeline::with_fetcher(PipelineConfig::new(FEED), fetcher).refresh().unwrap();
    assert!(snapshot.record.boundaries().is_empty());
    assert_eq!(snapshot.geometry_error, None);
    assert_eq!(calls.calls().len(), 1);
}

#[test]
fn feed_failure_is_typed() {
    let pipeline = Pipeline::with_fetcher(PipelineConfig::new(FEED), FakeFetcher::new().fail(FEED, 503));
    assert_eq!(
        pipeline.refresh().unwrap_err(),
        PipelineError::Feed(FetchError::Status { url: FEED.to_string(), status: 503 }),
    );
}

#[test]
fn extraction_failure_skips_geometry() {
    let fetcher = FakeFetcher::new().serve(FEED, csv(&[]));
    let calls = fetcher.clone();

    let err = Pipeline::with_fetcher(PipelineConfig::new(FEED), fetcher).refresh().unwrap_err();
    assert_eq!(err, PipelineError::Extraction(ExtractionError::EmptyFeed));
    assert_eq!(calls.calls(), vec![FEED.to_string()]);
}

#[test]
fn configured_selector_is_used() {
    let mut config = PipelineConfig::new(FEED);
    config.selector = RowSelector::Index(0);
    let feed = SourceFeed::from_csv_bytes(csv(&[row("1.0", "1.0", "", ""), row("2.0", "2.0", "", "")]).as_bytes()).unwrap();

    let snapshot = Pipeline::with_fetcher(config, FakeFetcher::new()).refresh_from(&feed).unwrap();
    assert_eq!(snapshot.record.location().lat, 1.0);
}

#[test]
fn refreshes_are_independent() {
    let fetcher = FakeFetcher::new()
        .serve(FEED, csv(&[row("1.5", "15.0", "", KML)]))
        .serve(KML, kml_polygon("10,1 20,1 20,2 10,1"));
    let pipeline = Pipeline::with_fetcher(PipelineConfig::new(FEED), fetcher);

    assert_eq!(pipeline.refresh().unwrap(), pipeline.refresh().unwrap());
}

#[test]
fn geojson_has_point_then_polygons() {
    let fetcher = FakeFetcher::new()
        .serve(FEED, csv(&[row("1.5", "15.0", "SDG13", KML)]))
        .serve(KML, kml_polygon("10,1 20,1 20,2 10,1"));
    let record = Pipeline::with_fetcher(PipelineConfig::new(FEED), fetcher).refresh().unwrap().record;

    let fc = record_to_geojson(&record);
    let features = fc["features"].as_array().unwrap();
    assert_eq!(features.len(), 2);
    assert_eq!(features[0]["geometry"]["type"], "Point");
    assert_eq!(features[0]["geometry"]["coordinates"], serde_json::json!([15.0, 1.5]));
    assert_eq!(features[0]["properties"]["Starting Project"], "Delta Mangroves");
    assert_eq!(features[1]["geometry"]["coordinates"][0][1], serde_json::json!([20.0, 1.0]));
}

#[test]
fn load_feed_reads_configured_url() {
    let fetcher = FakeFetcher::new().serve(FEED, csv(&[row("1.5", "15.0", "", "")]));
    let pipeline = Pipeline::with_fetcher(PipelineConfig::new(FEED), fetcher);
    assert_eq!(pipeline.config().feed_url, FEED);

    let feed = pipeline.load_feed().unwrap();
    assert_eq!(feed.height(), 1);
    assert_eq!(feed.column_names().len(), 16);
    assert_eq!(feed.column_names()[0], "Latitude");
    assert_eq!(feed.column_names()[15], "KML");
}
