mod common;

use common::{settings_for, MockServer};
use job_finder_lib::provider::{APPLY_LINK_PLACEHOLDER, CITY_PLACEHOLDER, DESCRIPTION_PLACEHOLDER};
use job_finder_lib::{ExternalSearch, JobProviderClient, JobSearchError, Settings};

const SALARY_PAGE: &str = r#"<html><body><span class="salary-snippet"> $70,000 a year </span></body></html>"#;

const THREE_JOBS: &str = r#"{
    "status": "OK",
    "data": [
        {"job_title": "Welder", "job_description": "Weld things", "job_apply_link": "https://a", "job_city": "Toronto"},
        {"job_title": "Welder"},
        {"job_title": "Pipefitter", "job_city": "Calgary"}
    ]
}"#;

fn jobs_server(body: &'static str) -> MockServer {
    MockServer::start(move |target| {
        if target.starts_with("/search") {
            (200, body.to_string())
        } else {
            (200, SALARY_PAGE.to_string())
        }
    })
}

#[test]
fn missing_credential_makes_no_network_call() {
    let server = jobs_server(THREE_JOBS);
    let settings = Settings { rapidapi_key: None, ..settings_for(&server) };
    let client = JobProviderClient::new(settings).unwrap();

    let result = client.search_external("welder", |_| Some(1));

    assert!(matches!(result, Err(JobSearchError::Configuration(_))));
    assert_eq!(server.hits(), 0);
}

#[test]
fn empty_data_is_an_explicit_no_results() {
    let server = jobs_server(r#"{"status":"OK","data":[]}"#);
    let client = JobProviderClient::new(settings_for(&server)).unwrap();

    let mut asked = false;
    let result = client.search_external("astronaut", |_| {
        asked = true;
        Some(1)
    });

    assert_eq!(result.unwrap(), ExternalSearch::NoResults);
    assert!(!asked);
}

#[test]
fn request_carries_query_and_credentials() {
    let server = jobs_server(r#"{"data":[]}"#);
    let client = JobProviderClient::new(settings_for(&server)).unwrap();
    client.search_external("welder", |_| None).unwrap();

    let request = server.requests()[0].to_lowercase();
    assert!(request.contains("query=welder+in+canada"));
    assert!(request.contains("page=1"));
    assert!(request.contains("num_pages=1"));
    assert!(request.contains("x-rapidapi-key: secret"));
    assert!(request.contains("x-rapidapi-host: jsearch.p.rapidapi.com"));
}

#[test]
fn found_records_are_normalized_with_salaries() {
    let server = jobs_server(THREE_JOBS);
    let client = JobProviderClient::new(settings_for(&server)).unwrap();

    let mut offered = 0;
    let result = client
        .search_external("welder", |n| {
            offered = n;
            Some(2)
        })
        .unwrap();
    assert_eq!(offered, 3);

    let ExternalSearch::Found { records, demand } = result else {
        panic!("expected records, got {:?}", result);
    };
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].title, "Welder");
    assert_eq!(records[0].city, "Toronto");
    assert_eq!(records[0].salary_estimate, "$70,000 a year");
    assert_eq!(records[1].description, DESCRIPTION_PLACEHOLDER);
    assert_eq!(records[1].apply_link, APPLY_LINK_PLACEHOLDER);
    assert_eq!(records[1].city, CITY_PLACEHOLDER);

    // Both records share one title, so only one salary fetch happens.
    assert_eq!(server.hits_on("/salary/"), 1);

    // Demand covers the whole raw result set, not just the shown records.
    let titles: Vec<&str> = demand.iter().map(|d| d.title.as_str()).collect();
    assert_eq!(titles, ["Welder", "Welder", "Pipefitter"]);
    assert_eq!(demand[2].openings, 12000);
}

#[test]
fn salary_cache_survives_across_searches() {
    let server = jobs_server(THREE_JOBS);
    let client = JobProviderClient::new(settings_for(&server)).unwrap();

    client.search_external("welder", |n| Some(n)).unwrap();
    client.search_external("welder", |n| Some(n)).unwrap();

    assert_eq!(server.hits_on("/search"), 2);
    assert_eq!(server.hits_on("/salary/"), 2);
    assert_eq!(client.salaries().len(), 2);
}

#[test]
fn cancelled_prompt_aborts_without_salary_lookups() {
    let server = jobs_server(THREE_JOBS);
    let client = JobProviderClient::new(settings_for(&server)).unwrap();

    let result = client.search_external("welder", |_| None).unwrap();

    assert_eq!(result, ExternalSearch::Cancelled);
    assert_eq!(server.hits_on("/salary/"), 0);
}

#[test]
fn count_outside_range_is_rejected() {
    let server = jobs_server(THREE_JOBS);
    let client = JobProviderClient::new(settings_for(&server)).unwrap();

    assert!(matches!(
        client.search_external("welder", |_| Some(4)),
        Err(JobSearchError::InputValidation(_))
    ));
    assert!(matches!(
        client.search_external("welder", |_| Some(0)),
        Err(JobSearchError::InputValidation(_))
    ));
}

#[test]
fn provider_http_error_is_a_transport_error() {
    let server = MockServer::start(|_| (500, "boom".to_string()));
    let client = JobProviderClient::new(settings_for(&server)).unwrap();

    assert!(matches!(
        client.search_external("welder", |_| Some(1)),
        Err(JobSearchError::Transport(_))
    ));
}

#[test]
fn malformed_payload_is_a_decode_error() {
    let server = jobs_server("not json");
    let client = JobProviderClient::new(settings_for(&server)).unwrap();

    assert!(matches!(
        client.search_external("welder", |_| Some(1)),
        Err(JobSearchError::Decode(_))
    ));
}

#[test]
fn failing_salary_lookup_does_not_abort_the_search() {
    let server = MockServer::start(|target| {
        if target.starts_with("/search") {
            (200, THREE_JOBS.to_string())
        } else if target.contains("Pipefitter") {
            (200, "<html><body>nothing here</body></html>".to_string())
        } else {
            (404, "gone".to_string())
        }
    });
    let client = JobProviderClient::new(settings_for(&server)).unwrap();

    let ExternalSearch::Found { records, .. } = client.search_external("welder", |n| Some(n)).unwrap() else {
        panic!("expected records");
    };

    assert_eq!(records.len(), 3);
    assert!(records[0].salary_estimate.starts_with("Error fetching salary:"));
    assert_eq!(records[1].salary_estimate, records[0].salary_estimate);
    assert_eq!(records[2].salary_estimate, "Salary not found");
}
