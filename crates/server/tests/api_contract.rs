//! JSON contract tests for the polling API.
//!
//! `leadmap-server` is a binary crate (no lib.rs), so these tests validate
//! the wire contract by defining mirror types and checking serialization
//! roundtrips against the shapes the mobile/web clients consume. Behavior
//! tests live in the crate's `#[cfg(test)]` modules.

use serde::{Deserialize, Serialize};

/// Statuses a polling client must be prepared to render.
const JOB_STATUSES: &[&str] = &["pending", "running", "completed", "failed"];

#[derive(Debug, Serialize, Deserialize)]
struct CreateJobRequest {
    category: String,
    cities: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_results_per_city: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct JobStatusResponse {
    job_id: String,
    status: String,
    progress: u8,
    total_cities: u32,
    current_city: String,
    results: Vec<BusinessRecord>,
    logs: Vec<String>,
    error: Option<String>,
    created_at: String,
    completed_at: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct BusinessRecord {
    business_name: String,
    address: String,
    city: String,
    state: String,
    phone: String,
    website: String,
    category: String,
    source_url: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct DownloadEnvelope {
    filename: String,
    content: String,
    content_type: String,
}

#[test]
fn test_create_request_minimal_body() {
    // The cap is optional on the wire; the server defaults it to 10.
    let json = r#"{"category":"Restaurants","cities":["Los Angeles, California"]}"#;
    let request: CreateJobRequest = serde_json::from_str(json).unwrap();
    assert_eq!(request.category, "Restaurants");
    assert_eq!(request.cities.len(), 1);
    assert!(request.max_results_per_city.is_none());
}

#[test]
fn test_job_status_response_roundtrip() {
    let json = r#"{
        "job_id": "3e8c90a2-5bc7-4a9d-8f64-0f2b7f9f1a11",
        "status": "running",
        "progress": 50,
        "total_cities": 2,
        "current_city": "San Diego, California",
        "results": [{
            "business_name": "Joe's Diner",
            "address": "1 Main St",
            "city": "Los Angeles",
            "state": "California",
            "phone": "N/A",
            "website": "N/A",
            "category": "Restaurants",
            "source_url": "https://maps.example/place/joes"
        }],
        "logs": ["Job created for category: Restaurants"],
        "error": null,
        "created_at": "2026-08-30T12:00:00Z",
        "completed_at": null
    }"#;
    let response: JobStatusResponse = serde_json::from_str(json).unwrap();
    assert!(JOB_STATUSES.contains(&response.status.as_str()));
    assert_eq!(response.progress, 50);
    assert_eq!(response.results.len(), 1);
    // Every record field is populated: "N/A", never null.
    assert_eq!(response.results[0].phone, "N/A");

    let reserialized = serde_json::to_string(&response).unwrap();
    let _: JobStatusResponse = serde_json::from_str(&reserialized).unwrap();
}

#[test]
fn test_partial_failure_is_representable() {
    // A client must render a job that has both results and an error.
    let json = r#"{
        "job_id": "3e8c90a2-5bc7-4a9d-8f64-0f2b7f9f1a11",
        "status": "failed",
        "progress": 50,
        "total_cities": 2,
        "current_city": "",
        "results": [{
            "business_name": "Joe's Diner",
            "address": "1 Main St",
            "city": "Los Angeles",
            "state": "California",
            "phone": "N/A",
            "website": "N/A",
            "category": "Restaurants",
            "source_url": "N/A"
        }],
        "logs": [],
        "error": "extraction backend error: browser crashed",
        "created_at": "2026-08-30T12:00:00Z",
        "completed_at": "2026-08-30T12:03:00Z"
    }"#;
    let response: JobStatusResponse = serde_json::from_str(json).unwrap();
    assert_eq!(response.status, "failed");
    assert!(response.error.is_some());
    assert!(!response.results.is_empty());
}

#[test]
fn test_download_envelope_shape() {
    let json = r#"{
        "filename": "business_results_3e8c90a2-5bc7-4a9d-8f64-0f2b7f9f1a11.csv",
        "content": "business_name,address,city,state,phone,website,category,source_url\n",
        "content_type": "text/csv"
    }"#;
    let envelope: DownloadEnvelope = serde_json::from_str(json).unwrap();
    assert_eq!(envelope.content_type, "text/csv");
    assert!(envelope.filename.ends_with(".csv"));
    assert!(envelope.content.starts_with("business_name,"));
}
