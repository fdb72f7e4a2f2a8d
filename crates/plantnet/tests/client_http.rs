//! Wire-level tests for `PlantNetClient` against a local mock server.

use httpmock::prelude::*;
use serde_json::json;

use plantnet::{IdentificationRequest, Organ, PlantNetClient};

fn client_for(server: &MockServer) -> PlantNetClient {
    PlantNetClient::new("test-key")
        .unwrap()
        .with_base_url(server.base_url())
}

fn identify_body() -> serde_json::Value {
    json!({
        "bestMatch": "Rosa canina L.",
        "results": [
            {
                "score": 0.88123,
                "species": {
                    "scientificNameWithoutAuthor": "Rosa canina",
                    "scientificNameAuthorship": "L.",
                    "genus": { "scientificNameWithoutAuthor": "Rosa" },
                    "family": { "scientificNameWithoutAuthor": "Rosaceae" },
                    "commonNames": ["Dog rose", "Wild rose"]
                },
                "gbif": { "id": "3005039" }
            },
            {
                "score": 0.0412,
                "species": {
                    "scientificNameWithoutAuthor": "Rosa corymbifera",
                    "scientificNameAuthorship": "Borkh.",
                    "genus": { "scientificNameWithoutAuthor": "Rosa" },
                    "family": { "scientificNameWithoutAuthor": "Rosaceae" },
                    "commonNames": []
                }
            }
        ],
        "remainingIdentificationRequests": 493,
        "version": "2025-01-15 (7.3)"
    })
}

#[tokio::test]
async fn identify_passes_response_through_unchanged() {
    let server = MockServer::start();

    let image = server.mock(|when, then| {
        when.method(GET).path("/flower.jpg");
        then.status(200)
            .header("Content-Type", "image/jpeg")
            .body(vec![0xFF, 0xD8, 0xFF, 0xE0]);
    });

    let identify = server.mock(|when, then| {
        when.method(POST)
            .path("/v2/identify/all")
            .query_param("api-key", "test-key")
            .query_param("lang", "en")
            .query_param("nb-results", "5")
            .query_param("include-related-images", "false");
        then.status(200).json_body(identify_body());
    });

    let client = client_for(&server);
    let request = IdentificationRequest::new(
        vec![server.url("/flower.jpg")],
        vec![Organ::Flower],
    );

    let result = client.identify(&request).await.unwrap();

    image.assert();
    identify.assert();

    // Pass-through fidelity: nothing is transformed or re-sorted.
    assert_eq!(result.best_match.as_deref(), Some("Rosa canina L."));
    assert_eq!(result.results.len(), 2);
    assert_eq!(result.results[0].score, 0.88123);
    assert_eq!(result.results[1].score, 0.0412);
    assert_eq!(
        result.results[0].species.scientific_name_without_author,
        "Rosa canina"
    );
    assert_eq!(result.remaining_identification_requests, Some(493));
    assert_eq!(result.version.as_deref(), Some("2025-01-15 (7.3)"));
}

#[tokio::test]
async fn multipart_parts_stay_index_aligned() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/leaf.png");
        then.status(200)
            .header("Content-Type", "image/png")
            .body(vec![0x89, b'P', b'N', b'G']);
    });
    server.mock(|when, then| {
        when.method(GET).path("/bark.jpg");
        then.status(200)
            .header("Content-Type", "image/jpeg")
            .body(vec![0xFF, 0xD8]);
    });

    // The upstream correlates image N with organ N purely by part
    // position, so each image part must be followed by its organ part.
    let identify = server.mock(|when, then| {
        when.method(POST).path("/v2/identify/all").matches(|req| {
            let body = req.body.clone().unwrap_or_default();
            let body = String::from_utf8_lossy(&body);

            let image_positions: Vec<usize> = body
                .match_indices("name=\"images\"")
                .map(|(i, _)| i)
                .collect();
            let organ_positions: Vec<usize> = body
                .match_indices("name=\"organs\"")
                .map(|(i, _)| i)
                .collect();
            let leaf = match body.find("\r\nleaf\r\n") {
                Some(i) => i,
                None => return false,
            };
            let bark = match body.find("\r\nbark\r\n") {
                Some(i) => i,
                None => return false,
            };

            image_positions.len() == 2
                && organ_positions.len() == 2
                // image part, then its organ, then the next image part
                && image_positions[0] < organ_positions[0]
                && organ_positions[0] < image_positions[1]
                && image_positions[1] < organ_positions[1]
                // organ values in request order
                && leaf < bark
                && body.contains("filename=\"image_0.png\"")
                && body.contains("filename=\"image_1.jpg\"")
        });
        then.status(200).json_body(identify_body());
    });

    let client = client_for(&server);
    let request = IdentificationRequest::new(
        vec![server.url("/leaf.png"), server.url("/bark.jpg")],
        vec![Organ::Leaf, Organ::Bark],
    );

    client.identify(&request).await.unwrap();
    identify.assert();
}

#[tokio::test]
async fn identify_honors_non_default_parameters() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/habit.jpg");
        then.status(200).body(vec![0xFF, 0xD8]);
    });

    let identify = server.mock(|when, then| {
        when.method(POST)
            .path("/v2/identify/k-world-flora")
            .query_param("api-key", "test-key")
            .query_param("lang", "fr")
            .query_param("nb-results", "12");
        then.status(200).json_body(identify_body());
    });

    let client = client_for(&server);
    let mut request =
        IdentificationRequest::new(vec![server.url("/habit.jpg")], vec![Organ::Habit]);
    request.project = "k-world-flora".to_string();
    request.lang = "fr".to_string();
    request.nb_results = 12;

    client.identify(&request).await.unwrap();
    identify.assert();
}

#[tokio::test]
async fn failed_image_fetch_aborts_before_identification() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/good.jpg");
        then.status(200).body(vec![0xFF, 0xD8]);
    });
    server.mock(|when, then| {
        when.method(GET).path("/missing.jpg");
        then.status(404).body("gone");
    });

    let identify = server.mock(|when, then| {
        when.method(POST).path_contains("/v2/identify/");
        then.status(200).json_body(identify_body());
    });

    let client = client_for(&server);
    let request = IdentificationRequest::new(
        vec![server.url("/good.jpg"), server.url("/missing.jpg")],
        vec![Organ::Leaf, Organ::Flower],
    );

    let err = client.identify(&request).await.unwrap_err();
    match err {
        plantnet::Error::ImageFetch { url, reason } => {
            assert!(url.ends_with("/missing.jpg"));
            assert!(reason.contains("404"));
        }
        other => panic!("expected ImageFetch, got {other}"),
    }

    // No partial submission: the identification POST never went out.
    assert_eq!(identify.hits(), 0);
}

#[tokio::test]
async fn upstream_error_carries_status_and_body() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/leaf.jpg");
        then.status(200).body(vec![0xFF, 0xD8]);
    });
    server.mock(|when, then| {
        when.method(POST).path_contains("/v2/identify/");
        then.status(401)
            .header("Content-Type", "application/json")
            .json_body(json!({ "statusCode": 401, "error": "Unauthorized" }));
    });

    let client = client_for(&server);
    let request =
        IdentificationRequest::new(vec![server.url("/leaf.jpg")], vec![Organ::Leaf]);

    let err = client.identify(&request).await.unwrap_err();
    match err {
        plantnet::Error::Api { status, body } => {
            assert_eq!(status, 401);
            assert!(body.contains("Unauthorized"));
        }
        other => panic!("expected Api, got {other}"),
    }
}

#[tokio::test]
async fn list_projects_returns_mapping_verbatim() {
    let server = MockServer::start();

    let projects = server.mock(|when, then| {
        when.method(GET)
            .path("/v2/projects")
            .query_param("api-key", "test-key")
            .query_param("lang", "en");
        then.status(200).json_body(json!({
            "k-world-flora": { "name": "World flora", "languages": ["en", "fr"] },
            "useful": { "name": "Useful plants", "languages": ["en"] }
        }));
    });

    let client = client_for(&server);
    let directory = client.list_projects("en").await.unwrap();

    projects.assert();
    assert_eq!(directory.len(), 2);
    assert_eq!(
        directory["k-world-flora"]["name"],
        json!("World flora")
    );
}

#[tokio::test]
async fn list_projects_surfaces_upstream_failure() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/v2/projects");
        then.status(500).body("internal error");
    });

    let client = client_for(&server);
    let err = client.list_projects("en").await.unwrap_err();
    match err {
        plantnet::Error::Api { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "internal error");
        }
        other => panic!("expected Api, got {other}"),
    }
}
