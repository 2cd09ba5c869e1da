//! Submission contract tests against a local mock endpoint

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use voicedrop::application::ports::{UploadError, Uploader};
use voicedrop::domain::upload::AudioUpload;
use voicedrop::infrastructure::HttpUploader;

fn sample_upload() -> AudioUpload {
    // Minimal RIFF header plus a few sample bytes; the endpoint only
    // sees opaque bytes
    let mut data = b"RIFF\x00\x00\x00\x00WAVE".to_vec();
    data.extend_from_slice(&[1, 2, 3, 4, 5, 6]);
    AudioUpload::new(data)
}

#[tokio::test]
async fn upload_sends_exactly_one_file_field() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/process_audio"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let uploader = HttpUploader::new(&format!("{}/process_audio", server.uri())).unwrap();
    uploader.upload(&sample_upload()).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);

    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains(r#"name="audio_data""#));
    assert!(body.contains(r#"filename="recording.wav""#));
    assert!(body.contains("Content-Type: audio/wav"));

    // One field in the whole form, no strays
    assert_eq!(body.matches("Content-Disposition: form-data").count(), 1);
}

#[tokio::test]
async fn upload_body_carries_audio_bytes() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let upload = sample_upload();
    let uploader = HttpUploader::new(&server.uri()).unwrap();
    uploader.upload(&upload).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let body = &requests[0].body;
    assert!(body
        .windows(upload.data().len())
        .any(|window| window == upload.data()));
}

#[tokio::test]
async fn upload_returns_receipt_on_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let uploader = HttpUploader::new(&server.uri()).unwrap();
    let receipt = uploader.upload(&sample_upload()).await.unwrap();

    assert_eq!(receipt.status, 200);
    assert!(receipt.final_url.starts_with(&server.uri()));
}

#[tokio::test]
async fn upload_surfaces_rejection_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": "No audio file"
            })),
        )
        .mount(&server)
        .await;

    let uploader = HttpUploader::new(&server.uri()).unwrap();
    let err = uploader.upload(&sample_upload()).await.unwrap_err();

    match err {
        UploadError::ServerError { status, message } => {
            assert_eq!(status, 400);
            assert!(message.contains("No audio file"));
        }
        other => panic!("Expected ServerError, got {:?}", other),
    }
}

#[tokio::test]
async fn upload_surfaces_server_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let uploader = HttpUploader::new(&server.uri()).unwrap();
    let err = uploader.upload(&sample_upload()).await.unwrap_err();

    match err {
        UploadError::ServerError { status, message } => {
            assert_eq!(status, 500);
            assert!(message.contains("boom"));
        }
        other => panic!("Expected ServerError, got {:?}", other),
    }
}

#[tokio::test]
async fn upload_follows_redirect_to_final_url() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/process_audio"))
        .respond_with(
            ResponseTemplate::new(303).insert_header("Location", format!("{}/done", server.uri())),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/done"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let uploader = HttpUploader::new(&format!("{}/process_audio", server.uri())).unwrap();
    let receipt = uploader.upload(&sample_upload()).await.unwrap();

    assert_eq!(receipt.status, 200);
    assert!(receipt.final_url.ends_with("/done"));
}

#[tokio::test]
async fn upload_reports_timeout_on_slow_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_delay(std::time::Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let uploader =
        HttpUploader::with_timeout(&server.uri(), std::time::Duration::from_millis(50)).unwrap();
    let err = uploader.upload(&sample_upload()).await.unwrap_err();

    assert!(matches!(err, UploadError::Timeout));
}

#[tokio::test]
async fn upload_reports_connection_failure() {
    // Port 1 is never listening
    let uploader = HttpUploader::new("http://127.0.0.1:1/process_audio").unwrap();
    let err = uploader.upload(&sample_upload()).await.unwrap_err();

    assert!(matches!(err, UploadError::ConnectionFailed));
}

#[test]
fn invalid_endpoint_is_rejected_up_front() {
    assert!(matches!(
        HttpUploader::new("not a url"),
        Err(UploadError::InvalidEndpoint(_))
    ));
}
