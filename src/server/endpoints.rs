// server/endpoints.rs

use axum::{
    Json,
    extract::Multipart,
    response::Html,
};
use tracing::debug;

use super::upload::{
    self,
    Upload,
    UploadError,
};
use crate::config::CONFIG;

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
  <title>updrop</title>
</head>
<body>
  <h1>updrop</h1>
  <form action="/upload" method="post" enctype="multipart/form-data">
    <input type="file" name="file">
    <input type="submit" value="Upload">
  </form>
</body>
</html>
"#;

pub async fn index() -> Html<&'static str> { Html(INDEX_HTML) }

/// # Echoes an uploaded text file back as JSON
///
/// Success is `200 {"filename": .., "content": ..}`; every failure is a 4xx
/// with an `{"error": ..}` body. Nothing is stored.
pub async fn upload(multipart: Multipart) -> Result<Json<Upload>, UploadError> {
    let upload = upload::ingest(multipart, CONFIG.max_upload_size).await?;
    debug!(
        "Echoing {} ({} bytes of text)",
        upload.filename,
        upload.content.len()
    );
    Ok(Json(upload))
}

#[cfg(test)]
mod test {
    use axum_test::{
        TestServer,
        multipart::{
            MultipartForm,
            Part,
        },
    };
    use serde_json::{
        Value,
        json,
    };

    use crate::server::core::router;

    fn server() -> TestServer { TestServer::new(router()).unwrap() }

    fn file_form(filename: &str, bytes: &[u8]) -> MultipartForm {
        MultipartForm::new().add_part("file", Part::bytes(bytes.to_vec()).file_name(filename))
    }

    #[tokio::test]
    async fn index_serves_the_upload_form() {
        let res = server().get("/").await;
        res.assert_status_ok();
        assert!(res.text().contains("multipart/form-data"));
    }

    #[tokio::test]
    async fn upload_echoes_filename_and_content() {
        let res = server()
            .post("/upload")
            .multipart(file_form("hello.txt", b"hello"))
            .await;

        res.assert_status_ok();
        res.assert_json(&json!({ "filename": "hello.txt", "content": "hello" }));
    }

    #[tokio::test]
    async fn upload_round_trips_multibyte_text() {
        let text = "héllo wörld ☃";
        let res = server()
            .post("/upload")
            .multipart(file_form("snow.txt", text.as_bytes()))
            .await;

        res.assert_status_ok();
        let body: Value = res.json();
        assert_eq!(body["content"], text);
    }

    #[tokio::test]
    async fn empty_file_with_a_filename_is_fine() {
        let res = server()
            .post("/upload")
            .multipart(file_form("empty.txt", b""))
            .await;

        res.assert_status_ok();
        res.assert_json(&json!({ "filename": "empty.txt", "content": "" }));
    }

    #[tokio::test]
    async fn missing_file_part_is_rejected() {
        let form = MultipartForm::new().add_text("note", "hi");
        let res = server().post("/upload").multipart(form).await;

        res.assert_status_bad_request();
        res.assert_json(&json!({ "error": "No file part" }));
    }

    #[tokio::test]
    async fn text_field_named_file_is_not_a_file_part() {
        // A part without a filename header is a plain form field
        let form = MultipartForm::new().add_text("file", "hello");
        let res = server().post("/upload").multipart(form).await;

        res.assert_status_bad_request();
        res.assert_json(&json!({ "error": "No file part" }));
    }

    #[tokio::test]
    async fn empty_filename_is_rejected() {
        let res = server()
            .post("/upload")
            .multipart(file_form("", b""))
            .await;

        res.assert_status_bad_request();
        res.assert_json(&json!({ "error": "No selected file" }));
    }

    #[tokio::test]
    async fn binary_payload_is_rejected_not_crashed() {
        let res = server()
            .post("/upload")
            .multipart(file_form("bin.dat", &[0xFF, 0xFE]))
            .await;

        res.assert_status(axum::http::StatusCode::UNSUPPORTED_MEDIA_TYPE);
        let body: Value = res.json();
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn oversized_payload_is_rejected() {
        let max = crate::config::CONFIG.max_upload_size as usize;
        let res = server()
            .post("/upload")
            .multipart(file_form("big.txt", &vec![b'a'; max + 1]))
            .await;

        res.assert_status(axum::http::StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn identical_uploads_yield_identical_responses() {
        let server = server();
        let first = server
            .post("/upload")
            .multipart(file_form("same.txt", b"same old"))
            .await;
        let second = server
            .post("/upload")
            .multipart(file_form("same.txt", b"same old"))
            .await;

        first.assert_status_ok();
        second.assert_status_ok();
        assert_eq!(first.text(), second.text());
    }
}
