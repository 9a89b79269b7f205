use super::{Archive, UploadOutcome, UploadReceipt};
use crate::types::{DeployError, DeployResult, PresignedUrl};
use reqwest::header::{CONTENT_TYPE, ETAG};
use reqwest::{Client, Response, StatusCode};
use tracing::{info, warn};

pub const ZIP_CONTENT_TYPE: &str = "application/zip";

/// Sends an archive to a pre-signed URL with a single PUT.
///
/// No timeout or retry is configured; the client's transport defaults apply.
#[derive(Debug, Clone)]
pub struct Uploader {
    client: Client,
}

impl Uploader {
    pub fn new() -> Self {
        Self::with_client(Client::new())
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    pub async fn upload(&self, url: &PresignedUrl, archive: &Archive) -> DeployResult<UploadOutcome> {
        info!(
            target_url = %url,
            archive = %archive.path().display(),
            bytes = archive.len(),
            "Uploading archive"
        );

        // Malformed URLs surface here too, as a builder error from send()
        let response = self
            .client
            .put(url.expose())
            .header(CONTENT_TYPE, ZIP_CONTENT_TYPE)
            .body(archive.bytes().clone())
            .send()
            .await
            .map_err(|e| DeployError::Transport(e.without_url()))?;

        let status = response.status();
        info!(status = status.as_u16(), "Upload response received");

        if status != StatusCode::OK {
            let body = read_body(response).await;
            warn!(status = status.as_u16(), body = %body, "Upload rejected");
            return Ok(UploadOutcome::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let etag = response
            .headers()
            .get(ETAG)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = read_body(response).await;

        Ok(UploadOutcome::Accepted(UploadReceipt::new(
            status.as_u16(),
            archive.len(),
            etag,
            body,
        )))
    }
}

// A failed body read is kept in the text so the diagnostic still says why
async fn read_body(response: Response) -> String {
    match response.text().await {
        Ok(body) => body,
        Err(e) => format!("<unreadable body: {}>", e.without_url()),
    }
}

impl Default for Uploader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use tempfile::TempDir;

    async fn write_archive(dir: &TempDir, name: &str, contents: &[u8]) -> Archive {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        Archive::read(&path).await.unwrap()
    }

    #[tokio::test]
    async fn test_put_sends_zip_body_and_header() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", "/artifacts.zip")
            .match_header("content-type", ZIP_CONTENT_TYPE)
            .match_header("content-length", "18")
            .match_body("site-archive-bytes")
            .with_status(200)
            .with_header("etag", "\"d41d8cd98f00b204e9800998ecf8427e\"")
            .create_async()
            .await;

        let temp_dir = TempDir::new().unwrap();
        let archive = write_archive(&temp_dir, "a.zip", b"site-archive-bytes").await;
        let url = PresignedUrl::new(format!("{}/artifacts.zip", server.url()));

        let outcome = Uploader::new().upload(&url, &archive).await.unwrap();

        mock.assert_async().await;
        match outcome {
            UploadOutcome::Accepted(receipt) => {
                assert_eq!(receipt.status(), 200);
                assert_eq!(receipt.bytes_sent(), 18);
                assert_eq!(receipt.etag(), Some("\"d41d8cd98f00b204e9800998ecf8427e\""));
            }
            other => panic!("expected accepted upload, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_signature_query_is_sent() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", "/app/master/0000000001/DEPLOY/artifacts.zip")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("X-Amz-Expires".into(), "10800".into()),
                Matcher::UrlEncoded("X-Amz-Signature".into(), "abc123".into()),
            ]))
            .with_status(200)
            .create_async()
            .await;

        let temp_dir = TempDir::new().unwrap();
        let archive = write_archive(&temp_dir, "a.zip", b"zip").await;
        let url = PresignedUrl::new(format!(
            "{}/app/master/0000000001/DEPLOY/artifacts.zip?X-Amz-Expires=10800&X-Amz-Signature=abc123",
            server.url()
        ));

        let outcome = Uploader::new().upload(&url, &archive).await.unwrap();

        mock.assert_async().await;
        assert!(outcome.is_accepted());
    }

    #[tokio::test]
    async fn test_forbidden_is_rejected_with_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", "/artifacts.zip")
            .with_status(403)
            .with_body("Forbidden")
            .create_async()
            .await;

        let temp_dir = TempDir::new().unwrap();
        let archive = write_archive(&temp_dir, "a.zip", b"zip").await;
        let url = PresignedUrl::new(format!("{}/artifacts.zip", server.url()));

        let outcome = Uploader::new().upload(&url, &archive).await.unwrap();

        mock.assert_async().await;
        assert_eq!(
            outcome,
            UploadOutcome::Rejected {
                status: 403,
                body: "Forbidden".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_other_success_codes_are_rejected() {
        // Only an exact 200 counts
        for code in [201, 202, 204] {
            let mut server = mockito::Server::new_async().await;
            let _mock = server
                .mock("PUT", "/artifacts.zip")
                .with_status(code)
                .create_async()
                .await;

            let temp_dir = TempDir::new().unwrap();
            let archive = write_archive(&temp_dir, "a.zip", b"zip").await;
            let url = PresignedUrl::new(format!("{}/artifacts.zip", server.url()));

            let outcome = Uploader::new().upload(&url, &archive).await.unwrap();
            assert!(!outcome.is_accepted(), "status {} must not be accepted", code);
            assert_eq!(outcome.status(), code as u16);
        }
    }

    #[tokio::test]
    async fn test_connection_failure_is_transport_error() {
        let temp_dir = TempDir::new().unwrap();
        let archive = write_archive(&temp_dir, "a.zip", b"zip").await;
        // Port 1 is never listening
        let url = PresignedUrl::new("http://127.0.0.1:1/artifacts.zip?X-Amz-Signature=secret");

        let err = Uploader::new().upload(&url, &archive).await.unwrap_err();

        assert!(matches!(err, DeployError::Transport(_)));
        let rendered = format!("{:?}", err);
        assert!(!rendered.contains("secret"));
    }

    #[tokio::test]
    async fn test_malformed_url_is_transport_error() {
        let temp_dir = TempDir::new().unwrap();
        let archive = write_archive(&temp_dir, "a.zip", b"zip").await;
        let url = PresignedUrl::new("not a url");

        let err = Uploader::new().upload(&url, &archive).await.unwrap_err();
        assert!(matches!(err, DeployError::Transport(_)));
    }

    #[tokio::test]
    async fn test_truncated_rejection_body_is_reported() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        // Announces 100 bytes of body, sends 9, then closes
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.ends_with(b"zip") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            socket
                .write_all(b"HTTP/1.1 403 Forbidden\r\nContent-Length: 100\r\n\r\nForbidden")
                .await
                .unwrap();
            socket.shutdown().await.unwrap();
        });

        let temp_dir = TempDir::new().unwrap();
        let archive = write_archive(&temp_dir, "a.zip", b"zip").await;
        let url = PresignedUrl::new(format!("http://{}/artifacts.zip", addr));

        let outcome = Uploader::new().upload(&url, &archive).await.unwrap();
        server.await.unwrap();

        match outcome {
            UploadOutcome::Rejected { status, body } => {
                assert_eq!(status, 403);
                assert!(body.starts_with("<unreadable body:"), "body: {}", body);
            }
            other => panic!("expected rejection, got {:?}", other),
        }
    }
}
