//! Bounded playlist download.

use std::time::Duration;

use bytes::BytesMut;
use reqwest::Client;

use super::{PlaylistError, PlaylistResult};

/// Hard deadline for the whole fetch, body read included. Not retried.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// Playlists are tiny; anything beyond this is cut off.
pub const MAX_PLAYLIST_BYTES: usize = 64 * 1024;

/// Downloads playlist text from `url`, reading at most
/// [`MAX_PLAYLIST_BYTES`] within [`FETCH_TIMEOUT`].
pub(crate) async fn fetch_playlist(client: &Client, url: &str) -> PlaylistResult<String> {
    let download = async {
        let mut response = client.get(url).send().await?;
        let mut body = BytesMut::new();
        while let Some(chunk) = response.chunk().await? {
            let remaining = MAX_PLAYLIST_BYTES - body.len();
            if chunk.len() >= remaining {
                body.extend_from_slice(&chunk[..remaining]);
                break;
            }
            body.extend_from_slice(&chunk);
        }
        Ok::<_, reqwest::Error>(body.freeze())
    };

    let body = match tokio::time::timeout(FETCH_TIMEOUT, download).await {
        Ok(Ok(body)) => body,
        Ok(Err(err)) => {
            return Err(PlaylistError::Fetch {
                url: url.to_string(),
                reason: err.to_string(),
            });
        }
        Err(_) => {
            return Err(PlaylistError::Fetch {
                url: url.to_string(),
                reason: format!("timeout after {}s", FETCH_TIMEOUT.as_secs()),
            });
        }
    };

    Ok(String::from_utf8_lossy(&body).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serves one HTTP response with the given body on an ephemeral port.
    async fn serve_once(body: String) -> std::net::SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 1024];
            let _ = socket.read(&mut request).await;
            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
        });
        addr
    }

    #[tokio::test]
    async fn fetch_returns_body_text() {
        let addr = serve_once("#EXTM3U\nhttp://radio.example/a\n".to_string()).await;
        let client = Client::new();

        let data = fetch_playlist(&client, &format!("http://{addr}/list.m3u"))
            .await
            .unwrap();
        assert!(data.starts_with("#EXTM3U"));
    }

    #[tokio::test]
    async fn fetch_caps_body_at_limit() {
        let addr = serve_once("x".repeat(MAX_PLAYLIST_BYTES * 2)).await;
        let client = Client::new();

        let data = fetch_playlist(&client, &format!("http://{addr}/list.m3u"))
            .await
            .unwrap();
        assert_eq!(data.len(), MAX_PLAYLIST_BYTES);
    }

    #[tokio::test]
    async fn fetch_failure_names_the_url() {
        let client = Client::new();
        // Port 1 refuses connections immediately.
        let err = fetch_playlist(&client, "http://127.0.0.1:1/stations.pls")
            .await
            .unwrap_err();
        assert!(matches!(err, PlaylistError::Fetch { .. }));
        assert!(err.to_string().contains("stations.pls"));
    }
}
