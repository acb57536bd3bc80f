//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::io::Cursor;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb, Rgba};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use image_gateway::config::GatewayConfig;
use image_gateway::http::HttpServer;
use image_gateway::lifecycle::Shutdown;

/// What the mock origin answers with.
#[derive(Clone)]
pub struct OriginResponse {
    pub status: u16,
    pub body: Vec<u8>,
    /// Advertised length; larger than `body` to simulate a truncated transfer.
    pub content_length: Option<usize>,
    pub delay: Option<Duration>,
}

impl OriginResponse {
    pub fn ok(body: Vec<u8>) -> Self {
        Self {
            status: 200,
            body,
            content_length: None,
            delay: None,
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: b"nope".to_vec(),
            content_length: None,
            delay: None,
        }
    }
}

/// Handle to a running mock origin.
pub struct MockOrigin {
    pub addr: SocketAddr,
    pub hits: Arc<AtomicUsize>,
}

impl MockOrigin {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

fn status_text(status: u16) -> &'static str {
    match status {
        200 => "200 OK",
        403 => "403 Forbidden",
        404 => "404 Not Found",
        500 => "500 Internal Server Error",
        503 => "503 Service Unavailable",
        _ => "200 OK",
    }
}

/// Start a raw-TCP origin serving `response` for every request.
pub async fn start_origin(response: OriginResponse) -> MockOrigin {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let response = response.clone();
                    let counter = counter.clone();
                    tokio::spawn(async move {
                        let mut buf = [0u8; 4096];
                        let _ = socket.read(&mut buf).await;
                        counter.fetch_add(1, Ordering::SeqCst);

                        if let Some(delay) = response.delay {
                            tokio::time::sleep(delay).await;
                        }

                        let head = format!(
                            "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                            status_text(response.status),
                            response.content_length.unwrap_or(response.body.len()),
                        );
                        let _ = socket.write_all(head.as_bytes()).await;
                        let _ = socket.write_all(&response.body).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    MockOrigin { addr, hits }
}

/// A port with nothing listening on it.
pub fn closed_port_addr() -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap()
}

/// A running gateway and the means to stop it.
pub struct Gateway {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub client: reqwest::Client,
}

impl Gateway {
    pub async fn get(&self, query: &str) -> reqwest::Response {
        self.client
            .get(format!("http://{}/img{}", self.addr, query))
            .send()
            .await
            .expect("gateway unreachable")
    }

    pub async fn image(&self, source: &str, size: &str) -> reqwest::Response {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("url", source)
            .append_pair("size", size)
            .finish();
        self.get(&format!("?{}", query)).await
    }

    pub fn stop(&self) {
        self.shutdown.trigger();
    }
}

/// Start the gateway on an ephemeral port.
pub async fn start_gateway(mut config: GatewayConfig) -> Gateway {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    config.listener.port = Some(addr.port());

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config).unwrap();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    let client = reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap();

    Gateway {
        addr,
        shutdown,
        client,
    }
}

/// Encode a `width`×`height` gradient.
pub fn encode_image(format: ImageFormat, width: u32, height: u32) -> Vec<u8> {
    let image = match format {
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(ImageBuffer::from_fn(width, height, |x, y| {
            Rgb([(x * 7) as u8, (y * 11) as u8, 90])
        })),
        _ => DynamicImage::ImageRgba8(ImageBuffer::from_fn(width, height, |x, y| {
            Rgba([(x * 7) as u8, (y * 11) as u8, 90, 255])
        })),
    };
    let mut out = Cursor::new(Vec::new());
    image.write_to(&mut out, format).unwrap();
    out.into_inner()
}

/// Decode a response body and return its format and dimensions.
pub fn inspect(bytes: &[u8]) -> (ImageFormat, u32, u32) {
    let format = image::guess_format(bytes).unwrap();
    let img = image::load_from_memory(bytes).unwrap();
    (format, img.width(), img.height())
}
