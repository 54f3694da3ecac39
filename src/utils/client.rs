use axum::{
    extract::{ConnectInfo, FromRequestParts},
    http::request::Parts,
};
use std::convert::Infallible;
use std::fmt;
use std::net::SocketAddr;

/// Best guess at the caller's address.
///
/// Prefers the first `X-Forwarded-For` hop, then the socket peer address.
/// Unix socket connections carry no peer address and report `unknown`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientAddr(pub String);

impl fmt::Display for ClientAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<S> FromRequestParts<S> for ClientAddr
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let forwarded = parts
            .headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty());

        if let Some(ip) = forwarded {
            return Ok(ClientAddr(ip.to_string()));
        }

        let addr = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip().to_string())
            .unwrap_or_else(|| "unknown".to_string());

        Ok(ClientAddr(addr))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(request: Request<()>) -> ClientAddr {
        let (mut parts, _) = request.into_parts();
        ClientAddr::from_request_parts(&mut parts, &()).await.unwrap()
    }

    #[tokio::test]
    async fn test_prefers_forwarded_for() {
        let mut request = Request::builder()
            .header("x-forwarded-for", "203.0.113.7, 10.0.0.1")
            .body(())
            .unwrap();
        request
            .extensions_mut()
            .insert(ConnectInfo("127.0.0.1:9000".parse::<SocketAddr>().unwrap()));

        assert_eq!(extract(request).await, ClientAddr("203.0.113.7".to_string()));
    }

    #[tokio::test]
    async fn test_falls_back_to_peer_address() {
        let mut request = Request::builder().body(()).unwrap();
        request
            .extensions_mut()
            .insert(ConnectInfo("192.168.1.20:41000".parse::<SocketAddr>().unwrap()));

        assert_eq!(extract(request).await, ClientAddr("192.168.1.20".to_string()));
    }

    #[tokio::test]
    async fn test_unknown_without_connect_info() {
        let request = Request::builder().body(()).unwrap();
        assert_eq!(extract(request).await.to_string(), "unknown");
    }
}
