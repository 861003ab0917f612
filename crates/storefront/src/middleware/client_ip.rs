use axum::http::HeaderMap;
use std::net::SocketAddr;

/// Address VNPay records for the buyer: the first `X-Forwarded-For` hop when
/// behind a proxy, otherwise the peer address.
pub fn client_ip(headers: &HeaderMap, peer: SocketAddr) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
        .map(str::to_string)
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|value| value.to_str().ok())
                .map(|ip| ip.trim().to_string())
                .filter(|ip| !ip.is_empty())
        })
        .unwrap_or_else(|| peer.ip().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn peer() -> SocketAddr {
        "10.0.0.7:52814".parse().unwrap()
    }

    #[test]
    fn prefers_first_forwarded_hop() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.9, 10.0.0.1"),
        );

        assert_eq!(client_ip(&headers, peer()), "203.0.113.9");
    }

    #[test]
    fn uses_peer_without_proxy_headers() {
        assert_eq!(client_ip(&HeaderMap::new(), peer()), "10.0.0.7");
    }
}
