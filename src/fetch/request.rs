use log::debug;
use reqwest::blocking::Client;

use crate::error::{Context, FxError};

use super::FetchResult;

/// The three query shapes the upstream rate API exposes.
#[derive(Debug, Clone, Copy)]
pub enum Endpoint<'a> {
    Latest,
    OnDate(&'a str),
    History { start_at: &'a str, end_at: &'a str },
}

/// Builds the request URL for one source currency.
///
/// `symbols` is omitted entirely when no targets are configured; the API then
/// returns every target it quotes for the base.
pub fn build_url(
    base_url: &str,
    endpoint: Endpoint<'_>,
    source: &str,
    targets: Option<&[String]>,
) -> String {
    let path = match endpoint {
        Endpoint::Latest => "latest".to_string(),
        Endpoint::OnDate(date) => date.to_string(),
        Endpoint::History { .. } => "history".to_string(),
    };

    let mut query = format!("base={source}");
    if let Some(targets) = targets {
        query.push_str("&symbols=");
        query.push_str(&targets.join(","));
    }
    if let Endpoint::History { start_at, end_at } = endpoint {
        query.push_str("&start_at=");
        query.push_str(start_at);
        query.push_str("&end_at=");
        query.push_str(end_at);
    }

    format!("{base_url}/{path}?{query}")
}

/// Issues one blocking GET and returns the response body.
///
/// Non-2xx statuses surface as an upstream error carrying the status and the
/// body for diagnostics.
pub fn send_get(client: &Client, url: &str) -> FetchResult<String> {
    debug!("GET {url}");

    let response = client
        .get(url)
        .send()
        .with_context(|| format!("Rate request failed for {url}"))?;

    let status = response.status();
    let body = response
        .text()
        .with_context(|| format!("Failed to read rate response body for {url}"))?;

    if !status.is_success() {
        return Err(FxError::Upstream { status, body });
    }

    Ok(body)
}

#[cfg(test)]
mod tests {
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    use super::*;

    const BASE: &str = "https://api.exchangeratesapi.io";

    /// Answers exactly one request on a local port with a canned response.
    fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind local listener");
        let addr = listener.local_addr().expect("local addr");

        thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut buf = [0u8; 1024];
                let _ = stream.read(&mut buf);
                let response = format!(
                    "HTTP/1.1 {status_line}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = stream.write_all(response.as_bytes());
            }
        });

        format!("http://{addr}")
    }

    #[test]
    fn latest_url_without_targets() {
        let url = build_url(BASE, Endpoint::Latest, "GBP", None);
        assert_eq!(url, "https://api.exchangeratesapi.io/latest?base=GBP");
    }

    #[test]
    fn latest_url_joins_targets_with_commas() {
        let targets = vec!["CAD".to_string(), "USD".to_string()];
        let url = build_url(BASE, Endpoint::Latest, "GBP", Some(&targets));
        assert_eq!(
            url,
            "https://api.exchangeratesapi.io/latest?base=GBP&symbols=CAD,USD"
        );
    }

    #[test]
    fn date_url_uses_date_as_path() {
        let url = build_url(BASE, Endpoint::OnDate("2020-03-13"), "USD", None);
        assert_eq!(url, "https://api.exchangeratesapi.io/2020-03-13?base=USD");
    }

    #[test]
    fn non_success_status_surfaces_upstream_error_with_body() {
        let _ = env_logger::builder().is_test(true).try_init();
        let base = serve_once("404 Not Found", "base currency not found");
        let client = Client::new();

        let err =
            send_get(&client, &format!("{base}/latest?base=XXX")).expect_err("404 must fail");
        match err {
            FxError::Upstream { status, body } => {
                assert_eq!(status.as_u16(), 404);
                assert_eq!(body, "base currency not found");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn success_status_returns_body() {
        let _ = env_logger::builder().is_test(true).try_init();
        let base = serve_once("200 OK", r#"{"base":"GBP"}"#);
        let client = Client::new();

        let body = send_get(&client, &format!("{base}/latest?base=GBP")).expect("200 response");
        assert_eq!(body, r#"{"base":"GBP"}"#);
    }

    #[test]
    fn history_url_carries_range_bounds() {
        let targets = vec!["EUR".to_string()];
        let url = build_url(
            BASE,
            Endpoint::History {
                start_at: "2020-03-14",
                end_at: "2020-03-17",
            },
            "USD",
            Some(&targets),
        );
        assert_eq!(
            url,
            "https://api.exchangeratesapi.io/history?base=USD&symbols=EUR&start_at=2020-03-14&end_at=2020-03-17"
        );
    }
}
