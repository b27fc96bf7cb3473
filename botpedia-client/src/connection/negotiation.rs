/*
 * Copyright 2025 Security Union LLC
 *
 * Licensed under either of
 *
 * * Apache License, Version 2.0
 *   (http://www.apache.org/licenses/LICENSE-2.0)
 * * MIT license
 *   (http://opensource.org/licenses/MIT)
 *
 * at your option.
 *
 * Unless you explicitly state otherwise, any contribution intentionally
 * submitted for inclusion in the work by you, as defined in the Apache-2.0
 * license, shall be dual licensed as above, without any additional terms or
 * conditions.
 */

//! SDP offer/answer exchange with the relay over HTTP.

use anyhow::{bail, Context};
use botpedia_types::SdpPayload;
use std::time::Duration;

/// POST the local offer to the relay and return the answer SDP.
///
/// The relay forwards the body verbatim, so the response is either raw
/// SDP text or a JSON `{"sdp": ...}` wrapper; both are accepted here.
pub async fn fetch_answer(
    http: &reqwest::Client,
    relay_url: &str,
    offer_sdp: &str,
    timeout: Duration,
) -> anyhow::Result<String> {
    let url = format!("{}/session", relay_url.trim_end_matches('/'));
    let request = http
        .post(&url)
        .header("Content-Type", "application/sdp")
        .body(offer_sdp.to_string());

    let response = send_with_timeout(request, timeout)
        .await
        .context("relay request failed")?;

    let status = response.status();
    let body = response
        .text()
        .await
        .context("failed to read relay response body")?;
    if !status.is_success() {
        bail!("relay returned {status}: {body}");
    }

    let answer = if body.trim_start().starts_with('{') {
        serde_json::from_str::<SdpPayload>(&body)
            .context("relay returned malformed JSON answer")?
            .sdp
    } else {
        body
    };

    if !answer.starts_with("v=") {
        bail!("relay answer is not SDP");
    }
    Ok(answer)
}

// reqwest's builder timeout is not available on wasm, so the deadline is
// raced against the request future there.
#[cfg(target_arch = "wasm32")]
async fn send_with_timeout(
    request: reqwest::RequestBuilder,
    timeout: Duration,
) -> anyhow::Result<reqwest::Response> {
    use futures::future::{select, Either};
    use gloo_timers::future::TimeoutFuture;

    let deadline = Box::pin(TimeoutFuture::new(timeout.as_millis() as u32));
    match select(Box::pin(request.send()), deadline).await {
        Either::Left((result, _)) => Ok(result?),
        Either::Right(_) => bail!("negotiation timed out after {timeout:?}"),
    }
}

#[cfg(not(target_arch = "wasm32"))]
async fn send_with_timeout(
    request: reqwest::RequestBuilder,
    timeout: Duration,
) -> anyhow::Result<reqwest::Response> {
    Ok(request.timeout(timeout).send().await?)
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::fetch_answer;
    use std::time::Duration;
    use wiremock::matchers::{body_string, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const OFFER: &str = "v=0\r\no=- 1 1 IN IP4 0.0.0.0\r\ns=-\r\n";
    const ANSWER: &str = "v=0\r\no=- 2 2 IN IP4 0.0.0.0\r\ns=-\r\n";

    #[tokio::test]
    async fn raw_sdp_answer_is_returned_as_is() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/session"))
            .and(header("Content-Type", "application/sdp"))
            .and(body_string(OFFER))
            .respond_with(ResponseTemplate::new(200).set_body_string(ANSWER))
            .expect(1)
            .mount(&server)
            .await;

        let answer = fetch_answer(
            &reqwest::Client::new(),
            &server.uri(),
            OFFER,
            Duration::from_secs(5),
        )
        .await
        .unwrap();
        assert_eq!(answer, ANSWER);
    }

    #[tokio::test]
    async fn json_wrapped_answer_is_unwrapped() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/session"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "sdp": ANSWER })),
            )
            .mount(&server)
            .await;

        let answer = fetch_answer(
            &reqwest::Client::new(),
            &server.uri(),
            OFFER,
            Duration::from_secs(5),
        )
        .await
        .unwrap();
        assert_eq!(answer, ANSWER);
    }

    #[tokio::test]
    async fn relay_rejection_surfaces_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/session"))
            .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
            .mount(&server)
            .await;

        let err = fetch_answer(
            &reqwest::Client::new(),
            &server.uri(),
            OFFER,
            Duration::from_secs(5),
        )
        .await
        .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("401"), "got: {message}");
        assert!(message.contains("bad key"), "got: {message}");
    }

    #[tokio::test]
    async fn non_sdp_answer_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/session"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = fetch_answer(
            &reqwest::Client::new(),
            &server.uri(),
            OFFER,
            Duration::from_secs(5),
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains("not SDP"));
    }

    #[tokio::test]
    async fn unreachable_relay_is_an_error() {
        let err = fetch_answer(
            &reqwest::Client::new(),
            "http://127.0.0.1:9",
            OFFER,
            Duration::from_secs(2),
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains("relay request failed"));
    }
}
