//! Save-endpoint calls.
//!
//! Client-side (csr): real HTTP via `gloo-net`, raced against a
//! `gloo-timers` timeout that aborts the fetch.
//! Native builds: a stub that reports a network failure, since the endpoint
//! is only reachable from the browser.
//!
//! ERROR HANDLING
//! ==============
//! Every path returns a [`SaveOutcome`]; transport errors become
//! [`SaveFailure`] values so the cell has one failure path.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::time::Duration;

use slots::{AssignRequest, SaveFailure, SaveOutcome};

use crate::page::config::PageConfig;

fn network_failure(message: impl std::fmt::Display) -> SaveOutcome {
    SaveOutcome::Failure(SaveFailure::Network(message.to_string()))
}

#[cfg_attr(not(feature = "csr"), allow(dead_code))]
fn timed_out(after: Duration) -> SaveOutcome {
    SaveOutcome::Failure(SaveFailure::TimedOut(after))
}

/// POST `request` to the page's save endpoint and decode the reply.
///
/// A request still pending after `config.save_timeout` is aborted and
/// reported as [`SaveFailure::TimedOut`].
pub async fn save_assignment(config: &PageConfig, request: &AssignRequest) -> SaveOutcome {
    #[cfg(feature = "csr")]
    {
        use futures::future::{Either, select};

        let controller = web_sys::AbortController::new().ok();
        let signal = controller.as_ref().map(web_sys::AbortController::signal);
        let send = post_assignment(config, request, signal.as_ref());
        let timeout = gloo_timers::future::sleep(config.save_timeout);

        match select(Box::pin(send), Box::pin(timeout)).await {
            Either::Left((outcome, _)) => outcome,
            Either::Right(((), _)) => {
                if let Some(controller) = controller {
                    controller.abort();
                }
                log::warn!(
                    "save for slot {} student {} timed out after {:?}",
                    request.slot_id,
                    request.student_id,
                    config.save_timeout
                );
                timed_out(config.save_timeout)
            }
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (config, request);
        network_failure("not available outside the browser")
    }
}

#[cfg(feature = "csr")]
async fn post_assignment(
    config: &PageConfig,
    request: &AssignRequest,
    signal: Option<&web_sys::AbortSignal>,
) -> SaveOutcome {
    let built = gloo_net::http::Request::post(&config.assign_url)
        .mode(web_sys::RequestMode::Cors)
        .header(slots::CSRF_HEADER, &config.csrf_token)
        .abort_signal(signal)
        .json(request);
    let req = match built {
        Ok(req) => req,
        Err(e) => return network_failure(e),
    };
    let resp = match req.send().await {
        Ok(resp) => resp,
        Err(e) => return network_failure(e),
    };
    let status = resp.status();
    match resp.text().await {
        Ok(body) => SaveOutcome::from_response(request, status, &body),
        Err(e) => network_failure(e),
    }
}
