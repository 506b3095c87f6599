//! One interactive conversion: submit the form and follow it to the end.

use std::io::Write;

use convert_core::{DisplayState, FormStore, SubmissionController, SubmissionState};
use tracing::debug;

use crate::render::render;

/// Submit the current form and print every display change until it settles.
pub async fn run_submission<W: Write>(
    controller: &SubmissionController,
    form: &FormStore,
    out: &mut W,
) -> std::io::Result<SubmissionState> {
    let mut rx = controller.subscribe();
    let handle = controller.submit_form(form);
    debug!("Following submission {}", handle.id());

    let mut state = rx.borrow_and_update().clone();
    print_state(&state, out)?;

    while state.is_pending() {
        if rx.changed().await.is_err() {
            break;
        }
        state = rx.borrow_and_update().clone();
        print_state(&state, out)?;
    }

    if state == SubmissionState::Idle {
        writeln!(out, "Conversion finished without a result.")?;
    }

    handle.settled().await;
    Ok(state)
}

fn print_state<W: Write>(state: &SubmissionState, out: &mut W) -> std::io::Result<()> {
    for line in render(&DisplayState::from(state)) {
        writeln!(out, "{}", line)?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use convert_core::{
        ConversionApi, ConversionRequest, ConversionResponse, ConvertError, FormField, Result,
    };
    use std::sync::Arc;

    struct FixedApi(fn() -> Result<ConversionResponse>);

    #[async_trait]
    impl ConversionApi for FixedApi {
        async fn convert_engine(&self, _request: &ConversionRequest) -> Result<ConversionResponse> {
            tokio::task::yield_now().await;
            (self.0)()
        }
    }

    fn form() -> FormStore {
        let form = FormStore::new();
        form.set_field(FormField::ModelId, "CompVis/sd");
        form.set_field(FormField::Filename, "a.ckpt");
        form
    }

    #[tokio::test]
    async fn test_prints_busy_then_success() {
        let controller = SubmissionController::new(Arc::new(FixedApi(|| {
            Ok(ConversionResponse::success("/out/a.bin"))
        })));
        let mut out = Vec::new();

        let state = run_submission(&controller, &form(), &mut out).await.unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(matches!(state, SubmissionState::Success { .. }));
        let busy = text.find("Processing...").unwrap();
        let done = text.find("success! output: /out/a.bin").unwrap();
        assert!(busy < done);
    }

    #[tokio::test]
    async fn test_prints_error_message() {
        let controller = SubmissionController::new(Arc::new(FixedApi(|| {
            Err(ConvertError::Other("network error".into()))
        })));
        let mut out = Vec::new();

        let state = run_submission(&controller, &form(), &mut out).await.unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            state,
            SubmissionState::Failed {
                message: "network error".into()
            }
        );
        assert!(text.contains("Something went wrong...\n  network error\n"));
    }

    #[tokio::test]
    async fn test_reports_missing_result() {
        let controller = SubmissionController::new(Arc::new(FixedApi(|| {
            Ok(ConversionResponse {
                status: "pending".into(),
                output: None,
            })
        })));
        let mut out = Vec::new();

        let state = run_submission(&controller, &form(), &mut out).await.unwrap();

        assert_eq!(state, SubmissionState::Idle);
        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with("Conversion finished without a result.\n"));
    }
}
