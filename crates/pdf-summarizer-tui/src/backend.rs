use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use pdf_summarizer_core::{InferenceBackend, ModelChoice, ModelManager, SummaryRequest, summarize};

use crate::tui_event::{BackendCommand, BackendEvent};

/// Run one summarize call and report the result as a single event.
pub async fn run_summary(
    request: SummaryRequest,
    inference: Arc<dyn InferenceBackend>,
    tx: mpsc::UnboundedSender<BackendEvent>,
) {
    tracing::info!(
        model = request.model.id(),
        sentences = request.sentence_count,
        chars = request.text.len(),
        "summarize started"
    );
    let summary = summarize(inference.as_ref(), &request).await;
    let _ = tx.send(BackendEvent::SummaryComplete { summary });
}

/// List installed models and report whether `model` is among them.
pub async fn check_model(
    model: ModelChoice,
    manager: ModelManager,
    tx: mpsc::UnboundedSender<BackendEvent>,
) {
    let result = manager
        .is_installed(model.id())
        .await
        .map_err(|e| e.to_string());

    if let Err(ref error) = result {
        tracing::warn!(model = model.id(), error = %error, "model check failed");
    }
    let _ = tx.send(BackendEvent::ModelChecked { model, result });
}

/// Download `model` and report the outcome.
pub async fn pull_model(
    model: ModelChoice,
    manager: ModelManager,
    tx: mpsc::UnboundedSender<BackendEvent>,
) {
    let result = manager.pull(model.id()).await.map_err(|e| e.to_string());

    match &result {
        Ok(()) => tracing::info!(model = model.id(), "model pulled"),
        Err(error) => tracing::warn!(model = model.id(), error = %error, "model pull failed"),
    }
    let _ = tx.send(BackendEvent::PullComplete { model, result });
}

/// Spawn the listener that turns [`BackendCommand`]s into worker tasks.
///
/// Each command runs as its own task so the listener keeps receiving.
/// `shutdown` only stops the listener; in-flight tasks end with the runtime,
/// which kills any model subprocess they own.
pub fn spawn_listener(
    mut cmd_rx: mpsc::UnboundedReceiver<BackendCommand>,
    event_tx: mpsc::UnboundedSender<BackendEvent>,
    inference: Arc<dyn InferenceBackend>,
    manager: ModelManager,
    shutdown: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            let cmd = tokio::select! {
                _ = shutdown.cancelled() => break,
                cmd = cmd_rx.recv() => match cmd {
                    Some(cmd) => cmd,
                    None => break,
                },
            };

            let tx = event_tx.clone();
            match cmd {
                BackendCommand::Summarize { request } => {
                    let inference = Arc::clone(&inference);
                    tokio::spawn(run_summary(request, inference, tx));
                }
                BackendCommand::CheckModel { model } => {
                    tokio::spawn(check_model(model, manager.clone(), tx));
                }
                BackendCommand::PullModel { model } => {
                    tokio::spawn(pull_model(model, manager.clone(), tx));
                }
            }
        }
        tracing::debug!("backend listener stopped");
    })
}

#[cfg(test)]
mod tests {
    use std::future::Future;
    use std::pin::Pin;

    use pdf_summarizer_core::{InferenceError, SUMMARY_SENTINEL};

    use super::*;

    struct CannedBackend(Option<&'static str>);

    impl InferenceBackend for CannedBackend {
        fn name(&self) -> &str {
            "canned"
        }

        fn generate<'a>(
            &'a self,
            _model: &'a str,
            _prompt: &'a str,
        ) -> Pin<Box<dyn Future<Output = Result<String, InferenceError>> + Send + 'a>> {
            let out = self
                .0
                .map(str::to_string)
                .ok_or(InferenceError::MissingResponse);
            Box::pin(async move { out })
        }
    }

    fn request() -> SummaryRequest {
        SummaryRequest {
            text: "Some text.".into(),
            sentence_count: 1,
            model: ModelChoice::Llama3,
        }
    }

    #[tokio::test]
    async fn summary_completion_is_sent_exactly_once() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        run_summary(request(), Arc::new(CannedBackend(Some("Short."))), tx).await;

        assert_eq!(
            rx.recv().await,
            Some(BackendEvent::SummaryComplete {
                summary: "Short.".into()
            })
        );
        // Sender was moved into run_summary and dropped: no second event.
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test]
    async fn failed_summary_delivers_sentinel() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        run_summary(request(), Arc::new(CannedBackend(None)), tx).await;

        assert_eq!(
            rx.recv().await,
            Some(BackendEvent::SummaryComplete {
                summary: SUMMARY_SENTINEL.into()
            })
        );
    }

    #[tokio::test]
    async fn missing_cli_reports_check_error() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let manager = ModelManager::new("pdf-summarizer-no-such-binary");
        check_model(ModelChoice::Gemma, manager, tx).await;

        match rx.recv().await {
            Some(BackendEvent::ModelChecked { model, result }) => {
                assert_eq!(model, ModelChoice::Gemma);
                assert!(result.is_err());
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn listener_dispatches_summarize_command() {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (event_tx, mut event_rx) = mpsc::unbounded_channel();
        let shutdown = CancellationToken::new();
        let handle = spawn_listener(
            cmd_rx,
            event_tx,
            Arc::new(CannedBackend(Some("Done."))),
            ModelManager::default(),
            shutdown.clone(),
        );

        cmd_tx
            .send(BackendCommand::Summarize { request: request() })
            .unwrap();

        assert_eq!(
            event_rx.recv().await,
            Some(BackendEvent::SummaryComplete {
                summary: "Done.".into()
            })
        );

        shutdown.cancel();
        handle.await.unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn runtime_shutdown_does_not_wait_for_a_pull() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let (tx, _rx) = mpsc::unbounded_channel();
        let manager = ModelManager::new("sh").with_prefix_args(vec!["-c".into(), "sleep 5".into()]);
        rt.spawn(pull_model(ModelChoice::Mistral, manager, tx));
        // Let the child start before tearing the runtime down.
        std::thread::sleep(std::time::Duration::from_millis(200));

        let started = std::time::Instant::now();
        drop(rt);
        let waited = started.elapsed();
        assert!(
            waited < std::time::Duration::from_secs(1),
            "runtime drop waited {waited:?}"
        );
    }
}
