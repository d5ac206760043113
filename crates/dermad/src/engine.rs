use derma_core::{AnalysisResult, KnowledgeBase, SkinClassifier};
use image::DynamicImage;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("classifier error: {0}")]
    Classifier(#[from] derma_core::classifier::ClassifierError),
    #[error("analysis failed: {0}")]
    Analyze(#[from] derma_core::AnalyzeError),
    #[error("engine thread exited")]
    ChannelClosed,
    #[error("failed to spawn engine thread: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Messages sent from HTTP handlers to the engine thread.
enum EngineRequest {
    Analyze {
        image: DynamicImage,
        reply: oneshot::Sender<Result<AnalysisResult, EngineError>>,
    },
}

/// Clone-safe handle to the engine thread.
#[derive(Clone)]
pub struct EngineHandle {
    tx: mpsc::Sender<EngineRequest>,
}

impl EngineHandle {
    /// Request analysis of a decoded image. Resolves once the engine thread
    /// has run the forward pass and built the routine.
    pub async fn analyze(&self, image: DynamicImage) -> Result<AnalysisResult, EngineError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(EngineRequest::Analyze {
                image,
                reply: reply_tx,
            })
            .await
            .map_err(|_| EngineError::ChannelClosed)?;
        reply_rx.await.map_err(|_| EngineError::ChannelClosed)?
    }
}

/// Spawn the analysis engine on a dedicated OS thread.
///
/// Loads the ONNX model and builds the knowledge base synchronously, then
/// enters a request loop. Fails fast at startup if the model is unavailable:
/// a daemon without a classifier must not serve.
///
/// The single thread serializes forward passes; concurrent HTTP requests
/// queue on the channel and are answered in arrival order.
pub fn spawn_engine(model_path: &str, queue_depth: usize) -> Result<EngineHandle, EngineError> {
    let mut classifier = SkinClassifier::load(model_path)?;
    tracing::info!(path = model_path, "skin classifier loaded");

    let kb = KnowledgeBase::builtin();
    tracing::info!(
        products = kb.catalog().len(),
        "knowledge base initialized"
    );

    let (tx, mut rx) = mpsc::channel::<EngineRequest>(queue_depth);

    std::thread::Builder::new()
        .name("derma-engine".into())
        .spawn(move || {
            tracing::info!("engine thread started");
            while let Some(req) = rx.blocking_recv() {
                match req {
                    EngineRequest::Analyze { image, reply } => {
                        let result = derma_core::analyze(&mut classifier, &kb, &image)
                            .map_err(EngineError::from);
                        if let Err(err) = &result {
                            tracing::warn!(error = %err, "analysis failed");
                        }
                        let _ = reply.send(result);
                    }
                }
            }
            tracing::info!("engine thread exiting");
        })?;

    Ok(EngineHandle { tx })
}
