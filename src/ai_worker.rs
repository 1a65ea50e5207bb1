use crate::ai::{AiGateway, Credentials};
use crate::logger;
use crate::models::{AiOutput, AiRequest, AiResponse, AiTask};
use crossbeam_channel::{Receiver, Sender};
use std::thread;

/// Spawn the worker thread that serves AI requests one at a time. The UI
/// side enforces single-flight; the worker just drains its queue in order
/// and answers every request with exactly one response.
pub fn spawn_ai_worker(
    credentials: Credentials,
    response_tx: Sender<AiResponse>,
    request_rx: Receiver<AiRequest>,
) -> thread::JoinHandle<()> {
    thread::Builder::new()
        .name("studysheet::ai_worker".to_string())
        .spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(e) => {
                    logger::log_error(&format!("Worker failed to start runtime: {}", e));
                    return;
                }
            };

            loop {
                match request_rx.recv() {
                    Ok(AiRequest::Process { task, content }) => {
                        logger::log(&format!("Worker received task: {}", task.label()));

                        let gateway = match AiGateway::new(&credentials) {
                            Ok(gateway) => gateway,
                            Err(e) => {
                                let _ = response_tx.send(AiResponse::Failed {
                                    task,
                                    error: e.to_string(),
                                });
                                continue;
                            }
                        };

                        let result = runtime.block_on(run_task(&gateway, task, &content));

                        match result {
                            Ok(output) => {
                                logger::log(&format!("Worker completed: {}", task.label()));
                                let _ = response_tx.send(AiResponse::Completed { task, output });
                            }
                            Err(e) => {
                                logger::log_error(&format!(
                                    "Worker task {} failed: {}",
                                    task.label(),
                                    e
                                ));
                                let _ = response_tx.send(AiResponse::Failed {
                                    task,
                                    error: e.to_string(),
                                });
                            }
                        }
                    }
                    Err(_) => {
                        // Channel disconnected, exit worker
                        logger::log("Worker channel disconnected, exiting");
                        break;
                    }
                }
            }
        })
        .expect("Failed to spawn AI worker thread")
}

async fn run_task<C: crate::ai::Completion>(
    gateway: &AiGateway<C>,
    task: AiTask,
    content: &str,
) -> Result<AiOutput, crate::ai::GatewayError> {
    match task {
        AiTask::Restructure => gateway.restructure(content).await.map(AiOutput::Restructured),
        AiTask::Summarize => gateway.summarize(content).await.map(AiOutput::Summary),
        AiTask::ExtractKeyPoints => gateway
            .extract_key_points(content)
            .await
            .map(AiOutput::KeyPoints),
        AiTask::GenerateQuiz => gateway.generate_quiz(content).await.map(AiOutput::Quiz),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;

    #[test]
    fn test_worker_reports_missing_credential() {
        let (request_tx, request_rx) = unbounded();
        let (response_tx, response_rx) = unbounded();

        let handle = spawn_ai_worker(Credentials::unconfigured(), response_tx, request_rx);

        request_tx
            .send(AiRequest::Process {
                task: AiTask::Summarize,
                content: "text".to_string(),
            })
            .unwrap();

        let response = response_rx
            .recv_timeout(std::time::Duration::from_secs(5))
            .unwrap();
        match response {
            AiResponse::Failed { task, error } => {
                assert_eq!(task, AiTask::Summarize);
                assert!(error.contains("API key is missing"));
            }
            other => panic!("expected failure, got {:?}", other),
        }

        drop(request_tx);
        handle.join().unwrap();
    }
}
