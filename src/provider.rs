use std::any::Any;
use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;
use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};

use anyhow::Result;

use crate::config::AppConfig;
use crate::predict::{self, PredictRequest, PredictionResult};
use crate::state::{Delta, ProviderCommand};

thread_local! {
    static IN_WORKER: Cell<bool> = const { Cell::new(false) };
}

static QUIET_HOOK: Once = Once::new();

pub fn spawn_prediction_provider(
    tx: Sender<Delta>,
    cmd_rx: Receiver<ProviderCommand>,
    cfg: AppConfig,
) -> JoinHandle<()> {
    spawn_provider_with(tx, cmd_rx, move |request| {
        predict::request_prediction(&cfg, request)
    })
}

/// Runs `predict` for every command on a worker thread. Each `Predict`
/// command produces exactly one `Delta::PredictionSettled`.
pub fn spawn_provider_with<F>(
    tx: Sender<Delta>,
    cmd_rx: Receiver<ProviderCommand>,
    predict: F,
) -> JoinHandle<()>
where
    F: Fn(&PredictRequest) -> Result<PredictionResult> + Send + 'static,
{
    install_quiet_worker_hook();
    thread::spawn(move || {
        IN_WORKER.with(|flag| flag.set(true));
        while let Ok(cmd) = cmd_rx.recv() {
            match cmd {
                ProviderCommand::Predict {
                    generation,
                    request_id,
                    request,
                } => {
                    let guard = SettleGuard::new(&tx, generation, request_id);
                    let outcome = match panic::catch_unwind(AssertUnwindSafe(|| predict(&request)))
                    {
                        Ok(Ok(result)) => Ok(result),
                        Ok(Err(err)) => Err(format!("{err:#}")),
                        Err(payload) => {
                            let _ = tx.send(Delta::Log(format!(
                                "[WARN] Prediction worker panicked: {}",
                                panic_message(&*payload)
                            )));
                            Err("prediction worker panicked".to_string())
                        }
                    };
                    guard.settle(outcome);
                }
            }
        }
    })
}

// Panics on the worker are reported through the console log; printing them
// would draw over the terminal UI.
fn install_quiet_worker_hook() {
    QUIET_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if !IN_WORKER.with(Cell::get) {
                previous(info);
            }
        }));
    });
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        *msg
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.as_str()
    } else {
        "unknown panic"
    }
}

// Releases the pending request on every path: an explicit settle sends the
// outcome, dropping without one reports a failure.
struct SettleGuard<'a> {
    tx: &'a Sender<Delta>,
    generation: u64,
    request_id: u64,
    settled: bool,
}

impl<'a> SettleGuard<'a> {
    fn new(tx: &'a Sender<Delta>, generation: u64, request_id: u64) -> Self {
        Self {
            tx,
            generation,
            request_id,
            settled: false,
        }
    }

    fn settle(mut self, outcome: Result<PredictionResult, String>) {
        self.send(outcome);
        self.settled = true;
    }

    fn send(&self, outcome: Result<PredictionResult, String>) {
        let _ = self.tx.send(Delta::PredictionSettled {
            generation: self.generation,
            request_id: self.request_id,
            outcome,
        });
    }
}

impl Drop for SettleGuard<'_> {
    fn drop(&mut self) {
        if !self.settled {
            self.send(Err("prediction request abandoned".to_string()));
        }
    }
}
