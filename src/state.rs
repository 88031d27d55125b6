use std::collections::VecDeque;

use crate::catalog::Fighter;
use crate::division::DivisionPage;
use crate::predict::{PredictRequest, PredictionResult};
use crate::slug::route_param;
use crate::weight_class::WeightClassSelector;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    WeightClasses,
    Division,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub screen: Screen,
    pub catalog: Vec<Fighter>,
    pub weight_classes: WeightClassSelector,
    pub division: Option<DivisionPage>,
    // Bumped on every division open so late responses for a closed page are dropped.
    pub division_generation: u64,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl AppState {
    pub fn new(catalog: Vec<Fighter>) -> Self {
        Self {
            screen: Screen::WeightClasses,
            catalog,
            weight_classes: WeightClassSelector::default(),
            division: None,
            division_generation: 0,
            logs: VecDeque::new(),
            help_overlay: false,
        }
    }

    /// Opens the division screen for a `/<slug>` path or a bare route parameter.
    pub fn open_route(&mut self, path: &str) {
        let param = route_param(path);
        if param.is_empty() {
            self.back();
            return;
        }
        self.division_generation += 1;
        let page = DivisionPage::open(&self.catalog, param);
        if page.picker().is_none() {
            self.push_log(format!("[INFO] No fighters for division '{param}'"));
        }
        self.division = Some(page);
        self.screen = Screen::Division;
    }

    pub fn open_selected_weight_class(&mut self) {
        if let Some(path) = self.weight_classes.selected_link() {
            self.open_route(&path);
        }
    }

    pub fn back(&mut self) {
        self.division = None;
        self.screen = Screen::WeightClasses;
    }

    /// Starts a prediction on the current division page, if one can be sent.
    pub fn submit_prediction(&mut self) -> Option<ProviderCommand> {
        let generation = self.division_generation;
        let picker = self.division.as_mut()?.picker_mut()?;
        let (request_id, request) = picker.submit_prediction()?;
        self.push_log(format!(
            "[INFO] Predicting {} vs {}",
            request.fighter1, request.fighter2
        ));
        Some(ProviderCommand::Predict {
            generation,
            request_id,
            request,
        })
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        const MAX_LOGS: usize = 200;
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }
}

#[derive(Debug, Clone)]
pub enum Delta {
    PredictionSettled {
        generation: u64,
        request_id: u64,
        outcome: Result<PredictionResult, String>,
    },
    Log(String),
}

#[derive(Debug, Clone)]
pub enum ProviderCommand {
    Predict {
        generation: u64,
        request_id: u64,
        request: PredictRequest,
    },
}

pub fn apply_delta(state: &mut AppState, delta: Delta) {
    match delta {
        Delta::PredictionSettled {
            generation,
            request_id,
            outcome,
        } => {
            let log = match &outcome {
                Ok(result) => format!(
                    "[INFO] Prediction: {} ({}%)",
                    result.winner,
                    result.percent()
                ),
                Err(err) => format!("[WARN] Prediction failed: {err}"),
            };
            if generation != state.division_generation {
                state.push_log("[INFO] Discarded prediction for a closed division");
                return;
            }
            let applied = state
                .division
                .as_mut()
                .and_then(|page| page.picker_mut())
                .is_some_and(|picker| picker.settle(request_id, outcome));
            if applied {
                state.push_log(log);
            } else {
                state.push_log("[INFO] Discarded stale prediction response");
            }
        }
        Delta::Log(msg) => state.push_log(msg),
    }
}
