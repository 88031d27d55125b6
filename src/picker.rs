use crate::catalog::Fighter;
use crate::predict::{PredictRequest, PredictionResult};

pub const MAX_SELECTED: usize = 2;

#[derive(Debug, Clone, PartialEq)]
pub enum RequestState {
    Idle,
    Pending { request_id: u64 },
    Resolved(PredictionResult),
    Failed { message: String },
}

impl RequestState {
    pub fn is_pending(&self) -> bool {
        matches!(self, RequestState::Pending { .. })
    }
}

/// Selection state for one division: up to two picks, a hover row and the
/// lifecycle of the single prediction request it may have in flight.
#[derive(Debug, Clone)]
pub struct FighterSelector {
    fighters: Vec<Fighter>,
    selected: Vec<String>,
    hovered: Option<String>,
    cursor: usize,
    request: RequestState,
    next_request_id: u64,
}

impl FighterSelector {
    /// Returns `None` for an empty list; callers show an empty state instead.
    pub fn new(mut fighters: Vec<Fighter>) -> Option<Self> {
        if fighters.is_empty() {
            return None;
        }
        // sort_by_key is stable, ties keep catalog order.
        fighters.sort_by_key(|f| f.rating);
        Some(Self {
            fighters,
            selected: Vec::with_capacity(MAX_SELECTED),
            hovered: None,
            cursor: 0,
            request: RequestState::Idle,
            next_request_id: 1,
        })
    }

    pub fn fighters(&self) -> &[Fighter] {
        &self.fighters
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn request(&self) -> &RequestState {
        &self.request
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.selected.iter().any(|s| s == name)
    }

    pub fn toggle_selection(&mut self, name: &str) {
        if let Some(pos) = self.selected.iter().position(|s| s == name) {
            self.selected.remove(pos);
            return;
        }
        if self.selected.len() >= MAX_SELECTED {
            return;
        }
        if !self.fighters.iter().any(|f| f.name == name) {
            return;
        }
        self.selected.push(name.to_string());
    }

    pub fn is_disabled(&self, name: &str) -> bool {
        self.selected.len() == MAX_SELECTED && !self.is_selected(name)
    }

    pub fn is_active(&self, name: &str) -> bool {
        self.is_selected(name) || self.hovered.as_deref() == Some(name)
    }

    pub fn row_label<'a>(&self, fighter: &'a Fighter) -> &'a str {
        if self.is_active(&fighter.name) && !fighter.nickname.is_empty() {
            &fighter.nickname
        } else {
            &fighter.name
        }
    }

    pub fn set_hovered(&mut self, name: Option<&str>) {
        self.hovered = name.map(str::to_string);
    }

    pub fn clear_hover(&mut self) {
        self.hovered = None;
    }

    pub fn hover_next(&mut self) {
        if self.hovered.is_some() {
            self.cursor = (self.cursor + 1).min(self.fighters.len() - 1);
        }
        self.sync_hover();
    }

    pub fn hover_prev(&mut self) {
        if self.hovered.is_some() {
            self.cursor = self.cursor.saturating_sub(1);
        }
        self.sync_hover();
    }

    fn sync_hover(&mut self) {
        self.hovered = self.fighters.get(self.cursor).map(|f| f.name.clone());
    }

    /// Toggle the highlighted row; disabled rows are left alone. With no row
    /// highlighted the cursor row is only highlighted, not toggled.
    pub fn toggle_at_cursor(&mut self) {
        if self.hovered.is_none() {
            self.sync_hover();
            return;
        }
        let Some(name) = self.fighters.get(self.cursor).map(|f| f.name.clone()) else {
            return;
        };
        if self.is_disabled(&name) {
            return;
        }
        self.toggle_selection(&name);
    }

    pub fn can_submit(&self) -> bool {
        self.selected.len() == MAX_SELECTED && !self.request.is_pending()
    }

    /// Moves to `Pending` and hands back the request to send, or does nothing
    /// when two fighters are not selected or a request is already in flight.
    pub fn submit_prediction(&mut self) -> Option<(u64, PredictRequest)> {
        if !self.can_submit() {
            return None;
        }
        let request_id = self.next_request_id;
        self.next_request_id += 1;
        self.request = RequestState::Pending { request_id };
        Some((
            request_id,
            PredictRequest {
                fighter1: self.selected[0].clone(),
                fighter2: self.selected[1].clone(),
            },
        ))
    }

    /// Applies the outcome of request `request_id`. Returns false for stale ids.
    pub fn settle(&mut self, request_id: u64, outcome: Result<PredictionResult, String>) -> bool {
        match self.request {
            RequestState::Pending { request_id: pending } if pending == request_id => {}
            _ => return false,
        }
        self.request = match outcome {
            Ok(result) => RequestState::Resolved(result),
            Err(message) => RequestState::Failed { message },
        };
        true
    }

    pub fn submit_label(&self) -> &'static str {
        if self.request.is_pending() {
            "Predicting..."
        } else {
            "Predict Fight"
        }
    }

    pub fn result_lines(&self) -> Vec<String> {
        match &self.request {
            RequestState::Resolved(result) => vec![
                format!("Winner: {}", result.winner),
                format!("Probability: {}%", result.percent()),
            ],
            RequestState::Failed { message } => vec![format!("Prediction failed: {message}")],
            RequestState::Pending { .. } | RequestState::Idle => Vec::new(),
        }
    }
}

pub fn rank_label(rating: u32) -> String {
    if rating == 1 {
        "Champ".to_string()
    } else {
        format!("Rank {}", rating.saturating_sub(1))
    }
}
