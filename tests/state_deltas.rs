use fight_picker::catalog::Fighter;
use fight_picker::picker::RequestState;
use fight_picker::predict::PredictionResult;
use fight_picker::state::{AppState, Delta, ProviderCommand, Screen, apply_delta};

fn fighter(name: &str, nickname: &str, division: &str, rating: u32) -> Fighter {
    Fighter {
        name: name.to_string(),
        nickname: nickname.to_string(),
        division: division.to_string(),
        rating,
        record: "20-1-0".to_string(),
    }
}

fn catalog() -> Vec<Fighter> {
    vec![
        fighter("Champ Name", "", "Lightweight", 1),
        fighter("Contender Name", "The Eagle", "Lightweight", 2),
        fighter("Big Name", "", "Heavyweight", 1),
    ]
}

fn settled(generation: u64, request_id: u64, winner: &str, confidence: f64) -> Delta {
    Delta::PredictionSettled {
        generation,
        request_id,
        outcome: Ok(PredictionResult {
            winner: winner.to_string(),
            confidence,
            loser: None,
        }),
    }
}

#[test]
fn end_to_end_pick_predict_render() {
    let mut state = AppState::new(catalog());
    state.open_route("/lightweight");
    assert_eq!(state.screen, Screen::Division);

    let picker = state
        .division
        .as_mut()
        .and_then(|page| page.picker_mut())
        .expect("lightweight has fighters");
    assert_eq!(picker.fighters().len(), 2);
    picker.toggle_selection("Contender Name");
    picker.toggle_selection("Champ Name");

    let Some(ProviderCommand::Predict {
        generation,
        request_id,
        request,
    }) = state.submit_prediction()
    else {
        panic!("prediction should be submitted");
    };
    assert_eq!(request.fighter1, "Contender Name");
    assert_eq!(request.fighter2, "Champ Name");

    apply_delta(&mut state, settled(generation, request_id, "Champ Name", 0.73));

    let picker = state.division.as_ref().and_then(|p| p.picker()).unwrap();
    assert_eq!(
        picker.result_lines(),
        ["Winner: Champ Name", "Probability: 73%"]
    );
    assert!(
        state
            .logs
            .iter()
            .any(|l| l == "[INFO] Prediction: Champ Name (73%)")
    );
}

#[test]
fn submit_without_two_picks_sends_nothing() {
    let mut state = AppState::new(catalog());
    assert!(state.submit_prediction().is_none());
    state.open_route("lightweight");
    assert!(state.submit_prediction().is_none());
    let picker = state.division.as_ref().and_then(|p| p.picker()).unwrap();
    assert_eq!(picker.request(), &RequestState::Idle);
}

#[test]
fn failure_settles_and_logs_warning() {
    let mut state = AppState::new(catalog());
    state.open_route("LIGHTWEIGHT");
    let picker = state.division.as_mut().and_then(|p| p.picker_mut()).unwrap();
    picker.toggle_selection("Champ Name");
    picker.toggle_selection("Contender Name");
    let Some(ProviderCommand::Predict {
        generation,
        request_id,
        ..
    }) = state.submit_prediction()
    else {
        panic!("prediction should be submitted");
    };

    apply_delta(
        &mut state,
        Delta::PredictionSettled {
            generation,
            request_id,
            outcome: Err("request failed".to_string()),
        },
    );
    let picker = state.division.as_ref().and_then(|p| p.picker()).unwrap();
    assert!(matches!(picker.request(), RequestState::Failed { .. }));
    assert_eq!(
        state.logs.back().map(String::as_str),
        Some("[WARN] Prediction failed: request failed")
    );
}

#[test]
fn response_for_closed_division_is_discarded() {
    let mut state = AppState::new(catalog());
    state.open_route("lightweight");
    let picker = state.division.as_mut().and_then(|p| p.picker_mut()).unwrap();
    picker.toggle_selection("Champ Name");
    picker.toggle_selection("Contender Name");
    let Some(ProviderCommand::Predict {
        generation,
        request_id,
        ..
    }) = state.submit_prediction()
    else {
        panic!("prediction should be submitted");
    };

    state.back();
    state.open_route("lightweight");
    apply_delta(&mut state, settled(generation, request_id, "Champ Name", 0.9));

    let picker = state.division.as_ref().and_then(|p| p.picker()).unwrap();
    assert_eq!(picker.request(), &RequestState::Idle);
    assert!(picker.selected().is_empty());
}

#[test]
fn empty_division_shows_empty_state() {
    let mut state = AppState::new(catalog());
    state.open_route("/flyweight-women");
    assert_eq!(state.screen, Screen::Division);
    let page = state.division.as_ref().unwrap();
    assert!(page.picker().is_none());
    assert_eq!(page.title, "Flyweight-women");
}

#[test]
fn weight_class_enter_opens_division() {
    let mut state = AppState::new(catalog());
    for _ in 0..3 {
        state.weight_classes.select_next();
    }
    state.open_selected_weight_class();
    let page = state.division.as_ref().unwrap();
    assert_eq!(page.param, "lightweight");
    assert!(page.picker().is_some());

    state.back();
    assert_eq!(state.screen, Screen::WeightClasses);
    assert!(state.division.is_none());
}

#[test]
fn worker_log_lines_reach_console() {
    let mut state = AppState::default();
    apply_delta(
        &mut state,
        Delta::Log("[WARN] Prediction worker panicked: boom".to_string()),
    );
    assert_eq!(
        state.logs.back().map(String::as_str),
        Some("[WARN] Prediction worker panicked: boom")
    );
}

#[test]
fn log_buffer_is_bounded() {
    let mut state = AppState::default();
    for i in 0..250 {
        state.push_log(format!("[INFO] {i}"));
    }
    assert_eq!(state.logs.len(), 200);
    assert_eq!(state.logs.front().map(String::as_str), Some("[INFO] 50"));
}
