use fight_picker::catalog::Fighter;
use fight_picker::picker::{FighterSelector, MAX_SELECTED, RequestState, rank_label};
use fight_picker::predict::PredictionResult;

fn fighter(name: &str, nickname: &str, rating: u32) -> Fighter {
    Fighter {
        name: name.to_string(),
        nickname: nickname.to_string(),
        division: "Lightweight".to_string(),
        rating,
        record: "10-0-0".to_string(),
    }
}

fn selector() -> FighterSelector {
    FighterSelector::new(vec![
        fighter("Alpha", "", 3),
        fighter("Bravo", "The Eagle", 1),
        fighter("Charlie", "", 2),
        fighter("Delta", "", 4),
    ])
    .expect("non-empty list")
}

#[test]
fn empty_list_has_no_selector() {
    assert!(FighterSelector::new(Vec::new()).is_none());
}

#[test]
fn fighters_sorted_champion_first() {
    let sel = selector();
    let names: Vec<_> = sel.fighters().iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["Bravo", "Charlie", "Alpha", "Delta"]);
}

#[test]
fn toggle_appends_in_pick_order() {
    let mut sel = selector();
    sel.toggle_selection("Delta");
    sel.toggle_selection("Bravo");
    assert_eq!(sel.selected(), ["Delta", "Bravo"]);
}

#[test]
fn toggle_selected_name_removes_it_and_keeps_order() {
    let mut sel = selector();
    sel.toggle_selection("Alpha");
    sel.toggle_selection("Charlie");
    sel.toggle_selection("Alpha");
    assert_eq!(sel.selected(), ["Charlie"]);

    // Toggling twice is a round trip.
    sel.toggle_selection("Delta");
    sel.toggle_selection("Delta");
    assert_eq!(sel.selected(), ["Charlie"]);
}

#[test]
fn third_pick_is_ignored() {
    let mut sel = selector();
    sel.toggle_selection("Alpha");
    sel.toggle_selection("Bravo");
    sel.toggle_selection("Charlie");
    assert_eq!(sel.selected(), ["Alpha", "Bravo"]);
}

#[test]
fn selection_never_exceeds_cap() {
    let mut sel = selector();
    let names = ["Alpha", "Bravo", "Charlie", "Delta"];
    for step in 0..64usize {
        let name = names[(step * 7 + step / 3) % names.len()];
        sel.toggle_selection(name);
        assert!(sel.selected().len() <= MAX_SELECTED);
        let mut unique = sel.selected().to_vec();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), sel.selected().len());
    }
}

#[test]
fn unknown_names_are_ignored() {
    let mut sel = selector();
    sel.toggle_selection("Nobody");
    assert!(sel.selected().is_empty());
}

#[test]
fn rows_disable_once_two_are_picked() {
    let mut sel = selector();
    sel.toggle_selection("Alpha");
    assert!(!sel.is_disabled("Charlie"));
    sel.toggle_selection("Bravo");
    assert!(sel.is_disabled("Charlie"));
    assert!(sel.is_disabled("Delta"));
    assert!(!sel.is_disabled("Alpha"));
    assert!(!sel.is_disabled("Bravo"));
}

#[test]
fn nickname_only_shown_when_active() {
    let mut sel = selector();
    let bravo = sel.fighters()[0].clone();
    assert_eq!(sel.row_label(&bravo), "Bravo");

    sel.set_hovered(Some("Bravo"));
    assert_eq!(sel.row_label(&bravo), "The Eagle");
    sel.clear_hover();
    assert_eq!(sel.row_label(&bravo), "Bravo");

    sel.toggle_selection("Bravo");
    assert_eq!(sel.row_label(&bravo), "The Eagle");

    // No nickname falls back to the name even when active.
    let alpha = sel.fighters()[2].clone();
    sel.set_hovered(Some("Alpha"));
    assert_eq!(sel.row_label(&alpha), "Alpha");
}

#[test]
fn rank_labels() {
    assert_eq!(rank_label(1), "Champ");
    assert_eq!(rank_label(3), "Rank 2");
}

#[test]
fn submit_requires_two_picks() {
    let mut sel = selector();
    assert!(sel.submit_prediction().is_none());
    sel.toggle_selection("Alpha");
    assert!(sel.submit_prediction().is_none());
    assert_eq!(sel.request(), &RequestState::Idle);
}

#[test]
fn submit_sends_picks_in_order_and_blocks_reentry() {
    let mut sel = selector();
    sel.toggle_selection("Charlie");
    sel.toggle_selection("Bravo");

    let (id, request) = sel.submit_prediction().expect("two picks");
    assert_eq!(request.fighter1, "Charlie");
    assert_eq!(request.fighter2, "Bravo");
    assert!(sel.request().is_pending());
    assert_eq!(sel.submit_label(), "Predicting...");

    assert!(sel.submit_prediction().is_none());
    assert!(!sel.can_submit());

    assert!(sel.settle(id, Err("connection refused".to_string())));
    assert!(!sel.request().is_pending());
    assert_eq!(sel.result_lines(), ["Prediction failed: connection refused"]);
    assert_eq!(sel.submit_label(), "Predict Fight");
}

#[test]
fn new_submit_clears_previous_result() {
    let mut sel = selector();
    sel.toggle_selection("Alpha");
    sel.toggle_selection("Delta");

    let (first, _) = sel.submit_prediction().unwrap();
    sel.settle(
        first,
        Ok(PredictionResult {
            winner: "Alpha".to_string(),
            confidence: 0.6,
            loser: None,
        }),
    );
    assert!(matches!(sel.request(), RequestState::Resolved(_)));

    let (second, _) = sel.submit_prediction().unwrap();
    assert_ne!(first, second);
    assert_eq!(sel.request(), &RequestState::Pending { request_id: second });
    assert!(sel.result_lines().is_empty());
}

#[test]
fn stale_settle_is_ignored() {
    let mut sel = selector();
    sel.toggle_selection("Alpha");
    sel.toggle_selection("Delta");
    let (id, _) = sel.submit_prediction().unwrap();

    assert!(!sel.settle(id + 1, Err("late".to_string())));
    assert!(sel.request().is_pending());

    assert!(sel.settle(id, Err("boom".to_string())));
    assert!(!sel.settle(id, Err("twice".to_string())));
    assert_eq!(
        sel.request(),
        &RequestState::Failed {
            message: "boom".to_string()
        }
    );
}
