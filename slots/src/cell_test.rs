use super::*;
use crate::render::NO_ASSIGNMENT;

// =============================================================
// Helpers
// =============================================================

fn catalog() -> Arc<OptionCatalog> {
    Arc::new(
        [(5, "Robotics"), (6, "Chess"), (7, "Choir"), (8, "Drama")]
            .into_iter()
            .map(|(id, display)| SlotOption {
                id,
                display: display.to_owned(),
            })
            .collect(),
    )
}

fn dataset(current: &str, locked: &str, allow_locking: &str) -> CellDataset {
    CellDataset {
        slot_id: Some("11".to_owned()),
        student_id: Some("22".to_owned()),
        current_item_id: Some(current.to_owned()),
        locked: Some(locked.to_owned()),
        preferred_options: Some("5,6".to_owned()),
        remaining_options: Some("7,8".to_owned()),
        allow_locking: Some(allow_locking.to_owned()),
    }
}

fn cell(current: &str, locked: &str, allow_locking: &str) -> Cell {
    Cell::from_dataset(&dataset(current, locked, allow_locking), catalog()).unwrap()
}

fn label(cell: &Cell) -> String {
    match cell.at_rest_glyphs().last() {
        Some(Glyph::Label(text)) => text.clone(),
        other => panic!("expected label, got {other:?}"),
    }
}

fn success(option_id: Option<i64>, locked: bool) -> SaveOutcome {
    SaveOutcome::Success { option_id, locked }
}

// =============================================================
// Construction
// =============================================================

#[test]
fn from_dataset_reads_all_fields() {
    let cell = cell("5", "true", "true");
    assert_eq!(cell.slot_id(), 11);
    assert_eq!(cell.student_id(), 22);
    assert_eq!(
        cell.current(),
        Assignment {
            option_id: Some(5),
            locked: true
        }
    );
    assert!(cell.allow_locking());
    assert_eq!(cell.phase(), Phase::AtRest);
}

#[test]
fn from_dataset_treats_null_current_as_unassigned() {
    assert_eq!(cell("null", "", "").current(), Assignment::UNASSIGNED);
    assert_eq!(cell("", "false", "false").current(), Assignment::UNASSIGNED);
}

#[test]
fn missing_flags_default_to_false() {
    let mut data = dataset("5", "", "");
    data.locked = None;
    data.allow_locking = None;
    let cell = Cell::from_dataset(&data, catalog()).unwrap();
    assert!(!cell.current().locked);
    assert!(!cell.allow_locking());
}

#[test]
fn from_dataset_fails_fast_on_malformed_ids() {
    let mut data = dataset("5", "", "");
    data.remaining_options = Some("7,eight".to_owned());
    assert_eq!(
        Cell::from_dataset(&data, catalog()),
        Err(ParseError::InvalidInt("eight".to_owned()))
    );

    let mut data = dataset("five", "", "");
    data.slot_id = Some("11".to_owned());
    assert_eq!(
        Cell::from_dataset(&data, catalog()),
        Err(ParseError::InvalidInt("five".to_owned()))
    );
}

#[test]
fn from_dataset_requires_slot_and_student() {
    let mut data = dataset("5", "", "");
    data.slot_id = None;
    assert_eq!(
        Cell::from_dataset(&data, catalog()),
        Err(ParseError::MissingAttribute("slot-id"))
    );

    let mut data = dataset("5", "", "");
    data.student_id = Some("null".to_owned());
    assert_eq!(
        Cell::from_dataset(&data, catalog()),
        Err(ParseError::MissingAttribute("student-id"))
    );
}

#[test]
fn from_dataset_rejects_unknown_options() {
    let mut data = dataset("5", "", "");
    data.preferred_options = Some("5,42".to_owned());
    assert_eq!(Cell::from_dataset(&data, catalog()), Err(ParseError::UnknownOption(42)));

    assert_eq!(
        Cell::from_dataset(&dataset("43", "", ""), catalog()),
        Err(ParseError::UnknownOption(43))
    );
}

#[test]
fn from_dataset_rejects_bad_flags() {
    assert_eq!(
        Cell::from_dataset(&dataset("5", "maybe", ""), catalog()),
        Err(ParseError::InvalidFlag("maybe".to_owned()))
    );
}

// =============================================================
// Rendering
// =============================================================

#[test]
fn unassigned_cell_shows_no_assignment() {
    assert_eq!(label(&cell("null", "", "")), NO_ASSIGNMENT);
}

#[test]
fn assigned_cell_shows_option_display() {
    assert_eq!(label(&cell("7", "", "")), "Choir");
}

#[test]
fn view_tracks_phase() {
    let mut cell = cell("5", "", "");
    assert!(matches!(cell.view(), CellView::AtRest(_)));
    cell.begin_edit();
    assert!(matches!(cell.view(), CellView::Editing(_)));
    cell.choose("7").unwrap();
    assert_eq!(cell.view(), CellView::Saving);
}

// =============================================================
// Editing guards
// =============================================================

#[test]
fn begin_edit_opens_menu_with_current_selected() {
    let mut cell = cell("5", "", "");
    let menu = cell.begin_edit().unwrap();
    assert!(cell.is_editing());
    assert_eq!(menu.selected().map(|e| e.value.as_str()), Some("5"));
}

#[test]
fn begin_edit_is_ignored_while_editing() {
    let mut cell = cell("5", "", "");
    assert!(cell.begin_edit().is_some());
    assert!(cell.begin_edit().is_none());
    assert!(cell.is_editing());
}

#[test]
fn click_while_saving_never_opens_menu_or_issues_request() {
    let mut cell = cell("5", "", "");
    cell.begin_edit();
    let first = cell.choose("7").unwrap();
    assert_eq!(first.option_id, Some(7));

    assert!(cell.begin_edit().is_none());
    assert!(cell.is_saving());
    assert_eq!(cell.choose("8"), Err(CellError::NotEditing));
    assert_eq!(cell.phase(), Phase::Saving(first.assignment()));
}

#[test]
fn choose_outside_editing_is_rejected() {
    let mut cell = cell("5", "", "");
    assert_eq!(cell.choose("7"), Err(CellError::NotEditing));
    assert_eq!(cell.phase(), Phase::AtRest);
}

#[test]
fn without_locking_menu_never_offers_locked_groups() {
    let mut cell = cell("5", "true", "false");
    let menu = cell.begin_edit().unwrap();
    assert_eq!(menu.groups.len(), 2);
    assert!(menu.entries().all(|e| !e.value.ends_with("-locked")));
}

#[test]
fn locked_value_is_rejected_when_locking_not_allowed() {
    let mut cell = cell("5", "", "false");
    cell.begin_edit();
    assert_eq!(
        cell.choose("7-locked"),
        Err(CellError::Parse(ParseError::InvalidMenuValue("7-locked".to_owned())))
    );
    assert_eq!(cell.phase(), Phase::AtRest);
    assert_eq!(cell.current().option_id, Some(5));
}

#[test]
fn value_outside_menu_is_rejected() {
    let mut cell = cell("5", "", "true");
    cell.begin_edit();
    assert!(cell.choose("99").is_err());
    assert_eq!(cell.phase(), Phase::AtRest);
}

// =============================================================
// Scenarios
// =============================================================

#[test]
fn successful_save_commits_and_rerenders() {
    let mut cell = cell("5", "false", "true");
    cell.begin_edit();
    let request = cell.choose("7").unwrap();
    assert_eq!(
        serde_json::to_value(&request).unwrap(),
        serde_json::json!({"slot_id": 11, "student_id": 22, "option_id": 7, "admin_lock": false})
    );

    let outcome = SaveOutcome::from_response(&request, 200, r#"{"success": true}"#);
    let resolution = cell.finish_save(outcome);

    let committed = Assignment {
        option_id: Some(7),
        locked: false,
    };
    assert_eq!(resolution, SaveResolution::Committed(committed));
    assert_eq!(cell.current(), committed);
    assert_eq!(cell.phase(), Phase::AtRest);
    assert_eq!(
        cell.at_rest_glyphs(),
        vec![Glyph::EditIcon, Glyph::Separator, Glyph::Label("Choir".to_owned())]
    );
}

#[test]
fn rejected_save_alerts_with_code_and_reverts() {
    let mut cell = cell("5", "false", "true");
    let before = cell.at_rest_glyphs();
    cell.begin_edit();
    let request = cell.choose("7").unwrap();

    let outcome = SaveOutcome::from_response(&request, 200, r#"{"success": false, "code": "CONFLICT"}"#);
    let SaveResolution::Reverted(failure) = cell.finish_save(outcome) else {
        panic!("expected revert");
    };

    assert!(failure.alert_message().contains("CONFLICT"));
    assert_eq!(
        cell.current(),
        Assignment {
            option_id: Some(5),
            locked: false
        }
    );
    assert_eq!(cell.at_rest_glyphs(), before);
    assert_eq!(label(&cell), "Robotics");
}

#[test]
fn dismissing_menu_restores_prior_render_without_request() {
    let mut cell = cell("5", "true", "true");
    let before = cell.view();
    cell.begin_edit();
    assert!(cell.dismiss());
    assert_eq!(cell.view(), before);
    assert_eq!(cell.phase(), Phase::AtRest);
}

#[test]
fn dismiss_is_a_no_op_outside_editing() {
    let mut cell = cell("5", "", "");
    assert!(!cell.dismiss());
    cell.begin_edit();
    cell.choose("6").unwrap();
    assert!(!cell.dismiss());
    assert!(cell.is_saving());
}

#[test]
fn locked_choice_commits_lock_and_renders_lock_icon() {
    let mut cell = cell("5", "", "true");
    cell.begin_edit();
    let request = cell.choose("8-locked").unwrap();
    assert!(request.admin_lock);

    cell.finish_save(success(Some(8), true));
    assert_eq!(
        cell.at_rest_glyphs(),
        vec![
            Glyph::EditIcon,
            Glyph::Separator,
            Glyph::LockIcon,
            Glyph::Separator,
            Glyph::Label("Drama".to_owned()),
        ]
    );
}

#[test]
fn unassigning_commits_none() {
    let mut cell = cell("5", "true", "true");
    cell.begin_edit();
    let request = cell.choose("0").unwrap();
    assert_eq!(request.option_id, None);
    assert!(!request.admin_lock);

    cell.finish_save(success(None, false));
    assert_eq!(cell.current(), Assignment::UNASSIGNED);
    assert_eq!(label(&cell), NO_ASSIGNMENT);
}

#[test]
fn timeout_reverts_and_allows_a_new_edit() {
    let mut cell = cell("5", "", "");
    cell.begin_edit();
    cell.choose("7").unwrap();

    let resolution = cell.finish_save(SaveOutcome::Failure(SaveFailure::TimedOut(
        std::time::Duration::from_secs(30),
    )));
    assert!(matches!(resolution, SaveResolution::Reverted(SaveFailure::TimedOut(_))));
    assert_eq!(cell.current().option_id, Some(5));
    assert!(cell.begin_edit().is_some());
}

#[test]
fn outcome_without_pending_save_is_ignored() {
    let mut cell = cell("5", "", "");
    assert_eq!(cell.finish_save(success(Some(7), false)), SaveResolution::Ignored);
    assert_eq!(cell.current().option_id, Some(5));
}
