use std::io::Write;

use clap::Parser;
use slots::{Assignment, SlotOption};

use super::*;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("slotgrid").chain(args.iter().copied())).unwrap()
}

fn catalog() -> Arc<OptionCatalog> {
    Arc::new(
        [(12, "Robotics"), (15, "Choir")]
            .into_iter()
            .map(|(id, display)| SlotOption {
                id,
                display: display.to_owned(),
            })
            .collect(),
    )
}

// =============================================================
// argument parsing
// =============================================================

#[test]
fn assign_parses_ids_and_choice() {
    let cli = parse(&[
        "--assign-url",
        "https://school.example/assign",
        "--csrf-token",
        "tok",
        "assign",
        "--slot-id",
        "7",
        "--student-id",
        "42",
        "15-locked",
    ]);
    let Command::Assign(args) = &cli.command else {
        panic!("expected assign");
    };
    assert_eq!(args.slot_id, 7);
    assert_eq!(args.student_id, 42);
    assert_eq!(args.choice, "15-locked");
    assert_eq!(cli.timeout_ms, 30_000);
}

#[test]
fn assign_requires_choice() {
    let result = Cli::try_parse_from(["slotgrid", "assign", "--slot-id", "7", "--student-id", "42"]);
    assert!(result.is_err());
}

#[test]
fn preview_takes_raw_attribute_strings() {
    let cli = parse(&[
        "preview",
        "--options",
        "options.json",
        "--slot-id",
        "7",
        "--current-item-id",
        "null",
        "--preferred-options",
        "12,15",
    ]);
    let Command::Preview(args) = &cli.command else {
        panic!("expected preview");
    };
    let data = args.dataset();
    assert_eq!(data.slot_id.as_deref(), Some("7"));
    assert_eq!(data.current_item_id.as_deref(), Some("null"));
    assert_eq!(data.preferred_options.as_deref(), Some("12,15"));
    assert_eq!(data.remaining_options, None);
}

// =============================================================
// save context
// =============================================================

#[test]
fn save_context_takes_timeout_from_flag() {
    let cli = parse(&[
        "--assign-url",
        "https://school.example/assign",
        "--csrf-token",
        "tok",
        "--timeout-ms",
        "1500",
        "assign",
        "--slot-id",
        "7",
        "--student-id",
        "42",
        "0",
    ]);
    let ctx = SaveContext::from_cli(&cli).unwrap();
    assert_eq!(ctx.assign_url, "https://school.example/assign");
    assert_eq!(ctx.timeout, Duration::from_millis(1500));
}

#[test]
fn headers_carry_csrf_token_and_cookie() {
    let ctx = SaveContext {
        assign_url: "https://school.example/assign".to_owned(),
        csrf_token: "tok-1".to_owned(),
        session_cookie: Some("sessionid=abc; csrftoken=tok-1".to_owned()),
        timeout: Duration::from_secs(1),
    };
    let headers = ctx.headers().unwrap();
    assert_eq!(headers.get("x-csrftoken").unwrap(), "tok-1");
    assert_eq!(headers.get(COOKIE).unwrap(), "sessionid=abc; csrftoken=tok-1");
    assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
}

#[test]
fn headers_reject_control_characters() {
    let ctx = SaveContext {
        assign_url: String::new(),
        csrf_token: "bad\ntoken".to_owned(),
        session_cookie: None,
        timeout: Duration::from_secs(1),
    };
    assert!(matches!(ctx.headers(), Err(CliError::InvalidHeader(_))));
}

// =============================================================
// output
// =============================================================

#[test]
fn describe_saved_names_target() {
    let locked = AssignRequest::new(
        7,
        42,
        Assignment {
            option_id: Some(15),
            locked: true,
        },
    );
    assert_eq!(describe_saved(&locked), "saved: slot 7 student 42 -> option 15 (locked)");

    let cleared = AssignRequest::new(7, 42, Assignment::UNASSIGNED);
    assert_eq!(describe_saved(&cleared), "saved: slot 7 student 42 -> unassigned");
}

#[test]
fn menu_lines_mark_selected_entry() {
    let menu = EditMenu::build(
        &[catalog().resolve(12).unwrap().clone()],
        &[catalog().resolve(15).unwrap().clone()],
        false,
        Assignment {
            option_id: Some(15),
            locked: false,
        },
    );
    assert_eq!(
        menu_lines(&menu),
        vec![
            "  Unassigned [0]",
            "Preferred:",
            "    Robotics [12]",
            "Other:",
            "  * Choir [15]",
        ]
    );
}

#[test]
fn read_catalog_reports_missing_file() {
    let err = read_catalog(Path::new("/definitely/not/here.json")).unwrap_err();
    assert!(matches!(err, CliError::ReadOptions { .. }));
}

#[test]
fn read_catalog_parses_options_block_shape() {
    let path = std::env::temp_dir().join(format!("slotgrid-options-{}.json", std::process::id()));
    let mut file = std::fs::File::create(&path).unwrap();
    write!(file, r#"{{"12": {{"id": 12, "display": "Robotics"}}}}"#).unwrap();
    drop(file);

    let catalog = read_catalog(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(catalog.get(12).map(|o| o.display.as_str()), Some("Robotics"));
}
