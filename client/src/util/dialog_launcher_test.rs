use super::*;

// =============================================================
// target_id / dialog_ids
// =============================================================

#[test]
fn target_id_reads_fragment_href() {
    assert_eq!(target_id("#roster"), Some("roster"));
}

#[test]
fn target_id_rejects_non_fragment_hrefs() {
    for href in ["", "#", "/enrichment/", "roster"] {
        assert_eq!(target_id(href), None, "{href}");
    }
}

#[test]
fn dialog_ids_are_distinct_and_skip_bad_hrefs() {
    let ids = dialog_ids(["#roster", "/page", "#history", "#roster", "#"]);
    assert_eq!(ids, vec!["history", "roster"]);
}

// =============================================================
// modal_size
// =============================================================

#[test]
fn modal_leaves_margin_around_window() {
    assert_eq!(modal_size(1280.0, 800.0), (1230.0, 750.0));
}

#[test]
fn modal_size_never_goes_negative() {
    assert_eq!(modal_size(30.0, 0.0), (0.0, 0.0));
}
