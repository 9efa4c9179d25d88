use std::path::PathBuf;

use dex_terminal::assets::DirAssets;
use dex_terminal::dataset::Dex;
use dex_terminal::error::DexError;
use dex_terminal::state::AppState;

fn state() -> AppState {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    let dex = Dex::load(&path.join("dex_sample.csv")).expect("fixture should load");
    AppState::new(dex, Box::new(DirAssets::new(path.join("assets"))))
}

fn current_name(state: &AppState) -> Option<String> {
    state.current().ok().map(|c| c.name.clone())
}

#[test]
fn nothing_is_displayed_before_the_first_selection() {
    let state = state();
    assert_eq!(state.current().unwrap_err(), DexError::NoSelection);
    assert!(state.view.is_none());
}

#[test]
fn select_first_displays_the_first_row() {
    let mut state = state();
    state.select_first();
    assert_eq!(current_name(&state).as_deref(), Some("Bulbasaur"));
    assert_eq!(state.view.as_ref().map(|v| v.portrait_id), Some(1));
}

#[test]
fn stepping_is_clamped_at_both_ends() {
    let mut state = state();
    state.select_first();
    state.select_prev();
    assert_eq!(current_name(&state).as_deref(), Some("Bulbasaur"));

    state.select("Arceus").expect("record should exist");
    state.select_next();
    assert_eq!(current_name(&state).as_deref(), Some("Arceus"));
    state.select_prev();
    assert_eq!(current_name(&state).as_deref(), Some("Pikachu"));
    assert!(state.logs.is_empty());
}

#[test]
fn filter_narrows_the_picker_and_steps_within_it() {
    let mut state = state();
    state.select_first();
    state.begin_search();
    for ch in "CHAR".chars() {
        state.push_query_char(ch);
    }
    assert_eq!(
        state.nav.visible(),
        ["Charmander", "Charizard - Mega Charizard X"]
    );
    // Bulbasaur is still displayed even though it is filtered out.
    assert_eq!(current_name(&state).as_deref(), Some("Bulbasaur"));
    assert_eq!(state.nav.cursor(), None);

    state.select_next();
    assert_eq!(current_name(&state).as_deref(), Some("Charmander"));
    state.select_next();
    assert_eq!(current_name(&state).as_deref(), Some("Charizard - Mega Charizard X"));
    state.select_next();
    assert_eq!(current_name(&state).as_deref(), Some("Charizard - Mega Charizard X"));

    state.pop_query_char();
    state.pop_query_char();
    assert_eq!(state.query, "CH");
    assert_eq!(
        state.nav.visible(),
        ["Charmander", "Charizard - Mega Charizard X", "Pikachu"]
    );

    state.clear_query();
    assert_eq!(state.nav.visible().len(), 6);
    assert_eq!(state.nav.cursor(), Some(2));
}

#[test]
fn submitting_an_exact_name_selects_and_resets_the_list() {
    let mut state = state();
    state.select_first();
    state.begin_search();
    state.set_query("Squirtle");
    assert_eq!(state.nav.visible(), ["Squirtle"]);

    state.submit_search();
    assert!(!state.search_active);
    assert!(state.query.is_empty());
    assert_eq!(current_name(&state).as_deref(), Some("Squirtle"));
    assert_eq!(state.nav.visible().len(), 6);

    state.select_next();
    assert_eq!(current_name(&state).as_deref(), Some("Pikachu"));
}

#[test]
fn submitting_an_unknown_name_keeps_the_display_and_warns() {
    let mut state = state();
    state.select("Pikachu").expect("record should exist");
    let before = state.view.clone();

    state.begin_search();
    state.set_query("NonexistentName");
    state.submit_search();

    assert!(state.search_active);
    assert_eq!(state.view, before);
    assert_eq!(
        state.logs.back().map(String::as_str),
        Some("[WARN] no such record: NonexistentName")
    );
    assert_eq!(
        state.select("NonexistentName").unwrap_err(),
        DexError::NotFound("NonexistentName".to_string())
    );
}

#[test]
fn console_is_bounded() {
    let mut state = state().with_log_capacity(3);
    for idx in 0..10 {
        state.push_log(format!("[INFO] line {idx}"));
    }
    assert_eq!(state.logs.len(), 3);
    assert_eq!(state.logs.front().map(String::as_str), Some("[INFO] line 7"));
}

#[test]
fn submitted_names_must_match_exactly_including_spaces() {
    let mut state = state();
    state.select("Charmander").expect("record should exist");

    state.begin_search();
    state.set_query(" Pikachu");
    assert!(state.nav.visible().is_empty());
    state.submit_search();

    assert!(state.search_active);
    assert_eq!(current_name(&state).as_deref(), Some("Charmander"));
    assert_eq!(
        state.logs.back().map(String::as_str),
        Some("[WARN] no such record:  Pikachu")
    );

    state.set_query("Pikachu");
    state.submit_search();
    assert_eq!(current_name(&state).as_deref(), Some("Pikachu"));
}

#[test]
fn select_first_on_an_empty_dex_only_warns() {
    let dex = Dex::from_records(Vec::new()).expect("empty table is valid");
    let mut state = AppState::new(dex, Box::new(DirAssets::new(".")));
    state.select_first();
    assert!(state.view.is_none());
    assert_eq!(
        state.logs.back().map(String::as_str),
        Some("[WARN] Dex is empty")
    );
}
