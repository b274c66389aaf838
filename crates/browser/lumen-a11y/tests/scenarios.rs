//! Scenario tests - page-level behavior through the enhancer
//!
//! Each test builds a small page, starts the layer and drives it with
//! host events: key presses, clicks and clock advances.

use lumen_a11y::{
    ColorScheme, Config, ContrastPreference, Enhancer, Key, KeyModifiers, KeyboardEvent, Locale,
    MediaPreferences, PageEvent, PreferenceStore, Storage, Theme, ThemeTarget, ANNOUNCER_ID,
    THEME_ATTRIBUTE,
};
use lumen_dom::{Document, NodeId};

struct Page {
    doc: Document,
    header: NodeId,
    nav: NodeId,
    main: NodeId,
    footer: NodeId,
    skip: NodeId,
    opener: NodeId,
    dark_button: NodeId,
    dialog: NodeId,
    dialog_buttons: Vec<NodeId>,
}

fn el(doc: &mut Document, parent: NodeId, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
    let id = doc.create_element(tag);
    for (name, value) in attrs {
        doc.set_attribute(id, name, value);
    }
    doc.append_child(parent, id).unwrap();
    id
}

fn page() -> Page {
    let mut doc = Document::new("https://example.com/");
    let body = doc.body();

    let skip = el(&mut doc, body, "a", &[("class", "skip-link"), ("href", "#content")]);
    let header = el(&mut doc, body, "header", &[]);
    let nav = el(&mut doc, header, "nav", &[]);
    el(&mut doc, nav, "a", &[("href", "/")]);
    let dark_button = el(&mut doc, header, "button", &[(THEME_ATTRIBUTE, "dark")]);
    el(&mut doc, header, "button", &[(THEME_ATTRIBUTE, "high-contrast")]);
    el(&mut doc, header, "button", &[(THEME_ATTRIBUTE, "default")]);

    let main = el(&mut doc, body, "main", &[("id", "content")]);
    let opener = el(&mut doc, main, "button", &[("id", "open")]);

    let dialog = el(&mut doc, body, "div", &[("role", "dialog"), ("id", "dlg")]);
    doc.set_style_property(dialog, "display", "none");
    let dialog_buttons = vec![
        el(&mut doc, dialog, "button", &[]),
        el(&mut doc, dialog, "input", &[]),
        el(&mut doc, dialog, "button", &[]),
    ];

    let footer = el(&mut doc, body, "footer", &[]);

    Page {
        doc,
        header,
        nav,
        main,
        footer,
        skip,
        opener,
        dark_button,
        dialog,
        dialog_buttons,
    }
}

fn enhancer() -> Enhancer {
    Enhancer::new(Config::default(), Storage::session())
}

fn ready(enhancer: &mut Enhancer, doc: &mut Document) {
    enhancer.start(doc, &MediaPreferences::default());
    enhancer.dispatch(doc, PageEvent::Ready);
}

fn press(enhancer: &mut Enhancer, doc: &mut Document, combo: &str) -> bool {
    let target = doc.active_element().unwrap_or(doc.body());
    let event = KeyboardEvent::from_combo(combo, target).unwrap();
    enhancer.dispatch(doc, PageEvent::KeyDown(event)).default_prevented
}

fn marker(doc: &Document) -> Option<&str> {
    doc.get_attribute(doc.body(), THEME_ATTRIBUTE)
}

fn live_text(doc: &Document) -> String {
    let region = doc.get_element_by_id(ANNOUNCER_ID).unwrap();
    doc.text_content(region)
}

// ============================================================================
// THEMES
// ============================================================================

#[test]
fn test_cycle_three_times_returns_to_default() {
    let mut p = page();
    let mut e = enhancer();
    ready(&mut e, &mut p.doc);

    assert!(press(&mut e, &mut p.doc, "Alt+T"));
    assert_eq!(marker(&p.doc), Some("dark"));
    press(&mut e, &mut p.doc, "Alt+t");
    assert_eq!(marker(&p.doc), Some("high-contrast"));
    press(&mut e, &mut p.doc, "Alt+Shift+T");
    assert_eq!(marker(&p.doc), None);
    assert_eq!(e.state().theme.active(), Theme::Default);
}

#[test]
fn test_theme_button_click_and_keys() {
    let mut p = page();
    let mut e = enhancer();
    ready(&mut e, &mut p.doc);

    e.dispatch(&mut p.doc, PageEvent::Click { target: p.dark_button });
    assert_eq!(marker(&p.doc), Some("dark"));
    assert_eq!(e.state().theme.store().get(), Some(Theme::Dark));

    // Enter on the focused default button suppresses the native click
    let default_button = p.doc.query_selector("button[data-theme=\"default\"]").unwrap();
    p.doc.focus(default_button);
    assert!(press(&mut e, &mut p.doc, "Enter"));
    assert_eq!(marker(&p.doc), None);

    let hc_button = p.doc.query_selector("button[data-theme=\"high-contrast\"]").unwrap();
    p.doc.focus(hc_button);
    assert!(press(&mut e, &mut p.doc, " "));
    assert_eq!(marker(&p.doc), Some("high-contrast"));
}

#[test]
fn test_theme_marker_on_html() {
    let mut p = page();
    let config = Config {
        theme_target: ThemeTarget::Html,
        ..Config::default()
    };
    let mut e = Enhancer::new(config, Storage::session());
    ready(&mut e, &mut p.doc);

    press(&mut e, &mut p.doc, "Alt+T");
    let html = p.doc.document_element();
    assert_eq!(p.doc.get_attribute(html, THEME_ATTRIBUTE), Some("dark"));
    assert_eq!(marker(&p.doc), None);
}

#[test]
fn test_saved_theme_restored_on_ready() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut p = page();
        let mut e = Enhancer::new(Config::default(), Storage::for_origin(dir.path(), "https://example.com"));
        ready(&mut e, &mut p.doc);
        e.dispatch(&mut p.doc, PageEvent::Click { target: p.dark_button });
    }

    let mut p = page();
    let mut e = Enhancer::new(Config::default(), Storage::for_origin(dir.path(), "https://example.com"));
    ready(&mut e, &mut p.doc);
    assert_eq!(marker(&p.doc), Some("dark"));
    assert_eq!(e.state().theme.active(), Theme::Dark);
}

// ============================================================================
// ANNOUNCEMENTS
// ============================================================================

#[test]
fn test_theme_change_announced_then_cleared() {
    let mut p = page();
    let mut e = enhancer();
    ready(&mut e, &mut p.doc);

    press(&mut e, &mut p.doc, "Alt+T");
    assert_eq!(live_text(&p.doc), "Theme changed to dark mode");

    e.advance(&mut p.doc, 2999);
    assert_eq!(live_text(&p.doc), "Theme changed to dark mode");
    e.advance(&mut p.doc, 1);
    assert_eq!(live_text(&p.doc), "");
}

#[test]
fn test_second_announcement_survives_first_timer() {
    let mut p = page();
    let mut e = enhancer();
    ready(&mut e, &mut p.doc);

    press(&mut e, &mut p.doc, "Alt+T");
    e.advance(&mut p.doc, 2500);
    press(&mut e, &mut p.doc, "Alt+T");
    e.advance(&mut p.doc, 1000);
    assert_eq!(live_text(&p.doc), "Theme changed to high contrast");
    assert_eq!(p.doc.query_selector_all("#aria-announcer").len(), 1);
}

#[test]
fn test_portuguese_locale() {
    let mut p = page();
    let config = Config {
        locale: Locale::PtBr,
        ..Config::default()
    };
    let mut e = Enhancer::new(config, Storage::session());
    ready(&mut e, &mut p.doc);

    assert_eq!(p.doc.get_attribute(p.nav, "aria-label"), Some("Navegação principal"));
    press(&mut e, &mut p.doc, "Alt+T");
    assert_eq!(live_text(&p.doc), "Tema alterado para modo escuro");
}

// ============================================================================
// KEYBOARD SHORTCUTS
// ============================================================================

#[test]
fn test_landmark_shortcuts() {
    let mut p = page();
    let mut e = enhancer();
    ready(&mut e, &mut p.doc);

    assert!(press(&mut e, &mut p.doc, "Alt+1"));
    assert_eq!(p.doc.active_element(), Some(p.main));
    assert!(press(&mut e, &mut p.doc, "Alt+2"));
    assert_eq!(p.doc.active_element(), Some(p.nav));
}

#[test]
fn test_missing_landmark_skipped() {
    let mut doc = Document::default();
    let mut e = enhancer();
    ready(&mut e, &mut doc);

    assert!(press(&mut e, &mut doc, "Alt+1"));
    assert_eq!(doc.active_element(), None);
}

#[test]
fn test_unbound_keys_pass_through() {
    let mut p = page();
    let mut e = enhancer();
    ready(&mut e, &mut p.doc);

    assert!(!press(&mut e, &mut p.doc, "t"));
    assert!(!press(&mut e, &mut p.doc, "Ctrl+Alt+T"));
    assert!(!press(&mut e, &mut p.doc, "Alt+9"));
    assert_eq!(marker(&p.doc), None);
}

// ============================================================================
// DIALOGS AND FOCUS TRAPS
// ============================================================================

#[test]
fn test_dialog_tab_cycles() {
    let mut p = page();
    let mut e = enhancer();
    ready(&mut e, &mut p.doc);

    p.doc.focus(p.opener);
    e.pump(&mut p.doc);
    assert!(e.state_mut().open_dialog(&mut p.doc, p.dialog));
    let [first, middle, last] = [p.dialog_buttons[0], p.dialog_buttons[1], p.dialog_buttons[2]];
    assert_eq!(p.doc.active_element(), Some(first));

    assert!(!press(&mut e, &mut p.doc, "Tab"));
    assert_eq!(p.doc.active_element(), Some(middle));
    press(&mut e, &mut p.doc, "Tab");
    assert_eq!(p.doc.active_element(), Some(last));

    assert!(press(&mut e, &mut p.doc, "Tab"));
    assert_eq!(p.doc.active_element(), Some(first));

    assert!(press(&mut e, &mut p.doc, "Shift+Tab"));
    assert_eq!(p.doc.active_element(), Some(last));
}

#[test]
fn test_escape_closes_and_restores_focus() {
    let mut p = page();
    let mut e = enhancer();
    ready(&mut e, &mut p.doc);

    p.doc.focus(p.opener);
    e.pump(&mut p.doc);
    e.state_mut().open_dialog(&mut p.doc, p.dialog);
    e.pump(&mut p.doc);
    let body = p.doc.body();
    assert_eq!(p.doc.style_property(body, "overflow"), Some("hidden"));

    press(&mut e, &mut p.doc, "Escape");
    assert_eq!(p.doc.style_property(p.dialog, "display"), Some("none"));
    assert_eq!(p.doc.style_property(body, "overflow"), Some("auto"));
    assert_eq!(p.doc.active_element(), Some(p.opener));
    assert!(!e.state().traps.is_armed(p.dialog));
}

#[test]
fn test_escape_outside_dialog_does_nothing() {
    let mut p = page();
    let mut e = enhancer();
    ready(&mut e, &mut p.doc);

    e.state_mut().open_dialog(&mut p.doc, p.dialog);
    p.doc.focus(p.opener);
    press(&mut e, &mut p.doc, "Escape");
    assert_eq!(p.doc.style_property(p.dialog, "display"), None);
    assert!(e.state().traps.is_armed(p.dialog));
}

#[test]
fn test_dialog_without_focusables_not_trapped() {
    let mut doc = Document::default();
    let body = doc.body();
    let dialog = el(&mut doc, body, "div", &[("role", "dialog")]);
    el(&mut doc, dialog, "p", &[]);

    let mut e = enhancer();
    ready(&mut e, &mut doc);
    assert!(!e.state().traps.is_armed(dialog));
}

#[test]
fn test_visible_dialog_armed_on_ready() {
    let mut p = page();
    p.doc.set_style_property(p.dialog, "display", "");
    let mut e = enhancer();
    ready(&mut e, &mut p.doc);
    assert!(e.state().traps.is_armed(p.dialog));
}

#[test]
fn test_ready_armed_dialog_returns_focus_on_escape() {
    let mut p = page();
    p.doc.set_style_property(p.dialog, "display", "");
    let mut e = enhancer();
    ready(&mut e, &mut p.doc);

    p.doc.focus(p.opener);
    e.pump(&mut p.doc);
    press(&mut e, &mut p.doc, "Tab");
    assert_eq!(p.doc.active_element(), Some(p.dialog_buttons[0]));

    press(&mut e, &mut p.doc, "Escape");
    assert_eq!(p.doc.style_property(p.dialog, "display"), Some("none"));
    assert_eq!(p.doc.active_element(), Some(p.opener));
}

#[test]
fn test_open_empty_dialog_leaves_page_untouched() {
    let mut doc = Document::default();
    let body = doc.body();
    let dialog = el(&mut doc, body, "div", &[("role", "dialog")]);
    el(&mut doc, dialog, "p", &[]);
    doc.set_style_property(dialog, "display", "none");

    let mut e = enhancer();
    ready(&mut e, &mut doc);
    assert!(!e.state_mut().open_dialog(&mut doc, dialog));
    assert_eq!(doc.style_property(dialog, "display"), Some("none"));
    assert_eq!(doc.style_property(body, "overflow"), None);
    assert!(!e.state().traps.is_armed(dialog));
}

#[test]
fn test_closing_nested_dialog_keeps_scroll_locked() {
    let mut p = page();
    let inner = el(&mut p.doc, p.dialog, "div", &[("role", "dialog")]);
    p.doc.set_style_property(inner, "display", "none");
    let inner_button = el(&mut p.doc, inner, "button", &[]);
    let mut e = enhancer();
    ready(&mut e, &mut p.doc);

    p.doc.focus(p.opener);
    e.pump(&mut p.doc);
    assert!(e.state_mut().open_dialog(&mut p.doc, p.dialog));
    e.pump(&mut p.doc);
    assert!(e.state_mut().open_dialog(&mut p.doc, inner));
    e.pump(&mut p.doc);
    assert_eq!(p.doc.active_element(), Some(inner_button));

    let body = p.doc.body();
    press(&mut e, &mut p.doc, "Escape");
    assert_eq!(p.doc.style_property(inner, "display"), Some("none"));
    assert_eq!(p.doc.style_property(body, "overflow"), Some("hidden"));
    assert_eq!(p.doc.active_element(), Some(p.dialog_buttons[0]));

    press(&mut e, &mut p.doc, "Escape");
    assert_eq!(p.doc.style_property(body, "overflow"), Some("auto"));
    assert_eq!(p.doc.active_element(), Some(p.opener));
}

#[test]
fn test_detached_return_target_not_focused() {
    let mut p = page();
    let mut e = enhancer();
    ready(&mut e, &mut p.doc);

    p.doc.focus(p.opener);
    e.pump(&mut p.doc);
    e.state_mut().open_dialog(&mut p.doc, p.dialog);
    p.doc.remove(p.opener).unwrap();

    press(&mut e, &mut p.doc, "Escape");
    assert!(!p.doc.is_connected(p.opener));
    assert_ne!(p.doc.active_element(), Some(p.opener));
    // Focus does not stay inside the hidden dialog
    assert!(p.doc.active_element().is_none_or(|a| !p.doc.contains(p.dialog, a)));
}

// ============================================================================
// SYSTEM PREFERENCES
// ============================================================================

#[test]
fn test_high_contrast_wins_over_dark() {
    let mut p = page();
    let mut e = enhancer();
    let prefs = MediaPreferences {
        reduced_motion: false,
        contrast: ContrastPreference::More,
        color_scheme: ColorScheme::Dark,
    };
    e.start(&mut p.doc, &prefs);
    e.dispatch(&mut p.doc, PageEvent::Ready);
    assert_eq!(e.state().theme.active(), Theme::HighContrast);
    assert_eq!(marker(&p.doc), Some("high-contrast"));
}

#[test]
fn test_persisted_choice_beats_system() {
    let mut storage = Storage::session();
    storage.set_item("preferred-theme", "dark");
    let mut e = Enhancer::new(Config::default(), storage);
    let mut p = page();

    let prefs = MediaPreferences {
        contrast: ContrastPreference::More,
        ..MediaPreferences::default()
    };
    let report = e.start(&mut p.doc, &prefs).unwrap();
    e.dispatch(&mut p.doc, PageEvent::Ready);

    assert!(report.saved_theme_kept);
    assert_eq!(marker(&p.doc), Some("dark"));
}

#[test]
fn test_reduced_motion() {
    let mut p = page();
    let mut e = enhancer();
    let prefs = MediaPreferences {
        reduced_motion: true,
        ..MediaPreferences::default()
    };
    e.start(&mut p.doc, &prefs);
    let html = p.doc.document_element();
    assert_eq!(p.doc.style_property(html, "--animation-duration"), Some("0.01ms"));
}

#[test]
fn test_custom_storage_key() {
    let config = Config {
        storage_key: "lumen-theme".to_string(),
        ..Config::default()
    };
    let mut e = Enhancer::new(config, Storage::session());
    let mut p = page();
    ready(&mut e, &mut p.doc);
    press(&mut e, &mut p.doc, "Alt+T");

    let store: &PreferenceStore = e.state().theme.store();
    assert_eq!(store.key(), "lumen-theme");
    assert_eq!(store.storage().get_item("lumen-theme"), Some("dark"));
    assert_eq!(store.storage().get_item("preferred-theme"), None);
}

// ============================================================================
// LANDMARKS AND SKIP LINK
// ============================================================================

#[test]
fn test_landmarks_enhanced_on_ready() {
    let mut p = page();
    let mut e = enhancer();
    ready(&mut e, &mut p.doc);

    assert_eq!(p.doc.get_attribute(p.main, "role"), Some("main"));
    assert_eq!(p.doc.get_attribute(p.header, "role"), Some("banner"));
    assert_eq!(p.doc.get_attribute(p.footer, "role"), Some("contentinfo"));
    assert_eq!(p.doc.get_attribute(p.nav, "aria-label"), Some("Main navigation"));
}

#[test]
fn test_skip_link_click() {
    let mut p = page();
    let mut e = enhancer();
    ready(&mut e, &mut p.doc);

    let outcome = e.dispatch(&mut p.doc, PageEvent::Click { target: p.skip });
    assert!(outcome.default_prevented);
    assert_eq!(p.doc.active_element(), Some(p.main));
    assert_eq!(p.doc.get_attribute(p.main, "tabindex"), Some("-1"));

    e.advance(&mut p.doc, 999);
    assert!(p.doc.has_attribute(p.main, "tabindex"));
    e.advance(&mut p.doc, 1);
    assert!(!p.doc.has_attribute(p.main, "tabindex"));
}

#[test]
fn test_skip_link_enter_activates() {
    let mut p = page();
    let mut e = enhancer();
    ready(&mut e, &mut p.doc);

    p.doc.focus(p.skip);
    press(&mut e, &mut p.doc, "Enter");
    assert_eq!(p.doc.active_element(), Some(p.main));
}

#[test]
fn test_focus_tracking_and_restore() {
    let mut p = page();
    let mut e = enhancer();
    ready(&mut e, &mut p.doc);

    e.dispatch(&mut p.doc, PageEvent::Click { target: p.opener });
    press(&mut e, &mut p.doc, "Alt+1");
    assert_eq!(e.state().restorer.last_focused(), Some(p.main));

    let state = e.state_mut();
    state.restorer.track(p.opener);
    assert!(state.restorer.restore(&mut p.doc));
    assert_eq!(p.doc.active_element(), Some(p.opener));
}

#[test]
fn test_key_down_targets_focused_element() {
    let mut p = page();
    let mut e = enhancer();
    ready(&mut e, &mut p.doc);

    p.doc.focus(p.dark_button);
    e.key_down(&mut p.doc, Key::Enter, KeyModifiers::default());
    assert_eq!(marker(&p.doc), Some("dark"));
}
