mod fixture;

use pretty_assertions::assert_eq;
use screen_digest::{digest, legacy_filter_within, Engine, Point, Screen};

const PHONE: Screen = Screen {
    width: 1080,
    height: 2340,
};

#[test]
fn golden_network_settings() {
    let dump = fixture::read_fixture("network_settings.xml");
    let first_cycle = fixture::read_unescaped("network_settings_first.txt");
    let steady = fixture::read_unescaped("network_settings.txt");

    let result = digest(&dump, None, PHONE);
    assert_eq!(result.text(), first_cycle);
    let repeat = digest(&dump, Some(result.identity_keys()), PHONE);
    assert_eq!(repeat.text(), steady);
    assert_eq!(result.index().len(), 4);
    assert_eq!(result.resolve_center(1), Some(Point::new(73, 157)));
    assert_eq!(result.resolve_center(4), Some(Point::new(975, 325)));
    assert_eq!(result.stats().original, 15);
    assert_eq!(result.stats().kept, 12);
}

#[test]
fn golden_second_cycle_marks_changed_summary() {
    let first_dump = fixture::read_fixture("network_settings.xml");
    let second_dump = first_dump.replace("HomeNet", "CafeNet");
    let expected = fixture::read_unescaped("network_settings.txt").replace("HomeNet", "* CafeNet");

    let first = digest(&first_dump, None, PHONE);
    let second = digest(&second_dump, Some(first.identity_keys()), PHONE);
    assert_eq!(second.text(), expected);
}

#[test]
fn engine_render_diffed_matches_explicit_keys() {
    let first_dump = fixture::read_fixture("network_settings.xml");
    let second_dump = first_dump.replace("Mobile network", "Mobile data");

    let mut engine = Engine::new();
    engine.render_diffed(&first_dump, PHONE);
    let text = engine.render_diffed(&second_dump, PHONE).text().to_string();

    let marked: Vec<&str> = text.lines().filter(|line| line.contains("* ")).collect();
    assert_eq!(marked, vec!["\t\t\t* Mobile data"]);
    assert_eq!(engine.resolve_center(3), Some(Point::new(540, 325)));
}

#[test]
fn legacy_filter_drops_off_screen_rows() {
    let dump = fixture::read_fixture("network_settings.xml");
    let filtered = legacy_filter_within(&dump, PHONE);

    assert!(filtered.starts_with("<hierarchy rotation=\"0\">\n  <node index=\"0\""));
    assert!(filtered.contains("text=\"Network &amp; internet\""));
    assert!(filtered.contains("text=\"Mobile network\""));
    assert!(!filtered.contains("Hotspot"));
    assert!(!filtered.contains("android.view.View\""));
    assert!(filtered.ends_with("</hierarchy>"));
    assert_eq!(filtered.matches("<node ").count(), 12);
}
