//! Loading `StepsConfig` from files on disk.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use horizon_steps::animation::Easing;
use horizon_steps::runtime::ManualClock;
use horizon_steps::{Color, ConfigError, IndexPolicy, Step, StepsConfig, StepsView};

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn load_full_config() {
    let file = write_config(
        r##"
        min_scale = 0.5
        animation_duration_ms = 400
        skew_factor = 0.2
        easing = "ease-out-cubic"
        line_thickness = 3.0
        step_spacing = 120.0
        index_policy = "reject"

        [theme]
        primary = "#34C759"
        disabled = "#C7C7CC"
        current = "#FF9500"
        "##,
    );

    let config = StepsConfig::load(file.path()).unwrap();
    assert_eq!(config.min_scale, 0.5);
    assert_eq!(config.animation_duration(), Duration::from_millis(400));
    assert_eq!(config.skew_factor, 0.2);
    assert_eq!(config.easing, Easing::EaseOutCubic);
    assert_eq!(config.line_thickness, 3.0);
    assert_eq!(config.step_spacing, 120.0);
    assert_eq!(config.index_policy, IndexPolicy::Reject);
    assert_eq!(config.theme.current, Some(Color::rgb(0xFF, 0x95, 0x00)));
    assert_eq!(config.theme.uncompleted, None);
}

#[test]
fn missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("steps.toml");

    let err = StepsConfig::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Io { path: ref p, .. } if *p == path));
    assert!(err.to_string().contains("steps.toml"));
}

#[test]
fn load_or_default_falls_back() {
    let file = write_config("min_scale = 2.0");
    assert_eq!(StepsConfig::load_or_default(file.path()), StepsConfig::default());

    let dir = tempfile::tempdir().unwrap();
    assert_eq!(
        StepsConfig::load_or_default(dir.path().join("absent.toml")),
        StepsConfig::default()
    );
}

#[test]
fn loaded_config_drives_the_view() {
    let file = write_config("min_scale = 0.5\nanimation_duration_ms = 100\neasing = \"linear\"");
    let config = StepsConfig::load(file.path()).unwrap();

    let clock = Arc::new(ManualClock::default());
    let view = StepsView::new(vec![Step::new("a"), Step::new("b")], config, clock.clone()).unwrap();

    view.advance();
    assert_eq!(view.separators()[0].target_scale(), 0.5);

    view.frame(clock.advance(Duration::from_millis(100)));
    assert_eq!(view.separators()[0].target_scale(), 1.0);
}
