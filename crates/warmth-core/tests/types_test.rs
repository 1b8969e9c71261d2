use std::str::FromStr;

use warmth_core::models::HistoryWindow;
use warmth_core::{Band, DecayMode, InteractionKind, WarmthError};

#[test]
fn band_thresholds() {
    assert_eq!(Band::from_score(100), Band::Hot);
    assert_eq!(Band::from_score(80), Band::Hot);
    assert_eq!(Band::from_score(79), Band::Warm);
    assert_eq!(Band::from_score(60), Band::Warm);
    assert_eq!(Band::from_score(59), Band::Neutral);
    assert_eq!(Band::from_score(40), Band::Neutral);
    assert_eq!(Band::from_score(39), Band::Cool);
    assert_eq!(Band::from_score(20), Band::Cool);
    assert_eq!(Band::from_score(19), Band::Cold);
    assert_eq!(Band::from_score(0), Band::Cold);
}

#[test]
fn bands_are_ordered_cold_to_hot() {
    assert!(Band::Cold < Band::Cool);
    assert!(Band::Cool < Band::Neutral);
    assert!(Band::Neutral < Band::Warm);
    assert!(Band::Warm < Band::Hot);
}

#[test]
fn mode_parsing_is_case_insensitive_and_strict() {
    assert_eq!(DecayMode::from_str("FAST").unwrap(), DecayMode::Fast);
    assert_eq!(DecayMode::from_str(" slow ").unwrap(), DecayMode::Slow);
    let err = DecayMode::from_str("turbo").unwrap_err();
    assert!(matches!(err, WarmthError::UnknownMode { name } if name == "turbo"));
}

#[test]
fn mode_display_roundtrips_through_from_str() {
    for mode in DecayMode::ALL {
        assert_eq!(DecayMode::from_str(&mode.to_string()).unwrap(), mode);
    }
}

#[test]
fn unknown_interaction_kinds_fall_back_to_other() {
    assert_eq!(InteractionKind::parse("meeting"), InteractionKind::Meeting);
    assert_eq!(InteractionKind::parse("Email"), InteractionKind::Email);
    assert_eq!(InteractionKind::parse("carrier pigeon"), InteractionKind::Other);
    assert_eq!(InteractionKind::parse(""), InteractionKind::Other);
}

#[test]
fn mode_serializes_as_lowercase_name() {
    let json = serde_json::to_string(&DecayMode::Medium).unwrap();
    assert_eq!(json, "\"medium\"");
    let band: Band = serde_json::from_str("\"neutral\"").unwrap();
    assert_eq!(band, Band::Neutral);
}

#[test]
fn history_window_falls_back_to_thirty_days() {
    assert_eq!(HistoryWindow::parse_or_default("7d"), HistoryWindow::Week);
    assert_eq!(HistoryWindow::parse_or_default("90d"), HistoryWindow::Quarter);
    assert_eq!(HistoryWindow::parse_or_default("180d"), HistoryWindow::Month);
    assert_eq!(HistoryWindow::Month.duration().num_days(), 30);
}
