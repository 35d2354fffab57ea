use digital_twin_model::{TemperatureStatus, TwinSnapshot};
use slint::SharedString;

use crate::TwinView;

/// The current local time, shown as the time of the last update.
pub fn timestamp() -> SharedString {
    SharedString::from(chrono::Local::now().format("%H:%M:%S").to_string())
}

/// Convert a snapshot of the twin into what the card displays.
pub fn twin_view(snapshot: &TwinSnapshot, updated_at: SharedString) -> TwinView {
    let status = snapshot.status();

    TwinView {
        has_reading: snapshot.reading.is_some(),
        temperature: snapshot
            .reading
            .map(|reading| SharedString::from(reading.to_string()))
            .unwrap_or_default(),
        status: status.map(TemperatureStatus::label).unwrap_or_default().into(),
        style: status.map(TemperatureStatus::style_tag).unwrap_or_default().into(),
        monitoring: snapshot.monitoring,
        machine_status: snapshot.machine_status().label().into(),
        updated_at,
    }
}

#[test]
fn test_view_without_reading() {
    let view = twin_view(&TwinSnapshot::default(), SharedString::default());

    assert!(!view.has_reading);
    assert!(!view.monitoring);
    assert_eq!(view.temperature, "");
    assert_eq!(view.status, "");
    assert_eq!(view.style, "");
    assert_eq!(view.machine_status, "STANDBY");
}

#[test]
fn test_view_while_monitoring() {
    let snapshot = TwinSnapshot {
        reading: digital_twin_model::Reading::new(18),
        monitoring: true,
    };
    let view = twin_view(&snapshot, "12:00:05".into());

    assert!(view.has_reading);
    assert_eq!(view.temperature, "18°C");
    assert_eq!(view.status, "COOL");
    assert_eq!(view.style, "temp-cold");
    assert_eq!(view.machine_status, "ONLINE");
    assert_eq!(view.updated_at, "12:00:05");
}

#[test]
fn test_timestamp_format() {
    let stamp = timestamp();

    assert_eq!(stamp.len(), 8);
    assert_eq!(stamp.matches(':').count(), 2);
}
