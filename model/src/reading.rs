use serde::{Deserialize, Serialize};

/// A simulated machine temperature in whole degrees Celsius.
///
/// A reading is always within `Reading::MIN..=Reading::MAX`.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "u8", into = "u8")]
pub struct Reading(u8);

impl Reading {
    /// The lowest temperature the twin reports.
    pub const MIN: u8 = 10;

    /// The highest temperature the twin reports.
    pub const MAX: u8 = 50;

    /// Creates a reading, or `None` if `celsius` is out of range.
    pub fn new(celsius: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&celsius).then_some(Self(celsius))
    }

    pub fn celsius(self) -> u8 {
        self.0
    }

    /// Classification of this reading.
    pub fn status(self) -> TemperatureStatus {
        classify(self)
    }
}

impl std::fmt::Display for Reading {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}°C", self.0)
    }
}

/// A temperature outside `Reading::MIN..=Reading::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("temperature {0}°C is outside {min}..={max}", min = Reading::MIN, max = Reading::MAX)]
pub struct OutOfRange(pub u8);

impl TryFrom<u8> for Reading {
    type Error = OutOfRange;

    fn try_from(celsius: u8) -> Result<Self, Self::Error> {
        Self::new(celsius).ok_or(OutOfRange(celsius))
    }
}

impl From<Reading> for u8 {
    fn from(reading: Reading) -> Self {
        reading.0
    }
}

/// The temperature range a reading falls into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TemperatureStatus {
    Cool,
    Normal,
    Hot,
}

impl TemperatureStatus {
    /// Upper bound (inclusive) of the cool range.
    pub const COOL_MAX: u8 = 20;

    /// Upper bound (inclusive) of the normal range.
    pub const NORMAL_MAX: u8 = 35;

    /// Text shown next to the status dot.
    pub fn label(self) -> &'static str {
        match self {
            Self::Cool => "COOL",
            Self::Normal => "NORMAL",
            Self::Hot => "HOT",
        }
    }

    /// Style tag the UI maps to a color.
    pub fn style_tag(self) -> &'static str {
        match self {
            Self::Cool => "temp-cold",
            Self::Normal => "temp-normal",
            Self::Hot => "temp-hot",
        }
    }
}

impl std::fmt::Display for TemperatureStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Maps a reading to its status: up to 20°C is cool, up to 35°C normal, above that hot.
pub fn classify(reading: Reading) -> TemperatureStatus {
    match reading.celsius() {
        c if c <= TemperatureStatus::COOL_MAX => TemperatureStatus::Cool,
        c if c <= TemperatureStatus::NORMAL_MAX => TemperatureStatus::Normal,
        _ => TemperatureStatus::Hot,
    }
}

#[test]
fn test_reading_range() {
    assert_eq!(Reading::new(9), None);
    assert_eq!(Reading::new(10).map(Reading::celsius), Some(10));
    assert_eq!(Reading::new(50).map(Reading::celsius), Some(50));
    assert_eq!(Reading::new(51), None);
}

#[test]
fn test_classify_boundaries() {
    for celsius in Reading::MIN..=Reading::MAX {
        let status = classify(Reading::new(celsius).unwrap());

        let expected = if celsius <= 20 {
            TemperatureStatus::Cool
        } else if celsius <= 35 {
            TemperatureStatus::Normal
        } else {
            TemperatureStatus::Hot
        };

        assert_eq!(status, expected, "wrong status for {celsius}°C");
    }
}

#[test]
fn test_labels_and_tags() {
    let hot = Reading::new(42).unwrap();
    assert_eq!(hot.to_string(), "42°C");
    assert_eq!(hot.status().label(), "HOT");
    assert_eq!(hot.status().style_tag(), "temp-hot");

    assert_eq!(TemperatureStatus::Cool.to_string(), "COOL");
    assert_eq!(TemperatureStatus::Normal.style_tag(), "temp-normal");
    assert_eq!(TemperatureStatus::Cool.style_tag(), "temp-cold");
}

#[test]
fn test_reading_serde() {
    let reading: Reading = serde_json::from_str("21").unwrap();
    assert_eq!(reading.status(), TemperatureStatus::Normal);
    assert_eq!(serde_json::to_string(&reading).unwrap(), "21");

    let err = serde_json::from_str::<Reading>("60").unwrap_err();
    assert!(err.to_string().contains("outside 10..=50"));
}

#[test]
fn test_try_from_out_of_range() {
    assert_eq!(Reading::try_from(35).map(Reading::celsius), Ok(35));
    assert_eq!(Reading::try_from(51), Err(OutOfRange(51)));
    assert_eq!(
        OutOfRange(9).to_string(),
        "temperature 9°C is outside 10..=50"
    );
}
