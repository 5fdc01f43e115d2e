//! Per-session settings controlled by the user.

use std::error::Error as StdError;
use std::fmt::{self, Display};
use std::str::FromStr;

/// Models the user can pick from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Model {
    /// `gpt-4`.
    #[default]
    Gpt4,
    /// `gpt-3.5-turbo`.
    Gpt35Turbo,
}

impl Model {
    /// All selectable models, in display order.
    pub const ALL: [Model; 2] = [Model::Gpt4, Model::Gpt35Turbo];

    /// Returns the identifier sent to the provider.
    #[inline]
    pub fn id(&self) -> &'static str {
        match self {
            Model::Gpt4 => "gpt-4",
            Model::Gpt35Turbo => "gpt-3.5-turbo",
        }
    }
}

impl Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Model {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Model::ALL
            .into_iter()
            .find(|model| model.id().eq_ignore_ascii_case(s))
            .ok_or_else(|| SettingsError::UnknownModel(s.to_owned()))
    }
}

/// Sampling temperature, kept in tenths so that it always sits on the
/// slider's 0.1 grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Temperature(u8);

impl Temperature {
    /// The lowest accepted value, 0.2.
    pub const MIN: Temperature = Temperature(2);
    /// The highest accepted value, 1.2.
    pub const MAX: Temperature = Temperature(12);
    /// The distance between two slider positions.
    pub const STEP: f32 = 0.1;

    /// Creates a temperature, rounding `value` to the nearest step.
    ///
    /// Fails if `value` is outside `[0.2, 1.2]`.
    pub fn new(value: f32) -> Result<Self, SettingsError> {
        // Tolerate the error of decimal literals like `1.2`.
        const EPSILON: f32 = 1e-4;
        let range =
            Self::MIN.value() - EPSILON..=Self::MAX.value() + EPSILON;
        if !range.contains(&value) {
            return Err(SettingsError::TemperatureOutOfRange(value));
        }
        let tenths = (value * 10.0).round() as u8;
        Ok(Self(tenths.clamp(Self::MIN.0, Self::MAX.0)))
    }

    /// Returns the value passed to the provider.
    #[inline]
    pub fn value(&self) -> f32 {
        f32::from(self.0) / 10.0
    }

    /// Moves the slider one step up, stopping at [`Temperature::MAX`].
    #[inline]
    pub fn step_up(self) -> Self {
        Self(self.0.saturating_add(1).min(Self::MAX.0))
    }

    /// Moves the slider one step down, stopping at [`Temperature::MIN`].
    #[inline]
    pub fn step_down(self) -> Self {
        Self(self.0.saturating_sub(1).max(Self::MIN.0))
    }

    /// Returns the slider position, `0` for [`Temperature::MIN`].
    #[inline]
    pub fn position(&self) -> usize {
        usize::from(self.0 - Self::MIN.0)
    }

    /// Returns the number of slider positions.
    #[inline]
    pub fn positions() -> usize {
        usize::from(Self::MAX.0 - Self::MIN.0) + 1
    }
}

impl Default for Temperature {
    #[inline]
    fn default() -> Self {
        Self(8)
    }
}

impl Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.value())
    }
}

impl FromStr for Temperature {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f32 = s
            .trim()
            .parse()
            .map_err(|_| SettingsError::InvalidTemperature(s.to_owned()))?;
        Self::new(value)
    }
}

/// Settings of one chat session. They live as long as the session and are
/// never persisted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SessionSettings {
    /// The model to sample from.
    pub model: Model,
    /// The sampling temperature.
    pub temperature: Temperature,
}

/// Error returned when a setting value is rejected.
#[derive(Clone, Debug, PartialEq)]
pub enum SettingsError {
    /// The model name is not one of [`Model::ALL`].
    UnknownModel(String),
    /// The temperature is not a number.
    InvalidTemperature(String),
    /// The temperature is outside `[0.2, 1.2]`.
    TemperatureOutOfRange(f32),
}

impl Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::UnknownModel(name) => {
                write!(f, "unknown model `{name}`")
            }
            SettingsError::InvalidTemperature(value) => {
                write!(f, "`{value}` is not a number")
            }
            SettingsError::TemperatureOutOfRange(value) => write!(
                f,
                "temperature {value} is outside [{}, {}]",
                Temperature::MIN,
                Temperature::MAX
            ),
        }
    }
}

impl StdError for SettingsError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = SessionSettings::default();
        assert_eq!(settings.model, Model::Gpt4);
        assert_eq!(settings.temperature.value(), 0.8);
    }

    #[test]
    fn test_parse_model() {
        assert_eq!("gpt-4".parse::<Model>(), Ok(Model::Gpt4));
        assert_eq!(
            " GPT-3.5-Turbo ".parse::<Model>(),
            Ok(Model::Gpt35Turbo)
        );
        assert_eq!(
            "gpt-5".parse::<Model>(),
            Err(SettingsError::UnknownModel("gpt-5".to_owned()))
        );
    }

    #[test]
    fn test_temperature_bounds() {
        assert_eq!(Temperature::new(0.2).unwrap(), Temperature::MIN);
        assert_eq!(Temperature::new(1.2).unwrap(), Temperature::MAX);
        assert_eq!(Temperature::MIN.value(), 0.2);
        assert_eq!(Temperature::MAX.value(), 1.2);

        for value in [0.1, 0.15, 1.25, 1.3, -1.0, f32::NAN, f32::INFINITY] {
            assert!(
                Temperature::new(value).is_err(),
                "{value} should be rejected"
            );
        }
    }

    #[test]
    fn test_temperature_snaps_to_steps() {
        assert_eq!(Temperature::new(0.74).unwrap().value(), 0.7);
        assert_eq!(Temperature::new(0.76).unwrap().value(), 0.8);
        assert_eq!(Temperature::new(1.04).unwrap().to_string(), "1.0");
    }

    #[test]
    fn test_temperature_steps() {
        let temp = Temperature::new(1.1).unwrap();
        assert_eq!(temp.step_up(), Temperature::MAX);
        assert_eq!(temp.step_up().step_up(), Temperature::MAX);
        assert_eq!(Temperature::MIN.step_down(), Temperature::MIN);
        assert_eq!(Temperature::MAX.step_down().value(), 1.1);
    }

    #[test]
    fn test_temperature_positions() {
        assert_eq!(Temperature::positions(), 11);
        assert_eq!(Temperature::MIN.position(), 0);
        assert_eq!(Temperature::default().position(), 6);
        assert_eq!(Temperature::MAX.position(), 10);
    }

    #[test]
    fn test_parse_temperature() {
        assert_eq!("0.5".parse::<Temperature>().unwrap().value(), 0.5);
        assert_eq!(
            "warm".parse::<Temperature>(),
            Err(SettingsError::InvalidTemperature("warm".to_owned()))
        );
        assert!(matches!(
            "1.5".parse::<Temperature>(),
            Err(SettingsError::TemperatureOutOfRange(_))
        ));
    }
}
