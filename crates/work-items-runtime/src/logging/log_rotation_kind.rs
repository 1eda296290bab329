use schemars::JsonSchema;
use serde::Deserialize;
use tracing_appender::rolling::Rotation;

/// How often a new log file is started when logging to a directory
#[derive(Debug, Deserialize, JsonSchema, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LogRotationKind {
    Minutely,
    Hourly,
    Daily,
    Never,
}

impl From<LogRotationKind> for Rotation {
    fn from(kind: LogRotationKind) -> Self {
        match kind {
            LogRotationKind::Minutely => Rotation::MINUTELY,
            LogRotationKind::Hourly => Rotation::HOURLY,
            LogRotationKind::Daily => Rotation::DAILY,
            LogRotationKind::Never => Rotation::NEVER,
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("minutely", Rotation::MINUTELY)]
    #[case("hourly", Rotation::HOURLY)]
    #[case("daily", Rotation::DAILY)]
    #[case("never", Rotation::NEVER)]
    fn maps_onto_appender_rotation(#[case] yaml: &str, #[case] expected: Rotation) {
        let kind: LogRotationKind = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(Rotation::from(kind), expected);
    }
}
