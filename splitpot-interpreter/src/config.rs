use rust_decimal::Decimal;
use splitpot_domain::{ParticipationRole, WeightError, WeightTable};
use std::{env, str::FromStr};
use thiserror::Error;

pub const WEIGHTS_VAR: &str = "SPLITPOT_WEIGHTS";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("SPLITPOT_WEIGHTS entry '{0}' is not of the form role=weight")]
    MalformedEntry(String),
    #[error("SPLITPOT_WEIGHTS names unknown role '{0}'")]
    UnknownRole(String),
    #[error("SPLITPOT_WEIGHTS has a non-numeric weight '{value}' for '{role}'")]
    InvalidNumber { role: ParticipationRole, value: String },
    #[error("SPLITPOT_WEIGHTS is not valid unicode")]
    NotUnicode,
    #[error(transparent)]
    Weight(#[from] WeightError),
}

/// Settings read from the environment, with `.env` loaded first when present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AppConfig {
    pub weights: WeightTable,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        let weights = match env::var(WEIGHTS_VAR) {
            Ok(raw) => parse_weights(&raw)?,
            Err(env::VarError::NotPresent) => WeightTable::default(),
            Err(env::VarError::NotUnicode(_)) => return Err(ConfigError::NotUnicode),
        };
        tracing::debug!(
            choose = %weights.weight(ParticipationRole::Choose),
            use_ = %weights.weight(ParticipationRole::Use),
            gift = %weights.weight(ParticipationRole::Gift),
            "Loaded weight table"
        );
        Ok(Self { weights })
    }
}

/// Parses `choose=1.1,use=1.0,gift=0.3`. Roles left out keep their default.
pub fn parse_weights(raw: &str) -> Result<WeightTable, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .try_fold(WeightTable::default(), |table, entry| {
            let (key, value) = entry
                .split_once('=')
                .ok_or_else(|| ConfigError::MalformedEntry(entry.to_string()))?;
            let role = parse_role(key.trim())?;
            let value = value.trim();
            let weight = Decimal::from_str(value).map_err(|_| ConfigError::InvalidNumber {
                role,
                value: value.to_string(),
            })?;
            Ok(table.with_weight(role, weight)?)
        })
}

fn parse_role(key: &str) -> Result<ParticipationRole, ConfigError> {
    ParticipationRole::ALL
        .into_iter()
        .find(|role| role.as_str().eq_ignore_ascii_case(key))
        .ok_or_else(|| ConfigError::UnknownRole(key.to_string()))
}
