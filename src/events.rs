//! Records pushed by the service: donations, donation goals and polls.
//!
//! These are plain decoded values. Absent numeric and boolean fields decode
//! as zero / `false`, absent strings as empty.

use serde::{Deserialize, Serialize};

use crate::Error;

/// Snapshot of the authorized user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub id: i32,
    pub socket_connection_token: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DonationEvent {
    /// Unique alert identifier.
    pub id: i32,
    /// Alert type, always `Donations` for this record.
    pub name: String,
    pub username: String,
    /// `text` or `audio`.
    pub message_type: String,
    pub message: String,
    pub amount: i32,
    /// ISO 4217 currency code.
    pub currency: String,
    /// Whether the alert was already shown in the streamer's widget.
    #[serde(deserialize_with = "flag")]
    pub is_shown: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GoalEvent {
    pub id: i32,
    #[serde(deserialize_with = "flag")]
    pub is_active: bool,
    pub title: String,
    pub currency: String,
    pub start_amount: i32,
    /// Raised so far, including `start_amount`.
    pub raised_amount: i32,
    pub goal_amount: i32,
    pub reason: String,
}

/// How the winner of a poll is computed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PollType {
    /// Most donations.
    #[default]
    Count,
    /// Largest donated sum.
    Sum,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollOption {
    pub id: i32,
    pub title: String,
    /// Number or sum of donations, depending on the poll type.
    pub amount_value: i32,
    /// Share relative to the other options.
    pub amount_percent: i32,
    /// Several options may be winners when they share the top `amount_value`.
    #[serde(deserialize_with = "flag")]
    pub is_winner: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollEvent {
    pub id: i32,
    #[serde(deserialize_with = "flag")]
    pub is_active: bool,
    pub title: String,
    #[serde(rename = "type")]
    pub poll_type: PollType,
    pub options: Vec<PollOption>,
    pub reason: String,
}

impl PollEvent {
    /// Every option flagged as winner, in poll order. Ties yield several.
    pub fn winners(&self) -> impl Iterator<Item = &PollOption> {
        self.options.iter().filter(|option| option.is_winner)
    }
}

macro_rules! impl_from_json {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $ty {
                /// Decode from a JSON payload. A `{"data": ...}` envelope is unwrapped.
                pub fn from_json(payload: &str) -> Result<Self, Error> {
                    decode(payload)
                }
            }
        )*
    };
}

impl_from_json!(UserProfile, DonationEvent, GoalEvent, PollEvent);

fn decode<T: serde::de::DeserializeOwned>(payload: &str) -> Result<T, Error> {
    let mut value: serde_json::Value = serde_json::from_str(payload)?;
    if value.get("data").is_some_and(serde_json::Value::is_object) {
        value = value["data"].take();
    }
    Ok(serde_json::from_value(value)?)
}

// The API sends flags as either JSON booleans or 0/1.
fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => b,
        Flag::Int(n) => n != 0,
    })
}
