//! 値オブジェクト
//!
//! ID やスコアなど、ドメインで扱うプリミティブな値を型で区別します。

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::ValueObjectError;

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            pub fn new(value: Uuid) -> Self {
                Self(value)
            }

            /// ランダムな ID を生成
            pub fn generate() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = ValueObjectError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Uuid::parse_str(value.trim())
                    .map(Self)
                    .map_err(|_| ValueObjectError::InvalidId(value.to_string()))
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValueObjectError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::try_from(value.as_str())
            }
        }
    };
}

uuid_id!(
    /// ユーザー ID（認証コラボレータが解決する不透明なトークン）
    UserId
);
uuid_id!(
    /// ルーム ID
    RoomId
);
uuid_id!(
    /// チーム ID
    TeamId
);
uuid_id!(
    /// 参加者 ID
    ParticipantId
);

/// ルーム表示名（1〜64 文字）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomName(String);

impl RoomName {
    pub const MAX_CHARS: usize = 64;

    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        let value = value.trim().to_string();
        match value.chars().count() {
            0 => Err(ValueObjectError::EmptyName),
            n if n > Self::MAX_CHARS => Err(ValueObjectError::NameTooLong {
                max: Self::MAX_CHARS,
            }),
            _ => Ok(Self(value)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// チーム表示名（1〜32 文字）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamName(String);

impl TeamName {
    pub const MAX_CHARS: usize = 32;

    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        let value = value.trim().to_string();
        match value.chars().count() {
            0 => Err(ValueObjectError::EmptyName),
            n if n > Self::MAX_CHARS => Err(ValueObjectError::NameTooLong {
                max: Self::MAX_CHARS,
            }),
            _ => Ok(Self(value)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// 招待コード（invite-only ルームのみが持つ）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InviteCode(String);

impl InviteCode {
    pub const LENGTH: usize = 20;

    /// 英数字 20 文字のランダムな招待コードを生成
    pub fn generate() -> Self {
        use rand::{Rng, distr::Alphanumeric};

        let code = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(Self::LENGTH)
            .map(char::from)
            .collect();
        Self(code)
    }

    pub fn new(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// 1 ターンで得た得点
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Score(i64);

impl Score {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// advance リクエストの得点指定
///
/// `NoScore` は前のターンを締めずに現在の話者を再通知するための番兵値です。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreDelta {
    NoScore,
    Points(Score),
}

impl From<Option<i64>> for ScoreDelta {
    fn from(value: Option<i64>) -> Self {
        match value {
            Some(points) => Self::Points(Score::new(points)),
            None => Self::NoScore,
        }
    }
}

/// ゲームのラウンド数（1 以上）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NumberOfRounds(u32);

impl NumberOfRounds {
    pub const MAX: u32 = 100;

    pub fn new(value: u32) -> Result<Self, ValueObjectError> {
        if value == 0 || value > Self::MAX {
            return Err(ValueObjectError::InvalidNumberOfRounds {
                value,
                max: Self::MAX,
            });
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

/// Unix タイムスタンプ（ミリ秒）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}
