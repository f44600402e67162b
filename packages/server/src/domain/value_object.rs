//! 値オブジェクト
//!
//! 生成時に検証を行い、以降は不変として扱う。

use std::fmt;

use super::error::ValueObjectError;

/// RoomId の最大文字数
pub const MAX_ROOM_ID_CHARS: usize = 64;
/// DisplayName の最大文字数
pub const MAX_DISPLAY_NAME_CHARS: usize = 32;
/// CodeSnapshot の最大バイト数 (1 MiB)
pub const MAX_CODE_BYTES: usize = 1024 * 1024;

/// 接続ごとに relay が払い出す識別子
///
/// 接続の寿命の間だけ一意であり、再利用されない。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticipantId(String);

impl ParticipantId {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.is_empty() {
            return Err(ValueObjectError::Empty {
                field: "participant id",
            });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for ParticipantId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 呼び出し側が指定するルーム ID
///
/// 衝突検知は行わない。同じ ID を使えば同じルームに入る。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomId(String);

impl RoomId {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        let value = value.trim().to_string();
        if value.is_empty() {
            return Err(ValueObjectError::Empty { field: "room id" });
        }
        let chars = value.chars().count();
        if chars > MAX_ROOM_ID_CHARS {
            return Err(ValueObjectError::TooLong {
                field: "room id",
                max: MAX_ROOM_ID_CHARS,
                actual: chars,
                unit: "characters",
            });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for RoomId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 参加者の表示名（一意である必要はない）
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DisplayName(String);

impl DisplayName {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        let value = value.trim().to_string();
        if value.is_empty() {
            return Err(ValueObjectError::Empty { field: "username" });
        }
        let chars = value.chars().count();
        if chars > MAX_DISPLAY_NAME_CHARS {
            return Err(ValueObjectError::TooLong {
                field: "username",
                max: MAX_DISPLAY_NAME_CHARS,
                actual: chars,
                unit: "characters",
            });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for DisplayName {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// コードバッファ全体のスナップショット（差分ではない）
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CodeSnapshot(String);

impl CodeSnapshot {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.len() > MAX_CODE_BYTES {
            return Err(ValueObjectError::TooLong {
                field: "code",
                max: MAX_CODE_BYTES,
                actual: value.len(),
                unit: "bytes",
            });
        }
        Ok(Self(value))
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for CodeSnapshot {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Unix タイムスタンプ（ミリ秒）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}
