//! ParticipantId の生成

use uuid::Uuid;

use super::{error::ValueObjectError, value_object::ParticipantId};

/// 接続ごとの ParticipantId を払い出すファクトリ
pub struct ParticipantIdFactory;

impl ParticipantIdFactory {
    /// UUID v4 から新しい ParticipantId を生成
    pub fn generate() -> Result<ParticipantId, ValueObjectError> {
        ParticipantId::new(Uuid::new_v4().to_string())
    }
}
