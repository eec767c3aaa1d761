use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::ToSchema;

/// Status assigned to every freshly created match.
pub const INITIAL_STATUS: &str = "draft";
/// Every match is played by exactly four contestants.
pub const MAX_PLAYERS: u8 = 4;
/// Points awarded when a question does not specify its own value.
pub const DEFAULT_QUESTION_POINTS: u32 = 10;
/// Largest media file a question may declare (64 GiB).
pub const MAX_MEDIA_SIZE_BYTES: u64 = 64 * 1024 * 1024 * 1024;

/// Root of the `match.json` document persisted for every match.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct MatchDocument {
    /// Identity and lifecycle metadata of the match.
    #[serde(rename = "match")]
    pub info: MatchInfoEntity,
    /// Content of the five game sections.
    pub sections: SectionsEntity,
    /// Aggregated counters derived from the sections.
    pub statistics: StatisticsEntity,
}

/// Identity and lifecycle metadata of a match.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct MatchInfoEntity {
    /// Identifier assigned by the orchestrator; also the storage folder name.
    pub id: String,
    /// Short code shown to contestants.
    pub code: String,
    /// Display name of the match.
    pub name: String,
    /// Creation timestamp.
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: OffsetDateTime,
    /// Opaque status string owned by the orchestrator (`draft` on creation).
    pub status: String,
    /// Fixed contestant count.
    pub max_players: u8,
    /// Identifier of the data node owning this match.
    pub data_node_id: String,
    /// Human readable name of the owning data node.
    pub data_node_name: Option<String>,
}

/// The five fixed sections of a match.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct SectionsEntity {
    /// Individual warm-up round, partitioned per player.
    pub khoi_dong_rieng: PartitionedSectionEntity,
    /// Shared warm-up round.
    pub khoi_dong_chung: FlatSectionEntity,
    /// Obstacle round.
    pub vcnv: FlatSectionEntity,
    /// Acceleration round.
    pub tang_toc: FlatSectionEntity,
    /// Finish round, partitioned per player.
    pub ve_dich: PartitionedSectionEntity,
}

/// Declarative metadata attached to a section at creation time.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct SectionMetaEntity {
    /// Display title of the section.
    pub title: String,
    /// Nominal number of questions the section holds.
    pub total_questions: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub questions_per_player: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_limit_per_question: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points_per_question: Option<u32>,
    /// Delay (seconds) before answers are accepted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wait_time: Option<u32>,
}

/// Section whose questions are split into per-player slots.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct PartitionedSectionEntity {
    #[serde(flatten)]
    pub meta: SectionMetaEntity,
    /// Player slots, sorted by `player_index`.
    pub players: Vec<PlayerSlotEntity>,
}

/// Section holding a single ordered list of questions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct FlatSectionEntity {
    #[serde(flatten)]
    pub meta: SectionMetaEntity,
    /// Questions, sorted by `order`.
    pub questions: Vec<QuestionEntity>,
}

/// Questions owned by a single contestant inside a partitioned section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct PlayerSlotEntity {
    /// Contestant index (0..=3). `None` marks a slot not yet assigned to anyone and is
    /// persisted as an explicit `null`.
    pub player_index: Option<u8>,
    /// Questions, sorted by `order`.
    pub questions: Vec<QuestionEntity>,
}

/// A single quiz question.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct QuestionEntity {
    /// Caller-assigned position inside the containing list.
    pub order: i64,
    /// Question kind (text, image, video, audio...), opaque to the node.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub question_text: Option<String>,
    pub answer: String,
    #[serde(default = "default_points")]
    pub points: u32,
    /// Per-question time limit in seconds.
    #[serde(default)]
    pub time_limit: Option<u32>,
    /// Name of the media file stored in the match folder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_file: Option<String>,
    /// Stream address derived from the node address and `media_file`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    /// Declared size of the media file in bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_size: Option<u64>,
}

impl QuestionEntity {
    /// Whether the question references a media file.
    pub fn has_media(&self) -> bool {
        self.media_file.is_some()
    }

    /// Bytes contributed to the statistics by this question's media.
    pub fn media_bytes(&self) -> u64 {
        if self.has_media() {
            self.media_size.unwrap_or(0)
        } else {
            0
        }
    }
}

fn default_points() -> u32 {
    DEFAULT_QUESTION_POINTS
}

/// Counters kept consistent with section content.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct StatisticsEntity {
    pub total_questions: u64,
    pub total_media_files: u64,
    pub total_size_bytes: u64,
    /// Identity of whoever created the match.
    pub created_by: String,
    /// Timestamp of the last committed mutation.
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String, format = DateTime)]
    pub last_updated: OffsetDateTime,
}

/// Subset of a match listed by the storage scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSummaryEntity {
    pub id: String,
    pub code: String,
    pub name: String,
    pub status: String,
    pub created_at: OffsetDateTime,
    pub total_questions: u64,
    pub total_media_files: u64,
    pub total_size_bytes: u64,
}

impl From<MatchDocument> for MatchSummaryEntity {
    fn from(document: MatchDocument) -> Self {
        Self {
            id: document.info.id,
            code: document.info.code,
            name: document.info.name,
            status: document.info.status,
            created_at: document.info.created_at,
            total_questions: document.statistics.total_questions,
            total_media_files: document.statistics.total_media_files,
            total_size_bytes: document.statistics.total_size_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_defaults_when_fields_are_missing() {
        let question: QuestionEntity =
            serde_json::from_str(r#"{"order": 3, "type": "text", "answer": "Hà Nội"}"#).unwrap();

        assert_eq!(question.points, DEFAULT_QUESTION_POINTS);
        assert_eq!(question.question_text, None);
        assert!(!question.has_media());
        assert_eq!(question.media_bytes(), 0);
    }

    #[test]
    fn unassigned_slot_is_persisted_as_null() {
        let slot = PlayerSlotEntity {
            player_index: None,
            questions: Vec::new(),
        };

        let value = serde_json::to_value(&slot).unwrap();
        assert!(value.get("player_index").unwrap().is_null());
    }

    #[test]
    fn section_metadata_is_flattened() {
        let raw = r#"{
            "title": "Về Đích",
            "total_questions": 12,
            "questions_per_player": 3,
            "players": []
        }"#;

        let section: PartitionedSectionEntity = serde_json::from_str(raw).unwrap();
        assert_eq!(section.meta.questions_per_player, Some(3));
        assert_eq!(section.meta.wait_time, None);

        let value = serde_json::to_value(&section).unwrap();
        assert_eq!(value["title"], "Về Đích");
        assert!(value.get("wait_time").is_none());
    }
}
