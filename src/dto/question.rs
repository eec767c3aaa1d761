//! DTO definitions for question commands.
//!
//! Player indices use a three-way encoding: a missing field and an explicit `null` both address
//! the unassigned slot of a partitioned section, a number addresses that contestant's slot.
//! Flat sections ignore the field.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

use crate::{
    dto::validation::{validate_media_size, validate_player_index, validate_storage_name},
    state::sections::SectionKind,
};

/// Media file attached to a question. The file itself was uploaded beforehand.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct MediaInput {
    /// Name of the file inside the match folder.
    pub file_name: String,
    /// Declared size in bytes, at most 64 GiB.
    #[serde(default)]
    pub size: Option<u64>,
}

impl Validate for MediaInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Err(e) = validate_storage_name(&self.file_name) {
            errors.add("file_name", e);
        }
        if let Some(size) = self.size {
            if let Err(e) = validate_media_size(size) {
                errors.add("size", e);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Payload adding a question to a section.
#[derive(Debug, Deserialize, ToSchema)]
pub struct AddQuestionRequest {
    pub section: SectionKind,
    /// If not specified or null, targets the unassigned slot of a partitioned section.
    #[serde(default)]
    #[schema(value_type = Option<u8>)]
    pub player_index: Option<Option<u8>>,
    pub order: i64,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub question_text: Option<String>,
    pub answer: String,
    /// Defaults to 10 points.
    #[serde(default)]
    pub points: Option<u32>,
    #[serde(default)]
    pub time_limit: Option<u32>,
    #[serde(default)]
    pub media: Option<MediaInput>,
}

impl Validate for AddQuestionRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Some(Some(index)) = self.player_index {
            if let Err(e) = validate_player_index(index) {
                errors.add("player_index", e);
            }
        }

        if let Some(ref media) = self.media {
            if let Err(media_errors) = media.validate() {
                errors.merge_self("media", Err(media_errors));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Payload overwriting the fields of an existing question.
///
/// Fields that are not specified keep their current value. For nullable fields, an explicit
/// `null` clears the value.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateQuestionRequest {
    pub section: SectionKind,
    #[serde(default)]
    #[schema(value_type = Option<u8>)]
    pub player_index: Option<Option<u8>>,
    /// Current order of the question to update.
    pub order: i64,
    /// New order; the containing list is re-sorted.
    #[serde(default)]
    pub new_order: Option<i64>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub question_text: Option<Option<String>>,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub points: Option<u32>,
    #[serde(default)]
    #[schema(value_type = Option<u32>)]
    pub time_limit: Option<Option<u32>>,
    /// A new media reference replaces (and deletes) the previous file; `null` removes it.
    #[serde(default)]
    #[schema(value_type = Option<MediaInput>)]
    pub media: Option<Option<MediaInput>>,
}

impl Validate for UpdateQuestionRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Some(Some(index)) = self.player_index {
            if let Err(e) = validate_player_index(index) {
                errors.add("player_index", e);
            }
        }

        if let Some(Some(ref media)) = self.media {
            if let Err(media_errors) = media.validate() {
                errors.merge_self("media", Err(media_errors));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Coordinates of a question to delete.
#[derive(Debug, Deserialize, ToSchema)]
pub struct DeleteQuestionRequest {
    pub section: SectionKind,
    #[serde(default)]
    #[schema(value_type = Option<u8>)]
    pub player_index: Option<Option<u8>>,
    pub order: i64,
}

/// Answer of a question deletion; `deleted` is false when nothing matched the coordinates.
#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteQuestionResponse {
    pub deleted: bool,
}

/// Payload moving a question to another contestant's slot.
#[derive(Debug, Deserialize, ToSchema)]
pub struct AssignPlayerRequest {
    pub section: SectionKind,
    /// If not specified or null, the question is taken from the unassigned slot.
    #[serde(default)]
    #[schema(value_type = Option<u8>)]
    pub current_player_index: Option<Option<u8>>,
    pub order: i64,
    pub new_player_index: u8,
}

impl Validate for AssignPlayerRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Err(e) = validate_player_index(self.new_player_index) {
            errors.add("new_player_index", e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
