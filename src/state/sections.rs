//! Typed access to the five sections of a match and the ordering invariants of their lists.
//!
//! Every list of questions (a flat section or a player slot) is kept sorted ascending by
//! `order`, with a stable tie-break so duplicate orders keep their insertion order. Player
//! slots are unique per index and kept sorted ascending by index; the unassigned slot
//! (`None`) sorts first.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::dao::models::{
    FlatSectionEntity, PartitionedSectionEntity, PlayerSlotEntity, QuestionEntity,
    SectionsEntity,
};

/// The five fixed sections of a match, named by their persisted keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum SectionKind {
    /// Individual warm-up, one slot per contestant.
    #[serde(rename = "khoi_dong_rieng")]
    SoloWarmup,
    /// Shared warm-up, open to every contestant.
    #[serde(rename = "khoi_dong_chung")]
    SharedWarmup,
    /// Obstacle round.
    #[serde(rename = "vcnv")]
    Obstacle,
    /// Acceleration round.
    #[serde(rename = "tang_toc")]
    Acceleration,
    /// Finish round, one slot per contestant.
    #[serde(rename = "ve_dich")]
    Finish,
}

impl SectionKind {
    /// Every section in document order.
    pub const ALL: [SectionKind; 5] = [
        SectionKind::SoloWarmup,
        SectionKind::SharedWarmup,
        SectionKind::Obstacle,
        SectionKind::Acceleration,
        SectionKind::Finish,
    ];

    /// Key used for the section in the persisted document.
    pub fn key(self) -> &'static str {
        match self {
            SectionKind::SoloWarmup => "khoi_dong_rieng",
            SectionKind::SharedWarmup => "khoi_dong_chung",
            SectionKind::Obstacle => "vcnv",
            SectionKind::Acceleration => "tang_toc",
            SectionKind::Finish => "ve_dich",
        }
    }

    /// Whether questions of this section are split into player slots.
    pub fn is_partitioned(self) -> bool {
        matches!(self, SectionKind::SoloWarmup | SectionKind::Finish)
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Mutable view on one section, resolved from its kind.
pub enum SectionMut<'a> {
    /// Section split into player slots.
    Partitioned(&'a mut PartitionedSectionEntity),
    /// Section holding a single list.
    Flat(&'a mut FlatSectionEntity),
}

impl SectionsEntity {
    /// Resolve a section by kind.
    pub fn section_mut(&mut self, kind: SectionKind) -> SectionMut<'_> {
        match kind {
            SectionKind::SoloWarmup => SectionMut::Partitioned(&mut self.khoi_dong_rieng),
            SectionKind::SharedWarmup => SectionMut::Flat(&mut self.khoi_dong_chung),
            SectionKind::Obstacle => SectionMut::Flat(&mut self.vcnv),
            SectionKind::Acceleration => SectionMut::Flat(&mut self.tang_toc),
            SectionKind::Finish => SectionMut::Partitioned(&mut self.ve_dich),
        }
    }

    /// Resolve a partitioned section, or `None` for flat kinds.
    pub fn partitioned_mut(&mut self, kind: SectionKind) -> Option<&mut PartitionedSectionEntity> {
        match self.section_mut(kind) {
            SectionMut::Partitioned(section) => Some(section),
            SectionMut::Flat(_) => None,
        }
    }

    /// Existing question list addressed by `(kind, player_index)`.
    ///
    /// The player index is ignored for flat sections.
    pub fn list_mut(
        &mut self,
        kind: SectionKind,
        player_index: Option<u8>,
    ) -> Option<&mut Vec<QuestionEntity>> {
        match self.section_mut(kind) {
            SectionMut::Partitioned(section) => section
                .slot_mut(player_index)
                .map(|slot| &mut slot.questions),
            SectionMut::Flat(section) => Some(&mut section.questions),
        }
    }

    /// Question list addressed by `(kind, player_index)`, creating the player slot if needed.
    pub fn list_or_insert(
        &mut self,
        kind: SectionKind,
        player_index: Option<u8>,
    ) -> &mut Vec<QuestionEntity> {
        match self.section_mut(kind) {
            SectionMut::Partitioned(section) => &mut section.slot_or_insert(player_index).questions,
            SectionMut::Flat(section) => &mut section.questions,
        }
    }

    /// Every question list of the match, flat sections and player slots alike.
    pub fn lists(&self) -> impl Iterator<Item = &Vec<QuestionEntity>> {
        slot_lists(&self.khoi_dong_rieng)
            .chain([
                &self.khoi_dong_chung.questions,
                &self.vcnv.questions,
                &self.tang_toc.questions,
            ])
            .chain(slot_lists(&self.ve_dich))
    }

    /// Every question of the match.
    pub fn questions(&self) -> impl Iterator<Item = &QuestionEntity> {
        self.lists().flatten()
    }
}

impl PartitionedSectionEntity {
    /// Slot owned by `player_index`, if any.
    pub fn slot_mut(&mut self, player_index: Option<u8>) -> Option<&mut PlayerSlotEntity> {
        self.players
            .iter_mut()
            .find(|slot| slot.player_index == player_index)
    }

    /// Slot owned by `player_index`, created (and slots re-sorted) when missing.
    pub fn slot_or_insert(&mut self, player_index: Option<u8>) -> &mut PlayerSlotEntity {
        let position = match self
            .players
            .iter()
            .position(|slot| slot.player_index == player_index)
        {
            Some(position) => position,
            None => {
                self.players.push(PlayerSlotEntity {
                    player_index,
                    questions: Vec::new(),
                });
                sort_slots(&mut self.players);
                self.players
                    .iter()
                    .position(|slot| slot.player_index == player_index)
                    .unwrap_or(self.players.len() - 1)
            }
        };

        &mut self.players[position]
    }

    /// Reassign player indices 0..n following each slot's first question order.
    ///
    /// Slots without questions go last. Used to repair documents whose slots were created
    /// without an index.
    pub fn reindex_by_first_order(&mut self) {
        self.players.sort_by_key(|slot| {
            slot.questions
                .first()
                .map_or(i64::MAX, |question| question.order)
        });

        for (index, slot) in self.players.iter_mut().enumerate() {
            slot.player_index = u8::try_from(index).ok();
        }
    }
}

fn slot_lists(
    section: &PartitionedSectionEntity,
) -> impl Iterator<Item = &Vec<QuestionEntity>> {
    section.players.iter().map(|slot| &slot.questions)
}

/// Sort player slots ascending by index; the unassigned slot comes first.
pub fn sort_slots(slots: &mut [PlayerSlotEntity]) {
    slots.sort_by_key(|slot| slot.player_index);
}

/// Append a question and re-establish the order of its list.
pub fn insert_ordered(list: &mut Vec<QuestionEntity>, question: QuestionEntity) {
    list.push(question);
    sort_questions(list);
}

/// Stable sort by `order`, keeping insertion order among duplicates.
pub fn sort_questions(list: &mut [QuestionEntity]) {
    list.sort_by_key(|question| question.order);
}

/// Detach the first question carrying `order`.
pub fn take_question(list: &mut Vec<QuestionEntity>, order: i64) -> Option<QuestionEntity> {
    let position = list.iter().position(|question| question.order == order)?;
    Some(list.remove(position))
}

/// First question carrying `order`.
pub fn find_question_mut(list: &mut [QuestionEntity], order: i64) -> Option<&mut QuestionEntity> {
    list.iter_mut().find(|question| question.order == order)
}
