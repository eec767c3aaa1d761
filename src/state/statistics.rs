use time::OffsetDateTime;

use crate::{
    dao::models::{MatchDocument, SectionsEntity},
    error::ServiceError,
};

/// Counters derived from section content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    /// Number of questions over every list.
    pub questions: u64,
    /// Number of questions referencing a media file.
    pub media_files: u64,
    /// Sum of the declared media sizes, in bytes.
    pub size_bytes: u64,
}

impl Totals {
    /// Sum the counters over every list of every section.
    ///
    /// Returns `None` when the declared media sizes do not fit in a `u64`.
    pub fn of(sections: &SectionsEntity) -> Option<Self> {
        sections
            .questions()
            .try_fold(Totals::default(), |mut totals, question| {
                totals.questions += 1;
                if question.has_media() {
                    totals.media_files += 1;
                    totals.size_bytes = totals.size_bytes.checked_add(question.media_bytes())?;
                }
                Some(totals)
            })
    }

    /// Counters currently recorded in the document's statistics.
    pub fn recorded(document: &MatchDocument) -> Self {
        Self {
            questions: document.statistics.total_questions,
            media_files: document.statistics.total_media_files,
            size_bytes: document.statistics.total_size_bytes,
        }
    }
}

/// Recompute the statistics counters from the sections and stamp `last_updated`.
///
/// Called by every mutation right before the document is written back. Fails without touching
/// the statistics when the media sizes overflow the byte counter.
pub fn refresh(document: &mut MatchDocument) -> Result<(), ServiceError> {
    let totals = Totals::of(&document.sections).ok_or_else(|| {
        ServiceError::InvalidInput(format!(
            "total media size of match `{}` exceeds {} bytes",
            document.info.id,
            u64::MAX
        ))
    })?;
    let statistics = &mut document.statistics;
    statistics.total_questions = totals.questions;
    statistics.total_media_files = totals.media_files;
    statistics.total_size_bytes = totals.size_bytes;
    statistics.last_updated = OffsetDateTime::now_utc();
    Ok(())
}

/// Whether the recorded counters match the section content.
pub fn is_consistent(document: &MatchDocument) -> bool {
    Totals::of(&document.sections) == Some(Totals::recorded(document))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        dao::models::QuestionEntity,
        state::{document::new_match_document, sections::SectionKind},
    };

    fn media_question(order: i64, file: Option<&str>, size: Option<u64>) -> QuestionEntity {
        QuestionEntity {
            order,
            kind: "video".into(),
            question_text: None,
            answer: "x".into(),
            points: 10,
            time_limit: None,
            media_file: file.map(str::to_owned),
            media_url: None,
            media_size: size,
        }
    }

    #[test]
    fn refresh_counts_questions_and_media_across_sections() {
        let mut document = new_match_document("m1", "Trận", "C", "node", None, "admin");
        let before = document.statistics.last_updated;
        let sections = &mut document.sections;
        sections
            .list_or_insert(SectionKind::SoloWarmup, Some(0))
            .push(media_question(1, Some("a.mp4"), Some(100)));
        sections
            .list_or_insert(SectionKind::Finish, None)
            .push(media_question(1, Some("b.png"), None));
        sections
            .list_or_insert(SectionKind::Obstacle, None)
            .push(media_question(1, None, Some(999)));

        assert!(!is_consistent(&document));
        refresh(&mut document).unwrap();

        assert!(is_consistent(&document));
        assert_eq!(
            Totals::recorded(&document),
            Totals {
                questions: 3,
                media_files: 2,
                size_bytes: 100,
            }
        );
        assert!(document.statistics.last_updated >= before);
    }

    #[test]
    fn refresh_rejects_media_sizes_overflowing_the_byte_counter() {
        let mut document = new_match_document("m1", "Trận", "C", "node", None, "admin");
        let sections = &mut document.sections;
        sections
            .list_or_insert(SectionKind::Obstacle, None)
            .push(media_question(1, Some("huge.mp4"), Some(u64::MAX)));
        refresh(&mut document).unwrap();
        let recorded = document.statistics.clone();

        document
            .sections
            .list_or_insert(SectionKind::Obstacle, None)
            .push(media_question(2, Some("small.png"), Some(2)));
        let err = refresh(&mut document).unwrap_err();

        assert!(matches!(err, ServiceError::InvalidInput(_)));
        assert_eq!(document.statistics, recorded);
        assert_eq!(Totals::of(&document.sections), None);
    }
}
