use time::OffsetDateTime;

use crate::dao::models::{
    FlatSectionEntity, INITIAL_STATUS, MAX_PLAYERS, MatchDocument, MatchInfoEntity,
    PartitionedSectionEntity, SectionMetaEntity, SectionsEntity, StatisticsEntity,
};

/// Build the initial document of a match: status `draft`, five empty sections carrying their
/// fixed metadata and zeroed statistics.
pub fn new_match_document(
    id: &str,
    name: &str,
    code: &str,
    data_node_id: &str,
    data_node_name: Option<&str>,
    created_by: &str,
) -> MatchDocument {
    let now = OffsetDateTime::now_utc();

    MatchDocument {
        info: MatchInfoEntity {
            id: id.to_owned(),
            code: code.to_owned(),
            name: name.to_owned(),
            created_at: now,
            status: INITIAL_STATUS.to_owned(),
            max_players: MAX_PLAYERS,
            data_node_id: data_node_id.to_owned(),
            data_node_name: data_node_name.map(str::to_owned),
        },
        sections: default_sections(),
        statistics: StatisticsEntity {
            total_questions: 0,
            total_media_files: 0,
            total_size_bytes: 0,
            created_by: created_by.to_owned(),
            last_updated: now,
        },
    }
}

/// Empty sections with the metadata of the show format.
pub fn default_sections() -> SectionsEntity {
    SectionsEntity {
        khoi_dong_rieng: PartitionedSectionEntity {
            meta: SectionMetaEntity {
                title: "Khởi Động Riêng".into(),
                total_questions: 24,
                questions_per_player: Some(6),
                time_limit_per_question: Some(10),
                points_per_question: Some(10),
                wait_time: None,
            },
            players: Vec::new(),
        },
        khoi_dong_chung: FlatSectionEntity {
            meta: SectionMetaEntity {
                title: "Khởi Động Chung".into(),
                total_questions: 12,
                wait_time: Some(3),
                ..Default::default()
            },
            questions: Vec::new(),
        },
        vcnv: FlatSectionEntity {
            meta: SectionMetaEntity {
                title: "Vượt Chướng Ngại Vật".into(),
                total_questions: 6,
                ..Default::default()
            },
            questions: Vec::new(),
        },
        tang_toc: FlatSectionEntity {
            meta: SectionMetaEntity {
                title: "Tăng Tốc".into(),
                total_questions: 4,
                ..Default::default()
            },
            questions: Vec::new(),
        },
        ve_dich: PartitionedSectionEntity {
            meta: SectionMetaEntity {
                title: "Về Đích".into(),
                total_questions: 12,
                questions_per_player: Some(3),
                ..Default::default()
            },
            players: Vec::new(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_document_starts_as_empty_draft() {
        let document = new_match_document("m1", "Trận 1", "ABC123", "node-a", Some("Node A"), "admin");

        assert_eq!(document.info.status, "draft");
        assert_eq!(document.info.max_players, 4);
        assert_eq!(document.info.data_node_name.as_deref(), Some("Node A"));
        assert_eq!(document.sections.questions().count(), 0);
        assert_eq!(document.statistics.total_questions, 0);
        assert_eq!(document.statistics.created_by, "admin");
        assert_eq!(document.info.created_at, document.statistics.last_updated);
    }

    #[test]
    fn persisted_layout_uses_section_keys() {
        let document = new_match_document("m1", "Trận 1", "ABC123", "node-a", None, "admin");
        let value = serde_json::to_value(&document).unwrap();

        assert_eq!(value["match"]["id"], "m1");
        assert_eq!(value["sections"]["khoi_dong_rieng"]["questions_per_player"], 6);
        assert_eq!(value["sections"]["khoi_dong_chung"]["wait_time"], 3);
        assert!(value["sections"]["ve_dich"]["players"].is_array());
        assert!(value["sections"]["tang_toc"]["questions"].is_array());
        assert_eq!(value["statistics"]["total_size_bytes"], 0);
    }
}
