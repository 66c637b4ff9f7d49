use formats::Row;

/// Column names as they appear in the source table.
pub mod columns {
    pub const HEADWORD: &str = "المدخل";
    pub const TRANSCRIPTION: &str = "الكتابة الصّوتية";
    pub const LOCATION: &str = "الموقع/المواقع الجغرافي(ة)";
    pub const MEANING: &str = "الدلالة";
    pub const IMAGE: &str = "صورة";
    pub const AUDIO: &str = "تسجيل صوتي";
}

/// The display fields of one dictionary entry. Every field defaults to empty
/// when its column is absent, so partial tables still render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DictEntry {
    pub headword: String,
    pub transcription: String,
    pub location: String,
    pub meaning: String,
    pub image: String,
    pub audio: String,
}

impl DictEntry {
    pub fn from_row(row: &Row<'_>) -> Self {
        Self {
            headword: row.field(columns::HEADWORD).to_string(),
            transcription: row.field(columns::TRANSCRIPTION).to_string(),
            location: row.field(columns::LOCATION).to_string(),
            meaning: row.field(columns::MEANING).to_string(),
            image: row.field(columns::IMAGE).to_string(),
            audio: row.field(columns::AUDIO).to_string(),
        }
    }

    /// What the map's search box matches against.
    pub fn search_text(&self) -> String {
        format!("{} {}", self.headword, self.transcription)
    }
}
