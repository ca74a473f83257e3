use relay_schema::gemini::{HarmBlockThreshold, HarmCategory, SafetySetting};

/// Content-filter relaxation sent with Gemini audit calls: every category at `BLOCK_NONE`.
pub static SAFETY_POLICY: [SafetySetting; 4] = [
    SafetySetting {
        category: HarmCategory::HarmCategoryHarassment,
        threshold: HarmBlockThreshold::BlockNone,
    },
    SafetySetting {
        category: HarmCategory::HarmCategoryHateSpeech,
        threshold: HarmBlockThreshold::BlockNone,
    },
    SafetySetting {
        category: HarmCategory::HarmCategorySexuallyExplicit,
        threshold: HarmBlockThreshold::BlockNone,
    },
    SafetySetting {
        category: HarmCategory::HarmCategoryDangerousContent,
        threshold: HarmBlockThreshold::BlockNone,
    },
];
