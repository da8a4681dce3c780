//! User-visible fixed strings, one catalogue per language.
//!
//! Every message the session shows on its own behalf (status lines, the
//! confirmation after a successful upload, the fixed error texts and the
//! empty-answer fallback) comes from here so that switching [`Locale`]
//! switches the whole experience, grounding prompt included.

use serde::{Deserialize, Serialize};

/// Language of the assistant's fixed messages and grounding prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Locale {
    /// English (default).
    #[default]
    English,
    /// Myanmar (Burmese, Unicode).
    Myanmar,
}

impl Locale {
    /// Parse a CLI-style locale tag (`en`, `english`, `my`, `myanmar`, `burmese`).
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_lowercase().as_str() {
            "en" | "eng" | "english" => Some(Locale::English),
            "my" | "mya" | "myanmar" | "burmese" => Some(Locale::Myanmar),
            _ => None,
        }
    }

    /// The message catalogue for this locale.
    pub fn messages(self) -> &'static Messages {
        match self {
            Locale::English => &ENGLISH,
            Locale::Myanmar => &MYANMAR,
        }
    }
}

/// A catalogue of fixed strings.
///
/// Strings containing `{name}` or `{page}` are templates; use the helper
/// methods rather than formatting them by hand.
#[derive(Debug)]
pub struct Messages {
    pub page_marker: &'static str,
    pub reading_notice: &'static str,
    pub document_ready: &'static str,
    pub extraction_failed: &'static str,
    pub generation_failed: &'static str,
    pub empty_answer_fallback: &'static str,
    pub upload_prompt: &'static str,
    pub analysing_notice: &'static str,
    pub query_placeholder: &'static str,
    pub grounding_template: &'static str,
}

impl Messages {
    /// Marker line placed before each page's text (`page` is 1-indexed).
    pub fn page_marker(&self, page: usize) -> String {
        self.page_marker.replace("{page}", &page.to_string())
    }

    /// Transient notice shown while `name` is being read.
    pub fn reading_notice(&self, name: &str) -> String {
        self.reading_notice.replace("{name}", name)
    }
}

static ENGLISH: Messages = Messages {
    page_marker: "--- Page {page} ---",
    reading_notice: "Reading '{name}'. Please wait a moment.",
    document_ready: "The document was loaded successfully. You can start asking questions.",
    extraction_failed: "An error occurred while reading the PDF file. Please check that the file type is correct.",
    generation_failed: "An error occurred while contacting the API. Please try again.",
    empty_answer_fallback: "Sorry, no response could be obtained.",
    upload_prompt: "To get started, please upload a PDF file containing the information.",
    analysing_notice: "Analysing the PDF file...",
    query_placeholder: "Ask a question...",
    grounding_template: ENGLISH_GROUNDING_TEMPLATE,
};

static MYANMAR: Messages = Messages {
    page_marker: "--- စာမျက်နှာ {page} ---",
    reading_notice: "\"'{name}'\" ကို စတင်ဖတ်ရှုနေပါသည်။ ခေတ္တစောင့်ဆိုင်းပေးပါ။",
    document_ready: "စာရွက်စာတမ်းကို အောင်မြင်စွာ ထည့်သွင်းပြီးပါပြီ။ မေးခွန်းများ စတင်မေးမြန်းနိုင်ပါပြီ။",
    extraction_failed: "PDF ဖိုင်ကို ဖတ်ရာတွင် အမှားအယွင်း ဖြစ်ပွားပါသည်။ ကျေးဇူးပြု၍ ဖိုင်အမျိုးအစား မှန်ကန်မှုရှိမရှိ စစ်ဆေးပါ။",
    generation_failed: "API နှင့် ချိတ်ဆက်ရာတွင် အမှားအယွင်း ဖြစ်ပွားပါသည်။ နောက်တစ်ကြိမ် ထပ်မံကြိုးစားပေးပါ။",
    empty_answer_fallback: "တောင်းပန်ပါသည်။ တုံ့ပြန်မှုတစ်ခု ရယူနိုင်ခြင်း မရှိပါ။",
    upload_prompt: "စတင်ရန်အတွက်၊ ကျေးဇူးပြု၍ အချက်အလက်များပါဝင်သော PDF ဖိုင်ကို ထည့်သွင်းပါ။",
    analysing_notice: "PDF ဖိုင်ကို စိစစ်နေပါသည်...",
    query_placeholder: "မေးခွန်းတစ်ခု မေးပါ...",
    grounding_template: MYANMAR_GROUNDING_TEMPLATE,
};

const ENGLISH_GROUNDING_TEMPLATE: &str = r#"Role: You are an Assistant Partner for the organisation's staff. Answer their questions based ONLY on the information in the PDF document provided below.

Strict Rules (follow exactly):
1. Source Material Only: Answer using 100% the facts contained in the document below. Do NOT use your own general knowledge or any outside information.
2. Out of Scope: If the question is not covered by the document, do not guess. Reply politely with exactly: "This information is not included in the provided documents, so I cannot answer it."
3. Citations: At the end of every answer, state precisely which page the information was taken from, in this format: `(Source - Page X)`.
4. Tone & Language: Answer in formal, courteous language.
5. Formatting: Do not answer in long paragraphs. Use bullet points (•) and present one point at a time.
6. Clarification: If the question is unclear or incomplete, ask follow-up questions to confirm the details.
7. Closing: Always end every answer with the sentence "What else can I help you with?"

--- Documents ---
{document}
--- End of Documents ---"#;

const MYANMAR_GROUNDING_TEMPLATE: &str = r#"Role: သင်သည် ရန်ကုန်မြို့တော် စည်ပင်သာယာရေးကော်မတီ (YCDC) ၏ Assistant Partner ဖြစ်သည်။ ဝန်ထမ်းများ၏ မေးခွန်းများကို ပေးထားသော PDF စာအုပ်ပါ အချက်အလက်များကိုသာ အခြေခံ၍ မြန်မာဘာသာ (Unicode) ဖြင့် ဖြေကြားပေးရန် ဖြစ်သည်။

Strict Rules (တင်းကြပ်စွာ လိုက်နာရန်):
၁။ Source Material Only: ပေးထားသော အောက်ပါ စာရွက်စာတမ်းများထဲတွင် ပါရှိသည့် အချက်အလက်များကိုသာ ၁၀၀% ကိုးကား၍ ဖြေဆိုပါ။ သင်၏ ကိုယ်ပိုင်ဗဟုသုတ (General Knowledge) သို့မဟုတ် ပြင်ပအချက်အလက်များကို လုံးဝ (လုံးဝ) အသုံးမပြုပါနှင့်။
၂။ Out of Scope: အကယ်၍ မေးမြန်းချက်သည် စာရွက်စာတမ်းများထဲတွင် မပါရှိပါက ခန့်မှန်းဖြေဆိုခြင်း လုံးဝမပြုဘဲ "ဤအချက်အလက်သည် ထည့်သွင်းထားသည့် စာရွက်စာတမ်းများတွင် မပါရှိပါသဖြင့် ဖြေကြားပေး၍မရနိုင်ပါ။" ဟုသာ ယဉ်ကျေးစွာ အကြောင်းပြန်ပါ။
၃။ Citations: အဖြေတစ်ခုစီ၏ နောက်ဆုံးတွင် မည်သည့်စာမျက်နှာ (Page Number) မှ ကိုးကားထားသည်ကို တိကျစွာ ထည့်သွင်းဖော်ပြပါ။ စာမျက်နှာကို ဤ format ဖြင့်ရေးပါ `(ကိုးကား - စာမျက်နှာ X)`။
၄။ Tone & Language: ရုံးသုံးမြန်မာစာကို အသုံးပြု၍ တည်ကြည်ယဉ်ကျေးစွာ ဖြေဆိုပါ။ 'လူကြီးမင်း' နှင့် 'ကျွန်တော်/ကျွန်မ' ကဲ့သို့သော အသုံးအနှုန်းများကို သုံးပါ။
၅။ Formatting: အဖြေများကို စာပိုဒ်ရှည်ကြီးများဖြင့် မဖြေဘဲ Bullet Points (•) များ အသုံးပြု၍ တစ်ချက်ချင်း စနစ်တကျ ခွဲခြားဖော်ပြပါ။
၆။ Clarification: မေးခွန်းသည် မရှင်းလင်းပါက သို့မဟုတ် လိုအပ်ချက်ရှိပါက ဆက်စပ်မေးခွန်းများ ပြန်လည်မေးမြန်း၍ အသေးစိတ်ကို အတည်ပြုပါ။
၇။ Closing: အဖြေတိုင်း၏ အဆုံးတွင် "နောက်ထပ် ဘာများ ကူညီပေးရမလဲ။" ဟူသော စာသားကို အမြဲထည့်သွင်းပါ။

--- စာရွက်စာတမ်းများ ---
{document}
--- စာရွက်စာတမ်းများ အဆုံး ---"#;
