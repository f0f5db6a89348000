use lazy_static::lazy_static;
use lingua::{Language, LanguageDetector, LanguageDetectorBuilder};

/// Voice used when a request names no voice, or one we don't recognize.
pub const DEFAULT_VOICE: &str = "en-US-JennyNeural";

/// Pseudo-voice: synthesized with the default voice, then pitched up.
pub const BABY_VOICE: &str = "baby";

/// Locales the service can synthesize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locale {
    EnUs,
    EsEs,
    FrFr,
    DeDe,
    ZhCn,
    HiIn,
}

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::EnUs => "en-US",
            Locale::EsEs => "es-ES",
            Locale::FrFr => "fr-FR",
            Locale::DeDe => "de-DE",
            Locale::ZhCn => "zh-CN",
            Locale::HiIn => "hi-IN",
        }
    }

    /// Parse a locale code, normalizing anything outside the supported set
    /// to en-US.
    pub fn parse_or_default(code: &str) -> Locale {
        match code {
            "en-US" => Locale::EnUs,
            "es-ES" => Locale::EsEs,
            "fr-FR" => Locale::FrFr,
            "de-DE" => Locale::DeDe,
            "zh-CN" => Locale::ZhCn,
            "hi-IN" => Locale::HiIn,
            _ => Locale::EnUs,
        }
    }

    fn from_lingua(language: Language) -> Locale {
        match language {
            Language::English => Locale::EnUs,
            Language::Spanish => Locale::EsEs,
            Language::French => Locale::FrFr,
            Language::German => Locale::DeDe,
            Language::Chinese => Locale::ZhCn,
            Language::Hindi => Locale::HiIn,
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

lazy_static! {
    static ref DETECTOR: LanguageDetector = LanguageDetectorBuilder::from_languages(&[
        Language::English,
        Language::Spanish,
        Language::French,
        Language::German,
        Language::Chinese,
        Language::Hindi,
    ])
    .build();
}

/// Best-effort language detection, collapsed to en-US whenever the
/// detector can't decide.
pub fn detect_locale(text: &str) -> Locale {
    DETECTOR
        .detect_language_of(text)
        .map(Locale::from_lingua)
        .unwrap_or(Locale::EnUs)
}

/// Map the requested voice onto a voice the provider knows.
pub fn base_voice(requested: &str) -> &'static str {
    match requested {
        "en-US-AriaNeural" => "en-US-AriaNeural",
        "en-US-GuyNeural" => "en-US-GuyNeural",
        _ => DEFAULT_VOICE,
    }
}

/// Voice spoken natively in the given locale, where one exists.
fn locale_voice(locale: Locale) -> Option<&'static str> {
    match locale {
        Locale::EsEs => Some("es-ES-ElviraNeural"),
        Locale::FrFr => Some("fr-FR-DeniseNeural"),
        Locale::DeDe => Some("de-DE-KatjaNeural"),
        Locale::ZhCn => Some("zh-CN-XiaoxiaoNeural"),
        Locale::HiIn => Some("hi-IN-SwaraNeural"),
        Locale::EnUs => None,
    }
}

/// Resolve the provider voice for a request. Non-English locales pull in
/// their native voice unless the baby effect was asked for, which always
/// stays on its English base voice.
pub fn resolve_voice(requested: &str, locale: Locale) -> &'static str {
    let base = base_voice(requested);

    if locale != Locale::EnUs && requested != BABY_VOICE {
        locale_voice(locale).unwrap_or(base)
    } else {
        base
    }
}
