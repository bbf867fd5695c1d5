//! Vocabulary tables shared by the checkers and the rewriter. All read-only.

/// Glyphs that open a bullet and never count as ATS-unfriendly characters.
pub const BULLET_GLYPHS: &[char] = &[
    '•', '-', '*', '→', '▪', '▸', '‣', '○', '·', '–', '—', '♦', '★', '»', '▶', '◆', '◇',
];

/// Low-impact introductory phrases, in detection priority order.
pub const WEAK_PHRASES: &[&str] = &[
    "responsible for",
    "worked on",
    "in charge of",
    "duties included",
    "helped with",
    "assisted in",
];

/// Verbs whose presence makes a bullet read like an achievement claim.
pub const ACHIEVEMENT_VERBS: &[&str] = &[
    "developed",
    "created",
    "managed",
    "led",
    "implemented",
    "improved",
];

/// Stronger alternatives offered for each weak phrase, best first.
pub fn strong_alternatives(weak_phrase: &str) -> &'static [&'static str] {
    match weak_phrase {
        "responsible for" => &["managed", "led", "orchestrated", "directed", "oversaw"],
        "worked on" => &["developed", "implemented", "executed", "delivered", "created"],
        "in charge of" => &["managed", "headed", "directed", "led", "supervised"],
        "duties included" => &["achieved", "performed", "executed", "delivered", "completed"],
        "helped with" => &[
            "contributed to",
            "supported",
            "facilitated",
            "collaborated on",
            "enhanced",
        ],
        "assisted in" => &[
            "supported",
            "contributed to",
            "facilitated",
            "collaborated on",
            "aided",
        ],
        _ => &[],
    }
}

/// Curated strong action verbs. A resume using five or more distinct ones is a
/// candidate for the already-optimized short-circuit.
pub const STRONG_ACTION_VERBS: &[&str] = &[
    "achieved", "accelerated", "accomplished", "acquired", "adapted", "addressed", "advanced",
    "advised", "allocated", "analyzed", "applied", "appointed", "appraised", "approved",
    "architected", "arranged", "assembled", "assessed", "assigned", "attained", "authored",
    "automated", "balanced", "boosted", "built", "calculated", "captured", "catalyzed",
    "centralized", "championed", "clarified", "coached", "collaborated", "communicated",
    "compiled", "completed", "conceptualized", "conducted", "consolidated", "constructed",
    "consulted", "controlled", "converted", "coordinated", "created", "cultivated",
    "customized", "decreased", "defined", "delegated", "delivered", "demonstrated", "designed",
    "determined", "developed", "devised", "diagnosed", "directed", "discovered", "doubled",
    "drove", "earned", "edited", "educated", "eliminated", "enabled", "encouraged",
    "engineered", "enhanced", "established", "evaluated", "exceeded", "executed", "expanded",
    "expedited", "facilitated", "finalized", "fixed", "forecasted", "formulated", "founded",
    "generated", "grew", "guided", "headed", "hired", "identified", "implemented", "improved",
    "increased", "influenced", "initiated", "innovated", "installed", "instituted",
    "instructed", "integrated", "introduced", "invented", "investigated", "launched", "led",
    "leveraged", "maintained", "managed", "marketed", "maximized", "measured", "mentored",
    "merged", "minimized", "modernized", "monitored", "motivated", "navigated", "negotiated",
    "operated", "optimized", "orchestrated", "organized", "outperformed", "overhauled",
    "oversaw", "pioneered", "planned", "presented", "prioritized", "processed", "produced",
    "programmed", "promoted", "proposed", "provided", "published", "purchased", "recommended",
    "redesigned", "reduced", "reengineered", "refined", "refocused", "regulated",
    "reorganized", "reported", "researched", "resolved", "restructured", "revamped",
    "reviewed", "revitalized", "saved", "scheduled", "secured", "selected", "served", "set",
    "shaped", "simplified", "sold", "solved", "specialized", "spearheaded", "standardized",
    "started", "streamlined", "strengthened", "structured", "succeeded", "supervised",
    "supported", "surpassed", "surveyed", "sustained", "systematized", "targeted", "taught",
    "tested", "trained", "transformed", "translated", "upgraded", "utilized", "validated",
    "won", "wrote",
];

pub fn is_bullet_glyph(c: char) -> bool {
    BULLET_GLYPHS.contains(&c)
}
