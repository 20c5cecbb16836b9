//! Built-in lexicons and fact-extraction tables
//!
//! These are the defaults behind `NormalizerConfig::english()` and
//! `NormalizerConfig::japanese()`. Order matters in both kinds of table:
//! lexemes are removed top to bottom (longer phrases before the words they
//! contain), and fact labels are reported in table order.

/// Marker the front end prepends to demo records
pub const EN_SAMPLE_PREFIXES: &[&str] = &["(sample)", "[sample]"];

/// Emotionally charged or vulgar lexemes removed before fact extraction
pub const EN_EMOTIONAL_LEXEMES: &[&str] = &[
    "for real",
    "seriously",
    "literally",
    "totally",
    "really",
    "so annoying",
    "annoying",
    "pissed off",
    "the worst",
    "disgusting",
    "creepy",
    "i can't believe it",
    "can't believe",
    "unbelievable",
    "go to hell",
    "screw you",
    "freaking",
    "damn",
];

/// A fact-extraction rule: (label, any_of, all_of)
pub type FactRuleRow = (&'static str, &'static [&'static str], &'static [&'static str]);

/// Ordered fact table, evaluated top to bottom with every match collected
pub const EN_FACT_RULES: &[FactRuleRow] = &[
    (
        "the act of throwing objects such as tableware",
        &[
            r"(?i)\b(plates?|dish(es)?|tableware|cups?|glass(es)?|mugs?|objects?|things)\b.*\b(threw|thrown|throws?|throwing|hurl(ed|s|ing)?)\b",
            r"(?i)\b(threw|thrown|throws?|throwing|hurl(ed|s|ing)?)\b.*\b(plates?|dish(es)?|tableware|cups?|glass(es)?|mugs?|objects?|things)\b",
        ],
        &[],
    ),
    (
        "acts of violence such as striking",
        &[r"(?i)\b(hit|hits|hitting|punch(ed|es|ing)?|slap(ped|s|ping)?|struck|strikes?|striking|beat(en|s|ing)?)\b"],
        &[],
    ),
    (
        "acts of violence such as kicking",
        &[r"(?i)\bkick(ed|s|ing)?\b"],
        &[],
    ),
    (
        "acts of violence such as pushing or shoving",
        &[r"(?i)\b(push(ed|es|ing)?|shov(e|ed|es|ing)|knocked\s+(me\s+)?down)\b"],
        &[],
    ),
    (
        "verbal abuse and berating",
        &[r"(?i)\b(abusive\s+language|verbal\s+abuse|insult(ed|s|ing)?|berat(e|ed|es|ing)|yell(ed|s|ing)?|shout(ed|s|ing)?|scream(ed|s|ing)?|swore\s+at)\b"],
        &[],
    ),
    (
        "insulting remarks such as telling the subject to die",
        &[],
        &[
            r"(?i)\b(told|said|says|tells|yelled|shouted)\b",
            r"(?i)\b(die|drop\s+dead|dead)\b",
        ],
    ),
];

/// Marker the front end prepends to demo records (Japanese UI)
pub const JA_SAMPLE_PREFIXES: &[&str] = &["(サンプル)", "（サンプル）"];

pub const JA_EMOTIONAL_LEXEMES: &[&str] = &[
    "マジで",
    "ガチで",
    "ほんと",
    "本当に",
    "うざい",
    "ムカつく",
    "最悪",
    "キモい",
    "死ねばいいのに",
    "消えろ",
    "殺す",
    "しね",
    "死ね",
    "ふざけるな",
    "ありえない",
    "信じられない",
];

pub const JA_FACT_RULES: &[FactRuleRow] = &[
    (
        "食器を投げる行為",
        &["(皿|食器|コップ|物).*(投げ|投げられ)", "(皿投げ|食器投げ)"],
        &[],
    ),
    ("殴打等の暴力", &["(殴|殴られ|叩|叩かれ)"], &[]),
    ("蹴る等の暴力", &["(蹴|蹴られ)"], &[]),
    ("押す・突き飛ばす等の暴力", &["(突き飛|押|押され)"], &[]),
    ("暴言・罵倒", &["(暴言|罵倒|侮辱)"], &[]),
    (
        "「死ね」等の侮辱的発言",
        &[],
        &["(と(言|い)われた|と言われ)", "(死ね|死んで)"],
    ),
];
