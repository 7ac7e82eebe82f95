//! English linguistic model: word tokenization, stopwords and rule-based lemmas

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;
use unicode_segmentation::UnicodeSegmentation;

/// A single analyzed word
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub text: String,
    pub lemma: String,
    pub is_alpha: bool,
    pub is_stop: bool,
}

/// Linguistic pipeline used by the normalizer. Built once and shared.
pub trait LinguisticModel: Send + Sync {
    fn name(&self) -> &str;

    /// Split text into tokens in reading order
    fn analyze(&self, text: &str) -> Vec<Token>;
}

static STOP_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "a", "about", "above", "across", "after", "afterwards", "again", "against", "all",
        "almost", "alone", "along", "already", "also", "although", "always", "am", "among",
        "amongst", "amount", "an", "and", "another", "any", "anyhow", "anyone", "anything",
        "anyway", "anywhere", "are", "around", "as", "at", "back", "be", "became", "because",
        "become", "becomes", "becoming", "been", "before", "beforehand", "behind", "being",
        "below", "beside", "besides", "between", "beyond", "both", "bottom", "but", "by",
        "call", "can", "cannot", "ca", "could", "did", "do", "does", "doing", "done", "down",
        "due", "during", "each", "eight", "either", "eleven", "else", "elsewhere", "empty",
        "enough", "even", "ever", "every", "everyone", "everything", "everywhere", "except",
        "few", "fifteen", "fifty", "first", "five", "for", "former", "formerly", "forty",
        "four", "from", "front", "full", "further", "get", "give", "go", "had", "has", "have",
        "he", "hence", "her", "here", "hereafter", "hereby", "herein", "hereupon", "hers",
        "herself", "him", "himself", "his", "how", "however", "hundred", "i", "if", "in",
        "indeed", "into", "is", "it", "its", "itself", "just", "keep", "last", "latter",
        "latterly", "least", "less", "made", "make", "many", "may", "me", "meanwhile",
        "might", "mine", "more", "moreover", "most", "mostly", "move", "much", "must", "my",
        "myself", "name", "namely", "neither", "never", "nevertheless", "next", "nine", "no",
        "nobody", "none", "noone", "nor", "not", "nothing", "now", "nowhere", "of", "off",
        "often", "on", "once", "one", "only", "onto", "or", "other", "others", "otherwise",
        "our", "ours", "ourselves", "out", "over", "own", "part", "per", "perhaps", "please",
        "put", "quite", "rather", "re", "really", "regarding", "same", "say", "see", "seem",
        "seemed", "seeming", "seems", "serious", "several", "she", "should", "show", "side",
        "since", "six", "sixty", "so", "some", "somehow", "someone", "something", "sometime",
        "sometimes", "somewhere", "still", "such", "take", "ten", "than", "that", "the",
        "their", "them", "themselves", "then", "thence", "there", "thereafter", "thereby",
        "therefore", "therein", "thereupon", "these", "they", "third", "this", "those",
        "though", "three", "through", "throughout", "thru", "thus", "to", "together", "too",
        "top", "toward", "towards", "twelve", "twenty", "two", "under", "unless", "until",
        "up", "upon", "us", "used", "using", "various", "very", "via", "was", "we", "well",
        "were", "what", "whatever", "when", "whence", "whenever", "where", "whereafter",
        "whereas", "whereby", "wherein", "whereupon", "wherever", "whether", "which",
        "while", "whither", "who", "whoever", "whole", "whom", "whose", "why", "will",
        "with", "within", "without", "would", "yet", "you", "your", "yours", "yourself",
        "yourselves",
    ]
    .into_iter()
    .collect()
});

static IRREGULAR: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    [
        ("went", "go"), ("gone", "go"), ("goes", "go"), ("ran", "run"), ("led", "lead"),
        ("built", "build"), ("wrote", "write"), ("written", "write"), ("taught", "teach"),
        ("brought", "bring"), ("bought", "buy"), ("sold", "sell"), ("held", "hold"),
        ("took", "take"), ("taken", "take"), ("gave", "give"), ("given", "give"),
        ("began", "begin"), ("begun", "begin"), ("grew", "grow"), ("grown", "grow"),
        ("drove", "drive"), ("driven", "drive"), ("spoke", "speak"), ("spoken", "speak"),
        ("chose", "choose"), ("chosen", "choose"), ("won", "win"), ("met", "meet"),
        ("paid", "pay"), ("kept", "keep"), ("spent", "spend"), ("sent", "send"),
        ("found", "find"), ("lost", "lose"), ("left", "leave"), ("felt", "feel"),
        ("saw", "see"), ("seen", "see"), ("knew", "know"), ("known", "know"),
        ("told", "tell"), ("understood", "understand"), ("thought", "think"),
        ("people", "person"), ("children", "child"), ("men", "man"), ("women", "woman"),
        ("analyses", "analysis"), ("criteria", "criterion"), ("indices", "index"),
        ("matrices", "matrix"), ("created", "create"), ("creating", "create"),
        ("uses", "use"), ("syncing", "sync"), ("synced", "sync"), ("was", "be"),
        ("were", "be"), ("is", "be"), ("are", "be"), ("has", "have"), ("had", "have"),
    ]
    .into_iter()
    .collect()
});

// Words whose endings look inflected but are base forms, including common
// activity nouns that appear as keywords ("machine learning", "engineering").
static KEEP_AS_IS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "kubernetes", "jenkins", "pandas", "redis", "postgres", "series", "species", "news",
        "lens", "ios", "macos", "devops", "bias", "canvas", "atlas", "alias", "hundred",
        "engineering", "programming", "marketing", "accounting", "training", "learning",
        "computing", "networking", "banking", "consulting", "manufacturing", "processing",
        "planning", "scheduling", "building", "meeting", "reporting", "recruiting",
        "budgeting", "forecasting", "auditing", "troubleshooting", "scripting", "mining",
        "warehousing", "logging", "monitoring", "onboarding", "branding", "pricing",
        "sourcing", "staffing", "nursing", "tutoring", "publishing", "advertising",
        "clustering", "caching", "routing", "rendering", "hosting", "packaging",
        "shipping", "catering", "plumbing", "welding", "morning", "evening", "ceiling",
        "wedding", "testing", "modeling", "modelling",
    ]
    .into_iter()
    .collect()
});

/// Bundled English model
pub struct EnglishModel;

impl Default for EnglishModel {
    fn default() -> Self {
        Self::new()
    }
}

impl EnglishModel {
    pub fn new() -> Self {
        // Force the tables so the first document does not pay for them.
        LazyLock::force(&STOP_WORDS);
        LazyLock::force(&IRREGULAR);
        LazyLock::force(&KEEP_AS_IS);
        Self
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        STOP_WORDS.contains(word.to_lowercase().as_str())
    }

    /// Dictionary form of a word, lowercased
    pub fn lemmatize(&self, word: &str) -> String {
        let lower = word.to_lowercase();
        if is_proper_noun(word) {
            return lower;
        }
        lemmatize_lower(&lower)
    }
}

impl LinguisticModel for EnglishModel {
    fn name(&self) -> &str {
        "english-rules"
    }

    fn analyze(&self, text: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        for word in text.unicode_words() {
            let (base, clitic) = split_clitic(word);
            tokens.push(self.token(base));
            if let Some(clitic) = clitic {
                tokens.push(self.token(clitic));
            }
        }
        tokens
    }
}

impl EnglishModel {
    fn token(&self, word: &str) -> Token {
        Token {
            text: word.to_string(),
            lemma: self.lemmatize(word),
            is_alpha: word.chars().all(char::is_alphabetic),
            is_stop: self.is_stop_word(word),
        }
    }
}

const CLITICS: [&str; 8] = ["n't", "'re", "'ve", "'ll", "'s", "'d", "'m", "'"];

/// Split a possessive or contraction off its word: `Python's` becomes `Python` + `'s`
fn split_clitic(word: &str) -> (&str, Option<&str>) {
    let normalized = word.replace('\u{2019}', "'").to_lowercase();
    for clitic in CLITICS {
        if !normalized.ends_with(clitic) {
            continue;
        }
        // U+2019 is three bytes where `'` is one.
        let clitic_len: usize = word
            .chars()
            .rev()
            .take(clitic.chars().count())
            .map(char::len_utf8)
            .sum();
        let split = word.len() - clitic_len;
        if split > 0 && word.is_char_boundary(split) {
            return (&word[..split], Some(&word[split..]));
        }
    }
    (word, None)
}

/// Acronyms and camel-cased product names (`AWS`, `GitHub`) keep their surface form
fn is_proper_noun(word: &str) -> bool {
    word.chars().skip(1).any(char::is_uppercase)
}

fn lemmatize_lower(word: &str) -> String {
    if let Some(lemma) = IRREGULAR.get(word) {
        return lemma.to_string();
    }
    if word.chars().count() <= 3 {
        return word.to_string();
    }
    if KEEP_AS_IS.contains(word) {
        return word.to_string();
    }

    if let Some(stem) = word.strip_suffix("ies") {
        if word.len() > 4 {
            return format!("{}y", stem);
        }
    }
    if let Some(stem) = word.strip_suffix("ied") {
        if word.len() > 4 {
            return format!("{}y", stem);
        }
    }
    for suffix in ["sses", "ches", "shes", "xes", "zzes"] {
        if word.ends_with(suffix) {
            return word[..word.len() - 2].to_string();
        }
    }
    for ending in ["ss", "us", "is", "ics", "ous"] {
        if word.ends_with(ending) {
            return word.to_string();
        }
    }
    if let Some(stem) = word.strip_suffix('s') {
        return stem.to_string();
    }

    if word.ends_with("eed") {
        return word.to_string();
    }
    for suffix in ["ed", "ing"] {
        if let Some(stem) = word.strip_suffix(suffix) {
            if stem.len() >= 3 && has_vowel(stem) {
                return restore_stem(stem);
            }
            return word.to_string();
        }
    }

    word.to_string()
}

fn restore_stem(stem: &str) -> String {
    let chars: Vec<char> = stem.chars().collect();
    let n = chars.len();
    let last = chars[n - 1];
    let prev = chars[n - 2];

    if last == prev && !is_vowel_at(&chars, n - 1) && !matches!(last, 'l' | 's' | 'z') {
        return chars[..n - 1].iter().collect();
    }

    if needs_silent_e(&chars) {
        return format!("{}e", stem);
    }
    stem.to_string()
}

fn needs_silent_e(chars: &[char]) -> bool {
    let n = chars.len();
    let last = chars[n - 1];
    let prev = chars[n - 2];
    let before = if n >= 3 { Some(chars[n - 3]) } else { None };
    let consonant_before = before.is_some_and(|c| !is_vowel(c));

    if matches!(last, 'v' | 'c') {
        return true;
    }
    match (prev, last) {
        ('b', 'l') | ('i', 'z') | ('y', 's') | ('r', 's') | ('n', 's') | ('r', 'g')
        | ('d', 'g') | ('a', 'g') => return true,
        ('a', 's') | ('o', 's') | ('i', 's') => return true,
        ('a', 't') | ('u', 'r') | ('a', 'r') | ('i', 'r') | ('i', 'n') | ('i', 'd')
        | ('u', 't') => {
            if consonant_before {
                return true;
            }
            if (prev, last) == ('i', 'r') && before == Some('u') {
                return true;
            }
        }
        ('n', 'g') => {
            if matches!(before, Some('a') | Some('e')) {
                return true;
            }
        }
        _ => {}
    }

    measure(chars) == 1 && ends_cvc(chars)
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

fn is_vowel_at(chars: &[char], i: usize) -> bool {
    match chars[i] {
        'a' | 'e' | 'i' | 'o' | 'u' => true,
        'y' => i > 0 && !is_vowel_at(chars, i - 1),
        _ => false,
    }
}

fn has_vowel(stem: &str) -> bool {
    let chars: Vec<char> = stem.chars().collect();
    (0..chars.len()).any(|i| is_vowel_at(&chars, i))
}

/// Number of vowel-consonant sequences
fn measure(chars: &[char]) -> usize {
    let mut m = 0;
    let mut seen_vowel = false;
    for i in 0..chars.len() {
        if is_vowel_at(chars, i) {
            seen_vowel = true;
        } else if seen_vowel {
            m += 1;
            seen_vowel = false;
        }
    }
    m
}

fn ends_cvc(chars: &[char]) -> bool {
    let n = chars.len();
    n >= 3
        && !is_vowel_at(chars, n - 3)
        && is_vowel_at(chars, n - 2)
        && !is_vowel_at(chars, n - 1)
        && !matches!(chars[n - 1], 'w' | 'x' | 'y')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lemma(word: &str) -> String {
        EnglishModel::new().lemmatize(word)
    }

    #[test]
    fn test_regular_inflections() {
        assert_eq!(lemma("developing"), "develop");
        assert_eq!(lemma("teams"), "team");
        assert_eq!(lemma("technologies"), "technology");
        assert_eq!(lemma("processes"), "process");
        assert_eq!(lemma("managed"), "manage");
        assert_eq!(lemma("running"), "run");
        assert_eq!(lemma("embedded"), "embed");
        assert_eq!(lemma("installed"), "install");
        assert_eq!(lemma("making"), "make");
        assert_eq!(lemma("automated"), "automate");
        assert_eq!(lemma("configured"), "configure");
    }

    #[test]
    fn test_base_forms_are_untouched() {
        for word in ["python", "java", "strong", "team", "analysis", "status", "analytics", "need", "string"] {
            assert_eq!(lemma(word), word);
        }
    }

    #[test]
    fn test_keep_list_and_irregulars() {
        assert_eq!(lemma("Kubernetes"), "kubernetes");
        assert_eq!(lemma("learning"), "learning");
        assert_eq!(lemma("led"), "lead");
        assert_eq!(lemma("built"), "build");
    }

    #[test]
    fn test_proper_nouns_only_lowercased() {
        assert_eq!(lemma("AWS"), "aws");
        assert_eq!(lemma("GitHub"), "github");
    }

    #[test]
    fn test_analyze_flags() {
        let tokens = EnglishModel::new().analyze("The developer's Node.js skills, 5 years");
        let the = tokens.iter().find(|t| t.text == "The").unwrap();
        assert!(the.is_stop);
        assert!(the.is_alpha);

        let five = tokens.iter().find(|t| t.text == "5").unwrap();
        assert!(!five.is_alpha);

        let skills = tokens.iter().find(|t| t.text == "skills").unwrap();
        assert_eq!(skills.lemma, "skill");
        assert!(!skills.is_stop);
    }

    #[test]
    fn test_possessives_and_contractions_are_split() {
        let model = EnglishModel::new();
        let texts = |input: &str| -> Vec<String> {
            model.analyze(input).into_iter().map(|t| t.text).collect()
        };

        assert_eq!(texts("Python's team"), vec!["Python", "'s", "team"]);
        assert_eq!(texts("Python\u{2019}s"), vec!["Python", "\u{2019}s"]);
        assert_eq!(texts("don't"), vec!["do", "n't"]);
        assert_eq!(texts("we've"), vec!["we", "'ve"]);

        let tokens = model.analyze("Bachelor's");
        assert_eq!(tokens[0].lemma, "bachelor");
        assert!(tokens[0].is_alpha);
        assert!(!tokens[1].is_alpha);
    }

    #[test]
    fn test_lone_clitic_is_not_split() {
        assert_eq!(split_clitic("n't"), ("n't", None));
        assert_eq!(split_clitic("rust"), ("rust", None));
    }

    #[test]
    fn test_empty_text_has_no_tokens() {
        assert!(EnglishModel::new().analyze("").is_empty());
        assert!(EnglishModel::new().analyze("  ,.;  ").is_empty());
    }
}
