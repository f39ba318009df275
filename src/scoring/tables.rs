//! Static word lists used by the scorer and the keyword extractor.

/// Terms that raise an article's keyword sub-score when they appear anywhere
/// in its text. Matched as lowercase substrings.
pub const SIGNIFICANT_KEYWORDS: &[&str] = &[
    "urgente",
    "breaking",
    "exclusivo",
    "política",
    "economia",
    "tecnologia",
    "saúde",
    "educação",
    "meio ambiente",
    "cultura",
    "esporte",
    "entretenimento",
    "internacional",
    "nacional",
];

/// Portuguese function words and common verb forms never reported as keywords.
pub const STOP_WORDS: &[&str] = &[
    "a", "o", "e", "de", "da", "do", "em", "um", "uma", "com", "para", "por", "que", "se",
    "não", "mais", "como", "mas", "foi", "são", "está", "pode", "ser", "tem", "ao", "ele",
    "das", "à", "seu", "sua", "ou", "quando", "muito", "nos", "já", "eu", "também", "só",
    "pelo", "pela", "até", "isso", "ela", "entre", "era", "depois", "sem", "mesmo", "aos",
    "ter", "seus", "suas", "minha", "têm", "naquele", "neles", "estavam", "fosse", "nessa",
    "nesses", "numa", "disso", "aquela", "àquela", "estivessem", "fossem", "estivesse",
    "tivesse", "tivessem", "houvesse", "houvessem", "houver", "haver", "haveria", "haveriam",
    "haja", "hajam", "tenha", "tenham", "terei", "terá", "terão", "teria", "teriam", "quero",
    "quer", "querem", "queria", "queriam", "deseje", "deseja", "desejem", "desejaria",
    "desejariam", "preciso", "precisa", "precisam", "precisaria", "precisariam", "gostaria",
    "gostariam", "gosto", "gosta", "gostam", "adoro", "adora", "adoram", "adoraria",
    "adorariam", "detesto", "detesta", "detestam", "detestaria", "detestariam", "odeio",
    "odeia", "odeiam", "odearia", "odeariam", "amo", "ama", "amam", "amaria", "amariam",
];

/// Whether `word` (already lowercase) is a stop-word
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(&word)
}
