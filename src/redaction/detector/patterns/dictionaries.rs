//! Word lists used alongside the rule catalog
//!
//! All entries are lowercase. Lookups are case-insensitive at the call site.

/// Clinical, departmental and geographic phrases that look like proper names
/// but must never be flagged as NAME or POSSIBLE_NAME
pub const EXCLUDED_PHRASES: &[&str] = &[
    "internal medicine",
    "physical therapy",
    "occupational therapy",
    "family medicine",
    "emergency medicine",
    "general surgery",
    "orthopedic surgery",
    "plastic surgery",
    "cardiac surgery",
    "sports medicine",
    "pain management",
    "primary care",
    "urgent care",
    "intensive care",
    "critical care",
    "home health",
    "public health",
    "mental health",
    "physical examination",
    "range of motion",
    "blood pressure",
    "heart rate",
    "respiratory rate",
    "chief complaint",
    "history of present illness",
    "review of systems",
    "assessment and plan",
    "differential diagnosis",
    "follow up",
    "no show",
    "vital signs",
    "united states",
    "new york",
    "los angeles",
    "san francisco",
    "las vegas",
    "san diego",
    "san antonio",
    "el paso",
    "north carolina",
    "south carolina",
    "south dakota",
    "north dakota",
    "west virginia",
    "new jersey",
    "new mexico",
    "new hampshire",
    "rhode island",
    "referring clinic",
    "referring provider",
    "billing details",
    "patient demographics",
    "clinical context",
    "medical history",
    "diagnosis codes",
    "requested procedures",
    "insurance details",
    "intake coordinator",
    "office staff",
];

/// Common US first names
pub const COMMON_FIRST_NAMES: &[&str] = &[
    "james", "john", "robert", "michael", "william", "david", "richard", "joseph", "thomas",
    "charles", "christopher", "daniel", "matthew", "anthony", "mark", "donald", "steven", "paul",
    "andrew", "joshua", "kenneth", "kevin", "brian", "george", "timothy", "ronald", "edward",
    "jason", "jeffrey", "ryan", "jacob", "nicholas", "gary", "eric", "jonathan", "stephen",
    "larry", "justin", "scott", "brandon", "benjamin", "samuel", "raymond", "gregory", "frank",
    "alexander", "patrick", "jack", "dennis", "jerry", "tyler", "aaron", "jose", "adam", "nathan",
    "henry", "peter", "zachary", "douglas", "harold", "mary", "patricia", "jennifer", "linda",
    "elizabeth", "barbara", "susan", "jessica", "sarah", "karen", "nancy", "margaret", "lisa",
    "betty", "dorothy", "sandra", "ashley", "kimberly", "emily", "donna", "michelle", "carol",
    "amanda", "melissa", "deborah", "stephanie", "rebecca", "sharon", "laura", "cynthia",
    "kathleen", "amy", "angela", "shirley", "anna", "brenda", "pamela", "emma", "nicole", "helen",
    "samantha", "katherine", "christine", "debra", "rachel", "carolyn", "janet", "catherine",
    "maria", "heather", "diane", "ruth", "julie", "olivia", "joyce", "virginia", "victoria",
    "kelly", "lauren", "christina", "joan", "evelyn", "judith", "megan", "andrea", "cheryl",
    "hannah", "jacqueline", "martha", "gloria", "teresa", "ann", "sara", "madison", "frances",
    "kathryn", "janice", "jean", "abigail", "alice", "judy",
];

/// Common US surnames
pub const COMMON_LAST_NAMES: &[&str] = &[
    "smith", "johnson", "williams", "brown", "jones", "garcia", "miller", "davis", "rodriguez",
    "martinez", "hernandez", "lopez", "gonzalez", "wilson", "anderson", "thomas", "taylor",
    "moore", "jackson", "martin", "lee", "perez", "thompson", "white", "harris", "sanchez",
    "clark", "ramirez", "lewis", "robinson", "walker", "young", "allen", "king", "wright",
    "scott", "torres", "nguyen", "hill", "flores", "green", "adams", "nelson", "baker", "hall",
    "rivera", "campbell", "mitchell", "carter", "roberts", "gomez", "phillips", "evans", "turner",
    "diaz", "parker", "cruz", "edwards", "collins", "reyes", "stewart", "morris", "morales",
    "murphy", "cook", "rogers", "gutierrez", "ortiz", "morgan", "cooper", "peterson", "bailey",
    "reed", "kelly", "howard", "ramos", "kim", "cox", "ward", "richardson", "watson", "brooks",
    "chavez", "wood", "james", "bennett", "gray", "mendoza", "ruiz", "hughes", "price",
    "alvarez", "castillo", "sanders", "patel", "myers", "long", "ross", "foster", "jimenez",
    "powell", "jenkins", "perry", "russell", "sullivan", "bell", "coleman", "butler",
    "henderson", "barnes", "gonzales", "fisher", "vasquez", "simmons", "griffin", "mcdonald",
];

/// Names that double as ordinary English words
pub const AMBIGUOUS_NAMES: &[&str] = &[
    "may", "grace", "bill", "art", "mark", "frank", "chase", "heath", "hunter", "mason", "reed",
    "wade", "lane", "grant", "cole", "drew", "dale", "glen", "joy", "hope", "faith", "dawn", "eve",
    "iris", "ivy", "lily", "rose", "ruby", "pearl", "summer", "autumn", "april", "august", "cruz",
    "bishop", "chance", "cash", "sterling", "stone", "fox", "wolf", "hawk", "angel", "christian",
    "trinity", "destiny", "harmony", "melody", "charity", "mercy", "patience", "serenity", "page",
    "clay", "ray", "pat", "terry", "robin", "sandy", "sherry", "jean", "will", "bob", "don",
    "gene", "rick",
];

/// Labels that make a nearby ambiguous word likely to be a person's name
pub const CONTEXT_LABELS: &[&str] = &[
    "patient",
    "provider",
    "physician",
    "attending",
    "referring",
    "dr.",
    "dr ",
    "mr.",
    "mr ",
    "mrs.",
    "mrs ",
    "ms.",
    "ms ",
    "name:",
    "name ",
    "signed by",
    "authenticated by",
    "pcp",
    "surgeon",
    "therapist",
    "nurse",
    "guarantor",
    "emergency contact",
    "next of kin",
    "guardian",
    "caregiver",
    "dictated by",
    "reviewed by",
    "approved by",
    "cosigned by",
];

/// Titles, role labels, relationship words and credentials that appear inside
/// NAME matches but are not part of the name itself
pub const LABEL_WORDS: &[&str] = &[
    "dr", "mr", "mrs", "ms", "miss", "prof", "professor", "patient", "provider", "physician",
    "attending", "referring", "from", "to", "legal", "preferred", "birth", "name", "aka", "also",
    "known", "as", "maiden", "former", "pcp", "surgeon", "therapist", "nurse", "practitioner",
    "assistant", "guarantor", "emergency", "contact", "next", "of", "kin", "guardian",
    "caregiver", "responsible", "party", "admitting", "doctor", "consulting", "ordering",
    "primary", "care", "signed", "authenticated", "verified", "cosigned", "reviewed", "approved",
    "dictated", "transcribed", "by", "md", "do", "dc", "dpt", "pt", "ot", "np", "rn", "bsn", "msn",
    "dnp", "phd", "pharmd", "od", "dds", "dmd", "lcsw", "lmft", "lpc", "psyd", "aprn", "faaos",
    "facp", "facs", "facep",
];
