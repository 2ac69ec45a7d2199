// src/lexicon/builtin.rs
//! Default keyword tables shipped with the binary. `config/lexicon.toml` may replace them.

use super::{
    CategoryRule, ConflictZone, KeywordGroup, Lexicon, MilitaryTables, Place, SeverityTiers,
    SignalTables, TopicGroup,
};
use crate::event::Category;
use crate::military::Branch;
use crate::signals::SignalKind;

const ARMED_CONFLICT: &[&str] = &[
    "war", "battle", "combat", "clash", "fighting", "offensive", "invasion",
    "counter-offensive", "drone strike", "air strike", "bombardment", "artillery",
];
const TERRORISM: &[&str] = &[
    "terror", "attack", "bombing", "explosion", "suicide", "militant", "insurgency",
    "extremist", "isis", "al qaeda", "hamas", "hezbollah",
];
const POLITICAL_INSTABILITY: &[&str] = &[
    "coup", "revolution", "insurrection", "protest", "unrest", "demonstration",
    "political crisis", "government collapse", "regime", "election", "vote", "parliament",
    "opposition", "dissident",
];
const DIPLOMATIC_TENSIONS: &[&str] = &[
    "tension", "sanction", "diplomat", "expulsion", "summit", "negotiation", "treaty",
    "agreement", "deal", "breaking", "crisis", "escalation",
];
const HUMANITARIAN: &[&str] = &[
    "humanitarian", "refugee", "displacement", "famine", "crisis", "aid", "starvation",
    "genocide", "atrocity", "ethnic cleansing", "massacre",
];
const CYBER_WARFARE: &[&str] = &[
    "cyber", "hack", "disinformation", "propaganda", "misinformation", "cyberattack",
];
const MARITIME_SECURITY: &[&str] = &[
    "maritime", "naval", "border", "coast guard", "shipping", "piracy", "straits",
    "exclusive economic zone",
];
const HEALTH_EMERGENCY: &[&str] = &[
    "health", "virus", "pandemic", "disease", "outbreak", "covid", "flu", "infection",
    "epidemic",
];
const ENVIRONMENTAL: &[&str] = &[
    "climate", "environment", "disaster", "flood", "earthquake", "hurricane", "storm",
    "wildfire", "drought",
];
const ECONOMIC: &[&str] = &[
    "econom", "trade war", "tariff", "sanctions", "embargo", "market", "inflation",
    "recession", "financial",
];

const SEVERITY_CRITICAL: &[&str] = &[
    "critical", "emergency", "crisis", "massacre", "genocide", "ethnic cleansing",
    "apocalypse", "catastroph", "holocaust", "atrocity", "war crime",
    "crimes against humanity", "major disaster", "famine", "starvation", "refugee crisis",
    "humanitarian catastrophe", "full-scale war", "world war", "nuclear",
    "biological weapon", "chemical weapon", "tens killed", "hundreds killed",
    "mass casualties", "civilians killed", "ukraine war", "gaza", "israel-hamas",
    "russia ukraine", "israel iran", "taiwan", "south china sea", "tensions", "conflict",
    "invasion", "offensive",
];
const SEVERITY_HIGH: &[&str] = &[
    "attack", "death", "killed", "murder", "shooting", "assassination", "assassinat",
    "bomb", "explosion", "explosive", "terror", "hostage", "kidnap", "suicide", "militant",
    "clash", "fighting", "battle", "air strike", "coup", "revolution", "insurrection",
    "riot", "violent protest", "sanctions", "expulsion", "breaking", "escalat",
    "military operation", "counter-terrorism", "counterinsurgency", "sudan", "mali",
    "nigeria", "myanmar", "afghanistan", "ethiopia", "israel", "palestine", "lebanon",
    "syria", "iraq", "yemen", "ukraine", "russia", "poland", "baltic", "crimea", "china",
    "taiwan", "indo-pacific", "south china sea", "north korea", "pakistan", "india",
    "kashmir", "colombia", "mexico", "haiti", "venezuela", "dozens killed", "casualties",
    "injured",
];
const SEVERITY_MEDIUM: &[&str] = &[
    "tension", "tensions", "threat", "warning", "alert", "protest", "demonstration",
    "rally", "march", "election", "vote", "ballot", "polling", "diplomat", "diplomatic",
    "summit", "negotiation", "treaty", "agreement", "deal", "pact", "border", "frontier",
    "coast", "maritime", "sanction", "tariff", "trade dispute", "cyber", "hack",
    "disinformation", "humanitarian", "aid", "refugee", "displaced", "trial", "court",
    "arrest", "detention", "prisoner", "political", "government", "minister", "president",
    "parliament", "rebel", "insurgent", "militia", "armed group", "pipeline", "energy",
    "oil", "gas", "natural resource", "arms", "weapons", "military aid", "security",
    "regional", "international", "global", "crisis", "instability", "volatile", "iran",
    "israel", "saudi", "uae", "gulf", "somalia", "kenya", "ethiopia", "eritrea",
    "horn of africa", "congo", "drc", "central african", "cameroon", "armenia",
    "azerbaijan", "nagorno-karabakh", "thailand", "myanmar", "cambodia", "southeast asia",
    "peru", "ecuador", "bolivia", "latin america", "several killed", "many dead",
    "multiple dead",
];

const HOTSPOTS: &[(&str, i32, &[&str])] = &[
    (
        "Ukraine-Russia",
        25,
        &["ukraine", "kiev", "kyiv", "russia", "moscow", "putin", "zelensky", "nato"],
    ),
    (
        "Middle East",
        25,
        &["iran", "israel", "gaza", "hezbollah", "lebanon", "palestine", "netanyahu"],
    ),
    (
        "Taiwan-China",
        22,
        &["taiwan", "china", "xi jinping", "beijing", "south china sea"],
    ),
    (
        "North Korea",
        22,
        &["north korea", "pyongyang", "kim jong", "missile", "nuclear test"],
    ),
    (
        "South China Sea",
        20,
        &["south china sea", "spratly", "parcel", " scarborough"],
    ),
];

const HIGH_TOPICS: &[(&str, i32, &[&str])] = &[
    ("Sanctions/Trade", 15, &["sanctions", "embargo", "trade war", "tariff"]),
    (
        "Military Deployment",
        15,
        &["military base", "troop deployment", "soldiers", "armored"],
    ),
    (
        "Political Crisis",
        15,
        &["election", "political crisis", "regime change", "coup"],
    ),
    ("Cyber Security", 12, &["cyber attack", "hack", "ransomware", "data breach"]),
    ("Humanitarian", 12, &["refugee", "migration crisis", "humanitarian"]),
    (
        "Combat Operations",
        18,
        &["air strike", "airstrike", "bombing", "missile attack"],
    ),
    ("War Crimes", 20, &["war crime", "human rights abuse", "atrocity"]),
    ("Intelligence", 12, &["intelligence", "espionage", "surveillance", "spy"]),
    (
        "Alliances",
        14,
        &["defense pact", "alliance", "security agreement", "treaty"],
    ),
    ("Nuclear", 18, &["nuclear", "atomic", "fissile", "enrichment"]),
];

const MEDIUM_TOPICS: &[(&str, i32, &[&str])] = &[
    ("Diplomacy", 10, &["diplomatic", "summit", "negotiation", "peace talks"]),
    ("Unrest", 10, &["protest", "demonstration", "unrest", "riot"]),
    ("Border Issues", 10, &["border", "frontier", "boundary", "territorial"]),
    ("Energy", 8, &["energy", "oil", "gas", "pipeline", "energy crisis"]),
    ("Climate/Environment", 5, &["climate", "environmental", "natural disaster"]),
];

/// Names that contain other table entries ("India" in "Indiana"); checked before the table.
const DISAMBIGUATION: &[&str] = &["Indiana", "California", "Texas", "Florida"];

// (name, lat, lng, country, place_name)
const PLACES: &[(&str, f64, f64, &str, &str)] = &[
    ("Indiana", 40.2672, -86.1349, "US", "Indiana, United States"),
    ("California", 36.7783, -119.4179, "US", "California, United States"),
    ("Texas", 31.9686, -99.9018, "US", "Texas, United States"),
    ("Florida", 27.6648, -81.5158, "US", "Florida, United States"),
    ("New York", 40.7128, -74.0060, "US", "New York, United States"),
    ("Iran", 32.4279, 53.6880, "IR", "Iran"),
    ("Tehran", 35.6892, 51.3890, "IR", "Tehran, Iran"),
    ("Israel", 31.0461, 34.8516, "IL", "Israel"),
    ("Gaza", 31.3547, 34.3108, "PS", "Gaza"),
    ("Lebanon", 33.8547, 35.8623, "LB", "Lebanon"),
    ("Beirut", 33.8886, 35.4955, "LB", "Beirut, Lebanon"),
    ("Syria", 34.8021, 38.9968, "SY", "Syria"),
    ("Damascus", 33.5138, 36.2765, "SY", "Damascus, Syria"),
    ("Iraq", 33.3152, 44.3661, "IQ", "Iraq"),
    ("Baghdad", 33.3152, 44.3661, "IQ", "Baghdad, Iraq"),
    ("Yemen", 15.5527, 48.5164, "YE", "Yemen"),
    ("Jordan", 30.5852, 36.2384, "JO", "Jordan"),
    ("Saudi", 23.8859, 45.0792, "SA", "Saudi Arabia"),
    ("UAE", 23.4241, 53.8478, "AE", "UAE"),
    ("Qatar", 25.3548, 51.1839, "QA", "Qatar"),
    ("Kuwait", 29.3117, 47.4818, "KW", "Kuwait"),
    ("United States", 37.0902, -95.7129, "US", "United States"),
    ("USA", 37.0902, -95.7129, "US", "United States"),
    ("America", 37.0902, -95.7129, "US", "United States"),
    ("Washington", 38.9072, -77.0369, "US", "Washington D.C."),
    ("Los Angeles", 34.0522, -118.2437, "US", "Los Angeles"),
    ("Colombia", 4.5709, -74.2973, "CO", "Colombia"),
    ("Brazil", -14.2350, -51.9253, "BR", "Brazil"),
    ("Mexico", 23.6345, -102.5528, "MX", "Mexico"),
    ("Canada", 56.1304, -106.3468, "CA", "Canada"),
    ("Russia", 61.5240, 105.3188, "RU", "Russia"),
    ("Moscow", 55.7558, 37.6173, "RU", "Moscow, Russia"),
    ("Ukraine", 48.3794, 31.1656, "UA", "Ukraine"),
    ("Kiev", 50.4501, 30.5234, "UA", "Kyiv, Ukraine"),
    ("Kyiv", 50.4501, 30.5234, "UA", "Kyiv, Ukraine"),
    ("Poland", 51.9194, 19.1451, "PL", "Poland"),
    ("Germany", 51.1657, 10.4515, "DE", "Germany"),
    ("France", 46.2276, 2.2137, "FR", "France"),
    ("UK", 55.3781, -3.4360, "GB", "United Kingdom"),
    ("Britain", 55.3781, -3.4360, "GB", "United Kingdom"),
    ("London", 51.5074, -0.1278, "GB", "London, UK"),
    ("Spain", 40.4637, -3.7492, "ES", "Spain"),
    ("Italy", 41.8719, 12.5674, "IT", "Italy"),
    ("China", 35.8617, 104.1954, "CN", "China"),
    ("Beijing", 39.9042, 116.4074, "CN", "Beijing, China"),
    ("Taiwan", 23.6978, 120.9605, "TW", "Taiwan"),
    ("North Korea", 40.3399, 127.5101, "KP", "North Korea"),
    ("South Korea", 35.9078, 127.7669, "KR", "South Korea"),
    ("Seoul", 37.5665, 126.9780, "KR", "Seoul, South Korea"),
    ("Japan", 36.2048, 138.2529, "JP", "Japan"),
    ("Tokyo", 35.6762, 139.6503, "JP", "Tokyo, Japan"),
    ("Pakistan", 30.3753, 69.3451, "PK", "Pakistan"),
    ("India", 20.5937, 78.9629, "IN", "India"),
    ("New Delhi", 28.6139, 77.2090, "IN", "New Delhi, India"),
    ("Thailand", 15.8700, 100.9925, "TH", "Thailand"),
    ("Bangkok", 13.7563, 100.5018, "TH", "Bangkok, Thailand"),
    ("Cambodia", 12.5657, 104.9910, "KH", "Cambodia"),
    ("Vietnam", 14.0583, 108.2772, "VN", "Vietnam"),
    ("Myanmar", 21.9140, 95.9560, "MM", "Myanmar"),
    ("Afghanistan", 33.9391, 67.7100, "AF", "Afghanistan"),
    ("Somalia", 5.1521, 46.1996, "SO", "Somalia"),
    ("Mogadishu", 2.0469, 45.3182, "SO", "Mogadishu, Somalia"),
    ("Sudan", 12.8628, 7.9573, "SD", "Sudan"),
    ("Ethiopia", 9.1450, 40.4897, "ET", "Ethiopia"),
    ("Nigeria", 9.0820, 8.6753, "NG", "Nigeria"),
    ("Kenya", -0.0236, 37.9062, "KE", "Kenya"),
    ("South Africa", -30.5595, 22.9375, "ZA", "South Africa"),
    ("Egypt", 26.8206, 30.8025, "EG", "Egypt"),
    ("Libya", 26.3351, 17.2283, "LY", "Libya"),
    ("Tunisia", 33.8869, 9.5375, "TN", "Tunisia"),
    ("Algeria", 28.0339, 1.6596, "DZ", "Algeria"),
    ("Morocco", 31.7917, -7.0926, "MA", "Morocco"),
    ("DRC", -4.0383, 21.7587, "CD", "Democratic Republic of Congo"),
    ("Mali", 17.5707, -3.9962, "ML", "Mali"),
    ("Niger", 17.6078, 8.0817, "NE", "Niger"),
    ("Burkina Faso", 12.2383, -1.5616, "BF", "Burkina Faso"),
    ("Chad", 15.4542, 18.7322, "TD", "Chad"),
    ("Mozambique", -18.7669, 35.5295, "MZ", "Mozambique"),
];

fn owned(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn groups(table: &[(&str, i32, &[&str])]) -> Vec<TopicGroup> {
    table
        .iter()
        .map(|(label, points, keywords)| TopicGroup {
            label: label.to_string(),
            points: *points,
            keywords: owned(keywords),
        })
        .collect()
}

pub fn lexicon() -> Lexicon {
    let categories = [
        (Category::ArmedConflict, ARMED_CONFLICT),
        (Category::Terrorism, TERRORISM),
        (Category::PoliticalInstability, POLITICAL_INSTABILITY),
        (Category::DiplomaticTensions, DIPLOMATIC_TENSIONS),
        (Category::Humanitarian, HUMANITARIAN),
        (Category::CyberWarfare, CYBER_WARFARE),
        (Category::MaritimeSecurity, MARITIME_SECURITY),
        (Category::HealthEmergency, HEALTH_EMERGENCY),
        (Category::Environmental, ENVIRONMENTAL),
        (Category::Economic, ECONOMIC),
    ]
    .into_iter()
    .map(|(category, keywords)| CategoryRule {
        category,
        keywords: owned(keywords),
    })
    .collect();

    let places = PLACES
        .iter()
        .map(|(name, lat, lng, country, place_name)| Place {
            name: name.to_string(),
            lat: *lat,
            lng: *lng,
            country: country.to_string(),
            place_name: Some(place_name.to_string()),
        })
        .collect();

    Lexicon {
        categories,
        severity: SeverityTiers {
            critical: owned(SEVERITY_CRITICAL),
            high: owned(SEVERITY_HIGH),
            medium: owned(SEVERITY_MEDIUM),
        },
        hotspots: groups(HOTSPOTS),
        high_topics: groups(HIGH_TOPICS),
        medium_topics: groups(MEDIUM_TOPICS),
        disambiguation: owned(DISAMBIGUATION),
        places,
        signals: signal_tables(),
        military: military_tables(),
    }
}

// ---- signal feed ----

const SIGNAL_KINDS: &[(SignalKind, &[&str])] = &[
    (SignalKind::Military, &["military", "troop", "weapon"]),
    (SignalKind::Political, &["political", "election", "regime"]),
    (SignalKind::Economic, &["econom", "trade", "sanction"]),
    (SignalKind::Security, &["terror", "attack", "security"]),
    (SignalKind::Strategic, &["nuclear", "missile", "drone"]),
];

// Short tokens like "ap" and "un" match inside many domains; kept as-is.
const HIGH_CONFIDENCE: &[&str] = &["gdelt", "reuters", "ap", "bbc", "un", "state.gov"];
const MEDIUM_CONFIDENCE: &[&str] = &["crisisgroup", "chatham", "ecfr", "al jazeera"];

const SIGNAL_REGIONS: &[(&str, &[&str])] = &[
    (
        "Middle East",
        &["iran", "israel", "gaza", "lebanon", "syria", "iraq", "yemen"],
    ),
    (
        "Europe",
        &["europe", "ukraine", "russia", "poland", "germany", "france", "uk"],
    ),
    ("Asia", &["china", "korea", "japan", "india", "pakistan", "taiwan"]),
    (
        "Americas",
        &["usa", "america", "canada", "mexico", "brazil", "argentina"],
    ),
];

const ACADEMIC_MARKERS: &[&str] = &[
    "university",
    "college",
    "academic",
    "research",
    "harvard",
    "stanford",
    "mit.edu",
    "yale",
    "princeton",
];

// ---- military activity ----

const MILITARY_KEYWORDS: &[&str] = &[
    // combat
    "airstrike", "air strike", "air strikes", "airstrikes",
    "military strike", "missile strike", "rocket attack", "bombing", "bomb",
    "combat operation", "military operation", "special operation",
    "troop deployment", "troop withdrawal", "soldiers deployed", "troops deployed",
    "armored convoy", "tank deployment", "military convoy", "armored column",
    // maritime
    "naval operation", "naval exercise", "warship", "aircraft carrier",
    "submarine", "maritime patrol", "naval forces", "naval blockade",
    // air
    "military aircraft", "fighter jet", "combat aircraft", "bomber",
    "drone strike", "uav", "unmanned aircraft", "reconnaissance drone",
    "closed airspace", "no fly zone", "airspace restriction",
    // installations
    "military base", "army base", "naval base", "air base", "forward operating base",
    // exercises
    "military exercise", "war games", "joint exercise", "military drills",
    // front lines
    "front line", "frontline", "battlefield", "combat zone", "war zone",
    "invasion", "offensive", "counter-offensive", "defensive position",
    "military engagement", "armed clash", "armed confrontation",
    // crackdowns
    "military crackdown", "military raid", "military arrest", "military detention",
    "military abduction", "kidnap by military", "forcibly disappeared",
    "military checkpoint", "military patrol", "military curfews",
    "deadly crackdown", "violent crackdown", "brutal crackdown",
    "security forces", "paramilitary forces",
    // interstate
    "cross-border attack", "border attack", "transborder attack",
    "war between", "conflict between", "tensions between",
    "iran and israel", "israel and iran", "russia ukraine", "ukraine russia",
    "us and china", "china and us", "nato and russia", "russia nato",
    "north korea", "south korea", "pakistan india", "india pakistan",
    "china taiwan", "taiwan china", "armenia azerbaijan", "azerbaijan armenia",
    "ethiopia eritrea", "eritrea ethiopia", "sudan war", "congo war",
    "mexico cartels", "colombia conflict", "syria war", "syria conflict",
    "israel hezbollah", "hezbollah israel", "israel hamas", "hamas israel",
    // border enforcement
    "ice arrest", "ice raid", "ice operation", "ice detention",
    "border patrol", "border security", "immigration raid",
    "deportation", "detention center", "immigration detention",
    "ice agents", "immigration enforcement",
    "military action", "special forces operation", "paramilitary operation",
    "armed forces",
];

/// Commentary about the military rather than an operation.
const MILITARY_EXCLUSIONS: &[&str] = &[
    r"(?i)military\s+aid\s+\w+",
    r"(?i)military\s+to\s+\w+",
    r"(?i)according\s+to\s+(?:the\s+)?military\s+\w+",
    r"(?i)military\s+(?:plan|proposal|strategy|policy)\s+\w+",
];

// Substring matches: "port" also hits "report".
const BRANCH_GROUPS: &[(Branch, &[&str])] = &[
    (Branch::Navy, &["naval", "ship", "maritime", "sea", "port", "coast"]),
    (
        Branch::AirForce,
        &["air", "aircraft", "drone", "airstrike", "airspace", "flight"],
    ),
    (Branch::Army, &["ground", "troop", "land", "army", "battalion"]),
];

const INTENSITY_TIERS: &[(f32, &[&str])] = &[
    (
        0.9,
        &[
            "airstrike", "attack", "invasion", "war", "combat", "strike", "bomb",
            "killing", "death", "massacre", "crackdown", "abduction", "kidnap",
        ],
    ),
    (
        0.75,
        &["raid", "arrest", "detention", "deportation", "clash", "confrontation", "offensive"],
    ),
    (0.6, &["deployment", "exercise", "operation", "blockade"]),
];

const CONFLICT_KEYWORDS: &[&str] = &[
    "war", "conflict", "combat", "fighting", "battle", "clash", "offensive",
    "invasion", "attack", "strike", "bombing", "air strike", "airstrike",
    "killing", "death", "casualties", "massacre", "atrocity", "war crime",
    "military operation", "troops", "soldiers", "forces", "army", "navy",
    "ceasefire", "truce", "peace talks", "negotiation", "diplomatic",
    "sanctions", "tensions", "crisis", "humanitarian", "refugees",
    "genocide", "ethnic cleansing", "terrorism", "terrorist", "militant",
    "coup", "insurgency", "rebellion", "revolution", "uprising",
];

// id, name, lat, lng, intensity, country, title, tracker location, branch
type ZoneRow = (
    &'static str,
    &'static str,
    f64,
    f64,
    f32,
    &'static str,
    &'static str,
    &'static str,
    Branch,
);

const PERSISTENT_ZONES: &[ZoneRow] = &[
    ("ukraine-east", "Eastern Ukraine Combat Zone", 48.0, 37.5, 0.95, "UA", "Ongoing conflict in Eastern Ukraine", "Ukraine", Branch::Combined),
    ("ukraine-front", "Ukraine Front Lines", 47.5, 35.5, 0.9, "UA", "Active front lines in Southern Ukraine", "Ukraine", Branch::Combined),
    ("gaza", "Gaza Strip", 31.4, 34.3, 0.95, "PS", "Ongoing conflict in Gaza", "Gaza", Branch::Army),
    ("sudan-khartoum", "Khartoum Region", 15.6, 32.5, 0.9, "SD", "Sudan civil war - Khartoum region", "Sudan", Branch::Army),
    ("sudan-darfur", "Darfur Region", 13.0, 25.0, 0.85, "SD", "Darfur conflict zone", "Sudan", Branch::Army),
    ("myanmar", "Myanmar Conflict Zone", 22.0, 96.0, 0.85, "MM", "Myanmar civil war and ethnic conflicts", "Myanmar", Branch::Army),
    ("syria-northeast", "Northeastern Syria", 36.5, 40.0, 0.8, "SY", "Syria conflict zone - Northeast", "Syria", Branch::Combined),
    ("yemen", "Yemen Conflict Zone", 15.0, 44.0, 0.85, "YE", "Yemen civil war", "Yemen", Branch::Combined),
    ("ethiopia", "Ethiopia Conflict Zone", 12.0, 39.0, 0.8, "ET", "Ethiopia regional conflicts", "Ethiopia", Branch::Army),
    ("sahel", "Sahel Conflict Zone", 16.0, 1.0, 0.85, "ML", "Sahel terrorism and insurgency", "Mali", Branch::Army),
    ("haiti", "Haiti Crisis Zone", 18.5, -72.5, 0.8, "HT", "Haiti gang violence and political crisis", "Haiti", Branch::Army),
    ("mexico-north", "Northern Mexico", 31.0, -106.0, 0.75, "MX", "Mexico cartel violence", "Mexico", Branch::Army),
    ("mexico-west", "Western Mexico", 23.5, -103.5, 0.7, "MX", "Mexico cartel activity", "Mexico", Branch::Army),
    ("drc-east", "Eastern DRC", -2.0, 28.0, 0.85, "CD", "DRC eastern conflict (M23, ADF)", "Congo", Branch::Army),
    ("scs", "South China Sea", 15.0, 115.0, 0.75, "CN", "South China Sea tensions", "China", Branch::Navy),
    ("taiwan", "Taiwan Strait", 24.0, 121.0, 0.8, "TW", "Taiwan Strait tensions", "Taiwan", Branch::Combined),
    ("kashmir", "Kashmir Region", 34.0, 76.0, 0.75, "IN", "India-Pakistan tensions over Kashmir", "India", Branch::Army),
    ("nkorea", "Korean Peninsula", 38.0, 127.0, 0.75, "KP", "North Korea tensions", "North-Korea", Branch::Combined),
    ("south-caucasus", "South Caucasus", 40.0, 45.5, 0.75, "AZ", "Armenia-Azerbaijan tensions", "Armenia", Branch::Army),
    ("colombia", "Colombia Conflict Zone", 3.0, -74.0, 0.7, "CO", "Colombia armed groups and cocaine conflict", "Colombia", Branch::Army),
    ("afghanistan", "Afghanistan", 33.0, 65.0, 0.75, "AF", "Afghanistan terrorism and humanitarian crisis", "Afghanistan", Branch::Army),
    ("venezuela", "Venezuela Region", 8.0, -66.0, 0.65, "VE", "Venezuela political and economic crisis", "Venezuela", Branch::Army),
];

fn labelled<L: Clone>(table: &[(L, &[&str])]) -> Vec<KeywordGroup<L>> {
    table
        .iter()
        .map(|(label, keywords)| KeywordGroup {
            label: label.clone(),
            keywords: owned(keywords),
        })
        .collect()
}

pub fn signal_tables() -> SignalTables {
    SignalTables {
        kinds: labelled(SIGNAL_KINDS),
        high_confidence: owned(HIGH_CONFIDENCE),
        medium_confidence: owned(MEDIUM_CONFIDENCE),
        regions: SIGNAL_REGIONS
            .iter()
            .map(|(label, keywords)| KeywordGroup {
                label: label.to_string(),
                keywords: owned(keywords),
            })
            .collect(),
        academic: owned(ACADEMIC_MARKERS),
    }
}

pub fn military_tables() -> MilitaryTables {
    let zones = PERSISTENT_ZONES
        .iter()
        .map(
            |&(id, name, lat, lng, intensity, country, title, tracker, branch)| ConflictZone {
                id: id.to_string(),
                name: name.to_string(),
                lat,
                lng,
                intensity,
                country: country.to_string(),
                title: title.to_string(),
                tracker: tracker.to_string(),
                branch,
            },
        )
        .collect();

    MilitaryTables {
        keywords: owned(MILITARY_KEYWORDS),
        exclusions: owned(MILITARY_EXCLUSIONS),
        branches: labelled(BRANCH_GROUPS),
        intensity: labelled(INTENSITY_TIERS),
        conflict_keywords: owned(CONFLICT_KEYWORDS),
        zones,
    }
}
