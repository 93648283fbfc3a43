//! Abbreviation tables used by transformation detection.

/// Street type full name (lowercase) to standard abbreviation.
pub const STREET_TYPE_TO_ABBREV: &[(&str, &str)] = &[
    ("street", "St"),
    ("avenue", "Ave"),
    ("boulevard", "Blvd"),
    ("drive", "Dr"),
    ("road", "Rd"),
    ("lane", "Ln"),
    ("court", "Ct"),
    ("place", "Pl"),
    ("circle", "Cir"),
    ("way", "Way"),
    ("terrace", "Ter"),
    ("highway", "Hwy"),
    ("parkway", "Pkwy"),
    ("trail", "Trl"),
    ("square", "Sq"),
    ("expressway", "Expy"),
    ("freeway", "Fwy"),
    ("turnpike", "Tpke"),
    ("pike", "Pike"),
    ("alley", "Aly"),
    ("crossing", "Xing"),
    ("loop", "Loop"),
    ("run", "Run"),
    ("pass", "Pass"),
    ("ridge", "Rdg"),
    ("valley", "Vly"),
    ("view", "Vw"),
    ("heights", "Hts"),
    ("grove", "Grv"),
    ("park", "Park"),
    ("point", "Pt"),
    ("cove", "Cv"),
    ("creek", "Crk"),
    ("extension", "Ext"),
    ("garden", "Gdn"),
    ("gardens", "Gdns"),
    ("mount", "Mt"),
    ("mountain", "Mtn"),
];

/// Directional full name (lowercase) to abbreviation.
pub const DIRECTION_TO_ABBREV: &[(&str, &str)] = &[
    ("north", "N"),
    ("south", "S"),
    ("east", "E"),
    ("west", "W"),
    ("northeast", "NE"),
    ("northwest", "NW"),
    ("southeast", "SE"),
    ("southwest", "SW"),
];

/// Unit type full name (lowercase) to abbreviation.
pub const UNIT_TYPE_TO_ABBREV: &[(&str, &str)] = &[
    ("apartment", "Apt"),
    ("suite", "Ste"),
    ("unit", "Unit"),
    ("building", "Bldg"),
    ("floor", "Fl"),
    ("room", "Rm"),
    ("department", "Dept"),
    ("office", "Ofc"),
    ("space", "Spc"),
    ("lot", "Lot"),
    ("trailer", "Trlr"),
    ("penthouse", "PH"),
    ("basement", "Bsmt"),
    ("lower", "Lowr"),
    ("upper", "Uppr"),
    ("front", "Frnt"),
    ("rear", "Rear"),
    ("side", "Side"),
];

/// Abbreviation-with-period patterns commonly stripped during parsing.
pub const PERIOD_ABBREVIATIONS: &[&str] = &[
    "St.", "Ave.", "Blvd.", "Dr.", "Rd.", "P.O.", "Apt.", "Ste.", "N.", "S.", "E.", "W.",
];
