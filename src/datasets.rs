//! Dataset identifiers, attribute names, and the county allow-list.

/// FAO Global Administrative Unit Layers 2015, second-level units
pub const GAUL_LEVEL2: &str = "FAO/GAUL/2015/level2";

/// US Census TIGER 2010 ZIP Code Tabulation Areas
pub const TIGER_ZCTA5: &str = "TIGER/2010/ZCTA5";

/// Country name (administrative level 0)
pub const ADM0_NAME: &str = "ADM0_NAME";
/// State or province name (administrative level 1)
pub const ADM1_NAME: &str = "ADM1_NAME";
/// County or district name (administrative level 2)
pub const ADM2_NAME: &str = "ADM2_NAME";
/// Five-digit ZIP code tabulation area
pub const ZCTA5CE10: &str = "ZCTA5CE10";

pub const CALIFORNIA: &str = "California";
pub const UNITED_STATES: &str = "United States of America";

/// Northern and central California counties, as spelled in GAUL level 2.
pub const NORTHERN_CALIFORNIA_COUNTIES: [&str; 44] = [
    "Del Norte",
    "Humboldt",
    "Modoc",
    "Siskiyou",
    "Alameda",
    "Alpine",
    "Amador",
    "Butte",
    "Calaveras",
    "Colusa",
    "Contra Costa",
    "El Dorado",
    "Glenn",
    "Lake",
    "Lassen",
    "Madera",
    "Marin",
    "Mariposa",
    "Mendocino",
    "Merced",
    "Mono",
    "Monterey",
    "Napa",
    "Nevada",
    "Placer",
    "Plumas",
    "Sacramento",
    "San Benito",
    "San Francisco",
    "San Joaquin",
    "San Mateo",
    "Santa Clara",
    "Santa Cruz",
    "Shasta",
    "Sierra",
    "Solano",
    "Sonoma",
    "Stanislaus",
    "Sutter",
    "Tehama",
    "Trinity",
    "Tuolumne",
    "Yolo",
    "Yuba",
];
