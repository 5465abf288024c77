//! Static three-level category taxonomy.
//!
//! Configuration data versioned with the code, not derived at runtime.
//! The table is a slice (not a map) on purpose: declaration order is the
//! documented tie-break order for the keyword classifier, so iteration
//! must be stable.

/// A secondary or tertiary category with its trigger keywords.
#[derive(Debug)]
pub struct SubRule {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
}

/// A primary category: trigger keywords plus its sub-tables.
#[derive(Debug)]
pub struct CategoryRule {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
    pub secondary: &'static [SubRule],
    pub tertiary: &'static [SubRule],
}

pub const CATEGORY_RULES: &[CategoryRule] = &[
    CategoryRule {
        name: "Skincare",
        keywords: &[
            "serum", "cream", "moisturizer", "cleanser", "toner", "wash", "gel", "mask", "oil",
            "sunscreen", "spf", "treatment", "lotion", "essence", "balm", "exfoliat", "peel",
            "scrub", "mist", "spray", "water",
        ],
        secondary: &[
            SubRule { name: "Moisturizers", keywords: &["cream", "moisturizer", "hydrat", "lotion"] },
            SubRule {
                name: "Treatments",
                keywords: &["serum", "treatment", "acid", "essence", "booster", "concentrate"],
            },
            SubRule { name: "Cleansers", keywords: &["cleanser", "wash", "foam", "cleansing"] },
            SubRule { name: "Masks", keywords: &["mask", "peel", "sheet"] },
            SubRule { name: "Sun Care & Self Tanners", keywords: &["sunscreen", "spf", "sun"] },
            SubRule {
                name: "Facial Cleansing Brushes",
                keywords: &["brush", "cleansing device"],
            },
            SubRule {
                name: "Eye Care",
                keywords: &["eye cream", "eye serum", "eye gel", "under eye"],
            },
            SubRule {
                name: "Lip Balms & Treatments",
                keywords: &["lip balm", "lip treatment", "lip care"],
            },
        ],
        tertiary: &[
            SubRule { name: "Face Creams", keywords: &["face cream", "facial cream"] },
            SubRule { name: "Face Serums", keywords: &["face serum", "facial serum"] },
            SubRule { name: "Eye Creams", keywords: &["eye cream"] },
            SubRule { name: "Night Creams", keywords: &["night cream", "sleeping"] },
            SubRule { name: "Face Wash", keywords: &["face wash", "facial cleanser"] },
        ],
    },
    CategoryRule {
        name: "Makeup",
        keywords: &[
            "lip", "lipstick", "gloss", "foundation", "concealer", "powder", "mascara",
            "eyeshadow", "eyeliner", "blush", "bronzer", "highlighter", "primer", "setting",
            "brow", "eyebrow", "lash", "nail", "polish",
        ],
        secondary: &[
            SubRule {
                name: "Lips",
                keywords: &["lip", "lipstick", "gloss", "lip oil", "lip stain", "tint"],
            },
            SubRule {
                name: "Face",
                keywords: &["foundation", "concealer", "powder", "primer", "bb cream", "cc cream"],
            },
            SubRule {
                name: "Eyes",
                keywords: &["eye", "mascara", "shadow", "liner", "brow", "lash"],
            },
            SubRule { name: "Cheek", keywords: &["blush", "bronzer", "highlighter", "contour"] },
            SubRule { name: "Nails", keywords: &["nail", "polish", "lacquer", "manicure"] },
        ],
        tertiary: &[
            SubRule { name: "Lipstick", keywords: &["lipstick"] },
            SubRule { name: "Lip Gloss", keywords: &["lip gloss", "gloss"] },
            SubRule { name: "Foundation", keywords: &["foundation"] },
            SubRule { name: "Concealer", keywords: &["concealer"] },
            SubRule { name: "Mascara", keywords: &["mascara"] },
        ],
    },
    CategoryRule {
        name: "Fragrance",
        keywords: &["perfume", "eau de", "cologne", "fragrance", "parfum", "scent"],
        secondary: &[
            SubRule { name: "Women", keywords: &["donna", "femme", "her", "women", "woman"] },
            SubRule { name: "Men", keywords: &["homme", "him", "men", "pour homme"] },
            SubRule {
                name: "Value & Gift Sets",
                keywords: &["set", "gift", "duo", "trio", "mini"],
            },
        ],
        tertiary: &[
            SubRule { name: "Perfume", keywords: &["perfume", "eau de parfum"] },
            SubRule { name: "Eau de Toilette", keywords: &["eau de toilette"] },
            SubRule { name: "Cologne", keywords: &["cologne"] },
        ],
    },
    CategoryRule {
        name: "Hair",
        keywords: &[
            "shampoo", "conditioner", "hair oil", "hair mask", "hair spray", "hair serum",
            "scalp", "styling",
        ],
        secondary: &[
            SubRule { name: "Shampoo & Conditioner", keywords: &["shampoo", "conditioner"] },
            SubRule {
                name: "Hair Treatments",
                keywords: &["hair mask", "hair treatment", "hair serum"],
            },
            SubRule {
                name: "Styling Products",
                keywords: &["hair spray", "gel", "mousse", "styling"],
            },
        ],
        tertiary: &[],
    },
    CategoryRule {
        name: "Bath & Body",
        keywords: &[
            "body lotion", "body cream", "body oil", "body wash", "shower", "bath", "scrub",
            "hand cream", "foot",
        ],
        secondary: &[
            SubRule {
                name: "Body Moisturizers",
                keywords: &["body lotion", "body cream", "body butter"],
            },
            SubRule { name: "Cleansers", keywords: &["body wash", "shower gel", "soap"] },
            SubRule { name: "Hand Care", keywords: &["hand cream", "hand lotion"] },
        ],
        tertiary: &[],
    },
    CategoryRule {
        name: "Tools & Brushes",
        keywords: &["brush", "sponge", "applicator", "tool", "device"],
        secondary: &[
            SubRule { name: "Face Brushes", keywords: &["face brush", "makeup brush"] },
            SubRule { name: "Skincare Tools", keywords: &["roller", "gua sha", "device"] },
        ],
        tertiary: &[],
    },
];
