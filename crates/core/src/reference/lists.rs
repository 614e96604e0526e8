//! Embedded card-name lists.
//!
//! Names are stored in their printed spelling; [`ReferenceLists`](super::ReferenceLists)
//! lowercases them once at construction.

// ============================================================================
// Bracket rules
// ============================================================================

/// Cards on the curated Game Changer list.
pub const GAME_CHANGERS: &[&str] = &[
    // White
    "Drannith Magistrate",
    "Enlightened Tutor",
    "Humility",
    "Smothering Tithe",
    "Teferi's Protection",
    // Blue
    "Consecrated Sphinx",
    "Cyclonic Rift",
    "Fierce Guardianship",
    "Force of Will",
    "Gifts Ungiven",
    "Intuition",
    "Mystical Tutor",
    "Narset, Parter of Veils",
    "Rhystic Study",
    "Thassa's Oracle",
    // Black
    "Ad Nauseam",
    "Bolas's Citadel",
    "Braids, Cabal Minion",
    "Imperial Seal",
    "Necropotence",
    "Opposition Agent",
    "Orcish Bowmasters",
    "Tergrid, God of Fright // Tergrid's Lantern",
    "Vampiric Tutor",
    // Red
    "Gamble",
    "Jeska's Will",
    "Underworld Breach",
    "Panoptic Mirror",
    // Green
    "Crop Rotation",
    "Natural Order",
    "Seedborn Muse",
    "Survival of the Fittest",
    "Worldly Tutor",
    // Multicolor
    "Grand Arbiter Augustin IV",
    "Notion Thief",
    "Aura Shards",
    "Coalition Victory",
    // Colorless
    "Chrome Mox",
    "Grim Monolith",
    "Lion's Eye Diamond",
    "Mana Vault",
    "Mox Diamond",
    "The One Ring",
    // Lands
    "Ancient Tomb",
    "Field of the Dead",
    "Gaea's Cradle",
    "Glacial Chasm",
    "Mishra's Workshop",
    "Serra's Sanctum",
    "The Tabernacle at Pendrell Vale",
];

pub const MASS_LAND_DENIAL: &[&str] = &[
    "Armageddon",
    "Catastrophe",
    "Decree of Annihilation",
    "Devastation",
    "Epicenter",
    "Fall of the Thran",
    "Global Ruin",
    "Impending Disaster",
    "Jokulhaups",
    "Keldon Firebombers",
    "Obliterate",
    "Ravages of War",
    "Ruination",
    "Sunder",
    "Thoughts of Ruin",
    "Worldslayer",
    "Boom // Bust",
    "Blood Moon",
    "Back to Basics",
    "Winter Orb",
    "Static Orb",
];

pub const EXTRA_TURNS: &[&str] = &[
    "Time Walk",
    "Time Warp",
    "Temporal Manipulation",
    "Temporal Mastery",
    "Expropriate",
    "Time Stretch",
    "Beacon of Tomorrows",
    "Capture of Jingzhou",
    "Karn's Temporal Sundering",
    "Nexus of Fate",
    "Part the Waterveil",
    "Savor the Moment",
    "Temporal Trespass",
    "Walk the Aeons",
    "Alrund's Epiphany",
    "Medomai the Ageless",
    "Notorious Throng",
    "Ral Zarek",
    "Seedtime",
    "Wanderwine Prophets",
];

// ============================================================================
// Competitive signals
// ============================================================================

pub const CEDH_COMMANDERS_TIER1: &[&str] = &[
    "Kinnan, Bonder Prodigy",
    "Najeela, the Blade-Blossom",
    "Tymna the Weaver",
    "Thrasios, Triton Hero",
    "Kraum, Ludevic's Opus",
    "Kodama of the East Tree",
    "Rograkh, Son of Rohgahh",
    "Sisay, Weatherlight Captain",
    "Kenrith, the Returned King",
    "Talion, the Kindly Lord",
    "The Gitrog Monster",
    "Selvala, Heart of the Wilds",
    "Godo, Bandit Warlord",
    "Malcolm, Keen-Eyed Navigator",
    "Tivit, Seller of Secrets",
    "Inalla, Archmage Ritualist",
];

pub const CEDH_COMMANDERS_TIER2: &[&str] = &[
    "Yuriko, the Tiger's Shadow",
    "Urza, Lord High Artificer",
    "Winota, Joiner of Forces",
    "Korvold, Fae-Cursed King",
    "Magda, Brazen Outlaw",
    "Heliod, Sun-Crowned",
    "K'rrik, Son of Yawgmoth",
    "Prossh, Skyraider of Kher",
    "Derevi, Empyrial Tactician",
    "Zur the Enchanter",
    "Selvala, Explorer Returned",
    "Teshar, Ancestor's Apostle",
    "Birgi, God of Storytelling",
    "Jhoira, Weatherlight Captain",
    "Emry, Lurker of the Loch",
    "Oswald Fiddlebender",
    "Grist, the Hunger Tide",
    "Raffine, Scheming Seer",
    "Light-Paws, Emperor's Voice",
    "Krark, the Thumbless",
    "Minsc & Boo, Timeless Heroes",
    "Shorikai, Genesis Engine",
];

pub const FAST_MANA: &[&str] = &[
    "Mana Crypt",
    "Mox Diamond",
    "Chrome Mox",
    "Mox Opal",
    "Mox Amber",
    "Jeweled Lotus",
    "Lotus Petal",
    "Lion's Eye Diamond",
    "Mana Vault",
    "Grim Monolith",
    "Ancient Tomb",
    "City of Traitors",
    "Crystal Vein",
    "Gemstone Caverns",
    "Sol Ring",
    "Springleaf Drum",
];

pub const FREE_INTERACTION: &[&str] = &[
    "Force of Will",
    "Force of Negation",
    "Fierce Guardianship",
    "Pact of Negation",
    "Mental Misstep",
    "Misdirection",
    "Commandeer",
    "Deflecting Swat",
    "Deadly Rollick",
    "Submerge",
    "Snapback",
    "Bounty of the Hunt",
    "Teferi's Protection",
    "Flawless Maneuver",
    "Slip Out the Back",
];

pub const COMPETITIVE_STAX: &[&str] = &[
    "Drannith Magistrate",
    "Opposition Agent",
    "Collector Ouphe",
    "Null Rod",
    "Cursed Totem",
    "Grafdigger's Cage",
    "Rule of Law",
    "Deafening Silence",
    "Archon of Emeria",
    "Aven Mindcensor",
    "Stranglehold",
    "Notion Thief",
    "Narset, Parter of Veils",
    "Lavinia, Azorius Renegade",
    "Linvala, Keeper of Silence",
    "Torpor Orb",
    "Hushwing Gryff",
    "Spirit of the Labyrinth",
    "Leonin Arbiter",
    "Thalia, Guardian of Thraben",
    "Grand Abolisher",
    "Silence",
    "Orim's Chant",
];

pub const HIGH_POWER_STAPLES: &[&str] = &[
    // Card advantage
    "Rhystic Study",
    "Mystic Remora",
    "Necropotence",
    "Sylvan Library",
    "Esper Sentinel",
    "Dark Confidant",
    "Consecrated Sphinx",
    "The One Ring",
    "Orcish Bowmasters",
    // Interaction
    "Cyclonic Rift",
    "Deadly Rollick",
    "Deflecting Swat",
    "Fierce Guardianship",
    "Force of Will",
    "Force of Negation",
    "Swan Song",
    "Delay",
    "Counterspell",
    "Mana Drain",
    "Dovin's Veto",
    "Swords to Plowshares",
    "Path to Exile",
    "Assassin's Trophy",
    "Abrupt Decay",
    "Nature's Claim",
    // Creatures
    "Dockside Extortionist",
    "Smothering Tithe",
    "Dauthi Voidwalker",
    "Ragavan, Nimble Pilferer",
    "Thassa's Oracle",
    "Drannith Magistrate",
    "Opposition Agent",
    // Mana
    "Mana Crypt",
    "Mox Diamond",
    "Chrome Mox",
    "Jeweled Lotus",
    "Gaea's Cradle",
    "Serra's Sanctum",
    "Ancient Tomb",
    "Mishra's Workshop",
    "The Tabernacle at Pendrell Vale",
    "Bazaar of Baghdad",
    "Boseiju, Who Endures",
];

// ============================================================================
// Tutors by efficiency
// ============================================================================

pub const TUTORS_PREMIUM: &[&str] = &[
    "Demonic Tutor",
    "Vampiric Tutor",
    "Imperial Seal",
    "Mystical Tutor",
    "Enlightened Tutor",
    "Worldly Tutor",
    "Personal Tutor",
    "Gamble",
    "Summoner's Pact",
    "Merchant Scroll",
    "Muddle the Mixture",
    "Shred Memory",
    "Dimir Machinations",
    "Dizzy Spell",
];

pub const TUTORS_EFFICIENT: &[&str] = &[
    "Eladamri's Call",
    "Finale of Devastation",
    "Green Sun's Zenith",
    "Chord of Calling",
    "Eldritch Evolution",
    "Neoform",
    "Natural Order",
    "Birthing Pod",
    "Survival of the Fittest",
    "Fauna Shaman",
    "Crop Rotation",
    "Sylvan Tutor",
    "Wishclaw Talisman",
    "Scheming Symmetry",
    "Diabolic Intent",
    "Grim Tutor",
    "Recruiter of the Guard",
    "Imperial Recruiter",
    "Ranger-Captain of Eos",
    "Ranger of Eos",
    "Spellseeker",
    "Tribute Mage",
    "Trophy Mage",
    "Trinket Mage",
    "Urza's Saga",
    "Inventors' Fair",
    "Tolaria West",
    "Fabricate",
    "Whir of Invention",
    "Tezzeret the Seeker",
    "Steelshaper's Gift",
    "Open the Armory",
    "Idyllic Tutor",
    "Sterling Grove",
    "Academy Rector",
    "Arena Rector",
];

pub const TUTORS_STANDARD: &[&str] = &[
    "Diabolic Tutor",
    "Mastermind's Acquisition",
    "Praetor's Grasp",
    "Dark Petition",
    "Sidisi, Undead Vizier",
    "Rune-Scarred Demon",
    "Razaketh, the Foulblooded",
    "Solve the Equation",
    "Long-Term Plans",
    "Supply // Demand",
    "Drift of Phantasms",
    "Dimir Infiltrator",
    "Clutch of the Undercity",
    "Plea for Guidance",
    "Beseech the Queen",
    "Final Parting",
    "Jarad's Orders",
    "Entomb",
    "Buried Alive",
    "Unmarked Grave",
];

pub const TUTORS_SLOW: &[&str] = &[
    "Diabolic Revelation",
    "Increasing Ambition",
    "Behold the Beyond",
    "Liliana Vess",
    "Tamiyo's Journal",
    "Planar Portal",
    "Planar Bridge",
    "Ring of Three Wishes",
    "Citanul Flute",
];

// ============================================================================
// Deck construction
// ============================================================================

/// Cards reading "A deck can have any number of cards named ~".
pub const ANY_NUMBER_CARDS: &[&str] = &[
    "Relentless Rats",
    "Rat Colony",
    "Shadowborn Apostle",
    "Persistent Petitioners",
    "Dragon's Approach",
    "Slime Against Humanity",
    "Hare Apparent",
];

/// Cards with a printed copy limit above one.
pub const CAPPED_COPY_CARDS: &[(&str, u32)] = &[("Seven Dwarves", 7), ("Nazgûl", 9)];

pub const BASIC_LAND_NAMES: &[&str] = &[
    "Plains",
    "Island",
    "Swamp",
    "Mountain",
    "Forest",
    "Wastes",
    "Snow-Covered Plains",
    "Snow-Covered Island",
    "Snow-Covered Swamp",
    "Snow-Covered Mountain",
    "Snow-Covered Forest",
    "Snow-Covered Wastes",
];

/// Staples the narrative prompt does not spell out.
pub const WELL_KNOWN_CARDS: &[&str] = &[
    "Sol Ring",
    "Arcane Signet",
    "Command Tower",
    "Exotic Orchard",
    "Path of Ancestry",
    "Commander's Sphere",
    "Mind Stone",
    "Fellwar Stone",
    "Thought Vessel",
    "Swiftfoot Boots",
    "Lightning Greaves",
    "Swords to Plowshares",
    "Path to Exile",
    "Counterspell",
    "Cultivate",
    "Kodama's Reach",
    "Rampant Growth",
    "Farseek",
    "Evolving Wilds",
    "Terramorphic Expanse",
    "Azorius Signet",
    "Dimir Signet",
    "Rakdos Signet",
    "Gruul Signet",
    "Selesnya Signet",
    "Orzhov Signet",
    "Izzet Signet",
    "Golgari Signet",
    "Boros Signet",
    "Simic Signet",
    "Talisman of Progress",
    "Talisman of Dominance",
    "Talisman of Indulgence",
    "Talisman of Impulse",
    "Talisman of Unity",
    "Talisman of Hierarchy",
    "Talisman of Creativity",
    "Talisman of Resilience",
    "Talisman of Conviction",
    "Talisman of Curiosity",
];
