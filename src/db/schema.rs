//! Schema SQL and first-run seed data. Every statement is `IF NOT EXISTS` so
//! the whole batch can be re-applied against an existing database; seeding is
//! the caller's decision and happens only when the database file is new.

/// Complete schema batch: tables, indexes, the full-text index, and the
/// triggers that keep it synchronized with the `hymns` table.
pub(crate) const SCHEMA: &str = r#"
-- Categories table for organizing hymns
CREATE TABLE IF NOT EXISTS categories (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    description TEXT,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
);

-- Main hymns table
CREATE TABLE IF NOT EXISTS hymns (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    number INTEGER UNIQUE NOT NULL,
    title TEXT NOT NULL,
    verses TEXT NOT NULL,
    chorus TEXT,
    category_id INTEGER,
    author TEXT,
    composer TEXT,
    year INTEGER,
    copyright TEXT,
    scripture_reference TEXT,
    notes TEXT,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    FOREIGN KEY (category_id) REFERENCES categories(id) ON DELETE SET NULL
);

CREATE INDEX IF NOT EXISTS idx_hymn_number ON hymns(number);
CREATE INDEX IF NOT EXISTS idx_hymn_title ON hymns(title);
CREATE INDEX IF NOT EXISTS idx_hymn_category ON hymns(category_id);

-- Full-text index over the searchable hymn columns. External content keeps
-- the indexed text out of the fts shadow tables; the triggers below are the
-- only writers.
CREATE VIRTUAL TABLE IF NOT EXISTS hymns_fts USING fts5(
    title,
    verses,
    author,
    composer,
    content=hymns,
    content_rowid=id
);

CREATE TRIGGER IF NOT EXISTS hymns_ai AFTER INSERT ON hymns BEGIN
    INSERT INTO hymns_fts(rowid, title, verses, author, composer)
    VALUES (new.id, new.title, new.verses, new.author, new.composer);
END;

CREATE TRIGGER IF NOT EXISTS hymns_ad AFTER DELETE ON hymns BEGIN
    INSERT INTO hymns_fts(hymns_fts, rowid, title, verses, author, composer)
    VALUES ('delete', old.id, old.title, old.verses, old.author, old.composer);
END;

CREATE TRIGGER IF NOT EXISTS hymns_au AFTER UPDATE ON hymns BEGIN
    INSERT INTO hymns_fts(hymns_fts, rowid, title, verses, author, composer)
    VALUES ('delete', old.id, old.title, old.verses, old.author, old.composer);
    INSERT INTO hymns_fts(rowid, title, verses, author, composer)
    VALUES (new.id, new.title, new.verses, new.author, new.composer);
END;

-- User favorites, unique per hymn
CREATE TABLE IF NOT EXISTS favorites (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    hymn_id INTEGER NOT NULL,
    added_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    notes TEXT,
    FOREIGN KEY (hymn_id) REFERENCES hymns(id) ON DELETE CASCADE,
    UNIQUE(hymn_id)
);

-- Append-only view log; repeated views create new rows
CREATE TABLE IF NOT EXISTS recently_viewed (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    hymn_id INTEGER NOT NULL,
    viewed_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    FOREIGN KEY (hymn_id) REFERENCES hymns(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_recently_viewed_time ON recently_viewed(viewed_at DESC);

-- Application settings
CREATE TABLE IF NOT EXISTS settings (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    description TEXT,
    updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
);

-- One counter row per hymn
CREATE TABLE IF NOT EXISTS usage_stats (
    hymn_id INTEGER PRIMARY KEY,
    view_count INTEGER DEFAULT 0,
    last_viewed TIMESTAMP,
    FOREIGN KEY (hymn_id) REFERENCES hymns(id) ON DELETE CASCADE
);

-- Database metadata
CREATE TABLE IF NOT EXISTS db_metadata (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
);

INSERT OR IGNORE INTO db_metadata (key, value) VALUES ('version', '1.0.0');
INSERT OR IGNORE INTO db_metadata (key, value) VALUES ('created_at', datetime('now'));
"#;

/// Default categories seeded on first run: `(name, description)`.
pub(crate) const DEFAULT_CATEGORIES: &[(&str, &str)] = &[
    ("Worship and Praise", "Hymns focused on worship and praise to God"),
    ("Prayer", "Hymns about prayer and communion with God"),
    ("Faith and Trust", "Hymns about faith, trust, and reliance on God"),
    ("Love of God", "Hymns celebrating God's love"),
    ("Salvation", "Hymns about salvation and redemption"),
    ("Second Coming", "Hymns about Christ's return"),
    ("Christian Life", "Hymns about daily Christian living"),
    ("Service", "Hymns about service to God and others"),
    ("Comfort and Peace", "Hymns offering comfort and peace"),
    ("Heaven", "Hymns about heaven and eternal life"),
    ("Gospel Invitation", "Hymns extending gospel invitation"),
    ("Testimony", "Hymns of personal testimony"),
    ("Nature", "Hymns about God's creation"),
    ("Christmas", "Christmas hymns"),
    ("Easter", "Easter hymns"),
    ("Special Occasions", "Hymns for special occasions"),
];

/// Default settings seeded on first run: `(key, value, description)`.
pub(crate) const DEFAULT_SETTINGS: &[(&str, &str, &str)] = &[
    ("theme", "light", "Application theme (light/dark)"),
    ("font_size", "12", "Default font size for hymn display"),
    ("show_hymn_numbers", "true", "Show hymn numbers in lists"),
    ("auto_backup", "true", "Automatic backup enabled"),
    ("backup_frequency", "7", "Backup frequency in days"),
    ("presentation_font_size", "24", "Font size for presentation mode"),
    ("recent_hymns_limit", "50", "Number of recent hymns to keep"),
];

/// A hymn seeded on first run so the application is usable before any import.
pub(crate) struct SeedHymn {
    pub number: i64,
    pub title: &'static str,
    pub verses: &'static str,
    pub chorus: Option<&'static str>,
    pub category: &'static str,
    pub author: &'static str,
    pub composer: &'static str,
    pub year: i64,
    pub scripture_reference: &'static str,
}

pub(crate) const SAMPLE_HYMNS: &[SeedHymn] = &[
    SeedHymn {
        number: 1,
        title: "Holy, Holy, Holy",
        verses: "1. Holy, holy, holy! Lord God Almighty!\n\
Early in the morning our song shall rise to Thee;\n\
Holy, holy, holy! Merciful and mighty!\n\
God in three Persons, blessèd Trinity!\n\
\n\
2. Holy, holy, holy! All the saints adore Thee,\n\
Casting down their golden crowns around the glassy sea;\n\
Cherubim and seraphim falling down before Thee,\n\
Which wert, and art, and evermore shalt be.\n\
\n\
3. Holy, holy, holy! Though the darkness hide Thee,\n\
Though the eye of sinful man Thy glory may not see,\n\
Only Thou art holy; there is none beside Thee\n\
Perfect in power, in love, and purity.\n\
\n\
4. Holy, holy, holy! Lord God Almighty!\n\
All Thy works shall praise Thy name in earth and sky and sea;\n\
Holy, holy, holy! Merciful and mighty!\n\
God in three Persons, blessèd Trinity!",
        chorus: None,
        category: "Worship and Praise",
        author: "Reginald Heber",
        composer: "John B. Dykes",
        year: 1826,
        scripture_reference: "Revelation 4:8",
    },
    SeedHymn {
        number: 2,
        title: "Amazing Grace",
        verses: "1. Amazing grace! How sweet the sound\n\
That saved a wretch like me!\n\
I once was lost, but now am found,\n\
Was blind, but now I see.\n\
\n\
2. 'Twas grace that taught my heart to fear,\n\
And grace my fears relieved;\n\
How precious did that grace appear\n\
The hour I first believed!\n\
\n\
3. Through many dangers, toils and snares,\n\
I have already come;\n\
'Tis grace hath brought me safe thus far,\n\
And grace will lead me home.\n\
\n\
4. When we've been there ten thousand years,\n\
Bright shining as the sun,\n\
We've no less days to sing God's praise\n\
Than when we'd first begun.",
        chorus: None,
        category: "Salvation",
        author: "John Newton",
        composer: "Traditional",
        year: 1779,
        scripture_reference: "Ephesians 2:8",
    },
    SeedHymn {
        number: 3,
        title: "What a Friend We Have in Jesus",
        verses: "1. What a friend we have in Jesus,\n\
All our sins and griefs to bear!\n\
What a privilege to carry\n\
Everything to God in prayer!\n\
O what peace we often forfeit,\n\
O what needless pain we bear,\n\
All because we do not carry\n\
Everything to God in prayer!\n\
\n\
2. Have we trials and temptations?\n\
Is there trouble anywhere?\n\
We should never be discouraged;\n\
Take it to the Lord in prayer.\n\
Can we find a friend so faithful\n\
Who will all our sorrows share?\n\
Jesus knows our every weakness;\n\
Take it to the Lord in prayer.\n\
\n\
3. Are we weak and heavy laden,\n\
Cumbered with a load of care?\n\
Precious Savior, still our refuge,\n\
Take it to the Lord in prayer.\n\
Do thy friends despise, forsake thee?\n\
Take it to the Lord in prayer!\n\
In His arms He'll take and shield thee;\n\
Thou wilt find a solace there.",
        chorus: None,
        category: "Prayer",
        author: "Joseph M. Scriven",
        composer: "Charles C. Converse",
        year: 1855,
        scripture_reference: "John 15:15",
    },
];
