// src/embed/provider.rs
// =============================================================================
// Recognizes URLs from the providers we know how to embed.
//
// Each provider has one anchored regex. Candidates are tested in a fixed
// priority order (video, post, repository, article) and the first hit wins.
// The patterns are disjoint by host, so the order only matters as a tie-break
// policy if they ever overlap.
//
// Most patterns only anchor the start: anything after the recognized prefix
// (a query string, a #fragment) is tolerated. The GitHub pattern is the
// exception; it must be exactly `owner/repo` with an optional trailing slash,
// so deep links into a repository stay ordinary links.
//
// Rust concepts:
// - LazyLock: compile each regex once, on first use
// - Enums with data: one variant per provider, carrying what it extracted
// =============================================================================

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

// The patterns are constants, so failing to compile one is a programmer error
static YOUTUBE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://(www\.)?(youtube\.com/watch\?v=|youtu\.be/)([a-zA-Z0-9_-]+)")
        .expect("youtube pattern is valid")
});

static TWITTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://(www\.)?(twitter\.com|x\.com)/([a-zA-Z0-9_]+)/status/([0-9]+)")
        .expect("twitter pattern is valid")
});

static GITHUB: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://(www\.)?github\.com/([a-zA-Z0-9_-]+)/([a-zA-Z0-9_.-]+)/?$")
        .expect("github pattern is valid")
});

static ZENN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://zenn\.dev/([a-zA-Z0-9_-]+)/(articles|books|scraps)/([a-zA-Z0-9_-]+)")
        .expect("zenn pattern is valid")
});

// The fixed set of providers
//
// The lowercase names are what the options file uses:
//   providers = ["youtube", "github"]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    YouTube,
    Twitter,
    GitHub,
    Zenn,
}

impl Provider {
    /// Every provider, in matching priority order
    pub const ALL: [Provider; 4] = [
        Provider::YouTube,
        Provider::Twitter,
        Provider::GitHub,
        Provider::Zenn,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Provider::YouTube => "youtube",
            Provider::Twitter => "twitter",
            Provider::GitHub => "github",
            Provider::Zenn => "zenn",
        }
    }

    // Tests `url` against this provider's pattern only
    pub fn recognize(self, url: &str) -> Option<ProviderMatch> {
        match self {
            Provider::YouTube => {
                let caps = YOUTUBE.captures(url)?;
                Some(ProviderMatch::Video {
                    id: caps[3].to_string(),
                })
            }
            Provider::Twitter => {
                let caps = TWITTER.captures(url)?;
                Some(ProviderMatch::Post {
                    id: caps[4].to_string(),
                    url: url.to_string(),
                })
            }
            Provider::GitHub => {
                let caps = GITHUB.captures(url)?;
                Some(ProviderMatch::Repository {
                    owner: caps[2].to_string(),
                    repo: caps[3].to_string(),
                    url: url.to_string(),
                })
            }
            Provider::Zenn => ZENN.is_match(url).then(|| ProviderMatch::Article {
                url: url.to_string(),
            }),
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// What a provider pulled out of a URL
//
// This only lives between matching and rendering one paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderMatch {
    /// A YouTube video, by id
    Video { id: String },
    /// A tweet / X post; the widget loads from the URL, the id is tagged on the quote
    Post { id: String, url: String },
    /// A GitHub repository root
    Repository {
        owner: String,
        repo: String,
        url: String,
    },
    /// A Zenn article, book or scrap, embedded by URL
    Article { url: String },
}

impl ProviderMatch {
    pub fn provider(&self) -> Provider {
        match self {
            ProviderMatch::Video { .. } => Provider::YouTube,
            ProviderMatch::Post { .. } => Provider::Twitter,
            ProviderMatch::Repository { .. } => Provider::GitHub,
            ProviderMatch::Article { .. } => Provider::Zenn,
        }
    }
}

// Finds the first enabled provider that recognizes `url`
//
// Priority always follows `Provider::ALL`; the order of `enabled` doesn't
// matter, only membership does.
pub fn match_url(url: &str, enabled: &[Provider]) -> Option<ProviderMatch> {
    Provider::ALL
        .into_iter()
        .filter(|provider| enabled.contains(provider))
        .find_map(|provider| provider.recognize(url))
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What does `caps[3]` mean?
//    - Capture groups are numbered by their opening parenthesis
//    - Group 0 is the whole match; optional groups like `(www\.)?` count too,
//      which is why the YouTube id is group 3, not 1
//
// 2. Why `?` after `captures(url)`?
//    - captures() returns Option; `?` in a function returning Option bails
//      out with None when the pattern doesn't match
// -----------------------------------------------------------------------------
