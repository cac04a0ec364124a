// Static site configuration: page text, social links, playlists and
// cache settings. Authored ahead of time, never edited at runtime.
//
// Lookup order:
// 1. $GLASS_PLAYER_CONFIG
// 2. <config dir>/glass-player/site.json
// 3. built-in defaults

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::player::Track;

pub const APP_DIR: &str = "glass-player";
pub const CONFIG_ENV: &str = "GLASS_PLAYER_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialLink {
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarqueeConfig {
    pub text: String,
    /// Columns scrolled per second.
    pub speed: f64,
}

impl Default for MarqueeConfig {
    fn default() -> Self {
        MarqueeConfig {
            text: "— powered by av\\aplanes     ".to_string(),
            speed: 8.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub enabled: bool,
    /// Bumping the name invalidates every previously cached asset.
    pub name: String,
    /// Only request paths under this prefix go through the cache.
    pub prefix: String,
    /// Where uncached assets are downloaded from, e.g. "https://example.org".
    pub origin: Option<String>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        CacheConfig {
            enabled: true,
            name: "video-cache-v1".to_string(),
            prefix: "/videos/".to_string(),
            origin: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub title: String,
    pub greeting: String,
    pub socials: Vec<SocialLink>,
    pub marquee: MarqueeConfig,
    /// Directory that track URIs are relative to.
    pub asset_root: PathBuf,
    pub songs: Vec<Track>,
    pub videos: Vec<Track>,
    /// Length assumed for videos whose duration is not configured.
    pub default_video_secs: f64,
    pub cache: CacheConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        SiteConfig {
            title: "1000yearsofwrath".to_string(),
            greeting: "Привет, я Авиа. Занимаюсь разработкой сайтов, софтов, low-level софта, \
                       блокчейн технологий, ds/tg ботов и просто web3 enjoyer."
                .to_string(),
            socials: vec![
                SocialLink {
                    label: "Discord".to_string(),
                    href: "https://discordapp.com/users/1014171982696296468/".to_string(),
                },
                SocialLink {
                    label: "GitHub".to_string(),
                    href: "https://github.com/Aviaplanes".to_string(),
                },
                SocialLink {
                    label: "Twitter".to_string(),
                    href: "https://twitter.com/1000letgneva".to_string(),
                },
            ],
            marquee: MarqueeConfig::default(),
            asset_root: PathBuf::from("public"),
            songs: default_songs(),
            videos: default_videos(),
            default_video_secs: 30.0,
            cache: CacheConfig::default(),
        }
    }
}

fn default_songs() -> Vec<Track> {
    let song = |id: &str, title: &str, artist: &str, src: &str, cover: &str| {
        Track::new(id, title, src).with_artist(artist).with_cover(cover)
    };
    vec![
        song("0", "гиблое эго", "VELIAL SQUAD", "/music/гиблое эго.flac", "/music/images/гиблое эго.png"),
        song(
            "1",
            "GRAVELAND (prod. shawtyglock x blayze)",
            "VELIAL SQUAD",
            "/music/VELIAL SQUAD - GRAVELAND.flac",
            "/music/images/VELIAL SQUAD - GRAVELAND.webp",
        ),
        song(
            "2",
            "Creepers",
            "VELIAL SQUAD",
            "/music/VELIAL SQUAD - CREEPERS.mpeg",
            "/music/images/VELIAL SQUAD - CREEPERS.jpg",
        ),
        song(
            "3",
            "what else can you ask for",
            "IVOXYGEN",
            "/music/IVOXYGEN - what else can you ask for.flac",
            "/music/images/IVOXYGEN - what else can you ask for.jpg",
        ),
        song(
            "4",
            "Headlock",
            "Imogen Heap",
            "/music/Imogen Heap - Headlock.flac",
            "/music/images/Imogen Heap - Headlock.jpg",
        ),
        song(
            "5",
            "Вампирский щит",
            "VELIAL SQUAD",
            "/music/VELIAL SQUAD - Вампирский щит.mp3",
            "/music/images/vampire.jpg",
        ),
        song(
            "6",
            "Черная река",
            "VELIAL SQUAD",
            "/music/Черная_Река_ft_Trantor_p_shawtyglock.mp3",
            "/music/images/reka.png",
        ),
        song(
            "7",
            "ATRA PLAGUE",
            "VELIAL SQUAD",
            "/music/ATRA PLAGUE [p. shawtyglock x Yung Meep]   VELIAL SQUAD.mp3",
            "/music/images/d3ff548ecce04776e30c95a93cc342a9.webp",
        ),
    ]
}

fn default_videos() -> Vec<Track> {
    [
        "/videos/eraserhead.mp4",
        "/videos/urban.mp4",
        "/videos/IVOXYGEN - the girl next door.webm",
        "/videos/lauren.mp4",
        "/videos/Comp 1_11.mp4",
        "/videos/ggg.mp4",
        "/videos/soundss.mp4",
        "/videos/gat.mp4",
    ]
    .iter()
    .enumerate()
    .map(|(i, src)| Track::from_src(i.to_string(), *src))
    .collect()
}

impl SiteConfig {
    /// Where the config file is looked up, if anywhere.
    pub fn config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join("site.json"))
    }

    pub fn load() -> Result<Self, ConfigError> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            Some(path) => {
                tracing::info!(path = %path.display(), "no config file, using built-in site");
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        tracing::info!(path = %path.display(), songs = config.songs.len(), videos = config.videos.len(), "config loaded");
        Ok(config)
    }

    pub fn from_json(data: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(data)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.songs.is_empty() {
            return Err(ConfigError::EmptyList("songs"));
        }
        if self.videos.is_empty() {
            return Err(ConfigError::EmptyList("videos"));
        }
        Ok(())
    }
}
