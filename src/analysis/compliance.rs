//! Platform loudness compliance
//!
//! Delivery targets for common streaming, broadcast and cinema platforms,
//! and the check of an integrated loudness against them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::analysis::db_serde;
use crate::error::{AnalysisError, Result};

/// Allowed deviation from a platform target, in LU
pub const COMPLIANCE_TOLERANCE_LU: f64 = 1.0;

/// Standard target loudness values in LUFS
pub mod targets {
    pub const SPOTIFY: f64 = -14.0;
    pub const YOUTUBE: f64 = -14.0;
    pub const APPLE_MUSIC: f64 = -16.0;
    pub const AMAZON_MUSIC: f64 = -14.0;
    pub const TIDAL: f64 = -14.0;
    /// ATSC A/85 style broadcast delivery
    pub const BROADCAST: f64 = -24.0;
    pub const CINEMA: f64 = -27.0;
    pub const PODCAST: f64 = -16.0;
}

/// Delivery platform with a fixed loudness target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Platform {
    Spotify,
    Youtube,
    AppleMusic,
    AmazonMusic,
    Tidal,
    Broadcast,
    Cinema,
    Podcast,
}

impl Platform {
    /// Every platform, in table order
    pub const ALL: [Platform; 8] = [
        Platform::Spotify,
        Platform::Youtube,
        Platform::AppleMusic,
        Platform::AmazonMusic,
        Platform::Tidal,
        Platform::Broadcast,
        Platform::Cinema,
        Platform::Podcast,
    ];

    /// Target integrated loudness in LUFS
    pub fn target_lufs(self) -> f64 {
        match self {
            Platform::Spotify => targets::SPOTIFY,
            Platform::Youtube => targets::YOUTUBE,
            Platform::AppleMusic => targets::APPLE_MUSIC,
            Platform::AmazonMusic => targets::AMAZON_MUSIC,
            Platform::Tidal => targets::TIDAL,
            Platform::Broadcast => targets::BROADCAST,
            Platform::Cinema => targets::CINEMA,
            Platform::Podcast => targets::PODCAST,
        }
    }

    /// Table name of the platform
    pub fn name(self) -> &'static str {
        match self {
            Platform::Spotify => "spotify",
            Platform::Youtube => "youtube",
            Platform::AppleMusic => "appleMusic",
            Platform::AmazonMusic => "amazonMusic",
            Platform::Tidal => "tidal",
            Platform::Broadcast => "broadcast",
            Platform::Cinema => "cinema",
            Platform::Podcast => "podcast",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Platform {
    type Err = AnalysisError;

    /// Accepts table names case-insensitively, with or without `-`/`_`
    /// separators (`appleMusic`, `apple-music`, `APPLE_MUSIC`)
    fn from_str(s: &str) -> Result<Self> {
        let key: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();

        Platform::ALL
            .into_iter()
            .find(|p| p.name().to_ascii_lowercase() == key)
            .ok_or_else(|| AnalysisError::UnknownPlatform {
                name: s.to_string(),
            })
    }
}

/// Outcome of checking a loudness value against a platform target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComplianceReport {
    pub platform: Platform,
    /// Target loudness in LUFS
    pub target: f64,
    /// Measured minus target, in LU
    #[serde(with = "db_serde")]
    pub difference: f64,
    /// Whether the difference is within the tolerance
    pub compliant: bool,
    /// Gain that would bring the programme onto target, in dB
    pub gain_db: f64,
}

/// Check an integrated loudness against a platform target
///
/// A silent (-inf) programme is never compliant and needs no gain.
pub fn check_compliance(integrated_lufs: f64, platform: Platform) -> ComplianceReport {
    let target = platform.target_lufs();
    let difference = integrated_lufs - target;
    let gain_db = if difference.is_finite() { -difference } else { 0.0 };

    ComplianceReport {
        platform,
        target,
        difference,
        compliant: difference.abs() <= COMPLIANCE_TOLERANCE_LU,
        gain_db,
    }
}

/// Check an integrated loudness against every platform
pub fn check_all_platforms(integrated_lufs: f64) -> Vec<ComplianceReport> {
    Platform::ALL
        .into_iter()
        .map(|platform| check_compliance(integrated_lufs, platform))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use test_case::test_case;

    #[test]
    fn test_exact_target_is_compliant() {
        for platform in Platform::ALL {
            let report = check_compliance(platform.target_lufs(), platform);
            assert!(report.compliant, "{} should accept its own target", platform);
            assert_eq!(report.difference, 0.0);
            assert_eq!(report.gain_db, 0.0);
        }
    }

    #[test]
    fn test_tolerance_boundary() {
        assert!(check_compliance(-15.0, Platform::Spotify).compliant);
        assert!(check_compliance(-13.0, Platform::Spotify).compliant);
        assert!(!check_compliance(-12.5, Platform::Spotify).compliant);
        assert!(!check_compliance(-23.0, Platform::Cinema).compliant);
    }

    #[test]
    fn test_gain_to_target() {
        let report = check_compliance(-9.5, Platform::AppleMusic);
        assert_abs_diff_eq!(report.difference, 6.5);
        assert_abs_diff_eq!(report.gain_db, -6.5);
    }

    #[test]
    fn test_silence_never_compliant() {
        let report = check_compliance(f64::NEG_INFINITY, Platform::Broadcast);
        assert!(!report.compliant);
        assert_eq!(report.difference, f64::NEG_INFINITY);
        assert_eq!(report.gain_db, 0.0);
    }

    #[test_case(Platform::Spotify, -14.0 ; "spotify")]
    #[test_case(Platform::Youtube, -14.0 ; "youtube")]
    #[test_case(Platform::AppleMusic, -16.0 ; "apple music")]
    #[test_case(Platform::AmazonMusic, -14.0 ; "amazon music")]
    #[test_case(Platform::Tidal, -14.0 ; "tidal")]
    #[test_case(Platform::Broadcast, -24.0 ; "broadcast")]
    #[test_case(Platform::Cinema, -27.0 ; "cinema")]
    #[test_case(Platform::Podcast, -16.0 ; "podcast")]
    fn test_target_table(platform: Platform, target: f64) {
        assert_eq!(platform.target_lufs(), target);
        assert_eq!(platform.name().parse::<Platform>().unwrap(), platform);
    }

    #[test]
    fn test_parse_platform_names() {
        assert_eq!("appleMusic".parse::<Platform>().unwrap(), Platform::AppleMusic);
        assert_eq!("apple-music".parse::<Platform>().unwrap(), Platform::AppleMusic);
        assert_eq!("AMAZON_MUSIC".parse::<Platform>().unwrap(), Platform::AmazonMusic);
        assert_eq!("youtube".parse::<Platform>().unwrap(), Platform::Youtube);
        assert!(matches!(
            "radio".parse::<Platform>(),
            Err(AnalysisError::UnknownPlatform { .. })
        ));
    }

    #[test]
    fn test_check_all_platforms() {
        let reports = check_all_platforms(-14.2);
        assert_eq!(reports.len(), Platform::ALL.len());
        let compliant: Vec<Platform> = reports
            .iter()
            .filter(|r| r.compliant)
            .map(|r| r.platform)
            .collect();
        assert_eq!(
            compliant,
            vec![
                Platform::Spotify,
                Platform::Youtube,
                Platform::AmazonMusic,
                Platform::Tidal
            ]
        );
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&Platform::AppleMusic).unwrap();
        assert_eq!(json, r#""appleMusic""#);
    }
}
