//! Embeddable player URLs.
//!
//! Playback is delegated to a third-party iframe player addressed purely by
//! catalog ids.

use serde::{Deserialize, Serialize};

/// What to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PlayTarget {
    Movie { id: u64 },
    Episode { tv_id: u64, season: u32, episode: u32 },
}

/// Player embed URL for `target`, or `None` when the target is incomplete
/// (zero ids, season or episode).
pub fn embed_url(base_url: &str, target: PlayTarget) -> Option<String> {
    let base = base_url.trim_end_matches('/');
    match target {
        PlayTarget::Movie { id } if id > 0 => Some(format!("{}/movie/{}", base, id)),
        PlayTarget::Episode {
            tv_id,
            season,
            episode,
        } if tv_id > 0 && season > 0 && episode > 0 => {
            Some(format!("{}/tv/{}/{}/{}", base, tv_id, season, episode))
        }
        _ => None,
    }
}
