use sha2::{
    Digest,
    Sha256,
};

/// Downloaded audio plus the content-addressed name it will be stored under.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaAsset {
    pub bytes: Vec<u8>,
    pub filename: String,
}

impl MediaAsset {
    pub fn new(suggested_name: &str, bytes: Vec<u8>) -> Self {
        let filename = stable_name(suggested_name, &bytes);
        Self { bytes, filename }
    }
}

/// Derives a stable, filesystem-safe name for an audio blob. The hash token
/// depends only on the bytes, so identical audio always lands on the same
/// name and the media store can skip re-uploads.
pub fn stable_name(suggested: &str, bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    let token: String = digest[..8].iter().map(|b| format!("{:02x}", b)).collect();

    let sanitized = suggested.replace(['/', '\\', ' '], "_");
    let base = strip_mp3_suffix(&sanitized);

    format!("{}_{}.mp3", base, token)
}

fn strip_mp3_suffix(name: &str) -> &str {
    if name.len() >= 4 && name.is_char_boundary(name.len() - 4) {
        let (stem, ext) = name.split_at(name.len() - 4);
        if ext.eq_ignore_ascii_case(".mp3") {
            return stem;
        }
    }
    name
}
