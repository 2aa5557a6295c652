use std::time::Duration;

use reqwest::blocking::Client;

use crate::core::{
    errors::LexankiError,
    pipeline::MediaSource,
};

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

pub fn http_client() -> Result<Client, LexankiError> {
    Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()
        .map_err(|e| LexankiError::Custom(format!("HTTP client build failed: {e}")))
}

/// Fetches an audio file and suggests a filename from the URL path. The
/// suggestion is best-effort only; the stored name is derived from the bytes
/// afterwards.
pub fn download_audio(client: &Client, url: &str) -> Result<(Vec<u8>, String), LexankiError> {
    let resp = client.get(url).send()?;

    if !resp.status().is_success() {
        return Err(LexankiError::BadStatus {
            status: resp.status().to_string(),
            url: resp.url().to_string(),
        });
    }

    let suggested = suggested_filename(resp.url());
    let bytes = resp.bytes()?.to_vec();

    Ok((bytes, suggested))
}

fn suggested_filename(url: &reqwest::Url) -> String {
    let base = url.path_segments().and_then(|segments| segments.last()).unwrap_or("");

    let mut name =
        if !base.is_empty() && base.contains('.') { base.to_string() } else { "audio".to_string() };

    if !name.to_lowercase().ends_with(".mp3") {
        name.push_str(".mp3");
    }

    name
}

pub struct HttpMediaSource {
    client: Client,
}

impl HttpMediaSource {
    pub fn new() -> Result<Self, LexankiError> {
        Ok(Self { client: http_client()? })
    }
}

impl MediaSource for HttpMediaSource {
    fn fetch(&self, url: &str) -> Result<(Vec<u8>, String), LexankiError> {
        download_audio(&self.client, url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggested_filename_from_path() {
        let url = reqwest::Url::parse("https://voix.example.fr/audio/maison.mp3").unwrap();
        assert_eq!(suggested_filename(&url), "maison.mp3");
    }

    #[test]
    fn test_suggested_filename_forces_mp3() {
        let url = reqwest::Url::parse("https://voix.example.fr/audio/maison.ogg").unwrap();
        assert_eq!(suggested_filename(&url), "maison.ogg.mp3");
    }

    #[test]
    fn test_suggested_filename_falls_back_without_extension() {
        // Path segments without a dot are not trusted as filenames.
        let url = reqwest::Url::parse("https://voix.example.fr/tts/12345").unwrap();
        assert_eq!(suggested_filename(&url), "audio.mp3");

        let root = reqwest::Url::parse("https://voix.example.fr/").unwrap();
        assert_eq!(suggested_filename(&root), "audio.mp3");
    }
}
