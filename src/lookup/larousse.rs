use regex::Regex;
use reqwest::blocking::Client;

use crate::core::{
    errors::LexankiError,
    http::http_client,
    models::{
        ConjugationResult,
        DefinitionEntry,
    },
    pipeline::{
        ConjugationSource,
        DefinitionSource,
    },
};

const LAROUSSE_BASE: &str = "https://www.larousse.fr";
const CONJUGATION_PATH: &str = "conjugaison/francais";
const DICTIONARY_PATH: &str = "dictionnaires/francais";

/// Lookup collaborator backed by the larousse.fr conjugation and dictionary
/// pages. Only the output shape is contractual; the page scraping below is
/// boundary plumbing.
pub struct LarousseClient {
    client: Client,
}

impl LarousseClient {
    pub fn new() -> Result<Self, LexankiError> {
        Ok(Self { client: http_client()? })
    }

    fn fetch_page(&self, url: &str) -> Result<String, LexankiError> {
        let resp = self.client.get(url).send()?;

        if !resp.status().is_success() {
            return Err(LexankiError::BadStatus {
                status: resp.status().to_string(),
                url: resp.url().to_string(),
            });
        }

        Ok(resp.text()?)
    }
}

impl ConjugationSource for LarousseClient {
    fn conjugate(&self, verb: &str) -> Result<ConjugationResult, LexankiError> {
        let html = self.fetch_page(&format!("{}/{}/{}", LAROUSSE_BASE, CONJUGATION_PATH, verb))?;
        let result = parse_conjugation_page(&html)?;

        if result.indicatif.is_empty() && result.imperatif.is_empty() {
            return Err(LexankiError::LookupFailed {
                word: verb.to_string(),
                reason: "no conjugation tables found".to_string(),
            });
        }

        Ok(result)
    }
}

impl DefinitionSource for LarousseClient {
    fn define(&self, word: &str) -> Result<Vec<DefinitionEntry>, LexankiError> {
        let html = self.fetch_page(&format!("{}/{}/{}", LAROUSSE_BASE, DICTIONARY_PATH, word))?;
        let entries = parse_definition_page(&html)?;

        if entries.is_empty() {
            return Err(LexankiError::LookupFailed {
                word: word.to_string(),
                reason: "no dictionary entries found".to_string(),
            });
        }

        Ok(entries)
    }
}

/// Conjugation pages nest tense blocks under mood headings. Everything
/// outside the Indicatif and Impératif moods is ignored.
fn parse_conjugation_page(html: &str) -> Result<ConjugationResult, LexankiError> {
    let mood_re = Regex::new(r"(?s)<h2[^>]*>(.*?)</h2>")?;
    let tense_re = Regex::new(r"(?s)<h3[^>]*>(.*?)</h3>")?;
    let form_re = Regex::new(r"(?s)<li[^>]*>(.*?)</li>")?;

    let mut result = ConjugationResult::default();

    for (mood, mood_body) in sections(html, &mood_re) {
        let tenses = match mood.as_str() {
            "Indicatif" => &mut result.indicatif,
            "Impératif" => &mut result.imperatif,
            _ => continue,
        };

        for (tense, tense_body) in sections(mood_body, &tense_re) {
            let forms: Vec<String> = form_re
                .captures_iter(tense_body)
                .filter_map(|c| c.get(1))
                .map(|m| strip_tags(m.as_str()))
                .filter(|form| !form.is_empty())
                .collect();

            if !forms.is_empty() {
                tenses.insert(tense, forms);
            }
        }
    }

    Ok(result)
}

/// Dictionary pages carry one AdresseDefinition header per sense, with the
/// grammatical category and pronunciation link in the block that follows it.
fn parse_definition_page(html: &str) -> Result<Vec<DefinitionEntry>, LexankiError> {
    let header_re =
        Regex::new(r#"(?s)<h2[^>]*class="[^"]*AdresseDefinition[^"]*"[^>]*>(.*?)</h2>"#)?;
    let pos_re = Regex::new(r#"(?s)<p[^>]*class="[^"]*CatgramDefinition[^"]*"[^>]*>(.*?)</p>"#)?;
    let audio_re = Regex::new(r#"<a[^>]*class="[^"]*lienson[^"]*"[^>]*href="([^"]+)""#)?;
    let anchor_re = Regex::new(r"(?s)<a[^>]*>.*?</a>")?;

    let headers: Vec<(usize, usize, &str)> = header_re
        .captures_iter(html)
        .filter_map(|c| {
            let whole = c.get(0)?;
            Some((whole.start(), whole.end(), c.get(1)?.as_str()))
        })
        .collect();

    let mut entries = Vec::new();

    for (i, (start, _, inner)) in headers.iter().enumerate() {
        let block_end = headers.get(i + 1).map(|(next, _, _)| *next).unwrap_or(html.len());
        let block = &html[*start..block_end];

        // The header mixes the headword with phonetics and the sound anchor;
        // anchors are cut before the text is flattened.
        let text = strip_tags(&anchor_re.replace_all(inner, " "));
        if text.is_empty() {
            continue;
        }

        let part_of_speech = pos_re
            .captures(block)
            .and_then(|c| c.get(1))
            .map(|m| strip_tags(m.as_str()))
            .unwrap_or_default();

        // Entries without a pronunciation link cannot feed the audio field.
        let audio_url = match audio_re.captures(block).and_then(|c| c.get(1)) {
            Some(href) => absolute_url(href.as_str()),
            None => continue,
        };

        entries.push(DefinitionEntry { text, part_of_speech, audio_url });
    }

    Ok(entries)
}

/// Splits `html` into (heading text, body until next heading) pairs.
fn sections<'a>(html: &'a str, heading: &Regex) -> Vec<(String, &'a str)> {
    let found: Vec<(String, usize, usize)> = heading
        .captures_iter(html)
        .filter_map(|c| {
            let whole = c.get(0)?;
            Some((strip_tags(c.get(1)?.as_str()), whole.start(), whole.end()))
        })
        .collect();

    found
        .iter()
        .enumerate()
        .map(|(i, (title, _, body_start))| {
            let body_end = found.get(i + 1).map(|(_, start, _)| *start).unwrap_or(html.len());
            (title.clone(), &html[*body_start..body_end])
        })
        .collect()
}

fn strip_tags(fragment: &str) -> String {
    let mut text = String::with_capacity(fragment.len());
    let mut in_tag = false;

    for c in fragment.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if in_tag => {}
            _ => text.push(c),
        }
    }

    let text = text.replace("&nbsp;", " ").replace("&amp;", "&").replace("&#39;", "'");
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn absolute_url(href: &str) -> String {
    if href.starts_with("http") {
        href.to_string()
    } else {
        format!("{}{}", LAROUSSE_BASE, href)
    }
}
