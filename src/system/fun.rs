//! Jokes and quotes.

use std::time::Duration;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;

/// Public endpoint serving a random programming quote.
pub const QUOTE_URL: &str = "https://programming-quotes-api.herokuapp.com/quotes/random/lang/en";

/// Shown when no quote could be fetched.
pub const QUOTE_FALLBACK: &str = "Couldn't fetch an external quote. Enjoy coding!";

const QUOTE_TIMEOUT: Duration = Duration::from_secs(5);

pub const JOKES: &[&str] = &[
    "Why do programmers prefer dark mode? Because light attracts bugs!",
    "How many programmers does it take to change a light bulb? None, that's a hardware problem.",
    "Why do Java developers wear glasses? Because they can't C#!",
    "A SQL query goes into a bar, walks up to two tables and asks: 'Can I join you?'",
    "Why did the programmer quit their job? They didn't get arrays!",
    "What do you call a programmer from Finland? Nerdic.",
    "Why don't Rust programmers fight? They always borrow, never own the argument.",
    "How do you comfort a JavaScript bug? You console it!",
    "Why don't programmers like nature? It has too many bugs.",
    "What's a programmer's favorite hangout place? The Foo Bar!",
];

/// Picks a random joke.
pub fn random_joke<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    JOKES.choose(rng).copied().unwrap_or(JOKES[0])
}

#[derive(Debug, Deserialize)]
struct QuoteResponse {
    en: Option<String>,
    author: Option<String>,
}

/// Fetches a random quote, falling back to [`QUOTE_FALLBACK`] on any
/// network or decoding failure.
pub fn fetch_quote() -> String {
    match try_fetch_quote(QUOTE_URL) {
        Ok(quote) => quote,
        Err(e) => {
            tracing::debug!("Quote fetch failed: {e:#}");
            QUOTE_FALLBACK.to_string()
        }
    }
}

fn try_fetch_quote(url: &str) -> anyhow::Result<String> {
    let client = reqwest::blocking::Client::builder()
        .timeout(QUOTE_TIMEOUT)
        .build()?;
    let response: QuoteResponse = client.get(url).send()?.error_for_status()?.json()?;
    Ok(format_quote(response))
}

fn format_quote(response: QuoteResponse) -> String {
    match response.en {
        Some(text) if !text.trim().is_empty() => {
            let author = response.author.unwrap_or_else(|| "Unknown".to_string());
            format!("\"{}\" - {}", text.trim(), author)
        }
        _ => QUOTE_FALLBACK.to_string(),
    }
}
