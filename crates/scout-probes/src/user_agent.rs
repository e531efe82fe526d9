//! Browser User-Agent strings for probes that need to look like a browser.

use rand::seq::SliceRandom;

const CHROME: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/123.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36 Edg/122.0.0.0",
];

/// Pick a Chrome User-Agent at random.
#[must_use]
pub fn random_chrome() -> &'static str {
    CHROME
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(CHROME[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_chrome_is_from_list() {
        for _ in 0..20 {
            let ua = random_chrome();
            assert!(CHROME.contains(&ua));
            assert!(ua.contains("Chrome/"));
        }
    }
}
