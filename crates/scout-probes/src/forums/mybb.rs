//! MyBB forum probe.
//!
//! MyBB exposes an AJAX endpoint used by its registration form to check
//! whether an email is taken. The endpoint needs the anti-CSRF `my_post_key`
//! embedded in any forum page, so a check is two requests: fetch
//! `member.php`, then POST to `xmlhttp.php?action=email_availability`.

use crate::user_agent;
use async_trait::async_trait;
use regex::Regex;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, ORIGIN, REFERER, USER_AGENT};
use reqwest::{RequestBuilder, StatusCode};
use scout_core::ProviderId;
use scout_registry::{Probe, ProbeContext, ProbeError, ProbeReport, ProbeResult, ProviderDescriptor};
use std::sync::OnceLock;
use tracing::trace;

/// Marker served by the forums' web application firewall.
const BLOCKED_MARKER: &str = "Your request was blocked";

/// Error text MyBB returns for an email that is already registered.
const IN_USE_MARKER: &str = "email address that is already in use by another member.";

/// A MyBB-based forum.
#[derive(Debug, Clone, Copy)]
pub struct MybbForum {
    /// Provider ID
    pub id: &'static str,
    /// Display domain
    pub domain: &'static str,
    /// Forum root, without trailing slash
    pub base_url: &'static str,
}

/// Forums known to run MyBB with the email availability endpoint enabled.
pub const FORUMS: &[MybbForum] = &[
    MybbForum {
        id: "biosmods",
        domain: "bios-mods.com",
        base_url: "https://bios-mods.com/forum",
    },
    MybbForum {
        id: "blitzortung",
        domain: "forum.blitzortung.org",
        base_url: "https://forum.blitzortung.org",
    },
    MybbForum {
        id: "cambridgemt",
        domain: "discussion.cambridge-mt.com",
        base_url: "https://discussion.cambridge-mt.com",
    },
    MybbForum {
        id: "codeigniter",
        domain: "forum.codeigniter.com",
        base_url: "https://forum.codeigniter.com",
    },
    MybbForum {
        id: "koditv",
        domain: "forum.kodi.tv",
        base_url: "https://forum.kodi.tv",
    },
    MybbForum {
        id: "mybb",
        domain: "community.mybb.com",
        base_url: "https://community.mybb.com",
    },
    MybbForum {
        id: "ndemiccreations",
        domain: "forum.ndemiccreations.com",
        base_url: "https://forum.ndemiccreations.com",
    },
    MybbForum {
        id: "nextpvr",
        domain: "forums.nextpvr.com",
        base_url: "https://forums.nextpvr.com",
    },
    MybbForum {
        id: "odampublishing",
        domain: "forum.odampublishing.com",
        base_url: "https://forum.odampublishing.com",
    },
    MybbForum {
        id: "therianguide",
        domain: "forums.therian-guide.com",
        base_url: "https://forums.therian-guide.com",
    },
    MybbForum {
        id: "treasureclassifieds",
        domain: "forum.treasureclassifieds.com",
        base_url: "https://forum.treasureclassifieds.com",
    },
];

/// Descriptors for every forum in [`FORUMS`].
pub fn descriptors() -> scout_core::Result<Vec<ProviderDescriptor>> {
    FORUMS
        .iter()
        .map(|forum| -> scout_core::Result<ProviderDescriptor> {
            Ok(ProviderDescriptor::new(
                ProviderId::new(forum.id)?,
                forum.domain,
                MybbProbe::new(forum.base_url),
            ))
        })
        .collect()
}

/// Checks a MyBB forum's registration endpoint.
#[derive(Debug, Clone)]
pub struct MybbProbe {
    base_url: String,
}

impl MybbProbe {
    /// Create a probe for the forum rooted at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn member_url(&self) -> String {
        format!("{}/member.php", self.base_url)
    }

    fn xmlhttp_url(&self) -> String {
        format!("{}/xmlhttp.php", self.base_url)
    }

    fn with_browser_headers(&self, request: RequestBuilder, user_agent: &str) -> RequestBuilder {
        request
            .header(USER_AGENT, user_agent)
            .header(ACCEPT, "application/json, text/javascript, */*; q=0.01")
            .header(ACCEPT_LANGUAGE, "en,en-US;q=0.5")
            .header(REFERER, self.member_url())
            .header(ORIGIN, format!("{}/", self.base_url))
            .header("DNT", "1")
    }
}

#[async_trait]
impl Probe for MybbProbe {
    async fn probe(&self, email: &str, ctx: &ProbeContext) -> ProbeResult<ProbeReport> {
        let user_agent = user_agent::random_chrome();

        let response = self
            .with_browser_headers(ctx.client().get(self.member_url()), user_agent)
            .send()
            .await?;
        let status = response.status();
        let page = response.text().await?;

        if is_blocked(status, &page) {
            trace!(base_url = %self.base_url, %status, "member page blocked");
            return Ok(ProbeReport::rate_limited());
        }

        let post_key = extract_post_key(&page).ok_or_else(|| ProbeError::UnexpectedResponse {
            reason: "member page has no my_post_key".to_string(),
        })?;

        let response = self
            .with_browser_headers(ctx.client().post(self.xmlhttp_url()), user_agent)
            .header("X-Requested-With", "XMLHttpRequest")
            .query(&[("action", "email_availability")])
            .form(&[("email", email), ("my_post_key", post_key.as_str())])
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        Ok(classify_availability(status, &body))
    }
}

fn is_blocked(status: StatusCode, body: &str) -> bool {
    status != StatusCode::OK || body.contains(BLOCKED_MARKER)
}

/// Pull the anti-CSRF token out of a MyBB page.
#[must_use]
pub fn extract_post_key(page: &str) -> Option<String> {
    static POST_KEY: OnceLock<Regex> = OnceLock::new();
    let regex = POST_KEY
        .get_or_init(|| Regex::new(r#"var my_post_key = "([^"]+)""#).expect("valid regex"));

    regex
        .captures(page)
        .and_then(|caps| caps.get(1))
        .map(|key| key.as_str().to_string())
}

/// Interpret the `email_availability` response.
#[must_use]
pub fn classify_availability(status: StatusCode, body: &str) -> ProbeReport {
    if is_blocked(status, body) {
        ProbeReport::rate_limited()
    } else if body.contains(IN_USE_MARKER) {
        ProbeReport::found()
    } else {
        ProbeReport::not_found()
    }
}
