//! Web specialist: fetches a page and reduces it to readable text.

use async_trait::async_trait;
use tracing::debug;

use nlmake_application::ports::SpecialistPort;
use nlmake_domain::core::string::truncate;
use nlmake_domain::{AgentTask, Specialist, SpecialistOutcome};

/// Cap on the text returned to the manager (50 KB).
const MAX_TEXT_SIZE: usize = 50 * 1024;

pub struct WebSpecialist {
    http: reqwest::Client,
}

impl WebSpecialist {
    pub fn new(timeout: std::time::Duration) -> Result<Self, reqwest::Error> {
        Ok(WebSpecialist {
            http: reqwest::Client::builder()
                .timeout(timeout)
                .user_agent("nlmake")
                .build()?,
        })
    }
}

#[async_trait]
impl SpecialistPort for WebSpecialist {
    fn specialist(&self) -> Specialist {
        Specialist::Web
    }

    fn mutates_state(&self) -> bool {
        false
    }

    async fn execute(&self, task: &AgentTask) -> SpecialistOutcome {
        let url = match task.get_string("url") {
            Some(url) => url,
            None if task.goal.starts_with("http://") || task.goal.starts_with("https://") => {
                task.goal.as_str()
            }
            None => {
                return SpecialistOutcome::failure(
                    "web task needs a 'url' param or a URL as its goal",
                );
            }
        };

        let response = match self.http.get(url).send().await {
            Ok(response) => response,
            Err(e) => return SpecialistOutcome::failure(format!("fetch failed: {e}")),
        };
        let status = response.status();
        if !status.is_success() {
            return SpecialistOutcome::failure(format!("fetch failed: HTTP {status}"));
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => return SpecialistOutcome::failure(format!("could not read body: {e}")),
        };
        debug!(url, bytes = body.len(), "page fetched");
        SpecialistOutcome::success(truncate(&html_to_text(&body), MAX_TEXT_SIZE))
    }
}

/// Strip an HTML document down to its visible text.
fn html_to_text(html: &str) -> String {
    use scraper::{Html, Selector};

    let document = Html::parse_document(html);
    let skip_tags = ["script", "style", "noscript", "svg"];

    let body_selector = Selector::parse("body").expect("static selector");
    let parts = match document.select(&body_selector).next() {
        Some(body) => collect_element_text(body, &skip_tags),
        None => collect_element_text(document.root_element(), &skip_tags),
    };

    let raw = parts.join(" ");
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn collect_element_text(element: scraper::ElementRef, skip_tags: &[&str]) -> Vec<String> {
    if skip_tags.contains(&element.value().name()) {
        return Vec::new();
    }
    let mut parts = Vec::new();
    for child in element.children() {
        match child.value() {
            scraper::Node::Text(text) => {
                let text = text.trim();
                if !text.is_empty() {
                    parts.push(text.to_string());
                }
            }
            scraper::Node::Element(_) => {
                if let Some(child_element) = scraper::ElementRef::wrap(child) {
                    parts.extend(collect_element_text(child_element, skip_tags));
                }
            }
            _ => {}
        }
    }
    parts
}
