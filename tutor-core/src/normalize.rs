//! Response normalizer: raw provider response into a single display string
//!
//! A pure projection. Empty responses never reach the UI as blank bubbles;
//! grounded responses carry a markdown Sources section after a horizontal
//! rule, with citations de-duplicated in first-seen order.

use crate::protocol::{ProviderReply, SourceRef};
use crate::provider::wire::GenerateResponse;
use std::collections::HashSet;
use std::fmt::Write;

/// Substituted when the provider returns no text at all
pub const FALLBACK_TEXT: &str = "No response generated.";

/// Project a raw response into text plus unique citations
pub fn reply(response: &GenerateResponse) -> ProviderReply {
    let raw = response.text();
    let text = if raw.trim().is_empty() {
        FALLBACK_TEXT.to_string()
    } else {
        raw
    };

    let mut sources = Vec::new();
    let mut seen: HashSet<(String, String)> = HashSet::new();
    for candidate in &response.candidates {
        let Some(metadata) = &candidate.grounding_metadata else {
            continue;
        };
        for chunk in &metadata.grounding_chunks {
            let Some(web) = &chunk.web else { continue };
            let (Some(title), Some(uri)) = (&web.title, &web.uri) else {
                continue;
            };
            if seen.insert((title.clone(), uri.clone())) {
                sources.push(SourceRef {
                    title: title.clone(),
                    uri: uri.clone(),
                });
            }
        }
    }

    ProviderReply { text, sources }
}

/// Render a response as the final display string
pub fn display_text(response: &GenerateResponse) -> String {
    let reply = reply(response);
    if reply.sources.is_empty() {
        return reply.text;
    }

    let mut out = reply.text;
    out.push_str("\n\n---\n\n**Sources:**\n");
    for source in &reply.sources {
        let _ = writeln!(out, "- [{}]({})", source.title, source.uri);
    }
    // No trailing newline after the last entry
    let trimmed_len = out.trim_end().len();
    out.truncate(trimmed_len);
    out
}
