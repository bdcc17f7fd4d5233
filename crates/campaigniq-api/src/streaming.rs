use axum::response::sse::Event;
use campaigniq_core::{ChunkPolicy, StreamingConfig};
use futures::{Stream, StreamExt};
use serde::Serialize;
use std::convert::Infallible;
use std::time::Duration;
use tokio::time::sleep;

/// Reserved payload value marking end-of-stream for the client.
pub const DONE_SENTINEL: &str = "[DONE]";

#[derive(Serialize)]
pub struct StreamChunk {
    pub content: String,
}

/// Delay applied after each emitted unit. Later rules override earlier ones,
/// so a unit matching several gets the last matching delay.
#[derive(Debug, Clone, Copy)]
pub struct PacingPolicy {
    pub base: Duration,
    pub newline: Duration,
    pub heading: Duration,
    pub fence: Duration,
    pub table: Duration,
}

impl PacingPolicy {
    pub fn from_config(config: &StreamingConfig) -> Self {
        Self {
            base: Duration::from_millis(config.base_delay_ms),
            newline: Duration::from_millis(config.newline_delay_ms),
            heading: Duration::from_millis(config.heading_delay_ms),
            fence: Duration::from_millis(config.fence_delay_ms),
            table: Duration::from_millis(config.table_delay_ms),
        }
    }

    pub fn delay_for(&self, unit: &str) -> Duration {
        let mut delay = self.base;
        if unit.contains('\n') {
            delay = self.newline;
        }
        if unit.contains("##") {
            delay = self.heading;
        }
        if unit.contains("```") {
            delay = self.fence;
        }
        if unit.contains('|') {
            delay = self.table;
        }
        delay
    }
}

/// Cut the report into emission units. Splitting is lossless: the units
/// concatenate back to the input byte-for-byte, so the accumulated prefix
/// ends up equal to the full report.
pub fn split_units(text: &str, policy: ChunkPolicy) -> Vec<&str> {
    match policy {
        ChunkPolicy::Word => text.split_inclusive(' ').collect(),
        ChunkPolicy::Line => text.split_inclusive('\n').collect(),
        ChunkPolicy::Section => split_sections(text),
    }
}

fn split_sections(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut units = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i + 1 < bytes.len() {
        if bytes[i] == b'\n' && bytes[i + 1] == b'\n' {
            units.push(&text[start..i + 2]);
            start = i + 2;
            i += 2;
        } else {
            i += 1;
        }
    }
    if start < text.len() {
        units.push(&text[start..]);
    }
    units
}

/// Emit a monotonically growing prefix of the report, one accumulated
/// snapshot per unit, then the completion sentinel. Each item carries the
/// entire content so far, so a client that only keeps the latest item has
/// the full message.
///
/// The stream is pull-driven: when the client disconnects the response body
/// is dropped, which cancels the pending sleep and ends the loop.
pub fn content_stream(
    report: String,
    chunking: ChunkPolicy,
    pacing: PacingPolicy,
) -> impl Stream<Item = String> {
    async_stream::stream! {
        let units: Vec<String> = split_units(&report, chunking)
            .into_iter()
            .map(str::to_string)
            .collect();

        let mut accumulated = String::with_capacity(report.len());
        for unit in units {
            accumulated.push_str(&unit);
            yield accumulated.clone();
            sleep(pacing.delay_for(&unit)).await;
        }

        yield DONE_SENTINEL.to_string();
    }
}

/// The same stream framed as SSE events: `data: {"content": ...}` per item.
pub fn sse_stream(
    report: String,
    chunking: ChunkPolicy,
    pacing: PacingPolicy,
) -> impl Stream<Item = Result<Event, Infallible>> {
    content_stream(report, chunking, pacing).map(|content| {
        let payload =
            serde_json::to_string(&StreamChunk { content }).unwrap_or_else(|_| "{}".to_string());
        Ok(Event::default().data(payload))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "🔍 **Analyzing...**\n\n## 🎯 **Campaign**\n\n| Metric | Value |\n|--------|-------|\n\n```json\n{\n  \"id\": \"campaign_1\"\n}\n```\n\n> Done.";

    fn zero_pacing() -> PacingPolicy {
        PacingPolicy {
            base: Duration::ZERO,
            newline: Duration::ZERO,
            heading: Duration::ZERO,
            fence: Duration::ZERO,
            table: Duration::ZERO,
        }
    }

    #[test]
    fn splitting_is_lossless_for_every_policy() {
        for policy in [ChunkPolicy::Word, ChunkPolicy::Line, ChunkPolicy::Section] {
            let units = split_units(SAMPLE, policy);
            assert!(!units.is_empty());
            assert_eq!(units.concat(), SAMPLE, "policy {:?} lost bytes", policy);
        }
    }

    #[test]
    fn section_units_end_on_blank_lines() {
        let units = split_units("a\n\nb\n\nc", ChunkPolicy::Section);
        assert_eq!(units, vec!["a\n\n", "b\n\n", "c"]);
    }

    #[test]
    fn later_pacing_rules_override_earlier_ones() {
        let pacing = PacingPolicy {
            base: Duration::from_millis(30),
            newline: Duration::from_millis(100),
            heading: Duration::from_millis(150),
            fence: Duration::from_millis(80),
            table: Duration::from_millis(50),
        };
        assert_eq!(pacing.delay_for("offer"), Duration::from_millis(30));
        assert_eq!(pacing.delay_for("line\nbreak"), Duration::from_millis(100));
        assert_eq!(pacing.delay_for("###\nheading"), Duration::from_millis(150));
        assert_eq!(pacing.delay_for("```json\n"), Duration::from_millis(80));
        // A table row containing a heading marker still takes the pipe delay.
        assert_eq!(pacing.delay_for("| ## x |\n"), Duration::from_millis(50));
    }

    #[tokio::test]
    async fn stream_grows_monotonically_and_ends_with_sentinel() {
        let items: Vec<String> =
            content_stream(SAMPLE.to_string(), ChunkPolicy::Line, zero_pacing())
                .collect()
                .await;

        assert!(items.len() >= 3);
        assert_eq!(items.last().unwrap(), DONE_SENTINEL);

        let contents = &items[..items.len() - 1];
        assert_eq!(contents.last().unwrap(), SAMPLE);
        for pair in contents.windows(2) {
            assert!(
                pair[1].starts_with(&pair[0]),
                "each item must extend the previous one"
            );
        }
    }

    #[tokio::test]
    async fn word_mode_emits_one_item_per_word_plus_sentinel() {
        let text = "pick the right audience";
        let items: Vec<String> =
            content_stream(text.to_string(), ChunkPolicy::Word, zero_pacing())
                .collect()
                .await;
        assert_eq!(items.len(), 4 + 1);
        assert_eq!(items[0], "pick ");
        assert_eq!(items[3], text);
    }
}
