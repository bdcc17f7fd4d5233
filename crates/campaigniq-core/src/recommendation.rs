use indexmap::IndexMap;
use rand::Rng;
use tracing::debug;

use crate::types::{
    CampaignRecommendation, Channel, ChannelPlan, ContentPlan, DataSource, Demographics,
    ExpectedMetrics, TargetAudience, Timing,
};

pub const TOTAL_BUDGET: u64 = 10_000;

const CAMPAIGN_TYPES: [&str; 6] = [
    "Product Launch Campaign",
    "Retargeting Campaign",
    "Seasonal Promotion",
    "Customer Retention",
    "Brand Awareness",
    "Lead Generation",
];

const AUDIENCE_SEGMENTS: [&str; 7] = [
    "High-value customers",
    "Cart abandoners",
    "New subscribers",
    "Frequent buyers",
    "Price-sensitive users",
    "Mobile users",
    "Desktop users",
];

const BEHAVIORS: [&str; 6] = [
    "Frequent website visits",
    "High engagement with emails",
    "Mobile app usage",
    "Social media interaction",
    "Search behavior",
    "Purchase history",
];

const OPTIMAL_TIMES: [&str; 3] = [
    "9:00 AM - 11:00 AM",
    "2:00 PM - 4:00 PM",
    "7:00 PM - 9:00 PM",
];

const FREQUENCIES: [&str; 4] = ["Daily", "Every 2 days", "Weekly", "Bi-weekly"];

const DURATIONS: [&str; 4] = ["1 week", "2 weeks", "1 month", "6 weeks"];

fn pick<R: Rng + ?Sized>(rng: &mut R, pool: &[&str]) -> String {
    pool[rng.random_range(0..pool.len())].to_string()
}

fn prefix<R: Rng + ?Sized>(rng: &mut R, pool: &[&str], min: usize, max: usize) -> Vec<String> {
    let len = rng.random_range(min..=max);
    pool[..len].iter().map(|s| s.to_string()).collect()
}

/// Build a campaign recommendation for the given message and selections.
///
/// Pure apart from reading the clock for the id. Empty selections are valid
/// and produce degenerate output; the function never fails. Randomness comes
/// from the caller, so a seeded `StdRng` makes the output reproducible.
pub fn generate<R: Rng + ?Sized>(
    message: &str,
    data_sources: &[DataSource],
    channels: &[Channel],
    rng: &mut R,
) -> CampaignRecommendation {
    debug!(
        message_len = message.len(),
        data_sources = data_sources.len(),
        channels = channels.len(),
        "generating campaign recommendation"
    );

    let primary = channels
        .first()
        .map(|c| c.name.clone())
        .unwrap_or_else(|| "Email".to_string());
    let secondary: Vec<String> = channels.iter().skip(1).map(|c| c.name.clone()).collect();

    // 60% to the first channel, the remaining 40% split evenly across the
    // rest. A lone channel takes the whole total so the sum invariant holds
    // without dividing by the empty remainder.
    let mut budget = IndexMap::new();
    if channels.len() == 1 {
        budget.insert(channels[0].name.clone(), TOTAL_BUDGET);
    } else {
        for (index, channel) in channels.iter().enumerate() {
            let percentage = if index == 0 {
                60.0
            } else {
                40.0 / (channels.len() - 1) as f64
            };
            let amount = (TOTAL_BUDGET as f64 * percentage / 100.0).round() as u64;
            budget.insert(channel.name.clone(), amount);
        }
    }

    let subject = if primary == "Email" {
        Some("Exclusive Offer Just for You!".to_string())
    } else {
        None
    };

    CampaignRecommendation {
        id: format!("campaign_{}", chrono::Utc::now().timestamp_millis()),
        name: pick(rng, &CAMPAIGN_TYPES),
        description: format!(
            "A targeted campaign designed to maximize engagement and conversions \
             using insights from your connected data sources. This campaign leverages \
             {} data source(s) and {} channel(s) to deliver personalized experiences.",
            data_sources.len(),
            channels.len()
        ),
        target_audience: TargetAudience {
            segments: prefix(rng, &AUDIENCE_SEGMENTS, 2, 4),
            demographics: Demographics {
                age: "25-45".to_string(),
                gender: "All".to_string(),
                location: "Primary markets".to_string(),
                income: "Middle to high".to_string(),
            },
            behaviors: prefix(rng, &BEHAVIORS, 2, 4),
        },
        timing: Timing {
            optimal_times: prefix(rng, &OPTIMAL_TIMES, 1, 2),
            frequency: pick(rng, &FREQUENCIES),
            duration: pick(rng, &DURATIONS),
        },
        channels: ChannelPlan {
            primary,
            secondary,
            budget,
        },
        content: ContentPlan {
            subject,
            headline: "Don't Miss Out - Limited Time Offer".to_string(),
            body: "Based on your preferences and behavior, we've crafted this special \
                   offer just for you. Take advantage of this exclusive opportunity."
                .to_string(),
            cta: "Claim Your Offer Now".to_string(),
            media: vec![
                "hero-image.jpg".to_string(),
                "product-showcase.jpg".to_string(),
            ],
        },
        metrics: ExpectedMetrics {
            expected_reach: rng.random_range(10_000..60_000),
            expected_engagement: rng.random_range(5..20),
            expected_conversion: rng.random_range(2..10),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn channel(name: &str) -> Channel {
        Channel {
            id: name.to_lowercase(),
            name: name.to_string(),
            kind: Default::default(),
            status: Default::default(),
            config: None,
        }
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let channels = vec![channel("Email"), channel("SMS")];
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);
        let mut first = generate("launch", &[], &channels, &mut a);
        let second = generate("launch", &[], &channels, &mut b);

        // Only the time-based id may differ between the two calls.
        first.id = second.id.clone();
        assert_eq!(first, second);
    }

    #[test]
    fn primary_defaults_to_email_with_no_channels() {
        let mut rng = StdRng::seed_from_u64(1);
        let rec = generate("hi", &[], &[], &mut rng);
        assert_eq!(rec.channels.primary, "Email");
        assert!(rec.channels.secondary.is_empty());
        assert!(rec.channels.budget.is_empty());
    }

    #[test]
    fn secondary_preserves_input_order() {
        let channels = vec![channel("Push Notifications"), channel("SMS"), channel("Email")];
        let mut rng = StdRng::seed_from_u64(2);
        let rec = generate("hi", &[], &channels, &mut rng);
        assert_eq!(rec.channels.primary, "Push Notifications");
        assert_eq!(rec.channels.secondary, vec!["SMS", "Email"]);
    }

    #[test]
    fn budget_sums_to_total_within_rounding() {
        for n in 2..=4 {
            let channels: Vec<Channel> =
                (0..n).map(|i| channel(&format!("Channel {}", i))).collect();
            let mut rng = StdRng::seed_from_u64(3);
            let rec = generate("hi", &[], &channels, &mut rng);
            let sum: u64 = rec.channels.budget.values().sum();
            let drift = (TOTAL_BUDGET as i64 - sum as i64).abs();
            assert!(drift <= n as i64, "sum {} drifted too far for {} channels", sum, n);
            assert_eq!(*rec.channels.budget.get("Channel 0").unwrap(), 6_000);
        }
    }

    #[test]
    fn lone_channel_takes_the_whole_budget() {
        let channels = vec![channel("SMS")];
        let mut rng = StdRng::seed_from_u64(4);
        let rec = generate("hi", &[], &channels, &mut rng);
        assert_eq!(rec.channels.budget.len(), 1);
        assert_eq!(*rec.channels.budget.get("SMS").unwrap(), TOTAL_BUDGET);
    }

    #[test]
    fn subject_present_iff_primary_is_email() {
        let mut rng = StdRng::seed_from_u64(5);
        let with_email = generate("hi", &[], &[channel("Email"), channel("SMS")], &mut rng);
        assert!(with_email.content.subject.as_deref().is_some_and(|s| !s.is_empty()));

        let without = generate("hi", &[], &[channel("SMS"), channel("Email")], &mut rng);
        assert!(without.content.subject.is_none());
    }

    #[test]
    fn audience_lists_are_pool_prefixes() {
        for seed in 0..32 {
            let mut rng = StdRng::seed_from_u64(seed);
            let rec = generate("hi", &[], &[], &mut rng);

            let n = rec.target_audience.segments.len();
            assert!((2..=4).contains(&n));
            for (got, expect) in rec.target_audience.segments.iter().zip(AUDIENCE_SEGMENTS) {
                assert_eq!(got, expect);
            }

            let n = rec.target_audience.behaviors.len();
            assert!((2..=4).contains(&n));
            for (got, expect) in rec.target_audience.behaviors.iter().zip(BEHAVIORS) {
                assert_eq!(got, expect);
            }

            let n = rec.timing.optimal_times.len();
            assert!((1..=2).contains(&n));
        }
    }

    #[test]
    fn metrics_stay_in_range() {
        for seed in 0..32 {
            let mut rng = StdRng::seed_from_u64(seed);
            let rec = generate("hi", &[], &[], &mut rng);
            assert!((10_000..60_000).contains(&rec.metrics.expected_reach));
            assert!((5..20).contains(&rec.metrics.expected_engagement));
            assert!((2..10).contains(&rec.metrics.expected_conversion));
        }
    }

    #[test]
    fn description_counts_selections() {
        let sources = vec![DataSource {
            id: "gtm".into(),
            name: "Google Tag Manager".into(),
            kind: Default::default(),
            status: Default::default(),
            last_sync: None,
            config: None,
        }];
        let channels = vec![channel("Email"), channel("SMS")];
        let mut rng = StdRng::seed_from_u64(6);
        let rec = generate("hi", &sources, &channels, &mut rng);
        assert!(rec.description.contains("1 data source(s)"));
        assert!(rec.description.contains("2 channel(s)"));
    }
}
