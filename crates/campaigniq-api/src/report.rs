use campaigniq_core::{CampaignRecommendation, Result};

/// Render the full Markdown report for a recommendation, ending in a fenced
/// JSON block that carries the record verbatim.
pub fn build_report(recommendation: &CampaignRecommendation) -> Result<String> {
    let mut out = String::new();

    out.push_str("🔍 **Analyzing your request and connected data sources...**\n\n");
    out.push_str(
        "Based on your connected data sources and selected channels, here's my \
         **AI-powered campaign recommendation**:\n\n",
    );

    out.push_str(&format!("## 🎯 **Campaign: {}**\n\n", recommendation.name));
    out.push_str(&format!("> {}\n\n", recommendation.description));

    out.push_str("### 👥 **Target Audience**\n\n");
    out.push_str("**Segments:**\n");
    for segment in &recommendation.target_audience.segments {
        out.push_str(&format!("- {}\n", segment));
    }
    out.push('\n');
    out.push_str("**Demographics:**\n");
    let demographics = &recommendation.target_audience.demographics;
    out.push_str(&format!("- **Age**: {}\n", demographics.age));
    out.push_str(&format!("- **Gender**: {}\n", demographics.gender));
    out.push_str(&format!("- **Location**: {}\n", demographics.location));
    out.push_str(&format!("- **Income**: {}\n", demographics.income));
    out.push('\n');
    out.push_str("**Behaviors:**\n");
    for behavior in &recommendation.target_audience.behaviors {
        out.push_str(&format!("- {}\n", behavior));
    }
    out.push('\n');

    out.push_str("### ⏰ **Optimal Timing**\n\n");
    out.push_str("**Best Times:**\n");
    for time in &recommendation.timing.optimal_times {
        out.push_str(&format!("- {}\n", time));
    }
    out.push_str(&format!("- **Frequency**: {}\n", recommendation.timing.frequency));
    out.push_str(&format!("- **Duration**: {}\n\n", recommendation.timing.duration));

    out.push_str("### 📱 **Channel Strategy**\n\n");
    out.push_str(&format!(
        "- **Primary Channel**: {}\n",
        recommendation.channels.primary
    ));
    out.push_str(&format!(
        "- **Secondary Channels**: {}\n\n",
        recommendation.channels.secondary.join(", ")
    ));
    out.push_str("**Budget Allocation:**\n");
    for (channel, amount) in &recommendation.channels.budget {
        out.push_str(&format!("- **{}**: ${}\n", channel, format_thousands(*amount)));
    }
    out.push('\n');

    out.push_str("### 📝 **Content Strategy**\n\n");
    if let Some(subject) = &recommendation.content.subject {
        out.push_str(&format!("- **Subject Line**: \"{}\"\n", subject));
    }
    out.push_str(&format!("- **Headline**: \"{}\"\n", recommendation.content.headline));
    out.push_str(&format!("- **Body**: \"{}\"\n", recommendation.content.body));
    out.push_str(&format!(
        "- **Call-to-Action**: \"{}\"\n\n",
        recommendation.content.cta
    ));

    out.push_str("### 📊 **Expected Performance**\n\n");
    out.push_str("| Metric | Value |\n");
    out.push_str("|--------|-------|\n");
    out.push_str(&format!(
        "| **Reach** | {} users |\n",
        format_thousands(recommendation.metrics.expected_reach)
    ));
    out.push_str(&format!(
        "| **Engagement Rate** | {}% |\n",
        recommendation.metrics.expected_engagement
    ));
    out.push_str(&format!(
        "| **Conversion Rate** | {}% |\n\n",
        recommendation.metrics.expected_conversion
    ));

    out.push_str("### 🚀 **Executable Campaign JSON**\n\n");
    out.push_str("```json\n");
    out.push_str(&serde_json::to_string_pretty(recommendation)?);
    out.push_str("\n```\n\n");
    out.push_str(
        "> 💡 **Ready to Execute**: This JSON payload can be directly used to \
         execute the campaign across your selected channels and data sources. \
         Simply copy the JSON and integrate it with your marketing automation \
         platform.",
    );

    Ok(out)
}

fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
