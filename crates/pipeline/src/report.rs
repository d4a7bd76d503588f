#![allow(clippy::format_push_string)]
#![allow(clippy::uninlined_format_args)]

use quadgate_core::{Decision, Layer, Signal};

pub struct DecisionFormatter;

impl DecisionFormatter {
    #[must_use]
    pub fn format(decision: &Decision) -> String {
        let mut output = String::new();

        output.push('\n');
        output.push_str("═══════════════════════════════════════════════════════════════\n");
        output.push_str("                    DECISION REPORT                            \n");
        output.push_str("═══════════════════════════════════════════════════════════════\n");
        output.push('\n');

        // Instrument
        output.push_str("Instrument\n");
        output.push_str("───────────────────────────────────────────────────────────────\n");
        output.push_str(&format!("Symbol:                {}\n", decision.symbol));
        output.push_str(&format!(
            "Market:                {} ({})\n",
            Self::market_name(decision),
            decision.market.currency()
        ));
        output.push_str(&format!(
            "As Of:                 {}\n",
            decision.as_of.format("%Y-%m-%d")
        ));
        output.push('\n');

        // Verdict
        output.push_str("Verdict\n");
        output.push_str("───────────────────────────────────────────────────────────────\n");
        let signal = match decision.signal {
            Signal::Buy => "BUY",
            Signal::Wait => "WAIT",
        };
        output.push_str(&format!("Signal:                {}\n", signal));
        output.push_str(&format!("Score:                 {}\n", decision.total_score));
        if let Some(reason) = &decision.rejection_reason {
            output.push_str(&format!("Reason:                {}\n", reason));
        }
        output.push('\n');

        // Layer Breakdown
        output.push_str("Layer Breakdown\n");
        output.push_str("───────────────────────────────────────────────────────────────\n");
        for result in &decision.layer_results {
            let mark = if result.passed { "✓" } else { "✗" };
            output.push_str(&format!(
                "{} {:<10} {}\n",
                mark,
                Self::layer_name(result.layer),
                result.reason
            ));
        }
        output.push('\n');

        // Trading Plan
        if let Some(plan) = &decision.plan {
            output.push_str("Trading Plan\n");
            output.push_str("───────────────────────────────────────────────────────────────\n");
            output.push_str(&format!(
                "Entry Band:            {:.2} - {:.2}\n",
                plan.entry_low, plan.entry_high
            ));
            output.push_str(&format!("Stop Loss:             {:.2}\n", plan.stop_loss));
            output.push_str(&format!("Target:                {:.2}\n", plan.target));
            output.push_str(&format!(
                "Risk/Reward:           {:.2}\n",
                plan.risk_reward
            ));
            output.push('\n');
        }

        output.push_str("═══════════════════════════════════════════════════════════════\n");

        if decision.signal == Signal::Wait {
            output.push_str("\n⚠️  No actionable entry. Re-evaluate on the next bar.\n\n");
        }

        output
    }

    fn market_name(decision: &Decision) -> &'static str {
        match decision.market {
            quadgate_core::MarketKind::AShare => "A-share",
            quadgate_core::MarketKind::HkStock => "Hong Kong",
        }
    }

    fn layer_name(layer: Layer) -> &'static str {
        match layer {
            Layer::Trend => "Trend",
            Layer::Position => "Position",
            Layer::Technical => "Technical",
            Layer::Sentiment => "Sentiment",
        }
    }
}
