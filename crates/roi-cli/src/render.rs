//! Terminal rendering of results and chat facts.

use colored::Colorize;
use roi_application::ChatStatus;
use roi_core::calculation::CalculationResult;
use roi_core::catalog;

/// Formats an amount with thousands separators and no decimals.
pub fn money(amount: f64) -> String {
    let rounded = amount.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded < 0.0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

pub fn print_result(result: &CalculationResult) {
    let tco = &result.tco_global;
    println!(
        "{}",
        format!("ROI results: {}", catalog::display_name(&result.system))
            .bright_magenta()
            .bold()
    );
    println!("{}", result.summary_text);
    println!();
    println!("  Current TCO   {}", money(tco.current_tco));
    println!("  Future TCO    {}", money(tco.future_tco));
    println!(
        "  ROI           {} ({:.1}%)",
        money(tco.roi_total).bright_green(),
        tco.roi_percentage
    );
    if let Some(months) = tco.payback_months {
        println!("  Payback       {months:.1} months");
    }

    if !result.dimensions.is_empty() {
        println!();
        for dimension in &result.dimensions {
            println!(
                "  {} {} -> {} ({:.1}%)",
                format!("{:<50}", dimension.dimension_name).bright_cyan(),
                money(dimension.current_tco),
                money(dimension.future_tco),
                dimension.impact_percentage
            );
            if let Some(description) = &dimension.description {
                println!("    {}", description.bright_black());
            }
        }
    }
}

pub fn print_status(status: &ChatStatus) {
    let conversation = status
        .conversation_id
        .as_ref()
        .map(|id| id.as_str().to_string())
        .unwrap_or_else(|| "-".to_string());
    println!(
        "{}",
        format!(
            "history: {} | pending corrections: {} | ready to calculate: {} | conversation: {}",
            status.history_len,
            status.pending_corrections,
            if status.ready_to_calculate { "yes" } else { "no" },
            conversation
        )
        .bright_black()
    );
}
